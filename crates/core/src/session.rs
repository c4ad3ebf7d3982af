//! A visualization session: the charge set plus everything derived from it.
//!
//! `Session` is the single owner of mutable state. Input handlers (press,
//! drag, scroll, resize, editor actions) and the periodic tick all go through
//! it, and every charge mutation bumps the charge set's version so the
//! intensity grid is rebuilt on the next request.

use crate::cache::IntensityCache;
use crate::charge::{Charge, ChargeSet, MAX_MAGNITUDE};
use crate::charge_file::read_charge_list;
use crate::config::SimulationConfig;
use crate::coulomb::{Coulomb, FieldSource};
use crate::error::FieldError;
use crate::grid::IntensityGrid;
use crate::launch::LaunchSource;
use crate::probe::{ProbeReadings, ProbeSampler};
use crate::scenario::{apply_charge_list, Scenario};
use crate::transform::{Transform, Viewport};
use crate::vector::Vector2D;
use std::path::Path;

/// What a press on the viewport did.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PressOutcome {
    /// A charge was hit and is now being dragged.
    Selected(usize),
    /// Empty space was hit; the free probe now orbits through this world point.
    ProbePlaced(Vector2D),
}

/// Owned, versioned simulation state.
#[derive(Debug, Clone)]
pub struct Session {
    config: SimulationConfig,
    charges: ChargeSet,
    scenario: Option<Scenario>,
    ticks: u64,
    probes: ProbeSampler,
    cache: IntensityCache,
    transform: Transform,
    selected: Option<usize>,
}

impl Session {
    /// An empty session (no charges) over `viewport`.
    pub fn new(config: SimulationConfig, viewport: Viewport) -> Self {
        Self {
            config,
            charges: ChargeSet::new(),
            scenario: None,
            ticks: 0,
            probes: ProbeSampler::new(config.probe_radius),
            cache: IntensityCache::new(),
            transform: Transform::new(viewport, config.world_half_extent),
            selected: None,
        }
    }

    pub fn with_scenario(config: SimulationConfig, viewport: Viewport, scenario: Scenario) -> Self {
        let mut session = Self::new(config, viewport);
        session.load_scenario(scenario);
        session
    }

    /// Builds a session from a launch source.
    ///
    /// A file that fails to load is reported and leaves the session on scenario 0.
    pub fn from_launch(
        config: SimulationConfig,
        viewport: Viewport,
        source: &LaunchSource,
    ) -> (Self, Option<FieldError>) {
        let mut session = Self::with_scenario(config, viewport, Scenario::default());
        let error = match source {
            LaunchSource::Scenario(s) => {
                session.load_scenario(*s);
                None
            }
            LaunchSource::File(path) => session.load_file(path).err(),
        };
        (session, error)
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    pub fn charges(&self) -> &ChargeSet {
        &self.charges
    }

    /// The active built-in scenario, or `None` after loading a charge list.
    pub fn scenario(&self) -> Option<Scenario> {
        self.scenario
    }

    pub fn probes(&self) -> &ProbeSampler {
        &self.probes
    }

    pub fn transform(&self) -> &Transform {
        &self.transform
    }

    pub fn cache(&self) -> &IntensityCache {
        &self.cache
    }

    pub fn selected(&self) -> Option<usize> {
        self.selected
    }

    /// Simulated seconds since the session started.
    pub fn elapsed(&self) -> f64 {
        self.ticks as f64 * self.config.tick_interval as f64
    }

    // -- Loading --

    /// Replaces all charges with a built-in scenario's preset.
    pub fn load_scenario(&mut self, scenario: Scenario) {
        log::debug!("loading scenario {} ({})", scenario.index(), scenario.name());
        self.charges.replace(scenario.charges());
        let elapsed = self.elapsed();
        scenario.animate(&mut self.charges, elapsed);
        self.scenario = Some(scenario);
        self.selected = None;
    }

    /// Replaces all charges with an externally decoded list.
    pub fn load_charges(&mut self, charges: Vec<Charge>) {
        apply_charge_list(&mut self.charges, charges);
        self.scenario = None;
        self.selected = None;
    }

    /// Loads a charge list file. On failure the current charges are kept.
    pub fn load_file(&mut self, path: &Path) -> Result<(), FieldError> {
        match read_charge_list(path) {
            Ok(charges) => {
                self.load_charges(charges);
                Ok(())
            }
            Err(e) => {
                log::warn!("error loading charges from {}: {e}", path.display());
                Err(e)
            }
        }
    }

    // -- Time --

    /// Advances one tick: animated magnitudes update, probes record at their
    /// current positions and then move along their orbits.
    pub fn step(&mut self) -> ProbeReadings {
        self.step_with(&Coulomb)
    }

    /// [`Session::step`] with an explicit field source.
    pub fn step_with<S: FieldSource + ?Sized>(&mut self, source: &S) -> ProbeReadings {
        self.ticks += 1;
        if let Some(scenario) = self.scenario.filter(|s| s.is_animated()) {
            let elapsed = self.elapsed();
            scenario.animate(&mut self.charges, elapsed);
            self.cache.invalidate();
        }
        let readings = self
            .probes
            .record(source, self.charges.as_slice(), self.config.tick_interval);
        self.probes.tick(self.config.probe_step());
        readings
    }

    // -- Derived data --

    /// Field vector at a world point.
    pub fn field_at(&self, point: Vector2D) -> Vector2D {
        Coulomb.field_at(point, self.charges.as_slice())
    }

    /// The intensity grid for the current state, rebuilt only if stale.
    pub fn intensity_grid(&mut self) -> &IntensityGrid {
        self.intensity_grid_with(&Coulomb)
    }

    /// [`Session::intensity_grid`] with an explicit field source.
    pub fn intensity_grid_with<S: FieldSource + ?Sized>(&mut self, source: &S) -> &IntensityGrid {
        self.cache
            .compute(source, &self.charges, &self.transform, self.config.cell_size)
    }

    /// Marks the intensity grid stale.
    pub fn invalidate(&mut self) {
        self.cache.invalidate();
    }

    /// Changes the viewport size.
    pub fn resize(&mut self, viewport: Viewport) {
        self.transform = Transform::new(viewport, self.config.world_half_extent);
        self.cache.invalidate();
    }

    // -- Interaction --

    /// Screen radius of a charge's disc; also its hit area.
    pub fn charge_radius(&self, charge: &Charge) -> f32 {
        charge.magnitude.abs() * self.transform.scale() * self.config.hit_radius_factor
    }

    /// Indices of every charge whose disc contains `screen`, in order.
    fn hits(&self, screen: Vector2D) -> impl Iterator<Item = usize> + '_ {
        self.charges.iter().enumerate().filter_map(move |(i, c)| {
            let center = self.transform.world_to_screen(c.position);
            ((center - screen).magnitude() < self.charge_radius(c)).then_some(i)
        })
    }

    /// First charge whose disc contains the screen point.
    pub fn hit_test(&self, screen: Vector2D) -> Option<usize> {
        self.hits(screen).next()
    }

    /// Press at a screen point: grabs the first hit charge, otherwise places
    /// the free probe there (restarting its series).
    pub fn press(&mut self, screen: Vector2D) -> PressOutcome {
        if let Some(index) = self.hit_test(screen) {
            self.selected = Some(index);
            return PressOutcome::Selected(index);
        }
        let world = self.transform.screen_to_world(screen);
        self.place_probe(world);
        PressOutcome::ProbePlaced(world)
    }

    /// Puts the free probe on the orbit through a world point.
    pub fn place_probe(&mut self, world: Vector2D) {
        self.probes.place(world);
    }

    /// Moves the grabbed charge under the pointer. Returns whether a charge moved.
    pub fn drag(&mut self, screen: Vector2D) -> bool {
        let Some(index) = self.selected else {
            return false;
        };
        let world = self.transform.screen_to_world(screen);
        self.charges.set_position(index, world).is_ok()
    }

    pub fn release(&mut self) {
        self.selected = None;
    }

    /// Scroll over a charge: changes the last hit charge's magnitude by
    /// `scroll_step * notches`, clamped to the magnitude limit.
    ///
    /// Returns the charge index and new magnitude, or `None` if nothing was hit.
    pub fn scroll(&mut self, screen: Vector2D, notches: i32) -> Option<(usize, f32)> {
        let index = self.hits(screen).last()?;
        let delta = self.config.scroll_step * notches as f32;
        let limit = self.config.magnitude_limit.min(MAX_MAGNITUDE);
        self.charges
            .adjust_magnitude(index, delta, limit)
            .ok()
            .map(|m| (index, m))
    }

    // -- Editor --

    pub fn add_charge(&mut self, charge: Charge) {
        self.charges.push(charge);
    }

    /// Removes a charge by index; a drag on that charge is cancelled.
    pub fn remove_charge(&mut self, index: usize) -> Result<Charge, FieldError> {
        let removed = self.charges.remove(index)?;
        self.selected = None;
        Ok(removed)
    }

    pub fn edit_charge(&mut self, index: usize, charge: Charge) -> Result<(), FieldError> {
        self.charges.set(index, charge)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn session(scenario: Scenario) -> Session {
        Session::with_scenario(
            SimulationConfig::default(),
            Viewport::new(400, 400).unwrap(),
            scenario,
        )
    }

    #[test]
    fn scenario_load_populates_charges() {
        let s = session(Scenario::Quad);
        assert_eq!(s.charges().len(), 4);
        assert_eq!(s.scenario(), Some(Scenario::Quad));
    }

    #[test]
    fn grid_is_cached_until_state_changes() {
        let mut s = session(Scenario::Pair);
        s.intensity_grid();
        s.intensity_grid();
        assert_eq!(s.cache().recompute_count(), 1);
        s.resize(Viewport::new(200, 200).unwrap());
        assert_eq!(s.intensity_grid().width(), 25);
        assert_eq!(s.cache().recompute_count(), 2);
    }

    #[test]
    fn static_scenario_step_keeps_grid_valid() {
        let mut s = session(Scenario::Dipole);
        s.intensity_grid();
        s.step();
        s.intensity_grid();
        assert_eq!(s.cache().recompute_count(), 1);
    }

    #[test]
    fn oscillating_scenario_invalidates_every_tick() {
        let mut s = session(Scenario::Oscillating);
        s.intensity_grid();
        for _ in 0..3 {
            s.step();
            s.intensity_grid();
        }
        assert_eq!(s.cache().recompute_count(), 4);
        let expected = 1.0 + 0.5 * (std::f64::consts::PI * s.elapsed()).sin();
        assert!((s.charges().get(0).unwrap().magnitude as f64 - expected).abs() < 1e-5);
    }

    #[test]
    fn step_records_probe_samples() {
        let mut s = session(Scenario::Single);
        s.step();
        s.step();
        assert_eq!(s.probes().orbiting().series().len(), 2);
        assert!((s.elapsed() - 0.1).abs() < 1e-6);
    }

    #[test]
    fn press_on_charge_selects_and_drag_moves_it() {
        let mut s = session(Scenario::Single);
        // Origin charge sits at the viewport center.
        assert_eq!(
            s.press(Vector2D::new(200.0, 200.0)),
            PressOutcome::Selected(0)
        );
        let version = s.charges().version();
        assert!(s.drag(Vector2D::new(300.0, 200.0)));
        assert_eq!(s.charges().get(0).unwrap().position, Vector2D::new(1.0, 0.0));
        assert!(s.charges().version() > version);
        s.release();
        assert!(!s.drag(Vector2D::new(0.0, 0.0)));
    }

    #[test]
    fn press_on_empty_space_places_probe() {
        let mut s = session(Scenario::Single);
        s.step();
        let outcome = s.press(Vector2D::new(300.0, 100.0));
        assert_eq!(outcome, PressOutcome::ProbePlaced(Vector2D::new(1.0, 1.0)));
        let free = s.probes().free().unwrap();
        assert!(free.series().is_empty());
        assert!((free.radius() - 2.0_f32.sqrt()).abs() < 1e-6);
        s.step();
        assert_eq!(s.probes().free().unwrap().series().len(), 1);
    }

    #[test]
    fn first_free_sample_is_taken_where_the_probe_was_placed() {
        let mut s = session(Scenario::Single);
        let placed = Vector2D::new(0.5, 0.0);
        s.place_probe(placed);
        let readings = s.step();
        let at_placement = s.field_at(placed);
        assert_eq!(readings.free, Some(at_placement));
        let first = s.probes().free().unwrap().series()[0];
        assert_eq!(first.time_offset_seconds, 0.0);
        assert_eq!(first.field_magnitude, at_placement.magnitude());
        assert_ne!(s.probes().free().unwrap().position(), placed);
    }

    #[test]
    fn hit_radius_scales_with_magnitude() {
        let s = session(Scenario::Single);
        // scale = 100 px per unit, radius = 1 * 100 * 0.13 = 13 px
        assert_eq!(s.hit_test(Vector2D::new(212.0, 200.0)), Some(0));
        assert_eq!(s.hit_test(Vector2D::new(214.0, 200.0)), None);
    }

    #[test]
    fn scroll_adjusts_and_clamps_magnitude() {
        let mut s = session(Scenario::Single);
        let center = Vector2D::new(200.0, 200.0);
        let (index, m) = s.scroll(center, 1).unwrap();
        assert_eq!(index, 0);
        assert!((m - 1.05).abs() < 1e-6);
        let (_, m) = s.scroll(center, 1000).unwrap();
        assert_eq!(m, 4.0);
        let (_, m) = s.scroll(center, -10_000).unwrap();
        assert_eq!(m, -4.0);
    }

    #[test]
    fn scroll_never_exceeds_the_magnitude_bound() {
        let center = Vector2D::new(200.0, 200.0);
        let viewport = Viewport::new(400, 400).unwrap();
        let config = SimulationConfig::from_json(&serde_json::json!({ "magnitude_limit": 10.0 }));
        let mut s = Session::with_scenario(config, viewport, Scenario::Single);
        assert_eq!(s.scroll(center, 1000).unwrap().1, MAX_MAGNITUDE);

        let config = SimulationConfig {
            magnitude_limit: 10.0,
            ..SimulationConfig::default()
        };
        let mut s = Session::with_scenario(config, viewport, Scenario::Single);
        assert_eq!(s.scroll(center, -1000).unwrap().1, -MAX_MAGNITUDE);
    }

    #[test]
    fn scroll_on_empty_space_changes_nothing() {
        let mut s = session(Scenario::Single);
        let version = s.charges().version();
        assert!(s.scroll(Vector2D::new(10.0, 10.0), 1).is_none());
        assert_eq!(s.charges().version(), version);
    }

    #[test]
    fn scroll_prefers_last_overlapping_charge() {
        let mut s = session(Scenario::Single);
        s.add_charge(Charge::new(Vector2D::ZERO, 2.0));
        let (index, _) = s.scroll(Vector2D::new(200.0, 200.0), 1).unwrap();
        assert_eq!(index, 1);
        assert_eq!(s.hit_test(Vector2D::new(200.0, 200.0)), Some(0));
    }

    #[test]
    fn editor_operations() {
        let mut s = session(Scenario::Pair);
        s.add_charge(Charge::parse("0", "1", "-2").unwrap());
        assert_eq!(s.charges().len(), 3);
        s.edit_charge(0, Charge::new(Vector2D::new(0.0, -1.0), 3.0))
            .unwrap();
        assert_eq!(s.charges().get(0).unwrap().magnitude, 3.0);
        s.remove_charge(1).unwrap();
        assert_eq!(s.charges().len(), 2);
        assert!(s.remove_charge(5).is_err());
    }

    #[test]
    fn failed_file_load_keeps_previous_charges() {
        let mut s = session(Scenario::Quad);
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "not json").unwrap();
        assert!(s.load_file(file.path()).is_err());
        assert_eq!(s.charges().len(), 4);
        assert_eq!(s.scenario(), Some(Scenario::Quad));
    }

    #[test]
    fn file_load_replaces_charges_and_stops_animation() {
        let mut s = session(Scenario::Oscillating);
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"[{{"position": {{"X": 0.5, "Y": 0.5}}, "Magnitute": -1.0}}]"#
        )
        .unwrap();
        s.load_file(file.path()).unwrap();
        assert_eq!(s.charges().len(), 1);
        assert_eq!(s.scenario(), None);
        s.step();
        assert_eq!(s.charges().get(0).unwrap().magnitude, -1.0);
    }

    #[test]
    fn from_launch_reports_bad_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.json");
        std::fs::write(&path, "{}").unwrap();
        let (s, err) = Session::from_launch(
            SimulationConfig::default(),
            Viewport::new(100, 100).unwrap(),
            &LaunchSource::File(path),
        );
        assert!(matches!(err, Some(FieldError::InvalidChargeList(_))));
        assert_eq!(s.scenario(), Some(Scenario::Single));
    }
}
