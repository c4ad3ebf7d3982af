//! Built-in charge configurations and wholesale charge-set replacement.

use crate::charge::{Charge, ChargeSet};
use crate::vector::Vector2D;
use std::f64::consts::PI;

/// All built-in scenarios in index order.
pub const SCENARIOS: [Scenario; 5] = [
    Scenario::Single,
    Scenario::Pair,
    Scenario::Dipole,
    Scenario::Quad,
    Scenario::Oscillating,
];

/// A named initial charge configuration, selected by index 0..=4.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Scenario {
    /// +1 at the origin.
    #[default]
    Single,
    /// +1 at (-1, 0) and +1 at (1, 0).
    Pair,
    /// -1 at (-1, 0) and +2 at (1, 0).
    Dipole,
    /// +1, +2, -3, -4 on the corners of the square with half-side 1.
    Quad,
    /// The `Pair` layout with magnitudes `1 +/- 0.5 sin(pi t)`.
    Oscillating,
}

impl Scenario {
    pub fn from_index(index: usize) -> Option<Self> {
        SCENARIOS.get(index).copied()
    }

    /// Like [`Scenario::from_index`], falling back to scenario 0.
    pub fn from_index_or_default(index: i64) -> Self {
        usize::try_from(index)
            .ok()
            .and_then(Self::from_index)
            .unwrap_or_default()
    }

    pub fn index(self) -> usize {
        match self {
            Scenario::Single => 0,
            Scenario::Pair => 1,
            Scenario::Dipole => 2,
            Scenario::Quad => 3,
            Scenario::Oscillating => 4,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Scenario::Single => "single",
            Scenario::Pair => "pair",
            Scenario::Dipole => "dipole",
            Scenario::Quad => "quad",
            Scenario::Oscillating => "oscillating",
        }
    }

    /// The preset charges, as at time zero.
    pub fn charges(self) -> Vec<Charge> {
        let c = |x: f32, y: f32, q: f32| Charge::new(Vector2D::new(x, y), q);
        match self {
            Scenario::Single => vec![c(0.0, 0.0, 1.0)],
            Scenario::Pair | Scenario::Oscillating => vec![c(-1.0, 0.0, 1.0), c(1.0, 0.0, 1.0)],
            Scenario::Dipole => vec![c(-1.0, 0.0, -1.0), c(1.0, 0.0, 2.0)],
            Scenario::Quad => vec![
                c(-1.0, -1.0, 1.0),
                c(1.0, -1.0, 2.0),
                c(1.0, 1.0, -3.0),
                c(-1.0, 1.0, -4.0),
            ],
        }
    }

    /// Whether charge magnitudes change with time, forcing a redraw every tick.
    pub fn is_animated(self) -> bool {
        matches!(self, Scenario::Oscillating)
    }

    /// Drives time-dependent magnitudes to their values at `elapsed_seconds`.
    ///
    /// Only the first two charges are driven; missing charges are skipped.
    /// Returns whether anything changed.
    pub fn animate(self, charges: &mut ChargeSet, elapsed_seconds: f64) -> bool {
        if !self.is_animated() {
            return false;
        }
        let swing = 0.5 * (PI * elapsed_seconds).sin();
        let targets = [(1.0 + swing) as f32, (1.0 - swing) as f32];
        let mut changed = false;
        for (index, magnitude) in targets.into_iter().enumerate() {
            changed |= charges.set_magnitude(index, magnitude).is_ok();
        }
        changed
    }
}

/// Replaces the whole charge set with `charges` in one step.
pub fn apply_charge_list(set: &mut ChargeSet, charges: Vec<Charge>) {
    log::info!("loaded {} charges", charges.len());
    set.replace(charges);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coulomb::field_at;

    #[test]
    fn scenario_0_is_unit_charge_at_origin() {
        assert_eq!(
            Scenario::Single.charges(),
            vec![Charge::new(Vector2D::ZERO, 1.0)]
        );
    }

    #[test]
    fn scenario_1_has_symmetric_zero_at_origin() {
        let charges = Scenario::Pair.charges();
        assert_eq!(charges.len(), 2);
        assert_eq!(charges[0], Charge::new(Vector2D::new(-1.0, 0.0), 1.0));
        assert_eq!(charges[1], Charge::new(Vector2D::new(1.0, 0.0), 1.0));
        assert_eq!(field_at(Vector2D::ZERO, &charges), Vector2D::ZERO);
    }

    #[test]
    fn scenario_2_is_asymmetric_dipole() {
        let charges = Scenario::Dipole.charges();
        assert_eq!(charges[0].magnitude, -1.0);
        assert_eq!(charges[1].magnitude, 2.0);
    }

    #[test]
    fn scenario_3_net_charge_is_minus_four() {
        let set = ChargeSet::from_charges(Scenario::Quad.charges());
        assert_eq!(set.len(), 4);
        assert_eq!(set.net_charge(), -4.0);
        assert_eq!(set.get(2).unwrap().position, Vector2D::new(1.0, 1.0));
    }

    #[test]
    fn from_index_covers_all_and_rejects_others() {
        for (i, s) in SCENARIOS.iter().enumerate() {
            assert_eq!(Scenario::from_index(i), Some(*s));
            assert_eq!(s.index(), i);
        }
        assert_eq!(Scenario::from_index(5), None);
    }

    #[test]
    fn out_of_range_index_falls_back_to_zero() {
        assert_eq!(Scenario::from_index_or_default(9), Scenario::Single);
        assert_eq!(Scenario::from_index_or_default(-1), Scenario::Single);
        assert_eq!(Scenario::from_index_or_default(3), Scenario::Quad);
    }

    #[test]
    fn only_oscillating_is_animated() {
        assert!(Scenario::Oscillating.is_animated());
        let mut set = ChargeSet::from_charges(Scenario::Pair.charges());
        let before = set.version();
        assert!(!Scenario::Pair.animate(&mut set, 0.5));
        assert_eq!(set.version(), before);
    }

    #[test]
    fn oscillation_follows_sine() {
        let mut set = ChargeSet::from_charges(Scenario::Oscillating.charges());
        assert!(Scenario::Oscillating.animate(&mut set, 0.5));
        assert!((set.get(0).unwrap().magnitude - 1.5).abs() < 1e-6);
        assert!((set.get(1).unwrap().magnitude - 0.5).abs() < 1e-6);
        Scenario::Oscillating.animate(&mut set, 1.5);
        assert!((set.get(0).unwrap().magnitude - 0.5).abs() < 1e-6);
        assert!((set.get(1).unwrap().magnitude - 1.5).abs() < 1e-6);
    }

    #[test]
    fn oscillation_tolerates_removed_charges() {
        let mut set = ChargeSet::from_charges(vec![Charge::new(Vector2D::ZERO, 1.0)]);
        assert!(Scenario::Oscillating.animate(&mut set, 0.5));
        assert_eq!(set.len(), 1);
        let mut empty = ChargeSet::new();
        assert!(!Scenario::Oscillating.animate(&mut empty, 0.5));
    }

    #[test]
    fn apply_charge_list_replaces_everything() {
        let mut set = ChargeSet::from_charges(Scenario::Quad.charges());
        let before = set.version();
        apply_charge_list(&mut set, Scenario::Single.charges());
        assert_eq!(set.len(), 1);
        assert!(set.version() > before);
    }
}
