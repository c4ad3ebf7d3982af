//! Orbiting probes that sample the field magnitude over time.
//!
//! There is always one permanent probe circling the origin. A second, free
//! probe can be placed anywhere; it then orbits the origin at the distance it
//! was placed, and its sample series starts over with every placement.
//! Series keep the most recent [`MAX_SERIES_LEN`] samples.

use crate::charge::Charge;
use crate::coulomb::FieldSource;
use crate::vector::Vector2D;
use serde::Serialize;
use std::f32::consts::TAU;

/// Samples kept per probe; older ones are dropped first.
pub const MAX_SERIES_LEN: usize = 4096;

/// One entry in a probe's time series.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ProbeSample {
    pub time_offset_seconds: f32,
    pub field_magnitude: f32,
}

/// A point on a circular orbit around the origin with its recorded samples.
#[derive(Debug, Clone, PartialEq)]
pub struct Probe {
    radius: f32,
    angle: f32,
    series: Vec<ProbeSample>,
    recorded: u64,
}

impl Probe {
    pub fn new(radius: f32, angle: f32) -> Self {
        Self {
            radius,
            angle: angle.rem_euclid(TAU),
            series: Vec::new(),
            recorded: 0,
        }
    }

    /// A probe whose orbit passes through `point`.
    pub fn through(point: Vector2D) -> Self {
        Self::new(point.magnitude(), point.angle())
    }

    pub fn radius(&self) -> f32 {
        self.radius
    }

    /// Current angle in `[0, 2 pi)`.
    pub fn angle(&self) -> f32 {
        self.angle
    }

    pub fn position(&self) -> Vector2D {
        Vector2D::from_polar(self.radius, self.angle)
    }

    /// Moves the probe `delta` radians along its orbit.
    pub fn advance(&mut self, delta: f32) {
        self.angle = (self.angle + delta).rem_euclid(TAU);
    }

    /// Recorded samples, oldest first.
    pub fn series(&self) -> &[ProbeSample] {
        &self.series
    }

    fn record(&mut self, field_magnitude: f32, interval: f32) {
        if self.series.len() >= MAX_SERIES_LEN {
            let excess = self.series.len() + 1 - MAX_SERIES_LEN;
            self.series.drain(..excess);
        }
        let time_offset_seconds = self.recorded as f32 * interval;
        self.recorded += 1;
        self.series.push(ProbeSample {
            time_offset_seconds,
            field_magnitude,
        });
    }
}

/// Field vectors read at the probes on one tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProbeReadings {
    pub orbiting: Vector2D,
    pub free: Option<Vector2D>,
}

/// The permanent orbiting probe plus an optional user-placed one.
#[derive(Debug, Clone, PartialEq)]
pub struct ProbeSampler {
    orbiting: Probe,
    free: Option<Probe>,
}

impl ProbeSampler {
    /// Starts the permanent probe at angle 0 on a circle of `radius`.
    pub fn new(radius: f32) -> Self {
        Self {
            orbiting: Probe::new(radius, 0.0),
            free: None,
        }
    }

    pub fn orbiting(&self) -> &Probe {
        &self.orbiting
    }

    pub fn free(&self) -> Option<&Probe> {
        self.free.as_ref()
    }

    /// Places (or re-places) the free probe at `point`, discarding its old series.
    pub fn place(&mut self, point: Vector2D) {
        log::debug!("free probe placed at ({}, {})", point.x, point.y);
        self.free = Some(Probe::through(point));
    }

    pub fn clear_free(&mut self) {
        self.free = None;
    }

    /// Advances every probe by `delta_angle` radians.
    pub fn tick(&mut self, delta_angle: f32) {
        self.orbiting.advance(delta_angle);
        if let Some(free) = self.free.as_mut() {
            free.advance(delta_angle);
        }
    }

    /// Field at each probe's current position.
    pub fn sample_field<S: FieldSource + ?Sized>(
        &self,
        source: &S,
        charges: &[Charge],
    ) -> ProbeReadings {
        ProbeReadings {
            orbiting: source.field_at(self.orbiting.position(), charges),
            free: self
                .free
                .as_ref()
                .map(|p| source.field_at(p.position(), charges)),
        }
    }

    /// Samples every probe and appends the magnitudes to their series.
    ///
    /// `interval` is the tick length in seconds; the `n`th sample since the
    /// probe was placed is stamped `n * interval`.
    pub fn record<S: FieldSource + ?Sized>(
        &mut self,
        source: &S,
        charges: &[Charge],
        interval: f32,
    ) -> ProbeReadings {
        let readings = self.sample_field(source, charges);
        self.orbiting.record(readings.orbiting.magnitude(), interval);
        if let (Some(free), Some(field)) = (self.free.as_mut(), readings.free) {
            free.record(field.magnitude(), interval);
        }
        readings
    }
}
