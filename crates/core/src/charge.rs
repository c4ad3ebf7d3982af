//! Point charges and the versioned, ordered charge collection.
//!
//! A [`ChargeSet`] owns every charge in the session. Charges are identified by
//! their index. Versions are drawn from one process-wide counter, so two sets
//! share a version only if one is an unmodified clone of the other, and
//! derived data (the intensity grid) can detect staleness by comparing them.

use crate::error::FieldError;
use crate::vector::Vector2D;
use serde::Serialize;
use std::sync::atomic::{AtomicU64, Ordering};

/// Largest magnitude a charge may carry, in either sign.
pub const MAX_MAGNITUDE: f32 = 4.0;

/// A point charge with a signed magnitude.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Charge {
    pub position: Vector2D,
    pub magnitude: f32,
}

impl Charge {
    pub const fn new(position: Vector2D, magnitude: f32) -> Self {
        Self {
            position,
            magnitude,
        }
    }

    /// Builds a charge from editor text fields.
    ///
    /// Returns `FieldError::ChargeParse` for unparsable or non-finite input and
    /// `FieldError::MagnitudeOutOfRange` if `|magnitude|` exceeds [`MAX_MAGNITUDE`].
    pub fn parse(x: &str, y: &str, magnitude: &str) -> Result<Self, FieldError> {
        let x = parse_component("x", x)?;
        let y = parse_component("y", y)?;
        let magnitude = parse_component("magnitude", magnitude)?;
        if magnitude.abs() > MAX_MAGNITUDE {
            return Err(FieldError::MagnitudeOutOfRange {
                value: magnitude,
                limit: MAX_MAGNITUDE,
            });
        }
        Ok(Self::new(Vector2D::new(x, y), magnitude))
    }
}

fn parse_component(field: &'static str, text: &str) -> Result<f32, FieldError> {
    text.trim()
        .parse::<f32>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| FieldError::ChargeParse {
            field,
            value: text.to_string(),
        })
}

static NEXT_VERSION: AtomicU64 = AtomicU64::new(1);

fn next_version() -> u64 {
    NEXT_VERSION.fetch_add(1, Ordering::Relaxed)
}

/// Ordered collection of charges with a version stamp.
///
/// Insertion order is display order. Duplicate and overlapping charges are
/// allowed.
#[derive(Debug, Clone)]
pub struct ChargeSet {
    charges: Vec<Charge>,
    version: u64,
}

impl Default for ChargeSet {
    fn default() -> Self {
        Self::from_charges(Vec::new())
    }
}

impl ChargeSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_charges(charges: Vec<Charge>) -> Self {
        Self {
            charges,
            version: next_version(),
        }
    }

    pub fn len(&self) -> usize {
        self.charges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.charges.is_empty()
    }

    /// Stamp of the current contents. Increases with every mutation and is
    /// unique across sets unless one is an unmodified clone of another.
    pub fn version(&self) -> u64 {
        self.version
    }

    pub fn get(&self, index: usize) -> Option<&Charge> {
        self.charges.get(index)
    }

    /// Read-only snapshot of the charges, suitable for sharing across threads.
    pub fn as_slice(&self) -> &[Charge] {
        &self.charges
    }

    pub fn iter(&self) -> impl Iterator<Item = &Charge> + '_ {
        self.charges.iter()
    }

    /// Sum of all magnitudes.
    pub fn net_charge(&self) -> f32 {
        self.charges.iter().map(|c| c.magnitude).sum()
    }

    pub fn push(&mut self, charge: Charge) {
        self.charges.push(charge);
        self.bump();
    }

    /// Removes and returns the charge at `index`; later charges shift down.
    pub fn remove(&mut self, index: usize) -> Result<Charge, FieldError> {
        self.check(index)?;
        let removed = self.charges.remove(index);
        self.bump();
        Ok(removed)
    }

    /// Overwrites the charge at `index`.
    pub fn set(&mut self, index: usize, charge: Charge) -> Result<(), FieldError> {
        self.check(index)?;
        self.charges[index] = charge;
        self.bump();
        Ok(())
    }

    pub fn set_position(&mut self, index: usize, position: Vector2D) -> Result<(), FieldError> {
        self.check(index)?;
        self.charges[index].position = position;
        self.bump();
        Ok(())
    }

    pub fn set_magnitude(&mut self, index: usize, magnitude: f32) -> Result<(), FieldError> {
        self.check(index)?;
        self.charges[index].magnitude = magnitude;
        self.bump();
        Ok(())
    }

    /// Adds `delta` to the magnitude at `index`, clamped to `[-limit, limit]`.
    ///
    /// Returns the new magnitude.
    pub fn adjust_magnitude(
        &mut self,
        index: usize,
        delta: f32,
        limit: f32,
    ) -> Result<f32, FieldError> {
        self.check(index)?;
        let charge = &mut self.charges[index];
        charge.magnitude = (charge.magnitude + delta).clamp(-limit, limit);
        let magnitude = charge.magnitude;
        self.bump();
        Ok(magnitude)
    }

    /// Replaces the whole collection in one step.
    pub fn replace(&mut self, charges: Vec<Charge>) {
        self.charges = charges;
        self.bump();
    }

    fn check(&self, index: usize) -> Result<(), FieldError> {
        if index < self.charges.len() {
            Ok(())
        } else {
            Err(FieldError::ChargeIndex {
                index,
                len: self.charges.len(),
            })
        }
    }

    fn bump(&mut self) {
        self.version = next_version();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_set() -> ChargeSet {
        ChargeSet::from_charges(vec![
            Charge::new(Vector2D::new(-1.0, 0.0), 1.0),
            Charge::new(Vector2D::new(1.0, 0.0), -2.0),
        ])
    }

    // -- parse --

    #[test]
    fn parse_accepts_valid_text() {
        let c = Charge::parse("0.5", " -1.25 ", "3").unwrap();
        assert_eq!(c.position, Vector2D::new(0.5, -1.25));
        assert_eq!(c.magnitude, 3.0);
    }

    #[test]
    fn parse_rejects_garbage_with_field_name() {
        let err = Charge::parse("1", "two", "1").unwrap_err();
        assert!(matches!(err, FieldError::ChargeParse { field: "y", .. }));
    }

    #[test]
    fn parse_rejects_non_finite() {
        assert!(Charge::parse("NaN", "0", "1").is_err());
        assert!(Charge::parse("0", "0", "inf").is_err());
    }

    #[test]
    fn parse_rejects_magnitude_beyond_limit() {
        let err = Charge::parse("0", "0", "4.5").unwrap_err();
        assert!(matches!(err, FieldError::MagnitudeOutOfRange { .. }));
        assert!(Charge::parse("0", "0", "-4").is_ok());
    }

    // -- versioning --

    #[test]
    fn every_mutation_bumps_version() {
        let mut set = sample_set();
        let mut last = set.version();
        set.push(Charge::new(Vector2D::ZERO, 0.0));
        assert!(set.version() > last);
        last = set.version();
        set.set_position(0, Vector2D::new(0.2, 0.2)).unwrap();
        assert!(set.version() > last);
        last = set.version();
        set.set_magnitude(1, 0.5).unwrap();
        assert!(set.version() > last);
        last = set.version();
        set.adjust_magnitude(1, 0.05, MAX_MAGNITUDE).unwrap();
        assert!(set.version() > last);
        last = set.version();
        set.remove(2).unwrap();
        assert!(set.version() > last);
        last = set.version();
        set.replace(vec![]);
        assert!(set.version() > last);
    }

    #[test]
    fn distinct_sets_never_share_a_version() {
        let a = sample_set();
        let b = sample_set();
        assert_ne!(a.version(), b.version());
        assert_ne!(ChargeSet::new().version(), ChargeSet::new().version());
        let mut c = a.clone();
        assert_eq!(c.version(), a.version());
        c.push(Charge::new(Vector2D::ZERO, 1.0));
        assert_ne!(c.version(), a.version());
    }

    #[test]
    fn failed_mutation_keeps_version() {
        let mut set = sample_set();
        let before = set.version();
        assert!(set.remove(5).is_err());
        assert!(set.set_position(2, Vector2D::ZERO).is_err());
        assert_eq!(set.version(), before);
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn remove_shifts_later_indices() {
        let mut set = sample_set();
        let removed = set.remove(0).unwrap();
        assert_eq!(removed.magnitude, 1.0);
        assert_eq!(set.get(0).unwrap().magnitude, -2.0);
    }

    #[test]
    fn adjust_magnitude_clamps() {
        let mut set = sample_set();
        assert_eq!(set.adjust_magnitude(0, 10.0, MAX_MAGNITUDE).unwrap(), 4.0);
        assert_eq!(set.adjust_magnitude(1, -10.0, MAX_MAGNITUDE).unwrap(), -4.0);
    }

    #[test]
    fn duplicates_are_allowed() {
        let mut set = ChargeSet::new();
        let c = Charge::new(Vector2D::ZERO, 1.0);
        set.push(c);
        set.push(c);
        assert_eq!(set.len(), 2);
        assert_eq!(set.net_charge(), 2.0);
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn adjusted_magnitude_stays_in_range(
                start in -4.0_f32..=4.0,
                deltas in prop::collection::vec(-1.0_f32..=1.0, 1..50),
            ) {
                let mut set = ChargeSet::from_charges(vec![Charge::new(Vector2D::ZERO, start)]);
                for d in deltas {
                    let m = set.adjust_magnitude(0, d, MAX_MAGNITUDE).unwrap();
                    prop_assert!((-MAX_MAGNITUDE..=MAX_MAGNITUDE).contains(&m));
                }
            }
        }
    }
}
