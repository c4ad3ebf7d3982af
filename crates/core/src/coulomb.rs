//! Superposed Coulomb field of a set of point charges.
//!
//! The field is a pure function of the query point and the charges, computed
//! in `f32`. Charges coincident with the query point are skipped.

use crate::charge::Charge;
use crate::vector::Vector2D;

/// Vacuum permittivity (F/m).
pub const EPSILON_0: f32 = 8.854e-12;

/// Coulomb's constant `1 / (4 pi epsilon_0)`.
pub const K: f32 = 1.0 / (4.0 * std::f64::consts::PI * EPSILON_0 as f64) as f32;

/// Anything that can report a field vector at a point for a charge snapshot.
///
/// Implementations must be deterministic and shareable across worker threads;
/// the intensity grid samples them concurrently.
pub trait FieldSource: Sync {
    fn field_at(&self, point: Vector2D, charges: &[Charge]) -> Vector2D;
}

/// The electrostatic field of point charges.
#[derive(Debug, Clone, Copy, Default)]
pub struct Coulomb;

impl FieldSource for Coulomb {
    fn field_at(&self, point: Vector2D, charges: &[Charge]) -> Vector2D {
        field_at(point, charges)
    }
}

/// Field vector at `point`.
///
/// Each charge contributes `d * q / |d|^3` with `d = charge.position - point`,
/// and the sum is scaled by [`K`]. An empty set yields the zero vector.
pub fn field_at(point: Vector2D, charges: &[Charge]) -> Vector2D {
    let mut total = Vector2D::ZERO;
    for charge in charges {
        let d = charge.position - point;
        let distance = d.magnitude();
        if distance > 0.0 {
            total += d * charge.magnitude / (distance * distance * distance);
        }
    }
    total * K
}
