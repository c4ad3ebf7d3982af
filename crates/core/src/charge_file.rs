//! JSON charge list files.
//!
//! The file is an array of objects:
//!
//! ```text
//! [ { "position": { "X": -1.0, "Y": 0.0 }, "Magnitute": 1.0 }, ... ]
//! ```
//!
//! The `Magnitute` spelling is what existing files contain and is kept as is.
//! Missing coordinates or magnitude default to 0 and unknown keys are ignored.

use crate::charge::Charge;
use crate::error::FieldError;
use crate::vector::Vector2D;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
struct PositionRecord {
    #[serde(rename = "X", default)]
    x: f32,
    #[serde(rename = "Y", default)]
    y: f32,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
struct ChargeRecord {
    #[serde(default)]
    position: PositionRecord,
    #[serde(rename = "Magnitute", default)]
    magnitude: f32,
}

impl From<ChargeRecord> for Charge {
    fn from(r: ChargeRecord) -> Self {
        Charge::new(Vector2D::new(r.position.x, r.position.y), r.magnitude)
    }
}

impl From<&Charge> for ChargeRecord {
    fn from(c: &Charge) -> Self {
        Self {
            position: PositionRecord {
                x: c.position.x,
                y: c.position.y,
            },
            magnitude: c.magnitude,
        }
    }
}

/// Decodes a charge list from JSON text.
///
/// Returns `FieldError::InvalidChargeList` for anything that is not an array
/// of charge objects.
pub fn parse_charge_list(json: &str) -> Result<Vec<Charge>, FieldError> {
    let records: Vec<ChargeRecord> =
        serde_json::from_str(json).map_err(|e| FieldError::InvalidChargeList(e.to_string()))?;
    Ok(records.into_iter().map(Charge::from).collect())
}

/// Reads and decodes a charge list file.
pub fn read_charge_list(path: &Path) -> Result<Vec<Charge>, FieldError> {
    let text = std::fs::read_to_string(path)?;
    parse_charge_list(&text)
}

/// Encodes charges in the charge list format.
pub fn to_json(charges: &[Charge]) -> Result<String, FieldError> {
    let records: Vec<ChargeRecord> = charges.iter().map(ChargeRecord::from).collect();
    serde_json::to_string_pretty(&records).map_err(|e| FieldError::InvalidChargeList(e.to_string()))
}

/// Writes charges to `path` in the charge list format.
pub fn write_charge_list(path: &Path, charges: &[Charge]) -> Result<(), FieldError> {
    std::fs::write(path, to_json(charges)?)?;
    Ok(())
}
