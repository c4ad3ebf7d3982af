#![deny(unsafe_code)]
//! Core of the electrostatic field visualizer.
//!
//! Provides `Vector2D`, the versioned `ChargeSet`, the Coulomb `FieldSource`,
//! screen/world `Transform`, the cached `IntensityGrid`, orbiting probes,
//! built-in scenarios, charge list files, launch argument classification and
//! the `Session` that ties them together.

pub mod cache;
pub mod charge;
pub mod charge_file;
pub mod config;
pub mod coulomb;
pub mod error;
pub mod grid;
pub mod launch;
pub mod params;
pub mod probe;
pub mod scenario;
pub mod session;
pub mod transform;
pub mod vector;

pub use cache::IntensityCache;
pub use charge::{Charge, ChargeSet, MAX_MAGNITUDE};
pub use charge_file::{parse_charge_list, read_charge_list, write_charge_list};
pub use config::SimulationConfig;
pub use coulomb::{field_at, Coulomb, FieldSource, K};
pub use error::FieldError;
pub use grid::IntensityGrid;
pub use launch::{GridSpacing, LaunchArgs, LaunchSource};
pub use probe::{Probe, ProbeReadings, ProbeSample, ProbeSampler, MAX_SERIES_LEN};
pub use scenario::{apply_charge_list, Scenario, SCENARIOS};
pub use session::{PressOutcome, Session};
pub use transform::{Transform, Viewport};
pub use vector::Vector2D;
