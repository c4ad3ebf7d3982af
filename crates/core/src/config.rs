//! Tunable constants of a visualization session.
//!
//! Defaults reproduce the classic behavior: a 50 ms tick, probes turning at
//! pi/6 rad/s, 8-pixel intensity cells over a `[-2, 2]` world square, and
//! magnitudes kept within +/-4 with 0.05 per scroll notch.

use crate::charge::MAX_MAGNITUDE;
use crate::grid::DEFAULT_CELL_SIZE;
use crate::params::{param_f32, param_usize};
use crate::transform::DEFAULT_HALF_EXTENT;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::f32::consts::PI;

const DEFAULT_TICK_INTERVAL: f32 = 0.05;
const DEFAULT_PROBE_ANGULAR_SPEED: f32 = PI / 6.0;
const DEFAULT_PROBE_RADIUS: f32 = 1.0;
const DEFAULT_SCROLL_STEP: f32 = 0.05;
/// Drawn charge radius per unit magnitude, as a fraction of the view scale.
const DEFAULT_HIT_RADIUS_FACTOR: f32 = 0.13;

/// Session settings. Use [`Default`] for the standard configuration.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SimulationConfig {
    /// Seconds per tick.
    pub tick_interval: f32,
    /// Probe orbital speed in radians per second.
    pub probe_angular_speed: f32,
    /// Orbit radius of the permanent probe, in world units.
    pub probe_radius: f32,
    /// Intensity grid cell edge, in pixels.
    pub cell_size: usize,
    /// Half the side of the visible world square.
    pub world_half_extent: f32,
    /// Largest allowed `|magnitude|` for interactive edits, at most
    /// [`MAX_MAGNITUDE`].
    pub magnitude_limit: f32,
    /// Magnitude change per scroll notch.
    pub scroll_step: f32,
    /// Charge radius on screen is `|magnitude| * scale * hit_radius_factor`.
    pub hit_radius_factor: f32,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            tick_interval: DEFAULT_TICK_INTERVAL,
            probe_angular_speed: DEFAULT_PROBE_ANGULAR_SPEED,
            probe_radius: DEFAULT_PROBE_RADIUS,
            cell_size: DEFAULT_CELL_SIZE,
            world_half_extent: DEFAULT_HALF_EXTENT,
            magnitude_limit: MAX_MAGNITUDE,
            scroll_step: DEFAULT_SCROLL_STEP,
            hit_radius_factor: DEFAULT_HIT_RADIUS_FACTOR,
        }
    }
}

impl SimulationConfig {
    /// Reads settings from a JSON object, falling back to defaults for
    /// missing, mistyped or non-positive values. `magnitude_limit` is capped
    /// at [`MAX_MAGNITUDE`].
    pub fn from_json(params: &Value) -> Self {
        let d = Self::default();
        let positive = |name: &str, default: f32| {
            let v = param_f32(params, name, default);
            if v > 0.0 {
                v
            } else {
                default
            }
        };
        Self {
            tick_interval: positive("tick_interval", d.tick_interval),
            probe_angular_speed: param_f32(params, "probe_angular_speed", d.probe_angular_speed),
            probe_radius: positive("probe_radius", d.probe_radius),
            cell_size: param_usize(params, "cell_size", d.cell_size).max(1),
            world_half_extent: positive("world_half_extent", d.world_half_extent),
            magnitude_limit: positive("magnitude_limit", d.magnitude_limit).min(MAX_MAGNITUDE),
            scroll_step: positive("scroll_step", d.scroll_step),
            hit_radius_factor: positive("hit_radius_factor", d.hit_radius_factor),
        }
    }

    /// Current values as a JSON object.
    pub fn params(&self) -> Value {
        json!({
            "tick_interval": self.tick_interval,
            "probe_angular_speed": self.probe_angular_speed,
            "probe_radius": self.probe_radius,
            "cell_size": self.cell_size,
            "world_half_extent": self.world_half_extent,
            "magnitude_limit": self.magnitude_limit,
            "scroll_step": self.scroll_step,
            "hit_radius_factor": self.hit_radius_factor,
        })
    }

    /// Schema describing every setting: type, default and meaning.
    pub fn param_schema() -> Value {
        let d = Self::default();
        json!({
            "tick_interval": {
                "type": "number",
                "default": d.tick_interval,
                "description": "Seconds per simulation tick"
            },
            "probe_angular_speed": {
                "type": "number",
                "default": d.probe_angular_speed,
                "description": "Probe orbital speed in radians per second"
            },
            "probe_radius": {
                "type": "number",
                "default": d.probe_radius,
                "description": "Orbit radius of the permanent probe (world units)"
            },
            "cell_size": {
                "type": "integer",
                "default": d.cell_size,
                "description": "Intensity grid cell edge in pixels"
            },
            "world_half_extent": {
                "type": "number",
                "default": d.world_half_extent,
                "description": "Half the side of the visible world square"
            },
            "magnitude_limit": {
                "type": "number",
                "default": d.magnitude_limit,
                "description": "Largest |magnitude| reachable by scrolling"
            },
            "scroll_step": {
                "type": "number",
                "default": d.scroll_step,
                "description": "Magnitude change per scroll notch"
            },
            "hit_radius_factor": {
                "type": "number",
                "default": d.hit_radius_factor,
                "description": "Charge disc radius per unit magnitude, relative to view scale"
            }
        })
    }

    /// Radians each probe moves per tick.
    pub fn probe_step(&self) -> f32 {
        self.probe_angular_speed * self.tick_interval
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_classic_behavior() {
        let c = SimulationConfig::default();
        assert_eq!(c.tick_interval, 0.05);
        assert_eq!(c.cell_size, 8);
        assert_eq!(c.world_half_extent, 2.0);
        assert_eq!(c.magnitude_limit, 4.0);
        assert!((c.probe_step() - PI / 6.0 * 0.05).abs() < 1e-7);
    }

    #[test]
    fn from_empty_json_is_default() {
        assert_eq!(SimulationConfig::from_json(&json!({})), SimulationConfig::default());
    }

    #[test]
    fn from_json_reads_overrides() {
        let c = SimulationConfig::from_json(&json!({
            "cell_size": 4,
            "scroll_step": 0.25,
            "probe_angular_speed": -1.0
        }));
        assert_eq!(c.cell_size, 4);
        assert_eq!(c.scroll_step, 0.25);
        assert_eq!(c.probe_angular_speed, -1.0);
    }

    #[test]
    fn from_json_rejects_non_positive_sizes() {
        let c = SimulationConfig::from_json(&json!({
            "cell_size": 0,
            "tick_interval": -0.1,
            "world_half_extent": 0.0
        }));
        assert_eq!(c.cell_size, 1);
        assert_eq!(c.tick_interval, 0.05);
        assert_eq!(c.world_half_extent, 2.0);
    }

    #[test]
    fn from_json_caps_magnitude_limit() {
        let c = SimulationConfig::from_json(&json!({ "magnitude_limit": 10.0 }));
        assert_eq!(c.magnitude_limit, MAX_MAGNITUDE);
        let c = SimulationConfig::from_json(&json!({ "magnitude_limit": 2.5 }));
        assert_eq!(c.magnitude_limit, 2.5);
    }

    #[test]
    fn params_round_trip_through_from_json() {
        let mut c = SimulationConfig::default();
        c.cell_size = 16;
        c.probe_radius = 1.5;
        assert_eq!(SimulationConfig::from_json(&c.params()), c);
    }

    #[test]
    fn schema_documents_every_param() {
        let schema = SimulationConfig::param_schema();
        let params = SimulationConfig::default().params();
        for key in params.as_object().unwrap().keys() {
            assert!(schema.get(key).is_some(), "schema missing {key}");
            assert!(schema[key].get("description").is_some());
        }
    }
}
