//! 8-bit sRGB colors and the two-stop intensity gradient.
//!
//! Intensity `0` maps to light blue and `1` to dark blue. Channels are
//! interpolated linearly in sRGB and truncated toward zero, so the endpoints
//! are reproduced exactly.

/// sRGB color with 8-bit channels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Srgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Srgb {
    pub const BLACK: Srgb = Srgb::new(0, 0, 0);
    pub const WHITE: Srgb = Srgb::new(255, 255, 255);
    pub const RED: Srgb = Srgb::new(255, 0, 0);
    pub const BLUE: Srgb = Srgb::new(0, 0, 255);
    pub const ORANGE: Srgb = Srgb::new(255, 165, 0);
    pub const YELLOW: Srgb = Srgb::new(255, 255, 0);
    /// `#add8e6`
    pub const LIGHT_BLUE: Srgb = Srgb::new(173, 216, 230);
    /// `#00008b`
    pub const DARK_BLUE: Srgb = Srgb::new(0, 0, 139);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Linear interpolation towards `other`, truncating each channel.
    pub fn lerp(self, other: Srgb, t: f32) -> Srgb {
        let channel = |a: u8, b: u8| (a as f32 + t * (b as f32 - a as f32)) as u8;
        Srgb {
            r: channel(self.r, other.r),
            g: channel(self.g, other.g),
            b: channel(self.b, other.b),
        }
    }

    /// Opaque RGBA bytes.
    pub fn to_rgba(self) -> [u8; 4] {
        [self.r, self.g, self.b, 255]
    }

    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

/// Two-stop color ramp sampled by a normalized intensity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Gradient {
    low: Srgb,
    high: Srgb,
}

impl Default for Gradient {
    fn default() -> Self {
        Self::intensity()
    }
}

impl Gradient {
    pub const fn new(low: Srgb, high: Srgb) -> Self {
        Self { low, high }
    }

    /// Light blue for weak fields, dark blue for strong ones.
    pub const fn intensity() -> Self {
        Self::new(Srgb::LIGHT_BLUE, Srgb::DARK_BLUE)
    }

    /// Samples the ramp at `t`, clamped to [0, 1]. NaN samples the low end.
    pub fn sample(&self, t: f32) -> Srgb {
        let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };
        self.low.lerp(self.high, t)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoints_are_exact() {
        let g = Gradient::intensity();
        assert_eq!(g.sample(0.0), Srgb::LIGHT_BLUE);
        assert_eq!(g.sample(1.0), Srgb::DARK_BLUE);
    }

    #[test]
    fn midpoint_truncates() {
        // 173 - 86.5, 216 - 108, 230 - 45.5
        assert_eq!(Gradient::intensity().sample(0.5), Srgb::new(86, 108, 184));
    }

    #[test]
    fn out_of_range_and_nan_are_clamped() {
        let g = Gradient::default();
        assert_eq!(g.sample(-3.0), Srgb::LIGHT_BLUE);
        assert_eq!(g.sample(7.0), Srgb::DARK_BLUE);
        assert_eq!(g.sample(f32::NAN), Srgb::LIGHT_BLUE);
    }

    #[test]
    fn hex_formatting() {
        assert_eq!(Srgb::LIGHT_BLUE.to_hex(), "#add8e6");
        assert_eq!(Srgb::DARK_BLUE.to_hex(), "#00008b");
        assert_eq!(Srgb::RED.to_rgba(), [255, 0, 0, 255]);
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn channels_stay_between_endpoints(t in 0.0f32..=1.0) {
                let c = Gradient::intensity().sample(t);
                prop_assert!(c.r <= Srgb::LIGHT_BLUE.r);
                prop_assert!(c.g <= Srgb::LIGHT_BLUE.g);
                prop_assert!(c.b >= Srgb::DARK_BLUE.b && c.b <= Srgb::LIGHT_BLUE.b);
            }

            #[test]
            fn darker_with_intensity(a in 0.0f32..=1.0, b in 0.0f32..=1.0) {
                let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
                let g = Gradient::intensity();
                prop_assert!(g.sample(hi).b <= g.sample(lo).b);
            }
        }
    }
}
