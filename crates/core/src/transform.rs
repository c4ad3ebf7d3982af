//! Screen/world coordinate mapping for a viewport.
//!
//! World space is a square of `[-half_extent, half_extent]` on both axes,
//! stretched to fill the viewport, with the origin at the viewport center and
//! the y axis pointing up.

use crate::error::FieldError;
use crate::vector::Vector2D;

/// Default world half-extent: the viewport shows `[-2, 2]` on both axes.
pub const DEFAULT_HALF_EXTENT: f32 = 2.0;

/// Viewport size in screen units (pixels).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Viewport {
    width: usize,
    height: usize,
}

impl Viewport {
    /// Returns `FieldError::InvalidDimensions` if either side is zero.
    pub fn new(width: usize, height: usize) -> Result<Self, FieldError> {
        if width == 0 || height == 0 {
            return Err(FieldError::InvalidDimensions);
        }
        Ok(Self { width, height })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }
}

/// Maps between screen and world coordinates for one viewport.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    viewport: Viewport,
    scale_x: f32,
    scale_y: f32,
    center_x: f32,
    center_y: f32,
}

impl Transform {
    pub fn new(viewport: Viewport, half_extent: f32) -> Self {
        let span = 2.0 * half_extent;
        Self {
            viewport,
            scale_x: viewport.width as f32 / span,
            scale_y: viewport.height as f32 / span,
            center_x: viewport.width as f32 / 2.0,
            center_y: viewport.height as f32 / 2.0,
        }
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// Screen units per world unit along x.
    pub fn scale_x(&self) -> f32 {
        self.scale_x
    }

    /// Screen units per world unit along y.
    pub fn scale_y(&self) -> f32 {
        self.scale_y
    }

    /// The smaller of the two axis scales; used for sizes that must stay round.
    pub fn scale(&self) -> f32 {
        self.scale_x.min(self.scale_y)
    }

    pub fn screen_to_world(&self, screen: Vector2D) -> Vector2D {
        Vector2D::new(
            (screen.x - self.center_x) / self.scale_x,
            -(screen.y - self.center_y) / self.scale_y,
        )
    }

    pub fn world_to_screen(&self, world: Vector2D) -> Vector2D {
        Vector2D::new(
            world.x * self.scale_x + self.center_x,
            self.center_y - world.y * self.scale_y,
        )
    }
}
