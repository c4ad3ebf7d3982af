#![deny(unsafe_code)]
//! CPU rendering for the electrostatic field visualizer.
//!
//! Turns a [`Session`] into an RGBA [`Frame`]: the cached intensity grid
//! through the light-to-dark blue [`Gradient`], then optionally the grid lines
//! with field arrows, the charges and the probes on top. PNG output lives in
//! [`snapshot`] behind the default `png` feature.

pub mod color;
pub mod overlay;
pub mod pixel;

#[cfg(feature = "png")]
pub mod snapshot;

pub use color::{Gradient, Srgb};
pub use pixel::Frame;

use efield_core::{Coulomb, GridSpacing, Session};

/// What to draw on top of the intensity map.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderOptions {
    pub gradient: Gradient,
    pub grid_spacing: GridSpacing,
    /// Draw grid lines, field arrows, charges and probes.
    pub overlay: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            gradient: Gradient::intensity(),
            grid_spacing: GridSpacing::default(),
            overlay: true,
        }
    }
}

/// Renders the session's current state.
///
/// Takes `&mut` because the intensity grid is recomputed on demand.
pub fn render(session: &mut Session, options: &RenderOptions) -> Frame {
    let transform = *session.transform();
    let viewport = transform.viewport();
    let mut frame = Frame::from_grid(session.intensity_grid(), &options.gradient, viewport);
    if options.overlay {
        let charges = session.charges().as_slice();
        overlay::draw_grid(&mut frame, &transform, &Coulomb, charges, options.grid_spacing);
        overlay::draw_charges(
            &mut frame,
            &transform,
            charges,
            session.config().hit_radius_factor,
        );
        overlay::draw_probes(&mut frame, &transform, &Coulomb, charges, session.probes());
    }
    frame
}
