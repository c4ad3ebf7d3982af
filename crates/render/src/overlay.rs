//! Vector overlays drawn over the intensity map: background grid lines with
//! field direction arrows, charge discs and probe markers.
//!
//! Sizes follow the view scale (`Transform::scale`, screen units per world
//! unit) so the picture looks the same at any viewport size.

use crate::color::Srgb;
use crate::pixel::Frame;
use efield_core::{Charge, FieldSource, GridSpacing, ProbeSampler, Transform, Vector2D};

/// Arrow head length in screen units.
const ARROW_TIP: f32 = 10.0;
const ARROW_HALF_WIDTH: f32 = 0.3 * ARROW_TIP;
/// Grid arrow length as a fraction of the view scale.
const GRID_ARROW_LENGTH: f32 = 0.1;
/// Probe arrow length as a fraction of the view scale.
const PROBE_ARROW_LENGTH: f32 = 0.2;
/// Probe marker diameter as a fraction of the view scale.
const PROBE_DOT: f32 = 0.1;

pub const GRID_COLOR: Srgb = Srgb::DARK_BLUE;
pub const ORBITING_PROBE_COLOR: Srgb = Srgb::ORANGE;
pub const FREE_PROBE_COLOR: Srgb = Srgb::YELLOW;

/// Screen offsets of grid lines along an axis of `len` units, every
/// `spacing` units and passing through the axis center `len / 2`.
pub fn grid_line_positions(len: usize, spacing: usize) -> impl Iterator<Item = usize> {
    let spacing = spacing.max(1);
    ((len / 2) % spacing..len).step_by(spacing)
}

/// Draws an arrow from `start` (screen) in the direction of `field` (world).
///
/// The shaft is `length * scale` long on each axis; a zero field draws nothing.
pub fn draw_arrow(
    frame: &mut Frame,
    transform: &Transform,
    start: Vector2D,
    field: Vector2D,
    length: f32,
    color: Srgb,
) {
    let n = field.normalize();
    if n == Vector2D::ZERO {
        return;
    }
    let end = start
        + Vector2D::new(
            n.x * transform.scale_x() * length,
            -n.y * transform.scale_y() * length,
        );
    frame.line(start, end, color);

    let dir = (end - start).normalize();
    let base = end - dir * ARROW_TIP;
    let side = Vector2D::new(dir.y, -dir.x) * ARROW_HALF_WIDTH;
    frame.line(base + side, end, color);
    frame.line(end, base - side, color);
}

/// Grid lines every `spacing` pixels, centered on the viewport, plus a black
/// field arrow at each crossing.
pub fn draw_grid<S: FieldSource + ?Sized>(
    frame: &mut Frame,
    transform: &Transform,
    source: &S,
    charges: &[Charge],
    spacing: GridSpacing,
) {
    let (width, height) = (frame.width(), frame.height());
    let (right, bottom) = ((width - 1) as f32, (height - 1) as f32);
    for x in grid_line_positions(width, spacing.x) {
        let x = x as f32;
        frame.line(Vector2D::new(x, 0.0), Vector2D::new(x, bottom), GRID_COLOR);
    }
    for y in grid_line_positions(height, spacing.y) {
        let y = y as f32;
        frame.line(Vector2D::new(0.0, y), Vector2D::new(right, y), GRID_COLOR);
    }

    if charges.is_empty() {
        return;
    }
    for y in grid_line_positions(height, spacing.y) {
        for x in grid_line_positions(width, spacing.x) {
            let screen = Vector2D::new(x as f32, y as f32);
            let field = source.field_at(transform.screen_to_world(screen), charges);
            draw_arrow(frame, transform, screen, field, GRID_ARROW_LENGTH, Srgb::BLACK);
        }
    }
}

/// Charges as discs of radius `|magnitude| * scale * radius_factor`:
/// red for positive, blue otherwise, outlined in black.
pub fn draw_charges(frame: &mut Frame, transform: &Transform, charges: &[Charge], radius_factor: f32) {
    for charge in charges {
        let center = transform.world_to_screen(charge.position);
        let radius = charge.magnitude.abs() * transform.scale() * radius_factor;
        let fill = if charge.magnitude > 0.0 {
            Srgb::RED
        } else {
            Srgb::BLUE
        };
        frame.fill_disc(center, radius, fill);
        frame.stroke_circle(center, radius, Srgb::BLACK);
    }
}

/// Probe markers with an arrow showing the local field direction.
pub fn draw_probes<S: FieldSource + ?Sized>(
    frame: &mut Frame,
    transform: &Transform,
    source: &S,
    charges: &[Charge],
    probes: &ProbeSampler,
) {
    let readings = probes.sample_field(source, charges);
    let mut marks = vec![(
        probes.orbiting().position(),
        readings.orbiting,
        ORBITING_PROBE_COLOR,
    )];
    if let (Some(free), Some(field)) = (probes.free(), readings.free) {
        marks.push((free.position(), field, FREE_PROBE_COLOR));
    }

    let radius = transform.scale() * PROBE_DOT / 2.0;
    for (position, field, color) in marks {
        let center = transform.world_to_screen(position);
        frame.fill_disc(center, radius, color);
        draw_arrow(frame, transform, center, field, PROBE_ARROW_LENGTH, color);
    }
}
