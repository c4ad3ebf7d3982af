//! RGBA8 frame buffer and intensity grid expansion.
//!
//! This module has no feature gate so that frames can be built and inspected
//! without the `image` crate; only PNG encoding lives behind `png`.

use crate::color::{Gradient, Srgb};
use efield_core::{IntensityGrid, Vector2D, Viewport};

/// Expands a cell grid to one RGBA8 pixel per screen unit.
///
/// Every pixel takes the color of the cell it falls in; pixels past the last
/// full cell reuse the last row/column. The buffer length is
/// `width * height * 4`.
pub fn grid_to_rgba(
    grid: &IntensityGrid,
    gradient: &Gradient,
    width: usize,
    height: usize,
) -> Vec<u8> {
    let mut buf = Vec::with_capacity(width * height * 4);
    for py in 0..height {
        for px in 0..width {
            buf.extend_from_slice(&gradient.sample(grid.at_pixel(px, py)).to_rgba());
        }
    }
    buf
}

/// An opaque RGBA8 image the size of the viewport.
#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    width: usize,
    height: usize,
    pixels: Vec<u8>,
}

impl Frame {
    /// A frame filled with one color.
    pub fn new(viewport: Viewport, fill: Srgb) -> Self {
        let (width, height) = (viewport.width(), viewport.height());
        Self {
            width,
            height,
            pixels: fill.to_rgba().repeat(width * height),
        }
    }

    /// A frame showing `grid` through `gradient`.
    pub fn from_grid(grid: &IntensityGrid, gradient: &Gradient, viewport: Viewport) -> Self {
        let (width, height) = (viewport.width(), viewport.height());
        Self {
            width,
            height,
            pixels: grid_to_rgba(grid, gradient, width, height),
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn as_rgba(&self) -> &[u8] {
        &self.pixels
    }

    pub fn into_rgba(self) -> Vec<u8> {
        self.pixels
    }

    /// Color at `(x, y)`, or `None` outside the frame.
    pub fn pixel(&self, x: usize, y: usize) -> Option<Srgb> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = (y * self.width + x) * 4;
        Some(Srgb::new(self.pixels[i], self.pixels[i + 1], self.pixels[i + 2]))
    }

    /// Sets one pixel; coordinates outside the frame are ignored.
    pub fn put(&mut self, x: i64, y: i64, color: Srgb) {
        if x < 0 || y < 0 || x >= self.width as i64 || y >= self.height as i64 {
            return;
        }
        let i = (y as usize * self.width + x as usize) * 4;
        self.pixels[i..i + 4].copy_from_slice(&color.to_rgba());
    }

    /// One-pixel line between two screen points, clipped to the frame.
    pub fn line(&mut self, from: Vector2D, to: Vector2D, color: Srgb) {
        let Some(((ax, ay), (bx, by))) = self.clip(from, to) else {
            return;
        };
        // Bresenham
        let (mut x0, mut y0) = (ax.round() as i64, ay.round() as i64);
        let (x1, y1) = (bx.round() as i64, by.round() as i64);
        let dx = (x1 - x0).abs();
        let dy = -(y1 - y0).abs();
        let sx = if x0 < x1 { 1 } else { -1 };
        let sy = if y0 < y1 { 1 } else { -1 };
        let mut err = dx + dy;
        loop {
            self.put(x0, y0, color);
            if x0 == x1 && y0 == y1 {
                break;
            }
            let e2 = 2 * err;
            if e2 >= dy {
                err += dy;
                x0 += sx;
            }
            if e2 <= dx {
                err += dx;
                y0 += sy;
            }
        }
    }

    /// Filled disc; pixel centers within `radius` of `center` are painted.
    pub fn fill_disc(&mut self, center: Vector2D, radius: f32, color: Srgb) {
        self.paint_disc(center, radius, color, |d| d <= radius);
    }

    /// One-pixel ring on the edge of the disc of `radius`.
    pub fn stroke_circle(&mut self, center: Vector2D, radius: f32, color: Srgb) {
        self.paint_disc(center, radius, color, |d| d <= radius && d > radius - 1.0);
    }

    fn paint_disc(
        &mut self,
        center: Vector2D,
        radius: f32,
        color: Srgb,
        inside: impl Fn(f32) -> bool,
    ) {
        if radius.is_nan() || radius <= 0.0 || !center.x.is_finite() || !center.y.is_finite() {
            return;
        }
        let (Some(xs), Some(ys)) = (
            span(center.x, radius, self.width),
            span(center.y, radius, self.height),
        ) else {
            return;
        };
        for y in ys {
            for x in xs.clone() {
                let d = Vector2D::new(x as f32 + 0.5, y as f32 + 0.5) - center;
                if inside(d.magnitude()) {
                    self.put(x as i64, y as i64, color);
                }
            }
        }
    }

    /// Liang-Barsky clip of a segment to the frame rectangle, in `f64` so
    /// that far-away endpoints keep pixel precision.
    fn clip(&self, from: Vector2D, to: Vector2D) -> Option<((f64, f64), (f64, f64))> {
        if !(from.x.is_finite() && from.y.is_finite() && to.x.is_finite() && to.y.is_finite()) {
            return None;
        }
        let (x0, y0) = (from.x as f64, from.y as f64);
        let (dx, dy) = (to.x as f64 - x0, to.y as f64 - y0);
        let max_x = self.width as f64 - 1.0;
        let max_y = self.height as f64 - 1.0;
        let (mut t0, mut t1) = (0.0f64, 1.0f64);
        for (p, q) in [(-dx, x0), (dx, max_x - x0), (-dy, y0), (dy, max_y - y0)] {
            if p == 0.0 {
                if q < 0.0 {
                    return None;
                }
            } else {
                let r = q / p;
                if p < 0.0 {
                    t0 = t0.max(r);
                } else {
                    t1 = t1.min(r);
                }
                if t0 > t1 {
                    return None;
                }
            }
        }
        Some(((x0 + dx * t0, y0 + dy * t0), (x0 + dx * t1, y0 + dy * t1)))
    }
}

/// Pixel index range covering `[c - r, c + r]`, clipped to `[0, len)`.
fn span(c: f32, r: f32, len: usize) -> Option<std::ops::Range<usize>> {
    let lo = (c - r).floor().max(0.0);
    let hi = (c + r).ceil().min(len as f32);
    (lo < hi).then(|| lo as usize..hi as usize)
}
