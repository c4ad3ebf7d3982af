//! Discretized intensity map over a viewport.
//!
//! An `IntensityGrid` stores `width * height` normalized `f32` values in
//! [0, 1] using row-major layout, one value per screen cell. Reads outside the
//! grid clamp to the last valid column/row instead of failing.

use crate::error::FieldError;

/// Default edge length of a grid cell in screen units.
pub const DEFAULT_CELL_SIZE: usize = 8;

/// A 2D grid of normalized field intensities.
#[derive(Debug, Clone, PartialEq)]
pub struct IntensityGrid {
    width: usize,
    height: usize,
    cell_size: usize,
    data: Vec<f32>,
}

impl IntensityGrid {
    /// A zero-filled grid covering a `viewport_width x viewport_height` area.
    ///
    /// The cell counts are `viewport / cell_size` (integer division), so a
    /// viewport smaller than one cell yields an empty grid. Returns
    /// `FieldError::InvalidDimensions` for a zero `cell_size`.
    pub fn for_viewport(
        viewport_width: usize,
        viewport_height: usize,
        cell_size: usize,
    ) -> Result<Self, FieldError> {
        if cell_size == 0 {
            return Err(FieldError::InvalidDimensions);
        }
        Ok(Self::blank(viewport_width, viewport_height, cell_size))
    }

    /// Infallible constructor for callers that already guarantee `cell_size > 0`.
    pub(crate) fn blank(viewport_width: usize, viewport_height: usize, cell_size: usize) -> Self {
        let width = viewport_width / cell_size;
        let height = viewport_height / cell_size;
        Self {
            width,
            height,
            cell_size,
            data: vec![0.0; width * height],
        }
    }

    /// Creates a grid from a pre-built data vector, validating that
    /// `data.len() == width * height`.
    ///
    /// Values are **not** clamped.
    pub fn from_data(
        width: usize,
        height: usize,
        cell_size: usize,
        data: Vec<f32>,
    ) -> Result<Self, FieldError> {
        if cell_size == 0 {
            return Err(FieldError::InvalidDimensions);
        }
        let expected = width
            .checked_mul(height)
            .ok_or(FieldError::InvalidDimensions)?;
        if data.len() != expected {
            return Err(FieldError::InvalidDimensions);
        }
        Ok(Self {
            width,
            height,
            cell_size,
            data,
        })
    }

    /// Grid width in cells.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Grid height in cells.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Cell edge length in screen units.
    pub fn cell_size(&self) -> usize {
        self.cell_size
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Read-only access to the underlying row-major data.
    pub fn data(&self) -> &[f32] {
        &self.data
    }

    pub(crate) fn data_mut(&mut self) -> &mut [f32] {
        &mut self.data
    }

    /// Value at `(grid_x, grid_y)`, clamping indices past the edge to the last
    /// valid column/row. An empty grid reads as 0.
    pub fn get(&self, grid_x: usize, grid_y: usize) -> f32 {
        if self.is_empty() {
            return 0.0;
        }
        let x = grid_x.min(self.width - 1);
        let y = grid_y.min(self.height - 1);
        self.data[y * self.width + x]
    }

    /// Value of the cell covering screen pixel `(px, py)`, clamped at the edges.
    pub fn at_pixel(&self, px: usize, py: usize) -> f32 {
        self.get(px / self.cell_size, py / self.cell_size)
    }

    /// Iterates over all cells yielding `(grid_x, grid_y, value)` in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, usize, f32)> + '_ {
        self.data.iter().enumerate().map(|(i, &v)| {
            let x = i % self.width;
            let y = i / self.width;
            (x, y, v)
        })
    }
}
