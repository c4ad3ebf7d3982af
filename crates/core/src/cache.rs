//! Memoized intensity grid with explicit invalidation.
//!
//! Recomputing the grid is expensive: the normalization maximum is found by
//! sampling the field at every pixel of the viewport, then each cell is
//! sampled once at its center. Both passes fan out over rows with rayon; each
//! sample reads the same immutable charge slice and writes its own output slot.
//!
//! The cached grid is reused until one of these happens:
//! - `invalidate()` is called (monotonic dirty flag, cleared by a recompute)
//! - the charge set version differs from the one the grid was built from
//! - the viewport, world extent or cell size differs

use crate::charge::ChargeSet;
use crate::coulomb::FieldSource;
use crate::grid::IntensityGrid;
use crate::transform::Transform;
use crate::vector::Vector2D;
use rayon::prelude::*;

/// Normalization maximum used when the whole viewport has zero field.
const ZERO_FIELD_MAX: f32 = 1.0;

#[derive(Debug, Clone, Copy, PartialEq)]
struct CacheKey {
    version: u64,
    transform: Transform,
    cell_size: usize,
}

/// Lazily rebuilt intensity grid.
#[derive(Debug, Clone)]
pub struct IntensityCache {
    grid: IntensityGrid,
    key: Option<CacheKey>,
    dirty: bool,
    max_intensity: f32,
    recomputes: u64,
}

impl Default for IntensityCache {
    fn default() -> Self {
        Self::new()
    }
}

impl IntensityCache {
    pub fn new() -> Self {
        Self {
            grid: IntensityGrid::blank(0, 0, 1),
            key: None,
            dirty: true,
            max_intensity: ZERO_FIELD_MAX,
            recomputes: 0,
        }
    }

    /// Marks the grid stale; the next `compute` rebuilds it.
    pub fn invalidate(&mut self) {
        self.dirty = true;
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Number of full recomputations performed so far.
    pub fn recompute_count(&self) -> u64 {
        self.recomputes
    }

    /// Normalization maximum of the current grid.
    pub fn max_intensity(&self) -> f32 {
        self.max_intensity
    }

    /// Whether `compute` with these inputs would rebuild the grid.
    pub fn is_stale(&self, charges: &ChargeSet, transform: &Transform, cell_size: usize) -> bool {
        self.dirty || self.key != Some(key_for(charges, transform, cell_size))
    }

    /// Returns the grid for the given state, recomputing it only if stale.
    ///
    /// A `cell_size` of zero is treated as one.
    pub fn compute<S: FieldSource + ?Sized>(
        &mut self,
        source: &S,
        charges: &ChargeSet,
        transform: &Transform,
        cell_size: usize,
    ) -> &IntensityGrid {
        let cell_size = cell_size.max(1);
        if self.is_stale(charges, transform, cell_size) {
            let max_intensity = max_intensity(source, charges, transform);
            self.grid = normalized_grid(source, charges, transform, cell_size, max_intensity);
            self.max_intensity = max_intensity;
            self.key = Some(key_for(charges, transform, cell_size));
            self.dirty = false;
            self.recomputes += 1;
            log::debug!(
                "recomputed {}x{} intensity grid for charge set v{} (max intensity {max_intensity})",
                self.grid.width(),
                self.grid.height(),
                charges.version(),
            );
        }
        &self.grid
    }

    /// The last computed grid, without checking staleness.
    pub fn grid(&self) -> &IntensityGrid {
        &self.grid
    }
}

fn key_for(charges: &ChargeSet, transform: &Transform, cell_size: usize) -> CacheKey {
    CacheKey {
        version: charges.version(),
        transform: *transform,
        cell_size,
    }
}

/// Largest field magnitude over every pixel of the viewport, or
/// [`ZERO_FIELD_MAX`] if the field is zero everywhere.
fn max_intensity<S: FieldSource + ?Sized>(
    source: &S,
    charges: &ChargeSet,
    transform: &Transform,
) -> f32 {
    let charges = charges.as_slice();
    let viewport = transform.viewport();
    let width = viewport.width();
    let max = (0..viewport.height())
        .into_par_iter()
        .map(|y| {
            (0..width).fold(0.0_f32, |row_max, x| {
                let world = transform.screen_to_world(Vector2D::new(x as f32, y as f32));
                let intensity = source.field_at(world, charges).magnitude();
                if intensity > row_max {
                    intensity
                } else {
                    row_max
                }
            })
        })
        .reduce(|| 0.0, f32::max);
    if max > 0.0 {
        max
    } else {
        ZERO_FIELD_MAX
    }
}

fn normalized_grid<S: FieldSource + ?Sized>(
    source: &S,
    charges: &ChargeSet,
    transform: &Transform,
    cell_size: usize,
    max_intensity: f32,
) -> IntensityGrid {
    let charges = charges.as_slice();
    let viewport = transform.viewport();
    let mut grid = IntensityGrid::blank(viewport.width(), viewport.height(), cell_size);
    let grid_width = grid.width();
    if grid.is_empty() {
        return grid;
    }
    let half = (cell_size / 2) as f32;
    let denominator = max_intensity.ln_1p();
    grid.data_mut()
        .par_chunks_mut(grid_width)
        .enumerate()
        .for_each(|(gy, row)| {
            let sy = (gy * cell_size) as f32 + half;
            for (gx, slot) in row.iter_mut().enumerate() {
                let sx = (gx * cell_size) as f32 + half;
                let world = transform.screen_to_world(Vector2D::new(sx, sy));
                let intensity = source.field_at(world, charges).magnitude();
                *slot = normalize(intensity, denominator);
            }
        });
    grid
}

/// `ln(1 + intensity) / ln(1 + max)`, kept inside [0, 1].
///
/// A NaN ratio only arises at a singular sample, which is the brightest cell.
fn normalize(intensity: f32, denominator: f32) -> f32 {
    let t = intensity.ln_1p() / denominator;
    if t.is_nan() {
        1.0
    } else {
        t.clamp(0.0, 1.0)
    }
}
