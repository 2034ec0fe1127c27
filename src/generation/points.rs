//! Seeded site generation inside a rectangle
//!
//! Two distributions are available:
//! - uniform random sites, the classic irregular Voronoi input
//! - a jittered grid: one site per roughly square grid cell, displaced by a
//!   random fraction of the cell size, which gives even coverage without the
//!   regular look of a plain lattice
//!
//! Both use `ChaCha8Rng` so the same seed yields the same sites on every
//! platform.

use glam::DVec2;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::geometry::Rect;

/// Jitter strength as a fraction of the grid cell size
/// 0.0 = plain lattice, 1.0 = anywhere inside the grid cell
const JITTER_STRENGTH: f64 = 0.8;

/// Uniformly distributed sites inside `bounds`
///
/// ```rust
/// use rust_voronoi_plane::generation::generate_random_sites;
/// use rust_voronoi_plane::geometry::Rect;
///
/// let bounds = Rect::new(0.0, 0.0, 100.0, 50.0);
/// let sites = generate_random_sites(200, &bounds, 42);
/// assert_eq!(sites.len(), 200);
/// assert!(sites.iter().all(|&p| bounds.contains(p)));
/// ```
pub fn generate_random_sites(count: usize, bounds: &Rect, seed: u64) -> Vec<DVec2> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    (0..count)
        .map(|_| {
            DVec2::new(
                bounds.left() + rng.gen::<f64>() * bounds.width,
                bounds.top() + rng.gen::<f64>() * bounds.height,
            )
        })
        .collect()
}

/// Sites on a jittered grid covering `bounds`
///
/// The grid has `columns × rows ≥ count` cells with an aspect ratio close to
/// the rectangle's; cells are filled row by row and the last row may be
/// partial.
pub fn generate_jittered_grid(count: usize, bounds: &Rect, seed: u64) -> Vec<DVec2> {
    if count == 0 {
        return Vec::new();
    }

    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let (columns, rows) = grid_shape(count, bounds);
    let cell = DVec2::new(bounds.width / columns as f64, bounds.height / rows as f64);
    let jitter = cell * 0.5 * JITTER_STRENGTH;

    (0..count)
        .map(|i| {
            let (col, row) = (i % columns, i / columns);
            let center = DVec2::new(
                bounds.left() + (col as f64 + 0.5) * cell.x,
                bounds.top() + (row as f64 + 0.5) * cell.y,
            );
            let offset = DVec2::new(
                rng.gen_range(-1.0..=1.0) * jitter.x,
                rng.gen_range(-1.0..=1.0) * jitter.y,
            );
            center + offset
        })
        .collect()
}

/// Columns and rows for `count` cells of roughly square shape
fn grid_shape(count: usize, bounds: &Rect) -> (usize, usize) {
    let aspect = bounds.width / bounds.height;
    let columns = ((count as f64 * aspect).sqrt().round() as usize).clamp(1, count);
    let rows = count.div_ceil(columns);
    (columns, rows)
}
