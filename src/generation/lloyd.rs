//! Lloyd's Relaxation for uniform site distribution
//!
//! Lloyd's Relaxation iteratively improves the uniformity of the sites by
//! moving each one to the centroid of its clipped Voronoi cell.

use glam::DVec2;
use std::time::Instant;
use tracing::{debug, info};

use crate::generation::clip::voronoi;
use crate::generation::delaunay::triangulate_with_tolerance;
use crate::generation::delaunay::DEFAULT_IN_CIRCLE_EPSILON;
use crate::geometry::{polygon_centroid, Rect};

/// Options for Lloyd's relaxation algorithm
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LloydOptions {
    /// Maximum number of iterations to run
    pub max_iterations: usize,
    /// Convergence threshold - stop when max displacement < this value times
    /// the bounds diagonal. Set to 0.0 to disable early termination
    pub convergence_threshold: f64,
    /// In-circle tolerance handed to the triangulation
    pub in_circle_epsilon: f64,
}

impl Default for LloydOptions {
    fn default() -> Self {
        Self {
            max_iterations: 5,
            convergence_threshold: 0.001,
            in_circle_epsilon: DEFAULT_IN_CIRCLE_EPSILON,
        }
    }
}

/// Apply Lloyd's Relaxation to improve site distribution uniformity
///
/// For each iteration:
/// 1. Triangulate the current sites
/// 2. Build and clip the Voronoi cells to `bounds`
/// 3. Move every site to the centroid of its cell
///
/// Sites whose cell is empty (duplicates, sites far outside `bounds`) stay
/// where they are.
pub fn lloyd_relaxation(points: Vec<DVec2>, bounds: &Rect, iterations: usize) -> Vec<DVec2> {
    let options = LloydOptions {
        max_iterations: iterations,
        ..Default::default()
    };
    lloyd_relaxation_with_options(points, bounds, options)
}

/// Apply Lloyd's Relaxation with custom options
pub fn lloyd_relaxation_with_options(
    mut points: Vec<DVec2>,
    bounds: &Rect,
    options: LloydOptions,
) -> Vec<DVec2> {
    let convergence_threshold = options.convergence_threshold * bounds.diagonal();
    let total_start = Instant::now();

    debug!(
        sites = points.len(),
        max_iterations = options.max_iterations,
        threshold = convergence_threshold,
        "lloyd relaxation starting"
    );

    let mut iterations_run = 0;
    let mut converged = false;

    for iteration in 0..options.max_iterations {
        let iter_start = Instant::now();

        let (new_points, max_displacement) = relax_once(&points, bounds, options.in_circle_epsilon);
        points = new_points;
        iterations_run = iteration + 1;

        debug!(
            iteration = iteration + 1,
            max_displacement,
            elapsed = ?iter_start.elapsed(),
            "lloyd iteration"
        );

        if convergence_threshold > 0.0 && max_displacement < convergence_threshold {
            converged = true;
            break;
        }
    }

    info!(
        iterations = iterations_run,
        max_iterations = options.max_iterations,
        converged,
        elapsed = ?total_start.elapsed(),
        "lloyd relaxation finished"
    );

    points
}

/// One relaxation step; returns the moved sites and the largest displacement
fn relax_once(points: &[DVec2], bounds: &Rect, epsilon: f64) -> (Vec<DVec2>, f64) {
    let triangulation = triangulate_with_tolerance(points, epsilon);
    let diagram = voronoi(points, &triangulation, bounds);

    let mut max_displacement: f64 = 0.0;
    let new_points = points
        .iter()
        .enumerate()
        .map(|(site, &old)| {
            let new = polygon_centroid(&diagram.polygon(site)).unwrap_or(old);
            max_displacement = max_displacement.max(old.distance(new));
            new
        })
        .collect();

    (new_points, max_displacement)
}
