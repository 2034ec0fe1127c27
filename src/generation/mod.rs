//! Core Voronoi generation algorithm
//!
//! Sites are triangulated with a sweep-hull Delaunay construction, the
//! Voronoi polygons are read off the triangulation as its dual, and finally
//! clipped to the bounding rectangle. Site generation and Lloyd's relaxation
//! feed the pipeline when a diagram is generated from a configuration.

pub mod clip;
pub mod delaunay;
mod lloyd;
mod points;
pub mod voronoi;

pub use clip::{clip_cells, voronoi, ClippedDiagram, VertexPool};
pub use delaunay::{
    triangulate, triangulate_with_tolerance, Triangle, Triangulation, DEFAULT_IN_CIRCLE_EPSILON,
};
pub use lloyd::{lloyd_relaxation, lloyd_relaxation_with_options, LloydOptions};
pub use points::{generate_jittered_grid, generate_random_sites};
pub use voronoi::{build_dual, voronoi_unbounded, DualGraph, PolygonRef, PolygonVertex, SitePolygon};

use glam::DVec2;

use crate::config::{DiagramConfig, SiteDistribution};

/// Generate the sites for a configuration
///
/// Places `site_count` sites with the configured distribution, then applies
/// Lloyd's relaxation with convergence detection.
pub fn generate_sites(config: &DiagramConfig) -> Vec<DVec2> {
    // Step 1: Seeded placement
    let points = match config.distribution {
        SiteDistribution::Random => generate_random_sites(config.site_count, &config.bounds, config.seed),
        SiteDistribution::JitteredGrid => {
            generate_jittered_grid(config.site_count, &config.bounds, config.seed)
        }
    };

    // Step 2: Lloyd's relaxation
    if config.lloyd_iterations > 0 {
        let options = LloydOptions {
            max_iterations: config.lloyd_iterations,
            convergence_threshold: config.lloyd_convergence,
            in_circle_epsilon: config.in_circle_epsilon,
        };
        lloyd_relaxation_with_options(points, &config.bounds, options)
    } else {
        points
    }
}
