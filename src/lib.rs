//! Planar Voronoi diagrams clipped to a rectangle
//!
//! Sites are triangulated with a sweep-hull Delaunay construction; the
//! Voronoi cells are the dual of that triangulation, clipped to an
//! axis-aligned bounding rectangle and sharing one deduplicated vertex buffer.
//!
//! # Quick Start
//!
//! ```rust
//! use rust_voronoi_plane::*;
//!
//! // Generate a diagram from seeded random sites
//! let config = DiagramConfigBuilder::new()
//!     .seed(42)
//!     .site_count(500)
//!     .unwrap()
//!     .bounds(Rect::new(0.0, 0.0, 800.0, 600.0))
//!     .unwrap()
//!     .lloyd_iterations(3)
//!     .unwrap()
//!     .build()
//!     .unwrap();
//!
//! let diagram = VoronoiDiagram::generate(config).unwrap();
//!
//! // Generate mesh for rendering
//! let mesh = generate_mesh(&diagram, &BasicColorMapper);
//! println!("Generated {} triangles", mesh.triangle_count());
//! ```
//!
//! The kernel is also usable without the facade:
//!
//! ```rust
//! use rust_voronoi_plane::generation::{triangulate, voronoi};
//! use rust_voronoi_plane::{DVec2, Rect};
//!
//! let sites = [DVec2::new(0.0, 0.0), DVec2::new(10.0, 0.0)];
//! let triangulation = triangulate(&sites);
//! let diagram = voronoi(&sites, &triangulation, &Rect::new(-5.0, -5.0, 25.0, 15.0));
//! assert_eq!(diagram.cells.len(), 2);
//! ```
//!
//! # Features
//!
//! - `spatial-index` (default): Enables O(log n) position-to-cell lookups using KD-tree
//! - `serde`: Enables serialization support for configuration, geometry and cells

// Modules
pub mod error;
pub mod config;
pub mod geometry;
pub mod cell;
pub mod generation;
pub mod diagram;
pub mod mesh;

#[cfg(feature = "spatial-index")]
pub mod spatial;

// Re-export core types for convenience
pub use error::{VoronoiError, Result};
pub use config::{DiagramConfig, DiagramConfigBuilder, SiteDistribution};
pub use geometry::{Rect, Side};
pub use cell::VoronoiCell;
pub use diagram::VoronoiDiagram;
pub use mesh::{MeshData, generate_mesh, generate_mesh_with_visibility, ColorMapper, BasicColorMapper, CustomColorMapper, CellColor};
pub use generation::{ClippedDiagram, LloydOptions, Triangle, Triangulation};

#[cfg(feature = "spatial-index")]
pub use spatial::SpatialIndex;

// Re-export glam::DVec2 for convenience
pub use glam::DVec2;
