//! Voronoi Cell Structure
//!
//! Represents an individual clipped cell of the diagram with its site,
//! boundary polygon and neighbors.

use glam::DVec2;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::geometry::{polygon_area, polygon_centroid, signed_area2};

/// A single Voronoi cell clipped to the diagram bounds
///
/// Each cell represents the region of the rectangle closer to its site than
/// to any other site, with:
/// - The ID of its site (its index in the input sequence)
/// - The site position itself
/// - The boundary polygon, both as indices into the diagram's shared vertex
///   buffer and as positions
/// - Neighbor connectivity for graph traversal
///
/// A cell is empty when its site duplicates an earlier site or when the
/// region misses the rectangle entirely.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct VoronoiCell {
    /// Identifier of this cell (index of its site in the input)
    pub id: usize,

    /// Generating site
    pub site: DVec2,

    /// Boundary vertices as indices into `VoronoiDiagram::vertices`
    ///
    /// Counter-clockwise in a y-up frame.
    pub vertex_indices: Vec<usize>,

    /// Boundary vertices as positions, in the same order
    pub vertices: Vec<DVec2>,

    /// IDs of adjacent cells (sites sharing a Delaunay edge), sorted
    ///
    /// Adjacency is taken from the unclipped diagram: two neighbors may share
    /// no border inside the rectangle when their common edge lies outside it.
    pub neighbors: Vec<usize>,

    /// The site lies on the convex hull, so the cell is unbounded before
    /// clipping
    pub unclosed: bool,
}

impl VoronoiCell {
    /// Create a new Voronoi cell
    ///
    /// This is typically called while building a diagram, not by user code.
    pub fn new(
        id: usize,
        site: DVec2,
        vertex_indices: Vec<usize>,
        vertices: Vec<DVec2>,
        neighbors: Vec<usize>,
        unclosed: bool,
    ) -> Self {
        Self {
            id,
            site,
            vertex_indices,
            vertices,
            neighbors,
            unclosed,
        }
    }

    #[inline]
    pub fn neighbor_count(&self) -> usize {
        self.neighbors.len()
    }

    /// Check if this cell is a neighbor of another cell
    #[inline]
    pub fn is_neighbor_of(&self, other_cell_id: usize) -> bool {
        self.neighbors.binary_search(&other_cell_id).is_ok()
    }

    /// Get the vertex count (polygon complexity)
    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Whether the cell has no area inside the bounds
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Area of the clipped polygon (shoelace formula)
    pub fn area(&self) -> f64 {
        polygon_area(&self.vertices).abs()
    }

    /// Area centroid of the clipped polygon, `None` for an empty cell
    pub fn centroid(&self) -> Option<DVec2> {
        polygon_centroid(&self.vertices)
    }

    /// Whether `point` lies inside the cell or on its border
    pub fn contains(&self, point: DVec2) -> bool {
        let n = self.vertices.len();
        if n < 3 {
            return false;
        }
        (0..n).all(|i| signed_area2(self.vertices[i], self.vertices[(i + 1) % n], point) >= 0.0)
    }

    /// Euclidean distance between the two sites
    pub fn distance_to(&self, other: &VoronoiCell) -> f64 {
        self.site.distance(other.site)
    }
}
