//! VoronoiDiagram main structure

use glam::DVec2;
use std::collections::HashSet;
use tracing::debug;

use crate::cell::VoronoiCell;
use crate::config::{DiagramConfig, MAX_IN_CIRCLE_EPSILON};
use crate::error::{Result, VoronoiError};
use crate::generation::{
    generate_sites, triangulate_with_tolerance, voronoi, Triangulation, DEFAULT_IN_CIRCLE_EPSILON,
};
use crate::geometry::Rect;

#[cfg(feature = "spatial-index")]
use crate::spatial::SpatialIndex;

/// A Voronoi diagram clipped to a rectangle
///
/// Stores the sites, their Delaunay triangulation and one cell per site
/// (indexed by site position in the input) for fast queries and graph
/// traversal. Cell boundaries index into one shared vertex buffer.
///
/// # Examples
///
/// ```
/// use rust_voronoi_plane::*;
///
/// let sites = vec![DVec2::new(0.0, 0.0), DVec2::new(10.0, 0.0), DVec2::new(5.0, 10.0)];
/// let diagram = VoronoiDiagram::compute(sites, Rect::new(-10.0, -10.0, 30.0, 30.0)).unwrap();
///
/// assert_eq!(diagram.cell_count(), 3);
/// let total: f64 = diagram.cells().iter().map(|c| c.area()).sum();
/// assert!((total - 900.0).abs() < 1e-6);
/// ```
#[derive(Clone)]
pub struct VoronoiDiagram {
    /// Configuration used to generate this diagram, if any
    config: Option<DiagramConfig>,

    bounds: Rect,

    sites: Vec<DVec2>,

    triangulation: Triangulation,

    /// All cells (indexed by site ID)
    cells: Vec<VoronoiCell>,

    /// Shared, deduplicated cell vertices
    vertices: Vec<DVec2>,

    /// Spatial index for fast position-to-cell lookups (optional, requires spatial-index feature)
    #[cfg(feature = "spatial-index")]
    spatial_index: SpatialIndex,
}

impl VoronoiDiagram {
    /// Compute the diagram of `sites` clipped to `bounds`
    ///
    /// # Errors
    ///
    /// - `InvalidConfig` if `bounds` is not finite with positive extent
    /// - `InvalidSite` for the first site with a non-finite coordinate
    pub fn compute(sites: Vec<DVec2>, bounds: Rect) -> Result<Self> {
        Self::compute_with_tolerance(sites, bounds, DEFAULT_IN_CIRCLE_EPSILON)
    }

    /// Compute the diagram with an explicit in-circle tolerance
    pub fn compute_with_tolerance(sites: Vec<DVec2>, bounds: Rect, in_circle_epsilon: f64) -> Result<Self> {
        validate_bounds(&bounds)?;
        validate_epsilon(in_circle_epsilon)?;
        if let Some(index) = sites.iter().position(|p| !p.is_finite()) {
            return Err(VoronoiError::InvalidSite {
                index,
                reason: format!("non-finite coordinate {:?}", sites[index]),
            });
        }

        let triangulation = triangulate_with_tolerance(&sites, in_circle_epsilon);
        let clipped = voronoi(&sites, &triangulation, &bounds);
        let neighbors = triangulation.site_neighbors(sites.len());
        let hull: HashSet<usize> = triangulation.hull.iter().copied().collect();

        let cells: Vec<VoronoiCell> = neighbors
            .into_iter()
            .enumerate()
            .map(|(id, neighbors)| {
                VoronoiCell::new(
                    id,
                    sites[id],
                    clipped.cells[id].clone(),
                    clipped.polygon(id),
                    neighbors,
                    hull.contains(&id),
                )
            })
            .collect();

        debug!(
            sites = sites.len(),
            cells = cells.iter().filter(|c| !c.is_empty()).count(),
            vertices = clipped.vertices.len(),
            "diagram computed"
        );

        #[cfg(feature = "spatial-index")]
        let spatial_index = SpatialIndex::from_entries(
            cells.iter().filter(|c| !c.is_empty()).map(|c| (c.id, c.site)),
        );

        Ok(Self {
            config: None,
            bounds,
            sites,
            triangulation,
            cells,
            vertices: clipped.vertices,
            #[cfg(feature = "spatial-index")]
            spatial_index,
        })
    }

    /// Generate sites from a configuration and compute their diagram
    ///
    /// ```
    /// use rust_voronoi_plane::*;
    ///
    /// let config = DiagramConfigBuilder::new()
    ///     .seed(12345)
    ///     .site_count(300)
    ///     .unwrap()
    ///     .build()
    ///     .unwrap();
    ///
    /// let diagram = VoronoiDiagram::generate(config).unwrap();
    /// assert_eq!(diagram.cell_count(), 300);
    /// ```
    pub fn generate(config: DiagramConfig) -> Result<Self> {
        validate_bounds(&config.bounds)?;
        let sites = generate_sites(&config);
        let mut diagram = Self::compute_with_tolerance(sites, config.bounds, config.in_circle_epsilon)?;
        diagram.config = Some(config);
        Ok(diagram)
    }

    /// Get the configuration used to generate this diagram
    ///
    /// `None` for diagrams computed from explicit sites.
    #[inline]
    pub fn config(&self) -> Option<&DiagramConfig> {
        self.config.as_ref()
    }

    #[inline]
    pub fn bounds(&self) -> &Rect {
        &self.bounds
    }

    #[inline]
    pub fn sites(&self) -> &[DVec2] {
        &self.sites
    }

    #[inline]
    pub fn triangulation(&self) -> &Triangulation {
        &self.triangulation
    }

    /// Get the number of cells (one per site, including empty ones)
    #[inline]
    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }

    /// Get a cell by ID
    ///
    /// Returns `None` if the cell ID is out of bounds.
    #[inline]
    pub fn get_cell(&self, id: usize) -> Option<&VoronoiCell> {
        self.cells.get(id)
    }

    /// Get a cell by ID, failing with `CellNotFound`
    pub fn cell(&self, id: usize) -> Result<&VoronoiCell> {
        self.cells.get(id).ok_or(VoronoiError::CellNotFound(id))
    }

    /// Get all cells as a slice
    #[inline]
    pub fn cells(&self) -> &[VoronoiCell] {
        &self.cells
    }

    /// Shared vertex buffer that `VoronoiCell::vertex_indices` point into
    #[inline]
    pub fn vertices(&self) -> &[DVec2] {
        &self.vertices
    }

    /// Get neighbor IDs for a cell
    ///
    /// Returns empty slice if cell ID is invalid.
    pub fn get_neighbors(&self, cell_id: usize) -> &[usize] {
        self.cells
            .get(cell_id)
            .map(|c| c.neighbors.as_slice())
            .unwrap_or(&[])
    }

    /// Find the cell containing a position (requires spatial-index feature)
    ///
    /// Positions outside the bounds resolve to the cell that would contain
    /// them in the unclipped diagram. Returns `None` when no cell is
    /// non-empty.
    #[cfg(feature = "spatial-index")]
    pub fn find_cell_at(&self, position: DVec2) -> Option<usize> {
        self.spatial_index.find_nearest(position)
    }

    /// Find cells within a given hop count from a center cell (BFS)
    ///
    /// Returns the IDs of every cell reachable within `hops` neighbor steps,
    /// including the center cell, sorted. Returns empty vec if `center_id`
    /// is invalid.
    pub fn find_cells_within_radius(&self, center_id: usize, hops: usize) -> Vec<usize> {
        if center_id >= self.cells.len() {
            return vec![];
        }

        let mut visited = HashSet::new();
        let mut current = vec![center_id];
        visited.insert(center_id);

        for _ in 0..hops {
            let mut next = Vec::new();
            for &cell_id in &current {
                for &neighbor in self.get_neighbors(cell_id) {
                    if visited.insert(neighbor) {
                        next.push(neighbor);
                    }
                }
            }
            if next.is_empty() {
                break;
            }
            current = next;
        }

        let mut found: Vec<usize> = visited.into_iter().collect();
        found.sort_unstable();
        found
    }
}

fn validate_bounds(bounds: &Rect) -> Result<()> {
    if bounds.is_valid() {
        Ok(())
    } else {
        Err(VoronoiError::InvalidConfig(format!(
            "bounds must be finite with positive extent (got {:?})",
            bounds
        )))
    }
}

fn validate_epsilon(epsilon: f64) -> Result<()> {
    if (0.0..=MAX_IN_CIRCLE_EPSILON).contains(&epsilon) {
        Ok(())
    } else {
        Err(VoronoiError::InvalidConfig(format!(
            "in-circle epsilon must be in [0, {}] (got {})",
            MAX_IN_CIRCLE_EPSILON, epsilon
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::DiagramConfigBuilder;

    fn triangle_diagram() -> VoronoiDiagram {
        let sites = vec![
            DVec2::new(0.0, 0.0),
            DVec2::new(10.0, 0.0),
            DVec2::new(5.0, 10.0),
            DVec2::new(5.0, 3.0),
        ];
        VoronoiDiagram::compute(sites, Rect::new(-20.0, -20.0, 50.0, 50.0)).unwrap()
    }

    fn generated() -> VoronoiDiagram {
        let config = DiagramConfigBuilder::new()
            .seed(42)
            .site_count(400)
            .unwrap()
            .build()
            .unwrap();
        VoronoiDiagram::generate(config).unwrap()
    }

    #[test]
    fn test_compute_cells() {
        let diagram = triangle_diagram();

        assert_eq!(diagram.cell_count(), 4);
        assert!(diagram.config().is_none());
        assert_eq!(diagram.triangulation().triangle_count(), 3);

        let interior = diagram.cell(3).unwrap();
        assert!(!interior.unclosed);
        assert_eq!(interior.neighbors, vec![0, 1, 2]);
        assert!(interior.contains(interior.site));
        assert!(diagram.cells()[..3].iter().all(|c| c.unclosed));

        let total: f64 = diagram.cells().iter().map(|c| c.area()).sum();
        assert!((total - diagram.bounds().area()).abs() < 1e-6);
    }

    #[test]
    fn test_vertex_indices_match_positions() {
        let diagram = triangle_diagram();
        for cell in diagram.cells() {
            let resolved: Vec<DVec2> = cell.vertex_indices.iter().map(|&i| diagram.vertices()[i]).collect();
            assert_eq!(resolved, cell.vertices);
        }
    }

    #[test]
    fn test_invalid_input() {
        let result = VoronoiDiagram::compute(vec![DVec2::ZERO], Rect::new(0.0, 0.0, -1.0, 1.0));
        assert!(matches!(result, Err(VoronoiError::InvalidConfig(_))));

        let sites = vec![DVec2::ZERO, DVec2::new(f64::NAN, 1.0)];
        let result = VoronoiDiagram::compute(sites, Rect::new(0.0, 0.0, 1.0, 1.0));
        assert!(matches!(result, Err(VoronoiError::InvalidSite { index: 1, .. })));

        let result = VoronoiDiagram::compute_with_tolerance(vec![], Rect::new(0.0, 0.0, 1.0, 1.0), 0.5);
        assert!(result.is_err());
    }

    #[test]
    fn test_degenerate_inputs() {
        let bounds = Rect::new(0.0, 0.0, 10.0, 10.0);

        let empty = VoronoiDiagram::compute(vec![], bounds).unwrap();
        assert_eq!(empty.cell_count(), 0);
        assert!(empty.vertices().is_empty());

        let single = VoronoiDiagram::compute(vec![DVec2::new(3.0, 3.0); 2], bounds).unwrap();
        assert_eq!(single.cell(0).unwrap().vertices, bounds.corners().to_vec());
        assert!(single.cell(1).unwrap().is_empty());
    }

    #[test]
    fn test_get_cell() {
        let diagram = triangle_diagram();
        assert!(diagram.get_cell(0).is_some());
        assert!(diagram.get_cell(4).is_none());
        assert_eq!(diagram.cell(4), Err(VoronoiError::CellNotFound(4)));
    }

    #[test]
    fn test_neighbors_are_symmetric() {
        let diagram = generated();
        for cell in diagram.cells() {
            assert!(!cell.neighbors.is_empty());
            for &n in &cell.neighbors {
                assert!(diagram.get_cell(n).unwrap().is_neighbor_of(cell.id));
            }
        }
    }

    #[test]
    fn test_generate_is_deterministic() {
        let a = generated();
        let b = generated();
        assert_eq!(a.sites(), b.sites());
        assert_eq!(a.cells(), b.cells());
        assert_eq!(a.config().map(|c| c.seed), Some(42));
    }

    #[test]
    fn test_find_cells_within_radius() {
        let diagram = generated();

        let cells_r0 = diagram.find_cells_within_radius(0, 0);
        assert_eq!(cells_r0, vec![0]);

        let cells_r1 = diagram.find_cells_within_radius(0, 1);
        assert_eq!(cells_r1.len(), 1 + diagram.get_neighbors(0).len());

        let cells_r2 = diagram.find_cells_within_radius(0, 2);
        assert!(cells_r2.len() > cells_r1.len());
    }

    #[test]
    fn test_invalid_cell_id() {
        let diagram = triangle_diagram();
        assert!(diagram.get_neighbors(999999).is_empty());
        assert!(diagram.find_cells_within_radius(999999, 5).is_empty());
    }

    #[cfg(feature = "spatial-index")]
    #[test]
    fn test_find_cell_at() {
        let diagram = generated();

        for cell in diagram.cells().iter().take(50) {
            assert_eq!(diagram.find_cell_at(cell.site), Some(cell.id));
            let centroid = cell.centroid().unwrap();
            assert_eq!(diagram.find_cell_at(centroid), Some(cell.id));
        }
    }
}
