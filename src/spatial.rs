//! Spatial indexing for fast position-to-cell lookups
//!
//! This module is only available with the `spatial-index` feature.

use glam::DVec2;
use kiddo::immutable::float::kdtree::ImmutableKdTree;
use kiddo::SquaredEuclidean;

/// Wrapper around KD-tree for nearest-site queries
///
/// The nearest site of a point is the site whose Voronoi cell contains it, so
/// a nearest-neighbor lookup is a point location query on the diagram.
///
/// # Performance
///
/// - Construction: O(n log n)
/// - Query: O(log n)
#[derive(Clone)]
pub struct SpatialIndex {
    tree: Option<ImmutableKdTree<f64, usize, 2, 32>>,
    /// Cell ID of each indexed site, in insertion order
    ids: Vec<usize>,
}

impl SpatialIndex {
    /// Build spatial index over all sites; cell IDs are slice positions
    ///
    /// ```
    /// use rust_voronoi_plane::*;
    ///
    /// # #[cfg(feature = "spatial-index")]
    /// # {
    /// let sites = vec![DVec2::new(0.0, 0.0), DVec2::new(10.0, 0.0), DVec2::new(0.0, 10.0)];
    ///
    /// let index = SpatialIndex::new(&sites);
    /// assert_eq!(index.find_nearest(DVec2::new(9.0, 1.0)), Some(1));
    /// # }
    /// ```
    pub fn new(sites: &[DVec2]) -> Self {
        Self::from_entries(sites.iter().copied().enumerate())
    }

    /// Build spatial index over `(cell id, site)` pairs
    ///
    /// Used by the diagram to index only the sites that own a non-empty cell.
    pub fn from_entries(entries: impl IntoIterator<Item = (usize, DVec2)>) -> Self {
        let (ids, points): (Vec<usize>, Vec<[f64; 2]>) = entries
            .into_iter()
            .map(|(id, site)| (id, [site.x, site.y]))
            .unzip();

        let tree = (!points.is_empty()).then(|| ImmutableKdTree::new_from_slice(&points));
        Self { tree, ids }
    }

    /// Number of indexed sites
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Find the cell whose site is nearest to a position
    ///
    /// Returns `None` only when the index is empty.
    pub fn find_nearest(&self, position: DVec2) -> Option<usize> {
        let tree = self.tree.as_ref()?;
        let result = tree.nearest_one::<SquaredEuclidean>(&[position.x, position.y]);
        self.ids.get(result.item).copied()
    }
}
