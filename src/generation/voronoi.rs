//! Voronoi cells as the dual of the Delaunay triangulation
//!
//! Every triangle contributes its circumcenter to the cells of its three
//! sites. Every hull edge contributes one open vertex, projected from the
//! circumcenter of the triangle behind it along the edge's outward normal, so
//! that the unbounded cells of hull sites get a finite polygon whose open side
//! lies entirely outside the clip rectangle.

use glam::DVec2;
use std::cmp::Ordering;
use tracing::{debug, warn};

use crate::generation::delaunay::Triangulation;
use crate::geometry::{angle, midpoint, normal, normalize, Rect};

/// Shared vertex of the pre-clip polygons
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PolygonVertex {
    pub position: DVec2,
    /// Already inside the clip rectangle (always false without one)
    pub inside: bool,
}

/// Reference from a site polygon into the vertex pool
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PolygonRef {
    pub vertex: usize,
    /// The open vertex where an unclosed polygon begins
    pub start: bool,
}

/// Pre-clip polygon of one site
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SitePolygon {
    /// Angularly ordered around the site; unclosed polygons begin at their
    /// start vertex and the edge from the last vertex back to the first is
    /// the open side
    pub refs: Vec<PolygonRef>,
    /// Hull site: the cell is unbounded before clipping
    pub unclosed: bool,
    /// Largest circumradius among the triangles around the site
    pub max_radius: f64,
}

/// Per-site polygons over a shared vertex pool
#[derive(Debug, Clone, Default)]
pub struct DualGraph {
    pub polygons: Vec<SitePolygon>,
    pub vertices: Vec<PolygonVertex>,
}

impl DualGraph {
    /// Vertex positions of one site polygon, in order
    pub fn polygon_positions(&self, site: usize) -> Vec<DVec2> {
        self.polygons
            .get(site)
            .map(|p| p.refs.iter().map(|r| self.vertices[r.vertex].position).collect())
            .unwrap_or_default()
    }
}

/// Build the unclipped Voronoi polygons of `points`
///
/// With `bounds`, open vertices are pushed far enough to lie outside the
/// rectangle and circumcenters are tagged with their containment. Without it,
/// open vertices sit one edge-length away from their anchor.
pub fn build_dual(points: &[DVec2], triangulation: &Triangulation, bounds: Option<&Rect>) -> DualGraph {
    let mut polygons = vec![SitePolygon::default(); points.len()];
    let mut vertices: Vec<PolygonVertex> = Vec::new();

    let closed = !triangulation.is_degenerate();
    let hull = &triangulation.hull;
    let edge_owner = triangulation.directed_edges();
    let pair_count = if closed { hull.len() } else { hull.len().saturating_sub(1) };

    for i in 0..pair_count {
        let (i0, i1) = (hull[i], hull[(i + 1) % hull.len()]);

        let anchor = if closed {
            match edge_owner.get(&(i0, i1)) {
                Some(&tri_idx) => triangulation.triangles[tri_idx].circumcenter,
                None => {
                    warn!(from = i0, to = i1, "hull edge without triangle, anchoring at midpoint");
                    midpoint(points[i0], points[i1])
                }
            }
        } else {
            midpoint(points[i0], points[i1])
        };

        let mut offset = normal(points[i1], points[i0]);
        if let Some(bounds) = bounds {
            offset = normalize(offset) * far_distance(anchor, bounds);
        }

        let outer = vertices.len();
        vertices.push(PolygonVertex {
            position: anchor + offset,
            inside: false,
        });
        polygons[i0].unclosed = true;
        polygons[i0].refs.push(PolygonRef { vertex: outer, start: true });
        polygons[i1].refs.push(PolygonRef { vertex: outer, start: false });

        if !closed {
            // A line of sites splits the plane into strips open on both sides
            let mirrored = vertices.len();
            vertices.push(PolygonVertex {
                position: anchor - offset,
                inside: false,
            });
            polygons[i1].unclosed = true;
            polygons[i0].refs.push(PolygonRef { vertex: mirrored, start: false });
            polygons[i1].refs.push(PolygonRef { vertex: mirrored, start: true });
        }
    }

    for triangle in &triangulation.triangles {
        let vertex = vertices.len();
        vertices.push(PolygonVertex {
            position: triangle.circumcenter,
            inside: bounds.is_some_and(|b| b.contains(triangle.circumcenter)),
        });
        for &site in &triangle.vertices {
            let polygon = &mut polygons[site];
            polygon.max_radius = polygon.max_radius.max(triangle.radius);
            polygon.refs.push(PolygonRef { vertex, start: false });
        }
    }

    for (site, polygon) in polygons.iter_mut().enumerate() {
        order_polygon(points[site], polygon, &vertices);
    }

    debug!(
        sites = points.len(),
        vertices = vertices.len(),
        open = polygons.iter().filter(|p| p.unclosed).count(),
        "dual graph built"
    );

    DualGraph { polygons, vertices }
}

/// Unclipped cells as vertex positions, one list per site
///
/// Sites that never made it into the triangulation (duplicates), and the
/// lone site of a single-position input, get an empty list.
pub fn voronoi_unbounded(points: &[DVec2], triangulation: &Triangulation) -> Vec<Vec<DVec2>> {
    let dual = build_dual(points, triangulation, None);
    (0..points.len()).map(|site| dual.polygon_positions(site)).collect()
}

/// Distance from `anchor` to the rectangle corner farthest from it
fn far_distance(anchor: DVec2, bounds: &Rect) -> f64 {
    let x = if (anchor.x - bounds.left()).abs() > (anchor.x - bounds.right()).abs() {
        bounds.left()
    } else {
        bounds.right()
    };
    let y = if (anchor.y - bounds.top()).abs() > (anchor.y - bounds.bottom()).abs() {
        bounds.top()
    } else {
        bounds.bottom()
    };
    anchor.distance(DVec2::new(x, y))
}

/// Sort refs by angle around the site; unclosed polygons start at their
/// start vertex so the open side falls between the last and first entries
fn order_polygon(site: DVec2, polygon: &mut SitePolygon, vertices: &[PolygonVertex]) {
    if polygon.refs.is_empty() {
        return;
    }

    let mut keyed: Vec<(PolygonRef, f64)> = polygon
        .refs
        .iter()
        .map(|&r| (r, angle(site, vertices[r.vertex].position)))
        .collect();
    keyed.sort_by(|a, b| a.1.partial_cmp(&b.1).unwrap_or(Ordering::Equal));

    let mut ordered: Vec<PolygonRef> = keyed.into_iter().map(|(r, _)| r).collect();
    if polygon.unclosed {
        if let Some(start) = ordered.iter().position(|r| r.start) {
            ordered.rotate_left(start);
        }
    }
    polygon.refs = ordered;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generation::delaunay::triangulate;

    fn pts(coords: &[(f64, f64)]) -> Vec<DVec2> {
        coords.iter().map(|&(x, y)| DVec2::new(x, y)).collect()
    }

    #[test]
    fn test_two_sites_share_open_vertices() {
        let points = pts(&[(0.0, 0.0), (10.0, 0.0)]);
        let t = triangulate(&points);
        let bounds = Rect::new(-5.0, -5.0, 25.0, 15.0);
        let dual = build_dual(&points, &t, Some(&bounds));

        assert_eq!(dual.vertices.len(), 2);
        assert!(dual.polygons.iter().all(|p| p.unclosed && p.refs.len() == 2));

        // Both open vertices sit on the bisector x = 5, outside the rectangle
        for v in &dual.vertices {
            assert!((v.position.x - 5.0).abs() < 1e-12);
            assert!(!bounds.contains(v.position));
            assert!(!v.inside);
        }

        assert!(dual.polygons[0].refs[0].start);
        assert!(dual.polygons[1].refs[0].start);
        assert_ne!(dual.polygons[0].refs[0].vertex, dual.polygons[1].refs[0].vertex);
    }

    #[test]
    fn test_far_distance_reaches_farthest_corner() {
        let bounds = Rect::new(-10.0, -10.0, 30.0, 30.0);
        let d = far_distance(DVec2::new(5.0, 3.75), &bounds);
        let expected = DVec2::new(5.0, 3.75).distance(DVec2::new(20.0, 20.0));
        assert!((d - expected).abs() < 1e-12);
    }

    #[test]
    fn test_triangle_dual_orders_hull_cells() {
        let points = pts(&[(0.0, 0.0), (10.0, 0.0), (5.0, 10.0)]);
        let t = triangulate(&points);
        let bounds = Rect::new(-10.0, -10.0, 30.0, 30.0);
        let dual = build_dual(&points, &t, Some(&bounds));

        // Three open vertices and one circumcenter
        assert_eq!(dual.vertices.len(), 4);
        let center = dual.vertices[3];
        assert!(center.inside);
        assert!((center.position - DVec2::new(5.0, 3.75)).length() < 1e-9);

        for polygon in &dual.polygons {
            assert!(polygon.unclosed);
            assert_eq!(polygon.refs.len(), 3);
            assert!(polygon.refs[0].start);
            // The circumcenter sits between the two open vertices
            assert_eq!(polygon.refs[1].vertex, 3);
            assert!((polygon.max_radius - 6.25).abs() < 1e-9);
        }
    }

    #[test]
    fn test_interior_site_is_closed() {
        let points = pts(&[(0.0, 0.0), (10.0, 0.0), (5.0, 10.0), (5.0, 3.0)]);
        let t = triangulate(&points);
        let dual = build_dual(&points, &t, None);

        let interior = &dual.polygons[3];
        assert!(!interior.unclosed);
        assert_eq!(interior.refs.len(), 3);
        assert!(interior.refs.iter().all(|r| !r.start));

        // Counter-clockwise around the site
        let ring = dual.polygon_positions(3);
        let mut area2 = 0.0;
        for i in 0..ring.len() {
            area2 += ring[i].perp_dot(ring[(i + 1) % ring.len()]);
        }
        assert!(area2 > 0.0);
    }

    #[test]
    fn test_unbounded_cells() {
        let points = pts(&[(0.0, 0.0), (10.0, 0.0), (5.0, 10.0)]);
        let t = triangulate(&points);
        let cells = voronoi_unbounded(&points, &t);

        assert_eq!(cells.len(), 3);
        for cell in &cells {
            assert_eq!(cell.len(), 3);
            assert!((cell[1] - DVec2::new(5.0, 3.75)).length() < 1e-9);
        }
        // Open vertex of edge 0 -> 1 is one edge length below the circumcenter
        assert!((cells[0][0] - DVec2::new(5.0, 3.75 - 10.0)).length() < 1e-9);
    }

    #[test]
    fn test_duplicate_site_has_no_polygon() {
        let points = pts(&[(0.0, 0.0), (10.0, 0.0), (0.0, 0.0)]);
        let t = triangulate(&points);
        let cells = voronoi_unbounded(&points, &t);
        assert!(cells[2].is_empty());
        assert_eq!(cells[0].len(), 2);
        assert_eq!(cells[1].len(), 2);
    }
}
