//! Clipping of the dual polygons to the bounding rectangle
//!
//! Each site polygon is walked once to collect where its edges cross the
//! rectangle border, bucketed by side. The clipped cell is then traced by
//! walking the border from the first exit, alternating between polygon
//! vertices (while inside) and rectangle corners (while outside).
//!
//! Output vertices are shared between cells through [`VertexPool`]: dual
//! vertices by their index, computed points (border crossings and corners) by
//! their exact coordinates. Neighboring cells compute a shared crossing from
//! the same segment in opposite directions, which yields the same bits.

use glam::DVec2;
use std::collections::HashMap;
use tracing::debug;

use crate::generation::delaunay::Triangulation;
use crate::generation::voronoi::{build_dual, DualGraph, PolygonVertex, SitePolygon};
use crate::geometry::{Line, Rect, Side};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Clipped cells over a shared, deduplicated vertex list
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ClippedDiagram {
    /// One index list per input site, counter-clockwise in a y-up frame.
    /// Empty for duplicate sites and cells that miss the rectangle.
    pub cells: Vec<Vec<usize>>,
    pub vertices: Vec<DVec2>,
}

impl ClippedDiagram {
    /// Positions of one cell, in order
    pub fn polygon(&self, site: usize) -> Vec<DVec2> {
        self.cells
            .get(site)
            .map(|cell| cell.iter().map(|&i| self.vertices[i]).collect())
            .unwrap_or_default()
    }

    /// Positions of every cell
    pub fn polygons(&self) -> Vec<Vec<DVec2>> {
        (0..self.cells.len()).map(|site| self.polygon(site)).collect()
    }
}

/// Voronoi diagram of `points` clipped to `bounds`
///
/// `triangulation` must come from the same `points`. No input yields no
/// cells; when every point shares one position the first occurrence owns the
/// whole rectangle and the others get empty cells.
pub fn voronoi(points: &[DVec2], triangulation: &Triangulation, bounds: &Rect) -> ClippedDiagram {
    if points.is_empty() {
        return ClippedDiagram::default();
    }

    if triangulation.hull.len() <= 1 {
        let mut pool = VertexPool::default();
        let corners: Vec<usize> = bounds.corners().iter().map(|&c| pool.computed(c)).collect();
        let mut cells = vec![Vec::new(); points.len()];
        let owner = triangulation.hull.first().copied().unwrap_or(0);
        cells[owner] = corners;
        return ClippedDiagram {
            cells,
            vertices: pool.into_vertices(),
        };
    }

    let dual = build_dual(points, triangulation, Some(bounds));
    clip_cells(points, &dual, bounds)
}

/// Clip every polygon of `dual` to `bounds`
///
/// `dual` must have been built with the same `bounds` so its vertices carry
/// the right containment flags and its open vertices lie outside.
pub fn clip_cells(points: &[DVec2], dual: &DualGraph, bounds: &Rect) -> ClippedDiagram {
    let mut clipper = Clipper {
        bounds,
        corners: bounds.corners(),
        raw: &dual.vertices,
        pool: VertexPool::default(),
    };

    let cells: Vec<Vec<usize>> = dual
        .polygons
        .iter()
        .enumerate()
        .map(|(site, polygon)| clipper.clip(points[site], polygon))
        .collect();

    debug!(
        cells = cells.len(),
        empty = cells.iter().filter(|c| c.is_empty()).count(),
        vertices = clipper.pool.len(),
        "cells clipped"
    );

    ClippedDiagram {
        cells,
        vertices: clipper.pool.into_vertices(),
    }
}

/// Deduplicating output vertex list
#[derive(Debug, Default)]
pub struct VertexPool {
    vertices: Vec<DVec2>,
    by_raw: HashMap<usize, usize>,
    by_position: HashMap<(u64, u64), usize>,
}

impl VertexPool {
    /// Output index of dual vertex `raw`, inserting `position` on first use
    pub fn raw(&mut self, raw: usize, position: DVec2) -> usize {
        *self.by_raw.entry(raw).or_insert_with(|| {
            self.vertices.push(position);
            self.vertices.len() - 1
        })
    }

    /// Output index of a computed point, shared by exact coordinates
    pub fn computed(&mut self, position: DVec2) -> usize {
        *self.by_position.entry(position_key(position)).or_insert_with(|| {
            self.vertices.push(position);
            self.vertices.len() - 1
        })
    }

    fn len(&self) -> usize {
        self.vertices.len()
    }

    pub fn into_vertices(self) -> Vec<DVec2> {
        self.vertices
    }
}

/// Append `index` unless it repeats the previous vertex
fn push_distinct(cell: &mut Vec<usize>, index: usize) {
    if cell.last() != Some(&index) {
        cell.push(index);
    }
}

/// Bit pattern key with `-0.0` folded onto `0.0`
fn position_key(p: DVec2) -> (u64, u64) {
    ((p.x + 0.0).to_bits(), (p.y + 0.0).to_bits())
}

/// A polygon edge crossing the border
#[derive(Debug, Clone, Copy)]
struct Crossing {
    position: DVec2,
    /// Index of the polygon vertex that ends the crossing edge
    edge: usize,
}

/// Crossings bucketed by side, in border walking order
#[derive(Debug, Default)]
struct Crossings {
    by_side: [Vec<Crossing>; 4],
    /// Side of the first exit in polygon order
    start: Option<Side>,
}

struct Clipper<'a> {
    bounds: &'a Rect,
    corners: [DVec2; 4],
    raw: &'a [PolygonVertex],
    pool: VertexPool,
}

impl Clipper<'_> {
    fn clip(&mut self, site: DVec2, polygon: &SitePolygon) -> Vec<usize> {
        if polygon.refs.is_empty() {
            return Vec::new();
        }

        // Every vertex lies within max_radius of the site
        if !polygon.unclosed && self.bounds.contains_disk(site, polygon.max_radius) {
            return self.keep_all(polygon);
        }

        let crossings = self.find_crossings(polygon);
        match crossings.start {
            Some(start) => self.trace(polygon, &crossings, start),
            None => self.clip_without_crossings(polygon),
        }
    }

    fn keep(&mut self, raw: usize) -> usize {
        self.pool.raw(raw, self.raw[raw].position)
    }

    fn keep_all(&mut self, polygon: &SitePolygon) -> Vec<usize> {
        polygon.refs.iter().map(|r| self.keep(r.vertex)).collect()
    }

    fn corner(&mut self, side: Side) -> usize {
        self.pool.computed(self.corners[side.index()])
    }

    fn find_crossings(&self, polygon: &SitePolygon) -> Crossings {
        let refs = &polygon.refs;
        let n = refs.len();
        let edge_count = if polygon.unclosed { n - 1 } else { n };
        let mut crossings = Crossings::default();

        for i in 0..edge_count {
            let from = self.raw[refs[i].vertex];
            let to = self.raw[refs[(i + 1) % n].vertex];
            if from.inside && to.inside {
                continue;
            }
            if !Rect::from_segment(from.position, to.position).overlaps(self.bounds) {
                continue;
            }

            let dir = to.position - from.position;
            let exit = if to.inside {
                None
            } else {
                self.bounds.edge_intersection(from.position, dir)
            };
            let entry = if from.inside {
                None
            } else {
                self.bounds.edge_intersection(to.position, -dir)
            };

            // An edge with both ends outside passes through only if it both
            // enters and leaves; touching a corner is no crossing
            if !from.inside && !to.inside {
                match (exit, entry) {
                    (Some(a), Some(b))
                        if a.position.distance(b.position) > self.bounds.border_tolerance() => {}
                    _ => continue,
                }
            }

            if let Some(hit) = exit {
                crossings.start.get_or_insert(hit.side);
                crossings.by_side[hit.side.index()].insert(
                    0,
                    Crossing {
                        position: hit.position,
                        edge: i + 1,
                    },
                );
            }
            if let Some(hit) = entry {
                crossings.by_side[hit.side.index()].push(Crossing {
                    position: hit.position,
                    edge: i + 1,
                });
            }
        }

        crossings
    }

    /// Walk the border once around from the first exit, plus one side to
    /// close back onto the polygon
    fn trace(&mut self, polygon: &SitePolygon, crossings: &Crossings, start: Side) -> Vec<usize> {
        let refs = &polygon.refs;
        let n = refs.len();
        let mut cell = Vec::new();
        let mut inside = true;
        let mut last: Option<Crossing> = None;

        for step in 0..5 {
            let side = start.offset(step);
            let hits = &crossings.by_side[side.index()];

            if hits.is_empty() {
                if !inside {
                    push_distinct(&mut cell, self.corner(side));
                }
                continue;
            }

            if !inside {
                push_distinct(&mut cell, self.corner(side));
            } else if step != 0 {
                if let Some(prev) = last {
                    if prev.edge != hits[0].edge {
                        let mut end = hits[0].edge;
                        if !polygon.unclosed && end < prev.edge {
                            end += n;
                        }
                        for j in prev.edge..end {
                            push_distinct(&mut cell, self.keep(refs[j % n].vertex));
                        }
                    }
                }
            }

            if step != 4 {
                push_distinct(&mut cell, self.pool.computed(hits[0].position));
                last = Some(hits[0]);
                if let Some(&second) = hits.get(1) {
                    // Leaves and re-enters on this side
                    push_distinct(&mut cell, self.pool.computed(second.position));
                    last = Some(second);
                } else {
                    inside = !inside;
                }
            }
        }

        // A crossing at a corner can close onto the first entry
        if cell.len() > 1 && cell.first() == cell.last() {
            cell.pop();
        }
        cell
    }

    fn clip_without_crossings(&mut self, polygon: &SitePolygon) -> Vec<usize> {
        let refs = &polygon.refs;

        if refs.iter().any(|r| self.raw[r.vertex].inside) {
            // Entirely inside, or open and off to the side
            return if polygon.unclosed {
                Vec::new()
            } else {
                self.keep_all(polygon)
            };
        }

        // Entirely outside: either the cell swallows the rectangle or misses it
        let n = refs.len();
        let edge_count = if polygon.unclosed { n - 1 } else { n };
        let center = self.bounds.center();
        let covers = (0..edge_count).all(|i| {
            let a = self.raw[refs[i].vertex].position;
            let b = self.raw[refs[(i + 1) % n].vertex].position;
            Line::through(a, b - a).eval(center) <= 0.0
        });

        if covers {
            Side::ALL.iter().map(|&side| self.corner(side)).collect()
        } else {
            Vec::new()
        }
    }
}
