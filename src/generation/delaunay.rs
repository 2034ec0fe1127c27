//! Sweep-hull Delaunay triangulation
//!
//! Sites are consumed in `(x, y)` order. While every accepted site is
//! collinear with the first two, the sites are only collected on the shell.
//! The first off-line site closes them into a fan; from then on every new site
//! lies outside the current hull, so it replaces the arc of hull edges it can
//! see and re-triangulates the cavity formed by those edges plus every active
//! triangle whose circumcircle it falls into.
//!
//! Triangles whose circumcircle lies entirely behind the sweep line are
//! retired and never tested again.

use glam::DVec2;
use std::cmp::Ordering;
use std::collections::{HashMap, HashSet};
use tracing::{debug, warn};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::geometry::{angle, circumcenter, signed_area2};

/// Relative slack of the in-circle test
///
/// A site destroys a triangle when `|site - center| <= radius * (1 + ε)`.
pub const DEFAULT_IN_CIRCLE_EPSILON: f64 = 1e-10;

/// A Delaunay triangle with its circumcircle
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Triangle {
    /// Site indices, counter-clockwise in a y-up frame
    pub vertices: [usize; 3],
    pub circumcenter: DVec2,
    pub radius: f64,
}

impl Triangle {
    /// Triangle over three sites, `None` when they are collinear
    pub fn new(points: &[DVec2], i0: usize, i1: usize, i2: usize) -> Option<Self> {
        let center = circumcenter(points[i0], points[i1], points[i2])?;
        Some(Self {
            vertices: [i0, i1, i2],
            circumcenter: center,
            radius: center.distance(points[i0]),
        })
    }

    /// Directed edges in storage order
    pub fn edges(&self) -> [(usize, usize); 3] {
        let [a, b, c] = self.vertices;
        [(a, b), (b, c), (c, a)]
    }

    pub fn has_directed_edge(&self, from: usize, to: usize) -> bool {
        self.edges().contains(&(from, to))
    }

    /// In-circle test with relative slack `epsilon` (inclusive)
    #[inline]
    pub fn circumcircle_contains(&self, p: DVec2, epsilon: f64) -> bool {
        p.distance(self.circumcenter) <= self.radius * (1.0 + epsilon)
    }
}

/// Result of [`triangulate`]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Triangulation {
    pub triangles: Vec<Triangle>,
    /// Outer boundary as site indices
    ///
    /// Cyclic and counter-clockwise (y-up) when there are triangles; an
    /// open, line-ordered sequence when every site is collinear.
    pub hull: Vec<usize>,
}

impl Triangulation {
    #[inline]
    pub fn triangle_count(&self) -> usize {
        self.triangles.len()
    }

    /// No accepted sites at all
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.triangles.is_empty() && self.hull.is_empty()
    }

    /// Fewer than three non-collinear sites: only the hull carries structure
    #[inline]
    pub fn is_degenerate(&self) -> bool {
        self.triangles.is_empty()
    }

    /// Map from directed edge to the index of the triangle that owns it
    pub fn directed_edges(&self) -> HashMap<(usize, usize), usize> {
        let mut map = HashMap::with_capacity(self.triangles.len() * 3);
        for (tri_idx, triangle) in self.triangles.iter().enumerate() {
            for edge in triangle.edges() {
                map.insert(edge, tri_idx);
            }
        }
        map
    }

    /// Delaunay adjacency per site, sorted
    ///
    /// Two sites are neighbors when they share a triangle edge, or, for a fully
    /// collinear input, when they are consecutive along the line.
    pub fn site_neighbors(&self, site_count: usize) -> Vec<Vec<usize>> {
        let mut sets: Vec<HashSet<usize>> = vec![HashSet::new(); site_count];
        let mut link = |a: usize, b: usize| {
            if a < site_count && b < site_count && a != b {
                sets[a].insert(b);
                sets[b].insert(a);
            }
        };

        if self.is_degenerate() {
            for pair in self.hull.windows(2) {
                link(pair[0], pair[1]);
            }
        } else {
            for triangle in &self.triangles {
                for (a, b) in triangle.edges() {
                    link(a, b);
                }
            }
        }

        sets.into_iter()
            .map(|set| {
                let mut list: Vec<usize> = set.into_iter().collect();
                list.sort();
                list
            })
            .collect()
    }
}

/// Triangulate with the default in-circle tolerance
pub fn triangulate(points: &[DVec2]) -> Triangulation {
    triangulate_with_tolerance(points, DEFAULT_IN_CIRCLE_EPSILON)
}

/// Triangulate `points`; sites are addressed by their index in the slice
///
/// Exact duplicates of an already accepted position are skipped and appear
/// in neither the triangles nor the hull.
pub fn triangulate_with_tolerance(points: &[DVec2], epsilon: f64) -> Triangulation {
    let mut order: Vec<usize> = (0..points.len()).collect();
    order.sort_by(|&a, &b| {
        let (p, q) = (points[a], points[b]);
        p.x.partial_cmp(&q.x)
            .unwrap_or(Ordering::Equal)
            .then(p.y.partial_cmp(&q.y).unwrap_or(Ordering::Equal))
    });

    let mut builder = SweepBuilder::new(points, epsilon);
    let mut previous: Option<DVec2> = None;
    let mut skipped = 0usize;

    for &site in &order {
        let p = points[site];
        if previous == Some(p) {
            skipped += 1;
            continue;
        }
        previous = Some(p);
        builder.insert(site);
    }

    let triangulation = builder.finish();
    debug!(
        sites = points.len(),
        duplicates = skipped,
        triangles = triangulation.triangles.len(),
        hull = triangulation.hull.len(),
        "triangulated"
    );
    triangulation
}

/// Cyclic sequence of site indices bounding the processed region
#[derive(Debug, Default)]
struct Shell {
    sites: Vec<usize>,
}

impl Shell {
    /// Replace the contiguous run of visible edges by `site`
    ///
    /// `visible[i]` flags the edge `sites[i] -> sites[i + 1]`. The first
    /// endpoint of the run (the anchor) and its last endpoint stay on the
    /// shell; everything strictly between them is removed and `site` takes
    /// their place. Returns the anchor, or `None` when the flags contain no
    /// visible run or no hidden edge.
    fn replace_visible_arc(&mut self, visible: &[bool], site: usize) -> Option<usize> {
        let n = self.sites.len();
        let rise = (0..n).find(|&i| !visible[i] && visible[(i + 1) % n])?;
        let fall = (0..n).find(|&i| visible[i] && !visible[(i + 1) % n])?;
        let start = (rise + 1) % n;
        let end = (fall + 1) % n;
        let anchor = self.sites[start];

        if start < end {
            self.sites.splice(start + 1..end, std::iter::once(site));
        } else {
            // Run wraps past the array end: cut the tail, then the head
            self.sites.truncate(start + 1);
            self.sites.push(site);
            self.sites.drain(..end);
        }
        Some(anchor)
    }
}

/// Mutable state of one `triangulate` call
struct SweepBuilder<'a> {
    points: &'a [DVec2],
    epsilon: f64,
    shell: Shell,
    active: Vec<Triangle>,
    finished: Vec<Triangle>,
    /// Left the collinear bootstrap
    sweeping: bool,
}

impl<'a> SweepBuilder<'a> {
    fn new(points: &'a [DVec2], epsilon: f64) -> Self {
        Self {
            points,
            epsilon,
            shell: Shell::default(),
            active: Vec::new(),
            finished: Vec::new(),
            sweeping: false,
        }
    }

    fn insert(&mut self, site: usize) {
        if self.sweeping {
            self.sweep_step(site);
            return;
        }

        let shell = &self.shell.sites;
        let collinear = shell.len() < 2
            || signed_area2(
                self.points[shell[0]],
                self.points[shell[1]],
                self.points[site],
            ) == 0.0;

        if collinear {
            self.shell.sites.push(site);
        } else {
            self.close_fan(site);
            self.sweeping = true;
        }
    }

    /// Connect the first off-line site to every collected collinear site
    fn close_fan(&mut self, site: usize) {
        let points = self.points;
        let apex = points[site];

        let mut ring: Vec<(usize, f64)> = self
            .shell
            .sites
            .iter()
            .map(|&s| (s, angle(apex, points[s])))
            .collect();
        ring.sort_by(|a, b| a.1.partial_cmp(&b.1).unwrap_or(Ordering::Equal));
        let mut ring: Vec<usize> = ring.into_iter().map(|(s, _)| s).collect();

        let n = ring.len();
        let mut gap = n;
        for i in 0..n {
            let (a, b) = (ring[i], ring[(i + 1) % n]);
            if signed_area2(points[a], points[b], apex) > 0.0 {
                if let Some(triangle) = Triangle::new(points, site, a, b) {
                    self.active.push(triangle);
                }
            } else {
                // The pair spans the outside: the apex joins the hull here
                gap = i + 1;
            }
        }

        ring.insert(gap, site);
        self.shell.sites = ring;
    }

    fn sweep_step(&mut self, site: usize) {
        let points = self.points;
        let p = points[site];
        let mut cavity: Vec<usize> = Vec::new();

        let shell = &self.shell.sites;
        let n = shell.len();
        let visible: Vec<bool> = (0..n)
            .map(|i| {
                let (a, b) = (shell[i], shell[(i + 1) % n]);
                let seen = signed_area2(points[a], points[b], p) < 0.0;
                if seen {
                    push_unique(&mut cavity, a);
                    push_unique(&mut cavity, b);
                }
                seen
            })
            .collect();

        let Some(anchor) = self.shell.replace_visible_arc(&visible, site) else {
            warn!(site, x = p.x, y = p.y, "no hull edge visible from site, skipping it");
            return;
        };

        let epsilon = self.epsilon;
        let (retired, active): (Vec<Triangle>, Vec<Triangle>) = self
            .active
            .drain(..)
            .partition(|t| p.x > t.circumcenter.x + t.radius * (1.0 + epsilon));
        self.finished.extend(retired);
        self.active = active;

        self.active.retain(|t| {
            if t.circumcircle_contains(p, epsilon) {
                for v in t.vertices {
                    push_unique(&mut cavity, v);
                }
                false
            } else {
                true
            }
        });

        let mut fan: Vec<(usize, f64)> = cavity.iter().map(|&c| (c, angle(p, points[c]))).collect();
        fan.sort_by(|a, b| a.1.partial_cmp(&b.1).unwrap_or(Ordering::Equal));

        let m = fan.len();
        for i in 0..m {
            let a = fan[i].0;
            // The pair starting at the anchor faces the outside
            if a == anchor {
                continue;
            }
            let b = fan[(i + 1) % m].0;
            if let Some(triangle) = Triangle::new(points, site, a, b) {
                self.active.push(triangle);
            }
        }
    }

    fn finish(mut self) -> Triangulation {
        if !self.sweeping && self.shell.sites.len() > 2 {
            let origin = self.points[self.shell.sites[0]];
            let direction = self.points[self.shell.sites[1]] - origin;
            let points = self.points;
            self.shell.sites.sort_by(|&a, &b| {
                let ka = (points[a] - origin).dot(direction);
                let kb = (points[b] - origin).dot(direction);
                ka.partial_cmp(&kb).unwrap_or(Ordering::Equal)
            });
        }

        let mut triangles = self.active;
        triangles.extend(self.finished);
        Triangulation {
            triangles,
            hull: self.shell.sites,
        }
    }
}

#[inline]
fn push_unique(list: &mut Vec<usize>, value: usize) {
    if !list.contains(&value) {
        list.push(value);
    }
}
