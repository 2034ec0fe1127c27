//! Axis-aligned clip rectangle

use glam::DVec2;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Relative slack for border hits, see [`Rect::border_tolerance`]
const BORDER_TOLERANCE: f64 = 1e-10;

/// One of the four rectangle sides
///
/// Sides are ordered the way the border is walked: top, right, bottom, left.
/// With the screen convention (top = smallest y) that is clockwise on screen,
/// which is the same rotational sense as the cell polygons.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    Top,
    Right,
    Bottom,
    Left,
}

impl Side {
    pub const ALL: [Side; 4] = [Side::Top, Side::Right, Side::Bottom, Side::Left];

    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    /// The side reached after `steps` moves along the border
    #[inline]
    pub fn offset(self, steps: usize) -> Side {
        Self::ALL[(self.index() + steps) % 4]
    }
}

/// Intersection of a ray with the rectangle border
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BorderHit {
    pub position: DVec2,
    pub side: Side,
}

/// Axis-aligned rectangle `[x, x + width] × [y, y + height]`
///
/// `top` is the smallest y and `bottom` the largest (screen convention).
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self { x, y, width, height }
    }

    /// Bounding box of the segment `a -> b`
    pub fn from_segment(a: DVec2, b: DVec2) -> Self {
        let min = a.min(b);
        let max = a.max(b);
        Self::new(min.x, min.y, max.x - min.x, max.y - min.y)
    }

    #[inline]
    pub fn left(&self) -> f64 {
        self.x
    }

    #[inline]
    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    #[inline]
    pub fn top(&self) -> f64 {
        self.y
    }

    #[inline]
    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    #[inline]
    pub fn area(&self) -> f64 {
        self.width * self.height
    }

    #[inline]
    pub fn diagonal(&self) -> f64 {
        DVec2::new(self.width, self.height).length()
    }

    /// Finite coordinates and strictly positive extent
    pub fn is_valid(&self) -> bool {
        [self.x, self.y, self.width, self.height]
            .iter()
            .all(|v| v.is_finite())
            && self.width > 0.0
            && self.height > 0.0
    }

    /// Corners in border order: top-left, top-right, bottom-right, bottom-left
    ///
    /// Corner `i` is where side `i` starts.
    pub fn corners(&self) -> [DVec2; 4] {
        [
            DVec2::new(self.left(), self.top()),
            DVec2::new(self.right(), self.top()),
            DVec2::new(self.right(), self.bottom()),
            DVec2::new(self.left(), self.bottom()),
        ]
    }

    /// Inclusive containment test
    #[inline]
    pub fn contains(&self, p: DVec2) -> bool {
        p.x >= self.left() && p.x <= self.right() && p.y >= self.top() && p.y <= self.bottom()
    }

    /// Whether the axis-aligned extent of the disk lies inside the rectangle
    pub fn contains_disk(&self, center: DVec2, radius: f64) -> bool {
        center.x - radius >= self.left()
            && center.x + radius <= self.right()
            && center.y - radius >= self.top()
            && center.y + radius <= self.bottom()
    }

    /// Inclusive AABB overlap test
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.left() <= other.right()
            && self.right() >= other.left()
            && self.top() <= other.bottom()
            && self.bottom() >= other.top()
    }

    #[inline]
    pub fn center(&self) -> DVec2 {
        DVec2::new(self.x + self.width * 0.5, self.y + self.height * 0.5)
    }

    /// Slack allowed when matching a border hit against a side's extent
    ///
    /// Scaled by the largest coordinate magnitude so rays through a corner
    /// still land on a side after rounding.
    pub fn border_tolerance(&self) -> f64 {
        let scale = self
            .left()
            .abs()
            .max(self.right().abs())
            .max(self.top().abs())
            .max(self.bottom().abs());
        BORDER_TOLERANCE * scale.max(self.width).max(self.height)
    }

    /// Where the ray from `pos` along `dir` meets the border
    ///
    /// Only the sides the ray is heading towards are considered, horizontal
    /// sides first. The ray origin must not already be past the side. A hit
    /// within [`Rect::border_tolerance`] of a side's extent is clamped onto
    /// it, so a ray leaving through a corner reports that corner on the
    /// horizontal side. Returns `None` when no side is hit; callers treat
    /// that as "no crossing", never as an error.
    pub fn edge_intersection(&self, pos: DVec2, dir: DVec2) -> Option<BorderHit> {
        let (l, t, r, b) = (self.left(), self.top(), self.right(), self.bottom());
        let slack = self.border_tolerance();

        let horizontal = if dir.y < 0.0 && pos.y >= t {
            Some((t, Side::Top))
        } else if dir.y > 0.0 && pos.y <= b {
            Some((b, Side::Bottom))
        } else {
            None
        };
        if let Some((y, side)) = horizontal {
            let x = pos.x + dir.x * (y - pos.y) / dir.y;
            if x >= l - slack && x <= r + slack {
                return Some(BorderHit {
                    position: DVec2::new(x.clamp(l, r), y),
                    side,
                });
            }
        }

        let vertical = if dir.x < 0.0 && pos.x >= l {
            Some((l, Side::Left))
        } else if dir.x > 0.0 && pos.x <= r {
            Some((r, Side::Right))
        } else {
            None
        };
        if let Some((x, side)) = vertical {
            let y = pos.y + dir.y * (x - pos.x) / dir.x;
            if y >= t - slack && y <= b + slack {
                return Some(BorderHit {
                    position: DVec2::new(x, y.clamp(t, b)),
                    side,
                });
            }
        }

        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit_box() -> Rect {
        Rect::new(0.0, 0.0, 10.0, 10.0)
    }

    #[test]
    fn test_accessors_and_corners() {
        let rect = Rect::new(-5.0, -5.0, 25.0, 15.0);
        assert_eq!(rect.left(), -5.0);
        assert_eq!(rect.right(), 20.0);
        assert_eq!(rect.top(), -5.0);
        assert_eq!(rect.bottom(), 10.0);
        assert_eq!(rect.area(), 375.0);
        assert_eq!(
            rect.corners(),
            [
                DVec2::new(-5.0, -5.0),
                DVec2::new(20.0, -5.0),
                DVec2::new(20.0, 10.0),
                DVec2::new(-5.0, 10.0),
            ]
        );
    }

    #[test]
    fn test_contains_is_inclusive() {
        let rect = unit_box();
        assert!(rect.contains(DVec2::new(0.0, 0.0)));
        assert!(rect.contains(DVec2::new(10.0, 5.0)));
        assert!(!rect.contains(DVec2::new(10.000001, 5.0)));
        assert!(rect.contains_disk(DVec2::new(5.0, 5.0), 5.0));
        assert!(!rect.contains_disk(DVec2::new(5.0, 5.0), 5.1));
    }

    #[test]
    fn test_validity() {
        assert!(unit_box().is_valid());
        assert!(!Rect::new(0.0, 0.0, 0.0, 1.0).is_valid());
        assert!(!Rect::new(0.0, 0.0, -1.0, 1.0).is_valid());
        assert!(!Rect::new(f64::NAN, 0.0, 1.0, 1.0).is_valid());
    }

    #[test]
    fn test_segment_overlap() {
        let rect = unit_box();
        let crossing = Rect::from_segment(DVec2::new(-5.0, 5.0), DVec2::new(5.0, -5.0));
        assert!(crossing.overlaps(&rect));

        let away = Rect::from_segment(DVec2::new(11.0, 0.0), DVec2::new(20.0, 20.0));
        assert!(!away.overlaps(&rect));
    }

    #[test]
    fn test_edge_intersection_exit_sides() {
        let rect = unit_box();
        let center = DVec2::new(5.0, 5.0);

        let hit = rect.edge_intersection(center, DVec2::new(0.0, -1.0)).unwrap();
        assert_eq!(hit.side, Side::Top);
        assert_eq!(hit.position, DVec2::new(5.0, 0.0));

        let hit = rect.edge_intersection(center, DVec2::new(1.0, 0.0)).unwrap();
        assert_eq!(hit.side, Side::Right);
        assert_eq!(hit.position, DVec2::new(10.0, 5.0));

        let hit = rect.edge_intersection(center, DVec2::new(0.0, 3.0)).unwrap();
        assert_eq!(hit.side, Side::Bottom);

        // Steep enough to leave through the left side rather than the bottom
        let hit = rect.edge_intersection(center, DVec2::new(-4.0, 1.0)).unwrap();
        assert_eq!(hit.side, Side::Left);
        assert!((hit.position - DVec2::new(0.0, 6.25)).length() < 1e-12);
    }

    #[test]
    fn test_edge_intersection_from_outside_reports_exit() {
        let rect = unit_box();
        let below = DVec2::new(5.0, 20.0);

        // Heading away from the rectangle: nothing ahead
        assert!(rect.edge_intersection(below, DVec2::new(0.0, 1.0)).is_none());

        // Heading through it: the facing side is where the ray leaves
        let hit = rect.edge_intersection(below, DVec2::new(0.0, -1.0)).unwrap();
        assert_eq!(hit.side, Side::Top);
        assert_eq!(hit.position, DVec2::new(5.0, 0.0));
    }

    #[test]
    fn test_edge_intersection_through_corner() {
        let rect = Rect::new(-50.0, -50.0, 100.0, 100.0);
        let corner = DVec2::new(-50.0, -50.0);

        // Rounded just past the corner: still one hit, clamped onto it
        let hit = rect.edge_intersection(DVec2::ZERO, DVec2::new(-50.0 - 1e-11, -50.0)).unwrap();
        assert_eq!(hit.side, Side::Top);
        assert_eq!(hit.position, corner);

        let hit = rect.edge_intersection(DVec2::ZERO, DVec2::new(-50.0, -50.0 - 1e-11)).unwrap();
        assert_eq!(hit.side, Side::Top);
        assert_eq!(hit.position, corner);

        // Aimed at the corner from an awkward origin
        for origin in [DVec2::new(0.1, 0.3), DVec2::new(-3.7, 12.9), DVec2::new(49.0, -0.3)] {
            let hit = rect.edge_intersection(origin, corner - origin).unwrap();
            assert!((hit.position - corner).length() < 1e-9, "{origin}: {hit:?}");
            assert!(rect.contains(hit.position));
        }

        // Clearly beside the corner falls through to the vertical side
        let hit = rect.edge_intersection(DVec2::ZERO, DVec2::new(-50.001, -50.0)).unwrap();
        assert_eq!(hit.side, Side::Left);
        assert!(hit.position.y > -50.0);
    }

    #[test]
    fn test_border_tolerance_scales_with_coordinates() {
        let near = Rect::new(0.0, 0.0, 1.0, 1.0);
        let far = Rect::new(1.0e6, 1.0e6, 1.0, 1.0);
        assert!(far.border_tolerance() > near.border_tolerance() * 1.0e5);
        assert_eq!(near.center(), DVec2::new(0.5, 0.5));
    }

    #[test]
    fn test_edge_intersection_miss() {
        let rect = unit_box();
        let miss = rect.edge_intersection(DVec2::new(-5.0, 20.0), DVec2::new(1.0, 0.0));
        assert!(miss.is_none());
    }

    #[test]
    fn test_side_offset_wraps() {
        assert_eq!(Side::Left.offset(1), Side::Top);
        assert_eq!(Side::Bottom.offset(4), Side::Bottom);
        assert_eq!(Side::Right.index(), 1);
    }
}
