//! Planar primitives
//!
//! Stateless helpers on `DVec2`: the vector operations glam does not provide
//! directly, the orientation predicate, implicit lines and the axis-aligned
//! clip rectangle.
//!
//! Every orientation decision in the crate goes through [`signed_area2`].
//! Angles come from `atan2` and lie in `(-π, π]`; sorting by them yields a
//! counter-clockwise order in a y-up frame (clockwise on a y-down screen).

mod line;
mod rect;

pub use line::Line;
pub use rect::{BorderHit, Rect, Side};

use glam::DVec2;

/// Rotate a vector by +90°: `(x, y) -> (-y, x)`
#[inline]
pub fn turn(v: DVec2) -> DVec2 {
    v.perp()
}

/// Left-hand normal of the directed segment `a -> b` (not normalized)
#[inline]
pub fn normal(a: DVec2, b: DVec2) -> DVec2 {
    turn(b - a)
}

/// Unit vector in the direction of `v`
///
/// The zero vector (and any vector whose length is not finite) maps to the
/// zero vector.
#[inline]
pub fn normalize(v: DVec2) -> DVec2 {
    v.normalize_or_zero()
}

#[inline]
pub fn midpoint(a: DVec2, b: DVec2) -> DVec2 {
    (a + b) * 0.5
}

/// Twice the signed area of the triangle `(a, b, c)`
///
/// Positive when `c` lies to the left of `a -> b` (counter-clockwise in a y-up
/// frame), negative to the right, zero when collinear.
#[inline]
pub fn signed_area2(a: DVec2, b: DVec2, c: DVec2) -> f64 {
    (b - a).perp_dot(c - a)
}

/// Angle of the direction `from -> to`, in `(-π, π]`
#[inline]
pub fn angle(from: DVec2, to: DVec2) -> f64 {
    let d = to - from;
    d.y.atan2(d.x)
}

/// Circumcenter of the triangle `(a, b, c)`
///
/// Intersects the perpendicular bisectors of `(a, b)` and `(b, c)`. Returns
/// `None` when the points are collinear (parallel bisectors): callers must
/// treat that as "no triangle".
pub fn circumcenter(a: DVec2, b: DVec2, c: DVec2) -> Option<DVec2> {
    let ab = Line::through(midpoint(a, b), normal(a, b));
    let bc = Line::through(midpoint(b, c), normal(b, c));
    ab.intersection(&bc)
}

/// Signed shoelace area, positive for counter-clockwise polygons (y-up)
pub fn polygon_area(polygon: &[DVec2]) -> f64 {
    let n = polygon.len();
    if n < 3 {
        return 0.0;
    }
    (0..n).map(|i| polygon[i].perp_dot(polygon[(i + 1) % n])).sum::<f64>() * 0.5
}

/// Area centroid of a simple polygon
///
/// Falls back to the vertex mean when the area vanishes; `None` for an empty
/// slice.
pub fn polygon_centroid(polygon: &[DVec2]) -> Option<DVec2> {
    if polygon.is_empty() {
        return None;
    }
    let mean = polygon.iter().copied().sum::<DVec2>() / polygon.len() as f64;

    let area = polygon_area(polygon);
    if area == 0.0 || !area.is_finite() {
        return Some(mean);
    }

    // Relative to the mean to keep the cross products small
    let n = polygon.len();
    let mut acc = DVec2::ZERO;
    for i in 0..n {
        let a = polygon[i] - mean;
        let b = polygon[(i + 1) % n] - mean;
        acc += (a + b) * a.perp_dot(b);
    }
    Some(mean + acc / (6.0 * area))
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    #[test]
    fn test_turn_and_normal() {
        assert_eq!(turn(DVec2::new(1.0, 0.0)), DVec2::new(0.0, 1.0));
        assert_eq!(turn(DVec2::new(0.0, 1.0)), DVec2::new(-1.0, 0.0));

        let n = normal(DVec2::new(0.0, 0.0), DVec2::new(10.0, 0.0));
        assert_eq!(n, DVec2::new(0.0, 10.0));
    }

    #[test]
    fn test_normalize_zero_vector() {
        assert_eq!(normalize(DVec2::ZERO), DVec2::ZERO);

        let unit = normalize(DVec2::new(3.0, 4.0));
        assert!((unit.length() - 1.0).abs() < EPS);
        assert!((unit - DVec2::new(0.6, 0.8)).length() < EPS);
    }

    #[test]
    fn test_signed_area2_orientation() {
        let a = DVec2::new(0.0, 0.0);
        let b = DVec2::new(4.0, 0.0);

        assert_eq!(signed_area2(a, b, DVec2::new(0.0, 3.0)), 12.0);
        assert_eq!(signed_area2(a, b, DVec2::new(0.0, -3.0)), -12.0);
        assert_eq!(signed_area2(a, b, DVec2::new(8.0, 0.0)), 0.0);
    }

    #[test]
    fn test_angle_range() {
        let origin = DVec2::ZERO;
        assert_eq!(angle(origin, DVec2::new(1.0, 0.0)), 0.0);
        assert!((angle(origin, DVec2::new(0.0, 1.0)) - std::f64::consts::FRAC_PI_2).abs() < EPS);
        assert!((angle(origin, DVec2::new(-1.0, 0.0)) - std::f64::consts::PI).abs() < EPS);
    }

    #[test]
    fn test_circumcenter_right_triangle() {
        // Hypotenuse midpoint for a right triangle
        let center = circumcenter(
            DVec2::new(0.0, 0.0),
            DVec2::new(6.0, 0.0),
            DVec2::new(0.0, 8.0),
        )
        .unwrap();
        assert!((center - DVec2::new(3.0, 4.0)).length() < EPS);
    }

    #[test]
    fn test_circumcenter_equidistant() {
        let a = DVec2::new(0.0, 0.0);
        let b = DVec2::new(10.0, 0.0);
        let c = DVec2::new(5.0, 10.0);

        let center = circumcenter(a, b, c).unwrap();
        assert!((center - DVec2::new(5.0, 3.75)).length() < EPS);
        assert!((center.distance(a) - 6.25).abs() < EPS);
        assert!((center.distance(b) - 6.25).abs() < EPS);
        assert!((center.distance(c) - 6.25).abs() < EPS);
    }

    #[test]
    fn test_polygon_area_and_centroid() {
        let square = [
            DVec2::new(0.0, 0.0),
            DVec2::new(4.0, 0.0),
            DVec2::new(4.0, 2.0),
            DVec2::new(0.0, 2.0),
        ];
        assert!((polygon_area(&square) - 8.0).abs() < EPS);
        assert!((polygon_centroid(&square).unwrap() - DVec2::new(2.0, 1.0)).length() < EPS);

        let mut reversed = square;
        reversed.reverse();
        assert!((polygon_area(&reversed) + 8.0).abs() < EPS);
        assert!((polygon_centroid(&reversed).unwrap() - DVec2::new(2.0, 1.0)).length() < EPS);

        // Area-weighted, not the vertex mean
        let triangle = [DVec2::new(0.0, 0.0), DVec2::new(6.0, 0.0), DVec2::new(0.0, 3.0)];
        assert!((polygon_centroid(&triangle).unwrap() - DVec2::new(2.0, 1.0)).length() < EPS);

        assert_eq!(polygon_area(&square[..2]), 0.0);
        assert_eq!(polygon_centroid(&square[..2]), Some(DVec2::new(2.0, 0.0)));
        assert_eq!(polygon_centroid(&[]), None);
    }

    #[test]
    fn test_circumcenter_collinear_is_none() {
        let result = circumcenter(
            DVec2::new(0.0, 0.0),
            DVec2::new(1.0, 1.0),
            DVec2::new(3.0, 3.0),
        );
        assert!(result.is_none());
    }
}
