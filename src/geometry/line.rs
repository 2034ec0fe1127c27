//! Lines in implicit form

use glam::DVec2;

/// Line `a·x + b·y + c = 0`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Line {
    pub a: f64,
    pub b: f64,
    pub c: f64,
}

impl Line {
    /// Line through `point` with the given direction
    ///
    /// The coefficients are not normalized; a zero direction yields the
    /// degenerate line `0 = 0`.
    #[inline]
    pub fn through(point: DVec2, direction: DVec2) -> Self {
        Self {
            a: direction.y,
            b: -direction.x,
            c: -point.x * direction.y + point.y * direction.x,
        }
    }

    /// Evaluate the implicit form at `p`
    ///
    /// Positive when `p` lies to the right of the construction direction,
    /// negative to the left.
    #[inline]
    pub fn eval(&self, p: DVec2) -> f64 {
        self.a * p.x + self.b * p.y + self.c
    }

    /// Intersection point with another line
    ///
    /// `None` when the lines are parallel (zero determinant) or the result is
    /// not finite.
    pub fn intersection(&self, other: &Line) -> Option<DVec2> {
        let d = self.a * other.b - other.a * self.b;
        if d == 0.0 {
            return None;
        }
        let x = (other.c * self.b - self.c * other.b) / d;
        let y = (self.c * other.a - other.c * self.a) / d;
        let p = DVec2::new(x, y);
        p.is_finite().then_some(p)
    }
}
