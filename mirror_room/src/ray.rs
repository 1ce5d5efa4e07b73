use super::*;

/// A light ray, represented as a half-line.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Ray {
    /// The starting point of the half-line
    pub origin: Point,
    /// the direction of the half-line
    pub direction: Direction,
}

impl Ray {
    #[inline]
    #[must_use]
    pub fn new(origin: impl Into<Point>, direction: Direction) -> Self {
        Self {
            origin: origin.into(),
            direction,
        }
    }

    /// A ray leaving `origin` at `angle` radians, measured counter-clockwise from the `+x` axis.
    #[inline]
    #[must_use]
    pub fn from_angle(origin: impl Into<Point>, angle: Float) -> Self {
        Self::new(origin, unit_from_angle(angle))
    }

    /// Returns `None` if `direction` is (almost) zero
    #[inline]
    #[must_use]
    pub fn try_new_normalize(origin: impl Into<Point>, direction: impl Into<Point>) -> Option<Self> {
        Unit::try_new(direction.into(), Float::EPSILON).map(|dir| Self::new(origin, dir))
    }

    /// The angle of this ray's direction, in `(-π, π]`
    #[inline]
    #[must_use]
    pub fn angle(&self) -> Float {
        self.direction.y.atan2(self.direction.x)
    }

    /// Move the ray's position forward (or backward if t < 0.0) by `t`
    #[inline]
    pub fn advance(&mut self, t: Float) {
        self.origin += t * self.direction.as_ref();
    }

    /// Get the point at distance `t` (can be negative) from the ray's origin
    #[inline]
    #[must_use]
    pub fn at(&self, t: Float) -> Point {
        self.origin + self.direction.as_ref() * t
    }
}

#[inline]
#[must_use]
pub(crate) fn unit_from_angle(angle: Float) -> Direction {
    let (sin, cos) = angle.sin_cos();
    // cos² + sin² = 1
    Unit::new_unchecked(Point::new(cos, sin))
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::f64::consts::FRAC_PI_2;

    #[test]
    fn test_from_angle_points_counter_clockwise() {
        let ray = Ray::from_angle([1.0, 1.0], FRAC_PI_2);
        let p = ray.at(2.0);
        assert!((p.x - 1.0).abs() < 1e-12);
        assert!((p.y - 3.0).abs() < 1e-12);
        assert!((ray.angle() - FRAC_PI_2).abs() < 1e-12);
    }

    #[test]
    fn test_zero_direction_is_rejected() {
        assert!(Ray::try_new_normalize([0.0, 0.0], [0.0, 0.0]).is_none());
        let ray = Ray::try_new_normalize([0.0, 0.0], [3.0, 4.0]).unwrap();
        assert!((ray.direction.x - 0.6).abs() < 1e-12);
    }

    #[test]
    fn test_advance() {
        let mut ray = Ray::from_angle([0.0, 0.0], 0.0);
        ray.advance(5.0);
        assert!((ray.origin - Point::new(5.0, 0.0)).norm() < 1e-12);
    }
}
