use core::f64::consts::TAU;

use super::*;

/// Wraps `angle` (in radians) into `[0, 2π)`
#[inline]
#[must_use]
pub fn normalize_angle(angle: Float) -> Float {
    let a = angle.rem_euclid(TAU);
    // tiny negative inputs round up to exactly TAU
    if a >= TAU {
        0.0
    } else {
        a
    }
}

/// A direction in the plane, as given by whoever fires the ray.
///
/// Angles are kept in degrees, the unit used by files and command lines, and converted
/// to radians (the unit of the kernel) by [`Angle::radians`] only. Storing the value as
/// it was given means a saved angle reloads to exactly the same radians.
#[derive(Clone, Copy, Debug, Default, PartialEq, PartialOrd)]
pub struct Angle {
    degrees: Float,
}

impl Angle {
    #[inline]
    #[must_use]
    pub const fn from_degrees(degrees: Float) -> Self {
        Self { degrees }
    }

    #[inline]
    #[must_use]
    pub fn from_radians(radians: Float) -> Self {
        Self::from_degrees(radians.to_degrees())
    }

    /// The direction going from `start` to `end`, normalized to `[0°, 360°)`.
    ///
    /// Coincident points give `0°`.
    #[inline]
    #[must_use]
    pub fn between(start: &Point, end: &Point) -> Self {
        let d = end - start;
        Self::from_radians(d.y.atan2(d.x)).normalized()
    }

    #[inline]
    #[must_use]
    pub const fn degrees(self) -> Float {
        self.degrees
    }

    #[inline]
    #[must_use]
    pub fn radians(self) -> Float {
        self.degrees.to_radians()
    }

    /// The same direction, in `[0°, 360°)`
    #[inline]
    #[must_use]
    pub fn normalized(self) -> Self {
        let d = self.degrees.rem_euclid(360.0);
        Self::from_degrees(if d >= 360.0 { 0.0 } else { d })
    }

    #[inline]
    #[must_use]
    pub fn unit_vector(self) -> Direction {
        unit_from_angle(self.radians())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::f64::consts::PI;

    #[test]
    fn test_normalize_angle() {
        assert!((normalize_angle(-PI / 2.0) - 3.0 * PI / 2.0).abs() < 1e-12);
        assert!((normalize_angle(5.0 * PI) - PI).abs() < 1e-12);
        assert_eq!(normalize_angle(0.0), 0.0);
        assert!(normalize_angle(-1e-18) < TAU);
    }

    #[test]
    fn test_degrees_convert_once() {
        let a = Angle::from_degrees(90.0);
        assert!((a.radians() - PI / 2.0).abs() < 1e-12);
        assert!((a.degrees() - 90.0).abs() < 1e-12);
    }

    #[test]
    fn test_normalized() {
        assert_eq!(Angle::from_degrees(-90.0).normalized().degrees(), 270.0);
        assert_eq!(Angle::from_degrees(720.0).normalized().degrees(), 0.0);
        let v = Angle::from_degrees(180.0).unit_vector();
        assert!((v.x + 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_between_is_normalized() {
        let a = Angle::between(&Point::new(0.0, 0.0), &Point::new(0.0, -10.0));
        assert!((a.degrees() - 270.0).abs() < 1e-9);

        let b = Angle::between(&Point::new(1.0, 1.0), &Point::new(2.0, 2.0));
        assert!((b.degrees() - 45.0).abs() < 1e-9);
    }
}
