use super::*;

/// Length of the barbs returned by [`Leg::arrowhead`]
pub const ARROW_LENGTH: Float = 10.0;

/// Angle between a leg and each of its arrowhead's barbs, in radians (30°)
pub const ARROW_SPREAD: Float = core::f64::consts::FRAC_PI_6;

/// The polyline followed by a ray: its starting point, then every bounce, in order.
///
/// Never empty.
#[derive(Clone, Debug, PartialEq)]
pub struct Path {
    points: Vec<Point>,
}

impl Path {
    /// A path starting at `start` and going through `bounces`
    #[inline]
    #[must_use]
    pub fn new(start: Point, bounces: impl IntoIterator<Item = Point>) -> Self {
        let mut points = vec![start];
        points.extend(bounces);
        Self { points }
    }

    #[inline]
    #[must_use]
    pub fn points(&self) -> &[Point] {
        &self.points
    }

    #[inline]
    #[must_use]
    pub fn into_points(self) -> Vec<Point> {
        self.points
    }

    #[inline]
    #[must_use]
    pub fn start(&self) -> &Point {
        &self.points[0]
    }

    #[inline]
    #[must_use]
    pub fn last(&self) -> &Point {
        &self.points[self.points.len() - 1]
    }

    /// Number of points, at least 1
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Always false, kept for symmetry with [`Self::len`]
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        false
    }

    #[inline]
    #[must_use]
    pub fn bounces(&self) -> usize {
        self.points.len() - 1
    }

    /// The directed segments between consecutive points
    #[inline]
    pub fn legs(&self) -> impl ExactSizeIterator<Item = Leg> + '_ {
        self.points.windows(2).map(|window| Leg {
            from: window[0],
            to: window[1],
        })
    }
}

/// One straight stretch of a [`Path`], from a point to the next.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Leg {
    pub from: Point,
    pub to: Point,
}

impl Leg {
    #[inline]
    #[must_use]
    pub fn length(&self) -> Float {
        (self.to - self.from).norm()
    }

    #[inline]
    #[must_use]
    pub fn direction(&self) -> Option<Direction> {
        Unit::try_new(self.to - self.from, Float::EPSILON)
    }

    /// The two barb tips of an arrowhead drawn at `self.to`, pointing along the leg.
    ///
    /// Returns `None` for zero-length legs.
    #[must_use]
    pub fn arrowhead(&self) -> Option<[Point; 2]> {
        let back = -self.direction()?.into_inner();
        let back_angle = back.y.atan2(back.x);

        Some([ARROW_SPREAD, -ARROW_SPREAD].map(|spread| {
            self.to + unit_from_angle(back_angle + spread).into_inner() * ARROW_LENGTH
        }))
    }
}
