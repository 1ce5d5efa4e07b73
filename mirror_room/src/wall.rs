use core::{f64::consts::FRAC_PI_2, fmt};

use super::*;

/// Walls shorter than this are degenerate: they are never hit by rays
pub const MIN_WALL_LENGTH: Float = 1e-9;

/// How far from a wall a point can be while still "touching" it, see [`Wall::contains_point`]
pub const PICK_TOLERANCE: Float = 25.0;

/// Slack on the segment parameter, so that rays going exactly through a vertex still hit a wall
const SEGMENT_TOLERANCE: Float = 1e-9;

#[derive(Debug, Clone, Copy, PartialEq, thiserror::Error)]
pub enum WallError {
    #[error("a spherical mirror needs a positive radius, got {0}")]
    NonPositiveRadius(Float),
}

/// Which way a spherical mirror bulges
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Curvature {
    /// Center of curvature in front of the mirror, converges light
    #[default]
    Concave,
    /// Center of curvature behind the mirror, diverges light
    Convex,
}

impl Curvature {
    #[inline]
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Curvature::Concave => "Concave",
            Curvature::Convex => "Convex",
        }
    }
}

/// The reflective behavior of a [`Wall`]
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum MirrorKind {
    #[default]
    Flat,
    /// An arc of a circle of radius `radius`, whose chord is the wall itself
    Spherical { curvature: Curvature, radius: Float },
}

impl MirrorKind {
    /// The radius spherical mirrors start out with
    pub const DEFAULT_RADIUS: Float = 100.0;

    #[inline]
    pub fn spherical(curvature: Curvature, radius: Float) -> Result<Self, WallError> {
        // also rejects NaN
        if radius > 0.0 {
            Ok(Self::Spherical { curvature, radius })
        } else {
            Err(WallError::NonPositiveRadius(radius))
        }
    }

    #[inline]
    #[must_use]
    pub const fn is_flat(&self) -> bool {
        matches!(self, Self::Flat)
    }

    #[inline]
    #[must_use]
    pub const fn radius(&self) -> Option<Float> {
        match self {
            Self::Flat => None,
            Self::Spherical { radius, .. } => Some(*radius),
        }
    }
}

impl fmt::Display for MirrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MirrorKind::Flat => f.write_str("Flat"),
            MirrorKind::Spherical { curvature, .. } => f.write_str(curvature.as_str()),
        }
    }
}

/// A straight mirrored wall between two points.
///
/// The endpoints never change once the wall is built, only its [`MirrorKind`] does.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Wall {
    start: Point,
    end: Point,
    mirror: MirrorKind,
}

impl Wall {
    /// A flat wall from `start` to `end`.
    ///
    /// `start == end` is allowed, but the resulting wall is
    /// [degenerate](Self::is_degenerate) and will never be hit.
    #[inline]
    #[must_use]
    pub fn new(start: impl Into<Point>, end: impl Into<Point>) -> Self {
        Self {
            start: start.into(),
            end: end.into(),
            mirror: MirrorKind::Flat,
        }
    }

    /// Like [`Self::new`], but returns `None` for degenerate walls
    #[inline]
    #[must_use]
    pub fn try_new(start: impl Into<Point>, end: impl Into<Point>) -> Option<Self> {
        let wall = Self::new(start, end);
        (!wall.is_degenerate()).then_some(wall)
    }

    #[inline]
    #[must_use]
    pub fn with_mirror(mut self, mirror: MirrorKind) -> Self {
        self.mirror = mirror;
        self
    }

    #[inline]
    #[must_use]
    pub const fn mirror(&self) -> &MirrorKind {
        &self.mirror
    }

    #[inline]
    pub fn set_mirror(&mut self, mirror: MirrorKind) {
        self.mirror = mirror;
    }

    #[inline]
    pub fn set_flat(&mut self) {
        self.mirror = MirrorKind::Flat;
    }

    #[inline]
    pub fn set_spherical(&mut self, curvature: Curvature, radius: Float) -> Result<(), WallError> {
        self.mirror = MirrorKind::spherical(curvature, radius)?;
        Ok(())
    }

    #[inline]
    #[must_use]
    pub const fn start(&self) -> &Point {
        &self.start
    }

    #[inline]
    #[must_use]
    pub const fn end(&self) -> &Point {
        &self.end
    }

    /// `end - start`
    #[inline]
    #[must_use]
    pub fn vector(&self) -> Point {
        self.end - self.start
    }

    #[inline]
    #[must_use]
    pub fn length(&self) -> Float {
        self.vector().norm()
    }

    #[inline]
    #[must_use]
    pub fn is_degenerate(&self) -> bool {
        self.length() < MIN_WALL_LENGTH
    }

    /// `atan2(dy, dx)` of the wall's direction
    #[inline]
    #[must_use]
    pub fn angle(&self) -> Float {
        let v = self.vector();
        v.y.atan2(v.x)
    }

    #[inline]
    #[must_use]
    pub fn direction(&self) -> Option<Direction> {
        (!self.is_degenerate()).then(|| Unit::new_normalize(self.vector()))
    }

    /// The direction rotated a quarter turn counter-clockwise
    #[inline]
    #[must_use]
    pub fn normal(&self) -> Option<Direction> {
        self.direction()
            .map(|d| Unit::new_unchecked(Point::new(-d.y, d.x)))
    }

    #[inline]
    #[must_use]
    pub fn midpoint(&self) -> Point {
        (self.start + self.end) / 2.0
    }

    /// The point of this segment closest to `p`
    #[must_use]
    pub fn closest_point(&self, p: &Point) -> Point {
        let v = self.vector();
        let l2 = v.norm_squared();

        if l2 == 0.0 {
            return self.start;
        }

        let t = ((p - self.start).dot(&v) / l2).clamp(0.0, 1.0);
        self.start + v * t
    }

    #[inline]
    #[must_use]
    pub fn distance_to_point(&self, p: &Point) -> Float {
        (p - self.closest_point(p)).norm()
    }

    /// Whether `p` lies within [`PICK_TOLERANCE`] of any part of the wall
    #[inline]
    #[must_use]
    pub fn contains_point(&self, p: &Point) -> bool {
        self.distance_to_point(p) < PICK_TOLERANCE
    }

    /// The image of `p` in a flat mirror lying along this wall's line
    #[must_use]
    pub fn mirror_image(&self, p: &Point) -> Point {
        let v = self.vector();
        let l2 = v.norm_squared();

        if l2 == 0.0 {
            return *p;
        }

        let projected = self.start + v * ((p - self.start).dot(&v) / l2);
        2.0 * projected - p
    }

    /// Returns the distance `t` such that [`ray.at(t)`](Ray::at) lies on this wall, if any.
    ///
    /// `t` is never negative. Rays parallel to the wall, even along it, do not hit it.
    #[must_use]
    pub fn intersection(&self, ray: &Ray) -> Option<Float> {
        let e = self.vector();
        let d = ray.direction.as_ref();

        let denom = cross(d, &e);

        if denom.abs() <= Float::EPSILON * e.norm() {
            return None;
        }

        let w = self.start - ray.origin;
        let t = cross(&w, &e) / denom;
        let s = cross(&w, d) / denom;

        (t >= 0.0 && (-SEGMENT_TOLERANCE..=1.0 + SEGMENT_TOLERANCE).contains(&s)).then_some(t)
    }

    /// The unit normal on the side a ray travelling along `incoming` arrives from.
    ///
    /// Returns `None` for degenerate walls.
    #[inline]
    #[must_use]
    pub fn front_normal(&self, incoming: &Point) -> Option<Point> {
        let normal = self.normal()?.into_inner();
        Some(if normal.dot(incoming) < 0.0 {
            normal
        } else {
            -normal
        })
    }

    /// The center of the circle this spherical wall is an arc of, as seen by a ray
    /// travelling along `incoming`.
    ///
    /// The wall is the chord of the arc. A concave mirror has its center on the side the
    /// ray comes from, a convex one on the other side. If the radius is shorter than half
    /// the wall, the center sits on the wall's midpoint.
    ///
    /// Returns `None` for flat and degenerate walls.
    #[must_use]
    pub fn center_of_curvature(&self, incoming: &Point) -> Option<Point> {
        let MirrorKind::Spherical { curvature, radius } = self.mirror else {
            return None;
        };

        let facing_ray = self.front_normal(incoming)?;

        let half = self.length() / 2.0;
        let offset = (radius * radius - half * half).max(0.0).sqrt();

        let towards_center = match curvature {
            Curvature::Concave => facing_ray,
            Curvature::Convex => -facing_ray,
        };

        Some(self.midpoint() + towards_center * offset)
    }

    /// The angle of a ray arriving at `incoming` radians, after bouncing off
    /// this wall at `at`. The result is not normalized.
    ///
    /// Flat walls use the law of reflection about the wall's line:
    /// `2 * wall_angle - incoming`, `at` is ignored.
    ///
    /// Spherical walls reflect about the tangent to the arc at `at`: with `n` the unit
    /// vector from `at` to the [center of curvature](Self::center_of_curvature), the
    /// tangent's angle is `atan2(n) + π/2` and the result is `2 * tangent - incoming`.
    /// When `at` is the center itself, the flat law is used.
    ///
    /// Rays are reflected off the wall segment, not the arc, so the tilted normal can send
    /// the reflected ray through the wall (always for off-center hits when the radius is under half
    /// the wall's length, as the center then lies on the wall). Whenever the spherical law would not
    /// send the ray back to the [side it came from](Self::front_normal), the flat law
    /// is used instead.
    #[must_use]
    pub fn reflect(&self, incoming: Float, at: &Point) -> Float {
        let flat = 2.0 * self.angle() - incoming;

        if self.mirror.is_flat() {
            return flat;
        }

        let dir = unit_from_angle(incoming).into_inner();

        let (Some(center), Some(front)) = (self.center_of_curvature(&dir), self.front_normal(&dir))
        else {
            return flat;
        };

        let n = center - at;
        if n.norm() <= MIN_WALL_LENGTH {
            return flat;
        }

        let tangent = n.y.atan2(n.x) + FRAC_PI_2;
        let spherical = 2.0 * tangent - incoming;

        if unit_from_angle(spherical).into_inner().dot(&front) > 0.0 {
            spherical
        } else {
            flat
        }
    }
}

impl fmt::Display for Wall {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Wall: ({},{}) -> ({},{}), Type: {}, Radius: {}",
            self.start.x,
            self.start.y,
            self.end.x,
            self.end.y,
            self.mirror,
            self.mirror.radius().unwrap_or(MirrorKind::DEFAULT_RADIUS),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::f64::consts::PI;

    fn direction_of(angle: Float) -> Point {
        unit_from_angle(angle).into_inner()
    }

    #[test]
    fn test_intersection_is_bounded() {
        let wall = Wall::new([0.0, 10.0], [10.0, 10.0]);

        let hit = Ray::from_angle([5.0, 0.0], PI / 2.0);
        assert!((wall.intersection(&hit).unwrap() - 10.0).abs() < 1e-9);

        let miss = Ray::from_angle([15.0, 0.0], PI / 2.0);
        assert!(wall.intersection(&miss).is_none());

        let behind = Ray::from_angle([5.0, 20.0], PI / 2.0);
        assert!(wall.intersection(&behind).is_none());
    }

    #[test]
    fn test_parallel_rays_never_hit() {
        let wall = Wall::new([0.0, 0.0], [10.0, 0.0]);
        let along = Ray::from_angle([-5.0, 0.0], 0.0);
        assert!(wall.intersection(&along).is_none());
    }

    #[test]
    fn test_ray_through_vertex_hits() {
        let wall = Wall::new([0.0, 0.0], [10.0, 0.0]);
        let ray = Ray::from_angle([-10.0, 10.0], -PI / 4.0);
        let t = wall.intersection(&ray).unwrap();
        assert!(ray.at(t).norm() < 1e-9);
    }

    #[test]
    fn test_degenerate_wall() {
        let wall = Wall::new([3.0, 3.0], [3.0, 3.0]);
        assert!(wall.is_degenerate());
        assert!(wall.direction().is_none());
        assert!(Wall::try_new([3.0, 3.0], [3.0, 3.0]).is_none());
        assert!(wall.intersection(&Ray::from_angle([0.0, 3.0], 0.0)).is_none());
        assert_eq!(wall.closest_point(&Point::new(0.0, 0.0)), Point::new(3.0, 3.0));
        assert!((wall.distance_to_point(&Point::new(0.0, -1.0)) - 5.0).abs() < 1e-12);
    }

    #[test]
    fn test_closest_point_is_clamped() {
        let wall = Wall::new([0.0, 0.0], [10.0, 0.0]);
        assert_eq!(wall.closest_point(&Point::new(5.0, 7.0)), Point::new(5.0, 0.0));
        assert_eq!(wall.closest_point(&Point::new(-5.0, 7.0)), Point::new(0.0, 0.0));
        assert!((wall.distance_to_point(&Point::new(13.0, 4.0)) - 5.0).abs() < 1e-12);
        assert!(wall.contains_point(&Point::new(5.0, 24.0)));
        assert!(!wall.contains_point(&Point::new(5.0, 26.0)));
    }

    #[test]
    fn test_mirror_image() {
        let wall = Wall::new([0.0, 0.0], [10.0, 10.0]);
        let p = wall.mirror_image(&Point::new(1.0, 0.0));
        assert!((p - Point::new(0.0, 1.0)).norm() < 1e-12);
    }

    #[test]
    fn test_flat_reflection_law() {
        let wall = Wall::new([0.0, 0.0], [1.0, 0.0]);
        let out = wall.reflect(-PI / 3.0, &Point::new(0.5, 0.0));
        assert!((normalize_angle(out) - PI / 3.0).abs() < 1e-12);

        let vertical = Wall::new([0.0, 0.0], [0.0, 1.0]);
        let out = vertical.reflect(0.0, &Point::new(0.0, 0.5));
        assert!((normalize_angle(out) - PI).abs() < 1e-12);
    }

    #[test]
    fn test_spherical_hit_at_midpoint_reflects_straight_back() {
        for curvature in [Curvature::Concave, Curvature::Convex] {
            let wall = Wall::new([-50.0, 0.0], [50.0, 0.0])
                .with_mirror(MirrorKind::spherical(curvature, 200.0).unwrap());
            let out = wall.reflect(-PI / 2.0, &Point::new(0.0, 0.0));
            assert!((normalize_angle(out) - PI / 2.0).abs() < 1e-9);
        }
    }

    #[test]
    fn test_concave_converges_near_focus() {
        let wall = Wall::new([-50.0, 0.0], [50.0, 0.0])
            .with_mirror(MirrorKind::spherical(Curvature::Concave, 200.0).unwrap());

        let at = Point::new(10.0, 0.0);
        let out = direction_of(wall.reflect(-PI / 2.0, &at));

        assert!(out.x < 0.0 && out.y > 0.0);

        // where the reflected ray crosses the mirror's axis, roughly R / 2 away
        let t = -at.x / out.x;
        let y = at.y + t * out.y;
        assert!((90.0..105.0).contains(&y), "crossed the axis at y = {y}");
    }

    #[test]
    fn test_convex_diverges() {
        let wall = Wall::new([-50.0, 0.0], [50.0, 0.0])
            .with_mirror(MirrorKind::spherical(Curvature::Convex, 200.0).unwrap());

        let out = direction_of(wall.reflect(-PI / 2.0, &Point::new(10.0, 0.0)));
        assert!(out.x > 0.0 && out.y > 0.0);
    }

    #[test]
    fn test_curvature_does_not_depend_on_wall_orientation() {
        let mirror = MirrorKind::spherical(Curvature::Concave, 200.0).unwrap();
        let forward = Wall::new([-50.0, 0.0], [50.0, 0.0]).with_mirror(mirror);
        let backward = Wall::new([50.0, 0.0], [-50.0, 0.0]).with_mirror(mirror);

        let at = Point::new(20.0, 0.0);
        let a = direction_of(forward.reflect(-PI / 2.0, &at));
        let b = direction_of(backward.reflect(-PI / 2.0, &at));
        assert!((a - b).norm() < 1e-9);
    }

    #[test]
    fn test_spherical_reflection_preserves_angle_to_normal() {
        let wall = Wall::new([-50.0, 0.0], [50.0, 0.0])
            .with_mirror(MirrorKind::spherical(Curvature::Convex, 120.0).unwrap());

        let incoming = -PI / 3.0;
        let at = Point::new(-20.0, 0.0);
        let d = direction_of(incoming);
        let center = wall.center_of_curvature(&d).unwrap();
        let n = (center - at).normalize();

        let out = direction_of(wall.reflect(incoming, &at));
        assert!((out.dot(&n) + d.dot(&n)).abs() < 1e-9);
    }

    #[test]
    fn test_small_radius_puts_center_on_wall() {
        let wall = Wall::new([-50.0, 0.0], [50.0, 0.0])
            .with_mirror(MirrorKind::spherical(Curvature::Concave, 10.0).unwrap());
        let center = wall.center_of_curvature(&Point::new(0.0, -1.0)).unwrap();
        assert!(center.norm() < 1e-12);
        // hitting the center itself falls back to the flat law
        let out = wall.reflect(-PI / 2.0, &Point::new(0.0, 0.0));
        assert!((normalize_angle(out) - PI / 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_small_radius_off_center_hit_bounces_back() {
        let wall = Wall::new([0.0, 0.0], [400.0, 0.0])
            .with_mirror(MirrorKind::spherical(Curvature::Concave, 100.0).unwrap());

        let out = direction_of(wall.reflect(-PI / 2.0, &Point::new(250.0, 0.0)));
        assert!((out - Point::new(0.0, 1.0)).norm() < 1e-9);
    }

    #[test]
    fn test_tilted_convex_normal_does_not_cross_the_wall() {
        let wall = Wall::new([0.0, 0.0], [400.0, 0.0])
            .with_mirror(MirrorKind::spherical(Curvature::Convex, 250.0).unwrap());

        let incoming = -40f64.to_radians();
        let out = wall.reflect(incoming, &Point::new(380.0, 0.0));
        assert!(out.sin() > 0.0);
        // the spherical law would cross here, so the flat one applies
        assert!((normalize_angle(out) - 40f64.to_radians()).abs() < 1e-9);
    }

    #[test]
    fn test_front_normal_faces_the_ray() {
        let wall = Wall::new([0.0, 0.0], [10.0, 0.0]);
        let down = Point::new(0.0, -1.0);
        assert_eq!(wall.front_normal(&down), Some(Point::new(0.0, 1.0)));
        let reversed = Wall::new([10.0, 0.0], [0.0, 0.0]);
        assert_eq!(reversed.front_normal(&down), Some(Point::new(0.0, 1.0)));
        assert!(Wall::new([1.0, 1.0], [1.0, 1.0]).front_normal(&down).is_none());
    }

    #[test]
    fn test_radius_must_be_positive() {
        assert_eq!(
            MirrorKind::spherical(Curvature::Convex, 0.0),
            Err(WallError::NonPositiveRadius(0.0))
        );
        let mut wall = Wall::new([0.0, 0.0], [1.0, 0.0]);
        assert!(wall.set_spherical(Curvature::Concave, -3.0).is_err());
        assert!(wall.mirror().is_flat());
        assert!(MirrorKind::spherical(Curvature::Concave, Float::NAN).is_err());
    }

    #[test]
    fn test_display() {
        let mut wall = Wall::new([0.0, 0.0], [400.0, 0.0]);
        assert_eq!(
            wall.to_string(),
            "Wall: (0,0) -> (400,0), Type: Flat, Radius: 100"
        );
        wall.set_spherical(Curvature::Convex, 250.0).unwrap();
        assert_eq!(
            wall.to_string(),
            "Wall: (0,0) -> (400,0), Type: Convex, Radius: 250"
        );
    }
}
