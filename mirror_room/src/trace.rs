use core::iter::FusedIterator;

use super::*;

/// Returns the closest wall of `mirror` hit by `ray`, within the limits of `settings`.
#[inline]
#[must_use]
pub fn nearest_hit<M: Mirror + ?Sized>(
    ray: &Ray,
    mirror: &M,
    settings: &TraceSettings,
) -> Option<Hit> {
    let mut ctx = SimulationCtx::new(*ray, settings);
    mirror.add_hits(&mut ctx);
    ctx.into_closest()
}

/// Returns the first wall hit by a ray leaving `origin` at `angle` radians,
/// along with the point where it hits, using the default [`TraceSettings`].
///
/// When several walls are hit at the same distance (a ray going through a vertex),
/// which one is returned is unspecified.
#[inline]
#[must_use]
pub fn find_nearest_hit<M: Mirror + ?Sized>(
    origin: Point,
    angle: Float,
    walls: &M,
) -> Option<(Wall, Point)> {
    nearest_hit(&Ray::from_angle(origin, angle), walls, &TraceSettings::default())
        .map(|hit| (hit.wall, hit.point))
}

/// The angle of a ray arriving at `incoming` radians after bouncing off `wall` at `at`.
///
/// See [`Wall::reflect`].
#[inline]
#[must_use]
pub fn reflect(incoming: Float, wall: &Wall, at: &Point) -> Float {
    wall.reflect(incoming, at)
}

/// Traces a ray leaving `origin` at `angle` radians through `walls`, for at most
/// `max_reflections` bounces.
#[inline]
#[must_use]
pub fn trace<M: Mirror + ?Sized>(
    origin: Point,
    angle: Float,
    walls: &M,
    max_reflections: usize,
) -> Path {
    trace_with(
        origin,
        angle,
        walls,
        &TraceSettings::default().with_max_reflections(max_reflections),
    )
}

#[must_use]
pub fn trace_with<M: Mirror + ?Sized>(
    origin: Point,
    angle: Float,
    walls: &M,
    settings: &TraceSettings,
) -> Path {
    let path = Path::new(origin, RayPath::new(walls, origin, angle, *settings));
    log::trace!(
        "traced {} reflections from ({}, {})",
        path.bounces(),
        origin.x,
        origin.y
    );
    path
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum TraceState {
    /// The ray is at `point`, heading at `angle` radians, after `bounces` reflections
    Tracing {
        point: Point,
        angle: Float,
        bounces: usize,
    },
    /// The ray escaped, or ran out of reflections
    Done,
}

/// An iterator over the bounce points of a ray, in order.
///
/// Ends when the ray hits nothing, or after [`TraceSettings::max_reflections`] bounces.
pub struct RayPath<'a, M: ?Sized> {
    mirror: &'a M,
    settings: TraceSettings,
    state: TraceState,
}

impl<'a, M: Mirror + ?Sized> RayPath<'a, M> {
    #[inline]
    #[must_use]
    pub fn new(mirror: &'a M, origin: Point, angle: Float, settings: TraceSettings) -> Self {
        Self {
            mirror,
            settings,
            state: TraceState::Tracing {
                point: origin,
                angle,
                bounces: 0,
            },
        }
    }

    #[inline]
    #[must_use]
    pub fn state(&self) -> &TraceState {
        &self.state
    }
}

impl<'a, M: Mirror + ?Sized> Iterator for RayPath<'a, M> {
    type Item = Point;

    fn next(&mut self) -> Option<Self::Item> {
        let TraceState::Tracing {
            point,
            angle,
            bounces,
        } = self.state
        else {
            return None;
        };

        if bounces >= self.settings.max_reflections {
            self.state = TraceState::Done;
            return None;
        }

        let ray = Ray::from_angle(point, angle);

        let Some(hit) = nearest_hit(&ray, self.mirror, &self.settings) else {
            log::trace!("ray escaped after {bounces} reflections");
            self.state = TraceState::Done;
            return None;
        };

        let angle = normalize_angle(hit.wall.reflect(angle, &hit.point));

        log::trace!(
            "bounce {} at ({}, {}), leaving at {} rad",
            bounces + 1,
            hit.point.x,
            hit.point.y,
            angle
        );

        self.state = TraceState::Tracing {
            point: hit.point,
            angle,
            bounces: bounces + 1,
        };

        Some(hit.point)
    }
}

impl<'a, M: Mirror + ?Sized> FusedIterator for RayPath<'a, M> {}
