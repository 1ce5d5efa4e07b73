use core::ops::Deref;
use std::{rc::Rc, sync::Arc};

use super::*;

/// A wall that a ray runs into, and where.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Hit {
    /// Distance travelled by the ray before hitting `wall`
    pub dist: Float,
    pub point: Point,
    /// A copy of the wall that was hit
    pub wall: Wall,
}

/// The state of one nearest-hit query: the ray, the limits of the search,
/// and the closest hit found so far.
#[derive(Clone, Debug, PartialEq)]
pub struct SimulationCtx {
    ray: Ray,
    eps: Float,
    reach: Float,
    closest: Option<Hit>,
}

impl SimulationCtx {
    #[inline]
    #[must_use]
    pub fn new(ray: Ray, settings: &TraceSettings) -> Self {
        Self {
            ray,
            eps: settings.eps,
            reach: settings.reach,
            closest: None,
        }
    }

    #[inline]
    #[must_use]
    pub fn ray(&self) -> &Ray {
        &self.ray
    }

    /// Records that the ray hits `wall` after travelling `dist`.
    ///
    /// Hits closer than `eps` (the ray bumping into the wall it just left, because
    /// of roundoff errors) or further than `reach` are discarded. On ties, the
    /// first hit added wins.
    #[inline]
    pub fn add_hit(&mut self, dist: Float, wall: &Wall) {
        if dist >= self.eps
            && dist <= self.reach
            && self.closest.as_ref().map_or(true, |hit| hit.dist > dist)
        {
            self.closest = Some(Hit {
                dist,
                point: self.ray.at(dist),
                wall: *wall,
            });
        }
    }

    #[inline]
    #[must_use]
    pub fn closest(&self) -> Option<&Hit> {
        self.closest.as_ref()
    }

    #[inline]
    #[must_use]
    pub fn into_closest(self) -> Option<Hit> {
        self.closest
    }
}

/// Anything rays can bounce off: a single wall, a room, or any collection of those.
///
/// Implementors add, with [`SimulationCtx::add_hit`], every point where the
/// [ray](SimulationCtx::ray) crosses one of their walls, in no particular order.
/// The context keeps the closest one.
///
/// This must be deterministic: the same ray always produces the same hits.
#[impl_trait_for_tuples::impl_for_tuples(1, 16)]
pub trait Mirror {
    fn add_hits(&self, ctx: &mut SimulationCtx);
}

impl Mirror for Wall {
    #[inline]
    fn add_hits(&self, ctx: &mut SimulationCtx) {
        if self.is_degenerate() {
            log::debug!("skipping degenerate wall at ({}, {})", self.start().x, self.start().y);
            return;
        }

        if let Some(t) = self.intersection(ctx.ray()) {
            ctx.add_hit(t, self);
        }
    }
}

impl<T: Mirror> Mirror for [T] {
    #[inline]
    fn add_hits(&self, ctx: &mut SimulationCtx) {
        self.iter().for_each(|mirror| mirror.add_hits(ctx))
    }
}

impl<const N: usize, T: Mirror> Mirror for [T; N] {
    #[inline]
    fn add_hits(&self, ctx: &mut SimulationCtx) {
        self.as_slice().add_hits(ctx)
    }
}

impl<T: Mirror> Mirror for Vec<T> {
    #[inline]
    fn add_hits(&self, ctx: &mut SimulationCtx) {
        self.as_slice().add_hits(ctx)
    }
}

// All of these go through `Deref`, but a blanket impl over `Deref` types would
// stop downstream crates from implementing `Mirror` for their own types.

impl<T: Mirror + ?Sized> Mirror for Box<T> {
    #[inline]
    fn add_hits(&self, ctx: &mut SimulationCtx) {
        self.deref().add_hits(ctx)
    }
}

impl<T: Mirror + ?Sized> Mirror for Arc<T> {
    #[inline]
    fn add_hits(&self, ctx: &mut SimulationCtx) {
        self.deref().add_hits(ctx)
    }
}

impl<T: Mirror + ?Sized> Mirror for Rc<T> {
    #[inline]
    fn add_hits(&self, ctx: &mut SimulationCtx) {
        self.deref().add_hits(ctx)
    }
}

impl<T: Mirror + ?Sized> Mirror for &T {
    #[inline]
    fn add_hits(&self, ctx: &mut SimulationCtx) {
        (*self).add_hits(ctx)
    }
}

impl<T: Mirror + ?Sized> Mirror for &mut T {
    #[inline]
    fn add_hits(&self, ctx: &mut SimulationCtx) {
        self.deref().add_hits(ctx)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ctx_for(ray: Ray) -> SimulationCtx {
        SimulationCtx::new(ray, &TraceSettings::default())
    }

    #[test]
    fn test_closest_hit_wins() {
        let near = Wall::new([0.0, 5.0], [10.0, 5.0]);
        let far = Wall::new([0.0, 9.0], [10.0, 9.0]);

        let mut ctx = ctx_for(Ray::from_angle([5.0, 0.0], core::f64::consts::FRAC_PI_2));
        [far, near].add_hits(&mut ctx);

        let hit = ctx.into_closest().unwrap();
        assert_eq!(hit.wall, near);
        assert!((hit.dist - 5.0).abs() < 1e-9);
    }

    #[test]
    fn test_hits_closer_than_eps_are_discarded() {
        let wall = Wall::new([0.0, 0.5], [10.0, 0.5]);
        let mut ctx = ctx_for(Ray::from_angle([5.0, 0.0], core::f64::consts::FRAC_PI_2));
        wall.add_hits(&mut ctx);
        assert!(ctx.closest().is_none());
    }

    #[test]
    fn test_hits_beyond_reach_are_discarded() {
        let wall = Wall::new([0.0, 20.0], [10.0, 20.0]);
        let ray = Ray::from_angle([5.0, 0.0], core::f64::consts::FRAC_PI_2);
        let mut ctx = SimulationCtx::new(ray, &TraceSettings::default().with_reach(10.0));
        wall.add_hits(&mut ctx);
        assert!(ctx.closest().is_none());
    }

    #[test]
    fn test_ties_keep_the_first_wall() {
        let a = Wall::new([0.0, 5.0], [10.0, 5.0]);
        let b = a.with_mirror(MirrorKind::spherical(Curvature::Convex, 50.0).unwrap());

        let mut ctx = ctx_for(Ray::from_angle([5.0, 0.0], core::f64::consts::FRAC_PI_2));
        (a, vec![b]).add_hits(&mut ctx);
        assert_eq!(ctx.into_closest().unwrap().wall, a);
    }
}
