use mirror_room::*;

use core::f64::consts::{PI, TAU};
pub use rand;

/// Range of the circumradius of random rooms
pub const ROOM_RADIUS: core::ops::Range<Float> = 100.0..400.0;

/// Range of the radius of curvature of random spherical mirrors
pub const MIRROR_RADIUS: core::ops::Range<Float> = 50.0..1000.0;

pub trait Random: Sized {
    /// Generate a randomized value using the provided `rng`
    ///
    /// This method must not fail. If creating a value is faillible, keep trying until success
    fn random(rng: &mut (impl rand::Rng + ?Sized)) -> Self;
}

impl Random for Curvature {
    fn random(rng: &mut (impl rand::Rng + ?Sized)) -> Self {
        if rng.gen() {
            Self::Concave
        } else {
            Self::Convex
        }
    }
}

impl Random for MirrorKind {
    /// Flat half of the time
    fn random(rng: &mut (impl rand::Rng + ?Sized)) -> Self {
        if rng.gen() {
            return Self::Flat;
        }

        loop {
            let curvature = Curvature::random(rng);
            if let Ok(mirror) = Self::spherical(curvature, rng.gen_range(MIRROR_RADIUS)) {
                break mirror;
            }
        }
    }
}

impl Random for Wall {
    fn random(rng: &mut (impl rand::Rng + ?Sized)) -> Self {
        let wall = loop {
            let start = rand_point(rng, ROOM_RADIUS.end);
            let end = rand_point(rng, ROOM_RADIUS.end);
            if let Some(wall) = Wall::try_new(start, end) {
                break wall;
            }
        };
        wall.with_mirror(MirrorKind::random(rng))
    }
}

impl Random for Room {
    /// A regular room centered on the origin, with a random number of sides, a random
    /// size, and a random mirror on each wall
    fn random(rng: &mut (impl rand::Rng + ?Sized)) -> Self {
        let sides = rng.gen_range(Room::REGULAR_SIDES);
        random_room(sides, rng)
    }
}

impl Random for Experiment {
    /// A random room, with the ray fired from inside it, in a random direction
    fn random(rng: &mut (impl rand::Rng + ?Sized)) -> Self {
        random_experiment(rng.gen_range(Room::REGULAR_SIDES), rng)
    }
}

/// A regular room with `sides` walls (clamped to [`Room::REGULAR_SIDES`])
pub fn random_room(sides: usize, rng: &mut (impl rand::Rng + ?Sized)) -> Room {
    let sides = sides.clamp(*Room::REGULAR_SIDES.start(), *Room::REGULAR_SIDES.end());

    let mut room = loop {
        if let Ok(room) = Room::regular(sides, Point::zeros(), rng.gen_range(ROOM_RADIUS)) {
            break room;
        }
    };

    for wall in room.walls_mut() {
        wall.set_mirror(MirrorKind::random(rng));
    }

    room
}

/// An experiment in a random room with `sides` walls. The origin is drawn inside the room's
/// inscribed circle so the ray always starts inside.
pub fn random_experiment(sides: usize, rng: &mut (impl rand::Rng + ?Sized)) -> Experiment {
    let room = random_room(sides, rng);

    let circumradius = room.walls().first().map_or(0.0, |w| w.start().norm());
    let apothem = circumradius * (PI / room.len() as Float).cos();

    let origin = rand_point(rng, apothem * 0.9);
    let angle = Angle::from_degrees(rng.gen_range(0.0..360.0));

    log::debug!(
        "generated a room with {} walls, firing from {origin:?} at {}°",
        room.len(),
        angle.degrees()
    );

    Experiment::new(room, origin, angle)
}

/// A point drawn uniformly in the disk of radius `max_norm` around the origin
pub fn rand_point(rng: &mut (impl rand::Rng + ?Sized), max_norm: Float) -> Point {
    let r = max_norm.abs() * rng.gen::<Float>().sqrt();
    let theta = rng.gen_range(0.0..TAU);
    let (s, c) = theta.sin_cos();
    Point::new(c * r, s * r)
}
