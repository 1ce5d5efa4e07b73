//! Tracing light rays through rooms of mirrored walls.
//!
//! A room is a list of [`Wall`]s, each one a line segment carrying a
//! [`MirrorKind`]. [`trace`] follows a ray from its origin, bouncing off the
//! nearest wall each step, and returns the resulting [`Path`].

mod angle;
mod experiment;
mod mirror;
mod outline;
mod path;
mod ray;
mod room;
mod settings;
mod trace;
mod wall;

pub use angle::*;
pub use experiment::*;
pub use mirror::*;
pub use outline::*;
pub use path::*;
pub use ray::*;
pub use room::*;
pub use settings::*;
pub use trace::*;
pub use wall::*;

pub use nalgebra;

use nalgebra::{Unit, Vector2};

pub type Float = f64;

/// A point (or vector) of the plane
pub type Point = Vector2<Float>;

/// A unit vector of the plane
pub type Direction = Unit<Vector2<Float>>;

/// The 2D cross product (the `z` coordinate of the 3D one)
#[inline]
#[must_use]
pub(crate) fn cross(a: &Point, b: &Point) -> Float {
    a.x * b.y - a.y * b.x
}
