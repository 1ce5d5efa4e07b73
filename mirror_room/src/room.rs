use core::{f64::consts::TAU, ops::RangeInclusive};

use super::*;

/// How far apart the end of a wall and the start of the next may be in a closed room
const CLOSURE_TOLERANCE: Float = 1e-6;

/// Margin kept around regular rooms built with [`Room::regular_in_area`]
const AREA_MARGIN: Float = 100.0;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum RoomError {
    #[error("a room needs at least {} walls, got {0}", Room::MIN_WALLS)]
    TooFewWalls(usize),
    #[error("wall {0} has zero length")]
    DegenerateWall(usize),
    #[error("wall {0} does not end where wall {1} starts")]
    NotClosed(usize, usize),
    #[error("regular rooms have between 4 and 9 walls, got {0}")]
    UnsupportedSides(usize),
    #[error("no wall at index {0}")]
    NoSuchWall(usize),
}

/// A closed polygon of mirrored walls: wall `i` ends where wall `i + 1` starts
/// (and the last one ends where the first one starts).
///
/// The room owns its walls. Traces work on a [snapshot](Self::snapshot) of them, so
/// reconfiguring a wall never affects a trace that is already running.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Room {
    walls: Vec<Wall>,
}

impl Room {
    pub const MIN_WALLS: usize = 4;

    /// Side counts accepted by [`Self::regular`]
    pub const REGULAR_SIDES: RangeInclusive<usize> = 4..=9;

    /// Builds a room by joining each vertex to the next, and the last one to the first.
    /// All walls start out flat.
    pub fn from_vertices(
        vertices: impl IntoIterator<Item = impl Into<Point>>,
    ) -> Result<Self, RoomError> {
        let vertices: Vec<Point> = vertices.into_iter().map(Into::into).collect();
        let n = vertices.len();

        if n < Self::MIN_WALLS {
            return Err(RoomError::TooFewWalls(n));
        }

        let walls = (0..n)
            .map(|i| {
                Wall::try_new(vertices[i], vertices[(i + 1) % n]).ok_or(RoomError::DegenerateWall(i))
            })
            .collect::<Result<Vec<_>, _>>()?;

        log::debug!("built a room with {n} walls");

        Ok(Self { walls })
    }

    /// Builds a room from already configured walls, checking that they form a closed polygon.
    pub fn from_walls(walls: Vec<Wall>) -> Result<Self, RoomError> {
        let n = walls.len();

        if n < Self::MIN_WALLS {
            return Err(RoomError::TooFewWalls(n));
        }

        if let Some(i) = walls.iter().position(Wall::is_degenerate) {
            return Err(RoomError::DegenerateWall(i));
        }

        for i in 0..n {
            let j = (i + 1) % n;
            if (walls[i].end() - walls[j].start()).norm() > CLOSURE_TOLERANCE {
                return Err(RoomError::NotClosed(i, j));
            }
        }

        Ok(Self { walls })
    }

    /// A regular polygon with `sides` walls, inscribed in the circle of the given
    /// `center` and `radius`. The first vertex is straight "up" (towards `-y`),
    /// the others follow with increasing angles.
    pub fn regular(sides: usize, center: impl Into<Point>, radius: Float) -> Result<Self, RoomError> {
        if !Self::REGULAR_SIDES.contains(&sides) {
            return Err(RoomError::UnsupportedSides(sides));
        }

        let center = center.into();

        Self::from_vertices((0..sides).map(|i| {
            let angle = TAU * i as Float / sides as Float - core::f64::consts::FRAC_PI_2;
            center + unit_from_angle(angle).into_inner() * radius
        }))
    }

    /// A regular polygon centered in a `width` by `height` area, keeping a margin of
    /// 100 units on each side.
    pub fn regular_in_area(sides: usize, width: Float, height: Float) -> Result<Self, RoomError> {
        let inner_width = width - 2.0 * AREA_MARGIN;
        let inner_height = height - 2.0 * AREA_MARGIN;

        let radius = inner_width.min(inner_height) / 2.5;

        Self::regular(sides, [width / 2.0, height / 2.0], radius)
    }

    #[inline]
    #[must_use]
    pub fn walls(&self) -> &[Wall] {
        &self.walls
    }

    #[inline]
    #[must_use]
    pub fn wall(&self, index: usize) -> Option<&Wall> {
        self.walls.get(index)
    }

    /// Only the wall's mirror can be changed this way, its endpoints are fixed.
    #[inline]
    pub fn wall_mut(&mut self, index: usize) -> Option<&mut Wall> {
        self.walls.get_mut(index)
    }

    /// Like [`Self::wall_mut`], for all the walls at once.
    #[inline]
    pub fn walls_mut(&mut self) -> &mut [Wall] {
        &mut self.walls
    }

    pub fn configure_wall(&mut self, index: usize, mirror: MirrorKind) -> Result<(), RoomError> {
        let wall = self.wall_mut(index).ok_or(RoomError::NoSuchWall(index))?;
        wall.set_mirror(mirror);
        log::debug!("wall {index} is now {mirror}");
        Ok(())
    }

    /// The first wall (and its index) [containing](Wall::contains_point) `point`
    #[must_use]
    pub fn wall_at(&self, point: &Point) -> Option<(usize, &Wall)> {
        self.walls
            .iter()
            .enumerate()
            .find(|(_, wall)| wall.contains_point(point))
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.walls.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.walls.is_empty()
    }

    #[inline]
    pub fn clear(&mut self) {
        self.walls.clear();
    }

    /// A copy of the walls, as they are right now.
    #[inline]
    #[must_use]
    pub fn snapshot(&self) -> Vec<Wall> {
        self.walls.clone()
    }

    /// Traces a ray leaving `origin` in direction `angle` through a snapshot of this room.
    #[must_use]
    pub fn trace(&self, origin: impl Into<Point>, angle: Angle, settings: &TraceSettings) -> Path {
        trace_with(origin.into(), angle.radians(), self.snapshot().as_slice(), settings)
    }

    /// Like [`Self::trace`], with `degrees` converted to radians on the way in.
    #[inline]
    #[must_use]
    pub fn trace_degrees(
        &self,
        origin: impl Into<Point>,
        degrees: Float,
        settings: &TraceSettings,
    ) -> Path {
        self.trace(origin, Angle::from_degrees(degrees), settings)
    }

    /// The smallest and largest coordinates of the room's vertices, `None` if it's empty.
    #[must_use]
    pub fn bounding_box(&self) -> Option<(Point, Point)> {
        self.walls
            .iter()
            .flat_map(|wall| [*wall.start(), *wall.end()])
            .fold(None, |bounds, p| match bounds {
                None => Some((p, p)),
                Some((min, max)) => Some((min.inf(&p), max.sup(&p))),
            })
    }
}

impl Mirror for Room {
    #[inline]
    fn add_hits(&self, ctx: &mut SimulationCtx) {
        self.walls.add_hits(ctx)
    }
}
