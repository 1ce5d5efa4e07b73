//! Geometry handed to renderers: everything worth drawing, flattened into straight lines.

use super::*;

/// Length of the marker drawn from the middle of spherical walls
pub const CURVATURE_MARKER_LENGTH: Float = 30.0;

/// What a [`Line`] depicts
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum LineKind {
    Wall(MirrorKind),
    /// Points from a spherical wall's midpoint towards the side it curves to
    CurvatureMarker(Curvature),
    Ray,
    Arrowhead,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Line {
    pub from: Point,
    pub to: Point,
    pub kind: LineKind,
}

#[impl_trait_for_tuples::impl_for_tuples(1, 16)]
pub trait Outline {
    fn append_lines(&self, list: &mut Vec<Line>);
}

impl Outline for Wall {
    fn append_lines(&self, list: &mut Vec<Line>) {
        list.push(Line {
            from: *self.start(),
            to: *self.end(),
            kind: LineKind::Wall(*self.mirror()),
        });

        if let (MirrorKind::Spherical { curvature, .. }, Some(normal)) =
            (self.mirror(), self.normal())
        {
            let side = match curvature {
                Curvature::Concave => 1.0,
                Curvature::Convex => -1.0,
            };
            let mid = self.midpoint();

            list.push(Line {
                from: mid,
                to: mid + normal.into_inner() * (side * CURVATURE_MARKER_LENGTH),
                kind: LineKind::CurvatureMarker(*curvature),
            });
        }
    }
}

impl Outline for Room {
    fn append_lines(&self, list: &mut Vec<Line>) {
        self.walls().append_lines(list)
    }
}

impl Outline for Path {
    fn append_lines(&self, list: &mut Vec<Line>) {
        for leg in self.legs() {
            list.push(Line {
                from: leg.from,
                to: leg.to,
                kind: LineKind::Ray,
            });

            if let Some(barbs) = leg.arrowhead() {
                list.extend(barbs.map(|barb| Line {
                    from: leg.to,
                    to: barb,
                    kind: LineKind::Arrowhead,
                }));
            }
        }
    }
}

impl<T: Outline> Outline for [T] {
    fn append_lines(&self, list: &mut Vec<Line>) {
        self.iter().for_each(|a| a.append_lines(list));
    }
}

impl<const N: usize, T: Outline> Outline for [T; N] {
    fn append_lines(&self, list: &mut Vec<Line>) {
        self.as_slice().append_lines(list);
    }
}

impl<T: Outline> Outline for Vec<T> {
    fn append_lines(&self, list: &mut Vec<Line>) {
        self.as_slice().append_lines(list);
    }
}

impl<T: Outline + ?Sized> Outline for &T {
    fn append_lines(&self, list: &mut Vec<Line>) {
        (*self).append_lines(list);
    }
}

/// All the lines needed to draw `item`
#[must_use]
pub fn outline(item: &(impl Outline + ?Sized)) -> Vec<Line> {
    let mut list = Vec::new();
    item.append_lines(&mut list);
    list
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_room_and_path_outline() {
        let mut room =
            Room::from_vertices([[0.0, 0.0], [400.0, 0.0], [400.0, 400.0], [0.0, 400.0]]).unwrap();
        room.configure_wall(0, MirrorKind::spherical(Curvature::Concave, 300.0).unwrap())
            .unwrap();

        let path = room.trace_degrees(
            [200.0, 200.0],
            90.0,
            &TraceSettings::default().with_max_reflections(2),
        );

        let lines = outline(&(&room, &path));

        let count = |f: fn(&LineKind) -> bool| lines.iter().filter(|l| f(&l.kind)).count();

        assert_eq!(count(|k| matches!(k, LineKind::Wall(_))), 4);
        assert_eq!(count(|k| matches!(k, LineKind::CurvatureMarker(_))), 1);
        assert_eq!(count(|k| matches!(k, LineKind::Ray)), 2);
        assert_eq!(count(|k| matches!(k, LineKind::Arrowhead)), 4);
    }

    #[test]
    fn test_concave_marker_points_inside_counter_clockwise_rooms() {
        let wall = Wall::new([0.0, 0.0], [400.0, 0.0])
            .with_mirror(MirrorKind::spherical(Curvature::Concave, 300.0).unwrap());
        let lines = outline(&wall);
        assert_eq!(lines.len(), 2);
        assert!(lines[1].to.y > 0.0);
    }
}
