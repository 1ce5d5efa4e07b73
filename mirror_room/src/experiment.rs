use super::*;

/// Everything needed to reproduce a trace: a room, and where and how the ray is fired.
#[derive(Clone, Debug, PartialEq)]
pub struct Experiment {
    pub room: Room,
    pub origin: Point,
    pub angle: Angle,
    pub max_reflections: usize,
}

impl Experiment {
    #[inline]
    #[must_use]
    pub fn new(room: Room, origin: impl Into<Point>, angle: Angle) -> Self {
        Self {
            room,
            origin: origin.into(),
            angle,
            max_reflections: TraceSettings::DEFAULT_MAX_REFLECTIONS,
        }
    }

    #[inline]
    #[must_use]
    pub fn with_max_reflections(mut self, max_reflections: usize) -> Self {
        self.max_reflections = max_reflections;
        self
    }

    #[inline]
    #[must_use]
    pub fn settings(&self) -> TraceSettings {
        TraceSettings::default().with_max_reflections(self.max_reflections)
    }

    /// Traces the experiment's ray. Running the same experiment twice gives the same path.
    #[inline]
    #[must_use]
    pub fn run(&self) -> Path {
        self.room.trace(self.origin, self.angle, &self.settings())
    }
}
