use super::*;

/// Knobs of a trace.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TraceSettings {
    /// Maximum number of bounces. A ray trapped in a closed room bounces forever,
    /// so this is what usually ends a trace.
    pub max_reflections: usize,
    /// Hits closer than this to the ray's origin are ignored.
    ///
    /// Must be positive and large enough to absorb the roundoff errors that leave a
    /// bounce point slightly "behind" the wall it lies on, but small enough for the
    /// ray not to skip walls it should hit.
    ///
    /// A bounce landing closer than `eps` to a corner ignores the adjacent wall too, so
    /// with the default of 1 such a ray escapes even a closed room and its trace ends there.
    pub eps: Float,
    /// How far a ray looks for walls. Should exceed the diagonal of any room.
    pub reach: Float,
}

impl TraceSettings {
    pub const DEFAULT_MAX_REFLECTIONS: usize = 50;
    pub const DEFAULT_EPS: Float = 1.0;
    pub const DEFAULT_REACH: Float = 10_000.0;

    #[inline]
    #[must_use]
    pub const fn new() -> Self {
        Self {
            max_reflections: Self::DEFAULT_MAX_REFLECTIONS,
            eps: Self::DEFAULT_EPS,
            reach: Self::DEFAULT_REACH,
        }
    }

    #[inline]
    #[must_use]
    pub const fn with_max_reflections(mut self, max_reflections: usize) -> Self {
        self.max_reflections = max_reflections;
        self
    }

    #[inline]
    #[must_use]
    pub const fn with_eps(mut self, eps: Float) -> Self {
        self.eps = eps;
        self
    }

    #[inline]
    #[must_use]
    pub const fn with_reach(mut self, reach: Float) -> Self {
        self.reach = reach;
        self
    }
}

impl Default for TraceSettings {
    fn default() -> Self {
        Self::new()
    }
}
