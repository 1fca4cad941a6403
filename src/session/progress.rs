//! Optional client-side validation of progress values.

/// How incoming progress values are checked before they reach the session.
///
/// The service is trusted to send non-decreasing values in 0..=100, so both checks are
/// off by default and values pass through unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ProgressPolicy {
    /// Limit values to 0..=100
    pub clamp: bool,
    /// Drop updates lower than the current progress
    pub monotonic: bool,
}

impl ProgressPolicy {
    /// Pass every value through (the default).
    pub fn permissive() -> Self {
        Self::default()
    }

    /// Clamp and enforce non-decreasing progress.
    pub fn strict() -> Self {
        Self {
            clamp: true,
            monotonic: true,
        }
    }

    pub fn with_clamp(mut self, clamp: bool) -> Self {
        self.clamp = clamp;
        self
    }

    pub fn with_monotonic(mut self, monotonic: bool) -> Self {
        self.monotonic = monotonic;
        self
    }

    /// The value to store for `incoming` given the `current` progress, or `None` if the
    /// update should be dropped.
    pub fn admit(&self, current: i64, incoming: i64) -> Option<i64> {
        let value = if self.clamp {
            incoming.clamp(0, 100)
        } else {
            incoming
        };
        if self.monotonic && value < current {
            return None;
        }
        Some(value)
    }
}
