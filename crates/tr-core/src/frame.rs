//! Frame counter.
//!
//! The dispatcher runs every registered category exactly once per `Frame`.
//! Frames carry no wall-clock meaning; the host decides how often to call
//! `run_frame`.

use std::fmt;

// ── Frame ─────────────────────────────────────────────────────────────────────

/// A monotonically increasing frame counter.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
pub struct Frame(pub u64);

impl Frame {
    pub const ZERO: Frame = Frame(0);

    /// Return the frame `n` steps after `self`.
    #[inline]
    pub fn offset(self, n: u64) -> Frame {
        Frame(self.0 + n)
    }

    /// `true` if this frame falls on a multiple of `interval`.  An interval of
    /// zero never matches.
    #[inline]
    pub fn is_on_interval(self, interval: u64) -> bool {
        interval > 0 && self.0.is_multiple_of(interval)
    }
}

impl fmt::Display for Frame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "F{}", self.0)
    }
}

// ── FrameClock ────────────────────────────────────────────────────────────────

/// Tracks the frame the dispatcher is about to run.
#[derive(Clone, Debug, Default)]
pub struct FrameClock {
    pub current: Frame,
}

impl FrameClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Advance the clock by one frame.
    #[inline]
    pub fn advance(&mut self) {
        self.current = self.current.offset(1);
    }
}
