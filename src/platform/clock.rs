//! Frame timing
//!
//! The host calls back once per display frame with a timestamp in
//! milliseconds. `FrameClock` turns timestamps into clamped deltas and
//! `FrameScheduler` tracks which frame request is still live, so a
//! stopped loop never runs a stray callback.

use crate::consts::MAX_FRAME_DELTA;
use crate::sanitize_delta;

/// Converts host timestamps (ms) into per-tick deltas (s)
#[derive(Debug, Clone, Default)]
pub struct FrameClock {
    last_time: Option<f64>,
}

impl FrameClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Delta since the previous frame, clamped to `[0, MAX_FRAME_DELTA]`.
    /// The first frame after a reset yields one nominal frame.
    pub fn delta(&mut self, time_ms: f64) -> f32 {
        let dt = match self.last_time {
            Some(last) => ((time_ms - last) / 1000.0) as f32,
            None => MAX_FRAME_DELTA / 2.0,
        };
        self.last_time = Some(time_ms);
        sanitize_delta(dt)
    }

    /// Forget the last timestamp (after a pause or restart)
    pub fn reset(&mut self) {
        self.last_time = None;
    }
}

/// Handle for one requested frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FrameTicket(u64);

impl FrameTicket {
    pub fn id(self) -> u64 {
        self.0
    }
}

/// Hands out frame tickets; at most one is pending at a time
#[derive(Debug, Clone, Default)]
pub struct FrameScheduler {
    next_id: u64,
    pending: Option<FrameTicket>,
}

impl FrameScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Request the next frame, replacing any pending request
    pub fn request(&mut self) -> FrameTicket {
        self.next_id += 1;
        let ticket = FrameTicket(self.next_id);
        self.pending = Some(ticket);
        ticket
    }

    /// Claim a delivered frame. Returns false for stale or cancelled
    /// tickets, which the caller must ignore.
    pub fn accept(&mut self, ticket: FrameTicket) -> bool {
        if self.pending == Some(ticket) {
            self.pending = None;
            true
        } else {
            false
        }
    }

    /// Cancel the pending request. Safe to call any number of times.
    pub fn stop(&mut self) -> bool {
        self.pending.take().is_some()
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }
}
