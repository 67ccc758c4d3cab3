//! Gift Catch - a single-screen arcade catching game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (actors, spawning, collisions, bonus round)
//! - `platform`: Frame clock and input sources supplied by the host
//! - `game`: Owning controller wiring the session to its collaborators
//! - `persistence`: Score sinks (JSON file store, in-memory store)
//! - `tuning`: Data-driven game balance

pub mod audio;
pub mod game;
pub mod highscores;
pub mod persistence;
pub mod platform;
pub mod settings;
pub mod sim;
pub mod tuning;

pub use game::{Game, SaveStatus};
pub use highscores::{HighScores, PlayerName};
pub use settings::{QualityPreset, Settings};
pub use tuning::Tuning;

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Game configuration constants
pub mod consts {
    use glam::Vec2;

    /// Largest per-tick delta the clock will hand out (seconds)
    pub const MAX_FRAME_DELTA: f32 = 1.0 / 30.0;

    /// Playfield dimensions
    pub const PLAYFIELD_WIDTH: f32 = 800.0;
    pub const PLAYFIELD_HEIGHT: f32 = 600.0;
    /// A reward whose top edge passes this line has hit the ground
    pub const GROUND_Y: f32 = PLAYFIELD_HEIGHT - 60.0;
    /// Objects this far outside the playfield are dropped
    pub const OFFSCREEN_MARGIN: f32 = 50.0;

    /// Player defaults
    pub const PLAYER_START: Vec2 = Vec2::new(375.0, 520.0);
    pub const PLAYER_SIZE: Vec2 = Vec2::new(50.0, 60.0);

    /// Emitter defaults
    pub const EMITTER_START: Vec2 = Vec2::new(100.0, 50.0);
    pub const EMITTER_SIZE: Vec2 = Vec2::new(80.0, 60.0);
    /// How far the emitter's convoy reaches past its box on the trailing
    /// and leading side (reindeer are drawn ahead of the sleigh)
    pub const CONVOY_SHORT_EXTENT: f32 = 15.0;
    pub const CONVOY_LONG_EXTENT: f32 = 290.0;
    /// Distance from the convoy bound at which the emitter turns around
    pub const EMITTER_EDGE_MARGIN: f32 = 20.0;

    /// Falling object defaults
    pub const OBJECT_SIZE: Vec2 = Vec2::new(25.0, 25.0);
    /// Vertical offset below the emitter's top edge where objects appear
    pub const SPAWN_DROP_OFFSET: f32 = 50.0;
}

/// Axis-aligned bounding box, `pos` is the top-left corner
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub pos: Vec2,
    pub size: Vec2,
}

impl Rect {
    #[inline]
    pub const fn new(pos: Vec2, size: Vec2) -> Self {
        Self { pos, size }
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        self.pos + self.size * 0.5
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.pos.x + self.size.x
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.pos.y + self.size.y
    }

    /// Strict overlap test; boxes that only share an edge do not overlap
    #[inline]
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.pos.x < other.right()
            && self.right() > other.pos.x
            && self.pos.y < other.bottom()
            && self.bottom() > other.pos.y
    }
}

/// Clamp a per-tick delta into `[0, MAX_FRAME_DELTA]`; NaN becomes 0
#[inline]
pub fn sanitize_delta(dt: f32) -> f32 {
    if dt.is_nan() {
        return 0.0;
    }
    dt.clamp(0.0, consts::MAX_FRAME_DELTA)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rect_overlap() {
        let a = Rect::new(Vec2::new(0.0, 0.0), Vec2::new(10.0, 10.0));
        let b = Rect::new(Vec2::new(5.0, 5.0), Vec2::new(10.0, 10.0));
        let c = Rect::new(Vec2::new(10.0, 0.0), Vec2::new(10.0, 10.0));
        assert!(a.overlaps(&b));
        assert!(b.overlaps(&a));
        // Touching edges only
        assert!(!a.overlaps(&c));
    }

    #[test]
    fn test_sanitize_delta() {
        assert_eq!(sanitize_delta(-1.0), 0.0);
        assert_eq!(sanitize_delta(f32::NAN), 0.0);
        assert_eq!(sanitize_delta(5.0), consts::MAX_FRAME_DELTA);
        assert!((sanitize_delta(0.01) - 0.01).abs() < f32::EPSILON);
    }
}
