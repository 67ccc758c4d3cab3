//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Variable delta, clamped by the caller-facing tick
//! - Seeded RNG only
//! - Stable iteration order (spawn order)
//! - No rendering or platform dependencies

pub mod autopilot;
pub mod bonus;
pub mod collision;
pub mod difficulty;
pub mod effects;
pub mod emitter;
pub mod motion;
pub mod player;
pub mod snapshot;
pub mod spawner;
pub mod state;
pub mod tick;

pub use bonus::{BonusOutcome, BonusPhase, BonusRound, Countdown, ReelSymbol};
pub use collision::{CatchOutcome, resolve_catches, reward_landed};
pub use effects::{BurstKind, Particle};
pub use snapshot::RenderSnapshot;
pub use state::{
    Emitter, FallingObject, GameEvent, GameOverCause, GamePhase, GameSession, Interlude,
    MotionState, ObjectKind, Player,
};
pub use tick::{Movement, TickInput, tick};
