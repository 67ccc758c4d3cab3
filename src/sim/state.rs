//! Game state and core simulation types
//!
//! One `GameSession` owns everything that changes during a run: actors,
//! falling objects, the bonus round and the RNG. Nothing here is shared
//! between sessions.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::bonus::{BonusOutcome, BonusRound, Countdown};
use super::effects::Particle;
use crate::consts::*;
use crate::highscores::PlayerName;
use crate::tuning::Tuning;
use crate::Rect;

/// Top-level session state
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Waiting for the player to enter a name
    AwaitingName,
    /// Active gameplay
    Playing,
    /// Gameplay frozen while an interlude runs; only the clock advances
    Suspended(Interlude),
    /// Run ended, state is frozen
    GameOver,
}

/// What is holding gameplay while the session is suspended
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Interlude {
    /// Bonus round is open (idle, spinning or showing its result)
    Bonus,
    /// Bonus round closed, counting down before play resumes
    Countdown(Countdown),
}

/// Falling object variants
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ObjectKind {
    /// Gift: +1 when caught, ends the run if it lands
    Reward,
    /// Bomb: ends the run when caught
    Hazard,
    /// Snowball: homes in and freezes the player when caught
    Impairer,
}

/// A falling object entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FallingObject {
    pub id: u32,
    pub kind: ObjectKind,
    pub rect: Rect,
    /// Assigned at spawn, fixed for the object's lifetime
    pub fall_speed: f32,
}

/// The player-controlled catcher
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub rect: Rect,
    /// Movement disabled until `impaired_until` (session clock)
    pub impaired: bool,
    pub impaired_until: f32,
    /// Walk cycle in `[0, 2pi)`, 0 while standing
    pub leg_phase: f32,
    pub(crate) prev_x: f32,
}

impl Default for Player {
    fn default() -> Self {
        Self {
            rect: Rect::new(PLAYER_START, PLAYER_SIZE),
            impaired: false,
            impaired_until: 0.0,
            leg_phase: 0.0,
            prev_x: PLAYER_START.x,
        }
    }
}

impl Player {
    /// Disable movement until `now + duration`; a second hit extends it
    pub fn impair(&mut self, now: f32, duration: f32) {
        self.impaired = true;
        self.impaired_until = now + duration;
    }
}

/// Emitter patrol state. One segment is a stretch of constant target
/// velocity and direction between two flips.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MotionState {
    /// -1.0 (left) or +1.0 (right)
    pub direction: f32,
    pub velocity: f32,
    pub target_velocity: f32,
    pub segment_elapsed: f32,
    pub segment_duration: f32,
    pub flip_cooldown: f32,
    pub facing_left: bool,
}

impl Default for MotionState {
    fn default() -> Self {
        Self {
            direction: 1.0,
            velocity: 0.0,
            target_velocity: 100.0,
            segment_elapsed: 0.0,
            segment_duration: 1.5,
            flip_cooldown: 0.0,
            facing_left: false,
        }
    }
}

/// The object-dropping actor
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Emitter {
    pub rect: Rect,
    pub motion: MotionState,
}

impl Default for Emitter {
    fn default() -> Self {
        Self {
            rect: Rect::new(EMITTER_START, EMITTER_SIZE),
            motion: MotionState::default(),
        }
    }
}

impl Emitter {
    /// Allowed range for `rect.pos.x`. The convoy trails further on the
    /// side the emitter is heading away from.
    pub fn x_bounds(&self) -> (f32, f32) {
        let (left, right) = if self.motion.facing_left {
            (CONVOY_LONG_EXTENT, CONVOY_SHORT_EXTENT)
        } else {
            (CONVOY_SHORT_EXTENT, CONVOY_LONG_EXTENT)
        };
        (left, PLAYFIELD_WIDTH - right)
    }

    /// Point new objects are dropped from (before scatter)
    pub fn drop_point(&self) -> Vec2 {
        Vec2::new(
            self.rect.pos.x + self.rect.size.x / 2.0,
            self.rect.pos.y + SPAWN_DROP_OFFSET,
        )
    }
}

/// Why a run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameOverCause {
    /// A hazard was caught
    Hazard,
    /// A reward reached the ground
    RewardLanded,
}

/// Discrete events for collaborators (audio, persistence, UI)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    ScoreIncreased { score: u64 },
    HazardHit,
    ImpairerHit { until: f32 },
    GameOver { score: u64, cause: GameOverCause },
    BonusOpened { tier: u64 },
    BonusResolved { outcome: BonusOutcome, score: u64 },
    CountdownTick { remaining: u32 },
    Resumed,
}

/// Complete session state (deterministic for a given seed and input stream)
#[derive(Debug, Clone)]
pub struct GameSession {
    /// Run seed for reproducibility
    pub seed: u64,
    pub tuning: Tuning,
    pub phase: GamePhase,
    pub player_name: Option<PlayerName>,
    pub score: u64,
    /// Session clock (seconds); keeps running while suspended
    pub now: f32,
    /// Play time (seconds); frozen while suspended
    pub elapsed: f32,
    /// Monotonic difficulty level
    pub difficulty: u32,
    /// Play time at which the next object drops (unscheduled at start)
    pub next_spawn_at: Option<f32>,
    /// Simulation tick counter
    pub time_ticks: u64,
    pub player: Player,
    pub emitter: Emitter,
    /// Active objects in spawn order
    pub objects: Vec<FallingObject>,
    pub bonus: BonusRound,
    /// Visual particles (not gameplay-affecting)
    pub particles: Vec<Particle>,
    pub max_particles: usize,
    /// Events raised since the last drain
    pub events: Vec<GameEvent>,
    pub(crate) rng: Pcg32,
    next_id: u32,
}

impl GameSession {
    /// Create a session waiting for a player name
    pub fn new(seed: u64, tuning: Tuning) -> Self {
        Self {
            seed,
            tuning,
            phase: GamePhase::AwaitingName,
            player_name: None,
            score: 0,
            now: 0.0,
            elapsed: 0.0,
            difficulty: 0,
            next_spawn_at: None,
            time_ticks: 0,
            player: Player::default(),
            emitter: Emitter::default(),
            objects: Vec::new(),
            bonus: BonusRound::default(),
            particles: Vec::new(),
            max_particles: super::effects::DEFAULT_MAX_PARTICLES,
            events: Vec::new(),
            rng: Pcg32::seed_from_u64(seed),
            next_id: 1,
        }
    }

    /// Begin a run for `name` with fresh state
    pub fn start(&mut self, name: PlayerName) {
        log::info!("Starting run for {} (seed {})", name, self.seed);
        self.player_name = Some(name);
        self.reset_world();
        self.phase = GamePhase::Playing;
    }

    /// Throw away the current run and start over with the same seed.
    /// Without a player name the session goes back to the name prompt.
    pub fn restart(&mut self) {
        self.reset_world();
        self.phase = if self.player_name.is_some() {
            GamePhase::Playing
        } else {
            GamePhase::AwaitingName
        };
    }

    /// Restart with a different seed
    pub fn restart_with_seed(&mut self, seed: u64) {
        self.seed = seed;
        self.restart();
    }

    fn reset_world(&mut self) {
        self.score = 0;
        self.now = 0.0;
        self.elapsed = 0.0;
        self.difficulty = 0;
        self.next_spawn_at = None;
        self.time_ticks = 0;
        self.player = Player::default();
        self.emitter = Emitter::default();
        self.objects.clear();
        self.bonus = BonusRound::default();
        self.particles.clear();
        self.events.clear();
        self.rng = Pcg32::seed_from_u64(self.seed);
        self.next_id = 1;
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// True while a run is in progress (playing or suspended)
    pub fn is_running(&self) -> bool {
        matches!(self.phase, GamePhase::Playing | GamePhase::Suspended(_))
    }

    pub fn is_suspended(&self) -> bool {
        matches!(self.phase, GamePhase::Suspended(_))
    }

    pub fn is_game_over(&self) -> bool {
        self.phase == GamePhase::GameOver
    }

    /// Active countdown, if any
    pub fn countdown(&self) -> Option<Countdown> {
        match self.phase {
            GamePhase::Suspended(Interlude::Countdown(countdown)) => Some(countdown),
            _ => None,
        }
    }

    /// Take all events raised since the last call
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// End the run. Further ticks are no-ops until restart.
    pub fn end_run(&mut self, cause: GameOverCause) {
        if self.phase == GamePhase::GameOver {
            return;
        }
        log::info!("Game over ({:?}) with score {}", cause, self.score);
        self.phase = GamePhase::GameOver;
        self.events.push(GameEvent::GameOver {
            score: self.score,
            cause,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn name() -> PlayerName {
        PlayerName::parse("Tester").unwrap()
    }

    #[test]
    fn test_new_session_awaits_name() {
        let session = GameSession::new(1, Tuning::default());
        assert_eq!(session.phase, GamePhase::AwaitingName);
        assert!(!session.is_running());
    }

    #[test]
    fn test_start_enters_playing() {
        let mut session = GameSession::new(1, Tuning::default());
        session.start(name());
        assert_eq!(session.phase, GamePhase::Playing);
        assert_eq!(session.player.rect.pos, PLAYER_START);
        assert_eq!(session.emitter.rect.pos, EMITTER_START);
    }

    #[test]
    fn test_entity_ids_are_unique() {
        let mut session = GameSession::new(1, Tuning::default());
        let a = session.next_entity_id();
        let b = session.next_entity_id();
        assert_ne!(a, b);
    }

    #[test]
    fn test_end_run_emits_once() {
        let mut session = GameSession::new(1, Tuning::default());
        session.start(name());
        session.end_run(GameOverCause::Hazard);
        session.end_run(GameOverCause::RewardLanded);
        let overs = session
            .drain_events()
            .into_iter()
            .filter(|e| matches!(e, GameEvent::GameOver { .. }))
            .count();
        assert_eq!(overs, 1);
    }

    #[test]
    fn test_emitter_bounds_follow_facing() {
        let mut emitter = Emitter::default();
        assert_eq!(emitter.x_bounds(), (15.0, 510.0));
        emitter.motion.facing_left = true;
        assert_eq!(emitter.x_bounds(), (290.0, 785.0));
    }
}
