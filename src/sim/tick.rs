//! Per-frame simulation tick
//!
//! Gameplay order: player, emitter, spawner, object motion, catches,
//! ground check, difficulty, bonus trigger. While the session is
//! suspended only the clock and the interlude's own timers advance.

use serde::{Deserialize, Serialize};

use super::bonus::{BonusOutcome, BonusStep, Countdown, CountdownStep};
use super::collision::{CatchOutcome, reward_landed, resolve_catches};
use super::state::{GameEvent, GameOverCause, GamePhase, GameSession, Interlude};
use super::{difficulty, effects, motion, spawner};
use crate::sanitize_delta;

/// Horizontal intent for one tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Movement {
    Left,
    Right,
    #[default]
    Still,
}

impl Movement {
    /// Resolve held directions; holding both cancels out
    pub fn from_held(left: bool, right: bool) -> Self {
        match (left, right) {
            (true, false) => Movement::Left,
            (false, true) => Movement::Right,
            _ => Movement::Still,
        }
    }

    pub fn sign(self) -> f32 {
        match self {
            Movement::Left => -1.0,
            Movement::Right => 1.0,
            Movement::Still => 0.0,
        }
    }
}

/// Input commands for a single tick
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    pub movement: Movement,
    /// Spin the bonus reels (one-shot)
    pub spin: bool,
    /// Close an idle bonus round without spinning (one-shot)
    pub dismiss_bonus: bool,
}

/// Advance the session by `dt` seconds (clamped to the frame bound)
pub fn tick(state: &mut GameSession, input: &TickInput, dt: f32) {
    if !state.is_running() {
        return;
    }
    let dt = sanitize_delta(dt);

    state.time_ticks += 1;
    state.now += dt;
    effects::update(&mut state.particles, dt);

    if let GamePhase::Suspended(interlude) = state.phase {
        advance_interlude(state, interlude, input, dt);
        return;
    }

    let speed = state.tuning.player_speed;
    state.player.update(input.movement.sign(), speed, dt, state.now);

    state.emitter.update(
        dt,
        state.elapsed,
        state.difficulty,
        &mut state.rng,
        &state.tuning,
    );

    spawner::update(state);

    let target = state.player.rect.center();
    motion::advance(&mut state.objects, target, dt, &state.tuning);

    if resolve_catches(state) == CatchOutcome::GameOver {
        return;
    }
    if reward_landed(&state.objects) {
        state.end_run(GameOverCause::RewardLanded);
        return;
    }

    state.elapsed += dt;
    state.difficulty = difficulty::progress(state.difficulty, state.elapsed, state.tuning.level_duration);

    if let Some(tier) = state.bonus.try_open(state.score, state.tuning.bonus_tier_size) {
        log::info!("Bonus round opened at score {} (tier {})", state.score, tier);
        state.phase = GamePhase::Suspended(Interlude::Bonus);
        state.events.push(GameEvent::BonusOpened { tier });
    }
}

fn advance_interlude(state: &mut GameSession, interlude: Interlude, input: &TickInput, dt: f32) {
    match interlude {
        Interlude::Bonus => {
            if input.spin && state.bonus.spin() {
                log::debug!("Bonus reels spinning");
            }
            if input.dismiss_bonus && state.bonus.dismiss() {
                start_countdown(state);
                return;
            }

            match state.bonus.advance(dt, &mut state.rng, &state.tuning) {
                BonusStep::Nothing => {}
                BonusStep::Resolved(outcome) => {
                    if outcome == BonusOutcome::Win {
                        state.score = state.score.saturating_mul(2);
                    }
                    log::info!("Bonus round {:?}, score now {}", outcome, state.score);
                    state.events.push(GameEvent::BonusResolved {
                        outcome,
                        score: state.score,
                    });
                }
                BonusStep::Closed => start_countdown(state),
            }
        }
        Interlude::Countdown(mut countdown) => match countdown.advance(dt) {
            CountdownStep::Waiting => {
                state.phase = GamePhase::Suspended(Interlude::Countdown(countdown));
            }
            CountdownStep::Ticked(remaining) => {
                state.phase = GamePhase::Suspended(Interlude::Countdown(countdown));
                state.events.push(GameEvent::CountdownTick { remaining });
            }
            CountdownStep::Finished => {
                state.phase = GamePhase::Playing;
                state.events.push(GameEvent::Resumed);
            }
        },
    }
}

fn start_countdown(state: &mut GameSession) {
    let seconds = state.tuning.countdown_seconds;
    state.phase = GamePhase::Suspended(Interlude::Countdown(Countdown::new(seconds)));
    state.events.push(GameEvent::CountdownTick { remaining: seconds });
}
