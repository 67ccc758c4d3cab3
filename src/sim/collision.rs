//! Catch resolution and the ground-loss rule
//!
//! Each object that overlaps the player applies its effect once and is
//! removed. Objects are handled in spawn order; a caught hazard ends the
//! run and stops processing for the tick.

use super::effects::{self, BurstKind};
use super::state::{FallingObject, GameEvent, GameOverCause, GameSession, ObjectKind};
use crate::consts::GROUND_Y;

/// Result of resolving catches for one tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CatchOutcome {
    Continue,
    GameOver,
}

/// Apply the effect of every object overlapping the player
pub fn resolve_catches(state: &mut GameSession) -> CatchOutcome {
    let player_box = state.player.rect;
    let mut caught: Vec<u32> = Vec::new();
    let mut outcome = CatchOutcome::Continue;

    for i in 0..state.objects.len() {
        let object = &state.objects[i];
        if !object.rect.overlaps(&player_box) {
            continue;
        }
        let (id, kind, center) = (object.id, object.kind, object.rect.center());
        caught.push(id);

        match kind {
            ObjectKind::Reward => {
                state.score += 1;
                state.events.push(GameEvent::ScoreIncreased { score: state.score });
                effects::burst(state, center, BurstKind::Sparkle);
            }
            ObjectKind::Impairer => {
                let duration = state.tuning.impair_duration;
                state.player.impair(state.now, duration);
                state.events.push(GameEvent::ImpairerHit {
                    until: state.player.impaired_until,
                });
                effects::burst(state, center, BurstKind::Frost);
                log::debug!("Player frozen for {duration:.1}s");
            }
            ObjectKind::Hazard => {
                state.events.push(GameEvent::HazardHit);
                outcome = CatchOutcome::GameOver;
                break;
            }
        }
    }

    if !caught.is_empty() {
        state.objects.retain(|o| !caught.contains(&o.id));
    }
    if outcome == CatchOutcome::GameOver {
        state.end_run(GameOverCause::Hazard);
    }
    outcome
}

/// True when a reward has fallen past the ground line. Hazards and
/// impairers never count; they fall on until they leave the playfield.
pub fn reward_landed(objects: &[FallingObject]) -> bool {
    objects
        .iter()
        .any(|o| o.kind == ObjectKind::Reward && o.rect.pos.y > GROUND_Y)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Rect;
    use crate::consts::OBJECT_SIZE;
    use crate::highscores::PlayerName;
    use crate::sim::state::GamePhase;
    use crate::tuning::Tuning;
    use glam::Vec2;

    fn playing() -> GameSession {
        let mut state = GameSession::new(7, Tuning::default());
        state.start(PlayerName::parse("Catcher").unwrap());
        state
    }

    fn drop_at(state: &mut GameSession, kind: ObjectKind, x: f32, y: f32) -> u32 {
        let id = state.next_entity_id();
        state.objects.push(FallingObject {
            id,
            kind,
            rect: Rect::new(Vec2::new(x, y), OBJECT_SIZE),
            fall_speed: 150.0,
        });
        id
    }

    #[test]
    fn test_catch_reward_scores() {
        let mut state = playing();
        state.player.rect.pos.x = 375.0;
        drop_at(&mut state, ObjectKind::Reward, 390.0, 530.0);

        assert_eq!(resolve_catches(&mut state), CatchOutcome::Continue);
        assert_eq!(state.score, 1);
        assert!(state.objects.is_empty());
        assert!(state.events.contains(&GameEvent::ScoreIncreased { score: 1 }));
    }

    #[test]
    fn test_object_counts_once() {
        let mut state = playing();
        drop_at(&mut state, ObjectKind::Reward, 390.0, 530.0);
        resolve_catches(&mut state);
        resolve_catches(&mut state);
        assert_eq!(state.score, 1);

        drop_at(&mut state, ObjectKind::Impairer, 390.0, 530.0);
        resolve_catches(&mut state);
        let until = state.player.impaired_until;
        state.now += 0.5;
        resolve_catches(&mut state);
        assert_eq!(state.player.impaired_until, until);
    }

    #[test]
    fn test_miss_leaves_object() {
        let mut state = playing();
        drop_at(&mut state, ObjectKind::Reward, 100.0, 530.0);
        resolve_catches(&mut state);
        assert_eq!(state.score, 0);
        assert_eq!(state.objects.len(), 1);
    }

    #[test]
    fn test_impairer_freezes_player() {
        let mut state = playing();
        state.now = 3.0;
        drop_at(&mut state, ObjectKind::Impairer, 390.0, 530.0);
        assert_eq!(resolve_catches(&mut state), CatchOutcome::Continue);
        assert!(state.player.impaired);
        assert_eq!(state.player.impaired_until, 3.0 + state.tuning.impair_duration);
        assert!(state.objects.is_empty());
        assert_eq!(state.phase, GamePhase::Playing);
    }

    #[test]
    fn test_hazard_short_circuits() {
        let mut state = playing();
        drop_at(&mut state, ObjectKind::Reward, 380.0, 530.0);
        drop_at(&mut state, ObjectKind::Hazard, 390.0, 530.0);
        let late_reward = drop_at(&mut state, ObjectKind::Reward, 400.0, 530.0);

        assert_eq!(resolve_catches(&mut state), CatchOutcome::GameOver);
        assert_eq!(state.phase, GamePhase::GameOver);
        // Earlier reward counted, later one untouched
        assert_eq!(state.score, 1);
        assert_eq!(state.objects.len(), 1);
        assert_eq!(state.objects[0].id, late_reward);
    }

    #[test]
    fn test_only_rewards_land() {
        let mut state = playing();
        drop_at(&mut state, ObjectKind::Hazard, 10.0, GROUND_Y + 5.0);
        drop_at(&mut state, ObjectKind::Impairer, 10.0, GROUND_Y + 5.0);
        assert!(!reward_landed(&state.objects));

        drop_at(&mut state, ObjectKind::Reward, 10.0, GROUND_Y);
        assert!(!reward_landed(&state.objects));
        drop_at(&mut state, ObjectKind::Reward, 10.0, GROUND_Y + 0.5);
        assert!(reward_landed(&state.objects));
    }
}
