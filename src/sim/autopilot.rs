//! Demo bot that plays the game
//!
//! Reads the session and produces the input a reasonable player would:
//! dodge whatever dangerous is about to land on its head, otherwise chase
//! the most urgent gift, and always spin an open bonus round.

use super::bonus::BonusPhase;
use super::state::{GameSession, ObjectKind};
use super::tick::{Movement, TickInput};
use crate::consts::PLAYFIELD_WIDTH;

/// Horizontal slack around the player box when looking for danger
const DANGER_MARGIN: f32 = 20.0;
/// Only objects this close above the player's top edge are dodged
const DANGER_HEIGHT: f32 = 160.0;
/// Close enough to the target column to stop moving
const DEAD_ZONE: f32 = 4.0;

/// Choose input for the next tick
pub fn drive(state: &GameSession) -> TickInput {
    let mut input = TickInput::default();

    if state.is_suspended() {
        input.spin = state.bonus.phase == BonusPhase::Idle && !state.bonus.used_this_trigger;
        return input;
    }
    if !state.is_running() {
        return input;
    }

    let player = state.player.rect;
    let center = player.center().x;

    // Closest dangerous object overhead
    let threat = state
        .objects
        .iter()
        .filter(|o| o.kind != ObjectKind::Reward)
        .filter(|o| {
            o.rect.right() > player.pos.x - DANGER_MARGIN
                && o.rect.pos.x < player.right() + DANGER_MARGIN
                && o.rect.bottom() > player.pos.y - DANGER_HEIGHT
                && o.rect.pos.y < player.bottom()
        })
        .max_by(|a, b| {
            a.rect
                .pos
                .y
                .partial_cmp(&b.rect.pos.y)
                .unwrap_or(std::cmp::Ordering::Equal)
        });

    if let Some(threat) = threat {
        let away_left = threat.rect.center().x >= center;
        let room_left = player.pos.x > DANGER_MARGIN;
        let room_right = player.right() < PLAYFIELD_WIDTH - DANGER_MARGIN;
        input.movement = match (away_left, room_left, room_right) {
            (true, true, _) | (false, true, false) => Movement::Left,
            _ => Movement::Right,
        };
        return input;
    }

    // Lowest gift first, it lands soonest; otherwise wait under the drop point
    let target_x = state
        .objects
        .iter()
        .filter(|o| o.kind == ObjectKind::Reward)
        .max_by(|a, b| {
            a.rect
                .pos
                .y
                .partial_cmp(&b.rect.pos.y)
                .unwrap_or(std::cmp::Ordering::Equal)
        })
        .map(|o| o.rect.center().x)
        .unwrap_or_else(|| state.emitter.drop_point().x);

    input.movement = if target_x < center - DEAD_ZONE {
        Movement::Left
    } else if target_x > center + DEAD_ZONE {
        Movement::Right
    } else {
        Movement::Still
    };
    input
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Rect;
    use crate::consts::OBJECT_SIZE;
    use crate::highscores::PlayerName;
    use crate::sim::state::{FallingObject, GamePhase, Interlude};
    use crate::sim::tick::tick;
    use crate::tuning::Tuning;
    use glam::Vec2;

    fn playing() -> GameSession {
        let mut state = GameSession::new(99, Tuning::default());
        state.start(PlayerName::parse("Robot").unwrap());
        state
    }

    fn drop_at(state: &mut GameSession, kind: ObjectKind, x: f32, y: f32) {
        let id = state.next_entity_id();
        state.objects.push(FallingObject {
            id,
            kind,
            rect: Rect::new(Vec2::new(x, y), OBJECT_SIZE),
            fall_speed: 150.0,
        });
    }

    #[test]
    fn test_chases_lowest_gift() {
        let mut state = playing();
        drop_at(&mut state, ObjectKind::Reward, 700.0, 100.0);
        drop_at(&mut state, ObjectKind::Reward, 50.0, 300.0);
        assert_eq!(drive(&state).movement, Movement::Left);
    }

    #[test]
    fn test_dodges_bomb_overhead() {
        let mut state = playing();
        // Bomb slightly right of the player's center
        drop_at(&mut state, ObjectKind::Hazard, 405.0, 420.0);
        drop_at(&mut state, ObjectKind::Reward, 700.0, 300.0);
        assert_eq!(drive(&state).movement, Movement::Left);
    }

    #[test]
    fn test_dodges_away_from_wall() {
        let mut state = playing();
        state.player.rect.pos.x = 0.0;
        drop_at(&mut state, ObjectKind::Impairer, 0.0, 450.0);
        assert_eq!(drive(&state).movement, Movement::Right);
    }

    #[test]
    fn test_spins_idle_bonus() {
        let mut state = playing();
        state.bonus.try_open(20, 20);
        state.phase = GamePhase::Suspended(Interlude::Bonus);
        let input = drive(&state);
        assert!(input.spin);
        assert_eq!(input.movement, Movement::Still);

        state.bonus.spin();
        assert!(!drive(&state).spin);
    }

    #[test]
    fn test_autopilot_scores() {
        let mut state = playing();
        for _ in 0..(30.0 * 60.0) as usize {
            let input = drive(&state);
            tick(&mut state, &input, 1.0 / 60.0);
            if state.is_game_over() {
                break;
            }
        }
        assert!(state.score > 0);
    }
}
