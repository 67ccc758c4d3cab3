//! Object spawning
//!
//! Drops are randomized-periodic: each gap is the level's base interval
//! scaled by a random factor, so there is no rhythm to learn.

use glam::Vec2;
use rand::Rng;

use super::state::{FallingObject, GameSession, ObjectKind};
use crate::Rect;
use crate::consts::OBJECT_SIZE;
use crate::tuning::Tuning;

/// Pick a variant from a uniform roll in `[0, 1)`
pub fn pick_kind(roll: f32, hazard_chance: f32, impairer_chance: f32) -> ObjectKind {
    if roll < hazard_chance {
        ObjectKind::Hazard
    } else if roll < hazard_chance + impairer_chance {
        ObjectKind::Impairer
    } else {
        ObjectKind::Reward
    }
}

/// Play time until the next drop, jitter included
fn next_gap<R: Rng + ?Sized>(rng: &mut R, level: u32, tuning: &Tuning) -> f32 {
    let jitter =
        tuning.spawn_jitter_min + rng.random::<f32>() * (tuning.spawn_jitter_max - tuning.spawn_jitter_min);
    tuning.spawn_interval(level) * jitter
}

/// Drop a new object if one is due. Returns the new object's id.
pub fn update(state: &mut GameSession) -> Option<u32> {
    let level = state.difficulty;
    let now = state.elapsed;

    let due_at = match state.next_spawn_at {
        Some(at) => at,
        None => {
            let at = now + next_gap(&mut state.rng, level, &state.tuning);
            state.next_spawn_at = Some(at);
            at
        }
    };
    if now < due_at {
        return None;
    }

    let tuning = &state.tuning;
    let roll = state.rng.random::<f32>();
    let kind = pick_kind(roll, tuning.hazard_chance(level), tuning.impairer_chance(level));

    let scatter = (state.rng.random::<f32>() - 0.5) * tuning.spawn_offset_range(level);
    let drop = state.emitter.drop_point();
    let fall_speed = tuning.fall_speed(level);
    let gap = next_gap(&mut state.rng, level, &state.tuning);

    let id = state.next_entity_id();
    state.objects.push(FallingObject {
        id,
        kind,
        rect: Rect::new(Vec2::new(drop.x + scatter, drop.y), OBJECT_SIZE),
        fall_speed,
    });
    state.next_spawn_at = Some(now + gap);

    log::debug!("Spawned {:?} #{} at x={:.1}", kind, id, drop.x + scatter);
    Some(id)
}
