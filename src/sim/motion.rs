//! Falling object motion
//!
//! Rewards and hazards drop straight down. Impairers steer toward the
//! player with a reduced homing component blended into a dominant fall,
//! so they bias toward the player but can still be dodged.

use glam::Vec2;

use super::state::{FallingObject, ObjectKind};
use crate::Rect;
use crate::consts::{OFFSCREEN_MARGIN, PLAYFIELD_HEIGHT, PLAYFIELD_WIDTH};
use crate::tuning::Tuning;

impl FallingObject {
    /// Advance one tick toward `target` (the player's center)
    pub fn step(&mut self, target: Vec2, dt: f32, tuning: &Tuning) {
        match self.kind {
            ObjectKind::Reward | ObjectKind::Hazard => {
                self.rect.pos.y += self.fall_speed * dt;
            }
            ObjectKind::Impairer => {
                let to_target = (target - self.rect.center()).normalize_or_zero();
                let homing = to_target * self.fall_speed * tuning.homing_fraction;
                let fall = Vec2::Y * self.fall_speed * tuning.homing_fall_fraction;
                self.rect.pos += (homing + fall) * dt;
            }
        }
    }
}

/// Outside the playfield plus margin on the bottom or either side
pub fn is_offscreen(rect: &Rect) -> bool {
    rect.pos.y > PLAYFIELD_HEIGHT + OFFSCREEN_MARGIN
        || rect.pos.x < -OFFSCREEN_MARGIN
        || rect.pos.x > PLAYFIELD_WIDTH + OFFSCREEN_MARGIN
}

/// Move every object, then drop the ones that left the playfield.
/// Spawn order is preserved.
pub fn advance(objects: &mut Vec<FallingObject>, target: Vec2, dt: f32, tuning: &Tuning) {
    for object in objects.iter_mut() {
        object.step(target, dt, tuning);
    }
    objects.retain(|o| !is_offscreen(&o.rect));
}
