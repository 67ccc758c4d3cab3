//! Player movement and status

use std::f32::consts::TAU;

use super::state::Player;
use crate::consts::PLAYFIELD_WIDTH;

/// Minimum per-tick movement (px) that counts as walking
const WALK_THRESHOLD: f32 = 0.5;
/// Walk phase gained per pixel moved
const WALK_PHASE_PER_PX: f32 = 0.1;

impl Player {
    /// Move by `direction * speed * dt` unless impaired, then clamp to the
    /// playfield. `direction` is -1, 0 or +1.
    pub fn update(&mut self, direction: f32, speed: f32, dt: f32, now: f32) {
        if self.impaired && now >= self.impaired_until {
            self.impaired = false;
            log::debug!("Player unfrozen at {now:.2}s");
        }

        let mut x = self.rect.pos.x;
        if !self.impaired {
            x += direction * speed * dt;
        }
        self.rect.pos.x = x.clamp(0.0, PLAYFIELD_WIDTH - self.rect.size.x);

        self.advance_walk_cycle();
    }

    fn advance_walk_cycle(&mut self) {
        let moved = (self.rect.pos.x - self.prev_x).abs();
        if moved > WALK_THRESHOLD {
            self.leg_phase = (self.leg_phase + moved * WALK_PHASE_PER_PX) % TAU;
        } else {
            self.leg_phase = 0.0;
        }
        self.prev_x = self.rect.pos.x;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_moves_with_input() {
        let mut player = Player::default();
        let start = player.rect.pos.x;
        player.update(1.0, 300.0, 0.1, 0.1);
        assert!((player.rect.pos.x - (start + 30.0)).abs() < 1e-3);
        player.update(-1.0, 300.0, 0.1, 0.2);
        assert!((player.rect.pos.x - start).abs() < 1e-3);
    }

    #[test]
    fn test_impaired_player_cannot_move() {
        let mut player = Player::default();
        let start = player.rect.pos.x;
        player.impair(0.0, 2.0);
        player.update(1.0, 300.0, 1.0 / 30.0, 1.0);
        assert_eq!(player.rect.pos.x, start);
        assert!(player.impaired);
    }

    #[test]
    fn test_impairment_expires() {
        let mut player = Player::default();
        let start = player.rect.pos.x;
        player.impair(0.0, 2.0);
        player.update(1.0, 300.0, 0.1, 2.0);
        assert!(!player.impaired);
        assert!(player.rect.pos.x > start);
    }

    #[test]
    fn test_walk_phase_resets_when_still() {
        let mut player = Player::default();
        player.update(1.0, 300.0, 1.0 / 30.0, 0.0);
        assert!(player.leg_phase > 0.0);
        player.update(0.0, 300.0, 1.0 / 30.0, 0.1);
        assert_eq!(player.leg_phase, 0.0);
    }

    #[test]
    fn test_clamped_at_walls() {
        let mut player = Player::default();
        for _ in 0..200 {
            player.update(1.0, 300.0, 1.0 / 30.0, 0.0);
        }
        assert_eq!(player.rect.pos.x, PLAYFIELD_WIDTH - player.rect.size.x);
        for _ in 0..200 {
            player.update(-1.0, 300.0, 1.0 / 30.0, 0.0);
        }
        assert_eq!(player.rect.pos.x, 0.0);
    }

    proptest! {
        #[test]
        fn prop_player_stays_in_bounds(
            moves in prop::collection::vec((-1i8..=1, 0.0f32..1.0), 1..200)
        ) {
            let mut player = Player::default();
            for (dir, dt) in moves {
                player.update(dir as f32, 300.0, crate::sanitize_delta(dt), 0.0);
                prop_assert!(player.rect.pos.x >= 0.0);
                prop_assert!(player.rect.pos.x <= PLAYFIELD_WIDTH - player.rect.size.x);
                prop_assert!(player.leg_phase >= 0.0 && player.leg_phase < TAU);
            }
        }
    }
}
