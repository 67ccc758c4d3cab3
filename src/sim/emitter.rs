//! Emitter patrol AI
//!
//! Side-to-side movement that is deliberately hard to predict: velocity
//! eases toward a per-segment target, a small jitter term wobbles the
//! position, and segments end early when the convoy nears an edge.

use rand::Rng;

use super::state::Emitter;
use crate::consts::EMITTER_EDGE_MARGIN;
use crate::tuning::Tuning;

impl Emitter {
    /// Advance the patrol by `dt`. `elapsed` is play time, used by the
    /// jitter term. Returns true when the emitter turned around.
    pub fn update<R: Rng + ?Sized>(
        &mut self,
        dt: f32,
        elapsed: f32,
        level: u32,
        rng: &mut R,
        tuning: &Tuning,
    ) -> bool {
        let motion = &mut self.motion;
        motion.segment_elapsed += dt;
        motion.flip_cooldown = (motion.flip_cooldown - dt).max(0.0);
        motion.velocity += (motion.target_velocity - motion.velocity) * tuning.emitter_ease_rate * dt;

        let (min_x, max_x) = self.x_bounds();
        let x = self.rect.pos.x;
        let near_edge = x <= min_x + EMITTER_EDGE_MARGIN || x >= max_x - EMITTER_EDGE_MARGIN;
        let segment_over = self.motion.segment_elapsed >= self.motion.segment_duration;
        let can_flip = self.motion.flip_cooldown <= 0.0;

        let flipped = (near_edge || segment_over) && can_flip;
        if flipped {
            self.flip(level, rng, tuning);
        }

        let motion = &self.motion;
        let jitter = (elapsed * tuning.emitter_jitter_time_freq
            + motion.segment_elapsed * tuning.emitter_jitter_segment_freq)
            .sin()
            * tuning.emitter_jitter_amplitude;
        let new_x = x + motion.direction * motion.velocity * dt + jitter * dt;

        let (min_x, max_x) = self.x_bounds();
        self.rect.pos.x = new_x.clamp(min_x, max_x);

        flipped
    }

    /// Turn around and start a new segment with fresh random parameters
    fn flip<R: Rng + ?Sized>(&mut self, level: u32, rng: &mut R, tuning: &Tuning) {
        let (min_dur, max_dur) = tuning.segment_range(level);
        let (min_speed, max_speed) = tuning.emitter_speed_range(level);

        let motion = &mut self.motion;
        motion.direction = -motion.direction;
        motion.facing_left = !motion.facing_left;
        motion.segment_duration = min_dur + rng.random::<f32>() * (max_dur - min_dur);
        motion.target_velocity = min_speed + rng.random::<f32>() * (max_speed - min_speed);
        motion.segment_elapsed = 0.0;
        motion.flip_cooldown = tuning.emitter_flip_cooldown;

        log::debug!(
            "Emitter flipped: dir {}, speed {:.1}, segment {:.2}s",
            motion.direction,
            motion.target_velocity,
            motion.segment_duration
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    const DT: f32 = 1.0 / 60.0;

    #[test]
    fn test_segment_expiry_flips() {
        let tuning = Tuning::default();
        let mut rng = Pcg32::seed_from_u64(1);
        let mut emitter = Emitter::default();
        emitter.rect.pos.x = 250.0;
        emitter.motion.segment_elapsed = emitter.motion.segment_duration;

        assert!(emitter.update(DT, 0.0, 0, &mut rng, &tuning));
        assert_eq!(emitter.motion.direction, -1.0);
        assert!(emitter.motion.facing_left);
        assert_eq!(emitter.motion.segment_elapsed, 0.0);
        assert_eq!(emitter.motion.flip_cooldown, tuning.emitter_flip_cooldown);
    }

    #[test]
    fn test_cooldown_blocks_edge_reflip() {
        let tuning = Tuning::default();
        let mut rng = Pcg32::seed_from_u64(2);
        let mut emitter = Emitter::default();
        // Sitting on the right edge of the facing-right bounds
        let (_, max_x) = emitter.x_bounds();
        emitter.rect.pos.x = max_x;
        assert!(emitter.update(DT, 0.0, 0, &mut rng, &tuning));

        // Still close to an edge, but the cooldown holds
        emitter.rect.pos.x = emitter.x_bounds().0;
        assert!(!emitter.update(DT, 0.0, 0, &mut rng, &tuning));
        assert_eq!(emitter.motion.direction, -1.0);
    }

    #[test]
    fn test_new_segment_uses_level_ranges() {
        let tuning = Tuning::default();
        let mut rng = Pcg32::seed_from_u64(9);
        for level in [0, 3, 8] {
            let mut emitter = Emitter::default();
            emitter.rect.pos.x = 250.0;
            emitter.motion.segment_elapsed = 100.0;
            emitter.update(DT, 0.0, level, &mut rng, &tuning);

            let (min_dur, max_dur) = tuning.segment_range(level);
            let (min_speed, max_speed) = tuning.emitter_speed_range(level);
            let motion = &emitter.motion;
            assert!(motion.segment_duration >= min_dur && motion.segment_duration <= max_dur);
            assert!(motion.target_velocity >= min_speed && motion.target_velocity <= max_speed);
        }
    }

    #[test]
    fn test_velocity_eases_toward_target() {
        let tuning = Tuning::default();
        let mut rng = Pcg32::seed_from_u64(4);
        let mut emitter = Emitter::default();
        emitter.rect.pos.x = 250.0;
        emitter.update(DT, 0.0, 0, &mut rng, &tuning);
        let v1 = emitter.motion.velocity;
        emitter.update(DT, 0.0, 0, &mut rng, &tuning);
        let v2 = emitter.motion.velocity;
        assert!(v1 > 0.0);
        assert!(v2 > v1);
        assert!(v2 < emitter.motion.target_velocity);
    }

    proptest! {
        #[test]
        fn prop_emitter_within_bounds(seed in any::<u64>(), level in 0u32..20) {
            let tuning = Tuning::default();
            let mut rng = Pcg32::seed_from_u64(seed);
            let mut emitter = Emitter::default();
            let mut elapsed = 0.0;
            for _ in 0..600 {
                emitter.update(DT, elapsed, level, &mut rng, &tuning);
                elapsed += DT;
                let (min_x, max_x) = emitter.x_bounds();
                prop_assert!(emitter.rect.pos.x >= min_x && emitter.rect.pos.x <= max_x);
            }
        }
    }
}
