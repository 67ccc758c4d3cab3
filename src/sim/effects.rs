//! Cosmetic particle bursts
//!
//! Purely visual feedback. Spread comes from a hash of the tick counter so
//! the gameplay RNG is never touched.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::state::GameSession;

/// Particle cap used until the host applies its settings
pub const DEFAULT_MAX_PARTICLES: usize = 500;

const BURST_COUNT: u32 = 12;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BurstKind {
    /// Gift caught
    Sparkle,
    /// Snowball hit
    Frost,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    pub kind: BurstKind,
    /// 1.0 at birth, removed at 0
    pub life: f32,
    pub size: f32,
}

/// Emit a burst centered on `at`, evicting the oldest particles at the cap
pub fn burst(state: &mut GameSession, at: Vec2, kind: BurstKind) {
    if state.max_particles == 0 {
        return;
    }
    let seed = state.time_ticks as u32;
    for i in 0..BURST_COUNT {
        if state.particles.len() >= state.max_particles {
            state.particles.remove(0);
        }
        let hash = seed.wrapping_mul(2654435761).wrapping_add(i * 7919);
        let spread = (hash % 1000) as f32 / 1000.0;
        let speed_roll = ((hash >> 10) % 1000) as f32 / 1000.0;

        let angle = (i as f32 / BURST_COUNT as f32 + spread * 0.1) * std::f32::consts::TAU;
        let speed = match kind {
            BurstKind::Sparkle => 80.0 + speed_roll * 120.0,
            BurstKind::Frost => 40.0 + speed_roll * 60.0,
        };
        state.particles.push(Particle {
            pos: at,
            vel: Vec2::new(angle.cos(), angle.sin()) * speed,
            kind,
            life: 1.0,
            size: 2.0 + speed_roll * 3.0,
        });
    }
}

/// Move, slow and fade particles; drop dead ones
pub fn update(particles: &mut Vec<Particle>, dt: f32) {
    for particle in particles.iter_mut() {
        particle.pos += particle.vel * dt;
        particle.vel *= 0.98;
        particle.life -= dt * 1.5;
    }
    particles.retain(|p| p.life > 0.0);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tuning::Tuning;

    #[test]
    fn test_burst_respects_cap() {
        let mut state = GameSession::new(1, Tuning::default());
        state.max_particles = 5;
        burst(&mut state, Vec2::ZERO, BurstKind::Sparkle);
        assert_eq!(state.particles.len(), 5);

        state.max_particles = 0;
        state.particles.clear();
        burst(&mut state, Vec2::ZERO, BurstKind::Frost);
        assert!(state.particles.is_empty());
    }

    #[test]
    fn test_burst_does_not_touch_rng() {
        let mut a = GameSession::new(1, Tuning::default());
        let mut b = GameSession::new(1, Tuning::default());
        burst(&mut a, Vec2::ZERO, BurstKind::Sparkle);
        use rand::Rng;
        assert_eq!(a.rng.random::<u32>(), b.rng.random::<u32>());
    }

    #[test]
    fn test_particles_fade_out() {
        let mut state = GameSession::new(1, Tuning::default());
        burst(&mut state, Vec2::new(100.0, 100.0), BurstKind::Sparkle);
        let mut particles = state.particles.clone();
        for _ in 0..60 {
            update(&mut particles, 1.0 / 30.0);
        }
        assert!(particles.is_empty());
    }
}
