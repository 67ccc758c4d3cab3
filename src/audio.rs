//! Sound cues for game events
//!
//! The core never plays audio itself. `AudioMixer` maps drained
//! `GameEvent`s to cues with a final volume and the host plays them.

use serde::Serialize;

use crate::settings::Settings;
use crate::sim::{BonusOutcome, GameEvent, GameOverCause};

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SoundEffect {
    /// Gift caught
    Success,
    /// Bomb, snowball or a gift hitting the ground
    Hit,
    /// Bonus round opened
    BonusChime,
    /// Bonus round won
    Laugh,
    /// One countdown step
    Tick,
}

impl SoundEffect {
    /// Base level before master and effect volume
    pub fn base_volume(self) -> f32 {
        match self {
            SoundEffect::Success => 0.6,
            SoundEffect::Hit => 0.3,
            SoundEffect::BonusChime => 0.5,
            SoundEffect::Laugh => 0.7,
            SoundEffect::Tick => 0.25,
        }
    }
}

/// A sound the host should play now
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SoundCue {
    pub effect: SoundEffect,
    pub volume: f32,
}

/// Turns game events into sound cues
#[derive(Debug, Clone)]
pub struct AudioMixer {
    master_volume: f32,
    sfx_volume: f32,
    music_volume: f32,
    muted: bool,
}

impl Default for AudioMixer {
    fn default() -> Self {
        Self::from_settings(&Settings::default())
    }
}

impl AudioMixer {
    pub fn from_settings(settings: &Settings) -> Self {
        Self {
            master_volume: settings.master_volume.clamp(0.0, 1.0),
            sfx_volume: settings.sfx_volume.clamp(0.0, 1.0),
            music_volume: settings.music_volume.clamp(0.0, 1.0),
            muted: settings.muted,
        }
    }

    /// Set master volume (0.0 - 1.0)
    pub fn set_master_volume(&mut self, vol: f32) {
        self.master_volume = vol.clamp(0.0, 1.0);
    }

    /// Set SFX volume (0.0 - 1.0)
    pub fn set_sfx_volume(&mut self, vol: f32) {
        self.sfx_volume = vol.clamp(0.0, 1.0);
    }

    /// Mute/unmute all audio
    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }

    pub fn is_muted(&self) -> bool {
        self.muted
    }

    /// Volume for the background music loop
    pub fn music_volume(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            self.master_volume * self.music_volume
        }
    }

    fn effective_volume(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            self.master_volume * self.sfx_volume
        }
    }

    /// Effect for one event, if it makes a sound
    pub fn effect_for(event: &GameEvent) -> Option<SoundEffect> {
        match event {
            GameEvent::ScoreIncreased { .. } => Some(SoundEffect::Success),
            GameEvent::HazardHit | GameEvent::ImpairerHit { .. } => Some(SoundEffect::Hit),
            // A caught bomb already sounded through HazardHit
            GameEvent::GameOver {
                cause: GameOverCause::RewardLanded,
                ..
            } => Some(SoundEffect::Hit),
            GameEvent::GameOver { .. } => None,
            GameEvent::BonusOpened { .. } => Some(SoundEffect::BonusChime),
            GameEvent::BonusResolved {
                outcome: BonusOutcome::Win,
                ..
            } => Some(SoundEffect::Laugh),
            GameEvent::BonusResolved { .. } => None,
            GameEvent::CountdownTick { .. } => Some(SoundEffect::Tick),
            GameEvent::Resumed => None,
        }
    }

    /// Cues for a batch of events, in order. Empty when muted.
    pub fn cues(&self, events: &[GameEvent]) -> Vec<SoundCue> {
        let vol = self.effective_volume();
        if vol <= 0.0 {
            return Vec::new();
        }
        events
            .iter()
            .filter_map(Self::effect_for)
            .map(|effect| SoundCue {
                effect,
                volume: effect.base_volume() * vol,
            })
            .collect()
    }
}
