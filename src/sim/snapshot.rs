//! Read-only view of a session for renderers
//!
//! Built once per frame and handed to the presentation layer. Nothing in
//! here feeds back into the simulation.

use serde::Serialize;

use super::bonus::{BonusOutcome, BonusPhase, ReelSymbol};
use super::effects::Particle;
use super::state::{GamePhase, GameSession, Interlude, ObjectKind};
use crate::Rect;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum PhaseView {
    AwaitingName,
    Playing,
    Bonus,
    Countdown,
    GameOver,
}

#[derive(Debug, Clone, Serialize)]
pub struct PlayerView {
    pub rect: Rect,
    pub impaired: bool,
    pub leg_phase: f32,
}

#[derive(Debug, Clone, Serialize)]
pub struct EmitterView {
    pub rect: Rect,
    pub facing_left: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct ObjectView {
    pub id: u32,
    pub kind: ObjectKind,
    pub rect: Rect,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum BonusStage {
    Idle,
    Spinning,
    Resolved(BonusOutcome),
}

#[derive(Debug, Clone, Serialize)]
pub struct BonusView {
    pub stage: BonusStage,
    pub reels: [ReelSymbol; 3],
    pub can_spin: bool,
}

/// Everything a renderer needs for one frame
#[derive(Debug, Clone, Serialize)]
pub struct RenderSnapshot {
    pub phase: PhaseView,
    pub player_name: Option<String>,
    pub score: u64,
    /// Displayed level, 1-based
    pub level: u32,
    pub player: PlayerView,
    pub emitter: EmitterView,
    pub objects: Vec<ObjectView>,
    pub bonus: Option<BonusView>,
    pub countdown: Option<u32>,
    pub particles: Vec<Particle>,
}

impl RenderSnapshot {
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

impl GameSession {
    pub fn snapshot(&self) -> RenderSnapshot {
        let phase = match self.phase {
            GamePhase::AwaitingName => PhaseView::AwaitingName,
            GamePhase::Playing => PhaseView::Playing,
            GamePhase::Suspended(Interlude::Bonus) => PhaseView::Bonus,
            GamePhase::Suspended(Interlude::Countdown(_)) => PhaseView::Countdown,
            GamePhase::GameOver => PhaseView::GameOver,
        };

        let stage = match self.bonus.phase {
            BonusPhase::Closed => None,
            BonusPhase::Idle => Some(BonusStage::Idle),
            BonusPhase::Spinning { .. } => Some(BonusStage::Spinning),
            BonusPhase::Resolved { outcome, .. } => Some(BonusStage::Resolved(outcome)),
        };
        let bonus = stage.map(|stage| BonusView {
            stage,
            reels: self.bonus.reels,
            can_spin: stage == BonusStage::Idle && !self.bonus.used_this_trigger,
        });

        RenderSnapshot {
            phase,
            player_name: self.player_name.as_ref().map(|n| n.as_str().to_string()),
            score: self.score,
            level: self.difficulty + 1,
            player: PlayerView {
                rect: self.player.rect,
                impaired: self.player.impaired,
                leg_phase: self.player.leg_phase,
            },
            emitter: EmitterView {
                rect: self.emitter.rect,
                facing_left: self.emitter.motion.facing_left,
            },
            objects: self
                .objects
                .iter()
                .map(|o| ObjectView {
                    id: o.id,
                    kind: o.kind,
                    rect: o.rect,
                })
                .collect(),
            bonus,
            countdown: self.countdown().map(|c| c.remaining),
            particles: self.particles.clone(),
        }
    }
}
