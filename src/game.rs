//! Game controller
//!
//! Owns the session and everything around it: frame scheduling, input
//! sources, the score sink and the audio mixer. Hosts talk to the game
//! only through this type.

use crate::audio::{AudioMixer, SoundCue};
use crate::highscores::{LeaderboardEntry, NameError, PlayerName};
use crate::persistence::ScoreSink;
use crate::platform::{
    FrameClock, FrameScheduler, FrameTicket, InputSource, InputState, KeyCommand, KeyboardInput,
    TouchInput,
};
use crate::settings::Settings;
use crate::sim::{GameEvent, GameSession, RenderSnapshot, TickInput, autopilot, tick};
use crate::consts::PLAYFIELD_WIDTH;
use crate::tuning::Tuning;

/// Outcome of submitting the finished run's score
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SaveStatus {
    /// Run still going, or restarted
    #[default]
    Idle,
    /// Run over, score waiting for `flush_save`
    Pending,
    /// Zero score, nothing submitted
    Skipped,
    Saved { id: u64 },
    /// The sink refused; gameplay and restart are unaffected
    Failed(String),
}

pub struct Game<S: ScoreSink> {
    session: GameSession,
    settings: Settings,
    clock: FrameClock,
    scheduler: FrameScheduler,
    keyboard: KeyboardInput,
    touch: TouchInput,
    /// One-shot bonus commands waiting for the next tick
    pending: TickInput,
    autopilot: bool,
    sink: S,
    mixer: AudioMixer,
    cues: Vec<SoundCue>,
    /// Finished run's score, not yet handed to the sink
    unsaved: Option<u64>,
    save_status: SaveStatus,
}

impl<S: ScoreSink> Game<S> {
    pub fn new(seed: u64, tuning: Tuning, settings: Settings, sink: S) -> Self {
        let mut session = GameSession::new(seed, tuning);
        session.max_particles = settings.max_particles();
        Self {
            session,
            mixer: AudioMixer::from_settings(&settings),
            settings,
            clock: FrameClock::new(),
            scheduler: FrameScheduler::new(),
            keyboard: KeyboardInput::new(),
            touch: TouchInput::new(PLAYFIELD_WIDTH),
            pending: TickInput::default(),
            autopilot: false,
            sink,
            cues: Vec::new(),
            unsaved: None,
            save_status: SaveStatus::Idle,
        }
    }

    pub fn session(&self) -> &GameSession {
        &self.session
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn save_status(&self) -> &SaveStatus {
        &self.save_status
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn snapshot(&self) -> RenderSnapshot {
        self.session.snapshot()
    }

    /// Public board from the score sink
    pub fn leaderboard(&self, limit: usize) -> Vec<LeaderboardEntry> {
        self.sink.top(limit)
    }

    /// Let the built-in bot drive the player
    pub fn set_autopilot(&mut self, enabled: bool) {
        self.autopilot = enabled;
    }

    pub fn apply_settings(&mut self, settings: Settings) {
        self.mixer = AudioMixer::from_settings(&settings);
        self.session.max_particles = settings.max_particles();
        let cap = self.session.max_particles;
        if self.session.particles.len() > cap {
            let excess = self.session.particles.len() - cap;
            self.session.particles.drain(..excess);
        }
        self.settings = settings;
    }

    /// Volume sliders; values are clamped to 0.0 - 1.0
    pub fn set_volumes(&mut self, master: f32, sfx: f32) {
        self.mixer.set_master_volume(master);
        self.mixer.set_sfx_volume(sfx);
        self.settings.master_volume = master.clamp(0.0, 1.0);
        self.settings.sfx_volume = sfx.clamp(0.0, 1.0);
    }

    pub fn toggle_mute(&mut self) -> bool {
        let muted = self.settings.toggle_mute();
        self.mixer.set_muted(muted);
        muted
    }

    // === Session lifecycle ===

    /// Validate the name and start a run. Returns the first frame request.
    pub fn submit_name(&mut self, raw: &str) -> Result<FrameTicket, NameError> {
        let name = PlayerName::parse(raw)?;
        self.scheduler.stop();
        self.flush_save();
        self.session.start(name);
        Ok(self.begin_loop())
    }

    /// Throw the current run away and start a fresh one for the same
    /// player. Without a player the game returns to the name prompt and no
    /// frame is requested.
    pub fn restart(&mut self) -> Option<FrameTicket> {
        self.scheduler.stop();
        self.flush_save();
        self.session.restart();
        if self.session.is_running() {
            log::info!("Restarting run");
            Some(self.begin_loop())
        } else {
            self.save_status = SaveStatus::Idle;
            None
        }
    }

    /// Stop the frame loop. Safe to call any number of times.
    pub fn stop(&mut self) {
        if self.scheduler.stop() {
            log::debug!("Frame loop stopped");
        }
    }

    /// True while a frame request is outstanding
    pub fn is_looping(&self) -> bool {
        self.scheduler.is_pending()
    }

    fn begin_loop(&mut self) -> FrameTicket {
        self.save_status = SaveStatus::Idle;
        self.pending = TickInput::default();
        self.cues.clear();
        self.clock.reset();
        self.scheduler.request()
    }

    // === Frame loop ===

    /// Run one frame. Stale or cancelled tickets are ignored. Returns the
    /// next frame request, or None once the loop has stopped.
    ///
    /// Frames never touch the score sink. The frame that ends the run
    /// only queues the score; call `flush_save` once the loop is over.
    pub fn frame(&mut self, ticket: FrameTicket, time_ms: f64) -> Option<FrameTicket> {
        if !self.scheduler.accept(ticket) {
            log::trace!("Ignoring stale frame ticket {}", ticket.id());
            return None;
        }
        let dt = self.clock.delta(time_ms);

        let input = if self.autopilot {
            autopilot::drive(&self.session)
        } else {
            let held = self.held();
            TickInput {
                movement: held.movement(),
                ..std::mem::take(&mut self.pending)
            }
        };
        tick(&mut self.session, &input, dt);

        let events = self.session.drain_events();
        self.cues.extend(self.mixer.cues(&events));
        let final_score = events.iter().find_map(|event| match event {
            GameEvent::GameOver { score, .. } => Some(*score),
            _ => None,
        });

        if self.session.is_running() {
            return Some(self.scheduler.request());
        }
        self.stop();
        if let Some(score) = final_score {
            self.queue_score(score);
        }
        None
    }

    /// Sound cues raised since the last call
    pub fn take_cues(&mut self) -> Vec<SoundCue> {
        std::mem::take(&mut self.cues)
    }

    fn queue_score(&mut self, score: u64) {
        if score == 0 || self.session.player_name.is_none() {
            self.save_status = SaveStatus::Skipped;
            return;
        }
        self.unsaved = Some(score);
        self.save_status = SaveStatus::Pending;
    }

    /// Hand a finished run's score to the sink. No-op when nothing is
    /// queued, so hosts may call it after every loop.
    pub fn flush_save(&mut self) -> &SaveStatus {
        let Some(score) = self.unsaved.take() else {
            return &self.save_status;
        };
        let Some(name) = self.session.player_name.as_ref() else {
            self.save_status = SaveStatus::Skipped;
            return &self.save_status;
        };
        self.save_status = match self.sink.submit(name.as_str(), score) {
            Ok(record) => SaveStatus::Saved { id: record.id },
            Err(e) => {
                log::warn!("Could not save score {score} for {name}: {e}");
                SaveStatus::Failed(e.to_string())
            }
        };
        &self.save_status
    }

    // === Input ===

    fn held(&self) -> InputState {
        let keys = self.keyboard.state();
        let touch = self.touch.state();
        InputState {
            left: keys.left || touch.left,
            right: keys.right || touch.right,
        }
    }

    /// Key press by `KeyboardEvent.code`. Returns a frame request when the
    /// press restarted the game.
    pub fn key_down(&mut self, code: &str) -> Option<FrameTicket> {
        match self.keyboard.key_down(code) {
            Some(KeyCommand::Restart) if self.session.is_game_over() => self.restart(),
            _ => None,
        }
    }

    pub fn key_up(&mut self, code: &str) {
        self.keyboard.key_up(code);
    }

    /// Window lost focus
    pub fn blur(&mut self) {
        self.keyboard.release_all();
        self.touch.release();
    }

    pub fn touch_at(&mut self, x: f32) {
        self.touch.touch_at(x);
    }

    pub fn touch_end(&mut self) {
        self.touch.release();
    }

    pub fn resize(&mut self, surface_width: f32) {
        self.touch.resize(surface_width);
    }

    /// Spin button on the bonus round
    pub fn request_spin(&mut self) {
        self.pending.spin = true;
    }

    /// Close button on an unspun bonus round
    pub fn dismiss_bonus(&mut self) {
        self.pending.dismiss_bonus = true;
    }
}
