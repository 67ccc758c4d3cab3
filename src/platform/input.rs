//! Input sources
//!
//! Keyboard and touch are both reduced to "is left held, is right held".
//! Holding both cancels out.

use crate::sim::Movement;

/// Current left/right intent
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InputState {
    pub left: bool,
    pub right: bool,
}

impl InputState {
    pub fn movement(self) -> Movement {
        Movement::from_held(self.left, self.right)
    }
}

/// Anything that can be polled for the current intent
pub trait InputSource {
    fn state(&self) -> InputState;
}

/// Commands raised by a key press, beyond movement
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyCommand {
    /// Start a new run (only honoured on the game-over screen)
    Restart,
}

/// Key-down/key-up tracking by `KeyboardEvent.code`
#[derive(Debug, Clone, Default)]
pub struct KeyboardInput {
    state: InputState,
}

impl KeyboardInput {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn key_down(&mut self, code: &str) -> Option<KeyCommand> {
        match code {
            "KeyA" | "ArrowLeft" => self.state.left = true,
            "KeyD" | "ArrowRight" => self.state.right = true,
            "Space" | "KeyR" => return Some(KeyCommand::Restart),
            _ => {}
        }
        None
    }

    pub fn key_up(&mut self, code: &str) {
        match code {
            "KeyA" | "ArrowLeft" => self.state.left = false,
            "KeyD" | "ArrowRight" => self.state.right = false,
            _ => {}
        }
    }

    /// Drop held keys (focus lost)
    pub fn release_all(&mut self) {
        self.state = InputState::default();
    }
}

impl InputSource for KeyboardInput {
    fn state(&self) -> InputState {
        self.state
    }
}

/// Touch zones: left half of the surface steers left, right half right
#[derive(Debug, Clone)]
pub struct TouchInput {
    surface_width: f32,
    pointer_x: Option<f32>,
}

impl TouchInput {
    pub fn new(surface_width: f32) -> Self {
        Self {
            surface_width,
            pointer_x: None,
        }
    }

    pub fn resize(&mut self, surface_width: f32) {
        self.surface_width = surface_width;
    }

    /// Touch start and touch move
    pub fn touch_at(&mut self, x: f32) {
        self.pointer_x = Some(x);
    }

    pub fn release(&mut self) {
        self.pointer_x = None;
    }
}

impl InputSource for TouchInput {
    fn state(&self) -> InputState {
        match self.pointer_x {
            Some(x) if x < self.surface_width / 2.0 => InputState {
                left: true,
                right: false,
            },
            Some(_) => InputState {
                left: false,
                right: true,
            },
            None => InputState::default(),
        }
    }
}
