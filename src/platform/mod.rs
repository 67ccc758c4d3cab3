//! Platform abstraction layer
//!
//! Host-facing pieces the game loop is driven by:
//! - Frame timing and cancellable frame requests
//! - Keyboard and touch input reduced to a left/right intent

pub mod clock;
pub mod input;

pub use clock::{FrameClock, FrameScheduler, FrameTicket};
pub use input::{InputSource, InputState, KeyCommand, KeyboardInput, TouchInput};
