//! Prompter Runtime - Controller orchestration and the control tick
//!
//! Each tick runs the same fixed sequence:
//! 1. Drain queued events in arrival order (a presence frame keeps only the
//!    latest one, queued where it arrived)
//! 2. Translate each event into directive stack mutations
//! 3. Expose the active directive to the renderer
//!
//! Producers on other threads only ever touch `EventQueue` handles; the
//! stack is mutated from the tick alone.

pub mod config;
pub mod controller;
pub mod error;
pub mod event;
pub mod media;
pub mod queue;

pub use config::*;
pub use controller::*;
pub use error::*;
pub use event::*;
pub use media::*;
pub use queue::*;
