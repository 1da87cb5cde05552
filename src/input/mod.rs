//! Input handling with gamepad support
//!
//! Provides an action-based input system that works with both keyboard
//! and gamepad controllers.
//!
//! Native: Uses gilrs crate for cross-platform gamepad input

mod actions;
mod gamepad;
mod state;

pub use actions::*;
pub use state::*;
