//! Game Module
//!
//! Player physics, weapon and projectiles for the platformer, plus the
//! runtime that steps them each frame and the renderer that draws them.
//!
//! Everything except `renderer` is plain data and arithmetic, so it can be
//! exercised in tests without a window.

pub mod animation;
pub mod physics;
pub mod player;
pub mod projectile;
pub mod renderer;
pub mod runtime;
pub mod weapon;

// Re-export main types
pub use renderer::draw_game;
pub use runtime::{FpsLimit, GameState};
