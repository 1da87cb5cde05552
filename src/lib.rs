//! PLATA: a small side-scrolling platformer
//!
//! One character runs and jumps across a map of collision rectangles and
//! fires a pistol that overheats when its magazine runs dry.
//!
//! The game binary lives in `main.rs`; `xtask` reuses [`world`] for its
//! level tooling.

pub mod assets;
pub mod config;
pub mod game;
pub mod input;
pub mod world;
