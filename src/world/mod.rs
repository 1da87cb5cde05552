//! World module - level maps and their on-disk format
//!
//! - Rectangle/object/tile layers making up a map
//! - Per-level player, gun and animation settings
//! - RON level files, optionally brotli-compressed

mod geometry;
mod level;
mod settings;

pub use geometry::*;
pub use level::*;
pub use settings::*;
