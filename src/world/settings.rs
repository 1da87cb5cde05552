//! Per-level gameplay settings
//!
//! Stored alongside the map in the level file. Every field has a default so
//! older level files keep loading when new settings are added.

use serde::{Serialize, Deserialize};

/// Player body and movement tuning
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerSettings {
    /// Collision box width
    pub width: f32,
    /// Collision box height
    pub height: f32,
    /// Gravity acceleration (units per second squared, positive = down)
    pub gravity: f32,
    /// Initial upward speed of a jump
    pub jump_speed: f32,
    /// Maximum horizontal speed
    pub max_speed: f32,
    /// Horizontal acceleration while a direction is held
    pub acceleration: f32,
    /// Horizontal deceleration on the ground with no input
    pub deceleration: f32,
    /// Upward velocity multiplier applied when jump is released early
    pub short_hop_factor: f32,
    /// Slack when detecting a landing on a platform top
    pub landing_tolerance: f32,
    /// Allow steering while airborne
    pub air_control: bool,
}

impl Default for PlayerSettings {
    fn default() -> Self {
        Self {
            width: 34.0,
            height: 64.0,
            gravity: 400.0,
            jump_speed: 350.0,
            max_speed: 300.0,
            acceleration: 1000.0,
            deceleration: 600.0,
            short_hop_factor: 0.5,
            landing_tolerance: 1.0,
            air_control: false,
        }
    }
}

/// Pistol parameters
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GunSettings {
    pub rounds_per_magazine: u32,
    /// Minimum time between shots while the trigger is held
    pub fire_interval: f32,
    /// Cooldown when the level starts
    pub initial_cooldown: f32,
    /// Lockout after the magazine runs dry
    pub overheat_duration: f32,
    pub bullet_speed: f32,
    pub bullet_radius: f32,
    /// Muzzle height above the player's feet
    pub muzzle_height: f32,
}

impl Default for GunSettings {
    fn default() -> Self {
        Self {
            rounds_per_magazine: 7,
            fire_interval: 0.1,
            initial_cooldown: 0.2,
            overheat_duration: 2.0,
            bullet_speed: 900.0,
            bullet_radius: 2.0,
            muzzle_height: 33.0,
        }
    }
}

/// Sprite-sheet animation timing
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnimationSettings {
    /// Frames in the running sheet
    pub run_frames: usize,
    /// Frames in the firing sheet
    pub fire_frames: usize,
    /// Seconds per frame
    pub frame_duration: f32,
}

impl Default for AnimationSettings {
    fn default() -> Self {
        Self {
            run_frames: 8,
            fire_frames: 4,
            frame_duration: 0.1, // 10 frames per second
        }
    }
}
