//! Input state management
//!
//! Polls keyboard (macroquad) and gamepad (gilrs) input, combining them into
//! a unified action-based API and a per-frame [`PlayerInput`] snapshot.

use macroquad::prelude::*;
use crate::game::physics::MoveInput;
use crate::game::player::PlayerInput;
use crate::game::weapon::TriggerInput;
use super::gamepad::{button, Gamepad};
use super::Action;

/// Unified input state that handles both keyboard and gamepad
pub struct InputState {
    gamepad: Gamepad,
}

impl InputState {
    pub fn new() -> Self {
        Self {
            gamepad: Gamepad::new(),
        }
    }

    /// Call once per frame before checking actions
    pub fn poll(&mut self) {
        self.gamepad.poll();
    }

    /// Horizontal movement, -1.0 (left) to 1.0 (right)
    pub fn move_axis(&self) -> f32 {
        let mut axis: f32 = 0.0;
        if self.action_down(Action::MoveLeft) { axis -= 1.0; }
        if self.action_down(Action::MoveRight) { axis += 1.0; }

        // Analog stick takes over when pushed further than the digital input
        let stick = self.gamepad.left_stick().x;
        if stick.abs() > axis.abs() {
            axis = stick;
        }
        axis.clamp(-1.0, 1.0)
    }

    /// Check if action is currently held down
    pub fn action_down(&self, action: Action) -> bool {
        self.keyboard_down(action) || self.gamepad_down(action)
    }

    /// Check if action was just pressed this frame
    pub fn action_pressed(&self, action: Action) -> bool {
        self.keyboard_pressed(action) || self.gamepad_pressed(action)
    }

    /// Check if action was just released this frame
    pub fn action_released(&self, action: Action) -> bool {
        self.keyboard_released(action) || self.gamepad_released(action)
    }

    /// Everything the player needs for this frame
    pub fn snapshot(&self) -> PlayerInput {
        PlayerInput {
            movement: MoveInput {
                axis: self.move_axis(),
                jump_pressed: self.action_pressed(Action::Jump),
                jump_released: self.action_released(Action::Jump),
            },
            trigger: TriggerInput {
                fire_held: self.action_down(Action::Fire),
                fire_pressed: self.action_pressed(Action::Fire),
                reload_pressed: self.action_pressed(Action::Reload),
            },
        }
    }

    fn keys(action: Action) -> &'static [KeyCode] {
        match action {
            Action::MoveLeft => &[KeyCode::Left, KeyCode::A],
            Action::MoveRight => &[KeyCode::Right, KeyCode::D],
            Action::Jump => &[KeyCode::Space],
            Action::Fire => &[KeyCode::Backspace, KeyCode::J],
            Action::Reload => &[KeyCode::R],
            Action::ToggleDebug => &[KeyCode::F1],
            Action::Respawn => &[KeyCode::F5],
            Action::Quit => &[KeyCode::Escape],
        }
    }

    fn buttons(action: Action) -> &'static [u32] {
        match action {
            Action::MoveLeft => &[button::DPAD_LEFT],
            Action::MoveRight => &[button::DPAD_RIGHT],
            Action::Jump => &[button::A],
            Action::Fire => &[button::X, button::RB],
            Action::Reload => &[button::Y],
            Action::ToggleDebug => &[button::SELECT],
            Action::Respawn => &[button::START],
            Action::Quit => &[],
        }
    }

    fn keyboard_down(&self, action: Action) -> bool {
        Self::keys(action).iter().any(|&k| is_key_down(k))
    }

    fn keyboard_pressed(&self, action: Action) -> bool {
        Self::keys(action).iter().any(|&k| is_key_pressed(k))
    }

    fn keyboard_released(&self, action: Action) -> bool {
        Self::keys(action).iter().any(|&k| is_key_released(k))
    }

    fn gamepad_down(&self, action: Action) -> bool {
        Self::buttons(action).iter().any(|&b| self.gamepad.is_button_down(b))
    }

    fn gamepad_pressed(&self, action: Action) -> bool {
        Self::buttons(action).iter().any(|&b| self.gamepad.is_button_pressed(b))
    }

    fn gamepad_released(&self, action: Action) -> bool {
        Self::buttons(action).iter().any(|&b| self.gamepad.is_button_released(b))
    }

    /// Check if any gamepad is connected
    pub fn has_gamepad(&self) -> bool {
        self.gamepad.has_gamepad()
    }
}

impl Default for InputState {
    fn default() -> Self {
        Self::new()
    }
}
