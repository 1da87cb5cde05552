//! Gamepad support
//!
//! Native: Uses gilrs crate for cross-platform gamepad input
//! WASM: No gamepad backend; reports no controller

use macroquad::prelude::Vec2;

// Standard gamepad button indices (matches Web Gamepad API standard mapping)
pub mod button {
    pub const A: u32 = 0;           // ActionDown / South
    pub const B: u32 = 1;           // ActionRight / East
    pub const X: u32 = 2;           // ActionLeft / West
    pub const Y: u32 = 3;           // ActionUp / North
    pub const LB: u32 = 4;          // Left Bumper
    pub const RB: u32 = 5;          // Right Bumper
    pub const SELECT: u32 = 8;      // Back/Select
    pub const START: u32 = 9;       // Start/Options
    pub const DPAD_LEFT: u32 = 14;
    pub const DPAD_RIGHT: u32 = 15;
}

/// Button state from the last two polls, for edge detection
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ButtonMasks {
    pub current: u32,
    pub previous: u32,
}

impl ButtonMasks {
    /// Shift in a new frame's mask
    pub fn push(&mut self, mask: u32) {
        self.previous = self.current;
        self.current = mask;
    }

    pub fn is_down(&self, button: u32) -> bool {
        self.current & (1 << button) != 0
    }

    pub fn is_pressed(&self, button: u32) -> bool {
        self.is_down(button) && self.previous & (1 << button) == 0
    }

    pub fn is_released(&self, button: u32) -> bool {
        !self.is_down(button) && self.previous & (1 << button) != 0
    }
}

// ============================================================================
// Native Implementation (gilrs)
// ============================================================================

#[cfg(not(target_arch = "wasm32"))]
mod platform {
    use super::*;
    use gilrs::{Gilrs, Button as GilrsButton, Axis};
    use macroquad::logging::warn;

    pub struct Gamepad {
        /// `None` when the platform backend failed to start
        gilrs: Option<Gilrs>,
        deadzone: f32,
        masks: ButtonMasks,
    }

    impl Gamepad {
        pub fn new() -> Self {
            let gilrs = match Gilrs::new() {
                Ok(g) => Some(g),
                Err(e) => {
                    warn!("Gamepad support unavailable: {}", e);
                    None
                }
            };
            Self {
                gilrs,
                deadzone: 0.15,
                masks: ButtonMasks::default(),
            }
        }

        /// Call once per frame before reading buttons
        pub fn poll(&mut self) {
            let Some(gilrs) = self.gilrs.as_mut() else { return };
            // Process gilrs events to update internal state
            while gilrs.next_event().is_some() {}
            let mask = self.read_button_mask();
            self.masks.push(mask);
        }

        pub fn has_gamepad(&self) -> bool {
            self.active_gamepad().is_some()
        }

        fn active_gamepad(&self) -> Option<gilrs::Gamepad<'_>> {
            self.gilrs.as_ref()?.gamepads().next().map(|(_, gp)| gp)
        }

        fn read_button_mask(&self) -> u32 {
            let Some(gp) = self.active_gamepad() else { return 0 };
            let mut mask = 0u32;

            if gp.is_pressed(GilrsButton::South) { mask |= 1 << button::A; }
            if gp.is_pressed(GilrsButton::East) { mask |= 1 << button::B; }
            if gp.is_pressed(GilrsButton::West) { mask |= 1 << button::X; }
            if gp.is_pressed(GilrsButton::North) { mask |= 1 << button::Y; }
            if gp.is_pressed(GilrsButton::LeftTrigger) { mask |= 1 << button::LB; }
            if gp.is_pressed(GilrsButton::RightTrigger) { mask |= 1 << button::RB; }
            if gp.is_pressed(GilrsButton::Select) { mask |= 1 << button::SELECT; }
            if gp.is_pressed(GilrsButton::Start) { mask |= 1 << button::START; }
            if gp.is_pressed(GilrsButton::DPadLeft) { mask |= 1 << button::DPAD_LEFT; }
            if gp.is_pressed(GilrsButton::DPadRight) { mask |= 1 << button::DPAD_RIGHT; }

            mask
        }

        pub fn is_button_down(&self, button: u32) -> bool {
            self.masks.is_down(button)
        }

        pub fn is_button_pressed(&self, button: u32) -> bool {
            self.masks.is_pressed(button)
        }

        pub fn is_button_released(&self, button: u32) -> bool {
            self.masks.is_released(button)
        }

        pub fn left_stick(&self) -> Vec2 {
            let Some(gp) = self.active_gamepad() else { return Vec2::ZERO };
            let x = gp.value(Axis::LeftStickX);
            let y = -gp.value(Axis::LeftStickY); // Invert Y to match screen space
            apply_deadzone(x, y, self.deadzone)
        }
    }

    impl Default for Gamepad {
        fn default() -> Self {
            Self::new()
        }
    }
}

// ============================================================================
// WASM: keyboard only
// ============================================================================

#[cfg(target_arch = "wasm32")]
mod platform {
    use super::*;

    #[derive(Default)]
    pub struct Gamepad;

    impl Gamepad {
        pub fn new() -> Self {
            Self
        }

        pub fn poll(&mut self) {}

        pub fn has_gamepad(&self) -> bool {
            false
        }

        pub fn is_button_down(&self, _button: u32) -> bool {
            false
        }

        pub fn is_button_pressed(&self, _button: u32) -> bool {
            false
        }

        pub fn is_button_released(&self, _button: u32) -> bool {
            false
        }

        pub fn left_stick(&self) -> Vec2 {
            Vec2::ZERO
        }
    }
}

// ============================================================================
// Shared utilities
// ============================================================================

/// Apply radial deadzone with linear rescaling
pub fn apply_deadzone(x: f32, y: f32, deadzone: f32) -> Vec2 {
    let len = (x * x + y * y).sqrt();
    if len < deadzone {
        return Vec2::ZERO;
    }
    // Rescale from deadzone..1.0 to 0.0..1.0
    let scale = (len - deadzone) / (1.0 - deadzone) / len;
    Vec2::new(x * scale, y * scale)
}

// Re-export the platform-specific implementation
pub use platform::Gamepad;
