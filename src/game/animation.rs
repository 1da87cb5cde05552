//! Sprite-sheet frame timers

use crate::world::Rect;

/// Frame index driven by elapsed time
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameAnimation {
    pub current_frame: usize,
    pub frame_count: usize,
    /// Time accumulated toward the next frame
    pub timer: f32,
    /// Seconds each frame stays on screen
    pub frame_duration: f32,
}

impl FrameAnimation {
    pub fn new(frame_count: usize, frame_duration: f32) -> Self {
        Self {
            current_frame: 0,
            frame_count: frame_count.max(1),
            timer: 0.0,
            frame_duration,
        }
    }

    /// Accumulate `dt` and step at most one frame.
    ///
    /// Returns true when the index wrapped back to 0.
    pub fn advance(&mut self, dt: f32) -> bool {
        self.timer += dt;
        if self.timer < self.frame_duration {
            return false;
        }

        self.timer = 0.0;
        self.current_frame += 1;
        if self.current_frame >= self.frame_count {
            self.current_frame = 0;
            return true;
        }
        false
    }

    /// Back to the first frame
    pub fn restart(&mut self) {
        self.current_frame = 0;
        self.timer = 0.0;
    }

    /// Region of a horizontal strip sheet holding the current frame
    pub fn source_rect(&self, sheet_width: f32, sheet_height: f32) -> Rect {
        let frame_width = sheet_width / self.frame_count as f32;
        Rect::new(self.current_frame as f32 * frame_width, 0.0, frame_width, sheet_height)
    }
}

/// Where to draw a frame so that its bottom-center sits on `feet`
pub fn feet_anchored_rect(feet_x: f32, feet_y: f32, width: f32, height: f32) -> Rect {
    Rect::new(feet_x - width / 2.0, feet_y - height, width, height)
}
