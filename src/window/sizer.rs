//! Resize handle along the bottom of a floating window.

use crate::constants::{MIN_WINDOW_HEIGHT, MIN_WINDOW_WIDTH, SIZER_LEFT_FRACTION};
use crate::frame::{Dim, LayerStack};

use super::{Window, WindowId};

#[derive(Debug, Clone)]
pub struct WindowSizer {
    visible: bool,
}

impl Default for WindowSizer {
    fn default() -> Self {
        Self::new()
    }
}

impl WindowSizer {
    pub fn new() -> Self {
        Self { visible: true }
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn show(&mut self) {
        self.visible = true;
    }

    pub fn hide(&mut self) {
        self.visible = false;
    }
}

/// A sizer drag in progress. Which edge moves is decided once, from the
/// press point, and lives only as long as this value.
#[must_use = "a resize drag should be finished"]
#[derive(Debug, Clone, Copy)]
pub struct ResizeDrag {
    window: WindowId,
    from_left: bool,
}

impl ResizeDrag {
    /// Raise the window and classify the press at absolute `x`: the left
    /// half of the frame resizes from the left edge.
    pub fn begin(window: &Window, x: f32, _y: f32, layers: &mut LayerStack) -> Self {
        let frame = window.frame();
        frame.move_to_top(layers);
        let local_x = x - frame.absolute(Dim::X);
        Self {
            window: window.id(),
            from_left: local_x <= frame.size(Dim::X) * SIZER_LEFT_FRACTION,
        }
    }

    pub fn window(&self) -> WindowId {
        self.window
    }

    pub fn from_left(&self) -> bool {
        self.from_left
    }

    /// Apply one pointer delta. Height always follows `dy`; the left edge
    /// trades position for width.
    pub fn update(&self, window: &mut Window, dx: f32, dy: f32) -> bool {
        let frame = window.frame_mut();
        let width = frame.size(Dim::X);
        let height = (frame.size(Dim::Y) + dy).max(MIN_WINDOW_HEIGHT);
        if self.from_left {
            let x = frame.position(Dim::X) + dx;
            frame.set_position_dim(Dim::X, x);
            frame.set_size((width - dx).max(MIN_WINDOW_WIDTH), height);
        } else {
            frame.set_size((width + dx).max(MIN_WINDOW_WIDTH), height);
        }
        true
    }

    pub fn finish(self) -> bool {
        true
    }
}
