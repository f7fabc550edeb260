//! Pointer input accumulation and per-frame snapshots
//!
//! Raw winit events arrive at arbitrary points between frames. [`InputState`]
//! accumulates them; once per frame the update step calls
//! [`InputState::take_snapshot`] to obtain an immutable [`InputSnapshot`] that
//! every controller branch reads. Within a frame no branch can observe a
//! fresher delta than another.

use winit::dpi::PhysicalPosition;
use winit::event::{ElementState, MouseButton, MouseScrollDelta};
use winit::keyboard::ModifiersState;

/// Immutable per-frame view of the pointer state.
///
/// Button ids follow the viewer convention: primary = left, middle = wheel
/// press, secondary = right. `cursor_delta` is the raw pointer motion since
/// the previous snapshot; `scroll` is accumulated wheel motion, negated so
/// scrolling up zooms in.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct InputSnapshot {
    pub primary: bool,
    pub middle: bool,
    pub secondary: bool,
    pub modifier: bool,
    pub cursor_delta: (f32, f32),
    pub scroll: f32,
}

/// Accumulates winit input events between frames.
#[derive(Debug, Default)]
pub struct InputState {
    primary: bool,
    middle: bool,
    secondary: bool,
    modifier: bool,
    pending_delta: (f32, f32),
    pending_scroll: f32,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a mouse button transition.
    pub fn handle_mouse_button(&mut self, button: MouseButton, state: ElementState) {
        let pressed = state == ElementState::Pressed;
        match button {
            MouseButton::Left => self.primary = pressed,
            MouseButton::Middle => self.middle = pressed,
            MouseButton::Right => self.secondary = pressed,
            _ => {}
        }
    }

    /// Records the current keyboard modifier state (shift drives pan).
    pub fn handle_modifiers(&mut self, state: ModifiersState) {
        self.modifier = state.shift_key();
    }

    /// Accumulates raw pointer motion from a device event.
    pub fn accumulate_motion(&mut self, delta: (f64, f64)) {
        self.pending_delta.0 += delta.0 as f32;
        self.pending_delta.1 += delta.1 as f32;
    }

    /// Accumulates scroll-wheel motion, negated so scrolling up zooms in.
    pub fn accumulate_scroll(&mut self, delta: &MouseScrollDelta) {
        let amount = -match delta {
            MouseScrollDelta::LineDelta(_, scroll) => *scroll,
            MouseScrollDelta::PixelDelta(PhysicalPosition { y: scroll, .. }) => {
                *scroll as f32 / 50.0
            }
        };
        self.pending_scroll += amount;
    }

    /// Drops any half-accumulated motion, e.g. when the UI captures input.
    pub fn clear_pending(&mut self) {
        self.pending_delta = (0.0, 0.0);
        self.pending_scroll = 0.0;
    }

    /// Drains accumulated deltas into an immutable snapshot.
    ///
    /// Button and modifier state carry over between frames; motion and
    /// scroll are consumed and reset to zero.
    pub fn take_snapshot(&mut self) -> InputSnapshot {
        let snapshot = InputSnapshot {
            primary: self.primary,
            middle: self.middle,
            secondary: self.secondary,
            modifier: self.modifier,
            cursor_delta: self.pending_delta,
            scroll: self.pending_scroll,
        };
        self.pending_delta = (0.0, 0.0);
        self.pending_scroll = 0.0;
        snapshot
    }
}
