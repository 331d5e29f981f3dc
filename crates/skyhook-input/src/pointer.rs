//! Pointer (mouse) state: cursor position, fire-button hold, wheel notches.

use glam::Vec2;
use winit::event::{ElementState, MouseButton, MouseScrollDelta};

/// What a pointer-button event means for the grapple.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerAction {
    /// Fire button went down at this window position.
    Fire(Vec2),
    /// Fire button went up.
    Release,
}

/// Cursor position and fire-button hold.
#[derive(Debug, Clone)]
pub struct PointerState {
    position: Vec2,
    fire_button: MouseButton,
    held: bool,
}

impl Default for PointerState {
    fn default() -> Self {
        Self::new(MouseButton::Left)
    }
}

impl PointerState {
    /// Creates a pointer tracker that treats `fire_button` as the grapple button.
    #[must_use]
    pub fn new(fire_button: MouseButton) -> Self {
        Self {
            position: Vec2::ZERO,
            fire_button,
            held: false,
        }
    }

    /// Process a `CursorMoved` event.
    pub fn on_cursor_moved(&mut self, x: f64, y: f64) {
        self.position = Vec2::new(x as f32, y as f32);
    }

    /// Process a `CursorLeft` event. The hold is lost.
    pub fn on_cursor_left(&mut self) {
        self.held = false;
    }

    /// Process a `MouseInput` event. Buttons other than the fire button are ignored.
    pub fn on_button(&mut self, button: MouseButton, state: ElementState) -> Option<PointerAction> {
        if button != self.fire_button {
            return None;
        }
        match state {
            ElementState::Pressed => {
                self.held = true;
                Some(PointerAction::Fire(self.position))
            }
            ElementState::Released => {
                self.held = false;
                Some(PointerAction::Release)
            }
        }
    }

    /// Drop the hold without a release event (focus loss).
    pub fn clear_hold(&mut self) {
        self.held = false;
    }

    /// Current cursor position in window coordinates.
    #[must_use]
    pub fn position(&self) -> Vec2 {
        self.position
    }

    /// Whether the fire button is held.
    #[must_use]
    pub fn is_held(&self) -> bool {
        self.held
    }
}

/// Rope reel direction for one wheel event: `+1` pays rope out, `-1` reels in,
/// `0` for a zero delta.
///
/// winit reports scrolling away from the user as positive; that reels in.
#[must_use]
pub fn reel_sign(delta: MouseScrollDelta) -> i32 {
    let y = match delta {
        MouseScrollDelta::LineDelta(_x, y) => f64::from(y),
        MouseScrollDelta::PixelDelta(pos) => pos.y,
    };
    if y > 0.0 {
        -1
    } else if y < 0.0 {
        1
    } else {
        0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use winit::dpi::PhysicalPosition;

    #[test]
    fn test_fire_reports_cursor_position() {
        let mut p = PointerState::default();
        p.on_cursor_moved(320.0, 240.0);
        let action = p.on_button(MouseButton::Left, ElementState::Pressed);
        assert_eq!(action, Some(PointerAction::Fire(Vec2::new(320.0, 240.0))));
        assert!(p.is_held());
    }

    #[test]
    fn test_release_clears_hold() {
        let mut p = PointerState::default();
        p.on_button(MouseButton::Left, ElementState::Pressed);
        let action = p.on_button(MouseButton::Left, ElementState::Released);
        assert_eq!(action, Some(PointerAction::Release));
        assert!(!p.is_held());
    }

    #[test]
    fn test_other_buttons_ignored() {
        let mut p = PointerState::default();
        assert_eq!(p.on_button(MouseButton::Right, ElementState::Pressed), None);
        assert!(!p.is_held());
    }

    #[test]
    fn test_cursor_left_drops_hold() {
        let mut p = PointerState::default();
        p.on_button(MouseButton::Left, ElementState::Pressed);
        p.on_cursor_left();
        assert!(!p.is_held());
    }

    #[test]
    fn test_reel_sign_line_delta() {
        assert_eq!(reel_sign(MouseScrollDelta::LineDelta(0.0, 1.0)), -1);
        assert_eq!(reel_sign(MouseScrollDelta::LineDelta(0.0, -3.0)), 1);
        assert_eq!(reel_sign(MouseScrollDelta::LineDelta(2.0, 0.0)), 0);
    }

    #[test]
    fn test_reel_sign_pixel_delta() {
        let down = MouseScrollDelta::PixelDelta(PhysicalPosition::new(0.0, -12.0));
        assert_eq!(reel_sign(down), 1);
    }
}
