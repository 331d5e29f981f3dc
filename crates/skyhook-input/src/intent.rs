//! Player intent assembled from discrete input events.
//!
//! Event handlers write into [`InputIntent`]; the simulation step reads held
//! state and takes the one-shot requests (jump, reel) exactly once.

use glam::Vec2;
use winit::event::{ElementState, MouseButton, MouseScrollDelta};
use winit::keyboard::{KeyCode, PhysicalKey};

use crate::keyboard::{KeyboardState, RawKeyEvent};
use crate::pointer::{PointerAction, PointerState, reel_sign};

/// Physical keys for movement and jump.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyBindings {
    pub forward: PhysicalKey,
    pub back: PhysicalKey,
    pub left: PhysicalKey,
    pub right: PhysicalKey,
    pub jump: PhysicalKey,
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self {
            forward: PhysicalKey::Code(KeyCode::KeyW),
            back: PhysicalKey::Code(KeyCode::KeyS),
            left: PhysicalKey::Code(KeyCode::KeyA),
            right: PhysicalKey::Code(KeyCode::KeyD),
            jump: PhysicalKey::Code(KeyCode::Space),
        }
    }
}

/// Movement request for one simulation step.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct MoveCommand {
    /// Camera-relative axes: `x` = right, `y` = forward. Each component is
    /// -1, 0, or 1; opposing keys cancel.
    pub axes: Vec2,
    /// A jump was requested since the last step.
    pub jump: bool,
}

impl MoveCommand {
    /// Forward-only input, no jump.
    pub const FORWARD: Self = Self {
        axes: Vec2::Y,
        jump: false,
    };
}

/// Held keys, fire-button hold, and pending one-shot requests.
#[derive(Debug, Clone, Default)]
pub struct InputIntent {
    bindings: KeyBindings,
    keyboard: KeyboardState,
    pointer: PointerState,
    jump_queued: bool,
    reel: i32,
}

impl InputIntent {
    /// Creates an empty intent with the default bindings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty intent with custom bindings.
    #[must_use]
    pub fn with_bindings(bindings: KeyBindings) -> Self {
        Self {
            bindings,
            ..Self::default()
        }
    }

    // ── Event handlers ──────────────────────────────────────────────

    /// Key down/up. A fresh press of the jump key queues a jump; auto-repeat does not.
    pub fn on_key(&mut self, event: RawKeyEvent) {
        let newly_pressed = self.keyboard.process_raw(event);
        if newly_pressed && event.key == self.bindings.jump {
            self.jump_queued = true;
        }
    }

    /// Cursor movement in window coordinates.
    pub fn on_pointer_moved(&mut self, x: f64, y: f64) {
        self.pointer.on_cursor_moved(x, y);
    }

    /// Pointer button down/up. Returns the grapple action it implies, if any.
    pub fn on_pointer_button(
        &mut self,
        button: MouseButton,
        state: ElementState,
    ) -> Option<PointerAction> {
        self.pointer.on_button(button, state)
    }

    /// Cursor left the window; the fire hold is lost.
    pub fn on_pointer_leave(&mut self) {
        self.pointer.on_cursor_left();
    }

    /// Wheel event; queues one reel notch in the wheel's direction.
    pub fn on_wheel(&mut self, delta: MouseScrollDelta) {
        self.reel += reel_sign(delta);
    }

    /// Focus lost: held keys and the fire hold are dropped.
    pub fn on_focus_lost(&mut self) {
        self.keyboard.release_all();
        self.pointer.clear_hold();
    }

    // ── Queries ─────────────────────────────────────────────────────

    /// Camera-relative movement axes from the held keys.
    #[must_use]
    pub fn move_axes(&self) -> Vec2 {
        let held = |key| if self.keyboard.is_pressed(key) { 1.0 } else { 0.0 };
        Vec2::new(
            held(self.bindings.right) - held(self.bindings.left),
            held(self.bindings.forward) - held(self.bindings.back),
        )
    }

    /// Whether the grapple fire button is held.
    #[must_use]
    pub fn grapple_held(&self) -> bool {
        self.pointer.is_held()
    }

    /// Current cursor position in window coordinates.
    #[must_use]
    pub fn pointer_position(&self) -> Vec2 {
        self.pointer.position()
    }

    /// Whether a jump is waiting to be consumed.
    #[must_use]
    pub fn jump_pending(&self) -> bool {
        self.jump_queued
    }

    // ── Consumption ─────────────────────────────────────────────────

    /// Builds this step's movement command and consumes the queued jump.
    pub fn take_move_command(&mut self) -> MoveCommand {
        MoveCommand {
            axes: self.move_axes(),
            jump: std::mem::take(&mut self.jump_queued),
        }
    }

    /// Takes the net queued reel notches (positive pays rope out).
    pub fn take_reel(&mut self) -> i32 {
        std::mem::take(&mut self.reel)
    }
}
