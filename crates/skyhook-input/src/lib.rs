//! Input abstraction: winit keyboard, pointer, and wheel events folded into player intent.

pub mod intent;
pub mod keyboard;
pub mod pointer;

pub use intent::{InputIntent, KeyBindings, MoveCommand};
pub use keyboard::{KeyboardState, RawKeyEvent};
pub use pointer::{PointerAction, PointerState, reel_sign};
