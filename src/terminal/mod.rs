//! Terminal display and input collaborators
//!
//! The render core never touches the terminal: it fills shade indices
//! into the framebuffer, and this module alone decides which glyph and
//! color each index becomes. Input is polled with a bounded wait and
//! mapped to camera-level events.

mod display;
mod input;

pub use display::TerminalDisplay;
pub use input::{poll_input, InputEvent, Motion};
