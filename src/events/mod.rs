//! Event handling for Pulseboard.
//!
//! Terminal input is polled and translated into [`Action`]s; everything
//! else (poll deadlines, debounce deadlines, stream ticks) arrives through
//! the app's select loop.
//!
//! [`Action`]: crate::state::Action

mod handler;
mod input;

pub use handler::EventHandler;
pub use input::{InputEvent, Key, Modifiers};
