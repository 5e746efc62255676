//! Terminal input module.
//!
//! Maps `crossterm` key events into [`crate::types::GameAction`]s. It holds no
//! game logic: the runner forwards each mapped action to the session in the
//! order the key events arrived.

pub mod map;

pub use blockfall_types as types;

pub use map::{handle_key_event, should_quit};
