//! Terminal rendering for the block-fall engine.
//!
//! [`GameView`] turns a [`core::GameSnapshot`] into a [`FrameBuffer`] without any
//! I/O, so layouts can be unit-tested. [`TerminalRenderer`] owns the terminal
//! and flushes framebuffers to it.

pub mod fb;
pub mod game_view;
pub mod renderer;

pub use blockfall_core as core;
pub use blockfall_types as types;

pub use fb::{Cell, CellStyle, FrameBuffer, Rgb};
pub use game_view::{GameView, Viewport, MAX_CELL_W};
pub use renderer::{encode_frame_into, TerminalRenderer};
