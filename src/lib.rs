//! blockfall (workspace facade crate).
//!
//! Re-exports the engine crates under `blockfall::{core,input,term,types}` and
//! holds the pieces the terminal runner needs on top of them: configuration,
//! log setup and the frame clock.

pub use blockfall_core as core;
pub use blockfall_input as input;
pub use blockfall_term as term;
pub use blockfall_types as types;

pub mod clock;
pub mod config;
pub mod logging;
