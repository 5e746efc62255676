//! Core game logic module - pure, deterministic, and testable
//!
//! This crate contains the game rules, state management, and simulation logic.
//! It does no I/O: renderers read [`GameSnapshot`]s and input layers call
//! [`GameSession`] commands.
//!
//! # Module Structure
//!
//! - [`matrix`]: binary shape matrices and 90° rotation
//! - [`board`]: 10x20 playfield with collision, merge and line clearing
//! - [`pieces`]: canonical shapes, the active piece, wall-kick rotation, spawn policy
//! - [`rng`]: injectable random sources for piece selection
//! - [`scoring`]: line-clear points and level / drop-speed progression
//! - [`game_state`]: the session and its Idle / Running / Paused / GameOver lifecycle
//! - [`snapshot`]: copyable read model for renderers
//!
//! # Example
//!
//! ```
//! use blockfall_core::GameSession;
//! use blockfall_types::GameAction;
//!
//! let mut game = GameSession::new(12345);
//! game.start();
//!
//! game.apply_action(GameAction::MoveRight);
//! game.apply_action(GameAction::RotateCw);
//! game.apply_action(GameAction::HardDrop);
//!
//! assert!(game.board().occupied_count() >= 4);
//! ```
//!
//! # Timing
//!
//! Call [`GameSession::tick`](game_state::GameSession::tick) once per frame with
//! the elapsed milliseconds. A forced descent happens when the accumulated time
//! exceeds the drop interval (800ms at level 1, 80ms faster per level, 120ms floor).

pub mod board;
pub mod game_state;
pub mod matrix;
pub mod pieces;
pub mod rng;
pub mod scoring;
pub mod snapshot;

pub use blockfall_types as types;

// Re-export commonly used types for convenience
pub use board::Board;
pub use game_state::{GameSession, LockEvent};
pub use matrix::{rotate, ShapeMatrix};
pub use pieces::{canonical_matrix, spawn, Piece, Spawn};
pub use rng::{RandomSource, ScriptedSource, SimpleRng, ThreadRandom};
pub use scoring::{advance_level, level_for_lines, score_delta};
pub use snapshot::{ActiveSnapshot, GameSnapshot};
