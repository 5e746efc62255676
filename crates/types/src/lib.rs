//! Core types module - shared data structures and constants
//!
//! Pure data types with no I/O, shared by the engine, the input mapping and the
//! terminal renderer.
//!
//! # Board Dimensions
//!
//! - **Width**: 10 columns (indexed 0-9, left to right)
//! - **Height**: 20 rows (indexed 0-19, top to bottom)
//!
//! # Progression Constants
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `INITIAL_LEVEL` | 1 | Level at start and after restart |
//! | `INITIAL_DROP_INTERVAL_MS` | 800 | Auto-descent interval at level 1 |
//! | `DROP_INTERVAL_STEP_MS` | 80 | Interval reduction per level-up |
//! | `DROP_INTERVAL_FLOOR_MS` | 120 | Fastest possible interval |
//! | `LINES_PER_LEVEL` | 10 | Cleared rows needed per level |
//!
//! # Examples
//!
//! ```
//! use blockfall_types::{GameAction, PieceKind, RotationDirection, BOARD_HEIGHT, BOARD_WIDTH};
//!
//! let parsed = PieceKind::from_str("t").unwrap();
//! assert_eq!(parsed, PieceKind::T);
//!
//! assert_eq!(RotationDirection::Clockwise.sign(), 1);
//!
//! assert_eq!(GameAction::from_str("hardDrop"), Some(GameAction::HardDrop));
//!
//! assert_eq!(BOARD_WIDTH, 10);
//! assert_eq!(BOARD_HEIGHT, 20);
//! ```

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Board width in cells (columns)
pub const BOARD_WIDTH: usize = 10;
/// Board height in cells (rows)
pub const BOARD_HEIGHT: usize = 20;

/// Default frame period of the terminal runner (milliseconds)
pub const TICK_MS: u32 = 16;

pub const INITIAL_LEVEL: u32 = 1;
pub const INITIAL_DROP_INTERVAL_MS: u32 = 800;
pub const DROP_INTERVAL_STEP_MS: u32 = 80;
pub const DROP_INTERVAL_FLOOR_MS: u32 = 120;
pub const LINES_PER_LEVEL: u32 = 10;

/// Base points for clearing 0..=4 rows at once (before the level multiplier)
pub const LINE_SCORES: [u32; 5] = [0, 100, 300, 500, 800];

/// Base points per row when more than four rows clear at once
pub const OVERFLOW_LINE_SCORE: u32 = 500;

/// Horizontal offsets tried, in order, after a rotation
pub const KICK_OFFSETS: [i32; 5] = [0, -1, 1, -2, 2];

/// Piece kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum PieceKind {
    I,
    O,
    T,
    S,
    Z,
    J,
    L,
}

impl PieceKind {
    /// All kinds in canonical order (the order random selection indexes into)
    pub const ALL: [PieceKind; 7] = [
        PieceKind::I,
        PieceKind::O,
        PieceKind::T,
        PieceKind::S,
        PieceKind::Z,
        PieceKind::J,
        PieceKind::L,
    ];

    /// Parse piece kind from string (case-insensitive)
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "i" => Some(PieceKind::I),
            "o" => Some(PieceKind::O),
            "t" => Some(PieceKind::T),
            "s" => Some(PieceKind::S),
            "z" => Some(PieceKind::Z),
            "j" => Some(PieceKind::J),
            "l" => Some(PieceKind::L),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PieceKind::I => "i",
            PieceKind::O => "o",
            PieceKind::T => "t",
            PieceKind::S => "s",
            PieceKind::Z => "z",
            PieceKind::J => "j",
            PieceKind::L => "l",
        }
    }

    /// Position of this kind in [`PieceKind::ALL`]
    pub fn index(&self) -> usize {
        match self {
            PieceKind::I => 0,
            PieceKind::O => 1,
            PieceKind::T => 2,
            PieceKind::S => 3,
            PieceKind::Z => 4,
            PieceKind::J => 5,
            PieceKind::L => 6,
        }
    }
}

/// Rotation direction: clockwise is `+1`, counter-clockwise is `-1`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum RotationDirection {
    Clockwise,
    CounterClockwise,
}

impl RotationDirection {
    pub fn sign(&self) -> i32 {
        match self {
            RotationDirection::Clockwise => 1,
            RotationDirection::CounterClockwise => -1,
        }
    }

}

/// Top-left offset of a shape's bounding box in board coordinates.
///
/// `x` may be negative while a wall-kick is being searched; `y` may be
/// negative for cells above the visible field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    pub const fn offset(self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }
}

/// Game actions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum GameAction {
    Start,
    Restart,
    Pause,
    MoveLeft,
    MoveRight,
    SoftDrop,
    HardDrop,
    RotateCw,
    RotateCcw,
}

impl GameAction {
    /// Parse action from string (case-insensitive)
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "start" => Some(GameAction::Start),
            "restart" => Some(GameAction::Restart),
            "pause" => Some(GameAction::Pause),
            "moveleft" => Some(GameAction::MoveLeft),
            "moveright" => Some(GameAction::MoveRight),
            "softdrop" => Some(GameAction::SoftDrop),
            "harddrop" => Some(GameAction::HardDrop),
            "rotatecw" => Some(GameAction::RotateCw),
            "rotateccw" => Some(GameAction::RotateCcw),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            GameAction::Start => "start",
            GameAction::Restart => "restart",
            GameAction::Pause => "pause",
            GameAction::MoveLeft => "moveLeft",
            GameAction::MoveRight => "moveRight",
            GameAction::SoftDrop => "softDrop",
            GameAction::HardDrop => "hardDrop",
            GameAction::RotateCw => "rotateCw",
            GameAction::RotateCcw => "rotateCcw",
        }
    }
}

/// Session lifecycle.
///
/// ```text
/// Idle --start--> Running <--togglePause--> Paused
/// Running/Paused --top-out--> GameOver
/// any --restart--> Running
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Lifecycle {
    #[default]
    Idle,
    Running,
    Paused,
    GameOver,
}

impl Lifecycle {
    /// True while a game is in progress, paused or not
    pub fn running(&self) -> bool {
        matches!(self, Lifecycle::Running | Lifecycle::Paused)
    }

    pub fn paused(&self) -> bool {
        matches!(self, Lifecycle::Paused)
    }

    pub fn game_over(&self) -> bool {
        matches!(self, Lifecycle::GameOver)
    }

    /// True only when auto-descent and piece commands are live
    pub fn playable(&self) -> bool {
        matches!(self, Lifecycle::Running)
    }
}
