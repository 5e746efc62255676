use crate::matrix::ShapeMatrix;
use crate::pieces::Piece;
use crate::types::{PieceKind, Position, BOARD_HEIGHT, BOARD_WIDTH};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ActiveSnapshot {
    pub kind: PieceKind,
    pub position: Position,
    pub matrix: ShapeMatrix,
}

impl From<Piece> for ActiveSnapshot {
    fn from(value: Piece) -> Self {
        Self {
            kind: value.kind,
            position: value.position,
            matrix: value.matrix,
        }
    }
}

impl ActiveSnapshot {
    /// Absolute coordinates of the piece's blocks
    pub fn cells(&self) -> impl Iterator<Item = (i32, i32)> + '_ {
        self.matrix
            .blocks()
            .into_iter()
            .map(move |(dx, dy)| (self.position.x + dx, self.position.y + dy))
    }
}

/// Read model handed to renderers once per frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct GameSnapshot {
    /// 0 = empty, otherwise piece kind index + 1
    pub board: [[u8; BOARD_WIDTH]; BOARD_HEIGHT],
    pub active: Option<ActiveSnapshot>,
    pub ghost_y: Option<i32>,
    pub score: u32,
    pub lines: u32,
    pub level: u32,
    pub drop_interval_ms: u32,
    pub running: bool,
    pub paused: bool,
    pub game_over: bool,
}

impl GameSnapshot {
    pub fn playable(&self) -> bool {
        self.running && !self.paused && !self.game_over
    }

    /// Kind stored in a board cell, if any
    pub fn cell_kind(&self, x: usize, y: usize) -> Option<PieceKind> {
        let v = *self.board.get(y)?.get(x)?;
        if v == 0 {
            return None;
        }
        PieceKind::ALL.get(v as usize - 1).copied()
    }
}

impl Default for GameSnapshot {
    fn default() -> Self {
        Self {
            board: [[0u8; BOARD_WIDTH]; BOARD_HEIGHT],
            active: None,
            ghost_y: None,
            score: 0,
            lines: 0,
            level: crate::types::INITIAL_LEVEL,
            drop_interval_ms: crate::types::INITIAL_DROP_INTERVAL_MS,
            running: false,
            paused: false,
            game_over: false,
        }
    }
}
