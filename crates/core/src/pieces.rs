//! Pieces module - canonical shapes, the active piece, and the spawn policy
//!
//! Rotation uses a single horizontal wall-kick search: after rotating the matrix,
//! the offsets in [`KICK_OFFSETS`] are tried in order at the unchanged row. There
//! are no per-orientation kick tables and no floor kicks.

use crate::board::Board;
use crate::matrix::{rotate, ShapeMatrix, MAX_SHAPE_DIM};
use crate::rng::{pick_kind, RandomSource};
use crate::types::{PieceKind, Position, RotationDirection, BOARD_HEIGHT, BOARD_WIDTH, KICK_OFFSETS};

const X: bool = true;
const O: bool = false;
const EMPTY_ROW: [bool; MAX_SHAPE_DIM] = [O, O, O, O];

const I_SHAPE: ShapeMatrix =
    ShapeMatrix::from_table(4, 1, [[X, X, X, X], EMPTY_ROW, EMPTY_ROW, EMPTY_ROW]);
const O_SHAPE: ShapeMatrix =
    ShapeMatrix::from_table(2, 2, [[X, X, O, O], [X, X, O, O], EMPTY_ROW, EMPTY_ROW]);
const T_SHAPE: ShapeMatrix =
    ShapeMatrix::from_table(3, 2, [[O, X, O, O], [X, X, X, O], EMPTY_ROW, EMPTY_ROW]);
const S_SHAPE: ShapeMatrix =
    ShapeMatrix::from_table(3, 2, [[O, X, X, O], [X, X, O, O], EMPTY_ROW, EMPTY_ROW]);
const Z_SHAPE: ShapeMatrix =
    ShapeMatrix::from_table(3, 2, [[X, X, O, O], [O, X, X, O], EMPTY_ROW, EMPTY_ROW]);
const J_SHAPE: ShapeMatrix =
    ShapeMatrix::from_table(3, 2, [[X, O, O, O], [X, X, X, O], EMPTY_ROW, EMPTY_ROW]);
const L_SHAPE: ShapeMatrix =
    ShapeMatrix::from_table(3, 2, [[O, O, X, O], [X, X, X, O], EMPTY_ROW, EMPTY_ROW]);

/// Spawn orientation of a piece kind
pub fn canonical_matrix(kind: PieceKind) -> ShapeMatrix {
    match kind {
        PieceKind::I => I_SHAPE,
        PieceKind::O => O_SHAPE,
        PieceKind::T => T_SHAPE,
        PieceKind::S => S_SHAPE,
        PieceKind::Z => Z_SHAPE,
        PieceKind::J => J_SHAPE,
        PieceKind::L => L_SHAPE,
    }
}

/// Column that horizontally centres a matrix of `width` on the board
pub fn spawn_x(width: usize) -> i32 {
    (BOARD_WIDTH as i32 - width as i32).div_euclid(2)
}

/// The active falling piece
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Piece {
    pub kind: PieceKind,
    pub matrix: ShapeMatrix,
    pub position: Position,
}

impl Piece {
    /// Create a piece of `kind` at its spawn position (centred, row 0)
    pub fn spawn(kind: PieceKind) -> Self {
        let matrix = canonical_matrix(kind);
        Self {
            kind,
            matrix,
            position: Position::new(spawn_x(matrix.width()), 0),
        }
    }

    pub fn collides(&self, board: &Board) -> bool {
        board.collides(&self.matrix, self.position)
    }

    /// Check whether the piece fits one row further down
    pub fn can_descend(&self, board: &Board) -> bool {
        !board.collides(&self.matrix, self.position.offset(0, 1))
    }

    /// Move horizontally by `dx`. Returns false (and leaves the piece
    /// unchanged) if the moved piece would collide.
    pub fn try_shift(&mut self, board: &Board, dx: i32) -> bool {
        let target = self.position.offset(dx, 0);
        if board.collides(&self.matrix, target) {
            return false;
        }
        self.position = target;
        true
    }

    /// Move down one row. Returns false if the piece is resting on something.
    pub fn try_descend(&mut self, board: &Board) -> bool {
        if !self.can_descend(board) {
            return false;
        }
        self.position.y += 1;
        true
    }

    /// Rotate with the horizontal wall-kick search.
    ///
    /// Returns the accepted x offset, or None if every offset collides, in
    /// which case both matrix and position are left as they were.
    pub fn try_rotate(&mut self, board: &Board, direction: RotationDirection) -> Option<i32> {
        let rotated = rotate(&self.matrix, direction);

        for &shift in KICK_OFFSETS.iter() {
            let target = self.position.offset(shift, 0);
            if !board.collides(&rotated, target) {
                self.matrix = rotated;
                self.position = target;
                return Some(shift);
            }
        }

        None
    }

    /// Number of rows the piece can fall before resting
    pub fn drop_distance(&self, board: &Board) -> i32 {
        let mut distance = 0;
        // A piece can never fall further than the board is tall
        while distance <= BOARD_HEIGHT as i32
            && !board.collides(&self.matrix, self.position.offset(0, distance + 1))
        {
            distance += 1;
        }
        distance
    }

    /// Move straight down to the resting row and return the rows fallen
    pub fn drop_to_floor(&mut self, board: &Board) -> i32 {
        let distance = self.drop_distance(board);
        self.position.y += distance;
        distance
    }

    /// Absolute board coordinates of the piece's blocks
    pub fn cells(&self) -> impl Iterator<Item = (i32, i32)> + '_ {
        self.matrix
            .blocks()
            .into_iter()
            .map(move |(dx, dy)| (self.position.x + dx, self.position.y + dy))
    }
}

/// Outcome of a spawn attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Spawn {
    /// A usable piece at its spawn position
    Piece(Piece),
    /// The spawn position is blocked. Carries the rejected piece for
    /// diagnostics; it must not become the active piece.
    TopOut(Piece),
}

/// Pick a kind uniformly from `rng` and place it at its spawn position.
pub fn spawn(rng: &mut impl RandomSource, board: &Board) -> Spawn {
    let piece = Piece::spawn(pick_kind(rng));
    if piece.collides(board) {
        Spawn::TopOut(piece)
    } else {
        Spawn::Piece(piece)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::ScriptedSource;

    #[test]
    fn test_canonical_shapes_have_four_blocks() {
        for kind in PieceKind::ALL {
            assert_eq!(canonical_matrix(kind).block_count(), 4, "{:?}", kind);
        }
    }

    #[test]
    fn test_spawn_positions_are_centered() {
        assert_eq!(Piece::spawn(PieceKind::I).position, Position::new(3, 0));
        assert_eq!(Piece::spawn(PieceKind::O).position, Position::new(4, 0));
        assert_eq!(Piece::spawn(PieceKind::T).position, Position::new(3, 0));
        assert_eq!(Piece::spawn(PieceKind::L).position, Position::new(3, 0));
    }

    #[test]
    fn test_try_shift_reverts_on_wall() {
        let board = Board::new();
        let mut piece = Piece::spawn(PieceKind::O);
        piece.position.x = 0;

        assert!(!piece.try_shift(&board, -1));
        assert_eq!(piece.position.x, 0);

        assert!(piece.try_shift(&board, 1));
        assert_eq!(piece.position.x, 1);
    }

    #[test]
    fn test_drop_distance_empty_board() {
        let board = Board::new();
        let piece = Piece::spawn(PieceKind::I);
        assert_eq!(piece.drop_distance(&board), 19);

        let piece = Piece::spawn(PieceKind::T);
        assert_eq!(piece.drop_distance(&board), 18);
    }

    #[test]
    fn test_drop_to_floor_stops_on_stack() {
        let mut board = Board::new();
        board.set(4, 10, Some(PieceKind::Z));
        let mut piece = Piece::spawn(PieceKind::O);

        assert_eq!(piece.drop_to_floor(&board), 8);
        assert_eq!(piece.position.y, 8);
        assert!(!piece.can_descend(&board));
    }

    #[test]
    fn test_rotate_uses_first_free_kick() {
        let board = Board::new();
        let mut piece = Piece::spawn(PieceKind::I);
        piece.matrix = piece.matrix.rotated_cw();
        piece.position = Position::new(0, 5);

        // Vertical I at the left wall rotates back to horizontal at x=0
        assert_eq!(piece.try_rotate(&board, RotationDirection::CounterClockwise), Some(0));
        assert_eq!(piece.matrix.width(), 4);
        assert_eq!(piece.position, Position::new(0, 5));
    }

    #[test]
    fn test_rotate_kicks_off_right_wall() {
        let board = Board::new();
        let mut piece = Piece::spawn(PieceKind::I);
        piece.matrix = piece.matrix.rotated_cw();
        piece.position = Position::new(9, 5);

        // Horizontal I needs x <= 6: offsets 0,-1,1 fail, -2 gives x=7 (fails), 2 fails
        assert_eq!(piece.try_rotate(&board, RotationDirection::Clockwise), None);
        assert_eq!(piece.matrix.width(), 1);
        assert_eq!(piece.position, Position::new(9, 5));

        piece.position = Position::new(8, 5);
        assert_eq!(piece.try_rotate(&board, RotationDirection::Clockwise), Some(-2));
        assert_eq!(piece.position, Position::new(6, 5));
    }

    #[test]
    fn test_spawn_reports_top_out() {
        let mut board = Board::new();
        let mut rng = ScriptedSource::new([PieceKind::T]);

        assert!(matches!(spawn(&mut rng, &board), Spawn::Piece(p) if p.kind == PieceKind::T));

        board.set(4, 1, Some(PieceKind::I));
        assert!(matches!(spawn(&mut rng, &board), Spawn::TopOut(_)));
    }
}
