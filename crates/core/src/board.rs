//! Board module - the playfield of settled blocks
//!
//! The board is a 10x20 grid where each cell is empty or holds the kind of the
//! piece that locked there. Uses a flat array for cache locality and no allocation.
//! Coordinates: (x, y) where x ranges 0..9 (left to right), y ranges 0..19 (top to bottom).
//! Dimensions never change after construction.

use crate::matrix::ShapeMatrix;
use crate::types::{PieceKind, Position, BOARD_HEIGHT, BOARD_WIDTH};

/// Cell on the board (None = empty, Some = locked block of that kind)
pub type Cell = Option<PieceKind>;

/// Total number of cells on the board
const BOARD_SIZE: usize = BOARD_WIDTH * BOARD_HEIGHT;

/// The playfield - 10 columns x 20 rows using flat array storage
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    /// Flat array of cells, row-major order (y * WIDTH + x)
    cells: [Cell; BOARD_SIZE],
}

impl Board {
    /// Create a new empty board
    pub fn new() -> Self {
        Self {
            cells: [None; BOARD_SIZE],
        }
    }

    /// Calculate flat index from (x, y) coordinates
    #[inline(always)]
    fn index(x: i32, y: i32) -> Option<usize> {
        if x < 0 || x >= BOARD_WIDTH as i32 || y < 0 || y >= BOARD_HEIGHT as i32 {
            return None;
        }
        Some((y as usize) * BOARD_WIDTH + (x as usize))
    }

    pub fn width(&self) -> usize {
        BOARD_WIDTH
    }

    pub fn height(&self) -> usize {
        BOARD_HEIGHT
    }

    /// Get cell at position (x, y).
    /// Returns None if out of bounds
    pub fn get(&self, x: i32, y: i32) -> Option<Cell> {
        Self::index(x, y).map(|idx| self.cells[idx])
    }

    /// Set cell at position (x, y).
    /// Returns false if out of bounds
    pub fn set(&mut self, x: i32, y: i32, cell: Cell) -> bool {
        match Self::index(x, y) {
            Some(idx) => {
                self.cells[idx] = cell;
                true
            }
            None => false,
        }
    }

    /// Check if position is occupied (within bounds and filled)
    pub fn is_occupied(&self, x: i32, y: i32) -> bool {
        matches!(self.get(x, y), Some(Some(_)))
    }

    /// Check whether `matrix` placed at `pos` overlaps a wall, the floor, or a
    /// locked block.
    ///
    /// Cells above the field (`py < 0`) only collide with the side walls, so
    /// pieces may sit partially above the visible area.
    pub fn collides(&self, matrix: &ShapeMatrix, pos: Position) -> bool {
        matrix.blocks().iter().any(|&(dx, dy)| {
            let px = pos.x + dx;
            let py = pos.y + dy;
            if px < 0 || px >= BOARD_WIDTH as i32 || py >= BOARD_HEIGHT as i32 {
                return true;
            }
            py >= 0 && self.is_occupied(px, py)
        })
    }

    /// Write every in-bounds block of `matrix` at `pos` into the board.
    ///
    /// Blocks outside the field are clipped.
    pub fn merge(&mut self, matrix: &ShapeMatrix, pos: Position, kind: PieceKind) {
        for (dx, dy) in matrix.blocks() {
            self.set(pos.x + dx, pos.y + dy, Some(kind));
        }
    }

    /// Check if a row is completely filled
    pub fn is_row_full(&self, y: usize) -> bool {
        if y >= BOARD_HEIGHT {
            return false;
        }
        let start = y * BOARD_WIDTH;
        self.cells[start..start + BOARD_WIDTH]
            .iter()
            .all(|cell| cell.is_some())
    }

    /// Remove all full rows and return how many were removed.
    ///
    /// Remaining rows keep their relative order and settle downwards; the same
    /// number of empty rows appear at the top. Uses a two-pointer compaction
    /// scanning bottom to top, so non-adjacent full rows are each handled once.
    pub fn clear_full_rows(&mut self) -> usize {
        let mut cleared = 0;
        let mut write_y = BOARD_HEIGHT;

        for read_y in (0..BOARD_HEIGHT).rev() {
            if self.is_row_full(read_y) {
                cleared += 1;
                continue;
            }

            write_y -= 1;
            if write_y != read_y {
                let src_start = read_y * BOARD_WIDTH;
                self.cells
                    .copy_within(src_start..src_start + BOARD_WIDTH, write_y * BOARD_WIDTH);
            }
        }

        // Rows above the write pointer are now the vacated top rows
        self.cells[..write_y * BOARD_WIDTH].fill(None);

        cleared
    }

    /// Number of occupied cells
    pub fn occupied_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_some()).count()
    }

    /// Get a reference to the internal cells array
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Iterate rows top to bottom
    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> {
        self.cells.chunks_exact(BOARD_WIDTH)
    }

    /// Export as a u8 grid: 0 is empty, otherwise kind index + 1
    pub fn write_u8_grid(&self, out: &mut [[u8; BOARD_WIDTH]; BOARD_HEIGHT]) {
        for (row_out, row) in out.iter_mut().zip(self.rows()) {
            for (dst, cell) in row_out.iter_mut().zip(row) {
                *dst = cell.map(|k| k.index() as u8 + 1).unwrap_or(0);
            }
        }
    }

    /// Clear the entire board
    pub fn clear(&mut self) {
        self.cells.fill(None);
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fill_row(board: &mut Board, y: i32) {
        for x in 0..BOARD_WIDTH as i32 {
            board.set(x, y, Some(PieceKind::I));
        }
    }

    #[test]
    fn test_board_index_calculation() {
        assert_eq!(Board::index(0, 0), Some(0));
        assert_eq!(Board::index(9, 0), Some(9));
        assert_eq!(Board::index(0, 1), Some(10));
        assert_eq!(Board::index(9, 19), Some(199));
        assert_eq!(Board::index(-1, 0), None);
        assert_eq!(Board::index(10, 0), None);
        assert_eq!(Board::index(0, 20), None);
    }

    #[test]
    fn test_collides_above_field_only_hits_walls() {
        let board = Board::new();
        let bar = ShapeMatrix::from_rows(&[&[1, 1, 1, 1]]).unwrap();

        assert!(!board.collides(&bar, Position::new(3, -5)));
        assert!(board.collides(&bar, Position::new(-1, -5)));
        assert!(board.collides(&bar, Position::new(7, -5)));
    }

    #[test]
    fn test_collides_floor_and_blocks() {
        let mut board = Board::new();
        let o = ShapeMatrix::from_rows(&[&[1, 1], &[1, 1]]).unwrap();

        assert!(!board.collides(&o, Position::new(0, 18)));
        assert!(board.collides(&o, Position::new(0, 19)));

        board.set(1, 10, Some(PieceKind::T));
        assert!(board.collides(&o, Position::new(0, 9)));
        assert!(!board.collides(&o, Position::new(2, 9)));
    }

    #[test]
    fn test_merge_clips_cells_above_field() {
        let mut board = Board::new();
        let vertical = ShapeMatrix::from_rows(&[&[1], &[1], &[1], &[1]]).unwrap();

        board.merge(&vertical, Position::new(4, -2), PieceKind::I);

        assert_eq!(board.occupied_count(), 2);
        assert!(board.is_occupied(4, 0));
        assert!(board.is_occupied(4, 1));
    }

    #[test]
    fn test_clear_non_adjacent_rows() {
        let mut board = Board::new();
        fill_row(&mut board, 3);
        fill_row(&mut board, 7);
        board.set(0, 5, Some(PieceKind::T));
        board.set(2, 19, Some(PieceKind::S));

        assert_eq!(board.clear_full_rows(), 2);

        // Row 5 sat between the cleared rows and drops by one
        assert!(board.is_occupied(0, 6));
        assert!(!board.is_occupied(0, 5));
        // Row 19 is below both and stays put
        assert!(board.is_occupied(2, 19));
        assert_eq!(board.occupied_count(), 2);
    }

    #[test]
    fn test_clear_more_than_four_rows() {
        let mut board = Board::new();
        for y in 14..20 {
            fill_row(&mut board, y);
        }
        assert_eq!(board.clear_full_rows(), 6);
        assert_eq!(board.occupied_count(), 0);
    }

    #[test]
    fn test_write_u8_grid() {
        let mut board = Board::new();
        board.set(0, 19, Some(PieceKind::I));
        board.set(9, 0, Some(PieceKind::L));

        let mut grid = [[0u8; BOARD_WIDTH]; BOARD_HEIGHT];
        board.write_u8_grid(&mut grid);

        assert_eq!(grid[19][0], 1);
        assert_eq!(grid[0][9], 7);
        assert_eq!(grid[10][5], 0);
    }
}
