//! Matrix module - binary shape matrices and 90° rotation
//!
//! A [`ShapeMatrix`] is a small rectangular occupancy grid describing one piece
//! orientation. Matrices are plain `Copy` values: rotation always produces a new
//! matrix and never mutates its input.

use arrayvec::ArrayVec;

use crate::types::RotationDirection;

/// Largest side length of any shape matrix
pub const MAX_SHAPE_DIM: usize = 4;

/// Maximum number of occupied cells in a shape matrix
pub const MAX_SHAPE_CELLS: usize = MAX_SHAPE_DIM * MAX_SHAPE_DIM;

/// Rectangular occupancy grid, at most 4x4.
///
/// Cells outside `width x height` are always empty, so two matrices compare
/// equal iff their dimensions and occupied cells match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "RawShapeMatrix")
)]
pub struct ShapeMatrix {
    width: u8,
    height: u8,
    cells: [[bool; MAX_SHAPE_DIM]; MAX_SHAPE_DIM],
}

/// Unchecked wire form; only becomes a `ShapeMatrix` through `TryFrom`
#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct RawShapeMatrix {
    width: u8,
    height: u8,
    cells: [[bool; MAX_SHAPE_DIM]; MAX_SHAPE_DIM],
}

#[cfg(feature = "serde")]
impl TryFrom<RawShapeMatrix> for ShapeMatrix {
    type Error = String;

    fn try_from(raw: RawShapeMatrix) -> Result<Self, Self::Error> {
        let (w, h) = (raw.width as usize, raw.height as usize);
        if !(1..=MAX_SHAPE_DIM).contains(&w) || !(1..=MAX_SHAPE_DIM).contains(&h) {
            return Err(format!(
                "shape matrix must be 1x1 to {MAX_SHAPE_DIM}x{MAX_SHAPE_DIM}, got {w}x{h}"
            ));
        }
        let stray = raw
            .cells
            .iter()
            .enumerate()
            .any(|(y, row)| row.iter().enumerate().any(|(x, &c)| c && (x >= w || y >= h)));
        if stray {
            return Err(format!("shape matrix has cells outside its {w}x{h} bounds"));
        }
        Ok(Self {
            width: raw.width,
            height: raw.height,
            cells: raw.cells,
        })
    }
}

impl ShapeMatrix {
    /// Build a matrix from rows of 0/1 values.
    ///
    /// Returns None if the input is empty, ragged, or larger than 4x4.
    pub fn from_rows(rows: &[&[u8]]) -> Option<Self> {
        let height = rows.len();
        let width = rows.first()?.len();
        if height > MAX_SHAPE_DIM || width == 0 || width > MAX_SHAPE_DIM {
            return None;
        }

        let mut cells = [[false; MAX_SHAPE_DIM]; MAX_SHAPE_DIM];
        for (y, row) in rows.iter().enumerate() {
            if row.len() != width {
                return None;
            }
            for (x, &v) in row.iter().enumerate() {
                cells[y][x] = v != 0;
            }
        }

        Some(Self {
            width: width as u8,
            height: height as u8,
            cells,
        })
    }

    /// Const constructor for the canonical shape tables
    pub(crate) const fn from_table(
        width: u8,
        height: u8,
        cells: [[bool; MAX_SHAPE_DIM]; MAX_SHAPE_DIM],
    ) -> Self {
        Self {
            width,
            height,
            cells,
        }
    }

    pub fn width(&self) -> usize {
        self.width as usize
    }

    pub fn height(&self) -> usize {
        self.height as usize
    }

    /// Get cell at (x, y); out-of-range cells read as empty
    pub fn get(&self, x: usize, y: usize) -> bool {
        x < self.width() && y < self.height() && self.cells[y][x]
    }

    /// Occupied cells as (x, y) offsets, row-major
    pub fn blocks(&self) -> ArrayVec<(i32, i32), MAX_SHAPE_CELLS> {
        let mut out = ArrayVec::new();
        for y in 0..self.height() {
            for x in 0..self.width() {
                if self.cells[y][x] {
                    out.push((x as i32, y as i32));
                }
            }
        }
        out
    }

    pub fn block_count(&self) -> usize {
        self.blocks().len()
    }

    pub fn rotated_cw(&self) -> Self {
        rotate(self, RotationDirection::Clockwise)
    }

    pub fn rotated_ccw(&self) -> Self {
        rotate(self, RotationDirection::CounterClockwise)
    }

    /// Rows as 0/1 vectors (for display and debugging)
    pub fn to_rows(&self) -> Vec<Vec<u8>> {
        (0..self.height())
            .map(|y| (0..self.width()).map(|x| self.get(x, y) as u8).collect())
            .collect()
    }
}

/// Rotate a matrix by 90° in the given direction.
///
/// The result has swapped dimensions. Clockwise maps source `(y, x)` to
/// destination `(x, h - 1 - y)`; counter-clockwise maps it to `(w - 1 - x, y)`,
/// the exact inverse.
pub fn rotate(matrix: &ShapeMatrix, direction: RotationDirection) -> ShapeMatrix {
    let h = matrix.height();
    let w = matrix.width();
    let mut cells = [[false; MAX_SHAPE_DIM]; MAX_SHAPE_DIM];

    for y in 0..h {
        for x in 0..w {
            if !matrix.cells[y][x] {
                continue;
            }
            match direction {
                RotationDirection::Clockwise => cells[x][h - 1 - y] = true,
                RotationDirection::CounterClockwise => cells[w - 1 - x][y] = true,
            }
        }
    }

    ShapeMatrix {
        width: matrix.height,
        height: matrix.width,
        cells,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_rows_rejects_malformed_input() {
        assert!(ShapeMatrix::from_rows(&[]).is_none());
        assert!(ShapeMatrix::from_rows(&[&[]]).is_none());
        assert!(ShapeMatrix::from_rows(&[&[1, 1], &[1]]).is_none());
        assert!(ShapeMatrix::from_rows(&[&[1, 1, 1, 1, 1]]).is_none());
        assert!(ShapeMatrix::from_rows(&[&[1], &[1], &[1], &[1], &[1]]).is_none());
    }

    #[test]
    fn test_rotate_cw_t_shape() {
        let t = ShapeMatrix::from_rows(&[&[0, 1, 0], &[1, 1, 1]]).unwrap();
        let cw = t.rotated_cw();

        assert_eq!(cw.width(), 2);
        assert_eq!(cw.height(), 3);
        assert_eq!(cw.to_rows(), vec![vec![1, 0], vec![1, 1], vec![1, 0]]);
    }

    #[test]
    fn test_rotate_ccw_t_shape() {
        let t = ShapeMatrix::from_rows(&[&[0, 1, 0], &[1, 1, 1]]).unwrap();
        let ccw = t.rotated_ccw();

        assert_eq!(ccw.to_rows(), vec![vec![0, 1], vec![1, 1], vec![0, 1]]);
    }

    #[test]
    fn test_rotate_does_not_mutate_input() {
        let j = ShapeMatrix::from_rows(&[&[1, 0, 0], &[1, 1, 1]]).unwrap();
        let before = j;
        let _ = rotate(&j, RotationDirection::Clockwise);
        assert_eq!(j, before);
    }

    #[test]
    fn test_four_rotations_return_to_start() {
        let s = ShapeMatrix::from_rows(&[&[0, 1, 1], &[1, 1, 0]]).unwrap();
        let full = s.rotated_cw().rotated_cw().rotated_cw().rotated_cw();
        assert_eq!(full, s);
    }

    #[test]
    fn test_blocks_row_major() {
        let l = ShapeMatrix::from_rows(&[&[0, 0, 1], &[1, 1, 1]]).unwrap();
        let blocks: Vec<_> = l.blocks().into_iter().collect();
        assert_eq!(blocks, vec![(2, 0), (0, 1), (1, 1), (2, 1)]);
        assert_eq!(l.block_count(), 4);
    }
}
