use serde::{Serialize, Serializer};

use super::to_coord;

#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum ShapeError {
    #[display("shape must have at least one row and one column")]
    Empty,
    #[display("shape rows must all have the same length")]
    Ragged,
    #[display("shape must have at least one occupied cell")]
    NoOccupiedCell,
}

/// Rectangular binary matrix describing the occupied cells of a piece.
///
/// The anchor of a shape is its top-left cell. Row 0 is the top row.
/// A shape always has at least one row, one column and one occupied cell;
/// it does not have to be square.
///
/// # Example
///
/// ```
/// use tetrion_engine::Shape;
///
/// let t = Shape::from_rows(&[[0, 1, 0], [1, 1, 1]]).unwrap();
/// assert_eq!((t.width(), t.height()), (3, 2));
///
/// let rotated = t.rotated_clockwise();
/// assert_eq!((rotated.width(), rotated.height()), (2, 3));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Shape {
    width: usize,
    height: usize,
    cells: Vec<bool>,
}

impl Serialize for Shape {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        // Same layout as the catalog tables: rows of 0/1
        serializer.collect_seq(
            self.rows()
                .map(|row| row.iter().map(|&cell| u8::from(cell)).collect::<Vec<_>>()),
        )
    }
}

impl Shape {
    /// Builds a shape from rows of `0`/non-zero values.
    pub fn from_rows<R>(rows: &[R]) -> Result<Self, ShapeError>
    where
        R: AsRef<[u8]>,
    {
        let height = rows.len();
        let width = rows.first().map_or(0, |row| row.as_ref().len());
        if height == 0 || width == 0 {
            return Err(ShapeError::Empty);
        }

        let mut cells = Vec::with_capacity(width * height);
        for row in rows {
            let row = row.as_ref();
            if row.len() != width {
                return Err(ShapeError::Ragged);
            }
            cells.extend(row.iter().map(|&cell| cell != 0));
        }
        if !cells.contains(&true) {
            return Err(ShapeError::NoOccupiedCell);
        }

        Ok(Self {
            width,
            height,
            cells,
        })
    }

    #[must_use]
    pub fn width(&self) -> usize {
        self.width
    }

    #[must_use]
    pub fn height(&self) -> usize {
        self.height
    }

    /// Returns whether the cell at column `x`, row `y` is occupied.
    ///
    /// Cells outside the matrix are never occupied.
    #[must_use]
    pub fn is_occupied(&self, x: usize, y: usize) -> bool {
        x < self.width && y < self.height && self.cells[y * self.width + x]
    }

    /// Returns an iterator over the rows, top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[bool]> + '_ {
        self.cells.chunks(self.width)
    }

    /// Returns the `(dx, dy)` offsets of all occupied cells relative to the anchor.
    pub fn occupied_offsets(&self) -> impl Iterator<Item = (i32, i32)> + '_ {
        self.rows().enumerate().flat_map(|(dy, row)| {
            row.iter()
                .enumerate()
                .filter(|(_, cell)| **cell)
                .map(move |(dx, _)| (to_coord(dx), to_coord(dy)))
        })
    }

    /// Number of occupied cells.
    #[must_use]
    pub fn occupied_count(&self) -> usize {
        self.cells.iter().filter(|cell| **cell).count()
    }

    /// Returns the shape rotated 90° clockwise.
    ///
    /// Output cell `(row i, column j)` is input cell `(row height-1-j, column i)`,
    /// i.e. the transpose with each row reversed. A `w × h` shape becomes `h × w`.
    #[must_use]
    pub fn rotated_clockwise(&self) -> Self {
        let mut cells = Vec::with_capacity(self.cells.len());
        for i in 0..self.width {
            for j in 0..self.height {
                cells.push(self.cells[(self.height - 1 - j) * self.width + i]);
            }
        }
        Self {
            width: self.height,
            height: self.width,
            cells,
        }
    }
}
