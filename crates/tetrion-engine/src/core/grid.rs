use super::{
    piece::{FallingPiece, PieceColor, PieceKind},
    shape::Shape,
};

/// A single cell of the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, derive_more::IsVariant)]
pub enum Cell {
    /// Empty cell.
    #[default]
    Empty,
    /// Cell filled by a locked piece of a specific type.
    Filled(PieceKind),
}

impl Cell {
    #[must_use]
    pub fn kind(self) -> Option<PieceKind> {
        match self {
            Cell::Empty => None,
            Cell::Filled(kind) => Some(kind),
        }
    }

    #[must_use]
    pub fn color(self) -> Option<PieceColor> {
        self.kind().map(PieceKind::color)
    }
}

/// A single row of the grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GridRow {
    cells: Vec<Cell>,
}

impl GridRow {
    fn empty(width: usize) -> Self {
        Self {
            cells: vec![Cell::Empty; width],
        }
    }

    #[must_use]
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Checks if every cell of the row is filled.
    #[must_use]
    pub fn is_full(&self) -> bool {
        self.cells.iter().all(|cell| cell.is_filled())
    }
}

/// Fixed-size cell matrix holding the locked pieces.
///
/// Rows are stored top to bottom (row 0 is the top of the visible board).
/// The dimensions are fixed at construction; only cell contents change.
///
/// # Collision rules
///
/// [`is_colliding`](Self::is_colliding) treats the left, right and bottom
/// edges as walls. The top edge is open: cells above row 0 are outside the
/// grid but never collide, so a piece may spawn with part of its bounding
/// box above the board.
///
/// # Example
///
/// ```
/// use tetrion_engine::{FallingPiece, Grid, PieceDefinition, PieceKind};
///
/// let mut grid = Grid::new(10, 20);
/// let piece = FallingPiece::new(PieceDefinition::new(PieceKind::O), 0, 18);
/// assert!(!grid.is_piece_colliding(&piece));
///
/// grid.fill_piece(&piece);
/// assert!(grid.is_piece_colliding(&piece));
/// assert_eq!(grid.clear_lines(), 0);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    width: usize,
    height: usize,
    rows: Vec<GridRow>,
}

impl Grid {
    /// Creates an empty grid of `width` columns and `height` rows.
    #[must_use]
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            rows: vec![GridRow::empty(width); height],
        }
    }

    #[must_use]
    pub fn width(&self) -> usize {
        self.width
    }

    #[must_use]
    pub fn height(&self) -> usize {
        self.height
    }

    /// Returns an iterator over the rows, top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> + '_ {
        self.rows.iter().map(GridRow::cells)
    }

    /// Returns the cell at column `x`, row `y`, or `None` outside the grid.
    #[must_use]
    pub fn cell(&self, x: usize, y: usize) -> Option<Cell> {
        self.rows.get(y)?.cells.get(x).copied()
    }

    /// Overwrites the cell at column `x`, row `y`.
    ///
    /// Returns `false` (and changes nothing) if the position is outside the grid.
    pub fn set_cell(&mut self, x: usize, y: usize, cell: Cell) -> bool {
        match self.rows.get_mut(y).and_then(|row| row.cells.get_mut(x)) {
            Some(slot) => {
                *slot = cell;
                true
            }
            None => false,
        }
    }

    #[must_use]
    pub fn is_row_full(&self, y: usize) -> bool {
        self.rows.get(y).is_some_and(GridRow::is_full)
    }

    /// Number of filled cells on the whole grid.
    #[must_use]
    pub fn filled_count(&self) -> usize {
        self.rows
            .iter()
            .flat_map(|row| &row.cells)
            .filter(|cell| cell.is_filled())
            .count()
    }

    /// Checks whether `shape` anchored at `(x, y)` overlaps filled cells or leaves the grid.
    ///
    /// An occupied sub-cell at board position `(col, row)` collides when
    /// `col < 0`, `col >= width`, `row >= height`, or `row >= 0` and the cell is filled.
    /// Sub-cells with `row < 0` are only subject to the column checks.
    #[must_use]
    pub fn is_colliding(&self, shape: &Shape, x: i32, y: i32) -> bool {
        shape.occupied_offsets().any(|(dx, dy)| {
            let Ok(col) = usize::try_from(x.saturating_add(dx)) else {
                return true;
            };
            if col >= self.width {
                return true;
            }
            let Ok(row) = usize::try_from(y.saturating_add(dy)) else {
                return false;
            };
            row >= self.height || self.rows[row].cells[col].is_filled()
        })
    }

    /// Checks whether the piece collides at its current position.
    #[must_use]
    pub fn is_piece_colliding(&self, piece: &FallingPiece) -> bool {
        self.is_colliding(piece.shape(), piece.x(), piece.y())
    }

    /// Locks a piece onto the grid by filling its occupied cells.
    ///
    /// Cells above the top of the grid are dropped. Returns the number of
    /// cells written.
    pub fn fill_piece(&mut self, piece: &FallingPiece) -> usize {
        let mut written = 0;
        for (x, y) in piece.occupied_positions() {
            let (Ok(x), Ok(y)) = (usize::try_from(x), usize::try_from(y)) else {
                continue;
            };
            if self.set_cell(x, y, Cell::Filled(piece.kind())) {
                written += 1;
            }
        }
        written
    }

    /// Clears full rows and returns the number of rows cleared.
    ///
    /// Remaining rows keep their relative order and shift down; the same
    /// number of empty rows is inserted at the top.
    pub fn clear_lines(&mut self) -> usize {
        let mut count = 0;
        for y in (0..self.height).rev() {
            if self.rows[y].is_full() {
                count += 1;
                continue;
            }
            if count > 0 {
                self.rows.swap(y, y + count);
            }
        }
        for row in &mut self.rows[..count] {
            *row = GridRow::empty(self.width);
        }
        count
    }

    /// Creates a grid from ASCII art.
    ///
    /// Each non-blank line is one row, top to bottom. `.` is an empty cell and a
    /// piece letter (`I`, `O`, `T`, `L`, `J`, `S`, `Z`) is a cell filled by that
    /// piece. Whitespace is ignored. All rows must have the same length.
    ///
    /// # Panics
    ///
    /// Panics on unknown characters or rows of different lengths.
    #[must_use]
    pub fn from_ascii(art: &str) -> Self {
        let rows: Vec<GridRow> = art
            .lines()
            .filter(|line| !line.trim().is_empty())
            .map(|line| GridRow {
                cells: line
                    .chars()
                    .filter(|c| !c.is_whitespace())
                    .map(|c| match c {
                        '.' => Cell::Empty,
                        c => Cell::Filled(
                            PieceKind::from_char(c)
                                .unwrap_or_else(|| panic!("unknown grid character {c:?}")),
                        ),
                    })
                    .collect(),
            })
            .collect();
        let width = rows.first().map_or(0, |row| row.cells.len());
        for (y, row) in rows.iter().enumerate() {
            assert_eq!(
                row.cells.len(),
                width,
                "Each row must have exactly {width} cells, got {} at row {y}",
                row.cells.len()
            );
        }
        Self {
            width,
            height: rows.len(),
            rows,
        }
    }
}
