use rand::{Rng, distr::StandardUniform, prelude::Distribution};
use serde::{Deserialize, Serialize, Serializer};

use super::{shape::Shape, to_coord};

/// Enum representing the type of piece.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[repr(u8)]
pub enum PieceKind {
    /// I-piece.
    I = 0,
    /// O-piece.
    O = 1,
    /// T-piece.
    T = 2,
    /// L-piece.
    L = 3,
    /// J-piece.
    J = 4,
    /// S-piece.
    S = 5,
    /// Z-piece.
    Z = 6,
}

impl Distribution<PieceKind> for StandardUniform {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> PieceKind {
        PieceKind::ALL[rng.random_range(0..PieceKind::LEN)]
    }
}

impl PieceKind {
    /// Number of piece types (7).
    pub const LEN: usize = 7;

    /// All piece types in catalog order.
    pub const ALL: [PieceKind; Self::LEN] = [
        PieceKind::I,
        PieceKind::O,
        PieceKind::T,
        PieceKind::L,
        PieceKind::J,
        PieceKind::S,
        PieceKind::Z,
    ];

    /// Returns the spawn orientation of the piece as rows of `0`/`1`.
    #[must_use]
    pub const fn rows(self) -> &'static [&'static [u8]] {
        PIECE_ROWS[self as usize]
    }

    /// Returns the display colour of the piece.
    #[must_use]
    pub const fn color(self) -> PieceColor {
        PIECE_COLORS[self as usize]
    }

    /// Returns the single character representation of this piece kind.
    ///
    /// # Examples
    ///
    /// ```
    /// use tetrion_engine::PieceKind;
    ///
    /// assert_eq!(PieceKind::I.as_char(), 'I');
    /// assert_eq!(PieceKind::T.as_char(), 'T');
    /// ```
    #[must_use]
    pub const fn as_char(self) -> char {
        match self {
            PieceKind::I => 'I',
            PieceKind::O => 'O',
            PieceKind::T => 'T',
            PieceKind::L => 'L',
            PieceKind::J => 'J',
            PieceKind::S => 'S',
            PieceKind::Z => 'Z',
        }
    }

    /// Parses a piece kind from a single character.
    ///
    /// # Examples
    ///
    /// ```
    /// use tetrion_engine::PieceKind;
    ///
    /// assert_eq!(PieceKind::from_char('O'), Some(PieceKind::O));
    /// assert_eq!(PieceKind::from_char('X'), None);
    /// ```
    #[must_use]
    pub const fn from_char(c: char) -> Option<Self> {
        match c {
            'I' => Some(PieceKind::I),
            'O' => Some(PieceKind::O),
            'T' => Some(PieceKind::T),
            'L' => Some(PieceKind::L),
            'J' => Some(PieceKind::J),
            'S' => Some(PieceKind::S),
            'Z' => Some(PieceKind::Z),
            _ => None,
        }
    }
}

const PIECE_ROWS: [&[&[u8]]; PieceKind::LEN] = [
    // I-piece
    &[&[1, 1, 1, 1]],
    // O-piece
    &[&[1, 1], &[1, 1]],
    // T-piece
    &[&[0, 1, 0], &[1, 1, 1]],
    // L-piece
    &[&[1, 0, 0], &[1, 1, 1]],
    // J-piece
    &[&[0, 0, 1], &[1, 1, 1]],
    // S-piece
    &[&[1, 1, 0], &[0, 1, 1]],
    // Z-piece
    &[&[0, 1, 1], &[1, 1, 0]],
];

const PIECE_COLORS: [PieceColor; PieceKind::LEN] = [
    PieceColor::new(0x00, 0xf5, 0xff),
    PieceColor::new(0xff, 0xff, 0x00),
    PieceColor::new(0x80, 0x00, 0xff),
    PieceColor::new(0xff, 0x80, 0x00),
    PieceColor::new(0x00, 0x00, 0xff),
    PieceColor::new(0x00, 0xff, 0x00),
    PieceColor::new(0xff, 0x00, 0x00),
];

/// RGB colour token attached to a piece kind.
///
/// Displays and serializes as `#rrggbb`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, derive_more::Display)]
#[display("#{r:02x}{g:02x}{b:02x}")]
pub struct PieceColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl PieceColor {
    #[must_use]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

impl Serialize for PieceColor {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

/// A catalog entry: a shape together with its piece identity.
///
/// Every value owns its shape, so rotating or otherwise replacing the shape
/// of one definition never affects another one or the catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PieceDefinition {
    kind: PieceKind,
    shape: Shape,
}

impl PieceDefinition {
    /// Creates a fresh copy of the catalog entry for `kind`.
    #[must_use]
    pub fn new(kind: PieceKind) -> Self {
        let shape = Shape::from_rows(kind.rows()).expect("catalog shapes are valid");
        Self { kind, shape }
    }

    #[must_use]
    pub fn kind(&self) -> PieceKind {
        self.kind
    }

    #[must_use]
    pub fn shape(&self) -> &Shape {
        &self.shape
    }

    #[must_use]
    pub fn color(&self) -> PieceColor {
        self.kind.color()
    }
}

/// The piece currently falling on the board.
///
/// `(x, y)` is the board position of the top-left cell of the shape. Both
/// coordinates are signed: cells of a piece may sit above the visible board.
/// Movement and rotation return new values; legality is checked by the caller
/// against a [`Grid`](super::Grid).
///
/// # Example
///
/// ```
/// use tetrion_engine::{FallingPiece, PieceDefinition, PieceKind};
///
/// let piece = FallingPiece::spawn(PieceDefinition::new(PieceKind::I), 10);
/// assert_eq!((piece.x(), piece.y()), (3, 0));
///
/// let moved = piece.left().down();
/// assert_eq!((moved.x(), moved.y()), (2, 1));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FallingPiece {
    kind: PieceKind,
    shape: Shape,
    x: i32,
    y: i32,
}

impl FallingPiece {
    #[must_use]
    pub fn new(definition: PieceDefinition, x: i32, y: i32) -> Self {
        let PieceDefinition { kind, shape } = definition;
        Self { kind, shape, x, y }
    }

    /// Places a piece at the spawn position of a board `board_width` cells wide.
    ///
    /// The spawn column is `floor(board_width / 2) - floor(piece_width / 2)`, row 0.
    #[must_use]
    pub fn spawn(definition: PieceDefinition, board_width: usize) -> Self {
        let x = to_coord(board_width / 2) - to_coord(definition.shape.width() / 2);
        Self::new(definition, x, 0)
    }

    #[must_use]
    pub fn kind(&self) -> PieceKind {
        self.kind
    }

    #[must_use]
    pub fn shape(&self) -> &Shape {
        &self.shape
    }

    #[must_use]
    pub fn color(&self) -> PieceColor {
        self.kind.color()
    }

    #[must_use]
    pub fn x(&self) -> i32 {
        self.x
    }

    #[must_use]
    pub fn y(&self) -> i32 {
        self.y
    }

    /// Returns the board positions `(x, y)` of all occupied cells.
    pub fn occupied_positions(&self) -> impl Iterator<Item = (i32, i32)> + '_ {
        self.shape
            .occupied_offsets()
            .map(move |(dx, dy)| (self.x.saturating_add(dx), self.y.saturating_add(dy)))
    }

    #[must_use]
    pub fn left(&self) -> Self {
        self.shifted(-1, 0)
    }

    #[must_use]
    pub fn right(&self) -> Self {
        self.shifted(1, 0)
    }

    #[must_use]
    pub fn down(&self) -> Self {
        self.shifted(0, 1)
    }

    /// Returns the piece with its shape rotated clockwise around the same anchor.
    #[must_use]
    pub fn rotated_clockwise(&self) -> Self {
        Self {
            kind: self.kind,
            shape: self.shape.rotated_clockwise(),
            x: self.x,
            y: self.y,
        }
    }

    fn shifted(&self, dx: i32, dy: i32) -> Self {
        Self {
            kind: self.kind,
            shape: self.shape.clone(),
            x: self.x.saturating_add(dx),
            y: self.y.saturating_add(dy),
        }
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng as _;
    use rand_pcg::Pcg32;

    use super::*;

    #[test]
    fn test_catalog_shapes_are_valid() {
        for kind in PieceKind::ALL {
            let shape = Shape::from_rows(kind.rows()).unwrap();
            assert_eq!(shape.occupied_count(), 4, "{kind:?} should be a tetromino");
        }
    }

    #[test]
    fn test_catalog_shapes_restore_after_four_rotations() {
        for kind in PieceKind::ALL {
            let original = PieceDefinition::new(kind).shape().clone();
            let mut shape = original.clone();
            for _ in 0..4 {
                shape = shape.rotated_clockwise();
            }
            assert_eq!(shape, original, "{kind:?} changed after a full turn");
        }
    }

    #[test]
    fn test_definitions_are_independent_copies() {
        let a = PieceDefinition::new(PieceKind::T);
        let mut piece = FallingPiece::new(a.clone(), 0, 0);
        piece = piece.rotated_clockwise();

        assert_ne!(piece.shape(), a.shape());
        assert_eq!(PieceDefinition::new(PieceKind::T), a);
    }

    #[test]
    fn test_piece_color_display() {
        assert_eq!(PieceKind::I.color().to_string(), "#00f5ff");
        assert_eq!(PieceKind::Z.color().to_string(), "#ff0000");
        assert_eq!(
            serde_json::to_string(&PieceKind::O.color()).unwrap(),
            "\"#ffff00\""
        );
    }

    #[test]
    fn test_spawn_position() {
        for (kind, x) in [
            (PieceKind::I, 3),
            (PieceKind::O, 4),
            (PieceKind::T, 4),
            (PieceKind::S, 4),
        ] {
            let piece = FallingPiece::spawn(PieceDefinition::new(kind), 10);
            assert_eq!((piece.x(), piece.y()), (x, 0), "{kind:?}");
        }
    }

    #[test]
    fn test_occupied_positions_are_absolute() {
        let piece = FallingPiece::new(PieceDefinition::new(PieceKind::S), 2, -1);
        let positions: Vec<_> = piece.occupied_positions().collect();
        assert_eq!(positions, vec![(2, -1), (3, -1), (3, 0), (4, 0)]);
    }

    #[test]
    fn test_random_kind_covers_catalog() {
        let mut rng = Pcg32::seed_from_u64(7);
        let mut seen = [false; PieceKind::LEN];
        for _ in 0..500 {
            let kind: PieceKind = rng.random();
            seen[kind as usize] = true;
        }
        assert!(seen.iter().all(|s| *s));
    }

    #[test]
    fn test_piece_kind_char_conversion() {
        for kind in PieceKind::ALL {
            assert_eq!(PieceKind::from_char(kind.as_char()), Some(kind));
        }
        assert_eq!(PieceKind::from_char('x'), None);
    }
}
