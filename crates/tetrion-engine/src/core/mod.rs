//! Board and piece data types.
//!
//! - [`Shape`] - binary occupancy matrix and the clockwise rotation
//! - [`PieceKind`], [`PieceDefinition`], [`FallingPiece`] - the piece catalog and piece instances
//! - [`Grid`] - the cell matrix with collision testing, locking and line clearing

pub use self::{grid::*, piece::*, shape::*};

pub(crate) mod grid;
pub(crate) mod piece;
pub(crate) mod shape;

/// Converts a cell index into a signed board coordinate.
///
/// Board and shape dimensions are bounded far below `i32::MAX`
/// (see [`EngineConfig::validate`](crate::EngineConfig::validate)).
#[expect(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
pub(crate) const fn to_coord(n: usize) -> i32 {
    n as i32
}
