use serde::Serialize;

use crate::core::{FallingPiece, PieceColor, PieceDefinition, PieceKind, Shape};

use super::{GameSession, SessionStatus};

/// A piece as seen by a renderer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PieceSnapshot {
    pub kind: PieceKind,
    pub color: PieceColor,
    pub shape: Shape,
}

impl From<&PieceDefinition> for PieceSnapshot {
    fn from(piece: &PieceDefinition) -> Self {
        Self {
            kind: piece.kind(),
            color: piece.color(),
            shape: piece.shape().clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivePieceSnapshot {
    #[serde(flatten)]
    pub piece: PieceSnapshot,
    pub x: i32,
    pub y: i32,
}

impl From<&FallingPiece> for ActivePieceSnapshot {
    fn from(piece: &FallingPiece) -> Self {
        Self {
            piece: PieceSnapshot {
                kind: piece.kind(),
                color: piece.color(),
                shape: piece.shape().clone(),
            },
            x: piece.x(),
            y: piece.y(),
        }
    }
}

/// Read-only view of a session for renderers.
///
/// `cells[row][col]` holds the colour of the locked cell, or `None` when the
/// cell is empty. The falling piece is reported separately in `active`; use
/// [`composited_cells`](Self::composited_cells) to get both in one matrix.
///
/// # Example
///
/// ```
/// use tetrion_engine::{EngineConfig, GameSession, PieceFactory};
///
/// let session = GameSession::with_factory(EngineConfig::default(), PieceFactory::from_seed(1)).unwrap();
/// let snapshot = session.snapshot();
/// assert_eq!(snapshot.cells.len(), 20);
/// assert!(snapshot.cells.iter().flatten().all(Option::is_none));
///
/// let json = serde_json::to_value(&snapshot).unwrap();
/// assert_eq!(json["status"], "running");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionSnapshot {
    pub width: usize,
    pub height: usize,
    pub cells: Vec<Vec<Option<PieceColor>>>,
    pub active: ActivePieceSnapshot,
    pub next: PieceSnapshot,
    pub score: usize,
    pub status: SessionStatus,
}

impl SessionSnapshot {
    pub(crate) fn capture(session: &GameSession) -> Self {
        let grid = session.grid();
        Self {
            width: grid.width(),
            height: grid.height(),
            cells: grid
                .rows()
                .map(|row| row.iter().map(|cell| cell.color()).collect())
                .collect(),
            active: session.falling_piece().into(),
            next: session.next_piece().into(),
            score: session.score(),
            status: session.status(),
        }
    }

    /// Returns the locked cells with the falling piece drawn on top.
    ///
    /// Cells of the falling piece outside the board are skipped.
    #[must_use]
    pub fn composited_cells(&self) -> Vec<Vec<Option<PieceColor>>> {
        let mut cells = self.cells.clone();
        let active = &self.active;
        for (dx, dy) in active.piece.shape.occupied_offsets() {
            let (Ok(x), Ok(y)) = (
                usize::try_from(active.x.saturating_add(dx)),
                usize::try_from(active.y.saturating_add(dy)),
            ) else {
                continue;
            };
            if let Some(cell) = cells.get_mut(y).and_then(|row| row.get_mut(x)) {
                *cell = Some(active.piece.color);
            }
        }
        cells
    }
}

#[cfg(test)]
mod tests {
    use crate::{EngineConfig, PieceFactory};

    use super::*;

    fn snapshot_with_active(kind: PieceKind, x: i32, y: i32) -> SessionSnapshot {
        let session =
            GameSession::with_factory(EngineConfig::default(), PieceFactory::from_seed(3)).unwrap();
        let mut snapshot = session.snapshot();
        snapshot.active = (&FallingPiece::new(PieceDefinition::new(kind), x, y)).into();
        snapshot
    }

    #[test]
    fn test_capture_reflects_session() {
        let session =
            GameSession::with_factory(EngineConfig::default(), PieceFactory::from_seed(3)).unwrap();
        let snapshot = session.snapshot();
        assert_eq!((snapshot.width, snapshot.height), (10, 20));
        assert!(snapshot.cells.iter().all(|row| row.len() == 10));
        assert_eq!(snapshot.active.piece.kind, session.falling_piece().kind());
        assert_eq!(snapshot.active.x, session.falling_piece().x());
        assert_eq!(snapshot.next.kind, session.next_piece().kind());
        assert_eq!(snapshot.score, 0);
        assert!(snapshot.status.is_running());
    }

    #[test]
    fn test_composited_cells_overlay_active_piece() {
        let snapshot = snapshot_with_active(PieceKind::O, 8, 18);
        let cells = snapshot.composited_cells();
        let color = Some(PieceKind::O.color());
        assert_eq!(cells[18][8], color);
        assert_eq!(cells[18][9], color);
        assert_eq!(cells[19][8], color);
        assert_eq!(cells[19][9], color);
        assert_eq!(cells.iter().flatten().filter(|c| c.is_some()).count(), 4);
    }

    #[test]
    fn test_composited_cells_skip_cells_above_board() {
        let snapshot = snapshot_with_active(PieceKind::T, 0, -1);
        let cells = snapshot.composited_cells();
        // only the bottom row of the T is visible
        assert_eq!(cells[0][..3], [Some(PieceKind::T.color()); 3]);
        assert_eq!(cells.iter().flatten().filter(|c| c.is_some()).count(), 3);
    }

    #[test]
    fn test_active_piece_serialization() {
        let active: ActivePieceSnapshot =
            (&FallingPiece::new(PieceDefinition::new(PieceKind::S), 2, 3)).into();
        let json = serde_json::to_value(&active).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "kind": "S",
                "color": "#00ff00",
                "shape": [[1, 1, 0], [0, 1, 1]],
                "x": 2,
                "y": 3,
            })
        );
    }
}
