//! Click-driven selection state.
//!
//! The board UI forwards every click (or drag start) to [`Selection::click`]
//! and renders whatever [`Selection::destinations`] returns. A click on one
//! of those destinations produces the move to submit.
//!
//! A selection belongs to the board it was computed on. When a new
//! authoritative position arrives the caller clears it; it is never carried
//! over to the new board.

use crate::movegen::{legal_destinations, legal_moves};
use chess_core::{Board, Move, PieceKind, Square, SquareSet};

/// Where the selection currently stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SelectionState {
    /// Nothing selected.
    #[default]
    Idle,
    /// A piece of the side to move is picked up.
    Selected {
        square: Square,
        destinations: SquareSet,
    },
}

/// What a click did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickOutcome {
    /// A piece was picked up (or another one was picked up instead).
    Selected(Square),
    /// The selection was dropped without a move.
    Deselected,
    /// A destination was clicked. Submit this move; the selection is reset.
    MoveAttempt(Move),
    /// Nothing happened.
    Ignored,
}

/// Selection bookkeeping for one board view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    state: SelectionState,
    promotion: PieceKind,
}

impl Selection {
    /// Creates an idle selection that promotes to a queen.
    pub fn new() -> Self {
        Self::with_promotion(PieceKind::Queen)
    }

    /// Creates an idle selection that promotes to `kind`.
    ///
    /// Kinds a pawn cannot become fall back to a queen.
    pub fn with_promotion(kind: PieceKind) -> Self {
        let promotion = if kind.is_promotion_target() {
            kind
        } else {
            tracing::debug!(%kind, "not a promotion piece, using Queen");
            PieceKind::Queen
        };
        Selection {
            state: SelectionState::Idle,
            promotion,
        }
    }

    #[inline]
    pub fn state(&self) -> SelectionState {
        self.state
    }

    /// The selected square, if any.
    pub fn selected(&self) -> Option<Square> {
        match self.state {
            SelectionState::Idle => None,
            SelectionState::Selected { square, .. } => Some(square),
        }
    }

    /// Destinations of the selected piece; empty when idle.
    pub fn destinations(&self) -> SquareSet {
        match self.state {
            SelectionState::Idle => SquareSet::EMPTY,
            SelectionState::Selected { destinations, .. } => destinations,
        }
    }

    /// The piece promotions are made to.
    #[inline]
    pub fn promotion(&self) -> PieceKind {
        self.promotion
    }

    /// Drops the selection. Call this whenever a new position arrives.
    pub fn clear(&mut self) {
        self.state = SelectionState::Idle;
    }

    /// Handles a click on `square` of `board`.
    pub fn click(&mut self, board: &Board, square: Square) -> ClickOutcome {
        let own_piece = board.color_at(square) == Some(board.side_to_move);

        match self.state {
            SelectionState::Idle if own_piece => self.select(board, square),
            SelectionState::Idle => ClickOutcome::Ignored,
            SelectionState::Selected { square: from, .. } if from == square => {
                tracing::trace!(%square, "deselected");
                self.clear();
                ClickOutcome::Deselected
            }
            SelectionState::Selected {
                square: from,
                destinations,
            } if destinations.contains(square) => {
                self.clear();
                let m = self.build_move(board, from, square);
                tracing::trace!(mv = %m, "move attempt");
                ClickOutcome::MoveAttempt(m)
            }
            SelectionState::Selected { .. } if own_piece => self.select(board, square),
            SelectionState::Selected { .. } => {
                tracing::trace!(%square, "clicked away, deselected");
                self.clear();
                ClickOutcome::Deselected
            }
        }
    }

    fn select(&mut self, board: &Board, square: Square) -> ClickOutcome {
        let destinations = legal_destinations(board, square);
        tracing::trace!(%square, count = destinations.len(), "selected");
        self.state = SelectionState::Selected {
            square,
            destinations,
        };
        ClickOutcome::Selected(square)
    }

    fn build_move(&self, board: &Board, from: Square, to: Square) -> Move {
        legal_moves(board, from)
            .as_slice()
            .iter()
            .find(|m| m.to() == to && m.promotion().map_or(true, |kind| kind == self.promotion))
            .copied()
            .unwrap_or_else(|| Move::normal(from, to))
    }
}

impl Default for Selection {
    fn default() -> Self {
        Self::new()
    }
}
