//! Optimistic move application.
//!
//! While a submitted move waits for the backend's answer the client shows
//! the position it expects. [`apply_move`] builds that position. The result
//! is a preview only: the next authoritative exchange string replaces it
//! wholesale, whatever it contains.

use chess_core::{Board, CastleSide, Color, Move, MoveFlag, Piece, PieceKind};

/// Returns the board after `m`, leaving `board` untouched.
///
/// `m` should come from [`legal_moves`](crate::legal_moves) so that castling
/// and double pushes carry their flags. The mover is whoever stands on the
/// origin square, not necessarily the side to move.
pub fn apply_move(board: &Board, m: Move) -> Board {
    let mut next = board.clone();
    let from = m.from();
    let to = m.to();

    let Some(piece) = next.remove_piece(from) else {
        tracing::debug!(mv = %m, "no piece on origin square, preview unchanged");
        return next;
    };
    let us = piece.color;

    let placed = match m.promotion() {
        Some(kind) => Piece::new(kind, us),
        None => piece,
    };
    let captured = next.set_piece(to, placed);

    let castle = match m.flag() {
        MoveFlag::CastleKingside => Some(CastleSide::Kingside),
        MoveFlag::CastleQueenside => Some(CastleSide::Queenside),
        _ => None,
    };
    if let Some(side) = castle {
        let rook = Piece::new(PieceKind::Rook, us);
        if next.piece_at(side.rook_home(us)) == Some(rook) {
            next.remove_piece(side.rook_home(us));
            next.set_piece(side.rook_target(us), rook);
        }
    }

    // A king move gives up both rights, a rook leaving its corner gives up
    // that side, and anything landing on a corner takes that rook's right.
    if piece.kind == PieceKind::King {
        next.castling.remove_color(us);
    }
    if piece.kind == PieceKind::Rook {
        if let Some(side) = CastleSide::for_rook_home(from, us) {
            next.castling.remove(us, side);
        }
    }
    for color in Color::ALL {
        if let Some(side) = CastleSide::for_rook_home(to, color) {
            next.castling.remove(color, side);
        }
    }

    next.en_passant = if m.flag() == MoveFlag::DoublePush {
        from.offset(0, us.forward())
    } else {
        None
    };

    if piece.kind == PieceKind::Pawn || captured.is_some() {
        next.halfmove_clock = 0;
    } else {
        next.halfmove_clock = next.halfmove_clock.saturating_add(1);
    }

    if us == Color::Black {
        next.fullmove_number = next.fullmove_number.saturating_add(1);
    }

    next.side_to_move = us.opposite();

    tracing::trace!(mv = %m, fen = %next.to_fen(), "applied move optimistically");
    next
}
