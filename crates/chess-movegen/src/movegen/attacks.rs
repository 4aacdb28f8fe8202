//! Attack detection.
//!
//! A full re-scan: every piece of the attacking color is asked for the
//! squares it reaches and the target is tested for membership. That costs a
//! pass over the board per query, which is fine for the handful of queries
//! a castling check makes.
//!
//! The castling rule is never consulted here. Castling is itself the only
//! caller of [`is_attacked`], and a king cannot capture by castling anyway.

use super::rules::{
    bishop_moves, king_steps, knight_moves, pawn_capture_squares, queen_moves, rook_moves,
};
use chess_core::{Board, Color, Piece, PieceKind, Square, SquareSet};

/// Squares the piece on `from` reaches for the purpose of attack detection.
///
/// Same as its move rule except that kings leave out castling, and pawns
/// contribute the diagonals they capture on instead of their pushes.
pub fn threats(board: &Board, from: Square, piece: Piece) -> SquareSet {
    let color = piece.color;
    match piece.kind {
        PieceKind::Pawn => pawn_capture_squares(from, color) - board.occupied_by(color),
        PieceKind::Knight => knight_moves(board, from, color),
        PieceKind::Bishop => bishop_moves(board, from, color),
        PieceKind::Rook => rook_moves(board, from, color),
        PieceKind::Queen => queen_moves(board, from, color),
        PieceKind::King => king_steps(board, from, color),
    }
}

/// Returns true if any piece of `by_color` reaches `square`.
///
/// Reachability only: pins, discovered checks and en passant are ignored.
pub fn is_attacked(board: &Board, square: Square, by_color: Color) -> bool {
    board
        .pieces_of(by_color)
        .any(|(from, piece)| threats(board, from, piece).contains(square))
}

/// Squares holding `by_color` pieces that reach `square`.
pub fn attackers(board: &Board, square: Square, by_color: Color) -> SquareSet {
    board
        .pieces_of(by_color)
        .filter(|&(from, piece)| threats(board, from, piece).contains(square))
        .map(|(from, _)| from)
        .collect()
}
