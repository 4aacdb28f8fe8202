//! Per-piece movement rules.
//!
//! Every rule takes the board, an origin square and the color of the piece
//! being moved, and returns the destinations that piece could reach:
//! squares held by its own side are never included, squares held by the
//! other side are included as captures. Nothing here looks at whose turn it
//! is or whether the mover's own king would be left in check.

use super::attacks::is_attacked;
use chess_core::{Board, CastleSide, Color, Square, SquareSet};

/// (file, rank) offsets of the eight knight jumps.
const KNIGHT_OFFSETS: [(i8, i8); 8] = [
    (1, 2),
    (2, 1),
    (2, -1),
    (1, -2),
    (-1, -2),
    (-2, -1),
    (-2, 1),
    (-1, 2),
];

/// (file, rank) offsets of the eight neighbouring squares.
const KING_OFFSETS: [(i8, i8); 8] = [
    (0, 1),
    (1, 1),
    (1, 0),
    (1, -1),
    (0, -1),
    (-1, -1),
    (-1, 0),
    (-1, 1),
];

const DIAGONALS: [(i8, i8); 4] = [(1, 1), (1, -1), (-1, -1), (-1, 1)];

const ORTHOGONALS: [(i8, i8); 4] = [(0, 1), (1, 0), (0, -1), (-1, 0)];

/// Single-step targets at fixed offsets, minus squares held by `color`.
fn step_targets(board: &Board, from: Square, color: Color, offsets: &[(i8, i8)]) -> SquareSet {
    offsets
        .iter()
        .filter_map(|&(df, dr)| from.offset(df, dr))
        .filter(|&to| board.color_at(to) != Some(color))
        .collect()
}

/// Casts a ray per direction until the edge or the first occupied square,
/// which is included only when it holds an enemy piece.
fn ray_targets(board: &Board, from: Square, color: Color, directions: &[(i8, i8)]) -> SquareSet {
    let mut targets = SquareSet::EMPTY;
    for &(df, dr) in directions {
        let mut cursor = from;
        while let Some(to) = cursor.offset(df, dr) {
            match board.color_at(to) {
                None => targets.insert(to),
                Some(occupant) => {
                    if occupant != color {
                        targets.insert(to);
                    }
                    break;
                }
            }
            cursor = to;
        }
    }
    targets
}

/// Pawn pushes and captures.
///
/// One square forward onto an empty square; two from the starting rank when
/// both squares are empty; one diagonal forward only onto an enemy piece.
/// En passant is not generated.
pub fn pawn_moves(board: &Board, from: Square, color: Color) -> SquareSet {
    let forward = color.forward();
    let mut targets = SquareSet::EMPTY;

    if let Some(one) = from.offset(0, forward) {
        if board.is_empty(one) {
            targets.insert(one);
            if from.rank() == color.pawn_rank() {
                if let Some(two) = from.offset(0, 2 * forward) {
                    if board.is_empty(two) {
                        targets.insert(two);
                    }
                }
            }
        }
    }

    for to in pawn_capture_squares(from, color) {
        if board.color_at(to) == Some(color.opposite()) {
            targets.insert(to);
        }
    }

    targets
}

/// The two forward diagonals of a pawn, regardless of what stands on them.
pub fn pawn_capture_squares(from: Square, color: Color) -> SquareSet {
    [-1, 1]
        .into_iter()
        .filter_map(|df| from.offset(df, color.forward()))
        .collect()
}

pub fn knight_moves(board: &Board, from: Square, color: Color) -> SquareSet {
    step_targets(board, from, color, &KNIGHT_OFFSETS)
}

pub fn bishop_moves(board: &Board, from: Square, color: Color) -> SquareSet {
    ray_targets(board, from, color, &DIAGONALS)
}

pub fn rook_moves(board: &Board, from: Square, color: Color) -> SquareSet {
    ray_targets(board, from, color, &ORTHOGONALS)
}

/// Union of the bishop and rook rules from the same square.
pub fn queen_moves(board: &Board, from: Square, color: Color) -> SquareSet {
    bishop_moves(board, from, color) | rook_moves(board, from, color)
}

/// The eight neighbouring squares, without castling.
pub fn king_steps(board: &Board, from: Square, color: Color) -> SquareSet {
    step_targets(board, from, color, &KING_OFFSETS)
}

/// Neighbouring squares plus any castling destinations.
pub fn king_moves(board: &Board, from: Square, color: Color) -> SquareSet {
    king_steps(board, from, color) | castling_moves(board, from, color)
}

/// Castling destinations (g1/c1 or g8/c8) for a king standing on `from`.
///
/// Empty unless `from` is the king's home square.
pub fn castling_moves(board: &Board, from: Square, color: Color) -> SquareSet {
    if from != CastleSide::king_home(color) {
        return SquareSet::EMPTY;
    }
    CastleSide::ALL
        .into_iter()
        .filter(|&side| can_castle(board, color, side))
        .map(|side| side.king_target(color))
        .collect()
}

/// Returns true if `color` may castle on `side` right now.
///
/// Requires the right from the castling field, a king of `color` on its
/// home square (standing in for "the king has not moved"), every square
/// between king and rook empty, and none of the king's origin, transit and
/// destination squares attacked by the opponent.
pub fn can_castle(board: &Board, color: Color, side: CastleSide) -> bool {
    if !board.castling.has(color, side) || !board.king_on_home_square(color) {
        return false;
    }
    if !(side.between(color) & board.occupied()).is_empty() {
        return false;
    }
    let them = color.opposite();
    side.king_path(color)
        .into_iter()
        .all(|sq| !is_attacked(board, sq, them))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chess_core::{CastlingRights, Piece, PieceKind};

    fn sq(s: &str) -> Square {
        Square::from_algebraic(s).unwrap()
    }

    fn set(squares: &[&str]) -> SquareSet {
        squares.iter().map(|s| sq(s)).collect()
    }

    fn board(fen: &str) -> Board {
        Board::from_fen(fen).unwrap()
    }

    #[test]
    fn knight_center_and_corner() {
        let empty = Board::empty();
        assert_eq!(knight_moves(&empty, sq("d4"), Color::White).len(), 8);
        assert_eq!(knight_moves(&empty, Square::A1, Color::White), set(&["b3", "c2"]));
        assert_eq!(knight_moves(&empty, sq("a4"), Color::Black).len(), 4);
    }

    #[test]
    fn knight_from_b1_at_start() {
        let start = Board::startpos();
        assert_eq!(knight_moves(&start, Square::B1, Color::White), set(&["a3", "c3"]));
    }

    #[test]
    fn rook_on_empty_board() {
        let targets = rook_moves(&Board::empty(), sq("d4"), Color::White);
        assert_eq!(targets.len(), 14);
        assert!(!targets.contains(sq("d4")));
        assert!(targets.contains(sq("d1")));
        assert!(targets.contains(sq("d8")));
        assert!(targets.contains(sq("a4")));
        assert!(targets.contains(sq("h4")));
    }

    #[test]
    fn rook_stops_at_blockers() {
        // White rook d4, white pawn d6, black knight f4.
        let b = board("8/8/3P4/8/3R1n2/8/8/8 w - - 0 1");
        let targets = rook_moves(&b, sq("d4"), Color::White);
        assert!(targets.contains(sq("d5")));
        assert!(!targets.contains(sq("d6")));
        assert!(!targets.contains(sq("d7")));
        assert!(targets.contains(sq("e4")));
        assert!(targets.contains(sq("f4")));
        assert!(!targets.contains(sq("g4")));
    }

    #[test]
    fn bishop_blocked_at_start() {
        let start = Board::startpos();
        assert!(bishop_moves(&start, Square::C1, Color::White).is_empty());
        assert!(bishop_moves(&start, Square::F8, Color::Black).is_empty());
    }

    #[test]
    fn queen_is_bishop_plus_rook() {
        let b = board("8/8/2p5/8/3Q4/8/5P2/8 w - - 0 1");
        let from = sq("d4");
        assert_eq!(
            queen_moves(&b, from, Color::White),
            bishop_moves(&b, from, Color::White) | rook_moves(&b, from, Color::White)
        );
        assert_eq!(queen_moves(&Board::empty(), from, Color::White).len(), 27);
    }

    #[test]
    fn pawn_single_and_double_push() {
        let start = Board::startpos();
        assert_eq!(pawn_moves(&start, sq("e2"), Color::White), set(&["e3", "e4"]));
        assert_eq!(pawn_moves(&start, sq("d7"), Color::Black), set(&["d6", "d5"]));

        let advanced = board("rnbqkbnr/pppppppp/8/8/8/4P3/PPPP1PPP/RNBQKBNR b KQkq - 0 1");
        assert_eq!(pawn_moves(&advanced, sq("e3"), Color::White), set(&["e4"]));
    }

    #[test]
    fn pawn_double_push_needs_both_squares_empty() {
        let blocked_near = board("8/8/8/8/8/4n3/4P3/8 w - - 0 1");
        assert!(pawn_moves(&blocked_near, sq("e2"), Color::White).is_empty());

        let blocked_far = board("8/8/8/8/4n3/8/4P3/8 w - - 0 1");
        assert_eq!(pawn_moves(&blocked_far, sq("e2"), Color::White), set(&["e3"]));
    }

    #[test]
    fn pawn_captures_only_enemies() {
        // Black pawns on d5 and f5, a white knight on e5 blocks the push.
        let b = board("8/8/8/3pNp2/4P3/8/8/8 w - - 0 1");
        let targets = pawn_moves(&b, sq("e4"), Color::White);
        assert_eq!(targets, set(&["d5", "f5"]));

        let b = board("8/8/8/3pPN2/4P3/8/8/8 w - - 0 1");
        let targets = pawn_moves(&b, sq("e4"), Color::White);
        assert_eq!(targets, set(&["d5"]));
    }

    #[test]
    fn pawn_on_edge_file() {
        let b = board("8/8/8/8/8/1p6/P7/8 w - - 0 1");
        assert_eq!(pawn_moves(&b, sq("a2"), Color::White), set(&["a3", "a4", "b3"]));
    }

    #[test]
    fn pawn_on_last_rank_has_no_moves() {
        assert!(pawn_moves(&Board::empty(), sq("d8"), Color::White).is_empty());
        assert!(pawn_capture_squares(sq("d8"), Color::White).is_empty());
        assert_eq!(
            pawn_capture_squares(sq("d4"), Color::Black),
            set(&["c3", "e3"])
        );
    }

    #[test]
    fn king_steps_exclude_friends() {
        let start = Board::startpos();
        assert!(king_steps(&start, Square::E1, Color::White).is_empty());
        assert_eq!(king_steps(&Board::empty(), Square::A1, Color::White).len(), 3);
        assert_eq!(king_steps(&Board::empty(), sq("d4"), Color::White).len(), 8);
    }

    #[test]
    fn castling_both_sides() {
        let b = board("r3k2r/pppppppp/8/8/8/8/PPPPPPPP/R3K2R w KQkq - 0 1");
        assert_eq!(castling_moves(&b, Square::E1, Color::White), set(&["g1", "c1"]));
        assert_eq!(castling_moves(&b, Square::E8, Color::Black), set(&["g8", "c8"]));
        let targets = king_moves(&b, Square::E1, Color::White);
        assert!(targets.contains(Square::G1));
        assert!(targets.contains(Square::F1));
        assert!(targets.contains(Square::D1));
    }

    #[test]
    fn castling_requires_right() {
        let b = board("r3k2r/pppppppp/8/8/8/8/PPPPPPPP/R3K2R w Qkq - 0 1");
        assert_eq!(castling_moves(&b, Square::E1, Color::White), set(&["c1"]));
        let mut no_rights = b.clone();
        no_rights.castling = CastlingRights::NONE;
        assert!(castling_moves(&no_rights, Square::E1, Color::White).is_empty());
    }

    #[test]
    fn castling_requires_empty_path() {
        // Knight on b1 blocks queenside even though the king never crosses b1.
        let b = board("4k3/8/8/8/8/8/8/RN2K1NR w KQ - 0 1");
        assert!(castling_moves(&b, Square::E1, Color::White).is_empty());
        let b = board("4k3/8/8/8/8/8/8/RN2K2R w KQ - 0 1");
        assert_eq!(castling_moves(&b, Square::E1, Color::White), set(&["g1"]));
    }

    #[test]
    fn no_castling_out_of_through_or_into_check() {
        // Rook on e5 attacks e1: no castling at all.
        let b = board("4k3/8/8/4r3/8/8/8/R3K2R w KQ - 0 1");
        assert!(castling_moves(&b, Square::E1, Color::White).is_empty());

        // Rook on f5 attacks f1: kingside gone, queenside fine.
        let b = board("4k3/8/8/5r2/8/8/8/R3K2R w KQ - 0 1");
        assert_eq!(castling_moves(&b, Square::E1, Color::White), set(&["c1"]));

        // Rook on c5 attacks the queenside destination.
        let b = board("4k3/8/8/2r5/8/8/8/R3K2R w KQ - 0 1");
        assert_eq!(castling_moves(&b, Square::E1, Color::White), set(&["g1"]));

        // Rook on b5 only covers b1, which the king never touches.
        let b = board("4k3/8/8/1r6/8/8/8/R3K2R w KQ - 0 1");
        assert_eq!(castling_moves(&b, Square::E1, Color::White), set(&["g1", "c1"]));
    }

    #[test]
    fn castling_guard_sees_pawn_diagonals() {
        // Black pawn on g2 covers f1 and h1.
        let b = board("4k3/8/8/8/8/8/6p1/R3K2R w KQ - 0 1");
        assert!(!can_castle(&b, Color::White, CastleSide::Kingside));
        assert!(can_castle(&b, Color::White, CastleSide::Queenside));
    }

    #[test]
    fn castling_only_from_home_square() {
        let b = board("4k3/8/8/8/8/8/8/R4K1R w KQ - 0 1");
        assert!(castling_moves(&b, sq("f1"), Color::White).is_empty());

        let king = Piece::new(PieceKind::King, Color::White);
        let mut b = Board::empty().with_piece(Square::E1, king);
        b.castling = CastlingRights::ALL;
        // Asking for the wrong color's castles from e1 yields nothing.
        assert!(castling_moves(&b, Square::E1, Color::Black).is_empty());
    }
}
