//! Move generation.
//!
//! [`legal_destinations`] is the entry point the client calls when a piece is
//! picked up: it dispatches on the piece kind to the matching rule in
//! [`rules`] and returns the squares the piece may go to. [`legal_moves`]
//! returns the same destinations as flagged [`Move`]s, which is what gets
//! submitted to the backend.
//!
//! "Legal" here means legal under the piece's movement law plus the castling
//! guard. Moves that leave the mover's own king in check are not filtered;
//! the backend has the final word on those.

mod attacks;
pub mod rules;

use chess_core::{Board, CastleSide, Move, MoveFlag, Piece, PieceKind, Square, SquareSet};

pub use attacks::{attackers, is_attacked, threats};

/// A list of moves with a fixed maximum capacity.
///
/// Chess positions have at most 218 legal moves, so we use a fixed-size
/// array to avoid heap allocations during move generation.
#[derive(Clone)]
pub struct MoveList {
    moves: [Move; Self::MAX_MOVES],
    len: usize,
}

impl MoveList {
    /// Maximum number of legal moves in any chess position.
    pub const MAX_MOVES: usize = 256;

    /// Creates an empty move list.
    #[inline]
    pub const fn new() -> Self {
        MoveList {
            moves: [Move::NULL; Self::MAX_MOVES],
            len: 0,
        }
    }

    /// Adds a move to the list.
    #[inline]
    pub fn push(&mut self, m: Move) {
        debug_assert!(self.len < Self::MAX_MOVES);
        self.moves[self.len] = m;
        self.len += 1;
    }

    /// Returns the number of moves.
    #[inline]
    pub const fn len(&self) -> usize {
        self.len
    }

    /// Returns true if the list is empty.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns a slice of the moves.
    #[inline]
    pub fn as_slice(&self) -> &[Move] {
        &self.moves[..self.len]
    }

    /// Returns the set of destination squares in the list.
    pub fn destinations(&self) -> SquareSet {
        self.as_slice().iter().map(|m| m.to()).collect()
    }
}

impl Default for MoveList {
    fn default() -> Self {
        Self::new()
    }
}

impl std::ops::Index<usize> for MoveList {
    type Output = Move;

    #[inline]
    fn index(&self, index: usize) -> &Self::Output {
        debug_assert!(index < self.len);
        &self.moves[index]
    }
}

impl<'a> IntoIterator for &'a MoveList {
    type Item = &'a Move;
    type IntoIter = std::slice::Iter<'a, Move>;

    fn into_iter(self) -> Self::IntoIter {
        self.as_slice().iter()
    }
}

impl std::fmt::Debug for MoveList {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.as_slice()).finish()
    }
}

/// Returns the squares the piece on `origin` may move to.
///
/// Empty when `origin` holds no piece. Does not consult the side to move,
/// so it answers for either color. Pure: the board is not modified and the
/// same inputs always give the same set.
pub fn legal_destinations(board: &Board, origin: Square) -> SquareSet {
    match board.piece_at(origin) {
        Some(piece) => destinations_for(board, origin, piece),
        None => SquareSet::EMPTY,
    }
}

fn destinations_for(board: &Board, from: Square, piece: Piece) -> SquareSet {
    let color = piece.color;
    match piece.kind {
        PieceKind::Pawn => rules::pawn_moves(board, from, color),
        PieceKind::Knight => rules::knight_moves(board, from, color),
        PieceKind::Bishop => rules::bishop_moves(board, from, color),
        PieceKind::Rook => rules::rook_moves(board, from, color),
        PieceKind::Queen => rules::queen_moves(board, from, color),
        PieceKind::King => rules::king_moves(board, from, color),
    }
}

/// Returns the moves of the piece on `origin`, flagged with the special rule
/// each one triggers.
///
/// A pawn reaching its last rank yields one move per promotion piece, so the
/// list can be longer than [`legal_destinations`] while covering exactly the
/// same squares.
pub fn legal_moves(board: &Board, origin: Square) -> MoveList {
    let mut moves = MoveList::new();
    let Some(piece) = board.piece_at(origin) else {
        return moves;
    };

    for to in destinations_for(board, origin, piece) {
        match piece.kind {
            PieceKind::Pawn if to.rank() == piece.color.promotion_rank() => {
                for kind in PieceKind::PROMOTIONS {
                    if let Some(flag) = MoveFlag::promote_to(kind) {
                        moves.push(Move::new(origin, to, flag));
                    }
                }
            }
            PieceKind::Pawn if to.rank().index().abs_diff(origin.rank().index()) == 2 => {
                moves.push(Move::new(origin, to, MoveFlag::DoublePush));
            }
            PieceKind::King => moves.push(Move::new(origin, to, king_flag(piece, origin, to))),
            _ => moves.push(Move::normal(origin, to)),
        }
    }

    moves
}

fn king_flag(king: Piece, from: Square, to: Square) -> MoveFlag {
    if from != CastleSide::king_home(king.color) {
        return MoveFlag::Normal;
    }
    if to == CastleSide::Kingside.king_target(king.color) {
        MoveFlag::CastleKingside
    } else if to == CastleSide::Queenside.king_target(king.color) {
        MoveFlag::CastleQueenside
    } else {
        MoveFlag::Normal
    }
}

/// Returns true if moving the piece on `from` to `to` is a legal pawn move
/// onto the last rank, i.e. the client has to ask which piece to promote to.
pub fn is_promotion_move(board: &Board, from: Square, to: Square) -> bool {
    match board.piece_at(from) {
        Some(piece) if piece.kind == PieceKind::Pawn => {
            to.rank() == piece.color.promotion_rank() && legal_destinations(board, from).contains(to)
        }
        _ => false,
    }
}

/// Checks a move before it is submitted.
///
/// The piece on the origin must belong to the side to move and the
/// destination must be generated for it. Promotions must name their piece.
/// Returns the generated move, carrying the flags the bare coordinates
/// cannot express (double push, castling).
pub fn validate_move(board: &Board, candidate: Move) -> Option<Move> {
    let from = candidate.from();
    if board.color_at(from) != Some(board.side_to_move) {
        return None;
    }
    legal_moves(board, from)
        .as_slice()
        .iter()
        .find(|m| m.to() == candidate.to() && m.promotion() == candidate.promotion())
        .copied()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chess_core::{Color, File, Rank};

    fn sq(s: &str) -> Square {
        Square::from_algebraic(s).unwrap()
    }

    fn set(squares: &[&str]) -> SquareSet {
        squares.iter().map(|s| sq(s)).collect()
    }

    #[test]
    fn movelist_push_and_iterate() {
        let mut list = MoveList::new();
        assert!(list.is_empty());

        let e2 = Square::new(File::E, Rank::R2);
        let e4 = Square::new(File::E, Rank::R4);
        let d2 = Square::new(File::D, Rank::R2);
        let d4 = Square::new(File::D, Rank::R4);

        let m1 = Move::normal(e2, e4);
        let m2 = Move::normal(d2, d4);

        list.push(m1);
        list.push(m2);

        assert_eq!(list.len(), 2);
        assert_eq!(list[0], m1);
        assert_eq!(list[1], m2);
        assert_eq!(list.destinations(), set(&["e4", "d4"]));
    }

    #[test]
    fn movelist_default() {
        let list = MoveList::default();
        assert!(list.is_empty());
        assert_eq!(format!("{:?}", list), "[]");
    }

    #[test]
    fn empty_square_has_no_destinations() {
        let start = Board::startpos();
        assert!(legal_destinations(&start, sq("e4")).is_empty());
        assert!(legal_moves(&start, sq("e4")).is_empty());
    }

    #[test]
    fn startpos_destinations() {
        let start = Board::startpos();
        assert_eq!(legal_destinations(&start, Square::B1), set(&["a3", "c3"]));
        assert_eq!(legal_destinations(&start, sq("e2")), set(&["e3", "e4"]));
        assert!(legal_destinations(&start, Square::C1).is_empty());
        assert!(legal_destinations(&start, Square::D1).is_empty());
        assert!(legal_destinations(&start, Square::E1).is_empty());
        // Black pieces answer too, regardless of the side to move.
        assert_eq!(legal_destinations(&start, Square::G8), set(&["f6", "h6"]));
    }

    #[test]
    fn total_moves_from_startpos() {
        let start = Board::startpos();
        let total: usize = start
            .pieces_of(Color::White)
            .map(|(from, _)| legal_moves(&start, from).len())
            .sum();
        assert_eq!(total, 20);
    }

    #[test]
    fn double_push_is_flagged() {
        let start = Board::startpos();
        let moves = legal_moves(&start, sq("e2"));
        assert_eq!(moves.len(), 2);
        let double = moves.as_slice().iter().find(|m| m.to() == sq("e4")).unwrap();
        assert_eq!(double.flag(), MoveFlag::DoublePush);
        let single = moves.as_slice().iter().find(|m| m.to() == sq("e3")).unwrap();
        assert_eq!(single.flag(), MoveFlag::Normal);
    }

    #[test]
    fn promotion_yields_four_moves() {
        let board = Board::from_fen("1r2k3/P7/8/8/8/8/8/4K3 w - - 0 1").unwrap();
        let moves = legal_moves(&board, sq("a7"));
        // a8 push and b8 capture, four pieces each.
        assert_eq!(moves.len(), 8);
        assert!(moves.as_slice().iter().all(|m| m.flag().is_promotion()));
        assert_eq!(moves.destinations(), legal_destinations(&board, sq("a7")));
        assert!(is_promotion_move(&board, sq("a7"), sq("a8")));
        assert!(is_promotion_move(&board, sq("a7"), sq("b8")));
        assert!(!is_promotion_move(&board, sq("a7"), sq("c8")));
        assert!(!is_promotion_move(&board, Square::E1, Square::E8));
    }

    #[test]
    fn black_promotion() {
        let board = Board::from_fen("4k3/8/8/8/8/8/3p4/4K3 b - - 0 1").unwrap();
        assert!(is_promotion_move(&board, sq("d2"), Square::D1));
        // Capturing onto e1 promotes as well, c1 is not reachable.
        assert!(is_promotion_move(&board, sq("d2"), Square::E1));
        assert!(!is_promotion_move(&board, sq("d2"), Square::C1));
    }

    #[test]
    fn castling_is_flagged() {
        let board = Board::from_fen("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1").unwrap();
        let moves = legal_moves(&board, Square::E1);
        let flag_of = |to: Square| {
            moves
                .as_slice()
                .iter()
                .find(|m| m.to() == to)
                .map(|m| m.flag())
        };
        assert_eq!(flag_of(Square::G1), Some(MoveFlag::CastleKingside));
        assert_eq!(flag_of(Square::C1), Some(MoveFlag::CastleQueenside));
        assert_eq!(flag_of(Square::F1), Some(MoveFlag::Normal));
    }

    #[test]
    fn king_away_from_home_never_castles() {
        // A king on f1 stepping to g1 is an ordinary move.
        let board = Board::from_fen("4k3/8/8/8/8/8/8/5K2 w KQ - 0 1").unwrap();
        let moves = legal_moves(&board, Square::F1);
        assert!(moves.as_slice().iter().all(|m| m.flag() == MoveFlag::Normal));
    }

    #[test]
    fn validate_before_submit() {
        let start = Board::startpos();
        let m = validate_move(&start, Move::from_uci("e2e4").unwrap()).unwrap();
        assert_eq!(m.flag(), MoveFlag::DoublePush);

        assert!(validate_move(&start, Move::from_uci("e2e5").unwrap()).is_none());
        // Black pawn while White is to move.
        assert!(validate_move(&start, Move::from_uci("e7e5").unwrap()).is_none());
        // Empty origin.
        assert!(validate_move(&start, Move::from_uci("e4e5").unwrap()).is_none());

        let board = Board::from_fen("4k3/P7/8/8/8/8/8/4K3 w - - 0 1").unwrap();
        assert!(validate_move(&board, Move::from_uci("a7a8").unwrap()).is_none());
        let promo = validate_move(&board, Move::from_uci("a7a8n").unwrap()).unwrap();
        assert_eq!(promo.promotion(), Some(PieceKind::Knight));
    }

    #[test]
    fn generation_does_not_touch_board() {
        let board = Board::from_fen("r3k2r/pppq1ppp/8/8/8/8/PPPQ1PPP/R3K2R w KQkq - 0 1").unwrap();
        let before = board.clone();
        for sq in Square::all() {
            let first = legal_destinations(&board, sq);
            let second = legal_destinations(&board, sq);
            assert_eq!(first, second);
        }
        assert_eq!(board, before);
    }
}
