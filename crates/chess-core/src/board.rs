//! Board state: piece placement plus the companion facts from the exchange string.

use crate::{CastleSide, CastlingRights, Color, Piece, PieceKind, Square, SquareSet};

/// A chess position as received from the backend.
///
/// Placement is a 64-entry mailbox indexed like [`Square::index`], so the
/// "at most one piece per square" invariant holds by construction. A board
/// is rebuilt from every authoritative exchange string rather than edited
/// in place; local previews go through `chess_movegen::apply_move`, which
/// returns a fresh value.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Board {
    squares: [Option<Piece>; 64],

    /// The side to move.
    pub side_to_move: Color,

    /// Castling rights, the authority on castling availability.
    pub castling: CastlingRights,

    /// En passant target square. Carried for re-encoding, never used to
    /// generate captures.
    pub en_passant: Option<Square>,

    /// Halfmove clock for the 50-move rule.
    pub halfmove_clock: u32,

    /// Fullmove number (starts at 1, increments after Black's move).
    pub fullmove_number: u32,
}

impl Board {
    /// The standard starting position.
    pub const STARTPOS: &'static str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

    /// Creates a board with no pieces, White to move and no castling rights.
    pub fn empty() -> Self {
        Board {
            squares: [None; 64],
            side_to_move: Color::White,
            castling: CastlingRights::NONE,
            en_passant: None,
            halfmove_clock: 0,
            fullmove_number: 1,
        }
    }

    /// Creates the standard starting position.
    pub fn startpos() -> Self {
        Self::from_fen(Self::STARTPOS).expect("STARTPOS is valid")
    }

    /// Returns the piece on the given square, if any.
    #[inline]
    pub fn piece_at(&self, sq: Square) -> Option<Piece> {
        self.squares[sq.index() as usize]
    }

    /// Returns true if no piece stands on the square.
    #[inline]
    pub fn is_empty(&self, sq: Square) -> bool {
        self.piece_at(sq).is_none()
    }

    /// Returns the color of the piece on the square, if any.
    #[inline]
    pub fn color_at(&self, sq: Square) -> Option<Color> {
        self.piece_at(sq).map(|p| p.color)
    }

    /// Places a piece, replacing whatever stood there. Returns the replaced piece.
    pub fn set_piece(&mut self, sq: Square, piece: Piece) -> Option<Piece> {
        self.squares[sq.index() as usize].replace(piece)
    }

    /// Empties a square. Returns the piece that stood there.
    pub fn remove_piece(&mut self, sq: Square) -> Option<Piece> {
        self.squares[sq.index() as usize].take()
    }

    /// Builder-style placement, handy for setting up positions in tests.
    pub fn with_piece(mut self, sq: Square, piece: Piece) -> Self {
        self.set_piece(sq, piece);
        self
    }

    /// Iterates every occupied square with its piece, a1 to h8.
    pub fn pieces(&self) -> impl Iterator<Item = (Square, Piece)> + '_ {
        Square::all().filter_map(move |sq| self.piece_at(sq).map(|p| (sq, p)))
    }

    /// Iterates the squares holding pieces of `color`.
    pub fn pieces_of(&self, color: Color) -> impl Iterator<Item = (Square, Piece)> + '_ {
        self.pieces().filter(move |(_, p)| p.color == color)
    }

    /// Returns the set of all occupied squares.
    pub fn occupied(&self) -> SquareSet {
        self.pieces().map(|(sq, _)| sq).collect()
    }

    /// Returns the set of squares occupied by `color`.
    pub fn occupied_by(&self, color: Color) -> SquareSet {
        self.pieces_of(color).map(|(sq, _)| sq).collect()
    }

    /// Returns the square of the first king of `color`, if there is one.
    pub fn king_square(&self, color: Color) -> Option<Square> {
        self.pieces_of(color)
            .find(|(_, p)| p.kind == PieceKind::King)
            .map(|(sq, _)| sq)
    }

    /// Returns true if a king of `color` stands on e1 (White) or e8 (Black).
    ///
    /// This is a proxy for "the king has not moved" and is not tracked
    /// history. Castling legality still comes from [`Board::castling`].
    pub fn king_on_home_square(&self, color: Color) -> bool {
        self.piece_at(CastleSide::king_home(color)) == Some(Piece::new(PieceKind::King, color))
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::startpos()
    }
}
