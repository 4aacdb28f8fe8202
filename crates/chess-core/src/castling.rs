//! Castling rights and the fixed geometry of both castling sides.
//!
//! Rights come straight from the third field of the exchange string. They
//! are the authority on whether castling is still available; nothing here
//! tracks which pieces have moved.

use crate::{Color, File, Square, SquareSet};

/// One of the two castling directions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CastleSide {
    Kingside,
    Queenside,
}

impl CastleSide {
    pub const ALL: [CastleSide; 2] = [CastleSide::Kingside, CastleSide::Queenside];

    /// The square a king of `color` starts on.
    #[inline]
    pub const fn king_home(color: Color) -> Square {
        Square::new(File::E, color.back_rank())
    }

    /// Where the king lands.
    #[inline]
    pub const fn king_target(self, color: Color) -> Square {
        let file = match self {
            CastleSide::Kingside => File::G,
            CastleSide::Queenside => File::C,
        };
        Square::new(file, color.back_rank())
    }

    /// The square the king crosses on its way to the target.
    #[inline]
    pub const fn king_transit(self, color: Color) -> Square {
        let file = match self {
            CastleSide::Kingside => File::F,
            CastleSide::Queenside => File::D,
        };
        Square::new(file, color.back_rank())
    }

    /// Corner the rook starts from.
    #[inline]
    pub const fn rook_home(self, color: Color) -> Square {
        let file = match self {
            CastleSide::Kingside => File::H,
            CastleSide::Queenside => File::A,
        };
        Square::new(file, color.back_rank())
    }

    /// Where the rook lands: the square the king crossed.
    #[inline]
    pub const fn rook_target(self, color: Color) -> Square {
        self.king_transit(color)
    }

    /// Squares strictly between king and rook. All must be empty to castle.
    pub fn between(self, color: Color) -> SquareSet {
        let files: &[File] = match self {
            CastleSide::Kingside => &[File::F, File::G],
            CastleSide::Queenside => &[File::B, File::C, File::D],
        };
        files
            .iter()
            .map(|&file| Square::new(file, color.back_rank()))
            .collect()
    }

    /// Squares the king stands on, crosses, or lands on. None may be attacked.
    pub fn king_path(self, color: Color) -> [Square; 3] {
        [
            Self::king_home(color),
            self.king_transit(color),
            self.king_target(color),
        ]
    }

    /// The side whose rook starts on `sq`, if `sq` is a rook corner of `color`.
    pub fn for_rook_home(sq: Square, color: Color) -> Option<Self> {
        CastleSide::ALL
            .into_iter()
            .find(|side| side.rook_home(color) == sq)
    }
}

/// Castling rights flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct CastlingRights(u8);

impl CastlingRights {
    pub const NONE: CastlingRights = CastlingRights(0);
    pub const WHITE_KINGSIDE: u8 = 0b0001;
    pub const WHITE_QUEENSIDE: u8 = 0b0010;
    pub const BLACK_KINGSIDE: u8 = 0b0100;
    pub const BLACK_QUEENSIDE: u8 = 0b1000;
    pub const ALL: CastlingRights = CastlingRights(0b1111);

    /// Creates new castling rights from flags.
    #[inline]
    pub const fn new(flags: u8) -> Self {
        CastlingRights(flags & 0b1111)
    }

    /// Reads the castling field. `K`, `Q`, `k` and `q` each enable one right;
    /// `-` and any other character enable nothing.
    pub fn from_field(field: &str) -> Self {
        let mut flags = 0u8;
        for c in field.chars() {
            match c {
                'K' => flags |= Self::WHITE_KINGSIDE,
                'Q' => flags |= Self::WHITE_QUEENSIDE,
                'k' => flags |= Self::BLACK_KINGSIDE,
                'q' => flags |= Self::BLACK_QUEENSIDE,
                _ => {}
            }
        }
        CastlingRights(flags)
    }

    /// Writes the castling field, `-` when no right is left.
    pub fn to_field(self) -> String {
        if self.0 == 0 {
            return "-".to_string();
        }
        let mut field = String::with_capacity(4);
        for (flag, c) in [
            (Self::WHITE_KINGSIDE, 'K'),
            (Self::WHITE_QUEENSIDE, 'Q'),
            (Self::BLACK_KINGSIDE, 'k'),
            (Self::BLACK_QUEENSIDE, 'q'),
        ] {
            if self.0 & flag != 0 {
                field.push(c);
            }
        }
        field
    }

    #[inline]
    const fn flag(color: Color, side: CastleSide) -> u8 {
        match (color, side) {
            (Color::White, CastleSide::Kingside) => Self::WHITE_KINGSIDE,
            (Color::White, CastleSide::Queenside) => Self::WHITE_QUEENSIDE,
            (Color::Black, CastleSide::Kingside) => Self::BLACK_KINGSIDE,
            (Color::Black, CastleSide::Queenside) => Self::BLACK_QUEENSIDE,
        }
    }

    /// Returns true if `color` still has the right to castle on `side`.
    #[inline]
    pub const fn has(self, color: Color, side: CastleSide) -> bool {
        (self.0 & Self::flag(color, side)) != 0
    }

    /// Returns true if the given side can castle kingside.
    #[inline]
    pub const fn can_castle_kingside(self, color: Color) -> bool {
        self.has(color, CastleSide::Kingside)
    }

    /// Returns true if the given side can castle queenside.
    #[inline]
    pub const fn can_castle_queenside(self, color: Color) -> bool {
        self.has(color, CastleSide::Queenside)
    }

    /// Removes one right.
    #[inline]
    pub fn remove(&mut self, color: Color, side: CastleSide) {
        self.0 &= !Self::flag(color, side);
    }

    /// Removes castling rights for a color.
    #[inline]
    pub fn remove_color(&mut self, color: Color) {
        self.remove(color, CastleSide::Kingside);
        self.remove(color, CastleSide::Queenside);
    }

    /// Returns the raw flags.
    #[inline]
    pub const fn raw(self) -> u8 {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn field_parsing() {
        let rights = CastlingRights::from_field("KQkq");
        assert_eq!(rights, CastlingRights::ALL);

        let rights = CastlingRights::from_field("Kq");
        assert!(rights.can_castle_kingside(Color::White));
        assert!(!rights.can_castle_queenside(Color::White));
        assert!(!rights.can_castle_kingside(Color::Black));
        assert!(rights.can_castle_queenside(Color::Black));

        assert_eq!(CastlingRights::from_field("-"), CastlingRights::NONE);
        // Unknown characters are ignored rather than rejected.
        assert_eq!(
            CastlingRights::from_field("KXq"),
            CastlingRights::new(CastlingRights::WHITE_KINGSIDE | CastlingRights::BLACK_QUEENSIDE)
        );
    }

    #[test]
    fn field_writing() {
        assert_eq!(CastlingRights::ALL.to_field(), "KQkq");
        assert_eq!(CastlingRights::NONE.to_field(), "-");
        assert_eq!(CastlingRights::from_field("qK").to_field(), "Kq");
    }

    #[test]
    fn remove_rights() {
        let mut rights = CastlingRights::ALL;
        rights.remove(Color::White, CastleSide::Kingside);
        assert!(!rights.can_castle_kingside(Color::White));
        assert!(rights.can_castle_queenside(Color::White));

        rights.remove_color(Color::Black);
        assert!(!rights.has(Color::Black, CastleSide::Kingside));
        assert!(!rights.has(Color::Black, CastleSide::Queenside));
        assert_eq!(rights.raw(), CastlingRights::WHITE_QUEENSIDE);
    }

    #[test]
    fn geometry() {
        assert_eq!(CastleSide::king_home(Color::White), Square::E1);
        assert_eq!(CastleSide::king_home(Color::Black), Square::E8);
        assert_eq!(CastleSide::Kingside.king_target(Color::White), Square::G1);
        assert_eq!(CastleSide::Queenside.king_target(Color::Black), Square::C8);
        assert_eq!(CastleSide::Kingside.rook_target(Color::Black), Square::F8);
        assert_eq!(CastleSide::Queenside.rook_target(Color::White), Square::D1);
        assert_eq!(
            CastleSide::Queenside.between(Color::White),
            [Square::B1, Square::C1, Square::D1].into_iter().collect::<SquareSet>()
        );
        assert_eq!(
            CastleSide::Kingside.king_path(Color::Black),
            [Square::E8, Square::F8, Square::G8]
        );
    }

    #[test]
    fn rook_home_lookup() {
        assert_eq!(
            CastleSide::for_rook_home(Square::H1, Color::White),
            Some(CastleSide::Kingside)
        );
        assert_eq!(
            CastleSide::for_rook_home(Square::A8, Color::Black),
            Some(CastleSide::Queenside)
        );
        assert_eq!(CastleSide::for_rook_home(Square::A8, Color::White), None);
    }
}
