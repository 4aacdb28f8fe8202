//! FEN (Forsyth-Edwards Notation) decoding and encoding.
//!
//! The backend exchanges positions as six whitespace-separated fields. Only
//! placement, side to move and castling rights drive move generation; the
//! en passant square and the two clocks are accepted and carried along for
//! re-encoding, but a value that does not parse is dropped instead of
//! failing the decode.

use crate::{Board, CastlingRights, Color, Piece, Square};
use thiserror::Error;

/// Errors that can occur when decoding an exchange string.
///
/// Callers typically answer these by falling back to the starting position;
/// the decoder itself never does.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DecodeError {
    #[error("invalid FEN: expected 6 fields, got {0}")]
    FieldCount(usize),

    #[error("invalid piece placement: expected 8 ranks, got {0}")]
    RankCount(usize),

    #[error("invalid piece placement: rank {rank} describes {squares} squares, expected 8")]
    RankWidth { rank: u8, squares: u32 },

    #[error("invalid piece placement: unexpected character '{found}' in rank {rank}")]
    InvalidPiece { found: char, rank: u8 },
}

/// Decodes an exchange string into a board.
pub fn decode(fen: &str) -> Result<Board, DecodeError> {
    Board::from_fen(fen)
}

impl Board {
    /// Decodes a six-field FEN string.
    pub fn from_fen(fen: &str) -> Result<Self, DecodeError> {
        let fields: Vec<&str> = fen.split_whitespace().collect();
        if fields.len() != 6 {
            return Err(DecodeError::FieldCount(fields.len()));
        }

        let mut board = Board::empty();
        decode_placement(&mut board, fields[0])?;

        board.side_to_move = Color::from_side_field(fields[1]);
        board.castling = CastlingRights::from_field(fields[2]);

        board.en_passant = match fields[3] {
            "-" => None,
            field => {
                let sq = Square::from_algebraic(field);
                if sq.is_none() {
                    tracing::debug!(field, "ignoring unreadable en passant square");
                }
                sq
            }
        };

        board.halfmove_clock = fields[4].parse().unwrap_or_else(|_| {
            tracing::debug!(field = fields[4], "ignoring unreadable halfmove clock");
            0
        });
        board.fullmove_number = fields[5].parse().unwrap_or_else(|_| {
            tracing::debug!(field = fields[5], "ignoring unreadable fullmove number");
            1
        });

        Ok(board)
    }

    /// Encodes the piece placement field (e.g., "rnbqkbnr/pppppppp/8/...").
    pub fn placement(&self) -> String {
        let mut out = String::with_capacity(71);
        for rank in (0..8i8).rev() {
            let mut empty_count = 0;
            for file in 0..8i8 {
                let piece = Square::from_coords(file, rank).and_then(|sq| self.piece_at(sq));
                match piece {
                    Some(piece) => {
                        if empty_count > 0 {
                            out.push_str(&empty_count.to_string());
                            empty_count = 0;
                        }
                        out.push(piece.to_fen_char());
                    }
                    None => empty_count += 1,
                }
            }
            if empty_count > 0 {
                out.push_str(&empty_count.to_string());
            }
            if rank > 0 {
                out.push('/');
            }
        }
        out
    }

    /// Encodes all six fields.
    pub fn to_fen(&self) -> String {
        let en_passant = match self.en_passant {
            Some(sq) => sq.to_algebraic(),
            None => "-".to_string(),
        };
        format!(
            "{} {} {} {} {} {}",
            self.placement(),
            self.side_to_move.to_side_char(),
            self.castling.to_field(),
            en_passant,
            self.halfmove_clock,
            self.fullmove_number
        )
    }
}

fn decode_placement(board: &mut Board, placement: &str) -> Result<(), DecodeError> {
    let ranks: Vec<&str> = placement.split('/').collect();
    if ranks.len() != 8 {
        return Err(DecodeError::RankCount(ranks.len()));
    }

    for (i, group) in ranks.iter().enumerate() {
        let rank = 7 - i as i8;
        let rank_label = rank as u8 + 1;
        let mut file: u32 = 0;

        for c in group.chars() {
            if let Some(run @ 1..=8) = c.to_digit(10) {
                file += run;
                continue;
            }
            let piece = Piece::from_fen_char(c).ok_or(DecodeError::InvalidPiece {
                found: c,
                rank: rank_label,
            })?;
            let sq = Square::from_coords(file as i8, rank).ok_or(DecodeError::RankWidth {
                rank: rank_label,
                squares: file + 1,
            })?;
            board.set_piece(sq, piece);
            file += 1;
        }

        if file != 8 {
            return Err(DecodeError::RankWidth {
                rank: rank_label,
                squares: file,
            });
        }
    }

    Ok(())
}
