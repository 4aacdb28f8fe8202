//! Core types for chess.
//!
//! This crate provides the fundamental types shared by the move rules and
//! the client that drives them:
//! - [`Piece`], [`PieceKind`] and [`Color`] for piece representation
//! - [`Square`], [`File`], [`Rank`] and [`SquareSet`] for board coordinates
//! - [`Board`] and [`CastlingRights`] for the position itself
//! - [`Move`] for the moves submitted to the backend
//! - FEN decoding and encoding ([`decode`], [`Board::to_fen`])

mod board;
mod castling;
mod color;
mod fen;
mod mov;
mod piece;
mod square;
mod square_set;

pub use board::Board;
pub use castling::{CastleSide, CastlingRights};
pub use color::Color;
pub use fen::{decode, DecodeError};
pub use mov::{Move, MoveFlag};
pub use piece::{Piece, PieceKind};
pub use square::{File, Rank, Square};
pub use square_set::{SquareSet, SquareSetIter};
