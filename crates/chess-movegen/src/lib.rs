//! Client-side move filter for a chess board view.
//!
//! The backend is the authority on legality. This crate only narrows what
//! the UI offers: given the last received position it computes the squares
//! a picked-up piece may move to, tracks click-driven selection, and builds
//! an optimistic preview of a submitted move.
//!
//! This crate provides:
//! - [`legal_destinations`] / [`legal_moves`] - per-piece move filtering
//! - [`is_attacked`] - the attack predicate used by castling
//! - [`Selection`] - the click state machine
//! - [`apply_move`] - optimistic preview of a submitted move
//! - [`ClientConfig`] - TOML configuration
//!
//! Moves that leave the mover's own king in check are not filtered out, and
//! en passant captures are never offered. The backend rejects or accepts
//! whatever is submitted.
//!
//! # Example
//!
//! ```
//! use chess_core::{Board, Square};
//! use chess_movegen::{apply_move, legal_destinations, ClickOutcome, Selection};
//!
//! let board = Board::startpos();
//! let e2 = Square::from_algebraic("e2").unwrap();
//! let e4 = Square::from_algebraic("e4").unwrap();
//! assert_eq!(legal_destinations(&board, e2).len(), 2);
//!
//! let mut selection = Selection::new();
//! selection.click(&board, e2);
//! if let ClickOutcome::MoveAttempt(m) = selection.click(&board, e4) {
//!     let preview = apply_move(&board, m);
//!     assert_eq!(preview.en_passant, Some(Square::from_algebraic("e3").unwrap()));
//! }
//! ```

mod apply;
mod config;
pub mod movegen;
mod selection;

pub use apply::apply_move;
pub use config::{ClientConfig, ConfigError, DecodePolicy, PromotionChoice};
pub use movegen::{
    attackers, is_attacked, is_promotion_move, legal_destinations, legal_moves, rules, threats,
    validate_move, MoveList,
};
pub use selection::{ClickOutcome, Selection, SelectionState};
