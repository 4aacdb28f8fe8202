//! Client configuration loaded from TOML.
//!
//! ```toml
//! promotion = "queen"
//! on_decode_error = "fallback"
//! fallback_position = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1"
//! ```
//!
//! Every field is optional.

use crate::selection::Selection;
use chess_core::{Board, DecodeError, PieceKind};
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

/// Errors that can occur when loading or parsing configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to read the configuration file from disk.
    #[error("Failed to read config file: {0}")]
    Read(#[from] std::io::Error),
    /// Failed to parse the configuration file as valid TOML.
    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
    /// The configured fallback position does not decode.
    #[error("Invalid fallback position: {0}")]
    InvalidFallback(#[source] DecodeError),
}

/// Piece a pawn becomes when a promotion square is clicked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PromotionChoice {
    #[default]
    Queen,
    Rook,
    Bishop,
    Knight,
}

impl PromotionChoice {
    pub fn kind(self) -> PieceKind {
        match self {
            PromotionChoice::Queen => PieceKind::Queen,
            PromotionChoice::Rook => PieceKind::Rook,
            PromotionChoice::Bishop => PieceKind::Bishop,
            PromotionChoice::Knight => PieceKind::Knight,
        }
    }
}

/// What to do when the backend sends a position that does not decode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DecodePolicy {
    /// Show `fallback_position` instead.
    #[default]
    Fallback,
    /// Surface the error to the caller.
    Halt,
}

/// Client-side settings for the move filter.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Piece chosen for promotions. Defaults to queen.
    pub promotion: PromotionChoice,
    /// Decode error handling. Defaults to falling back.
    pub on_decode_error: DecodePolicy,
    /// Position shown when a received one fails to decode.
    /// Defaults to the standard starting position.
    pub fallback_position: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        ClientConfig {
            promotion: PromotionChoice::default(),
            on_decode_error: DecodePolicy::default(),
            fallback_position: Board::STARTPOS.to_string(),
        }
    }
}

impl ClientConfig {
    /// Loads the configuration at `path`.
    ///
    /// If the file does not exist, returns the default configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Read`] if the file exists but cannot be read,
    /// [`ConfigError::Parse`] if it is not valid TOML for this structure, or
    /// [`ConfigError::InvalidFallback`] if the fallback position is malformed.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        if path.exists() {
            let content = std::fs::read_to_string(path)?;
            Self::from_toml_str(&content)
        } else {
            tracing::debug!(path = %path.display(), "no config file, using defaults");
            Ok(Self::default())
        }
    }

    /// Parses and validates a TOML document.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: ClientConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Checks that the fallback position decodes.
    pub fn validate(&self) -> Result<(), ConfigError> {
        Board::from_fen(&self.fallback_position)
            .map(|_| ())
            .map_err(ConfigError::InvalidFallback)
    }

    /// Decodes a position received from the backend, applying the decode
    /// error policy.
    ///
    /// Under [`DecodePolicy::Fallback`] a malformed position is replaced by
    /// the fallback. The error is returned only under [`DecodePolicy::Halt`],
    /// or when the fallback itself is malformed.
    pub fn decode_position(&self, exchange: &str) -> Result<Board, DecodeError> {
        match (Board::from_fen(exchange), self.on_decode_error) {
            (Ok(board), _) => Ok(board),
            (Err(err), DecodePolicy::Halt) => Err(err),
            (Err(err), DecodePolicy::Fallback) => {
                tracing::warn!(error = %err, "received position did not decode, showing fallback");
                Board::from_fen(&self.fallback_position)
            }
        }
    }

    /// A fresh selection using the configured promotion piece.
    pub fn selection(&self) -> Selection {
        Selection::with_promotion(self.promotion.kind())
    }
}
