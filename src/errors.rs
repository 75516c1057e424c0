//! Error type shared by parsing and protocol-facing code.
//!
//! Only malformed external input is reported through `ChessError`. Broken
//! internal invariants (scanning an empty bitboard, reverting with no history,
//! a missing king) are programming errors and panic instead.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ChessError {
    #[error("missing {0} field in FEN")]
    MissingFenField(&'static str),

    #[error("board layout must contain 8 ranks, found {0}")]
    WrongRankCount(usize),

    #[error("rank {rank} covers {files} files instead of 8")]
    BadRankLength { rank: usize, files: usize },

    #[error("invalid piece character '{0}' in board layout")]
    InvalidPieceChar(char),

    #[error("{color} must have exactly one king, found {count}")]
    KingCount { color: &'static str, count: u32 },

    #[error("invalid side-to-move field: {0}")]
    InvalidSideToMove(String),

    #[error("invalid castling rights character: {0}")]
    InvalidCastlingChar(char),

    #[error("invalid square: {0}")]
    InvalidSquare(String),

    #[error("invalid clock field: {0}")]
    InvalidClock(String),

    #[error("malformed move notation: {0}")]
    InvalidMoveNotation(String),

    #[error("move {0} is not legal in the current position")]
    IllegalMove(String),

    #[error("invalid value '{value}' for option {name}")]
    InvalidOptionValue { name: String, value: String },

    #[error("unknown option: {0}")]
    UnknownOption(String),

    #[error("malformed command: {0}")]
    MalformedCommand(String),
}
