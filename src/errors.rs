use std::error::Error;
use std::fmt;

use crate::game_state::chess_types::Square;

/// Represents all possible error types that can occur in the move engine.
/// Every failing operation reports one of these and leaves state untouched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChessError {
    /// The position description string (FEN) is invalid or could not be parsed.
    InvalidFen(String),
    /// The long algebraic move string is invalid or could not be parsed.
    InvalidLan(String),
    /// The move is not in the legal-move list for the side to move.
    IllegalMove(String),
    /// Move construction with out-of-range or equal start/stop squares.
    InvalidMoveSquares { start: Square, stop: Square },
    /// The board is missing a king for one of the colors.
    MissingKing,
    /// A textual move names a start square with no piece on it.
    NoPieceOnSquare(Square),
    /// Undo was requested but no move has been applied.
    NothingToUndo,
}

impl fmt::Display for ChessError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChessError::InvalidFen(msg) => write!(f, "invalid FEN string: {msg}"),
            ChessError::InvalidLan(msg) => write!(f, "invalid algebraic move: {msg}"),
            ChessError::IllegalMove(msg) => write!(f, "move is not legal: {msg}"),
            ChessError::InvalidMoveSquares { start, stop } => {
                write!(f, "invalid start or end square: {start}->{stop}")
            }
            ChessError::MissingKing => write!(f, "invalid board, missing king"),
            ChessError::NoPieceOnSquare(square) => {
                write!(f, "no piece on the start square {square}")
            }
            ChessError::NothingToUndo => write!(f, "no move to undo"),
        }
    }
}

impl Error for ChessError {}
