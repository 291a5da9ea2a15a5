use crate::game_repr::Position;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ChessError {
    #[error("invalid FEN: {0}")]
    InvalidFen(String),

    #[error("move {0} is not legal in this position")]
    IllegalMove(String),

    #[error("no piece on {0} to move")]
    MissingPiece(Position),

    #[error("the game is already over")]
    GameOver,

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, ChessError>;
