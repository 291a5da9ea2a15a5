pub mod agent;
pub mod config;
pub mod error;
pub mod game_repr;

pub use agent::ai::{Engine, OpeningBook, SearchProgress, SearchResult};
pub use config::{Difficulty, EngineConfig};
pub use error::{ChessError, Result};
pub use game_repr::{Board, Color, GameResult, GameState, Move, Piece, Position, Type};
