mod board;
mod game_state;
mod moves;
mod piece;
mod piece_moves;
mod position;

#[cfg(test)]
mod tests;

pub use board::*;
pub use game_state::*;
pub use moves::*;
pub use piece::*;
pub use piece_moves::MoveBuffer;
pub use position::*;
