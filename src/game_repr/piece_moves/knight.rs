use super::super::{board::Board, piece::Piece, position::{Direction, Position}};
use super::MoveBuffer;

impl Board {
    pub fn knight_moves_into(&self, from: Position, piece: &Piece, moves: &mut MoveBuffer) {
        self.step_into(from, piece, &Direction::KNIGHT_JUMPS, moves);
    }

    pub fn knight_hits_king(&self, from: Position, piece: &Piece) -> bool {
        self.step_hits_king(from, piece.color, &Direction::KNIGHT_JUMPS)
    }
}
