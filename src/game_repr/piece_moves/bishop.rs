use super::super::{board::Board, piece::Piece, position::{Direction, Position}};
use super::MoveBuffer;

impl Board {
    pub fn bishop_moves_into(&self, from: Position, piece: &Piece, moves: &mut MoveBuffer) {
        self.slide_into(from, piece, &Direction::DIAGONAL, moves);
    }

    pub fn bishop_hits_king(&self, from: Position, piece: &Piece) -> bool {
        self.slide_hits_king(from, piece.color, &Direction::DIAGONAL)
    }
}
