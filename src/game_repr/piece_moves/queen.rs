use super::super::{board::Board, piece::Piece, position::{Direction, Position}};
use super::MoveBuffer;

impl Board {
    /// Rook rays plus bishop rays.
    pub fn queen_moves_into(&self, from: Position, piece: &Piece, moves: &mut MoveBuffer) {
        self.slide_into(from, piece, &Direction::ALL, moves);
    }

    pub fn queen_hits_king(&self, from: Position, piece: &Piece) -> bool {
        self.slide_hits_king(from, piece.color, &Direction::ALL)
    }
}
