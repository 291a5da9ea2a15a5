use super::super::{
    board::Board,
    moves::{CastleSide, Move},
    piece::{Piece, Type},
    position::{Direction, Position},
};
use super::MoveBuffer;

impl Board {
    /// One-step moves plus castling candidates. Whether the king may pass
    /// through attacked squares is left to the legality check.
    pub fn king_moves_into(&self, from: Position, piece: &Piece, moves: &mut MoveBuffer) {
        self.step_into(from, piece, &Direction::ALL, moves);

        if piece.has_moved || from != Position::new(piece.color.home_row(), 4) {
            return;
        }
        for side in [CastleSide::KingSide, CastleSide::QueenSide] {
            if self.can_castle_towards(from, piece, side) {
                moves.push(Move::castle(side, from));
            }
        }
    }

    pub fn king_hits_king(&self, from: Position, piece: &Piece) -> bool {
        self.step_hits_king(from, piece.color, &Direction::ALL)
    }

    /// Unmoved own rook in the corner and nothing standing in between.
    fn can_castle_towards(&self, from: Position, king: &Piece, side: CastleSide) -> bool {
        let corner = Position::new(from.row, side.rook_column());
        let rook_ready = self.get(corner).is_some_and(|rook| {
            rook.piece_type == Type::Rook && rook.color == king.color && !rook.has_moved
        });
        if !rook_ready {
            return false;
        }

        let dir = side.direction();
        let mut square = from + dir;
        while square != corner {
            if !self.is_empty(square) {
                return false;
            }
            square = square + dir;
        }
        true
    }
}
