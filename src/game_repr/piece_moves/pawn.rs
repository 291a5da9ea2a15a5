use super::super::{
    board::Board,
    moves::Move,
    piece::{Piece, Type},
    position::{Direction, Position},
};
use super::MoveBuffer;

impl Board {
    pub fn pawn_moves_into(&self, from: Position, piece: &Piece, moves: &mut MoveBuffer) {
        let forward = piece.color.forward();
        let promotion_row = piece.color.promotion_row();

        let one = from + forward;
        if one.is_inside() && self.is_empty(one) {
            push_advance(from, one, promotion_row, moves);

            let two = one + forward;
            if !piece.has_moved
                && from.row == piece.color.pawn_row()
                && two.is_inside()
                && self.is_empty(two)
            {
                moves.push(Move::double_pawn(from, two));
            }
        }

        let enemy_skip = self.pawn_skip(piece.color.opposite());
        for side in [Direction::EAST, Direction::WEST] {
            let to = from + forward + side;
            if !to.is_inside() {
                continue;
            }
            match self.get(to) {
                Some(target) if target.color != piece.color => {
                    push_advance(from, to, promotion_row, moves);
                }
                None if enemy_skip == Some(to) => {
                    let victim = Position::new(from.row, to.column);
                    if self
                        .get(victim)
                        .is_some_and(|p| p.piece_type == Type::Pawn && p.color != piece.color)
                    {
                        moves.push(Move::en_passant(from, to));
                    }
                }
                _ => {}
            }
        }
    }

    pub fn pawn_hits_king(&self, from: Position, piece: &Piece) -> bool {
        let forward = piece.color.forward();
        self.step_hits_king(from, piece.color, &[forward + Direction::EAST, forward + Direction::WEST])
    }
}

/// A pawn reaching the far row becomes four promotion moves.
fn push_advance(from: Position, to: Position, promotion_row: i8, moves: &mut MoveBuffer) {
    if to.row == promotion_row {
        for promote_to in Type::PROMOTIONS {
            moves.push(Move::promotion(from, to, promote_to));
        }
    } else {
        moves.push(Move::normal(from, to));
    }
}
