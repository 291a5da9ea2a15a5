pub mod pawn;
pub mod knight;
pub mod bishop;
pub mod rook;
pub mod queen;
pub mod king;

use smallvec::SmallVec;

use super::board::Board;
use super::moves::Move;
use super::piece::{Color, Piece, Type};
use super::position::{Direction, Position};

pub type MoveBuffer = SmallVec<[Move; 32]>;

impl Board {
    /// Walks each ray until the edge, stopping before an own piece and
    /// after an enemy one.
    pub(crate) fn slide_into(&self, from: Position, piece: &Piece, dirs: &[Direction], moves: &mut MoveBuffer) {
        for &dir in dirs {
            let mut to = from + dir;
            while to.is_inside() {
                match self.get(to) {
                    None => moves.push(Move::normal(from, to)),
                    Some(other) => {
                        if other.color != piece.color {
                            moves.push(Move::normal(from, to));
                        }
                        break;
                    }
                }
                to = to + dir;
            }
        }
    }

    /// Fixed offsets, kept on the board and off own pieces.
    pub(crate) fn step_into(&self, from: Position, piece: &Piece, offsets: &[Direction], moves: &mut MoveBuffer) {
        for &dir in offsets {
            let to = from + dir;
            if to.is_inside() && !self.get(to).is_some_and(|p| p.color == piece.color) {
                moves.push(Move::normal(from, to));
            }
        }
    }

    pub(crate) fn slide_hits_king(&self, from: Position, color: Color, dirs: &[Direction]) -> bool {
        dirs.iter().any(|&dir| {
            let mut to = from + dir;
            while to.is_inside() {
                if let Some(other) = self.get(to) {
                    return is_enemy_king(other, color);
                }
                to = to + dir;
            }
            false
        })
    }

    pub(crate) fn step_hits_king(&self, from: Position, color: Color, offsets: &[Direction]) -> bool {
        offsets
            .iter()
            .any(|&dir| self.get(from + dir).is_some_and(|p| is_enemy_king(p, color)))
    }
}

fn is_enemy_king(piece: Piece, color: Color) -> bool {
    piece.piece_type == Type::King && piece.color != color
}
