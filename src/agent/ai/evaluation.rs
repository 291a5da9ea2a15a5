// Static evaluation
//
// Score = material + piece-square tables + capped mobility, plus a mop-up
// term once little material is left: the side ahead wants the enemy king
// in a corner and its own king close to it.

use crate::game_repr::{Board, Color, Position, Type};
use super::piece_square_tables::pst_value;

pub const PAWN_VALUE: i32 = 100;
pub const KNIGHT_VALUE: i32 = 320;
pub const BISHOP_VALUE: i32 = 330;
pub const ROOK_VALUE: i32 = 500;
pub const QUEEN_VALUE: i32 = 900;
pub const KING_VALUE: i32 = 20000;

/// Non-king material at or below which the mop-up term applies.
const ENDGAME_MATERIAL: i32 = 1300;
const MOBILITY_CAP: usize = 40;
const MOBILITY_WEIGHT: i32 = 2;
const CORNER_WEIGHT: i32 = 8;

pub fn piece_value(piece_type: Type) -> i32 {
    match piece_type {
        Type::Pawn => PAWN_VALUE,
        Type::Knight => KNIGHT_VALUE,
        Type::Bishop => BISHOP_VALUE,
        Type::Rook => ROOK_VALUE,
        Type::Queen => QUEEN_VALUE,
        Type::King => KING_VALUE,
    }
}

/// Evaluates `board` in centipawns from `perspective`'s point of view.
pub fn evaluate(board: &Board, perspective: Color) -> i32 {
    let mut material = 0;
    let mut positional = 0;
    let mut non_king_material = 0;

    for pos in board.piece_positions() {
        let Some(piece) = board.get(pos) else { continue };
        let sign = side_sign(piece.color);
        let value = piece_value(piece.piece_type);
        material += sign * value;
        positional += sign * pst_value(piece.piece_type, piece.color, pos);
        if piece.piece_type != Type::King {
            non_king_material += value;
        }
    }

    let mut scratch = board.clone();
    let mobility = mobility(&mut scratch, Color::White) - mobility(&mut scratch, Color::Black);

    let mut score = material + positional + mobility;
    if non_king_material <= ENDGAME_MATERIAL {
        score += mop_up(board, material.signum());
    }

    score * side_sign(perspective)
}

fn side_sign(color: Color) -> i32 {
    match color {
        Color::White => 1,
        Color::Black => -1,
    }
}

/// Legal move count, capped, scaled by the mobility weight.
fn mobility(board: &mut Board, color: Color) -> i32 {
    count_legal_moves(board, color, MOBILITY_CAP) as i32 * MOBILITY_WEIGHT
}

/// Counts legal moves for `color`, stopping at `cap`.
pub fn count_legal_moves(board: &mut Board, color: Color, cap: usize) -> usize {
    let origins: Vec<Position> = board.piece_positions_for(color).collect();
    let mut count = 0;
    for from in origins {
        let Some(piece) = board.get(from) else { continue };
        for mv in piece.get_moves(from, board) {
            if mv.is_legal_in_place(board) {
                count += 1;
                if count >= cap {
                    return count;
                }
            }
        }
    }
    count
}

/// White-relative bonus for cornering the weaker king. `advantage` is the
/// sign of the material balance.
fn mop_up(board: &Board, advantage: i32) -> i32 {
    let (Some(white_king), Some(black_king)) = (
        board.king_position(Color::White),
        board.king_position(Color::Black),
    ) else {
        return 0;
    };

    let white_to_corner = distance_to_nearest_corner(white_king);
    let black_to_corner = distance_to_nearest_corner(black_king);
    let kings_distance = white_king.manhattan_distance(black_king);

    advantage * (white_to_corner - black_to_corner) * CORNER_WEIGHT + advantage * (14 - kings_distance)
}

fn distance_to_nearest_corner(pos: Position) -> i32 {
    [(0, 0), (0, 7), (7, 0), (7, 7)]
        .into_iter()
        .map(|(row, column)| pos.manhattan_distance(Position::new(row, column)))
        .min()
        .unwrap_or(0)
}
