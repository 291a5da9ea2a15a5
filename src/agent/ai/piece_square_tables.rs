// Piece-square tables for positional evaluation
// Values in centipawns, laid out like the board: row 0 is rank 8.
// Tables are written from White's side; Black reads them mirrored.

use crate::game_repr::{Color, Position, Type};

pub const PAWN_TABLE: [i32; 64] = [
     0,  0,  0,  0,  0,  0,  0,  0,  // Rank 8
    50, 50, 50, 50, 50, 50, 50, 50,  // Rank 7
    10, 10, 20, 30, 30, 20, 10, 10,  // Rank 6
     5,  5, 10, 25, 25, 10,  5,  5,  // Rank 5
     0,  0,  0, 20, 20,  0,  0,  0,  // Rank 4
     5, -5,-10,  0,  0,-10, -5,  5,  // Rank 3
     5, 10, 10,-20,-20, 10, 10,  5,  // Rank 2
     0,  0,  0,  0,  0,  0,  0,  0,  // Rank 1
];

pub const KNIGHT_TABLE: [i32; 64] = [
    -50,-40,-30,-30,-30,-30,-40,-50,
    -40,-20,  0,  0,  0,  0,-20,-40,
    -30,  0, 10, 15, 15, 10,  0,-30,
    -30,  5, 15, 20, 20, 15,  5,-30,
    -30,  0, 15, 20, 20, 15,  0,-30,
    -30,  5, 10, 15, 15, 10,  5,-30,
    -40,-20,  0,  5,  5,  0,-20,-40,
    -50,-40,-30,-30,-30,-30,-40,-50,
];

pub const BISHOP_TABLE: [i32; 64] = [
    -20,-10,-10,-10,-10,-10,-10,-20,
    -10,  0,  0,  0,  0,  0,  0,-10,
    -10,  0,  5, 10, 10,  5,  0,-10,
    -10,  5,  5, 10, 10,  5,  5,-10,
    -10,  0, 10, 10, 10, 10,  0,-10,
    -10, 10, 10, 10, 10, 10, 10,-10,
    -10,  5,  0,  0,  0,  0,  5,-10,
    -20,-10,-10,-10,-10,-10,-10,-20,
];

// Seventh rank bonus, slight preference for central files at home
pub const ROOK_TABLE: [i32; 64] = [
     0,  0,  0,  0,  0,  0,  0,  0,
     5, 10, 10, 10, 10, 10, 10,  5,
    -5,  0,  0,  0,  0,  0,  0, -5,
    -5,  0,  0,  0,  0,  0,  0, -5,
    -5,  0,  0,  0,  0,  0,  0, -5,
    -5,  0,  0,  0,  0,  0,  0, -5,
    -5,  0,  0,  0,  0,  0,  0, -5,
     0,  0,  0,  5,  5,  0,  0,  0,
];

pub const QUEEN_TABLE: [i32; 64] = [
    -20,-10,-10, -5, -5,-10,-10,-20,
    -10,  0,  0,  0,  0,  0,  0,-10,
    -10,  0,  5,  5,  5,  5,  0,-10,
     -5,  0,  5,  5,  5,  5,  0, -5,
      0,  0,  5,  5,  5,  5,  0, -5,
    -10,  5,  5,  5,  5,  5,  0,-10,
    -10,  0,  5,  0,  0,  0,  0,-10,
    -20,-10,-10, -5, -5,-10,-10,-20,
];

// King stays behind its pawns, castled corners preferred
pub const KING_TABLE: [i32; 64] = [
    -30,-40,-40,-50,-50,-40,-40,-30,
    -30,-40,-40,-50,-50,-40,-40,-30,
    -30,-40,-40,-50,-50,-40,-40,-30,
    -30,-40,-40,-50,-50,-40,-40,-30,
    -20,-30,-30,-40,-40,-30,-30,-20,
    -10,-20,-20,-20,-20,-20,-20,-10,
     20, 20,  0,  0,  0,  0, 20, 20,
     20, 30, 10,  0,  0, 10, 30, 20,
];

/// Table value for `piece_type` of `color` standing on `pos`.
pub fn pst_value(piece_type: Type, color: Color, pos: Position) -> i32 {
    let row = match color {
        Color::White => pos.row,
        Color::Black => 7 - pos.row,
    };
    let idx = row as usize * 8 + pos.column as usize;

    match piece_type {
        Type::Pawn => PAWN_TABLE[idx],
        Type::Knight => KNIGHT_TABLE[idx],
        Type::Bishop => BISHOP_TABLE[idx],
        Type::Rook => ROOK_TABLE[idx],
        Type::Queen => QUEEN_TABLE[idx],
        Type::King => KING_TABLE[idx],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sq(s: &str) -> Position {
        Position::from_algebraic(s).unwrap()
    }

    #[test]
    fn test_pawn_prefers_advancement() {
        let rank2 = pst_value(Type::Pawn, Color::White, sq("d2"));
        let rank7 = pst_value(Type::Pawn, Color::White, sq("d7"));
        assert!(rank7 > rank2);
    }

    #[test]
    fn test_knight_prefers_center() {
        let center = pst_value(Type::Knight, Color::White, sq("d4"));
        let edge = pst_value(Type::Knight, Color::White, sq("a1"));
        assert!(center > edge);
    }

    #[test]
    fn test_king_prefers_castled_corner() {
        let castled = pst_value(Type::King, Color::White, sq("g1"));
        let center = pst_value(Type::King, Color::White, sq("d4"));
        assert!(castled > center);
    }

    #[test]
    fn test_black_pieces_mirrored() {
        for (white, black) in [("d2", "d7"), ("g1", "g8"), ("b5", "b4")] {
            for piece_type in [Type::Pawn, Type::Knight, Type::King, Type::Rook] {
                assert_eq!(
                    pst_value(piece_type, Color::White, sq(white)),
                    pst_value(piece_type, Color::Black, sq(black)),
                    "{piece_type:?} {white}/{black}"
                );
            }
        }
    }
}
