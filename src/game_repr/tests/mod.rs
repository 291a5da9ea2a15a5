use super::*;

// ==================== HELPER FUNCTIONS ====================

/// Square from algebraic text
pub fn sq(square: &str) -> Position {
    Position::from_algebraic(square).unwrap_or_else(|| panic!("bad square {square}"))
}

pub fn empty_board() -> Board {
    Board::empty()
}

/// Helper function to place an unmoved piece
pub fn place_piece(board: &mut Board, square: &str, color: Color, piece_type: Type) {
    board.set(sq(square), Some(Piece::new(color, piece_type)));
}

pub fn legal_moves(board: &Board, square: &str) -> Vec<Move> {
    board.clone().legal_moves_from(sq(square))
}

/// Helper function to check if a move exists in the move list
pub fn has_move(moves: &[Move], from: &str, to: &str) -> bool {
    moves.iter().any(|m| m.from() == sq(from) && m.to() == sq(to))
}

/// Helper function to count moves of a specific type
pub fn count_move_type(moves: &[Move], move_type: MoveType) -> usize {
    moves.iter().filter(|m| m.move_type() == move_type).count()
}

/// Plays long algebraic moves, panicking on anything illegal
pub fn play(state: &mut GameState, moves: &[&str]) {
    for text in moves {
        let mv = state
            .parse_move(text)
            .unwrap_or_else(|| panic!("{text} is not legal in {}", state.to_fen()));
        state.make_move(mv).unwrap();
    }
}

pub fn state(fen: &str) -> GameState {
    GameState::from_fen(fen).unwrap()
}

// ==================== TEST MODULES ====================

mod check_detection;
mod checkmate;
mod stalemate;
mod draw_rules;
mod fen_parsing;
mod perft;
