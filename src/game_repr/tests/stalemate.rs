use super::*;

// ==================== STALEMATE TESTS ====================

#[test]
fn test_stalemate_king_and_queen() {
    let mut game = state("7k/8/5K2/8/8/8/8/6Q1 w - - 0 1");
    play(&mut game, &["g1g6"]);
    assert_eq!(game.result(), Some(GameResult::draw(EndReason::Stalemate)));
}

#[test]
fn test_stalemate_from_fen() {
    let game = state("7k/8/5KQ1/8/8/8/8/8 b - - 0 1");
    let result = game.result().expect("Black has no moves");
    assert!(result.is_draw());
    assert_eq!(result.reason, EndReason::Stalemate);
}

#[test]
fn test_blocked_pawns_not_stalemate_while_king_moves() {
    let game = state("7k/8/8/p7/P7/8/8/K7 w - - 0 1");
    assert_eq!(game.result(), None);
}
