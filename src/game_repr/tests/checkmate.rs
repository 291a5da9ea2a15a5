use super::*;

// ==================== CHECKMATE TESTS ====================

#[test]
fn test_fools_mate() {
    let mut game = GameState::initial();
    play(&mut game, &["f2f3", "e7e5", "g2g4", "d8h4"]);

    let result = game.result().expect("Fool's mate ends the game");
    assert_eq!(result.winner, Some(Color::Black));
    assert_eq!(result.reason, EndReason::Checkmate);
    assert!(game.legal_moves().is_empty());
}

#[test]
fn test_scholars_mate() {
    let mut game = GameState::initial();
    play(&mut game, &["e2e4", "e7e5", "f1c4", "b8c6", "d1h5", "g8f6", "h5f7"]);
    assert_eq!(
        game.result(),
        Some(GameResult::win(Color::White, EndReason::Checkmate))
    );
}

#[test]
fn test_back_rank_mate_from_fen() {
    let game = state("R5k1/5ppp/8/8/8/8/8/6K1 b - - 0 1");
    assert_eq!(
        game.result(),
        Some(GameResult::win(Color::White, EndReason::Checkmate))
    );
}

#[test]
fn test_no_moves_after_game_over() {
    let mut game = GameState::initial();
    play(&mut game, &["f2f3", "e7e5", "g2g4", "d8h4"]);

    assert!(game.legal_moves_for_piece(sq("a2")).is_empty());
    let late = Move::normal(sq("a2"), sq("a3"));
    assert!(matches!(game.make_move(late), Err(crate::error::ChessError::GameOver)));
}

#[test]
fn test_result_is_permanent() {
    let mut game = GameState::initial();
    play(&mut game, &["f2f3", "e7e5", "g2g4", "d8h4"]);
    game.set_result(GameResult::win(Color::White, EndReason::Timeout));
    assert_eq!(game.result().map(|r| r.reason), Some(EndReason::Checkmate));
}
