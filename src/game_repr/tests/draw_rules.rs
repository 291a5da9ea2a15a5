use super::*;

// ==================== FIFTY-MOVE RULE ====================

#[test]
fn test_fifty_move_rule() {
    let mut game = state("4k3/8/8/8/8/8/8/R3K3 w - - 90 60");
    let plies = [
        "a1a2", "e8d8", "a2a3", "d8e8", "a3a4", "e8d8", "a4a5", "d8e8", "a5a6", "e8d8",
    ];
    for (i, ply) in plies[..9].iter().enumerate() {
        play(&mut game, &[*ply]);
        assert_eq!(game.result(), None, "ended early after {} plies", i + 1);
    }
    play(&mut game, &plies[9..]);
    assert_eq!(game.halfmove_clock(), 100);
    assert_eq!(game.result(), Some(GameResult::draw(EndReason::FiftyMoveRule)));
}

#[test]
fn test_capture_resets_clock() {
    let mut game = state("4k3/8/8/8/8/8/r7/R3K3 w - - 42 30");
    play(&mut game, &["a1a2"]);
    assert_eq!(game.halfmove_clock(), 0);
}

#[test]
fn test_pawn_move_resets_clock() {
    let mut game = GameState::initial();
    play(&mut game, &["g1f3", "g8f6"]);
    assert_eq!(game.halfmove_clock(), 2);
    play(&mut game, &["e2e3"]);
    assert_eq!(game.halfmove_clock(), 0);
}

#[test]
fn test_fullmove_number_advances_after_black() {
    let mut game = GameState::initial();
    play(&mut game, &["e2e4"]);
    assert_eq!(game.fullmove_number(), 1);
    play(&mut game, &["e7e5"]);
    assert_eq!(game.fullmove_number(), 2);
}

// ==================== REPETITION ====================

#[test]
fn test_threefold_repetition() {
    let mut game = GameState::initial();
    let knights = ["g1f3", "g8f6", "f3g1", "f6g8"];
    play(&mut game, &knights);
    assert_eq!(game.repetition_count(), 2);
    assert_eq!(game.result(), None);

    play(&mut game, &knights[..3]);
    assert_eq!(game.result(), None);
    play(&mut game, &knights[3..]);
    assert_eq!(game.repetition_count(), 3);
    assert_eq!(
        game.result(),
        Some(GameResult::draw(EndReason::ThreefoldRepetition))
    );
}

#[test]
fn test_en_passant_target_distinguishes_positions() {
    let mut game = GameState::initial();
    play(&mut game, &["e2e4"]);
    let with_target = game.position_key();
    assert!(with_target.ends_with(" e3"));

    play(&mut game, &["g8f6", "g1f3", "f6g8", "f3g1"]);
    assert_eq!(Some(game.board().to_placement().as_str()), with_target.split(' ').next());
    assert_ne!(game.position_key(), with_target);
    assert_eq!(game.repetition_count(), 1);
}

// ==================== INSUFFICIENT MATERIAL ====================

#[test]
fn test_capture_down_to_bare_kings() {
    let mut game = state("4k3/8/8/8/8/8/3q4/4K3 w - - 0 1");
    play(&mut game, &["e1d2"]);
    assert_eq!(
        game.result(),
        Some(GameResult::draw(EndReason::InsufficientMaterial))
    );
}

#[test]
fn test_timeout_result() {
    let mut game = GameState::initial();
    game.set_result(GameResult::win(Color::Black, EndReason::Timeout));
    assert!(game.is_game_over());
    assert!(game.legal_moves().is_empty());
    assert_eq!(game.result().unwrap().to_string(), "Black wins by timeout");
}
