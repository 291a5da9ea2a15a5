use super::*;

// ==================== CHECK DETECTION ====================

#[test]
fn test_initial_position_not_in_check() {
    let board = Board::initial();
    assert!(!board.is_in_check(Color::White));
    assert!(!board.is_in_check(Color::Black));
}

#[test]
fn test_check_by_each_piece_type() {
    let cases = [
        ("4k3/8/8/8/8/8/8/4K2r w - - 0 1", "rook"),
        ("4k3/8/8/8/1b6/8/8/4K3 w - - 0 1", "bishop"),
        ("4k3/8/8/8/8/8/8/q3K3 w - - 0 1", "queen"),
        ("4k3/8/8/8/8/5n2/8/4K3 w - - 0 1", "knight"),
        ("4k3/8/8/8/8/8/3p4/4K3 w - - 0 1", "pawn"),
    ];
    for (fen, attacker) in cases {
        let game = state(fen);
        assert!(game.board().is_in_check(Color::White), "{attacker} should give check");
    }
}

#[test]
fn test_pawn_does_not_check_straight_ahead() {
    let game = state("4k3/8/8/8/8/8/4p3/4K3 w - - 0 1");
    assert!(!game.board().is_in_check(Color::White));
}

#[test]
fn test_blocked_slider_gives_no_check() {
    let game = state("4k3/8/8/8/8/8/8/r2NK3 w - - 0 1");
    assert!(!game.board().is_in_check(Color::White));
}

#[test]
fn test_every_move_out_of_check_is_safe() {
    let game = state("4k3/8/8/8/1b6/8/8/R3K2R w KQ - 0 1");
    let moves = game.legal_moves();
    assert!(!moves.is_empty());
    for mv in moves {
        let mut board = game.board().clone();
        mv.execute(&mut board);
        assert!(!board.is_in_check(Color::White), "{mv} leaves the king in check");
        assert!(
            !matches!(mv, Move::Castle { .. }),
            "Castling out of check generated: {mv}"
        );
    }
}

#[test]
fn test_board_without_king_is_never_in_check() {
    let board = Board::from_placement("8/8/8/8/8/8/8/r7").unwrap();
    assert!(!board.is_in_check(Color::White));
}
