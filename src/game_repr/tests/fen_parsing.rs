// FEN Parsing Tests
//
// Reading and writing Forsyth-Edwards Notation, including the fields that
// are not visible on the board (castling, en passant, clocks).

use super::*;

// ==================== FEN PARSING TEST ====================

#[test]
fn test_default_position_from_fen() {
    let game = state("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1");
    let board = game.board();

    let a1 = board.get(sq("a1")).unwrap();
    assert_eq!((a1.color, a1.piece_type), (Color::White, Type::Rook));
    let e8 = board.get(sq("e8")).unwrap();
    assert_eq!((e8.color, e8.piece_type), (Color::Black, Type::King));

    for column in 0..8 {
        let white = board.get(Position::new(6, column)).unwrap();
        let black = board.get(Position::new(1, column)).unwrap();
        assert_eq!((white.color, white.piece_type), (Color::White, Type::Pawn));
        assert_eq!((black.color, black.piece_type), (Color::Black, Type::Pawn));
        assert!(!white.has_moved && !black.has_moved);
    }
    assert_eq!(board.piece_positions().count(), 32);
    assert_eq!(game.current_player(), Color::White);
    assert_eq!(game.castling_rights(), CastlingRights::all());
}

#[test]
fn test_initial_fen_output() {
    assert_eq!(
        GameState::initial().to_fen(),
        "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1"
    );
}

#[test]
fn test_fen_after_moves() {
    let mut game = GameState::initial();
    play(&mut game, &["e2e4"]);
    assert_eq!(
        game.to_fen(),
        "rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq e3 0 1"
    );
    play(&mut game, &["c7c5", "g1f3"]);
    assert_eq!(
        game.to_fen(),
        "rnbqkbnr/pp1ppppp/8/2p5/4P3/5N2/PPPP1PPP/RNBQKB1R b KQkq - 1 2"
    );
}

#[test]
fn test_fen_round_trip() {
    let fens = [
        "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1",
        "8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - - 0 1",
        "rnbq1k1r/pp1Pbppp/2p5/8/2B5/8/PPP1NnPP/RNBQK2R w KQ - 1 8",
        "rnbqkbnr/ppp1p1pp/8/3pPp2/8/8/PPPP1PPP/RNBQKBNR w KQkq f6 0 3",
        "4k3/8/8/8/8/8/8/4K2R b K - 17 64",
    ];
    for fen in fens {
        let game = state(fen);
        assert_eq!(game.to_fen(), fen);
        let again = state(&game.to_fen());
        assert_eq!(again.board().to_placement(), game.board().to_placement());
        assert_eq!(again.current_player(), game.current_player());
    }
}

#[test]
fn test_fen_without_clocks_uses_defaults() {
    let game = state("4k3/8/8/8/8/8/8/4K3 b - -");
    assert_eq!(game.halfmove_clock(), 0);
    assert_eq!(game.fullmove_number(), 1);
    assert_eq!(game.current_player(), Color::Black);
}

#[test]
fn test_castling_rights_need_pieces_at_home() {
    let game = state("4k3/8/8/8/8/8/8/3K3R w K - 0 1");
    assert_eq!(game.castling_rights(), CastlingRights::none());
}

#[test]
fn test_malformed_fen_is_rejected() {
    let bad = [
        "",
        "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP w KQkq - 0 1",
        "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR x KQkq - 0 1",
        "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQxq - 0 1",
        "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq e9 0 1",
        "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - x 1",
        "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1 extra",
    ];
    for fen in bad {
        assert!(GameState::from_fen(fen).is_err(), "accepted {fen:?}");
    }
}

#[test]
fn test_placement_only_constructor() {
    let game = GameState::from_placement("r3k2r/8/8/8/8/8/8/R3K2R", Color::Black).unwrap();
    assert_eq!(game.current_player(), Color::Black);
    assert_eq!(game.castling_rights(), CastlingRights::all());
    assert_eq!(game.to_fen(), "r3k2r/8/8/8/8/8/8/R3K2R b KQkq - 0 1");
}

#[test]
fn test_from_str() {
    let game: GameState = "4k3/8/8/8/8/8/8/4K3 w - - 0 1".parse().unwrap();
    assert!(game.is_game_over(), "Bare kings are a dead draw");
}
