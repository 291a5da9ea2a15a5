// Engine-level search tests

use crate::agent::ai::search::{Engine, SearchLimits, SearchProgress};
use crate::config::EngineConfig;
use crate::game_repr::{GameState, Move};

fn engine() -> Engine {
    Engine::new(EngineConfig::default().with_seed(1))
}

fn best(fen: &str, depth: u8) -> Option<Move> {
    let state = GameState::from_fen(fen).unwrap();
    engine().choose_best_move(&state, depth, &mut |_: &SearchProgress| {})
}

#[test]
fn test_back_rank_mate() {
    let mv = best("6k1/5ppp/8/8/8/8/8/R5K1 w - - 0 1", 3).unwrap();
    assert_eq!(mv.to_long_algebraic(), "a1a8");
}

#[test]
fn test_scholars_mate() {
    let mv = best("r1bqkb1r/pppp1ppp/2n2n2/4p2Q/2B1P3/8/PPPP1PPP/RNB1K1NR w KQkq - 4 4", 2).unwrap();
    assert_eq!(mv.to_long_algebraic(), "h5f7");
}

#[test]
fn test_black_saves_attacked_queen() {
    let mv = best("4k3/8/8/3q4/8/8/3R4/4K3 b - - 0 1", 3).unwrap();
    assert_eq!(mv.from().to_algebraic(), "d5");
}

#[test]
fn test_stalemate_has_no_move() {
    assert_eq!(best("7k/5Q2/6K1/8/8/8/8/8 b - - 0 1", 3), None);
}

#[test]
fn test_same_position_same_move() {
    let fen = "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1";
    let state = GameState::from_fen(fen).unwrap();

    let mut reused = engine();
    let first = reused.choose_best_move(&state, 2, &mut |_: &SearchProgress| {});
    let second = reused.choose_best_move(&state, 2, &mut |_: &SearchProgress| {});
    let fresh = engine().choose_best_move(&state, 2, &mut |_: &SearchProgress| {});

    assert!(first.is_some());
    assert_eq!(first, second, "tables are reset between searches");
    assert_eq!(first, fresh);
}

#[test]
fn test_book_move_short_circuits_search() {
    let mut engine = engine();
    engine.book_mut().add_first_moves("e2e4\n");

    let mut events = Vec::new();
    let mv = engine.choose_best_move(&GameState::initial(), 4, &mut |event: &SearchProgress| {
        events.push(event.clone());
    });
    let mv = mv.unwrap();
    assert_eq!(mv.to_long_algebraic(), "e2e4");
    assert_eq!(events, vec![SearchProgress::BookMove { mv }]);
}

#[test]
fn test_time_limit_stops_deep_search() {
    let mut engine = Engine::new(EngineConfig::default().with_time_limit_ms(Some(50)));
    let limits = SearchLimits::depth(30).with_time_limit(Some(std::time::Duration::from_millis(50)));
    let result = engine.search(&GameState::initial(), &limits, &mut |_: &SearchProgress| {});
    assert!(result.best_move.is_some());
    assert!(result.depth < 30);
    assert!(!result.from_book);
}
