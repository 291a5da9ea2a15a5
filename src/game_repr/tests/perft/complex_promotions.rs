use super::*;

// ==================== COMPLEX POSITION WITH PROMOTIONS PERFT TESTS ====================
// Position 4: Tests promotion captures and underpromotion
// FEN: r3k2r/Pppp1ppp/1b3nbN/nP6/BBP1P3/q4N2/Pp1P2PP/R2Q1RK1 w kq - 0 1

#[test]
fn test_perft_complex_promotions_depth_1() {
    let game = state("r3k2r/Pppp1ppp/1b3nbN/nP6/BBP1P3/q4N2/Pp1P2PP/R2Q1RK1 w kq - 0 1");
    assert_eq!(game.perft(1), 6);
}

#[test]
fn test_perft_complex_promotions_depth_2() {
    let game = state("r3k2r/Pppp1ppp/1b3nbN/nP6/BBP1P3/q4N2/Pp1P2PP/R2Q1RK1 w kq - 0 1");
    assert_eq!(game.perft(2), 264);
}

#[test]
fn test_perft_complex_promotions_depth_3() {
    let game = state("r3k2r/Pppp1ppp/1b3nbN/nP6/BBP1P3/q4N2/Pp1P2PP/R2Q1RK1 w kq - 0 1");
    assert_eq!(game.perft(3), 9467);
}
// ==================== POSITION 5 ====================
// FEN: rnbq1k1r/pp1Pbppp/2p5/8/2B5/8/PPP1NnPP/RNBQK2R w KQ - 1 8

#[test]
fn test_perft_position_5_depth_1() {
    let game = state("rnbq1k1r/pp1Pbppp/2p5/8/2B5/8/PPP1NnPP/RNBQK2R w KQ - 1 8");
    assert_eq!(game.perft(1), 44);
}

#[test]
fn test_perft_position_5_depth_2() {
    let game = state("rnbq1k1r/pp1Pbppp/2p5/8/2B5/8/PPP1NnPP/RNBQK2R w KQ - 1 8");
    assert_eq!(game.perft(2), 1486);
}

#[test]
fn test_perft_position_5_depth_3() {
    let game = state("rnbq1k1r/pp1Pbppp/2p5/8/2B5/8/PPP1NnPP/RNBQK2R w KQ - 1 8");
    assert_eq!(game.perft(3), 62379);
}

#[test]
fn test_divide_sums_to_perft() {
    let game = state("rnbq1k1r/pp1Pbppp/2p5/8/2B5/8/PPP1NnPP/RNBQK2R w KQ - 1 8");
    let divided = game.divide(2);
    assert_eq!(divided.len(), 44);
    assert_eq!(divided.iter().map(|(_, n)| n).sum::<u64>(), 1486);
}
