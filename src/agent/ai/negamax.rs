// Negamax search with alpha-beta pruning
//
// Negamax uses the zero-sum property of chess, max(a, b) = -min(-a, -b), so a
// single function searches for both sides and negates the child's score.
//
// Pruning and ordering aids:
// - Transposition table probe and store
// - Hash move, killer moves and history for ordering
// - Late move reductions for quiet moves far down the list
// - Quiescence search at the horizon
//
// Scores are from the perspective of the side to move.

use crate::game_repr::Move;
use super::evaluation::evaluate;
use super::move_ordering::order_moves;
use super::quiescence::quiescence;
use super::search::{SearchContext, SearchProgress};
use super::search_board::SearchBoard;
use super::transposition_table::{NodeType, TranspositionTableEntry};

/// Base score for checkmate. The remaining depth is added so that nearer
/// mates score higher.
pub const MATE_SCORE: i32 = 1_000_000;

/// Bound wider than any reachable score
pub const INFINITY: i32 = 2_000_000;

/// Quiet moves from this index on are searched reduced first
const LMR_MIN_INDEX: usize = 4;
const LMR_MIN_DEPTH: u8 = 3;

/// Negamax search of `sb` to `depth` within the window (`alpha`, `beta`).
pub fn negamax(
    ctx: &mut SearchContext<'_>,
    sb: &mut SearchBoard,
    depth: u8,
    mut alpha: i32,
    mut beta: i32,
) -> i32 {
    ctx.nodes += 1;
    if ctx.should_stop() {
        return 0;
    }

    let alpha_orig = alpha;
    let beta_orig = beta;
    let hash = sb.hash();
    let mut hash_move = None;

    if let Some(entry) = ctx.tt.probe(hash) {
        hash_move = entry.best_move;
        if entry.depth >= depth {
            match entry.node_type {
                NodeType::Exact => return entry.score,
                NodeType::LowerBound => alpha = alpha.max(entry.score),
                NodeType::UpperBound => beta = beta.min(entry.score),
            }
            if alpha >= beta {
                return entry.score;
            }
        }
    }

    if depth == 0 {
        return quiescence(ctx, sb, alpha, beta, 0);
    }

    let mut moves = sb.legal_moves();
    if moves.is_empty() {
        return if sb.is_in_check() {
            -(MATE_SCORE + depth as i32)
        } else {
            0
        };
    }
    order_moves(sb.board(), &mut moves, hash_move, ctx.killers, ctx.history, depth);

    let mut best_score = -INFINITY;
    let mut best_move: Option<Move> = None;

    for (index, mv) in moves.iter().enumerate() {
        let quiet = !mv.is_tactical(sb.board());
        let saved = match sb.make(mv) {
            Ok(saved) => saved,
            Err(err) => {
                ctx.report(SearchProgress::MoveFailed {
                    depth: ctx.depth(),
                    mv: *mv,
                    reason: err.to_string(),
                });
                continue;
            }
        };

        let score = if quiet && index >= LMR_MIN_INDEX && depth >= LMR_MIN_DEPTH {
            let reduced = -negamax(ctx, sb, depth - 2, -beta, -alpha);
            if reduced > alpha {
                -negamax(ctx, sb, depth - 1, -beta, -alpha)
            } else {
                reduced
            }
        } else {
            -negamax(ctx, sb, depth - 1, -beta, -alpha)
        };
        sb.unmake(&saved);

        if ctx.is_aborted() {
            return 0;
        }

        if score > best_score {
            best_score = score;
            best_move = Some(*mv);
        }
        alpha = alpha.max(score);
        if alpha >= beta {
            if quiet {
                ctx.killers.store(depth, *mv);
                ctx.history.record(*mv, depth);
            }
            break;
        }
    }

    // Every candidate faulted
    if best_move.is_none() {
        return evaluate(sb.board(), sb.side());
    }

    let node_type = if best_score <= alpha_orig {
        NodeType::UpperBound
    } else if best_score >= beta_orig {
        NodeType::LowerBound
    } else {
        NodeType::Exact
    };
    ctx.tt.store(TranspositionTableEntry {
        hash,
        depth,
        score: best_score,
        best_move,
        node_type,
    });

    best_score
}

/// Whether `score` encodes a forced mate
pub fn is_mate_score(score: i32) -> bool {
    score.abs() >= MATE_SCORE
}
