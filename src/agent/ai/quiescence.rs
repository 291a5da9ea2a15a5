// Quiescence search
//
// Stopping the main search in the middle of an exchange gives wildly wrong
// scores (a queen capture looks great until the recapture). At the horizon
// only captures and promotions are searched until the position is quiet.
//
// - Stand-pat: the static score is a lower bound, the side to move can
//   usually decline every capture
// - MVV-LVA ordering of the tactical moves
// - Depth cap so long capture chains terminate

use smallvec::SmallVec;

use crate::game_repr::{Move, Position};
use super::evaluation::evaluate;
use super::move_ordering::order_tactical;
use super::search::{SearchContext, SearchProgress};
use super::search_board::SearchBoard;

/// Maximum capture-chain length followed past the horizon
pub const MAX_QSEARCH_DEPTH: u8 = 16;

pub fn quiescence(
    ctx: &mut SearchContext<'_>,
    sb: &mut SearchBoard,
    mut alpha: i32,
    beta: i32,
    ply: u8,
) -> i32 {
    ctx.nodes += 1;
    if ctx.should_stop() {
        return 0;
    }

    let stand_pat = evaluate(sb.board(), sb.side());
    if stand_pat >= beta {
        return stand_pat;
    }
    alpha = alpha.max(stand_pat);
    if ply >= MAX_QSEARCH_DEPTH {
        return alpha;
    }

    for mv in tactical_moves(sb) {
        let saved = match sb.make(&mv) {
            Ok(saved) => saved,
            Err(err) => {
                ctx.report(SearchProgress::MoveFailed {
                    depth: ctx.depth(),
                    mv,
                    reason: err.to_string(),
                });
                continue;
            }
        };
        let score = -quiescence(ctx, sb, -beta, -alpha, ply + 1);
        sb.unmake(&saved);

        if ctx.is_aborted() {
            return 0;
        }
        if score >= beta {
            return score;
        }
        alpha = alpha.max(score);
    }

    alpha
}

/// Legal captures and promotions for the side to move, best first.
/// Legality is only tested for tactical candidates.
fn tactical_moves(sb: &mut SearchBoard) -> SmallVec<[Move; 32]> {
    let side = sb.side();
    let origins: SmallVec<[Position; 16]> = sb.board().piece_positions_for(side).collect();
    let board = sb.board_mut();

    let mut candidates: SmallVec<[Move; 32]> = SmallVec::new();
    for from in origins {
        let Some(piece) = board.get(from) else { continue };
        for mv in piece.get_moves(from, board) {
            if mv.is_tactical(board) && mv.is_legal_in_place(board) {
                candidates.push(mv);
            }
        }
    }
    order_tactical(board, candidates)
}
