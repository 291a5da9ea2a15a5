// AI Agent - Negamax with Alpha-Beta Pruning
//
// A classical chess engine: iterative deepening negamax with alpha-beta
// pruning over an in-place working board.
//
// Key features:
// - Deterministic (same position and depth always give the same move, unless
//   an opening book supplies one)
// - Transposition table keyed by incremental Zobrist hashes
// - Quiescence search to avoid the horizon effect
// - Move ordering: hash move, MVV-LVA, killers, history
// - Late move reductions for quiet moves
// - Optional opening book and a background worker thread

mod ai_player;
mod evaluation;
mod move_ordering;
mod negamax;
mod opening_book;
mod piece_square_tables;
mod quiescence;
mod search;
mod search_board;
mod transposition_table;

#[cfg(test)]
mod tests;

pub use ai_player::{AiEvent, AiPlayer};
pub use evaluation::{evaluate, piece_value};
pub use move_ordering::{HistoryTable, KillerMoves};
pub use negamax::{is_mate_score, MATE_SCORE};
pub use opening_book::{looks_like_initial, OpeningBook};
pub use search::{Engine, SearchContext, SearchLimits, SearchProgress, SearchResult};
pub use search_board::SearchBoard;
pub use transposition_table::{compute_hash, NodeType, TranspositionTable, TranspositionTableEntry};
