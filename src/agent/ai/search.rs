// Iterative deepening search driver
//
// The engine searches depth 1, 2, ... up to the requested depth. Each
// iteration puts the previous iteration's best move first, so the tables
// filled by the shallow searches make the deeper ones cut sooner. The
// result is the best move of the deepest iteration that ran to completion.
//
// All per-search state (transposition table, killers, history, node count,
// limits, progress sink) travels through the recursion in a SearchContext.

use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::config::EngineConfig;
use crate::game_repr::{GameState, Move};
use super::move_ordering::{order_moves, HistoryTable, KillerMoves};
use super::negamax::{is_mate_score, negamax, INFINITY};
use super::opening_book::OpeningBook;
use super::search_board::SearchBoard;
use super::transposition_table::TranspositionTable;

/// Nodes between two checks of the deadline and stop flag
const LIMIT_CHECK_INTERVAL: u64 = 1024;

/// Events reported while a search runs
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchProgress {
    /// The move came from the opening book, no search was done
    BookMove { mv: Move },
    /// An iteration finished
    DepthCompleted {
        depth: u8,
        score: i32,
        best_move: Move,
        nodes: u64,
    },
    NoLegalMoves { depth: u8 },
    /// A candidate could not be played on the working board and was skipped
    MoveFailed { depth: u8, mv: Move, reason: String },
    /// Time ran out or a stop was requested during this iteration
    Aborted { depth: u8 },
}

impl fmt::Display for SearchProgress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SearchProgress::BookMove { mv } => write!(f, "AI book move {mv}"),
            SearchProgress::DepthCompleted {
                depth,
                score,
                best_move,
                ..
            } => write!(f, "AI depth {depth} score {score} best {best_move}"),
            SearchProgress::NoLegalMoves { depth } => {
                write!(f, "AI depth {depth}: no legal moves available")
            }
            SearchProgress::MoveFailed { depth, mv, reason } => {
                write!(f, "AI depth {depth} move {mv} failed: {reason}")
            }
            SearchProgress::Aborted { depth } => write!(f, "AI depth {depth} aborted"),
        }
    }
}

/// Result of a search operation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchResult {
    pub best_move: Option<Move>,
    /// Score of `best_move` for the side to move, in centipawns
    pub score: i32,
    /// Deepest completed iteration
    pub depth: u8,
    pub nodes: u64,
    pub time_ms: u64,
    pub from_book: bool,
}

impl SearchResult {
    /// No move found
    pub fn empty() -> Self {
        Self {
            best_move: None,
            score: 0,
            depth: 0,
            nodes: 0,
            time_ms: 0,
            from_book: false,
        }
    }
}

/// How far and how long a single search may go
#[derive(Debug, Clone, Default)]
pub struct SearchLimits {
    pub max_depth: u8,
    pub time_limit: Option<Duration>,
    pub stop: Option<Arc<AtomicBool>>,
}

impl SearchLimits {
    pub fn depth(max_depth: u8) -> Self {
        Self {
            max_depth,
            ..Self::default()
        }
    }

    pub fn with_time_limit(mut self, time_limit: Option<Duration>) -> Self {
        self.time_limit = time_limit;
        self
    }

    pub fn with_stop_flag(mut self, stop: Arc<AtomicBool>) -> Self {
        self.stop = Some(stop);
        self
    }
}

/// Mutable state shared by every node of one search
pub struct SearchContext<'a> {
    pub tt: &'a mut TranspositionTable,
    pub killers: &'a mut KillerMoves,
    pub history: &'a mut HistoryTable,
    pub nodes: u64,
    progress: &'a mut dyn FnMut(&SearchProgress),
    deadline: Option<Instant>,
    stop: Option<Arc<AtomicBool>>,
    depth: u8,
    aborted: bool,
}

impl<'a> SearchContext<'a> {
    pub fn new(
        tt: &'a mut TranspositionTable,
        killers: &'a mut KillerMoves,
        history: &'a mut HistoryTable,
        progress: &'a mut dyn FnMut(&SearchProgress),
    ) -> Self {
        Self {
            tt,
            killers,
            history,
            nodes: 0,
            progress,
            deadline: None,
            stop: None,
            depth: 0,
            aborted: false,
        }
    }

    pub fn with_deadline(mut self, deadline: Option<Instant>) -> Self {
        self.deadline = deadline;
        self
    }

    pub fn with_stop_flag(mut self, stop: Option<Arc<AtomicBool>>) -> Self {
        self.stop = stop;
        self
    }

    /// Depth of the running iteration
    pub fn depth(&self) -> u8 {
        self.depth
    }

    pub fn report(&mut self, event: SearchProgress) {
        match &event {
            SearchProgress::MoveFailed { .. } => log::warn!("{event}"),
            _ => log::debug!("{event}"),
        }
        (self.progress)(&event);
    }

    /// Polls the limits every few nodes. Once tripped it stays tripped.
    pub fn should_stop(&mut self) -> bool {
        if !self.aborted && self.nodes % LIMIT_CHECK_INTERVAL == 0 {
            self.aborted = self.limits_reached();
        }
        self.aborted
    }

    pub fn is_aborted(&self) -> bool {
        self.aborted
    }

    fn limits_reached(&self) -> bool {
        let stopped = self
            .stop
            .as_ref()
            .is_some_and(|flag| flag.load(Ordering::Relaxed));
        let timed_out = self.deadline.is_some_and(|deadline| Instant::now() >= deadline);
        stopped || timed_out
    }
}

/// Alpha-beta engine with its own tables and opening book
///
/// Tables are cleared at the start of every search, so the same position
/// and depth always give the same move when no book move applies.
pub struct Engine {
    config: EngineConfig,
    tt: TranspositionTable,
    killers: KillerMoves,
    history: HistoryTable,
    book: OpeningBook,
    rng: StdRng,
}

impl Engine {
    pub fn new(config: EngineConfig) -> Self {
        let mut book = OpeningBook::new();
        if let Some(path) = &config.book_moves_path {
            match book.load_first_moves(path) {
                Ok(count) => log::info!("Loaded {count} opening moves from {}", path.display()),
                Err(err) => log::warn!("Ignoring opening book {}: {err}", path.display()),
            }
        }
        if let Some(path) = &config.book_sequences_path {
            match book.load_sequences(path) {
                Ok(count) => log::info!("Loaded {count} book positions from {}", path.display()),
                Err(err) => log::warn!("Ignoring opening lines {}: {err}", path.display()),
            }
        }

        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        Self {
            tt: TranspositionTable::with_capacity(config.tt_capacity),
            killers: KillerMoves::new(),
            history: HistoryTable::new(),
            book,
            rng,
            config,
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn book(&self) -> &OpeningBook {
        &self.book
    }

    pub fn book_mut(&mut self) -> &mut OpeningBook {
        &mut self.book
    }

    /// Best move for the side to move in `state`, searching at most
    /// `max_depth` plies. None when the game is over or no legal move
    /// exists.
    pub fn choose_best_move(
        &mut self,
        state: &GameState,
        max_depth: u8,
        progress: &mut dyn FnMut(&SearchProgress),
    ) -> Option<Move> {
        let limits = SearchLimits::depth(max_depth)
            .with_time_limit(self.config.time_limit_ms.map(Duration::from_millis));
        self.search(state, &limits, progress).best_move
    }

    /// Search using the configured depth and time limit
    pub fn search_default(&mut self, state: &GameState) -> SearchResult {
        let limits = SearchLimits::depth(self.config.max_depth)
            .with_time_limit(self.config.time_limit_ms.map(Duration::from_millis));
        self.search(state, &limits, &mut |_: &SearchProgress| {})
    }

    pub fn search(
        &mut self,
        state: &GameState,
        limits: &SearchLimits,
        progress: &mut dyn FnMut(&SearchProgress),
    ) -> SearchResult {
        let start = Instant::now();
        self.tt.clear();
        self.killers.clear();
        self.history.clear();

        if state.is_game_over() {
            return SearchResult::empty();
        }

        if let Some(mv) = self.book.pick(state, &mut self.rng) {
            let event = SearchProgress::BookMove { mv };
            log::info!("{event}");
            progress(&event);
            return SearchResult {
                best_move: Some(mv),
                from_book: true,
                time_ms: start.elapsed().as_millis() as u64,
                ..SearchResult::empty()
            };
        }

        let mut sb = SearchBoard::new(state.board().clone(), state.current_player());
        let mut root_moves = sb.legal_moves();
        if root_moves.is_empty() {
            let event = SearchProgress::NoLegalMoves { depth: 0 };
            log::info!("{event}");
            progress(&event);
            return SearchResult::empty();
        }

        let deadline = limits.time_limit.map(|limit| start + limit);
        let mut ctx = SearchContext::new(&mut self.tt, &mut self.killers, &mut self.history, progress)
            .with_deadline(deadline)
            .with_stop_flag(limits.stop.clone());

        let mut result = SearchResult::empty();
        let mut pv_move: Option<Move> = None;

        for depth in 1..=limits.max_depth.max(1) {
            if ctx.limits_reached() {
                ctx.aborted = true;
                ctx.report(SearchProgress::Aborted { depth });
                break;
            }
            ctx.depth = depth;

            order_moves(sb.board(), &mut root_moves, pv_move, ctx.killers, ctx.history, depth);

            let mut alpha = -INFINITY;
            let beta = INFINITY;
            let mut best_score = -INFINITY;
            let mut best_this_depth: Option<Move> = None;

            for mv in root_moves.iter().copied() {
                let saved = match sb.make(&mv) {
                    Ok(saved) => saved,
                    Err(err) => {
                        ctx.report(SearchProgress::MoveFailed {
                            depth,
                            mv,
                            reason: err.to_string(),
                        });
                        continue;
                    }
                };
                ctx.nodes += 1;
                let score = -negamax(&mut ctx, &mut sb, depth - 1, -beta, -alpha);
                sb.unmake(&saved);

                if ctx.is_aborted() {
                    break;
                }
                if score > best_score {
                    best_score = score;
                    best_this_depth = Some(mv);
                }
                alpha = alpha.max(score);
            }

            if ctx.is_aborted() {
                ctx.report(SearchProgress::Aborted { depth });
                break;
            }

            let Some(best_move) = best_this_depth else {
                ctx.report(SearchProgress::NoLegalMoves { depth });
                break;
            };

            pv_move = Some(best_move);
            result.best_move = Some(best_move);
            result.score = best_score;
            result.depth = depth;
            ctx.report(SearchProgress::DepthCompleted {
                depth,
                score: best_score,
                best_move,
                nodes: ctx.nodes,
            });

            if is_mate_score(best_score) {
                break;
            }
        }

        // Stopped before depth 1 finished: fall back to the first ordered move
        if result.best_move.is_none() && ctx.is_aborted() {
            result.best_move = root_moves.first().copied();
        }

        result.nodes = ctx.nodes;
        result.time_ms = start.elapsed().as_millis() as u64;
        log::info!(
            "Search done: depth {} score {} nodes {} in {} ms",
            result.depth,
            result.score,
            result.nodes,
            result.time_ms
        );
        result
    }
}

impl Default for Engine {
    fn default() -> Self {
        Self::new(EngineConfig::default())
    }
}
