// Move ordering for alpha-beta search
//
// Good ordering is what makes alpha-beta cut. Moves are searched in this
// order:
// 1. Hash / principal variation move
// 2. Captures, most valuable victim first, least valuable attacker breaking ties
// 3. Promotions
// 4. Killer moves (quiet moves that caused a cutoff at the same depth)
// 5. Remaining quiet moves by history score

use smallvec::SmallVec;

use crate::game_repr::{Board, Move, Type};
use super::evaluation::{piece_value, PAWN_VALUE};

/// Killer slots are indexed by remaining depth
pub const MAX_KILLER_DEPTH: usize = 64;

const HASH_MOVE_SCORE: i32 = i32::MAX;
const CAPTURE_SCORE: i32 = 1_000_000;
const PROMOTION_SCORE: i32 = 800_000;
const FIRST_KILLER_SCORE: i32 = 400_000;
const SECOND_KILLER_SCORE: i32 = 300_000;
/// History never outranks a killer
const HISTORY_CAP: i32 = 200_000;

/// Two quiet cutoff moves remembered per depth
#[derive(Debug, Clone)]
pub struct KillerMoves {
    slots: [[Option<Move>; 2]; MAX_KILLER_DEPTH],
}

impl KillerMoves {
    pub fn new() -> Self {
        Self {
            slots: [[None; 2]; MAX_KILLER_DEPTH],
        }
    }

    /// Newest killer goes in front, the older one shifts to the second slot.
    pub fn store(&mut self, depth: u8, mv: Move) {
        let Some(slot) = self.slots.get_mut(depth as usize) else {
            return;
        };
        if slot[0] == Some(mv) {
            return;
        }
        slot[1] = slot[0];
        slot[0] = Some(mv);
    }

    /// Slot index (0 or 1) holding `mv` at `depth`
    pub fn rank(&self, depth: u8, mv: Move) -> Option<usize> {
        self.slots
            .get(depth as usize)?
            .iter()
            .position(|killer| *killer == Some(mv))
    }

    pub fn is_killer(&self, depth: u8, mv: Move) -> bool {
        self.rank(depth, mv).is_some()
    }

    pub fn clear(&mut self) {
        self.slots = [[None; 2]; MAX_KILLER_DEPTH];
    }
}

impl Default for KillerMoves {
    fn default() -> Self {
        Self::new()
    }
}

/// Cutoff counts for quiet moves, keyed by origin, target and promotion
#[derive(Debug, Clone)]
pub struct HistoryTable {
    scores: Vec<i32>,
}

impl HistoryTable {
    const SIZE: usize = 64 * 64 * 5;

    pub fn new() -> Self {
        Self {
            scores: vec![0; Self::SIZE],
        }
    }

    fn key(mv: Move) -> Option<usize> {
        let from = mv.from().index()?;
        let to = mv.to().index()?;
        let promotion = match mv.promotion_type() {
            None => 0,
            Some(Type::Knight) => 1,
            Some(Type::Bishop) => 2,
            Some(Type::Rook) => 3,
            Some(_) => 4,
        };
        Some(from | to << 6 | promotion << 12)
    }

    /// Rewards a move that caused a cutoff at `depth`.
    pub fn record(&mut self, mv: Move, depth: u8) {
        if let Some(key) = Self::key(mv) {
            let bonus = depth as i32 * depth as i32;
            self.scores[key] = self.scores[key].saturating_add(bonus);
        }
    }

    pub fn score(&self, mv: Move) -> i32 {
        Self::key(mv).map_or(0, |key| self.scores[key])
    }

    pub fn clear(&mut self) {
        self.scores.iter_mut().for_each(|score| *score = 0);
    }
}

impl Default for HistoryTable {
    fn default() -> Self {
        Self::new()
    }
}

/// Attacker weight for MVV-LVA, with the king kept below a queen victim
fn attacker_value(piece_type: Type) -> i32 {
    match piece_type {
        Type::King => 1000,
        other => piece_value(other),
    }
}

/// Most valuable victim, least valuable attacker. Zero for non-captures.
pub fn mvv_lva(board: &Board, mv: Move) -> i32 {
    let victim = match mv {
        Move::EnPassant { .. } => PAWN_VALUE,
        Move::Castle { .. } => return 0,
        _ => match board.get(mv.to()) {
            Some(piece) => piece_value(piece.piece_type),
            None => return 0,
        },
    };
    let attacker = board
        .get(mv.from())
        .map_or(0, |piece| attacker_value(piece.piece_type));
    CAPTURE_SCORE + victim * 10 - attacker
}

/// Ordering score of `mv` on `board`; higher is searched first.
pub fn score_move(
    board: &Board,
    mv: Move,
    killers: &KillerMoves,
    history: &HistoryTable,
    depth: u8,
) -> i32 {
    let mut score = mvv_lva(board, mv);
    if let Some(promotion) = mv.promotion_type() {
        score += PROMOTION_SCORE + piece_value(promotion);
    }
    if score != 0 {
        return score;
    }

    match killers.rank(depth, mv) {
        Some(0) => FIRST_KILLER_SCORE,
        Some(_) => SECOND_KILLER_SCORE,
        None => history.score(mv).min(HISTORY_CAP),
    }
}

/// Sorts `moves` best first. `hash_move`, when present in the list, goes
/// to the front. Equal scores keep generation order.
pub fn order_moves(
    board: &Board,
    moves: &mut [Move],
    hash_move: Option<Move>,
    killers: &KillerMoves,
    history: &HistoryTable,
    depth: u8,
) {
    moves.sort_by_cached_key(|mv| {
        let score = if Some(*mv) == hash_move {
            HASH_MOVE_SCORE
        } else {
            score_move(board, *mv, killers, history, depth)
        };
        std::cmp::Reverse(score)
    });
}

/// Captures and promotions from `moves`, MVV-LVA ordered, for quiescence.
pub fn order_tactical(board: &Board, moves: impl IntoIterator<Item = Move>) -> SmallVec<[Move; 32]> {
    let mut scored: SmallVec<[(i32, Move); 32]> = moves
        .into_iter()
        .filter(|mv| mv.is_tactical(board))
        .map(|mv| {
            let promotion = mv.promotion_type().map_or(0, |t| PROMOTION_SCORE + piece_value(t));
            (mvv_lva(board, mv) + promotion, mv)
        })
        .collect();
    scored.sort_by(|a, b| b.0.cmp(&a.0));
    scored.into_iter().map(|(_, mv)| mv).collect()
}
