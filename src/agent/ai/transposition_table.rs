use std::collections::HashMap;

use once_cell::sync::Lazy;

use crate::game_repr::{Board, CastleSide, CastlingRights, Color, Move, Piece, Position};

/// Zobrist hashing constants for chess positions
///
/// One random 64-bit key per piece/square, per castling availability, per
/// en-passant file of each player's skip slot, and one for Black to move.
pub struct ZobristKeys {
    /// [piece_type][color][square]
    pub pieces: [[[u64; 64]; 2]; 6],
    /// White king side, white queen side, black king side, black queen side
    pub castling: [u64; 4],
    /// [color][file] of the player's registered skip square
    pub en_passant: [[u64; 8]; 2],
    pub side_to_move: u64,
}

impl ZobristKeys {
    /// Keys come from a fixed seed so hashes are stable between runs
    fn generate() -> Self {
        use rand::rngs::StdRng;
        use rand::{Rng, SeedableRng};

        let mut rng = StdRng::seed_from_u64(0x517cc1b727220a95);

        let mut pieces = [[[0u64; 64]; 2]; 6];
        for piece_type in &mut pieces {
            for color in piece_type {
                for square in color {
                    *square = rng.gen();
                }
            }
        }

        let mut castling = [0u64; 4];
        for key in &mut castling {
            *key = rng.gen();
        }

        let mut en_passant = [[0u64; 8]; 2];
        for color in &mut en_passant {
            for file in color {
                *file = rng.gen();
            }
        }

        Self {
            pieces,
            castling,
            en_passant,
            side_to_move: rng.gen(),
        }
    }

    #[inline]
    pub fn piece(&self, piece: Piece, pos: Position) -> u64 {
        match pos.index() {
            Some(square) => self.pieces[piece.piece_type.index()][piece.color.index()][square],
            None => 0,
        }
    }

    pub fn castling(&self, rights: CastlingRights) -> u64 {
        let flags = [
            rights.has(Color::White, CastleSide::KingSide),
            rights.has(Color::White, CastleSide::QueenSide),
            rights.has(Color::Black, CastleSide::KingSide),
            rights.has(Color::Black, CastleSide::QueenSide),
        ];
        flags
            .iter()
            .zip(self.castling.iter())
            .filter(|(set, _)| **set)
            .fold(0, |acc, (_, key)| acc ^ key)
    }

    pub fn skips(&self, skips: [Option<Position>; 2]) -> u64 {
        skips
            .iter()
            .enumerate()
            .filter_map(|(color, skip)| skip.map(|sq| self.en_passant[color][(sq.column & 7) as usize]))
            .fold(0, |acc, key| acc ^ key)
    }
}

/// Global Zobrist keys, generated on first use
static ZOBRIST: Lazy<ZobristKeys> = Lazy::new(ZobristKeys::generate);

pub fn zobrist() -> &'static ZobristKeys {
    &ZOBRIST
}

/// Full Zobrist hash of `board` with `side` to move
pub fn compute_hash(board: &Board, side: Color) -> u64 {
    let keys = zobrist();
    let mut hash = 0u64;

    for pos in board.piece_positions() {
        if let Some(piece) = board.get(pos) {
            hash ^= keys.piece(piece, pos);
        }
    }

    hash ^= keys.castling(CastlingRights::from_board(board));
    hash ^= keys.skips(board.pawn_skips());

    if side == Color::Black {
        hash ^= keys.side_to_move;
    }
    hash
}

/// Node type for transposition table entries
///
/// - Exact: The exact score for this position
/// - LowerBound: Score is at least this value (beta cutoff)
/// - UpperBound: Score is at most this value (all moves failed low)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeType {
    Exact,
    LowerBound,
    UpperBound,
}

#[derive(Debug, Clone, Copy)]
pub struct TranspositionTableEntry {
    pub hash: u64,
    /// Remaining depth the score was searched to
    pub depth: u8,
    pub score: i32,
    pub best_move: Option<Move>,
    pub node_type: NodeType,
}

/// Cache of search results keyed by Zobrist hash
pub struct TranspositionTable {
    table: HashMap<u64, TranspositionTableEntry>,
    max_size: usize,
    pub hits: u64,
    pub misses: u64,
}

impl TranspositionTable {
    /// Default size: 1 million entries
    pub fn new() -> Self {
        Self::with_capacity(1_000_000)
    }

    pub fn with_capacity(max_size: usize) -> Self {
        Self {
            table: HashMap::with_capacity(max_size.min(100_000)),
            max_size,
            hits: 0,
            misses: 0,
        }
    }

    pub fn probe(&mut self, hash: u64) -> Option<TranspositionTableEntry> {
        match self.table.get(&hash) {
            Some(entry) if entry.hash == hash => {
                self.hits += 1;
                Some(*entry)
            }
            _ => {
                self.misses += 1;
                None
            }
        }
    }

    /// Once the table is full only existing keys are refreshed, and only by
    /// entries at least as deep or exact over a bound.
    pub fn store(&mut self, entry: TranspositionTableEntry) {
        if self.table.len() >= self.max_size {
            match self.table.get(&entry.hash) {
                Some(existing) => {
                    let should_replace = entry.depth >= existing.depth
                        || (entry.node_type == NodeType::Exact
                            && existing.node_type != NodeType::Exact);
                    if !should_replace {
                        return;
                    }
                }
                None => return,
            }
        }
        self.table.insert(entry.hash, entry);
    }

    pub fn clear(&mut self) {
        self.table.clear();
        self.hits = 0;
        self.misses = 0;
    }

    pub fn size(&self) -> usize {
        self.table.len()
    }

    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }
}

impl Default for TranspositionTable {
    fn default() -> Self {
        Self::new()
    }
}
