//! Engine configuration.
//!
//! An [`EngineConfig`] holds everything needed to build an engine: search
//! depth and time control, transposition table size, opening book files and
//! the random seed used for book choices. A [`Difficulty`] is a shorthand
//! for a depth and time limit pair.

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use crate::error::ChessError;

/// Depth used when nothing else is asked for
pub const DEFAULT_SEARCH_DEPTH: u8 = 4;

/// Transposition table entries
pub const DEFAULT_TT_CAPACITY: usize = 1_000_000;

/// AI difficulty levels that map to search depth and time controls
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Difficulty {
    /// Depth 2, no time limit
    Easy,
    /// Depth 3, no time limit
    Medium,
    /// Depth 4, no time limit
    Hard,
    /// Depth 5 with a 5 second time limit
    Expert,
}

impl Difficulty {
    pub const ALL: [Difficulty; 4] = [
        Difficulty::Easy,
        Difficulty::Medium,
        Difficulty::Hard,
        Difficulty::Expert,
    ];

    /// Maximum search depth in plies
    pub fn max_depth(&self) -> u8 {
        match self {
            Difficulty::Easy => 2,
            Difficulty::Medium => 3,
            Difficulty::Hard => 4,
            Difficulty::Expert => 5,
        }
    }

    /// Time limit in milliseconds, None = unlimited
    pub fn time_limit_ms(&self) -> Option<u64> {
        match self {
            Difficulty::Expert => Some(5000),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Difficulty::Easy => "Easy",
            Difficulty::Medium => "Medium",
            Difficulty::Hard => "Hard",
            Difficulty::Expert => "Expert",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Difficulty {
    type Err = ChessError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Difficulty::ALL
            .into_iter()
            .find(|difficulty| difficulty.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ChessError::InvalidConfig(format!("unknown difficulty '{s}'")))
    }
}

/// Settings for one engine instance
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineConfig {
    pub max_depth: u8,
    pub time_limit_ms: Option<u64>,
    pub tt_capacity: usize,
    /// File of single first moves, one per line
    pub book_moves_path: Option<PathBuf>,
    /// File of opening lines
    pub book_sequences_path: Option<PathBuf>,
    /// Seed for book move choice, None = from entropy
    pub seed: Option<u64>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_SEARCH_DEPTH,
            time_limit_ms: None,
            tt_capacity: DEFAULT_TT_CAPACITY,
            book_moves_path: None,
            book_sequences_path: None,
            seed: None,
        }
    }
}

impl EngineConfig {
    pub fn for_difficulty(difficulty: Difficulty) -> Self {
        Self {
            max_depth: difficulty.max_depth(),
            time_limit_ms: difficulty.time_limit_ms(),
            ..Self::default()
        }
    }

    /// Depth is clamped to at least 1.
    pub fn with_max_depth(mut self, max_depth: u8) -> Self {
        self.max_depth = max_depth.max(1);
        self
    }

    pub fn with_time_limit_ms(mut self, time_limit_ms: Option<u64>) -> Self {
        self.time_limit_ms = time_limit_ms;
        self
    }

    pub fn with_tt_capacity(mut self, tt_capacity: usize) -> Self {
        self.tt_capacity = tt_capacity;
        self
    }

    pub fn with_book_moves(mut self, path: impl Into<PathBuf>) -> Self {
        self.book_moves_path = Some(path.into());
        self
    }

    pub fn with_book_sequences(mut self, path: impl Into<PathBuf>) -> Self {
        self.book_sequences_path = Some(path.into());
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }
}
