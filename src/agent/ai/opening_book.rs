// Opening book
//
// Two kinds of entries:
// - first moves: plain long-algebraic moves ("e2e4"), offered only while the
//   board still looks like the starting setup
// - sequences: whole lines ("e2e4 e7e5 g1f3") replayed from the starting
//   position; every position on the way maps to the moves the lines
//   continue with
//
// A move is picked uniformly at random among the book moves that are legal.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use rand::seq::SliceRandom;
use rand::Rng;

use crate::error::Result;
use crate::game_repr::{Board, Color, GameState, Move, Position, Type};

#[derive(Debug, Clone, Default)]
pub struct OpeningBook {
    first_moves: Vec<String>,
    sequences: HashMap<String, Vec<String>>,
}

impl OpeningBook {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of first moves plus number of book positions
    pub fn len(&self) -> usize {
        self.first_moves.len() + self.sequences.len()
    }

    pub fn is_empty(&self) -> bool {
        self.first_moves.is_empty() && self.sequences.is_empty()
    }

    pub fn clear(&mut self) {
        self.first_moves.clear();
        self.sequences.clear();
    }

    /// Adds one move per line. Lines shorter than four characters or with
    /// anything but letters and digits are skipped. Returns the number of
    /// moves added.
    pub fn add_first_moves(&mut self, text: &str) -> usize {
        let before = self.first_moves.len();
        for line in text.lines() {
            let line = line.trim().to_lowercase();
            if line.len() >= 4 && line.chars().all(|c| c.is_ascii_alphanumeric()) {
                self.first_moves.push(line);
            }
        }
        self.first_moves.len() - before
    }

    /// Replaces the first moves with the contents of `path`.
    pub fn load_first_moves(&mut self, path: impl AsRef<Path>) -> Result<usize> {
        let text = fs::read_to_string(path)?;
        self.first_moves.clear();
        Ok(self.add_first_moves(&text))
    }

    /// Replaces the first moves with every `*.txt` file in `dir`.
    pub fn load_first_moves_dir(&mut self, dir: impl AsRef<Path>) -> Result<usize> {
        let files = book_files(dir.as_ref())?;
        self.first_moves.clear();
        let mut added = 0;
        for file in files {
            added += self.add_first_moves(&fs::read_to_string(&file)?);
        }
        Ok(added)
    }

    /// Replays each line from the starting position. Tokens are separated by
    /// commas, spaces or tabs. A line stops at its first illegal move or when
    /// the game ends. Returns the number of book positions afterwards.
    pub fn add_sequences(&mut self, text: &str) -> usize {
        for (number, line) in text.lines().enumerate() {
            let tokens: Vec<String> = line
                .split([',', ' ', '\t'])
                .map(|token| token.trim().to_lowercase())
                .filter(|token| !token.is_empty())
                .collect();
            if tokens.is_empty() {
                continue;
            }

            let mut state = GameState::initial();
            for token in tokens {
                let Some(mv) = state.parse_move(&token) else {
                    log::debug!("Book line {}: stopping at {token}", number + 1);
                    break;
                };
                let moves = self.sequences.entry(state.position_key()).or_default();
                if !moves.contains(&token) {
                    moves.push(token);
                }
                if state.make_move(mv).is_err() || state.is_game_over() {
                    break;
                }
            }
        }
        self.sequences.len()
    }

    pub fn load_sequences(&mut self, path: impl AsRef<Path>) -> Result<usize> {
        let text = fs::read_to_string(path)?;
        Ok(self.add_sequences(&text))
    }

    /// Adds the lines of every `*.txt` file in `dir`.
    pub fn load_sequences_dir(&mut self, dir: impl AsRef<Path>) -> Result<usize> {
        for file in book_files(dir.as_ref())? {
            self.add_sequences(&fs::read_to_string(&file)?);
        }
        Ok(self.sequences.len())
    }

    /// Legal book moves for the side to move in `state`. Sequence entries
    /// for the exact position win over the first-move list.
    pub fn candidates(&self, state: &GameState) -> Vec<Move> {
        if state.is_game_over() {
            return Vec::new();
        }

        if let Some(moves) = self.sequences.get(&state.position_key()) {
            let legal: Vec<Move> = moves.iter().filter_map(|text| state.parse_move(text)).collect();
            if !legal.is_empty() {
                return legal;
            }
        }

        if self.first_moves.is_empty() || !looks_like_initial(state.board()) {
            return Vec::new();
        }
        state
            .legal_moves()
            .into_iter()
            .filter(|mv| {
                let text = format!("{}{}", mv.from(), mv.to());
                self.first_moves.contains(&text)
            })
            .collect()
    }

    pub fn pick<R: Rng + ?Sized>(&self, state: &GameState, rng: &mut R) -> Option<Move> {
        self.candidates(state).choose(rng).copied()
    }
}

/// Both pawn rows full and both kings at home.
pub fn looks_like_initial(board: &Board) -> bool {
    let has = |row: i8, column: i8, color: Color, piece_type: Type| {
        board
            .get(Position::new(row, column))
            .is_some_and(|piece| piece.color == color && piece.piece_type == piece_type)
    };
    (0..8).all(|column| has(1, column, Color::Black, Type::Pawn) && has(6, column, Color::White, Type::Pawn))
        && has(0, 4, Color::Black, Type::King)
        && has(7, 4, Color::White, Type::King)
}

/// `*.txt` files of `dir` in name order
fn book_files(dir: &Path) -> Result<Vec<std::path::PathBuf>> {
    let mut files = Vec::new();
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        if path.is_file() && path.extension().is_some_and(|ext| ext == "txt") {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}
