use std::collections::HashMap;
use std::fmt;

use crate::error::{ChessError, Result};

use super::board::{Board, INITIAL_PLACEMENT};
use super::moves::{parse_long_algebraic, CastleSide, Move};
use super::piece::{Color, Piece, Type};
use super::position::Position;

/// Half-moves without capture or pawn move before the game is drawn.
pub const FIFTY_MOVE_LIMIT: u32 = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EndReason {
    Checkmate,
    Stalemate,
    FiftyMoveRule,
    ThreefoldRepetition,
    InsufficientMaterial,
    Timeout,
}

/// Final outcome of a game. `winner` is `None` for draws.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GameResult {
    pub winner: Option<Color>,
    pub reason: EndReason,
}

impl GameResult {
    pub fn win(winner: Color, reason: EndReason) -> Self {
        Self {
            winner: Some(winner),
            reason,
        }
    }

    pub fn draw(reason: EndReason) -> Self {
        Self {
            winner: None,
            reason,
        }
    }

    pub fn is_draw(&self) -> bool {
        self.winner.is_none()
    }
}

impl fmt::Display for GameResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let reason = match self.reason {
            EndReason::Checkmate => "checkmate",
            EndReason::Stalemate => "stalemate",
            EndReason::FiftyMoveRule => "fifty-move rule",
            EndReason::ThreefoldRepetition => "threefold repetition",
            EndReason::InsufficientMaterial => "insufficient material",
            EndReason::Timeout => "timeout",
        };
        match self.winner {
            Some(Color::White) => write!(f, "White wins by {reason}"),
            Some(Color::Black) => write!(f, "Black wins by {reason}"),
            None => write!(f, "Draw by {reason}"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct CastlingRights {
    pub white_king_side: bool,
    pub white_queen_side: bool,
    pub black_king_side: bool,
    pub black_queen_side: bool,
}

impl CastlingRights {
    pub fn all() -> Self {
        Self {
            white_king_side: true,
            white_queen_side: true,
            black_king_side: true,
            black_queen_side: true,
        }
    }

    pub fn none() -> Self {
        Self::default()
    }

    /// Rights implied by unmoved kings and rooks on their home squares.
    pub fn from_board(board: &Board) -> Self {
        let mut rights = Self::none();
        for color in [Color::White, Color::Black] {
            for side in [CastleSide::KingSide, CastleSide::QueenSide] {
                if castling_pieces_ready(board, color, side) {
                    rights.grant(color, side);
                }
            }
        }
        rights
    }

    pub fn from_fen(field: &str) -> Result<Self> {
        let mut rights = Self::none();
        if field == "-" {
            return Ok(rights);
        }
        for c in field.chars() {
            match c {
                'K' => rights.white_king_side = true,
                'Q' => rights.white_queen_side = true,
                'k' => rights.black_king_side = true,
                'q' => rights.black_queen_side = true,
                _ => return Err(ChessError::InvalidFen(format!("bad castling field '{field}'"))),
            }
        }
        Ok(rights)
    }

    pub fn to_fen(&self) -> String {
        let mut s = String::new();
        if self.white_king_side {
            s.push('K');
        }
        if self.white_queen_side {
            s.push('Q');
        }
        if self.black_king_side {
            s.push('k');
        }
        if self.black_queen_side {
            s.push('q');
        }
        if s.is_empty() {
            s.push('-');
        }
        s
    }

    pub fn has(&self, color: Color, side: CastleSide) -> bool {
        match (color, side) {
            (Color::White, CastleSide::KingSide) => self.white_king_side,
            (Color::White, CastleSide::QueenSide) => self.white_queen_side,
            (Color::Black, CastleSide::KingSide) => self.black_king_side,
            (Color::Black, CastleSide::QueenSide) => self.black_queen_side,
        }
    }

    fn flag(&mut self, color: Color, side: CastleSide) -> &mut bool {
        match (color, side) {
            (Color::White, CastleSide::KingSide) => &mut self.white_king_side,
            (Color::White, CastleSide::QueenSide) => &mut self.white_queen_side,
            (Color::Black, CastleSide::KingSide) => &mut self.black_king_side,
            (Color::Black, CastleSide::QueenSide) => &mut self.black_queen_side,
        }
    }

    fn grant(&mut self, color: Color, side: CastleSide) {
        *self.flag(color, side) = true;
    }

    pub fn revoke(&mut self, color: Color, side: CastleSide) {
        *self.flag(color, side) = false;
    }
}

fn castling_pieces_ready(board: &Board, color: Color, side: CastleSide) -> bool {
    let row = color.home_row();
    let is_unmoved = |pos: Position, piece_type: Type| {
        board
            .get(pos)
            .is_some_and(|p| p.color == color && p.piece_type == piece_type && !p.has_moved)
    };
    is_unmoved(Position::new(row, 4), Type::King)
        && is_unmoved(Position::new(row, side.rook_column()), Type::Rook)
}

/// Which castling side a rook standing on `pos` belongs to, if it is a
/// home corner of `color`.
fn corner_side(pos: Position, color: Color) -> Option<CastleSide> {
    if pos.row != color.home_row() {
        return None;
    }
    match pos.column {
        0 => Some(CastleSide::QueenSide),
        7 => Some(CastleSide::KingSide),
        _ => None,
    }
}

/// A game in progress: the board plus everything FEN records about it,
/// repetition history, and the result once the game has ended.
#[derive(Debug, Clone)]
pub struct GameState {
    board: Board,
    current_player: Color,
    castling: CastlingRights,
    en_passant: Option<Position>,
    halfmove_clock: u32,
    fullmove_number: u32,
    repetitions: HashMap<String, u32>,
    result: Option<GameResult>,
}

impl Default for GameState {
    fn default() -> Self {
        Self::initial()
    }
}

impl GameState {
    /// Starts a game on `board` with `current_player` to move. Castling
    /// rights follow from which kings and rooks are still unmoved.
    pub fn new(board: Board, current_player: Color) -> Self {
        let castling = CastlingRights::from_board(&board);
        let en_passant = board.pawn_skip(current_player.opposite());
        Self::assemble(board, current_player, castling, en_passant, 0, 1)
    }

    pub fn initial() -> Self {
        Self::new(Board::initial(), Color::White)
    }

    pub fn from_placement(placement: &str, current_player: Color) -> Result<Self> {
        Ok(Self::new(Board::from_placement(placement)?, current_player))
    }

    /// Parses a FEN record. The halfmove and fullmove fields may be left
    /// out and default to `0 1`.
    pub fn from_fen(fen: &str) -> Result<Self> {
        let fields: Vec<&str> = fen.split_whitespace().collect();
        if fields.len() < 4 || fields.len() > 6 {
            return Err(ChessError::InvalidFen(format!(
                "expected 4 to 6 fields, found {}",
                fields.len()
            )));
        }

        let mut board = Board::from_placement(fields[0])?;
        let current_player = match fields[1] {
            "w" => Color::White,
            "b" => Color::Black,
            other => return Err(ChessError::InvalidFen(format!("bad side to move '{other}'"))),
        };

        let claimed = CastlingRights::from_fen(fields[2])?;
        mark_lost_castling_pieces(&mut board, claimed);
        let castling = CastlingRights::from_board(&board);

        let en_passant = match fields[3] {
            "-" => None,
            square => Some(
                Position::from_algebraic(square)
                    .ok_or_else(|| ChessError::InvalidFen(format!("bad en passant square '{square}'")))?,
            ),
        };
        board.set_pawn_skip(current_player.opposite(), en_passant);

        let parse_counter = |idx: usize, default: u32| -> Result<u32> {
            match fields.get(idx) {
                None => Ok(default),
                Some(text) => text
                    .parse()
                    .map_err(|_| ChessError::InvalidFen(format!("bad move counter '{text}'"))),
            }
        };
        let halfmove_clock = parse_counter(4, 0)?;
        let fullmove_number = parse_counter(5, 1)?;

        Ok(Self::assemble(
            board,
            current_player,
            castling,
            en_passant,
            halfmove_clock,
            fullmove_number,
        ))
    }

    fn assemble(
        board: Board,
        current_player: Color,
        castling: CastlingRights,
        en_passant: Option<Position>,
        halfmove_clock: u32,
        fullmove_number: u32,
    ) -> Self {
        let mut state = Self {
            board,
            current_player,
            castling,
            en_passant,
            halfmove_clock,
            fullmove_number,
            repetitions: HashMap::new(),
            result: None,
        };
        state.record_position();
        state.check_for_game_over();
        state
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn current_player(&self) -> Color {
        self.current_player
    }

    pub fn castling_rights(&self) -> CastlingRights {
        self.castling
    }

    pub fn en_passant_target(&self) -> Option<Position> {
        self.en_passant
    }

    pub fn halfmove_clock(&self) -> u32 {
        self.halfmove_clock
    }

    pub fn fullmove_number(&self) -> u32 {
        self.fullmove_number
    }

    pub fn result(&self) -> Option<GameResult> {
        self.result
    }

    pub fn is_game_over(&self) -> bool {
        self.result.is_some()
    }

    /// Records an outcome decided outside the rules, such as a flag fall.
    /// A result that is already set is never replaced.
    pub fn set_result(&mut self, result: GameResult) {
        if self.result.is_none() {
            self.result = Some(result);
        }
    }

    /// How many times the current position has occurred.
    pub fn repetition_count(&self) -> u32 {
        self.repetitions.get(&self.position_key()).copied().unwrap_or(0)
    }

    /// Legal moves of the piece on `pos`. Empty when the square is empty,
    /// holds an opponent piece, or the game is over.
    pub fn legal_moves_for_piece(&self, pos: Position) -> Vec<Move> {
        if self.is_game_over() || !self.board.get(pos).is_some_and(|p| p.is(self.current_player)) {
            return Vec::new();
        }
        self.board.clone().legal_moves_from(pos)
    }

    pub fn all_legal_moves_for(&self, color: Color) -> Vec<Move> {
        self.board.clone().legal_moves_for(color)
    }

    pub fn legal_moves(&self) -> Vec<Move> {
        if self.is_game_over() {
            return Vec::new();
        }
        self.all_legal_moves_for(self.current_player)
    }

    /// Resolves long algebraic text (`e2e4`, `e7e8q`) against the legal
    /// moves. A promotion without a suffix becomes a queen.
    pub fn parse_move(&self, text: &str) -> Option<Move> {
        let (from, to, promotion) = parse_long_algebraic(text)?;
        let candidates: Vec<Move> = self
            .legal_moves_for_piece(from)
            .into_iter()
            .filter(|mv| mv.to() == to)
            .collect();

        let is_promotion = candidates.iter().any(|mv| mv.promotion_type().is_some());
        if !is_promotion {
            return match promotion {
                Some(_) => None,
                None => candidates.first().copied(),
            };
        }
        let wanted = promotion.unwrap_or(Type::Queen);
        candidates
            .into_iter()
            .find(|mv| mv.promotion_type() == Some(wanted))
    }

    /// Plays `mv` for the side to move and re-evaluates whether the game
    /// has ended.
    pub fn make_move(&mut self, mv: Move) -> Result<()> {
        if self.is_game_over() {
            return Err(ChessError::GameOver);
        }
        let from = mv.from();
        let piece = self.board.get(from).ok_or(ChessError::MissingPiece(from))?;
        if !self.legal_moves_for_piece(from).contains(&mv) {
            return Err(ChessError::IllegalMove(mv.to_string()));
        }

        self.update_castling_rights(&mv, piece);
        self.en_passant = match mv {
            Move::DoublePawn { skipped, .. } => Some(skipped),
            _ => None,
        };
        self.board.set_pawn_skip(self.current_player, None);

        let irreversible = mv.execute(&mut self.board);
        if irreversible {
            self.halfmove_clock = 0;
        } else {
            self.halfmove_clock += 1;
        }
        if self.current_player == Color::Black {
            self.fullmove_number += 1;
        }

        self.current_player = self.current_player.opposite();
        self.record_position();
        self.check_for_game_over();

        log::trace!("played {mv}, now {}", self.to_fen());
        Ok(())
    }

    fn update_castling_rights(&mut self, mv: &Move, piece: Piece) {
        let color = piece.color;
        match piece.piece_type {
            Type::King => {
                self.castling.revoke(color, CastleSide::KingSide);
                self.castling.revoke(color, CastleSide::QueenSide);
            }
            Type::Rook => {
                if let Some(side) = corner_side(mv.from(), color) {
                    self.castling.revoke(color, side);
                }
            }
            _ => {}
        }

        let opponent = color.opposite();
        let target = mv.to();
        let rook_captured = self
            .board
            .get(target)
            .is_some_and(|p| p.color == opponent && p.piece_type == Type::Rook);
        if rook_captured {
            if let Some(side) = corner_side(target, opponent) {
                self.castling.revoke(opponent, side);
            }
        }
    }

    fn record_position(&mut self) {
        *self.repetitions.entry(self.position_key()).or_insert(0) += 1;
    }

    fn check_for_game_over(&mut self) {
        if self.result.is_some() {
            return;
        }
        let mover = self.current_player;
        let mut scratch = self.board.clone();

        self.result = if !scratch.has_legal_move(mover) {
            if self.board.is_in_check(mover) {
                Some(GameResult::win(mover.opposite(), EndReason::Checkmate))
            } else {
                Some(GameResult::draw(EndReason::Stalemate))
            }
        } else if self.halfmove_clock >= FIFTY_MOVE_LIMIT {
            Some(GameResult::draw(EndReason::FiftyMoveRule))
        } else if self.repetition_count() >= 3 {
            Some(GameResult::draw(EndReason::ThreefoldRepetition))
        } else if self.board.insufficient_material() {
            Some(GameResult::draw(EndReason::InsufficientMaterial))
        } else {
            None
        };

        if let Some(result) = self.result {
            log::debug!("game over: {result}");
        }
    }

    /// FEN fields 1 to 4: placement, side, castling, en passant.
    pub fn position_key(&self) -> String {
        let en_passant = self
            .en_passant
            .map(|sq| sq.to_string())
            .unwrap_or_else(|| "-".to_string());
        format!(
            "{} {} {} {}",
            self.board.to_placement(),
            self.current_player.fen_char(),
            self.castling.to_fen(),
            en_passant
        )
    }

    pub fn to_fen(&self) -> String {
        format!(
            "{} {} {}",
            self.position_key(),
            self.halfmove_clock,
            self.fullmove_number
        )
    }

    /// Leaf count of the legal move tree, ignoring draw rules.
    pub fn perft(&self, depth: u32) -> u64 {
        let mut board = self.board.clone();
        perft_from(&mut board, self.current_player, depth)
    }

    /// Per-root-move leaf counts.
    pub fn divide(&self, depth: u32) -> Vec<(Move, u64)> {
        let mut board = self.board.clone();
        let mover = self.current_player;
        let mut out = Vec::new();
        for mv in board.legal_moves_for(mover) {
            let Ok(undo) = board.apply(&mv) else { continue };
            let nodes = perft_from(&mut board, mover.opposite(), depth.saturating_sub(1));
            board.undo(&undo);
            out.push((mv, nodes));
        }
        out
    }
}

impl std::str::FromStr for GameState {
    type Err = ChessError;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_fen(s)
    }
}

/// Whether `placement` is the standard starting setup.
pub fn is_initial_placement(placement: &str) -> bool {
    placement == INITIAL_PLACEMENT
}

fn perft_from(board: &mut Board, color: Color, depth: u32) -> u64 {
    if depth == 0 {
        return 1;
    }
    let moves = board.legal_moves_for(color);
    if depth == 1 {
        return moves.len() as u64;
    }
    let mut nodes = 0;
    for mv in moves {
        if let Ok(undo) = board.apply(&mv) {
            nodes += perft_from(board, color.opposite(), depth - 1);
            board.undo(&undo);
        }
    }
    nodes
}

/// Kings and rooks whose castling right is absent from a FEN record are
/// treated as having moved.
fn mark_lost_castling_pieces(board: &mut Board, rights: CastlingRights) {
    for color in [Color::White, Color::Black] {
        let row = color.home_row();
        let lost_ks = !rights.has(color, CastleSide::KingSide);
        let lost_qs = !rights.has(color, CastleSide::QueenSide);

        let mut mark = |column: i8, piece_type: Type| {
            let pos = Position::new(row, column);
            if let Some(piece) = board.get(pos) {
                if piece.color == color && piece.piece_type == piece_type {
                    board.set(pos, Some(piece.moved()));
                }
            }
        };
        if lost_ks && lost_qs {
            mark(4, Type::King);
        }
        if lost_ks {
            mark(7, Type::Rook);
        }
        if lost_qs {
            mark(0, Type::Rook);
        }
    }
}
