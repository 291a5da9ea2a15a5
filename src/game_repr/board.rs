use crate::error::{ChessError, Result};

use super::moves::{Move, Undo};
use super::piece::{Color, Piece, Type};
use super::position::Position;

pub const INITIAL_PLACEMENT: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR";

/// An 8x8 grid of pieces plus one en-passant skip square per player.
///
/// The board is plain data, so cloning it is a deep copy: speculative work
/// on a clone never reaches the original.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Board {
    squares: [[Option<Piece>; 8]; 8],
    pawn_skips: [Option<Position>; 2],
}

impl Default for Board {
    fn default() -> Self {
        Self::empty()
    }
}

impl Board {
    pub fn empty() -> Self {
        Self {
            squares: [[None; 8]; 8],
            pawn_skips: [None; 2],
        }
    }

    pub fn initial() -> Self {
        match Self::from_placement(INITIAL_PLACEMENT) {
            Ok(board) => board,
            Err(_) => unreachable!("initial placement is well formed"),
        }
    }

    /// Builds a board from the first FEN field. Pawns away from their start
    /// row are marked as moved; every other piece starts unmoved.
    pub fn from_placement(placement: &str) -> Result<Self> {
        let ranks: Vec<&str> = placement.split('/').collect();
        if ranks.len() != 8 {
            return Err(ChessError::InvalidFen(format!(
                "expected 8 ranks, found {}",
                ranks.len()
            )));
        }

        let mut board = Self::empty();
        for (row, rank) in ranks.iter().enumerate() {
            let mut column = 0usize;
            for c in rank.chars() {
                if let Some(skip) = c.to_digit(10) {
                    if !(1..=8).contains(&skip) {
                        return Err(ChessError::InvalidFen(format!("bad empty run '{c}'")));
                    }
                    column += skip as usize;
                } else {
                    let mut piece = Piece::from_char(c)
                        .ok_or_else(|| ChessError::InvalidFen(format!("unknown piece '{c}'")))?;
                    if column >= 8 {
                        return Err(ChessError::InvalidFen(format!("rank '{rank}' too long")));
                    }
                    if piece.piece_type == Type::Pawn && row as i8 != piece.color.pawn_row() {
                        piece.has_moved = true;
                    }
                    board.squares[row][column] = Some(piece);
                    column += 1;
                }
                if column > 8 {
                    return Err(ChessError::InvalidFen(format!("rank '{rank}' too long")));
                }
            }
            if column != 8 {
                return Err(ChessError::InvalidFen(format!("rank '{rank}' too short")));
            }
        }
        Ok(board)
    }

    /// First FEN field.
    pub fn to_placement(&self) -> String {
        let mut out = String::with_capacity(72);
        for row in 0..8 {
            let mut empty = 0;
            for column in 0..8 {
                match self.squares[row][column] {
                    Some(piece) => {
                        if empty > 0 {
                            out.push(char::from(b'0' + empty));
                            empty = 0;
                        }
                        out.push(piece.to_char());
                    }
                    None => empty += 1,
                }
            }
            if empty > 0 {
                out.push(char::from(b'0' + empty));
            }
            if row != 7 {
                out.push('/');
            }
        }
        out
    }

    pub fn is_inside(pos: Position) -> bool {
        pos.is_inside()
    }

    /// Piece on `pos`; `None` for empty or off-board squares.
    pub fn get(&self, pos: Position) -> Option<Piece> {
        if !pos.is_inside() {
            return None;
        }
        self.squares[pos.row as usize][pos.column as usize]
    }

    pub fn get_rc(&self, row: i32, column: i32) -> Option<Piece> {
        match (i8::try_from(row), i8::try_from(column)) {
            (Ok(row), Ok(column)) => self.get(Position::new(row, column)),
            _ => None,
        }
    }

    /// Writes to off-board squares are ignored.
    pub fn set(&mut self, pos: Position, piece: Option<Piece>) {
        if pos.is_inside() {
            self.squares[pos.row as usize][pos.column as usize] = piece;
        }
    }

    pub fn is_empty(&self, pos: Position) -> bool {
        self.get(pos).is_none()
    }

    pub(crate) fn relocate(&mut self, from: Position, to: Position, piece: Piece) {
        self.set(from, None);
        self.set(to, Some(piece.moved()));
    }

    pub fn pawn_skip(&self, color: Color) -> Option<Position> {
        self.pawn_skips[color.index()]
    }

    pub fn set_pawn_skip(&mut self, color: Color, square: Option<Position>) {
        self.pawn_skips[color.index()] = square;
    }

    pub fn pawn_skips(&self) -> [Option<Position>; 2] {
        self.pawn_skips
    }

    pub(crate) fn set_pawn_skips(&mut self, skips: [Option<Position>; 2]) {
        self.pawn_skips = skips;
    }

    /// Occupied squares in row-major order.
    pub fn piece_positions(&self) -> impl Iterator<Item = Position> + '_ {
        (0..64)
            .map(Position::from_index)
            .filter(move |pos| self.get(*pos).is_some())
    }

    pub fn piece_positions_for(&self, color: Color) -> impl Iterator<Item = Position> + '_ {
        self.piece_positions()
            .filter(move |pos| self.get(*pos).is_some_and(|p| p.color == color))
    }

    pub fn king_position(&self, color: Color) -> Option<Position> {
        self.piece_positions_for(color)
            .find(|pos| self.get(*pos).is_some_and(|p| p.piece_type == Type::King))
    }

    /// True when some opposing piece attacks `color`'s king.
    pub fn is_in_check(&self, color: Color) -> bool {
        self.piece_positions_for(color.opposite()).any(|pos| {
            self.get(pos)
                .is_some_and(|piece| piece.can_capture_opponent_king(pos, self))
        })
    }

    /// Plays one ply at board level: clears the mover's own skip square,
    /// then applies the move. The returned [`Undo`] restores both.
    pub fn apply(&mut self, mv: &Move) -> Result<Undo> {
        let from = mv.from();
        let mover = self.get(from).ok_or(ChessError::MissingPiece(from))?;
        let skips = self.pawn_skips;
        self.set_pawn_skip(mover.color, None);
        match mv.perform(self) {
            Ok(mut undo) => {
                undo.pawn_skips = skips;
                Ok(undo)
            }
            Err(err) => {
                self.pawn_skips = skips;
                Err(err)
            }
        }
    }

    pub fn undo(&mut self, undo: &Undo) {
        undo.mv.revert(self, undo);
    }

    /// Legal moves for the piece on `from`, tested on this board in place.
    pub fn legal_moves_from(&mut self, from: Position) -> Vec<Move> {
        let Some(piece) = self.get(from) else {
            return Vec::new();
        };
        piece
            .get_moves(from, self)
            .into_iter()
            .filter(|mv| mv.is_legal_in_place(self))
            .collect()
    }

    pub fn legal_moves_for(&mut self, color: Color) -> Vec<Move> {
        let origins: Vec<Position> = self.piece_positions_for(color).collect();
        let mut moves = Vec::with_capacity(48);
        for from in origins {
            moves.extend(self.legal_moves_from(from));
        }
        moves
    }

    pub fn has_legal_move(&mut self, color: Color) -> bool {
        let origins: Vec<Position> = self.piece_positions_for(color).collect();
        for from in origins {
            let Some(piece) = self.get(from) else { continue };
            if piece
                .get_moves(from, self)
                .iter()
                .any(|mv| mv.is_legal_in_place(self))
            {
                return true;
            }
        }
        false
    }

    pub fn material(&self) -> MaterialCount {
        let mut count = MaterialCount::default();
        for pos in self.piece_positions() {
            if let Some(piece) = self.get(pos) {
                count.add(piece, pos);
            }
        }
        count
    }

    /// Bare kings, a lone minor piece against a bare king, or one bishop
    /// each on the same square color.
    pub fn insufficient_material(&self) -> bool {
        let count = self.material();
        match count.total {
            2 => true,
            3 => {
                count.single(Color::White, Type::Bishop)
                    || count.single(Color::White, Type::Knight)
                    || count.single(Color::Black, Type::Bishop)
                    || count.single(Color::Black, Type::Knight)
            }
            4 => {
                count.single(Color::White, Type::Bishop)
                    && count.single(Color::Black, Type::Bishop)
                    && count.bishop_squares[0] == count.bishop_squares[1]
            }
            _ => false,
        }
    }
}

/// Piece tally used by the insufficient-material rule.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct MaterialCount {
    counts: [[u8; 6]; 2],
    pub total: u8,
    /// Square color of the last bishop seen for each side.
    bishop_squares: [Option<Color>; 2],
}

impl MaterialCount {
    fn add(&mut self, piece: Piece, pos: Position) {
        self.counts[piece.color.index()][piece.piece_type.index()] += 1;
        self.total += 1;
        if piece.piece_type == Type::Bishop {
            self.bishop_squares[piece.color.index()] = Some(pos.square_color());
        }
    }

    pub fn count(&self, color: Color, piece_type: Type) -> u8 {
        self.counts[color.index()][piece_type.index()]
    }

    /// `color` owns exactly one piece besides its king, and it is `piece_type`.
    fn single(&self, color: Color, piece_type: Type) -> bool {
        let own: u8 = self.counts[color.index()].iter().sum();
        own == 2 && self.count(color, piece_type) == 1
    }
}
