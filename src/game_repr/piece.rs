use smallvec::SmallVec;

use super::board::Board;
use super::moves::Move;
use super::position::{Direction, Position};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Type {
    King,
    Queen,
    Rook,
    Bishop,
    Knight,
    Pawn,
}

impl Type {
    /// Pieces a pawn may promote to, in the order moves are generated.
    pub const PROMOTIONS: [Type; 4] = [Type::Knight, Type::Bishop, Type::Rook, Type::Queen];

    /// Lowercase FEN letter.
    pub fn to_char(self) -> char {
        match self {
            Type::King => 'k',
            Type::Queen => 'q',
            Type::Rook => 'r',
            Type::Bishop => 'b',
            Type::Knight => 'n',
            Type::Pawn => 'p',
        }
    }

    pub fn from_char(c: char) -> Option<Self> {
        match c.to_ascii_lowercase() {
            'k' => Some(Type::King),
            'q' => Some(Type::Queen),
            'r' => Some(Type::Rook),
            'b' => Some(Type::Bishop),
            'n' => Some(Type::Knight),
            'p' => Some(Type::Pawn),
            _ => None,
        }
    }

    pub fn index(self) -> usize {
        match self {
            Type::Pawn => 0,
            Type::Knight => 1,
            Type::Bishop => 2,
            Type::Rook => 3,
            Type::Queen => 4,
            Type::King => 5,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Color {
    White,
    Black,
}

impl Color {
    pub fn opposite(&self) -> Self {
        match self {
            Self::White => Self::Black,
            Self::Black => Self::White,
        }
    }

    /// Direction this side's pawns advance in.
    pub fn forward(&self) -> Direction {
        match self {
            Self::White => Direction::NORTH,
            Self::Black => Direction::SOUTH,
        }
    }

    /// Row holding this side's king and rooks at the start.
    pub fn home_row(&self) -> i8 {
        match self {
            Self::White => 7,
            Self::Black => 0,
        }
    }

    pub fn pawn_row(&self) -> i8 {
        match self {
            Self::White => 6,
            Self::Black => 1,
        }
    }

    pub fn promotion_row(&self) -> i8 {
        match self {
            Self::White => 0,
            Self::Black => 7,
        }
    }

    pub fn index(&self) -> usize {
        match self {
            Self::White => 0,
            Self::Black => 1,
        }
    }

    pub fn fen_char(&self) -> char {
        match self {
            Self::White => 'w',
            Self::Black => 'b',
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Piece {
    pub color: Color,
    pub piece_type: Type,
    pub has_moved: bool,
}

impl Piece {
    pub fn new(color: Color, piece_type: Type) -> Self {
        Self {
            color,
            piece_type,
            has_moved: false,
        }
    }

    pub fn moved(mut self) -> Self {
        self.has_moved = true;
        self
    }

    /// FEN letter: uppercase for White.
    pub fn from_char(c: char) -> Option<Self> {
        let piece_type = Type::from_char(c)?;
        let color = if c.is_ascii_uppercase() {
            Color::White
        } else {
            Color::Black
        };
        Some(Self::new(color, piece_type))
    }

    pub fn to_char(&self) -> char {
        let c = self.piece_type.to_char();
        match self.color {
            Color::White => c.to_ascii_uppercase(),
            Color::Black => c,
        }
    }

    pub fn is(&self, color: Color) -> bool {
        self.color == color
    }

    /// Pseudo-legal moves from `from`. Nothing here filters out moves that
    /// leave the own king capturable.
    pub fn get_moves(&self, from: Position, board: &Board) -> SmallVec<[Move; 32]> {
        let mut moves = SmallVec::new();
        match self.piece_type {
            Type::Pawn => board.pawn_moves_into(from, self, &mut moves),
            Type::Knight => board.knight_moves_into(from, self, &mut moves),
            Type::Bishop => board.bishop_moves_into(from, self, &mut moves),
            Type::Rook => board.rook_moves_into(from, self, &mut moves),
            Type::Queen => board.queen_moves_into(from, self, &mut moves),
            Type::King => board.king_moves_into(from, self, &mut moves),
        }
        moves
    }

    /// Whether this piece, standing on `from`, attacks the enemy king.
    /// Must stay independent of legality filtering since check detection
    /// is built on it.
    pub fn can_capture_opponent_king(&self, from: Position, board: &Board) -> bool {
        match self.piece_type {
            Type::Pawn => board.pawn_hits_king(from, self),
            Type::Knight => board.knight_hits_king(from, self),
            Type::Bishop => board.bishop_hits_king(from, self),
            Type::Rook => board.rook_hits_king(from, self),
            Type::Queen => board.queen_hits_king(from, self),
            Type::King => board.king_hits_king(from, self),
        }
    }
}
