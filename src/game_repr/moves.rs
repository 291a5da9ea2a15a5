use std::fmt;

use crate::error::{ChessError, Result};

use super::board::Board;
use super::piece::{Piece, Type};
use super::position::{Direction, Position};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MoveType {
    Normal,
    DoublePawn,
    EnPassant,
    CastleKingSide,
    CastleQueenSide,
    PawnPromotion,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CastleSide {
    KingSide,
    QueenSide,
}

impl CastleSide {
    /// Direction the king walks in.
    pub fn direction(self) -> Direction {
        match self {
            CastleSide::KingSide => Direction::EAST,
            CastleSide::QueenSide => Direction::WEST,
        }
    }

    pub fn rook_column(self) -> i8 {
        match self {
            CastleSide::KingSide => 7,
            CastleSide::QueenSide => 0,
        }
    }
}

/// A move together with the squares its effect and its reversal touch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Move {
    Normal {
        from: Position,
        to: Position,
    },
    DoublePawn {
        from: Position,
        to: Position,
        skipped: Position,
    },
    EnPassant {
        from: Position,
        to: Position,
        captured: Position,
    },
    Castle {
        side: CastleSide,
        king_from: Position,
        king_to: Position,
        rook_from: Position,
        rook_to: Position,
    },
    PawnPromotion {
        from: Position,
        to: Position,
        promote_to: Type,
    },
}

/// Everything needed to take a move back.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Undo {
    pub mv: Move,
    /// The moving piece as it stood before the move.
    pub moved: Piece,
    pub captured: Option<(Position, Piece)>,
    /// The castling rook before it was relocated.
    pub rook: Option<Piece>,
    pub pawn_skips: [Option<Position>; 2],
    pub irreversible: bool,
}

impl Move {
    pub fn normal(from: Position, to: Position) -> Self {
        Move::Normal { from, to }
    }

    pub fn double_pawn(from: Position, to: Position) -> Self {
        let skipped = Position::new((from.row + to.row) / 2, from.column);
        Move::DoublePawn { from, to, skipped }
    }

    /// The victim sits beside the capturing pawn, on the target's column.
    pub fn en_passant(from: Position, to: Position) -> Self {
        let captured = Position::new(from.row, to.column);
        Move::EnPassant { from, to, captured }
    }

    pub fn castle(side: CastleSide, king_from: Position) -> Self {
        let dir = side.direction();
        let row = king_from.row;
        Move::Castle {
            side,
            king_from,
            king_to: king_from + dir * 2,
            rook_from: Position::new(row, side.rook_column()),
            rook_to: king_from + dir,
        }
    }

    pub fn promotion(from: Position, to: Position, promote_to: Type) -> Self {
        Move::PawnPromotion { from, to, promote_to }
    }

    pub fn from(&self) -> Position {
        match *self {
            Move::Normal { from, .. }
            | Move::DoublePawn { from, .. }
            | Move::EnPassant { from, .. }
            | Move::PawnPromotion { from, .. } => from,
            Move::Castle { king_from, .. } => king_from,
        }
    }

    pub fn to(&self) -> Position {
        match *self {
            Move::Normal { to, .. }
            | Move::DoublePawn { to, .. }
            | Move::EnPassant { to, .. }
            | Move::PawnPromotion { to, .. } => to,
            Move::Castle { king_to, .. } => king_to,
        }
    }

    pub fn move_type(&self) -> MoveType {
        match self {
            Move::Normal { .. } => MoveType::Normal,
            Move::DoublePawn { .. } => MoveType::DoublePawn,
            Move::EnPassant { .. } => MoveType::EnPassant,
            Move::Castle { side: CastleSide::KingSide, .. } => MoveType::CastleKingSide,
            Move::Castle { side: CastleSide::QueenSide, .. } => MoveType::CastleQueenSide,
            Move::PawnPromotion { .. } => MoveType::PawnPromotion,
        }
    }

    pub fn promotion_type(&self) -> Option<Type> {
        match self {
            Move::PawnPromotion { promote_to, .. } => Some(*promote_to),
            _ => None,
        }
    }

    /// Whether the move removes an enemy piece from `board`.
    pub fn is_capture(&self, board: &Board) -> bool {
        match self {
            Move::EnPassant { .. } => true,
            Move::Castle { .. } => false,
            _ => board.get(self.to()).is_some(),
        }
    }

    /// Captures and promotions.
    pub fn is_tactical(&self, board: &Board) -> bool {
        matches!(self, Move::PawnPromotion { .. }) || self.is_capture(board)
    }

    /// Applies the move to `board` and reports whether it resets the
    /// fifty-move clock. A move whose origin is empty leaves the board
    /// untouched.
    pub fn execute(&self, board: &mut Board) -> bool {
        match self.perform(board) {
            Ok(undo) => undo.irreversible,
            Err(err) => {
                log::warn!("{self} not executed: {err}");
                false
            }
        }
    }

    /// Whether the mover's king is safe after the move.
    pub fn is_legal(&self, board: &Board) -> bool {
        let mut scratch = board.clone();
        self.is_legal_in_place(&mut scratch)
    }

    /// Same as [`Move::is_legal`] but tries the move on `board` itself and
    /// takes it back before returning.
    pub fn is_legal_in_place(&self, board: &mut Board) -> bool {
        let Some(mover) = board.get(self.from()) else {
            return false;
        };

        if let Move::Castle { side, king_from, .. } = *self {
            return castle_is_safe(board, mover, side, king_from);
        }

        match board.apply(self) {
            Ok(undo) => {
                let safe = !board.is_in_check(mover.color);
                board.undo(&undo);
                safe
            }
            Err(_) => false,
        }
    }

    /// Performs the board effect without touching the mover's en-passant
    /// slot beyond what the move itself registers.
    pub(crate) fn perform(&self, board: &mut Board) -> Result<Undo> {
        let from = self.from();
        let moved = board.get(from).ok_or(ChessError::MissingPiece(from))?;
        let mut undo = Undo {
            mv: *self,
            moved,
            captured: None,
            rook: None,
            pawn_skips: board.pawn_skips(),
            irreversible: false,
        };

        match *self {
            Move::Normal { to, .. } => {
                undo.captured = board.get(to).map(|p| (to, p));
                board.relocate(from, to, moved);
                undo.irreversible = undo.captured.is_some() || moved.piece_type == Type::Pawn;
            }
            Move::DoublePawn { to, skipped, .. } => {
                board.relocate(from, to, moved);
                board.set_pawn_skip(moved.color, Some(skipped));
                undo.irreversible = true;
            }
            Move::EnPassant { to, captured, .. } => {
                undo.captured = board.get(captured).map(|p| (captured, p));
                board.relocate(from, to, moved);
                board.set(captured, None);
                undo.irreversible = true;
            }
            Move::Castle {
                king_to,
                rook_from,
                rook_to,
                ..
            } => {
                let rook = board.get(rook_from).ok_or(ChessError::MissingPiece(rook_from))?;
                undo.rook = Some(rook);
                board.relocate(from, king_to, moved);
                board.relocate(rook_from, rook_to, rook);
            }
            Move::PawnPromotion { to, promote_to, .. } => {
                undo.captured = board.get(to).map(|p| (to, p));
                board.set(from, None);
                board.set(to, Some(Piece::new(moved.color, promote_to).moved()));
                undo.irreversible = true;
            }
        }

        Ok(undo)
    }

    pub(crate) fn revert(&self, board: &mut Board, undo: &Undo) {
        match *self {
            Move::Castle {
                king_from,
                king_to,
                rook_from,
                rook_to,
                ..
            } => {
                board.set(king_to, None);
                board.set(rook_to, None);
                board.set(king_from, Some(undo.moved));
                board.set(rook_from, undo.rook);
            }
            _ => {
                board.set(self.to(), None);
                if let Some((square, piece)) = undo.captured {
                    board.set(square, Some(piece));
                }
                board.set(self.from(), Some(undo.moved));
            }
        }
        board.set_pawn_skips(undo.pawn_skips);
    }

    /// `e2e4`, `e7e8q`; castling is written as the king's step (`e1g1`).
    pub fn to_long_algebraic(&self) -> String {
        let mut s = format!("{}{}", self.from(), self.to());
        if let Some(t) = self.promotion_type() {
            s.push(t.to_char());
        }
        s
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_long_algebraic())
    }
}

/// Not in check now, and the king would not stand in check on either of
/// the two squares it walks over.
fn castle_is_safe(board: &mut Board, king: Piece, side: CastleSide, king_from: Position) -> bool {
    if board.is_in_check(king.color) {
        return false;
    }

    let dir = side.direction();
    let walk = [king_from + dir, king_from + dir * 2];
    if walk.iter().any(|sq| !board.is_empty(*sq)) {
        return false;
    }

    board.set(king_from, None);
    let mut safe = true;
    for square in walk {
        board.set(square, Some(king));
        let attacked = board.is_in_check(king.color);
        board.set(square, None);
        if attacked {
            safe = false;
            break;
        }
    }
    board.set(king_from, Some(king));
    safe
}

/// Parses the long algebraic form into its parts without consulting a
/// position. Returns `None` for malformed text.
pub fn parse_long_algebraic(text: &str) -> Option<(Position, Position, Option<Type>)> {
    let text = text.trim();
    if !text.is_ascii() || !(4..=5).contains(&text.len()) {
        return None;
    }
    let from = Position::from_algebraic(&text[0..2])?;
    let to = Position::from_algebraic(&text[2..4])?;
    let promotion = match text[4..].chars().next() {
        None => None,
        Some(c) => match Type::from_char(c)? {
            t @ (Type::Queen | Type::Rook | Type::Bishop | Type::Knight) => Some(t),
            _ => return None,
        },
    };
    Some((from, to, promotion))
}
