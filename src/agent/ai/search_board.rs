// Working copy used by the search
//
// The search owns one Board and mutates it in place with make/unmake. The
// Zobrist hash is updated incrementally on make and restored on unmake.

use crate::error::Result;
use crate::game_repr::{Board, CastlingRights, Color, Move, Undo};
use super::transposition_table::{compute_hash, zobrist};

#[derive(Debug, Clone, Copy)]
pub struct SearchUndo {
    undo: Undo,
    hash: u64,
}

#[derive(Debug, Clone)]
pub struct SearchBoard {
    board: Board,
    side: Color,
    hash: u64,
}

impl SearchBoard {
    pub fn new(board: Board, side: Color) -> Self {
        let hash = compute_hash(&board, side);
        Self { board, side, hash }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn board_mut(&mut self) -> &mut Board {
        &mut self.board
    }

    /// Side to move
    pub fn side(&self) -> Color {
        self.side
    }

    pub fn hash(&self) -> u64 {
        self.hash
    }

    pub fn is_in_check(&self) -> bool {
        self.board.is_in_check(self.side)
    }

    pub fn legal_moves(&mut self) -> Vec<Move> {
        self.board.legal_moves_for(self.side)
    }

    /// Plays `mv` for the side to move.
    pub fn make(&mut self, mv: &Move) -> Result<SearchUndo> {
        let keys = zobrist();
        let castling_before = CastlingRights::from_board(&self.board);
        let skips_before = self.board.pawn_skips();

        let undo = self.board.apply(mv)?;
        let saved = SearchUndo {
            undo,
            hash: self.hash,
        };

        let mut hash = self.hash;
        hash ^= keys.piece(undo.moved, mv.from());
        if let Some((square, captured)) = undo.captured {
            hash ^= keys.piece(captured, square);
        }
        if let Some(placed) = self.board.get(mv.to()) {
            hash ^= keys.piece(placed, mv.to());
        }
        if let (Move::Castle { rook_from, rook_to, .. }, Some(rook)) = (mv, undo.rook) {
            hash ^= keys.piece(rook, *rook_from);
            hash ^= keys.piece(rook, *rook_to);
        }

        hash ^= keys.castling(castling_before);
        hash ^= keys.castling(CastlingRights::from_board(&self.board));
        hash ^= keys.skips(skips_before);
        hash ^= keys.skips(self.board.pawn_skips());
        hash ^= keys.side_to_move;

        self.hash = hash;
        self.side = self.side.opposite();
        Ok(saved)
    }

    pub fn unmake(&mut self, saved: &SearchUndo) {
        self.board.undo(&saved.undo);
        self.hash = saved.hash;
        self.side = self.side.opposite();
    }
}
