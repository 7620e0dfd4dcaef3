//! Undo bookkeeping kept beside the move history.
//!
//! Both ledgers are stacks that mirror the history: a capture pushes, undoing
//! that capture pops; a promotion pushes a record, undoing it pops.

use crate::game_state::chess_types::{Piece, PieceKind};

/// Pieces one player has taken, oldest first.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CapturedLedger {
    pieces: Vec<Piece>,
}

impl CapturedLedger {
    #[inline]
    pub fn push(&mut self, piece: Piece) {
        self.pieces.push(piece);
    }

    #[inline]
    pub fn pop(&mut self) -> Option<Piece> {
        self.pieces.pop()
    }

    #[inline]
    pub fn as_slice(&self) -> &[Piece] {
        &self.pieces
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.pieces.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.pieces.is_empty()
    }
}

/// One promotion move: the pawn that stepped onto the far rank and the kind
/// it became, once chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PromotionRecord {
    pub original: Piece,
    pub promoted_to: Option<PieceKind>,
}

/// Promotion records in history order; one entry per promotion move.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PromotionLedger {
    records: Vec<PromotionRecord>,
}

impl PromotionLedger {
    #[inline]
    pub fn push(&mut self, record: PromotionRecord) {
        self.records.push(record);
    }

    #[inline]
    pub fn pop(&mut self) -> Option<PromotionRecord> {
        self.records.pop()
    }

    #[inline]
    pub fn last_mut(&mut self) -> Option<&mut PromotionRecord> {
        self.records.last_mut()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
