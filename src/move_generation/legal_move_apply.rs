//! Board mutation for confirmed moves and their exact reversal.
//!
//! Neither function validates: callers hand in moves a movement rule has
//! already accepted, or moves popped from history. Any inconsistency found
//! here means the history and board disagree, which is fatal.

use crate::game_state::board::Board;
use crate::game_state::chess_types::{Move, Piece, PieceKind};
use crate::game_state::ledgers::{CapturedLedger, PromotionLedger, PromotionRecord};

/// Play `mv` on `board`.
///
/// A captured piece goes to the capturing side's ledger. A promotion leaves
/// the pawn on the far rank and opens a record with no kind chosen yet.
/// Returns the piece that moved.
pub fn apply_move(
    board: &mut Board,
    mv: &Move,
    captured: &mut [CapturedLedger; 2],
    promotions: &mut PromotionLedger,
) -> Piece {
    let Some(mover) = board.remove(mv.source) else {
        corrupted("apply", mv, "source square is empty");
    };

    if let Some(at) = mv.captured_square() {
        match board.remove(at) {
            Some(taken) => captured[mover.color.index()].push(taken),
            None => corrupted("apply", mv, "capture target is empty"),
        }
    }

    board.place(mv.destination, mover);

    if let Some((rook_from, rook_to)) = mv.rook_relocation() {
        let Some(rook) = board.remove(rook_from) else {
            corrupted("apply", mv, "castling rook is missing");
        };
        board.place(rook_to, rook);
    }

    if mv.kind.is_promotion() {
        promotions.push(PromotionRecord {
            original: mover,
            promoted_to: None,
        });
    }

    mover
}

/// Reverse `mv`, the most recent move applied to `board`.
///
/// Returns the promotion record the move opened, if it was a promotion, so
/// the caller can replay the same choice later.
pub fn revert_move(
    board: &mut Board,
    mv: &Move,
    captured: &mut [CapturedLedger; 2],
    promotions: &mut PromotionLedger,
) -> Option<PromotionRecord> {
    let Some(landed) = board.remove(mv.destination) else {
        corrupted("revert", mv, "destination square is empty");
    };

    let record = if mv.kind.is_promotion() {
        let Some(record) = promotions.pop() else {
            corrupted("revert", mv, "promotion ledger is empty");
        };
        Some(record)
    } else {
        None
    };
    let original = record.map_or(landed, |record| record.original);
    board.place(mv.source, original);

    if let Some(at) = mv.captured_square() {
        let Some(taken) = captured[original.color.index()].pop() else {
            corrupted("revert", mv, "captured ledger is empty");
        };
        board.place(at, taken);
    }

    if let Some((rook_from, rook_to)) = mv.rook_relocation() {
        let Some(rook) = board.remove(rook_to) else {
            corrupted("revert", mv, "castled rook is missing");
        };
        board.place(rook_from, rook);
    }

    record
}

/// Swap the pawn standing on the destination of `mv` for a `kind` piece.
pub fn replace_promoted_pawn(board: &mut Board, mv: &Move, kind: PieceKind) {
    match board.occupant_at(mv.destination) {
        Some(pawn) if pawn.kind == PieceKind::Pawn => {
            board.place(mv.destination, Piece::new(kind, pawn.color));
        }
        _ => corrupted("promote", mv, "no pawn on the promotion square"),
    }
}

fn corrupted(stage: &str, mv: &Move, reason: &str) -> ! {
    tracing::error!(stage, %mv, reason, "board and history disagree");
    panic!("corrupted game state during {stage} of {mv}: {reason}");
}
