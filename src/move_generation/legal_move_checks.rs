//! Check, pin, and mate analysis.
//!
//! Legality questions of the form "what if this piece moved there" are
//! answered by playing the move on the live board inside a
//! [`SpeculativeBoard`]. The guard records every square it touches and writes
//! the saved contents back when dropped, so the board is restored on every
//! exit path, unwinding included.

use std::ops::Deref;

use crate::game_state::board::{squares_between, Board};
use crate::game_state::chess_rules::KING_OFFSETS;
use crate::game_state::chess_types::{Color, Move, MoveKind, Piece, PieceKind, Square};
use crate::move_generation::legal_move_generator::{can_move, has_any_legal_move};

/// Scoped mutation of a board with guaranteed restoration.
pub struct SpeculativeBoard<'a> {
    board: &'a mut Board,
    saved: Vec<(Square, Option<Piece>)>,
}

impl<'a> SpeculativeBoard<'a> {
    pub fn new(board: &'a mut Board) -> Self {
        Self {
            board,
            saved: Vec::with_capacity(4),
        }
    }

    fn save(&mut self, at: Square) {
        if !self.saved.iter().any(|(square, _)| *square == at) {
            let occupant = self.board.occupant_at(at);
            self.saved.push((at, occupant));
        }
    }

    pub fn remove(&mut self, at: Square) -> Option<Piece> {
        self.save(at);
        self.board.remove(at)
    }

    pub fn place(&mut self, at: Square, piece: Piece) {
        self.save(at);
        self.board.place(at, piece);
    }

    /// Play `mv` on the board: lift the mover, remove whatever it captures
    /// (the bypassed pawn for en passant), land it, and relocate the rook
    /// when castling. Promotion kind is irrelevant to attacks on the mover's
    /// own king, so the pawn lands as a pawn.
    pub fn play(&mut self, mv: &Move) {
        let Some(piece) = self.remove(mv.source) else {
            return;
        };
        if let Some(captured) = mv.captured_square() {
            self.remove(captured);
        }
        self.place(mv.destination, piece);
        if let Some((rook_from, rook_to)) = mv.rook_relocation() {
            if let Some(rook) = self.remove(rook_from) {
                self.place(rook_to, rook);
            }
        }
    }
}

impl Deref for SpeculativeBoard<'_> {
    type Target = Board;

    fn deref(&self) -> &Board {
        self.board
    }
}

impl Drop for SpeculativeBoard<'_> {
    fn drop(&mut self) {
        for (at, occupant) in self.saved.drain(..).rev() {
            self.board.restore(at, occupant);
        }
    }
}

/// Whether playing `mv` would leave the mover's own king attacked.
pub fn would_expose_own_king(board: &mut Board, mv: &Move) -> bool {
    let Some(mover) = board.occupant_at(mv.source) else {
        return false;
    };
    let mut speculative = SpeculativeBoard::new(board);
    speculative.play(mv);
    let king = speculative.king_square(mover.color);
    !speculative
        .attackers(king, mover.color.enemy())
        .is_empty()
}

/// Whether the piece on `at` shields its own king: lifting it off the board
/// adds attackers to that king.
pub fn is_pinned(board: &mut Board, at: Square) -> bool {
    let Some(piece) = board.occupant_at(at) else {
        return false;
    };
    if piece.kind == PieceKind::King {
        return false;
    }
    let king = board.king_square(piece.color);
    let enemy = piece.color.enemy();
    let before = board.attackers(king, enemy).len();
    let mut speculative = SpeculativeBoard::new(board);
    speculative.remove(at);
    speculative.attackers(king, enemy).len() > before
}

/// Whether `color`, currently in check, has no way out.
///
/// Escapes are tried in order: king steps, capture of a lone checker, then
/// interposition against a lone sliding checker.
pub fn is_checkmate(board: &mut Board, history: &[Move], color: Color) -> bool {
    let king = board.king_square(color);
    let enemy = color.enemy();
    let checkers = board.attackers(king, enemy);
    if checkers.is_empty() {
        return false;
    }

    if king_can_step_out(board, king, color) {
        tracing::trace!(%color, "check escaped by king step");
        return false;
    }

    // A double check can only be answered by the king itself.
    let &[checker] = checkers.as_slice() else {
        return true;
    };

    if can_capture_checker(board, history, color, checker) {
        tracing::trace!(%color, %checker, "check escaped by capture");
        return false;
    }

    let checker_kind = board.occupant_at(checker).map(|piece| piece.kind);
    if checker_kind != Some(PieceKind::Knight) {
        for between in squares_between(king, checker) {
            if friendly_piece_can_reach(board, history, color, between) {
                tracing::trace!(%color, %between, "check escaped by block");
                return false;
            }
        }
    }

    true
}

/// Whether `color`, not in check, has no legal move at all.
pub fn is_stalemate(board: &mut Board, history: &[Move], color: Color) -> bool {
    !board.is_in_check(color) && !has_any_legal_move(board, history, color)
}

fn king_can_step_out(board: &mut Board, king: Square, color: Color) -> bool {
    for (d_file, d_rank) in KING_OFFSETS {
        let Some(destination) = king.offset(d_file, d_rank) else {
            continue;
        };
        let kind = match board.occupant_at(destination) {
            Some(piece) if piece.color == color => continue,
            Some(_) => MoveKind::Capture,
            None => MoveKind::Normal,
        };
        if !would_expose_own_king(board, &Move::new(king, destination, kind)) {
            return true;
        }
    }
    false
}

fn can_capture_checker(board: &mut Board, history: &[Move], color: Color, checker: Square) -> bool {
    if friendly_piece_can_reach(board, history, color, checker) {
        return true;
    }

    // A checking pawn that just advanced two ranks may also fall en passant.
    let checker_is_pawn = board
        .occupant_at(checker)
        .is_some_and(|piece| piece.kind == PieceKind::Pawn);
    if !checker_is_pawn {
        return false;
    }
    let Some(landing) = checker.offset(0, color.pawn_direction()) else {
        return false;
    };
    let pawns: Vec<Square> = board
        .pieces_of(color)
        .filter(|(_, piece)| piece.kind == PieceKind::Pawn)
        .map(|(at, _)| at)
        .collect();
    pawns.into_iter().any(|at| {
        can_move(board, history, at, landing).is_ok_and(|mv| mv.kind == MoveKind::EnPassant)
    })
}

/// Whether any non-king piece of `color` can legally move to `target`.
fn friendly_piece_can_reach(
    board: &mut Board,
    history: &[Move],
    color: Color,
    target: Square,
) -> bool {
    let candidates: Vec<Square> = board
        .pieces_of(color)
        .filter(|(_, piece)| piece.kind != PieceKind::King)
        .map(|(at, _)| at)
        .collect();
    candidates
        .into_iter()
        .any(|at| can_move(board, history, at, target).is_ok())
}
