//! Legal move generation.
//!
//! Every movement rule validates a single (source, destination) request, so
//! generation walks each piece's candidate destinations and keeps whatever
//! the matching rule accepts. Validation and generation therefore cannot
//! disagree about what is legal.

use crate::chess_errors::{ChessErrors, ChessResult};
use crate::game_state::board::Board;
use crate::game_state::chess_types::{Color, Move, PieceKind, Square};
use crate::moves::bishop_moves::{bishop_destinations, can_bishop_move};
use crate::moves::king_moves::{can_king_move, king_destinations};
use crate::moves::knight_moves::{can_knight_move, knight_destinations};
use crate::moves::pawn_moves::{can_pawn_move, pawn_destinations};
use crate::moves::queen_moves::{can_queen_move, queen_destinations};
use crate::moves::rook_moves::{can_rook_move, rook_destinations};

/// Dispatch a request to the rule for whatever stands on `source`.
pub fn can_move(
    board: &mut Board,
    history: &[Move],
    source: Square,
    destination: Square,
) -> ChessResult<Move> {
    let piece = board
        .occupant_at(source)
        .ok_or(ChessErrors::EmptySource(source))?;
    match piece.kind {
        PieceKind::Pawn => can_pawn_move(board, history, source, destination),
        PieceKind::Knight => can_knight_move(board, source, destination),
        PieceKind::Bishop => can_bishop_move(board, source, destination),
        PieceKind::Rook => can_rook_move(board, history, source, destination),
        PieceKind::Queen => can_queen_move(board, source, destination),
        PieceKind::King => can_king_move(board, history, source, destination),
    }
}

/// Geometric candidates for the piece on `source`; a superset of its legal
/// destinations. Empty when the square is empty.
pub fn candidate_destinations(board: &Board, source: Square) -> Vec<Square> {
    let Some(piece) = board.occupant_at(source) else {
        return Vec::new();
    };
    match piece.kind {
        PieceKind::Pawn => pawn_destinations(source, piece.color),
        PieceKind::Knight => knight_destinations(source),
        PieceKind::Bishop => bishop_destinations(board, source),
        PieceKind::Rook => rook_destinations(board, source),
        PieceKind::Queen => queen_destinations(board, source),
        PieceKind::King => king_destinations(source, piece.color),
    }
}

/// Legal moves of the piece on `source`.
///
/// A rook reaching its own king yields the king's castling move, which the
/// king already generates, so only moves starting on `source` are kept.
pub fn legal_moves_from(board: &mut Board, history: &[Move], source: Square) -> Vec<Move> {
    candidate_destinations(board, source)
        .into_iter()
        .filter_map(|destination| can_move(board, history, source, destination).ok())
        .filter(|mv| mv.source == source)
        .collect()
}

/// Every legal move for `color`, in square order of the moving piece.
///
/// Promotions appear once per pawn move; the promotion kind is chosen later.
pub fn generate_legal_moves(board: &mut Board, history: &[Move], color: Color) -> Vec<Move> {
    let sources: Vec<Square> = board.pieces_of(color).map(|(at, _)| at).collect();
    let mut legal = Vec::with_capacity(48);
    for source in sources {
        legal.extend(legal_moves_from(board, history, source));
    }
    legal
}

/// Stops at the first legal move found.
pub fn has_any_legal_move(board: &mut Board, history: &[Move], color: Color) -> bool {
    let sources: Vec<Square> = board.pieces_of(color).map(|(at, _)| at).collect();
    sources.into_iter().any(|source| {
        candidate_destinations(board, source)
            .into_iter()
            .any(|destination| can_move(board, history, source, destination).is_ok())
    })
}
