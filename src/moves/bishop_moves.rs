use crate::chess_errors::ChessResult;
use crate::game_state::board::Board;
use crate::game_state::chess_rules::DIAGONAL_DIRECTIONS;
use crate::game_state::chess_types::{Move, PieceKind, Square};
use crate::move_generation::legal_move_shared::{slide_destinations, slide_move};

pub fn can_bishop_move(board: &mut Board, source: Square, destination: Square) -> ChessResult<Move> {
    slide_move(board, source, destination, PieceKind::Bishop, true, false)
}

#[inline]
pub fn bishop_destinations(board: &Board, source: Square) -> Vec<Square> {
    slide_destinations(board, source, &DIAGONAL_DIRECTIONS)
}
