//! Canonical chess-rule constants.
//!
//! Board geometry is kept as compile-time tables: direction vectors, the
//! starting layout, and the fixed castling squares.

use crate::game_state::chess_types::{PieceKind, Square};

pub const BOARD_SIZE: i8 = 8;

/// Back-rank layout from file a to file h.
pub const BACK_RANK_LAYOUT: [PieceKind; 8] = [
    PieceKind::Rook,
    PieceKind::Knight,
    PieceKind::Bishop,
    PieceKind::Queen,
    PieceKind::King,
    PieceKind::Bishop,
    PieceKind::Knight,
    PieceKind::Rook,
];

pub const KNIGHT_OFFSETS: [(i8, i8); 8] = [
    (1, 2),
    (2, 1),
    (2, -1),
    (1, -2),
    (-1, -2),
    (-2, -1),
    (-2, 1),
    (-1, 2),
];

pub const KING_OFFSETS: [(i8, i8); 8] = [
    (0, 1),
    (1, 1),
    (1, 0),
    (1, -1),
    (0, -1),
    (-1, -1),
    (-1, 0),
    (-1, 1),
];

pub const DIAGONAL_DIRECTIONS: [(i8, i8); 4] = [(1, 1), (1, -1), (-1, -1), (-1, 1)];

pub const ORTHOGONAL_DIRECTIONS: [(i8, i8); 4] = [(0, 1), (1, 0), (0, -1), (-1, 0)];

pub const PROMOTION_TARGETS: [PieceKind; 4] = [
    PieceKind::Knight,
    PieceKind::Bishop,
    PieceKind::Rook,
    PieceKind::Queen,
];

/// File the king starts on.
pub const KING_START_FILE: i8 = 5;
pub const KINGSIDE_ROOK_FILE: i8 = 8;
pub const QUEENSIDE_ROOK_FILE: i8 = 1;
pub const KINGSIDE_KING_DESTINATION_FILE: i8 = 7;
pub const QUEENSIDE_KING_DESTINATION_FILE: i8 = 3;

/// Rook squares `(from, to)` for a castling king landing on `king_destination`.
pub fn castling_rook_squares(king_destination: Square) -> Option<(Square, Square)> {
    let rank = king_destination.rank();
    match king_destination.file() {
        KINGSIDE_KING_DESTINATION_FILE => Some((
            Square::new(KINGSIDE_ROOK_FILE, rank)?,
            Square::new(KINGSIDE_KING_DESTINATION_FILE - 1, rank)?,
        )),
        QUEENSIDE_KING_DESTINATION_FILE => Some((
            Square::new(QUEENSIDE_ROOK_FILE, rank)?,
            Square::new(QUEENSIDE_KING_DESTINATION_FILE + 1, rank)?,
        )),
        _ => None,
    }
}
