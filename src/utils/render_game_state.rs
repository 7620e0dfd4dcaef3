//! Text views of a board.
//!
//! `render_board` draws the Unicode diagram used by `Display for Board` and
//! diagnostics; `parse_diagram` reads the ASCII form used to set up
//! positions in tests and benches.

use crate::chess_errors::{ChessErrors, ChessResult};
use crate::game_state::board::Board;
use crate::game_state::chess_rules::BOARD_SIZE;
use crate::game_state::chess_types::{Color, Piece, PieceKind, Square};

/// Render the board to a Unicode string for terminal output, rank 8 on top.
pub fn render_board(board: &Board) -> String {
    let mut out = String::new();

    out.push_str("  a b c d e f g h\n");

    for rank in (1..=BOARD_SIZE).rev() {
        let label = char::from(b'0' + rank as u8);
        out.push(label);
        out.push(' ');

        for file in 1..=BOARD_SIZE {
            let occupant = Square::new(file, rank).and_then(|at| board.occupant_at(at));
            match occupant {
                Some(piece) => out.push(piece_to_unicode(piece)),
                None => out.push('·'),
            }

            if file < BOARD_SIZE {
                out.push(' ');
            }
        }

        out.push(' ');
        out.push(label);
        out.push('\n');
    }

    out.push_str("  a b c d e f g h");

    out
}

pub fn piece_to_unicode(piece: Piece) -> char {
    match (piece.color, piece.kind) {
        (Color::White, PieceKind::Pawn) => '♙',
        (Color::White, PieceKind::Knight) => '♘',
        (Color::White, PieceKind::Bishop) => '♗',
        (Color::White, PieceKind::Rook) => '♖',
        (Color::White, PieceKind::Queen) => '♕',
        (Color::White, PieceKind::King) => '♔',
        (Color::Black, PieceKind::Pawn) => '♟',
        (Color::Black, PieceKind::Knight) => '♞',
        (Color::Black, PieceKind::Bishop) => '♝',
        (Color::Black, PieceKind::Rook) => '♜',
        (Color::Black, PieceKind::Queen) => '♛',
        (Color::Black, PieceKind::King) => '♚',
    }
}

/// Build a board from eight ASCII rows, rank 8 first: uppercase letters are
/// white pieces, lowercase black, `.` an empty square.
pub fn parse_diagram(rows: [&str; 8]) -> ChessResult<Board> {
    let mut pieces = Vec::new();
    for (row, line) in rows.iter().enumerate() {
        let rank = BOARD_SIZE - row as i8;
        if line.chars().count() != BOARD_SIZE as usize {
            return Err(ChessErrors::InvalidPosition(format!(
                "diagram rank {rank} must have 8 squares: {line:?}"
            )));
        }
        for (column, symbol) in line.chars().enumerate() {
            if symbol == '.' {
                continue;
            }
            let piece = piece_from_symbol(symbol).ok_or_else(|| {
                ChessErrors::InvalidPosition(format!("unknown diagram symbol {symbol:?}"))
            })?;
            pieces.push((Square::try_from((column as i8 + 1, rank))?, piece));
        }
    }
    Ok(Board::from_pieces(pieces))
}

fn piece_from_symbol(symbol: char) -> Option<Piece> {
    let color = if symbol.is_ascii_uppercase() {
        Color::White
    } else if symbol.is_ascii_lowercase() {
        Color::Black
    } else {
        return None;
    };
    let kind = match symbol.to_ascii_lowercase() {
        'p' => PieceKind::Pawn,
        'n' => PieceKind::Knight,
        'b' => PieceKind::Bishop,
        'r' => PieceKind::Rook,
        'q' => PieceKind::Queen,
        'k' => PieceKind::King,
        _ => return None,
    };
    Some(Piece::new(kind, color))
}

#[cfg(test)]
pub(crate) fn board_from_diagram(rows: [&str; 8]) -> Board {
    parse_diagram(rows).expect("test diagram should parse")
}
