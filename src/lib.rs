//! Crate root module declarations for the Plum Chess rules engine.
//!
//! Exposes the value types and board (`game_state`), one movement rule per
//! piece kind (`moves`), the legality, application, and enumeration layers
//! built on them (`move_generation`), and text/playout helpers (`utils`).

pub mod chess_errors;

pub mod game_state {
    pub mod board;
    pub mod chess_rules;
    pub mod chess_types;
    pub mod game_state;
    pub mod ledgers;
}

pub mod moves {
    pub mod bishop_moves;
    pub mod king_moves;
    pub mod knight_moves;
    pub mod pawn_moves;
    pub mod queen_moves;
    pub mod rook_moves;
}

pub mod move_generation {
    pub mod legal_move_apply;
    pub mod legal_move_checks;
    pub mod legal_move_generator;
    pub mod legal_move_shared;
    pub mod perft;
}

pub mod utils {
    pub mod random_playout;
    pub mod render_game_state;
}
