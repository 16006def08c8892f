//! Crate root module declarations for the mailbox chess rules engine.
//!
//! Exposes the board model, per-piece legality, check and checkmate
//! detection, move application, evaluation and one-ply search, the engines,
//! the game session façade, and utility helpers, so binaries, benches and
//! tests can import stable module paths.

pub mod chess_errors;

pub mod game_state {
    pub mod chess_rules;
    pub mod chess_types;
    pub mod game_state;
}

pub mod moves {
    pub mod bishop_moves;
    pub mod king_moves;
    pub mod knight_moves;
    pub mod move_shared;
    pub mod pawn_moves;
    pub mod piece_legality;
    pub mod queen_moves;
    pub mod rook_moves;
}

pub mod move_generation {
    pub mod checkmate;
    pub mod legal_move_apply;
    pub mod legal_move_checks;
    pub mod legal_move_generator;
}

pub mod search {
    pub mod board_scoring;
    pub mod one_ply_search;
}

pub mod tables {
    pub mod piece_square_tables;
}

pub mod engines {
    pub mod engine_one_ply;
    pub mod engine_random;
    pub mod engine_trait;
}

pub mod session {
    pub mod game_events;
    pub mod game_session;
}

pub mod utils {
    pub mod engine_match_harness;
    pub mod fen_generator;
    pub mod fen_parser;
    pub mod render_game_state;
}
