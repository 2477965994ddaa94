//! Full legal move generation pipeline.
//!
//! Walks every square holding a friendly piece, fans out to the per-piece
//! pseudo-legal generators, then filters self-check exposure: king moves go
//! through the castle-aware king rule, everything else through the figure
//! rule.

use crate::game_state::chess_types::{Color, PieceKind, Square};
use crate::game_state::game_state::GameState;
use crate::move_generation::legal_move_checks::{is_figure_move_legal, is_king_move_legal};
use crate::move_generation::moves_king::generate_king_moves;
use crate::move_generation::moves_knight::generate_knight_moves;
use crate::move_generation::moves_pawn::generate_pawn_moves;
use crate::move_generation::moves_sliding::{
    generate_diagonal_sliding_moves, generate_straight_sliding_moves,
};
use crate::moves::chess_move::ChessMove;

pub fn generate_legal_moves(game_state: &mut GameState, color: Color) -> Vec<ChessMove> {
    let mut candidates: Vec<ChessMove> = Vec::with_capacity(64);
    let mut king_moves: Vec<ChessMove> = Vec::new();

    for square in 0..64u8 {
        let piece = game_state.board[square as usize];
        if !piece.is_color(color) {
            continue;
        }

        match piece.kind() {
            Some(PieceKind::Pawn) => generate_pawn_moves(game_state, square, None, &mut candidates),
            Some(PieceKind::Knight) => {
                generate_knight_moves(game_state, square, None, &mut candidates)
            }
            Some(PieceKind::King) => generate_king_moves(game_state, square, None, &mut king_moves),
            _ => {}
        }

        // Not folded into the match: a queen slides both ways.
        if piece.is_straight_slider() {
            generate_straight_sliding_moves(game_state, square as Square, None, &mut candidates);
        }
        if piece.is_diagonal_slider() {
            generate_diagonal_sliding_moves(game_state, square as Square, None, &mut candidates);
        }
    }

    let mut legal = Vec::with_capacity(candidates.len() + king_moves.len());
    for mv in candidates {
        if is_figure_move_legal(game_state, &mv) {
            legal.push(mv);
        }
    }
    for mv in king_moves {
        if is_king_move_legal(game_state, &mv) {
            legal.push(mv);
        }
    }

    legal
}
