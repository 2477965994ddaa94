//! Pseudo-legal sliding move generation for rooks, bishops, and queens.
//!
//! Rays walk until a blocker or the board edge. Because the flat array has no
//! row padding, horizontal and diagonal rays stop at the a/h files explicitly
//! instead of relying on the array bounds, which would wrap across ranks.

use crate::game_state::chess_rules::{
    file_of, DIR_DOWN, DIR_DOWN_LEFT, DIR_DOWN_RIGHT, DIR_LEFT, DIR_RIGHT, DIR_UP, DIR_UP_LEFT,
    DIR_UP_RIGHT,
};
use crate::game_state::chess_types::{Color, Piece, Square};
use crate::game_state::game_state::GameState;
use crate::moves::chess_move::{ChessMove, FLAG_CAPTURE, FLAG_NORMAL};

/// Rook/queen rays. `color` overrides the mover's color for attack probing.
pub fn generate_straight_sliding_moves(
    game_state: &GameState,
    square: Square,
    color: Option<Color>,
    out: &mut Vec<ChessMove>,
) {
    let piece = game_state.board[square as usize];
    let Some(piece_color) = color.or_else(|| piece.color()) else {
        return;
    };

    let file = file_of(square);

    if file != 1 {
        walk_ray(game_state, square, piece, piece_color, DIR_LEFT, Some(1), out);
    }
    if file != 8 {
        walk_ray(game_state, square, piece, piece_color, DIR_RIGHT, Some(8), out);
    }
    walk_ray(game_state, square, piece, piece_color, DIR_UP, None, out);
    walk_ray(game_state, square, piece, piece_color, DIR_DOWN, None, out);
}

/// Bishop/queen rays. `color` overrides the mover's color for attack probing.
pub fn generate_diagonal_sliding_moves(
    game_state: &GameState,
    square: Square,
    color: Option<Color>,
    out: &mut Vec<ChessMove>,
) {
    let piece = game_state.board[square as usize];
    let Some(piece_color) = color.or_else(|| piece.color()) else {
        return;
    };

    let file = file_of(square);

    if file != 1 {
        walk_ray(game_state, square, piece, piece_color, DIR_UP_LEFT, Some(1), out);
        walk_ray(game_state, square, piece, piece_color, DIR_DOWN_LEFT, Some(1), out);
    }
    if file != 8 {
        walk_ray(game_state, square, piece, piece_color, DIR_UP_RIGHT, Some(8), out);
        walk_ray(game_state, square, piece, piece_color, DIR_DOWN_RIGHT, Some(8), out);
    }
}

/// Walks one ray from `origin`, pushing quiet moves over empty squares and a
/// capture when an enemy blocker ends the ray. `edge_file` ends the ray once
/// a square on that file has been handled.
fn walk_ray(
    game_state: &GameState,
    origin: Square,
    piece: Piece,
    piece_color: Color,
    delta: i8,
    edge_file: Option<u8>,
    out: &mut Vec<ChessMove>,
) {
    let mut current = origin as i16 + delta as i16;

    while (0..64).contains(&current) {
        let target = current as Square;
        let occupant = game_state.board[target as usize];

        if occupant.is_empty() {
            out.push(ChessMove {
                start: origin,
                stop: target,
                piece,
                flags: FLAG_NORMAL,
            });
        } else if !occupant.is_color(piece_color) {
            out.push(ChessMove {
                start: origin,
                stop: target,
                piece,
                flags: FLAG_CAPTURE,
            });
            break;
        } else {
            break;
        }

        if edge_file == Some(file_of(target)) {
            break;
        }
        current += delta as i16;
    }
}
