//! Pseudo-legal king move generation, castles included.
//!
//! Castle candidates only require the right bit, the king home square, and an
//! empty path. Attack safety for the king and its transit squares is deferred
//! to the legality filter.

use crate::game_state::chess_rules::{
    file_of, rank_of, BLACK_KING_HOME, DIR_DOWN, DIR_DOWN_LEFT, DIR_DOWN_RIGHT, DIR_LEFT,
    DIR_RIGHT, DIR_UP, DIR_UP_LEFT, DIR_UP_RIGHT, WHITE_KING_HOME,
};
use crate::game_state::chess_types::{
    Color, Square, CASTLE_BLACK_KINGSIDE, CASTLE_BLACK_QUEENSIDE, CASTLE_WHITE_KINGSIDE,
    CASTLE_WHITE_QUEENSIDE,
};
use crate::game_state::game_state::GameState;
use crate::moves::chess_move::{
    ChessMove, FLAG_CAPTURE, FLAG_CASTLE_KINGSIDE, FLAG_CASTLE_QUEENSIDE, FLAG_NORMAL,
};

const KING_OFFSETS: [i8; 8] = [
    DIR_UP_LEFT,
    DIR_UP,
    DIR_UP_RIGHT,
    DIR_RIGHT,
    DIR_DOWN_RIGHT,
    DIR_DOWN,
    DIR_DOWN_LEFT,
    DIR_LEFT,
];

/// Generates king moves from `square`. `color` overrides the mover's color
/// for attack probing.
pub fn generate_king_moves(
    game_state: &GameState,
    square: Square,
    color: Option<Color>,
    out: &mut Vec<ChessMove>,
) {
    let piece = game_state.board[square as usize];
    let Some(piece_color) = color.or_else(|| piece.color()) else {
        return;
    };

    let rank = rank_of(square);
    let file = file_of(square);

    let allowed = [
        rank != 8 && file != 1,
        rank != 8,
        rank != 8 && file != 8,
        file != 8,
        rank != 1 && file != 8,
        rank != 1,
        rank != 1 && file != 1,
        file != 1,
    ];

    for (offset, allowed) in KING_OFFSETS.iter().zip(allowed) {
        if !allowed {
            continue;
        }
        let target = (square as i16 + *offset as i16) as Square;
        let occupant = game_state.board[target as usize];
        if occupant.is_empty() {
            out.push(ChessMove {
                start: square,
                stop: target,
                piece,
                flags: FLAG_NORMAL,
            });
        } else if !occupant.is_color(piece_color) {
            out.push(ChessMove {
                start: square,
                stop: target,
                piece,
                flags: FLAG_CAPTURE,
            });
        }
    }

    let board = &game_state.board;
    match piece_color {
        Color::White => {
            if (game_state.castling_rights & CASTLE_WHITE_KINGSIDE) != 0
                && square == WHITE_KING_HOME
                && board[61].is_empty()
                && board[62].is_empty()
            {
                out.push(ChessMove {
                    start: square,
                    stop: square + 2,
                    piece,
                    flags: FLAG_CASTLE_KINGSIDE,
                });
            }
            if (game_state.castling_rights & CASTLE_WHITE_QUEENSIDE) != 0
                && square == WHITE_KING_HOME
                && board[59].is_empty()
                && board[58].is_empty()
                && board[57].is_empty()
            {
                out.push(ChessMove {
                    start: square,
                    stop: square - 2,
                    piece,
                    flags: FLAG_CASTLE_QUEENSIDE,
                });
            }
        }
        Color::Black => {
            if (game_state.castling_rights & CASTLE_BLACK_KINGSIDE) != 0
                && square == BLACK_KING_HOME
                && board[5].is_empty()
                && board[6].is_empty()
            {
                out.push(ChessMove {
                    start: square,
                    stop: square + 2,
                    piece,
                    flags: FLAG_CASTLE_KINGSIDE,
                });
            }
            if (game_state.castling_rights & CASTLE_BLACK_QUEENSIDE) != 0
                && square == BLACK_KING_HOME
                && board[3].is_empty()
                && board[2].is_empty()
                && board[1].is_empty()
            {
                out.push(ChessMove {
                    start: square,
                    stop: square - 2,
                    piece,
                    flags: FLAG_CASTLE_QUEENSIDE,
                });
            }
        }
    }
}
