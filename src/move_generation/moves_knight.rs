//! Pseudo-legal knight move generation.

use crate::game_state::chess_rules::{file_of, rank_of};
use crate::game_state::chess_types::{Color, Piece, PieceKind, Square};
use crate::game_state::game_state::GameState;
use crate::moves::chess_move::{ChessMove, FLAG_CAPTURE, FLAG_NORMAL};

const KNIGHT_OFFSETS: [i8; 8] = [-17, -10, 17, 10, -15, -6, 15, 6];

/// Generates knight moves from `square`. `color` overrides the mover's color
/// so the attack detector can probe from a square regardless of what stands
/// on it.
pub fn generate_knight_moves(
    game_state: &GameState,
    square: Square,
    color: Option<Color>,
    out: &mut Vec<ChessMove>,
) {
    let Some(piece_color) = color.or_else(|| game_state.board[square as usize].color()) else {
        return;
    };
    let piece = Piece::new(PieceKind::Knight, piece_color);

    let rank = rank_of(square);
    let file = file_of(square);

    // Each offset is gated by its own edge condition, not a shared wrap
    // check, so jumps never slide around the board sides.
    let allowed = [
        file > 1 && rank < 7,
        file > 2 && rank < 8,
        file < 8 && rank > 2,
        file < 7 && rank > 1,
        file < 8 && rank < 7,
        file < 7 && rank < 8,
        file > 1 && rank > 2,
        file > 2 && rank > 1,
    ];

    for (offset, allowed) in KNIGHT_OFFSETS.iter().zip(allowed) {
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
}
