//! Pseudo-legal pawn move generation.
//!
//! Pushes, double pushes, diagonal captures, promotions, and en passant.
//! Self-check exposure is the legality filter's concern, not ours.

use crate::game_state::chess_rules::{
    file_of, offset_square, pawn_direction, rank_of, DIR_LEFT, DIR_RIGHT,
};
use crate::game_state::chess_types::{Color, Piece, PieceKind, Square};
use crate::game_state::game_state::GameState;
use crate::moves::chess_move::{
    ChessMove, FLAG_CAPTURE, FLAG_DOUBLE_PUSH, FLAG_EN_PASSANT, FLAG_NORMAL, PROMOTION_FLAGS,
};

/// Generates pawn moves from `square`. `color` overrides the mover's color
/// for hypothetical-piece probing; the attack detector does not use it (pawn
/// attacks are asymmetric and checked manually), but every generator entry
/// point offers the same reuse hook.
pub fn generate_pawn_moves(
    game_state: &GameState,
    square: Square,
    color: Option<Color>,
    out: &mut Vec<ChessMove>,
) {
    let Some(piece_color) = color.or_else(|| game_state.board[square as usize].color()) else {
        return;
    };
    let piece = Piece::new(PieceKind::Pawn, piece_color);
    let opponent = piece_color.opposite();
    let move_dir = pawn_direction(piece_color);

    let rank = rank_of(square);
    let file = file_of(square);

    let promotion_rank = match piece_color {
        Color::White => 7,
        Color::Black => 2,
    };
    let start_rank = match piece_color {
        Color::White => 2,
        Color::Black => 7,
    };

    // Single push, blocked by any occupant.
    if let Some(one_up) = offset_square(square, move_dir) {
        if game_state.board[one_up as usize].is_empty() {
            if rank == promotion_rank {
                for promotion in PROMOTION_FLAGS {
                    out.push(ChessMove {
                        start: square,
                        stop: one_up,
                        piece,
                        flags: promotion,
                    });
                }
            } else {
                out.push(ChessMove {
                    start: square,
                    stop: one_up,
                    piece,
                    flags: FLAG_NORMAL,
                });

                // Double push only from the starting rank, both squares empty.
                if rank == start_rank {
                    if let Some(two_up) = offset_square(square, move_dir * 2) {
                        if game_state.board[two_up as usize].is_empty() {
                            out.push(ChessMove {
                                start: square,
                                stop: two_up,
                                piece,
                                flags: FLAG_DOUBLE_PUSH,
                            });
                        }
                    }
                }
            }
        }
    }

    // Diagonal captures, gated on the file edges so they never wrap.
    for (edge_file, side_dir) in [(1, DIR_LEFT), (8, DIR_RIGHT)] {
        if file == edge_file {
            continue;
        }
        let Some(target) = offset_square(square, move_dir + side_dir) else {
            continue;
        };
        if !game_state.board[target as usize].is_color(opponent) {
            continue;
        }

        if rank == promotion_rank {
            for promotion in PROMOTION_FLAGS {
                out.push(ChessMove {
                    start: square,
                    stop: target,
                    piece,
                    flags: promotion | FLAG_CAPTURE,
                });
            }
        } else {
            out.push(ChessMove {
                start: square,
                stop: target,
                piece,
                flags: FLAG_CAPTURE,
            });
        }
    }

    // En passant onto the recorded target square behind the double-pushed pawn.
    if let Some(en_passant_target) = game_state.en_passant_target {
        let left_matches =
            file != 1 && offset_square(square, move_dir + DIR_LEFT) == Some(en_passant_target);
        let right_matches =
            file != 8 && offset_square(square, move_dir + DIR_RIGHT) == Some(en_passant_target);
        if left_matches || right_matches {
            out.push(ChessMove {
                start: square,
                stop: en_passant_target,
                piece,
                flags: FLAG_EN_PASSANT,
            });
        }
    }
}
