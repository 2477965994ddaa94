//! Attack detection and move legality filtering.
//!
//! The attack detector checks the two pawn offsets manually (pawn attacks are
//! asymmetric) and probes knight/sliding/king reach by generating moves *as
//! the opposing color* from the target square: any capture landing on the
//! matching enemy piece type means the square is attacked. The legality
//! filter temporarily mutates the board and always restores it exactly.

use crate::game_state::chess_rules::{
    file_of, pawn_direction, rank_of, BLACK_KINGSIDE_TRANSIT, BLACK_QUEENSIDE_TRANSIT,
    DIR_DOWN_LEFT, DIR_DOWN_RIGHT, DIR_UP_LEFT, DIR_UP_RIGHT, WHITE_KINGSIDE_TRANSIT,
    WHITE_QUEENSIDE_TRANSIT,
};
use crate::game_state::chess_types::{
    CastlingRights, Color, Piece, PieceKind, Square, CASTLE_BLACK_KINGSIDE,
    CASTLE_BLACK_QUEENSIDE, CASTLE_WHITE_KINGSIDE, CASTLE_WHITE_QUEENSIDE,
};
use crate::game_state::game_state::GameState;
use crate::move_generation::moves_king::generate_king_moves;
use crate::move_generation::moves_knight::generate_knight_moves;
use crate::move_generation::moves_sliding::{
    generate_diagonal_sliding_moves, generate_straight_sliding_moves,
};
use crate::moves::chess_move::ChessMove;

/// Is the square held by `color` attacked by any piece of the other color?
/// Pure: never mutates the board, safe to call mid-speculation.
pub fn is_square_attacked(game_state: &GameState, square: Square, color: Color) -> bool {
    let file = file_of(square);
    let rank = rank_of(square);
    let opponent = color.opposite();
    let board = &game_state.board;
    let enemy_pawn = Piece::new(PieceKind::Pawn, opponent);

    // Pawn attacks cannot be probed through the generic generators because
    // their capture direction depends on the attacker's color.
    match color {
        Color::White => {
            if file != 1 && rank != 8 && board[(square as i16 + DIR_UP_LEFT as i16) as usize] == enemy_pawn {
                return true;
            }
            if file != 8 && rank != 8 && board[(square as i16 + DIR_UP_RIGHT as i16) as usize] == enemy_pawn {
                return true;
            }
        }
        Color::Black => {
            if file != 1 && rank != 1 && board[(square as i16 + DIR_DOWN_LEFT as i16) as usize] == enemy_pawn {
                return true;
            }
            if file != 8 && rank != 1 && board[(square as i16 + DIR_DOWN_RIGHT as i16) as usize] == enemy_pawn {
                return true;
            }
        }
    }

    let mut probes: Vec<ChessMove> = Vec::new();

    generate_knight_moves(game_state, square, Some(color), &mut probes);
    let enemy_knight = Piece::new(PieceKind::Knight, opponent);
    if probes
        .iter()
        .any(|mv| mv.is_capture() && board[mv.stop as usize] == enemy_knight)
    {
        return true;
    }

    probes.clear();
    generate_straight_sliding_moves(game_state, square, Some(color), &mut probes);
    if probes.iter().any(|mv| {
        let occupant = board[mv.stop as usize];
        mv.is_capture() && occupant.is_color(opponent) && occupant.is_straight_slider()
    }) {
        return true;
    }

    probes.clear();
    generate_diagonal_sliding_moves(game_state, square, Some(color), &mut probes);
    if probes.iter().any(|mv| {
        let occupant = board[mv.stop as usize];
        mv.is_capture() && occupant.is_color(opponent) && occupant.is_diagonal_slider()
    }) {
        return true;
    }

    probes.clear();
    generate_king_moves(game_state, square, Some(color), &mut probes);
    let enemy_king = Piece::new(PieceKind::King, opponent);
    probes
        .iter()
        .any(|mv| mv.is_capture() && board[mv.stop as usize] == enemy_king)
}

/// Legality for any move of a piece other than the king.
///
/// The move is applied to the board, including the removal of an en-passant
/// victim. Removing both pawns at once matters: a pinned pawn capturing via
/// en passant can clear a rank neither pawn blocked alone and expose the
/// king. The board is restored exactly regardless of the outcome.
pub fn is_figure_move_legal(game_state: &mut GameState, mv: &ChessMove) -> bool {
    let Some(piece_color) = game_state.board[mv.start as usize].color() else {
        return false;
    };
    let king_square = game_state.king_square(piece_color);
    let dir = pawn_direction(piece_color);

    let dest_piece = game_state.board[mv.stop as usize];
    game_state.board[mv.stop as usize] = game_state.board[mv.start as usize];
    game_state.board[mv.start as usize] = Piece::EMPTY;
    let victim_square = if mv.is_en_passant() {
        let square = (mv.stop as i16 - dir as i16) as usize;
        game_state.board[square] = Piece::EMPTY;
        Some(square)
    } else {
        None
    };

    let in_check = is_square_attacked(game_state, king_square, piece_color);

    game_state.board[mv.start as usize] = game_state.board[mv.stop as usize];
    game_state.board[mv.stop as usize] = dest_piece;
    if let Some(square) = victim_square {
        game_state.board[square] = Piece::new(PieceKind::Pawn, piece_color.opposite());
    }

    !in_check
}

/// Legality for a king move, castles included.
///
/// The destination is tested with the king standing on it. A castle must
/// additionally not start from an attacked square, must still hold the
/// matching right bit, and every transit square must be safe. Path emptiness
/// was already enforced during generation.
pub fn is_king_move_legal(game_state: &mut GameState, mv: &ChessMove) -> bool {
    let Some(piece_color) = game_state.board[mv.start as usize].color() else {
        return false;
    };
    let king_square = game_state.king_square(piece_color);

    let previous_piece = game_state.board[mv.stop as usize];
    game_state.board[mv.stop as usize] = game_state.board[mv.start as usize];
    game_state.board[mv.start as usize] = Piece::EMPTY;

    let stop_attacked = is_square_attacked(game_state, mv.stop, piece_color);

    game_state.board[mv.start as usize] = game_state.board[mv.stop as usize];
    game_state.board[mv.stop as usize] = previous_piece;

    if stop_attacked {
        return false;
    }
    if !mv.is_castle() {
        return true;
    }

    // Cannot castle out of a check.
    if is_square_attacked(game_state, king_square, piece_color) {
        return false;
    }

    let (right, transit): (CastlingRights, &[Square]) =
        match (piece_color, mv.is_castle_kingside()) {
            (Color::White, true) => (CASTLE_WHITE_KINGSIDE, &WHITE_KINGSIDE_TRANSIT),
            (Color::White, false) => (CASTLE_WHITE_QUEENSIDE, &WHITE_QUEENSIDE_TRANSIT),
            (Color::Black, true) => (CASTLE_BLACK_KINGSIDE, &BLACK_KINGSIDE_TRANSIT),
            (Color::Black, false) => (CASTLE_BLACK_QUEENSIDE, &BLACK_QUEENSIDE_TRANSIT),
        };

    if (game_state.castling_rights & right) == 0 {
        return false;
    }

    transit
        .iter()
        .all(|&square| !is_square_attacked(game_state, square, piece_color))
}

#[cfg(test)]
mod tests {
    use super::{is_figure_move_legal, is_square_attacked};
    use crate::game_state::chess_types::Color;
    use crate::game_state::game_state::GameState;
    use crate::moves::chess_move::{ChessMove, FLAG_NORMAL};

    #[test]
    fn rook_attacks_along_open_lines_only() {
        // Black rook d5 against the white defender.
        let game_state =
            GameState::from_fen("4k3/8/8/3r4/8/8/4K3/8 w - - 0 1").expect("FEN should parse");
        // d2 is on the rook's file.
        assert!(is_square_attacked(&game_state, 51, Color::White));
        // e2 is not.
        assert!(!is_square_attacked(&game_state, 52, Color::White));
    }

    #[test]
    fn pawn_attacks_are_asymmetric() {
        // Black pawn e5 attacks d4 and f4, never e4 or anything behind it.
        let game_state =
            GameState::from_fen("4k3/8/8/4p3/8/8/8/4K3 w - - 0 1").expect("FEN should parse");
        assert!(is_square_attacked(&game_state, 35, Color::White));
        assert!(is_square_attacked(&game_state, 37, Color::White));
        assert!(!is_square_attacked(&game_state, 36, Color::White));
        assert!(!is_square_attacked(&game_state, 19, Color::White));
    }

    #[test]
    fn attack_probe_ignores_the_occupant_of_the_probed_square() {
        // White rook e4 is itself attacked by the black rook e8-adjacent file.
        let game_state =
            GameState::from_fen("4r2k/8/8/8/4R3/8/8/4K3 w - - 0 1").expect("FEN should parse");
        assert!(is_square_attacked(&game_state, 36, Color::White));
    }

    #[test]
    fn pinned_piece_moves_are_rejected() {
        // White knight e2 is pinned against the king by the black rook e8.
        let mut game_state =
            GameState::from_fen("4r2k/8/8/8/8/8/4N3/4K3 w - - 0 1").expect("FEN should parse");
        let knight = game_state.board[52];
        let mv = ChessMove {
            start: 52,
            stop: 42,
            piece: knight,
            flags: FLAG_NORMAL,
        };
        let before = game_state.board;
        assert!(!is_figure_move_legal(&mut game_state, &mv));
        assert_eq!(game_state.board, before);
    }
}
