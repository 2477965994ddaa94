//! Regenerates the per-square reachability tables by probing the move
//! generators over an empty board, printing them as Rust source. Used to
//! cross-check the const tables in `tables::reachability`.

use damson_chess::game_state::chess_types::{Color, Piece, PieceKind};
use damson_chess::game_state::game_state::GameState;
use damson_chess::move_generation::moves_knight::generate_knight_moves;
use damson_chess::move_generation::moves_sliding::{
    generate_diagonal_sliding_moves, generate_straight_sliding_moves,
};

fn probe(game_state: &mut GameState, kind: PieceKind) -> [u64; 64] {
    let mut table = [0u64; 64];

    for square in 0..64u8 {
        game_state.board[square as usize] = Piece::new(kind, Color::White);

        let mut moves = Vec::new();
        match kind {
            PieceKind::Knight => generate_knight_moves(game_state, square, None, &mut moves),
            PieceKind::Bishop => {
                generate_diagonal_sliding_moves(game_state, square, None, &mut moves)
            }
            PieceKind::Rook => {
                generate_straight_sliding_moves(game_state, square, None, &mut moves)
            }
            _ => {}
        }

        for mv in &moves {
            table[square as usize] |= 1u64 << mv.stop;
        }
        game_state.board[square as usize] = Piece::EMPTY;
    }

    table
}

fn print_table(name: &str, table: &[u64; 64]) {
    println!("pub const {name}: [u64; 64] = [");
    for entry in table {
        println!("    0b{entry:064b},");
    }
    println!("];");
    println!();
}

fn main() {
    let mut game_state = GameState::new_game();
    game_state.board = [Piece::EMPTY; 64];

    print_table("KNIGHT_REACHABLE", &probe(&mut game_state, PieceKind::Knight));
    print_table("BISHOP_REACHABLE", &probe(&mut game_state, PieceKind::Bishop));
    print_table("ROOK_REACHABLE", &probe(&mut game_state, PieceKind::Rook));
}
