//! Perft: exhaustive move-tree node counting over make/undo.
//!
//! Interior nodes apply and revert every legal move; at the horizon the
//! cached legal list is classified directly. Known node counts double as the
//! correctness oracle for generation, legality filtering, and undo.

use crate::errors::ChessError;
use crate::game_state::game_state::GameState;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PerftCounts {
    pub nodes: u64,
    pub captures: u64,
    pub en_passant: u64,
    pub castles: u64,
    pub promotions: u64,
}

impl PerftCounts {
    fn merge(&mut self, rhs: PerftCounts) {
        self.nodes += rhs.nodes;
        self.captures += rhs.captures;
        self.en_passant += rhs.en_passant;
        self.castles += rhs.castles;
        self.promotions += rhs.promotions;
    }
}

pub fn perft(game_state: &mut GameState, depth: u8) -> Result<PerftCounts, ChessError> {
    if depth == 0 {
        return Ok(PerftCounts {
            nodes: 1,
            ..PerftCounts::default()
        });
    }

    let mut counts = PerftCounts::default();

    if depth == 1 {
        for mv in game_state.legal_moves() {
            counts.nodes += 1;
            if mv.is_capture() || mv.is_en_passant() {
                counts.captures += 1;
            }
            if mv.is_en_passant() {
                counts.en_passant += 1;
            }
            if mv.is_castle() {
                counts.castles += 1;
            }
            if mv.is_promotion() {
                counts.promotions += 1;
            }
        }
        return Ok(counts);
    }

    let moves = game_state.legal_moves().to_vec();
    for mv in moves {
        game_state.make_move(&mv)?;
        let child = perft(game_state, depth - 1)?;
        game_state.undo_move()?;
        counts.merge(child);
    }

    Ok(counts)
}

/// Per-root-move node counts at `depth`, sorted by move text. Used to debug
/// against known-good engines.
pub fn perft_divide(
    game_state: &mut GameState,
    depth: u8,
) -> Result<Vec<(String, u64)>, ChessError> {
    let moves = game_state.legal_moves().to_vec();
    let mut out = Vec::with_capacity(moves.len());

    for mv in moves {
        let nodes = if depth <= 1 {
            1
        } else {
            game_state.make_move(&mv)?;
            let nodes = perft(game_state, depth - 1)?.nodes;
            game_state.undo_move()?;
            nodes
        };
        out.push((mv.perft_str(), nodes));
    }

    out.sort();
    Ok(out)
}
