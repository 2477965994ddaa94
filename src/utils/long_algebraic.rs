//! Long algebraic notation parsing.
//!
//! Grammar: `<file><rank>-<file><rank>` for quiet moves, `x` replacing `-`
//! for captures, an optional uppercase piece letter prefix for non-pawn
//! pieces, `=<letter>` suffix for promotions, `O-O` / `O-O-O` for castles,
//! and a trailing ` e.p` marker for en-passant captures. Castles come back
//! with unresolved squares; the consumer fills them in from the side to move.

use crate::errors::ChessError;
use crate::game_state::chess_types::{PieceKind, Square};
use crate::moves::chess_move::{
    MoveFlags, FLAG_CAPTURE, FLAG_CASTLE_KINGSIDE, FLAG_CASTLE_QUEENSIDE, FLAG_DOUBLE_PUSH,
    FLAG_EN_PASSANT, FLAG_NORMAL, FLAG_PROMOTION_BISHOP, FLAG_PROMOTION_KNIGHT,
    FLAG_PROMOTION_QUEEN, FLAG_PROMOTION_ROOK,
};
use crate::utils::algebraic::algebraic_to_square;

/// A move parsed from notation, before board context is applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LanMove {
    pub start: Option<Square>,
    pub stop: Option<Square>,
    pub piece: PieceKind,
    pub flags: MoveFlags,
}

pub fn parse_lan(lan: &str) -> Result<LanMove, ChessError> {
    let lan = lan.trim();

    if lan == "O-O" {
        return Ok(LanMove {
            start: None,
            stop: None,
            piece: PieceKind::King,
            flags: FLAG_CASTLE_KINGSIDE,
        });
    }
    if lan == "O-O-O" {
        return Ok(LanMove {
            start: None,
            stop: None,
            piece: PieceKind::King,
            flags: FLAG_CASTLE_QUEENSIDE,
        });
    }

    if lan.len() < 5 || !lan.is_ascii() {
        return Err(ChessError::InvalidLan(lan.to_owned()));
    }
    let bytes = lan.as_bytes();

    let (start_index, piece, mut flags) = if bytes[0].is_ascii_uppercase() {
        let piece = match bytes[0] {
            b'N' => PieceKind::Knight,
            b'B' => PieceKind::Bishop,
            b'R' => PieceKind::Rook,
            b'Q' => PieceKind::Queen,
            b'K' => PieceKind::King,
            _ => return Err(ChessError::InvalidLan(lan.to_owned())),
        };
        (1usize, piece, 0 as MoveFlags)
    } else {
        // Pawn moves start directly with the origin file.
        let mut flags: MoveFlags = 0;
        if lan.len() > 6 && bytes[5] == b'=' {
            flags = match bytes[6] {
                b'Q' => FLAG_PROMOTION_QUEEN,
                b'R' => FLAG_PROMOTION_ROOK,
                b'B' => FLAG_PROMOTION_BISHOP,
                b'N' => FLAG_PROMOTION_KNIGHT,
                _ => return Err(ChessError::InvalidLan(lan.to_owned())),
            };
        }
        if (bytes[4] as i16 - bytes[1] as i16).abs() == 2 {
            flags = FLAG_DOUBLE_PUSH;
        }
        if lan.contains("e.p") {
            flags = FLAG_EN_PASSANT;
        }
        (0usize, PieceKind::Pawn, flags)
    };

    if lan.len() < start_index + 5 {
        return Err(ChessError::InvalidLan(lan.to_owned()));
    }

    let start = algebraic_to_square(&lan[start_index..start_index + 2])
        .map_err(|_| ChessError::InvalidLan(lan.to_owned()))?;
    let stop = algebraic_to_square(&lan[start_index + 3..start_index + 5])
        .map_err(|_| ChessError::InvalidLan(lan.to_owned()))?;

    if bytes[start_index + 2] == b'x' && (flags & FLAG_EN_PASSANT) == 0 {
        flags |= FLAG_CAPTURE;
    }
    if flags == 0 {
        flags = FLAG_NORMAL;
    }

    Ok(LanMove {
        start: Some(start),
        stop: Some(stop),
        piece,
        flags,
    })
}
