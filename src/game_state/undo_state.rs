use crate::game_state::chess_types::{CastlingRights, Piece, Square};

/// Single history record for `make_move` / `undo_move`.
///
/// Captures exactly the metadata a move can clobber; the board itself is
/// inverted move-by-move from the flags that drove the forward mutation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UndoState {
    pub castling_rights: CastlingRights,
    pub en_passant_target: Option<Square>,
    pub white_king_square: Square,
    pub black_king_square: Square,
    /// Piece standing on the destination square before the move (possibly
    /// empty). En-passant victims are not stored here; their square is
    /// derived from the move flags.
    pub captured_piece: Piece,
    pub halfmove_clock: u16,
    pub fullmove_counter: u16,
}
