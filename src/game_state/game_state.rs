//! Core position state machine.
//!
//! `GameState` owns the 64-cell board and every piece of metadata the rules
//! need: side to move, castling rights, en-passant target, cached king
//! squares, clocks, the legal-move cache for the side to move, and the
//! history stacks that make every applied move exactly reversible.

use crate::errors::ChessError;
use crate::game_state::chess_rules::{pawn_direction, STARTING_POSITION_FEN};
use crate::game_state::chess_types::{
    CastlingRights, Color, Piece, PieceKind, Square, CASTLE_BLACK_KINGSIDE,
    CASTLE_BLACK_QUEENSIDE, CASTLE_WHITE_KINGSIDE, CASTLE_WHITE_QUEENSIDE,
};
use crate::game_state::chess_rules::{
    BLACK_KINGSIDE_ROOK_HOME, BLACK_QUEENSIDE_ROOK_HOME, WHITE_KINGSIDE_ROOK_HOME,
    WHITE_QUEENSIDE_ROOK_HOME,
};
use crate::game_state::undo_state::UndoState;
use crate::move_generation::legal_move_generator::generate_legal_moves;
use crate::moves::chess_move::{ChessMove, FLAG_CASTLE_KINGSIDE};
use crate::utils::fen_generator::generate_fen;
use crate::utils::fen_parser::parse_fen;
use crate::utils::long_algebraic::parse_lan;

#[derive(Debug, Clone)]
pub struct GameState {
    // --- Board and side flags ---
    pub board: [Piece; 64],
    pub turn: Color,
    pub castling_rights: CastlingRights,
    /// Square behind a pawn that just double-pushed, capturable en passant.
    pub en_passant_target: Option<Square>,

    // --- Denormalized king locations, kept in sync on every mutation ---
    pub white_king_square: Square,
    pub black_king_square: Square,

    // --- Clocks / move counters ---
    pub halfmove_clock: u16,
    pub fullmove_counter: u16,

    // --- Caches and history stacks ---
    legal_moves: Vec<ChessMove>,
    moves_played: Vec<ChessMove>,
    game_history: Vec<UndoState>,
}

impl GameState {
    /// Builds a position from raw parts, scanning the board for both kings.
    /// A board missing either king is rejected here, never at runtime.
    pub fn from_parts(
        board: [Piece; 64],
        turn: Color,
        castling_rights: CastlingRights,
        en_passant_target: Option<Square>,
        halfmove_clock: u16,
        fullmove_counter: u16,
    ) -> Result<GameState, ChessError> {
        let mut white_king_square = None;
        let mut black_king_square = None;
        for (index, piece) in board.iter().enumerate() {
            if *piece == Piece::new(PieceKind::King, Color::White) {
                white_king_square = Some(index as Square);
            } else if *piece == Piece::new(PieceKind::King, Color::Black) {
                black_king_square = Some(index as Square);
            }
        }
        let (Some(white_king_square), Some(black_king_square)) =
            (white_king_square, black_king_square)
        else {
            return Err(ChessError::MissingKing);
        };

        let mut game_state = GameState {
            board,
            turn,
            castling_rights,
            en_passant_target,
            white_king_square,
            black_king_square,
            halfmove_clock,
            fullmove_counter,
            legal_moves: Vec::new(),
            moves_played: Vec::new(),
            game_history: Vec::new(),
        };
        game_state.legal_moves = generate_legal_moves(&mut game_state, turn);
        Ok(game_state)
    }

    #[inline]
    pub fn new_game() -> Self {
        parse_fen(STARTING_POSITION_FEN).expect("starting FEN should always parse")
    }

    #[inline]
    pub fn from_fen(fen: &str) -> Result<Self, ChessError> {
        parse_fen(fen)
    }

    #[inline]
    pub fn get_fen(&self) -> String {
        generate_fen(self)
    }

    /// Cached legal moves for the side to move.
    #[inline]
    pub fn legal_moves(&self) -> &[ChessMove] {
        &self.legal_moves
    }

    #[inline]
    pub fn king_square(&self, color: Color) -> Square {
        match color {
            Color::White => self.white_king_square,
            Color::Black => self.black_king_square,
        }
    }

    /// Applies `mv` if it is in the legal-move cache, or reports
    /// [`ChessError::IllegalMove`] leaving the position completely unmodified.
    pub fn make_move(&mut self, mv: &ChessMove) -> Result<(), ChessError> {
        if !self.legal_moves.contains(mv) {
            return Err(ChessError::IllegalMove(mv.lan_str()));
        }

        let dir = pawn_direction(self.turn);

        let undo = UndoState {
            castling_rights: self.castling_rights,
            en_passant_target: self.en_passant_target,
            white_king_square: self.white_king_square,
            black_king_square: self.black_king_square,
            captured_piece: self.board[mv.stop as usize],
            halfmove_clock: self.halfmove_clock,
            fullmove_counter: self.fullmove_counter,
        };

        self.board[mv.stop as usize] = self.board[mv.start as usize];
        self.board[mv.start as usize] = Piece::EMPTY;

        // A promotion replaces the arriving pawn, color preserved.
        if let Some(kind) = mv.promotion_kind() {
            self.board[mv.stop as usize] = Piece::new(kind, self.turn);
        }

        // A double push leaves the square behind the pawn capturable.
        self.en_passant_target = if mv.is_double_push() {
            Some((mv.stop as i16 - dir as i16) as Square)
        } else {
            None
        };

        // A castle also relocates the rook between its fixed squares.
        if mv.is_castle() {
            let (rook_from, rook_to) = match (self.turn, mv.is_castle_kingside()) {
                (Color::White, true) => (63, 61),
                (Color::White, false) => (56, 59),
                (Color::Black, true) => (7, 5),
                (Color::Black, false) => (0, 3),
            };
            self.board.swap(rook_from, rook_to);
        }

        // En passant captures the pawn behind the destination square.
        if mv.is_en_passant() {
            self.board[(mv.stop as i16 - dir as i16) as usize] = Piece::EMPTY;
        }

        // Moving the king forfeits both rights and refreshes the cache.
        if mv.piece.is_kind(PieceKind::King) {
            match self.turn {
                Color::White => {
                    self.castling_rights &= !(CASTLE_WHITE_KINGSIDE | CASTLE_WHITE_QUEENSIDE);
                    self.white_king_square = mv.stop;
                }
                Color::Black => {
                    self.castling_rights &= !(CASTLE_BLACK_KINGSIDE | CASTLE_BLACK_QUEENSIDE);
                    self.black_king_square = mv.stop;
                }
            }
        }

        // A rook leaving, or anything landing on, a rook home square clears
        // that single right. All four corners are checked on every move.
        for (corner, right) in [
            (WHITE_KINGSIDE_ROOK_HOME, CASTLE_WHITE_KINGSIDE),
            (WHITE_QUEENSIDE_ROOK_HOME, CASTLE_WHITE_QUEENSIDE),
            (BLACK_KINGSIDE_ROOK_HOME, CASTLE_BLACK_KINGSIDE),
            (BLACK_QUEENSIDE_ROOK_HOME, CASTLE_BLACK_QUEENSIDE),
        ] {
            if mv.start == corner || mv.stop == corner {
                self.castling_rights &= !right;
            }
        }

        if mv.is_capture() || mv.is_en_passant() {
            self.halfmove_clock = 0;
        } else {
            self.halfmove_clock += 1;
        }
        if self.turn == Color::Black {
            self.fullmove_counter += 1;
        }

        self.turn = self.turn.opposite();

        let next_turn = self.turn;
        let legal_moves = generate_legal_moves(self, next_turn);
        self.legal_moves = legal_moves;
        self.moves_played.push(*mv);
        self.game_history.push(undo);
        Ok(())
    }

    /// Applies a move given in long algebraic notation. Castle placeholders
    /// are resolved against the side to move and the mover's color is read
    /// off the board before delegating to the validated [`Self::make_move`].
    pub fn make_move_lan(&mut self, lan: &str) -> Result<(), ChessError> {
        let parsed = parse_lan(lan)?;

        let (start, stop) = match (parsed.start, parsed.stop) {
            (Some(start), Some(stop)) => (start, stop),
            _ => {
                if parsed.flags & FLAG_CASTLE_KINGSIDE != 0 {
                    match self.turn {
                        Color::White => (60, 62),
                        Color::Black => (4, 6),
                    }
                } else {
                    match self.turn {
                        Color::White => (60, 58),
                        Color::Black => (4, 2),
                    }
                }
            }
        };

        let Some(color) = self.board[start as usize].color() else {
            return Err(ChessError::NoPieceOnSquare(start));
        };

        let mv = ChessMove::new(start, stop, Piece::new(parsed.piece, color), parsed.flags)?;
        self.make_move(&mv)
    }

    /// Reverts the most recently applied move, restoring every field from
    /// the history snapshot. Errors if nothing has been applied.
    pub fn undo_move(&mut self) -> Result<(), ChessError> {
        let (mv, undo) = match (self.moves_played.pop(), self.game_history.pop()) {
            (Some(mv), Some(undo)) => (mv, undo),
            _ => return Err(ChessError::NothingToUndo),
        };

        // The mover is the opposite of the current side to move.
        let dir = pawn_direction(self.turn.opposite());

        self.castling_rights = undo.castling_rights;
        self.en_passant_target = undo.en_passant_target;
        self.halfmove_clock = undo.halfmove_clock;
        self.fullmove_counter = undo.fullmove_counter;
        self.white_king_square = undo.white_king_square;
        self.black_king_square = undo.black_king_square;

        // Put an en-passant victim back behind the destination square. It
        // belongs to the current side to move, the side that did not move.
        if mv.is_en_passant() {
            self.board[(mv.stop as i16 - dir as i16) as usize] =
                Piece::new(PieceKind::Pawn, self.turn);
        }

        // Return a castled rook to its home square.
        if mv.is_castle() {
            let (rook_home, rook_transit) = match (self.turn.opposite(), mv.is_castle_kingside()) {
                (Color::White, true) => (63, 61),
                (Color::White, false) => (56, 59),
                (Color::Black, true) => (7, 5),
                (Color::Black, false) => (0, 3),
            };
            self.board.swap(rook_home, rook_transit);
        }

        self.turn = self.turn.opposite();
        self.board[mv.start as usize] = self.board[mv.stop as usize];
        self.board[mv.stop as usize] = undo.captured_piece;

        // The snapshot does not record pre-promotion identity: the mover was
        // always a pawn.
        if mv.is_promotion() {
            self.board[mv.start as usize] = Piece::new(PieceKind::Pawn, self.turn);
        }

        let restored_turn = self.turn;
        let legal_moves = generate_legal_moves(self, restored_turn);
        self.legal_moves = legal_moves;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::GameState;
    use crate::errors::ChessError;
    use crate::game_state::chess_rules::STARTING_POSITION_FEN;
    use crate::game_state::chess_types::{
        Color, Piece, PieceKind, Square, CASTLE_ALL, CASTLE_BLACK_KINGSIDE,
        CASTLE_BLACK_QUEENSIDE, CASTLE_WHITE_QUEENSIDE,
    };
    use crate::move_generation::legal_move_checks::is_square_attacked;
    use crate::moves::chess_move::{ChessMove, FLAG_NORMAL};
    use rand::rngs::StdRng;
    use rand::{RngExt, SeedableRng};

    const ENDGAME_FEN: &str = "8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - - 0 1";
    const MIDGAME_FEN: &str = "r3k2r/Pppp1ppp/1b3nbN/nP6/BBP1P3/q4N2/Pp1P2PP/R2Q1RK1 w kq - 0 1";
    const CASTLE_FEN: &str = "r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1";
    const EN_PASSANT_FEN: &str = "rnbqkbnr/ppp1pppp/8/3pP3/8/8/PPPP1PPP/RNBQKBNR w KQkq d6 0 3";

    fn assert_states_match(actual: &GameState, expected: &GameState) {
        assert_eq!(actual.board, expected.board);
        assert_eq!(actual.turn, expected.turn);
        assert_eq!(actual.castling_rights, expected.castling_rights);
        assert_eq!(actual.en_passant_target, expected.en_passant_target);
        assert_eq!(actual.white_king_square, expected.white_king_square);
        assert_eq!(actual.black_king_square, expected.black_king_square);
        assert_eq!(actual.halfmove_clock, expected.halfmove_clock);
        assert_eq!(actual.fullmove_counter, expected.fullmove_counter);
        assert_eq!(actual.legal_moves(), expected.legal_moves());
    }

    fn scan_king(game_state: &GameState, color: Color) -> Square {
        let king = Piece::new(PieceKind::King, color);
        game_state
            .board
            .iter()
            .position(|piece| *piece == king)
            .map(|index| index as Square)
            .expect("board should hold both kings")
    }

    #[test]
    fn starting_position_has_expected_metadata() {
        let game_state = GameState::new_game();
        assert_eq!(game_state.legal_moves().len(), 20);
        assert_eq!(game_state.turn, Color::White);
        assert_eq!(game_state.castling_rights, CASTLE_ALL);
        assert_eq!(game_state.en_passant_target, None);
        assert_eq!(game_state.halfmove_clock, 0);
        assert_eq!(game_state.fullmove_counter, 1);
        assert_eq!(game_state.white_king_square, 60);
        assert_eq!(game_state.black_king_square, 4);
    }

    #[test]
    fn make_then_undo_restores_every_field_for_every_legal_move() {
        for fen in [STARTING_POSITION_FEN, ENDGAME_FEN, MIDGAME_FEN, CASTLE_FEN, EN_PASSANT_FEN] {
            let mut game_state = GameState::from_fen(fen).expect("test FEN should parse");
            let before = game_state.clone();

            for mv in before.legal_moves().to_vec() {
                game_state.make_move(&mv).expect("cached move should apply");
                game_state.undo_move().expect("undo should succeed");
                assert_states_match(&game_state, &before);
            }
        }
    }

    #[test]
    fn no_legal_move_leaves_the_movers_king_attacked() {
        for fen in [STARTING_POSITION_FEN, ENDGAME_FEN, MIDGAME_FEN, EN_PASSANT_FEN] {
            let mut game_state = GameState::from_fen(fen).expect("test FEN should parse");
            let mover = game_state.turn;

            for mv in game_state.legal_moves().to_vec() {
                game_state.make_move(&mv).expect("cached move should apply");
                assert!(
                    !is_square_attacked(&game_state, game_state.king_square(mover), mover),
                    "{} leaves the king attacked in {fen}",
                    mv.lan_str()
                );
                game_state.undo_move().expect("undo should succeed");
            }
        }
    }

    #[test]
    fn king_square_cache_tracks_the_board_through_make_and_undo() {
        let mut game_state = GameState::from_fen(MIDGAME_FEN).expect("test FEN should parse");
        let mut rng = StdRng::seed_from_u64(17);

        for _ in 0..30 {
            let moves = game_state.legal_moves().to_vec();
            if moves.is_empty() {
                break;
            }
            let mv = moves[rng.random_range(0..moves.len())];
            game_state.make_move(&mv).expect("cached move should apply");
            assert_eq!(game_state.white_king_square, scan_king(&game_state, Color::White));
            assert_eq!(game_state.black_king_square, scan_king(&game_state, Color::Black));
        }
        while game_state.undo_move().is_ok() {
            assert_eq!(game_state.white_king_square, scan_king(&game_state, Color::White));
            assert_eq!(game_state.black_king_square, scan_king(&game_state, Color::Black));
        }
    }

    #[test]
    fn random_walks_undo_back_to_the_starting_position() {
        let mut rng = StdRng::seed_from_u64(0x0517);

        for _ in 0..10 {
            let mut game_state = GameState::new_game();
            let mut fens = vec![game_state.get_fen()];

            for _ in 0..40 {
                let moves = game_state.legal_moves().to_vec();
                if moves.is_empty() {
                    break;
                }
                let mv = moves[rng.random_range(0..moves.len())];
                game_state.make_move(&mv).expect("cached move should apply");
                fens.push(game_state.get_fen());
            }

            while fens.len() > 1 {
                fens.pop();
                game_state.undo_move().expect("undo should succeed");
                assert_eq!(&game_state.get_fen(), fens.last().expect("history remains"));
            }
        }
    }

    #[test]
    fn illegal_moves_are_rejected_without_touching_state() {
        let mut game_state = GameState::new_game();
        let before_fen = game_state.get_fen();

        // Pawn e2 to e5 is not a legal move shape.
        let pawn = Piece::new(PieceKind::Pawn, Color::White);
        let mv = ChessMove::new(52, 28, pawn, FLAG_NORMAL).expect("structurally valid");
        assert!(matches!(
            game_state.make_move(&mv),
            Err(ChessError::IllegalMove(_))
        ));
        assert_eq!(game_state.get_fen(), before_fen);
        assert_eq!(game_state.legal_moves().len(), 20);

        // Same shape through the textual path.
        assert!(matches!(
            game_state.make_move_lan("e2-e5"),
            Err(ChessError::IllegalMove(_))
        ));
        assert_eq!(game_state.get_fen(), before_fen);
    }

    #[test]
    fn undo_with_no_history_is_an_error() {
        let mut game_state = GameState::new_game();
        assert!(matches!(
            game_state.undo_move(),
            Err(ChessError::NothingToUndo)
        ));
    }

    #[test]
    fn lan_moves_resolve_castles_against_the_side_to_move() {
        let mut game_state = GameState::from_fen(CASTLE_FEN).expect("test FEN should parse");

        game_state.make_move_lan("O-O").expect("white castles short");
        assert_eq!(game_state.board[62], Piece::new(PieceKind::King, Color::White));
        assert_eq!(game_state.board[61], Piece::new(PieceKind::Rook, Color::White));
        assert!(game_state.board[60].is_empty());
        assert!(game_state.board[63].is_empty());
        assert_eq!(game_state.white_king_square, 62);

        game_state.make_move_lan("O-O-O").expect("black castles long");
        assert_eq!(game_state.board[2], Piece::new(PieceKind::King, Color::Black));
        assert_eq!(game_state.board[3], Piece::new(PieceKind::Rook, Color::Black));
        assert!(game_state.board[0].is_empty());
        assert_eq!(game_state.black_king_square, 2);

        game_state.undo_move().expect("undo black castle");
        game_state.undo_move().expect("undo white castle");
        assert_eq!(game_state.get_fen(), CASTLE_FEN);
    }

    #[test]
    fn lan_moves_handle_promotion_and_en_passant() {
        let mut game_state =
            GameState::from_fen("4k3/P7/8/8/8/8/8/4K3 w - - 0 1").expect("test FEN should parse");
        game_state.make_move_lan("a7-a8=Q").expect("promotion applies");
        assert_eq!(game_state.board[0], Piece::new(PieceKind::Queen, Color::White));
        game_state.undo_move().expect("undo promotion");
        assert_eq!(game_state.board[8], Piece::new(PieceKind::Pawn, Color::White));

        let mut game_state =
            GameState::from_fen(EN_PASSANT_FEN).expect("test FEN should parse");
        game_state
            .make_move_lan("e5xd6 e.p")
            .expect("en passant applies");
        assert_eq!(game_state.board[19], Piece::new(PieceKind::Pawn, Color::White));
        // The captured pawn disappears from d5, not d6.
        assert!(game_state.board[27].is_empty());
        game_state.undo_move().expect("undo en passant");
        assert_eq!(game_state.get_fen(), EN_PASSANT_FEN);
    }

    #[test]
    fn lan_moves_from_an_empty_square_are_rejected() {
        let mut game_state = GameState::new_game();
        assert!(matches!(
            game_state.make_move_lan("e4-e5"),
            Err(ChessError::NoPieceOnSquare(36))
        ));
    }

    #[test]
    fn double_push_sets_and_clears_the_en_passant_target() {
        let mut game_state = GameState::new_game();
        game_state.make_move_lan("e2-e4").expect("double push applies");
        assert_eq!(game_state.en_passant_target, Some(44));
        game_state.make_move_lan("Ng8-f6").expect("knight reply applies");
        assert_eq!(game_state.en_passant_target, None);
    }

    #[test]
    fn clocks_follow_capture_and_black_move_rules() {
        let mut game_state = GameState::new_game();

        game_state.make_move_lan("e2-e4").expect("move applies");
        assert_eq!(game_state.halfmove_clock, 1);
        assert_eq!(game_state.fullmove_counter, 1);

        game_state.make_move_lan("d7-d5").expect("move applies");
        assert_eq!(game_state.halfmove_clock, 2);
        assert_eq!(game_state.fullmove_counter, 2);

        game_state.make_move_lan("e4xd5").expect("capture applies");
        assert_eq!(game_state.halfmove_clock, 0);
        assert_eq!(game_state.fullmove_counter, 2);
    }

    #[test]
    fn castling_rights_clear_monotonically_and_restore_on_undo() {
        let mut game_state = GameState::from_fen(CASTLE_FEN).expect("test FEN should parse");

        game_state.make_move_lan("Ke1-e2").expect("king move applies");
        assert_eq!(
            game_state.castling_rights,
            CASTLE_BLACK_KINGSIDE | CASTLE_BLACK_QUEENSIDE
        );

        game_state.make_move_lan("Rh8-h2").expect("rook move applies");
        assert_eq!(game_state.castling_rights, CASTLE_BLACK_QUEENSIDE);

        game_state.undo_move().expect("undo rook move");
        game_state.undo_move().expect("undo king move");
        assert_eq!(game_state.castling_rights, CASTLE_ALL);
    }

    #[test]
    fn capturing_a_home_rook_clears_the_defenders_right() {
        // White rook a1 takes the black rook a8.
        let mut game_state = GameState::from_fen(CASTLE_FEN).expect("test FEN should parse");
        game_state.make_move_lan("Ra1xa8").expect("capture applies");
        assert_eq!(
            game_state.castling_rights & (CASTLE_BLACK_QUEENSIDE | CASTLE_WHITE_QUEENSIDE),
            0
        );
        game_state.undo_move().expect("undo capture");
        assert_eq!(game_state.castling_rights, CASTLE_ALL);
    }
}
