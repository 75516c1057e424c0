//! Core incremental board state representation.
//!
//! `GameState` is mutated in place by `apply_move` / `revert_move` for the
//! whole life of a search. Every piece mutation goes through `add_piece`,
//! `remove_piece` or `move_piece`, which keep the color aggregates and the
//! Zobrist key in step with the per-kind bitboards.

use crate::errors::ChessError;
use crate::game_state::chess_rules::{MAX_GAME_MOVES, STARTING_POSITION_FEN};
use crate::game_state::chess_types::*;
use crate::moves::bitboard::{CLEAR_MASK, SET_MASK};
use crate::search::zobrist::{compute_zobrist_key, zobrist_keys};
use crate::utils::fen_generator::generate_fen;
use crate::utils::fen_parser::parse_fen;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameState {
    // [color][piece_kind]
    pub pieces: [[Bitboard; 6]; 2],

    // Derived aggregates, always the union of the per-kind boards.
    pub occupancy_by_color: [Bitboard; 2],
    pub occupancy_all: Bitboard,

    pub side_to_move: Color,
    pub castling_rights: CastlingRights,
    pub en_passant_square: Option<Square>,

    pub halfmove_clock: u16,
    pub fullmove_number: u16,

    /// Plies applied since the current search started.
    pub ply: u16,

    pub zobrist_key: u64,

    pub undo_stack: Vec<UndoState>,
}

impl Default for GameState {
    fn default() -> Self {
        Self {
            pieces: [[0; 6]; 2],
            occupancy_by_color: [0; 2],
            occupancy_all: 0,

            side_to_move: Color::Light,
            castling_rights: 0,
            en_passant_square: None,

            halfmove_clock: 0,
            fullmove_number: 1,

            ply: 0,
            zobrist_key: zobrist_keys().castling(0),

            undo_stack: Vec::with_capacity(MAX_GAME_MOVES),
        }
    }
}

impl GameState {
    #[inline]
    pub fn new_empty() -> Self {
        Self::default()
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

    #[inline]
    pub fn history_len(&self) -> usize {
        self.undo_stack.len()
    }

    #[inline]
    pub fn bitboard(&self, piece: Piece) -> Bitboard {
        self.pieces[piece.color.index()][piece.kind.index()]
    }

    pub fn piece_on(&self, square: Square) -> Option<Piece> {
        let bit = SET_MASK[square as usize];
        if self.occupancy_all & bit == 0 {
            return None;
        }

        let color = if self.occupancy_by_color[Color::Light.index()] & bit != 0 {
            Color::Light
        } else {
            Color::Dark
        };

        PieceKind::ALL
            .into_iter()
            .find(|kind| self.pieces[color.index()][kind.index()] & bit != 0)
            .map(|kind| Piece::new(color, kind))
    }

    #[inline]
    pub fn add_piece(&mut self, piece: Piece, square: Square) {
        let bit = SET_MASK[square as usize];
        self.pieces[piece.color.index()][piece.kind.index()] |= bit;
        self.occupancy_by_color[piece.color.index()] |= bit;
        self.occupancy_all |= bit;
        self.zobrist_key ^= zobrist_keys().piece_square(piece, square);
    }

    #[inline]
    pub fn remove_piece(&mut self, piece: Piece, square: Square) {
        let keep = CLEAR_MASK[square as usize];
        self.pieces[piece.color.index()][piece.kind.index()] &= keep;
        self.occupancy_by_color[piece.color.index()] &= keep;
        self.occupancy_all &= keep;
        self.zobrist_key ^= zobrist_keys().piece_square(piece, square);
    }

    #[inline]
    pub fn move_piece(&mut self, piece: Piece, from: Square, to: Square) {
        self.remove_piece(piece, from);
        self.add_piece(piece, to);
    }

    #[inline]
    pub fn set_castling_rights(&mut self, rights: CastlingRights) {
        let keys = zobrist_keys();
        self.zobrist_key ^= keys.castling(self.castling_rights);
        self.castling_rights = rights;
        self.zobrist_key ^= keys.castling(rights);
    }

    #[inline]
    pub fn set_en_passant_square(&mut self, square: Option<Square>) {
        let keys = zobrist_keys();
        if let Some(old) = self.en_passant_square {
            self.zobrist_key ^= keys.en_passant(old);
        }
        self.en_passant_square = square;
        if let Some(new) = square {
            self.zobrist_key ^= keys.en_passant(new);
        }
    }

    #[inline]
    pub fn flip_side_to_move(&mut self) {
        self.side_to_move = self.side_to_move.opposite();
        self.zobrist_key ^= zobrist_keys().dark_to_move();
    }

    /// Rebuild the aggregates and the hash from the per-kind boards and flags.
    pub fn refresh_derived(&mut self) {
        for color in Color::ALL {
            self.occupancy_by_color[color.index()] = self.pieces[color.index()]
                .iter()
                .fold(0, |acc, bb| acc | bb);
        }
        self.occupancy_all = self.occupancy_by_color[0] | self.occupancy_by_color[1];
        self.zobrist_key = compute_zobrist_key(self);
    }

    /// True when every aggregate equals the union of the boards it summarizes.
    pub fn aggregates_are_consistent(&self) -> bool {
        let light = self.pieces[0].iter().fold(0, |acc, bb| acc | bb);
        let dark = self.pieces[1].iter().fold(0, |acc, bb| acc | bb);
        light == self.occupancy_by_color[0]
            && dark == self.occupancy_by_color[1]
            && light & dark == 0
            && (light | dark) == self.occupancy_all
    }
}

#[cfg(test)]
mod tests {
    use super::GameState;
    use crate::game_state::chess_types::{Color, Piece, PieceKind, CASTLE_ALL};
    use crate::search::zobrist::compute_zobrist_key;

    #[test]
    fn new_game_has_standard_layout() {
        let game = GameState::new_game();
        assert_eq!(game.occupancy_all.count_ones(), 32);
        assert_eq!(game.side_to_move, Color::Light);
        assert_eq!(game.castling_rights, CASTLE_ALL);
        assert_eq!(game.en_passant_square, None);
        assert_eq!(
            game.piece_on(4),
            Some(Piece::new(Color::Light, PieceKind::King))
        );
        assert_eq!(
            game.piece_on(59),
            Some(Piece::new(Color::Dark, PieceKind::Queen))
        );
        assert_eq!(game.piece_on(27), None);
        assert!(game.aggregates_are_consistent());
    }

    #[test]
    fn piece_mutators_keep_hash_and_aggregates_in_step() {
        let mut game = GameState::new_empty();
        let knight = Piece::new(Color::Dark, PieceKind::Knight);

        game.add_piece(knight, 57);
        game.move_piece(knight, 57, 42);
        game.set_castling_rights(0b0101);
        game.set_en_passant_square(Some(20));
        game.flip_side_to_move();

        assert!(game.aggregates_are_consistent());
        assert_eq!(game.zobrist_key, compute_zobrist_key(&game));

        game.remove_piece(knight, 42);
        game.set_en_passant_square(None);
        assert_eq!(game.occupancy_all, 0);
        assert_eq!(game.zobrist_key, compute_zobrist_key(&game));
    }

    #[test]
    fn empty_state_hash_matches_recomputation() {
        let game = GameState::new_empty();
        assert_eq!(game.zobrist_key, compute_zobrist_key(&game));
    }
}
