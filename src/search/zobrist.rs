//! Zobrist hashing for position identity, repetition tracking and the
//! best-move cache.
//!
//! Keys come from a seeded `StdRng`, so hashes are deterministic across runs.
//! The key set is built once per process; `init_tables` makes that step
//! explicit so callers can pay for it before a search starts.

use std::sync::OnceLock;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::game_state::{chess_types::*, game_state::GameState};
use crate::moves::bitboard::SquareIter;

pub const ZOBRIST_SEED: u64 = 0x51_4E_43_45_2D_5A_42_31;

#[derive(Debug, Clone)]
pub struct ZobristKeys {
    piece_square: [[[u64; 64]; 6]; 2],
    dark_to_move: u64,
    castling: [u64; 16],
    en_passant: [u64; 64],
}

impl ZobristKeys {
    pub fn from_seed(seed: u64) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);

        let mut piece_square = [[[0u64; 64]; 6]; 2];
        for color in &mut piece_square {
            for kind in color {
                for key in kind {
                    *key = rng.random::<u64>();
                }
            }
        }

        let dark_to_move = rng.random::<u64>();

        let mut castling = [0u64; 16];
        for key in &mut castling {
            *key = rng.random::<u64>();
        }

        let mut en_passant = [0u64; 64];
        for key in &mut en_passant {
            *key = rng.random::<u64>();
        }

        Self {
            piece_square,
            dark_to_move,
            castling,
            en_passant,
        }
    }

    #[inline]
    pub fn piece_square(&self, piece: Piece, square: Square) -> u64 {
        self.piece_square[piece.color.index()][piece.kind.index()][square as usize]
    }

    #[inline]
    pub fn dark_to_move(&self) -> u64 {
        self.dark_to_move
    }

    #[inline]
    pub fn castling(&self, rights: CastlingRights) -> u64 {
        self.castling[(rights & CASTLE_ALL) as usize]
    }

    #[inline]
    pub fn en_passant(&self, square: Square) -> u64 {
        self.en_passant[square as usize]
    }

    /// Full recomputation from placement, side, castling rights and en-passant.
    pub fn hash_position(&self, state: &GameState) -> u64 {
        let mut key = 0u64;

        for color in Color::ALL {
            for kind in PieceKind::ALL {
                let piece = Piece::new(color, kind);
                for sq in SquareIter(state.pieces[color.index()][kind.index()]) {
                    key ^= self.piece_square(piece, sq);
                }
            }
        }

        if state.side_to_move == Color::Dark {
            key ^= self.dark_to_move;
        }

        key ^= self.castling(state.castling_rights);

        if let Some(ep) = state.en_passant_square {
            key ^= self.en_passant(ep);
        }

        key
    }
}

static KEYS: OnceLock<ZobristKeys> = OnceLock::new();

/// Build the process-wide key set if it does not exist yet.
pub fn init_tables() -> &'static ZobristKeys {
    KEYS.get_or_init(|| ZobristKeys::from_seed(ZOBRIST_SEED))
}

#[inline]
pub fn zobrist_keys() -> &'static ZobristKeys {
    init_tables()
}

#[inline]
pub fn compute_zobrist_key(state: &GameState) -> u64 {
    zobrist_keys().hash_position(state)
}

#[cfg(test)]
mod tests {
    use super::{compute_zobrist_key, init_tables, ZobristKeys, ZOBRIST_SEED};
    use crate::game_state::game_state::GameState;

    #[test]
    fn starting_position_hash_is_deterministic() {
        let a = GameState::new_game();
        let b = GameState::new_game();
        assert_eq!(a.zobrist_key, b.zobrist_key);

        let fresh = ZobristKeys::from_seed(ZOBRIST_SEED);
        assert_eq!(fresh.hash_position(&a), a.zobrist_key);
    }

    #[test]
    fn init_is_idempotent() {
        let first = init_tables() as *const ZobristKeys;
        let second = init_tables() as *const ZobristKeys;
        assert_eq!(first, second);
    }

    #[test]
    fn side_to_move_changes_hash() {
        let w = GameState::from_fen("4k3/8/8/8/8/8/8/4K3 w - - 0 1").expect("FEN should parse");
        let b = GameState::from_fen("4k3/8/8/8/8/8/8/4K3 b - - 0 1").expect("FEN should parse");
        assert_ne!(w.zobrist_key, b.zobrist_key);
    }

    #[test]
    fn castling_rights_change_hash() {
        let with_rights =
            GameState::from_fen("4k3/8/8/8/8/8/8/R3K2R w KQ - 0 1").expect("FEN should parse");
        let without_rights =
            GameState::from_fen("4k3/8/8/8/8/8/8/R3K2R w - - 0 1").expect("FEN should parse");
        assert_ne!(with_rights.zobrist_key, without_rights.zobrist_key);
    }

    #[test]
    fn en_passant_key_only_applies_when_square_is_set() {
        let no_ep =
            GameState::from_fen("4k3/8/8/8/4P3/8/8/4K3 b - - 0 1").expect("FEN should parse");
        let ep = GameState::from_fen("4k3/8/8/8/4P3/8/8/4K3 b - e3 0 1").expect("FEN should parse");
        assert_ne!(no_ep.zobrist_key, ep.zobrist_key);

        let mut stripped = ep.clone();
        stripped.en_passant_square = None;
        assert_eq!(compute_zobrist_key(&stripped), no_ep.zobrist_key);
    }
}
