//! Canonical chess-rule constants.
//!
//! Starting layout, fixed capacities, and the per-square castling-rights masks
//! consulted by move application.

use crate::game_state::chess_types::{
    CastlingRights, Square, CASTLE_ALL, CASTLE_DARK_KINGSIDE, CASTLE_DARK_QUEENSIDE,
    CASTLE_LIGHT_KINGSIDE, CASTLE_LIGHT_QUEENSIDE,
};

/// Standard chess starting position in Forsyth-Edwards Notation (FEN).
pub const STARTING_POSITION_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

/// Upper bound on plies recorded in one game history.
pub const MAX_GAME_MOVES: usize = 2048;

/// Deepest search ply supported by the killer table and PV buffer.
pub const MAX_SEARCH_PLY: usize = 64;

/// Halfmove clock value at which the fifty-move rule applies.
pub const FIFTY_MOVE_LIMIT: u16 = 100;

pub const A1: Square = 0;
pub const B1: Square = 1;
pub const C1: Square = 2;
pub const D1: Square = 3;
pub const E1: Square = 4;
pub const F1: Square = 5;
pub const G1: Square = 6;
pub const H1: Square = 7;
pub const A8: Square = 56;
pub const B8: Square = 57;
pub const C8: Square = 58;
pub const D8: Square = 59;
pub const E8: Square = 60;
pub const F8: Square = 61;
pub const G8: Square = 62;
pub const H8: Square = 63;

/// Rights that survive a move touching each square (as source or destination).
pub const CASTLING_RIGHTS_MASK: [CastlingRights; 64] = build_castling_rights_mask();

const fn build_castling_rights_mask() -> [CastlingRights; 64] {
    let mut table = [CASTLE_ALL; 64];
    table[A1 as usize] = CASTLE_ALL & !CASTLE_LIGHT_QUEENSIDE;
    table[E1 as usize] = CASTLE_ALL & !(CASTLE_LIGHT_KINGSIDE | CASTLE_LIGHT_QUEENSIDE);
    table[H1 as usize] = CASTLE_ALL & !CASTLE_LIGHT_KINGSIDE;
    table[A8 as usize] = CASTLE_ALL & !CASTLE_DARK_QUEENSIDE;
    table[E8 as usize] = CASTLE_ALL & !(CASTLE_DARK_KINGSIDE | CASTLE_DARK_QUEENSIDE);
    table[H8 as usize] = CASTLE_ALL & !CASTLE_DARK_KINGSIDE;
    table
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn castling_masks_match_home_squares() {
        assert_eq!(CASTLING_RIGHTS_MASK[A1 as usize], 13);
        assert_eq!(CASTLING_RIGHTS_MASK[E1 as usize], 12);
        assert_eq!(CASTLING_RIGHTS_MASK[H1 as usize], 14);
        assert_eq!(CASTLING_RIGHTS_MASK[A8 as usize], 7);
        assert_eq!(CASTLING_RIGHTS_MASK[E8 as usize], 3);
        assert_eq!(CASTLING_RIGHTS_MASK[H8 as usize], 11);
        let untouched = CASTLING_RIGHTS_MASK
            .iter()
            .filter(|&&mask| mask == CASTLE_ALL)
            .count();
        assert_eq!(untouched, 58);
    }
}
