use crate::game_state::chess_types::{Bitboard, Color, Square};
use crate::moves::bitboard::{north_east_one, north_west_one, south_east_one, south_west_one};

/// Diagonal capture coverage of a set of pawns.
#[inline]
pub const fn pawn_attacks_all(pawns: Bitboard, color: Color) -> Bitboard {
    match color {
        Color::Light => north_east_one(pawns) | north_west_one(pawns),
        Color::Dark => south_east_one(pawns) | south_west_one(pawns),
    }
}

#[inline]
pub const fn pawn_attacks(color: Color, square: Square) -> Bitboard {
    pawn_attacks_all(1u64 << square, color)
}
