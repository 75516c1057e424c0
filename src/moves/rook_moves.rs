use crate::game_state::chess_types::{Bitboard, Square};
use crate::moves::rays::{slider_attacks, Direction};

#[inline]
pub fn rook_attacks(square: Square, occupancy: Bitboard) -> Bitboard {
    slider_attacks(square, occupancy, &Direction::ORTHOGONAL)
}
