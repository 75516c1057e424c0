use crate::game_state::chess_types::{Bitboard, Square};
use crate::moves::bishop_moves::bishop_attacks;
use crate::moves::rook_moves::rook_attacks;

#[inline]
pub fn queen_attacks(square: Square, occupancy: Bitboard) -> Bitboard {
    bishop_attacks(square, occupancy) | rook_attacks(square, occupancy)
}

#[cfg(test)]
mod tests {
    use super::queen_attacks;

    #[test]
    fn open_board_queen_on_d4() {
        assert_eq!(queen_attacks(27, 0).count_ones(), 27);
    }

    #[test]
    fn corner_queen_surrounded_sees_only_neighbours() {
        let neighbours = (1u64 << 1) | (1u64 << 8) | (1u64 << 9);
        assert_eq!(queen_attacks(0, neighbours), neighbours);
    }
}
