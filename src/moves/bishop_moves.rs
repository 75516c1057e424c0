use crate::game_state::chess_types::{Bitboard, Square};
use crate::moves::rays::{slider_attacks, Direction};

#[inline]
pub fn bishop_attacks(square: Square, occupancy: Bitboard) -> Bitboard {
    slider_attacks(square, occupancy, &Direction::DIAGONAL)
}

#[cfg(test)]
mod tests {
    use super::bishop_attacks;

    #[test]
    fn open_board_bishop_on_d4() {
        assert_eq!(bishop_attacks(27, 0).count_ones(), 13);
    }

    #[test]
    fn blocker_on_f4_hides_g5_and_h6() {
        let c1 = 2u8;
        let blockers = 1u64 << 29;
        let attacks = bishop_attacks(c1, blockers);
        assert_ne!(attacks & (1u64 << 29), 0);
        assert_eq!(attacks & (1u64 << 38), 0);
        assert_eq!(attacks & (1u64 << 47), 0);
    }
}
