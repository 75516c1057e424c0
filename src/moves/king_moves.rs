use crate::game_state::chess_types::{Bitboard, Square};
use crate::moves::bitboard::{NOT_FILE_A, NOT_FILE_H};

pub const KING_ATTACKS: [Bitboard; 64] = generate_king_attacks();

#[inline]
pub const fn king_attacks(square: Square) -> Bitboard {
    KING_ATTACKS[square as usize]
}

const fn generate_king_attacks() -> [Bitboard; 64] {
    let mut table = [0u64; 64];
    let mut sq = 0usize;

    while sq < 64 {
        let king = 1u64 << sq;
        let sideways = ((king & NOT_FILE_H) << 1) | ((king & NOT_FILE_A) >> 1);
        let row = king | sideways;
        table[sq] = sideways | (row << 8) | (row >> 8);
        sq += 1;
    }

    table
}

#[cfg(test)]
mod tests {
    use super::{king_attacks, KING_ATTACKS};

    #[test]
    fn king_attack_counts_by_region() {
        assert_eq!(king_attacks(0).count_ones(), 3);
        assert_eq!(king_attacks(4).count_ones(), 5);
        assert_eq!(KING_ATTACKS[27].count_ones(), 8);
    }

    #[test]
    fn king_on_h_file_does_not_wrap() {
        let h4 = 31u8;
        assert_eq!(king_attacks(h4) & (1u64 << 32), 0);
        assert_ne!(king_attacks(h4) & (1u64 << 39), 0);
    }
}
