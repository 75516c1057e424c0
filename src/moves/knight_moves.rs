use crate::game_state::chess_types::{Bitboard, Square};
use crate::moves::bitboard::{NOT_FILE_A, NOT_FILE_AB, NOT_FILE_GH, NOT_FILE_H};

pub const KNIGHT_ATTACKS: [Bitboard; 64] = generate_knight_attacks();

#[inline]
pub const fn knight_attacks(square: Square) -> Bitboard {
    KNIGHT_ATTACKS[square as usize]
}

/// Union of the jump masks of every knight in `knights`.
#[inline]
pub fn knight_attacks_all(knights: Bitboard) -> Bitboard {
    let mut bb = knights;
    let mut out = 0u64;
    while bb != 0 {
        let sq = bb.trailing_zeros() as usize;
        out |= KNIGHT_ATTACKS[sq];
        bb &= bb - 1;
    }
    out
}

const fn generate_knight_attacks() -> [Bitboard; 64] {
    let mut table = [0u64; 64];
    let mut sq = 0usize;

    while sq < 64 {
        let b = 1u64 << sq;
        table[sq] = ((b & NOT_FILE_H) << 17)
            | ((b & NOT_FILE_GH) << 10)
            | ((b & NOT_FILE_GH) >> 6)
            | ((b & NOT_FILE_H) >> 15)
            | ((b & NOT_FILE_A) << 15)
            | ((b & NOT_FILE_AB) << 6)
            | ((b & NOT_FILE_AB) >> 10)
            | ((b & NOT_FILE_A) >> 17);
        sq += 1;
    }

    table
}
