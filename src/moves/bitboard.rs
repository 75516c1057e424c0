//! Single-square masks, file/rank masks, and bit-scan primitives.
//!
//! Every table here is computed at compile time, so it exists before any
//! position is built and is never written afterwards.

use crate::game_state::chess_types::{Bitboard, Square};

pub const SET_MASK: [Bitboard; 64] = build_set_mask();
pub const CLEAR_MASK: [Bitboard; 64] = build_clear_mask();
pub const FILE_MASKS: [Bitboard; 8] = build_file_masks();
pub const RANK_MASKS: [Bitboard; 8] = build_rank_masks();

pub const FILE_A: Bitboard = 0x0101_0101_0101_0101;
pub const FILE_B: Bitboard = FILE_A << 1;
pub const FILE_G: Bitboard = FILE_A << 6;
pub const FILE_H: Bitboard = FILE_A << 7;
pub const RANK_1: Bitboard = 0xFF;
pub const RANK_8: Bitboard = RANK_1 << 56;

pub const NOT_FILE_A: Bitboard = !FILE_A;
pub const NOT_FILE_H: Bitboard = !FILE_H;
pub const NOT_FILE_AB: Bitboard = !(FILE_A | FILE_B);
pub const NOT_FILE_GH: Bitboard = !(FILE_G | FILE_H);

/// Index of the lowest set bit. `bb` must be non-empty.
#[inline]
pub fn bit_scan_forward(bb: Bitboard) -> Square {
    debug_assert_ne!(bb, 0, "bit_scan_forward on an empty bitboard");
    bb.trailing_zeros() as Square
}

/// Index of the highest set bit. `bb` must be non-empty.
#[inline]
pub fn bit_scan_reverse(bb: Bitboard) -> Square {
    debug_assert_ne!(bb, 0, "bit_scan_reverse on an empty bitboard");
    (63 - bb.leading_zeros()) as Square
}

#[inline]
pub const fn pop_count(bb: Bitboard) -> u32 {
    bb.count_ones()
}

#[inline]
pub const fn file_of(square: Square) -> u8 {
    square % 8
}

#[inline]
pub const fn rank_of(square: Square) -> u8 {
    square / 8
}

#[inline]
pub const fn north_east_one(bb: Bitboard) -> Bitboard {
    (bb & NOT_FILE_H) << 9
}

#[inline]
pub const fn north_west_one(bb: Bitboard) -> Bitboard {
    (bb & NOT_FILE_A) << 7
}

#[inline]
pub const fn south_east_one(bb: Bitboard) -> Bitboard {
    (bb & NOT_FILE_H) >> 7
}

#[inline]
pub const fn south_west_one(bb: Bitboard) -> Bitboard {
    (bb & NOT_FILE_A) >> 9
}

/// Iterates the squares of a bitboard from lowest to highest.
#[derive(Debug, Clone, Copy)]
pub struct SquareIter(pub Bitboard);

impl Iterator for SquareIter {
    type Item = Square;

    #[inline]
    fn next(&mut self) -> Option<Square> {
        if self.0 == 0 {
            return None;
        }
        let sq = bit_scan_forward(self.0);
        self.0 &= CLEAR_MASK[sq as usize];
        Some(sq)
    }
}

const fn build_set_mask() -> [Bitboard; 64] {
    let mut table = [0u64; 64];
    let mut sq = 0usize;
    while sq < 64 {
        table[sq] = 1u64 << sq;
        sq += 1;
    }
    table
}

const fn build_clear_mask() -> [Bitboard; 64] {
    let mut table = [0u64; 64];
    let mut sq = 0usize;
    while sq < 64 {
        table[sq] = !(1u64 << sq);
        sq += 1;
    }
    table
}

const fn build_file_masks() -> [Bitboard; 8] {
    let mut table = [0u64; 8];
    let mut file = 0usize;
    while file < 8 {
        table[file] = FILE_A << file;
        file += 1;
    }
    table
}

const fn build_rank_masks() -> [Bitboard; 8] {
    let mut table = [0u64; 8];
    let mut rank = 0usize;
    while rank < 8 {
        table[rank] = RANK_1 << (8 * rank);
        rank += 1;
    }
    table
}
