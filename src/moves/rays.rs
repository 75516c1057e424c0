//! Full-length sliding rays per square and compass direction.
//!
//! A ray holds every square from (but excluding) its origin to the board edge.
//! Blockers are resolved at query time with the ray-minus-ray technique: find
//! the nearest occupied square on the ray and remove that square's own ray in
//! the same direction, which keeps the blocker reachable and drops everything
//! behind it.

use crate::game_state::chess_types::{Bitboard, Square};
use crate::moves::bitboard::{bit_scan_forward, bit_scan_reverse, file_of, rank_of};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    North,
    NorthEast,
    East,
    SouthEast,
    South,
    SouthWest,
    West,
    NorthWest,
}

impl Direction {
    pub const ALL: [Direction; 8] = [
        Direction::North,
        Direction::NorthEast,
        Direction::East,
        Direction::SouthEast,
        Direction::South,
        Direction::SouthWest,
        Direction::West,
        Direction::NorthWest,
    ];

    pub const ORTHOGONAL: [Direction; 4] = [
        Direction::North,
        Direction::East,
        Direction::South,
        Direction::West,
    ];

    pub const DIAGONAL: [Direction; 4] = [
        Direction::NorthEast,
        Direction::SouthEast,
        Direction::SouthWest,
        Direction::NorthWest,
    ];

    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// `(file_step, rank_step)` for one square of travel.
    #[inline]
    pub const fn step(self) -> (i32, i32) {
        match self {
            Direction::North => (0, 1),
            Direction::NorthEast => (1, 1),
            Direction::East => (1, 0),
            Direction::SouthEast => (1, -1),
            Direction::South => (0, -1),
            Direction::SouthWest => (-1, -1),
            Direction::West => (-1, 0),
            Direction::NorthWest => (-1, 1),
        }
    }

    /// True when square indices grow with distance along this direction.
    #[inline]
    pub const fn is_increasing(self) -> bool {
        matches!(
            self,
            Direction::North | Direction::NorthEast | Direction::East | Direction::NorthWest
        )
    }
}

/// `RAY_ATTACKS[square][direction]`.
pub const RAY_ATTACKS: [[Bitboard; 8]; 64] = generate_rays();

#[inline]
pub const fn ray(square: Square, direction: Direction) -> Bitboard {
    RAY_ATTACKS[square as usize][direction.index()]
}

/// Reachable squares along one direction given the board occupancy.
#[inline]
pub fn ray_attacks(square: Square, direction: Direction, occupancy: Bitboard) -> Bitboard {
    let full = ray(square, direction);
    let blockers = full & occupancy;
    if blockers == 0 {
        return full;
    }

    let nearest = if direction.is_increasing() {
        bit_scan_forward(blockers)
    } else {
        bit_scan_reverse(blockers)
    };
    full ^ ray(nearest, direction)
}

#[inline]
pub fn slider_attacks(square: Square, occupancy: Bitboard, directions: &[Direction]) -> Bitboard {
    directions
        .iter()
        .fold(0u64, |acc, &dir| acc | ray_attacks(square, dir, occupancy))
}

const fn generate_rays() -> [[Bitboard; 8]; 64] {
    let mut table = [[0u64; 8]; 64];
    let mut sq = 0usize;

    while sq < 64 {
        let mut dir = 0usize;
        while dir < 8 {
            table[sq][dir] = sweep(sq as Square, Direction::ALL[dir].step());
            dir += 1;
        }
        sq += 1;
    }

    table
}

const fn sweep(square: Square, (file_step, rank_step): (i32, i32)) -> Bitboard {
    let mut file = file_of(square) as i32 + file_step;
    let mut rank = rank_of(square) as i32 + rank_step;
    let mut out = 0u64;

    while file >= 0 && file < 8 && rank >= 0 && rank < 8 {
        out |= 1u64 << (rank * 8 + file);
        file += file_step;
        rank += rank_step;
    }

    out
}

#[cfg(test)]
mod tests {
    use super::{ray, ray_attacks, Direction, RAY_ATTACKS};

    #[test]
    fn rays_from_a1() {
        assert_eq!(ray(0, Direction::North), 0x0101_0101_0101_0100);
        assert_eq!(ray(0, Direction::East), 0xFE);
        assert_eq!(ray(0, Direction::NorthEast), 0x8040_2010_0804_0200);
        assert_eq!(ray(0, Direction::South), 0);
        assert_eq!(ray(0, Direction::West), 0);
    }

    #[test]
    fn opposite_rays_from_d4_cover_full_lines() {
        let d4 = 27usize;
        let vertical = RAY_ATTACKS[d4][Direction::North.index()]
            | RAY_ATTACKS[d4][Direction::South.index()];
        assert_eq!(vertical.count_ones(), 7);
        let total: u32 = Direction::ALL
            .iter()
            .map(|&d| RAY_ATTACKS[d4][d.index()].count_ones())
            .sum();
        assert_eq!(total, 27);
    }

    #[test]
    fn nearest_blocker_stays_reachable_in_both_scan_orders() {
        // Blockers on d6 and d7 going north from d4.
        let occ = (1u64 << 43) | (1u64 << 51);
        let north = ray_attacks(27, Direction::North, occ);
        assert_eq!(north, (1u64 << 35) | (1u64 << 43));

        // Blockers on d2 and d1 going south from d4.
        let occ = (1u64 << 11) | (1u64 << 3);
        let south = ray_attacks(27, Direction::South, occ);
        assert_eq!(south, (1u64 << 19) | (1u64 << 11));
    }

    #[test]
    fn increasing_directions_match_index_growth() {
        for dir in Direction::ALL {
            let (file_step, rank_step) = dir.step();
            let delta = rank_step * 8 + file_step;
            assert_eq!(dir.is_increasing(), delta > 0, "{dir:?}");
        }
    }
}
