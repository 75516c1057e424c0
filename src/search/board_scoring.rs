//! Static position scorers.
//!
//! The search only sees the `BoardScorer` trait, so heuristics can be swapped
//! without touching search code. Scores are centipawns from the point of view
//! of the side to move.

use crate::game_state::{chess_types::*, game_state::GameState};
use crate::moves::bitboard::SquareIter;

pub trait BoardScorer: Send + Sync {
    /// Score from the perspective of the side to move.
    fn score(&self, game_state: &GameState) -> i32;
}

#[inline]
pub const fn piece_value(kind: PieceKind) -> i32 {
    match kind {
        PieceKind::Pawn => 100,
        PieceKind::Knight => 325,
        PieceKind::Bishop => 325,
        PieceKind::Rook => 550,
        PieceKind::Queen => 1000,
        PieceKind::King => 50000,
    }
}

fn material_white_minus_black(game_state: &GameState) -> i32 {
    PieceKind::ALL
        .iter()
        .map(|&kind| {
            let light = game_state.pieces[Color::Light.index()][kind.index()].count_ones() as i32;
            let dark = game_state.pieces[Color::Dark.index()][kind.index()].count_ones() as i32;
            (light - dark) * piece_value(kind)
        })
        .sum()
}

#[inline]
fn from_side_to_move(game_state: &GameState, white_minus_black: i32) -> i32 {
    match game_state.side_to_move {
        Color::Light => white_minus_black,
        Color::Dark => -white_minus_black,
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct MaterialScorer;

impl BoardScorer for MaterialScorer {
    fn score(&self, game_state: &GameState) -> i32 {
        from_side_to_move(game_state, material_white_minus_black(game_state))
    }
}

// Tables are laid out from white's side, a1 first. Black squares are mirrored
// vertically with `sq ^ 56` before lookup.
#[rustfmt::skip]
const PAWN_TABLE: [i32; 64] = [
     0,  0,  0,   0,   0,  0,  0,  0,
    10, 10,  0, -10, -10,  0, 10, 10,
     5,  0,  0,   5,   5,  0,  0,  5,
     0,  0, 10,  20,  20, 10,  0,  0,
     5,  5,  5,  10,  10,  5,  5,  5,
    10, 10, 10,  20,  20, 10, 10, 10,
    20, 20, 20,  30,  30, 20, 20, 20,
     0,  0,  0,   0,   0,  0,  0,  0,
];

#[rustfmt::skip]
const KNIGHT_TABLE: [i32; 64] = [
    0, -10,  0,  0,  0,  0, -10, 0,
    0,   0,  0,  5,  5,  0,   0, 0,
    0,   0, 10, 10, 10, 10,   0, 0,
    0,   0, 10, 20, 20, 10,   5, 0,
    5,  10, 15, 20, 20, 15,  10, 5,
    5,  10, 10, 20, 20, 10,  10, 5,
    0,   0,  5, 10, 10,  5,   0, 0,
    0,   0,  0,  0,  0,  0,   0, 0,
];

#[rustfmt::skip]
const BISHOP_TABLE: [i32; 64] = [
    0,  0, -10,  0,  0, -10,  0, 0,
    0,  0,   0, 10, 10,   0,  0, 0,
    0,  0,  10, 15, 15,  10,  0, 0,
    0, 10,  15, 20, 20,  15, 10, 0,
    0, 10,  15, 20, 20,  15, 10, 0,
    0,  0,  10, 15, 15,  10,  0, 0,
    0,  0,   0, 10, 10,   0,  0, 0,
    0,  0,   0,  0,  0,   0,  0, 0,
];

#[rustfmt::skip]
const ROOK_TABLE: [i32; 64] = [
     0,  0,  5, 10, 10,  5,  0,  0,
     0,  0,  5, 10, 10,  5,  0,  0,
     0,  0,  5, 10, 10,  5,  0,  0,
     0,  0,  5, 10, 10,  5,  0,  0,
     0,  0,  5, 10, 10,  5,  0,  0,
     0,  0,  5, 10, 10,  5,  0,  0,
    25, 25, 25, 25, 25, 25, 25, 25,
     0,  0,  5, 10, 10,  5,  0,  0,
];

#[inline]
fn square_table(kind: PieceKind) -> Option<&'static [i32; 64]> {
    match kind {
        PieceKind::Pawn => Some(&PAWN_TABLE),
        PieceKind::Knight => Some(&KNIGHT_TABLE),
        PieceKind::Bishop => Some(&BISHOP_TABLE),
        PieceKind::Rook => Some(&ROOK_TABLE),
        PieceKind::Queen | PieceKind::King => None,
    }
}

/// Material plus piece-square bonuses for pawns, knights, bishops and rooks.
#[derive(Debug, Clone, Copy, Default)]
pub struct PieceSquareScorer;

impl BoardScorer for PieceSquareScorer {
    fn score(&self, game_state: &GameState) -> i32 {
        let mut score = material_white_minus_black(game_state);

        for kind in PieceKind::ALL {
            let Some(table) = square_table(kind) else {
                continue;
            };
            for sq in SquareIter(game_state.pieces[Color::Light.index()][kind.index()]) {
                score += table[sq as usize];
            }
            for sq in SquareIter(game_state.pieces[Color::Dark.index()][kind.index()]) {
                score -= table[(sq ^ 56) as usize];
            }
        }

        from_side_to_move(game_state, score)
    }
}

#[cfg(test)]
mod tests {
    use super::{BoardScorer, MaterialScorer, PieceSquareScorer};
    use crate::game_state::game_state::GameState;

    #[test]
    fn start_position_is_balanced() {
        let game = GameState::new_game();
        assert_eq!(MaterialScorer.score(&game), 0);
        assert_eq!(PieceSquareScorer.score(&game), 0);
    }

    #[test]
    fn score_is_relative_to_side_to_move() {
        let white =
            GameState::from_fen("4k3/8/8/8/8/8/8/3QK3 w - - 0 1").expect("FEN should parse");
        let black =
            GameState::from_fen("4k3/8/8/8/8/8/8/3QK3 b - - 0 1").expect("FEN should parse");
        assert_eq!(MaterialScorer.score(&white), 1000);
        assert_eq!(MaterialScorer.score(&black), -1000);
    }

    #[test]
    fn mirrored_positions_score_the_same_for_the_mover() {
        let white =
            GameState::from_fen("4k3/8/8/8/3P4/2N5/8/4K3 w - - 0 1").expect("FEN should parse");
        let black =
            GameState::from_fen("4k3/8/2n5/3p4/8/8/8/4K3 b - - 0 1").expect("FEN should parse");
        assert_eq!(PieceSquareScorer.score(&white), PieceSquareScorer.score(&black));
        // Pawn d4 +20, knight c3 +10.
        assert_eq!(PieceSquareScorer.score(&white), 100 + 325 + 30);
    }
}
