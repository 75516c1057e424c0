//! Attack coverage and check detection.
//!
//! `is_square_attacked` builds the full attack union of one color and tests
//! membership, so a single call answers any square and the union can be
//! reused when several squares are tested against the same position.

use crate::game_state::{chess_types::*, game_state::GameState};
use crate::moves::bishop_moves::bishop_attacks;
use crate::moves::bitboard::{SquareIter, SET_MASK};
use crate::moves::king_moves::king_attacks;
use crate::moves::knight_moves::knight_attacks_all;
use crate::moves::pawn_moves::pawn_attacks_all;
use crate::moves::queen_moves::queen_attacks;
use crate::moves::rook_moves::rook_attacks;

/// Every square `color` attacks, with sliders clipped by current occupancy.
pub fn attacked_squares(game_state: &GameState, color: Color) -> Bitboard {
    let own = &game_state.pieces[color.index()];
    let occ = game_state.occupancy_all;

    let mut attacks = pawn_attacks_all(own[PieceKind::Pawn.index()], color);
    attacks |= knight_attacks_all(own[PieceKind::Knight.index()]);

    for sq in SquareIter(own[PieceKind::Bishop.index()]) {
        attacks |= bishop_attacks(sq, occ);
    }
    for sq in SquareIter(own[PieceKind::Rook.index()]) {
        attacks |= rook_attacks(sq, occ);
    }
    for sq in SquareIter(own[PieceKind::Queen.index()]) {
        attacks |= queen_attacks(sq, occ);
    }
    for sq in SquareIter(own[PieceKind::King.index()]) {
        attacks |= king_attacks(sq);
    }

    attacks
}

#[inline]
pub fn is_square_attacked(game_state: &GameState, square: Square, attacker_color: Color) -> bool {
    attacked_squares(game_state, attacker_color) & SET_MASK[square as usize] != 0
}

/// Square of `color`'s king. Panics when the king is missing, which means the
/// position invariants were broken upstream.
#[inline]
pub fn king_square(game_state: &GameState, color: Color) -> Square {
    let kings = game_state.pieces[color.index()][PieceKind::King.index()];
    assert!(kings != 0, "{color:?} king is missing from the board");
    kings.trailing_zeros() as Square
}

#[inline]
pub fn is_king_in_check(game_state: &GameState, color: Color) -> bool {
    is_square_attacked(game_state, king_square(game_state, color), color.opposite())
}
