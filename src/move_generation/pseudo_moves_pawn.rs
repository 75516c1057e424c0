use crate::game_state::chess_types::*;
use crate::move_generation::move_generator::{GenMode, MoveSink};
use crate::moves::bitboard::{
    north_east_one, north_west_one, south_east_one, south_west_one, SquareIter, RANK_1, RANK_8,
    RANK_MASKS, SET_MASK,
};
use crate::moves::move_descriptions::MoveKind;
use crate::moves::pawn_moves::pawn_attacks;

/// Pushes, double pushes, captures, promotions and en passant for the side to
/// move. Only captures (including capture-promotions and en passant) are
/// emitted in `GenMode::CapturesOnly`.
pub fn generate_pawn_moves(sink: &mut MoveSink<'_>) {
    let state = sink.state();
    let side = state.side_to_move;
    let enemy = side.opposite();
    let pawns = state.pieces[side.index()][PieceKind::Pawn.index()];
    let enemy_occ = state.occupancy_by_color[enemy.index()];
    let empty = !state.occupancy_all;

    // Signed square offset of one forward step for `side`.
    let forward: i16 = match side {
        Color::Light => 8,
        Color::Dark => -8,
    };
    let last_rank = match side {
        Color::Light => RANK_8,
        Color::Dark => RANK_1,
    };
    let double_push_rank = match side {
        Color::Light => RANK_MASKS[3],
        Color::Dark => RANK_MASKS[4],
    };

    let origin = |to: Square, delta: i16| (to as i16 - delta) as Square;

    if sink.mode() == GenMode::All {
        let single = match side {
            Color::Light => pawns << 8,
            Color::Dark => pawns >> 8,
        } & empty;

        for to in SquareIter(single & !last_rank) {
            sink.push(PieceKind::Pawn, origin(to, forward), to, MoveKind::Normal, None, None);
        }
        for to in SquareIter(single & last_rank) {
            push_promotions(sink, origin(to, forward), to, None);
        }

        let double = match side {
            Color::Light => single << 8,
            Color::Dark => single >> 8,
        } & empty
            & double_push_rank;
        for to in SquareIter(double) {
            sink.push(
                PieceKind::Pawn,
                origin(to, 2 * forward),
                to,
                MoveKind::Normal,
                None,
                None,
            );
        }
    }

    // Each diagonal as (landing squares, signed offset from origin).
    let diagonals = match side {
        Color::Light => [(north_east_one(pawns), 9i16), (north_west_one(pawns), 7i16)],
        Color::Dark => [(south_east_one(pawns), -7i16), (south_west_one(pawns), -9i16)],
    };

    for (landings, delta) in diagonals {
        for to in SquareIter(landings & enemy_occ) {
            let from = origin(to, delta);
            let captured = state.piece_on(to);
            if last_rank & (1u64 << to) != 0 {
                push_promotions(sink, from, to, captured);
            } else {
                sink.push(PieceKind::Pawn, from, to, MoveKind::Normal, captured, None);
            }
        }
    }

    if let Some(ep) = state.en_passant_square {
        let victim = origin(ep, forward);
        let enemy_pawns = state.pieces[enemy.index()][PieceKind::Pawn.index()];
        let victim_present = SET_MASK
            .get(victim as usize)
            .is_some_and(|&bit| enemy_pawns & bit != 0);
        if !victim_present {
            return;
        }
        let captured = Some(Piece::new(enemy, PieceKind::Pawn));
        for from in SquareIter(pawn_attacks(enemy, ep) & pawns) {
            sink.push(PieceKind::Pawn, from, ep, MoveKind::EnPassant, captured, None);
        }
    }
}

fn push_promotions(sink: &mut MoveSink<'_>, from: Square, to: Square, captured: Option<Piece>) {
    for promo in PieceKind::PROMOTIONS {
        sink.push(
            PieceKind::Pawn,
            from,
            to,
            MoveKind::Promotion,
            captured,
            Some(promo),
        );
    }
}
