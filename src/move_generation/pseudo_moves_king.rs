use crate::game_state::chess_rules::{
    A1, A8, B1, B8, C1, C8, D1, D8, E1, E8, F1, F8, G1, G8, H1, H8,
};
use crate::game_state::chess_types::*;
use crate::move_generation::legal_move_checks::attacked_squares;
use crate::move_generation::move_generator::MoveSink;
use crate::moves::bitboard::{SquareIter, SET_MASK};
use crate::moves::king_moves::king_attacks;
use crate::moves::move_descriptions::MoveKind;

pub fn generate_king_moves(sink: &mut MoveSink<'_>) {
    let state = sink.state();
    let kings = state.pieces[state.side_to_move.index()][PieceKind::King.index()];
    let targets = sink.target_mask();
    for from in SquareIter(kings) {
        sink.push_targets(PieceKind::King, from, king_attacks(from) & targets);
    }
}

/// One castling option: the right it needs, king and rook home squares, the
/// squares that must be empty, and the squares the enemy must not attack.
struct CastleRule {
    right: CastlingRights,
    king_from: Square,
    king_to: Square,
    rook_from: Square,
    must_be_empty: Bitboard,
    must_be_safe: Bitboard,
}

static LIGHT_RULES: [CastleRule; 2] = [
    CastleRule {
        right: CASTLE_LIGHT_KINGSIDE,
        king_from: E1,
        king_to: G1,
        rook_from: H1,
        must_be_empty: SET_MASK[F1 as usize] | SET_MASK[G1 as usize],
        must_be_safe: SET_MASK[E1 as usize] | SET_MASK[F1 as usize],
    },
    CastleRule {
        right: CASTLE_LIGHT_QUEENSIDE,
        king_from: E1,
        king_to: C1,
        rook_from: A1,
        must_be_empty: SET_MASK[B1 as usize] | SET_MASK[C1 as usize] | SET_MASK[D1 as usize],
        must_be_safe: SET_MASK[E1 as usize] | SET_MASK[D1 as usize],
    },
];

static DARK_RULES: [CastleRule; 2] = [
    CastleRule {
        right: CASTLE_DARK_KINGSIDE,
        king_from: E8,
        king_to: G8,
        rook_from: H8,
        must_be_empty: SET_MASK[F8 as usize] | SET_MASK[G8 as usize],
        must_be_safe: SET_MASK[E8 as usize] | SET_MASK[F8 as usize],
    },
    CastleRule {
        right: CASTLE_DARK_QUEENSIDE,
        king_from: E8,
        king_to: C8,
        rook_from: A8,
        must_be_empty: SET_MASK[B8 as usize] | SET_MASK[C8 as usize] | SET_MASK[D8 as usize],
        must_be_safe: SET_MASK[E8 as usize] | SET_MASK[D8 as usize],
    },
];

/// Castling moves whose start and transit squares are safe. The landing
/// square is left to the check test in `apply_move`.
pub fn generate_castling_moves(sink: &mut MoveSink<'_>) {
    let state = sink.state();
    let side = state.side_to_move;
    let rules = match side {
        Color::Light => &LIGHT_RULES,
        Color::Dark => &DARK_RULES,
    };

    let king = state.bitboard(Piece::new(side, PieceKind::King));
    let rooks = state.bitboard(Piece::new(side, PieceKind::Rook));
    let mut attacked: Option<Bitboard> = None;

    for rule in rules {
        if state.castling_rights & rule.right == 0
            || state.occupancy_all & rule.must_be_empty != 0
            || king & SET_MASK[rule.king_from as usize] == 0
            || rooks & SET_MASK[rule.rook_from as usize] == 0
        {
            continue;
        }

        let enemy_attacks =
            *attacked.get_or_insert_with(|| attacked_squares(state, side.opposite()));
        if enemy_attacks & rule.must_be_safe == 0 {
            sink.push(
                PieceKind::King,
                rule.king_from,
                rule.king_to,
                MoveKind::Castle,
                None,
                None,
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::game_state::game_state::GameState;
    use crate::move_generation::move_generator::{generate_moves, MoveList};
    use crate::moves::move_descriptions::{move_kind, move_to, MoveKind};
    use test_case::test_case;

    fn castle_targets(fen: &str) -> Vec<u8> {
        let game = GameState::from_fen(fen).expect("FEN should parse");
        let mut list = MoveList::new();
        generate_moves(&game, None, &mut list);
        let mut out: Vec<_> = list
            .moves()
            .filter(|&mv| move_kind(mv) == MoveKind::Castle)
            .map(move_to)
            .collect();
        out.sort_unstable();
        out
    }

    #[test_case("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1", vec![2, 6]; "light both sides")]
    #[test_case("r3k2r/8/8/8/8/8/8/R3K2R b KQkq - 0 1", vec![58, 62]; "dark both sides")]
    #[test_case("r3k2r/8/8/8/8/8/8/R3K2R w Qkq - 0 1", vec![2]; "missing right")]
    #[test_case("r3k2r/8/8/8/8/8/8/RN2K1NR w KQkq - 0 1", vec![]; "pieces in the way")]
    #[test_case("r3k2r/8/8/8/8/8/8/R3K2R w - - 0 1", vec![]; "no rights at all")]
    #[test_case("r3k2r/8/8/8/4r3/8/8/R3K2R w KQkq - 0 1", vec![]; "king in check")]
    #[test_case("r3k2r/8/8/8/5r2/8/8/R3K2R w KQkq - 0 1", vec![2]; "transit square attacked")]
    #[test_case("r3k2r/8/8/8/1r6/8/8/R3K2R w KQkq - 0 1", vec![2, 6]; "b1 attack is irrelevant")]
    #[test_case("r3k2r/8/8/8/8/8/8/4K2R w KQkq - 0 1", vec![6]; "missing rook")]
    fn castling_rules(fen: &str, expected: Vec<u8>) {
        assert_eq!(castle_targets(fen), expected);
    }

    #[test]
    fn attacked_landing_square_is_still_generated() {
        // g1 is attacked by the g4 rook; apply_move rejects it later.
        assert_eq!(
            castle_targets("r3k2r/8/8/8/6r1/8/8/R3K2R w KQkq - 0 1"),
            vec![2, 6]
        );
    }
}
