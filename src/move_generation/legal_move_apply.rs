//! Make/unmake on the shared `GameState`.
//!
//! `apply_move` is the only legality filter in the engine: it plays a
//! pseudo-legal move, and if the mover's king is left attacked it reverts the
//! move and reports `false`. `revert_move` inverts exactly one ply from the
//! top undo record.

use crate::game_state::chess_rules::{
    A1, A8, C1, C8, CASTLING_RIGHTS_MASK, D1, D8, F1, F8, G1, G8, H1, H8,
};
use crate::game_state::{chess_types::*, game_state::GameState};
use crate::move_generation::legal_move_checks::is_king_in_check;
use crate::move_generation::move_generator::{generate_moves, MoveList};
use crate::moves::move_descriptions::{
    move_captured, move_from, move_kind, move_promoted, move_to, MoveKind,
};

/// Rook relocation for a castle, keyed by the king's landing square.
fn castle_rook_squares(king_to: Square) -> (Square, Square) {
    match king_to {
        G1 => (H1, F1),
        C1 => (A1, D1),
        G8 => (H8, F8),
        C8 => (A8, D8),
        _ => unreachable!("castle move landing on square {king_to}"),
    }
}

/// Square of the pawn removed by an en-passant capture landing on `to`.
#[inline]
fn en_passant_victim_square(mover: Color, to: Square) -> Square {
    match mover {
        Color::Light => to - 8,
        Color::Dark => to + 8,
    }
}

/// Play `mv` for the side to move. Returns `false`, with the state untouched,
/// when the move would leave the mover's own king attacked.
pub fn apply_move(game_state: &mut GameState, mv: Move) -> bool {
    let from = move_from(mv);
    let to = move_to(mv);
    let side = game_state.side_to_move;

    let Some(mover) = game_state.piece_on(from).filter(|piece| piece.color == side) else {
        return false;
    };
    let captured = move_captured(mv);

    game_state.undo_stack.push(UndoState {
        mv,
        prev_castling_rights: game_state.castling_rights,
        prev_en_passant_square: game_state.en_passant_square,
        prev_halfmove_clock: game_state.halfmove_clock,
        prev_zobrist_key: game_state.zobrist_key,
    });

    match move_kind(mv) {
        MoveKind::Normal => {
            if let Some(victim) = captured {
                game_state.remove_piece(victim, to);
            }
            game_state.move_piece(mover, from, to);
        }
        MoveKind::EnPassant => {
            let victim = Piece::new(side.opposite(), PieceKind::Pawn);
            game_state.remove_piece(victim, en_passant_victim_square(side, to));
            game_state.move_piece(mover, from, to);
        }
        MoveKind::Castle => {
            let (rook_from, rook_to) = castle_rook_squares(to);
            game_state.move_piece(mover, from, to);
            game_state.move_piece(Piece::new(side, PieceKind::Rook), rook_from, rook_to);
        }
        MoveKind::Promotion => {
            if let Some(victim) = captured {
                game_state.remove_piece(victim, to);
            }
            let promoted = move_promoted(mv).unwrap_or(Piece::new(side, PieceKind::Queen));
            game_state.remove_piece(mover, from);
            game_state.add_piece(promoted, to);
        }
    }

    let rights = game_state.castling_rights
        & CASTLING_RIGHTS_MASK[from as usize]
        & CASTLING_RIGHTS_MASK[to as usize];
    if rights != game_state.castling_rights {
        game_state.set_castling_rights(rights);
    }

    let is_double_push = mover.kind == PieceKind::Pawn && from.abs_diff(to) == 16;
    let en_passant = is_double_push.then(|| (from + to) / 2);
    if en_passant != game_state.en_passant_square {
        game_state.set_en_passant_square(en_passant);
    }

    if mover.kind == PieceKind::Pawn || captured.is_some() {
        game_state.halfmove_clock = 0;
    } else {
        game_state.halfmove_clock = game_state.halfmove_clock.saturating_add(1);
    }
    if side == Color::Dark {
        game_state.fullmove_number = game_state.fullmove_number.saturating_add(1);
    }

    game_state.flip_side_to_move();
    game_state.ply = game_state.ply.saturating_add(1);

    if is_king_in_check(game_state, side) {
        revert_move(game_state);
        return false;
    }

    true
}

/// Undo the most recent `apply_move`. Panics when there is nothing to undo.
pub fn revert_move(game_state: &mut GameState) {
    let undo = game_state
        .undo_stack
        .pop()
        .expect("revert_move called with an empty move history");

    let mv = undo.mv;
    let from = move_from(mv);
    let to = move_to(mv);

    game_state.side_to_move = game_state.side_to_move.opposite();
    let side = game_state.side_to_move;

    match move_kind(mv) {
        MoveKind::Normal => {
            let mover = game_state
                .piece_on(to)
                .expect("reverted move must leave its piece on the destination");
            game_state.move_piece(mover, to, from);
            if let Some(victim) = move_captured(mv) {
                game_state.add_piece(victim, to);
            }
        }
        MoveKind::EnPassant => {
            let pawn = Piece::new(side, PieceKind::Pawn);
            game_state.move_piece(pawn, to, from);
            game_state.add_piece(
                Piece::new(side.opposite(), PieceKind::Pawn),
                en_passant_victim_square(side, to),
            );
        }
        MoveKind::Castle => {
            let (rook_from, rook_to) = castle_rook_squares(to);
            game_state.move_piece(Piece::new(side, PieceKind::King), to, from);
            game_state.move_piece(Piece::new(side, PieceKind::Rook), rook_to, rook_from);
        }
        MoveKind::Promotion => {
            let promoted = game_state
                .piece_on(to)
                .expect("reverted promotion must leave the promoted piece on the destination");
            game_state.remove_piece(promoted, to);
            game_state.add_piece(Piece::new(side, PieceKind::Pawn), from);
            if let Some(victim) = move_captured(mv) {
                game_state.add_piece(victim, to);
            }
        }
    }

    game_state.castling_rights = undo.prev_castling_rights;
    game_state.en_passant_square = undo.prev_en_passant_square;
    game_state.halfmove_clock = undo.prev_halfmove_clock;
    if side == Color::Dark {
        game_state.fullmove_number = game_state.fullmove_number.saturating_sub(1);
    }
    game_state.ply = game_state.ply.saturating_sub(1);
    game_state.zobrist_key = undo.prev_zobrist_key;
}

/// Every legal move in the current position, in generation order.
pub fn legal_moves(game_state: &mut GameState) -> Vec<Move> {
    let mut list = MoveList::new();
    generate_moves(game_state, None, &mut list);

    let mut legal = Vec::with_capacity(list.len());
    for mv in list.moves() {
        if apply_move(game_state, mv) {
            revert_move(game_state);
            legal.push(mv);
        }
    }
    legal
}

/// Membership test against a freshly generated legal list. Meant for moves
/// coming from outside the engine, not for the search.
pub fn move_is_legal_now(game_state: &mut GameState, mv: Move) -> bool {
    legal_moves(game_state).contains(&mv)
}

#[cfg(test)]
mod tests {
    use super::{apply_move, legal_moves, move_is_legal_now, revert_move};
    use crate::game_state::chess_types::*;
    use crate::game_state::game_state::GameState;
    use crate::moves::move_descriptions::{move_from, move_promoted, move_to, NO_MOVE};
    use crate::search::zobrist::compute_zobrist_key;

    fn find_move(game: &mut GameState, from: Square, to: Square, promo: Option<PieceKind>) -> Move {
        legal_moves(game)
            .into_iter()
            .find(|&mv| {
                move_from(mv) == from
                    && move_to(mv) == to
                    && move_promoted(mv).map(|piece| piece.kind) == promo
            })
            .expect("move should be legal")
    }

    fn assert_round_trip(
        fen: &str,
        from: Square,
        to: Square,
        promo: Option<PieceKind>,
    ) -> GameState {
        let mut game = GameState::from_fen(fen).expect("FEN should parse");
        let before = game.clone();
        let mv = find_move(&mut game, from, to, promo);

        assert!(apply_move(&mut game, mv));
        assert!(game.aggregates_are_consistent());
        assert_eq!(game.zobrist_key, compute_zobrist_key(&game));
        let after = game.clone();

        revert_move(&mut game);
        assert_eq!(game, before);
        after
    }

    #[test]
    fn double_push_sets_en_passant_square() {
        let after =
            assert_round_trip(crate::game_state::chess_rules::STARTING_POSITION_FEN, 12, 28, None);
        assert_eq!(after.en_passant_square, Some(20));
        assert_eq!(after.side_to_move, Color::Dark);
        assert_eq!(after.ply, 1);
        assert_eq!(after.halfmove_clock, 0);
    }

    #[test]
    fn castling_moves_the_rook_and_drops_both_rights() {
        let after = assert_round_trip("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 3 9", 4, 6, None);
        assert_eq!(
            after.piece_on(5),
            Some(Piece::new(Color::Light, PieceKind::Rook))
        );
        assert_eq!(after.piece_on(7), None);
        assert_eq!(after.castling_rights, CASTLE_DARK_KINGSIDE | CASTLE_DARK_QUEENSIDE);
        assert_eq!(after.halfmove_clock, 4);

        let after = assert_round_trip("r3k2r/8/8/8/8/8/8/R3K2R b KQkq - 3 9", 60, 58, None);
        assert_eq!(after.piece_on(59), Some(Piece::new(Color::Dark, PieceKind::Rook)));
        assert_eq!(after.fullmove_number, 10);
    }

    #[test]
    fn en_passant_removes_the_passed_pawn() {
        let after = assert_round_trip("4k3/8/8/3pP3/8/8/8/4K3 w - d6 0 2", 36, 43, None);
        assert_eq!(after.piece_on(35), None);
        assert_eq!(after.piece_on(43), Some(Piece::new(Color::Light, PieceKind::Pawn)));
        assert_eq!(after.en_passant_square, None);
    }

    #[test]
    fn capture_promotion_restores_pawn_and_victim() {
        let after = assert_round_trip(
            "1r2k3/P7/8/8/8/8/8/4K3 w - - 5 40",
            48,
            57,
            Some(PieceKind::Knight),
        );
        assert_eq!(after.piece_on(57), Some(Piece::new(Color::Light, PieceKind::Knight)));
        assert_eq!(after.piece_on(48), None);
        assert_eq!(after.halfmove_clock, 0);
    }

    #[test]
    fn capturing_a_home_rook_revokes_that_right() {
        let after = assert_round_trip("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1", 0, 56, None);
        assert_eq!(after.castling_rights, CASTLE_LIGHT_KINGSIDE | CASTLE_DARK_KINGSIDE);
    }

    #[test]
    fn pinned_piece_move_is_rejected_without_side_effects() {
        // The e2 knight is pinned against the e1 king by the e8 rook.
        let mut game =
            GameState::from_fen("k3r3/8/8/8/8/8/4N3/4K3 w - - 0 1").expect("FEN should parse");
        let before = game.clone();

        let pseudo = crate::moves::move_descriptions::pack_move(
            12,
            29,
            crate::moves::move_descriptions::MoveKind::Normal,
            0,
            None,
            None,
            None,
        );
        assert!(!apply_move(&mut game, pseudo));
        assert_eq!(game, before);
        assert!(!move_is_legal_now(&mut game, pseudo));
    }

    #[test]
    fn king_cannot_step_into_attack() {
        let mut game =
            GameState::from_fen("4k3/8/8/8/8/8/5r2/4K3 w - - 0 1").expect("FEN should parse");
        let targets: Vec<_> = legal_moves(&mut game).into_iter().map(move_to).collect();
        // f2 rook covers d2, e2 (via rank) and f1; only the capture on f2 and d1 remain.
        assert_eq!(targets.len(), 2);
        assert!(targets.contains(&13));
        assert!(targets.contains(&3));
    }

    #[test]
    fn empty_from_square_is_rejected() {
        let mut game = GameState::new_game();
        assert!(!apply_move(&mut game, NO_MOVE | (27 << 6) | 28));
        assert!(game.undo_stack.is_empty());
    }

    #[test]
    #[should_panic(expected = "empty move history")]
    fn revert_without_history_panics() {
        let mut game = GameState::new_game();
        revert_move(&mut game);
    }
}
