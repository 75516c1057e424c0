use crate::game_state::chess_types::PieceKind;
use crate::move_generation::move_generator::MoveSink;
use crate::moves::bishop_moves::bishop_attacks;
use crate::moves::bitboard::SquareIter;
use crate::moves::queen_moves::queen_attacks;
use crate::moves::rook_moves::rook_attacks;

/// Bishop, rook and queen moves from ray-minus-blocker attack sets.
pub fn generate_slider_moves(sink: &mut MoveSink<'_>) {
    let state = sink.state();
    let own = &state.pieces[state.side_to_move.index()];
    let occ = state.occupancy_all;
    let targets = sink.target_mask();

    for from in SquareIter(own[PieceKind::Bishop.index()]) {
        sink.push_targets(PieceKind::Bishop, from, bishop_attacks(from, occ) & targets);
    }
    for from in SquareIter(own[PieceKind::Rook.index()]) {
        sink.push_targets(PieceKind::Rook, from, rook_attacks(from, occ) & targets);
    }
    for from in SquareIter(own[PieceKind::Queen.index()]) {
        sink.push_targets(PieceKind::Queen, from, queen_attacks(from, occ) & targets);
    }
}

#[cfg(test)]
mod tests {
    use crate::game_state::game_state::GameState;
    use crate::move_generation::move_generator::{generate_moves, MoveList};
    use crate::moves::move_descriptions::{move_captured, move_from, move_to};

    #[test]
    fn rook_stops_on_first_blocker_and_may_capture_it() {
        // Rook d1, own pawn d3, enemy pawn g1.
        let game = GameState::from_fen("4k3/8/8/8/8/3P4/8/3R2pK w - - 0 1")
            .expect("FEN should parse");
        let mut list = MoveList::new();
        generate_moves(&game, None, &mut list);

        let rook: Vec<_> = list.moves().filter(|&mv| move_from(mv) == 3).collect();
        let targets: Vec<_> = rook.iter().map(|&mv| move_to(mv)).collect();
        // a1 b1 c1, e1 f1 g1(capture), d2.
        assert_eq!(targets.len(), 7);
        assert!(targets.contains(&6));
        assert!(!targets.contains(&19));
        let captures = rook.iter().filter(|&&mv| move_captured(mv).is_some()).count();
        assert_eq!(captures, 1);
    }

    #[test]
    fn lone_queen_in_the_centre() {
        let game = GameState::from_fen("7k/8/8/8/3Q4/8/8/K7 w - - 0 1").expect("FEN should parse");
        let mut list = MoveList::new();
        generate_moves(&game, None, &mut list);
        let queen = list.moves().filter(|&mv| move_from(mv) == 27).count();
        // Own king on a1 blocks one square; the dark king on h8 is a target.
        assert_eq!(queen, 26);
    }
}
