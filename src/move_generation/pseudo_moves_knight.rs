use crate::game_state::chess_types::PieceKind;
use crate::move_generation::move_generator::MoveSink;
use crate::moves::bitboard::SquareIter;
use crate::moves::knight_moves::knight_attacks;

pub fn generate_knight_moves(sink: &mut MoveSink<'_>) {
    let state = sink.state();
    let knights = state.pieces[state.side_to_move.index()][PieceKind::Knight.index()];
    let targets = sink.target_mask();
    for from in SquareIter(knights) {
        sink.push_targets(PieceKind::Knight, from, knight_attacks(from) & targets);
    }
}
