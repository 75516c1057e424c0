//! Node counting over generate/apply/revert, for move generator validation.

use crate::game_state::{chess_types::Move, game_state::GameState};
use crate::move_generation::legal_move_apply::{apply_move, revert_move};
use crate::move_generation::move_generator::{generate_moves, MoveList};
use crate::moves::move_descriptions::{is_capture, move_kind, MoveKind};
use crate::utils::long_algebraic::move_to_long_algebraic;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PerftCounts {
    pub nodes: u64,
    pub captures: u64,
    pub en_passant: u64,
    pub castles: u64,
    pub promotions: u64,
}

impl PerftCounts {
    fn record_leaf(&mut self, mv: Move) {
        self.nodes += 1;
        if is_capture(mv) {
            self.captures += 1;
        }
        match move_kind(mv) {
            MoveKind::EnPassant => self.en_passant += 1,
            MoveKind::Castle => self.castles += 1,
            MoveKind::Promotion => self.promotions += 1,
            MoveKind::Normal => {}
        }
    }
}

/// Leaf count of the legal move tree to `depth`.
pub fn perft(game_state: &mut GameState, depth: u32) -> u64 {
    if depth == 0 {
        return 1;
    }

    let mut list = MoveList::new();
    generate_moves(game_state, None, &mut list);

    let mut nodes = 0u64;
    for mv in list.moves() {
        if !apply_move(game_state, mv) {
            continue;
        }
        nodes += if depth == 1 {
            1
        } else {
            perft(game_state, depth - 1)
        };
        revert_move(game_state);
    }
    nodes
}

/// Leaf count plus a breakdown of the kinds of move that reached each leaf.
pub fn perft_counts(game_state: &mut GameState, depth: u32) -> PerftCounts {
    let mut counts = PerftCounts::default();
    if depth == 0 {
        counts.nodes = 1;
        return counts;
    }
    perft_counts_recurse(game_state, depth, &mut counts);
    counts
}

fn perft_counts_recurse(game_state: &mut GameState, depth: u32, counts: &mut PerftCounts) {
    let mut list = MoveList::new();
    generate_moves(game_state, None, &mut list);

    for mv in list.moves() {
        if !apply_move(game_state, mv) {
            continue;
        }
        if depth == 1 {
            counts.record_leaf(mv);
        } else {
            perft_counts_recurse(game_state, depth - 1, counts);
        }
        revert_move(game_state);
    }
}

/// Per-root-move leaf counts, labelled in coordinate notation.
pub fn perft_divide(game_state: &mut GameState, depth: u32) -> Vec<(String, u64)> {
    let mut list = MoveList::new();
    generate_moves(game_state, None, &mut list);

    let mut out = Vec::with_capacity(list.len());
    for mv in list.moves() {
        if !apply_move(game_state, mv) {
            continue;
        }
        let nodes = perft(game_state, depth.saturating_sub(1));
        revert_move(game_state);
        out.push((move_to_long_algebraic(mv), nodes));
    }
    out
}
