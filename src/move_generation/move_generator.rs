//! Pseudo-legal move generation.
//!
//! Moves are produced for the side to move without checking whether they
//! leave the mover's king attacked; `apply_move` is the legality filter.
//! Every move is scored as it is generated so the search can pick the best
//! remaining move in place without a second pass.

use crate::game_state::{chess_types::*, game_state::GameState};
use crate::move_generation::move_ordering::{capture_score, OrderingTables};
use crate::move_generation::pseudo_moves_king::{generate_castling_moves, generate_king_moves};
use crate::move_generation::pseudo_moves_knight::generate_knight_moves;
use crate::move_generation::pseudo_moves_pawn::generate_pawn_moves;
use crate::move_generation::pseudo_moves_sliders::generate_slider_moves;
use crate::moves::bitboard::{SquareIter, SET_MASK};
use crate::moves::move_descriptions::{pack_move, MoveKind};

/// Capacity of one move list; no reachable position has more pseudo-legal moves.
pub const MAX_MOVES: usize = 256;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScoredMove {
    pub mv: Move,
    pub score: i32,
}

/// Fixed-capacity move buffer, one per search node.
#[derive(Debug, Clone)]
pub struct MoveList {
    moves: [ScoredMove; MAX_MOVES],
    len: usize,
}

impl Default for MoveList {
    fn default() -> Self {
        Self {
            moves: [ScoredMove::default(); MAX_MOVES],
            len: 0,
        }
    }
}

impl MoveList {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn push(&mut self, entry: ScoredMove) {
        debug_assert!(self.len < MAX_MOVES, "move list overflow");
        if self.len < MAX_MOVES {
            self.moves[self.len] = entry;
            self.len += 1;
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    #[inline]
    pub fn clear(&mut self) {
        self.len = 0;
    }

    #[inline]
    pub fn as_slice(&self) -> &[ScoredMove] {
        &self.moves[..self.len]
    }

    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [ScoredMove] {
        &mut self.moves[..self.len]
    }

    pub fn moves(&self) -> impl Iterator<Item = Move> + '_ {
        self.as_slice().iter().map(|entry| entry.mv)
    }

    pub fn contains(&self, mv: Move) -> bool {
        self.moves().any(|candidate| candidate == mv)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GenMode {
    All,
    CapturesOnly,
}

/// Shared state for the per-piece generators: packs, scores and stores moves.
pub struct MoveSink<'a> {
    state: &'a GameState,
    ordering: Option<&'a OrderingTables>,
    list: &'a mut MoveList,
    mode: GenMode,
}

impl<'a> MoveSink<'a> {
    #[inline]
    pub fn state(&self) -> &'a GameState {
        self.state
    }

    #[inline]
    pub fn mode(&self) -> GenMode {
        self.mode
    }

    /// Squares a non-pawn piece may land on in the current mode.
    #[inline]
    pub fn target_mask(&self) -> Bitboard {
        let side = self.state.side_to_move;
        match self.mode {
            GenMode::All => !self.state.occupancy_by_color[side.index()],
            GenMode::CapturesOnly => self.state.occupancy_by_color[side.opposite().index()],
        }
    }

    pub fn push(
        &mut self,
        mover: PieceKind,
        from: Square,
        to: Square,
        kind: MoveKind,
        captured: Option<Piece>,
        promoted: Option<PieceKind>,
    ) {
        let side = self.state.side_to_move;
        let mv = pack_move(
            from,
            to,
            kind,
            self.state.castling_rights,
            self.state.en_passant_square,
            captured,
            promoted.map(|promo| Piece::new(side, promo)),
        );

        let score = match captured {
            Some(victim) => capture_score(victim.kind, mover),
            None => self.ordering.map_or(0, |tables| {
                tables.quiet_score(self.state.ply as usize, mv, Piece::new(side, mover), to)
            }),
        };

        self.list.push(ScoredMove { mv, score });
    }

    /// Emit one normal move per square in `targets`, detecting captures.
    pub fn push_targets(&mut self, mover: PieceKind, from: Square, targets: Bitboard) {
        let enemy = self.state.occupancy_by_color[self.state.side_to_move.opposite().index()];
        for to in SquareIter(targets) {
            let captured = if enemy & SET_MASK[to as usize] != 0 {
                self.state.piece_on(to)
            } else {
                None
            };
            self.push(mover, from, to, MoveKind::Normal, captured, None);
        }
    }
}

fn generate_into(
    game_state: &GameState,
    ordering: Option<&OrderingTables>,
    mode: GenMode,
    list: &mut MoveList,
) {
    list.clear();
    let mut sink = MoveSink {
        state: game_state,
        ordering,
        list,
        mode,
    };

    generate_pawn_moves(&mut sink);
    if mode == GenMode::All {
        generate_castling_moves(&mut sink);
    }
    generate_knight_moves(&mut sink);
    generate_king_moves(&mut sink);
    generate_slider_moves(&mut sink);
}

/// All pseudo-legal moves. Quiet moves are scored from `ordering` when given.
pub fn generate_moves(
    game_state: &GameState,
    ordering: Option<&OrderingTables>,
    list: &mut MoveList,
) {
    generate_into(game_state, ordering, GenMode::All, list);
}

/// Captures and en-passant only, for quiescence search.
pub fn generate_capture_moves(game_state: &GameState, list: &mut MoveList) {
    generate_into(game_state, None, GenMode::CapturesOnly, list);
}
