//! Iterative deepening search with negamax alpha-beta pruning.
//!
//! One `GameState` is mutated in place by apply/revert for the whole search.
//! Every exit path reverts what it applied, so the caller gets the position
//! back exactly as it was, with `ply` at zero.
//!
//! Heuristics:
//! - Check extension.
//! - Best-move cache move first, then MVV-LVA captures, killers and history.
//! - Quiescence over captures with stand-pat.
//! - Repetition and fifty-move draws below the root.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Instant;

use crate::game_state::chess_rules::{FIFTY_MOVE_LIMIT, MAX_SEARCH_PLY};
use crate::game_state::{chess_types::Move, game_state::GameState};
use crate::move_generation::legal_move_apply::{apply_move, revert_move};
use crate::move_generation::legal_move_checks::is_king_in_check;
use crate::move_generation::move_generator::{generate_capture_moves, generate_moves, MoveList};
use crate::move_generation::move_ordering::{OrderingTables, CACHE_MOVE_SCORE};
use crate::moves::move_descriptions::{is_capture, move_from, move_to, NO_MOVE};
use crate::search::best_move_cache::BestMoveCache;
use crate::search::board_scoring::BoardScorer;

pub const INFINITE: i32 = 30000;
pub const MATE: i32 = 29000;
pub const DRAW_SCORE: i32 = 0;

/// Scores beyond this magnitude encode a forced mate.
pub const MATE_THRESHOLD: i32 = MATE - MAX_SEARCH_PLY as i32;

// Stop conditions are polled once every 2048 nodes.
const POLL_MASK: u64 = 2047;

#[derive(Debug, Clone)]
pub struct SearchConfig {
    pub max_depth: u8,
    pub deadline: Option<Instant>,
    pub stop_flag: Option<Arc<AtomicBool>>,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            max_depth: MAX_SEARCH_PLY as u8,
            deadline: None,
            stop_flag: None,
        }
    }
}

/// Summary of one completed depth, handed to the caller's callback.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IterationReport {
    pub depth: u8,
    pub score: i32,
    pub nodes: u64,
    pub elapsed_ms: u64,
    pub pv: Vec<Move>,
}

#[derive(Debug, Clone, Default)]
pub struct SearchResult {
    /// `NO_MOVE` when the root has no legal move or no depth completed.
    pub best_move: Move,
    pub score: i32,
    pub depth: u8,
    pub nodes: u64,
    pub elapsed_ms: u64,
    pub pv: Vec<Move>,
    pub fail_high: u64,
    pub fail_high_first: u64,
}

impl SearchResult {
    /// Share of cutoffs produced by the first move searched.
    pub fn ordering_quality(&self) -> f64 {
        if self.fail_high == 0 {
            0.0
        } else {
            self.fail_high_first as f64 / self.fail_high as f64
        }
    }
}

/// Moves to mate encoded in `score`, negative when the mover is being mated.
pub fn mate_in_moves(score: i32) -> Option<i32> {
    if score > MATE_THRESHOLD {
        Some((MATE - score + 1) / 2)
    } else if score < -MATE_THRESHOLD {
        Some(-(MATE + score) / 2)
    } else {
        None
    }
}

struct SearchContext<'a, S: BoardScorer + ?Sized> {
    game_state: &'a mut GameState,
    scorer: &'a S,
    cache: &'a mut BestMoveCache,
    ordering: OrderingTables,
    deadline: Option<Instant>,
    stop_flag: Option<&'a AtomicBool>,
    nodes: u64,
    fail_high: u64,
    fail_high_first: u64,
    root_best_move: Move,
    stopped: bool,
}

impl<S: BoardScorer + ?Sized> SearchContext<'_, S> {
    fn stop_requested(&self) -> bool {
        if let Some(limit) = self.deadline {
            if Instant::now() >= limit {
                return true;
            }
        }
        if let Some(flag) = self.stop_flag {
            if flag.load(Ordering::Relaxed) {
                return true;
            }
        }
        false
    }

    #[inline]
    fn check_up(&mut self) {
        if self.nodes & POLL_MASK == 0 && self.stop_requested() {
            self.stopped = true;
        }
    }

    /// The current key also occurred since the last irreversible move.
    fn is_repetition(&self) -> bool {
        let history = &self.game_state.undo_stack;
        let key = self.game_state.zobrist_key;
        let start = history
            .len()
            .saturating_sub(self.game_state.halfmove_clock as usize);
        let end = history.len().saturating_sub(1);

        history[..end]
            .iter()
            .skip(start)
            .any(|undo| undo.prev_zobrist_key == key)
    }

    #[inline]
    fn is_draw(&self) -> bool {
        self.game_state.halfmove_clock >= FIFTY_MOVE_LIMIT || self.is_repetition()
    }

    #[inline]
    fn ply(&self) -> usize {
        self.game_state.ply as usize
    }

    fn alpha_beta(&mut self, mut alpha: i32, beta: i32, mut depth: i32, is_root: bool) -> i32 {
        if depth <= 0 {
            return self.quiescence(alpha, beta);
        }

        self.check_up();
        if self.stopped {
            return 0;
        }
        self.nodes += 1;

        let ply = self.ply();
        if !is_root && self.is_draw() {
            return DRAW_SCORE;
        }
        if ply > MAX_SEARCH_PLY - 1 {
            return self.scorer.score(self.game_state);
        }

        let side = self.game_state.side_to_move;
        let in_check = is_king_in_check(self.game_state, side);
        if in_check {
            depth += 1;
        }

        let mut list = MoveList::new();
        generate_moves(self.game_state, Some(&self.ordering), &mut list);
        let key = self.game_state.zobrist_key;
        if let Some(cached) = self.cache.probe(key) {
            if let Some(entry) = list.as_mut_slice().iter_mut().find(|entry| entry.mv == cached) {
                entry.score = CACHE_MOVE_SCORE;
            }
        }

        let old_alpha = alpha;
        let mut best_move = NO_MOVE;
        let mut legal = 0u32;

        for index in 0..list.len() {
            pick_next_move(&mut list, index);
            let mv = list.as_slice()[index].mv;

            if !apply_move(self.game_state, mv) {
                continue;
            }
            legal += 1;
            let score = -self.alpha_beta(-beta, -alpha, depth - 1, false);
            revert_move(self.game_state);

            if self.stopped {
                return 0;
            }

            if score > alpha {
                if score >= beta {
                    if legal == 1 {
                        self.fail_high_first += 1;
                    }
                    self.fail_high += 1;
                    if !is_capture(mv) {
                        self.ordering.record_killer(ply, mv);
                    }
                    return beta;
                }
                alpha = score;
                best_move = mv;
                if !is_capture(mv) {
                    if let Some(mover) = self.game_state.piece_on(move_from(mv)) {
                        self.ordering.record_history(mover, move_to(mv), depth);
                    }
                }
            }
        }

        if legal == 0 {
            return if in_check {
                -MATE + ply as i32
            } else {
                DRAW_SCORE
            };
        }

        if alpha != old_alpha {
            self.cache.store(key, best_move);
            if is_root {
                self.root_best_move = best_move;
            }
        }

        alpha
    }

    fn quiescence(&mut self, mut alpha: i32, beta: i32) -> i32 {
        self.check_up();
        if self.stopped {
            return 0;
        }
        self.nodes += 1;

        if self.ply() > 0 && self.is_draw() {
            return DRAW_SCORE;
        }
        if self.ply() > MAX_SEARCH_PLY - 1 {
            return self.scorer.score(self.game_state);
        }

        let stand_pat = self.scorer.score(self.game_state);
        if stand_pat >= beta {
            return beta;
        }
        if stand_pat > alpha {
            alpha = stand_pat;
        }

        let mut list = MoveList::new();
        generate_capture_moves(self.game_state, &mut list);

        let old_alpha = alpha;
        let mut best_move = NO_MOVE;
        let mut legal = 0u32;

        for index in 0..list.len() {
            pick_next_move(&mut list, index);
            let mv = list.as_slice()[index].mv;

            if !apply_move(self.game_state, mv) {
                continue;
            }
            legal += 1;
            let score = -self.quiescence(-beta, -alpha);
            revert_move(self.game_state);

            if self.stopped {
                return 0;
            }

            if score > alpha {
                if score >= beta {
                    if legal == 1 {
                        self.fail_high_first += 1;
                    }
                    self.fail_high += 1;
                    return beta;
                }
                alpha = score;
                best_move = mv;
            }
        }

        if alpha != old_alpha {
            self.cache.store(self.game_state.zobrist_key, best_move);
        }

        alpha
    }
}

/// Swap the highest scored move at or after `index` into `index`.
fn pick_next_move(list: &mut MoveList, index: usize) {
    let moves = list.as_mut_slice();
    let mut best_index = index;
    let mut best_score = moves[index].score;
    for (offset, entry) in moves[index + 1..].iter().enumerate() {
        if entry.score > best_score {
            best_score = entry.score;
            best_index = index + 1 + offset;
        }
    }
    moves.swap(index, best_index);
}

/// Run alpha-beta at depth 1, 2, ... up to `config.max_depth`.
///
/// The result always comes from the deepest iteration that finished before
/// the deadline or stop flag fired. `on_iteration` sees every completed depth.
pub fn iterative_deepening_search<S: BoardScorer + ?Sized>(
    game_state: &mut GameState,
    scorer: &S,
    cache: &mut BestMoveCache,
    config: &SearchConfig,
    on_iteration: &mut dyn FnMut(&IterationReport),
) -> SearchResult {
    let started_at = Instant::now();
    game_state.ply = 0;

    if config.max_depth == 0 {
        return SearchResult {
            score: scorer.score(game_state),
            nodes: 1,
            ..SearchResult::default()
        };
    }

    let mut ctx = SearchContext {
        game_state,
        scorer,
        cache,
        ordering: OrderingTables::default(),
        deadline: config.deadline,
        stop_flag: config.stop_flag.as_deref(),
        nodes: 0,
        fail_high: 0,
        fail_high_first: 0,
        root_best_move: NO_MOVE,
        stopped: false,
    };
    let mut result = SearchResult::default();

    for depth in 1..=config.max_depth {
        if ctx.stop_requested() {
            break;
        }

        ctx.root_best_move = NO_MOVE;
        let score = ctx.alpha_beta(-INFINITE, INFINITE, i32::from(depth), true);
        if ctx.stopped {
            break;
        }

        let mut pv = ctx
            .cache
            .principal_variation(ctx.game_state, usize::from(depth));
        if pv.first() != Some(&ctx.root_best_move) {
            pv.clear();
            if ctx.root_best_move != NO_MOVE {
                pv.push(ctx.root_best_move);
            }
        }

        let elapsed_ms = started_at.elapsed().as_millis() as u64;
        result.best_move = ctx.root_best_move;
        result.score = score;
        result.depth = depth;
        result.nodes = ctx.nodes;
        result.elapsed_ms = elapsed_ms;
        result.pv = pv.clone();

        log::debug!(
            "depth {depth} score {score} nodes {} time {elapsed_ms}ms ordering {:.2}",
            ctx.nodes,
            if ctx.fail_high == 0 {
                0.0
            } else {
                ctx.fail_high_first as f64 / ctx.fail_high as f64
            }
        );

        on_iteration(&IterationReport {
            depth,
            score,
            nodes: ctx.nodes,
            elapsed_ms,
            pv,
        });

        // No legal root move or a forced mate: deeper iterations cannot change the answer.
        if ctx.root_best_move == NO_MOVE || mate_in_moves(score).is_some() {
            break;
        }
    }

    result.nodes = ctx.nodes;
    result.fail_high = ctx.fail_high;
    result.fail_high_first = ctx.fail_high_first;
    result.elapsed_ms = started_at.elapsed().as_millis() as u64;
    ctx.game_state.ply = 0;
    result
}
