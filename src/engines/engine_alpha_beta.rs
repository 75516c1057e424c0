//! Iterative-deepening alpha-beta engine.
//!
//! Owns the best-move cache so move ordering knowledge carries over from one
//! `go` to the next within a game. `ucinewgame` and `ClearHash` wipe it.

use std::sync::{atomic::AtomicBool, Arc};
use std::time::Instant;

use crate::engines::engine_trait::{Engine, EngineOutput, GoParams};
use crate::engines::time_management::resolve_search_config;
use crate::errors::ChessError;
use crate::game_state::game_state::GameState;
use crate::moves::move_descriptions::NO_MOVE;
use crate::search::best_move_cache::{BestMoveCache, DEFAULT_CACHE_MB};
use crate::search::board_scoring::{BoardScorer, PieceSquareScorer};
use crate::search::iterative_deepening::{iterative_deepening_search, IterationReport};

pub struct AlphaBetaEngine {
    cache: BestMoveCache,
    cache_mb: usize,
    scorer: Box<dyn BoardScorer>,
    stop_signal: Option<Arc<AtomicBool>>,
}

impl Default for AlphaBetaEngine {
    fn default() -> Self {
        Self::new(Box::new(PieceSquareScorer))
    }
}

impl AlphaBetaEngine {
    pub fn new(scorer: Box<dyn BoardScorer>) -> Self {
        Self {
            cache: BestMoveCache::new_with_mb(DEFAULT_CACHE_MB),
            cache_mb: DEFAULT_CACHE_MB,
            scorer,
            stop_signal: None,
        }
    }

    pub fn cache_mb(&self) -> usize {
        self.cache_mb
    }
}

impl Engine for AlphaBetaEngine {
    fn new_game(&mut self) {
        self.cache.clear();
    }

    fn set_option(&mut self, name: &str, value: &str) -> Result<(), ChessError> {
        if name.eq_ignore_ascii_case("Hash") {
            let parsed = value
                .trim()
                .parse::<usize>()
                .map_err(|_| ChessError::InvalidOptionValue {
                    name: name.to_owned(),
                    value: value.to_owned(),
                })?;
            self.cache_mb = parsed.max(1);
            self.cache = BestMoveCache::new_with_mb(self.cache_mb);
            return Ok(());
        }
        if name.eq_ignore_ascii_case("ClearHash") {
            self.cache.clear();
            return Ok(());
        }
        Err(ChessError::UnknownOption(name.to_owned()))
    }

    fn set_stop_signal(&mut self, stop_signal: Option<Arc<AtomicBool>>) {
        self.stop_signal = stop_signal;
    }

    fn choose_move(
        &mut self,
        game_state: &GameState,
        params: &GoParams,
        on_iteration: &mut dyn FnMut(&IterationReport),
    ) -> Result<EngineOutput, ChessError> {
        let started_at = Instant::now();
        let mut config = resolve_search_config(game_state, params, started_at);
        config.stop_flag = self.stop_signal.clone();

        let mut search_state = game_state.clone();
        let result = iterative_deepening_search(
            &mut search_state,
            self.scorer.as_ref(),
            &mut self.cache,
            &config,
            on_iteration,
        );

        log::debug!(
            "search finished: depth {} nodes {} time {}ms ordering {:.2}",
            result.depth,
            result.nodes,
            result.elapsed_ms,
            result.ordering_quality()
        );

        Ok(EngineOutput {
            best_move: (result.best_move != NO_MOVE).then_some(result.best_move),
            score: result.score,
            depth: result.depth,
            nodes: result.nodes,
            pv: result.pv,
        })
    }
}
