//! Converts raw `go` arguments into a search configuration.
//!
//! UCI passes clock data through untouched; this is the one place that turns
//! it into a depth ceiling and a deadline.

use std::time::{Duration, Instant};

use crate::engines::engine_trait::GoParams;
use crate::game_state::chess_rules::MAX_SEARCH_PLY;
use crate::game_state::chess_types::Color;
use crate::game_state::game_state::GameState;
use crate::search::iterative_deepening::SearchConfig;

/// Moves assumed left in the game when `movestogo` is absent.
pub const DEFAULT_MOVES_TO_GO: u64 = 30;

/// Milliseconds to spend on this move, or `None` for no time limit.
pub fn move_budget_ms(game_state: &GameState, params: &GoParams) -> Option<u64> {
    if params.infinite {
        return None;
    }
    if let Some(movetime) = params.movetime_ms {
        return Some(movetime.max(1));
    }

    let (remaining, inc) = match game_state.side_to_move {
        Color::Light => (params.wtime_ms?, params.winc_ms.unwrap_or(0)),
        Color::Dark => (params.btime_ms?, params.binc_ms.unwrap_or(0)),
    };
    let moves_to_go = params
        .movestogo
        .map_or(DEFAULT_MOVES_TO_GO, |mtg| u64::from(mtg.max(1)));

    let target = (remaining / moves_to_go).saturating_add(inc.saturating_mul(3) / 4);
    let ceiling = (remaining / 4).max(1);
    Some(target.clamp(1, ceiling))
}

pub fn resolve_search_config(
    game_state: &GameState,
    params: &GoParams,
    started_at: Instant,
) -> SearchConfig {
    let max_depth = params
        .depth
        .map_or(MAX_SEARCH_PLY as u8, |depth| depth.clamp(1, MAX_SEARCH_PLY as u8));

    SearchConfig {
        max_depth,
        deadline: move_budget_ms(game_state, params)
            .map(|ms| started_at + Duration::from_millis(ms)),
        stop_flag: None,
    }
}
