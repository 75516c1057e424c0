//! Engine abstraction layer used by the UCI subsystem.
//!
//! The protocol layer hands an engine the current position and the raw `go`
//! arguments; the engine decides how long to think and reports back the
//! chosen move plus whatever it learned along the way.

use std::sync::{atomic::AtomicBool, Arc};

use crate::errors::ChessError;
use crate::game_state::{chess_types::Move, game_state::GameState};
use crate::search::iterative_deepening::IterationReport;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GoParams {
    pub depth: Option<u8>,
    pub movetime_ms: Option<u64>,
    pub wtime_ms: Option<u64>,
    pub btime_ms: Option<u64>,
    pub winc_ms: Option<u64>,
    pub binc_ms: Option<u64>,
    pub movestogo: Option<u16>,
    pub infinite: bool,
}

#[derive(Debug, Clone, Default)]
pub struct EngineOutput {
    /// `None` when the side to move has no legal move.
    pub best_move: Option<Move>,
    pub score: i32,
    pub depth: u8,
    pub nodes: u64,
    pub pv: Vec<Move>,
}

pub trait Engine: Send {
    fn new_game(&mut self) {}

    fn set_option(&mut self, name: &str, _value: &str) -> Result<(), ChessError> {
        Err(ChessError::UnknownOption(name.to_owned()))
    }

    /// Flag polled by the search; raising it ends the search early.
    fn set_stop_signal(&mut self, _stop_signal: Option<Arc<AtomicBool>>) {}

    fn choose_move(
        &mut self,
        game_state: &GameState,
        params: &GoParams,
        on_iteration: &mut dyn FnMut(&IterationReport),
    ) -> Result<EngineOutput, ChessError>;
}
