//! Generation-time move scores.
//!
//! Captures rank by MVV-LVA above every quiet move. Quiet moves rank by the
//! two killer slots of the current ply first, then by the history table.
//! The cached best move is boosted above all of these by the search itself.

use crate::game_state::chess_rules::MAX_SEARCH_PLY;
use crate::game_state::chess_types::{Move, Piece, PieceKind};
use crate::moves::move_descriptions::NO_MOVE;

pub const CACHE_MOVE_SCORE: i32 = 2_000_000;
pub const CAPTURE_SCORE_BASE: i32 = 1_000_000;
pub const FIRST_KILLER_SCORE: i32 = 900_000;
pub const SECOND_KILLER_SCORE: i32 = 800_000;

const VICTIM_SCORE: [i32; 6] = [100, 200, 300, 400, 500, 600];

/// `MVV_LVA[victim][attacker]`: victim value first, cheaper attacker breaks ties.
pub const MVV_LVA: [[i32; 6]; 6] = build_mvv_lva();

const fn build_mvv_lva() -> [[i32; 6]; 6] {
    let mut table = [[0i32; 6]; 6];
    let mut victim = 0usize;
    while victim < 6 {
        let mut attacker = 0usize;
        while attacker < 6 {
            table[victim][attacker] = VICTIM_SCORE[victim] + 6 - VICTIM_SCORE[attacker] / 100;
            attacker += 1;
        }
        victim += 1;
    }
    table
}

#[inline]
pub fn capture_score(victim: PieceKind, attacker: PieceKind) -> i32 {
    CAPTURE_SCORE_BASE + MVV_LVA[victim.index()][attacker.index()]
}

/// Killer slots per ply and the `[color][kind][to]` history table.
#[derive(Debug, Clone)]
pub struct OrderingTables {
    killers: [[Move; 2]; MAX_SEARCH_PLY],
    history: [[[i32; 64]; 6]; 2],
}

impl Default for OrderingTables {
    fn default() -> Self {
        Self {
            killers: [[NO_MOVE; 2]; MAX_SEARCH_PLY],
            history: [[[0; 64]; 6]; 2],
        }
    }
}

impl OrderingTables {
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    pub fn quiet_score(&self, ply: usize, mv: Move, mover: Piece, to: u8) -> i32 {
        if let Some(slots) = self.killers.get(ply) {
            if slots[0] == mv {
                return FIRST_KILLER_SCORE;
            }
            if slots[1] == mv {
                return SECOND_KILLER_SCORE;
            }
        }
        self.history_score(mover, to)
    }

    #[inline]
    pub fn history_score(&self, mover: Piece, to: u8) -> i32 {
        self.history[mover.color.index()][mover.kind.index()][to as usize]
    }

    /// Most recent killer goes in slot 0; the previous one shifts to slot 1.
    pub fn record_killer(&mut self, ply: usize, mv: Move) {
        let Some(slots) = self.killers.get_mut(ply) else {
            return;
        };
        if slots[0] != mv {
            slots[1] = slots[0];
            slots[0] = mv;
        }
    }

    pub fn record_history(&mut self, mover: Piece, to: u8, depth: i32) {
        let slot = &mut self.history[mover.color.index()][mover.kind.index()][to as usize];
        *slot = slot.saturating_add(depth.max(0));
    }

    #[inline]
    pub fn killers(&self, ply: usize) -> [Move; 2] {
        self.killers.get(ply).copied().unwrap_or([NO_MOVE; 2])
    }
}
