//! Fixed-size best-move cache keyed by Zobrist hash.
//!
//! Each slot remembers the move that last raised alpha in the position with
//! that key. Slots are indexed directly by `key % len` and always replaced.
//! The cache feeds move ordering and principal variation reconstruction.

use crate::game_state::{chess_types::Move, game_state::GameState};
use crate::move_generation::legal_move_apply::{apply_move, revert_move};
use crate::move_generation::move_generator::{generate_moves, MoveList};

pub const DEFAULT_CACHE_MB: usize = 2;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct CacheEntry {
    key: u64,
    mv: Move,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct CacheStats {
    pub probes: u64,
    pub hits: u64,
    pub stores: u64,
}

#[derive(Debug, Clone)]
pub struct BestMoveCache {
    entries: Vec<CacheEntry>,
    stats: CacheStats,
}

impl Default for BestMoveCache {
    fn default() -> Self {
        Self::new_with_mb(DEFAULT_CACHE_MB)
    }
}

impl BestMoveCache {
    pub fn new_with_mb(size_mb: usize) -> Self {
        let bytes = size_mb.max(1) * 1024 * 1024;
        let count = (bytes / std::mem::size_of::<CacheEntry>()).max(1);
        log::info!("best-move cache sized to {count} entries ({} MB)", size_mb.max(1));
        Self {
            entries: vec![CacheEntry::default(); count],
            stats: CacheStats::default(),
        }
    }

    #[inline]
    pub fn clear(&mut self) {
        self.entries.fill(CacheEntry::default());
        self.stats = CacheStats::default();
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[inline]
    pub fn stats(&self) -> CacheStats {
        self.stats
    }

    #[inline]
    fn idx(&self, key: u64) -> usize {
        (key % self.entries.len() as u64) as usize
    }

    pub fn probe(&mut self, key: u64) -> Option<Move> {
        self.stats.probes += 1;
        let entry = self.entries[self.idx(key)];
        if entry.key == key && entry.mv != 0 {
            self.stats.hits += 1;
            Some(entry.mv)
        } else {
            None
        }
    }

    pub fn store(&mut self, key: u64, mv: Move) {
        self.stats.stores += 1;
        let idx = self.idx(key);
        self.entries[idx] = CacheEntry { key, mv };
    }

    /// Follow cached moves from the current position for up to `depth` plies.
    ///
    /// A cached move is only played when it is in the generated list and
    /// `apply_move` accepts it. The position is restored before returning.
    pub fn principal_variation(&mut self, game_state: &mut GameState, depth: usize) -> Vec<Move> {
        let mut line = Vec::with_capacity(depth);
        let mut list = MoveList::new();

        while line.len() < depth {
            let Some(mv) = self.probe(game_state.zobrist_key) else {
                break;
            };
            generate_moves(game_state, None, &mut list);
            if !list.contains(mv) || !apply_move(game_state, mv) {
                break;
            }
            line.push(mv);
        }

        for _ in 0..line.len() {
            revert_move(game_state);
        }
        line
    }
}

#[cfg(test)]
mod tests {
    use super::BestMoveCache;
    use crate::game_state::game_state::GameState;
    use crate::move_generation::legal_move_apply::apply_move;
    use crate::utils::long_algebraic::{long_algebraic_to_move, move_to_long_algebraic};

    #[test]
    fn sizing_follows_megabytes() {
        let cache = BestMoveCache::new_with_mb(1);
        assert_eq!(cache.len(), 1024 * 1024 / 16);
        assert_eq!(BestMoveCache::new_with_mb(0).len(), cache.len());
    }

    #[test]
    fn probe_requires_matching_key() {
        let mut cache = BestMoveCache::new_with_mb(1);
        let len = cache.len() as u64;
        cache.store(7, 1234);
        assert_eq!(cache.probe(7), Some(1234));
        assert_eq!(cache.probe(7 + len), None);

        cache.store(7 + len, 99);
        assert_eq!(cache.probe(7), None);
        assert_eq!(cache.probe(7 + len), Some(99));

        cache.clear();
        assert_eq!(cache.probe(7 + len), None);
        assert_eq!(cache.stats().probes, 1);
    }

    #[test]
    fn principal_variation_walks_and_restores() {
        let mut game = GameState::new_game();
        let before = game.clone();
        let mut cache = BestMoveCache::new_with_mb(1);

        let mut walker = game.clone();
        for text in ["e2e4", "e7e5", "g1f3"] {
            let mv = long_algebraic_to_move(text, &mut walker).expect("move should resolve");
            cache.store(walker.zobrist_key, mv);
            assert!(apply_move(&mut walker, mv));
        }

        let line: Vec<_> = cache
            .principal_variation(&mut game, 8)
            .into_iter()
            .map(move_to_long_algebraic)
            .collect();
        assert_eq!(line, ["e2e4", "e7e5", "g1f3"]);
        assert_eq!(game, before);

        assert_eq!(cache.principal_variation(&mut game, 2).len(), 2);
    }

    #[test]
    fn principal_variation_stops_at_foreign_move() {
        let mut game = GameState::new_game();
        let mut cache = BestMoveCache::new_with_mb(1);
        let mut other =
            GameState::from_fen("4k3/8/8/8/8/8/8/R3K3 w - - 0 1").expect("FEN should parse");
        let rook_move = long_algebraic_to_move("a1a5", &mut other).expect("move should resolve");

        cache.store(game.zobrist_key, rook_move);
        assert!(cache.principal_variation(&mut game, 4).is_empty());
    }
}
