use crate::game_state::chess_types::*;

/// Single undo record for `apply_move` / `revert_move`.
///
/// The captured piece and move kind travel inside `mv`, so the record only has
/// to keep the clocks and the hash that the move overwrote.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UndoState {
    pub mv: Move,
    pub prev_castling_rights: CastlingRights,
    pub prev_en_passant_square: Option<Square>,
    pub prev_halfmove_clock: u16,
    pub prev_zobrist_key: u64,
}
