//! Packed 32-bit move encoding.
//!
//! Layout, low bit first:
//!
//! | bits    | field                                   |
//! |---------|-----------------------------------------|
//! | 0..6    | source square                           |
//! | 6..12   | destination square                      |
//! | 12..14  | move kind                               |
//! | 14..18  | castling rights before the move         |
//! | 18..24  | en-passant square before the move (0 = none) |
//! | 24..28  | captured piece code (0 = none)          |
//! | 28..32  | promoted piece code (0 = none)          |
//!
//! Piece codes are `Piece::code()`, so captured and promoted pieces carry
//! their color.

use crate::game_state::chess_types::{CastlingRights, Move, Piece, Square};

const FROM_SHIFT: u32 = 0;
const TO_SHIFT: u32 = 6;
const KIND_SHIFT: u32 = 12;
const CASTLING_SHIFT: u32 = 14;
const EN_PASSANT_SHIFT: u32 = 18;
const CAPTURED_SHIFT: u32 = 24;
const PROMOTED_SHIFT: u32 = 28;

const SQUARE_MASK: u32 = 0x3F;
const KIND_MASK: u32 = 0x3;
const NIBBLE_MASK: u32 = 0xF;

/// Encoded "no move". Never produced by the generator.
pub const NO_MOVE: Move = 0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MoveKind {
    Normal,
    EnPassant,
    Castle,
    Promotion,
}

impl MoveKind {
    #[inline]
    const fn code(self) -> u32 {
        match self {
            MoveKind::Normal => 0,
            MoveKind::EnPassant => 1,
            MoveKind::Castle => 2,
            MoveKind::Promotion => 3,
        }
    }

    #[inline]
    const fn from_code(code: u32) -> Self {
        match code & KIND_MASK {
            0 => MoveKind::Normal,
            1 => MoveKind::EnPassant,
            2 => MoveKind::Castle,
            _ => MoveKind::Promotion,
        }
    }
}

#[inline]
pub fn pack_move(
    from: Square,
    to: Square,
    kind: MoveKind,
    castling_before: CastlingRights,
    en_passant_before: Option<Square>,
    captured: Option<Piece>,
    promoted: Option<Piece>,
) -> Move {
    let mut out = 0u32;
    out |= (from as u32 & SQUARE_MASK) << FROM_SHIFT;
    out |= (to as u32 & SQUARE_MASK) << TO_SHIFT;
    out |= kind.code() << KIND_SHIFT;
    out |= (castling_before as u32 & NIBBLE_MASK) << CASTLING_SHIFT;
    out |= (en_passant_before.map_or(0, u32::from) & SQUARE_MASK) << EN_PASSANT_SHIFT;
    out |= captured.map_or(0, Piece::code) << CAPTURED_SHIFT;
    out |= promoted.map_or(0, Piece::code) << PROMOTED_SHIFT;
    out
}

#[inline]
pub const fn move_from(mv: Move) -> Square {
    ((mv >> FROM_SHIFT) & SQUARE_MASK) as Square
}

#[inline]
pub const fn move_to(mv: Move) -> Square {
    ((mv >> TO_SHIFT) & SQUARE_MASK) as Square
}

#[inline]
pub const fn move_kind(mv: Move) -> MoveKind {
    MoveKind::from_code(mv >> KIND_SHIFT)
}

#[inline]
pub const fn move_castling_snapshot(mv: Move) -> CastlingRights {
    ((mv >> CASTLING_SHIFT) & NIBBLE_MASK) as CastlingRights
}

#[inline]
pub const fn move_en_passant_snapshot(mv: Move) -> Option<Square> {
    match (mv >> EN_PASSANT_SHIFT) & SQUARE_MASK {
        0 => None,
        sq => Some(sq as Square),
    }
}

#[inline]
pub const fn move_captured(mv: Move) -> Option<Piece> {
    Piece::from_code((mv >> CAPTURED_SHIFT) & NIBBLE_MASK)
}

#[inline]
pub const fn move_promoted(mv: Move) -> Option<Piece> {
    Piece::from_code((mv >> PROMOTED_SHIFT) & NIBBLE_MASK)
}

#[inline]
pub const fn is_capture(mv: Move) -> bool {
    (mv >> CAPTURED_SHIFT) & NIBBLE_MASK != 0
}
