//! Coordinate move notation (`e2e4`, `e7e8q`) at the protocol boundary.

use crate::errors::ChessError;
use crate::game_state::{chess_types::*, game_state::GameState};
use crate::move_generation::legal_move_apply::legal_moves;
use crate::moves::move_descriptions::{move_from, move_promoted, move_to, NO_MOVE};
use crate::utils::algebraic::{algebraic_to_square, square_to_algebraic};

pub fn move_to_long_algebraic(mv: Move) -> String {
    if mv == NO_MOVE {
        return "0000".to_owned();
    }

    let mut out = square_to_algebraic(move_from(mv));
    out.push_str(&square_to_algebraic(move_to(mv)));
    if let Some(promoted) = move_promoted(mv) {
        out.push(promotion_to_char(promoted.kind));
    }
    out
}

/// Resolve coordinate text against the legal moves of `game_state`.
///
/// Source and destination must match exactly, and a promotion letter must
/// name the promoted piece (a promotion without a letter is rejected).
pub fn long_algebraic_to_move(text: &str, game_state: &mut GameState) -> Result<Move, ChessError> {
    let (from, to, promotion) = parse_long_algebraic(text)?;

    legal_moves(game_state)
        .into_iter()
        .find(|&mv| {
            move_from(mv) == from
                && move_to(mv) == to
                && move_promoted(mv).map(|piece| piece.kind) == promotion
        })
        .ok_or_else(|| ChessError::IllegalMove(text.to_owned()))
}

fn parse_long_algebraic(text: &str) -> Result<(Square, Square, Option<PieceKind>), ChessError> {
    let malformed = || ChessError::InvalidMoveNotation(text.to_owned());

    if !text.is_ascii() || !(4..=5).contains(&text.len()) {
        return Err(malformed());
    }

    let from = algebraic_to_square(&text[0..2]).map_err(|_| malformed())?;
    let to = algebraic_to_square(&text[2..4]).map_err(|_| malformed())?;
    let promotion = match text[4..].chars().next() {
        None => None,
        Some(ch) => Some(promotion_from_char(ch).ok_or_else(malformed)?),
    };

    Ok((from, to, promotion))
}

fn promotion_to_char(kind: PieceKind) -> char {
    match kind {
        PieceKind::Knight => 'n',
        PieceKind::Bishop => 'b',
        PieceKind::Rook => 'r',
        _ => 'q',
    }
}

fn promotion_from_char(ch: char) -> Option<PieceKind> {
    match ch {
        'q' => Some(PieceKind::Queen),
        'r' => Some(PieceKind::Rook),
        'b' => Some(PieceKind::Bishop),
        'n' => Some(PieceKind::Knight),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::{long_algebraic_to_move, move_to_long_algebraic};
    use crate::errors::ChessError;
    use crate::game_state::game_state::GameState;
    use crate::moves::move_descriptions::{move_kind, MoveKind, NO_MOVE};
    use test_case::test_case;

    #[test_case("e2e4")]
    #[test_case("g1f3")]
    #[test_case("b1c3")]
    fn start_position_moves_resolve_and_print_back(text: &str) {
        let mut game = GameState::new_game();
        let mv = long_algebraic_to_move(text, &mut game).expect("move should resolve");
        assert_eq!(move_to_long_algebraic(mv), text);
    }

    #[test]
    fn promotion_letter_selects_the_piece() {
        let mut game =
            GameState::from_fen("4k3/P7/8/8/8/8/8/4K3 w - - 0 1").expect("FEN should parse");
        let mv = long_algebraic_to_move("a7a8n", &mut game).expect("underpromotion should resolve");
        assert_eq!(move_kind(mv), MoveKind::Promotion);
        assert_eq!(move_to_long_algebraic(mv), "a7a8n");

        assert_eq!(
            long_algebraic_to_move("a7a8", &mut game),
            Err(ChessError::IllegalMove("a7a8".to_owned()))
        );
    }

    #[test]
    fn castling_resolves_from_king_squares() {
        let mut game =
            GameState::from_fen("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1").expect("FEN should parse");
        let mv = long_algebraic_to_move("e1g1", &mut game).expect("castle should resolve");
        assert_eq!(move_kind(mv), MoveKind::Castle);
    }

    #[test_case("e2e5", ChessError::IllegalMove("e2e5".to_owned()))]
    #[test_case("e7e5", ChessError::IllegalMove("e7e5".to_owned()))]
    #[test_case("e2", ChessError::InvalidMoveNotation("e2".to_owned()))]
    #[test_case("z2e4", ChessError::InvalidMoveNotation("z2e4".to_owned()))]
    #[test_case("e2e4k", ChessError::InvalidMoveNotation("e2e4k".to_owned()))]
    fn bad_input_is_reported(text: &str, expected: ChessError) {
        let mut game = GameState::new_game();
        assert_eq!(long_algebraic_to_move(text, &mut game), Err(expected));
    }

    #[test]
    fn null_move_prints_as_zeros() {
        assert_eq!(move_to_long_algebraic(NO_MOVE), "0000");
    }
}
