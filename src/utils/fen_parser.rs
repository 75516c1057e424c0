//! FEN-to-GameState parser.
//!
//! Builds a fully populated state: piece bitboards, aggregates, rights,
//! clocks and a freshly computed Zobrist key. The halfmove and fullmove
//! fields are optional and default to `0` and `1`.

use crate::errors::ChessError;
use crate::game_state::{chess_types::*, game_state::GameState};
use crate::moves::bitboard::{rank_of, SET_MASK};
use crate::utils::algebraic::algebraic_to_square;

pub fn parse_fen(fen: &str) -> Result<GameState, ChessError> {
    let mut parts = fen.split_whitespace();

    let board_part = parts.next().ok_or(ChessError::MissingFenField("board layout"))?;
    let side_part = parts.next().ok_or(ChessError::MissingFenField("side-to-move"))?;
    let castling_part = parts.next().ok_or(ChessError::MissingFenField("castling rights"))?;
    let en_passant_part = parts.next().ok_or(ChessError::MissingFenField("en-passant square"))?;

    let mut game_state = GameState::new_empty();

    parse_board(board_part, &mut game_state)?;
    game_state.side_to_move = parse_side_to_move(side_part)?;
    game_state.castling_rights = parse_castling_rights(castling_part)?;
    game_state.en_passant_square = parse_en_passant_square(en_passant_part)?;

    if let Some(halfmove_part) = parts.next() {
        game_state.halfmove_clock = parse_clock(halfmove_part)?;
    }
    if let Some(fullmove_part) = parts.next() {
        game_state.fullmove_number = parse_clock(fullmove_part)?.max(1);
    }

    game_state.refresh_derived();
    if let Some(ep) = game_state.en_passant_square {
        validate_en_passant_square(&game_state, ep, en_passant_part)?;
    }
    Ok(game_state)
}

fn parse_board(board_part: &str, game_state: &mut GameState) -> Result<(), ChessError> {
    let ranks: Vec<&str> = board_part.split('/').collect();
    if ranks.len() != 8 {
        return Err(ChessError::WrongRankCount(ranks.len()));
    }

    for (fen_rank_idx, rank_str) in ranks.iter().enumerate() {
        let board_rank = 7 - fen_rank_idx;
        let mut file = 0usize;

        for ch in rank_str.chars() {
            if let Some(empty_count @ 1..=8) = ch.to_digit(10) {
                file += empty_count as usize;
                continue;
            }

            let piece = Piece::from_fen_char(ch).ok_or(ChessError::InvalidPieceChar(ch))?;

            if file >= 8 {
                return Err(ChessError::BadRankLength {
                    rank: board_rank + 1,
                    files: file + 1,
                });
            }

            let sq = board_rank * 8 + file;
            game_state.pieces[piece.color.index()][piece.kind.index()] |= SET_MASK[sq];
            file += 1;
        }

        if file != 8 {
            return Err(ChessError::BadRankLength {
                rank: board_rank + 1,
                files: file,
            });
        }
    }

    for (color, name) in [(Color::Light, "white"), (Color::Dark, "black")] {
        let count = game_state.pieces[color.index()][PieceKind::King.index()].count_ones();
        if count != 1 {
            return Err(ChessError::KingCount { color: name, count });
        }
    }

    Ok(())
}

fn parse_side_to_move(side_part: &str) -> Result<Color, ChessError> {
    match side_part {
        "w" => Ok(Color::Light),
        "b" => Ok(Color::Dark),
        _ => Err(ChessError::InvalidSideToMove(side_part.to_owned())),
    }
}

fn parse_castling_rights(castling_part: &str) -> Result<CastlingRights, ChessError> {
    if castling_part == "-" {
        return Ok(0);
    }

    let mut rights: CastlingRights = 0;

    for ch in castling_part.chars() {
        match ch {
            'K' => rights |= CASTLE_LIGHT_KINGSIDE,
            'Q' => rights |= CASTLE_LIGHT_QUEENSIDE,
            'k' => rights |= CASTLE_DARK_KINGSIDE,
            'q' => rights |= CASTLE_DARK_QUEENSIDE,
            _ => return Err(ChessError::InvalidCastlingChar(ch)),
        }
    }

    Ok(rights)
}

fn parse_en_passant_square(en_passant_part: &str) -> Result<Option<Square>, ChessError> {
    if en_passant_part == "-" {
        return Ok(None);
    }

    algebraic_to_square(en_passant_part).map(Some)
}

/// The target must sit directly behind a pawn that just made a double push:
/// rank 6 with white to move (rank 3 with black), empty along with the
/// square the pawn came from.
fn validate_en_passant_square(
    game_state: &GameState,
    ep: Square,
    text: &str,
) -> Result<(), ChessError> {
    let side = game_state.side_to_move;
    let (target_rank, toward_pusher): (u8, i8) = match side {
        Color::Light => (5, -8),
        Color::Dark => (2, 8),
    };
    if rank_of(ep) != target_rank {
        return Err(ChessError::InvalidSquare(text.to_owned()));
    }

    let pawn_square = (ep as i8 + toward_pusher) as usize;
    let origin_square = (ep as i8 - toward_pusher) as usize;
    let pusher_pawns = game_state.pieces[side.opposite().index()][PieceKind::Pawn.index()];
    let path = SET_MASK[ep as usize] | SET_MASK[origin_square];

    let valid = game_state.occupancy_all & path == 0 && pusher_pawns & SET_MASK[pawn_square] != 0;

    if valid {
        Ok(())
    } else {
        Err(ChessError::InvalidSquare(text.to_owned()))
    }
}

fn parse_clock(text: &str) -> Result<u16, ChessError> {
    text.parse::<u16>()
        .map_err(|_| ChessError::InvalidClock(text.to_owned()))
}
