use crate::engine::{Board, Color, TOKEN_COUNT};
use crate::error::PuzzleError;
use crate::moves::Move;

/// Parses a move string such as `"TtLlRr"` into moves.
///
/// Uppercase letters turn a ring clockwise, lowercase counter-clockwise.
/// Whitespace is ignored so sequences may be grouped for readability.
///
/// # Errors
/// Returns `PuzzleError::InvalidMove` for any other character.
///
/// # Examples
/// ```
/// use circles_solver::moves::Move;
/// use circles_solver::utils::moves_from_str;
///
/// assert_eq!(
///     moves_from_str("Tl r").unwrap(),
///     vec![Move::TopCw, Move::LeftCcw, Move::RightCcw]
/// );
/// assert!(moves_from_str("TX").is_err());
/// ```
pub fn moves_from_str(s: &str) -> Result<Vec<Move>, PuzzleError> {
    s.chars()
        .filter(|c| !c.is_whitespace())
        .map(|c| Move::from_char(c).ok_or(PuzzleError::InvalidMove(c)))
        .collect()
}

pub fn moves_to_string(moves: &[Move]) -> String {
    moves.iter().map(|m| m.to_char()).collect()
}

/// Parses a 37-character string of `1`, `2` and `3` into a board, one
/// character per slot. Token ids are assigned by slot.
///
/// # Errors
/// - `PuzzleError::WrongLength` if the string does not hold exactly 37 characters.
/// - `PuzzleError::InvalidColor` for any character other than `1`, `2` or `3`.
pub fn board_from_color_str(s: &str) -> Result<Board, PuzzleError> {
    let found = s.chars().count();
    if found != TOKEN_COUNT {
        return Err(PuzzleError::WrongLength {
            expected: TOKEN_COUNT,
            found,
        });
    }

    let mut colors = [Color::One; TOKEN_COUNT];
    for (slot, ch) in s.chars().enumerate() {
        colors[slot] = Color::from_char(ch).ok_or(PuzzleError::InvalidColor { ch, slot })?;
    }
    Ok(Board::from_colors(colors))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_moves_from_str_valid() {
        let moves = moves_from_str("TtLlRr").unwrap();
        assert_eq!(moves, Move::ALL.to_vec());
        assert_eq!(moves_to_string(&moves), "TtLlRr");
        assert!(moves_from_str("").unwrap().is_empty());
    }

    #[test]
    fn test_moves_from_str_invalid_char() {
        let err = moves_from_str("TLx").unwrap_err();
        assert!(matches!(err, PuzzleError::InvalidMove('x')));
        assert!(err.to_string().contains("'x'"));
    }

    #[test]
    fn test_board_from_color_str_round_trip() {
        let s = "2222222211111112223333333311111111111";
        let board = board_from_color_str(s).unwrap();
        assert_eq!(board.color_string(), s);
        assert_eq!(board.color_at(0), Color::Two);
        assert_eq!(board.tokens()[36].id, 36);
    }

    #[test]
    fn test_board_from_color_str_wrong_length() {
        let err = board_from_color_str("123").unwrap_err();
        assert!(matches!(
            err,
            PuzzleError::WrongLength { expected: 37, found: 3 }
        ));
    }

    #[test]
    fn test_board_from_color_str_invalid_char() {
        let mut s = "1".repeat(36);
        s.push('4');
        let err = board_from_color_str(&s).unwrap_err();
        assert!(matches!(err, PuzzleError::InvalidColor { ch: '4', slot: 36 }));
    }
}
