use crate::engine::Board;
use crate::heuristics;
use crate::moves::{is_redundant, Move};
use tracing::debug;

/// Depth used for hints: up to three moves are looked at.
pub const DEFAULT_HINT_DEPTH: usize = 2;

/// A proposed next move found by the lookahead search.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Hint {
    /// First move of the best line; the one to play now.
    pub mv: Move,
    /// Direct score at the end of `line`.
    pub score: u32,
    /// The whole line that reached `score`, starting with `mv`.
    pub line: Vec<Move>,
}

/// Best line seen so far during one search.
struct BestLine {
    line: Vec<Move>,
    score: u32,
}

/// Searches every non-redundant line of up to `max_depth + 1` moves and
/// returns the first line whose score strictly beats `baseline_score`
/// and every line found before it.
///
/// The winner is judged over the whole tree, so a first move that scores
/// poorly on its own can still win through a good descendant. `forbidden`
/// is never tried as the first move. The board is restored before
/// returning.
///
/// Returns `None` if nothing beats `baseline_score`.
pub fn search_lookahead(
    board: &mut Board,
    max_depth: usize,
    forbidden: Option<Move>,
    baseline_score: u32,
) -> Option<Hint> {
    let mut best = BestLine {
        line: Vec::new(),
        score: baseline_score,
    };
    let mut path = Vec::with_capacity(max_depth + 1);
    find_best_line_recursive(board, 0, max_depth, forbidden, &mut path, &mut best);

    let mv = *best.line.first()?;
    Some(Hint {
        mv,
        score: best.score,
        line: best.line,
    })
}

fn find_best_line_recursive(
    board: &mut Board,
    depth: usize,
    max_depth: usize,
    forbidden: Option<Move>,
    path: &mut Vec<Move>,
    best: &mut BestLine,
) {
    for mv in Move::ALL {
        if depth == 0 && forbidden == Some(mv) {
            continue;
        }
        if is_redundant(mv, path) {
            continue;
        }

        board.apply_move(mv);
        path.push(mv);

        let score = heuristics::score(board);
        if score > best.score {
            best.score = score;
            best.line = path.clone();
            debug!(
                line = %crate::utils::moves_to_string(path),
                score,
                "new hint"
            );
        }

        if depth < max_depth {
            find_best_line_recursive(board, depth + 1, max_depth, forbidden, path, best);
        }

        // Backtrack
        path.pop();
        board.apply_move(mv.inverse());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::heuristics::{is_solved, score, MAX_SCORE};
    use crate::utils::moves_from_str;

    fn one_move_from_solved() -> Board {
        let mut board = Board::new_initial();
        board.apply_move(Move::LeftCw);
        board
    }

    #[test]
    fn test_search_finds_solving_line() {
        let mut board = one_move_from_solved();
        let before = board.clone();
        let baseline = score(&board);

        let hint = search_lookahead(&mut board, DEFAULT_HINT_DEPTH, None, baseline).unwrap();
        assert_eq!(board, before, "search must leave the board as it found it");
        assert_eq!(hint.score, MAX_SCORE);
        assert_eq!(hint.line[0], hint.mv);
        assert!(hint.line.len() <= DEFAULT_HINT_DEPTH + 1);

        let mut replay = before.clone();
        replay.apply_moves(&hint.line);
        assert!(is_solved(&replay));
    }

    #[test]
    fn test_depth_zero_picks_best_single_move() {
        let mut board = one_move_from_solved();
        let baseline = score(&board);
        let hint = search_lookahead(&mut board, 0, None, baseline).unwrap();
        assert_eq!(hint.mv, Move::LeftCcw);
        assert_eq!(hint.line, vec![Move::LeftCcw]);
        assert_eq!(hint.score, MAX_SCORE);
    }

    #[test]
    fn test_forbidden_move_is_not_first() {
        let mut board = one_move_from_solved();
        let baseline = score(&board);
        // Undoing the left turn is the only single or double move that helps.
        assert!(search_lookahead(&mut board, 0, Some(Move::LeftCcw), baseline).is_none());
        assert!(search_lookahead(&mut board, 1, Some(Move::LeftCcw), baseline).is_none());

        let hint = search_lookahead(&mut board, 2, Some(Move::LeftCcw), baseline).unwrap();
        assert_ne!(hint.mv, Move::LeftCcw);
        assert_eq!(hint.score, MAX_SCORE);

        let mut replay = one_move_from_solved();
        replay.apply_moves(&hint.line);
        assert!(is_solved(&replay));
    }

    #[test]
    fn test_no_improvement_on_solved_board() {
        let mut board = Board::new_initial();
        let hint = search_lookahead(&mut board, DEFAULT_HINT_DEPTH, None, MAX_SCORE);
        assert!(hint.is_none());
        assert_eq!(board, Board::new_initial());
    }

    #[test]
    fn test_lines_equal_to_baseline_are_not_recorded() {
        let mut board = one_move_from_solved();
        assert!(search_lookahead(&mut board, 1, None, MAX_SCORE).is_none());
    }

    #[test]
    fn test_ties_keep_earlier_move() {
        let mut board = Board::new_initial();
        board.apply_moves(&moves_from_str("LR").unwrap());
        let baseline = score(&board);
        // Both `l` and `r` reach the same best single-move score.
        let via_left = heuristics::score_hypothetical(&board, &[Move::LeftCcw]);
        let via_right = heuristics::score_hypothetical(&board, &[Move::RightCcw]);
        assert_eq!(via_left, via_right);
        assert!(via_left > baseline);
        assert!(Move::ALL
            .iter()
            .all(|&m| heuristics::score_hypothetical(&board, &[m]) <= via_left));

        let hint = search_lookahead(&mut board, 0, None, baseline).unwrap();
        assert_eq!(hint.mv, Move::LeftCcw);
        assert_eq!(hint.line, vec![Move::LeftCcw]);
        assert_eq!(hint.score, via_left);
    }

    #[test]
    fn test_local_maximum_yields_no_hint() {
        let mut board = Board::new_initial();
        board.apply_moves(&moves_from_str("LTTT").unwrap());
        assert!(!is_solved(&board));
        let before = board.clone();
        let baseline = score(&board);

        assert!(search_lookahead(&mut board, DEFAULT_HINT_DEPTH, None, baseline).is_none());
        assert_eq!(board, before);
    }

    #[test]
    fn test_deeper_search_finds_three_move_line() {
        let mut board = Board::new_initial();
        board.apply_moves(&moves_from_str("LRl").unwrap());
        let baseline = score(&board);

        assert!(search_lookahead(&mut board, 0, None, baseline).is_none());
        let shallow = search_lookahead(&mut board, 1, None, baseline).unwrap();
        assert!(shallow.score > baseline && shallow.score < MAX_SCORE);

        let hint = search_lookahead(&mut board, DEFAULT_HINT_DEPTH, None, baseline).unwrap();
        assert_eq!(hint.line, moves_from_str("Ltr").unwrap());
        assert_eq!(hint.score, MAX_SCORE);
        assert!(hint.line.windows(2).all(|w| w[0] != w[1].inverse()));
    }
}
