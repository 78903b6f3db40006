use crate::engine::{Board, TOKEN_COUNT};
use crate::moves::{Move, Ring};

/// The six recognised solved colorings, one digit per slot.
pub const SOLUTION_TEMPLATES: [&str; 6] = [
    "1111111111111111112222222222233333333",
    "1111111111111111113333333322222222222",
    "2222222211111112223333333311111111111",
    "3333322211111113332222222211111111111",
    "3333311111112223331111111111122222222",
    "2222211111112222221111111111133333333",
];

/// Score of a board that exactly matches a template.
pub const MAX_SCORE: u32 = (TOKEN_COUNT * 2) as u32;

/// Counts slots where `colors` agrees with `template`.
fn template_matches(colors: &[u8], template: &str) -> u32 {
    colors
        .iter()
        .zip(template.as_bytes())
        .filter(|(a, b)| a == b)
        .count() as u32
}

/// Best number of matching slots over all six templates, in `0..=37`.
pub fn template_score(board: &Board) -> u32 {
    let colors = board.color_string();
    SOLUTION_TEMPLATES
        .iter()
        .map(|t| template_matches(colors.as_bytes(), t))
        .max()
        .unwrap_or(0)
}

/// Rewards color runs on a ring's scored segment.
///
/// Returns one plus the number of consecutive position pairs inside the
/// segment whose tokens share a color.
///
/// # Examples
/// ```
/// use circles_solver::engine::Board;
/// use circles_solver::heuristics::ring_adjacency;
/// use circles_solver::moves::Ring;
///
/// let board = Board::new_initial();
/// assert_eq!(ring_adjacency(&board, Ring::Top), 18);
/// assert_eq!(ring_adjacency(&board, Ring::Left), 11);
/// assert_eq!(ring_adjacency(&board, Ring::Right), 8);
/// ```
pub fn ring_adjacency(board: &Board, ring: Ring) -> u32 {
    let (start, end) = ring.adjacency_span();
    let runs = (start..end)
        .filter(|&i| board.ring_color(ring, i) == board.ring_color(ring, i + 1))
        .count() as u32;
    1 + runs
}

/// Evaluates the board, in `3..=MAX_SCORE`.
///
/// An exact template match short-circuits to [`MAX_SCORE`]. Otherwise the
/// score is the best template agreement plus the adjacency of each ring.
pub fn score(board: &Board) -> u32 {
    let best = template_score(board);
    if best == TOKEN_COUNT as u32 {
        return MAX_SCORE;
    }
    best + ring_adjacency(board, Ring::Top)
        + ring_adjacency(board, Ring::Left)
        + ring_adjacency(board, Ring::Right)
}

/// Scores the board `baseline` would become after `moves`, leaving
/// `baseline` untouched.
pub fn score_hypothetical(baseline: &Board, moves: &[Move]) -> u32 {
    let mut board = baseline.clone();
    board.apply_moves(moves);
    score(&board)
}

/// Checks for an exact match against one of the templates.
pub fn is_solved(board: &Board) -> bool {
    let colors = board.color_string();
    SOLUTION_TEMPLATES.iter().any(|t| *t == colors)
}

/// Picks the single move with the highest direct score.
///
/// Ties go to the first move in [`Move::ALL`] order. Unlike the lookahead
/// hint this never declines to move, even when every move lowers the score.
pub fn choose_move_greedy(current_board: &Board) -> (u32, Move) {
    let mut best = (0, Move::TopCw);
    for mv in Move::ALL {
        let candidate = score_hypothetical(current_board, &[mv]);
        if candidate > best.0 {
            best = (candidate, mv);
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::board_from_color_str;

    #[test]
    fn test_templates_are_well_formed() {
        for template in SOLUTION_TEMPLATES {
            assert_eq!(template.len(), TOKEN_COUNT);
            assert_eq!(template.matches('1').count(), 18);
            assert_eq!(template.matches('2').count() + template.matches('3').count(), 19);
        }
    }

    #[test]
    fn test_every_template_scores_max() {
        for template in SOLUTION_TEMPLATES {
            let board = board_from_color_str(template).unwrap();
            assert!(is_solved(&board));
            assert_eq!(score(&board), MAX_SCORE);
            assert_eq!(template_score(&board), TOKEN_COUNT as u32);
        }
    }

    #[test]
    fn test_initial_board_is_solved() {
        let board = Board::new_initial();
        assert!(is_solved(&board));
        assert_eq!(score(&board), MAX_SCORE);
    }

    #[test]
    fn test_adjacency_counts_runs() {
        // Alternating colors on the top ring leave no runs there.
        let mut colors: Vec<char> = "1111111111111111112222222222233333333".chars().collect();
        for (i, c) in colors.iter_mut().take(18).enumerate() {
            if i % 2 == 1 {
                *c = '3';
            }
        }
        let s: String = colors.into_iter().collect();
        let board = board_from_color_str(&s).unwrap();
        assert_eq!(ring_adjacency(&board, Ring::Top), 1);
        assert_eq!(ring_adjacency(&board, Ring::Left), 11);
        assert!(!is_solved(&board));
        assert_eq!(
            score(&board),
            template_score(&board) + 1 + 11 + ring_adjacency(&board, Ring::Right)
        );
    }

    #[test]
    fn test_score_hypothetical_net_zero() {
        let board = Board::new_initial();
        assert_eq!(
            score_hypothetical(&board, &[Move::TopCw, Move::TopCcw]),
            score(&board)
        );
        assert_eq!(score_hypothetical(&board, &[]), score(&board));
    }

    #[test]
    fn test_choose_move_greedy_undoes_single_move() {
        let mut board = Board::new_initial();
        board.apply_move(Move::LeftCw);
        let (best_score, mv) = choose_move_greedy(&board);
        assert_eq!(best_score, MAX_SCORE);
        assert_eq!(mv, Move::LeftCcw);
    }
}
