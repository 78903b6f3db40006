use circles_solver::engine::{Board, Game};
use circles_solver::heuristics::{choose_move_greedy, is_solved, score, MAX_SCORE};
use circles_solver::moves::Move;
use circles_solver::solver::{search_lookahead, DEFAULT_HINT_DEPTH};
use std::collections::HashMap;

const NUM_SHUFFLES_FOR_EVALUATION: u64 = 20;
const START_SEED: u64 = 0;
const SHUFFLE_STEPS: usize = 12;
const MAX_PLAYED_MOVES: usize = 40;

/// Picks the next move for `board`, or `None` to stop playing.
type StrategyFn = fn(&Board, Option<Move>) -> Option<Move>;

/// Plays the best single move, stopping when it would not improve.
fn greedy(board: &Board, _previous: Option<Move>) -> Option<Move> {
    let (best, mv) = choose_move_greedy(board);
    (best > score(board)).then_some(mv)
}

/// Plays the first move of the best lookahead line, the way hints are given.
fn lookahead(board: &Board, previous: Option<Move>) -> Option<Move> {
    let mut scratch = board.clone();
    let current = score(board);
    search_lookahead(&mut scratch, DEFAULT_HINT_DEPTH, previous.map(Move::inverse), current)
        .map(|hint| hint.mv)
}

fn main() {
    circles_solver::logging::init();

    let strategies: Vec<(&str, StrategyFn)> = vec![("GREEDY", greedy), ("LOOKAHEAD", lookahead)];

    let mut all_scores: HashMap<&str, Vec<u32>> = HashMap::new();
    let mut solved_counts: HashMap<&str, u32> = HashMap::new();

    println!(
        "Starting heuristic evaluation for {} shuffles of {} moves...",
        NUM_SHUFFLES_FOR_EVALUATION, SHUFFLE_STEPS
    );

    for shuffle_idx in 0..NUM_SHUFFLES_FOR_EVALUATION {
        let current_seed = START_SEED + shuffle_idx;
        let mut game = Game::with_seed(current_seed);
        game.initialize();
        game.shuffle(SHUFFLE_STEPS);
        let initial_board = game.board().clone();

        println!(
            "\nEvaluating shuffle {} (Seed: {}), start score {}",
            shuffle_idx,
            current_seed,
            score(&initial_board)
        );

        for (strategy_name, strategy_fn) in &strategies {
            let mut board = initial_board.clone();
            let mut previous = None;
            let mut played = 0;

            while played < MAX_PLAYED_MOVES && !is_solved(&board) {
                match strategy_fn(&board, previous) {
                    Some(mv) => {
                        board.apply_move(mv);
                        previous = Some(mv);
                        played += 1;
                    }
                    None => break,
                }
            }

            let final_score = score(&board);
            println!(
                "  Strategy: {:<10}, Score: {:<3}, Moves: {}",
                strategy_name, final_score, played
            );
            all_scores.entry(*strategy_name).or_default().push(final_score);
            if final_score == MAX_SCORE {
                *solved_counts.entry(*strategy_name).or_default() += 1;
            }
        }
    }

    println!("\n--- Evaluation Complete ---");
    println!(
        "Strategies evaluated: {}",
        strategies.iter().map(|(name, _)| *name).collect::<Vec<&str>>().join(", ")
    );
    println!("\n--- Average Scores ---");

    let mut sorted_avg_scores: Vec<(&str, f64)> = all_scores
        .iter()
        .filter(|(_, scores)| !scores.is_empty())
        .map(|(name, scores)| {
            let total: u32 = scores.iter().sum();
            (*name, total as f64 / scores.len() as f64)
        })
        .collect();

    // Sort by average score descending
    sorted_avg_scores.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));

    for (strategy_name, avg_score) in sorted_avg_scores {
        println!(
            "Strategy {:<10}: Average Score = {:.2}, Solved = {}",
            strategy_name,
            avg_score,
            solved_counts.get(strategy_name).copied().unwrap_or(0)
        );
    }
}
