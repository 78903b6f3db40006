use circles_solver::engine::{Game, GameState, SolveProgress};
use circles_solver::heuristics::MAX_SCORE;
use circles_solver::moves::Move;
use circles_solver::utils::{moves_from_str, moves_to_string};
use std::io::{self, Write}; // For input/output

const HELP: &str = "Moves: T/t top, L/l left, R/r right (upper = clockwise), e.g. 'TlR'.\n\
Commands: 'h' hint, 's' shuffle, 'g' genetic solve, 'i' reset, 'q' quit.";

fn main() {
    circles_solver::logging::init();

    let mut game = Game::new();
    game.initialize();
    let mut previous_hint: Option<Move> = None;
    println!("Welcome to Circles!");
    println!("{}", HELP);

    loop {
        println!("---------------------");
        let score = game.score(None).unwrap_or(0);
        println!("State: {:?}, Score: {}/{}", game.state(), score, MAX_SCORE);
        println!("{}", game.board());

        if game.state() == GameState::Solved {
            println!("🎉 SOLVED! 🎉 Shuffle with 's' to play again.");
        }

        print!("> ");
        io::stdout().flush().unwrap(); // Ensure prompt is shown before input

        let mut input = String::new();
        match io::stdin().read_line(&mut input) {
            Ok(0) => break,
            Ok(_) => {}
            Err(_) => {
                println!("Error reading input. Please try again.");
                continue;
            }
        }

        match input.trim() {
            "" => continue,
            "q" => {
                println!("Thanks for playing!");
                break;
            }
            "i" => {
                game.initialize();
                previous_hint = None;
                println!("Puzzle reset.");
            }
            "s" => {
                let steps = game.config().shuffle_steps;
                let applied = game.shuffle(steps);
                println!("Shuffle({}): {}", applied.len(), moves_to_string(&applied));
                previous_hint = None;
            }
            "h" => match game.request_hint(previous_hint) {
                Ok(Some(hint)) => {
                    println!(
                        "Hint: {} (line {}, score {})",
                        hint.mv,
                        moves_to_string(&hint.line),
                        hint.score
                    );
                    if let Err(e) = game.apply_move(hint.mv) {
                        println!("Could not apply hint: {}", e);
                    }
                    previous_hint = Some(hint.mv);
                }
                Ok(None) => println!("None of the next three steps has a better score: {}", score),
                Err(e) => println!("No hint: {}", e),
            },
            "g" => solve(&mut game),
            other => match moves_from_str(other) {
                Ok(moves) => {
                    if let Err(e) = game.apply_moves(&moves) {
                        println!("Invalid move: {}", e);
                    }
                }
                Err(e) => println!("Invalid input: {}. {}", e, HELP),
            },
        }
    }
}

fn solve(game: &mut Game) {
    if let Err(e) = game.request_solve() {
        println!("Cannot solve: {}", e);
        return;
    }
    if game.solve_status().is_none() {
        println!("Already solved.");
        return;
    }

    while let Some(progress) = game.step_solve() {
        match progress {
            SolveProgress::Running(status) => {
                print!(
                    "\rSolving... generation {}, score: {}/{}",
                    status.generation, status.best_score, MAX_SCORE
                );
                io::stdout().flush().unwrap();
            }
            SolveProgress::Finished(outcome) => {
                println!();
                let label = if outcome.solved { "Solved" } else { "Partially solved" };
                println!(
                    "{}: {}/{} with {} moves: {}",
                    label,
                    outcome.score,
                    MAX_SCORE,
                    outcome.moves.len(),
                    moves_to_string(&outcome.moves)
                );
                if !outcome.solved {
                    println!("Hit 'g' to retry.");
                }
                break;
            }
        }
    }
}
