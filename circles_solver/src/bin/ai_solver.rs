use circles_solver::config::SolverConfig;
use circles_solver::engine::{Game, SolveProgress};
use circles_solver::error::PuzzleError;
use circles_solver::heuristics::MAX_SCORE;
use circles_solver::utils::{board_from_color_str, moves_to_string};
use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{error, info};

#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
struct Args {
    /// TOML file with solver settings; defaults apply when omitted
    #[clap(short, long)]
    config: Option<PathBuf>,

    /// Seed for reproducible shuffles and solves
    #[clap(long)]
    seed: Option<u64>,

    /// Random moves used to shuffle the puzzle
    #[clap(short, long)]
    steps: Option<usize>,

    /// Start from this 37-character coloring (digits 1-3) instead of shuffling
    #[clap(long)]
    colors: Option<String>,

    /// Override the genetic population size
    #[clap(short, long)]
    population: Option<usize>,

    /// Override the genetic generation budget
    #[clap(short, long)]
    generations: Option<usize>,
}

fn build_config(args: &Args) -> Result<SolverConfig, PuzzleError> {
    let mut config = match &args.config {
        Some(path) => SolverConfig::load(path)?,
        None => SolverConfig::default(),
    };
    if let Some(seed) = args.seed {
        config.random_seed = Some(seed);
    }
    if let Some(steps) = args.steps {
        config.shuffle_steps = steps;
    }
    if let Some(population) = args.population {
        config.genetic.population_size = population;
    }
    if let Some(generations) = args.generations {
        config.genetic.generations = generations;
    }
    config.genetic.validate()?;
    Ok(config)
}

fn run(args: &Args) -> Result<(), PuzzleError> {
    let config = build_config(args)?;
    let mut game = Game::with_config(config);
    game.initialize();

    match &args.colors {
        Some(colors) => {
            game.load(board_from_color_str(colors)?);
            println!("Loaded coloring {}\n", colors);
        }
        None => {
            let steps = game.config().shuffle_steps;
            let applied = game.shuffle(steps);
            println!("Shuffle({}): {}\n", applied.len(), moves_to_string(&applied));
        }
    }
    println!("Initial board state:\n{}\n", game.board());
    println!("Initial score: {}/{}\n", game.score(None)?, MAX_SCORE);

    if game.is_solved() {
        println!("Puzzle is already solved.");
        return Ok(());
    }

    game.request_solve()?;
    while let Some(progress) = game.step_solve() {
        match progress {
            SolveProgress::Running(status) => {
                info!(
                    generation = status.generation,
                    best_score = status.best_score,
                    "solving"
                );
            }
            SolveProgress::Finished(outcome) => {
                let label = if outcome.solved { "Solved" } else { "Partially solved" };
                println!("{}: {}/{}\n", label, outcome.score, MAX_SCORE);
                println!("Moves ({}): {}\n", outcome.moves.len(), moves_to_string(&outcome.moves));
                println!("Final board state:\n{}\n", game.board());
            }
        }
    }
    Ok(())
}

fn main() -> ExitCode {
    circles_solver::logging::init();
    let args = Args::parse();

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            ExitCode::FAILURE
        }
    }
}
