//! Generational genetic solver.
//!
//! A chromosome is a fixed-length move sequence, scored by applying it to the
//! session's baseline board. All algorithm state lives in a
//! [`GeneticSession`]; one call to [`GeneticSession::step`] runs one
//! generation and never yields midway, so any host scheduler (idle callback,
//! timer, or a plain loop) can drive it.
//!
//! ```
//! use circles_solver::config::GeneticConfig;
//! use circles_solver::engine::Board;
//! use circles_solver::genetic::GeneticSession;
//! use circles_solver::moves::Move;
//! use rand::rngs::SmallRng;
//! use rand::SeedableRng;
//!
//! let mut shuffled = Board::new_initial();
//! shuffled.apply_move(Move::RightCw);
//!
//! let config = GeneticConfig { population_size: 100, generations: 10, ..Default::default() };
//! let mut session = GeneticSession::new(config, shuffled, SmallRng::seed_from_u64(1)).unwrap();
//! while !session.step().done {}
//! println!("best {} after {} generations", session.best_score(), session.generation());
//! ```
use crate::config::GeneticConfig;
use crate::engine::Board;
use crate::error::ConfigError;
use crate::heuristics::{self, MAX_SCORE};
use crate::moves::{random_moves, Move};
use crate::utils::moves_to_string;
use rand::rngs::SmallRng;
use rand::Rng;
use tracing::{debug, info};

/// Progress readout of a session.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SolveStatus {
    /// Index of the most recently evaluated generation.
    pub generation: usize,
    pub best_score: u32,
    pub done: bool,
}

/// One genetic solve over a fixed baseline board.
///
/// The best chromosome is remembered even after it leaves the population.
#[derive(Debug, Clone)]
pub struct GeneticSession {
    config: GeneticConfig,
    baseline: Board,
    population: Vec<Vec<Move>>,
    scores: Vec<u32>,
    best: Vec<Move>,
    best_score: u32,
    generation: usize,
    done: bool,
    rng: SmallRng,
}

impl GeneticSession {
    /// Starts a session with a random initial population and evaluates it
    /// as generation 0.
    pub fn new(config: GeneticConfig, baseline: Board, mut rng: SmallRng) -> Result<Self, ConfigError> {
        config.validate()?;
        let population = (0..config.population_size)
            .map(|_| random_moves(&mut rng, config.chromosome_length))
            .collect();
        Self::with_population(config, baseline, population, rng)
    }

    /// Starts a session from a caller-supplied initial population.
    ///
    /// The population must hold exactly `population_size` chromosomes of
    /// `chromosome_length` moves each.
    pub fn with_population(
        config: GeneticConfig,
        baseline: Board,
        population: Vec<Vec<Move>>,
        rng: SmallRng,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        if population.len() != config.population_size {
            return Err(ConfigError::Invalid(format!(
                "population holds {} chromosomes, expected {}",
                population.len(),
                config.population_size
            )));
        }
        if let Some(bad) = population.iter().find(|c| c.len() != config.chromosome_length) {
            return Err(ConfigError::Invalid(format!(
                "chromosome has {} moves, expected {}",
                bad.len(),
                config.chromosome_length
            )));
        }

        info!(
            population = config.population_size,
            generations = config.generations,
            "genetic solve started"
        );
        let mut session = GeneticSession {
            scores: Vec::with_capacity(population.len()),
            best: Vec::new(),
            best_score: 0,
            generation: 0,
            done: false,
            config,
            baseline,
            population,
            rng,
        };
        session.evaluate();
        Ok(session)
    }

    /// Breeds and evaluates the next generation.
    ///
    /// Does nothing once the session is done.
    pub fn step(&mut self) -> SolveStatus {
        if self.done {
            return self.status();
        }

        let n = self.population.len();
        let selected: Vec<usize> = (0..n)
            .map(|_| tournament_select(&self.scores, self.config.tournament_size, &mut self.rng))
            .collect();

        let mut children = Vec::with_capacity(n);
        for pair in selected.chunks_exact(2) {
            let (mut c1, mut c2) = crossover(
                &self.population[pair[0]],
                &self.population[pair[1]],
                self.config.crossover_rate,
                &mut self.rng,
            );
            mutate(&mut c1, self.config.mutation_rate, &mut self.rng);
            mutate(&mut c2, self.config.mutation_rate, &mut self.rng);
            children.push(c1);
            children.push(c2);
        }

        self.population = children;
        self.generation += 1;
        self.evaluate();
        self.status()
    }

    /// Steps until done and returns the final status.
    pub fn run(&mut self) -> SolveStatus {
        loop {
            let status = self.step();
            if status.done {
                return status;
            }
        }
    }

    pub fn status(&self) -> SolveStatus {
        SolveStatus {
            generation: self.generation,
            best_score: self.best_score,
            done: self.done,
        }
    }

    /// Best chromosome seen in any generation so far.
    pub fn best(&self) -> &[Move] {
        &self.best
    }

    pub fn best_score(&self) -> u32 {
        self.best_score
    }

    pub fn generation(&self) -> usize {
        self.generation
    }

    pub fn is_done(&self) -> bool {
        self.done
    }

    pub fn baseline(&self) -> &Board {
        &self.baseline
    }

    pub fn population(&self) -> &[Vec<Move>] {
        &self.population
    }

    fn evaluate(&mut self) {
        self.scores.clear();
        for chromosome in &self.population {
            let score = heuristics::score_hypothetical(&self.baseline, chromosome);
            self.scores.push(score);
            if score > self.best_score {
                self.best_score = score;
                self.best = chromosome.clone();
                debug!(
                    generation = self.generation,
                    score,
                    chromosome = %moves_to_string(chromosome),
                    "new best"
                );
            }
        }

        if self.best_score >= MAX_SCORE || self.generation + 1 >= self.config.generations {
            self.done = true;
            info!(
                generation = self.generation,
                best_score = self.best_score,
                solved = self.best_score >= MAX_SCORE,
                "genetic solve finished"
            );
        }
    }
}

/// Tournament selection: draws `k` indices uniformly and returns the one
/// with the highest score, keeping the earliest draw on ties.
pub fn tournament_select(scores: &[u32], k: usize, rng: &mut impl Rng) -> usize {
    let mut winner = rng.gen_range(0..scores.len());
    for _ in 1..k {
        let candidate = rng.gen_range(0..scores.len());
        if scores[candidate] > scores[winner] {
            winner = candidate;
        }
    }
    winner
}

/// Single-point crossover with probability `rate`; otherwise the children
/// are copies of the parents.
///
/// The cut is never at the first position or within the last two.
pub fn crossover(p1: &[Move], p2: &[Move], rate: f64, rng: &mut impl Rng) -> (Vec<Move>, Vec<Move>) {
    if !rng.gen_bool(rate) {
        return (p1.to_vec(), p2.to_vec());
    }
    let cut = rng.gen_range(1..p1.len().saturating_sub(2).max(2));
    let c1 = p1[..cut].iter().chain(&p2[cut..]).copied().collect();
    let c2 = p2[..cut].iter().chain(&p1[cut..]).copied().collect();
    (c1, c2)
}

/// Replaces each gene, with probability `rate`, by a different move.
pub fn mutate(chromosome: &mut [Move], rate: f64, rng: &mut impl Rng) {
    for gene in chromosome.iter_mut() {
        if rng.gen_bool(rate) {
            *gene = gene.random_other(rng);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    fn small_config() -> GeneticConfig {
        GeneticConfig {
            population_size: 60,
            generations: 8,
            ..Default::default()
        }
    }

    /// 50 moves whose net effect is nothing: eight full turns of the top ring plus `Tt`.
    fn no_op_chromosome() -> Vec<Move> {
        let mut moves = vec![Move::TopCw; 48];
        moves.push(Move::TopCw);
        moves.push(Move::TopCcw);
        moves
    }

    #[test]
    fn test_tournament_prefers_higher_scores() {
        let mut rng = SmallRng::seed_from_u64(4);
        let scores = [3, 3, 3, 70];
        let picks = (0..2000)
            .filter(|_| tournament_select(&scores, 3, &mut rng) == 3)
            .count();
        // P(best in a 3-draw tournament over 4) = 1 - (3/4)^3 ~= 0.58
        assert!(picks > 1000 && picks < 1300, "picked best {} times", picks);
    }

    #[test]
    fn test_tournament_of_one_is_uniform_index() {
        let mut rng = SmallRng::seed_from_u64(4);
        let scores = [1, 2, 3];
        for _ in 0..100 {
            assert!(tournament_select(&scores, 1, &mut rng) < 3);
        }
    }

    #[test]
    fn test_crossover_swaps_tails() {
        let mut rng = SmallRng::seed_from_u64(9);
        let p1 = vec![Move::TopCw; 10];
        let p2 = vec![Move::LeftCw; 10];
        for _ in 0..50 {
            let (c1, c2) = crossover(&p1, &p2, 1.0, &mut rng);
            assert_eq!(c1.len(), 10);
            let cut = c1.iter().position(|&m| m == Move::LeftCw).unwrap();
            assert!((1..8).contains(&cut), "cut at {}", cut);
            assert!(c1[cut..].iter().all(|&m| m == Move::LeftCw));
            assert!(c2[..cut].iter().all(|&m| m == Move::LeftCw));
            assert!(c2[cut..].iter().all(|&m| m == Move::TopCw));
        }
    }

    #[test]
    fn test_crossover_rate_zero_copies_parents() {
        let mut rng = SmallRng::seed_from_u64(9);
        let p1 = vec![Move::TopCw; 5];
        let p2 = vec![Move::RightCcw; 5];
        let (c1, c2) = crossover(&p1, &p2, 0.0, &mut rng);
        assert_eq!(c1, p1);
        assert_eq!(c2, p2);
    }

    #[test]
    fn test_crossover_shortest_chromosome() {
        let mut rng = SmallRng::seed_from_u64(9);
        let p1 = vec![Move::TopCw; 3];
        let p2 = vec![Move::LeftCw; 3];
        let (c1, _) = crossover(&p1, &p2, 1.0, &mut rng);
        assert_eq!(c1, vec![Move::TopCw, Move::LeftCw, Move::LeftCw]);
    }

    #[test]
    fn test_mutate_changes_every_gene_at_full_rate() {
        let mut rng = SmallRng::seed_from_u64(12);
        let original = vec![Move::RightCw; 30];
        let mut chromosome = original.clone();
        mutate(&mut chromosome, 1.0, &mut rng);
        assert!(chromosome.iter().zip(&original).all(|(a, b)| a != b));

        let mut untouched = original.clone();
        mutate(&mut untouched, 0.0, &mut rng);
        assert_eq!(untouched, original);
    }

    #[test]
    fn test_new_rejects_invalid_config() {
        let baseline = Board::new_initial();
        let odd = GeneticConfig { population_size: 9, ..small_config() };
        assert!(GeneticSession::new(odd, baseline.clone(), SmallRng::seed_from_u64(0)).is_err());
        let short = GeneticConfig { chromosome_length: 2, ..small_config() };
        assert!(GeneticSession::new(short, baseline, SmallRng::seed_from_u64(0)).is_err());
    }

    #[test]
    fn test_with_population_checks_shape() {
        let config = GeneticConfig { population_size: 2, tournament_size: 2, ..small_config() };
        let baseline = Board::new_initial();
        let wrong_count = vec![no_op_chromosome()];
        assert!(GeneticSession::with_population(
            config.clone(),
            baseline.clone(),
            wrong_count,
            SmallRng::seed_from_u64(0)
        )
        .is_err());
        let wrong_len = vec![no_op_chromosome(), vec![Move::TopCw; 3]];
        assert!(GeneticSession::with_population(config, baseline, wrong_len, SmallRng::seed_from_u64(0)).is_err());
    }

    #[test]
    fn test_solved_snapshot_finishes_at_generation_zero() {
        let config = GeneticConfig { population_size: 4, ..small_config() };
        let mut rng = SmallRng::seed_from_u64(5);
        let mut population = vec![no_op_chromosome()];
        population.extend((0..3).map(|_| random_moves(&mut rng, 50)));

        let mut session =
            GeneticSession::with_population(config, Board::new_initial(), population, rng).unwrap();
        assert!(session.is_done());
        assert_eq!(session.generation(), 0);
        assert_eq!(session.best_score(), MAX_SCORE);

        let status = session.step();
        assert_eq!(status, SolveStatus { generation: 0, best_score: MAX_SCORE, done: true });
    }

    #[test]
    fn test_generation_budget_stops_session() {
        let mut baseline = Board::new_initial();
        baseline.apply_moves(&[Move::LeftCw, Move::RightCw, Move::LeftCw]);
        let config = GeneticConfig { population_size: 20, generations: 3, ..Default::default() };
        let mut session = GeneticSession::new(config, baseline, SmallRng::seed_from_u64(77)).unwrap();

        let mut last = session.status();
        let mut steps = 0;
        while !last.done {
            let status = session.step();
            assert!(status.best_score >= last.best_score, "best score must never drop");
            last = status;
            steps += 1;
        }
        assert!(steps <= 2);
        assert!(last.generation <= 2);
        assert_eq!(session.population().len(), 20);
        assert!(session.population().iter().all(|c| c.len() == 50));
        assert_eq!(
            heuristics::score_hypothetical(session.baseline(), session.best()),
            session.best_score()
        );
    }

    #[test]
    fn test_run_reports_consistent_best() {
        let mut baseline = Board::new_initial();
        baseline.apply_move(Move::RightCw);
        let mut session = GeneticSession::new(small_config(), baseline, SmallRng::seed_from_u64(3)).unwrap();
        let status = session.run();
        assert!(status.done);
        assert!(status.generation < 8);
        assert_eq!(session.best().len(), 50);
        assert_eq!(
            heuristics::score_hypothetical(session.baseline(), session.best()),
            status.best_score
        );
        if status.best_score < MAX_SCORE {
            assert_eq!(status.generation, 7);
        }
    }
}
