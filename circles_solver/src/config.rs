//! Solver configuration.
//!
//! Every field has a default, so a TOML file only needs the values it
//! changes:
//!
//! ```
//! use circles_solver::config::SolverConfig;
//!
//! let config = SolverConfig::from_toml_str(r#"
//!     random_seed = 7
//!
//!     [genetic]
//!     population_size = 2000
//!     generations = 50
//! "#).unwrap();
//!
//! assert_eq!(config.random_seed, Some(7));
//! assert_eq!(config.shuffle_steps, 50);
//! assert_eq!(config.genetic.population_size, 2000);
//! assert_eq!(config.genetic.tournament_size, 3);
//! ```
//!
//! Use the defaults when the file is missing:
//!
//! ```
//! use circles_solver::config::SolverConfig;
//!
//! let config = SolverConfig::load("circles.toml").unwrap_or_default();
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::solver::DEFAULT_HINT_DEPTH;

/// Top-level configuration for a play session.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default, rename_all = "snake_case")]
pub struct SolverConfig {
    /// Random seed for reproducible shuffles and solves.
    pub random_seed: Option<u64>,

    /// Random moves generated per shuffle, before simplification.
    pub shuffle_steps: usize,

    /// Maximum recursion depth of the hint search.
    pub hint_depth: usize,

    pub genetic: GeneticConfig,
}

impl Default for SolverConfig {
    fn default() -> Self {
        SolverConfig {
            random_seed: None,
            shuffle_steps: 50,
            hint_depth: DEFAULT_HINT_DEPTH,
            genetic: GeneticConfig::default(),
        }
    }
}

impl SolverConfig {
    /// Loads configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns error if file doesn't exist, contains invalid TOML, or holds
    /// an invalid genetic configuration.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    /// Parses and validates configuration from a TOML string.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let config: SolverConfig = toml::from_str(s)?;
        config.genetic.validate()?;
        Ok(config)
    }
}

/// Parameters of the genetic solver.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default, rename_all = "snake_case")]
pub struct GeneticConfig {
    /// Chromosomes per generation. Must be even.
    pub population_size: usize,

    /// Generation budget, counting the initial population.
    pub generations: usize,

    /// Probability that a parent pair is recombined.
    pub crossover_rate: f64,

    /// Per-gene mutation probability.
    pub mutation_rate: f64,

    /// Candidates drawn per tournament selection.
    pub tournament_size: usize,

    /// Moves per chromosome.
    pub chromosome_length: usize,
}

impl Default for GeneticConfig {
    fn default() -> Self {
        GeneticConfig {
            population_size: 10000,
            generations: 200,
            crossover_rate: 0.9,
            mutation_rate: 0.01,
            tournament_size: 3,
            chromosome_length: 50,
        }
    }
}

impl GeneticConfig {
    /// Rejects parameter combinations the algorithm cannot run with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.population_size % 2 != 0 {
            return Err(ConfigError::Invalid(format!(
                "population_size must be even, got {}",
                self.population_size
            )));
        }
        if self.tournament_size == 0 {
            return Err(ConfigError::Invalid(
                "tournament_size must be at least 1".to_string(),
            ));
        }
        if self.population_size < self.tournament_size {
            return Err(ConfigError::Invalid(format!(
                "population_size ({}) must be at least tournament_size ({})",
                self.population_size, self.tournament_size
            )));
        }
        if self.chromosome_length < 3 {
            return Err(ConfigError::Invalid(format!(
                "chromosome_length must be at least 3, got {}",
                self.chromosome_length
            )));
        }
        if self.generations == 0 {
            return Err(ConfigError::Invalid(
                "generations must be at least 1".to_string(),
            ));
        }
        for (name, rate) in [
            ("crossover_rate", self.crossover_rate),
            ("mutation_rate", self.mutation_rate),
        ] {
            if !(0.0..=1.0).contains(&rate) {
                return Err(ConfigError::Invalid(format!(
                    "{} must be within [0, 1], got {}",
                    name, rate
                )));
            }
        }
        Ok(())
    }
}
