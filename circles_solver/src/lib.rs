//! # Circles Solver Library
//!
//! This library provides the core logic of a three-ring twisty puzzle: 37
//! colored tokens on three interlocking rings that share tokens where they
//! cross. It also provides two automated solvers, a depth-bounded lookahead
//! that proposes hints and a genetic algorithm that attempts a full solve.
//!
//! It is used by three binaries:
//! - `human_player`: Interactive play with hints and solving from the command line.
//! - `ai_solver`: Shuffles a puzzle (or loads one) and runs the genetic solver.
//! - `heuristic_evaluator`: Compares hint strategies over seeded shuffles.
//!
//! ## Modules
//! - `moves`: The six ring moves and sequence helpers (`reverse`, `is_redundant`, `simplify`).
//! - `engine`: Tokens, ring tables, the `Board`, and the `Game` session (snapshot, shuffle,
//!   hint and solve entry points, `GameState` gating).
//! - `heuristics`: Template matching and ring adjacency scoring.
//! - `solver`: The lookahead hint search.
//! - `genetic`: The genetic solver session, stepped one generation at a time.
//! - `config`: Solver configuration, loadable from TOML.
//! - `error`: Error types.
//! - `utils`: Parsing of move strings and color strings.
//! - `logging`: Tracing subscriber setup for the binaries.

pub mod config;
pub mod engine;
pub mod error;
pub mod genetic;
pub mod heuristics;
pub mod logging;
pub mod moves;
pub mod solver;
pub mod utils;
