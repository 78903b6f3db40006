//! Core puzzle state for the three-ring circles puzzle.
//!
//! This module defines the puzzle's fundamental components:
//! - `Color` and `Token`: the 37 colored pieces.
//! - `TOP_RING`, `LEFT_RING`, `RIGHT_RING`: the ring index tables. Rings share
//!   slots where they intersect, so turning one ring moves tokens its
//!   neighbours also reference.
//! - `Board`: the master token sequence and ring rotation.
//! - `GameState` and `Game`: lifecycle, the single snapshot, and the entry
//!   points the front-ends call (shuffle, hint, genetic solve).
use crate::config::{GeneticConfig, SolverConfig};
use crate::error::PuzzleError;
use crate::genetic::{GeneticSession, SolveStatus};
use crate::heuristics;
use crate::moves::{self, Direction, Move, Ring};
use crate::solver::{self, Hint};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use std::fmt;
use tracing::info;

/// Number of tokens in the puzzle.
pub const TOKEN_COUNT: usize = 37;
/// Number of positions on each ring.
pub const RING_LEN: usize = 18;
/// Positions a token travels for a single notch (18 positions / 6 notches).
pub const NOTCH: usize = 3;

pub const TOP_RING: [usize; RING_LEN] = [0, 1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12, 13, 14, 15, 16, 17];
pub const LEFT_RING: [usize; RING_LEN] = [5, 7, 6, 18, 19, 20, 21, 22, 23, 24, 25, 26, 27, 28, 9, 11, 10, 8];
pub const RIGHT_RING: [usize; RING_LEN] = [14, 13, 11, 8, 10, 9, 26, 28, 27, 29, 30, 31, 32, 33, 34, 35, 36, 12];

impl Ring {
    /// The ring's index table into the master sequence.
    pub fn slots(self) -> &'static [usize; RING_LEN] {
        match self {
            Ring::Top => &TOP_RING,
            Ring::Left => &LEFT_RING,
            Ring::Right => &RIGHT_RING,
        }
    }

    /// Inclusive bounds, in ring positions, of the segment the adjacency
    /// score looks at. The top ring is scored over its full length; the
    /// left span runs into the slots it shares with the right ring.
    pub fn adjacency_span(self) -> (usize, usize) {
        match self {
            Ring::Top => (0, 17),
            Ring::Left => (3, 13),
            Ring::Right => (9, 16),
        }
    }
}

/// Token color. The digit encoding matches the solution templates.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Color {
    One,
    Two,
    Three,
}

impl Color {
    /// # Examples
    ///
    /// ```
    /// use circles_solver::engine::Color;
    /// assert_eq!(Color::Two.to_char(), '2');
    /// ```
    pub fn to_char(self) -> char {
        match self {
            Color::One => '1',
            Color::Two => '2',
            Color::Three => '3',
        }
    }

    pub fn from_char(c: char) -> Option<Color> {
        match c {
            '1' => Some(Color::One),
            '2' => Some(Color::Two),
            '3' => Some(Color::Three),
            _ => None,
        }
    }

    /// Returns the ANSI color code string for terminal output.
    fn to_ansi_color_code(self) -> &'static str {
        match self {
            Color::One => "43",
            Color::Two => "44",
            Color::Three => "41",
        }
    }
}

/// A physical piece. `id` never changes; only its slot does.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Token {
    pub color: Color,
    pub id: u8,
}

/// The master sequence of 37 tokens addressed by slot index.
///
/// Equality compares both colors and token identities; use
/// [`Board::color_string`] to compare colorings only.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Board {
    tokens: [Token; TOKEN_COUNT],
}

impl Board {
    /// Creates the canonical starting arrangement, which is itself solved:
    /// slots 0-17 color one, 18-28 color two, 29-36 color three.
    pub fn new_initial() -> Self {
        let mut tokens = [Token { color: Color::One, id: 0 }; TOKEN_COUNT];
        for (slot, token) in tokens.iter_mut().enumerate() {
            token.id = slot as u8;
            token.color = match slot {
                0..=17 => Color::One,
                18..=28 => Color::Two,
                _ => Color::Three,
            };
        }
        Board { tokens }
    }

    /// Builds a board from per-slot colors. Token ids equal slot indices.
    pub fn from_colors(colors: [Color; TOKEN_COUNT]) -> Self {
        let mut tokens = [Token { color: Color::One, id: 0 }; TOKEN_COUNT];
        for (slot, (token, color)) in tokens.iter_mut().zip(colors).enumerate() {
            *token = Token { color, id: slot as u8 };
        }
        Board { tokens }
    }

    pub fn tokens(&self) -> &[Token; TOKEN_COUNT] {
        &self.tokens
    }

    /// # Panics
    /// Panics if `slot >= TOKEN_COUNT`.
    pub fn color_at(&self, slot: usize) -> Color {
        self.tokens[slot].color
    }

    /// Color of the token at `position` on `ring`.
    pub fn ring_color(&self, ring: Ring, position: usize) -> Color {
        self.tokens[ring.slots()[position]].color
    }

    /// The 37-character digit string in slot order.
    pub fn color_string(&self) -> String {
        self.tokens.iter().map(|t| t.color.to_char()).collect()
    }

    /// Turns one ring by one notch.
    ///
    /// Clockwise: ring position `i` receives the token previously at
    /// `(i + 3) mod 18`. Counter-clockwise is the exact inverse.
    pub fn apply_move(&mut self, mv: Move) {
        let slots = mv.ring().slots();
        let mut ring_tokens = [self.tokens[slots[0]]; RING_LEN];
        for (dst, &slot) in ring_tokens.iter_mut().zip(slots) {
            *dst = self.tokens[slot];
        }
        match mv.direction() {
            Direction::Clockwise => ring_tokens.rotate_left(NOTCH),
            Direction::CounterClockwise => ring_tokens.rotate_right(NOTCH),
        }
        for (&slot, token) in slots.iter().zip(ring_tokens) {
            self.tokens[slot] = token;
        }
    }

    pub fn apply_moves(&mut self, moves: &[Move]) {
        for &mv in moves {
            self.apply_move(mv);
        }
    }

    fn write_segment(&self, out: &mut String, label: &str, ring: Ring) {
        out.push_str(&format!("{:<6}", label));
        for &slot in ring.slots() {
            let code = self.tokens[slot].color.to_ansi_color_code();
            out.push_str(&format!("\x1b[1;{};m{:>2}\x1b[m", code, self.tokens[slot].id));
        }
    }
}

impl Default for Board {
    fn default() -> Self {
        Board::new_initial()
    }
}

impl fmt::Display for Board {
    /// One line per ring, each token drawn as its id on its color.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut output = String::new();
        self.write_segment(&mut output, "top", Ring::Top);
        output.push('\n');
        self.write_segment(&mut output, "left", Ring::Left);
        output.push('\n');
        self.write_segment(&mut output, "right", Ring::Right);
        write!(f, "{}", output)
    }
}

/// Lifecycle of a puzzle session. `Solving` is the only lock: while a
/// solver runs, moves and new searches are refused.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum GameState {
    #[default]
    Uninitialized,
    Initialized,
    Shuffled,
    Solving,
    PartiallySolved,
    Solved,
}

/// Result of a finished genetic solve, already applied to the board.
#[derive(Clone, Debug, PartialEq)]
pub struct SolveOutcome {
    /// Simplified moves applied on top of the snapshot.
    pub moves: Vec<Move>,
    pub score: u32,
    pub solved: bool,
}

/// What [`Game::step_solve`] reports after running one generation.
#[derive(Clone, Debug, PartialEq)]
pub enum SolveProgress {
    Running(SolveStatus),
    Finished(SolveOutcome),
}

/// Owns the one board, the one snapshot, and the one optional solver
/// session of a play session.
///
/// # Examples
/// ```
/// use circles_solver::engine::{Game, GameState};
/// use circles_solver::moves::Move;
///
/// let mut game = Game::with_seed(42);
/// game.initialize();
/// assert!(game.is_solved());
///
/// let applied = game.shuffle(20);
/// assert_eq!(game.state(), GameState::Shuffled);
/// println!("shuffled with {} moves", applied.len());
///
/// game.apply_move(Move::LeftCw).unwrap();
/// if let Some(hint) = game.request_hint(None).unwrap() {
///     println!("try {} for score {}", hint.mv, hint.score);
/// }
/// ```
#[derive(Debug)]
pub struct Game {
    board: Board,
    snapshot: Option<Board>,
    state: GameState,
    config: SolverConfig,
    rng: SmallRng,
    session: Option<GeneticSession>,
    state_before_solve: GameState,
}

impl Game {
    /// Creates an uninitialized game with default configuration and an
    /// entropy-seeded generator. Call [`Game::initialize`] before playing.
    pub fn new() -> Self {
        Self::with_config(SolverConfig::default())
    }

    /// Creates a game whose shuffles and solves are reproducible.
    pub fn with_seed(seed: u64) -> Self {
        Self::with_config(SolverConfig {
            random_seed: Some(seed),
            ..SolverConfig::default()
        })
    }

    pub fn with_config(config: SolverConfig) -> Self {
        let rng = match config.random_seed {
            Some(seed) => SmallRng::seed_from_u64(seed),
            None => SmallRng::from_entropy(),
        };
        Game {
            board: Board::new_initial(),
            snapshot: None,
            state: GameState::Uninitialized,
            config,
            rng,
            session: None,
            state_before_solve: GameState::Uninitialized,
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn state(&self) -> GameState {
        self.state
    }

    pub fn config(&self) -> &SolverConfig {
        &self.config
    }

    pub fn genetic_config_mut(&mut self) -> &mut GeneticConfig {
        &mut self.config.genetic
    }

    /// Resets to the canonical coloring, clears the snapshot, and discards
    /// any running solve.
    pub fn initialize(&mut self) {
        self.discard_session();
        self.board = Board::new_initial();
        self.snapshot = None;
        self.state = GameState::Initialized;
    }

    /// Applies `step_count` random moves after simplification and returns
    /// the moves actually applied. Any running solve is discarded first.
    pub fn shuffle(&mut self, step_count: usize) -> Vec<Move> {
        self.discard_session();
        let random = moves::random_moves(&mut self.rng, step_count);
        let applied = moves::simplify(&random);
        self.board.apply_moves(&applied);
        self.state = GameState::Shuffled;
        info!(
            requested = step_count,
            applied = applied.len(),
            "puzzle shuffled"
        );
        applied
    }

    /// Replaces the board with an externally supplied coloring, as if it
    /// had been shuffled there. Any running solve is discarded first.
    pub fn load(&mut self, board: Board) {
        self.discard_session();
        self.board = board;
        self.state = GameState::Shuffled;
    }

    pub fn save_snapshot(&mut self) {
        self.snapshot = Some(self.board.clone());
    }

    /// Restores the saved snapshot. Does nothing if none was ever saved.
    pub fn restore_snapshot(&mut self) {
        if let Some(snapshot) = &self.snapshot {
            self.board = snapshot.clone();
        }
    }

    pub fn snapshot(&self) -> Option<&Board> {
        self.snapshot.as_ref()
    }

    /// Applies a move issued by the player.
    ///
    /// Returns `Err(PuzzleError::Busy)` while a solver runs. A move that
    /// completes the puzzle from a shuffled or partially solved state moves
    /// the game to `Solved`.
    pub fn apply_move(&mut self, mv: Move) -> Result<(), PuzzleError> {
        self.ensure_idle()?;
        self.board.apply_move(mv);
        if self.board_is_solved()
            && matches!(self.state, GameState::Shuffled | GameState::PartiallySolved)
        {
            self.state = GameState::Solved;
        }
        Ok(())
    }

    pub fn apply_moves(&mut self, moves: &[Move]) -> Result<(), PuzzleError> {
        for &mv in moves {
            self.apply_move(mv)?;
        }
        Ok(())
    }

    /// Direct score of the live board when `moves` is `None`; otherwise the
    /// score the snapshot would have after `moves`. The live board is never
    /// touched by hypothetical scoring.
    pub fn score(&self, moves: Option<&[Move]>) -> Result<u32, PuzzleError> {
        match moves {
            None => Ok(heuristics::score(&self.board)),
            Some(moves) => {
                let baseline = self.snapshot.as_ref().ok_or(PuzzleError::NoSnapshot)?;
                Ok(heuristics::score_hypothetical(baseline, moves))
            }
        }
    }

    pub fn is_solved(&self) -> bool {
        self.board_is_solved()
    }

    fn board_is_solved(&self) -> bool {
        heuristics::is_solved(&self.board)
    }

    /// Looks ahead `hint_depth` levels and proposes the best next move.
    ///
    /// `previous` is the last hint the player was given; its inverse is not
    /// offered as the first move, so consecutive hints do not undo each
    /// other. Returns `Ok(None)` when the puzzle is already solved or no
    /// explored line improves on the current score.
    pub fn request_hint(&mut self, previous: Option<Move>) -> Result<Option<Hint>, PuzzleError> {
        self.ensure_idle()?;
        if self.board_is_solved() {
            return Ok(None);
        }
        self.state = GameState::Solving;
        let current = heuristics::score(&self.board);
        let hint = solver::search_lookahead(
            &mut self.board,
            self.config.hint_depth,
            previous.map(Move::inverse),
            current,
        );
        self.state = GameState::PartiallySolved;
        Ok(hint)
    }

    /// Saves the current board as the snapshot and starts a genetic solve.
    ///
    /// Nothing happens if the board is already solved. Generations are run
    /// one at a time by [`Game::step_solve`].
    pub fn request_solve(&mut self) -> Result<(), PuzzleError> {
        self.ensure_idle()?;
        if self.board_is_solved() {
            return Ok(());
        }
        self.save_snapshot();
        let session = GeneticSession::new(
            self.config.genetic.clone(),
            self.board.clone(),
            SmallRng::seed_from_u64(self.rng.gen()),
        )?;
        self.state_before_solve = self.state;
        self.state = GameState::Solving;
        self.session = Some(session);
        Ok(())
    }

    /// Runs one generation of the active solve.
    ///
    /// Returns `None` when no solve is active. When the session finishes,
    /// the snapshot is restored, the simplified best chromosome is applied,
    /// and the outcome is returned once.
    pub fn step_solve(&mut self) -> Option<SolveProgress> {
        let session = self.session.as_mut()?;
        let status = session.step();
        if !status.done {
            return Some(SolveProgress::Running(status));
        }
        let session = self.session.take()?;
        Some(SolveProgress::Finished(self.finish_solve(session)))
    }

    /// Drives the active solve to completion synchronously.
    pub fn run_solve(&mut self) -> Option<SolveOutcome> {
        loop {
            if let SolveProgress::Finished(outcome) = self.step_solve()? {
                return Some(outcome);
            }
        }
    }

    /// Progress readout of the active solve, if any.
    pub fn solve_status(&self) -> Option<SolveStatus> {
        self.session.as_ref().map(GeneticSession::status)
    }

    /// Discards the active solve and returns to the state it started from.
    pub fn cancel_solve(&mut self) {
        if self.discard_session() {
            info!("genetic solve cancelled");
        }
    }

    fn finish_solve(&mut self, session: GeneticSession) -> SolveOutcome {
        self.restore_snapshot();
        let moves = moves::simplify(session.best());
        self.board.apply_moves(&moves);
        let solved = self.board_is_solved();
        self.state = if solved {
            GameState::Solved
        } else {
            GameState::PartiallySolved
        };
        SolveOutcome {
            moves,
            score: session.best_score(),
            solved,
        }
    }

    fn discard_session(&mut self) -> bool {
        if self.session.take().is_some() {
            self.state = self.state_before_solve;
            true
        } else {
            false
        }
    }

    fn ensure_idle(&self) -> Result<(), PuzzleError> {
        if self.state == GameState::Solving {
            Err(PuzzleError::Busy)
        } else {
            Ok(())
        }
    }
}

impl Default for Game {
    fn default() -> Self {
        Game::new()
    }
}
