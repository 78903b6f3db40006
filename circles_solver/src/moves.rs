//! Move algebra for the three rings.
//!
//! A [`Move`] turns one ring by one notch. This module also provides the
//! sequence-level helpers shared by the shuffler and both solvers:
//! - [`reverse`]: invert every move of a sequence, keeping element order.
//! - [`is_redundant`]: search-space pruning used by the lookahead solver.
//! - [`simplify`]: cancel adjacent mutually-inverse pairs.
use rand::Rng;
use std::fmt;
use tracing::trace;

/// One of the three rotatable rings.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Ring {
    Top,
    Left,
    Right,
}

/// Rotation direction of a single notch.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    Clockwise,
    CounterClockwise,
}

/// A single 60 degree rotation of one ring.
///
/// The character encoding follows the classic notation: uppercase is
/// clockwise, lowercase is counter-clockwise.
///
/// # Examples
///
/// ```
/// use circles_solver::moves::{Direction, Move, Ring};
/// assert_eq!(Move::LeftCcw.to_char(), 'l');
/// assert_eq!(Move::from_char('R'), Some(Move::RightCw));
/// assert_eq!(Move::TopCw.ring(), Ring::Top);
/// assert_eq!(Move::TopCw.inverse().direction(), Direction::CounterClockwise);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Move {
    TopCw,
    TopCcw,
    LeftCw,
    LeftCcw,
    RightCw,
    RightCcw,
}

// Indexed by `Move as usize`.
const MOVE_TABLE: [(Ring, Direction, char); 6] = [
    (Ring::Top, Direction::Clockwise, 'T'),
    (Ring::Top, Direction::CounterClockwise, 't'),
    (Ring::Left, Direction::Clockwise, 'L'),
    (Ring::Left, Direction::CounterClockwise, 'l'),
    (Ring::Right, Direction::Clockwise, 'R'),
    (Ring::Right, Direction::CounterClockwise, 'r'),
];

impl Move {
    /// Every move, in the order the solvers enumerate them.
    pub const ALL: [Move; 6] = [
        Move::TopCw,
        Move::TopCcw,
        Move::LeftCw,
        Move::LeftCcw,
        Move::RightCw,
        Move::RightCcw,
    ];

    pub fn ring(self) -> Ring {
        MOVE_TABLE[self as usize].0
    }

    pub fn direction(self) -> Direction {
        MOVE_TABLE[self as usize].1
    }

    /// Returns the move that exactly undoes `self`.
    pub fn inverse(self) -> Move {
        match self {
            Move::TopCw => Move::TopCcw,
            Move::TopCcw => Move::TopCw,
            Move::LeftCw => Move::LeftCcw,
            Move::LeftCcw => Move::LeftCw,
            Move::RightCw => Move::RightCcw,
            Move::RightCcw => Move::RightCw,
        }
    }

    pub fn to_char(self) -> char {
        MOVE_TABLE[self as usize].2
    }

    pub fn from_char(c: char) -> Option<Move> {
        Move::ALL.into_iter().find(|m| m.to_char() == c)
    }

    /// Draws one of the six moves uniformly at random.
    pub fn random(rng: &mut impl Rng) -> Move {
        Move::ALL[rng.gen_range(0..Move::ALL.len())]
    }

    /// Draws a move uniformly among the five that differ from `self`.
    pub fn random_other(self, rng: &mut impl Rng) -> Move {
        let offset = rng.gen_range(1..Move::ALL.len());
        Move::ALL[(self as usize + offset) % Move::ALL.len()]
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_char())
    }
}

/// Generates `len` uniformly random moves.
pub fn random_moves(rng: &mut impl Rng, len: usize) -> Vec<Move> {
    (0..len).map(|_| Move::random(rng)).collect()
}

/// Returns the inverse of each move of `moves`.
///
/// The element order is preserved, so this is NOT a full undo of a sequence:
/// undoing `moves` requires `reverse` and then playing the result backwards.
///
/// # Examples
/// ```
/// use circles_solver::moves::{reverse, Move};
/// assert_eq!(
///     reverse(&[Move::TopCw, Move::LeftCcw]),
///     vec![Move::TopCcw, Move::LeftCw]
/// );
/// ```
pub fn reverse(moves: &[Move]) -> Vec<Move> {
    moves.iter().map(|m| m.inverse()).collect()
}

/// Checks whether `candidate` is pointless after `prior`.
///
/// A candidate is redundant if it undoes the last prior move, or if the last
/// three prior moves already equal it (a fourth repetition is never explored).
pub fn is_redundant(candidate: Move, prior: &[Move]) -> bool {
    if prior.last() == Some(&candidate.inverse()) {
        return true;
    }
    prior.len() >= 3 && prior[prior.len() - 3..].iter().all(|&m| m == candidate)
}

/// Removes adjacent mutually-inverse pairs from `moves`.
///
/// After a pair is removed the scan steps back one position so that pairs
/// which become adjacent are also cancelled. Non-adjacent cancellations are
/// left alone. The result has the same net effect as the input.
///
/// # Examples
/// ```
/// use circles_solver::moves::simplify;
/// use circles_solver::utils::{moves_from_str, moves_to_string};
///
/// let moves = moves_from_str("LTRrtR").unwrap();
/// assert_eq!(moves_to_string(&simplify(&moves)), "LR");
/// ```
pub fn simplify(moves: &[Move]) -> Vec<Move> {
    let mut result = moves.to_vec();
    let mut i = 1;
    while i < result.len() {
        if result[i - 1] == result[i].inverse() {
            result.drain(i - 1..=i);
            i = i.saturating_sub(1).max(1);
        } else {
            i += 1;
        }
    }
    trace!(
        input = %crate::utils::moves_to_string(moves),
        output = %crate::utils::moves_to_string(&result),
        "simplified move sequence"
    );
    result
}
