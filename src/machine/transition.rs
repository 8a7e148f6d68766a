//! Transition rules in quintuple and quadruple form

use super::{State, StateId, Symbol};

/// Head movement direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Direction {
    /// Move left (decrement position)
    Left,

    /// Move right (increment position)
    Right,
}

impl Direction {
    /// Apply move to a position
    pub fn apply(&self, position: i64) -> i64 {
        match self {
            Direction::Left => position - 1,
            Direction::Right => position + 1,
        }
    }

    /// The inverse direction, used when replaying a step backward
    pub fn opposite(&self) -> Self {
        match self {
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }

    /// Single-letter form used in the table text format
    pub fn letter(&self) -> char {
        match self {
            Direction::Left => 'L',
            Direction::Right => 'R',
        }
    }
}

/// Right-hand side of a quintuple rule `(q, a) -> (q', b, d)`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Quintuple {
    /// Next state `q'`
    pub next: StateId,

    /// Symbol `b` written at the head
    pub write: Symbol,

    /// Head movement `d`
    pub direction: Direction,
}

/// What a quadruple rule reads: a real tape symbol, or the reserved
/// marker meaning "no read, this step only moves the head"
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum TapeRead {
    /// A declared tape symbol
    Symbol(Symbol),

    /// The reserved head-move-only placeholder
    Marker,
}

/// The single effect of a quadruple rule: write or move, never both
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Write a symbol at the head; the head stays put
    Write(Symbol),

    /// Move the head; the tape content stays put
    Move(Direction),
}

/// Right-hand side of a quadruple rule
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Quadruple {
    /// Next state
    pub next: State,

    /// The rule's single effect
    pub action: Action,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn direction_apply_and_opposite() {
        assert_eq!(Direction::Right.apply(0), 1);
        assert_eq!(Direction::Left.apply(0), -1);
        assert_eq!(Direction::Right.opposite(), Direction::Left);
        assert_eq!(Direction::Left.opposite().apply(5), 6);
    }
}
