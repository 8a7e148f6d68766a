//! Core machine types: symbols, states, and transition tables
//!
//! The machine model is a deterministic single-track Turing machine whose
//! rule set exists in two forms:
//! - quintuple rules `(q, a) -> (q', b, d)`, the conventional shape
//! - quadruple rules, produced by [`crate::compiler`], where every rule
//!   either writes or moves but never both

mod table;
mod transition;

pub use table::{QuadrupleTable, QuintupleTable, RawQuintuple};
pub use transition::{Action, Direction, Quadruple, Quintuple, TapeRead};

/// Tape symbol (element of the declared tape alphabet)
pub type Symbol = char;

/// Index of a declared state in the table's state list
pub type StateId = u32;

/// Blank symbol: the content of every unwritten tape cell
pub const BLANK: Symbol = 'B';

/// Marker symbol as it appears in rendered quadruple tables
///
/// In memory the marker is the [`TapeRead::Marker`] variant and can never
/// collide with a declared symbol; this character only exists in the
/// textual form.
pub const MARKER: Symbol = '/';

/// A machine state, either declared by the input table or synthesized by
/// the quadruple compiler.
///
/// Intermediate states carry the `(origin, read)` pair that produced them,
/// so decoding during retrace is a destructuring, not a string parse, and
/// the identity is deterministic across compilations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum State {
    /// A state declared in the input table, by index
    Original(StateId),

    /// A state synthesized for the half-way point of one quintuple step
    Intermediate {
        /// The declared state the quintuple fired from
        origin: StateId,
        /// The symbol the quintuple read
        read: Symbol,
    },
}

impl State {
    /// The `(origin, read)` tag of an intermediate state, if this is one
    pub fn intermediate_tag(&self) -> Option<(StateId, Symbol)> {
        match *self {
            State::Original(_) => None,
            State::Intermediate { origin, read } => Some((origin, read)),
        }
    }

    /// Whether this is a declared (non-synthesized) state
    pub fn is_original(&self) -> bool {
        matches!(self, State::Original(_))
    }
}
