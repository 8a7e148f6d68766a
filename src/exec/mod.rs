//! Phase execution: simulation context, step observation, and the
//! forward / copy / retrace executors
//!
//! Each phase is a free function over a mutable [`SimulationContext`] and
//! returns the explicit handoff values the next phase needs; phases never
//! communicate through anything else.

mod copy;
mod forward;
mod retrace;

pub use copy::{run_copy, CopyOutcome};
pub use forward::{run_forward, ForwardOutcome};
pub use retrace::{run_retrace, RetraceOutcome};

use std::fmt;

use crate::machine::{QuadrupleTable, State, StateId, Symbol, BLANK};
use crate::tape::Tape;

/// One cell of the history tape: the identity of the intermediate state
/// that was passed through, or `None` for blank
pub type HistoryCell = Option<(StateId, Symbol)>;

/// The three ordered stages of a simulation run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "visualize", derive(serde::Serialize, serde::Deserialize))]
pub enum Phase {
    /// Compute: run the compiled table to the halting state
    Forward,

    /// Extract: copy the result from the work tape to the output tape
    Copy,

    /// Restore: walk the history backward, undoing every forward step
    Retrace,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Phase::Forward => write!(f, "forward"),
            Phase::Copy => write!(f, "copy"),
            Phase::Retrace => write!(f, "retrace"),
        }
    }
}

/// The mutable state of one simulation run: the three tapes and the
/// current control state
///
/// Exactly one context exists per run; concurrent runs each own their own
/// context and share only the read-only compiled table.
#[derive(Debug, Clone)]
pub struct SimulationContext {
    /// Work tape: holds the input, mutated by forward and retrace
    pub work: Tape<Symbol>,

    /// History tape: appended during forward, consumed during retrace
    pub history: Tape<HistoryCell>,

    /// Output tape: written once during copy
    pub output: Tape<Symbol>,

    /// Current control state
    pub state: State,
}

impl SimulationContext {
    /// Fresh context for an input string: work tape holds the input from
    /// position 0, history and output are empty, state is the initial one
    pub fn for_input(table: &QuadrupleTable, input: &str) -> Self {
        Self {
            work: Tape::with_content(input.chars(), BLANK),
            history: Tape::new(None),
            output: Tape::new(BLANK),
            state: State::Original(table.initial_state()),
        }
    }
}

/// Rendered view of one tape for observation
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "visualize", derive(serde::Serialize, serde::Deserialize))]
pub struct TapeView {
    /// Materialized cells, rendered (history cells render as state names)
    pub cells: Vec<String>,

    /// Tape position of the first rendered cell
    pub origin: i64,

    /// Head position
    pub head: i64,
}

impl TapeView {
    fn of_symbols(tape: &Tape<Symbol>) -> Self {
        Self {
            cells: tape.materialized().iter().map(|c| c.to_string()).collect(),
            origin: tape.origin(),
            head: tape.head(),
        }
    }

    fn of_history(tape: &Tape<HistoryCell>, table: &QuadrupleTable) -> Self {
        Self {
            cells: tape
                .materialized()
                .iter()
                .map(|cell| match cell {
                    None => BLANK.to_string(),
                    Some((origin, read)) => table.display_name(State::Intermediate {
                        origin: *origin,
                        read: *read,
                    }),
                })
                .collect(),
            origin: tape.origin(),
            head: tape.head(),
        }
    }
}

/// Per-step snapshot handed to observers
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "visualize", derive(serde::Serialize, serde::Deserialize))]
pub struct StepSnapshot {
    /// Phase that executed the step
    pub phase: Phase,

    /// Step index within the phase, starting at 1
    pub step: usize,

    /// Current state, rendered
    pub state: String,

    /// Work tape view
    pub work: TapeView,

    /// History tape view
    pub history: TapeView,

    /// Output tape view
    pub output: TapeView,
}

impl StepSnapshot {
    /// Capture the context after a step
    pub fn capture(
        phase: Phase,
        step: usize,
        table: &QuadrupleTable,
        ctx: &SimulationContext,
    ) -> Self {
        Self {
            phase,
            step,
            state: table.display_name(ctx.state),
            work: TapeView::of_symbols(&ctx.work),
            history: TapeView::of_history(&ctx.history, table),
            output: TapeView::of_symbols(&ctx.output),
        }
    }
}

/// Consumer of per-step snapshots
///
/// The executors call [`StepObserver::on_step`] after every step and never
/// depend on what the observer does with it.
pub trait StepObserver {
    /// Whether this observer wants snapshots at all; when false the
    /// executors skip capture entirely, so an unobserved run never pays
    /// for rendering the tapes
    fn wants_steps(&self) -> bool {
        true
    }

    /// Receive the snapshot of the step that just executed
    fn on_step(&mut self, snapshot: &StepSnapshot);
}

/// Observer that requests no snapshots
#[derive(Debug, Default)]
pub struct NullObserver;

impl StepObserver for NullObserver {
    fn wants_steps(&self) -> bool {
        false
    }

    fn on_step(&mut self, _snapshot: &StepSnapshot) {}
}
