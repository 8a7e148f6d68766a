//! # Reversible Turing Machine Simulation
//!
//! This library simulates a reversible Turing machine: a quintuple
//! transition table is compiled into an equivalent quadruple table whose
//! steps are individually invertible, and a run proceeds in three phases
//! over three tapes:
//!
//! 1. **Forward**: execute the compiled table on the work tape, logging
//!    every intermediate state on the history tape
//! 2. **Copy**: duplicate the computed result onto the output tape
//! 3. **Retrace**: consume the history backward, restoring the work tape
//!    and control state to exactly their starting configuration
//!
//! ## Usage Example
//!
//! ```ignore
//! use bennett::{io, Simulator, SimulationConfig};
//!
//! let program = io::parse_program(&text)?;
//! let simulator = Simulator::new(program.table, SimulationConfig::default());
//! let report = simulator.run(&program.input)?;
//! assert_eq!(report.restored_input, program.input);
//! ```

#![warn(missing_docs, missing_debug_implementations)]
#![allow(clippy::new_without_default)]

pub mod compiler; // Quintuple -> quadruple rule compilation
pub mod exec; // Phase executors and observation hooks
pub mod io; // Table text format parsing and rendering
pub mod machine; // States, symbols, and transition tables
pub mod tape; // Auto-extending tape abstraction

// Re-exports for convenience
pub use exec::{
    run_copy, run_forward, run_retrace, CopyOutcome, ForwardOutcome, NullObserver, Phase,
    RetraceOutcome, SimulationContext, StepObserver, StepSnapshot, TapeView,
};
pub use machine::{
    Action, Direction, QuadrupleTable, QuintupleTable, Quintuple, State, StateId, Symbol,
    TapeRead, BLANK,
};
pub use tape::Tape;

use thiserror::Error;
use tracing::info;

/// Default step bound for the forward and retrace phases
pub const DEFAULT_STEP_BOUND: usize = 1000;

/// Errors that can occur while building a table or running a simulation
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SimulationError {
    /// Malformed table text or transition string
    #[error("parse error: {0}")]
    Parse(String),

    /// Two quintuples share a `(state, symbol)` key
    #[error("duplicate transition key ({state},{symbol})")]
    DuplicateTransitionKey {
        /// The state of the colliding key
        state: String,
        /// The read symbol of the colliding key
        symbol: Symbol,
    },

    /// No rule for the `(state, symbol)` pair encountered at run time
    #[error("no transition defined for ({state},{symbol})")]
    UndefinedTransition {
        /// The state that had no applicable rule
        state: String,
        /// The symbol read (the marker, for move-only lookups)
        symbol: Symbol,
    },

    /// A history cell failed to decode to a known intermediate state
    #[error("invalid intermediate state: {0}")]
    InvalidIntermediateState(String),

    /// The step bound was exceeded, signaling a non-halting table
    #[error("step bound {bound} exceeded in {phase} phase")]
    NonHaltingExceeded {
        /// The phase that exceeded its bound
        phase: Phase,
        /// The configured bound
        bound: usize,
    },
}

/// Configuration parameters for simulation
#[derive(Debug, Clone)]
pub struct SimulationConfig {
    /// Maximum steps per phase before aborting with
    /// [`SimulationError::NonHaltingExceeded`]
    pub step_bound: usize,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            step_bound: DEFAULT_STEP_BOUND,
        }
    }
}

impl SimulationConfig {
    /// Configuration with a custom step bound
    pub fn with_step_bound(step_bound: usize) -> Self {
        Self { step_bound }
    }
}

/// Result of one complete three-phase run
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "visualize", derive(serde::Serialize, serde::Deserialize))]
pub struct SimulationReport {
    /// Output tape content with trailing blanks trimmed
    pub output: String,

    /// Work tape content after retrace (equals the input for a correct
    /// reversible run)
    pub restored_input: String,

    /// Work tape head position after retrace
    pub restored_head: i64,

    /// Final control state after retrace, rendered
    pub final_state: String,

    /// Steps executed by the forward phase
    pub forward_steps: usize,

    /// Cells copied by the copy phase
    pub copy_steps: usize,

    /// Steps undone by the retrace phase
    pub retrace_steps: usize,
}

impl SimulationReport {
    /// Fingerprint of the report, for cheap determinism comparisons
    pub fn fingerprint(&self) -> blake3::Hash {
        let canonical = format!(
            "{}\n{}\n{}\n{}\n{} {} {}",
            self.output,
            self.restored_input,
            self.restored_head,
            self.final_state,
            self.forward_steps,
            self.copy_steps,
            self.retrace_steps
        );
        blake3::hash(canonical.as_bytes())
    }
}

/// Main simulation orchestrator
///
/// Compiles the quintuple table once at construction; each [`Simulator::run`]
/// gets a fresh [`SimulationContext`], so one simulator can serve many runs
/// (or many threads, behind a shared reference).
#[derive(Debug)]
pub struct Simulator {
    compiled: QuadrupleTable,
    config: SimulationConfig,
}

impl Simulator {
    /// Compile the table and create a simulator
    pub fn new(table: QuintupleTable, config: SimulationConfig) -> Self {
        let compiled = compiler::compile(&table);
        info!(
            rules = compiled.len(),
            states = compiled.total_states(),
            "compiled quintuple table"
        );
        Self { compiled, config }
    }

    /// The compiled quadruple table
    pub fn compiled_table(&self) -> &QuadrupleTable {
        &self.compiled
    }

    /// Run the three phases on an input string
    pub fn run(&self, input: &str) -> Result<SimulationReport, SimulationError> {
        self.run_with_observer(input, &mut NullObserver)
    }

    /// Run the three phases, feeding every step to an observer
    pub fn run_with_observer(
        &self,
        input: &str,
        observer: &mut dyn StepObserver,
    ) -> Result<SimulationReport, SimulationError> {
        let table = &self.compiled;
        let mut ctx = SimulationContext::for_input(table, input);

        let forward = run_forward(table, &mut ctx, self.config.step_bound, observer)?;
        let copy = run_copy(table, &mut ctx, forward.halt_head, observer);
        let retrace = run_retrace(table, &mut ctx, &forward, self.config.step_bound, observer)?;

        Ok(SimulationReport {
            output: ctx.output.scan_from_start().into_iter().collect(),
            restored_input: ctx.work.scan_from_start().into_iter().collect(),
            restored_head: ctx.work.head(),
            final_state: table.display_name(ctx.state),
            forward_steps: forward.steps,
            copy_steps: copy.steps,
            retrace_steps: retrace.steps,
        })
    }
}
