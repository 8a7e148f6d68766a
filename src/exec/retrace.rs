//! Retrace phase: consume the history tape backward, undoing every
//! forward step until the work tape and state are restored

use tracing::{debug, info, warn};

use crate::machine::{Action, QuadrupleTable, State, TapeRead, MARKER};
use crate::{Phase, SimulationError};

use super::{ForwardOutcome, SimulationContext, StepObserver, StepSnapshot};

/// Step count reported by the retrace phase
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetraceOutcome {
    /// Forward steps undone
    pub steps: usize,
}

/// Walk the history tape backward, restoring the work tape to its
/// pre-forward content and the state to the initial state.
///
/// Each consumed history cell names the intermediate state of one forward
/// step; the head move is replayed in the opposite direction and the
/// original read symbol is written back, then the cell is cleared. The
/// loop drains the history rather than watching for the initial state: a
/// machine may pass through its initial state mid-run, and stopping there
/// would leave later cells unconsumed and the tape only partially
/// restored. The first logged cell's origin is the initial state, so a
/// drained history always ends in it.
pub fn run_retrace(
    table: &QuadrupleTable,
    ctx: &mut SimulationContext,
    forward: &ForwardOutcome,
    step_bound: usize,
    observer: &mut dyn StepObserver,
) -> Result<RetraceOutcome, SimulationError> {
    ctx.work.set_head(forward.halt_head);
    ctx.history.set_head(forward.history_head - 1);

    let initial = State::Original(table.initial_state());
    let mut steps = 0;

    while ctx.history.head() >= 0 {
        if steps >= step_bound {
            return Err(SimulationError::NonHaltingExceeded {
                phase: Phase::Retrace,
                bound: step_bound,
            });
        }

        let Some((origin, read)) = ctx.history.read() else {
            // History exhausted before the initial state
            break;
        };
        if !table.is_valid_intermediate(origin, read) {
            return Err(SimulationError::InvalidIntermediateState(format!(
                "history cell at {} does not decode against the table",
                ctx.history.head()
            )));
        }

        let intermediate = State::Intermediate { origin, read };
        let rule = table.lookup(intermediate, TapeRead::Marker).ok_or_else(|| {
            SimulationError::UndefinedTransition {
                state: table.display_name(intermediate),
                symbol: MARKER,
            }
        })?;
        let Action::Move(direction) = rule.action else {
            return Err(SimulationError::UndefinedTransition {
                state: table.display_name(intermediate),
                symbol: MARKER,
            });
        };

        // Undo the move, then undo the write at the position it happened
        ctx.work.shift(direction.opposite());
        ctx.work.write(read);
        ctx.state = State::Original(origin);

        // Consume the history cell
        ctx.history.write(None);
        ctx.history.set_head(ctx.history.head() - 1);

        steps += 1;
        debug!(
            phase = %Phase::Retrace,
            step = steps,
            state = %table.display_name(ctx.state),
            work_head = ctx.work.head(),
            "retrace step"
        );
        if observer.wants_steps() {
            observer.on_step(&StepSnapshot::capture(Phase::Retrace, steps, table, ctx));
        }
    }

    if ctx.state != initial {
        warn!(
            state = %table.display_name(ctx.state),
            "history exhausted before reaching the initial state"
        );
    }
    info!(steps, work_head = ctx.work.head(), "retrace phase finished");
    Ok(RetraceOutcome { steps })
}
