//! Forward phase: run the compiled table from the initial state to the
//! halting state, logging every intermediate state on the history tape

use tracing::{debug, info};

use crate::machine::{Action, Direction, QuadrupleTable, State, TapeRead, MARKER};
use crate::{Phase, SimulationError};

use super::{SimulationContext, StepObserver, StepSnapshot};

/// Handoff values reported by a successful forward phase
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ForwardOutcome {
    /// Work-tape head position at the halting state
    pub halt_head: i64,

    /// History-tape head position after the last append (one past the
    /// last written cell)
    pub history_head: i64,

    /// Quadruple steps executed
    pub steps: usize,
}

/// Run the forward phase to the halting state.
///
/// Original states perform the write half of a quintuple step; the
/// intermediate state they hand over to performs the move half and leaves
/// its identity on the history tape.
pub fn run_forward(
    table: &QuadrupleTable,
    ctx: &mut SimulationContext,
    step_bound: usize,
    observer: &mut dyn StepObserver,
) -> Result<ForwardOutcome, SimulationError> {
    let halting = State::Original(table.halting_state());
    let mut steps = 0;

    while ctx.state != halting {
        if steps >= step_bound {
            return Err(SimulationError::NonHaltingExceeded {
                phase: Phase::Forward,
                bound: step_bound,
            });
        }

        match ctx.state {
            State::Original(_) => {
                let symbol = ctx.work.read();
                let rule = table
                    .lookup(ctx.state, TapeRead::Symbol(symbol))
                    .ok_or_else(|| SimulationError::UndefinedTransition {
                        state: table.display_name(ctx.state),
                        symbol,
                    })?;
                match rule.action {
                    Action::Write(write) => {
                        // Write half: the head does not move yet
                        ctx.work.write(write);
                        ctx.state = rule.next;
                    }
                    Action::Move(_) => {
                        return Err(SimulationError::UndefinedTransition {
                            state: table.display_name(ctx.state),
                            symbol,
                        });
                    }
                }
            }
            State::Intermediate { origin, read } => {
                let rule = table.lookup(ctx.state, TapeRead::Marker).ok_or_else(|| {
                    SimulationError::UndefinedTransition {
                        state: table.display_name(ctx.state),
                        symbol: MARKER,
                    }
                })?;
                match rule.action {
                    Action::Move(direction) => {
                        // Move half: log the identity, then move
                        ctx.history.write(Some((origin, read)));
                        ctx.history.shift(Direction::Right);
                        ctx.work.shift(direction);
                        ctx.state = rule.next;
                    }
                    Action::Write(_) => {
                        return Err(SimulationError::UndefinedTransition {
                            state: table.display_name(ctx.state),
                            symbol: MARKER,
                        });
                    }
                }
            }
        }

        steps += 1;
        debug!(
            phase = %Phase::Forward,
            step = steps,
            state = %table.display_name(ctx.state),
            work_head = ctx.work.head(),
            "forward step"
        );
        if observer.wants_steps() {
            observer.on_step(&StepSnapshot::capture(Phase::Forward, steps, table, ctx));
        }
    }

    let outcome = ForwardOutcome {
        halt_head: ctx.work.head(),
        history_head: ctx.history.head(),
        steps,
    };
    info!(
        steps = outcome.steps,
        halt_head = outcome.halt_head,
        history_head = outcome.history_head,
        "forward phase halted"
    );
    Ok(outcome)
}
