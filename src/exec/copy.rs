//! Copy phase: duplicate the computed result onto the output tape

use tracing::info;

use crate::machine::{Direction, QuadrupleTable};
use crate::Phase;

use super::{SimulationContext, StepObserver, StepSnapshot};

/// Step count reported by the copy phase
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CopyOutcome {
    /// Cells copied (one step per cell)
    pub steps: usize,
}

/// Copy the work tape from its start to the first blank cell onto the
/// output tape, symbol for symbol.
///
/// Both heads are reset to position 0 first; on completion the output
/// head is placed at the forward phase's reported halt position, which
/// for a well-formed run coincides with the copy boundary. The history
/// tape is untouched.
pub fn run_copy(
    table: &QuadrupleTable,
    ctx: &mut SimulationContext,
    halt_head: i64,
    observer: &mut dyn StepObserver,
) -> CopyOutcome {
    ctx.work.set_head(0);
    ctx.output.set_head(0);

    let mut steps = 0;
    loop {
        let symbol = ctx.work.read();
        if symbol == *ctx.work.blank() {
            break;
        }
        ctx.output.write(symbol);
        ctx.work.shift(Direction::Right);
        ctx.output.shift(Direction::Right);

        steps += 1;
        if observer.wants_steps() {
            observer.on_step(&StepSnapshot::capture(Phase::Copy, steps, table, ctx));
        }
    }

    ctx.output.set_head(halt_head);
    info!(steps, output_head = halt_head, "copy phase finished");
    CopyOutcome { steps }
}
