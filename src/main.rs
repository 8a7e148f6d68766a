use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use bennett::{io, SimulationConfig, Simulator, StepObserver, StepSnapshot, TapeView};

#[derive(Parser, Debug)]
#[command(
    name = "bennett",
    about = "Reversible Turing machine simulator (forward / copy / retrace)"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run the three-phase simulation described by a quintuple table file.
    Run {
        /// Program file: quintuple table plus input string.
        table: PathBuf,
        /// Override the input string from the file's final line.
        #[arg(long)]
        input: Option<String>,
        /// Step bound for the forward and retrace phases.
        #[arg(long, default_value_t = bennett::DEFAULT_STEP_BOUND)]
        steps: usize,
        /// Print the machine configuration after every step.
        #[arg(long)]
        trace: bool,
        /// Also write the compiled quadruple table to this file.
        #[arg(long)]
        emit_quadruples: Option<PathBuf>,
    },
    /// Compile the quintuple table to quadruples and print the result.
    Compile {
        /// Program file: quintuple table plus input string.
        table: PathBuf,
        /// Write the compiled table here instead of stdout.
        #[arg(long)]
        output: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Run {
            table,
            input,
            steps,
            trace,
            emit_quadruples,
        } => run_simulation(table, input, steps, trace, emit_quadruples),
        Commands::Compile { table, output } => run_compile(table, output),
    }
}

fn run_simulation(
    table_path: PathBuf,
    input: Option<String>,
    steps: usize,
    trace: bool,
    emit_quadruples: Option<PathBuf>,
) -> Result<()> {
    let program = load_program(&table_path)?;
    let input = input.unwrap_or(program.input);

    let simulator = Simulator::new(program.table, SimulationConfig::with_step_bound(steps));

    if let Some(path) = emit_quadruples {
        let rendered = io::render_quadruple_table(simulator.compiled_table(), &input);
        std::fs::write(&path, rendered)
            .with_context(|| format!("failed to write quadruple table to {}", path.display()))?;
        println!("compiled quadruple table written to {}", path.display());
    }

    let report = if trace {
        let mut console = ConsoleTrace::default();
        simulator.run_with_observer(&input, &mut console)?
    } else {
        simulator.run(&input)?
    };

    println!("output:   {}", report.output);
    println!(
        "restored: {} (head at {}, state {})",
        report.restored_input, report.restored_head, report.final_state
    );
    println!(
        "steps:    forward={} copy={} retrace={}",
        report.forward_steps, report.copy_steps, report.retrace_steps
    );
    Ok(())
}

fn run_compile(table_path: PathBuf, output: Option<PathBuf>) -> Result<()> {
    let program = load_program(&table_path)?;
    let simulator = Simulator::new(program.table, SimulationConfig::default());
    let rendered = io::render_quadruple_table(simulator.compiled_table(), &program.input);

    match output {
        Some(path) => {
            std::fs::write(&path, rendered).with_context(|| {
                format!("failed to write quadruple table to {}", path.display())
            })?;
            println!("compiled quadruple table written to {}", path.display());
        }
        None => print!("{rendered}"),
    }
    Ok(())
}

fn load_program(path: &PathBuf) -> Result<io::Program> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read table file {}", path.display()))?;
    let program = io::parse_program(&text)
        .with_context(|| format!("failed to parse table file {}", path.display()))?;
    Ok(program)
}

/// Prints a window of each tape around its head after every step, in the
/// style of a hand-stepped machine trace.
#[derive(Debug, Default)]
struct ConsoleTrace;

/// Cells shown on each side of the head.
const WINDOW: i64 = 10;

impl StepObserver for ConsoleTrace {
    fn on_step(&mut self, snapshot: &StepSnapshot) {
        println!(
            "[{} step {}] state {}",
            snapshot.phase, snapshot.step, snapshot.state
        );
        println!("  work:    {}", render_window(&snapshot.work));
        println!("  history: {}", render_window(&snapshot.history));
        println!("  output:  {}", render_window(&snapshot.output));
        println!("{}", "-".repeat(60));
    }
}

fn render_window(view: &TapeView) -> String {
    let head_index = view.head - view.origin;
    let len = view.cells.len() as i64;
    let lo = (head_index - WINDOW).max(0);
    let hi = (head_index + WINDOW + 1).min(len);

    let mut out = String::new();
    if lo > 0 {
        out.push_str("... ");
    }
    for index in lo..hi {
        let cell = &view.cells[index as usize];
        if index == head_index {
            out.push_str(&format!("[{cell}] "));
        } else {
            out.push_str(&format!("{cell} "));
        }
    }
    if head_index < lo || head_index >= hi {
        // Head sits outside the materialized range; show it explicitly
        out.push_str(&format!("(head at {})", view.head));
    }
    if hi < len {
        out.push_str("...");
    }
    out.trim_end().to_string()
}
