//! Line-oriented table text format: parsing and rendering
//!
//! The format (shared by the quintuple input and the rendered quadruple
//! output) is:
//!
//! ```text
//! <states> <input-symbols> <tape-symbols> <transitions>
//! <state names, first = initial, last = halting>
//! <input alphabet>
//! <tape alphabet>
//! (state,symbol)=(next,write,direction)   × transitions
//! <input string>
//! ```
//!
//! These are pure string functions; reading and writing files is the
//! caller's concern.

use crate::machine::{
    Action, Direction, QuadrupleTable, QuintupleTable, RawQuintuple, Symbol, TapeRead, MARKER,
};
use crate::SimulationError;

/// A parsed program: the validated quintuple table plus the input string
/// from the file's final line
#[derive(Debug, Clone)]
pub struct Program {
    /// The validated transition table
    pub table: QuintupleTable,

    /// The input string to run the machine on
    pub input: String,
}

/// Parse the complete line-oriented program text.
pub fn parse_program(text: &str) -> Result<Program, SimulationError> {
    let lines: Vec<&str> = text
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect();

    if lines.len() < 4 {
        return Err(SimulationError::Parse(format!(
            "expected at least 4 header lines, found {}",
            lines.len()
        )));
    }

    let header: Vec<usize> = lines[0]
        .split_whitespace()
        .map(|field| {
            field.parse().map_err(|_| {
                SimulationError::Parse(format!("header field '{field}' is not an integer"))
            })
        })
        .collect::<Result<_, _>>()?;
    let [num_states, num_input, num_tape, num_transitions] = header[..] else {
        return Err(SimulationError::Parse(format!(
            "header must have four integers, found {}",
            header.len()
        )));
    };

    let states: Vec<String> = lines[1].split_whitespace().map(String::from).collect();
    let input_alphabet = parse_alphabet(lines[2])?;
    let tape_alphabet = parse_alphabet(lines[3])?;

    check_count("state", states.len(), num_states)?;
    check_count("input symbol", input_alphabet.len(), num_input)?;
    check_count("tape symbol", tape_alphabet.len(), num_tape)?;

    let transition_lines = lines.get(4..4 + num_transitions).ok_or_else(|| {
        SimulationError::Parse(format!(
            "expected {num_transitions} transition lines, found {}",
            lines.len().saturating_sub(4)
        ))
    })?;
    let rules = transition_lines
        .iter()
        .map(|line| parse_quintuple(line))
        .collect::<Result<Vec<_>, _>>()?;

    let input = lines
        .get(4 + num_transitions)
        .map(|line| line.to_string())
        .unwrap_or_default();

    let table = QuintupleTable::new(states, input_alphabet, tape_alphabet, rules)?;
    Ok(Program { table, input })
}

/// Parse one quintuple transition line of the form
/// `(state,symbol)=(next,write,direction)`.
pub fn parse_quintuple(line: &str) -> Result<RawQuintuple, SimulationError> {
    let malformed = || SimulationError::Parse(format!("malformed transition '{line}'"));

    let (lhs, rhs) = line.split_once('=').ok_or_else(malformed)?;
    let lhs = strip_parens(lhs).ok_or_else(malformed)?;
    let rhs = strip_parens(rhs).ok_or_else(malformed)?;

    let left: Vec<&str> = lhs.split(',').map(str::trim).collect();
    let right: Vec<&str> = rhs.split(',').map(str::trim).collect();
    if left.len() + right.len() != 5 || left.len() != 2 {
        return Err(SimulationError::Parse(format!(
            "transition '{line}' must have exactly five components"
        )));
    }

    Ok(RawQuintuple {
        state: left[0].to_string(),
        read: parse_symbol(left[1])?,
        next: right[0].to_string(),
        write: parse_symbol(right[1])?,
        direction: parse_direction(right[2])?,
    })
}

/// Render a compiled quadruple table in the shared text shape: the state
/// count includes synthesized intermediates, the tape alphabet gains the
/// marker, and rules are listed in sorted order.
pub fn render_quadruple_table(table: &QuadrupleTable, input: &str) -> String {
    let mut rules: Vec<(String, char, String, char)> = table
        .rules()
        .map(|((state, read), rule)| {
            let read = match read {
                TapeRead::Symbol(symbol) => *symbol,
                TapeRead::Marker => MARKER,
            };
            let action = match rule.action {
                Action::Write(symbol) => symbol,
                Action::Move(direction) => direction.letter(),
            };
            (
                table.display_name(*state),
                read,
                table.display_name(rule.next),
                action,
            )
        })
        .collect();
    rules.sort();

    let mut names: Vec<String> = table
        .rules()
        .map(|((state, _), _)| table.display_name(*state))
        .chain(table.states().iter().cloned())
        .collect();
    names.sort();
    names.dedup();

    let mut out = String::new();
    out.push_str(&format!(
        "{} {} {} {}\n",
        table.total_states(),
        table.input_alphabet().len(),
        table.tape_alphabet().len() + 1,
        rules.len()
    ));
    out.push_str(&names.join(" "));
    out.push('\n');
    out.push_str(&join_spaced(table.input_alphabet().iter()));
    out.push('\n');
    out.push_str(&join_spaced(
        table.tape_alphabet().iter().chain(std::iter::once(&MARKER)),
    ));
    out.push('\n');
    for (state, read, next, action) in rules {
        out.push_str(&format!("({state},{read})=({next},{action})\n"));
    }
    out.push_str(input);
    out.push('\n');
    out
}

fn check_count(kind: &str, found: usize, declared: usize) -> Result<(), SimulationError> {
    if found != declared {
        return Err(SimulationError::Parse(format!(
            "header declares {declared} {kind}s but {found} were listed"
        )));
    }
    Ok(())
}

fn parse_alphabet(line: &str) -> Result<Vec<Symbol>, SimulationError> {
    line.split_whitespace().map(parse_symbol).collect()
}

fn parse_symbol(token: &str) -> Result<Symbol, SimulationError> {
    let mut chars = token.chars();
    match (chars.next(), chars.next()) {
        (Some(symbol), None) => Ok(symbol),
        _ => Err(SimulationError::Parse(format!(
            "symbol '{token}' must be a single character"
        ))),
    }
}

fn parse_direction(token: &str) -> Result<Direction, SimulationError> {
    match token {
        "L" => Ok(Direction::Left),
        "R" => Ok(Direction::Right),
        _ => Err(SimulationError::Parse(format!(
            "direction '{token}' must be L or R"
        ))),
    }
}

fn strip_parens(part: &str) -> Option<&str> {
    part.trim().strip_prefix('(')?.strip_suffix(')')
}

fn join_spaced<'a>(symbols: impl Iterator<Item = &'a Symbol>) -> String {
    symbols
        .map(|s| s.to_string())
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_the_scanner_program() {
        let text = "\
3 2 3 5
1 2 3
0 1
0 1 B
(1,0)=(1,0,R)
(1,1)=(2,1,R)
(2,0)=(2,0,R)
(2,1)=(2,1,R)
(2,B)=(3,B,L)
0011
";
        let program = parse_program(text).unwrap();
        assert_eq!(program.input, "0011");
        assert_eq!(program.table.states().len(), 3);
        assert_eq!(program.table.len(), 5);
        assert_eq!(program.table.lookup(1, 'B').unwrap().next, 2);
    }

    #[test]
    fn rejects_wrong_component_count() {
        assert!(parse_quintuple("(1,0)=(1,0)").is_err());
        assert!(parse_quintuple("(1,0,x)=(1,0)").is_err());
        assert!(parse_quintuple("(1,0)=(1,0,R,x)").is_err());
        assert!(parse_quintuple("1,0=1,0,R").is_err());
    }

    #[test]
    fn rejects_bad_direction() {
        assert!(parse_quintuple("(1,0)=(1,0,U)").is_err());
    }
}
