//! Validated transition tables
//!
//! Both table forms key rules on an explicit composite key, so the
//! determinism invariant (one rule per key) is enforced at construction
//! rather than discovered at run time.

use std::collections::{HashMap, HashSet};

use crate::SimulationError;

use super::{Direction, Quadruple, Quintuple, State, StateId, Symbol, TapeRead, BLANK};

/// A quintuple rule as parsed from text, before state names are resolved
/// against the declared state list
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawQuintuple {
    /// Source state name
    pub state: String,
    /// Symbol read at the head
    pub read: Symbol,
    /// Target state name
    pub next: String,
    /// Symbol written at the head
    pub write: Symbol,
    /// Head movement
    pub direction: Direction,
}

/// The immutable, validated quintuple transition table
///
/// The first declared state is the initial state, the last is the unique
/// halting state.
#[derive(Debug, Clone)]
pub struct QuintupleTable {
    states: Vec<String>,
    input_alphabet: Vec<Symbol>,
    tape_alphabet: Vec<Symbol>,
    rules: HashMap<(StateId, Symbol), Quintuple>,
}

impl QuintupleTable {
    /// Build a table from declarations and raw rules, validating every
    /// referenced state and symbol against the declarations.
    pub fn new(
        states: Vec<String>,
        input_alphabet: Vec<Symbol>,
        tape_alphabet: Vec<Symbol>,
        raw_rules: Vec<RawQuintuple>,
    ) -> Result<Self, SimulationError> {
        if states.is_empty() {
            return Err(SimulationError::Parse(
                "state list is empty; need at least an initial/halting state".into(),
            ));
        }
        check_unique(states.iter(), "state")?;
        check_unique(input_alphabet.iter(), "input symbol")?;
        check_unique(tape_alphabet.iter(), "tape symbol")?;

        if !tape_alphabet.contains(&BLANK) {
            return Err(SimulationError::Parse(format!(
                "tape alphabet must declare the blank symbol '{BLANK}'"
            )));
        }
        if tape_alphabet.contains(&super::MARKER) || input_alphabet.contains(&super::MARKER) {
            return Err(SimulationError::Parse(format!(
                "the marker symbol '{}' is reserved and cannot be declared",
                super::MARKER
            )));
        }
        for symbol in &input_alphabet {
            if !tape_alphabet.contains(symbol) {
                return Err(SimulationError::Parse(format!(
                    "input symbol '{symbol}' is missing from the tape alphabet"
                )));
            }
        }

        let ids: HashMap<&str, StateId> = states
            .iter()
            .enumerate()
            .map(|(i, name)| (name.as_str(), i as StateId))
            .collect();
        let halting = (states.len() - 1) as StateId;

        let mut rules = HashMap::with_capacity(raw_rules.len());
        for raw in raw_rules {
            let state = *ids.get(raw.state.as_str()).ok_or_else(|| {
                SimulationError::Parse(format!("rule references undeclared state '{}'", raw.state))
            })?;
            let next = *ids.get(raw.next.as_str()).ok_or_else(|| {
                SimulationError::Parse(format!("rule references undeclared state '{}'", raw.next))
            })?;
            for symbol in [raw.read, raw.write] {
                if !tape_alphabet.contains(&symbol) {
                    return Err(SimulationError::Parse(format!(
                        "rule references undeclared symbol '{symbol}'"
                    )));
                }
            }
            if state == halting {
                return Err(SimulationError::Parse(format!(
                    "halting state '{}' cannot be the source of a rule",
                    raw.state
                )));
            }
            let rule = Quintuple {
                next,
                write: raw.write,
                direction: raw.direction,
            };
            if rules.insert((state, raw.read), rule).is_some() {
                return Err(SimulationError::DuplicateTransitionKey {
                    state: raw.state,
                    symbol: raw.read,
                });
            }
        }

        Ok(Self {
            states,
            input_alphabet,
            tape_alphabet,
            rules,
        })
    }

    /// Initial state (first declared)
    pub fn initial_state(&self) -> StateId {
        0
    }

    /// Halting state (last declared)
    pub fn halting_state(&self) -> StateId {
        (self.states.len() - 1) as StateId
    }

    /// Declared state names, in declaration order
    pub fn states(&self) -> &[String] {
        &self.states
    }

    /// Name of a declared state
    pub fn state_name(&self, id: StateId) -> &str {
        &self.states[id as usize]
    }

    /// Declared input alphabet
    pub fn input_alphabet(&self) -> &[Symbol] {
        &self.input_alphabet
    }

    /// Declared tape alphabet
    pub fn tape_alphabet(&self) -> &[Symbol] {
        &self.tape_alphabet
    }

    /// Look up the rule for a `(state, symbol)` key
    pub fn lookup(&self, state: StateId, symbol: Symbol) -> Option<&Quintuple> {
        self.rules.get(&(state, symbol))
    }

    /// Number of rules
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Whether the table has no rules
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Rules in sorted key order, for deterministic iteration
    pub fn rules_sorted(&self) -> Vec<((StateId, Symbol), Quintuple)> {
        let mut rules: Vec<_> = self.rules.iter().map(|(k, v)| (*k, *v)).collect();
        rules.sort_by_key(|(key, _)| *key);
        rules
    }
}

/// The compiled quadruple transition table
///
/// Produced by [`crate::compiler::compile`]; shares the source table's
/// declarations and keys rules on `(state, symbol-or-marker)`.
#[derive(Debug, Clone)]
pub struct QuadrupleTable {
    states: Vec<String>,
    input_alphabet: Vec<Symbol>,
    tape_alphabet: Vec<Symbol>,
    rules: HashMap<(State, TapeRead), Quadruple>,
}

impl QuadrupleTable {
    pub(crate) fn new(
        states: Vec<String>,
        input_alphabet: Vec<Symbol>,
        tape_alphabet: Vec<Symbol>,
        rules: HashMap<(State, TapeRead), Quadruple>,
    ) -> Self {
        Self {
            states,
            input_alphabet,
            tape_alphabet,
            rules,
        }
    }

    /// Initial state (first declared)
    pub fn initial_state(&self) -> StateId {
        0
    }

    /// Halting state (last declared)
    pub fn halting_state(&self) -> StateId {
        (self.states.len() - 1) as StateId
    }

    /// Declared (original) state names
    pub fn states(&self) -> &[String] {
        &self.states
    }

    /// Declared input alphabet
    pub fn input_alphabet(&self) -> &[Symbol] {
        &self.input_alphabet
    }

    /// Declared tape alphabet, without the marker
    pub fn tape_alphabet(&self) -> &[Symbol] {
        &self.tape_alphabet
    }

    /// Look up the rule for a `(state, read)` key
    pub fn lookup(&self, state: State, read: TapeRead) -> Option<&Quadruple> {
        self.rules.get(&(state, read))
    }

    /// Number of rules (two per source quintuple)
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Whether the table has no rules
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// All rules, unordered
    pub fn rules(&self) -> impl Iterator<Item = (&(State, TapeRead), &Quadruple)> {
        self.rules.iter()
    }

    /// Whether a state id / read symbol pair decodes to a valid
    /// intermediate state of this table
    pub fn is_valid_intermediate(&self, origin: StateId, read: Symbol) -> bool {
        (origin as usize) < self.states.len() && self.tape_alphabet.contains(&read)
    }

    /// Human-readable name of a state; intermediates render as
    /// `<origin>'<symbol>`, the conventional textual form
    pub fn display_name(&self, state: State) -> String {
        match state {
            State::Original(id) => self.states[id as usize].clone(),
            State::Intermediate { origin, read } => {
                format!("{}'{}", self.states[origin as usize], read)
            }
        }
    }

    /// Distinct states appearing in the table: declared plus synthesized
    pub fn total_states(&self) -> usize {
        let intermediates: HashSet<State> = self
            .rules
            .keys()
            .map(|(state, _)| *state)
            .filter(|state| !state.is_original())
            .collect();
        self.states.len() + intermediates.len()
    }
}

fn check_unique<T>(names: impl Iterator<Item = T>, kind: &str) -> Result<(), SimulationError>
where
    T: std::hash::Hash + Eq + std::fmt::Display,
{
    let mut seen = HashSet::new();
    for name in names {
        if seen.contains(&name) {
            return Err(SimulationError::Parse(format!(
                "duplicate {kind} declaration '{name}'"
            )));
        }
        seen.insert(name);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(state: &str, read: Symbol, next: &str, write: Symbol, direction: Direction) -> RawQuintuple {
        RawQuintuple {
            state: state.into(),
            read,
            next: next.into(),
            write,
            direction,
        }
    }

    fn decls() -> (Vec<String>, Vec<Symbol>, Vec<Symbol>) {
        (
            vec!["1".into(), "2".into(), "3".into()],
            vec!['0', '1'],
            vec!['0', '1', 'B'],
        )
    }

    #[test]
    fn builds_and_looks_up() {
        let (states, input, tape) = decls();
        let table = QuintupleTable::new(
            states,
            input,
            tape,
            vec![raw("1", '0', "2", '1', Direction::Right)],
        )
        .unwrap();

        assert_eq!(table.initial_state(), 0);
        assert_eq!(table.halting_state(), 2);
        let rule = table.lookup(0, '0').unwrap();
        assert_eq!(rule.next, 1);
        assert_eq!(rule.write, '1');
        assert!(table.lookup(0, '1').is_none());
    }

    #[test]
    fn rejects_duplicate_key() {
        let (states, input, tape) = decls();
        let err = QuintupleTable::new(
            states,
            input,
            tape,
            vec![
                raw("1", '0', "2", '1', Direction::Right),
                raw("1", '0', "1", '0', Direction::Left),
            ],
        )
        .unwrap_err();

        assert_eq!(
            err,
            SimulationError::DuplicateTransitionKey {
                state: "1".into(),
                symbol: '0'
            }
        );
    }

    #[test]
    fn rejects_undeclared_references() {
        let (states, input, tape) = decls();
        let err = QuintupleTable::new(
            states.clone(),
            input.clone(),
            tape.clone(),
            vec![raw("9", '0', "2", '1', Direction::Right)],
        )
        .unwrap_err();
        assert!(matches!(err, SimulationError::Parse(_)));

        let err = QuintupleTable::new(
            states,
            input,
            tape,
            vec![raw("1", 'x', "2", '1', Direction::Right)],
        )
        .unwrap_err();
        assert!(matches!(err, SimulationError::Parse(_)));
    }

    #[test]
    fn rejects_rule_from_halting_state() {
        let (states, input, tape) = decls();
        let err = QuintupleTable::new(
            states,
            input,
            tape,
            vec![raw("3", '0', "1", '0', Direction::Right)],
        )
        .unwrap_err();
        assert!(matches!(err, SimulationError::Parse(_)));
    }

    #[test]
    fn rejects_reserved_marker_in_alphabet() {
        let err = QuintupleTable::new(
            vec!["1".into(), "2".into()],
            vec!['0'],
            vec!['0', 'B', '/'],
            vec![],
        )
        .unwrap_err();
        assert!(matches!(err, SimulationError::Parse(_)));
    }
}
