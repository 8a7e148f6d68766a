//! Quintuple to quadruple compilation
//!
//! Splits every quintuple step into a write-only sub-step and a move-only
//! sub-step chained through one synthesized intermediate state, so that no
//! single step touches both the tape content and the head position. That
//! separation is what lets the retrace phase invert a step by swapping the
//! write/move order and negating the direction.

use std::collections::HashMap;

use tracing::debug;

use crate::machine::{
    Action, Quadruple, QuadrupleTable, QuintupleTable, State, TapeRead,
};

/// Compile a quintuple table into its equivalent quadruple table.
///
/// For every quintuple `(q, a) -> (q', b, d)` this emits
/// `(q, a) -> (I(q,a), write b)` and `(I(q,a), marker) -> (q', move d)`.
/// The intermediate identity is the `(q, a)` tag itself, so compiling the
/// same table twice yields identical output: no counters, no randomness.
pub fn compile(table: &QuintupleTable) -> QuadrupleTable {
    let mut rules = HashMap::with_capacity(table.len() * 2);

    for ((state, read), rule) in table.rules_sorted() {
        let intermediate = State::Intermediate {
            origin: state,
            read,
        };

        rules.insert(
            (State::Original(state), TapeRead::Symbol(read)),
            Quadruple {
                next: intermediate,
                action: Action::Write(rule.write),
            },
        );
        rules.insert(
            (intermediate, TapeRead::Marker),
            Quadruple {
                next: State::Original(rule.next),
                action: Action::Move(rule.direction),
            },
        );

        debug!(
            state = table.state_name(state),
            read = %read,
            next = table.state_name(rule.next),
            write = %rule.write,
            direction = %rule.direction.letter(),
            "compiled quintuple into write/move pair"
        );
    }

    QuadrupleTable::new(
        table.states().to_vec(),
        table.input_alphabet().to_vec(),
        table.tape_alphabet().to_vec(),
        rules,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::machine::{Direction, RawQuintuple};

    fn sample_table() -> QuintupleTable {
        QuintupleTable::new(
            vec!["1".into(), "2".into(), "3".into()],
            vec!['0', '1'],
            vec!['0', '1', 'B'],
            vec![
                RawQuintuple {
                    state: "1".into(),
                    read: '0',
                    next: "2".into(),
                    write: '1',
                    direction: Direction::Right,
                },
                RawQuintuple {
                    state: "2".into(),
                    read: 'B',
                    next: "3".into(),
                    write: 'B',
                    direction: Direction::Left,
                },
            ],
        )
        .unwrap()
    }

    #[test]
    fn emits_two_rules_per_quintuple() {
        let compiled = compile(&sample_table());
        assert_eq!(compiled.len(), 4);

        let first = compiled
            .lookup(State::Original(0), TapeRead::Symbol('0'))
            .unwrap();
        assert_eq!(first.next, State::Intermediate { origin: 0, read: '0' });
        assert_eq!(first.action, Action::Write('1'));

        let second = compiled
            .lookup(State::Intermediate { origin: 0, read: '0' }, TapeRead::Marker)
            .unwrap();
        assert_eq!(second.next, State::Original(1));
        assert_eq!(second.action, Action::Move(Direction::Right));
    }

    #[test]
    fn compilation_is_deterministic() {
        let table = sample_table();
        let a = compile(&table);
        let b = compile(&table);

        for (key, rule) in a.rules() {
            assert_eq!(b.lookup(key.0, key.1), Some(rule));
        }
        assert_eq!(a.len(), b.len());
        assert_eq!(a.total_states(), b.total_states());
    }

    #[test]
    fn counts_intermediate_states() {
        let compiled = compile(&sample_table());
        // 3 declared + one intermediate per quintuple
        assert_eq!(compiled.total_states(), 5);
    }
}
