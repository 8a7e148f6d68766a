//! Property tests for the quadruple compiler over generated tables

use std::collections::HashMap;

use proptest::prelude::*;

use bennett::compiler::compile;
use bennett::machine::RawQuintuple;
use bennett::{io, Direction, QuintupleTable, SimulationConfig, Simulator, State, TapeRead};

const ALPHABET: [char; 3] = ['0', '1', 'B'];

/// Build a valid table from generated rule entries. Keys are unique by
/// construction and the halting state is never a source.
fn build_table(num_states: usize, entries: HashMap<(usize, usize), (usize, usize, bool)>) -> QuintupleTable {
    let states: Vec<String> = (1..=num_states).map(|n| n.to_string()).collect();
    let rules = entries
        .into_iter()
        .map(|((state, read), (next, write, right))| RawQuintuple {
            state: states[state].clone(),
            read: ALPHABET[read],
            next: states[next].clone(),
            write: ALPHABET[write],
            direction: if right { Direction::Right } else { Direction::Left },
        })
        .collect();
    QuintupleTable::new(states, vec!['0', '1'], ALPHABET.to_vec(), rules)
        .expect("generated table is valid")
}

fn table_strategy() -> impl Strategy<Value = QuintupleTable> {
    (2usize..=4).prop_flat_map(|num_states| {
        prop::collection::hash_map(
            (0..num_states - 1, 0usize..ALPHABET.len()),
            (0..num_states, 0usize..ALPHABET.len(), any::<bool>()),
            0..12,
        )
        .prop_map(move |entries| build_table(num_states, entries))
    })
}

proptest! {
    #[test]
    fn two_quadruples_per_quintuple(table in table_strategy()) {
        let compiled = compile(&table);
        prop_assert_eq!(compiled.len(), table.len() * 2);
    }

    #[test]
    fn intermediate_identities_are_bijective(table in table_strategy()) {
        let compiled = compile(&table);

        for ((state, read), rule) in table.rules_sorted() {
            let write_half = compiled
                .lookup(State::Original(state), TapeRead::Symbol(read))
                .expect("write half exists");

            // The synthesized state decodes back to exactly its source pair
            let (origin, tagged_read) = write_half
                .next
                .intermediate_tag()
                .expect("write half targets an intermediate state");
            prop_assert_eq!(origin, state);
            prop_assert_eq!(tagged_read, read);

            let move_half = compiled
                .lookup(write_half.next, TapeRead::Marker)
                .expect("move half exists");
            prop_assert_eq!(move_half.next, State::Original(rule.next));
        }
    }

    #[test]
    fn compilation_is_idempotent(table in table_strategy()) {
        let first = io::render_quadruple_table(&compile(&table), "");
        let second = io::render_quadruple_table(&compile(&table), "");
        prop_assert_eq!(first, second);
    }

    #[test]
    fn halting_runs_restore_their_input(
        table in table_strategy(),
        input in proptest::collection::vec(prop_oneof![Just('0'), Just('1')], 0..6),
    ) {
        let input: String = input.into_iter().collect();
        let simulator = Simulator::new(table, SimulationConfig::with_step_bound(200));

        // Generated tables may loop or hit undefined pairs; the property
        // only binds runs that halt
        if let Ok(report) = simulator.run(&input) {
            prop_assert_eq!(report.restored_input, input);
            prop_assert_eq!(report.restored_head, 0);
            prop_assert_eq!(report.final_state, "1");
        }
    }
}

#[test]
fn state_id_is_stable_across_compiles() {
    let table = build_table(3, HashMap::from([((0, 0), (1, 1, true))]));
    let a = compile(&table);
    let b = compile(&table);
    let key = (State::Original(0), TapeRead::Symbol('0'));
    assert_eq!(a.lookup(key.0, key.1), b.lookup(key.0, key.1));
}
