//! Test helper functions for creating test tables

#![allow(dead_code)]

use bennett::machine::RawQuintuple;
use bennett::{Direction, QuintupleTable, Symbol};

/// Shorthand for a raw quintuple rule
pub fn raw(
    state: &str,
    read: Symbol,
    next: &str,
    write: Symbol,
    direction: Direction,
) -> RawQuintuple {
    RawQuintuple {
        state: state.into(),
        read,
        next: next.into(),
        write,
        direction,
    }
}

/// The right-scanning machine: scans `0*1*` to the first blank and halts
/// one cell to the left. Never changes the tape content.
pub fn scanner_table() -> QuintupleTable {
    QuintupleTable::new(
        vec!["1".into(), "2".into(), "3".into()],
        vec!['0', '1'],
        vec!['0', '1', 'B'],
        vec![
            raw("1", '0', "1", '0', Direction::Right),
            raw("1", '1', "2", '1', Direction::Right),
            raw("2", '0', "2", '0', Direction::Right),
            raw("2", '1', "2", '1', Direction::Right),
            raw("2", 'B', "3", 'B', Direction::Left),
        ],
    )
    .expect("scanner table is valid")
}

/// The scanner machine in its textual program form
pub const SCANNER_PROGRAM: &str = "\
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

/// A machine that flips every bit of the input, so forward execution
/// genuinely mutates the work tape and retrace has something to undo.
pub fn flipper_table() -> QuintupleTable {
    QuintupleTable::new(
        vec!["1".into(), "2".into()],
        vec!['0', '1'],
        vec!['0', '1', 'B'],
        vec![
            raw("1", '0', "1", '1', Direction::Right),
            raw("1", '1', "1", '0', Direction::Right),
            raw("1", 'B', "2", 'B', Direction::Left),
        ],
    )
    .expect("flipper table is valid")
}

/// A machine that stays in its initial state while zeroing cells
/// leftward, so retrace must keep consuming history after the control
/// state has already matched the initial state.
pub fn left_zeroer_table() -> QuintupleTable {
    QuintupleTable::new(
        vec!["1".into(), "2".into()],
        vec!['0', '1'],
        vec!['0', '1', 'B'],
        vec![
            raw("1", '1', "1", '0', Direction::Left),
            raw("1", 'B', "2", '0', Direction::Left),
        ],
    )
    .expect("left zeroer table is valid")
}

/// A machine that bounces between its first cell and the blank after it,
/// never reaching the halting state.
pub fn looping_table() -> QuintupleTable {
    QuintupleTable::new(
        vec!["1".into(), "2".into()],
        vec!['0'],
        vec!['0', 'B'],
        vec![
            raw("1", '0', "1", '0', Direction::Right),
            raw("1", 'B', "1", 'B', Direction::Left),
        ],
    )
    .expect("looping table is valid")
}

/// A machine missing the rule for `(1, 1)`, reachable on any input
/// containing a `1`.
pub fn partial_table() -> QuintupleTable {
    QuintupleTable::new(
        vec!["1".into(), "2".into()],
        vec!['0', '1'],
        vec!['0', '1', 'B'],
        vec![
            raw("1", '0', "1", '0', Direction::Right),
            raw("1", 'B', "2", 'B', Direction::Left),
        ],
    )
    .expect("partial table is valid")
}
