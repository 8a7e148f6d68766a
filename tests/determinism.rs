//! Determinism: repeated runs and repeated compilations are identical

use std::collections::HashSet;

use bennett::{io, SimulationConfig, Simulator};

mod test_helpers;
use test_helpers::*;

#[test]
fn repeated_runs_share_one_fingerprint() {
    let mut fingerprints = HashSet::new();
    for _ in 0..5 {
        let simulator = Simulator::new(scanner_table(), SimulationConfig::default());
        let report = simulator.run("0011").expect("scanner run succeeds");
        fingerprints.insert(report.fingerprint());
    }

    assert_eq!(fingerprints.len(), 1, "outputs diverged across runs");
}

#[test]
fn repeated_compilations_render_identically() {
    let mut renderings = HashSet::new();
    for _ in 0..5 {
        let simulator = Simulator::new(scanner_table(), SimulationConfig::default());
        renderings.insert(io::render_quadruple_table(
            simulator.compiled_table(),
            "0011",
        ));
    }

    assert_eq!(renderings.len(), 1, "compiled tables diverged");
}

#[test]
fn failures_are_deterministic_too() {
    let first = Simulator::new(partial_table(), SimulationConfig::default())
        .run("01")
        .unwrap_err();
    let second = Simulator::new(partial_table(), SimulationConfig::default())
        .run("01")
        .unwrap_err();
    assert_eq!(first, second);
}
