//! Test-only fixture helpers. Not the excluded DIMACS file parser (§1, §6):
//! this never touches the filesystem and isn't part of the public API — it
//! just saves every test from hand-building `Vec<Vec<i64>>` literal by
//! literal, the way the source material's own tests lean on `Clause::from`
//! shorthand strings.
#![cfg(test)]

use crate::solver::clause::Clause;
use crate::solver::state::SatState;

/// Parses `"1 -2 3"`-style shorthand into clause literal lists.
pub fn clause_lists(specs: &[&str]) -> Vec<Vec<i64>> {
    specs
        .iter()
        .map(|spec| {
            spec.split_whitespace()
                .map(|tok| tok.parse::<i64>().expect("valid literal token"))
                .collect()
        })
        .collect()
}

/// Builds standalone `Clause` values (watch_1/watch_2 defaulted, not
/// installed in any arena) for unit-testing the watch/propagation helpers in
/// isolation.
pub fn clauses_from(specs: &[&str]) -> Vec<Clause> {
    clause_lists(specs)
        .into_iter()
        .map(|lits| Clause::new(lits.into_iter().map(Into::into).collect()))
        .collect()
}

/// Builds a fully-constructed `SatState`, panicking on malformed fixtures
/// (a test bug, not something under test).
pub fn state_from(num_vars: usize, specs: &[&str]) -> SatState {
    SatState::new(num_vars, &clause_lists(specs)).expect("valid test fixture")
}
