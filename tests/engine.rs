//! End-to-end CDCL cycles against the public API, covering the concrete
//! scenarios of the propagation/learning design.

use cdcl_core::{Literal, PropagationResult, SatState};

fn lit(value: i64) -> Literal {
    Literal::from_var(value.unsigned_abs() as usize, value > 0)
}

#[test]
fn xor_like_formula_learns_unit_negation_at_level_one() {
    // (x1 v x2) & (-x1 v x2) & (x1 v -x2) & (-x1 v -x2)
    let clauses = vec![
        vec![1, 2],
        vec![-1, 2],
        vec![1, -2],
        vec![-1, -2],
    ];
    let mut state = SatState::new(2, &clauses).unwrap();

    let result = state.decide(lit(1));
    assert_eq!(result, Some(PropagationResult::Learned));
    assert!(state.conflict_exists());
}

#[test]
fn chained_implications_resolve_at_construction() {
    // (a) & (-a v b) & (-b v c)
    let clauses = vec![vec![1], vec![-1, 2], vec![-2, 3]];
    let state = SatState::new(3, &clauses).unwrap();

    assert!(state.variable(1).unwrap().is_set);
    assert!(state.variable(2).unwrap().is_set);
    assert!(state.variable(3).unwrap().is_set);
    assert!(!state.conflict_exists());
    assert!(state.at_start_level());
}

#[test]
fn undo_then_install_learned_clause_sets_forced_literal() {
    // (p v q) & (p v -q)
    let clauses = vec![vec![1, 2], vec![1, -2]];
    let mut state = SatState::new(2, &clauses).unwrap();

    let result = state.decide(lit(-1));
    assert_eq!(result, Some(PropagationResult::Learned));

    assert!(state.undo_decide());
    assert!(state.at_start_level());
    assert!(state.at_assertion_level());

    let result = state.assert_clause();
    assert_eq!(result, Some(PropagationResult::Consistent));
    assert!(state.variable(1).unwrap().is_set);
    assert!(state.variable(1).unwrap().set_sign);
}

#[test]
fn conflict_at_deeper_level_defers_installation_until_assert_clause() {
    // (-a v c) & (-b v -c v e) & (-e v -c)
    // Deciding a forces c, and c in turn forces e, but b stays untouched by
    // that cascade. Only deciding b afterwards makes clause 2's three
    // literals simultaneously false, so the conflict genuinely needs both
    // decision levels to manifest.
    let clauses = vec![vec![-1, 3], vec![-2, -3, 4], vec![-4, -3]];
    let mut state = SatState::new(4, &clauses).unwrap();

    assert_eq!(state.decide(lit(1)), Some(PropagationResult::Consistent));
    assert!(
        !state.variable(2).unwrap().is_set,
        "b must still be free after deciding a"
    );

    let clauses_before = state.num_clauses();
    let result = state.decide(lit(2));
    assert_eq!(result, Some(PropagationResult::Learned));
    assert_eq!(state.num_clauses(), clauses_before, "learned clause is pending, not yet installed");
    assert_eq!(state.learned_clause_count(), 0);
}

#[test]
fn contradictory_units_are_unsatisfiable_at_start_level() {
    let clauses = vec![vec![1], vec![-1]];
    let state = SatState::new(1, &clauses).unwrap();

    assert!(!state.conflict_exists());
    assert!(state.at_start_level());
}

#[test]
fn decide_undo_round_trip_restores_public_state() {
    let clauses = vec![vec![1, 2, 3]];
    let mut state = SatState::new(3, &clauses).unwrap();

    let before_stats = state.stats;
    state.decide(lit(1));
    assert!(state.undo_decide());

    assert!(state.at_start_level());
    assert!(!state.variable(1).unwrap().is_set);
    assert_eq!(state.stats.num_decisions, before_stats.num_decisions + 1);
}
