use crate::literal::{ClauseId, VarId};
use crate::solver::literal_watching::{reexamine_clause, WatchOutcome};
use crate::solver::state::SatState;

/// Result of running unit resolution to closure (§4.4).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PropagationOutcome {
    /// Both cursors reached the end of the trail with no conflict.
    Consistent,
    /// A clause was found with no free and no asserted literal.
    Conflict(ClauseId),
}

/// Re-examines one flagged clause, forcing its literal on the engine if it's
/// found unit. A no-op if the clause isn't currently flagged.
fn examine_clause(state: &mut SatState, clause_id: ClauseId) -> PropagationOutcome {
    if !state.clauses[clause_id].needs_checking {
        return PropagationOutcome::Consistent;
    }
    match reexamine_clause(&mut state.clauses[clause_id], &state.variables) {
        WatchOutcome::AlreadyValid | WatchOutcome::Subsumed | WatchOutcome::NewWatches => {
            PropagationOutcome::Consistent
        }
        WatchOutcome::Unit(lit) => {
            log::trace!("unit {lit} forced by clause {clause_id}");
            state.imply(lit, clause_id);
            PropagationOutcome::Consistent
        }
        WatchOutcome::Conflict => {
            log::debug!("conflict on clause {clause_id}");
            PropagationOutcome::Conflict(clause_id)
        }
    }
}

/// Re-examines every clause flagged `needs_checking` among `var`'s
/// `used_clauses`. Mirrors `check_literal` of the source material.
fn check_literal_clauses(state: &mut SatState, var: VarId) -> PropagationOutcome {
    for clause_id in state.variables[var].used_clauses.clone() {
        if let PropagationOutcome::Conflict(id) = examine_clause(state, clause_id) {
            return PropagationOutcome::Conflict(id);
        }
    }
    PropagationOutcome::Consistent
}

/// Runs unit resolution to closure: advances the decisions cursor, then the
/// implications cursor, re-examining every clause flagged by a newly-set
/// variable, until both cursors catch up or a conflict is found (§4.4).
///
/// This is `pub(crate)` because it's an internal step of `decide` and
/// `assert_clause` (§4.2, §4.6) — there is no standalone public "propagate"
/// operation, matching the source material's API surface (§6).
pub(crate) fn run_unit_resolution(state: &mut SatState) -> PropagationOutcome {
    loop {
        if state.trail.decisions_applied < state.trail.decisions.len() {
            let lit = state.trail.decisions[state.trail.decisions_applied];
            state.trail.decisions_applied += 1;
            if let PropagationOutcome::Conflict(id) = check_literal_clauses(state, lit.var_id()) {
                return PropagationOutcome::Conflict(id);
            }
            continue;
        }
        if state.trail.implications_applied < state.trail.implications.len() {
            let lit = state.trail.implications[state.trail.implications_applied];
            state.trail.implications_applied += 1;
            if let PropagationOutcome::Conflict(id) = check_literal_clauses(state, lit.var_id()) {
                return PropagationOutcome::Conflict(id);
            }
            continue;
        }
        return PropagationOutcome::Consistent;
    }
}

/// Performs the one-off direct scan every flagged clause needs the first
/// time it has no "newly set variable" to hang off of: every original
/// clause right after construction (§4.1), and a freshly installed learned
/// clause right after `assert_clause` (§4.6) — in both cases nothing on the
/// trail changed to trigger `check_literal_clauses` naturally.
pub(crate) fn seed_clause(state: &mut SatState, clause_id: ClauseId) -> PropagationOutcome {
    examine_clause(state, clause_id)
}

/// Seeds every original clause (§4.1's initial unit-resolution pass), then
/// lets `run_unit_resolution` cascade through whatever that seeding forced.
pub(crate) fn seed_all_clauses(state: &mut SatState, clause_count: usize) -> PropagationOutcome {
    for clause_id in 1..=clause_count {
        if let PropagationOutcome::Conflict(id) = seed_clause(state, clause_id) {
            return PropagationOutcome::Conflict(id);
        }
    }
    run_unit_resolution(state)
}

#[cfg(test)]
mod tests {
    use crate::literal::Literal;
    use crate::solver::state::SatState;
    use crate::test_support::clause_lists;

    #[test]
    fn initial_units_propagate_at_construction() {
        let clauses = clause_lists(&["1", "-1 2", "-2 3"]);
        let state = SatState::new(3, &clauses).unwrap();
        assert!(state.variables[1].is_set);
        assert!(state.variables[2].is_set);
        assert!(state.variables[3].is_set);
        assert_eq!(state.variables[1].decision_level, 1);
        assert!(!state.conflict_exists());
    }

    #[test]
    fn contradictory_units_conflict_at_start_level() {
        let clauses = clause_lists(&["1", "-1"]);
        let state = SatState::new(1, &clauses).unwrap();
        assert!(state.at_start_level());
        assert!(state.pending_assertion_clause().is_none());
    }

    #[test]
    fn decision_cascades_through_a_chain_of_binary_clauses() {
        // deciding a forces b, which forces c, via two binary clauses.
        let clauses = clause_lists(&["-1 2", "-2 3"]);
        let mut state = SatState::new(3, &clauses).unwrap();
        state.decide(Literal::from_var(1, true));
        assert!(state.variables[2].is_set);
        assert!(state.variables[2].set_sign);
        assert!(state.variables[3].is_set);
        assert!(state.variables[3].set_sign);
    }
}
