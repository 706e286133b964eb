use crate::literal::{ClauseId, Literal};
use crate::solver::clause::Clause;
use crate::solver::variable::Variable;

/// Output of First-UIP conflict analysis (§4.5): the learned clause and the
/// decision level the driver should backjump to before installing it.
#[derive(Debug, Clone)]
pub struct AssertionClause {
    pub clause: Clause,
    pub level: usize,
}

/// Runs First-UIP resolution from the conflict clause `conflict_id` backward
/// along the implication graph. Returns `None` when `L <= 1`: the conflict
/// arose from original unit clauses at the start level, the formula is
/// unsatisfiable, and no clause is produced (§4.5, `PropagationResult::Exhausted`).
///
/// `variables` is mutated only on the `assertion_use`/`assertion_list`
/// scratch bits, which are false on every exit path.
pub(crate) fn analyze_conflict(
    conflict_id: ClauseId,
    variables: &mut [Variable],
    clauses: &[Clause],
) -> Option<AssertionClause> {
    let current_level = clauses[conflict_id]
        .literals
        .iter()
        .map(|lit| variables[lit.var_id()].decision_level)
        .max()
        .unwrap_or(0);

    if current_level <= 1 {
        return None;
    }

    // `working_set` holds the literals currently in the cut, in the order
    // they were added; `assertion_list`/`assertion_use` on each literal's
    // variable dedupe membership and mark whether it's still in the cut.
    let mut working_set: Vec<Literal> = Vec::new();
    seed(&clauses[conflict_id], variables, &mut working_set);

    loop {
        let at_level_count = working_set
            .iter()
            .filter(|lit| {
                let var = &variables[lit.var_id()];
                var.assertion_use && var.decision_level == current_level
            })
            .count();

        if at_level_count == 1 {
            break;
        }

        let pivot_pos = working_set.iter().position(|lit| {
            let var = &variables[lit.var_id()];
            var.assertion_use
                && var.decision_level == current_level
                && var.implication_clause.is_some()
        });

        let Some(pivot_pos) = pivot_pos else { break };

        let pivot = working_set[pivot_pos];
        let reason_id = variables[pivot.var_id()]
            .implication_clause
            .expect("pivot chosen for having an implication_clause");
        variables[pivot.var_id()].assertion_use = false;

        let reason_clause = clauses[reason_id].clone();
        seed(&reason_clause, variables, &mut working_set);
    }

    let mut learned_literals: Vec<Literal> = Vec::new();
    let mut assertion_level = 1;
    for &lit in &working_set {
        let var = &variables[lit.var_id()];
        if var.assertion_use {
            learned_literals.push(lit);
            if var.decision_level < current_level && var.decision_level > assertion_level {
                assertion_level = var.decision_level;
            }
        }
    }

    for &lit in &working_set {
        let var = &mut variables[lit.var_id()];
        var.assertion_use = false;
        var.assertion_list = false;
    }

    Some(AssertionClause {
        clause: Clause::new(learned_literals),
        level: assertion_level,
    })
}

/// Adds every literal of `clause` not already in the cut to `working_set`,
/// setting both scratch bits (the seeding step of §4.5, reused for the
/// conflict clause and for each subsequent implication clause).
fn seed(clause: &Clause, variables: &mut [Variable], working_set: &mut Vec<Literal>) {
    for &lit in &clause.literals {
        let var = &mut variables[lit.var_id()];
        if !var.assertion_list {
            var.assertion_list = true;
            var.assertion_use = true;
            working_set.push(lit);
        }
    }
}
