use crate::error::ConstructionError;
use crate::literal::{ClauseId, Literal, VarId};
use crate::solver::clause::Clause;
use crate::solver::clause_learning::{analyze_conflict, AssertionClause};
use crate::solver::config::Config;
use crate::solver::literal_watching::reexamine_clause;
use crate::solver::stats::Stats;
use crate::solver::trail::Trail;
use crate::solver::unit_propagation::{run_unit_resolution, seed_all_clauses, seed_clause, PropagationOutcome};
use crate::solver::variable::Variable;

/// Outcome of a call that may run propagation to closure (§7): `decide` and
/// `assert_clause` both return this.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PropagationResult {
    /// Propagation reached closure with no conflict.
    Consistent,
    /// A conflict was analyzed; a clause is pending in `pending_assertion_clause`.
    Learned,
    /// Conflict at the start level: the formula is unsatisfiable, no clause produced.
    Exhausted,
}

/// The CDCL engine: arenas for variables and clauses, the trail, and the
/// slots used to hand a conflict's analysis back to the driver (§3).
///
/// Index `0` of `variables` and `clauses` is an unused sentinel, matching
/// the 1-based external indexing convention (§6) and the source material's
/// `vars[0]`/`clauses[0]` dummy slots.
#[derive(Debug, Clone)]
pub struct SatState {
    pub(crate) variables: Vec<Variable>,
    pub(crate) clauses: Vec<Clause>,
    pub(crate) trail: Trail,
    pub config: Config,
    pub stats: Stats,
    assertion_clause: Option<AssertionClause>,
}

impl SatState {
    /// Builds a consistent initial state from `num_vars` variables and the
    /// given clause literal lists, running unit resolution to closure before
    /// returning (§4.1). Rejects malformed input without constructing a state.
    pub fn new(num_vars: usize, clauses: &[Vec<i64>]) -> Result<SatState, ConstructionError> {
        for (idx, literals) in clauses.iter().enumerate() {
            for &lit in literals {
                if lit == 0 {
                    return Err(ConstructionError::ZeroLiteral { clause: idx });
                }
                let var = lit.unsigned_abs() as usize;
                if var > num_vars {
                    return Err(ConstructionError::VariableOutOfRange {
                        clause: idx,
                        var: lit,
                        num_vars,
                    });
                }
            }
        }

        let mut variables: Vec<Variable> = (0..=num_vars).map(Variable::new).collect();
        let mut arena: Vec<Clause> = Vec::with_capacity(clauses.len() + 1);
        arena.push(Clause {
            index: 0,
            literals: Vec::new(),
            watch_1: 0,
            watch_2: 0,
            was_generated: false,
            is_subsumed: false,
            needs_checking: false,
            mark: false,
        });

        for literals in clauses {
            let clause_id = arena.len();
            let mut clause = Clause::new(literals.iter().map(|&v| Literal::new(v)).collect());
            clause.index = clause_id;
            clause.needs_checking = true;
            for &lit in &clause.literals {
                let used = &mut variables[lit.var_id()].used_clauses;
                if !used.contains(&clause_id) {
                    used.push(clause_id);
                }
            }
            arena.push(clause);
        }

        let mut state = SatState {
            variables,
            clauses: arena,
            trail: Trail::new(),
            config: Config::default(),
            stats: Stats::default(),
            assertion_clause: None,
        };

        let clause_count = state.clauses.len() - 1;
        let outcome = seed_all_clauses(&mut state, clause_count);
        state.resolve_propagation(outcome);
        Ok(state)
    }

    /// Appends `lit` to the trail as a fresh decision and propagates to
    /// closure (§4.2). `None` if `lit`'s variable is already set, out of
    /// range, or every variable is already decided.
    pub fn decide(&mut self, lit: Literal) -> Option<PropagationResult> {
        let var = lit.var_id();
        if var == 0 || var >= self.variables.len() {
            return None;
        }
        if self.variables[var].is_set {
            return None;
        }
        if self.trail.decisions.len() >= self.variables.len() - 1 {
            return None;
        }

        let level = self.trail.current_level();
        log::trace!("decide {lit} at level {level}");
        self.trail.push_decision(lit);
        {
            let v = &mut self.variables[var];
            v.is_set = true;
            v.set_sign = lit.is_positive();
            v.decision_level = level;
            v.implication_clause = None;
        }
        self.stats.num_decisions += 1;

        for clause_id in self.variables[var].used_clauses.clone() {
            if !self.clauses[clause_id].is_subsumed {
                self.clauses[clause_id].needs_checking = true;
            }
        }

        let outcome = run_unit_resolution(self);
        Some(self.resolve_propagation(outcome))
    }

    /// Forces `lit` true with justifier `clause_id` (§4.2 Imply). Internal:
    /// called only from the propagator.
    pub(crate) fn imply(&mut self, lit: Literal, clause_id: ClauseId) {
        let clause = &self.clauses[clause_id];
        let level = if clause.literals.len() == 1 {
            1
        } else {
            clause
                .literals
                .iter()
                .filter(|&&other| other != lit)
                .map(|other| self.variables[other.var_id()].decision_level)
                .max()
                .unwrap_or(1)
        };

        let var = lit.var_id();
        {
            let v = &mut self.variables[var];
            v.is_set = true;
            v.set_sign = lit.is_positive();
            v.decision_level = level;
            v.implication_clause = Some(clause_id);
        }
        self.clauses[clause_id].is_subsumed = true;
        for used_id in self.variables[var].used_clauses.clone() {
            if !self.clauses[used_id].is_subsumed {
                self.clauses[used_id].needs_checking = true;
            }
        }
        self.trail.insert_implication(lit, level, &self.variables);
        self.stats.num_implications += 1;
        log::trace!("imply {lit} via clause {clause_id} at level {level}");
    }

    /// Removes the last decision together with every implication it forced,
    /// resetting affected variables and re-examining flagged clauses without
    /// re-entering propagation (§4.7). `false` (no-op) at the start level.
    pub fn undo_decide(&mut self) -> bool {
        if self.trail.at_start_level() {
            return false;
        }
        let decision = self
            .trail
            .pop_decision()
            .expect("not at start level implies a decision exists");
        let level = self.variables[decision.var_id()].decision_level;
        log::trace!("undo decide {decision} from level {level}");

        let mut cut = self.trail.implications.len();
        while cut > 0
            && self.variables[self.trail.implications[cut - 1].var_id()].decision_level >= level
        {
            cut -= 1;
        }
        let unapplied: Vec<Literal> = self.trail.implications[cut..].to_vec();
        self.trail.truncate_implications(cut);

        for lit in unapplied.into_iter().chain(std::iter::once(decision)) {
            self.unapply(lit.var_id());
        }

        self.trail.reset_cursors();

        let flagged: Vec<ClauseId> = (1..self.clauses.len())
            .filter(|&id| self.clauses[id].needs_checking)
            .collect();
        for clause_id in flagged {
            let _ = reexamine_clause(&mut self.clauses[clause_id], &self.variables);
        }

        true
    }

    fn unapply(&mut self, var: VarId) {
        {
            let v = &mut self.variables[var];
            v.is_set = false;
            v.decision_level = 0;
            v.implication_clause = None;
        }
        for clause_id in self.variables[var].used_clauses.clone() {
            self.clauses[clause_id].needs_checking = true;
            self.clauses[clause_id].is_subsumed = false;
        }
        self.stats.num_undos += 1;
    }

    /// Installs the pending learned clause and resumes propagation (§4.6).
    /// `None` if not at the clause's assertion level, or no clause is pending.
    pub fn assert_clause(&mut self) -> Option<PropagationResult> {
        if !self.at_assertion_level() {
            return None;
        }
        let pending = self.assertion_clause.take()?;
        let mut clause = pending.clause;
        let clause_id = self.clauses.len();
        clause.index = clause_id;
        clause.watch_1 = 0;
        clause.watch_2 = 0;
        clause.was_generated = true;
        clause.needs_checking = true;
        clause.is_subsumed = false;

        for &lit in &clause.literals {
            let used = &mut self.variables[lit.var_id()].used_clauses;
            if used.len() == used.capacity() {
                used.reserve(self.config.used_clauses_growth);
            }
            used.push(clause_id);
        }
        self.clauses.push(clause);
        self.stats.num_learned_clauses += 1;
        log::debug!("installed learned clause {clause_id}");

        let outcome = match seed_clause(self, clause_id) {
            PropagationOutcome::Consistent => run_unit_resolution(self),
            conflict => conflict,
        };
        Some(self.resolve_propagation(outcome))
    }

    fn resolve_propagation(&mut self, outcome: PropagationOutcome) -> PropagationResult {
        match outcome {
            PropagationOutcome::Consistent => PropagationResult::Consistent,
            PropagationOutcome::Conflict(clause_id) => {
                self.stats.num_conflicts += 1;
                match analyze_conflict(clause_id, &mut self.variables, &self.clauses) {
                    Some(assertion) => {
                        log::debug!("conflict analyzed, assertion level {}", assertion.level);
                        self.assertion_clause = Some(assertion);
                        PropagationResult::Learned
                    }
                    None => {
                        log::debug!("conflict at start level: formula is unsatisfiable");
                        PropagationResult::Exhausted
                    }
                }
            }
        }
    }

    /// True iff a learned clause is pending at exactly the current level (§4.8).
    pub fn at_assertion_level(&self) -> bool {
        match &self.assertion_clause {
            Some(pending) => pending.level == self.trail.current_level(),
            None => false,
        }
    }

    pub fn at_start_level(&self) -> bool {
        self.trail.at_start_level()
    }

    /// True while a conflict's analysis is pending installation (§4.8).
    pub fn conflict_exists(&self) -> bool {
        self.assertion_clause.is_some()
    }

    pub(crate) fn pending_assertion_clause(&self) -> Option<&AssertionClause> {
        self.assertion_clause.as_ref()
    }

    pub fn is_subsumed(&self, clause_id: ClauseId) -> bool {
        self.clauses.get(clause_id).is_some_and(|c| c.is_subsumed)
    }

    /// True iff every clause mentioning `var` is subsumed or learned (§4.8).
    pub fn is_irrelevant_var(&self, var: VarId) -> bool {
        match self.variables.get(var) {
            Some(v) => v
                .used_clauses
                .iter()
                .all(|&cid| self.clauses[cid].is_subsumed || self.clauses[cid].was_generated),
            None => false,
        }
    }

    pub fn num_vars(&self) -> usize {
        self.variables.len().saturating_sub(1)
    }

    pub fn num_clauses(&self) -> usize {
        self.clauses.len().saturating_sub(1)
    }

    pub fn learned_clause_count(&self) -> usize {
        self.clauses.iter().filter(|c| c.was_generated).count()
    }

    pub fn variable(&self, var: VarId) -> Option<&Variable> {
        if var == 0 {
            return None;
        }
        self.variables.get(var)
    }

    pub fn clause(&self, clause_id: ClauseId) -> Option<&Clause> {
        if clause_id == 0 {
            return None;
        }
        self.clauses.get(clause_id)
    }

    /// `None` if `|value|` is zero or exceeds `num_vars` (§3).
    pub fn literal(&self, value: i64) -> Option<Literal> {
        let var = value.unsigned_abs() as usize;
        if var == 0 || var > self.num_vars() {
            None
        } else {
            Some(Literal::new(value))
        }
    }

    pub fn mark_var(&mut self, var: VarId) {
        if let Some(v) = self.variables.get_mut(var) {
            v.mark = true;
        }
    }

    pub fn unmark_var(&mut self, var: VarId) {
        if let Some(v) = self.variables.get_mut(var) {
            v.mark = false;
        }
    }

    pub fn is_marked_var(&self, var: VarId) -> bool {
        self.variables.get(var).is_some_and(|v| v.mark)
    }

    pub fn mark_clause(&mut self, clause_id: ClauseId) {
        if let Some(c) = self.clauses.get_mut(clause_id) {
            c.mark = true;
        }
    }

    pub fn unmark_clause(&mut self, clause_id: ClauseId) {
        if let Some(c) = self.clauses.get_mut(clause_id) {
            c.mark = false;
        }
    }

    pub fn is_marked_clause(&self, clause_id: ClauseId) -> bool {
        self.clauses.get(clause_id).is_some_and(|c| c.mark)
    }
}
