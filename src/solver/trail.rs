use crate::literal::Literal;
use crate::solver::variable::Variable;

/// The ordered record of every literal that's currently set, split into the
/// two sequences described in §3: decisions (one per level) and implications
/// (forced by unit propagation), each with a cursor marking how far the
/// propagator has consumed it.
#[derive(Debug, Default, Clone)]
pub struct Trail {
    pub decisions: Vec<Literal>,
    pub implications: Vec<Literal>,
    pub decisions_applied: usize,
    pub implications_applied: usize,
}

impl Trail {
    pub fn new() -> Self {
        Trail::default()
    }

    /// The level a new decision would be assigned (§3: start level 1, first
    /// decision at level 2).
    pub fn current_level(&self) -> usize {
        self.decisions.len() + 1
    }

    pub fn at_start_level(&self) -> bool {
        self.decisions.is_empty()
    }

    pub fn push_decision(&mut self, lit: Literal) {
        self.decisions.push(lit);
    }

    pub fn pop_decision(&mut self) -> Option<Literal> {
        self.decisions.pop()
    }

    /// Inserts a forced literal at the rightmost position that keeps
    /// `implications` non-decreasing in decision level (§4.2 Imply). Appends
    /// in the common case; falls back to a backward-shift insert only when
    /// the new literal's level is below the trail's current tail.
    pub fn insert_implication(&mut self, lit: Literal, level: usize, variables: &[Variable]) {
        let tail_level = self
            .implications
            .last()
            .map(|last| variables[last.var_id()].decision_level);
        match tail_level {
            None => self.implications.push(lit),
            Some(tail_level) if level >= tail_level => self.implications.push(lit),
            Some(_) => {
                let mut pos = self.implications.len();
                while pos > 0
                    && variables[self.implications[pos - 1].var_id()].decision_level > level
                {
                    pos -= 1;
                }
                self.implications.insert(pos, lit);
            }
        }
    }

    /// Drops every implication from `from` (inclusive) to the end, rolling
    /// the size back. Used by undo (§4.7), which truncates from the tail.
    pub fn truncate_implications(&mut self, from: usize) {
        self.implications.truncate(from);
    }

    pub fn reset_cursors(&mut self) {
        self.decisions_applied = self.decisions.len();
        self.implications_applied = self.implications.len();
    }
}
