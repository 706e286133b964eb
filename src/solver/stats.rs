use std::fmt::{Display, Formatter};

/// Plain instrumentation counters. Purely observational — nothing here
/// feeds back into engine decisions (no restart schedule, no clause-deletion
/// threshold; those policies are out of scope, §1).
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Stats {
    pub num_decisions: usize,
    pub num_implications: usize,
    pub num_conflicts: usize,
    pub num_learned_clauses: usize,
    pub num_undos: usize,
}

impl Display for Stats {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "decisions:        {}", self.num_decisions)?;
        writeln!(f, "implications:     {}", self.num_implications)?;
        writeln!(f, "conflicts:        {}", self.num_conflicts)?;
        writeln!(f, "learned clauses:  {}", self.num_learned_clauses)?;
        write!(f, "undos:            {}", self.num_undos)
    }
}
