//! Incremental CDCL core: two-watched-literal unit propagation, First-UIP
//! conflict analysis, and trail-based decide/undo over an arena of variables
//! and clauses addressed by stable integer identities.
//!
//! This crate is the reasoning substrate, not a solver: it has no branching
//! heuristic, no restart policy, and no CNF text parser. A driver decides
//! literals, asks the engine to propagate, and installs the clauses the
//! engine learns on conflict.

pub mod error;
pub mod literal;
pub mod solver;

#[cfg(test)]
mod test_support;

pub use error::ConstructionError;
pub use literal::{ClauseId, Literal, VarId};
pub use solver::{PropagationResult, SatState};
