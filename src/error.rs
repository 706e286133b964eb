use thiserror::Error;

/// Malformed-input conditions rejected while building a [`SatState`] from
/// already-parsed clause data (§4.1 of the design: the text-to-integers step
/// is an external collaborator, but validating the integers is this crate's
/// job).
///
/// [`SatState`]: crate::solver::state::SatState
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConstructionError {
    #[error("clause {clause} contains a zero literal, which is not a valid variable reference")]
    ZeroLiteral { clause: usize },

    #[error(
        "clause {clause} references variable {var}, outside the declared range 1..={num_vars}"
    )]
    VariableOutOfRange {
        clause: usize,
        var: i64,
        num_vars: usize,
    },
}
