//! Domain-level errors (no external dependencies)

use thiserror::Error;

/// Domain errors represent hierarchy violations.
/// These are independent of infrastructure concerns.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("no root found: every record declares a manager")]
    NoRootFound,

    #[error("ambiguous root: {} records have no manager ({})", candidates.len(), candidates.join(", "))]
    AmbiguousRoot { candidates: Vec<String> },

    #[error("root not resolvable: no record for employee id {0}")]
    RootNotResolvable(String),

    #[error("employee not found in chart: {0}")]
    EmployeeNotFound(String),
}
