//! CLI-level errors (wraps infrastructure errors)

use thiserror::Error;

use crate::application::ApplicationError;
use crate::domain::DomainError;
use crate::infrastructure::InfraError;

/// CLI errors are the top-level error type.
/// These are what get displayed to the user.
#[derive(Error, Debug)]
pub enum CliError {
    #[error("{0}")]
    Infra(#[from] InfraError),

    #[error("{0}")]
    Usage(String),
}

/// Result type for CLI operations.
pub type CliResult<T> = Result<T, CliError>;

impl CliError {
    /// Get the appropriate exit code for this error.
    ///
    /// A missing chart (no resolvable root) is a data error, distinct from
    /// unreadable input and from internal failures.
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::Usage(_) => crate::exitcode::USAGE,
            CliError::Infra(e) => match e {
                InfraError::WorkingDir(_) | InfraError::WriteFile { .. } => {
                    crate::exitcode::IOERR
                }
                InfraError::Application(app) => match app {
                    ApplicationError::Domain(DomainError::EmployeeNotFound(_)) => {
                        crate::exitcode::USAGE
                    }
                    ApplicationError::Domain(_)
                    | ApplicationError::Csv { .. }
                    | ApplicationError::ChartTooDeep { .. } => crate::exitcode::DATAERR,
                    ApplicationError::InputNotFound(_) => crate::exitcode::NOINPUT,
                    ApplicationError::Config { .. } => crate::exitcode::CONFIG,
                    ApplicationError::OperationFailed { .. } => crate::exitcode::IOERR,
                    ApplicationError::Json(_) => crate::exitcode::SOFTWARE,
                },
            },
        }
    }
}
