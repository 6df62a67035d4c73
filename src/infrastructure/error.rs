//! Infrastructure-level errors (wraps application errors)

use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::application::ApplicationError;

/// Failures outside chart derivation: process environment and config files.
#[derive(Error, Debug)]
pub enum InfraError {
    #[error(transparent)]
    Application(#[from] ApplicationError),

    #[error("cannot determine working directory: {0}")]
    WorkingDir(#[source] io::Error),

    #[error("cannot write {}: {source}", .path.display())]
    WriteFile {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}
