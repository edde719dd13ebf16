//! Fatal error taxonomy
//!
//! Every variant aborts the run; main prints the message with the
//! "Exiting now!" suffix and exits 1. Recoverable conditions (an unreadable
//! directory, a failing extraction) never become an `Error` - they are
//! reported to stderr where they occur and the scan continues.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    /// Malformed or contradictory arguments, unresolvable pattern or file set.
    #[error("{0}")]
    Usage(String),

    /// A required external program is not on PATH.
    #[error("Required program '{0}' was not found on your system.")]
    MissingPrerequisite(String),

    /// The requested save destination already exists.
    #[error("Cannot save the report to '{0}': the file already exists.")]
    OutputCollision(PathBuf),

    /// No usable temporary location for the paged report.
    #[error("{0}")]
    TempResource(String),
}

impl Error {
    pub fn usage(message: impl Into<String>) -> Self {
        Error::Usage(message.into())
    }
}
