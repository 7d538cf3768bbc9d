use std::fmt;
use thiserror::Error;

/// Exit codes for the CLI application.
///
/// These codes allow test pipelines to distinguish a negative answer
/// (e.g. "do not retry") from a broken invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ExitCode {
    /// Success - the command ran and its condition holds
    Success = 0,
    /// The command ran but its condition does not hold (verification failed, no retry)
    ConditionNotMet = 1,
    /// Invalid command-line arguments (clap parsing errors)
    InvalidArguments = 2,
    /// Application error (store error, network error, file I/O error, etc.)
    ApplicationError = 3,
}

impl ExitCode {
    /// Convert to i32 for use with std::process::exit
    pub fn as_i32(self) -> i32 {
        self as i32
    }
}

impl fmt::Display for ExitCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExitCode::Success => write!(f, "Success (0)"),
            ExitCode::ConditionNotMet => write!(f, "Condition Not Met (1)"),
            ExitCode::InvalidArguments => write!(f, "Invalid Arguments (2)"),
            ExitCode::ApplicationError => write!(f, "Application Error (3)"),
        }
    }
}

/// Errors raised by the property bookkeeping layer.
///
/// Exhausting the inspection retry budget is deliberately not an error;
/// see `InspectionPropertyService::fail_inspection`.
#[derive(Debug, Error)]
pub enum PropertyError {
    #[error("Failed to find the property {property} at {repo_path}.\n\n💡 Hint: The item was expected to carry this property; its metadata may have been modified externally")]
    MissingProperty { property: String, repo_path: String },

    #[error("Invalid value '{value}' for property {property} at {repo_path}\nDetails: {details}")]
    InvalidPropertyValue {
        property: String,
        repo_path: String,
        value: String,
        details: String,
    },

    #[error("Invalid repository path: '{path}'\nReason: {reason}\n\n💡 Hint: Use the form <repository-key>/<relative/path>")]
    InvalidRepoPath { path: String, reason: String },

    #[error("The plugin failed to inspect {repo_path}.\nDetails: {details}")]
    InspectionFailed { repo_path: String, details: String },

    #[error("Timed out waiting for {repo_path} to reach inspection status {expected} after {attempts} attempts")]
    InspectionTimedOut {
        repo_path: String,
        expected: String,
        attempts: u32,
    },

    #[error("Property store request failed: {operation}\nDetails: {details}\n\n💡 Hint: Please verify the Artifactory URL and credentials")]
    StoreError { operation: String, details: String },

    /// Validation error for configuration and arguments
    #[error("Validation error: {message}")]
    Validation { message: String },
}
