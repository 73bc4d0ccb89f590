//! CLI-specific error types and exit code mapping

use logfwd_core::error::LogfwdError;
use logfwd_forwarding::ForwardingError;

/// CLI-specific error type.
///
/// Each variant carries enough context for a user-friendly message.
/// The `exit_code()` method maps errors to standard Unix exit codes.
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    /// Configuration loading or validation failure.
    #[error("configuration error: {0}")]
    Config(String),

    /// A subcommand-specific operation failed.
    #[error("{0}")]
    Command(String),

    /// The spec normalized, but some entities were dropped or degraded.
    #[error("spec rejected: {0}")]
    Rejected(String),

    /// Normalization aborted (missing log store, secret backend failure, unreadable spec).
    #[error("{0}")]
    Forwarding(#[from] ForwardingError),

    /// JSON serialisation failed during output rendering.
    #[error("json output error: {0}")]
    JsonSerialize(#[from] serde_json::Error),

    /// IO error (file read, stdout write, etc.).
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Wrapped domain error from logfwd-core.
    #[error("{0}")]
    Core(#[from] LogfwdError),
}

impl CliError {
    /// Map the error to a process exit code.
    ///
    /// | Code | Meaning                                  |
    /// |------|------------------------------------------|
    /// | 0    | Success                                  |
    /// | 1    | General / command / normalization error  |
    /// | 2    | Configuration error                      |
    /// | 3    | Spec has dropped or degraded entities    |
    /// | 10   | IO error                                 |
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Config(_) | Self::Core(LogfwdError::Config(_)) => 2,
            Self::Rejected(_) => 3,
            Self::Io(_) => 10,
            Self::Forwarding(_) | Self::JsonSerialize(_) | Self::Command(_) | Self::Core(_) => 1,
        }
    }
}
