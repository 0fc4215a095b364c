//! Error types for the AQL builder.

use thiserror::Error;

/// The main error type for builder and execution operations.
#[derive(Debug, Error)]
pub enum AqlError {
    /// LET or FOR tried to declare a variable that already exists.
    #[error("Variable '{0}' is already declared in this query")]
    DuplicateVariable(String),

    /// A bind parameter key was added twice.
    #[error("Bind parameter '{0}' is already set")]
    DuplicateParameter(String),

    /// A value has no AQL literal form.
    #[error("Invalid literal: {0}")]
    InvalidLiteral(String),

    /// Passed through untouched from the query executor.
    #[error(transparent)]
    Executor(#[from] ExecutorError),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl AqlError {
    /// Create an invalid literal error.
    pub fn invalid_literal(message: impl Into<String>) -> Self {
        Self::InvalidLiteral(message.into())
    }
}

/// Errors reported by a [`QueryExecutor`](crate::engine::QueryExecutor).
#[derive(Debug, Error)]
pub enum ExecutorError {
    /// The round trip itself failed (connect, timeout, broken body).
    #[error("Transport error: {0}")]
    Transport(String),

    /// The server rejected the query.
    #[error("Server error {code} [error number {error_num}]: {message}")]
    Server {
        code: u16,
        error_num: u32,
        message: String,
    },

    /// The response could not be decoded.
    #[error("Decode error: {0}")]
    Decode(String),
}

/// Result type alias for AQL operations.
pub type AqlResult<T> = Result<T, AqlError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = AqlError::DuplicateVariable("doc".to_string());
        assert_eq!(err.to_string(), "Variable 'doc' is already declared in this query");
    }

    #[test]
    fn test_executor_error_is_transparent() {
        let err: AqlError = ExecutorError::Server {
            code: 400,
            error_num: 1501,
            message: "syntax error".to_string(),
        }
        .into();
        assert_eq!(
            err.to_string(),
            "Server error 400 [error number 1501]: syntax error"
        );
        assert!(matches!(err, AqlError::Executor(ExecutorError::Server { .. })));
    }
}
