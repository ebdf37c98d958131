//! Error types for the CodeLoom domain.
//!
//! Uses `thiserror` for ergonomic error definitions.
//! Each bounded context has its own error variant. Every fault is caught at
//! the boundary where it occurs and converted into a user-visible error
//! report; none crosses the `process_message` boundary unhandled.

use thiserror::Error;

/// The top-level error type for all CodeLoom operations.
#[derive(Debug, Error)]
pub enum Error {
    // --- Gateway errors ---
    #[error("Gateway error: {0}")]
    Gateway(#[from] GatewayError),

    // --- Tool errors ---
    #[error("Tool error: {0}")]
    Tool(#[from] ToolError),

    // --- Configuration / wiring errors ---
    #[error("Configuration error: {message}")]
    Config { message: String },
}

/// Result type alias using our Error.
pub type Result<T> = std::result::Result<T, Error>;

// --- Bounded context errors ---

/// Faults at the model-backend boundary.
///
/// The backend is opaque and non-deterministic; these are the only shapes a
/// failure may take. The orchestrator converts each into an error report
/// without retrying.
#[derive(Debug, Clone, Error)]
pub enum GatewayError {
    #[error("Model backend unreachable: {0}")]
    Unreachable(String),

    #[error("Model reply was malformed: {0}")]
    Malformed(String),

    #[error("Model call timed out after {timeout_secs}s")]
    Timeout { timeout_secs: u64 },
}

#[derive(Debug, Clone, Error)]
pub enum ToolError {
    #[error("Tool '{0}' not found.")]
    NotFound(String),

    #[error("missing argument: {0}")]
    MissingArgument(&'static str),

    #[error("Invalid tool arguments: {0}")]
    InvalidArguments(String),

    #[error("Tool execution failed: {tool_name}: {reason}")]
    ExecutionFailed { tool_name: String, reason: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_tool_displays_name() {
        let err = Error::Tool(ToolError::NotFound("run_linter".into()));
        assert!(err.to_string().contains("run_linter"));
        assert!(err.to_string().contains("not found"));
    }

    #[test]
    fn missing_argument_matches_wire_text() {
        let err = ToolError::MissingArgument("file_path");
        assert_eq!(err.to_string(), "missing argument: file_path");
    }

    #[test]
    fn timeout_displays_duration() {
        let err = Error::Gateway(GatewayError::Timeout { timeout_secs: 30 });
        assert!(err.to_string().contains("30"));
        assert!(err.to_string().contains("timed out"));
    }

    #[test]
    fn config_error_displays_message() {
        let err = Error::Config {
            message: "unknown classifier 'none'".into(),
        };
        assert!(err.to_string().contains("Configuration error"));
        assert!(err.to_string().contains("unknown classifier"));
    }
}
