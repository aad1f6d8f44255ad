//! # Shell Error Type
//!
//! Everything that can go wrong in the shell. None of it is fatal to a
//! session: a bad command is reported and the prompt comes back.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  typed line ──► Command::parse ──► Session::execute ──► StateStore     │
//! │                     │                    │                              │
//! │                     ▼                    ▼                              │
//! │              UnknownCommand        Core(ProductNotFound)                │
//! │              MissingArgument       Core(UnknownPage)                    │
//! │              InvalidArgument                                            │
//! │                                                                         │
//! │  startup ──► ShellConfig::load ──► Config / ConfigParse / Io           │
//! │              (these abort startup)                                      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use pitwall_core::CoreError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ShellError {
    /// Configuration values failed validation.
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// Config file is not valid TOML for `ShellConfig`.
    #[error("Failed to parse config file: {0}")]
    ConfigParse(#[from] toml::de::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to encode snapshot: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Unknown command: '{0}'. Type 'help' for a list of commands")]
    UnknownCommand(String),

    #[error("'{command}' needs {argument}")]
    MissingArgument {
        command: &'static str,
        argument: &'static str,
    },

    #[error("Invalid {argument}: '{value}'")]
    InvalidArgument {
        argument: &'static str,
        value: String,
    },

    /// A core lookup or parse failed (unknown product, page, trigger...).
    #[error(transparent)]
    Core(#[from] CoreError),
}

impl ShellError {
    /// Short machine-readable code, printed in JSON render mode.
    pub fn code(&self) -> &'static str {
        match self {
            ShellError::Config(_) | ShellError::ConfigParse(_) => "CONFIG_ERROR",
            ShellError::Io(_) | ShellError::Json(_) => "INTERNAL",
            ShellError::UnknownCommand(_)
            | ShellError::MissingArgument { .. }
            | ShellError::InvalidArgument { .. } => "BAD_COMMAND",
            ShellError::Core(CoreError::ProductNotFound(_))
            | ShellError::Core(CoreError::CategoryNotFound(_)) => "NOT_FOUND",
            ShellError::Core(_) => "VALIDATION_ERROR",
        }
    }
}

pub type ShellResult<T> = Result<T, ShellError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        let err = ShellError::Core(CoreError::ProductNotFound("x".to_string()));
        assert_eq!(err.code(), "NOT_FOUND");
        assert_eq!(err.to_string(), "Product not found: x");

        let err = ShellError::MissingArgument {
            command: "add",
            argument: "a product id",
        };
        assert_eq!(err.code(), "BAD_COMMAND");
        assert_eq!(err.to_string(), "'add' needs a product id");
    }
}
