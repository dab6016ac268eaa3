/// CLI error types
use resonance_core::CoreError;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, CliError>;

#[derive(Debug, Error)]
pub enum CliError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Unknown command: {0} (try `help`)")]
    UnknownCommand(String),

    #[error("Invalid arguments for `{command}`: {message}")]
    InvalidArgument {
        command: &'static str,
        message: String,
    },

    #[error(transparent)]
    Core(#[from] CoreError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl CliError {
    pub(crate) fn invalid(command: &'static str, message: impl Into<String>) -> Self {
        Self::InvalidArgument {
            command,
            message: message.into(),
        }
    }
}
