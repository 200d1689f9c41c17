//! Error types shared across the toolkit.
//!
//! Routing never produces errors: an unmatched invocation is the ordinary
//! [`Dispatch::NotFound`](crate::router::Dispatch::NotFound) value. The types
//! here cover handler failures, the animation engine losing its worker, and
//! configuration parsing.

use thiserror::Error;

/// Exit code used by [`Failure::new`] and for unmatched commands.
pub const EXIT_FAILURE: i32 = 1;

/// A handler aborting its own unit of work.
///
/// Returned up the call chain to [`App::run`](crate::app::App::run), which
/// prints the highlighted message and hands back `code` as the process exit
/// code.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct Failure {
    pub message: String,
    pub code: i32,
}

impl Failure {
    pub fn new(message: impl Into<String>) -> Self {
        Self::with_code(message, EXIT_FAILURE)
    }

    pub fn with_code(message: impl Into<String>, code: i32) -> Self {
        Self {
            message: message.into(),
            code,
        }
    }
}

impl From<anyhow::Error> for Failure {
    fn from(err: anyhow::Error) -> Self {
        Failure::new(format!("{err:#}"))
    }
}

impl From<AnimationError> for Failure {
    fn from(err: AnimationError) -> Self {
        Failure::new(err.to_string())
    }
}

/// Result type returned by command handlers.
pub type HandlerResult = Result<(), Failure>;

/// The background loop behind a progress bar or spinner went away.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AnimationError {
    /// The worker's channel is closed; it can no longer accept messages.
    #[error("{0} render loop is no longer running")]
    Disconnected(&'static str),

    /// The worker exited without confirming completion.
    #[error("{0} render loop exited before confirming completion")]
    Unconfirmed(&'static str),

    /// The worker thread panicked.
    #[error("{0} render loop panicked")]
    Panicked(&'static str),
}

/// Configuration parsing error.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid configuration: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("unknown easing '{0}' (expected linear, ease-in or ease-out)")]
    UnknownEasing(String),

    #[error("progress width must be at least 1")]
    ZeroWidth,
}
