//! The uniform boundary error.

use ferret_ng::MatchError;
use thiserror::Error;

/// The single error kind surfaced across the execution boundary.
///
/// Scripts executed in a browser lose their error type on the way back to
/// the driver; only the message survives. The hub reproduces that contract:
/// argument decoding failures, matcher errors, and framework-state failures
/// all collapse into this kind, keeping the underlying message.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct ScriptError {
    message: String,
}

impl ScriptError {
    /// Wrap a message into the uniform kind.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// The page has no framework global to work with.
    pub(crate) fn framework_missing() -> Self {
        Self::new("angular could not be found on the window")
    }

    /// The message carried across the boundary.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl From<MatchError> for ScriptError {
    fn from(err: MatchError) -> Self {
        Self::new(err.to_string())
    }
}
