//! Error kinds for triviacraft operations

use std::fmt;

/// The kind of error that occurred.
///
/// Callers match on the kind to decide how to react; the view layer collapses
/// all of them into a single notice, but logs keep the distinction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum ErrorKind {
    // =========================================================================
    // General errors
    // =========================================================================
    /// An unexpected error occurred - catch-all for unhandled cases
    Unexpected,

    /// Invalid configuration or parameters
    ConfigInvalid,

    // =========================================================================
    // Generation errors
    // =========================================================================
    /// The generation endpoint could not be reached or answered with a
    /// non-success status
    Transport,

    /// The response carried no generated text at the expected location
    EmptyResponse,

    /// Generated text was present but did not decode into a trivia item
    MalformedPayload,
}

impl ErrorKind {
    /// Returns the error kind as a static string
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::Unexpected => "Unexpected",
            ErrorKind::ConfigInvalid => "ConfigInvalid",

            ErrorKind::Transport => "Transport",
            ErrorKind::EmptyResponse => "EmptyResponse",
            ErrorKind::MalformedPayload => "MalformedPayload",
        }
    }

    /// Check if this error kind is retryable by default
    pub fn is_retryable(&self) -> bool {
        matches!(self, ErrorKind::Transport)
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_kind_display() {
        assert_eq!(ErrorKind::Transport.to_string(), "Transport");
        assert_eq!(ErrorKind::MalformedPayload.to_string(), "MalformedPayload");
    }

    #[test]
    fn test_is_retryable() {
        assert!(ErrorKind::Transport.is_retryable());
        assert!(!ErrorKind::EmptyResponse.is_retryable());
        assert!(!ErrorKind::MalformedPayload.is_retryable());
        assert!(!ErrorKind::ConfigInvalid.is_retryable());
    }
}
