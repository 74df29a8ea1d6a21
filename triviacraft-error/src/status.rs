//! Error status: how a caller may treat an error

use std::fmt;

/// Whether an error is expected to go away on its own.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorStatus {
    /// Will fail again with the same input
    Permanent,
    /// May succeed if attempted again later
    Temporary,
}

impl ErrorStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorStatus::Permanent => "permanent",
            ErrorStatus::Temporary => "temporary",
        }
    }

    pub fn is_retryable(&self) -> bool {
        *self == ErrorStatus::Temporary
    }
}

impl fmt::Display for ErrorStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
