//! Error taxonomy. `ErrorKind` is attached at the point an error is raised
//! rather than reconstructed from its message later; `classify_message` is
//! kept only as the documented fallback for errors that arrive as bare
//! text from outside the crate (e.g. a host `SafeFunction` returning a
//! plain `String` error).

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    Timeout,
    Security,
    Type,
    Syntax,
    Runtime,
}

impl ErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::Timeout => "timeout",
            ErrorKind::Security => "security",
            ErrorKind::Type => "type",
            ErrorKind::Syntax => "syntax",
            ErrorKind::Runtime => "runtime",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, thiserror::Error)]
#[error("{message}")]
pub struct EvalError {
    pub kind: ErrorKind,
    pub message: String,
}

impl EvalError {
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub fn timeout(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Timeout, message)
    }

    pub fn security(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Security, message)
    }

    pub fn type_error(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Type, message)
    }

    pub fn syntax(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Syntax, message)
    }

    pub fn runtime(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Runtime, message)
    }

    /// Builds an error from host-supplied text with no declared kind,
    /// classifying it by keyword per the documented priority order.
    pub fn from_message(message: impl Into<String>) -> Self {
        let message = message.into();
        let kind = classify_message(&message);
        Self::new(kind, message)
    }
}

/// Case-insensitive substring match against {timeout; blocked, security;
/// type, argument; syntax, invalid}, in that priority. Unmatched messages
/// fall to `runtime`.
pub fn classify_message(message: &str) -> ErrorKind {
    let lower = message.to_lowercase();
    if lower.contains("timeout") {
        ErrorKind::Timeout
    } else if lower.contains("blocked") || lower.contains("security") {
        ErrorKind::Security
    } else if lower.contains("type") || lower.contains("argument") {
        ErrorKind::Type
    } else if lower.contains("syntax") || lower.contains("invalid") {
        ErrorKind::Syntax
    } else {
        ErrorKind::Runtime
    }
}
