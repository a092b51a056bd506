// SPDX-License-Identifier: Apache-2.0

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryError {
    /// Malformed or semantically invalid cursor token. Caller's fault.
    Cursor(String),
    /// Request violates engine bounds (page size). Caller's fault.
    Validation(String),
    /// The content store failed or is unreachable. Retryable by callers.
    Store(String),
}

impl QueryError {
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        matches!(self, Self::Store(_))
    }
}

impl std::fmt::Display for QueryError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Cursor(msg) | Self::Validation(msg) | Self::Store(msg) => f.write_str(msg),
        }
    }
}

impl std::error::Error for QueryError {}
