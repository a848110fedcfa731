//! Error types for listing data sources.

use thiserror::Error;

/// Why a page could not be produced.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum ListError {
    /// The request never got a response (connect, DNS, timeout).
    #[error("network error: {0}")]
    Transport(String),

    /// The server answered with a non-success status.
    #[error("server returned {status}: {message}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Response body, or the reason phrase when the body is empty.
        message: String,
    },

    /// The response body did not have the expected shape.
    #[error("could not decode response: {0}")]
    Decode(String),

    /// Settings were missing or invalid.
    #[error("configuration error: {0}")]
    Config(String),
}

impl ListError {
    /// Inline text shown in place of the table rows.
    #[must_use]
    pub fn user_message(&self) -> &str {
        match self {
            Self::Transport(_) => "Could not reach the server. Check your connection.",
            Self::Status { status: 401 | 403, .. } => "You are not allowed to view this list.",
            Self::Status { status: 404, .. } => "This list is not available.",
            Self::Status { status, .. } if *status >= 500 => {
                "The server had a problem loading this list."
            }
            Self::Status { .. } => "The server rejected the request.",
            Self::Decode(_) => "The server sent data this console does not understand.",
            Self::Config(_) => "The console is not configured for this list.",
        }
    }

    /// Whether refetching the same query might succeed.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Transport(_) => true,
            Self::Status { status, .. } => *status == 408 || *status == 429 || *status >= 500,
            Self::Decode(_) | Self::Config(_) => false,
        }
    }
}

impl From<reqwest::Error> for ListError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            Self::Decode(err.to_string())
        } else {
            Self::Transport(err.to_string())
        }
    }
}

impl From<serde_json::Error> for ListError {
    fn from(err: serde_json::Error) -> Self {
        Self::Decode(err.to_string())
    }
}

impl From<toml::de::Error> for ListError {
    fn from(err: toml::de::Error) -> Self {
        Self::Config(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, ListError>;
