//! Error types for the gallery and its image sources

use thiserror::Error;

/// Result type alias for gallery operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while searching and paging through images
#[derive(Error, Debug)]
pub enum Error {
    /// A fetch was attempted without a search term
    #[error("Search query is empty")]
    EmptyQuery,

    /// Another submit or load-more is still waiting on its response
    #[error("A search request is already in flight")]
    Busy,

    /// Failed to reach the search API
    #[error("Network error: {0}")]
    Network(String),

    /// The search API answered with a non-success status
    #[error("Search API returned HTTP {status}: {body}")]
    Http { status: u16, body: String },

    /// The response body was not the expected JSON shape
    #[error("Failed to decode search response: {0}")]
    Decode(String),

    /// Invalid configuration
    #[error("Invalid configuration: {0}")]
    ConfigError(String),

    /// Filesystem error (fixtures, output pages)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic error
    #[error("{0}")]
    Other(String),
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Decode(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn http_error_message_carries_status() {
        let err = Error::Http {
            status: 400,
            body: "[ERROR 400] \"page\" is out of valid range.".into(),
        };
        assert!(err.to_string().contains("HTTP 400"));
    }

    #[test]
    fn json_errors_become_decode_errors() {
        let err: Error = serde_json::from_str::<u32>("nope").unwrap_err().into();
        assert!(matches!(err, Error::Decode(_)));
    }
}
