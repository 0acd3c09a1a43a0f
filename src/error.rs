//! Error types for data fetching and page selection.

use thiserror::Error;

/// Errors surfaced by a [`DataSource`](crate::source::DataSource) or by the
/// table widget itself.
///
/// Fetch errors never propagate out of the widget's `update()`; they are
/// logged and shown on the status line while the last good page of data stays
/// on screen.
#[derive(Debug, Error)]
pub enum Error {
    /// The API answered with a non-success status code.
    #[error("HTTP {status}: {message}")]
    Http {
        /// HTTP status code.
        status: u16,
        /// Response body, if any.
        message: String,
    },

    /// Transport-level failure talking to the API.
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    /// The response body could not be decoded into records.
    #[error("decode error: {message}")]
    Decode {
        /// Description of the decode failure.
        message: String,
    },

    /// A page outside `[1, total_pages]` was requested.
    #[error("page {requested} requested but only {total_pages} page(s) exist")]
    InvalidPage {
        /// The page number that was asked for.
        requested: usize,
        /// The number of pages that actually exist.
        total_pages: usize,
    },
}

impl Error {
    /// Creates an HTTP error from a status code and message body.
    pub fn http(status: u16, message: impl Into<String>) -> Self {
        Self::Http {
            status,
            message: message.into(),
        }
    }

    /// Creates a decode error.
    pub fn decode(message: impl Into<String>) -> Self {
        Self::Decode {
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_formats() {
        let err = Error::http(404, "not found");
        assert_eq!(err.to_string(), "HTTP 404: not found");

        let err = Error::InvalidPage {
            requested: 12,
            total_pages: 10,
        };
        assert_eq!(
            err.to_string(),
            "page 12 requested but only 10 page(s) exist"
        );
    }
}
