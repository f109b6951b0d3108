//! Error types for the API client.

/// Errors that can occur when making API requests.
///
/// [`Error::Auth`] is a narrower kind of API error: [`Error::is_api_error`]
/// is true for both it and [`Error::Api`], so callers can match broadly or
/// narrowly.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// The API rejected the key (HTTP 401 or 403).
    #[error("{message}")]
    Auth {
        status: u16,
        message: String,
        body: String,
    },
    /// Any other non-success status, or a success body that could not be decoded.
    #[error("{message}")]
    Api {
        status: u16,
        message: String,
        body: String,
    },
    /// The caller's cancellation signal fired before the request completed.
    #[error("Request cancelled")]
    Cancelled,
    /// The request never produced a response (connect failure, timeout, broken body).
    #[error("Request failed")]
    Transport(#[from] reqwest::Error),
    /// The configured base URL cannot be used to build endpoint URLs.
    #[error("Invalid base URL: {0}")]
    InvalidBaseUrl(String),
}

impl Error {
    /// Builds the error for a non-success response, classifying 401/403 as [`Error::Auth`].
    pub(crate) fn from_status(status: u16, message: String, body: String) -> Self {
        match status {
            401 | 403 => Error::Auth {
                status,
                message,
                body,
            },
            _ => Error::Api {
                status,
                message,
                body,
            },
        }
    }

    /// True for every error the API itself reported, authentication errors included.
    pub fn is_api_error(&self) -> bool {
        matches!(self, Error::Auth { .. } | Error::Api { .. })
    }

    pub fn is_auth_error(&self) -> bool {
        matches!(self, Error::Auth { .. })
    }

    pub fn is_cancelled(&self) -> bool {
        matches!(self, Error::Cancelled)
    }

    /// HTTP status code of the response, when there was one.
    pub fn status(&self) -> Option<u16> {
        match self {
            Error::Auth { status, .. } | Error::Api { status, .. } => Some(*status),
            Error::Transport(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// Message extracted from the error body, or the generated fallback.
    pub fn message(&self) -> Option<&str> {
        match self {
            Error::Auth { message, .. } | Error::Api { message, .. } => Some(message),
            _ => None,
        }
    }

    /// Raw response body as returned by the API.
    pub fn body(&self) -> Option<&str> {
        match self {
            Error::Auth { body, .. } | Error::Api { body, .. } => Some(body),
            _ => None,
        }
    }
}
