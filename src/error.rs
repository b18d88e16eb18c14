// src/error.rs
// =============================================================================
// Error types for fetching pages and robots.txt files.
//
// These errors never escape the crawler: the fetch, permission and link
// extraction layers log them and fall back to a safe default (an empty
// page, "not permitted", an empty link set). They exist so the log lines
// say exactly what went wrong, and so the robots.txt logic can tell a
// 404 (no policy, allow everything) from a 403 (deny everything).
// =============================================================================

use thiserror::Error;

#[derive(Error, Debug)]
pub enum FetchError {
    /// The address could not be parsed as an absolute URL
    #[error("invalid URL '{url}': {reason}")]
    InvalidUrl { url: String, reason: String },

    /// We only know how to fetch http, https and file URLs
    #[error("unsupported scheme '{0}'")]
    UnsupportedScheme(String),

    /// Connection, DNS, TLS or body-read failure from the HTTP client
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The server answered, but not with a 2xx status
    #[error("HTTP {0}")]
    Status(u16),

    /// The body was not valid UTF-8
    #[error("could not decode content as UTF-8: {0}")]
    Decode(#[from] std::string::FromUtf8Error),

    /// Reading a local file failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl FetchError {
    /// The HTTP status code, if the server sent one
    pub fn status(&self) -> Option<u16> {
        match self {
            FetchError::Status(code) => Some(*code),
            _ => None,
        }
    }
}

pub type FetchResult<T> = std::result::Result<T, FetchError>;
