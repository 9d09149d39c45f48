//! Probe error type for retry classification.

use std::fmt;

/// Error returned by a single HEAD probe. Both variants are transport
/// failures from the worker's point of view.
#[derive(Debug)]
pub enum ProbeError {
    /// Curl reported an error (timeout, DNS, connection, TLS, bad URL).
    Curl(curl::Error),
    /// Final response had a non-2xx status.
    Http(u32),
}

impl From<curl::Error> for ProbeError {
    fn from(e: curl::Error) -> Self {
        ProbeError::Curl(e)
    }
}

impl fmt::Display for ProbeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProbeError::Curl(e) => write!(f, "{}", e),
            ProbeError::Http(code) => write!(f, "HTTP {}", code),
        }
    }
}

impl std::error::Error for ProbeError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ProbeError::Curl(e) => Some(e),
            ProbeError::Http(_) => None,
        }
    }
}
