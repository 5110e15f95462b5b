/// Error types for dashboard fetches
use thiserror::Error;

/// Message shown when a failure carries no text of its own.
pub const GENERIC_ERROR_MESSAGE: &str = "An error occurred";

/// A failure local to one panel's fetch.
///
/// The `Display` output is the text shown in the panel's error banner.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FetchError {
    /// The service answered with a non-2xx status
    #[error("HTTP error! status: {0}")]
    Status(u16),

    /// The request never produced a response
    #[error("{0}")]
    Transport(String),

    /// The response body could not be read or parsed
    #[error("{0}")]
    Decode(String),

    /// The JSON payload matched none of the known shapes
    #[error("Unexpected response shape: {0}")]
    UnexpectedShape(String),

    /// A local image handle could not be created
    #[error("Failed to create image handle: {0}")]
    ObjectUrl(String),
}

impl FetchError {
    /// Transport failure, falling back to the generic message for empty text.
    pub fn transport(message: impl Into<String>) -> Self {
        FetchError::Transport(or_generic(message.into()))
    }

    /// Decode failure, falling back to the generic message for empty text.
    pub fn decode(message: impl Into<String>) -> Self {
        FetchError::Decode(or_generic(message.into()))
    }

    /// The HTTP status, if this is a status failure.
    pub fn status(&self) -> Option<u16> {
        match self {
            FetchError::Status(code) => Some(*code),
            _ => None,
        }
    }
}

fn or_generic(message: String) -> String {
    if message.trim().is_empty() {
        GENERIC_ERROR_MESSAGE.to_string()
    } else {
        message
    }
}

impl From<serde_json::Error> for FetchError {
    fn from(e: serde_json::Error) -> Self {
        FetchError::decode(e.to_string())
    }
}
