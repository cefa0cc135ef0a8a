use std::fmt;

use thiserror::Error;

/// Local rule violations. They block the network call and are shown inline next to
/// the offending field; `Display` is the inline text.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationFailure {
    #[error("Enter a URL first.")]
    EmptyUrl,
    #[error("URL already added.")]
    DuplicateUrl,
    #[error("Select at least one exam category.")]
    NoCategories,
    #[error("Minimum age cannot be greater than maximum age.")]
    AgeRange { min: u32, max: u32 },
    #[error("Add at least one monitored URL.")]
    NoMonitoredUrls,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RemoteFailureKind {
    /// The call did not complete.
    Network,
    /// The remote answered with a non-success status.
    Http(u16),
    /// The remote answered with success but the payload was not understood.
    Decode,
}

/// A failed call as seen by the stores.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteFailure {
    pub kind: RemoteFailureKind,
    pub message: String,
}

impl RemoteFailure {
    pub fn new(kind: RemoteFailureKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub fn network(message: impl Into<String>) -> Self {
        Self::new(RemoteFailureKind::Network, message)
    }

    pub fn http(status: u16, message: impl Into<String>) -> Self {
        Self::new(RemoteFailureKind::Http(status), message)
    }

    /// The server-provided message, if this failure carries one worth showing.
    pub fn server_message(&self) -> Option<&str> {
        match self.kind {
            RemoteFailureKind::Http(_) if !self.message.is_empty() => Some(&self.message),
            _ => None,
        }
    }

    /// Human-readable detail, falling back to the status when the body had none.
    pub fn describe(&self) -> String {
        match self.kind {
            _ if !self.message.is_empty() => self.message.clone(),
            RemoteFailureKind::Http(status) => format!("Request failed with status {status}"),
            _ => "Request failed".to_string(),
        }
    }
}

impl fmt::Display for RemoteFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            RemoteFailureKind::Network => write!(f, "network error: {}", self.message),
            RemoteFailureKind::Http(status) => write!(f, "http {status}: {}", self.message),
            RemoteFailureKind::Decode => write!(f, "unexpected response: {}", self.message),
        }
    }
}

impl std::error::Error for RemoteFailure {}
