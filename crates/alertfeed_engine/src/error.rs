use alertfeed_core::RemoteFailure;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GatewayError {
    /// The call did not complete: connection refused, timeout, bad base URL.
    #[error("network error: {0}")]
    Network(String),
    /// Non-success status. `message` is the body's `error` field, empty when absent.
    #[error("http {status}: {message}")]
    Http { status: u16, message: String },
    #[error("could not decode response: {0}")]
    Decode(String),
}

impl From<GatewayError> for RemoteFailure {
    fn from(err: GatewayError) -> Self {
        match err {
            GatewayError::Network(message) => RemoteFailure::network(message),
            GatewayError::Http { status, message } => RemoteFailure::http(status, message),
            GatewayError::Decode(message) => {
                RemoteFailure::new(alertfeed_core::RemoteFailureKind::Decode, message)
            }
        }
    }
}

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("failed to start async runtime: {0}")]
    Runtime(#[from] std::io::Error),
    #[error(transparent)]
    Gateway(#[from] GatewayError),
}
