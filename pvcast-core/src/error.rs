use reqwest::StatusCode;

use crate::backend::Endpoint;

/// Failure of a single backend call.
#[derive(Debug, thiserror::Error)]
pub enum BackendError {
    /// Non-2xx response. `message` is the service's `error` field, or a
    /// generic status-coded text when the body did not carry one.
    #[error("{message}")]
    Status {
        endpoint: Endpoint,
        status: StatusCode,
        message: String,
    },

    #[error("{endpoint} request failed: {source}")]
    Transport {
        endpoint: Endpoint,
        #[source]
        source: reqwest::Error,
    },

    #[error("{endpoint} response could not be parsed: {source}")]
    Decode {
        endpoint: Endpoint,
        #[source]
        source: serde_json::Error,
    },
}

impl BackendError {
    pub fn endpoint(&self) -> Endpoint {
        match self {
            Self::Status { endpoint, .. }
            | Self::Transport { endpoint, .. }
            | Self::Decode { endpoint, .. } => *endpoint,
        }
    }
}
