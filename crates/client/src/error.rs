/// Errors from the SceneVault REST API layer.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// The HTTP request itself failed (network, DNS, TLS, timeout, etc.).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The API returned a non-2xx status code.
    #[error("API error ({status}): {}", detail.as_deref().unwrap_or("no details"))]
    Status {
        /// HTTP status code.
        status: u16,
        /// The `detail` field of the error body, when the API sent one.
        detail: Option<String>,
    },

    /// The response body was absent or not the expected JSON.
    #[error("Malformed response body: {0}")]
    Decode(String),

    /// The operation needs a bearer credential and the session has none.
    #[error("Not signed in")]
    Unauthenticated,
}

impl ClientError {
    /// HTTP status code, for [`ClientError::Status`].
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }

    /// The API's own explanation of a rejected request, if any.
    pub fn detail(&self) -> Option<&str> {
        match self {
            Self::Status { detail, .. } => detail.as_deref(),
            _ => None,
        }
    }
}
