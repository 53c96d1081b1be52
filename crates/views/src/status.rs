//! Transient success and error messages shown above a view.

use std::fmt;

use scenevault_client::ClientError;
use scenevault_core::error::CoreError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusKind {
    Success,
    Error,
}

/// A one-line message for the user. Replaced by the next operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusMessage {
    pub kind: StatusKind,
    pub text: String,
}

impl StatusMessage {
    pub fn success(text: impl Into<String>) -> Self {
        Self {
            kind: StatusKind::Success,
            text: text.into(),
        }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self {
            kind: StatusKind::Error,
            text: text.into(),
        }
    }

    pub fn is_error(&self) -> bool {
        self.kind == StatusKind::Error
    }
}

impl fmt::Display for StatusMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

impl From<CoreError> for StatusMessage {
    fn from(err: CoreError) -> Self {
        Self::error(core_reason(&err))
    }
}

/// User-facing text of a domain error, without the variant prefix.
pub fn core_reason(err: &CoreError) -> String {
    match err {
        CoreError::Validation(msg) | CoreError::Unauthorized(msg) | CoreError::Forbidden(msg) => {
            msg.clone()
        }
        CoreError::NotFound { .. } => err.to_string(),
    }
}

/// User-facing text of a failed API call.
///
/// The server's `detail` wins when it sent one.
pub fn client_reason(err: &ClientError) -> String {
    match err {
        ClientError::Status {
            detail: Some(detail),
            ..
        } => detail.clone(),
        ClientError::Status {
            status,
            detail: None,
        } => format!("server responded with status {status}"),
        ClientError::Request(_) => "server unreachable".into(),
        ClientError::Decode(_) => "unexpected response from server".into(),
        ClientError::Unauthenticated => "not signed in".into(),
    }
}
