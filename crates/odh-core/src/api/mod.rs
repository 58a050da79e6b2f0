//! Backend collaborator seam.
//!
//! The poller and the toggle/delete flows only see [`ConnectionTypeApi`];
//! [`HttpConnectionTypeApi`] is the production implementation.

pub mod http;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};
use crate::models::ConnectionType;

pub use http::HttpConnectionTypeApi;

/// `{ success, error }` body returned by mutating endpoints
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResponseStatus {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub error: Option<String>,
}

impl ResponseStatus {
    pub fn ok() -> Self {
        Self {
            success: true,
            error: None,
        }
    }

    pub fn rejected(error: impl Into<String>) -> Self {
        Self {
            success: false,
            error: Some(error.into()),
        }
    }

    /// Backend error text, ignoring the empty string the backend sends on success
    pub fn error_message(&self) -> Option<&str> {
        self.error.as_deref().filter(|e| !e.is_empty())
    }

    /// Collapse into a result; `fallback` is used when a rejection carries no text
    pub fn into_result(self, fallback: &str) -> CoreResult<()> {
        if self.success {
            return Ok(());
        }
        let message = self
            .error_message()
            .map(str::to_string)
            .unwrap_or_else(|| fallback.to_string());
        Err(CoreError::Rejected(message))
    }
}

/// Operations the dashboard needs from the backend.
///
/// Each call is a single attempt; retry policy belongs to the caller, and
/// nothing here implies a subsequent `list` observes the mutation.
#[async_trait]
pub trait ConnectionTypeApi: Send + Sync {
    /// Idempotent read of every connection type
    async fn list(&self) -> CoreResult<Vec<ConnectionType>>;

    async fn set_enabled(&self, name: &str, enabled: bool) -> CoreResult<ResponseStatus>;

    async fn delete(&self, name: &str) -> CoreResult<ResponseStatus>;

    async fn create(&self, connection_type: &ConnectionType) -> CoreResult<ResponseStatus>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_success_with_empty_error() {
        let status: ResponseStatus = serde_json::from_str(r#"{"success": true, "error": ""}"#).unwrap();
        assert!(status.success);
        assert_eq!(status.error_message(), None);
        assert!(status.into_result("unused").is_ok());
    }

    #[test]
    fn test_rejection_without_text_uses_fallback() {
        let status: ResponseStatus = serde_json::from_str(r#"{"success": false}"#).unwrap();
        let err = status.into_result("Failed to enable").unwrap_err();
        assert_eq!(err.detail(), "Failed to enable");
    }

    #[test]
    fn test_rejection_keeps_backend_text() {
        let err = ResponseStatus::rejected("quota exceeded")
            .into_result("Failed to disable")
            .unwrap_err();
        assert!(matches!(err, CoreError::Rejected(ref m) if m == "quota exceeded"));
    }
}
