use std::time::Duration;

use reqwest::StatusCode;

pub type CoreResult<T> = Result<T, CoreError>;

/// Errors produced at the backend boundary.
///
/// Nothing here is ever thrown past the poller or a toggle controller; both
/// turn these into observable state.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Backend returned {status}: {message}")]
    Status { status: StatusCode, message: String },

    #[error("Failed to decode response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("{0}")]
    Rejected(String),

    #[error("Request timed out after {}s", .0.as_secs_f64())]
    Timeout(Duration),

    #[error("Invalid configuration: {0}")]
    Config(String),
}

impl CoreError {
    /// Short human-readable detail suitable for a tooltip or status line.
    ///
    /// Status errors surface the backend's own message rather than the
    /// HTTP code, matching what the dashboard shows.
    pub fn detail(&self) -> String {
        match self {
            CoreError::Status { message, .. } if !message.is_empty() => message.clone(),
            CoreError::Rejected(message) => message.clone(),
            other => other.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detail_prefers_backend_message() {
        let err = CoreError::Status {
            status: StatusCode::FORBIDDEN,
            message: "not allowed".to_string(),
        };
        assert_eq!(err.detail(), "not allowed");
    }

    #[test]
    fn test_detail_falls_back_to_display() {
        let err = CoreError::Status {
            status: StatusCode::BAD_GATEWAY,
            message: String::new(),
        };
        assert_eq!(err.detail(), "Backend returned 502 Bad Gateway: ");
    }

    #[test]
    fn test_timeout_detail_names_the_limit() {
        let err = CoreError::Timeout(Duration::from_secs(30));
        assert_eq!(err.detail(), "Request timed out after 30s");
    }
}
