//! Delete confirmation flow.
//!
//! Nothing is sent until the user confirms. A failed delete keeps the
//! confirmation open with the error so it can be retried or cancelled.

use crate::api::ResponseStatus;
use crate::error::CoreResult;
use crate::models::ConnectionType;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DeleteTarget {
    pub name: String,
    pub display_name: String,
}

impl From<&ConnectionType> for DeleteTarget {
    fn from(ct: &ConnectionType) -> Self {
        Self {
            name: ct.name().to_string(),
            display_name: ct.display_name().to_string(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DeleteFinish {
    /// Removed; the caller refreshes the list
    Deleted(String),
    /// Confirmation stays open showing the error
    Failed(String),
    /// No delete was in progress
    Ignored,
}

#[derive(Clone, Debug, Default)]
pub struct DeleteConfirmation {
    target: Option<DeleteTarget>,
    deleting: bool,
    error: Option<String>,
}

impl DeleteConfirmation {
    pub fn new() -> Self {
        Self::default()
    }

    /// Open the confirmation for `target`. Refused while a delete is running.
    pub fn request(&mut self, target: DeleteTarget) -> bool {
        if self.deleting {
            return false;
        }
        self.target = Some(target);
        self.error = None;
        true
    }

    /// User confirmed; returns the name to delete
    pub fn confirm(&mut self) -> Option<String> {
        if self.deleting {
            return None;
        }
        let name = self.target.as_ref()?.name.clone();
        self.deleting = true;
        self.error = None;
        Some(name)
    }

    pub fn finish(&mut self, result: CoreResult<ResponseStatus>) -> DeleteFinish {
        if !self.deleting {
            return DeleteFinish::Ignored;
        }
        self.deleting = false;

        let outcome = result.and_then(|status| status.into_result("Failed to delete"));
        match outcome {
            Ok(()) => {
                let name = self.target.take().map(|t| t.name).unwrap_or_default();
                self.error = None;
                DeleteFinish::Deleted(name)
            }
            Err(err) => {
                let detail = err.detail();
                tracing::warn!(error = %detail, "delete failed");
                self.error = Some(detail.clone());
                DeleteFinish::Failed(detail)
            }
        }
    }

    /// Close without deleting. Has no effect while a delete is in flight.
    pub fn cancel(&mut self) {
        if !self.deleting {
            self.target = None;
            self.error = None;
        }
    }

    pub fn is_open(&self) -> bool {
        self.target.is_some()
    }

    pub fn is_deleting(&self) -> bool {
        self.deleting
    }

    pub fn target(&self) -> Option<&DeleteTarget> {
        self.target.as_ref()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Prompt text for the confirmation
    pub fn prompt(&self) -> Option<String> {
        self.target.as_ref().map(|t| {
            format!(
                "The {} connection type will be deleted and will no longer be available for new connections.",
                t.display_name
            )
        })
    }
}
