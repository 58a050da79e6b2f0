use chrono::{DateTime, Utc};
use serde::Serialize;

use odh_core::models::created_label;
use odh_core::{ConnectionType, FilterData};

/// Command parsed from arguments
#[derive(Debug, Clone)]
pub enum CliCommand {
    /// List connection types, filtered and sorted like the table
    List { filter: FilterData },
    /// Enable or disable one connection type and wait for the backend to agree
    SetEnabled { name: String, enabled: bool },
    /// Delete one connection type; `confirmed` stands in for the dialog
    Delete { name: String, confirmed: bool },
    /// Create a connection type from annotation values
    Create {
        name: String,
        display_name: Option<String>,
        description: Option<String>,
        creator: Option<String>,
        enabled: bool,
    },
}

/// One table row as printed by `list`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConnectionTypeRow {
    pub name: String,
    pub display_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub creator: String,
    pub pre_installed: bool,
    pub created: String,
    pub enabled: bool,
}

impl ConnectionTypeRow {
    pub fn from_resource(ct: &ConnectionType, now: DateTime<Utc>) -> Self {
        Self {
            name: ct.name().to_string(),
            display_name: ct.display_name().to_string(),
            description: ct.description().map(str::to_string),
            creator: ct.creator().to_string(),
            pre_installed: ct.is_pre_installed(),
            created: created_label(now, ct.created_at()),
            enabled: ct.enabled(),
        }
    }
}

/// Result of `enable`/`disable`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ToggleReport {
    pub name: String,
    pub enabled: bool,
    /// False when the backend accepted the change but no refresh reflected
    /// it before the wait ran out
    pub reconciled: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
}
