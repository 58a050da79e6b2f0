use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::constants::{annotations, PRE_INSTALLED_USERNAME, UNKNOWN_USERNAME};

/// Kubernetes object metadata, restricted to what the dashboard reads.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ObjectMeta {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub namespace: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub creation_timestamp: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub annotations: BTreeMap<String, String>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub labels: BTreeMap<String, String>,
}

/// A connection type as served by the backend: a ConfigMap whose annotations
/// carry the display metadata and the `enabled` flag.
///
/// Fields the dashboard doesn't interpret are kept in `extra` so that the
/// cached copy compares equal only when the whole object is unchanged.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConnectionType {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_version: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    pub metadata: ObjectMeta,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub data: BTreeMap<String, String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ConnectionType {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            api_version: Some("v1".to_string()),
            kind: Some("ConfigMap".to_string()),
            metadata: ObjectMeta {
                name: name.into(),
                ..ObjectMeta::default()
            },
            ..Self::default()
        }
    }

    pub fn with_enabled(mut self, enabled: bool) -> Self {
        self.metadata
            .annotations
            .insert(annotations::ENABLED.to_string(), enabled.to_string());
        self
    }

    pub fn with_display_name(self, display_name: impl Into<String>) -> Self {
        self.with_annotation(annotations::DISPLAY_NAME, display_name)
    }

    pub fn with_description(self, description: impl Into<String>) -> Self {
        self.with_annotation(annotations::DESCRIPTION, description)
    }

    pub fn with_creator(self, username: impl Into<String>) -> Self {
        self.with_annotation(annotations::USERNAME, username)
    }

    pub fn with_created_at(mut self, created_at: DateTime<Utc>) -> Self {
        self.metadata.creation_timestamp = Some(created_at);
        self
    }

    fn with_annotation(mut self, key: &str, value: impl Into<String>) -> Self {
        self.metadata.annotations.insert(key.to_string(), value.into());
        self
    }

    fn annotation(&self, key: &str) -> Option<&str> {
        self.metadata.annotations.get(key).map(String::as_str)
    }

    pub fn name(&self) -> &str {
        &self.metadata.name
    }

    /// Display-name annotation, falling back to the object name when missing or empty
    pub fn display_name(&self) -> &str {
        self.annotation(annotations::DISPLAY_NAME)
            .filter(|name| !name.is_empty())
            .unwrap_or(&self.metadata.name)
    }

    pub fn description(&self) -> Option<&str> {
        self.annotation(annotations::DESCRIPTION)
    }

    pub fn creator(&self) -> &str {
        self.annotation(annotations::USERNAME)
            .filter(|name| !name.is_empty())
            .unwrap_or(UNKNOWN_USERNAME)
    }

    pub fn is_pre_installed(&self) -> bool {
        self.annotation(annotations::USERNAME) == Some(PRE_INSTALLED_USERNAME)
    }

    /// Only the exact string `"true"` counts as enabled
    pub fn enabled(&self) -> bool {
        self.annotation(annotations::ENABLED) == Some("true")
    }

    pub fn created_at(&self) -> Option<DateTime<Utc>> {
        self.metadata.creation_timestamp
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_json() -> &'static str {
        r#"{
            "apiVersion": "v1",
            "kind": "ConfigMap",
            "metadata": {
                "name": "s3",
                "creationTimestamp": "2024-05-01T10:00:00Z",
                "labels": { "opendatahub.io/connection-type": "true" },
                "annotations": {
                    "openshift.io/display-name": "S3 compatible object storage",
                    "openshift.io/description": "Connect to S3 buckets",
                    "opendatahub.io/username": "Pre-installed",
                    "opendatahub.io/enabled": "true"
                }
            },
            "data": { "fields": "[]" },
            "immutable": false
        }"#
    }

    #[test]
    fn test_parse_config_map() {
        let ct: ConnectionType = serde_json::from_str(sample_json()).unwrap();
        assert_eq!(ct.name(), "s3");
        assert_eq!(ct.display_name(), "S3 compatible object storage");
        assert_eq!(ct.description(), Some("Connect to S3 buckets"));
        assert_eq!(ct.creator(), "Pre-installed");
        assert!(ct.is_pre_installed());
        assert!(ct.enabled());
        assert_eq!(
            ct.created_at().unwrap().to_rfc3339(),
            "2024-05-01T10:00:00+00:00"
        );
        assert_eq!(ct.extra.get("immutable"), Some(&Value::Bool(false)));
    }

    #[test]
    fn test_display_name_falls_back_to_name() {
        let ct = ConnectionType::new("no-display-name").with_display_name("");
        assert_eq!(ct.display_name(), "no-display-name");

        let ct = ConnectionType::new("bare");
        assert_eq!(ct.display_name(), "bare");
    }

    #[test]
    fn test_creator_defaults_to_unknown() {
        let ct = ConnectionType::new("a");
        assert_eq!(ct.creator(), "unknown");
        assert!(!ct.is_pre_installed());
    }

    #[test]
    fn test_enabled_requires_exact_true() {
        assert!(!ConnectionType::new("a").enabled());
        assert!(!ConnectionType::new("a").with_enabled(false).enabled());
        assert!(ConnectionType::new("a").with_enabled(true).enabled());

        let mut ct = ConnectionType::new("a");
        ct.metadata
            .annotations
            .insert(annotations::ENABLED.to_string(), "True".to_string());
        assert!(!ct.enabled());
    }

    #[test]
    fn test_equality_covers_unmodelled_fields() {
        let a: ConnectionType = serde_json::from_str(sample_json()).unwrap();
        let mut b = a.clone();
        assert_eq!(a, b);

        b.extra.insert("immutable".to_string(), Value::Bool(true));
        assert_ne!(a, b);
    }
}
