//! Remote project and domain entities.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A project on the remote training service.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    /// Unique project identifier
    pub id: Uuid,
    /// Project name, matched exactly against the configured name
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Project settings, including the detection domain
    pub settings: ProjectSettings,
}

/// Settings attached to a project.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectSettings {
    /// Domain the project was created under
    pub domain_id: Uuid,
}

/// A training domain (e.g. general object detection, compact variants).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Domain {
    pub id: Uuid,
    pub name: String,
    /// Domain kind as reported by the service (e.g. "ObjectDetection")
    #[serde(rename = "type")]
    pub domain_type: String,
    /// Whether models trained under this domain can be exported
    #[serde(default)]
    pub exportable: bool,
}
