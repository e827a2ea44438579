//! Remote tag entities.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A label entity on the remote training service.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Tag {
    /// Unique tag identifier
    pub id: Uuid,
    /// Tag name, matched case-sensitively against local labels
    pub name: String,
    /// Optional description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Number of images already carrying this tag
    #[serde(default)]
    pub image_count: u32,
}
