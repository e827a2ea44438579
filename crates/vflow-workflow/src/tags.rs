//! Tag synchronization phase.

use tracing::info;
use uuid::Uuid;

use vflow_client::TrainingClient;
use vflow_models::Tag;

use crate::error::WorkflowResult;

/// Result of reconciling the local label list against remote tags.
#[derive(Debug, Clone)]
pub struct TagSync {
    /// Tags aligned to the local label order
    pub tags: Vec<Tag>,
    /// How many tags were created by this run
    pub created: usize,
    /// Training images already uploaded under pre-existing tags
    pub existing_images: u32,
}

impl TagSync {
    /// Look up the tag id synchronized for a label.
    pub fn tag_id_for(&self, label: &str) -> Option<Uuid> {
        self.tags.iter().find(|t| t.name == label).map(|t| t.id)
    }
}

/// Reconcile labels against the project's remote tags.
///
/// The remote tag set is fetched once; each label is created only if no
/// remote tag carries its name, so re-running against a fixed remote set
/// creates nothing. Labels are processed in input order.
pub async fn sync_tags(
    client: &TrainingClient,
    project_id: Uuid,
    labels: &[String],
) -> WorkflowResult<TagSync> {
    let remote = client.tags(project_id).await?;

    let mut tags = Vec::with_capacity(labels.len());
    let mut created = 0;
    let mut existing_images = 0;

    for label in labels {
        match remote.iter().find(|t| &t.name == label) {
            Some(tag) => {
                existing_images += tag.image_count;
                info!(tag = %label, images = tag.image_count, "Tag already exists");
                tags.push(tag.clone());
            }
            None => {
                let tag = client.create_tag(project_id, label).await?;
                info!(tag = %tag.name, "Tag created");
                created += 1;
                tags.push(tag);
            }
        }
    }

    Ok(TagSync {
        tags,
        created,
        existing_images,
    })
}
