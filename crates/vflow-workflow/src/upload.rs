//! Dataset upload phase.

use tracing::info;
use uuid::Uuid;

use vflow_client::TrainingClient;
use vflow_dataset::{into_batches, Dataset, UPLOAD_BATCH_SIZE};
use vflow_models::{ImageFileCreateBatch, ImageFileCreateEntry, Region};

use crate::error::{WorkflowError, WorkflowResult};
use crate::tags::TagSync;

/// Summary of an upload run.
#[derive(Debug, Clone, Copy, Default)]
pub struct UploadReport {
    /// Images submitted
    pub images: usize,
    /// Batches sent
    pub batches: usize,
    /// Images the service reported as already present
    pub duplicates: usize,
}

/// Upload every labeled image of the dataset in fixed-size batches.
///
/// Entries are built per label in synchronized tag order, each region
/// carrying its label's tag id. The first rejected batch aborts the
/// remaining ones.
pub async fn upload_dataset(
    client: &TrainingClient,
    project_id: Uuid,
    dataset: &Dataset,
    sync: &TagSync,
) -> WorkflowResult<UploadReport> {
    let mut entries = Vec::new();

    for tag in &sync.tags {
        let images = dataset.load_label_images(&tag.name).await?;
        info!(label = %tag.name, images = images.len(), "Collected labeled images");

        for image in images {
            let regions: Vec<Region> = image
                .boxes
                .iter()
                .map(|bbox| Region::new(tag.id, *bbox))
                .collect();
            entries.push(ImageFileCreateEntry::with_regions(
                image.file_name,
                image.contents,
                regions,
            ));
        }
    }

    let mut report = UploadReport {
        images: entries.len(),
        ..Default::default()
    };

    for (index, batch) in into_batches(entries, UPLOAD_BATCH_SIZE).into_iter().enumerate() {
        info!(batch = index, size = batch.len(), "Uploading images batch");

        let summary = client
            .create_images_from_files(project_id, &ImageFileCreateBatch::new(batch))
            .await?;
        if !summary.is_batch_successful {
            return Err(WorkflowError::BatchRejected { batch: index });
        }

        report.batches += 1;
        report.duplicates += summary.duplicate_count();
    }

    info!(
        images = report.images,
        batches = report.batches,
        duplicates = report.duplicates,
        "Upload complete"
    );
    Ok(report)
}
