//! Prediction phase.

use std::path::Path;

use uuid::Uuid;

use vflow_client::PredictionClient;
use vflow_models::PredictionResponse;

use crate::error::WorkflowResult;

/// Submit one test image to the published model.
pub async fn predict_image(
    client: &PredictionClient,
    project_id: Uuid,
    published_name: &str,
    path: impl AsRef<Path>,
) -> WorkflowResult<PredictionResponse> {
    let bytes = tokio::fs::read(path.as_ref()).await?;
    Ok(client
        .detect_image(project_id, published_name, bytes)
        .await?)
}

/// Print the detections of one image, ranked by descending confidence.
pub fn print_ranked(file_name: &str, response: &PredictionResponse) {
    println!("Image: {}", file_name);
    for prediction in response.ranked() {
        println!(
            "  For Tag '{}': {:.3}% {}",
            prediction.tag_name,
            prediction.probability * 100.0,
            prediction.bounding_box
        );
    }
}
