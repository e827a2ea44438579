//! Prediction API client.

use reqwest::Client;
use uuid::Uuid;

use vflow_models::PredictionResponse;

use crate::credentials::ServiceCredentials;
use crate::error::{ClientError, ClientResult};

/// Header carrying the API key on prediction requests.
const PREDICTION_KEY_HEADER: &str = "Prediction-Key";

/// Prediction API path prefix under the service endpoint.
const PREDICTION_BASE: &str = "customvision/v3.0/prediction";

/// Client for the prediction side of the remote service.
///
/// Read-only: detections are run against an already-published iteration.
pub struct PredictionClient {
    http: Client,
    credentials: ServiceCredentials,
}

impl PredictionClient {
    /// Create a new prediction client.
    pub fn new(credentials: ServiceCredentials) -> Self {
        Self {
            http: Client::new(),
            credentials,
        }
    }

    /// Detect objects in an image against a published model.
    ///
    /// The image bytes are sent as the raw request body.
    pub async fn detect_image(
        &self,
        project_id: Uuid,
        published_name: &str,
        image: Vec<u8>,
    ) -> ClientResult<PredictionResponse> {
        let url = format!(
            "{}/{}/{}/detect/iterations/{}/image",
            self.credentials.endpoint(),
            PREDICTION_BASE,
            project_id,
            published_name
        );

        let response = self
            .http
            .post(&url)
            .header(PREDICTION_KEY_HEADER, self.credentials.key())
            .header(reqwest::header::CONTENT_TYPE, "application/octet-stream")
            .body(image)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(ClientError::from_response(response).await);
        }

        Ok(response.json().await?)
    }
}
