//! Training API client.

use std::path::Path;

use futures::StreamExt;
use reqwest::Client;
use tokio::io::AsyncWriteExt;
use tracing::{debug, info};
use uuid::Uuid;

use vflow_models::{
    Domain, Export, ImageCreateSummary, ImageFileCreateBatch, Iteration, Project, Tag,
};

use crate::credentials::ServiceCredentials;
use crate::error::{ClientError, ClientResult};

/// Header carrying the API key on training requests.
const TRAINING_KEY_HEADER: &str = "Training-Key";

/// Training API path prefix under the service endpoint.
const TRAINING_BASE: &str = "customvision/v3.4/training";

/// Client for the training side of the remote service: projects, tags,
/// image upload, training runs, publishing and exports.
pub struct TrainingClient {
    http: Client,
    credentials: ServiceCredentials,
}

impl TrainingClient {
    /// Create a new training client.
    pub fn new(credentials: ServiceCredentials) -> Self {
        Self {
            http: Client::new(),
            credentials,
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}/{}", self.credentials.endpoint(), TRAINING_BASE, path)
    }

    async fn get_json<T: serde::de::DeserializeOwned>(&self, url: String) -> ClientResult<T> {
        let response = self
            .http
            .get(&url)
            .header(TRAINING_KEY_HEADER, self.credentials.key())
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(ClientError::from_response(response).await);
        }

        Ok(response.json().await?)
    }

    /// List all projects in the workspace.
    pub async fn projects(&self) -> ClientResult<Vec<Project>> {
        self.get_json(self.url("projects")).await
    }

    /// Fetch a training domain by id.
    pub async fn domain(&self, domain_id: Uuid) -> ClientResult<Domain> {
        self.get_json(self.url(&format!("domains/{}", domain_id)))
            .await
    }

    /// List the tags of a project.
    pub async fn tags(&self, project_id: Uuid) -> ClientResult<Vec<Tag>> {
        self.get_json(self.url(&format!("projects/{}/tags", project_id)))
            .await
    }

    /// Create a tag on a project.
    pub async fn create_tag(&self, project_id: Uuid, name: &str) -> ClientResult<Tag> {
        let response = self
            .http
            .post(self.url(&format!("projects/{}/tags", project_id)))
            .header(TRAINING_KEY_HEADER, self.credentials.key())
            .query(&[("name", name)])
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(ClientError::from_response(response).await);
        }

        let tag: Tag = response.json().await?;
        debug!(tag_id = %tag.id, name = %tag.name, "Created tag");
        Ok(tag)
    }

    /// Upload one batch of image files with their regions.
    pub async fn create_images_from_files(
        &self,
        project_id: Uuid,
        batch: &ImageFileCreateBatch,
    ) -> ClientResult<ImageCreateSummary> {
        let response = self
            .http
            .post(self.url(&format!("projects/{}/images/files", project_id)))
            .header(TRAINING_KEY_HEADER, self.credentials.key())
            .json(batch)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(ClientError::from_response(response).await);
        }

        Ok(response.json().await?)
    }

    /// Trigger a training run. Returns the new, in-progress iteration.
    pub async fn train_project(&self, project_id: Uuid) -> ClientResult<Iteration> {
        let response = self
            .http
            .post(self.url(&format!("projects/{}/train", project_id)))
            .header(TRAINING_KEY_HEADER, self.credentials.key())
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(ClientError::from_response(response).await);
        }

        Ok(response.json().await?)
    }

    /// Re-fetch an iteration to observe its current status.
    pub async fn iteration(&self, project_id: Uuid, iteration_id: Uuid) -> ClientResult<Iteration> {
        self.get_json(self.url(&format!(
            "projects/{}/iterations/{}",
            project_id, iteration_id
        )))
        .await
    }

    /// List all iterations of a project.
    pub async fn iterations(&self, project_id: Uuid) -> ClientResult<Vec<Iteration>> {
        self.get_json(self.url(&format!("projects/{}/iterations", project_id)))
            .await
    }

    /// Publish an iteration under the given model name.
    ///
    /// The service answers `false` (or an error status) when there is
    /// nothing to publish, e.g. the iteration is already published.
    pub async fn publish_iteration(
        &self,
        project_id: Uuid,
        iteration_id: Uuid,
        publish_name: &str,
    ) -> ClientResult<bool> {
        let response = self
            .http
            .post(self.url(&format!(
                "projects/{}/iterations/{}/publish",
                project_id, iteration_id
            )))
            .header(TRAINING_KEY_HEADER, self.credentials.key())
            .query(&[
                ("publishName", publish_name),
                ("predictionId", self.credentials.resource_id()),
            ])
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(ClientError::from_response(response).await);
        }

        Ok(response.json().await?)
    }

    /// List the exports requested for an iteration.
    pub async fn exports(&self, project_id: Uuid, iteration_id: Uuid) -> ClientResult<Vec<Export>> {
        self.get_json(self.url(&format!(
            "projects/{}/iterations/{}/export",
            project_id, iteration_id
        )))
        .await
    }

    /// Request an export of an iteration to the given platform.
    pub async fn export_iteration(
        &self,
        project_id: Uuid,
        iteration_id: Uuid,
        platform: &str,
    ) -> ClientResult<Export> {
        let response = self
            .http
            .post(self.url(&format!(
                "projects/{}/iterations/{}/export",
                project_id, iteration_id
            )))
            .header(TRAINING_KEY_HEADER, self.credentials.key())
            .query(&[("platform", platform)])
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(ClientError::from_response(response).await);
        }

        Ok(response.json().await?)
    }

    /// Stream an export artifact to disk. Returns the downloaded size.
    ///
    /// The download URI is pre-authorized by the service; no API key is
    /// attached.
    pub async fn download_artifact(
        &self,
        download_uri: &str,
        dest: impl AsRef<Path>,
    ) -> ClientResult<u64> {
        let dest = dest.as_ref();
        let response = self.http.get(download_uri).send().await?;

        if !response.status().is_success() {
            return Err(ClientError::from_response(response).await);
        }

        let mut file = tokio::fs::File::create(dest).await?;
        let mut stream = response.bytes_stream();
        let mut written: u64 = 0;

        while let Some(chunk) = stream.next().await {
            let chunk = chunk?;
            file.write_all(&chunk).await?;
            written += chunk.len() as u64;
        }
        file.flush().await?;

        info!(
            dest = %dest.display(),
            size_kb = written / 1024,
            "Downloaded export artifact"
        );
        Ok(written)
    }
}
