use super::error::StorageError;
use app_state::StorageSettings;
use reqwest::Client;
use serde_json::json;
use tracing::{info, instrument, warn};
use url::Url;

/// Thin client for the object-storage HTTP API. Uploaded objects are publicly
/// readable; writes authenticate with the service key.
#[derive(Clone)]
pub struct StorageClient {
    http_client: Client,
    endpoint: Url,
    bucket: String,
    service_key: String,
}

impl StorageClient {
    pub fn new(
        http_client: Client,
        settings: &StorageSettings,
        service_key: &str,
    ) -> Result<Self, StorageError> {
        // A trailing slash keeps Url::join from eating the last path segment.
        let mut endpoint: Url = settings.endpoint.parse()?;
        if !endpoint.path().ends_with('/') {
            endpoint.set_path(&format!("{}/", endpoint.path()));
        }
        Ok(Self {
            http_client,
            endpoint,
            bucket: settings.bucket.clone(),
            service_key: service_key.to_owned(),
        })
    }

    fn object_url(&self, file_name: &str) -> Result<Url, StorageError> {
        Ok(self
            .endpoint
            .join(&format!("object/{}/{}", self.bucket, file_name))?)
    }

    /// The public-read URL for a stored object. This is what gets persisted
    /// on the photo row and handed to clients.
    pub fn public_url(&self, file_name: &str) -> Result<String, StorageError> {
        Ok(self
            .endpoint
            .join(&format!("object/public/{}/{}", self.bucket, file_name))?
            .to_string())
    }

    /// Creates the bucket if it does not exist yet. Called once at startup.
    #[instrument(skip(self))]
    pub async fn ensure_bucket(&self) -> Result<(), StorageError> {
        let check_url = self.endpoint.join(&format!("bucket/{}", self.bucket))?;
        let response = self
            .http_client
            .get(check_url)
            .bearer_auth(&self.service_key)
            .send()
            .await?;

        if response.status().is_success() {
            return Ok(());
        }

        info!("Creating storage bucket '{}'", self.bucket);
        let create_url = self.endpoint.join("bucket")?;
        let response = self
            .http_client
            .post(create_url)
            .bearer_auth(&self.service_key)
            .json(&json!({ "name": self.bucket, "public": true }))
            .send()
            .await?;

        if !response.status().is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(StorageError::Backend(format!(
                "could not create bucket '{}': {body}",
                self.bucket
            )));
        }
        Ok(())
    }

    /// Uploads an object. Fails if an object with the same name exists.
    #[instrument(skip(self, bytes), fields(size = bytes.len()))]
    pub async fn upload(
        &self,
        file_name: &str,
        bytes: Vec<u8>,
        content_type: &str,
    ) -> Result<(), StorageError> {
        let url = self.object_url(file_name)?;
        let response = self
            .http_client
            .post(url)
            .bearer_auth(&self.service_key)
            .header(http::header::CONTENT_TYPE, content_type)
            .body(bytes)
            .send()
            .await?;

        if !response.status().is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(StorageError::Backend(body));
        }
        Ok(())
    }

    /// Deletes an object. Failures are logged and swallowed: photo deletion
    /// must not fail because the stored object is already gone.
    #[instrument(skip(self))]
    pub async fn remove_best_effort(&self, file_name: &str) {
        let result = async {
            let url = self.object_url(file_name)?;
            let response = self
                .http_client
                .delete(url)
                .bearer_auth(&self.service_key)
                .send()
                .await?;
            if !response.status().is_success() {
                let body = response.text().await.unwrap_or_default();
                return Err(StorageError::Backend(body));
            }
            Ok(())
        }
        .await;

        if let Err(e) = result {
            warn!("Could not delete stored object '{}': {}", file_name, e);
        }
    }
}
