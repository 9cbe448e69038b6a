//! COS client implementation.

use std::collections::HashSet;

use async_trait::async_trait;
use aws_config::BehaviorVersion;
use aws_credential_types::Credentials;
use aws_sdk_s3::config::{Builder, Region};
use aws_sdk_s3::types::{Delete, ObjectIdentifier};
use aws_sdk_s3::Client;
use tracing::{debug, info};

use crate::error::{StorageError, StorageResult};
use crate::store::{ArtifactStore, BatchDeleteError, BatchDeleteOutcome};

/// Configuration for the COS client.
#[derive(Debug, Clone)]
pub struct CosConfig {
    /// Secret ID (access key)
    pub secret_id: String,
    /// Secret key
    pub secret_key: String,
    /// COS region, e.g. "ap-singapore"
    pub region: String,
    /// Bucket name
    pub bucket: String,
    /// S3-compatible endpoint; derived from the region unless overridden
    pub endpoint_url: String,
}

impl CosConfig {
    /// Create config from environment variables.
    pub fn from_env() -> StorageResult<Self> {
        let region = std::env::var("TENCENTCLOUD_REGION")
            .map_err(|_| StorageError::config_error("TENCENTCLOUD_REGION not set"))?;
        let endpoint_url = std::env::var("COS_ENDPOINT_URL")
            .unwrap_or_else(|_| format!("https://cos.{}.myqcloud.com", region));

        Ok(Self {
            secret_id: std::env::var("TENCENTCLOUD_SECRET_ID")
                .map_err(|_| StorageError::config_error("TENCENTCLOUD_SECRET_ID not set"))?,
            secret_key: std::env::var("TENCENTCLOUD_SECRET_KEY")
                .map_err(|_| StorageError::config_error("TENCENTCLOUD_SECRET_KEY not set"))?,
            bucket: std::env::var("TENCENTCLOUD_BUCKET")
                .map_err(|_| StorageError::config_error("TENCENTCLOUD_BUCKET not set"))?,
            region,
            endpoint_url,
        })
    }
}

/// Tencent COS storage client.
#[derive(Clone)]
pub struct CosClient {
    client: Client,
    bucket: String,
}

impl CosClient {
    /// Create a new COS client from configuration.
    pub fn new(config: CosConfig) -> Self {
        let credentials = Credentials::new(
            &config.secret_id,
            &config.secret_key,
            None,
            None,
            "cos",
        );

        let sdk_config = Builder::new()
            .behavior_version(BehaviorVersion::latest())
            .endpoint_url(&config.endpoint_url)
            .region(Region::new(config.region))
            .credentials_provider(credentials)
            .force_path_style(true)
            .build();

        Self {
            client: Client::from_conf(sdk_config),
            bucket: config.bucket,
        }
    }

    /// Create from environment variables.
    pub fn from_env() -> StorageResult<Self> {
        Ok(Self::new(CosConfig::from_env()?))
    }
}

/// Callback payloads reference objects with a leading slash; S3 keys carry
/// none.
fn normalize_key(key: &str) -> &str {
    key.trim_start_matches('/')
}

#[async_trait]
impl ArtifactStore for CosClient {
    async fn copy_object(&self, source_key: &str, destination_key: &str) -> StorageResult<()> {
        debug!("Copying {} to {}", source_key, destination_key);

        let copy_source = format!("{}/{}", self.bucket, normalize_key(source_key));
        self.client
            .copy_object()
            .bucket(&self.bucket)
            .copy_source(copy_source)
            .key(normalize_key(destination_key))
            .send()
            .await
            .map_err(|e| StorageError::copy_failed(e.to_string()))?;

        info!("Copied {} to {}", source_key, destination_key);
        Ok(())
    }

    async fn batch_delete(&self, keys: &[String]) -> StorageResult<BatchDeleteOutcome> {
        if keys.is_empty() {
            return Ok(BatchDeleteOutcome::default());
        }

        debug!("Batch deleting {} objects", keys.len());

        let objects: Vec<ObjectIdentifier> = keys
            .iter()
            .map(|k| {
                ObjectIdentifier::builder()
                    .key(normalize_key(k))
                    .build()
                    .map_err(|e| StorageError::batch_delete_failed(e.to_string()))
            })
            .collect::<StorageResult<_>>()?;

        // quiet=false so the response lists every confirmed deletion
        let delete = Delete::builder()
            .set_objects(Some(objects))
            .quiet(false)
            .build()
            .map_err(|e| StorageError::batch_delete_failed(e.to_string()))?;

        let response = self
            .client
            .delete_objects()
            .bucket(&self.bucket)
            .delete(delete)
            .send()
            .await
            .map_err(|e| StorageError::batch_delete_failed(e.to_string()))?;

        let deleted_set: HashSet<&str> = response
            .deleted()
            .iter()
            .filter_map(|d| d.key())
            .collect();

        // Report back in the caller's key form
        let mut outcome = BatchDeleteOutcome::default();
        for key in keys {
            let normalized = normalize_key(key);
            if let Some(error) = response
                .errors()
                .iter()
                .find(|e| e.key() == Some(normalized))
            {
                outcome.errors.push(BatchDeleteError {
                    key: key.clone(),
                    message: error.message().unwrap_or("unknown error").to_string(),
                });
            } else if deleted_set.contains(normalized) {
                outcome.deleted.push(key.clone());
            }
        }

        info!(
            "Batch delete confirmed {}/{} objects",
            outcome.deleted.len(),
            keys.len()
        );
        Ok(outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_key() {
        assert_eq!(normalize_key("/input/show/ep01.mp4"), "input/show/ep01.mp4");
        assert_eq!(normalize_key("input/show/ep01.mp4"), "input/show/ep01.mp4");
    }
}
