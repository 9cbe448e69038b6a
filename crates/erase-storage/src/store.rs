//! Object-store capability contract.

use async_trait::async_trait;

use crate::error::StorageResult;

/// Per-key error from a batch delete.
#[derive(Debug, Clone)]
pub struct BatchDeleteError {
    pub key: String,
    pub message: String,
}

/// Per-key results of a batch delete.
///
/// The store may confirm some keys and reject others in the same call; a
/// key appearing in neither list was not acknowledged and should be
/// treated as not deleted.
#[derive(Debug, Clone, Default)]
pub struct BatchDeleteOutcome {
    pub deleted: Vec<String>,
    pub errors: Vec<BatchDeleteError>,
}

/// Capability contract for the artifact store.
///
/// The production implementation is [`CosClient`](crate::CosClient); the
/// test suites back this with in-memory fakes so the reconciliation flow
/// runs without network access.
#[async_trait]
pub trait ArtifactStore: Send + Sync {
    /// Server-side copy of one object within the configured bucket.
    async fn copy_object(&self, source_key: &str, destination_key: &str) -> StorageResult<()>;

    /// Delete a set of objects in one request, returning per-key results.
    /// Keys in the outcome are reported in the caller's form.
    async fn batch_delete(&self, keys: &[String]) -> StorageResult<BatchDeleteOutcome>;
}
