//! Plan execution against the artifact store.

use std::collections::HashSet;
use std::sync::Arc;

use erase_models::{ArtifactOperation, ReconciliationPlan};
use erase_storage::ArtifactStore;
use tracing::{error, info};

use crate::outcome::{OperationOutcome, PlanOutcome};

/// Executes reconciliation plans with per-operation isolation.
///
/// A failed copy never aborts the remaining copies, and the batch delete
/// is issued regardless of individual copy outcomes. The delete step runs
/// strictly after every copy attempt, since the delete set includes copy
/// sources.
pub struct ReconciliationExecutor {
    store: Arc<dyn ArtifactStore>,
}

impl ReconciliationExecutor {
    pub fn new(store: Arc<dyn ArtifactStore>) -> Self {
        Self { store }
    }

    /// Execute a plan. Never returns an error; every failure is captured
    /// in the returned outcome.
    pub async fn execute(&self, plan: &ReconciliationPlan) -> PlanOutcome {
        let mut outcome = PlanOutcome::default();

        for (source, destination) in plan.copies() {
            let operation = ArtifactOperation::Copy {
                source: source.to_string(),
                destination: destination.to_string(),
            };
            match self.store.copy_object(source, destination).await {
                Ok(()) => {
                    info!("Copied {} to {}", source, destination);
                    outcome.push(OperationOutcome::success(operation));
                }
                Err(e) => {
                    error!("Failed to copy {} to {}: {}", source, destination, e);
                    outcome.push(OperationOutcome::failure(operation, e.to_string()));
                }
            }
        }

        let delete_keys = plan.delete_keys();
        if delete_keys.is_empty() {
            return outcome;
        }

        match self.store.batch_delete(&delete_keys).await {
            Ok(batch) => {
                let deleted: HashSet<&String> = batch.deleted.iter().collect();
                for key in &delete_keys {
                    let operation = ArtifactOperation::Delete { key: key.clone() };
                    if let Some(err) = batch.errors.iter().find(|e| &e.key == key) {
                        error!("Failed to delete {}: {}", key, err.message);
                        outcome.push(OperationOutcome::failure(operation, err.message.clone()));
                    } else if deleted.contains(key) {
                        info!("Successfully deleted: {}", key);
                        outcome.push(OperationOutcome::success(operation));
                    } else {
                        error!("Delete not confirmed for {}", key);
                        outcome.push(OperationOutcome::failure(
                            operation,
                            "not reported as deleted",
                        ));
                    }
                }
            }
            Err(e) => {
                error!("Failed to perform batch delete: {}", e);
                for key in delete_keys {
                    outcome.push(OperationOutcome::failure(
                        ArtifactOperation::Delete { key },
                        e.to_string(),
                    ));
                }
            }
        }

        outcome
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use async_trait::async_trait;
    use erase_models::CanonicalKey;
    use erase_storage::{BatchDeleteError, BatchDeleteOutcome, StorageError, StorageResult};

    use super::*;

    /// In-memory store recording every call, with configurable failures.
    #[derive(Default)]
    struct FakeStore {
        copies: Mutex<Vec<(String, String)>>,
        delete_batches: Mutex<Vec<Vec<String>>>,
        fail_copy_sources: Vec<String>,
        fail_delete_keys: Vec<String>,
        unconfirmed_delete_keys: Vec<String>,
        fail_batch_call: bool,
    }

    #[async_trait]
    impl ArtifactStore for FakeStore {
        async fn copy_object(
            &self,
            source_key: &str,
            destination_key: &str,
        ) -> StorageResult<()> {
            self.copies
                .lock()
                .unwrap()
                .push((source_key.to_string(), destination_key.to_string()));
            if self.fail_copy_sources.iter().any(|s| s == source_key) {
                return Err(StorageError::copy_failed("NoSuchKey"));
            }
            Ok(())
        }

        async fn batch_delete(&self, keys: &[String]) -> StorageResult<BatchDeleteOutcome> {
            self.delete_batches.lock().unwrap().push(keys.to_vec());
            if self.fail_batch_call {
                return Err(StorageError::batch_delete_failed("connection reset"));
            }

            let mut outcome = BatchDeleteOutcome::default();
            for key in keys {
                if self.fail_delete_keys.contains(key) {
                    outcome.errors.push(BatchDeleteError {
                        key: key.clone(),
                        message: "AccessDenied".to_string(),
                    });
                } else if !self.unconfirmed_delete_keys.contains(key) {
                    outcome.deleted.push(key.clone());
                }
            }
            Ok(outcome)
        }
    }

    fn plan() -> ReconciliationPlan {
        ReconciliationPlan::for_key(&CanonicalKey::derive("/input/show/ep01.mp4"))
    }

    #[tokio::test]
    async fn test_clean_run() {
        let store = Arc::new(FakeStore::default());
        let executor = ReconciliationExecutor::new(store.clone());

        let outcome = executor.execute(&plan()).await;

        assert!(outcome.fully_succeeded());
        assert_eq!(outcome.outcomes().len(), 11);
        assert_eq!(store.copies.lock().unwrap().len(), 4);

        let batches = store.delete_batches.lock().unwrap();
        assert_eq!(batches.len(), 1);
        assert_eq!(batches[0].len(), 7);
    }

    #[tokio::test]
    async fn test_copy_failure_does_not_abort_plan() {
        let store = Arc::new(FakeStore {
            fail_copy_sources: vec!["/input/show/ep01_smarterase_20100.mp4".to_string()],
            ..Default::default()
        });
        let executor = ReconciliationExecutor::new(store.clone());

        let outcome = executor.execute(&plan()).await;

        // All copies attempted, batch delete still issued in full
        assert_eq!(store.copies.lock().unwrap().len(), 4);
        assert_eq!(store.delete_batches.lock().unwrap()[0].len(), 7);
        assert_eq!(outcome.failure_count(), 1);
        assert!(outcome
            .failures()
            .all(|o| matches!(o.operation, ArtifactOperation::Copy { .. })));
    }

    #[tokio::test]
    async fn test_per_key_delete_error_is_recorded() {
        let failing = "/input/show/ep01_smarterase_102.mp4".to_string();
        let store = Arc::new(FakeStore {
            fail_delete_keys: vec![failing.clone()],
            ..Default::default()
        });
        let executor = ReconciliationExecutor::new(store);

        let outcome = executor.execute(&plan()).await;

        assert_eq!(outcome.failure_count(), 1);
        let failure = outcome.failures().next().unwrap();
        assert_eq!(
            failure.operation,
            ArtifactOperation::Delete { key: failing }
        );
        assert_eq!(failure.error.as_deref(), Some("AccessDenied"));
    }

    #[tokio::test]
    async fn test_unconfirmed_delete_is_a_failure() {
        let missing = "/input/show/ep01_smarterase_20108.vtt".to_string();
        let store = Arc::new(FakeStore {
            unconfirmed_delete_keys: vec![missing.clone()],
            ..Default::default()
        });
        let executor = ReconciliationExecutor::new(store);

        let outcome = executor.execute(&plan()).await;

        assert_eq!(outcome.failure_count(), 1);
        let failure = outcome.failures().next().unwrap();
        assert_eq!(
            failure.operation,
            ArtifactOperation::Delete { key: missing }
        );
    }

    #[tokio::test]
    async fn test_batch_call_failure_marks_all_deletes_failed() {
        let store = Arc::new(FakeStore {
            fail_batch_call: true,
            ..Default::default()
        });
        let executor = ReconciliationExecutor::new(store.clone());

        let outcome = executor.execute(&plan()).await;

        assert_eq!(outcome.failure_count(), 7);
        assert!(outcome
            .failures()
            .all(|o| matches!(o.operation, ArtifactOperation::Delete { .. })));
        // Copies were unaffected
        assert_eq!(store.copies.lock().unwrap().len(), 4);
    }
}
