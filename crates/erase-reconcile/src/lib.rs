//! Reconciliation executor for finalized assets.
//!
//! Runs a [`ReconciliationPlan`](erase_models::ReconciliationPlan) against
//! an [`ArtifactStore`](erase_storage::ArtifactStore) with per-operation
//! isolation, aggregating every result into a [`PlanOutcome`].

pub mod executor;
pub mod outcome;

pub use executor::ReconciliationExecutor;
pub use outcome::{OperationOutcome, PlanOutcome};
