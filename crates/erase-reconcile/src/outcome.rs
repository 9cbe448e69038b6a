//! Per-operation and aggregated reconciliation outcomes.

use erase_models::ArtifactOperation;

/// Result of one attempted storage operation.
///
/// Failures carry the underlying reason as data; nothing below the request
/// boundary propagates them as errors.
#[derive(Debug, Clone)]
pub struct OperationOutcome {
    pub operation: ArtifactOperation,
    pub error: Option<String>,
}

impl OperationOutcome {
    pub fn success(operation: ArtifactOperation) -> Self {
        Self {
            operation,
            error: None,
        }
    }

    pub fn failure(operation: ArtifactOperation, reason: impl Into<String>) -> Self {
        Self {
            operation,
            error: Some(reason.into()),
        }
    }

    pub fn is_success(&self) -> bool {
        self.error.is_none()
    }
}

/// Aggregation of every outcome in one plan run.
#[derive(Debug, Clone, Default)]
pub struct PlanOutcome {
    outcomes: Vec<OperationOutcome>,
}

impl PlanOutcome {
    pub fn push(&mut self, outcome: OperationOutcome) {
        self.outcomes.push(outcome);
    }

    pub fn outcomes(&self) -> &[OperationOutcome] {
        &self.outcomes
    }

    pub fn failures(&self) -> impl Iterator<Item = &OperationOutcome> {
        self.outcomes.iter().filter(|o| !o.is_success())
    }

    pub fn failure_count(&self) -> usize {
        self.failures().count()
    }

    pub fn fully_succeeded(&self) -> bool {
        self.outcomes.iter().all(|o| o.is_success())
    }
}
