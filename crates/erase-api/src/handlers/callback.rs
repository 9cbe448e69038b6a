//! Pipeline callback handler.
//!
//! Per-request flow: parse the delivery, classify it, and for successful
//! schedule-task completions derive the canonical key, build the
//! reconciliation plan, and execute it. The notifier only cares that the
//! delivery was received, so reconciliation failures are logged and
//! acknowledged; answering non-200 would trigger the upstream
//! retry/backoff and re-deliver the same event.

use std::sync::Arc;

use axum::extract::State;
use axum::Json;
use erase_models::{
    CallbackPayload, CanonicalKey, EventDisposition, ReconciliationPlan, ScheduleTaskEvent,
};
use erase_reconcile::ReconciliationExecutor;
use serde::Serialize;
use tracing::{error, info, warn};

use crate::error::{ApiError, ApiResult};
use crate::state::AppState;

/// Acknowledgment returned for every handled notification.
#[derive(Serialize)]
pub struct CallbackResponse {
    pub status: &'static str,
    pub message: String,
}

impl CallbackResponse {
    fn success(message: impl Into<String>) -> Json<Self> {
        Json(Self {
            status: "success",
            message: message.into(),
        })
    }
}

/// Handle one pipeline notification.
pub async fn callback(
    State(state): State<AppState>,
    body: String,
) -> ApiResult<Json<CallbackResponse>> {
    // Audit log of the raw delivery before any interpretation
    info!("Callback request body: {}", body);

    let payload: CallbackPayload =
        serde_json::from_str(&body).map_err(|_| ApiError::bad_request("No JSON data"))?;

    let event = match payload.classify() {
        EventDisposition::Irrelevant { event_type } => {
            info!("Ignoring event type: {}", event_type);
            return Ok(CallbackResponse::success("Callback received and logged"));
        }
        EventDisposition::ScheduleTask(event) => event,
    };

    if !event.is_success() {
        error!(
            task_id = %event.task_id,
            status = %event.status,
            message = %event.message,
            "Upstream job failed; nothing to reconcile"
        );
        return Ok(CallbackResponse::success("Callback received and logged"));
    }

    log_activity_results(&event);

    let Some(object_key) = event.input_object() else {
        warn!(
            task_id = %event.task_id,
            "No input object in payload; nothing to reconcile"
        );
        return Ok(CallbackResponse::success("Callback received and logged"));
    };

    let key = CanonicalKey::derive(object_key);
    info!("Starting to process video files for key: {}", key);

    let plan = ReconciliationPlan::for_key(&key);
    let executor = ReconciliationExecutor::new(Arc::clone(&state.store));
    let outcome = executor.execute(&plan).await;

    if outcome.fully_succeeded() {
        info!("Finished processing video files for key: {}", key);
    } else {
        warn!(
            "Finished processing video files for key {} with {} failed operations",
            key,
            outcome.failure_count()
        );
    }

    Ok(CallbackResponse::success("Callback processed"))
}

/// Observability summary of what the pipeline reported per activity,
/// independent of the reconciliation plan.
fn log_activity_results(event: &ScheduleTaskEvent) {
    for activity in &event.activity_result_set {
        let task = activity
            .activity_res_item
            .as_ref()
            .and_then(|item| item.smart_erase_task.as_ref());
        let Some(task) = task else {
            info!(activity_type = %activity.activity_type, "Activity finished");
            continue;
        };

        let output = task.output.as_ref();
        info!(
            activity_type = %activity.activity_type,
            status = %task.status,
            output = output.and_then(|o| o.path.as_deref()).unwrap_or("-"),
            origin_subtitle = output
                .and_then(|o| o.origin_subtitle_path.as_deref())
                .unwrap_or("-"),
            translate_subtitle = output
                .and_then(|o| o.translate_subtitle_path.as_deref())
                .unwrap_or("-"),
            "Activity finished"
        );
    }
}
