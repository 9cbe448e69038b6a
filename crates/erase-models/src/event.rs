//! Callback payload types for the video-processing pipeline.
//!
//! The pipeline posts one JSON notification per finished schedule. Only the
//! fields the reconciliation flow reads are modeled; everything else on the
//! wire is ignored by serde. Absent nested objects decode to `None` so the
//! handler can classify the payload instead of erroring on shape.

use serde::Deserialize;

/// Event type emitted when a processing schedule finishes.
pub const SCHEDULE_TASK_EVENT: &str = "ScheduleTask";

/// Sentinel message the pipeline sets on a fully successful job.
pub const SUCCESS_MESSAGE: &str = "SUCCESS";

/// Top-level callback payload.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct CallbackPayload {
    /// Event discriminator, e.g. `"ScheduleTask"`.
    pub event_type: String,
    /// Present only for schedule-task notifications.
    #[serde(default)]
    pub schedule_task_event: Option<ScheduleTaskEvent>,
}

/// Disposition of a decoded payload.
///
/// Malformed bodies never reach this point; they fail at the
/// deserialization boundary and are answered with a client error.
#[derive(Debug, Clone)]
pub enum EventDisposition {
    /// A recognized schedule-task completion.
    ScheduleTask(ScheduleTaskEvent),
    /// Unknown event type, or the nested event object is absent.
    /// Acknowledged without any reconciliation.
    Irrelevant { event_type: String },
}

impl CallbackPayload {
    /// Classify the payload into an exhaustive disposition.
    pub fn classify(self) -> EventDisposition {
        if self.event_type != SCHEDULE_TASK_EVENT {
            return EventDisposition::Irrelevant {
                event_type: self.event_type,
            };
        }
        match self.schedule_task_event {
            Some(event) => EventDisposition::ScheduleTask(event),
            None => EventDisposition::Irrelevant {
                event_type: self.event_type,
            },
        }
    }
}

/// Nested schedule-task completion event.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ScheduleTaskEvent {
    #[serde(default)]
    pub task_id: String,

    #[serde(default)]
    pub status: String,

    /// Free-text outcome indicator; `"SUCCESS"` is the only recognized
    /// success value.
    #[serde(default)]
    pub message: String,

    #[serde(default)]
    pub input_info: Option<InputInfo>,

    /// Per-activity outcomes, in schedule order.
    #[serde(default)]
    pub activity_result_set: Vec<ActivityResult>,
}

impl ScheduleTaskEvent {
    /// Original storage key submitted to the job, if the payload carried one.
    pub fn input_object(&self) -> Option<&str> {
        self.input_info
            .as_ref()?
            .cos_input_info
            .as_ref()?
            .object
            .as_deref()
    }

    /// Whether the upstream job reported full success.
    pub fn is_success(&self) -> bool {
        self.message == SUCCESS_MESSAGE
    }
}

/// Input description echoed back by the pipeline.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct InputInfo {
    #[serde(default)]
    pub cos_input_info: Option<CosInputInfo>,
}

/// COS object reference. The wire also carries `Bucket` and `Region`;
/// the service operates on a single configured bucket, so only the key
/// is read.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct CosInputInfo {
    #[serde(default)]
    pub object: Option<String>,
}

/// Outcome of one activity in the schedule.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ActivityResult {
    #[serde(default)]
    pub activity_type: String,

    #[serde(default)]
    pub activity_res_item: Option<ActivityResItem>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ActivityResItem {
    #[serde(default)]
    pub smart_erase_task: Option<SmartEraseTask>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct SmartEraseTask {
    #[serde(default)]
    pub status: String,

    #[serde(default)]
    pub output: Option<SmartEraseOutput>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct SmartEraseOutput {
    #[serde(default)]
    pub path: Option<String>,

    #[serde(default)]
    pub origin_subtitle_path: Option<String>,

    #[serde(default)]
    pub translate_subtitle_path: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_payload() -> &'static str {
        r#"{
            "EventType": "ScheduleTask",
            "ScheduleTaskEvent": {
                "TaskId": "task-2400123",
                "Status": "FINISH",
                "Message": "SUCCESS",
                "InputInfo": {
                    "CosInputInfo": {
                        "Bucket": "media-1250000000",
                        "Region": "ap-singapore",
                        "Object": "/input/show/ep01.mp4"
                    }
                },
                "ActivityResultSet": [
                    {
                        "ActivityType": "smart-erase",
                        "ActivityResItem": {
                            "SmartEraseTask": {
                                "Status": "SUCCESS",
                                "Output": {
                                    "Path": "/input/show/ep01_smarterase_20100.mp4",
                                    "OriginSubtitlePath": "/input/show/ep01_smarterase_20108.vtt",
                                    "TranslateSubtitlePath": "/input/show/ep01_smarterase_20108_id.vtt"
                                }
                            }
                        }
                    }
                ]
            }
        }"#
    }

    #[test]
    fn test_decode_schedule_task() {
        let payload: CallbackPayload = serde_json::from_str(sample_payload()).unwrap();
        let event = match payload.classify() {
            EventDisposition::ScheduleTask(event) => event,
            other => panic!("unexpected disposition: {:?}", other),
        };

        assert_eq!(event.task_id, "task-2400123");
        assert!(event.is_success());
        assert_eq!(event.input_object(), Some("/input/show/ep01.mp4"));
        assert_eq!(event.activity_result_set.len(), 1);

        let erase = event.activity_result_set[0]
            .activity_res_item
            .as_ref()
            .and_then(|item| item.smart_erase_task.as_ref())
            .unwrap();
        assert_eq!(
            erase.output.as_ref().and_then(|o| o.path.as_deref()),
            Some("/input/show/ep01_smarterase_20100.mp4")
        );
    }

    #[test]
    fn test_unknown_event_type_is_irrelevant() {
        let payload: CallbackPayload =
            serde_json::from_str(r#"{"EventType": "NewFileUpload"}"#).unwrap();
        match payload.classify() {
            EventDisposition::Irrelevant { event_type } => {
                assert_eq!(event_type, "NewFileUpload");
            }
            other => panic!("unexpected disposition: {:?}", other),
        }
    }

    #[test]
    fn test_missing_nested_event_is_irrelevant() {
        let payload: CallbackPayload =
            serde_json::from_str(r#"{"EventType": "ScheduleTask"}"#).unwrap();
        assert!(matches!(
            payload.classify(),
            EventDisposition::Irrelevant { .. }
        ));
    }

    #[test]
    fn test_missing_input_object() {
        let payload: CallbackPayload = serde_json::from_str(
            r#"{
                "EventType": "ScheduleTask",
                "ScheduleTaskEvent": {
                    "TaskId": "task-1",
                    "Status": "FINISH",
                    "Message": "SUCCESS"
                }
            }"#,
        )
        .unwrap();
        let event = match payload.classify() {
            EventDisposition::ScheduleTask(event) => event,
            other => panic!("unexpected disposition: {:?}", other),
        };
        assert_eq!(event.input_object(), None);
        assert!(event.activity_result_set.is_empty());
    }

    #[test]
    fn test_failed_job_is_not_success() {
        let payload: CallbackPayload = serde_json::from_str(
            r#"{
                "EventType": "ScheduleTask",
                "ScheduleTaskEvent": {
                    "TaskId": "task-2",
                    "Status": "FINISH",
                    "Message": "InvalidParameter.SourceNotFound"
                }
            }"#,
        )
        .unwrap();
        let event = match payload.classify() {
            EventDisposition::ScheduleTask(event) => event,
            other => panic!("unexpected disposition: {:?}", other),
        };
        assert!(!event.is_success());
    }
}
