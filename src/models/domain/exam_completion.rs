use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A student's attempt record for one exam, keyed by (exam_id, student_id).
/// `completed` flips false -> true exactly once; the forced-completion path
/// (violation limit) may create or overwrite the row in one upsert.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct ExamCompletion {
    pub exam_id: i64,
    pub student_id: i64,
    pub completed: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub completion_reason: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl ExamCompletion {
    pub fn new(exam_id: i64, student_id: i64) -> Self {
        ExamCompletion {
            exam_id,
            student_id,
            completed: false,
            completion_reason: None,
            created_at: Some(Utc::now()),
            updated_at: Some(Utc::now()),
        }
    }
}
