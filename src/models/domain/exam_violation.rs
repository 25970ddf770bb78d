use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Append-only log row for an integrity-policy breach during an attempt.
/// Rows are never updated or deleted.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct ExamViolation {
    pub id: String,
    pub exam_id: i64,
    pub student_id: i64,
    pub assignment_id: i64,
    pub violation_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

impl ExamViolation {
    pub fn new(exam_id: i64, student_id: i64, assignment_id: i64, violation_type: &str) -> Self {
        ExamViolation {
            id: Uuid::new_v4().to_string(),
            exam_id,
            student_id,
            assignment_id,
            violation_type: violation_type.to_string(),
            created_at: Some(Utc::now()),
        }
    }
}
