use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Stored lifecycle state. Transitions are monotonic:
/// INACTIVE -> ACTIVE -> COMPLETE, never backwards.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ExamStatus {
    Inactive,
    Active,
    Complete,
}

impl ExamStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ExamStatus::Inactive => "INACTIVE",
            ExamStatus::Active => "ACTIVE",
            ExamStatus::Complete => "COMPLETE",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct Exam {
    pub id: i64,
    pub description: String,
    pub status: ExamStatus,
    pub course_id: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Exam {
    pub fn new(id: i64, description: &str, status: ExamStatus, course_id: i64) -> Self {
        Exam {
            id,
            description: description.to_string(),
            status,
            course_id,
            created_at: Some(Utc::now()),
            updated_at: Some(Utc::now()),
        }
    }
}
