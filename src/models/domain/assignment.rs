use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct Assignment {
    pub id: i64,
    /// Position within the exam; (index, exam_id) is unique.
    pub index: i32,
    pub name: String,
    pub text: String,
    pub exam_id: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Assignment {
    pub fn new(id: i64, index: i32, name: &str, text: &str, exam_id: i64) -> Self {
        Assignment {
            id,
            index,
            name: name.to_string(),
            text: text.to_string(),
            exam_id,
            created_at: Some(Utc::now()),
            updated_at: Some(Utc::now()),
        }
    }
}
