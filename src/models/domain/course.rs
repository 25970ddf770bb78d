use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct Course {
    pub id: i64,
    pub name: String,
    pub creator_id: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Course {
    pub fn new(id: i64, name: &str, creator_id: i64) -> Self {
        Course {
            id,
            name: name.to_string(),
            creator_id,
            created_at: Some(Utc::now()),
            updated_at: Some(Utc::now()),
        }
    }
}
