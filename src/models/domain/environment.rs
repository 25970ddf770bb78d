use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Sandbox image a submission is executed in.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct Environment {
    pub id: i64,
    pub name: String,
    pub docker_image: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Environment {
    pub fn new(id: i64, name: &str, docker_image: &str) -> Self {
        Environment {
            id,
            name: name.to_string(),
            docker_image: docker_image.to_string(),
            created_at: Some(Utc::now()),
            updated_at: Some(Utc::now()),
        }
    }
}
