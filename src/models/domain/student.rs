use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct Student {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    /// PHC-format digest, never the plain password.
    pub password: String,
    /// Login handle handed out by staff, distinct from the email.
    pub identifier: String,
    pub active: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Student {
    pub fn new(
        id: i64,
        first_name: &str,
        last_name: &str,
        email: &str,
        password: &str,
        identifier: &str,
        active: bool,
    ) -> Self {
        Student {
            id,
            first_name: first_name.to_string(),
            last_name: last_name.to_string(),
            email: email.to_string(),
            password: password.to_string(),
            identifier: identifier.to_string(),
            active,
            created_at: Some(Utc::now()),
            updated_at: Some(Utc::now()),
        }
    }
}
