use serde::Deserialize;
use validator::Validate;

#[derive(Debug, Clone, Deserialize)]
pub struct LoginRequest {
    pub identifier: Option<String>,
    pub password: Option<String>,
}

/// Body of a code submission. Presence of both fields is checked before any
/// access control runs, matching the submission endpoint's contract.
#[derive(Debug, Clone, Deserialize)]
pub struct SubmitRequest {
    pub environment: Option<String>,
    pub content: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct ViolationRequest {
    pub assignment_id: i64,

    #[validate(length(min = 1, max = 128))]
    pub violation_type: String,
}
