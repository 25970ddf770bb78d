use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Role {
    Student,
    Staff,
}

/// Snapshot of the authenticated actor, taken at login time. Later profile
/// changes are not reflected until the user authenticates again.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    pub id: i64,
    pub email: String,
    pub role: Role,
}

impl Identity {
    pub fn new(id: i64, email: &str, role: Role) -> Self {
        Self {
            id,
            email: email.to_string(),
            role,
        }
    }

    pub fn is_staff(&self) -> bool {
        self.role == Role::Staff
    }
}
