use std::collections::HashMap;

use chrono::{DateTime, Duration, Utc};
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::{
    auth::identity::Identity,
    errors::{AppError, AppResult},
};

struct TokenRecord {
    identity: Identity,
    expires_at: DateTime<Utc>,
}

/// Process-wide session store. Tokens are opaque random handles; the
/// server-side record is the only authority for identity and expiry, so
/// nothing the client holds is ever trusted for authorization decisions.
///
/// Expired entries are evicted lazily on lookup; there is no background
/// sweep.
pub struct AuthManager {
    token_expiration_minutes: i64,
    credentials: RwLock<HashMap<String, TokenRecord>>,
}

impl AuthManager {
    pub fn new(token_expiration_minutes: i64) -> Self {
        Self {
            token_expiration_minutes,
            credentials: RwLock::new(HashMap::new()),
        }
    }

    pub async fn create_token(&self, identity: Identity) -> String {
        let token = Uuid::new_v4().simple().to_string();
        let expires_at = Utc::now() + Duration::minutes(self.token_expiration_minutes);

        let mut credentials = self.credentials.write().await;
        credentials.insert(
            token.clone(),
            TokenRecord {
                identity,
                expires_at,
            },
        );

        token
    }

    pub async fn get_identity(&self, token: &str) -> AppResult<Identity> {
        {
            let credentials = self.credentials.read().await;
            match credentials.get(token) {
                None => return Err(AppError::Unauthorized("Unauthorized.".to_string())),
                Some(record) if Utc::now() < record.expires_at => {
                    return Ok(record.identity.clone());
                }
                Some(_) => {}
            }
        }

        // Past expiry: evict so the token stays permanently unusable.
        self.credentials.write().await.remove(token);
        Err(AppError::Unauthorized("Unauthorized.".to_string()))
    }

    pub async fn invalidate(&self, token: &str) {
        self.credentials.write().await.remove(token);
    }
}
