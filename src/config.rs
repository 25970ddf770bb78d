use std::env;

#[derive(Clone, Debug)]
pub struct Config {
    pub mongo_conn_string: String,
    pub mongo_db_name: String,
    pub web_server_host: String,
    pub web_server_port: u16,
    pub violations_limit_per_exam: i64,
    pub grading_base_url: String,
    pub grading_user_header: String,
    pub grading_max_retry: u32,
    pub token_expiration_minutes: i64,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            mongo_conn_string: env::var("MONGO_CONN_STRING")
                .unwrap_or_else(|_| "mongodb://localhost:27017".to_string()),
            mongo_db_name: env::var("MONGO_DB_NAME").unwrap_or_else(|_| "albus-local".to_string()),
            web_server_host: env::var("WEB_SERVER_HOST")
                .unwrap_or_else(|_| "localhost".to_string()),
            web_server_port: env::var("WEB_SERVER_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(8080),
            violations_limit_per_exam: env::var("VIOLATIONS_LIMIT_PER_EXAM")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(3),
            grading_base_url: env::var("GRADING_BASE_URL")
                .unwrap_or_else(|_| "http://localhost:9091".to_string()),
            grading_user_header: env::var("GRADING_USER_HEADER")
                .unwrap_or_else(|_| "X-albus-user-id".to_string()),
            grading_max_retry: env::var("GRADING_MAX_RETRY")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(3),
            token_expiration_minutes: env::var("TOKEN_EXPIRATION_MINUTES")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(180),
        }
    }

    #[cfg(test)]
    pub fn test_config() -> Self {
        Self {
            mongo_conn_string: "mongodb://localhost:27017".to_string(),
            mongo_db_name: "albus-test".to_string(),
            web_server_host: "127.0.0.1".to_string(),
            web_server_port: 8080,
            violations_limit_per_exam: 3,
            grading_base_url: "http://localhost:9091".to_string(),
            grading_user_header: "X-albus-user-id".to_string(),
            grading_max_retry: 3,
            token_expiration_minutes: 180,
        }
    }
}
