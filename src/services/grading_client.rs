use std::time::Duration;

use reqwest::{RequestBuilder, StatusCode};
use serde_json::{json, Value};

use crate::errors::{AppError, AppResult};

/// Statuses that are the caller's fault; surfaced immediately with the
/// remote body as the message.
const CLIENT_ERROR_STATUS_CODES: [u16; 4] = [400, 401, 403, 409];
/// Statuses worth waiting out with exponential backoff.
const RETRYABLE_STATUS_CODES: [u16; 3] = [502, 503, 429];

/// Client for the remote grading service. Every call carries the
/// authenticated caller's id in a configurable header and runs through the
/// bounded retry loop below. Backoff sleeps block the calling task only.
pub struct GradingClient {
    http: reqwest::Client,
    base_url: String,
    user_header: String,
    max_retry: u32,
    backoff_unit: Duration,
}

impl GradingClient {
    pub fn new(base_url: &str, user_header: &str, max_retry: u32) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            user_header: user_header.to_string(),
            max_retry,
            backoff_unit: Duration::from_secs(1),
        }
    }

    /// Shrinks the backoff time unit; tests use millisecond units.
    pub fn with_backoff_unit(mut self, backoff_unit: Duration) -> Self {
        self.backoff_unit = backoff_unit;
        self
    }

    pub async fn submit(
        &self,
        assignment_id: i64,
        assignment_name: &str,
        environment: &str,
        exam_id: i64,
        content: &str,
        user_id: i64,
    ) -> AppResult<Value> {
        let url = format!("{}/api/v1/submissions", self.base_url);
        let payload = json!({
            "assignmentId": assignment_id,
            "assignmentName": assignment_name,
            "environment": environment,
            "examId": exam_id,
            "content": content,
        });

        let request = self
            .http
            .post(&url)
            .header(self.user_header.as_str(), user_id.to_string())
            .json(&payload);

        self.execute_with_retry(request, StatusCode::ACCEPTED).await
    }

    pub async fn list_my_submissions(
        &self,
        exam_id: i64,
        page: i64,
        size: i64,
        user_id: i64,
    ) -> AppResult<Value> {
        let url = format!(
            "{}/api/v1/submissions?examId={}&page={}&size={}",
            self.base_url, exam_id, page, size
        );
        self.get(&url, user_id).await
    }

    pub async fn list_all_submissions(&self, page: i64, size: i64, user_id: i64) -> AppResult<Value> {
        let url = format!(
            "{}/api/v1/submissions/_all?page={}&size={}",
            self.base_url, page, size
        );
        self.get(&url, user_id).await
    }

    pub async fn get_submission(&self, submission_id: i64, user_id: i64) -> AppResult<Value> {
        let url = format!("{}/api/v1/submissions/{}", self.base_url, submission_id);
        self.get(&url, user_id).await
    }

    pub async fn get_allowance(&self, assignment_id: i64, user_id: i64) -> AppResult<Value> {
        let url = format!(
            "{}/api/v1/submissions/allowance?assignmentId={}",
            self.base_url, assignment_id
        );
        self.get(&url, user_id).await
    }

    async fn get(&self, url: &str, user_id: i64) -> AppResult<Value> {
        let request = self
            .http
            .get(url)
            .header(self.user_header.as_str(), user_id.to_string());

        self.execute_with_retry(request, StatusCode::OK).await
    }

    /// Bounded attempt loop. Expected status returns the parsed body;
    /// client errors and 500 fail fast; retryable statuses back off for
    /// `2^attempt` units; anything else falls through to the next attempt
    /// without sleeping. Exhausting the budget reports the service as
    /// unavailable no matter what the last status was.
    async fn execute_with_retry(
        &self,
        request: RequestBuilder,
        expected_status: StatusCode,
    ) -> AppResult<Value> {
        let mut attempt_count: u32 = 0;

        while attempt_count < self.max_retry {
            attempt_count += 1;

            let attempt = request.try_clone().ok_or_else(|| {
                AppError::InternalError("Grading request cannot be retried".to_string())
            })?;

            let response = attempt.send().await.map_err(|e| {
                AppError::InternalError(format!("Failed to reach grading service: {}", e))
            })?;

            let status = response.status();

            if status == expected_status {
                return response.json().await.map_err(|e| {
                    AppError::InternalError(format!("Invalid grading service response: {}", e))
                });
            }

            let body = response.text().await.unwrap_or_default();
            log::warn!(
                "Grading service responded with: status = {}, body = {}",
                status,
                body
            );

            if CLIENT_ERROR_STATUS_CODES.contains(&status.as_u16()) {
                return Err(AppError::from_status(status, body));
            }

            if status == StatusCode::INTERNAL_SERVER_ERROR {
                return Err(AppError::InternalError("Internal server error.".to_string()));
            }

            if RETRYABLE_STATUS_CODES.contains(&status.as_u16()) {
                tokio::time::sleep(self.backoff_unit * 2u32.pow(attempt_count)).await;
            }
        }

        Err(AppError::Unavailable(
            "Grading service is currently unavailable".to_string(),
        ))
    }
}
