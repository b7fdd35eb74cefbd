// file: src/server/routes.rs
// description: request handlers for the review, sentry, landing and health endpoints

use crate::models::{CodeReviewResponse, SentryIssuesResponse, TaskResult};
use crate::server::AppState;
use crate::server::page::INDEX_HTML;
use axum::Json;
use axum::extract::{Query, State};
use axum::response::Html;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use std::sync::Arc;
use tracing::info;

pub const REVIEW_FAILURE: &str = "Failed to analyze the repository.";
pub const SENTRY_FAILURE: &str = "Failed to analyze Sentry logs.";
pub const SENTRY_INSTRUCTION: &str =
    "Retrieve and analyze recent Sentry error logs, providing recommended fixes.";

pub fn review_instruction(repo_url: &str) -> String {
    format!(
        "Analyze the repository {} for potential issues and security vulnerabilities.",
        repo_url
    )
}

/// Either the requested shape or `{"error": ...}`; never both.
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum ApiResponse<T> {
    Success(T),
    Failure { error: &'static str },
}

impl<T> ApiResponse<T> {
    /// Every failure cause collapses to the endpoint's generic message.
    pub fn from_result(result: TaskResult<T>, failure: &'static str) -> Self {
        match result {
            Ok(shape) => ApiResponse::Success(shape),
            Err(_) => ApiResponse::Failure { error: failure },
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct ReviewParams {
    pub repo_url: String,
}

pub async fn index() -> Html<&'static str> {
    Html(INDEX_HTML)
}

pub async fn review_code(
    State(state): State<Arc<AppState>>,
    Query(params): Query<ReviewParams>,
) -> Json<ApiResponse<CodeReviewResponse>> {
    info!("Review requested for {}", params.repo_url);

    let result = state
        .adapter
        .execute::<CodeReviewResponse>(
            review_instruction(&params.repo_url),
            state.tools.describe_source_control_tool(),
        )
        .await;

    Json(ApiResponse::from_result(result, REVIEW_FAILURE))
}

pub async fn analyze_sentry(
    State(state): State<Arc<AppState>>,
) -> Json<ApiResponse<SentryIssuesResponse>> {
    info!("Sentry analysis requested");

    let result = state
        .adapter
        .execute::<SentryIssuesResponse>(
            SENTRY_INSTRUCTION,
            state.tools.describe_error_tracking_tool(),
        )
        .await;

    Json(ApiResponse::from_result(result, SENTRY_FAILURE))
}

pub async fn health(State(state): State<Arc<AppState>>) -> Json<Value> {
    Json(json!({
        "status": "ok",
        "agent": state.agent_name,
        "timestamp": Utc::now().to_rfc3339(),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AgentError;

    #[test]
    fn test_review_instruction_embeds_url() {
        assert_eq!(
            review_instruction("https://github.com/acme/widgets"),
            "Analyze the repository https://github.com/acme/widgets for potential issues and security vulnerabilities."
        );
    }

    #[test]
    fn test_failure_serializes_only_error_key() {
        let response: ApiResponse<CodeReviewResponse> =
            ApiResponse::from_result(Err(AgentError::Model("down".into())), REVIEW_FAILURE);

        assert_eq!(
            serde_json::to_value(&response).unwrap(),
            json!({"error": "Failed to analyze the repository."})
        );
    }
}
