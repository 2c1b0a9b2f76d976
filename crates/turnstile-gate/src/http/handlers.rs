use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};
use serde_json::json;

use turnstile_core::error::{ClientCode, TurnstileError};
use turnstile_core::{FailureReason, PolicyData, SubjectExt};

use crate::app_state::AppState;

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CanReq {
    pub subject: String,
    pub policy: String,
    #[serde(default)]
    pub data: PolicyData,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct IsAReq {
    pub subject: String,
    pub role: String,
}

#[derive(Debug, Serialize, PartialEq)]
pub struct Decision {
    pub allowed: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<FailureReason>,
}

/// JSON error body `{code, message}` for a [`TurnstileError`].
#[derive(Debug)]
pub struct ApiError(pub TurnstileError);

impl From<TurnstileError> for ApiError {
    fn from(e: TurnstileError) -> Self {
        Self(e)
    }
}

impl From<JsonRejection> for ApiError {
    fn from(e: JsonRejection) -> Self {
        Self(TurnstileError::BadRequest(e.body_text()))
    }
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self.0.client_code() {
            ClientCode::PolicyNotFound | ClientCode::RoleNotFound | ClientCode::SubjectNotFound => {
                StatusCode::NOT_FOUND
            }
            ClientCode::BadRequest | ClientCode::UnsupportedVersion => StatusCode::BAD_REQUEST,
            ClientCode::PolicyUnavailable | ClientCode::Internal => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = json!({
            "code": self.0.client_code().as_str(),
            "message": self.0.to_string(),
        });
        (self.status(), Json(body)).into_response()
    }
}

pub async fn healthz() -> impl IntoResponse {
    (StatusCode::OK, "ok")
}

/// `POST /v1/can`: evaluate a policy for a subject.
pub async fn can(
    State(state): State<AppState>,
    req: Result<Json<CanReq>, JsonRejection>,
) -> Result<Json<Decision>, ApiError> {
    let Json(req) = req?;
    let subject = state.directory().subject(&req.subject)?;
    let verdict = state.gate().evaluate(subject, &req.policy, &req.data)?;

    Ok(Json(Decision {
        allowed: verdict.is_allowed(),
        reason: verdict.into_failure(),
    }))
}

/// `POST /v1/is-a`: role membership by role name.
pub async fn is_a(
    State(state): State<AppState>,
    req: Result<Json<IsAReq>, JsonRejection>,
) -> Result<Json<Decision>, ApiError> {
    let Json(req) = req?;
    let dir = state.directory();
    let subject = dir.subject(&req.subject)?;
    let allowed = subject.is_a(dir, req.role.as_str())?;

    Ok(Json(Decision { allowed, reason: None }))
}
