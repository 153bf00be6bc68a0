use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use serde::Serialize;

use super::ApiError;
use super::ApiSuccess;
use crate::account::ports::PasswordResetService;
use crate::inbound::http::router::AppState;

pub async fn reset_password(
    State(state): State<AppState>,
    Json(body): Json<ResetPasswordRequestBody>,
) -> Result<ApiSuccess<ResetPasswordResponseData>, ApiError> {
    let reset = state
        .account_service
        .reset_password(&body.email, &body.token, &body.new_password)
        .await;

    if !reset {
        // Invalid token, expired window, or weak password: no detail leaks
        return Err(ApiError::BadRequest("Password reset rejected".to_string()));
    }

    Ok(ApiSuccess::new(
        StatusCode::OK,
        ResetPasswordResponseData { reset },
    ))
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResetPasswordRequestBody {
    email: String,
    token: String,
    new_password: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResetPasswordResponseData {
    pub reset: bool,
}
