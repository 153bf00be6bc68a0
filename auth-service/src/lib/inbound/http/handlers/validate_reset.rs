use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use serde::Serialize;

use super::ApiError;
use super::ApiSuccess;
use crate::account::ports::PasswordResetService;
use crate::inbound::http::router::AppState;

pub async fn validate_reset(
    State(state): State<AppState>,
    Json(body): Json<ValidateResetRequestBody>,
) -> Result<ApiSuccess<ValidateResetResponseData>, ApiError> {
    let is_valid = state
        .account_service
        .validate_reset_token(&body.email, &body.token)
        .await;

    Ok(ApiSuccess::new(
        StatusCode::OK,
        ValidateResetResponseData { is_valid },
    ))
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ValidateResetRequestBody {
    email: String,
    token: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidateResetResponseData {
    pub is_valid: bool,
}
