use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use serde::Serialize;

use super::ApiError;
use super::ApiSuccess;
use crate::account::ports::LoginService;
use crate::inbound::http::router::AppState;

pub async fn validate(
    State(state): State<AppState>,
    Json(body): Json<ValidateRequestBody>,
) -> Result<ApiSuccess<ValidateResponseData>, ApiError> {
    if body.token.is_empty() {
        return Err(ApiError::BadRequest("Invalid token request".to_string()));
    }

    let is_valid = state.account_service.validate(&body.token).await;

    Ok(ApiSuccess::new(
        StatusCode::OK,
        ValidateResponseData { is_valid },
    ))
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ValidateRequestBody {
    token: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidateResponseData {
    pub is_valid: bool,
}
