use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use serde::Serialize;

use super::ApiError;
use super::ApiSuccess;
use crate::account::errors::AccountError;
use crate::account::ports::LoginService;
use crate::inbound::http::router::AppState;

pub async fn refresh(
    State(state): State<AppState>,
    Json(body): Json<RefreshRequestBody>,
) -> Result<ApiSuccess<RefreshResponseData>, ApiError> {
    if body.refresh_token.is_empty() {
        return Err(ApiError::BadRequest(
            "Invalid refresh token request".to_string(),
        ));
    }

    let access_token = state
        .account_service
        .refresh(&body.refresh_token)
        .await
        .map_err(|e| match e {
            AccountError::Store(err) => ApiError::InternalServerError(err.to_string()),
            _ => ApiError::Unauthorized("Invalid refresh token".to_string()),
        })?;

    Ok(ApiSuccess::new(
        StatusCode::OK,
        RefreshResponseData { access_token },
    ))
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RefreshRequestBody {
    refresh_token: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RefreshResponseData {
    pub access_token: String,
}
