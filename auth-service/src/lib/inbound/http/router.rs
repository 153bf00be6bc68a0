use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::http::Request;
use axum::http::Response;
use axum::routing::post;
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::Span;

use super::handlers::forgot_password::forgot_password;
use super::handlers::login::login;
use super::handlers::refresh::refresh;
use super::handlers::register::register;
use super::handlers::reset_password::reset_password;
use super::handlers::validate::validate;
use super::handlers::validate_reset::validate_reset;
use crate::domain::account::service::AccountService;
use crate::outbound::notify::LoggingResetNotifier;
use crate::outbound::repositories::InMemoryUserStore;

#[derive(Clone)]
pub struct AppState {
    pub account_service: Arc<AccountService<InMemoryUserStore, LoggingResetNotifier>>,
}

pub fn create_router(
    account_service: Arc<AccountService<InMemoryUserStore, LoggingResetNotifier>>,
) -> Router {
    let state = AppState { account_service };

    let routes = Router::new()
        .route("/api/auth/login", post(login))
        .route("/api/auth/refresh", post(refresh))
        .route("/api/auth/validate", post(validate))
        .route("/api/auth/register", post(register))
        .route("/api/auth/password/forgot", post(forgot_password))
        .route("/api/auth/password/validate", post(validate_reset))
        .route("/api/auth/password/reset", post(reset_password));

    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(|request: &Request<Body>| {
            tracing::info_span!(
                "http_request",
                method = %request.method(),
                uri = %request.uri(),
                version = ?request.version(),
            )
        })
        .on_request(|request: &Request<Body>, _span: &Span| {
            tracing::info!(
                method = %request.method(),
                uri = %request.uri(),
                "Request started"
            );
        })
        .on_response(
            |response: &Response<Body>, latency: Duration, _span: &Span| {
                tracing::info!(
                    status = response.status().as_u16(),
                    latency_ms = latency.as_millis(),
                    "Request completed"
                );
            },
        );

    Router::new()
        .merge(routes)
        .layer(trace_layer)
        .layer(CorsLayer::permissive())
        .with_state(state)
}
