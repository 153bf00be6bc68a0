use std::sync::Arc;

use auth_core::TokenIssuer;
use auth_service::config::Config;
use auth_service::domain::account::service::AccountService;
use auth_service::inbound::http::router::create_router;
use auth_service::outbound::notify::LoggingResetNotifier;
use auth_service::outbound::repositories::InMemoryUserStore;
use chrono::Duration;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "auth_service=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!(
        service = "auth-service",
        version = env!("CARGO_PKG_VERSION"),
        "Service starting"
    );

    let config = Config::load()?;

    tracing::info!(
        http_port = config.server.http_port,
        issuer = %config.jwt.issuer,
        audience = %config.jwt.audience,
        access_expiry_minutes = config.jwt.expiry_minutes,
        refresh_expiry_days = config.jwt.refresh_expiry_days,
        "Configuration loaded"
    );

    let signing_config = config.signing_config()?;
    let token_issuer = Arc::new(TokenIssuer::new(signing_config));

    let store = Arc::new(InMemoryUserStore::new());
    let notifier = Arc::new(LoggingResetNotifier);

    let account_service = Arc::new(
        AccountService::new(store, notifier, token_issuer)
            .with_reset_token_length(config.reset.token_length)
            .with_reset_window(Duration::minutes(config.reset.window_minutes)),
    );

    let http_address = format!("0.0.0.0:{}", config.server.http_port);
    let http_listener = tokio::net::TcpListener::bind(&http_address).await?;
    tracing::info!(
        address = %http_address,
        port = config.server.http_port,
        protocol = "http",
        "Http server listening"
    );

    let http_application = create_router(account_service);
    axum::serve(http_listener, http_application).await?;

    Ok(())
}
