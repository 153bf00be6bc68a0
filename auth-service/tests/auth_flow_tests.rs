use std::sync::Arc;

use auth_core::SigningConfig;
use auth_core::TokenIssuer;
use auth_service::domain::account::models::EmailAddress;
use auth_service::domain::account::models::RegisterCommand;
use auth_service::domain::account::ports::LoginService;
use auth_service::domain::account::ports::PasswordResetService;
use auth_service::domain::account::ports::RegistrationService;
use auth_service::domain::account::ports::UserStore;
use auth_service::domain::account::service::AccountService;
use auth_service::outbound::notify::LoggingResetNotifier;
use auth_service::outbound::repositories::InMemoryUserStore;
use chrono::Duration;

type FlowService = AccountService<InMemoryUserStore, LoggingResetNotifier>;

const EMAIL: &str = "user@example.com";
const PASSWORD: &str = "Or1ginal!pass";

fn signing_config() -> SigningConfig {
    SigningConfig::new(
        b"flow_test_access_secret_32_plus_by!".to_vec(),
        b"flow_test_refresh_secret_32_plus_b!".to_vec(),
        "auth-server",
        "auth-clients",
    )
    .unwrap()
}

fn build(config: SigningConfig) -> (Arc<InMemoryUserStore>, Arc<TokenIssuer>, FlowService) {
    let store = Arc::new(InMemoryUserStore::new());
    let issuer = Arc::new(TokenIssuer::new(config));
    let service = AccountService::new(
        Arc::clone(&store),
        Arc::new(LoggingResetNotifier),
        Arc::clone(&issuer),
    );
    (store, issuer, service)
}

async fn register_user(service: &FlowService) {
    let command = RegisterCommand::new(
        "user".to_string(),
        EmailAddress::new(EMAIL).unwrap(),
        PASSWORD.to_string(),
    );
    service.register(command).await.expect("Registration failed");
}

async fn stored_reset_token(store: &InMemoryUserStore) -> String {
    store
        .find_by_email(&EmailAddress::new(EMAIL).unwrap())
        .await
        .unwrap()
        .expect("Account must exist")
        .reset_token
        .expect("Reset token must be parked")
}

#[tokio::test]
async fn register_login_refresh_roundtrip() {
    let (_store, issuer, service) = build(signing_config());
    register_user(&service).await;

    let pair = service.login(EMAIL, PASSWORD).await.expect("Login failed");
    assert!(service.validate(&pair.access_token).await);

    let fresh = service
        .refresh(&pair.refresh_token)
        .await
        .expect("Refresh failed");
    assert!(service.validate(&fresh).await);

    let claims = issuer.principal(&fresh).unwrap();
    assert_eq!(claims.email.as_deref(), Some(EMAIL));
}

#[tokio::test]
async fn login_rejects_wrong_password_and_duplicate_registration() {
    let (_store, _issuer, service) = build(signing_config());
    register_user(&service).await;

    assert!(service.login(EMAIL, "Wr0ng!password").await.is_err());
    assert!(service.login("other@example.com", PASSWORD).await.is_err());

    let duplicate = RegisterCommand::new(
        "user".to_string(),
        EmailAddress::new("second@example.com").unwrap(),
        PASSWORD.to_string(),
    );
    assert!(service.register(duplicate).await.is_err());
}

#[tokio::test]
async fn expired_access_token_is_refreshed_without_reauthentication() {
    let config = signing_config().with_access_ttl(Duration::seconds(1));
    let (_store, _issuer, service) = build(config);
    register_user(&service).await;

    let pair = service.login(EMAIL, PASSWORD).await.unwrap();
    assert!(service.validate(&pair.access_token).await);

    // Outlive the access lifetime but stay well inside the refresh one
    tokio::time::sleep(std::time::Duration::from_secs(2)).await;
    assert!(!service.validate(&pair.access_token).await);

    let fresh = service
        .refresh(&pair.refresh_token)
        .await
        .expect("Refresh must succeed while the refresh token lives");
    assert!(service.validate(&fresh).await);
}

#[tokio::test]
async fn password_reset_lifecycle() {
    let (store, _issuer, service) = build(signing_config());
    register_user(&service).await;

    assert!(service.initiate_password_reset(EMAIL).await);

    // The account cannot authenticate while the reset is pending
    assert!(service.login(EMAIL, PASSWORD).await.is_err());

    let token = stored_reset_token(&store).await;

    assert!(!service.validate_reset_token(EMAIL, "wrong-token").await);
    assert!(service.validate_reset_token(EMAIL, &token).await);

    // Valid token, weak replacement: rejected without consuming the token
    assert!(!service.reset_password(EMAIL, &token, "weak").await);
    assert!(service.validate_reset_token(EMAIL, &token).await);

    assert!(service.reset_password(EMAIL, &token, "N3w!passw0rd").await);

    // Token is single-use
    assert!(!service.validate_reset_token(EMAIL, &token).await);
    assert!(!service.reset_password(EMAIL, &token, "An0ther!pass").await);

    assert!(service.login(EMAIL, "N3w!passw0rd").await.is_ok());
    assert!(service.login(EMAIL, PASSWORD).await.is_err());
}

#[tokio::test]
async fn reset_window_expires() {
    let (store, _issuer, service) = build(signing_config());
    let service = service.with_reset_window(Duration::milliseconds(500));
    register_user(&service).await;

    assert!(service.initiate_password_reset(EMAIL).await);
    let token = stored_reset_token(&store).await;
    assert!(service.validate_reset_token(EMAIL, &token).await);

    tokio::time::sleep(std::time::Duration::from_secs(1)).await;

    assert!(!service.validate_reset_token(EMAIL, &token).await);
    assert!(!service.reset_password(EMAIL, &token, "N3w!passw0rd").await);
}

#[tokio::test]
async fn initiate_reset_for_unknown_email_returns_false() {
    let (store, _issuer, service) = build(signing_config());
    register_user(&service).await;

    assert!(!service.initiate_password_reset("unknown@x.com").await);

    // The known account is untouched
    let account = store
        .find_by_email(&EmailAddress::new(EMAIL).unwrap())
        .await
        .unwrap()
        .unwrap();
    assert!(account.reset_token.is_none());
    assert!(account.password_hash.is_some());
}
