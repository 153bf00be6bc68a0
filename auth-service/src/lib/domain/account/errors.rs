use thiserror::Error;

/// Error for EmailAddress validation failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum EmailError {
    #[error("Invalid email format: {0}")]
    InvalidFormat(String),
}

/// Error for external store operations.
///
/// The persistence engine lives outside this service; its failures are
/// propagated unchanged and the caller decides the retry policy.
#[derive(Debug, Clone, Error)]
pub enum StoreError {
    #[error("Store operation failed: {0}")]
    Unavailable(String),

    #[error("Account already stored: {0}")]
    Duplicate(String),

    #[error("Account not stored: {0}")]
    Missing(String),
}

/// Error for reset notification delivery.
#[derive(Debug, Clone, Error)]
pub enum NotifyError {
    #[error("Failed to deliver reset notification: {0}")]
    DeliveryFailed(String),
}

/// Top-level error for account operations
#[derive(Debug, Clone, Error)]
pub enum AccountError {
    // Caller input errors
    #[error("Invalid email: {0}")]
    InvalidEmail(#[from] EmailError),

    #[error("Missing required field: {0}")]
    MissingField(&'static str),

    #[error("Password does not meet the strength policy")]
    WeakPassword,

    // Domain-level errors
    #[error("Username already exists: {0}")]
    UsernameAlreadyExists(String),

    #[error("Email already exists: {0}")]
    EmailAlreadyExists(String),

    #[error("Invalid credentials")]
    InvalidCredentials,

    // Credential primitive errors (automatically converted via #[from])
    #[error(transparent)]
    Token(#[from] auth_core::TokenError),

    #[error("Password error: {0}")]
    Password(#[from] auth_core::PasswordError),

    // Infrastructure errors
    #[error(transparent)]
    Store(#[from] StoreError),
}
