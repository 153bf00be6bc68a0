use thiserror::Error;

/// Error type for signed-token operations.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum JwtError {
    #[error("Failed to sign token: {0}")]
    SigningFailed(String),

    #[error("Token is expired")]
    Expired,

    #[error("Token issuer is not trusted")]
    IssuerMismatch,

    #[error("Token audience is not trusted")]
    AudienceMismatch,

    #[error("Missing required claim: {0}")]
    MissingClaim(String),

    #[error("Token is malformed or carries an invalid signature: {0}")]
    Invalid(String),
}
