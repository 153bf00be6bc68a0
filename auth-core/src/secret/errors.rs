use thiserror::Error;

/// Error type for secret generation.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SecretError {
    #[error("At least one character class must be enabled")]
    EmptyAlphabet,
}
