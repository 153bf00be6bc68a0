//! Credential primitives library
//!
//! Provides the cryptographic building blocks of the auth server:
//! - Password hashing (Argon2id)
//! - Secure random secret generation (reset tokens, fallback signing keys)
//! - Signed-token codec (HMAC-SHA256 JWTs with explicit verification switches)
//! - Token issuer (access/refresh pair issuance and refresh-token freshening)
//!
//! Everything in this crate is pure computation: no I/O, no async, no shared
//! mutable state. Configuration is an explicit [`SigningConfig`] value passed
//! by handle; there is no ambient lookup.
//!
//! # Examples
//!
//! ## Password Hashing
//! ```
//! use auth_core::PasswordHasher;
//!
//! let hasher = PasswordHasher::new();
//! let hash = hasher.hash("Sup3r$ecret").unwrap();
//! assert!(hasher.verify("Sup3r$ecret", &hash).unwrap());
//! ```
//!
//! ## Token Pair Issuance
//! ```
//! use auth_core::{Identity, SigningConfig, TokenIssuer};
//!
//! let config = SigningConfig::new(
//!     b"access_secret_of_at_least_32_bytes!".to_vec(),
//!     b"refresh_secret_of_at_least_32_byte!".to_vec(),
//!     "auth-server",
//!     "auth-clients",
//! )
//! .unwrap();
//!
//! let issuer = TokenIssuer::new(config);
//! let identity = Identity::new("alice@example.com").unwrap();
//! let pair = issuer.generate_tokens(&identity).unwrap();
//!
//! assert!(issuer.validate_token(&pair.access_token));
//! let fresh_access = issuer.freshen(&pair.refresh_token).unwrap();
//! assert!(issuer.validate_token(&fresh_access));
//! ```
//!
//! ## Reset Secrets
//! ```
//! use auth_core::SecretGenerator;
//!
//! let generator = SecretGenerator::new();
//! let token = generator.generate(32).unwrap();
//! assert_eq!(token.chars().count(), 32);
//! ```

pub mod issuer;
pub mod jwt;
pub mod password;
pub mod secret;

// Re-export commonly used items
pub use issuer::Identity;
pub use issuer::SigningConfig;
pub use issuer::SigningConfigError;
pub use issuer::TokenError;
pub use issuer::TokenIssuer;
pub use issuer::TokenPair;
pub use jwt::Claims;
pub use jwt::JwtCodec;
pub use jwt::JwtError;
pub use jwt::VerifyOptions;
pub use password::PasswordError;
pub use password::PasswordHasher;
pub use secret::Alphabet;
pub use secret::SecretError;
pub use secret::SecretGenerator;
