use serde::Deserialize;
use serde::Serialize;
use uuid::Uuid;

/// Claim set carried by a signed credential.
///
/// Standard RFC 7519 fields plus the identity claims the auth server embeds
/// in access and refresh tokens. All fields are optional; absent fields are
/// omitted from the encoded payload. `iss`, `aud`, `iat`, and `exp` are
/// stamped by the codec at issue time, so callers only populate the
/// identity claims.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Claims {
    /// Subject (account identifier)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sub: Option<String>,

    /// Display name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Account email
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,

    /// Token identifier (random nonce, refresh tokens only)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub jti: Option<String>,

    /// Expiration time (Unix timestamp)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exp: Option<i64>,

    /// Issued at (Unix timestamp)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub iat: Option<i64>,

    /// Issuer
    #[serde(skip_serializing_if = "Option::is_none")]
    pub iss: Option<String>,

    /// Audience
    #[serde(skip_serializing_if = "Option::is_none")]
    pub aud: Option<String>,
}

impl Claims {
    /// Create new empty claims.
    pub fn new() -> Self {
        Self::default()
    }

    /// Claims for an access token.
    ///
    /// The original credential protocol uses the account email for the
    /// display name, the subject, and the email claim alike.
    ///
    /// # Arguments
    /// * `email` - Account email
    pub fn for_access(email: impl Into<String>) -> Self {
        let email = email.into();
        Self {
            sub: Some(email.clone()),
            name: Some(email.clone()),
            email: Some(email),
            ..Self::default()
        }
    }

    /// Claims for a refresh token: the account email plus a fresh random
    /// `jti` so two refresh tokens for the same account never collide.
    ///
    /// # Arguments
    /// * `email` - Account email
    pub fn for_refresh(email: impl Into<String>) -> Self {
        Self {
            email: Some(email.into()),
            jti: Some(Uuid::new_v4().to_string()),
            ..Self::default()
        }
    }

    /// Set subject.
    pub fn with_subject(mut self, sub: impl Into<String>) -> Self {
        self.sub = Some(sub.into());
        self
    }

    /// Set email.
    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }
}
