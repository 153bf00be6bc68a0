use chrono::Duration;
use thiserror::Error;

use crate::jwt::Claims;
use crate::jwt::JwtCodec;
use crate::jwt::JwtError;
use crate::jwt::VerifyOptions;

/// Error for signing configuration construction.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SigningConfigError {
    #[error("Signing secret too short: minimum {min} bytes, got {actual}")]
    SecretTooShort { min: usize, actual: usize },
}

/// Token issuance and verification errors.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TokenError {
    #[error("Identity email cannot be empty")]
    EmptyIdentity,

    #[error("Token cannot be empty")]
    EmptyToken,

    #[error("Refresh token does not carry an email claim")]
    MissingEmailClaim,

    #[error("Refresh token failed verification")]
    RefreshRejected,

    #[error(transparent)]
    Jwt(#[from] JwtError),
}

/// Immutable signing configuration.
///
/// Constructed once at startup and handed to the issuer; every codec
/// operation reads from this value, never from ambient state. Access and
/// refresh tokens are keyed by different secrets, so a leaked access token
/// cannot be replayed as a refresh token.
#[derive(Debug, Clone)]
pub struct SigningConfig {
    access_secret: Vec<u8>,
    refresh_secret: Vec<u8>,
    issuer: String,
    audience: String,
    access_ttl: Duration,
    refresh_ttl: Duration,
    clock_skew: Duration,
    validate_issuer: bool,
    validate_audience: bool,
    validate_lifetime: bool,
    validate_signing_key: bool,
}

impl SigningConfig {
    /// Minimum secret length accepted for HS256 keys.
    pub const MIN_SECRET_BYTES: usize = 32;

    /// Create a configuration with default lifetimes and every
    /// verification switch enabled.
    ///
    /// Defaults: 15 minute access lifetime, 7 day refresh lifetime, zero
    /// clock skew.
    ///
    /// # Arguments
    /// * `access_secret` - HMAC key for access tokens (≥32 bytes)
    /// * `refresh_secret` - HMAC key for refresh tokens (≥32 bytes)
    /// * `issuer` - `iss` value stamped into and expected from tokens
    /// * `audience` - `aud` value stamped into and expected from tokens
    ///
    /// # Errors
    /// * `SecretTooShort` - Either secret is shorter than 32 bytes
    pub fn new(
        access_secret: Vec<u8>,
        refresh_secret: Vec<u8>,
        issuer: impl Into<String>,
        audience: impl Into<String>,
    ) -> Result<Self, SigningConfigError> {
        for secret in [&access_secret, &refresh_secret] {
            if secret.len() < Self::MIN_SECRET_BYTES {
                return Err(SigningConfigError::SecretTooShort {
                    min: Self::MIN_SECRET_BYTES,
                    actual: secret.len(),
                });
            }
        }

        Ok(Self {
            access_secret,
            refresh_secret,
            issuer: issuer.into(),
            audience: audience.into(),
            access_ttl: Duration::minutes(15),
            refresh_ttl: Duration::days(7),
            clock_skew: Duration::zero(),
            validate_issuer: true,
            validate_audience: true,
            validate_lifetime: true,
            validate_signing_key: true,
        })
    }

    /// Set the access-token lifetime.
    pub fn with_access_ttl(mut self, ttl: Duration) -> Self {
        self.access_ttl = ttl;
        self
    }

    /// Set the refresh-token lifetime.
    pub fn with_refresh_ttl(mut self, ttl: Duration) -> Self {
        self.refresh_ttl = ttl;
        self
    }

    /// Set the clock-skew tolerance applied when checking expiry.
    pub fn with_clock_skew(mut self, skew: Duration) -> Self {
        self.clock_skew = skew;
        self
    }

    /// Toggle issuer validation.
    pub fn with_validate_issuer(mut self, on: bool) -> Self {
        self.validate_issuer = on;
        self
    }

    /// Toggle audience validation.
    pub fn with_validate_audience(mut self, on: bool) -> Self {
        self.validate_audience = on;
        self
    }

    /// Toggle lifetime validation.
    pub fn with_validate_lifetime(mut self, on: bool) -> Self {
        self.validate_lifetime = on;
        self
    }

    /// Toggle signature validation.
    pub fn with_validate_signing_key(mut self, on: bool) -> Self {
        self.validate_signing_key = on;
        self
    }
}

/// Minimal identity projected into token claims.
///
/// The account itself lives behind the store boundary; the issuer only
/// reads the email.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    email: String,
}

impl Identity {
    /// Create an identity from an account email.
    ///
    /// # Errors
    /// * `EmptyIdentity` - Email is empty or whitespace-only
    pub fn new(email: impl Into<String>) -> Result<Self, TokenError> {
        let email = email.into();
        if email.trim().is_empty() {
            return Err(TokenError::EmptyIdentity);
        }
        Ok(Self { email })
    }

    /// Get the email as a string slice.
    pub fn email(&self) -> &str {
        &self.email
    }
}

/// Access and refresh credentials returned on successful authentication.
///
/// Not persisted anywhere: both tokens are self-verifying, validity is
/// proven by signature and embedded claims alone.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
}

/// Issues and verifies the access/refresh credential pair.
///
/// Stateless: credential state (valid, expired, freshenable) is implicit in
/// token validity, never held in memory. Safe to share across unlimited
/// concurrent callers.
pub struct TokenIssuer {
    config: SigningConfig,
    access_codec: JwtCodec,
    refresh_codec: JwtCodec,
}

impl TokenIssuer {
    /// Create an issuer from a signing configuration.
    pub fn new(config: SigningConfig) -> Self {
        let access_codec = JwtCodec::new(&config.access_secret, &config.issuer, &config.audience);
        let refresh_codec = JwtCodec::new(&config.refresh_secret, &config.issuer, &config.audience);

        Self {
            config,
            access_codec,
            refresh_codec,
        }
    }

    /// Issue an (access, refresh) token pair for an identity.
    ///
    /// The access token carries `name`/`sub`/`email` claims and is signed
    /// with the access secret; the refresh token carries `email` plus a
    /// fresh `jti` and is signed with the refresh secret. Nothing is
    /// persisted; revocation is out of scope.
    ///
    /// # Errors
    /// * `Jwt` - Signing failed
    pub fn generate_tokens(&self, identity: &Identity) -> Result<TokenPair, TokenError> {
        let access_token = self
            .access_codec
            .issue(&Claims::for_access(identity.email()), self.config.access_ttl)?;

        let refresh_token = self
            .refresh_codec
            .issue(&Claims::for_refresh(identity.email()), self.config.refresh_ttl)?;

        Ok(TokenPair {
            access_token,
            refresh_token,
        })
    }

    /// Exchange a valid refresh token for a new access token.
    ///
    /// Two verification passes over the same token. The first skips the
    /// lifetime check so the email claim can be extracted even from a
    /// borderline-expired token; the second applies the full rules
    /// (lifetime, pinned algorithm, zero skew) and cross-checks the email
    /// claim before any trust is granted.
    ///
    /// # Errors
    /// * `EmptyToken` - Refresh token is empty or whitespace-only
    /// * `MissingEmailClaim` - Token decoded but carries no email
    /// * `RefreshRejected` - Full verification or the email cross-check failed
    /// * `Jwt` - The lenient pass rejected the token outright
    pub fn freshen(&self, refresh_token: &str) -> Result<String, TokenError> {
        if refresh_token.trim().is_empty() {
            return Err(TokenError::EmptyToken);
        }

        let lenient = VerifyOptions {
            validate_lifetime: false,
            ..self.configured_options()
        };
        let claims = self.refresh_codec.verify(refresh_token, lenient)?;

        let email = claims
            .email
            .filter(|email| !email.is_empty())
            .ok_or(TokenError::MissingEmailClaim)?;

        if !self.revalidate_refresh(refresh_token, &email) {
            return Err(TokenError::RefreshRejected);
        }

        let access_token = self
            .access_codec
            .issue(&Claims::for_access(&email), self.config.access_ttl)?;

        Ok(access_token)
    }

    /// Boolean probe over access-token validity.
    ///
    /// The only operation that swallows failure detail: false for empty,
    /// malformed, expired, or mis-signed tokens. Never panics.
    pub fn validate_token(&self, token: &str) -> bool {
        if token.trim().is_empty() {
            return false;
        }

        self.access_codec
            .verify(token, self.configured_options())
            .is_ok()
    }

    /// Extract the validated claim set from an access token.
    ///
    /// # Errors
    /// * `EmptyToken` - Token is empty or whitespace-only
    /// * `Jwt` - Verification failed
    pub fn principal(&self, token: &str) -> Result<Claims, TokenError> {
        if token.trim().is_empty() {
            return Err(TokenError::EmptyToken);
        }

        let claims = self
            .access_codec
            .verify(token, self.configured_options())?;

        Ok(claims)
    }

    fn configured_options(&self) -> VerifyOptions {
        VerifyOptions {
            validate_issuer: self.config.validate_issuer,
            validate_audience: self.config.validate_audience,
            validate_lifetime: self.config.validate_lifetime,
            validate_signing_key: self.config.validate_signing_key,
            clock_skew: self.config.clock_skew,
        }
    }

    /// Second verification pass over a refresh token: full rules, zero
    /// skew, email claim must match the one extracted earlier.
    fn revalidate_refresh(&self, token: &str, email: &str) -> bool {
        if token.is_empty() || email.is_empty() {
            return false;
        }

        match self.refresh_codec.verify(token, VerifyOptions::strict()) {
            Ok(claims) => claims.email.as_deref() == Some(email),
            Err(_) => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ACCESS_SECRET: &[u8] = b"issuer_access_secret_32_plus_bytes!";
    const REFRESH_SECRET: &[u8] = b"issuer_refresh_secret_32_plus_byte!";

    fn config() -> SigningConfig {
        SigningConfig::new(
            ACCESS_SECRET.to_vec(),
            REFRESH_SECRET.to_vec(),
            "test-issuer",
            "test-audience",
        )
        .unwrap()
    }

    fn issuer() -> TokenIssuer {
        TokenIssuer::new(config())
    }

    #[test]
    fn test_config_rejects_short_secret() {
        let result = SigningConfig::new(
            b"too short".to_vec(),
            REFRESH_SECRET.to_vec(),
            "test-issuer",
            "test-audience",
        );

        assert_eq!(
            result.unwrap_err(),
            SigningConfigError::SecretTooShort {
                min: SigningConfig::MIN_SECRET_BYTES,
                actual: 9
            }
        );
    }

    #[test]
    fn test_identity_rejects_blank_email() {
        assert_eq!(Identity::new("  "), Err(TokenError::EmptyIdentity));
        assert!(Identity::new("alice@example.com").is_ok());
    }

    #[test]
    fn test_generate_tokens_and_validate() {
        let issuer = issuer();
        let identity = Identity::new("alice@example.com").unwrap();

        let pair = issuer.generate_tokens(&identity).unwrap();

        assert!(issuer.validate_token(&pair.access_token));

        let claims = issuer.principal(&pair.access_token).unwrap();
        assert_eq!(claims.email.as_deref(), Some("alice@example.com"));
        assert_eq!(claims.sub.as_deref(), Some("alice@example.com"));
        assert_eq!(claims.name.as_deref(), Some("alice@example.com"));
    }

    #[test]
    fn test_pair_uses_distinct_secrets() {
        let issuer = issuer();
        let identity = Identity::new("alice@example.com").unwrap();
        let pair = issuer.generate_tokens(&identity).unwrap();

        // An access token must not be accepted on the refresh path
        assert!(matches!(
            issuer.freshen(&pair.access_token),
            Err(TokenError::Jwt(_))
        ));

        // Nor a refresh token on the access path
        assert!(!issuer.validate_token(&pair.refresh_token));
    }

    #[test]
    fn test_freshen_issues_new_access_token() {
        let issuer = issuer();
        let identity = Identity::new("alice@example.com").unwrap();
        let pair = issuer.generate_tokens(&identity).unwrap();

        let fresh = issuer.freshen(&pair.refresh_token).unwrap();

        assert!(issuer.validate_token(&fresh));
        let claims = issuer.principal(&fresh).unwrap();
        assert_eq!(claims.email.as_deref(), Some("alice@example.com"));
    }

    #[test]
    fn test_freshen_rejects_empty_token() {
        assert_eq!(issuer().freshen("  "), Err(TokenError::EmptyToken));
    }

    #[test]
    fn test_freshen_rejects_expired_refresh_token() {
        let config = config().with_refresh_ttl(Duration::days(-1));
        let issuer = TokenIssuer::new(config);

        let identity = Identity::new("alice@example.com").unwrap();
        let pair = issuer.generate_tokens(&identity).unwrap();

        // Lenient pass extracts the email, strict pass enforces the expiry
        assert_eq!(
            issuer.freshen(&pair.refresh_token),
            Err(TokenError::RefreshRejected)
        );
    }

    #[test]
    fn test_freshen_rejects_token_without_email_claim() {
        let issuer = issuer();

        let refresh_codec = JwtCodec::new(REFRESH_SECRET, "test-issuer", "test-audience");
        let anonymous = refresh_codec
            .issue(&Claims::new().with_subject("alice"), Duration::days(1))
            .unwrap();

        assert_eq!(
            issuer.freshen(&anonymous),
            Err(TokenError::MissingEmailClaim)
        );
    }

    #[test]
    fn test_freshen_while_access_expired() {
        let config = config().with_access_ttl(Duration::seconds(-60));
        let issuer = TokenIssuer::new(config);

        let identity = Identity::new("alice@example.com").unwrap();
        let pair = issuer.generate_tokens(&identity).unwrap();

        assert!(!issuer.validate_token(&pair.access_token));
        assert!(issuer.freshen(&pair.refresh_token).is_ok());
    }

    #[test]
    fn test_validate_token_is_total() {
        let issuer = issuer();

        assert!(!issuer.validate_token(""));
        assert!(!issuer.validate_token("   "));
        assert!(!issuer.validate_token("garbage"));
        assert!(!issuer.validate_token("a.b.c"));
    }

    #[test]
    fn test_principal_rejects_empty_and_invalid() {
        let issuer = issuer();

        assert_eq!(issuer.principal(""), Err(TokenError::EmptyToken));
        assert!(matches!(
            issuer.principal("a.b.c"),
            Err(TokenError::Jwt(_))
        ));
    }
}
