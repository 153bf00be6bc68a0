use chrono::Duration;
use chrono::Utc;
use jsonwebtoken::decode;
use jsonwebtoken::encode;
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::Algorithm;
use jsonwebtoken::DecodingKey;
use jsonwebtoken::EncodingKey;
use jsonwebtoken::Header;
use jsonwebtoken::Validation;

use super::claims::Claims;
use super::errors::JwtError;

/// Verification switches applied when decoding a token.
///
/// The default is the strict profile: issuer, audience, lifetime, and
/// signing key all checked, with zero clock skew (exact expiry
/// enforcement).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VerifyOptions {
    pub validate_issuer: bool,
    pub validate_audience: bool,
    pub validate_lifetime: bool,
    pub validate_signing_key: bool,
    /// Tolerance applied to the expiry comparison, absorbing clock drift
    /// between issuer and verifier.
    pub clock_skew: Duration,
}

impl Default for VerifyOptions {
    fn default() -> Self {
        Self {
            validate_issuer: true,
            validate_audience: true,
            validate_lifetime: true,
            validate_signing_key: true,
            clock_skew: Duration::zero(),
        }
    }
}

impl VerifyOptions {
    /// The strict profile: every check enabled, zero clock skew.
    pub fn strict() -> Self {
        Self::default()
    }
}

/// Codec for compact signed claim-set strings.
///
/// Encodes and verifies three-segment HMAC-SHA256 tokens
/// (header.payload.signature, base64url). The algorithm is pinned: tokens
/// signed with anything else, including `none`, are rejected on decode.
pub struct JwtCodec {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    algorithm: Algorithm,
    issuer: String,
    audience: String,
}

impl JwtCodec {
    /// Create a codec bound to one symmetric secret.
    ///
    /// # Arguments
    /// * `secret` - HMAC key (at least 32 bytes for HS256)
    /// * `issuer` - Value stamped into `iss` and checked on verify
    /// * `audience` - Value stamped into `aud` and checked on verify
    pub fn new(secret: &[u8], issuer: impl Into<String>, audience: impl Into<String>) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            algorithm: Algorithm::HS256,
            issuer: issuer.into(),
            audience: audience.into(),
        }
    }

    /// Serialize and sign a claim set.
    ///
    /// Stamps `iss`, `aud`, `iat = now`, and `exp = now + ttl` onto a copy
    /// of the claims before signing. Purely mechanical; claim semantics are
    /// the caller's business.
    ///
    /// # Arguments
    /// * `claims` - Identity claims to embed
    /// * `ttl` - Token lifetime; may be negative in tests to mint
    ///   already-expired tokens
    ///
    /// # Errors
    /// * `SigningFailed` - Serialization or signing failed
    pub fn issue(&self, claims: &Claims, ttl: Duration) -> Result<String, JwtError> {
        let now = Utc::now();

        let mut stamped = claims.clone();
        stamped.iss = Some(self.issuer.clone());
        stamped.aud = Some(self.audience.clone());
        stamped.iat = Some(now.timestamp());
        stamped.exp = Some((now + ttl).timestamp());

        let header = Header::new(self.algorithm);

        encode(&header, &stamped, &self.encoding_key)
            .map_err(|e| JwtError::SigningFailed(e.to_string()))
    }

    /// Decode a token and verify it under the given switches.
    ///
    /// # Arguments
    /// * `token` - Compact token string
    /// * `options` - Which checks to apply and the clock-skew tolerance
    ///
    /// # Returns
    /// The embedded claim set, unchanged
    ///
    /// # Errors
    /// * `Expired` - `exp` lies in the past beyond `clock_skew`
    /// * `IssuerMismatch` / `AudienceMismatch` - Claim does not match this codec
    /// * `MissingClaim` - A required standard claim is absent
    /// * `Invalid` - Bad signature, wrong algorithm, or malformed segments
    pub fn verify(&self, token: &str, options: VerifyOptions) -> Result<Claims, JwtError> {
        let mut validation = Validation::new(self.algorithm);
        validation.leeway = options.clock_skew.num_seconds().max(0) as u64;

        validation.validate_exp = options.validate_lifetime;
        if !options.validate_lifetime {
            validation.required_spec_claims.clear();
        }

        if options.validate_issuer {
            validation.set_issuer(&[self.issuer.as_str()]);
        }

        validation.validate_aud = options.validate_audience;
        if options.validate_audience {
            validation.set_audience(&[self.audience.as_str()]);
        }

        if !options.validate_signing_key {
            validation.insecure_disable_signature_validation();
        }

        let token_data =
            decode::<Claims>(token, &self.decoding_key, &validation).map_err(|e| match e.kind() {
                ErrorKind::ExpiredSignature => JwtError::Expired,
                ErrorKind::InvalidIssuer => JwtError::IssuerMismatch,
                ErrorKind::InvalidAudience => JwtError::AudienceMismatch,
                ErrorKind::MissingRequiredClaim(claim) => JwtError::MissingClaim(claim.clone()),
                _ => JwtError::Invalid(e.to_string()),
            })?;

        Ok(token_data.claims)
    }
}
