use std::fmt;
use std::str::FromStr;

use chrono::DateTime;
use chrono::Utc;
use uuid::Uuid;

use crate::account::errors::EmailError;

/// Minimum accepted password length.
pub const MIN_PASSWORD_LENGTH: usize = 8;

/// Account aggregate entity.
///
/// Carries the credential state for one user, including the password-reset
/// window. While a reset is pending `password_hash` is `None` and the
/// account cannot authenticate with a password.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Account {
    pub id: Uuid,
    pub username: String,
    pub email: EmailAddress,
    pub password_hash: Option<String>,
    pub reset_token: Option<String>,
    pub reset_token_expires: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl Account {
    /// Create a new active account.
    ///
    /// # Arguments
    /// * `username` - Unique username
    /// * `email` - Validated email address
    /// * `password_hash` - Stored hash of the initial password
    pub fn new(username: String, email: EmailAddress, password_hash: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            username,
            email,
            password_hash: Some(password_hash),
            reset_token: None,
            reset_token_expires: None,
            created_at: Utc::now(),
        }
    }

    /// Enter the reset-pending state.
    ///
    /// Parks the reset secret and its window and drops the stored password
    /// hash, so neither the old nor any other password authenticates until
    /// the reset completes.
    pub fn begin_reset(&mut self, token: String, expires: DateTime<Utc>) {
        self.reset_token = Some(token);
        self.reset_token_expires = Some(expires);
        self.password_hash = None;
    }

    /// Leave the reset-pending state with a new password hash installed.
    pub fn complete_reset(&mut self, password_hash: String) {
        self.password_hash = Some(password_hash);
        self.reset_token = None;
        self.reset_token_expires = None;
    }

    /// Whether a reset window is currently parked on the account.
    pub fn reset_pending(&self) -> bool {
        self.reset_token.is_some()
    }
}

/// Email address type
///
/// Validates format using an RFC 5322 compliant parser and normalizes to
/// trimmed lowercase, the form the store is keyed by.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailAddress(String);

impl EmailAddress {
    /// Create a new validated email address.
    ///
    /// # Arguments
    /// * `email` - Raw email string
    ///
    /// # Errors
    /// * `InvalidFormat` - Email does not conform to RFC 5322
    pub fn new(email: &str) -> Result<Self, EmailError> {
        let normalized = email.trim().to_lowercase();
        email_address::EmailAddress::from_str(&normalized)
            .map(|_| EmailAddress(normalized))
            .map_err(|e| EmailError::InvalidFormat(e.to_string()))
    }

    /// Get email as string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Command to register a new account with domain types
#[derive(Debug)]
pub struct RegisterCommand {
    pub username: String,
    pub email: EmailAddress,
    pub password: String,
}

impl RegisterCommand {
    /// Construct a new registration command.
    ///
    /// # Arguments
    /// * `username` - Requested username
    /// * `email` - Validated email address
    /// * `password` - Plain text password (hashed by the service)
    pub fn new(username: String, email: EmailAddress, password: String) -> Self {
        Self {
            username,
            email,
            password,
        }
    }
}

/// Password strength policy applied on registration and reset.
///
/// A password passes iff it is at least eight characters long and contains
/// an uppercase letter, a lowercase letter, a digit, and a character
/// outside the alphanumeric set. Violating any clause rejects it.
pub fn meets_password_policy(password: &str) -> bool {
    if password.chars().count() < MIN_PASSWORD_LENGTH {
        return false;
    }

    let has_digit = password.chars().any(|c| c.is_ascii_digit());
    let has_upper = password.chars().any(|c| c.is_uppercase());
    let has_lower = password.chars().any(|c| c.is_lowercase());
    let has_special = password.chars().any(|c| !c.is_alphanumeric());

    has_digit && has_upper && has_lower && has_special
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_email_normalization() {
        let email = EmailAddress::new("  Alice@Example.COM ").unwrap();
        assert_eq!(email.as_str(), "alice@example.com");
    }

    #[test]
    fn test_email_rejects_invalid_format() {
        assert!(matches!(
            EmailAddress::new("not-an-email"),
            Err(EmailError::InvalidFormat(_))
        ));
        assert!(EmailAddress::new("").is_err());
    }

    #[test]
    fn test_password_policy_accepts_compliant_password() {
        assert!(meets_password_policy("Str0ng!pass"));
    }

    #[test]
    fn test_password_policy_rejects_each_missing_clause() {
        assert!(!meets_password_policy("Sh0rt!a")); // 7 chars
        assert!(!meets_password_policy("str0ng!pass")); // no uppercase
        assert!(!meets_password_policy("STR0NG!PASS")); // no lowercase
        assert!(!meets_password_policy("Strong!pass")); // no digit
        assert!(!meets_password_policy("Str0ngpass")); // no special
    }

    #[test]
    fn test_reset_transitions() {
        let email = EmailAddress::new("alice@example.com").unwrap();
        let mut account = Account::new("alice".to_string(), email, "$argon2id$hash".to_string());
        assert!(!account.reset_pending());

        let expires = Utc::now() + chrono::Duration::minutes(3);
        account.begin_reset("reset-token".to_string(), expires);

        assert!(account.reset_pending());
        assert!(account.password_hash.is_none());
        assert_eq!(account.reset_token.as_deref(), Some("reset-token"));
        assert_eq!(account.reset_token_expires, Some(expires));

        account.complete_reset("$argon2id$new-hash".to_string());

        assert!(!account.reset_pending());
        assert_eq!(account.password_hash.as_deref(), Some("$argon2id$new-hash"));
        assert!(account.reset_token.is_none());
        assert!(account.reset_token_expires.is_none());
    }
}
