use async_trait::async_trait;
use auth_core::TokenPair;

use crate::account::errors::AccountError;
use crate::account::errors::NotifyError;
use crate::account::errors::StoreError;
use crate::domain::account::models::Account;
use crate::domain::account::models::EmailAddress;
use crate::domain::account::models::RegisterCommand;

/// Port for the external account store.
///
/// The persistence engine is outside this service; transaction discipline
/// (at most one in-flight mutation per account) is the store's business,
/// not ours.
#[async_trait]
pub trait UserStore: Send + Sync + 'static {
    /// Retrieve account by normalized email address.
    ///
    /// # Returns
    /// Optional account entity (None if not found)
    ///
    /// # Errors
    /// * `StoreError` - Store operation failed
    async fn find_by_email(&self, email: &EmailAddress) -> Result<Option<Account>, StoreError>;

    /// Retrieve account by username.
    ///
    /// # Returns
    /// Optional account entity (None if not found)
    ///
    /// # Errors
    /// * `StoreError` - Store operation failed
    async fn find_by_username(&self, username: &str) -> Result<Option<Account>, StoreError>;

    /// Persist a new account.
    ///
    /// # Returns
    /// Created account entity
    ///
    /// # Errors
    /// * `Duplicate` - Username or email already stored
    /// * `StoreError` - Store operation failed
    async fn create(&self, account: Account) -> Result<Account, StoreError>;

    /// Persist changes to an existing account.
    ///
    /// # Returns
    /// Updated account entity
    ///
    /// # Errors
    /// * `Missing` - Account does not exist
    /// * `StoreError` - Store operation failed
    async fn update(&self, account: Account) -> Result<Account, StoreError>;
}

/// Port for password-reset notification delivery.
///
/// Email (or any other channel) is an external concern; the flow only
/// hands over the account and the freshly minted token.
#[async_trait]
pub trait ResetNotifier: Send + Sync + 'static {
    /// Dispatch a reset notification carrying the token.
    ///
    /// # Errors
    /// * `DeliveryFailed` - Notification could not be handed off
    async fn notify_reset(&self, account: &Account, token: &str) -> Result<(), NotifyError>;
}

/// Login capability: credential verification and token lifecycle.
#[async_trait]
pub trait LoginService: Send + Sync + 'static {
    /// Verify credentials and issue an access/refresh token pair.
    ///
    /// All authentication failures collapse into `InvalidCredentials`;
    /// callers cannot distinguish an unknown account from a wrong password
    /// or a reset-pending account.
    ///
    /// # Errors
    /// * `InvalidCredentials` - Any authentication check failed
    /// * `Store` - Store operation failed
    async fn login(&self, email: &str, password: &str) -> Result<TokenPair, AccountError>;

    /// Exchange a valid refresh token for a new access token.
    ///
    /// # Errors
    /// * `Token` - Refresh token is empty, invalid, or expired
    async fn refresh(&self, refresh_token: &str) -> Result<String, AccountError>;

    /// Boolean probe over access-token validity. Never fails.
    async fn validate(&self, token: &str) -> bool;
}

/// Registration capability.
#[async_trait]
pub trait RegistrationService: Send + Sync + 'static {
    /// Register a new account.
    ///
    /// # Errors
    /// * `MissingField` - Username or password is blank
    /// * `WeakPassword` - Password fails the strength policy
    /// * `UsernameAlreadyExists` / `EmailAlreadyExists` - Identifier taken
    /// * `Store` - Store operation failed
    async fn register(&self, command: RegisterCommand) -> Result<Account, AccountError>;

    /// Whether a username can still be claimed. Blank input is "taken".
    ///
    /// # Errors
    /// * `Store` - Store operation failed
    async fn is_username_available(&self, username: &str) -> Result<bool, AccountError>;

    /// Whether an email can still be claimed. Invalid or blank input is
    /// "taken".
    ///
    /// # Errors
    /// * `Store` - Store operation failed
    async fn is_email_available(&self, email: &str) -> Result<bool, AccountError>;
}

/// Password-reset capability.
///
/// Every operation is a boolean probe by design: input errors, unknown
/// accounts, and store failures are logged and folded into `false`, never
/// surfaced to the caller.
#[async_trait]
pub trait PasswordResetService: Send + Sync + 'static {
    /// Start a reset: mint a token, park it with a fixed expiry window,
    /// drop the stored password hash, and dispatch a notification.
    async fn initiate_password_reset(&self, email: &str) -> bool;

    /// Whether the given token exactly matches the stored one within its
    /// window.
    async fn validate_reset_token(&self, email: &str, token: &str) -> bool;

    /// Complete a reset: token must validate and the new password must
    /// meet the strength policy.
    async fn reset_password(&self, email: &str, token: &str, new_password: &str) -> bool;
}

/// Union of the three authentication capabilities.
///
/// An aggregate, not a hierarchy: anything implementing the three
/// capability traits is an `AuthService`.
pub trait AuthService: LoginService + RegistrationService + PasswordResetService {}

impl<T: LoginService + RegistrationService + PasswordResetService> AuthService for T {}
