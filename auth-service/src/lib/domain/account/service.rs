use std::sync::Arc;

use async_trait::async_trait;
use auth_core::Identity;
use auth_core::PasswordHasher;
use auth_core::SecretGenerator;
use auth_core::TokenIssuer;
use auth_core::TokenPair;
use chrono::Duration;
use chrono::Utc;

use crate::account::errors::AccountError;
use crate::account::ports::LoginService;
use crate::account::ports::PasswordResetService;
use crate::account::ports::RegistrationService;
use crate::account::ports::ResetNotifier;
use crate::account::ports::UserStore;
use crate::domain::account::models::meets_password_policy;
use crate::domain::account::models::Account;
use crate::domain::account::models::EmailAddress;
use crate::domain::account::models::RegisterCommand;

const RESET_TOKEN_LENGTH: usize = 32;
const RESET_WINDOW_MINUTES: i64 = 3;

/// Domain service implementing the three authentication capabilities.
///
/// Orchestrates the credential primitives against the external store. Holds
/// no mutable state of its own; expiry of tokens and reset windows is
/// checked lazily at validation time.
pub struct AccountService<S, N>
where
    S: UserStore,
    N: ResetNotifier,
{
    store: Arc<S>,
    notifier: Arc<N>,
    issuer: Arc<TokenIssuer>,
    password_hasher: PasswordHasher,
    secret_generator: SecretGenerator,
    reset_token_length: usize,
    reset_window: Duration,
}

impl<S, N> AccountService<S, N>
where
    S: UserStore,
    N: ResetNotifier,
{
    /// Create a new account service with injected dependencies.
    ///
    /// Reset defaults: 32-character tokens, 3 minute window.
    ///
    /// # Arguments
    /// * `store` - Account persistence port
    /// * `notifier` - Reset notification port
    /// * `issuer` - Token issuer built from the process signing config
    pub fn new(store: Arc<S>, notifier: Arc<N>, issuer: Arc<TokenIssuer>) -> Self {
        Self {
            store,
            notifier,
            issuer,
            password_hasher: PasswordHasher::new(),
            secret_generator: SecretGenerator::new(),
            reset_token_length: RESET_TOKEN_LENGTH,
            reset_window: Duration::minutes(RESET_WINDOW_MINUTES),
        }
    }

    /// Override the reset-token length.
    pub fn with_reset_token_length(mut self, length: usize) -> Self {
        self.reset_token_length = length;
        self
    }

    /// Override the reset window.
    pub fn with_reset_window(mut self, window: Duration) -> Self {
        self.reset_window = window;
        self
    }

    async fn account_for_reset(&self, email: &str) -> Option<Account> {
        let email = EmailAddress::new(email).ok()?;
        match self.store.find_by_email(&email).await {
            Ok(found) => found,
            Err(e) => {
                tracing::error!(error = %e, "Store failure during password reset");
                None
            }
        }
    }
}

#[async_trait]
impl<S, N> LoginService for AccountService<S, N>
where
    S: UserStore,
    N: ResetNotifier,
{
    async fn login(&self, email: &str, password: &str) -> Result<TokenPair, AccountError> {
        if email.trim().is_empty() || password.is_empty() {
            return Err(AccountError::InvalidCredentials);
        }

        let email = EmailAddress::new(email).map_err(|_| AccountError::InvalidCredentials)?;

        let account = self
            .store
            .find_by_email(&email)
            .await?
            .ok_or(AccountError::InvalidCredentials)?;

        // A reset-pending account has no stored hash and cannot
        // authenticate with a password
        let Some(hash) = account.password_hash.as_deref() else {
            return Err(AccountError::InvalidCredentials);
        };

        if !self.password_hasher.verify(password, hash)? {
            return Err(AccountError::InvalidCredentials);
        }

        let identity = Identity::new(account.email.as_str())?;
        let pair = self.issuer.generate_tokens(&identity)?;

        tracing::debug!(account_id = %account.id, "Issued token pair");
        Ok(pair)
    }

    async fn refresh(&self, refresh_token: &str) -> Result<String, AccountError> {
        let access_token = self.issuer.freshen(refresh_token)?;
        Ok(access_token)
    }

    async fn validate(&self, token: &str) -> bool {
        self.issuer.validate_token(token)
    }
}

#[async_trait]
impl<S, N> RegistrationService for AccountService<S, N>
where
    S: UserStore,
    N: ResetNotifier,
{
    async fn register(&self, command: RegisterCommand) -> Result<Account, AccountError> {
        let username = command.username.trim().to_string();
        if username.is_empty() {
            return Err(AccountError::MissingField("username"));
        }
        if command.password.trim().is_empty() {
            return Err(AccountError::MissingField("password"));
        }
        if !meets_password_policy(&command.password) {
            return Err(AccountError::WeakPassword);
        }

        if self.store.find_by_username(&username).await?.is_some() {
            return Err(AccountError::UsernameAlreadyExists(username));
        }
        if self.store.find_by_email(&command.email).await?.is_some() {
            return Err(AccountError::EmailAlreadyExists(command.email.to_string()));
        }

        let password_hash = self.password_hasher.hash(&command.password)?;
        let account = Account::new(username, command.email, password_hash);
        let created = self.store.create(account).await?;

        tracing::info!(account_id = %created.id, "Account registered");
        Ok(created)
    }

    async fn is_username_available(&self, username: &str) -> Result<bool, AccountError> {
        let username = username.trim();
        if username.is_empty() {
            return Ok(false);
        }
        Ok(self.store.find_by_username(username).await?.is_none())
    }

    async fn is_email_available(&self, email: &str) -> Result<bool, AccountError> {
        let Ok(email) = EmailAddress::new(email) else {
            return Ok(false);
        };
        Ok(self.store.find_by_email(&email).await?.is_none())
    }
}

#[async_trait]
impl<S, N> PasswordResetService for AccountService<S, N>
where
    S: UserStore,
    N: ResetNotifier,
{
    async fn initiate_password_reset(&self, email: &str) -> bool {
        if email.trim().is_empty() {
            tracing::warn!("Password reset attempted with empty email");
            return false;
        }

        let Some(mut account) = self.account_for_reset(email).await else {
            tracing::info!("Password reset attempted for unknown email");
            return false;
        };

        let token = match self.secret_generator.generate(self.reset_token_length) {
            Ok(token) => token,
            Err(e) => {
                tracing::error!(error = %e, "Reset token generation failed");
                return false;
            }
        };

        account.begin_reset(token.clone(), Utc::now() + self.reset_window);

        let account = match self.store.update(account).await {
            Ok(account) => account,
            Err(e) => {
                tracing::error!(error = %e, "Failed to persist reset window");
                return false;
            }
        };

        if let Err(e) = self.notifier.notify_reset(&account, &token).await {
            tracing::error!(
                error = %e,
                account_id = %account.id,
                "Failed to deliver reset notification"
            );
        }

        true
    }

    async fn validate_reset_token(&self, email: &str, token: &str) -> bool {
        if token.is_empty() {
            return false;
        }

        let Some(account) = self.account_for_reset(email).await else {
            return false;
        };

        let (Some(stored), Some(expires)) =
            (account.reset_token.as_deref(), account.reset_token_expires)
        else {
            return false;
        };

        if Utc::now() >= expires {
            tracing::info!(account_id = %account.id, "Reset token expired");
            return false;
        }

        stored == token
    }

    async fn reset_password(&self, email: &str, token: &str, new_password: &str) -> bool {
        if !self.validate_reset_token(email, token).await {
            return false;
        }

        let Some(mut account) = self.account_for_reset(email).await else {
            return false;
        };

        if !meets_password_policy(new_password) {
            tracing::warn!(account_id = %account.id, "Rejected weak replacement password");
            return false;
        }

        let password_hash = match self.password_hasher.hash(new_password) {
            Ok(hash) => hash,
            Err(e) => {
                tracing::error!(error = %e, "Password hashing failed during reset");
                return false;
            }
        };

        account.complete_reset(password_hash);

        match self.store.update(account).await {
            Ok(account) => {
                tracing::info!(account_id = %account.id, "Password reset completed");
                true
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to persist password reset");
                false
            }
        }
    }
}
