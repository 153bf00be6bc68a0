use async_trait::async_trait;

use crate::account::errors::NotifyError;
use crate::account::ports::ResetNotifier;
use crate::domain::account::models::Account;

/// Reset notifier that records the dispatch in the log stream.
///
/// Actual email delivery belongs to an external system; this adapter keeps
/// local runs observable without one. The token itself is never logged.
pub struct LoggingResetNotifier;

#[async_trait]
impl ResetNotifier for LoggingResetNotifier {
    async fn notify_reset(&self, account: &Account, token: &str) -> Result<(), NotifyError> {
        tracing::info!(
            account_id = %account.id,
            email = %account.email,
            token_length = token.len(),
            "Password reset notification dispatched"
        );
        Ok(())
    }
}
