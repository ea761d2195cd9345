pub mod error;
pub mod ses;

use async_trait::async_trait;
pub use error::MailError;

/// Trait defining the outbound email boundary. Delivery, templating and
/// bounce handling belong to the mail service, not to this crate.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MailClient: Send + Sync {
    async fn send_email(&self, recipient: &str, subject: &str, body: &str) -> Result<(), MailError>;
}
