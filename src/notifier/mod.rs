pub mod telegram;

pub use telegram::TelegramNotifier;

use crate::model::NotifyError;

/// Seam for outbound messages so the feed logic does not depend on the
/// concrete transport.
#[async_trait::async_trait]
pub trait Notifier: Send + Sync {
    async fn send_text(&self, text: &str) -> Result<(), NotifyError>;
}
