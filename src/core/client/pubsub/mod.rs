pub mod error;
pub mod sns;

use crate::types::queue::TopicType;
use async_trait::async_trait;
pub use error::PubSubError;

/// Trait defining notification-relay operations. Publishing to a topic fans
/// the message out to every queue subscribed to it.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PubSubClient: Send + Sync {
    async fn publish(&self, topic: TopicType, message: &str) -> Result<(), PubSubError>;

    /// Resolve the topic ARN. The thaw topic's ARN is handed to cold storage
    /// as the retrieval completion callback.
    async fn get_topic_arn(&self, topic: TopicType) -> Result<String, PubSubError>;
}
