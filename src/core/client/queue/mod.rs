pub mod error;
pub mod sqs;

use crate::types::queue::QueueType;
use async_trait::async_trait;
pub use error::QueueError;
use omniqueue::Delivery;
use std::time::Duration;

/// Trait defining queue operations
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait QueueClient: Send + Sync {
    /// Send a message to the queue, optionally after a delay. The delayed
    /// send is how the archive scheduler defers a migration without blocking
    /// its consumer thread.
    async fn send_message(&self, queue: QueueType, payload: String, delay: Option<Duration>) -> Result<(), QueueError>;

    /// Long-poll a bounded batch of messages from the queue. Returned
    /// deliveries stay invisible to other consumers until acknowledged or
    /// until the queue's visibility timeout lapses.
    async fn consume_messages(
        &self,
        queue: QueueType,
        max_messages: usize,
        wait: Duration,
    ) -> Result<Vec<Delivery>, QueueError>;
}
