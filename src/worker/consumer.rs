use crate::core::config::Config;
use crate::error::ConsumptionError;
use crate::types::queue::QueueType;
use async_trait::async_trait;
use omniqueue::Delivery;
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info};

const QUEUE_ERROR_BACKOFF: Duration = Duration::from_secs(1);

/// A typed handler for one queue.
///
/// Delivery is at-least-once: any message may be seen again after a crash or
/// a missed acknowledgement, so every side effect a handler performs must be
/// safe to repeat. Returning `Ok` acknowledges the message; returning an
/// error leaves it for redelivery.
#[async_trait]
pub trait MessageHandler: Send + Sync {
    fn queue_type(&self) -> QueueType;

    async fn handle(&self, payload: &[u8]) -> Result<(), ConsumptionError>;
}

/// Drives one handler from its queue: a single logical thread that
/// long-polls a bounded batch and processes it sequentially.
pub struct ConsumerLoop {
    config: Arc<Config>,
    handler: Arc<dyn MessageHandler>,
    cancellation_token: CancellationToken,
}

impl ConsumerLoop {
    pub fn new(config: Arc<Config>, handler: Arc<dyn MessageHandler>, cancellation_token: CancellationToken) -> Self {
        Self { config, handler, cancellation_token }
    }

    /// Poll the queue until shutdown. Processing never retries in-process:
    /// a failed message is logged and left unacknowledged, and the queue's
    /// visibility timeout redelivers it later.
    pub async fn run(&self) -> Result<(), ConsumptionError> {
        let queue_type = self.handler.queue_type();
        let max_messages = self.config.params().max_messages;
        let wait = Duration::from_secs(self.config.params().wait_time_secs);
        info!(queue = %queue_type, "Starting consumer");

        loop {
            let deliveries = tokio::select! {
                _ = self.cancellation_token.cancelled() => break,
                result = self.config.queue().consume_messages(queue_type.clone(), max_messages, wait) => {
                    match result {
                        Ok(deliveries) => deliveries,
                        Err(e) => {
                            error!(queue = %queue_type, error = %e, "Failed to consume from queue");
                            tokio::time::sleep(QUEUE_ERROR_BACKOFF).await;
                            continue;
                        }
                    }
                }
            };

            if deliveries.is_empty() {
                continue;
            }
            debug!(queue = %queue_type, count = deliveries.len(), "Received messages");

            // Once a message's effects begin they run to completion; only
            // the gaps between messages observe cancellation.
            for delivery in deliveries {
                self.process(&queue_type, delivery).await;
            }
        }

        info!(queue = %queue_type, "Consumer stopped");
        Ok(())
    }

    async fn process(&self, queue_type: &QueueType, delivery: Delivery) {
        let payload = delivery.borrow_payload().map(<[u8]>::to_vec).unwrap_or_default();

        match self.handler.handle(&payload).await {
            Ok(()) => {
                if let Err(e) = delivery.ack().await {
                    error!(queue = %queue_type, error = %e.0, "Failed to acknowledge message");
                }
            }
            Err(e) => {
                error!(queue = %queue_type, error = %e, "Message handling failed, leaving for redelivery");
                if let Err(e) = delivery.nack().await {
                    error!(queue = %queue_type, error = %e.0, "Failed to release message");
                }
            }
        }
    }
}
