use crate::core::client::archive::ArchiveError;
use crate::core::config::Config;
use crate::error::ConsumptionError;
use crate::types::job_updates::JobRecordUpdates;
use crate::types::message::{MessageParser, RetrievalCompleteMessage};
use crate::types::queue::QueueType;
use crate::worker::consumer::MessageHandler;
use async_trait::async_trait;
use std::sync::Arc;
use tracing::{debug, info};

/// Thaw handler, phase two of the restore/thaw protocol: copies a finished
/// cold-storage retrieval back into live storage, frees the archive and
/// clears the record's archive flags.
///
/// Acknowledged only once every effect has succeeded; redelivery re-attempts
/// all of them, and each is safe to repeat (rewriting the same bytes and
/// re-deleting a gone archive are no-ops).
pub struct ThawWorker {
    config: Arc<Config>,
}

impl ThawWorker {
    pub fn new(config: Arc<Config>) -> Self {
        Self { config }
    }

    async fn thaw(&self, message: &RetrievalCompleteMessage) -> Result<(), ConsumptionError> {
        let job_id = message.job_id;

        let data = self.config.archive().get_retrieval_output(&message.retrieval_id).await?;

        let record = self
            .config
            .database()
            .get_job_by_id(job_id)
            .await?
            .ok_or(ConsumptionError::MissingRecord(job_id))?;
        let bucket = record
            .s3_results_bucket
            .as_deref()
            .ok_or(ConsumptionError::MissingField { job_id, field: "s3_results_bucket" })?;
        let key = record
            .s3_key_result_file
            .as_deref()
            .ok_or(ConsumptionError::MissingField { job_id, field: "s3_key_result_file" })?;

        self.config.storage().put_object(bucket, key, data).await?;

        match self.config.archive().delete_archive(&message.archive_id).await {
            Ok(()) => {}
            Err(ArchiveError::ArchiveNotFound(_)) => {
                debug!(job_id = %job_id, archive_id = %message.archive_id, "Archive already deleted");
            }
            Err(err) => return Err(err.into()),
        }

        self.config
            .database()
            .update_job(
                job_id,
                JobRecordUpdates::new().update_archive_status(false).clear_results_file_archive_id(),
                None,
            )
            .await?;

        info!(job_id = %job_id, key = %key, "Result restored to live storage");
        Ok(())
    }
}

#[async_trait]
impl MessageHandler for ThawWorker {
    fn queue_type(&self) -> QueueType {
        QueueType::ThawRequests
    }

    async fn handle(&self, payload: &[u8]) -> Result<(), ConsumptionError> {
        let message = RetrievalCompleteMessage::parse_message(payload)?;
        self.thaw(&message).await
    }
}
