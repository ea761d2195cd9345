use crate::core::client::archive::{ArchiveError, RetrievalTier};
use crate::core::config::Config;
use crate::error::ConsumptionError;
use crate::types::message::{MessageParser, UserIdMessage};
use crate::types::queue::{QueueType, TopicType};
use crate::worker::consumer::MessageHandler;
use async_trait::async_trait;
use std::sync::Arc;
use tracing::{debug, error, info, warn};
use uuid::Uuid;

/// Upgrade handler, phase one of the restore/thaw protocol: flags the
/// owner's jobs premium and starts a cold-storage retrieval for every
/// archived result.
pub struct RestoreWorker {
    config: Arc<Config>,
}

impl RestoreWorker {
    pub fn new(config: Arc<Config>) -> Self {
        Self { config }
    }

    async fn restore_user(&self, user_id: &str) -> Result<(), ConsumptionError> {
        // The flag is the cancel signal the archive scheduler reads at fire
        // time; write it before anything else so a racing migration aborts.
        let flagged = self.config.database().mark_user_upgraded(user_id).await?;
        debug!(user_id = %user_id, flagged, "Marked jobs premium");

        let archived = self.config.database().get_jobs_by_user(user_id, true).await?;
        if archived.is_empty() {
            info!(user_id = %user_id, "No archived results to restore");
            return Ok(());
        }

        let thaw_topic_arn = self.config.pubsub().get_topic_arn(TopicType::ThawRequests).await?;

        for record in &archived {
            let Some(archive_id) = record.results_file_archive_id.as_deref() else {
                error!(job_id = %record.job_id, "Archived job has no archive id, skipping");
                continue;
            };
            if let Err(err) = self.initiate(record.job_id, archive_id, &thaw_topic_arn).await {
                // There is no per-job redelivery in this phase; skipped jobs
                // are left for manual follow-up.
                error!(job_id = %record.job_id, error = %err, "Failed to initiate retrieval, skipping");
            }
        }

        info!(user_id = %user_id, count = archived.len(), "Restoration attempted for archived jobs");
        Ok(())
    }

    /// Expedited first; insufficient capacity downgrades to Standard exactly
    /// once, with identical parameters.
    async fn initiate(&self, job_id: Uuid, archive_id: &str, topic_arn: &str) -> Result<(), ArchiveError> {
        let description = job_id.to_string();

        match self
            .config
            .archive()
            .initiate_retrieval(archive_id, &description, topic_arn, RetrievalTier::Expedited)
            .await
        {
            Ok(retrieval_id) => {
                info!(job_id = %job_id, retrieval_id = %retrieval_id, tier = %RetrievalTier::Expedited, "Retrieval initiated");
                Ok(())
            }
            Err(ArchiveError::InsufficientCapacity(_)) => {
                warn!(job_id = %job_id, "Expedited capacity exhausted, retrying on Standard tier");
                let retrieval_id = self
                    .config
                    .archive()
                    .initiate_retrieval(archive_id, &description, topic_arn, RetrievalTier::Standard)
                    .await?;
                info!(job_id = %job_id, retrieval_id = %retrieval_id, tier = %RetrievalTier::Standard, "Retrieval initiated");
                Ok(())
            }
            Err(err) => Err(err),
        }
    }
}

#[async_trait]
impl MessageHandler for RestoreWorker {
    fn queue_type(&self) -> QueueType {
        QueueType::RestoreRequests
    }

    async fn handle(&self, payload: &[u8]) -> Result<(), ConsumptionError> {
        let message = UserIdMessage::parse_message(payload)?;
        self.restore_user(&message.user_id).await
    }
}
