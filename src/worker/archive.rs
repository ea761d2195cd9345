use crate::core::client::database::DatabaseError;
use crate::core::client::profile::UserRole;
use crate::core::config::Config;
use crate::error::ConsumptionError;
use crate::types::job::{JobPrecondition, JobRecord, JobStatus};
use crate::types::job_updates::JobRecordUpdates;
use crate::types::message::{JobIdMessage, MessageParser};
use crate::types::queue::QueueType;
use crate::worker::consumer::MessageHandler;
use async_trait::async_trait;
use chrono::Utc;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};
use uuid::Uuid;

/// The queue caps per-message delays at 15 minutes; a longer retention
/// window simply re-defers until the window has elapsed.
const MAX_REQUEUE_DELAY_SECS: i64 = 900;

/// Archive scheduler: migrates a free user's completed result to cold
/// storage once the retention window after completion has elapsed, unless
/// the owner upgraded in the meantime.
///
/// Deferral goes through the queue's delayed delivery rather than an
/// in-process timer: the delayed message is the persisted task, so it
/// survives worker restarts and the consumer never blocks past its
/// visibility timeout.
pub struct ArchiveWorker {
    config: Arc<Config>,
}

impl ArchiveWorker {
    pub fn new(config: Arc<Config>) -> Self {
        Self { config }
    }

    async fn schedule_or_migrate(&self, job_id: Uuid) -> Result<(), ConsumptionError> {
        let record = self
            .config
            .database()
            .get_job_by_id(job_id)
            .await?
            .ok_or(ConsumptionError::MissingRecord(job_id))?;

        if record.archive_status {
            debug!(job_id = %job_id, "Result already archived, nothing to do");
            return Ok(());
        }

        let profile = self.config.profile().get_user_profile(&record.user_id).await?;
        if profile.role == UserRole::PremiumUser {
            debug!(job_id = %job_id, user_id = %record.user_id, "Owner is premium, retention policy does not apply");
            return Ok(());
        }

        let ct = record.ct.ok_or(ConsumptionError::MissingField { job_id, field: "ct" })?;
        let fire_at = ct + self.config.params().retention_window_secs;
        let now = Utc::now().timestamp();

        if now < fire_at {
            let delay = (fire_at - now).min(MAX_REQUEUE_DELAY_SECS);
            debug!(job_id = %job_id, fire_at, delay, "Deferring archive migration");
            self.config
                .queue()
                .send_message(QueueType::ArchiveRequests, job_id.to_string(), Some(Duration::from_secs(delay as u64)))
                .await?;
            return Ok(());
        }

        self.migrate(&record).await
    }

    /// Execute the migration. The upgrade flag is re-read here, at fire
    /// time: an upgrade that lands during the deferral window must win the
    /// race, whatever the flag said when the migration was scheduled.
    async fn migrate(&self, record: &JobRecord) -> Result<(), ConsumptionError> {
        let job_id = record.job_id;

        if self.config.database().get_upgrade_premium(job_id).await? {
            info!(job_id = %job_id, "Owner upgraded during the retention window, migration cancelled");
            return Ok(());
        }

        let bucket = record
            .s3_results_bucket
            .as_deref()
            .ok_or(ConsumptionError::MissingField { job_id, field: "s3_results_bucket" })?;
        let key = record
            .s3_key_result_file
            .as_deref()
            .ok_or(ConsumptionError::MissingField { job_id, field: "s3_key_result_file" })?;

        let data = self.config.storage().get_object(bucket, key).await?;
        let archive_id = self.config.archive().upload_archive(data).await?;

        let update = self
            .config
            .database()
            .update_job(
                job_id,
                JobRecordUpdates::new()
                    .update_archive_status(true)
                    .update_results_file_archive_id(archive_id.clone()),
                Some(JobPrecondition::StatusIs(JobStatus::Completed)),
            )
            .await;
        match update {
            Ok(_) => {}
            Err(DatabaseError::PreconditionFailed(_)) => {
                // Another writer moved the record; keep the live object
                // rather than risk losing data.
                warn!(job_id = %job_id, archive_id = %archive_id, "Record changed under the migration, keeping live object");
                return Ok(());
            }
            Err(err) => return Err(err.into()),
        }

        // Only a recorded migration may delete the live object.
        self.config.storage().delete_object(bucket, key).await?;

        info!(job_id = %job_id, archive_id = %archive_id, "Result migrated to cold storage");
        Ok(())
    }
}

#[async_trait]
impl MessageHandler for ArchiveWorker {
    fn queue_type(&self) -> QueueType {
        QueueType::ArchiveRequests
    }

    async fn handle(&self, payload: &[u8]) -> Result<(), ConsumptionError> {
        let message = JobIdMessage::parse_message(payload)?;
        self.schedule_or_migrate(message.job_id).await
    }
}
