use crate::core::config::Config;
use crate::error::ConsumptionError;
use crate::types::message::{JobIdMessage, MessageParser};
use crate::types::queue::QueueType;
use crate::worker::consumer::MessageHandler;
use async_trait::async_trait;
use std::sync::Arc;
use tracing::info;
use uuid::Uuid;

/// Consumes results-ready events and emails the owner. Reads only; the
/// record is never mutated here, so redelivery at worst resends the email
/// (the notifier has no dedupe of its own).
pub struct NotifyWorker {
    config: Arc<Config>,
}

impl NotifyWorker {
    pub fn new(config: Arc<Config>) -> Self {
        Self { config }
    }

    async fn send_completion_email(&self, job_id: Uuid) -> Result<(), ConsumptionError> {
        let record = self
            .config
            .database()
            .get_job_by_id(job_id)
            .await?
            .ok_or(ConsumptionError::MissingRecord(job_id))?;

        let profile = self.config.profile().get_user_profile(&record.user_id).await?;

        let results_bucket = record
            .s3_results_bucket
            .as_deref()
            .ok_or(ConsumptionError::MissingField { job_id, field: "s3_results_bucket" })?;
        let result_key = record
            .s3_key_result_file
            .as_deref()
            .ok_or(ConsumptionError::MissingField { job_id, field: "s3_key_result_file" })?;
        let log_key = record
            .s3_key_log_file
            .as_deref()
            .ok_or(ConsumptionError::MissingField { job_id, field: "s3_key_log_file" })?;

        let subject = format!("Annotation job completed: {job_id}");
        let body = format!(
            "Your annotation job has completed.\n\
             job_id: {job_id}\n\
             user_id: {}\n\
             s3_results_bucket: {results_bucket}\n\
             s3_key_result_file: {result_key}\n\
             s3_key_log_file: {log_key}\n",
            record.user_id
        );

        self.config.mail().send_email(&profile.email, &subject, &body).await?;

        info!(job_id = %job_id, user_id = %record.user_id, "Completion email sent");
        Ok(())
    }
}

#[async_trait]
impl MessageHandler for NotifyWorker {
    fn queue_type(&self) -> QueueType {
        QueueType::JobResults
    }

    async fn handle(&self, payload: &[u8]) -> Result<(), ConsumptionError> {
        let message = JobIdMessage::parse_message(payload)?;
        self.send_completion_email(message.job_id).await
    }
}
