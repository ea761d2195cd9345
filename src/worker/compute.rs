use crate::core::client::database::DatabaseError;
use crate::core::config::Config;
use crate::error::ConsumptionError;
use crate::types::job::{JobPrecondition, JobStatus};
use crate::types::job_updates::JobRecordUpdates;
use crate::types::message::{JobRequestMessage, MessageParser};
use crate::types::queue::{QueueType, TopicType};
use crate::worker::consumer::MessageHandler;
use async_trait::async_trait;
use chrono::Utc;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::process::Command;
use tracing::{info, warn};

/// Consumes job requests: claims the job, runs the external annotator,
/// uploads the artifacts, completes the record and announces the results.
pub struct ComputeWorker {
    config: Arc<Config>,
}

impl ComputeWorker {
    pub fn new(config: Arc<Config>) -> Self {
        Self { config }
    }

    /// Artifact object key: the input key with its extension replaced by the
    /// artifact suffix.
    fn artifact_key(input_key: &str, suffix: &str) -> String {
        let base = input_key.split('.').next().unwrap_or(input_key);
        format!("{base}{suffix}")
    }

    /// Local artifact path produced by the annotator next to the input file.
    fn artifact_path(scratch_dir: &Path, file_name: &str, suffix: &str) -> PathBuf {
        let base = file_name.split('.').next().unwrap_or(file_name);
        scratch_dir.join(format!("{base}{suffix}"))
    }

    async fn run_job(&self, request: &JobRequestMessage) -> Result<(), ConsumptionError> {
        let params = self.config.params().clone();

        // Claim the job. A duplicate delivery finds the status already moved
        // on and is dropped here.
        let claim = self
            .config
            .database()
            .update_job(
                request.job_id,
                JobRecordUpdates::new().update_job_status(JobStatus::Running),
                Some(JobPrecondition::StatusIs(JobStatus::Pending)),
            )
            .await;
        match claim {
            Ok(_) => {}
            Err(DatabaseError::PreconditionFailed(_)) => {
                warn!(job_id = %request.job_id, "Job already claimed, dropping duplicate request");
                return Ok(());
            }
            Err(e) => return Err(e.into()),
        }

        tokio::fs::create_dir_all(&params.scratch_dir).await?;
        let file_name = request.s3_key_input_file.rsplit('/').next().unwrap_or(&request.s3_key_input_file);
        let input_path = params.scratch_dir.join(file_name);

        let input = self.config.storage().get_object(&request.s3_inputs_bucket, &request.s3_key_input_file).await?;
        tokio::fs::write(&input_path, &input).await?;

        info!(job_id = %request.job_id, input = %input_path.display(), "Launching annotator");
        let status = Command::new(&params.annotator_bin).arg(&input_path).arg(&request.s3_key_input_file).status().await?;
        if !status.success() {
            return Err(ConsumptionError::AnnotatorFailed(status.to_string()));
        }

        let result_path = Self::artifact_path(&params.scratch_dir, file_name, &params.result_suffix);
        let log_path = Self::artifact_path(&params.scratch_dir, file_name, &params.log_suffix);
        let result_key = Self::artifact_key(&request.s3_key_input_file, &params.result_suffix);
        let log_key = Self::artifact_key(&request.s3_key_input_file, &params.log_suffix);

        let result_bytes = tokio::fs::read(&result_path).await?;
        self.config.storage().put_object(&params.results_bucket, &result_key, result_bytes.into()).await?;
        let log_bytes = tokio::fs::read(&log_path).await?;
        self.config.storage().put_object(&params.results_bucket, &log_key, log_bytes.into()).await?;

        let completed_at = Utc::now();
        self.config
            .database()
            .update_job(
                request.job_id,
                JobRecordUpdates::new()
                    .update_job_status(JobStatus::Completed)
                    .update_ct(completed_at.timestamp())
                    .update_complete_time(completed_at.format("%Y-%m-%d %H:%M:%S").to_string())
                    .update_s3_results_bucket(params.results_bucket.clone())
                    .update_s3_key_result_file(result_key.clone())
                    .update_s3_key_log_file(log_key)
                    .update_archive_status(false)
                    .update_upgrade_premium(false),
                None,
            )
            .await?;

        // Scratch cleanup is best-effort; a leftover file only wastes disk.
        for path in [&input_path, &result_path, &log_path] {
            if let Err(err) = tokio::fs::remove_file(path).await {
                warn!(path = %path.display(), error = %err, "Failed to remove scratch file");
            }
        }

        // Fans out to the notifier and the archive scheduler.
        self.config.pubsub().publish(TopicType::JobResults, &request.job_id.to_string()).await?;

        info!(job_id = %request.job_id, result_key = %result_key, "Job completed");
        Ok(())
    }
}

#[async_trait]
impl MessageHandler for ComputeWorker {
    fn queue_type(&self) -> QueueType {
        QueueType::JobRequests
    }

    async fn handle(&self, payload: &[u8]) -> Result<(), ConsumptionError> {
        let request = JobRequestMessage::parse_message(payload)?;
        self.run_job(&request).await
    }
}
