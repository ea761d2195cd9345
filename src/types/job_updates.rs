use crate::types::job::JobStatus;
use serde::Serialize;

/// The field set applied to a job record by `DatabaseClient::update_job`.
/// `job_id` and `user_id` are immutable and deliberately absent.
///
/// `results_file_archive_id` is doubly optional: `Some(None)` serializes to
/// null, which the database layer turns into an `$unset` so the field
/// disappears from the record when a thaw completes.
#[derive(Serialize, Debug, Default, PartialEq)]
pub struct JobRecordUpdates {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub job_status: Option<JobStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub complete_time: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ct: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub s3_results_bucket: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub s3_key_result_file: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub s3_key_log_file: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub archive_status: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub results_file_archive_id: Option<Option<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub upgrade_premium: Option<bool>,
}

impl JobRecordUpdates {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn update_job_status(mut self, job_status: JobStatus) -> Self {
        self.job_status = Some(job_status);
        self
    }

    pub fn update_complete_time(mut self, complete_time: String) -> Self {
        self.complete_time = Some(complete_time);
        self
    }

    pub fn update_ct(mut self, ct: i64) -> Self {
        self.ct = Some(ct);
        self
    }

    pub fn update_s3_results_bucket(mut self, bucket: String) -> Self {
        self.s3_results_bucket = Some(bucket);
        self
    }

    pub fn update_s3_key_result_file(mut self, key: String) -> Self {
        self.s3_key_result_file = Some(key);
        self
    }

    pub fn update_s3_key_log_file(mut self, key: String) -> Self {
        self.s3_key_log_file = Some(key);
        self
    }

    pub fn update_archive_status(mut self, archive_status: bool) -> Self {
        self.archive_status = Some(archive_status);
        self
    }

    pub fn update_results_file_archive_id(mut self, archive_id: String) -> Self {
        self.results_file_archive_id = Some(Some(archive_id));
        self
    }

    /// Remove the archive id from the record (the archive no longer exists).
    pub fn clear_results_file_archive_id(mut self) -> Self {
        self.results_file_archive_id = Some(None);
        self
    }

    pub fn update_upgrade_premium(mut self, upgrade_premium: bool) -> Self {
        self.upgrade_premium = Some(upgrade_premium);
        self
    }
}
