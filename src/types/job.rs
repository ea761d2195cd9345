use mongodb::bson::serde_helpers::uuid_1_as_binary;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Lifecycle states of an annotation job. Transitions are forward-only under
/// the declared order: PENDING -> RUNNING -> COMPLETED.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, PartialOrd, Eq, strum_macros::Display)]
pub enum JobStatus {
    /// Submitted by the web layer, waiting for a compute worker
    #[serde(rename = "PENDING")]
    #[strum(serialize = "PENDING")]
    Pending,
    /// A compute worker has claimed the job and launched the annotator
    #[serde(rename = "RUNNING")]
    #[strum(serialize = "RUNNING")]
    Running,
    /// Artifacts are uploaded and the completion fields are written
    #[serde(rename = "COMPLETED")]
    #[strum(serialize = "COMPLETED")]
    Completed,
}

/// Predicate evaluated against the stored record at update time. Conditional
/// updates guard the transitions that must not run twice (claiming a pending
/// job, archiving a completed one).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JobPrecondition {
    StatusIs(JobStatus),
}

/// The central entity: one record per submitted annotation job, keyed by
/// `job_id` with a secondary index on `user_id`.
///
/// The record is created PENDING at submission, advanced by the compute
/// worker, and later mutated by the archive scheduler, the upgrade handler
/// and the thaw worker. It is never deleted.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct JobRecord {
    #[serde(with = "uuid_1_as_binary")]
    pub job_id: Uuid,
    pub user_id: String,
    pub input_file_name: String,
    pub s3_inputs_bucket: String,
    pub s3_key_input_file: String,
    pub submit_time: String,
    pub job_status: JobStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub complete_time: Option<String>,
    /// Completion timestamp in epoch seconds. Set atomically with the
    /// COMPLETED transition; anchors the retention-window arithmetic.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ct: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub s3_results_bucket: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub s3_key_result_file: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub s3_key_log_file: Option<String>,
    /// True once the result object has been moved to cold storage and
    /// deleted from live storage.
    #[serde(default)]
    pub archive_status: bool,
    /// Present only while archived. Assigned by cold storage, never reused.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub results_file_archive_id: Option<String>,
    /// Set the moment the owner upgrades. The archive scheduler re-reads
    /// this at fire time and aborts the migration when it is true.
    #[serde(default)]
    pub upgrade_premium: bool,
}
