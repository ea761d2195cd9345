use crate::core::client::profile::{UserProfile, UserRole};
use crate::types::job::{JobRecord, JobStatus};
use uuid::Uuid;

pub fn build_job_record(job_id: Uuid, user_id: &str, job_status: JobStatus) -> JobRecord {
    JobRecord {
        job_id,
        user_id: user_id.to_string(),
        input_file_name: "input.vcf".to_string(),
        s3_inputs_bucket: "test-inputs".to_string(),
        s3_key_input_file: format!("{user_id}/{job_id}~input.vcf"),
        submit_time: "2026-01-05 10:00:00".to_string(),
        job_status,
        complete_time: None,
        ct: None,
        s3_results_bucket: None,
        s3_key_result_file: None,
        s3_key_log_file: None,
        archive_status: false,
        results_file_archive_id: None,
        upgrade_premium: false,
    }
}

pub fn build_completed_record(job_id: Uuid, user_id: &str, ct: i64) -> JobRecord {
    let mut record = build_job_record(job_id, user_id, JobStatus::Completed);
    record.complete_time = Some("2026-01-05 10:05:00".to_string());
    record.ct = Some(ct);
    record.s3_results_bucket = Some("test-results".to_string());
    record.s3_key_result_file = Some(format!("{user_id}/{job_id}~input.annot.vcf"));
    record.s3_key_log_file = Some(format!("{user_id}/{job_id}~input.count.log"));
    record
}

pub fn build_archived_record(job_id: Uuid, user_id: &str, archive_id: &str) -> JobRecord {
    let mut record = build_completed_record(job_id, user_id, 0);
    record.archive_status = true;
    record.results_file_archive_id = Some(archive_id.to_string());
    record
}

pub fn free_profile(user_id: &str) -> UserProfile {
    UserProfile { user_id: user_id.to_string(), email: format!("{user_id}@example.com"), role: UserRole::FreeUser }
}

pub fn premium_profile(user_id: &str) -> UserProfile {
    UserProfile { user_id: user_id.to_string(), email: format!("{user_id}@example.com"), role: UserRole::PremiumUser }
}

/// Wrap a payload the way the pub/sub layer does before it lands on a queue.
pub fn envelope(inner: &str) -> Vec<u8> {
    serde_json::json!({ "Type": "Notification", "Message": inner }).to_string().into_bytes()
}
