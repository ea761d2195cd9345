pub mod error;
pub mod mongodb;

use crate::types::job::{JobPrecondition, JobRecord};
use crate::types::job_updates::JobRecordUpdates;
use async_trait::async_trait;
pub use error::DatabaseError;
use uuid::Uuid;

/// Trait defining job record store operations
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DatabaseClient: Send + Sync {
    /// create_job - Insert a new job record; fails with `ItemAlreadyExists`
    /// if the job id is already present
    async fn create_job(&self, job: JobRecord) -> Result<JobRecord, DatabaseError>;

    /// get_job_by_id - Fetch a job record by its id
    async fn get_job_by_id(&self, job_id: Uuid) -> Result<Option<JobRecord>, DatabaseError>;

    /// get_upgrade_premium - Projection read of the upgrade flag. This is the
    /// authoritative fire-time recheck the archive scheduler performs before
    /// a migration executes.
    async fn get_upgrade_premium(&self, job_id: Uuid) -> Result<bool, DatabaseError>;

    /// update_job - Apply a field set, optionally guarded by a precondition
    /// evaluated at apply time. Contention surfaces as `PreconditionFailed`,
    /// which callers treat as "someone else already moved the state forward",
    /// never as a crash.
    async fn update_job(
        &self,
        job_id: Uuid,
        updates: JobRecordUpdates,
        precondition: Option<JobPrecondition>,
    ) -> Result<JobRecord, DatabaseError>;

    /// get_jobs_by_user - Enumerate an owner's job records through the
    /// user_id secondary index, optionally restricted to archived jobs
    async fn get_jobs_by_user(&self, user_id: &str, archived_only: bool) -> Result<Vec<JobRecord>, DatabaseError>;

    /// mark_user_upgraded - Set `upgrade_premium` on every job the owner
    /// has; idempotent. Returns the number of records modified.
    async fn mark_user_upgraded(&self, user_id: &str) -> Result<u64, DatabaseError>;
}
