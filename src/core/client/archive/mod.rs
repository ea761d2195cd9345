pub mod error;
pub mod glacier;

use async_trait::async_trait;
use bytes::Bytes;
pub use error::ArchiveError;
use strum_macros::Display;

/// Cold-storage retrieval tiers, fastest first. A capacity failure on
/// Expedited downgrades once to Standard.
#[derive(Display, Debug, Clone, Copy, PartialEq, Eq)]
pub enum RetrievalTier {
    #[strum(serialize = "Expedited")]
    Expedited,
    #[strum(serialize = "Standard")]
    Standard,
}

/// Trait defining cold-storage (archival) operations
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ArchiveClient: Send + Sync {
    /// Upload a payload into the vault; returns the archive id assigned by
    /// cold storage
    async fn upload_archive(&self, data: Bytes) -> Result<String, ArchiveError>;

    /// Start an asynchronous archive retrieval. `description` travels with
    /// the retrieval job and is echoed in the completion notification sent
    /// to `sns_topic_arn`. Returns the retrieval job id.
    async fn initiate_retrieval(
        &self,
        archive_id: &str,
        description: &str,
        sns_topic_arn: &str,
        tier: RetrievalTier,
    ) -> Result<String, ArchiveError>;

    /// Fetch the output of a finished retrieval job
    async fn get_retrieval_output(&self, retrieval_id: &str) -> Result<Bytes, ArchiveError>;

    /// Delete an archive from the vault
    async fn delete_archive(&self, archive_id: &str) -> Result<(), ArchiveError>;
}
