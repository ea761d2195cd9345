use strum_macros::{Display, EnumIter, EnumString};

/// Queues consumed by the background workers. Physical queue names derive
/// from a `{}` template, e.g. `ann_{}` -> `ann_archive_requests`.
#[derive(Display, Debug, Clone, PartialEq, Eq, EnumIter, Hash)]
pub enum QueueType {
    /// Job submissions published by the web layer
    #[strum(serialize = "job_requests")]
    JobRequests,
    /// Results-ready events consumed by the notifier
    #[strum(serialize = "job_results")]
    JobResults,
    /// Archive requests (fresh and deferred) for the archive scheduler
    #[strum(serialize = "archive_requests")]
    ArchiveRequests,
    /// Upgrade events consumed by the restore worker
    #[strum(serialize = "restore_requests")]
    RestoreRequests,
    /// Cold-storage retrieval completions consumed by the thaw worker
    #[strum(serialize = "thaw_requests")]
    ThawRequests,
}

/// Pub/sub topics the orchestrator publishes to or hands out as callbacks.
/// A topic fans out to every queue subscribed to it.
#[derive(Display, Debug, Clone, PartialEq, Eq, Hash)]
pub enum TopicType {
    /// Results-ready fan-out: subscribed by the job_results queue and the
    /// archive_requests queue
    #[strum(serialize = "job_results")]
    JobResults,
    /// Retrieval-completion callback handed to cold storage; subscribed by
    /// the thaw_requests queue
    #[strum(serialize = "thaw_requests")]
    ThawRequests,
}

/// The background workers this binary can run.
#[derive(Display, EnumString, EnumIter, Debug, Clone, Copy, PartialEq, Eq)]
#[strum(serialize_all = "snake_case")]
pub enum WorkerKind {
    Compute,
    Notify,
    Archive,
    Restore,
    Thaw,
}
