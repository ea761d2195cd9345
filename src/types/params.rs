use crate::cli::{ArchiveCliArgs, DatabaseCliArgs, MailCliArgs, QueueCliArgs, TopicCliArgs};

#[derive(Debug, Clone)]
pub struct DatabaseArgs {
    pub connection_uri: String,
    pub database_name: String,
}

impl From<DatabaseCliArgs> for DatabaseArgs {
    fn from(args: DatabaseCliArgs) -> Self {
        Self { connection_uri: args.mongodb_connection_url, database_name: args.database_name }
    }
}

/// Queue names derive from this template; `{}` is replaced with the queue
/// type, e.g. `ann_{}` -> `ann_job_requests`.
#[derive(Debug, Clone)]
pub struct QueueArgs {
    pub queue_template: String,
}

impl From<QueueCliArgs> for QueueArgs {
    fn from(args: QueueCliArgs) -> Self {
        Self { queue_template: args.queue_identifier }
    }
}

/// Topic names derive from this template, like `QueueArgs`.
#[derive(Debug, Clone)]
pub struct TopicArgs {
    pub topic_template: String,
}

impl From<TopicCliArgs> for TopicArgs {
    fn from(args: TopicCliArgs) -> Self {
        Self { topic_template: args.topic_identifier }
    }
}

#[derive(Debug, Clone)]
pub struct ArchiveArgs {
    pub vault_name: String,
}

impl From<ArchiveCliArgs> for ArchiveArgs {
    fn from(args: ArchiveCliArgs) -> Self {
        Self { vault_name: args.vault_name }
    }
}

#[derive(Debug, Clone)]
pub struct MailArgs {
    pub sender_address: String,
}

impl From<MailCliArgs> for MailArgs {
    fn from(args: MailCliArgs) -> Self {
        Self { sender_address: args.sender_address }
    }
}
