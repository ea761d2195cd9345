use crate::cli::RunCmd;
use crate::core::client::archive::glacier::Glacier;
use crate::core::client::archive::ArchiveClient;
use crate::core::client::database::mongodb::MongoDbClient;
use crate::core::client::database::DatabaseClient;
use crate::core::client::mail::ses::SES;
use crate::core::client::mail::MailClient;
use crate::core::client::profile::mongodb::MongoProfileClient;
use crate::core::client::profile::ProfileClient;
use crate::core::client::pubsub::sns::SNS;
use crate::core::client::pubsub::PubSubClient;
use crate::core::client::queue::sqs::SQS;
use crate::core::client::queue::QueueClient;
use crate::core::client::storage::s3::AWSS3;
use crate::core::client::storage::StorageClient;
use crate::types::params::{ArchiveArgs, DatabaseArgs, MailArgs, QueueArgs, TopicArgs};
use crate::OrchestratorResult;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::debug;

/// Runtime parameters shared by every worker. Built once from the CLI and
/// passed around explicitly; there is no process-wide mutable state.
#[derive(Debug, Clone)]
pub struct ServiceParams {
    pub inputs_bucket: String,
    pub results_bucket: String,
    /// How long a free user's completed result stays in live storage, in
    /// seconds, measured from the completion timestamp `ct`
    pub retention_window_secs: i64,
    pub annotator_bin: PathBuf,
    pub scratch_dir: PathBuf,
    pub result_suffix: String,
    pub log_suffix: String,
    /// Long-poll batch bound per receive
    pub max_messages: usize,
    /// Long-poll wait per receive, in seconds
    pub wait_time_secs: u64,
}

impl From<&RunCmd> for ServiceParams {
    fn from(run_cmd: &RunCmd) -> Self {
        Self {
            inputs_bucket: run_cmd.storage_args.inputs_bucket.clone(),
            results_bucket: run_cmd.storage_args.results_bucket.clone(),
            retention_window_secs: run_cmd.archive_args.retention_window_secs,
            annotator_bin: run_cmd.compute_args.annotator_bin.clone(),
            scratch_dir: run_cmd.compute_args.scratch_dir.clone(),
            result_suffix: run_cmd.compute_args.result_suffix.clone(),
            log_suffix: run_cmd.compute_args.log_suffix.clone(),
            max_messages: run_cmd.consumer_args.max_messages,
            wait_time_secs: run_cmd.consumer_args.wait_time_secs,
        }
    }
}

/// The app config: one client per external service plus the shared
/// parameters. Workers receive it behind an `Arc` at construction.
pub struct Config {
    params: ServiceParams,
    database: Arc<dyn DatabaseClient>,
    queue: Arc<dyn QueueClient>,
    storage: Arc<dyn StorageClient>,
    archive: Arc<dyn ArchiveClient>,
    pubsub: Arc<dyn PubSubClient>,
    mail: Arc<dyn MailClient>,
    profile: Arc<dyn ProfileClient>,
}

impl Config {
    /// Setup the orchestrator from the run command: load the AWS
    /// configuration once and construct every client from it.
    pub async fn setup(run_cmd: &RunCmd) -> OrchestratorResult<Self> {
        let aws_config = aws_config::from_env().load().await;

        let database_args = DatabaseArgs::from(run_cmd.database_args.clone());
        let queue_args = QueueArgs::from(run_cmd.queue_args.clone());
        let topic_args = TopicArgs::from(run_cmd.topic_args.clone());
        let archive_args = ArchiveArgs::from(run_cmd.archive_args.clone());
        let mail_args = MailArgs::from(run_cmd.mail_args.clone());

        let mongo = MongoDbClient::setup(&database_args).await?;
        let profile = Arc::new(MongoProfileClient::new(mongo.database()));
        debug!(database = %database_args.database_name, "Database clients initialized");

        Ok(Self::new(
            ServiceParams::from(run_cmd),
            Arc::new(mongo),
            Arc::new(SQS::new(&aws_config, &queue_args)),
            Arc::new(AWSS3::new(&aws_config)),
            Arc::new(Glacier::new(&aws_config, &archive_args)),
            Arc::new(SNS::new(&aws_config, &topic_args)),
            Arc::new(SES::new(&aws_config, &mail_args)),
            profile,
        ))
    }

    /// Assemble a config from prebuilt clients. Test builders use this to
    /// substitute mocks for live services.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        params: ServiceParams,
        database: Arc<dyn DatabaseClient>,
        queue: Arc<dyn QueueClient>,
        storage: Arc<dyn StorageClient>,
        archive: Arc<dyn ArchiveClient>,
        pubsub: Arc<dyn PubSubClient>,
        mail: Arc<dyn MailClient>,
        profile: Arc<dyn ProfileClient>,
    ) -> Self {
        Self { params, database, queue, storage, archive, pubsub, mail, profile }
    }

    /// Returns the shared service parameters
    pub fn params(&self) -> &ServiceParams {
        &self.params
    }

    /// Returns the job record store
    pub fn database(&self) -> &dyn DatabaseClient {
        self.database.as_ref()
    }

    /// Returns the queue provider
    pub fn queue(&self) -> &dyn QueueClient {
        self.queue.as_ref()
    }

    /// Returns the live storage provider
    pub fn storage(&self) -> &dyn StorageClient {
        self.storage.as_ref()
    }

    /// Returns the cold storage client
    pub fn archive(&self) -> &dyn ArchiveClient {
        self.archive.as_ref()
    }

    /// Returns the notification relay
    pub fn pubsub(&self) -> &dyn PubSubClient {
        self.pubsub.as_ref()
    }

    /// Returns the email client
    pub fn mail(&self) -> &dyn MailClient {
        self.mail.as_ref()
    }

    /// Returns the accounts client
    pub fn profile(&self) -> &dyn ProfileClient {
        self.profile.as_ref()
    }
}
