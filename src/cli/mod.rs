use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "annotation-orchestrator",
    about = "Annotation pipeline orchestrator - compute, notification and archival lifecycle workers",
    long_about = "Runs the background workers of the annotation pipeline: job compute, \
    completion notification, retention-window archival to cold storage, and the \
    restore/thaw protocol that reverses archival when an owner upgrades."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the selected background workers
    Run {
        #[command(flatten)]
        run_command: Box<RunCmd>,
    },
}

#[derive(Parser, Debug, Clone)]
pub struct RunCmd {
    #[clap(flatten)]
    pub database_args: DatabaseCliArgs,

    #[clap(flatten)]
    pub queue_args: QueueCliArgs,

    #[clap(flatten)]
    pub topic_args: TopicCliArgs,

    #[clap(flatten)]
    pub storage_args: StorageCliArgs,

    #[clap(flatten)]
    pub archive_args: ArchiveCliArgs,

    #[clap(flatten)]
    pub mail_args: MailCliArgs,

    #[clap(flatten)]
    pub compute_args: ComputeCliArgs,

    #[clap(flatten)]
    pub consumer_args: ConsumerCliArgs,

    /// Workers to run (comma separated)
    #[arg(
        env = "ANN_ORCHESTRATOR_WORKERS",
        long,
        value_delimiter = ',',
        default_value = "compute,notify,archive,restore,thaw"
    )]
    pub workers: Vec<String>,
}

/// Parameters used to config MongoDB.
#[derive(Debug, Clone, Args)]
pub struct DatabaseCliArgs {
    /// The connection string to the MongoDB server.
    #[arg(env = "ANN_ORCHESTRATOR_MONGODB_CONNECTION_URL", long, default_value = "mongodb://localhost:27017")]
    pub mongodb_connection_url: String,

    /// The name of the database.
    #[arg(env = "ANN_ORCHESTRATOR_DATABASE_NAME", long, default_value = "annotations")]
    pub database_name: String,
}

/// Parameters used to config the queues.
#[derive(Debug, Clone, Args)]
pub struct QueueCliArgs {
    /// Queue name template; `{}` is replaced with the queue type.
    #[arg(env = "ANN_ORCHESTRATOR_QUEUE_IDENTIFIER", long, default_value = "ann_{}")]
    pub queue_identifier: String,
}

/// Parameters used to config the pub/sub topics.
#[derive(Debug, Clone, Args)]
pub struct TopicCliArgs {
    /// Topic name template; `{}` is replaced with the topic type.
    #[arg(env = "ANN_ORCHESTRATOR_TOPIC_IDENTIFIER", long, default_value = "ann_{}")]
    pub topic_identifier: String,
}

/// Parameters used to config live object storage.
#[derive(Debug, Clone, Args)]
pub struct StorageCliArgs {
    /// Bucket holding submitted input files.
    #[arg(env = "ANN_ORCHESTRATOR_INPUTS_BUCKET", long, default_value = "ann-inputs")]
    pub inputs_bucket: String,

    /// Bucket holding result and log artifacts.
    #[arg(env = "ANN_ORCHESTRATOR_RESULTS_BUCKET", long, default_value = "ann-results")]
    pub results_bucket: String,
}

/// Parameters used to config cold storage and the retention policy.
#[derive(Debug, Clone, Args)]
pub struct ArchiveCliArgs {
    /// The cold-storage vault holding archived results.
    #[arg(env = "ANN_ORCHESTRATOR_VAULT_NAME", long, default_value = "ann-archive")]
    pub vault_name: String,

    /// Free-tier retention window in seconds, measured from job completion.
    #[arg(env = "ANN_ORCHESTRATOR_RETENTION_WINDOW_SECS", long, default_value_t = 300)]
    pub retention_window_secs: i64,
}

/// Parameters used to config outbound email.
#[derive(Debug, Clone, Args)]
pub struct MailCliArgs {
    /// Sender address for completion notifications.
    #[arg(env = "ANN_ORCHESTRATOR_MAIL_SENDER", long, default_value = "no-reply@ann-orchestrator.local")]
    pub sender_address: String,
}

/// Parameters used to config the external annotator.
#[derive(Debug, Clone, Args)]
pub struct ComputeCliArgs {
    /// Path to the annotator executable.
    #[arg(env = "ANN_ORCHESTRATOR_ANNOTATOR_BIN", long, default_value = "./run_annotator")]
    pub annotator_bin: PathBuf,

    /// Scratch directory for downloaded inputs and produced artifacts.
    #[arg(env = "ANN_ORCHESTRATOR_SCRATCH_DIR", long, default_value = "./jobs")]
    pub scratch_dir: PathBuf,

    /// Suffix the annotator appends to the input base name for results.
    #[arg(env = "ANN_ORCHESTRATOR_RESULT_SUFFIX", long, default_value = ".annot.vcf")]
    pub result_suffix: String,

    /// Suffix the annotator appends to the input base name for logs.
    #[arg(env = "ANN_ORCHESTRATOR_LOG_SUFFIX", long, default_value = ".count.log")]
    pub log_suffix: String,
}

/// Parameters used to config the consumer loops.
#[derive(Debug, Clone, Args)]
pub struct ConsumerCliArgs {
    /// Maximum messages fetched per long poll.
    #[arg(env = "ANN_ORCHESTRATOR_MAX_MESSAGES", long, default_value_t = 10)]
    pub max_messages: usize,

    /// Long-poll wait in seconds.
    #[arg(env = "ANN_ORCHESTRATOR_WAIT_TIME_SECS", long, default_value_t = 20)]
    pub wait_time_secs: u64,
}
