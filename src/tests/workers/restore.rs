use crate::core::client::archive::{ArchiveError, MockArchiveClient, RetrievalTier};
use crate::core::client::database::MockDatabaseClient;
use crate::core::client::pubsub::MockPubSubClient;
use crate::tests::config::TestConfigBuilder;
use crate::tests::utils::{build_archived_record, envelope};
use crate::types::queue::TopicType;
use crate::worker::consumer::MessageHandler;
use crate::worker::restore::RestoreWorker;
use mockall::Sequence;
use rstest::rstest;
use uuid::Uuid;

const THAW_TOPIC_ARN: &str = "arn:aws:sns:us-east-1:123456789012:ann_thaw_requests";

/// Insufficient Expedited capacity downgrades to exactly one Standard
/// request with identical archive id, description and topic.
#[rstest]
#[tokio::test]
async fn expedited_capacity_failure_falls_back_to_standard_once() {
    let job_id = Uuid::new_v4();
    let record = build_archived_record(job_id, "free_user_1", "archive-1");

    let mut database = MockDatabaseClient::new();
    database.expect_mark_user_upgraded().times(1).returning(|_| Ok(1));
    database.expect_get_jobs_by_user().returning(move |_, _| Ok(vec![record.clone()]));

    let mut pubsub = MockPubSubClient::new();
    pubsub
        .expect_get_topic_arn()
        .withf(|topic| *topic == TopicType::ThawRequests)
        .returning(|_| Ok(THAW_TOPIC_ARN.to_string()));

    let mut seq = Sequence::new();
    let mut archive = MockArchiveClient::new();
    let description = job_id.to_string();
    archive
        .expect_initiate_retrieval()
        .withf(move |archive_id, desc, topic, tier| {
            archive_id == "archive-1"
                && desc == description
                && topic == THAW_TOPIC_ARN
                && *tier == RetrievalTier::Expedited
        })
        .times(1)
        .in_sequence(&mut seq)
        .returning(|_, _, _, _| Err(ArchiveError::InsufficientCapacity("no expedited capacity".to_string())));
    let description = job_id.to_string();
    archive
        .expect_initiate_retrieval()
        .withf(move |archive_id, desc, topic, tier| {
            archive_id == "archive-1"
                && desc == description
                && topic == THAW_TOPIC_ARN
                && *tier == RetrievalTier::Standard
        })
        .times(1)
        .in_sequence(&mut seq)
        .returning(|_, _, _, _| Ok("retrieval-1".to_string()));

    let config =
        TestConfigBuilder::new().with_database(database).with_pubsub(pubsub).with_archive(archive).build();

    RestoreWorker::new(config).handle(&envelope("free_user_1")).await.unwrap();
}

/// The upgrade flag must be written before the archived jobs are
/// enumerated, so a racing migration sees it at fire time.
#[rstest]
#[tokio::test]
async fn upgrade_flag_is_written_before_enumeration() {
    let mut seq = Sequence::new();
    let mut database = MockDatabaseClient::new();
    database.expect_mark_user_upgraded().times(1).in_sequence(&mut seq).returning(|_| Ok(3));
    database
        .expect_get_jobs_by_user()
        .withf(|user_id, archived_only| user_id == "free_user_1" && *archived_only)
        .times(1)
        .in_sequence(&mut seq)
        .returning(|_, _| Ok(vec![]));

    let config = TestConfigBuilder::new().with_database(database).build();

    RestoreWorker::new(config).handle(&envelope("free_user_1")).await.unwrap();
}

/// A retrieval failure on one job must not block the others, and the
/// upgrade message is still acknowledged.
#[rstest]
#[tokio::test]
async fn failed_retrievals_are_skipped_not_retried() {
    let failing_id = Uuid::new_v4();
    let healthy_id = Uuid::new_v4();
    let failing = build_archived_record(failing_id, "free_user_1", "archive-bad");
    let healthy = build_archived_record(healthy_id, "free_user_1", "archive-good");
    let mut missing_archive_id = build_archived_record(Uuid::new_v4(), "free_user_1", "unused");
    missing_archive_id.results_file_archive_id = None;

    let mut database = MockDatabaseClient::new();
    database.expect_mark_user_upgraded().returning(|_| Ok(3));
    let jobs = vec![failing, healthy, missing_archive_id];
    database.expect_get_jobs_by_user().returning(move |_, _| Ok(jobs.clone()));

    let mut pubsub = MockPubSubClient::new();
    pubsub.expect_get_topic_arn().returning(|_| Ok(THAW_TOPIC_ARN.to_string()));

    let mut archive = MockArchiveClient::new();
    archive
        .expect_initiate_retrieval()
        .withf(|archive_id, _, _, _| archive_id == "archive-bad")
        .times(1)
        .returning(|_, _, _, _| Err(ArchiveError::MissingRetrievalId));
    archive
        .expect_initiate_retrieval()
        .withf(|archive_id, _, _, tier| archive_id == "archive-good" && *tier == RetrievalTier::Expedited)
        .times(1)
        .returning(|_, _, _, _| Ok("retrieval-2".to_string()));

    let config =
        TestConfigBuilder::new().with_database(database).with_pubsub(pubsub).with_archive(archive).build();

    RestoreWorker::new(config).handle(&envelope("free_user_1")).await.unwrap();
}
