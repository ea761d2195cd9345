use crate::core::client::archive::{ArchiveError, MockArchiveClient};
use crate::core::client::database::MockDatabaseClient;
use crate::core::client::storage::{MockStorageClient, StorageError};
use crate::tests::config::TestConfigBuilder;
use crate::tests::utils::{build_archived_record, envelope};
use crate::worker::consumer::MessageHandler;
use crate::worker::thaw::ThawWorker;
use bytes::Bytes;
use mockall::Sequence;
use rstest::rstest;
use uuid::Uuid;

fn completion_payload(retrieval_id: &str, job_id: Uuid, archive_id: &str) -> Vec<u8> {
    let inner = serde_json::json!({
        "JobId": retrieval_id,
        "JobDescription": job_id,
        "ArchiveId": archive_id,
        "StatusCode": "Succeeded"
    })
    .to_string();
    envelope(&inner)
}

#[rstest]
#[tokio::test]
async fn thaw_restores_the_object_and_frees_the_archive() {
    let job_id = Uuid::new_v4();
    let record = build_archived_record(job_id, "free_user_1", "archive-1");
    let bucket = record.s3_results_bucket.clone().unwrap();
    let key = record.s3_key_result_file.clone().unwrap();

    let mut archive = MockArchiveClient::new();
    archive
        .expect_get_retrieval_output()
        .withf(|retrieval_id| retrieval_id == "retrieval-1")
        .times(1)
        .returning(|_| Ok(Bytes::from_static(b"annotated")));
    archive
        .expect_delete_archive()
        .withf(|archive_id| archive_id == "archive-1")
        .times(1)
        .returning(|_| Ok(()));

    let mut database = MockDatabaseClient::new();
    let fetched = record.clone();
    database.expect_get_job_by_id().returning(move |_| Ok(Some(fetched.clone())));
    let mut restored = record.clone();
    restored.archive_status = false;
    restored.results_file_archive_id = None;
    database
        .expect_update_job()
        .withf(move |id, updates, precondition| {
            *id == job_id
                && updates.archive_status == Some(false)
                && updates.results_file_archive_id == Some(None)
                && precondition.is_none()
        })
        .times(1)
        .returning(move |_, _, _| Ok(restored.clone()));

    let mut storage = MockStorageClient::new();
    storage
        .expect_put_object()
        .withf(move |b, k, data| b == bucket && k == key && data == &Bytes::from_static(b"annotated"))
        .times(1)
        .returning(|_, _, _| Ok(()));

    let config =
        TestConfigBuilder::new().with_archive(archive).with_database(database).with_storage(storage).build();

    ThawWorker::new(config).handle(&completion_payload("retrieval-1", job_id, "archive-1")).await.unwrap();
}

/// Redelivery re-runs every effect; rewriting live storage and re-deleting
/// an already-deleted archive must both stay benign.
#[rstest]
#[tokio::test]
async fn redelivered_completion_is_idempotent() {
    let job_id = Uuid::new_v4();
    let record = build_archived_record(job_id, "free_user_1", "archive-1");

    let mut seq = Sequence::new();
    let mut archive = MockArchiveClient::new();
    archive.expect_get_retrieval_output().times(2).returning(|_| Ok(Bytes::from_static(b"annotated")));
    archive.expect_delete_archive().times(1).in_sequence(&mut seq).returning(|_| Ok(()));
    archive
        .expect_delete_archive()
        .times(1)
        .in_sequence(&mut seq)
        .returning(|archive_id| Err(ArchiveError::ArchiveNotFound(archive_id.to_string())));

    let mut database = MockDatabaseClient::new();
    let fetched = record.clone();
    database.expect_get_job_by_id().times(2).returning(move |_| Ok(Some(fetched.clone())));
    let restored = record.clone();
    database.expect_update_job().times(2).returning(move |_, _, _| Ok(restored.clone()));

    let mut storage = MockStorageClient::new();
    storage.expect_put_object().times(2).returning(|_, _, _| Ok(()));

    let config =
        TestConfigBuilder::new().with_archive(archive).with_database(database).with_storage(storage).build();

    let worker = ThawWorker::new(config);
    let payload = completion_payload("retrieval-1", job_id, "archive-1");
    worker.handle(&payload).await.unwrap();
    worker.handle(&payload).await.unwrap();
}

/// A failed live write aborts before the archive delete and the record
/// update, leaving the message for redelivery.
#[rstest]
#[tokio::test]
async fn failed_live_write_leaves_the_archive_untouched() {
    let job_id = Uuid::new_v4();
    let record = build_archived_record(job_id, "free_user_1", "archive-1");

    let mut archive = MockArchiveClient::new();
    archive.expect_get_retrieval_output().returning(|_| Ok(Bytes::from_static(b"annotated")));
    archive.expect_delete_archive().never();

    let mut database = MockDatabaseClient::new();
    database.expect_get_job_by_id().returning(move |_| Ok(Some(record.clone())));
    database.expect_update_job().never();

    let mut storage = MockStorageClient::new();
    storage
        .expect_put_object()
        .returning(|_, _, _| Err(StorageError::ObjectStreamError("connection reset".to_string())));

    let config =
        TestConfigBuilder::new().with_archive(archive).with_database(database).with_storage(storage).build();

    let result = ThawWorker::new(config).handle(&completion_payload("retrieval-1", job_id, "archive-1")).await;
    assert!(result.is_err());
}
