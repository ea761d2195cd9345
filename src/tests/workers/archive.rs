use crate::core::client::database::{DatabaseError, MockDatabaseClient};
use crate::core::client::archive::MockArchiveClient;
use crate::core::client::profile::MockProfileClient;
use crate::core::client::queue::MockQueueClient;
use crate::core::client::storage::MockStorageClient;
use crate::tests::config::TestConfigBuilder;
use crate::tests::utils::{build_archived_record, build_completed_record, free_profile, premium_profile};
use crate::types::job::{JobPrecondition, JobStatus};
use crate::types::queue::QueueType;
use crate::worker::archive::ArchiveWorker;
use crate::worker::consumer::MessageHandler;
use bytes::Bytes;
use chrono::Utc;
use mockall::Sequence;
use rstest::rstest;
use std::time::Duration;
use uuid::Uuid;

#[rstest]
#[tokio::test]
async fn already_archived_job_performs_no_storage_operations() {
    let job_id = Uuid::new_v4();
    let record = build_archived_record(job_id, "free_user_1", "archive-1");

    let mut database = MockDatabaseClient::new();
    database.expect_get_job_by_id().returning(move |_| Ok(Some(record.clone())));
    database.expect_update_job().never();

    let mut storage = MockStorageClient::new();
    storage.expect_get_object().never();
    storage.expect_delete_object().never();
    let mut archive = MockArchiveClient::new();
    archive.expect_upload_archive().never();

    let config =
        TestConfigBuilder::new().with_database(database).with_storage(storage).with_archive(archive).build();

    let worker = ArchiveWorker::new(config);
    worker.handle(job_id.to_string().as_bytes()).await.unwrap();
}

#[rstest]
#[tokio::test]
async fn premium_owner_is_not_subject_to_retention() {
    let job_id = Uuid::new_v4();
    let record = build_completed_record(job_id, "premium_user_1", 0);

    let mut database = MockDatabaseClient::new();
    database.expect_get_job_by_id().returning(move |_| Ok(Some(record.clone())));
    database.expect_get_upgrade_premium().never();

    let mut profile = MockProfileClient::new();
    profile.expect_get_user_profile().returning(|user_id| Ok(premium_profile(user_id)));

    let mut storage = MockStorageClient::new();
    storage.expect_get_object().never();

    let config =
        TestConfigBuilder::new().with_database(database).with_profile(profile).with_storage(storage).build();

    ArchiveWorker::new(config).handle(job_id.to_string().as_bytes()).await.unwrap();
}

#[rstest]
#[tokio::test]
async fn request_before_fire_time_is_deferred_through_the_queue() {
    let job_id = Uuid::new_v4();
    // Completed just now: the full retention window is still ahead.
    let record = build_completed_record(job_id, "free_user_1", Utc::now().timestamp());

    let mut database = MockDatabaseClient::new();
    database.expect_get_job_by_id().returning(move |_| Ok(Some(record.clone())));
    database.expect_get_upgrade_premium().never();

    let mut profile = MockProfileClient::new();
    profile.expect_get_user_profile().returning(|user_id| Ok(free_profile(user_id)));

    let expected_payload = job_id.to_string();
    let mut queue = MockQueueClient::new();
    queue
        .expect_send_message()
        .withf(move |queue, payload, delay| {
            *queue == QueueType::ArchiveRequests
                && payload == &expected_payload
                && delay.is_some_and(|d| d > Duration::ZERO && d <= Duration::from_secs(900))
        })
        .times(1)
        .returning(|_, _, _| Ok(()));

    let mut storage = MockStorageClient::new();
    storage.expect_get_object().never();

    let config = TestConfigBuilder::new()
        .with_database(database)
        .with_profile(profile)
        .with_queue(queue)
        .with_storage(storage)
        .build();

    ArchiveWorker::new(config).handle(job_id.to_string().as_bytes()).await.unwrap();
}

/// An upgrade that lands between scheduling and fire time must cancel the
/// migration: zero storage writes, archive_status untouched.
#[rstest]
#[tokio::test]
async fn upgrade_during_the_retention_window_cancels_the_migration() {
    let job_id = Uuid::new_v4();
    let record = build_completed_record(job_id, "free_user_1", 0);

    let mut database = MockDatabaseClient::new();
    database.expect_get_job_by_id().returning(move |_| Ok(Some(record.clone())));
    database.expect_get_upgrade_premium().times(1).returning(|_| Ok(true));
    database.expect_update_job().never();

    let mut profile = MockProfileClient::new();
    profile.expect_get_user_profile().returning(|user_id| Ok(free_profile(user_id)));

    let mut storage = MockStorageClient::new();
    storage.expect_get_object().never();
    storage.expect_delete_object().never();
    let mut archive = MockArchiveClient::new();
    archive.expect_upload_archive().never();

    let config = TestConfigBuilder::new()
        .with_database(database)
        .with_profile(profile)
        .with_storage(storage)
        .with_archive(archive)
        .build();

    ArchiveWorker::new(config).handle(job_id.to_string().as_bytes()).await.unwrap();
}

#[rstest]
#[tokio::test]
async fn elapsed_window_migrates_the_result_to_cold_storage() {
    let job_id = Uuid::new_v4();
    let record = build_completed_record(job_id, "free_user_1", 0);
    let bucket = record.s3_results_bucket.clone().unwrap();
    let key = record.s3_key_result_file.clone().unwrap();

    let mut database = MockDatabaseClient::new();
    let fetched = record.clone();
    database.expect_get_job_by_id().returning(move |_| Ok(Some(fetched.clone())));
    database.expect_get_upgrade_premium().times(1).returning(|_| Ok(false));
    let updated = record.clone();
    database
        .expect_update_job()
        .withf(move |id, updates, precondition| {
            *id == job_id
                && updates.archive_status == Some(true)
                && updates.results_file_archive_id == Some(Some("archive-9".to_string()))
                && *precondition == Some(JobPrecondition::StatusIs(JobStatus::Completed))
        })
        .times(1)
        .returning(move |_, _, _| Ok(updated.clone()));

    let mut profile = MockProfileClient::new();
    profile.expect_get_user_profile().returning(|user_id| Ok(free_profile(user_id)));

    let mut storage = MockStorageClient::new();
    let (expected_bucket, expected_key) = (bucket.clone(), key.clone());
    storage
        .expect_get_object()
        .withf(move |bucket, key| bucket == expected_bucket && key == expected_key)
        .times(1)
        .returning(|_, _| Ok(Bytes::from_static(b"annotated")));
    let (expected_bucket, expected_key) = (bucket.clone(), key.clone());
    storage
        .expect_delete_object()
        .withf(move |bucket, key| bucket == expected_bucket && key == expected_key)
        .times(1)
        .returning(|_, _| Ok(()));

    let mut archive = MockArchiveClient::new();
    archive
        .expect_upload_archive()
        .withf(|data| data == &Bytes::from_static(b"annotated"))
        .times(1)
        .returning(|_| Ok("archive-9".to_string()));

    let config = TestConfigBuilder::new()
        .with_database(database)
        .with_profile(profile)
        .with_storage(storage)
        .with_archive(archive)
        .build();

    ArchiveWorker::new(config).handle(job_id.to_string().as_bytes()).await.unwrap();
}

/// A failed precondition means another writer moved the record. The live
/// object must survive: fail safe rather than lose data.
#[rstest]
#[tokio::test]
async fn failed_precondition_keeps_the_live_object() {
    let job_id = Uuid::new_v4();
    let record = build_completed_record(job_id, "free_user_1", 0);

    let mut database = MockDatabaseClient::new();
    database.expect_get_job_by_id().returning(move |_| Ok(Some(record.clone())));
    database.expect_get_upgrade_premium().returning(|_| Ok(false));
    database
        .expect_update_job()
        .times(1)
        .returning(|job_id, _, _| Err(DatabaseError::PreconditionFailed(job_id.to_string())));

    let mut profile = MockProfileClient::new();
    profile.expect_get_user_profile().returning(|user_id| Ok(free_profile(user_id)));

    let mut storage = MockStorageClient::new();
    storage.expect_get_object().returning(|_, _| Ok(Bytes::from_static(b"annotated")));
    storage.expect_delete_object().never();

    let mut archive = MockArchiveClient::new();
    archive.expect_upload_archive().returning(|_| Ok("archive-9".to_string()));

    let config = TestConfigBuilder::new()
        .with_database(database)
        .with_profile(profile)
        .with_storage(storage)
        .with_archive(archive)
        .build();

    ArchiveWorker::new(config).handle(job_id.to_string().as_bytes()).await.unwrap();
}

/// Running the migration twice yields exactly one archive id and one live
/// delete: the redelivery observes archive_status already set and stops.
#[rstest]
#[tokio::test]
async fn redelivered_migration_is_idempotent() {
    let job_id = Uuid::new_v4();
    let completed = build_completed_record(job_id, "free_user_1", 0);
    let archived = build_archived_record(job_id, "free_user_1", "archive-9");

    let mut seq = Sequence::new();
    let mut database = MockDatabaseClient::new();
    let first = completed.clone();
    database.expect_get_job_by_id().times(1).in_sequence(&mut seq).returning(move |_| Ok(Some(first.clone())));
    database.expect_get_upgrade_premium().times(1).returning(|_| Ok(false));
    let updated = archived.clone();
    database.expect_update_job().times(1).returning(move |_, _, _| Ok(updated.clone()));
    let second = archived.clone();
    database.expect_get_job_by_id().times(1).in_sequence(&mut seq).returning(move |_| Ok(Some(second.clone())));

    let mut profile = MockProfileClient::new();
    profile.expect_get_user_profile().times(1).returning(|user_id| Ok(free_profile(user_id)));

    let mut storage = MockStorageClient::new();
    storage.expect_get_object().times(1).returning(|_, _| Ok(Bytes::from_static(b"annotated")));
    storage.expect_delete_object().times(1).returning(|_, _| Ok(()));

    let mut archive = MockArchiveClient::new();
    archive.expect_upload_archive().times(1).returning(|_| Ok("archive-9".to_string()));

    let config = TestConfigBuilder::new()
        .with_database(database)
        .with_profile(profile)
        .with_storage(storage)
        .with_archive(archive)
        .build();

    let worker = ArchiveWorker::new(config);
    worker.handle(job_id.to_string().as_bytes()).await.unwrap();
    worker.handle(job_id.to_string().as_bytes()).await.unwrap();
}
