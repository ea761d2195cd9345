use crate::core::client::database::MockDatabaseClient;
use crate::core::client::mail::MockMailClient;
use crate::core::client::profile::MockProfileClient;
use crate::error::ConsumptionError;
use crate::tests::config::TestConfigBuilder;
use crate::tests::utils::{build_completed_record, envelope, free_profile};
use crate::worker::consumer::MessageHandler;
use crate::worker::notify::NotifyWorker;
use rstest::rstest;
use uuid::Uuid;

#[rstest]
#[tokio::test]
async fn completion_email_reaches_the_owner() {
    let job_id = Uuid::new_v4();
    let record = build_completed_record(job_id, "free_user_1", 0);
    let result_key = record.s3_key_result_file.clone().unwrap();

    let mut database = MockDatabaseClient::new();
    database.expect_get_job_by_id().returning(move |_| Ok(Some(record.clone())));

    let mut profile = MockProfileClient::new();
    profile.expect_get_user_profile().returning(|user_id| Ok(free_profile(user_id)));

    let mut mail = MockMailClient::new();
    let expected_id = job_id.to_string();
    mail.expect_send_email()
        .withf(move |recipient, subject, body| {
            recipient == "free_user_1@example.com"
                && subject.contains(&expected_id)
                && body.contains("free_user_1")
                && body.contains(&result_key)
        })
        .times(1)
        .returning(|_, _, _| Ok(()));

    let config = TestConfigBuilder::new().with_database(database).with_profile(profile).with_mail(mail).build();

    NotifyWorker::new(config).handle(&envelope(&job_id.to_string())).await.unwrap();
}

/// A redelivered results-ready message re-sends the email (the notifier
/// keeps no dedupe state, an explicit non-goal) but never touches the
/// record.
#[rstest]
#[tokio::test]
async fn redelivery_never_mutates_the_record() {
    let job_id = Uuid::new_v4();
    let record = build_completed_record(job_id, "free_user_1", 0);

    let mut database = MockDatabaseClient::new();
    database.expect_get_job_by_id().times(2).returning(move |_| Ok(Some(record.clone())));
    database.expect_update_job().never();

    let mut profile = MockProfileClient::new();
    profile.expect_get_user_profile().times(2).returning(|user_id| Ok(free_profile(user_id)));

    let mut mail = MockMailClient::new();
    mail.expect_send_email().times(2).returning(|_, _, _| Ok(()));

    let config = TestConfigBuilder::new().with_database(database).with_profile(profile).with_mail(mail).build();

    let worker = NotifyWorker::new(config);
    let payload = envelope(&job_id.to_string());
    worker.handle(&payload).await.unwrap();
    worker.handle(&payload).await.unwrap();
}

#[rstest]
#[tokio::test]
async fn missing_record_is_surfaced_for_redelivery() {
    let job_id = Uuid::new_v4();

    let mut database = MockDatabaseClient::new();
    database.expect_get_job_by_id().returning(|_| Ok(None));

    let config = TestConfigBuilder::new().with_database(database).build();

    let result = NotifyWorker::new(config).handle(&envelope(&job_id.to_string())).await;
    assert!(matches!(result, Err(ConsumptionError::MissingRecord(id)) if id == job_id));
}
