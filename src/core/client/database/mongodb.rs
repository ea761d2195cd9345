use super::error::DatabaseError;
use super::DatabaseClient;
use crate::types::job::{JobPrecondition, JobRecord};
use crate::types::job_updates::JobRecordUpdates;
use crate::types::params::DatabaseArgs;
use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::bson::{self, doc, Bson, Document};
use mongodb::options::{FindOneAndUpdateOptions, FindOneOptions, ReturnDocument, UpdateOptions};
use mongodb::{Client, Collection, Database, IndexModel};
use serde::Serialize;
use std::sync::Arc;
use tracing::{debug, warn};
use uuid::Uuid;

const JOBS_COLLECTION: &str = "jobs";

pub(crate) trait ToDocument {
    fn to_document(&self) -> Result<Document, DatabaseError>;
}

impl<T: Serialize> ToDocument for T {
    fn to_document(&self) -> Result<Document, DatabaseError> {
        let doc = bson::to_bson(self)?;

        if let Bson::Document(doc) = doc {
            Ok(doc)
        } else {
            Err(DatabaseError::FailedToSerializeDocument(format!("Failed to serialize document: {}", doc)))
        }
    }
}

/// Key filter matching the Binary encoding `uuid_1_as_binary` writes.
fn job_id_filter(job_id: Uuid) -> Document {
    doc! { "job_id": bson::Uuid::from_uuid_1(job_id) }
}

/// MongoDB-backed job record store
pub struct MongoDbClient {
    client: Client,
    database: Arc<Database>,
}

impl MongoDbClient {
    pub async fn setup(args: &DatabaseArgs) -> Result<Self, DatabaseError> {
        let client = Client::with_uri_str(&args.connection_uri).await?;
        let database = Arc::new(client.database(&args.database_name));

        // Owner enumeration and archive discovery go through this index.
        let user_index = IndexModel::builder().keys(doc! { "user_id": 1 }).build();
        database.collection::<JobRecord>(JOBS_COLLECTION).create_index(user_index, None).await?;

        Ok(Self { client, database })
    }

    /// Mongodb client uses Arc internally, reducing the cost of clone.
    pub fn client(&self) -> Client {
        self.client.clone()
    }

    pub fn database(&self) -> Arc<Database> {
        self.database.clone()
    }

    fn jobs(&self) -> Collection<JobRecord> {
        self.database.collection(JOBS_COLLECTION)
    }

    fn precondition_filter(precondition: &JobPrecondition) -> Result<Document, DatabaseError> {
        match precondition {
            JobPrecondition::StatusIs(status) => Ok(doc! { "job_status": bson::to_bson(status)? }),
        }
    }
}

#[async_trait]
impl DatabaseClient for MongoDbClient {
    #[tracing::instrument(skip(self, job), fields(job_id = %job.job_id), err)]
    async fn create_job(&self, job: JobRecord) -> Result<JobRecord, DatabaseError> {
        let updates = job.to_document()?;
        let job_id = updates.get("job_id").cloned().ok_or(DatabaseError::FailedToSerializeDocument(
            "job record serialized without a job_id".to_string(),
        ))?;

        let options = UpdateOptions::builder().upsert(true).build();
        let filter = doc! { "job_id": job_id };
        // Only applied when the document is inserted for the first time.
        let updates = doc! { "$setOnInsert": updates };

        let result = self.jobs().update_one(filter, updates, options).await?;

        if result.matched_count == 0 {
            debug!(job_id = %job.job_id, "Job record created");
            Ok(job)
        } else {
            Err(DatabaseError::ItemAlreadyExists(format!("Job already exists: {}", job.job_id)))
        }
    }

    async fn get_job_by_id(&self, job_id: Uuid) -> Result<Option<JobRecord>, DatabaseError> {
        Ok(self.jobs().find_one(job_id_filter(job_id), None).await?)
    }

    async fn get_upgrade_premium(&self, job_id: Uuid) -> Result<bool, DatabaseError> {
        let options = FindOneOptions::builder().projection(doc! { "upgrade_premium": 1 }).build();
        let projection = self
            .database
            .collection::<Document>(JOBS_COLLECTION)
            .find_one(job_id_filter(job_id), options)
            .await?
            .ok_or_else(|| DatabaseError::ItemNotFound(job_id.to_string()))?;

        Ok(projection.get_bool("upgrade_premium").unwrap_or(false))
    }

    #[tracing::instrument(skip(self, updates), fields(job_id = %job_id), err)]
    async fn update_job(
        &self,
        job_id: Uuid,
        updates: JobRecordUpdates,
        precondition: Option<JobPrecondition>,
    ) -> Result<JobRecord, DatabaseError> {
        let mut filter = job_id_filter(job_id);
        if let Some(precondition) = &precondition {
            filter.extend(Self::precondition_filter(precondition)?);
        }

        let updates = updates.to_document()?;

        // Split explicit nulls into $unset so cleared fields disappear from
        // the stored record.
        let mut set_doc = Document::new();
        let mut unset_doc = Document::new();
        for (key, value) in updates.iter() {
            if value == &Bson::Null {
                unset_doc.insert(key, "");
            } else {
                set_doc.insert(key, value);
            }
        }

        if set_doc.is_empty() && unset_doc.is_empty() {
            return Err(DatabaseError::NoUpdateFound(format!("empty update for job {}", job_id)));
        }

        let mut update_doc = Document::new();
        if !set_doc.is_empty() {
            update_doc.insert("$set", set_doc);
        }
        if !unset_doc.is_empty() {
            update_doc.insert("$unset", unset_doc);
        }

        let options = FindOneAndUpdateOptions::builder().upsert(false).return_document(ReturnDocument::After).build();

        match self.jobs().find_one_and_update(filter, update_doc, options).await? {
            Some(record) => Ok(record),
            None => {
                // Disambiguate: a missing record is an upstream bug, a record
                // that exists but no longer matches the guard is expected
                // concurrent progress.
                match (self.jobs().find_one(job_id_filter(job_id), None).await?, precondition) {
                    (Some(_), Some(precondition)) => {
                        warn!(job_id = %job_id, precondition = ?precondition, "Conditional update skipped");
                        Err(DatabaseError::PreconditionFailed(format!(
                            "job {} moved past the guarded state",
                            job_id
                        )))
                    }
                    _ => Err(DatabaseError::ItemNotFound(job_id.to_string())),
                }
            }
        }
    }

    async fn get_jobs_by_user(&self, user_id: &str, archived_only: bool) -> Result<Vec<JobRecord>, DatabaseError> {
        let mut filter = doc! { "user_id": user_id };
        if archived_only {
            filter.insert("archive_status", true);
        }
        let cursor = self.jobs().find(filter, None).await?;
        Ok(cursor.try_collect().await?)
    }

    async fn mark_user_upgraded(&self, user_id: &str) -> Result<u64, DatabaseError> {
        let result = self
            .jobs()
            .update_many(doc! { "user_id": user_id }, doc! { "$set": { "upgrade_premium": true } }, None)
            .await?;
        Ok(result.modified_count)
    }
}
