use async_trait::async_trait;
use chrono::{DateTime, Utc};
use futures::TryStreamExt;
use mongodb::{bson::doc, options::FindOptions, Collection};

use crate::{
    db::Database,
    errors::{AppError, AppResult},
    models::domain::Challenge,
};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ChallengeRepository: Send + Sync {
    async fn create(&self, challenge: Challenge) -> AppResult<Challenge>;
    async fn find_by_id(&self, id: &str) -> AppResult<Option<Challenge>>;
    async fn list_all(&self, offset: i64, limit: i64) -> AppResult<(Vec<Challenge>, i64)>;
    async fn list_active(&self, now: DateTime<Utc>) -> AppResult<Vec<Challenge>>;
    async fn update(&self, challenge: Challenge) -> AppResult<Challenge>;
    async fn delete(&self, id: &str) -> AppResult<()>;
}

pub struct MongoChallengeRepository {
    collection: Collection<Challenge>,
}

impl MongoChallengeRepository {
    pub fn new(db: &Database) -> Self {
        let collection = db.get_collection("challenges");
        Self { collection }
    }
}

#[async_trait]
impl ChallengeRepository for MongoChallengeRepository {
    async fn create(&self, challenge: Challenge) -> AppResult<Challenge> {
        self.collection.insert_one(&challenge).await?;
        Ok(challenge)
    }

    async fn find_by_id(&self, id: &str) -> AppResult<Option<Challenge>> {
        let challenge = self.collection.find_one(doc! { "id": id }).await?;
        Ok(challenge)
    }

    async fn list_all(&self, offset: i64, limit: i64) -> AppResult<(Vec<Challenge>, i64)> {
        let total = self.collection.count_documents(doc! {}).await? as i64;

        let find_options = FindOptions::builder()
            .sort(doc! { "starts_at": -1 })
            .skip(Some(offset as u64))
            .limit(Some(limit))
            .build();

        let cursor = self
            .collection
            .find(doc! {})
            .with_options(find_options)
            .await?;
        let challenges: Vec<Challenge> = cursor.try_collect().await?;

        Ok((challenges, total))
    }

    async fn list_active(&self, now: DateTime<Utc>) -> AppResult<Vec<Challenge>> {
        // Serialize through serde so comparisons match the stored representation
        let now_bson = mongodb::bson::to_bson(&now)?;

        let find_options = FindOptions::builder().sort(doc! { "ends_at": 1 }).build();
        let cursor = self
            .collection
            .find(doc! {
                "starts_at": { "$lte": now_bson.clone() },
                "ends_at": { "$gt": now_bson },
            })
            .with_options(find_options)
            .await?;
        let challenges: Vec<Challenge> = cursor.try_collect().await?;

        Ok(challenges)
    }

    async fn update(&self, challenge: Challenge) -> AppResult<Challenge> {
        let result = self
            .collection
            .replace_one(doc! { "id": &challenge.id }, &challenge)
            .await?;

        if result.matched_count == 0 {
            return Err(AppError::NotFound(format!(
                "Challenge with id '{}' not found",
                challenge.id
            )));
        }

        Ok(challenge)
    }

    async fn delete(&self, id: &str) -> AppResult<()> {
        let result = self.collection.delete_one(doc! { "id": id }).await?;

        if result.deleted_count == 0 {
            return Err(AppError::NotFound(format!(
                "Challenge with id '{}' not found",
                id
            )));
        }

        Ok(())
    }
}
