use async_trait::async_trait;
use chrono::{DateTime, Utc};
use futures::TryStreamExt;
use mongodb::{
    bson::{doc, Document},
    options::FindOptions,
    Collection, IndexModel,
};

use crate::{db::Database, errors::AppResult, models::domain::QuizAttempt};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait QuizAttemptRepository: Send + Sync {
    async fn create(&self, attempt: QuizAttempt) -> AppResult<QuizAttempt>;
    async fn find_by_id(&self, id: &str) -> AppResult<Option<QuizAttempt>>;
    async fn count_for_user_and_quiz(&self, user_id: &str, quiz_id: &str) -> AppResult<i64>;
    async fn count_for_user_since(
        &self,
        user_id: &str,
        since: DateTime<Utc>,
    ) -> AppResult<i64>;
    async fn count_for_user(&self, user_id: &str) -> AppResult<i64>;
    async fn count_passed_first_tries(&self, user_id: &str) -> AppResult<i64>;
    // The named lifetime keeps the optional borrow mockable
    async fn list_for_user<'a>(
        &self,
        user_id: &str,
        quiz_id: Option<&'a str>,
        offset: i64,
        limit: i64,
    ) -> AppResult<(Vec<QuizAttempt>, i64)>;
    async fn count(&self) -> AppResult<i64>;
    async fn ensure_indexes(&self) -> AppResult<()>;
}

pub struct MongoQuizAttemptRepository {
    collection: Collection<QuizAttempt>,
}

impl MongoQuizAttemptRepository {
    pub fn new(db: &Database) -> Self {
        let collection = db.get_collection("quiz_attempts");
        Self { collection }
    }
}

#[async_trait]
impl QuizAttemptRepository for MongoQuizAttemptRepository {
    async fn create(&self, attempt: QuizAttempt) -> AppResult<QuizAttempt> {
        self.collection.insert_one(&attempt).await?;
        Ok(attempt)
    }

    async fn find_by_id(&self, id: &str) -> AppResult<Option<QuizAttempt>> {
        let attempt = self.collection.find_one(doc! { "id": id }).await?;
        Ok(attempt)
    }

    async fn count_for_user_and_quiz(&self, user_id: &str, quiz_id: &str) -> AppResult<i64> {
        let count = self
            .collection
            .count_documents(doc! { "user_id": user_id, "quiz_id": quiz_id })
            .await? as i64;
        Ok(count)
    }

    async fn count_for_user_since(
        &self,
        user_id: &str,
        since: DateTime<Utc>,
    ) -> AppResult<i64> {
        // submitted_at is stored as a BSON datetime, so the operand must be one too
        let since = mongodb::bson::DateTime::from_chrono(since);
        let count = self
            .collection
            .count_documents(doc! {
                "user_id": user_id,
                "submitted_at": { "$gte": since },
            })
            .await? as i64;
        Ok(count)
    }

    async fn count_for_user(&self, user_id: &str) -> AppResult<i64> {
        let count = self
            .collection
            .count_documents(doc! { "user_id": user_id })
            .await? as i64;
        Ok(count)
    }

    async fn count_passed_first_tries(&self, user_id: &str) -> AppResult<i64> {
        let count = self
            .collection
            .count_documents(doc! {
                "user_id": user_id,
                "attempt_number": 1,
                "passed": true,
            })
            .await? as i64;
        Ok(count)
    }

    async fn list_for_user<'a>(
        &self,
        user_id: &str,
        quiz_id: Option<&'a str>,
        offset: i64,
        limit: i64,
    ) -> AppResult<(Vec<QuizAttempt>, i64)> {
        let mut filter: Document = doc! { "user_id": user_id };
        if let Some(quiz_id) = quiz_id {
            filter.insert("quiz_id", quiz_id);
        }

        let total = self.collection.count_documents(filter.clone()).await? as i64;

        let find_options = FindOptions::builder()
            .sort(doc! { "submitted_at": -1 })
            .skip(Some(offset as u64))
            .limit(Some(limit))
            .build();

        let cursor = self
            .collection
            .find(filter)
            .with_options(find_options)
            .await?;
        let attempts: Vec<QuizAttempt> = cursor.try_collect().await?;

        Ok((attempts, total))
    }

    async fn count(&self) -> AppResult<i64> {
        let count = self.collection.count_documents(doc! {}).await? as i64;
        Ok(count)
    }

    async fn ensure_indexes(&self) -> AppResult<()> {
        let user_quiz_index = IndexModel::builder()
            .keys(doc! { "user_id": 1, "quiz_id": 1 })
            .build();
        self.collection.create_index(user_quiz_index).await?;

        let submitted_index = IndexModel::builder()
            .keys(doc! { "user_id": 1, "submitted_at": -1 })
            .build();
        self.collection.create_index(submitted_index).await?;

        Ok(())
    }
}
