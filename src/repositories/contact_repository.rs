use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::{
    bson::doc,
    options::{FindOneAndUpdateOptions, FindOptions, ReturnDocument},
    Collection,
};

use crate::{
    db::Database,
    errors::{AppError, AppResult},
    models::domain::ContactMessage,
};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ContactRepository: Send + Sync {
    async fn create(&self, message: ContactMessage) -> AppResult<ContactMessage>;
    async fn list(&self, offset: i64, limit: i64) -> AppResult<(Vec<ContactMessage>, i64)>;
    async fn mark_read(&self, id: &str) -> AppResult<ContactMessage>;
    async fn count_unread(&self) -> AppResult<i64>;
}

pub struct MongoContactRepository {
    collection: Collection<ContactMessage>,
}

impl MongoContactRepository {
    pub fn new(db: &Database) -> Self {
        let collection = db.get_collection("contact_messages");
        Self { collection }
    }
}

#[async_trait]
impl ContactRepository for MongoContactRepository {
    async fn create(&self, message: ContactMessage) -> AppResult<ContactMessage> {
        self.collection.insert_one(&message).await?;
        Ok(message)
    }

    async fn list(&self, offset: i64, limit: i64) -> AppResult<(Vec<ContactMessage>, i64)> {
        let total = self.collection.count_documents(doc! {}).await? as i64;

        let find_options = FindOptions::builder()
            .sort(doc! { "created_at": -1 })
            .skip(Some(offset as u64))
            .limit(Some(limit))
            .build();

        let cursor = self
            .collection
            .find(doc! {})
            .with_options(find_options)
            .await?;
        let messages: Vec<ContactMessage> = cursor.try_collect().await?;

        Ok((messages, total))
    }

    async fn mark_read(&self, id: &str) -> AppResult<ContactMessage> {
        let options = FindOneAndUpdateOptions::builder()
            .return_document(ReturnDocument::After)
            .build();

        let message = self
            .collection
            .find_one_and_update(doc! { "id": id }, doc! { "$set": { "read": true } })
            .with_options(options)
            .await?
            .ok_or_else(|| {
                AppError::NotFound(format!("Contact message with id '{}' not found", id))
            })?;

        Ok(message)
    }

    async fn count_unread(&self) -> AppResult<i64> {
        let count = self
            .collection
            .count_documents(doc! { "read": false })
            .await? as i64;
        Ok(count)
    }
}
