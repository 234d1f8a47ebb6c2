use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::{
    bson::{doc, Document},
    options::{FindOneAndUpdateOptions, FindOptions, IndexOptions, ReturnDocument},
    Collection, IndexModel,
};

use crate::{
    db::Database,
    errors::{AppError, AppResult},
    models::domain::User,
};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn create(&self, user: User) -> AppResult<User>;
    async fn find_by_username(&self, username: &str) -> AppResult<Option<User>>;
    async fn find_all_paginated(&self, offset: i64, limit: i64) -> AppResult<(Vec<User>, i64)>;
    async fn find_by_school(&self, school_name: &str) -> AppResult<Vec<User>>;
    async fn find_children(&self, parent_username: &str) -> AppResult<Vec<User>>;
    async fn update(&self, username: &str, update: Document) -> AppResult<User>;
    async fn add_points(&self, username: &str, delta: i64) -> AppResult<User>;
    async fn top_by_points(&self, limit: i64) -> AppResult<Vec<User>>;
    async fn count_with_more_points(&self, points: i64) -> AppResult<i64>;
    async fn count(&self) -> AppResult<i64>;
    async fn delete(&self, username: &str) -> AppResult<()>;
    async fn ensure_indexes(&self) -> AppResult<()>;
}

pub struct MongoUserRepository {
    collection: Collection<User>,
}

impl MongoUserRepository {
    pub fn new(db: &Database) -> Self {
        let collection = db.get_collection("users");
        Self { collection }
    }

    fn after_update_options() -> FindOneAndUpdateOptions {
        FindOneAndUpdateOptions::builder()
            .return_document(ReturnDocument::After)
            .build()
    }
}

#[async_trait]
impl UserRepository for MongoUserRepository {
    async fn create(&self, user: User) -> AppResult<User> {
        self.collection.insert_one(&user).await?;
        Ok(user)
    }

    async fn find_by_username(&self, username: &str) -> AppResult<Option<User>> {
        let user = self
            .collection
            .find_one(doc! { "username": username })
            .await?;
        Ok(user)
    }

    async fn find_all_paginated(&self, offset: i64, limit: i64) -> AppResult<(Vec<User>, i64)> {
        let total = self.collection.count_documents(doc! {}).await? as i64;

        let find_options = FindOptions::builder()
            .sort(doc! { "username": 1 })
            .skip(Some(offset as u64))
            .limit(Some(limit))
            .build();

        let cursor = self
            .collection
            .find(doc! {})
            .with_options(find_options)
            .await?;
        let users: Vec<User> = cursor.try_collect().await?;

        Ok((users, total))
    }

    async fn find_by_school(&self, school_name: &str) -> AppResult<Vec<User>> {
        let cursor = self
            .collection
            .find(doc! { "school_name": school_name, "role": "student" })
            .await?;
        let users: Vec<User> = cursor.try_collect().await?;
        Ok(users)
    }

    async fn find_children(&self, parent_username: &str) -> AppResult<Vec<User>> {
        let cursor = self
            .collection
            .find(doc! { "parent_username": parent_username })
            .await?;
        let users: Vec<User> = cursor.try_collect().await?;
        Ok(users)
    }

    async fn update(&self, username: &str, update: Document) -> AppResult<User> {
        let user = self
            .collection
            .find_one_and_update(doc! { "username": username }, update)
            .with_options(Self::after_update_options())
            .await?
            .ok_or_else(|| {
                AppError::NotFound(format!("User with username '{}' not found", username))
            })?;

        Ok(user)
    }

    async fn add_points(&self, username: &str, delta: i64) -> AppResult<User> {
        let user = self
            .collection
            .find_one_and_update(
                doc! { "username": username },
                doc! { "$inc": { "points": delta } },
            )
            .with_options(Self::after_update_options())
            .await?
            .ok_or_else(|| {
                AppError::NotFound(format!("User with username '{}' not found", username))
            })?;

        Ok(user)
    }

    async fn top_by_points(&self, limit: i64) -> AppResult<Vec<User>> {
        let find_options = FindOptions::builder()
            .sort(doc! { "points": -1, "username": 1 })
            .limit(Some(limit))
            .build();

        let cursor = self
            .collection
            .find(doc! {})
            .with_options(find_options)
            .await?;
        let users: Vec<User> = cursor.try_collect().await?;
        Ok(users)
    }

    async fn count_with_more_points(&self, points: i64) -> AppResult<i64> {
        let count = self
            .collection
            .count_documents(doc! { "points": { "$gt": points } })
            .await? as i64;
        Ok(count)
    }

    async fn count(&self) -> AppResult<i64> {
        let count = self.collection.count_documents(doc! {}).await? as i64;
        Ok(count)
    }

    async fn delete(&self, username: &str) -> AppResult<()> {
        let result = self
            .collection
            .delete_one(doc! { "username": username })
            .await?;

        if result.deleted_count == 0 {
            return Err(AppError::NotFound(format!(
                "User with username '{}' not found",
                username
            )));
        }

        Ok(())
    }

    async fn ensure_indexes(&self) -> AppResult<()> {
        log::info!("Creating indexes for users collection");

        let options = IndexOptions::builder()
            .unique(true)
            .name("username_unique".to_string())
            .build();
        let model = IndexModel::builder()
            .keys(doc! { "username": 1 })
            .options(options)
            .build();

        self.collection.create_index(model).await?;

        let points_index = IndexModel::builder().keys(doc! { "points": -1 }).build();
        self.collection.create_index(points_index).await?;

        Ok(())
    }
}
