use async_trait::async_trait;
use mongodb::{bson::doc, options::IndexOptions, Collection, IndexModel};

use crate::{db::Database, errors::AppResult, models::domain::RefreshToken};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RefreshTokenRepository: Send + Sync {
    async fn create(&self, token: RefreshToken) -> AppResult<RefreshToken>;
    async fn find_by_hash(&self, token_hash: &str) -> AppResult<Option<RefreshToken>>;
    async fn revoke_by_hash(&self, token_hash: &str) -> AppResult<()>;
    async fn revoke_all_for_user(&self, user_id: &str) -> AppResult<()>;
    async fn ensure_indexes(&self) -> AppResult<()>;
}

pub struct MongoRefreshTokenRepository {
    collection: Collection<RefreshToken>,
}

impl MongoRefreshTokenRepository {
    pub fn new(db: &Database) -> Self {
        let collection = db.get_collection("refresh_tokens");
        Self { collection }
    }
}

#[async_trait]
impl RefreshTokenRepository for MongoRefreshTokenRepository {
    async fn create(&self, token: RefreshToken) -> AppResult<RefreshToken> {
        self.collection.insert_one(&token).await?;
        Ok(token)
    }

    async fn find_by_hash(&self, token_hash: &str) -> AppResult<Option<RefreshToken>> {
        let token = self
            .collection
            .find_one(doc! { "token_hash": token_hash })
            .await?;
        Ok(token)
    }

    async fn revoke_by_hash(&self, token_hash: &str) -> AppResult<()> {
        self.collection
            .update_one(
                doc! { "token_hash": token_hash },
                doc! { "$set": { "revoked": true } },
            )
            .await?;
        Ok(())
    }

    async fn revoke_all_for_user(&self, user_id: &str) -> AppResult<()> {
        self.collection
            .update_many(
                doc! { "user_id": user_id },
                doc! { "$set": { "revoked": true } },
            )
            .await?;
        Ok(())
    }

    async fn ensure_indexes(&self) -> AppResult<()> {
        let hash_index = IndexModel::builder()
            .keys(doc! { "token_hash": 1 })
            .options(
                IndexOptions::builder()
                    .unique(true)
                    .name("token_hash_unique".to_string())
                    .build(),
            )
            .build();
        self.collection.create_index(hash_index).await?;

        Ok(())
    }
}
