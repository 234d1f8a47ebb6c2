use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::{
    bson::doc,
    options::{FindOptions, IndexOptions},
    Collection, IndexModel,
};

use crate::{
    db::Database,
    errors::{AppError, AppResult},
    models::domain::Partner,
};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PartnerRepository: Send + Sync {
    async fn create(&self, partner: Partner) -> AppResult<Partner>;
    async fn find_by_id(&self, id: &str) -> AppResult<Option<Partner>>;
    async fn find_by_name(&self, name: &str) -> AppResult<Option<Partner>>;
    async fn find_all(&self) -> AppResult<Vec<Partner>>;
    async fn update(&self, partner: Partner) -> AppResult<Partner>;
    async fn delete(&self, id: &str) -> AppResult<()>;
    async fn ensure_indexes(&self) -> AppResult<()>;
}

pub struct MongoPartnerRepository {
    collection: Collection<Partner>,
}

impl MongoPartnerRepository {
    pub fn new(db: &Database) -> Self {
        let collection = db.get_collection("partners");
        Self { collection }
    }
}

#[async_trait]
impl PartnerRepository for MongoPartnerRepository {
    async fn create(&self, partner: Partner) -> AppResult<Partner> {
        self.collection.insert_one(&partner).await?;
        Ok(partner)
    }

    async fn find_by_id(&self, id: &str) -> AppResult<Option<Partner>> {
        let partner = self.collection.find_one(doc! { "id": id }).await?;
        Ok(partner)
    }

    async fn find_by_name(&self, name: &str) -> AppResult<Option<Partner>> {
        let partner = self.collection.find_one(doc! { "name": name }).await?;
        Ok(partner)
    }

    async fn find_all(&self) -> AppResult<Vec<Partner>> {
        let find_options = FindOptions::builder().sort(doc! { "name": 1 }).build();
        let cursor = self
            .collection
            .find(doc! {})
            .with_options(find_options)
            .await?;
        let partners: Vec<Partner> = cursor.try_collect().await?;
        Ok(partners)
    }

    async fn update(&self, partner: Partner) -> AppResult<Partner> {
        let result = self
            .collection
            .replace_one(doc! { "id": &partner.id }, &partner)
            .await?;

        if result.matched_count == 0 {
            return Err(AppError::NotFound(format!(
                "Partner with id '{}' not found",
                partner.id
            )));
        }

        Ok(partner)
    }

    async fn delete(&self, id: &str) -> AppResult<()> {
        let result = self.collection.delete_one(doc! { "id": id }).await?;

        if result.deleted_count == 0 {
            return Err(AppError::NotFound(format!(
                "Partner with id '{}' not found",
                id
            )));
        }

        Ok(())
    }

    async fn ensure_indexes(&self) -> AppResult<()> {
        let name_index = IndexModel::builder()
            .keys(doc! { "name": 1 })
            .options(
                IndexOptions::builder()
                    .unique(true)
                    .name("name_unique".to_string())
                    .build(),
            )
            .build();
        self.collection.create_index(name_index).await?;

        Ok(())
    }
}
