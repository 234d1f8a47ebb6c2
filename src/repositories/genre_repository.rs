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
    models::domain::Genre,
};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait GenreRepository: Send + Sync {
    async fn create(&self, genre: Genre) -> AppResult<Genre>;
    async fn find_by_id(&self, id: &str) -> AppResult<Option<Genre>>;
    async fn find_by_name(&self, name: &str) -> AppResult<Option<Genre>>;
    async fn find_all(&self) -> AppResult<Vec<Genre>>;
    async fn delete(&self, id: &str) -> AppResult<()>;
    async fn ensure_indexes(&self) -> AppResult<()>;
}

pub struct MongoGenreRepository {
    collection: Collection<Genre>,
}

impl MongoGenreRepository {
    pub fn new(db: &Database) -> Self {
        let collection = db.get_collection("genres");
        Self { collection }
    }
}

#[async_trait]
impl GenreRepository for MongoGenreRepository {
    async fn create(&self, genre: Genre) -> AppResult<Genre> {
        self.collection.insert_one(&genre).await?;
        Ok(genre)
    }

    async fn find_by_id(&self, id: &str) -> AppResult<Option<Genre>> {
        let genre = self.collection.find_one(doc! { "id": id }).await?;
        Ok(genre)
    }

    async fn find_by_name(&self, name: &str) -> AppResult<Option<Genre>> {
        let genre = self.collection.find_one(doc! { "name": name }).await?;
        Ok(genre)
    }

    async fn find_all(&self) -> AppResult<Vec<Genre>> {
        let find_options = FindOptions::builder().sort(doc! { "name": 1 }).build();
        let cursor = self
            .collection
            .find(doc! {})
            .with_options(find_options)
            .await?;
        let genres: Vec<Genre> = cursor.try_collect().await?;
        Ok(genres)
    }

    async fn delete(&self, id: &str) -> AppResult<()> {
        let result = self.collection.delete_one(doc! { "id": id }).await?;

        if result.deleted_count == 0 {
            return Err(AppError::NotFound(format!(
                "Genre with id '{}' not found",
                id
            )));
        }

        Ok(())
    }

    async fn ensure_indexes(&self) -> AppResult<()> {
        let id_index = IndexModel::builder()
            .keys(doc! { "id": 1 })
            .options(
                IndexOptions::builder()
                    .unique(true)
                    .name("id_unique".to_string())
                    .build(),
            )
            .build();
        self.collection.create_index(id_index).await?;

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
