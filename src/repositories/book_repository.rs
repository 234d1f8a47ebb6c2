use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::{
    bson::{doc, Document},
    options::{FindOptions, IndexOptions},
    Collection, IndexModel,
};

use crate::{
    db::Database,
    errors::{AppError, AppResult},
    models::domain::Book,
};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BookRepository: Send + Sync {
    async fn create(&self, book: Book) -> AppResult<Book>;
    async fn find_by_id(&self, id: &str) -> AppResult<Option<Book>>;
    // The named lifetime keeps the optional borrows mockable
    async fn list<'a>(
        &self,
        genre_id: Option<&'a str>,
        search: Option<&'a str>,
        offset: i64,
        limit: i64,
    ) -> AppResult<(Vec<Book>, i64)>;
    async fn update(&self, book: Book) -> AppResult<Book>;
    async fn count_by_genre(&self, genre_id: &str) -> AppResult<i64>;
    async fn count(&self) -> AppResult<i64>;
    async fn delete(&self, id: &str) -> AppResult<()>;
    async fn ensure_indexes(&self) -> AppResult<()>;
}

pub struct MongoBookRepository {
    collection: Collection<Book>,
}

impl MongoBookRepository {
    pub fn new(db: &Database) -> Self {
        let collection = db.get_collection("books");
        Self { collection }
    }

    fn list_filter(genre_id: Option<&str>, search: Option<&str>) -> Document {
        let mut filter = doc! {};

        if let Some(genre_id) = genre_id {
            filter.insert("genre_id", genre_id);
        }

        if let Some(search) = search {
            // Case-insensitive substring match on title or author
            let pattern = regex::escape(search);
            filter.insert(
                "$or",
                vec![
                    doc! { "title": { "$regex": &pattern, "$options": "i" } },
                    doc! { "author": { "$regex": &pattern, "$options": "i" } },
                ],
            );
        }

        filter
    }
}

#[async_trait]
impl BookRepository for MongoBookRepository {
    async fn create(&self, book: Book) -> AppResult<Book> {
        self.collection.insert_one(&book).await?;
        Ok(book)
    }

    async fn find_by_id(&self, id: &str) -> AppResult<Option<Book>> {
        let book = self.collection.find_one(doc! { "id": id }).await?;
        Ok(book)
    }

    async fn list<'a>(
        &self,
        genre_id: Option<&'a str>,
        search: Option<&'a str>,
        offset: i64,
        limit: i64,
    ) -> AppResult<(Vec<Book>, i64)> {
        let filter = Self::list_filter(genre_id, search);

        let total = self.collection.count_documents(filter.clone()).await? as i64;

        let find_options = FindOptions::builder()
            .sort(doc! { "title": 1 })
            .skip(Some(offset as u64))
            .limit(Some(limit))
            .build();

        let cursor = self
            .collection
            .find(filter)
            .with_options(find_options)
            .await?;
        let books: Vec<Book> = cursor.try_collect().await?;

        Ok((books, total))
    }

    async fn update(&self, book: Book) -> AppResult<Book> {
        let result = self
            .collection
            .replace_one(doc! { "id": &book.id }, &book)
            .await?;

        if result.matched_count == 0 {
            return Err(AppError::NotFound(format!(
                "Book with id '{}' not found",
                book.id
            )));
        }

        Ok(book)
    }

    async fn count_by_genre(&self, genre_id: &str) -> AppResult<i64> {
        let count = self
            .collection
            .count_documents(doc! { "genre_id": genre_id })
            .await? as i64;
        Ok(count)
    }

    async fn count(&self) -> AppResult<i64> {
        let count = self.collection.count_documents(doc! {}).await? as i64;
        Ok(count)
    }

    async fn delete(&self, id: &str) -> AppResult<()> {
        let result = self.collection.delete_one(doc! { "id": id }).await?;

        if result.deleted_count == 0 {
            return Err(AppError::NotFound(format!(
                "Book with id '{}' not found",
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

        let genre_index = IndexModel::builder().keys(doc! { "genre_id": 1 }).build();
        self.collection.create_index(genre_index).await?;

        Ok(())
    }
}
