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
    models::domain::{BlogComment, BlogPost, BlogRating},
};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BlogRepository: Send + Sync {
    async fn create(&self, post: BlogPost) -> AppResult<BlogPost>;
    async fn find_by_id(&self, id: &str) -> AppResult<Option<BlogPost>>;
    async fn list(&self, offset: i64, limit: i64) -> AppResult<(Vec<BlogPost>, i64)>;
    async fn update(&self, post: BlogPost) -> AppResult<BlogPost>;
    async fn add_comment(&self, post_id: &str, comment: BlogComment) -> AppResult<BlogPost>;
    async fn set_rating(&self, post_id: &str, rating: BlogRating) -> AppResult<BlogPost>;
    async fn delete(&self, id: &str) -> AppResult<()>;
}

pub struct MongoBlogRepository {
    collection: Collection<BlogPost>,
}

impl MongoBlogRepository {
    pub fn new(db: &Database) -> Self {
        let collection = db.get_collection("blog_posts");
        Self { collection }
    }

    fn after_update_options() -> FindOneAndUpdateOptions {
        FindOneAndUpdateOptions::builder()
            .return_document(ReturnDocument::After)
            .build()
    }
}

#[async_trait]
impl BlogRepository for MongoBlogRepository {
    async fn create(&self, post: BlogPost) -> AppResult<BlogPost> {
        self.collection.insert_one(&post).await?;
        Ok(post)
    }

    async fn find_by_id(&self, id: &str) -> AppResult<Option<BlogPost>> {
        let post = self.collection.find_one(doc! { "id": id }).await?;
        Ok(post)
    }

    async fn list(&self, offset: i64, limit: i64) -> AppResult<(Vec<BlogPost>, i64)> {
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
        let posts: Vec<BlogPost> = cursor.try_collect().await?;

        Ok((posts, total))
    }

    async fn update(&self, post: BlogPost) -> AppResult<BlogPost> {
        let result = self
            .collection
            .replace_one(doc! { "id": &post.id }, &post)
            .await?;

        if result.matched_count == 0 {
            return Err(AppError::NotFound(format!(
                "Blog post with id '{}' not found",
                post.id
            )));
        }

        Ok(post)
    }

    async fn add_comment(&self, post_id: &str, comment: BlogComment) -> AppResult<BlogPost> {
        let comment_bson = mongodb::bson::to_bson(&comment)?;

        let post = self
            .collection
            .find_one_and_update(
                doc! { "id": post_id },
                doc! { "$push": { "comments": comment_bson } },
            )
            .with_options(Self::after_update_options())
            .await?
            .ok_or_else(|| {
                AppError::NotFound(format!("Blog post with id '{}' not found", post_id))
            })?;

        Ok(post)
    }

    async fn set_rating(&self, post_id: &str, rating: BlogRating) -> AppResult<BlogPost> {
        // Drop any previous rating by the same user, then push the new one
        self.collection
            .update_one(
                doc! { "id": post_id },
                doc! { "$pull": { "ratings": { "username": &rating.username } } },
            )
            .await?;

        let rating_bson = mongodb::bson::to_bson(&rating)?;

        let post = self
            .collection
            .find_one_and_update(
                doc! { "id": post_id },
                doc! { "$push": { "ratings": rating_bson } },
            )
            .with_options(Self::after_update_options())
            .await?
            .ok_or_else(|| {
                AppError::NotFound(format!("Blog post with id '{}' not found", post_id))
            })?;

        Ok(post)
    }

    async fn delete(&self, id: &str) -> AppResult<()> {
        let result = self.collection.delete_one(doc! { "id": id }).await?;

        if result.deleted_count == 0 {
            return Err(AppError::NotFound(format!(
                "Blog post with id '{}' not found",
                id
            )));
        }

        Ok(())
    }
}
