use std::sync::Arc;

use chrono::Utc;
use validator::Validate;

use crate::{
    errors::{AppError, AppResult},
    models::{
        domain::{BlogComment, BlogPost, BlogRating},
        dto::{
            request::{
                AddCommentRequest, CreateBlogPostRequest, RatePostRequest, UpdateBlogPostRequest,
            },
            response::{BlogPostDto, DeleteResponse, PagedResponse},
        },
    },
    repositories::BlogRepository,
};

pub struct BlogService {
    repository: Arc<dyn BlogRepository>,
}

impl BlogService {
    pub fn new(repository: Arc<dyn BlogRepository>) -> Self {
        Self { repository }
    }

    pub async fn list_posts(&self, offset: i64, limit: i64) -> AppResult<PagedResponse<BlogPostDto>> {
        let (posts, total) = self.repository.list(offset, limit).await?;
        let items = posts.into_iter().map(BlogPostDto::from).collect();
        Ok(PagedResponse::new(items, total, offset, limit))
    }

    pub async fn get_post(&self, id: &str) -> AppResult<BlogPostDto> {
        let post = self.get_post_record(id).await?;
        Ok(post.into())
    }

    async fn get_post_record(&self, id: &str) -> AppResult<BlogPost> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Blog post with id '{}' not found", id)))
    }

    pub async fn create_post(
        &self,
        author_username: &str,
        request: CreateBlogPostRequest,
    ) -> AppResult<BlogPostDto> {
        request.validate()?;

        let post = BlogPost::new(&request.title, &request.body, author_username);
        let created = self.repository.create(post).await?;
        log::info!("Blog post '{}' published by {}", created.title, author_username);

        Ok(created.into())
    }

    pub async fn update_post(
        &self,
        id: &str,
        request: UpdateBlogPostRequest,
    ) -> AppResult<BlogPostDto> {
        request.validate()?;

        let mut post = self.get_post_record(id).await?;

        if let Some(title) = request.title {
            post.title = title;
        }
        if let Some(body) = request.body {
            post.body = body;
        }
        post.modified_at = Some(Utc::now());

        let updated = self.repository.update(post).await?;
        Ok(updated.into())
    }

    pub async fn delete_post(&self, id: &str) -> AppResult<DeleteResponse> {
        self.repository.delete(id).await?;
        Ok(DeleteResponse {
            message: format!("Blog post '{}' deleted", id),
        })
    }

    pub async fn add_comment(
        &self,
        post_id: &str,
        username: &str,
        request: AddCommentRequest,
    ) -> AppResult<BlogPostDto> {
        request.validate()?;

        let comment = BlogComment::new(username, &request.body);
        let post = self.repository.add_comment(post_id, comment).await?;

        Ok(post.into())
    }

    /// Records a rating; a user's second rating replaces their first.
    pub async fn rate_post(
        &self,
        post_id: &str,
        username: &str,
        request: RatePostRequest,
    ) -> AppResult<BlogPostDto> {
        request.validate()?;

        let rating = BlogRating {
            username: username.to_string(),
            stars: request.stars,
        };
        let post = self.repository.set_rating(post_id, rating).await?;

        Ok(post.into())
    }
}
