use async_graphql::{Context, Object, ID};

use crate::{
    app_state::AppState,
    auth::{extract_claims_from_context, require_admin, require_owner_or_admin},
    errors::AppResult,
    models::{
        domain::{Book, Challenge, Genre, Partner},
        dto::{
            request::BookListParams,
            response::{
                LeaderboardEntry, QuizAttemptDto, QuizForTakingDto, QuizSummaryDto, UserDto,
            },
        },
    },
};

pub struct QueryRoot;

#[Object]
impl QueryRoot {
    /// The authenticated user's own profile.
    async fn me(&self, ctx: &Context<'_>) -> AppResult<UserDto> {
        let state = ctx.data::<AppState>()?;
        let claims = extract_claims_from_context(ctx)?;

        state.user_service.get_user(&claims.sub).await
    }

    async fn user(&self, ctx: &Context<'_>, username: String) -> AppResult<UserDto> {
        let state = ctx.data::<AppState>()?;
        let claims = extract_claims_from_context(ctx)?;

        require_owner_or_admin(&claims, &username)?;

        state.user_service.get_user(&username).await
    }

    async fn users(
        &self,
        ctx: &Context<'_>,
        offset: Option<i64>,
        limit: Option<i64>,
    ) -> AppResult<Vec<UserDto>> {
        let state = ctx.data::<AppState>()?;
        let claims = extract_claims_from_context(ctx)?;

        require_admin(&claims)?;

        let offset = offset.unwrap_or(0).max(0);
        let limit = limit.unwrap_or(20).clamp(1, 100);

        let page = state
            .user_service
            .get_all_users_paginated(offset, limit)
            .await?;
        Ok(page.items)
    }

    async fn leaderboard(
        &self,
        ctx: &Context<'_>,
        limit: Option<i64>,
    ) -> AppResult<Vec<LeaderboardEntry>> {
        let state = ctx.data::<AppState>()?;
        extract_claims_from_context(ctx)?;

        state.user_service.leaderboard(limit.unwrap_or(20)).await
    }

    async fn books(
        &self,
        ctx: &Context<'_>,
        genre_id: Option<String>,
        search: Option<String>,
        offset: Option<i64>,
        limit: Option<i64>,
    ) -> AppResult<Vec<Book>> {
        let state = ctx.data::<AppState>()?;

        let params = BookListParams {
            offset,
            limit,
            genre_id,
            search,
        };
        let page = state.catalog_service.list_books(&params).await?;
        Ok(page.items)
    }

    async fn book(&self, ctx: &Context<'_>, id: ID) -> AppResult<Book> {
        let state = ctx.data::<AppState>()?;
        state.catalog_service.get_book(&id).await
    }

    async fn genres(&self, ctx: &Context<'_>) -> AppResult<Vec<Genre>> {
        let state = ctx.data::<AppState>()?;
        state.catalog_service.list_genres().await
    }

    async fn quizzes(
        &self,
        ctx: &Context<'_>,
        book_id: Option<String>,
        offset: Option<i64>,
        limit: Option<i64>,
    ) -> AppResult<Vec<QuizSummaryDto>> {
        let state = ctx.data::<AppState>()?;

        let offset = offset.unwrap_or(0).max(0);
        let limit = limit.unwrap_or(20).clamp(1, 100);

        let page = state
            .quiz_service
            .list_published(book_id.as_deref(), offset, limit)
            .await?;
        Ok(page.items)
    }

    /// A published quiz with the correct answers stripped out.
    async fn quiz(&self, ctx: &Context<'_>, id: ID) -> AppResult<QuizForTakingDto> {
        let state = ctx.data::<AppState>()?;
        extract_claims_from_context(ctx)?;

        state.quiz_service.get_for_taking(&id).await
    }

    async fn my_attempts(
        &self,
        ctx: &Context<'_>,
        quiz_id: Option<String>,
        offset: Option<i64>,
        limit: Option<i64>,
    ) -> AppResult<Vec<QuizAttemptDto>> {
        let state = ctx.data::<AppState>()?;
        let claims = extract_claims_from_context(ctx)?;

        let offset = offset.unwrap_or(0).max(0);
        let limit = limit.unwrap_or(20).clamp(1, 100);

        let page = state
            .quiz_attempt_service
            .list_for_user(&claims.sub, quiz_id.as_deref(), offset, limit)
            .await?;
        Ok(page.items)
    }

    async fn active_challenges(&self, ctx: &Context<'_>) -> AppResult<Vec<Challenge>> {
        let state = ctx.data::<AppState>()?;
        state.challenge_service.list_active().await
    }

    async fn partners(&self, ctx: &Context<'_>) -> AppResult<Vec<Partner>> {
        let state = ctx.data::<AppState>()?;
        state.partner_service.list().await
    }
}
