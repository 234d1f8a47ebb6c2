use async_graphql::{Context, Object};

use crate::{
    app_state::AppState,
    auth::{extract_claims_from_context, require_owner_or_admin},
    errors::AppResult,
    models::dto::{
        request::{SubmitQuizAttemptInput, UpdateUserRequest},
        response::{DeleteResponse, QuizAttemptDto, UpdateUserResponse},
    },
};

pub struct MutationRoot;

#[Object]
impl MutationRoot {
    /// Grades the submitted answers and records the attempt for the
    /// authenticated user.
    async fn submit_quiz_attempt(
        &self,
        ctx: &Context<'_>,
        input: SubmitQuizAttemptInput,
    ) -> AppResult<QuizAttemptDto> {
        let state = ctx.data::<AppState>()?;
        let claims = extract_claims_from_context(ctx)?;

        state.quiz_attempt_service.submit(&claims.sub, input).await
    }

    async fn update_user(
        &self,
        ctx: &Context<'_>,
        username: String,
        input: UpdateUserRequest,
    ) -> AppResult<UpdateUserResponse> {
        let state = ctx.data::<AppState>()?;
        let claims = extract_claims_from_context(ctx)?;

        require_owner_or_admin(&claims, &username)?;

        state.user_service.update_user(&username, input).await
    }

    async fn delete_user(&self, ctx: &Context<'_>, username: String) -> AppResult<DeleteResponse> {
        let state = ctx.data::<AppState>()?;
        let claims = extract_claims_from_context(ctx)?;

        require_owner_or_admin(&claims, &username)?;

        let response = state.user_service.delete_user(&username).await?;
        state
            .refresh_token_repository
            .revoke_all_for_user(&username)
            .await?;
        Ok(response)
    }
}
