use actix_web::{delete, get, post, put, web, HttpResponse};
use serde::Deserialize;

use crate::{
    app_state::AppState,
    auth::{require_owner_or_admin, require_role, AuthenticatedUser},
    errors::AppError,
    models::{
        domain::UserRole,
        dto::request::{CreateQuizRequest, SubmitQuizAttemptInput, UpdateQuizRequest},
    },
};

const QUIZ_AUTHOR_ROLES: &[UserRole] = &[UserRole::Teacher, UserRole::School];

#[derive(Debug, Deserialize)]
pub struct QuizListParams {
    pub book_id: Option<String>,
    pub offset: Option<i64>,
    pub limit: Option<i64>,
}

#[derive(Debug, Deserialize)]
pub struct AttemptListParams {
    pub quiz_id: Option<String>,
    pub offset: Option<i64>,
    pub limit: Option<i64>,
}

#[get("/quizzes")]
pub async fn list_quizzes(
    state: web::Data<AppState>,
    query: web::Query<QuizListParams>,
) -> Result<HttpResponse, AppError> {
    let offset = query.offset.unwrap_or(0).max(0);
    let limit = query.limit.unwrap_or(20).clamp(1, 100);

    let response = state
        .quiz_service
        .list_published(query.book_id.as_deref(), offset, limit)
        .await?;
    Ok(HttpResponse::Ok().json(response))
}

#[get("/quizzes/{id}")]
pub async fn get_quiz_for_taking(
    state: web::Data<AppState>,
    id: web::Path<String>,
    _auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let quiz = state.quiz_service.get_for_taking(&id).await?;
    Ok(HttpResponse::Ok().json(quiz))
}

#[post("/quizzes")]
pub async fn create_quiz(
    state: web::Data<AppState>,
    request: web::Json<CreateQuizRequest>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    require_role(&auth.0, QUIZ_AUTHOR_ROLES)?;

    let quiz = state
        .quiz_service
        .create_quiz(&auth.0.sub, request.into_inner())
        .await?;
    Ok(HttpResponse::Created().json(quiz))
}

#[put("/quizzes/{id}")]
pub async fn update_quiz(
    state: web::Data<AppState>,
    id: web::Path<String>,
    request: web::Json<UpdateQuizRequest>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let quiz = state.quiz_service.get_quiz_record(&id).await?;
    require_owner_or_admin(&auth.0, &quiz.created_by_username)?;

    let updated = state
        .quiz_service
        .update_quiz(&id, request.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(updated))
}

#[post("/quizzes/{id}/publish")]
pub async fn publish_quiz(
    state: web::Data<AppState>,
    id: web::Path<String>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let quiz = state.quiz_service.get_quiz_record(&id).await?;
    require_owner_or_admin(&auth.0, &quiz.created_by_username)?;

    let published = state.quiz_service.publish_quiz(&id).await?;
    Ok(HttpResponse::Ok().json(published))
}

#[post("/quizzes/{id}/unpublish")]
pub async fn unpublish_quiz(
    state: web::Data<AppState>,
    id: web::Path<String>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let quiz = state.quiz_service.get_quiz_record(&id).await?;
    require_owner_or_admin(&auth.0, &quiz.created_by_username)?;

    let unpublished = state.quiz_service.unpublish_quiz(&id).await?;
    Ok(HttpResponse::Ok().json(unpublished))
}

#[delete("/quizzes/{id}")]
pub async fn delete_quiz(
    state: web::Data<AppState>,
    id: web::Path<String>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let quiz = state.quiz_service.get_quiz_record(&id).await?;
    require_owner_or_admin(&auth.0, &quiz.created_by_username)?;

    let response = state.quiz_service.delete_quiz(&id).await?;
    Ok(HttpResponse::Ok().json(response))
}

#[post("/attempts")]
pub async fn submit_attempt(
    state: web::Data<AppState>,
    request: web::Json<SubmitQuizAttemptInput>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let attempt = state
        .quiz_attempt_service
        .submit(&auth.0.sub, request.into_inner())
        .await?;
    Ok(HttpResponse::Created().json(attempt))
}

#[get("/attempts")]
pub async fn list_my_attempts(
    state: web::Data<AppState>,
    query: web::Query<AttemptListParams>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let offset = query.offset.unwrap_or(0).max(0);
    let limit = query.limit.unwrap_or(20).clamp(1, 100);

    let response = state
        .quiz_attempt_service
        .list_for_user(&auth.0.sub, query.quiz_id.as_deref(), offset, limit)
        .await?;
    Ok(HttpResponse::Ok().json(response))
}

#[get("/attempts/{id}")]
pub async fn get_attempt(
    state: web::Data<AppState>,
    id: web::Path<String>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let attempt = state.quiz_attempt_service.get_attempt(&id).await?;
    require_owner_or_admin(&auth.0, &attempt.user_id)?;

    Ok(HttpResponse::Ok().json(crate::models::dto::response::QuizAttemptDto::from(attempt)))
}
