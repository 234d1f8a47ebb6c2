use actix_web::{delete, get, post, put, web, HttpResponse};

use crate::{
    app_state::AppState,
    auth::{require_admin, AuthenticatedUser},
    errors::AppError,
    models::dto::request::{CreateChallengeRequest, PaginationParams, UpdateChallengeRequest},
};

#[get("/challenges/active")]
pub async fn list_active_challenges(state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    let challenges = state.challenge_service.list_active().await?;
    Ok(HttpResponse::Ok().json(challenges))
}

#[get("/challenges/{id}")]
pub async fn get_challenge(
    state: web::Data<AppState>,
    id: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let challenge = state.challenge_service.get(&id).await?;
    Ok(HttpResponse::Ok().json(challenge))
}

#[get("/challenges")]
pub async fn list_all_challenges(
    state: web::Data<AppState>,
    query: web::Query<PaginationParams>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    require_admin(&auth.0)?;

    let response = state
        .challenge_service
        .list_all(query.offset(), query.limit())
        .await?;
    Ok(HttpResponse::Ok().json(response))
}

#[post("/challenges")]
pub async fn create_challenge(
    state: web::Data<AppState>,
    request: web::Json<CreateChallengeRequest>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    require_admin(&auth.0)?;

    let challenge = state.challenge_service.create(request.into_inner()).await?;
    Ok(HttpResponse::Created().json(challenge))
}

#[put("/challenges/{id}")]
pub async fn update_challenge(
    state: web::Data<AppState>,
    id: web::Path<String>,
    request: web::Json<UpdateChallengeRequest>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    require_admin(&auth.0)?;

    let challenge = state
        .challenge_service
        .update(&id, request.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(challenge))
}

#[delete("/challenges/{id}")]
pub async fn delete_challenge(
    state: web::Data<AppState>,
    id: web::Path<String>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    require_admin(&auth.0)?;

    let response = state.challenge_service.delete(&id).await?;
    Ok(HttpResponse::Ok().json(response))
}
