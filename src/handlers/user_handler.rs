use actix_web::{delete, get, put, web, HttpResponse};

use crate::{
    app_state::AppState,
    auth::{require_admin, require_owner_or_admin, AuthenticatedUser},
    errors::AppError,
    models::dto::request::{PaginationParams, UpdateTierRequest, UpdateUserRequest},
};

#[get("/users")]
pub async fn get_all_users(
    state: web::Data<AppState>,
    query: web::Query<PaginationParams>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    require_admin(&auth.0)?;

    let pagination = query.into_inner();
    let response = state
        .user_service
        .get_all_users_paginated(pagination.offset(), pagination.limit())
        .await?;
    Ok(HttpResponse::Ok().json(response))
}

#[get("/users/{username}")]
pub async fn get_user(
    state: web::Data<AppState>,
    username: web::Path<String>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    require_owner_or_admin(&auth.0, &username)?;

    let user = state.user_service.get_user(&username).await?;
    Ok(HttpResponse::Ok().json(user))
}

#[put("/users/{username}")]
pub async fn update_user(
    state: web::Data<AppState>,
    username: web::Path<String>,
    request: web::Json<UpdateUserRequest>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    require_owner_or_admin(&auth.0, &username)?;

    let response = state
        .user_service
        .update_user(&username, request.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(response))
}

#[put("/users/{username}/tier")]
pub async fn update_tier(
    state: web::Data<AppState>,
    username: web::Path<String>,
    request: web::Json<UpdateTierRequest>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    require_admin(&auth.0)?;

    let response = state
        .user_service
        .update_tier(&username, request.tier)
        .await?;
    Ok(HttpResponse::Ok().json(response))
}

#[delete("/users/{username}")]
pub async fn delete_user(
    state: web::Data<AppState>,
    username: web::Path<String>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    require_owner_or_admin(&auth.0, &username)?;

    let response = state.user_service.delete_user(&username).await?;
    state
        .refresh_token_repository
        .revoke_all_for_user(&username)
        .await?;
    Ok(HttpResponse::Ok().json(response))
}

#[get("/leaderboard")]
pub async fn leaderboard(
    _auth: AuthenticatedUser,
    state: web::Data<AppState>,
    query: web::Query<PaginationParams>,
) -> Result<HttpResponse, AppError> {
    let entries = state.user_service.leaderboard(query.limit()).await?;
    Ok(HttpResponse::Ok().json(entries))
}

#[get("/health")]
pub async fn health_check() -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({
        "status": "healthy",
        "version": env!("CARGO_PKG_VERSION")
    }))
}

#[get("/health/ready")]
pub async fn health_check_ready(state: web::Data<AppState>) -> HttpResponse {
    let db_health = state.db.health_check().await;

    let status = if db_health.is_ok() {
        "ready"
    } else {
        "not_ready"
    };

    let response = serde_json::json!({
        "status": status,
        "version": env!("CARGO_PKG_VERSION"),
        "dependencies": {
            "mongodb": if db_health.is_ok() { "ok" } else { "error" }
        }
    });

    if db_health.is_ok() {
        HttpResponse::Ok().json(response)
    } else {
        HttpResponse::ServiceUnavailable().json(response)
    }
}

#[get("/health/live")]
pub async fn health_check_live() -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({
        "status": "alive",
        "version": env!("CARGO_PKG_VERSION")
    }))
}
