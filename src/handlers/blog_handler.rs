use actix_web::{delete, get, post, put, web, HttpResponse};

use crate::{
    app_state::AppState,
    auth::{require_admin, AuthenticatedUser},
    errors::AppError,
    models::dto::request::{
        AddCommentRequest, CreateBlogPostRequest, PaginationParams, RatePostRequest,
        UpdateBlogPostRequest,
    },
};

#[get("/blog")]
pub async fn list_posts(
    state: web::Data<AppState>,
    query: web::Query<PaginationParams>,
) -> Result<HttpResponse, AppError> {
    let response = state
        .blog_service
        .list_posts(query.offset(), query.limit())
        .await?;
    Ok(HttpResponse::Ok().json(response))
}

#[get("/blog/{id}")]
pub async fn get_post(
    state: web::Data<AppState>,
    id: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let post = state.blog_service.get_post(&id).await?;
    Ok(HttpResponse::Ok().json(post))
}

#[post("/blog")]
pub async fn create_post(
    state: web::Data<AppState>,
    request: web::Json<CreateBlogPostRequest>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    require_admin(&auth.0)?;

    let post = state
        .blog_service
        .create_post(&auth.0.sub, request.into_inner())
        .await?;
    Ok(HttpResponse::Created().json(post))
}

#[put("/blog/{id}")]
pub async fn update_post(
    state: web::Data<AppState>,
    id: web::Path<String>,
    request: web::Json<UpdateBlogPostRequest>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    require_admin(&auth.0)?;

    let post = state
        .blog_service
        .update_post(&id, request.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(post))
}

#[delete("/blog/{id}")]
pub async fn delete_post(
    state: web::Data<AppState>,
    id: web::Path<String>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    require_admin(&auth.0)?;

    let response = state.blog_service.delete_post(&id).await?;
    Ok(HttpResponse::Ok().json(response))
}

#[post("/blog/{id}/comments")]
pub async fn add_comment(
    state: web::Data<AppState>,
    id: web::Path<String>,
    request: web::Json<AddCommentRequest>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let post = state
        .blog_service
        .add_comment(&id, &auth.0.sub, request.into_inner())
        .await?;
    Ok(HttpResponse::Created().json(post))
}

#[put("/blog/{id}/rating")]
pub async fn rate_post(
    state: web::Data<AppState>,
    id: web::Path<String>,
    request: web::Json<RatePostRequest>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let post = state
        .blog_service
        .rate_post(&id, &auth.0.sub, request.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(post))
}
