use actix_web::{delete, get, post, put, web, HttpResponse};

use crate::{
    app_state::AppState,
    auth::{require_admin, AuthenticatedUser},
    errors::AppError,
    models::dto::request::{
        BookListParams, CreateBookRequest, CreateGenreRequest, UpdateBookRequest,
    },
};

#[get("/books")]
pub async fn list_books(
    state: web::Data<AppState>,
    query: web::Query<BookListParams>,
) -> Result<HttpResponse, AppError> {
    let response = state.catalog_service.list_books(&query).await?;
    Ok(HttpResponse::Ok().json(response))
}

#[get("/books/{id}")]
pub async fn get_book(
    state: web::Data<AppState>,
    id: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let book = state.catalog_service.get_book(&id).await?;
    Ok(HttpResponse::Ok().json(book))
}

#[post("/books")]
pub async fn create_book(
    state: web::Data<AppState>,
    request: web::Json<CreateBookRequest>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    require_admin(&auth.0)?;

    let book = state
        .catalog_service
        .create_book(request.into_inner())
        .await?;
    Ok(HttpResponse::Created().json(book))
}

#[put("/books/{id}")]
pub async fn update_book(
    state: web::Data<AppState>,
    id: web::Path<String>,
    request: web::Json<UpdateBookRequest>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    require_admin(&auth.0)?;

    let book = state
        .catalog_service
        .update_book(&id, request.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(book))
}

#[delete("/books/{id}")]
pub async fn delete_book(
    state: web::Data<AppState>,
    id: web::Path<String>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    require_admin(&auth.0)?;

    let response = state.catalog_service.delete_book(&id).await?;
    Ok(HttpResponse::Ok().json(response))
}

#[get("/genres")]
pub async fn list_genres(state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    let genres = state.catalog_service.list_genres().await?;
    Ok(HttpResponse::Ok().json(genres))
}

#[post("/genres")]
pub async fn create_genre(
    state: web::Data<AppState>,
    request: web::Json<CreateGenreRequest>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    require_admin(&auth.0)?;

    let genre = state
        .catalog_service
        .create_genre(request.into_inner())
        .await?;
    Ok(HttpResponse::Created().json(genre))
}

#[delete("/genres/{id}")]
pub async fn delete_genre(
    state: web::Data<AppState>,
    id: web::Path<String>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    require_admin(&auth.0)?;

    let response = state.catalog_service.delete_genre(&id).await?;
    Ok(HttpResponse::Ok().json(response))
}
