use actix_web::{get, post, web, HttpResponse};

use crate::{
    app_state::AppState,
    auth::{require_admin, AuthenticatedUser},
    errors::AppError,
    models::dto::request::{ContactRequest, PaginationParams},
};

#[post("/contact")]
pub async fn submit_contact(
    state: web::Data<AppState>,
    request: web::Json<ContactRequest>,
) -> Result<HttpResponse, AppError> {
    let message = state.contact_service.submit(request.into_inner()).await?;
    Ok(HttpResponse::Created().json(message))
}

#[get("/contact")]
pub async fn list_contact_messages(
    state: web::Data<AppState>,
    query: web::Query<PaginationParams>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    require_admin(&auth.0)?;

    let response = state
        .contact_service
        .list(query.offset(), query.limit())
        .await?;
    Ok(HttpResponse::Ok().json(response))
}

#[post("/contact/{id}/read")]
pub async fn mark_contact_read(
    state: web::Data<AppState>,
    id: web::Path<String>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    require_admin(&auth.0)?;

    let message = state.contact_service.mark_read(&id).await?;
    Ok(HttpResponse::Ok().json(message))
}
