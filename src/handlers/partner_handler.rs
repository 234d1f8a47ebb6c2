use actix_web::{delete, get, post, put, web, HttpResponse};

use crate::{
    app_state::AppState,
    auth::{require_admin, AuthenticatedUser},
    errors::AppError,
    models::dto::request::{CreatePartnerRequest, UpdatePartnerRequest},
};

#[get("/partners")]
pub async fn list_partners(state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    let partners = state.partner_service.list().await?;
    Ok(HttpResponse::Ok().json(partners))
}

#[get("/partners/{id}")]
pub async fn get_partner(
    state: web::Data<AppState>,
    id: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let partner = state.partner_service.get(&id).await?;
    Ok(HttpResponse::Ok().json(partner))
}

#[post("/partners")]
pub async fn create_partner(
    state: web::Data<AppState>,
    request: web::Json<CreatePartnerRequest>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    require_admin(&auth.0)?;

    let partner = state.partner_service.create(request.into_inner()).await?;
    Ok(HttpResponse::Created().json(partner))
}

#[put("/partners/{id}")]
pub async fn update_partner(
    state: web::Data<AppState>,
    id: web::Path<String>,
    request: web::Json<UpdatePartnerRequest>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    require_admin(&auth.0)?;

    let partner = state
        .partner_service
        .update(&id, request.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(partner))
}

#[delete("/partners/{id}")]
pub async fn delete_partner(
    state: web::Data<AppState>,
    id: web::Path<String>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    require_admin(&auth.0)?;

    let response = state.partner_service.delete(&id).await?;
    Ok(HttpResponse::Ok().json(response))
}
