use actix_web::{get, web, HttpResponse};

use crate::{app_state::AppState, auth::AuthenticatedUser, errors::AppError};

#[get("/dashboard")]
pub async fn get_dashboard(
    state: web::Data<AppState>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let dashboard = state.dashboard_service.for_user(&auth.0.sub).await?;
    Ok(HttpResponse::Ok().json(dashboard))
}
