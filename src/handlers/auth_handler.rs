use actix_web::{post, web, HttpResponse};
use chrono::{Duration, Utc};

use crate::{
    app_state::AppState,
    errors::AppError,
    models::{
        domain::{refresh_token::hash_token, RefreshToken, User},
        dto::{
            request::{LoginRequest, RefreshTokenRequest, RegisterRequest},
            response::{AuthResponse, RefreshTokenResponse},
        },
    },
};

async fn issue_tokens(state: &AppState, user: &User) -> Result<(String, String), AppError> {
    let token = state.jwt_service.create_token(user)?;
    let refresh_token = state.jwt_service.create_refresh_token(&user.username)?;

    // Only the hash is persisted; the raw token never touches the database
    let expires_at =
        Utc::now() + Duration::hours(state.jwt_service.refresh_expiration_hours());
    state
        .refresh_token_repository
        .create(RefreshToken::new(
            user.username.clone(),
            hash_token(&refresh_token),
            expires_at,
        ))
        .await?;

    Ok((token, refresh_token))
}

#[post("/auth/register")]
pub async fn register(
    state: web::Data<AppState>,
    request: web::Json<RegisterRequest>,
) -> Result<HttpResponse, AppError> {
    let user = state.user_service.register(request.into_inner()).await?;
    let (token, refresh_token) = issue_tokens(&state, &user).await?;

    Ok(HttpResponse::Created().json(AuthResponse {
        token,
        refresh_token,
        user: user.into(),
    }))
}

#[post("/auth/login")]
pub async fn login(
    state: web::Data<AppState>,
    request: web::Json<LoginRequest>,
) -> Result<HttpResponse, AppError> {
    let user = state
        .user_service
        .authenticate(&request.username, &request.password)
        .await?;
    let (token, refresh_token) = issue_tokens(&state, &user).await?;

    log::info!("User {} logged in", user.username);

    Ok(HttpResponse::Ok().json(AuthResponse {
        token,
        refresh_token,
        user: user.into(),
    }))
}

#[post("/auth/refresh")]
pub async fn refresh(
    state: web::Data<AppState>,
    request: web::Json<RefreshTokenRequest>,
) -> Result<HttpResponse, AppError> {
    let claims = state
        .jwt_service
        .validate_refresh_token(&request.refresh_token)?;

    let token_hash = hash_token(&request.refresh_token);
    let stored = state
        .refresh_token_repository
        .find_by_hash(&token_hash)
        .await?
        .ok_or_else(|| AppError::Unauthorized("Refresh token not recognized".to_string()))?;

    if !stored.is_valid() {
        return Err(AppError::Unauthorized(
            "Refresh token has been revoked or expired".to_string(),
        ));
    }

    let user = state
        .user_service
        .get_user_record(&claims.sub)
        .await
        .map_err(|_| {
            AppError::Unauthorized("User associated with refresh token not found".to_string())
        })?;

    // Rotate: the presented token is single-use
    state
        .refresh_token_repository
        .revoke_by_hash(&token_hash)
        .await?;

    let (token, refresh_token) = issue_tokens(&state, &user).await?;

    log::info!("Token refreshed for user {}", user.username);

    Ok(HttpResponse::Ok().json(RefreshTokenResponse {
        token,
        refresh_token,
    }))
}

#[post("/auth/logout")]
pub async fn logout(
    state: web::Data<AppState>,
    request: web::Json<RefreshTokenRequest>,
) -> Result<HttpResponse, AppError> {
    state
        .refresh_token_repository
        .revoke_by_hash(&hash_token(&request.refresh_token))
        .await?;

    Ok(HttpResponse::Ok().json(serde_json::json!({ "message": "Logged out" })))
}
