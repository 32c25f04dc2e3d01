// src/handlers/auth.rs

use axum::{extract::State, response::IntoResponse, Json};
use validator::Validate;

use crate::{
    common::{error::AppError, extract::AppJson},
    config::AppState,
    middleware::auth::AuthenticatedUser,
    models::auth::{LoginPayload, LoginResponse, VerifyResponse},
};

// POST /api/auth/login
#[utoipa::path(
    post,
    path = "/api/auth/login",
    tag = "Auth",
    request_body = LoginPayload,
    responses(
        (status = 200, description = "Connexion réussie", body = LoginResponse),
        (status = 400, description = "Champs manquants"),
        (status = 401, description = "Identifiants incorrects")
    )
)]
pub async fn login(
    State(app_state): State<AppState>,
    AppJson(payload): AppJson<LoginPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let response = app_state
        .auth_service
        .login_user(payload.username.trim(), &payload.password)
        .await?;

    Ok(Json(response))
}

// GET /api/auth/verify
#[utoipa::path(
    get,
    path = "/api/auth/verify",
    tag = "Auth",
    responses(
        (status = 200, description = "Token valide", body = VerifyResponse),
        (status = 401, description = "Token manquant"),
        (status = 403, description = "Token invalide")
    ),
    security(
        ("api_jwt" = [])
    )
)]
pub async fn verify(AuthenticatedUser(user): AuthenticatedUser) -> Json<VerifyResponse> {
    Json(VerifyResponse { valid: true, user })
}
