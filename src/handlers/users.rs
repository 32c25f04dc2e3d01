// src/handlers/users.rs

use axum::{
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use uuid::Uuid;
use validator::Validate;

use crate::{
    common::{
        error::AppError,
        extract::{AppJson, AppPath},
    },
    config::AppState,
    middleware::{
        auth::AuthenticatedUser,
        rbac::{AdminOnly, RequireRole},
    },
    models::{
        auth::{CreateUserPayload, ToggleResponse, UserSummary},
        CreatedResponse, SuccessResponse,
    },
};

// GET /api/users
#[utoipa::path(
    get,
    path = "/api/users",
    tag = "Users",
    responses(
        (status = 200, description = "Liste des utilisateurs", body = Vec<UserSummary>),
        (status = 401, description = "Token manquant")
    ),
    security(("api_jwt" = []))
)]
pub async fn list_users(
    State(app_state): State<AppState>,
    _user: AuthenticatedUser,
) -> Result<impl IntoResponse, AppError> {
    let users = app_state.user_service.list_users().await?;
    Ok(Json(users))
}

// POST /api/users
#[utoipa::path(
    post,
    path = "/api/users",
    tag = "Users",
    request_body = CreateUserPayload,
    responses(
        (status = 201, description = "Utilisateur créé", body = CreatedResponse),
        (status = 400, description = "Données invalides"),
        (status = 403, description = "Réservé aux administrateurs"),
        (status = 409, description = "Nom d'utilisateur déjà pris")
    ),
    security(("api_jwt" = []))
)]
pub async fn create_user(
    State(app_state): State<AppState>,
    _guard: RequireRole<AdminOnly>,
    AppJson(payload): AppJson<CreateUserPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let id = app_state.user_service.create_user(&payload).await?;

    Ok((StatusCode::CREATED, Json(CreatedResponse::new(id))))
}

// PATCH /api/users/{id}/toggle
#[utoipa::path(
    patch,
    path = "/api/users/{id}/toggle",
    tag = "Users",
    params(("id" = Uuid, Path, description = "ID de l'utilisateur")),
    responses(
        (status = 200, description = "Nouvel état du compte", body = ToggleResponse),
        (status = 400, description = "Compte de l'appelant"),
        (status = 403, description = "Réservé aux administrateurs"),
        (status = 404, description = "Utilisateur non trouvé")
    ),
    security(("api_jwt" = []))
)]
pub async fn toggle_user(
    State(app_state): State<AppState>,
    AuthenticatedUser(actor): AuthenticatedUser,
    _guard: RequireRole<AdminOnly>,
    AppPath(id): AppPath<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let is_active = app_state.user_service.toggle_active(&actor, id).await?;

    Ok(Json(ToggleResponse {
        success: true,
        is_active: i32::from(is_active),
    }))
}

// DELETE /api/users/{id}
#[utoipa::path(
    delete,
    path = "/api/users/{id}",
    tag = "Users",
    params(("id" = Uuid, Path, description = "ID de l'utilisateur")),
    responses(
        (status = 200, description = "Utilisateur supprimé", body = SuccessResponse),
        (status = 403, description = "Réservé aux administrateurs"),
        (status = 404, description = "Utilisateur non trouvé")
    ),
    security(("api_jwt" = []))
)]
pub async fn delete_user(
    State(app_state): State<AppState>,
    AuthenticatedUser(actor): AuthenticatedUser,
    _guard: RequireRole<AdminOnly>,
    AppPath(id): AppPath<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    app_state.user_service.delete_user(&actor, id).await?;
    Ok(Json(SuccessResponse::ok()))
}
