// src/handlers/opportunities.rs

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
        extract::{AppJson, AppPath, AppQuery},
    },
    config::AppState,
    middleware::auth::AuthenticatedUser,
    models::{
        opportunity::{Opportunite, OpportunitePayload},
        ClientFilter, CreatedResponse, SuccessResponse,
    },
};

// GET /api/opportunites
#[utoipa::path(
    get,
    path = "/api/opportunites",
    tag = "Opportunités",
    params(ClientFilter),
    responses((status = 200, description = "Opportunités, les plus récentes d'abord", body = Vec<Opportunite>)),
    security(("api_jwt" = []))
)]
pub async fn list_opportunites(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    AppQuery(filter): AppQuery<ClientFilter>,
) -> Result<impl IntoResponse, AppError> {
    let rows = app_state.opportunity_service.list(&user, filter.client_id).await?;
    Ok(Json(rows))
}

// POST /api/opportunites
#[utoipa::path(
    post,
    path = "/api/opportunites",
    tag = "Opportunités",
    request_body = OpportunitePayload,
    responses(
        (status = 201, description = "Opportunité créée", body = CreatedResponse),
        (status = 400, description = "Données invalides"),
        (status = 404, description = "Client non trouvé")
    ),
    security(("api_jwt" = []))
)]
pub async fn create_opportunite(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    AppJson(payload): AppJson<OpportunitePayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let id = app_state.opportunity_service.create(&user, payload).await?;

    Ok((StatusCode::CREATED, Json(CreatedResponse::new(id))))
}

// PUT /api/opportunites/{id}
#[utoipa::path(
    put,
    path = "/api/opportunites/{id}",
    tag = "Opportunités",
    params(("id" = Uuid, Path, description = "ID de l'opportunité")),
    request_body = OpportunitePayload,
    responses(
        (status = 200, description = "Opportunité mise à jour", body = SuccessResponse),
        (status = 400, description = "Données invalides"),
        (status = 404, description = "Opportunité non trouvée")
    ),
    security(("api_jwt" = []))
)]
pub async fn update_opportunite(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    AppPath(id): AppPath<Uuid>,
    AppJson(payload): AppJson<OpportunitePayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    app_state.opportunity_service.update(&user, id, payload).await?;

    Ok(Json(SuccessResponse::ok()))
}

// DELETE /api/opportunites/{id}
#[utoipa::path(
    delete,
    path = "/api/opportunites/{id}",
    tag = "Opportunités",
    params(("id" = Uuid, Path, description = "ID de l'opportunité")),
    responses(
        (status = 200, description = "Opportunité supprimée", body = SuccessResponse),
        (status = 404, description = "Opportunité non trouvée")
    ),
    security(("api_jwt" = []))
)]
pub async fn delete_opportunite(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    AppPath(id): AppPath<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    app_state.opportunity_service.delete(&user, id).await?;
    Ok(Json(SuccessResponse::ok()))
}
