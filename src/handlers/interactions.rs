// src/handlers/interactions.rs

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
        interaction::{Interaction, InteractionPayload},
        ClientFilter, CreatedResponse, SuccessResponse,
    },
};

// GET /api/interactions
#[utoipa::path(
    get,
    path = "/api/interactions",
    tag = "Interactions",
    params(ClientFilter),
    responses((status = 200, description = "Historique, le plus récent d'abord", body = Vec<Interaction>)),
    security(("api_jwt" = []))
)]
pub async fn list_interactions(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    AppQuery(filter): AppQuery<ClientFilter>,
) -> Result<impl IntoResponse, AppError> {
    let rows = app_state.interaction_service.list(&user, filter.client_id).await?;
    Ok(Json(rows))
}

// POST /api/interactions
#[utoipa::path(
    post,
    path = "/api/interactions",
    tag = "Interactions",
    request_body = InteractionPayload,
    responses(
        (status = 201, description = "Interaction enregistrée", body = CreatedResponse),
        (status = 400, description = "Données invalides"),
        (status = 404, description = "Client non trouvé")
    ),
    security(("api_jwt" = []))
)]
pub async fn create_interaction(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    AppJson(payload): AppJson<InteractionPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let id = app_state.interaction_service.create(&user, &payload).await?;

    Ok((StatusCode::CREATED, Json(CreatedResponse::new(id))))
}

// DELETE /api/interactions/{id}
#[utoipa::path(
    delete,
    path = "/api/interactions/{id}",
    tag = "Interactions",
    params(("id" = Uuid, Path, description = "ID de l'interaction")),
    responses(
        (status = 200, description = "Interaction supprimée", body = SuccessResponse),
        (status = 404, description = "Interaction non trouvée")
    ),
    security(("api_jwt" = []))
)]
pub async fn delete_interaction(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    AppPath(id): AppPath<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    app_state.interaction_service.delete(&user, id).await?;
    Ok(Json(SuccessResponse::ok()))
}
