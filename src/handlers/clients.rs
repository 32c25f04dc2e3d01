// src/handlers/clients.rs

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
    middleware::auth::AuthenticatedUser,
    models::{
        client::{Client, ClientInput, ClientPayload},
        CreatedResponse, SuccessResponse,
    },
};

// GET /api/clients
#[utoipa::path(
    get,
    path = "/api/clients",
    tag = "Clients",
    responses(
        (status = 200, description = "Clients visibles par l'appelant", body = Vec<Client>),
        (status = 401, description = "Token manquant")
    ),
    security(("api_jwt" = []))
)]
pub async fn list_clients(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
) -> Result<impl IntoResponse, AppError> {
    let clients = app_state.client_service.list_clients(&user).await?;
    Ok(Json(clients))
}

// GET /api/clients/{id}
#[utoipa::path(
    get,
    path = "/api/clients/{id}",
    tag = "Clients",
    params(("id" = Uuid, Path, description = "ID du client")),
    responses(
        (status = 200, description = "Fiche client", body = Client),
        (status = 404, description = "Client non trouvé")
    ),
    security(("api_jwt" = []))
)]
pub async fn get_client(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    AppPath(id): AppPath<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let client = app_state.client_service.get_client(&user, id).await?;
    Ok(Json(client))
}

// POST /api/clients
#[utoipa::path(
    post,
    path = "/api/clients",
    tag = "Clients",
    request_body = ClientPayload,
    responses(
        (status = 201, description = "Client créé (et son rendez-vous si une date est fournie)", body = CreatedResponse),
        (status = 400, description = "Données invalides")
    ),
    security(("api_jwt" = []))
)]
pub async fn create_client(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    AppJson(payload): AppJson<ClientPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;
    let input = ClientInput::try_from(payload)?;

    let id = app_state.client_service.create_client(&user, &input).await?;

    Ok((StatusCode::CREATED, Json(CreatedResponse::new(id))))
}

// PUT /api/clients/{id}
#[utoipa::path(
    put,
    path = "/api/clients/{id}",
    tag = "Clients",
    params(("id" = Uuid, Path, description = "ID du client")),
    request_body = ClientPayload,
    responses(
        (status = 200, description = "Client mis à jour", body = SuccessResponse),
        (status = 400, description = "Données invalides"),
        (status = 404, description = "Client non trouvé")
    ),
    security(("api_jwt" = []))
)]
pub async fn update_client(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    AppPath(id): AppPath<Uuid>,
    AppJson(payload): AppJson<ClientPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;
    let input = ClientInput::try_from(payload)?;

    app_state.client_service.update_client(&user, id, &input).await?;

    Ok(Json(SuccessResponse::ok()))
}

// DELETE /api/clients/{id}
#[utoipa::path(
    delete,
    path = "/api/clients/{id}",
    tag = "Clients",
    params(("id" = Uuid, Path, description = "ID du client")),
    responses(
        (status = 200, description = "Client et données liées supprimés", body = SuccessResponse),
        (status = 404, description = "Client non trouvé")
    ),
    security(("api_jwt" = []))
)]
pub async fn delete_client(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    AppPath(id): AppPath<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    app_state.client_service.delete_client(&user, id).await?;
    Ok(Json(SuccessResponse::ok()))
}
