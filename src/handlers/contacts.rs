// src/handlers/contacts.rs

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
        contact::{Contact, ContactPayload},
        ClientFilter, CreatedResponse, SuccessResponse,
    },
};

// GET /api/contacts
#[utoipa::path(
    get,
    path = "/api/contacts",
    tag = "Contacts",
    params(ClientFilter),
    responses((status = 200, description = "Contacts, principal en premier", body = Vec<Contact>)),
    security(("api_jwt" = []))
)]
pub async fn list_contacts(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    AppQuery(filter): AppQuery<ClientFilter>,
) -> Result<impl IntoResponse, AppError> {
    let rows = app_state.contact_service.list(&user, filter.client_id).await?;
    Ok(Json(rows))
}

// POST /api/contacts
#[utoipa::path(
    post,
    path = "/api/contacts",
    tag = "Contacts",
    request_body = ContactPayload,
    responses(
        (status = 201, description = "Contact créé", body = CreatedResponse),
        (status = 400, description = "Données invalides"),
        (status = 404, description = "Client non trouvé")
    ),
    security(("api_jwt" = []))
)]
pub async fn create_contact(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    AppJson(payload): AppJson<ContactPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let id = app_state.contact_service.create(&user, &payload).await?;

    Ok((StatusCode::CREATED, Json(CreatedResponse::new(id))))
}

// PUT /api/contacts/{id}
#[utoipa::path(
    put,
    path = "/api/contacts/{id}",
    tag = "Contacts",
    params(("id" = Uuid, Path, description = "ID du contact")),
    request_body = ContactPayload,
    responses(
        (status = 200, description = "Contact mis à jour", body = SuccessResponse),
        (status = 400, description = "Données invalides"),
        (status = 404, description = "Contact non trouvé")
    ),
    security(("api_jwt" = []))
)]
pub async fn update_contact(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    AppPath(id): AppPath<Uuid>,
    AppJson(payload): AppJson<ContactPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    app_state.contact_service.update(&user, id, &payload).await?;

    Ok(Json(SuccessResponse::ok()))
}

// DELETE /api/contacts/{id}
#[utoipa::path(
    delete,
    path = "/api/contacts/{id}",
    tag = "Contacts",
    params(("id" = Uuid, Path, description = "ID du contact")),
    responses(
        (status = 200, description = "Contact supprimé", body = SuccessResponse),
        (status = 404, description = "Contact non trouvé")
    ),
    security(("api_jwt" = []))
)]
pub async fn delete_contact(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    AppPath(id): AppPath<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    app_state.contact_service.delete(&user, id).await?;
    Ok(Json(SuccessResponse::ok()))
}
