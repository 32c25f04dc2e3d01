// src/handlers/rendez_vous.rs

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
        calendar::RangeFilter,
        error::AppError,
        extract::{AppJson, AppPath, AppQuery},
    },
    config::AppState,
    middleware::auth::AuthenticatedUser,
    models::{
        rendez_vous::{
            CalendarQuery, CalendarWeek, RendezVousDetail, RendezVousPayload, RendezVousQuery, StatutPayload,
        },
        CreatedResponse, SuccessResponse,
    },
};

// GET /api/rendez-vous
#[utoipa::path(
    get,
    path = "/api/rendez-vous",
    tag = "Rendez-vous",
    params(RendezVousQuery),
    responses(
        (status = 200, description = "Rendez-vous triés par date, avec `is_mine`", body = Vec<RendezVousDetail>)
    ),
    security(("api_jwt" = []))
)]
pub async fn list_rendez_vous(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    AppQuery(query): AppQuery<RendezVousQuery>,
) -> Result<impl IntoResponse, AppError> {
    let filter = query.filter.as_deref().and_then(RangeFilter::parse);

    let rdvs = app_state.rendez_vous_service.list(&user, filter).await?;
    Ok(Json(rdvs))
}

// GET /api/rendez-vous/calendar
#[utoipa::path(
    get,
    path = "/api/rendez-vous/calendar",
    tag = "Rendez-vous",
    params(CalendarQuery),
    responses(
        (status = 200, description = "Semaine du lundi au dimanche", body = CalendarWeek),
        (status = 400, description = "Date invalide")
    ),
    security(("api_jwt" = []))
)]
pub async fn get_calendar(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    AppQuery(query): AppQuery<CalendarQuery>,
) -> Result<impl IntoResponse, AppError> {
    let week = app_state
        .rendez_vous_service
        .calendar(&user, query.week_start)
        .await?;
    Ok(Json(week))
}

// POST /api/rendez-vous
#[utoipa::path(
    post,
    path = "/api/rendez-vous",
    tag = "Rendez-vous",
    request_body = RendezVousPayload,
    responses(
        (status = 201, description = "Rendez-vous créé", body = CreatedResponse),
        (status = 400, description = "Données invalides"),
        (status = 404, description = "Client non trouvé")
    ),
    security(("api_jwt" = []))
)]
pub async fn create_rendez_vous(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    AppJson(payload): AppJson<RendezVousPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let id = app_state.rendez_vous_service.create(&user, payload).await?;

    Ok((StatusCode::CREATED, Json(CreatedResponse::new(id))))
}

// PUT /api/rendez-vous/{id}
#[utoipa::path(
    put,
    path = "/api/rendez-vous/{id}",
    tag = "Rendez-vous",
    params(("id" = Uuid, Path, description = "ID du rendez-vous")),
    request_body = RendezVousPayload,
    responses(
        (status = 200, description = "Rendez-vous mis à jour", body = SuccessResponse),
        (status = 403, description = "Rendez-vous d'un autre utilisateur"),
        (status = 404, description = "Rendez-vous non trouvé")
    ),
    security(("api_jwt" = []))
)]
pub async fn update_rendez_vous(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    AppPath(id): AppPath<Uuid>,
    AppJson(payload): AppJson<RendezVousPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    app_state.rendez_vous_service.update(&user, id, payload).await?;

    Ok(Json(SuccessResponse::ok()))
}

// PATCH /api/rendez-vous/{id}/statut
#[utoipa::path(
    patch,
    path = "/api/rendez-vous/{id}/statut",
    tag = "Rendez-vous",
    params(("id" = Uuid, Path, description = "ID du rendez-vous")),
    request_body = StatutPayload,
    responses(
        (status = 200, description = "Statut mis à jour", body = SuccessResponse),
        (status = 403, description = "Rendez-vous d'un autre utilisateur"),
        (status = 404, description = "Rendez-vous non trouvé")
    ),
    security(("api_jwt" = []))
)]
pub async fn update_statut(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    AppPath(id): AppPath<Uuid>,
    AppJson(payload): AppJson<StatutPayload>,
) -> Result<impl IntoResponse, AppError> {
    app_state
        .rendez_vous_service
        .update_statut(&user, id, payload.statut)
        .await?;

    Ok(Json(SuccessResponse::ok()))
}

// DELETE /api/rendez-vous/{id}
#[utoipa::path(
    delete,
    path = "/api/rendez-vous/{id}",
    tag = "Rendez-vous",
    params(("id" = Uuid, Path, description = "ID du rendez-vous")),
    responses(
        (status = 200, description = "Rendez-vous supprimé", body = SuccessResponse),
        (status = 403, description = "Rendez-vous d'un autre utilisateur"),
        (status = 404, description = "Rendez-vous non trouvé")
    ),
    security(("api_jwt" = []))
)]
pub async fn delete_rendez_vous(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    AppPath(id): AppPath<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    app_state.rendez_vous_service.delete(&user, id).await?;
    Ok(Json(SuccessResponse::ok()))
}
