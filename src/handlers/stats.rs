// src/handlers/stats.rs

use axum::{extract::State, response::IntoResponse, Json};

use crate::{
    common::error::AppError, config::AppState, middleware::auth::AuthenticatedUser, models::stats::Stats,
};

// GET /api/stats
#[utoipa::path(
    get,
    path = "/api/stats",
    tag = "Stats",
    responses(
        (status = 200, description = "Indicateurs du tableau de bord", body = Stats),
        (status = 401, description = "Token manquant")
    ),
    security(("api_jwt" = []))
)]
pub async fn get_stats(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
) -> Result<impl IntoResponse, AppError> {
    let stats = app_state.stats_service.get_stats(&user).await?;
    Ok(Json(stats))
}
