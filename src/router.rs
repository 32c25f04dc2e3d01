// src/router.rs

use std::any::Any as PanicPayload;

use axum::{
    http::HeaderValue,
    middleware as axum_middleware,
    response::{IntoResponse, Response},
    routing::{delete, get, patch, post, put},
    Router,
};
use tower_http::{
    catch_panic::CatchPanicLayer,
    cors::{Any, CorsLayer},
    services::{ServeDir, ServeFile},
    trace::TraceLayer,
};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::{common::error::AppError, config::AppState, docs::ApiDoc, handlers, middleware::auth::auth_guard};

pub fn build_router(app_state: AppState) -> Router {
    // Everything below requires a bearer token
    let protected_routes = Router::new()
        .route("/auth/verify", get(handlers::auth::verify))
        .route(
            "/users",
            get(handlers::users::list_users)
                .post(handlers::users::create_user),
        )
        .route("/users/{id}", delete(handlers::users::delete_user))
        .route("/users/{id}/toggle", patch(handlers::users::toggle_user))
        .route(
            "/clients",
            get(handlers::clients::list_clients)
                .post(handlers::clients::create_client),
        )
        .route(
            "/clients/{id}",
            get(handlers::clients::get_client)
                .put(handlers::clients::update_client)
                .delete(handlers::clients::delete_client),
        )
        .route(
            "/rendez-vous",
            get(handlers::rendez_vous::list_rendez_vous)
                .post(handlers::rendez_vous::create_rendez_vous),
        )
        .route("/rendez-vous/calendar", get(handlers::rendez_vous::get_calendar))
        .route(
            "/rendez-vous/{id}",
            put(handlers::rendez_vous::update_rendez_vous)
                .delete(handlers::rendez_vous::delete_rendez_vous),
        )
        .route("/rendez-vous/{id}/statut", patch(handlers::rendez_vous::update_statut))
        .route(
            "/opportunites",
            get(handlers::opportunities::list_opportunites)
                .post(handlers::opportunities::create_opportunite),
        )
        .route(
            "/opportunites/{id}",
            put(handlers::opportunities::update_opportunite)
                .delete(handlers::opportunities::delete_opportunite),
        )
        .route(
            "/interactions",
            get(handlers::interactions::list_interactions)
                .post(handlers::interactions::create_interaction),
        )
        .route(
            "/interactions/{id}",
            delete(handlers::interactions::delete_interaction),
        )
        .route(
            "/contacts",
            get(handlers::contacts::list_contacts)
                .post(handlers::contacts::create_contact),
        )
        .route(
            "/contacts/{id}",
            put(handlers::contacts::update_contact)
                .delete(handlers::contacts::delete_contact),
        )
        .route("/stats", get(handlers::stats::get_stats))
        .route_layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            auth_guard,
        ));

    let api_routes = Router::new()
        .route("/health", get(health))
        .route("/auth/login", post(handlers::auth::login))
        .merge(protected_routes);

    let cors = cors_layer(app_state.config.cors_origins.as_deref());
    let static_dir = app_state.config.static_dir.clone();

    let mut app = Router::new()
        .nest("/api", api_routes)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .with_state(app_state);

    // Single-page front-end: unknown paths fall back to index.html
    if let Some(dir) = static_dir {
        let index = dir.join("index.html");
        app = app.fallback_service(ServeDir::new(dir).fallback(ServeFile::new(index)));
    }

    app.layer(CatchPanicLayer::custom(panic_response))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}

// A panicking handler still answers with the usual JSON 500.
fn panic_response(payload: Box<dyn PanicPayload + Send + 'static>) -> Response {
    let detail = payload
        .downcast_ref::<&str>()
        .map(|s| s.to_string())
        .or_else(|| payload.downcast_ref::<String>().cloned())
        .unwrap_or_else(|| "panique sans message".to_string());

    AppError::InternalServerError(anyhow::anyhow!("Panique dans un handler: {detail}")).into_response()
}

async fn health() -> axum::Json<serde_json::Value> {
    axum::Json(serde_json::json!({ "status": "OK" }))
}

fn cors_layer(origins: Option<&[String]>) -> CorsLayer {
    match origins {
        None => CorsLayer::permissive(),
        Some(origins) => {
            let allowed: Vec<HeaderValue> = origins
                .iter()
                .filter_map(|origin| HeaderValue::from_str(origin).ok())
                .collect();
            CorsLayer::new()
                .allow_origin(allowed)
                .allow_methods(Any)
                .allow_headers(Any)
        }
    }
}
