// src/common/error.rs

use axum::{
    extract::rejection::{JsonRejection, PathRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Erreur de validation")]
    ValidationError(#[from] validator::ValidationErrors),

    #[error("{0}")]
    BadRequest(String),

    #[error("Token manquant")]
    MissingToken,

    #[error("Identifiants incorrects")]
    InvalidCredentials,

    #[error("Token invalide")]
    InvalidToken,

    #[error("Accès refusé")]
    Forbidden,

    /// Carries the French entity label, e.g. "Client" or "Utilisateur".
    #[error("{0} non trouvé")]
    NotFound(&'static str),

    #[error("Ce nom d'utilisateur existe déjà")]
    UsernameAlreadyExists,

    #[error("Erreur de base de données: {0}")]
    DatabaseError(#[from] sqlx::Error),

    #[error("Erreur interne: {0}")]
    InternalServerError(#[from] anyhow::Error),

    #[error("Erreur bcrypt: {0}")]
    BcryptError(#[from] bcrypt::BcryptError),

    #[error("Erreur JWT: {0}")]
    JwtError(#[from] jsonwebtoken::errors::Error),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::ValidationError(_) | AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::MissingToken | AppError::InvalidCredentials => StatusCode::UNAUTHORIZED,
            AppError::InvalidToken | AppError::Forbidden => StatusCode::FORBIDDEN,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::UsernameAlreadyExists => StatusCode::CONFLICT,
            AppError::DatabaseError(_)
            | AppError::InternalServerError(_)
            | AppError::BcryptError(_)
            | AppError::JwtError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

// Extractor rejections keep the `{ "error": ... }` body of every other failure.

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        let message = match rejection {
            JsonRejection::MissingJsonContentType(_) => {
                "Corps JSON attendu (Content-Type: application/json)".to_string()
            }
            JsonRejection::JsonSyntaxError(_) => "JSON mal formé".to_string(),
            other => format!("Données invalides: {}", other.body_text()),
        };
        AppError::BadRequest(message)
    }
}

impl From<PathRejection> for AppError {
    fn from(rejection: PathRejection) -> Self {
        tracing::debug!("Chemin rejeté: {}", rejection.body_text());
        AppError::BadRequest("Identifiant invalide".to_string())
    }
}

impl From<QueryRejection> for AppError {
    fn from(rejection: QueryRejection) -> Self {
        AppError::BadRequest(format!("Paramètres invalides: {}", rejection.body_text()))
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();

        let body = match self {
            AppError::ValidationError(errors) => {
                let mut details = std::collections::HashMap::new();
                for (field, field_errors) in errors.field_errors() {
                    let messages: Vec<String> = field_errors
                        .iter()
                        .map(|e| {
                            e.message
                                .as_ref()
                                .map(|m| m.to_string())
                                .unwrap_or_else(|| e.code.to_string())
                        })
                        .collect();
                    details.insert(field.to_string(), messages);
                }
                json!({
                    "error": "Un ou plusieurs champs sont invalides.",
                    "details": details,
                })
            }

            // Database, hashing and signing failures only reach the logs.
            ref e if status == StatusCode::INTERNAL_SERVER_ERROR => {
                tracing::error!("Erreur serveur: {}", e);
                json!({ "error": "Erreur serveur" })
            }

            e => json!({ "error": e.to_string() }),
        };

        (status, Json(body)).into_response()
    }
}
