// src/models/interaction.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "interaction_type", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum InteractionType {
    Email,
    Appel,
    Reunion,
    #[default]
    Note,
}

#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
pub struct Interaction {
    pub id: Uuid,
    pub client_id: Uuid,
    #[sqlx(rename = "type")]
    #[serde(rename = "type")]
    pub kind: InteractionType,
    pub contenu: String,
    pub date_interaction: DateTime<Utc>,
    pub user_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,

    #[sqlx(default)]
    pub client_nom: Option<String>,
    #[sqlx(default)]
    pub created_by_username: Option<String>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct InteractionPayload {
    pub client_id: Uuid,
    #[serde(rename = "type", default)]
    pub kind: InteractionType,
    #[serde(deserialize_with = "crate::models::trimmed")]
    #[validate(length(min = 1, message = "Le contenu est obligatoire."))]
    pub contenu: String,
    /// Defaults to now.
    pub date_interaction: Option<DateTime<Utc>>,
}
