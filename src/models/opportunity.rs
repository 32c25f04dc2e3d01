// src/models/opportunity.rs

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

// Maps the `opportunite_etape` enum type of the database
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "opportunite_etape", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Etape {
    #[default]
    Prospection,
    Qualification,
    Proposition,
    Negotiation,
    Gagne,
    Perdu,
}

impl Etape {
    pub fn is_closed(self) -> bool {
        matches!(self, Etape::Gagne | Etape::Perdu)
    }
}

#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
pub struct Opportunite {
    pub id: Uuid,
    pub client_id: Uuid,
    pub titre: String,
    pub description: Option<String>,
    #[schema(value_type = f64, example = 12500.0)]
    pub montant: Decimal,
    pub etape: Etape,
    pub probabilite: i32,
    #[schema(value_type = Option<String>)]
    pub date_cloture_estimee: Option<NaiveDate>,
    #[schema(value_type = Option<String>)]
    pub date_cloture_reelle: Option<NaiveDate>,
    pub user_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,

    // Joined from `clients` in list queries
    #[sqlx(default)]
    pub client_nom: Option<String>,
    #[sqlx(default)]
    pub client_entreprise: Option<String>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct OpportunitePayload {
    pub client_id: Uuid,
    #[serde(deserialize_with = "crate::models::trimmed")]
    #[validate(length(min = 1, message = "Le titre est obligatoire."))]
    pub titre: String,
    #[serde(default, deserialize_with = "crate::models::blank_as_none")]
    pub description: Option<String>,
    #[schema(value_type = Option<f64>)]
    pub montant: Option<Decimal>,
    pub etape: Option<Etape>,
    #[validate(range(min = 0, max = 100, message = "La probabilité doit être comprise entre 0 et 100."))]
    pub probabilite: Option<i32>,
    #[schema(value_type = Option<String>, example = "2026-01-31")]
    pub date_cloture_estimee: Option<NaiveDate>,
    #[schema(value_type = Option<String>)]
    pub date_cloture_reelle: Option<NaiveDate>,
}
