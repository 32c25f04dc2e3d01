// src/models/rendez_vous.rs

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

// --- ENUMS ---

/// Status shared by `rendez_vous.statut` and `clients.statut_rdv`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "rdv_statut", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum RdvStatut {
    EnAttente,
    Planifie,
    Confirme,
    EnAttenteDocuments,
    Valide,
    Annule,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "rdv_type", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum RdvType {
    Appel,
    #[default]
    Reunion,
    Presentation,
    Suivi,
    Autre,
}

// --- ROWS ---

#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
pub struct RendezVous {
    pub id: Uuid,
    pub client_id: Uuid,
    pub titre: String,
    pub description: Option<String>,
    #[schema(value_type = String, example = "2025-12-05T14:30:00")]
    pub date_heure: NaiveDateTime,
    pub duree: i32,
    pub lieu: Option<String>,
    #[sqlx(rename = "type")]
    #[serde(rename = "type")]
    pub kind: RdvType,
    pub statut: RdvStatut,
    pub user_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
}

/// List row: the appointment plus the client and creator columns the
/// calendar displays.
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
pub struct RendezVousDetail {
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub rdv: RendezVous,
    pub client_nom: Option<String>,
    pub client_prenom: Option<String>,
    pub entreprise: Option<String>,
    pub email: Option<String>,
    pub telephone: Option<String>,
    pub ville: Option<String>,
    pub code_postal: Option<String>,
    pub created_by_username: Option<String>,
    /// Filled by the service from the caller's role.
    #[sqlx(default)]
    pub is_mine: bool,
}

// --- PAYLOADS ---

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct RendezVousPayload {
    pub client_id: Uuid,
    #[serde(deserialize_with = "crate::models::trimmed")]
    #[validate(length(min = 1, message = "Le titre est obligatoire."))]
    pub titre: String,
    #[serde(default, deserialize_with = "crate::models::blank_as_none")]
    pub description: Option<String>,
    #[schema(example = "2025-12-05T14:30")]
    pub date_heure: String,
    #[validate(range(min = 1, max = 1440, message = "La durée doit être comprise entre 1 et 1440 minutes."))]
    pub duree: Option<i32>,
    #[serde(default, deserialize_with = "crate::models::blank_as_none")]
    pub lieu: Option<String>,
    #[serde(rename = "type")]
    pub kind: Option<RdvType>,
    pub statut: Option<RdvStatut>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct StatutPayload {
    pub statut: RdvStatut,
}

/// Validated appointment fields, ready for the repository.
#[derive(Debug, Clone, PartialEq)]
pub struct RendezVousInput {
    pub client_id: Uuid,
    pub titre: String,
    pub description: Option<String>,
    pub date_heure: NaiveDateTime,
    pub duree: i32,
    pub lieu: Option<String>,
    pub kind: RdvType,
    pub statut: RdvStatut,
}

impl RendezVousPayload {
    pub fn into_input(self) -> Option<RendezVousInput> {
        let date_heure = crate::common::calendar::parse_date_time(&self.date_heure)?;
        Some(RendezVousInput {
            client_id: self.client_id,
            titre: self.titre,
            description: self.description,
            date_heure,
            duree: self.duree.unwrap_or(60),
            lieu: self.lieu,
            kind: self.kind.unwrap_or_default(),
            statut: self.statut.unwrap_or(RdvStatut::Planifie),
        })
    }
}

// --- QUERIES ---

#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct RendezVousQuery {
    /// `today`, `week` or `month`; anything else lists everything.
    pub filter: Option<String>,
}

#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct CalendarQuery {
    /// Any day of the wanted week (`YYYY-MM-DD`); defaults to today.
    #[param(value_type = Option<String>, example = "2025-12-01")]
    pub week_start: Option<NaiveDate>,
}

// --- CALENDAR VIEW ---

#[derive(Debug, Serialize, ToSchema)]
pub struct CalendarDay {
    #[schema(value_type = String, example = "2025-12-01")]
    pub date: NaiveDate,
    pub rendez_vous: Vec<RendezVousDetail>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CalendarWeek {
    #[schema(value_type = String)]
    pub week_start: NaiveDate,
    #[schema(value_type = String)]
    pub week_end: NaiveDate,
    #[schema(value_type = String)]
    pub previous_week: NaiveDate,
    #[schema(value_type = String)]
    pub next_week: NaiveDate,
    pub days: Vec<CalendarDay>,
}
