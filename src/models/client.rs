// src/models/client.rs

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::{
    common::{calendar::parse_date_time, error::AppError},
    models::rendez_vous::RdvStatut,
};

/// Whether the meeting embedded in a client record is remote or on site.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "rdv_mode", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum RdvMode {
    Visio,
    Presentiel,
}

#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
pub struct Client {
    pub id: Uuid,
    pub nom: String,
    pub prenom: Option<String>,
    pub email: Option<String>,
    pub telephone: Option<String>,
    pub entreprise: Option<String>,
    pub poste: Option<String>,

    // Address
    pub adresse: Option<String>,
    pub ville: Option<String>,
    pub code_postal: Option<String>,
    pub pays: String,

    // Person to reach on the client side
    pub prenom_contact: Option<String>,
    pub nom_contact: Option<String>,
    pub telephone_contact: Option<String>,
    pub email_contact: Option<String>,

    // Embedded appointment, mirrored into `rendez_vous`
    #[schema(value_type = Option<String>)]
    pub date_rdv: Option<NaiveDateTime>,
    pub type_rdv: Option<RdvMode>,
    pub statut_rdv: RdvStatut,
    pub notes_rdv: Option<String>,

    pub notes: Option<String>,
    pub user_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,

    /// Only present in list queries.
    #[sqlx(default)]
    pub created_by_username: Option<String>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct ClientPayload {
    #[serde(deserialize_with = "crate::models::trimmed")]
    #[validate(length(min = 1, message = "Le nom est obligatoire."))]
    pub nom: String,
    #[serde(default, deserialize_with = "crate::models::blank_as_none")]
    pub prenom: Option<String>,
    #[serde(default, deserialize_with = "crate::models::blank_as_none")]
    #[validate(email(message = "L'e-mail est invalide."))]
    pub email: Option<String>,
    #[serde(default, deserialize_with = "crate::models::blank_as_none")]
    pub telephone: Option<String>,
    #[serde(default, deserialize_with = "crate::models::blank_as_none")]
    pub entreprise: Option<String>,
    #[serde(default, deserialize_with = "crate::models::blank_as_none")]
    pub poste: Option<String>,
    #[serde(default, deserialize_with = "crate::models::blank_as_none")]
    pub adresse: Option<String>,
    #[serde(default, deserialize_with = "crate::models::blank_as_none")]
    pub ville: Option<String>,
    #[serde(default, deserialize_with = "crate::models::blank_as_none")]
    pub code_postal: Option<String>,
    #[serde(default, deserialize_with = "crate::models::blank_as_none")]
    pub pays: Option<String>,
    #[serde(default, deserialize_with = "crate::models::blank_as_none")]
    pub prenom_contact: Option<String>,
    #[serde(default, deserialize_with = "crate::models::blank_as_none")]
    pub nom_contact: Option<String>,
    #[serde(default, deserialize_with = "crate::models::blank_as_none")]
    pub telephone_contact: Option<String>,
    #[serde(default, deserialize_with = "crate::models::blank_as_none")]
    #[validate(email(message = "L'e-mail du contact est invalide."))]
    pub email_contact: Option<String>,
    /// Blank means "no appointment".
    #[serde(default, deserialize_with = "crate::models::blank_as_none")]
    #[schema(example = "2025-12-05T14:30")]
    pub date_rdv: Option<String>,
    pub type_rdv: Option<RdvMode>,
    pub statut_rdv: Option<RdvStatut>,
    #[serde(default, deserialize_with = "crate::models::blank_as_none")]
    pub notes_rdv: Option<String>,
    #[serde(default, deserialize_with = "crate::models::blank_as_none")]
    pub notes: Option<String>,
}

/// Client fields after parsing, as written to the database.
#[derive(Debug, Clone, PartialEq)]
pub struct ClientInput {
    pub nom: String,
    pub prenom: Option<String>,
    pub email: Option<String>,
    pub telephone: Option<String>,
    pub entreprise: Option<String>,
    pub poste: Option<String>,
    pub adresse: Option<String>,
    pub ville: Option<String>,
    pub code_postal: Option<String>,
    pub pays: String,
    pub prenom_contact: Option<String>,
    pub nom_contact: Option<String>,
    pub telephone_contact: Option<String>,
    pub email_contact: Option<String>,
    pub date_rdv: Option<NaiveDateTime>,
    pub type_rdv: Option<RdvMode>,
    pub statut_rdv: RdvStatut,
    /// What the payload asked for, before the `en_attente` default.
    pub requested_statut: Option<RdvStatut>,
    pub notes_rdv: Option<String>,
    pub notes: Option<String>,
}

/// The appointment a client record with a `date_rdv` stands for.
#[derive(Debug, Clone, PartialEq)]
pub struct LinkedRdv {
    pub titre: String,
    pub description: String,
    pub date_heure: NaiveDateTime,
    pub statut: RdvStatut,
}

impl TryFrom<ClientPayload> for ClientInput {
    type Error = AppError;

    fn try_from(payload: ClientPayload) -> Result<Self, Self::Error> {
        let date_rdv = match payload.date_rdv.as_deref() {
            None => None,
            Some(raw) => Some(parse_date_time(raw).ok_or_else(|| {
                AppError::BadRequest(format!("Date de rendez-vous invalide: {raw}"))
            })?),
        };

        Ok(Self {
            nom: payload.nom,
            prenom: payload.prenom,
            email: payload.email,
            telephone: payload.telephone,
            entreprise: payload.entreprise,
            poste: payload.poste,
            adresse: payload.adresse,
            ville: payload.ville,
            code_postal: payload.code_postal,
            pays: payload.pays.unwrap_or_else(|| "France".to_string()),
            prenom_contact: payload.prenom_contact,
            nom_contact: payload.nom_contact,
            telephone_contact: payload.telephone_contact,
            email_contact: payload.email_contact,
            date_rdv,
            type_rdv: payload.type_rdv,
            statut_rdv: payload.statut_rdv.unwrap_or(RdvStatut::EnAttente),
            requested_statut: payload.statut_rdv,
            notes_rdv: payload.notes_rdv,
            notes: payload.notes,
        })
    }
}

impl ClientInput {
    /// `None` when the record carries no appointment date.
    pub fn linked_rdv(&self) -> Option<LinkedRdv> {
        let date_heure = self.date_rdv?;
        let label = self.entreprise.as_deref().unwrap_or(&self.nom);

        Some(LinkedRdv {
            titre: format!("RDV - {label}"),
            description: self.notes_rdv.clone().unwrap_or_default(),
            date_heure,
            statut: self.requested_statut.unwrap_or(RdvStatut::Planifie),
        })
    }
}
