// src/models/contact.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
pub struct Contact {
    pub id: Uuid,
    pub client_id: Uuid,
    pub nom: String,
    pub prenom: String,
    pub email: Option<String>,
    pub telephone: Option<String>,
    pub poste: Option<String>,
    pub est_principal: bool,
    pub created_at: DateTime<Utc>,

    #[sqlx(default)]
    pub client_entreprise: Option<String>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct ContactPayload {
    pub client_id: Uuid,
    #[serde(deserialize_with = "crate::models::trimmed")]
    #[validate(length(min = 1, message = "Le nom est obligatoire."))]
    pub nom: String,
    #[serde(deserialize_with = "crate::models::trimmed")]
    #[validate(length(min = 1, message = "Le prénom est obligatoire."))]
    pub prenom: String,
    #[serde(default, deserialize_with = "crate::models::blank_as_none")]
    #[validate(email(message = "L'e-mail est invalide."))]
    pub email: Option<String>,
    #[serde(default, deserialize_with = "crate::models::blank_as_none")]
    pub telephone: Option<String>,
    #[serde(default, deserialize_with = "crate::models::blank_as_none")]
    pub poste: Option<String>,
    #[serde(default)]
    pub est_principal: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn principal_defaults_to_false() {
        let payload: ContactPayload = serde_json::from_value(json!({
            "client_id": Uuid::nil(),
            "nom": "Petit",
            "prenom": "Jeanne",
            "email": ""
        }))
        .unwrap();
        assert!(!payload.est_principal);
        assert!(payload.validate().is_ok());
    }

    #[test]
    fn invalid_email_is_rejected() {
        let payload: ContactPayload = serde_json::from_value(json!({
            "client_id": Uuid::nil(),
            "nom": "Petit",
            "prenom": "",
            "email": "pas-un-email"
        }))
        .unwrap();
        let errors = payload.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("email"));
        assert!(errors.field_errors().contains_key("prenom"));
    }

    #[test]
    fn whitespace_names_are_rejected() {
        let payload: ContactPayload = serde_json::from_value(json!({
            "client_id": Uuid::nil(),
            "nom": "  ",
            "prenom": "\n"
        }))
        .unwrap();
        let errors = payload.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("nom"));
        assert!(errors.field_errors().contains_key("prenom"));
    }
}
