pub mod auth;
pub mod client;
pub mod contact;
pub mod interaction;
pub mod opportunity;
pub mod rendez_vous;
pub mod stats;

use serde::{Deserialize, Deserializer};

/// HTML forms send `""` for untouched inputs; store those as NULL.
pub fn blank_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(value.and_then(|s| {
        let trimmed = s.trim();
        if trimmed.is_empty() { None } else { Some(trimmed.to_string()) }
    }))
}

/// Required text fields: surrounding whitespace is dropped before the
/// `length(min = 1)` check runs, so `"   "` counts as empty.
pub fn trimmed<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = String::deserialize(deserializer)?;
    Ok(value.trim().to_string())
}

/// Response body of every create endpoint.
#[derive(Debug, serde::Serialize, utoipa::ToSchema)]
pub struct CreatedResponse {
    pub success: bool,
    pub id: uuid::Uuid,
}

impl CreatedResponse {
    pub fn new(id: uuid::Uuid) -> Self {
        Self { success: true, id }
    }
}

/// Response body of update/delete endpoints.
#[derive(Debug, serde::Serialize, utoipa::ToSchema)]
pub struct SuccessResponse {
    pub success: bool,
}

impl SuccessResponse {
    pub fn ok() -> Self {
        Self { success: true }
    }
}

/// `?client_id=` filter shared by the child-entity lists.
#[derive(Debug, Default, Deserialize, utoipa::IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ClientFilter {
    pub client_id: Option<uuid::Uuid>,
}
