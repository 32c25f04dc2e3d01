// src/models/auth.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize, Serializer};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

// Maps the `user_role` enum type of the database
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "user_role", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Manager,
    #[default]
    User,
    Teleprospecteur,
}

/// Which clients a request may see.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClientScope {
    All,
    OwnedBy(Uuid),
}

impl ClientScope {
    /// Bound as `($n::uuid IS NULL OR c.user_id = $n)` in the queries.
    pub fn owner_filter(self) -> Option<Uuid> {
        match self {
            ClientScope::All => None,
            ClientScope::OwnedBy(owner) => Some(owner),
        }
    }
}

// Full `users` row, only used inside the auth and user services
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct User {
    pub id: Uuid,
    pub username: String,
    pub password_hash: String,
    pub email: Option<String>,
    pub nom: Option<String>,
    pub prenom: Option<String>,
    pub role: Role,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

// Row returned by GET /api/users
#[derive(Debug, Clone, Serialize, sqlx::FromRow, ToSchema)]
pub struct UserSummary {
    pub id: Uuid,
    pub username: String,
    pub email: Option<String>,
    pub nom: Option<String>,
    pub prenom: Option<String>,
    pub role: Role,
    #[serde(serialize_with = "bool_as_int")]
    #[schema(value_type = i32, example = 1)]
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

/// The front-end has always read the active flag as 0/1.
pub fn bool_as_int<S: Serializer>(value: &bool, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_i32(i32::from(*value))
}

// User as exposed by the login response
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct PublicUser {
    pub id: Uuid,
    pub username: String,
    pub email: Option<String>,
    pub nom: Option<String>,
    pub prenom: Option<String>,
    pub role: Role,
}

impl From<User> for PublicUser {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            username: user.username,
            email: user.email,
            nom: user.nom,
            prenom: user.prenom,
            role: user.role,
        }
    }
}

/// The authenticated principal, rebuilt from the token claims on every
/// request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct CurrentUser {
    pub id: Uuid,
    pub username: String,
    pub role: Role,
}

impl CurrentUser {
    /// Admin, manager and user see every client; a teleprospecteur only
    /// the ones it created.
    pub fn client_scope(&self) -> ClientScope {
        match self.role {
            Role::Teleprospecteur => ClientScope::OwnedBy(self.id),
            Role::Admin | Role::Manager | Role::User => ClientScope::All,
        }
    }

    /// The calendar locks appointments that are not "mine".
    pub fn owns(&self, owner: Option<Uuid>) -> bool {
        match self.role {
            Role::Admin | Role::Manager => true,
            Role::User | Role::Teleprospecteur => owner == Some(self.id),
        }
    }
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct LoginPayload {
    #[validate(length(min = 1, message = "Le nom d'utilisateur est obligatoire."))]
    #[schema(example = "admin")]
    pub username: String,
    #[validate(length(min = 1, message = "Le mot de passe est obligatoire."))]
    pub password: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct LoginResponse {
    pub success: bool,
    pub user: PublicUser,
    pub token: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct VerifyResponse {
    pub valid: bool,
    pub user: CurrentUser,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateUserPayload {
    #[serde(deserialize_with = "crate::models::trimmed")]
    #[validate(length(min = 3, message = "Le nom d'utilisateur doit contenir au moins 3 caractères."))]
    pub username: String,
    #[validate(length(min = 6, message = "Le mot de passe doit contenir au moins 6 caractères."))]
    pub password: String,
    #[serde(default, deserialize_with = "crate::models::blank_as_none")]
    #[validate(email(message = "L'e-mail est invalide."))]
    pub email: Option<String>,
    #[serde(default, deserialize_with = "crate::models::blank_as_none")]
    pub nom: Option<String>,
    #[serde(default, deserialize_with = "crate::models::blank_as_none")]
    pub prenom: Option<String>,
    #[serde(default)]
    pub role: Role,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ToggleResponse {
    pub success: bool,
    #[schema(example = 0)]
    pub is_active: i32,
}

// Data carried inside the JWT
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: Uuid,
    pub username: String,
    pub role: Role,
    pub exp: usize,
    pub iat: usize,
}

impl From<Claims> for CurrentUser {
    fn from(claims: Claims) -> Self {
        Self {
            id: claims.sub,
            username: claims.username,
            role: claims.role,
        }
    }
}
