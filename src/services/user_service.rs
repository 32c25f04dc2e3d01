// src/services/user_service.rs

use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::{user_repo::NewUser, UserRepository},
    models::auth::{CreateUserPayload, CurrentUser, Role, UserSummary},
    services::auth::hash_password,
};

#[derive(Clone)]
pub struct UserService {
    pool: PgPool,
    repo: UserRepository,
}

impl UserService {
    pub fn new(pool: PgPool, repo: UserRepository) -> Self {
        Self { pool, repo }
    }

    pub async fn list_users(&self) -> Result<Vec<UserSummary>, AppError> {
        self.repo.list().await
    }

    pub async fn create_user(&self, payload: &CreateUserPayload) -> Result<Uuid, AppError> {
        let username = payload.username.as_str();
        let password_hash = hash_password(&payload.password).await?;

        let id = self
            .repo
            .create_user(
                &self.pool,
                NewUser {
                    username,
                    password_hash: &password_hash,
                    email: payload.email.as_deref(),
                    nom: payload.nom.as_deref(),
                    prenom: payload.prenom.as_deref(),
                    role: payload.role,
                },
            )
            .await?;

        tracing::info!("👤 Utilisateur {} créé ({:?})", username, payload.role);
        Ok(id)
    }

    /// Flips the active flag and returns the new value.
    pub async fn toggle_active(&self, actor: &CurrentUser, id: Uuid) -> Result<bool, AppError> {
        if actor.id == id {
            return Err(AppError::BadRequest(
                "Vous ne pouvez pas désactiver votre propre compte".to_string(),
            ));
        }

        self.repo
            .toggle_active(id)
            .await?
            .ok_or(AppError::NotFound("Utilisateur"))
    }

    pub async fn delete_user(&self, actor: &CurrentUser, id: Uuid) -> Result<(), AppError> {
        if actor.id == id {
            return Err(AppError::BadRequest(
                "Vous ne pouvez pas supprimer votre propre compte".to_string(),
            ));
        }

        if self.repo.delete(id).await? == 0 {
            return Err(AppError::NotFound("Utilisateur"));
        }
        Ok(())
    }

    /// Creates the `admin` account on an empty install. Returns whether an
    /// account was created.
    pub async fn ensure_admin(&self, password: &str) -> Result<bool, AppError> {
        if self.repo.exists_by_username("admin").await? {
            return Ok(false);
        }

        let password_hash = hash_password(password).await?;
        self.repo
            .create_user(
                &self.pool,
                NewUser {
                    username: "admin",
                    password_hash: &password_hash,
                    email: None,
                    nom: Some("Administrateur"),
                    prenom: None,
                    role: Role::Admin,
                },
            )
            .await?;

        tracing::warn!("⚠️ Compte admin créé avec le mot de passe initial, pensez à le changer");
        Ok(true)
    }
}
