// src/services/contact_service.rs

use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::{ClientRepository, ContactRepository},
    models::{
        auth::CurrentUser,
        contact::{Contact, ContactPayload},
    },
    services::client_service::ensure_client_visible,
};

#[derive(Clone)]
pub struct ContactService {
    pool: PgPool,
    repo: ContactRepository,
    client_repo: ClientRepository,
}

impl ContactService {
    pub fn new(pool: PgPool, repo: ContactRepository, client_repo: ClientRepository) -> Self {
        Self { pool, repo, client_repo }
    }

    pub async fn list(&self, user: &CurrentUser, client_id: Option<Uuid>) -> Result<Vec<Contact>, AppError> {
        self.repo.list(client_id, user.client_scope().owner_filter()).await
    }

    pub async fn create(&self, user: &CurrentUser, payload: &ContactPayload) -> Result<Uuid, AppError> {
        ensure_client_visible(&self.client_repo, user, payload.client_id).await?;

        let id = Uuid::new_v4();
        let mut tx = self.pool.begin().await?;

        self.repo.insert(&mut *tx, id, payload).await?;
        if payload.est_principal {
            self.repo.demote_others(&mut *tx, payload.client_id, id).await?;
        }

        tx.commit().await?;
        Ok(id)
    }

    pub async fn update(&self, user: &CurrentUser, id: Uuid, payload: &ContactPayload) -> Result<(), AppError> {
        let owner = user.client_scope().owner_filter();
        if self.repo.find(id, owner).await?.is_none() {
            return Err(AppError::NotFound("Contact"));
        }
        ensure_client_visible(&self.client_repo, user, payload.client_id).await?;

        let mut tx = self.pool.begin().await?;

        if self.repo.update(&mut *tx, id, payload).await? == 0 {
            return Err(AppError::NotFound("Contact"));
        }
        // At most one principal contact per client
        if payload.est_principal {
            self.repo.demote_others(&mut *tx, payload.client_id, id).await?;
        }

        tx.commit().await?;
        Ok(())
    }

    pub async fn delete(&self, user: &CurrentUser, id: Uuid) -> Result<(), AppError> {
        let owner = user.client_scope().owner_filter();
        if self.repo.find(id, owner).await?.is_none() {
            return Err(AppError::NotFound("Contact"));
        }

        self.repo.delete(id).await?;
        Ok(())
    }
}
