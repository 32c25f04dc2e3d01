// src/services/interaction_service.rs

use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::{ClientRepository, InteractionRepository},
    models::{
        auth::CurrentUser,
        interaction::{Interaction, InteractionPayload},
    },
    services::client_service::ensure_client_visible,
};

#[derive(Clone)]
pub struct InteractionService {
    repo: InteractionRepository,
    client_repo: ClientRepository,
}

impl InteractionService {
    pub fn new(repo: InteractionRepository, client_repo: ClientRepository) -> Self {
        Self { repo, client_repo }
    }

    pub async fn list(&self, user: &CurrentUser, client_id: Option<Uuid>) -> Result<Vec<Interaction>, AppError> {
        self.repo.list(client_id, user.client_scope().owner_filter()).await
    }

    pub async fn create(&self, user: &CurrentUser, payload: &InteractionPayload) -> Result<Uuid, AppError> {
        ensure_client_visible(&self.client_repo, user, payload.client_id).await?;

        let id = Uuid::new_v4();
        self.repo.insert(id, payload, user.id).await?;
        Ok(id)
    }

    pub async fn delete(&self, user: &CurrentUser, id: Uuid) -> Result<(), AppError> {
        let owner = user.client_scope().owner_filter();
        if self.repo.find(id, owner).await?.is_none() {
            return Err(AppError::NotFound("Interaction"));
        }

        self.repo.delete(id).await?;
        Ok(())
    }
}
