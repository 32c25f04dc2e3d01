// src/services/client_service.rs

use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::{ClientRepository, ContactRepository, InteractionRepository, OpportunityRepository, RendezVousRepository},
    models::{
        auth::CurrentUser,
        client::{Client, ClientInput},
    },
};

/// 404 unless the client exists and the caller may see it. Used before
/// attaching any child row to a client.
pub async fn ensure_client_visible(
    clients: &ClientRepository,
    user: &CurrentUser,
    client_id: Uuid,
) -> Result<(), AppError> {
    let owner = user.client_scope().owner_filter();
    if clients.is_visible(client_id, owner).await? {
        Ok(())
    } else {
        Err(AppError::NotFound("Client"))
    }
}

#[derive(Clone)]
pub struct ClientService {
    pool: PgPool,
    repo: ClientRepository,
    rdv_repo: RendezVousRepository,
    opportunity_repo: OpportunityRepository,
    interaction_repo: InteractionRepository,
    contact_repo: ContactRepository,
}

impl ClientService {
    pub fn new(
        pool: PgPool,
        repo: ClientRepository,
        rdv_repo: RendezVousRepository,
        opportunity_repo: OpportunityRepository,
        interaction_repo: InteractionRepository,
        contact_repo: ContactRepository,
    ) -> Self {
        Self {
            pool,
            repo,
            rdv_repo,
            opportunity_repo,
            interaction_repo,
            contact_repo,
        }
    }

    pub async fn list_clients(&self, user: &CurrentUser) -> Result<Vec<Client>, AppError> {
        self.repo.list(user.client_scope().owner_filter()).await
    }

    pub async fn get_client(&self, user: &CurrentUser, id: Uuid) -> Result<Client, AppError> {
        self.repo
            .find(id, user.client_scope().owner_filter())
            .await?
            .ok_or(AppError::NotFound("Client"))
    }

    /// Inserts the client and, when it carries a date, its appointment.
    pub async fn create_client(&self, user: &CurrentUser, input: &ClientInput) -> Result<Uuid, AppError> {
        let id = Uuid::new_v4();
        let mut tx = self.pool.begin().await?;

        self.repo.insert(&mut *tx, id, input, user.id).await?;

        if let Some(rdv) = input.linked_rdv() {
            self.rdv_repo.insert_linked(&mut *tx, id, &rdv, user.id).await?;
        }

        tx.commit().await?;
        tracing::info!("📇 Client {} créé par {}", id, user.username);
        Ok(id)
    }

    /// Full update. The linked appointment follows the record: updated when
    /// it exists, created otherwise. A record without date leaves it alone.
    pub async fn update_client(&self, user: &CurrentUser, id: Uuid, input: &ClientInput) -> Result<(), AppError> {
        ensure_client_visible(&self.repo, user, id).await?;

        let mut tx = self.pool.begin().await?;

        if self.repo.update(&mut *tx, id, input).await? == 0 {
            return Err(AppError::NotFound("Client"));
        }

        if let Some(rdv) = input.linked_rdv() {
            match self.rdv_repo.find_linked_id(&mut *tx, id).await? {
                Some(rdv_id) => self.rdv_repo.update_linked(&mut *tx, rdv_id, &rdv).await?,
                None => {
                    self.rdv_repo.insert_linked(&mut *tx, id, &rdv, user.id).await?;
                }
            }
        }

        tx.commit().await?;
        Ok(())
    }

    /// Removes the client together with everything attached to it.
    pub async fn delete_client(&self, user: &CurrentUser, id: Uuid) -> Result<(), AppError> {
        ensure_client_visible(&self.repo, user, id).await?;

        let mut tx = self.pool.begin().await?;

        let rdvs = self.rdv_repo.delete_by_client(&mut *tx, id).await?;
        self.contact_repo.delete_by_client(&mut *tx, id).await?;
        self.opportunity_repo.delete_by_client(&mut *tx, id).await?;
        self.interaction_repo.delete_by_client(&mut *tx, id).await?;

        if self.repo.delete(&mut *tx, id).await? == 0 {
            return Err(AppError::NotFound("Client"));
        }

        tx.commit().await?;
        tracing::info!("🗑️ Client {} supprimé avec {} rendez-vous", id, rdvs);
        Ok(())
    }
}
