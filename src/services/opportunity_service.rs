// src/services/opportunity_service.rs

use rust_decimal::Decimal;
use uuid::Uuid;

use crate::{
    common::{calendar, error::AppError},
    db::{ClientRepository, OpportunityRepository},
    models::{
        auth::CurrentUser,
        opportunity::{Opportunite, OpportunitePayload},
    },
    services::client_service::ensure_client_visible,
};

#[derive(Clone)]
pub struct OpportunityService {
    repo: OpportunityRepository,
    client_repo: ClientRepository,
}

impl OpportunityService {
    pub fn new(repo: OpportunityRepository, client_repo: ClientRepository) -> Self {
        Self { repo, client_repo }
    }

    pub async fn list(&self, user: &CurrentUser, client_id: Option<Uuid>) -> Result<Vec<Opportunite>, AppError> {
        self.repo.list(client_id, user.client_scope().owner_filter()).await
    }

    pub async fn create(&self, user: &CurrentUser, mut payload: OpportunitePayload) -> Result<Uuid, AppError> {
        normalize_amount(&mut payload)?;
        ensure_client_visible(&self.client_repo, user, payload.client_id).await?;
        stamp_closing_date(&mut payload);

        let id = Uuid::new_v4();
        self.repo.insert(id, &payload, user.id).await?;
        Ok(id)
    }

    pub async fn update(&self, user: &CurrentUser, id: Uuid, mut payload: OpportunitePayload) -> Result<(), AppError> {
        normalize_amount(&mut payload)?;
        let owner = user.client_scope().owner_filter();
        if self.repo.find(id, owner).await?.is_none() {
            return Err(AppError::NotFound("Opportunité"));
        }
        ensure_client_visible(&self.client_repo, user, payload.client_id).await?;
        stamp_closing_date(&mut payload);

        if self.repo.update(id, &payload).await? == 0 {
            return Err(AppError::NotFound("Opportunité"));
        }
        Ok(())
    }

    pub async fn delete(&self, user: &CurrentUser, id: Uuid) -> Result<(), AppError> {
        let owner = user.client_scope().owner_filter();
        if self.repo.find(id, owner).await?.is_none() {
            return Err(AppError::NotFound("Opportunité"));
        }

        self.repo.delete(id).await?;
        Ok(())
    }
}

/// `montant` is stored as `NUMERIC(14, 2)`: cents are rounded, anything
/// that would not fit is refused.
fn normalize_amount(payload: &mut OpportunitePayload) -> Result<(), AppError> {
    let Some(montant) = payload.montant else {
        return Ok(());
    };

    let montant = montant.round_dp(2);
    if montant < Decimal::ZERO {
        return Err(AppError::BadRequest("Le montant ne peut pas être négatif".to_string()));
    }
    if montant >= Decimal::from(MONTANT_LIMIT) {
        return Err(AppError::BadRequest("Le montant est trop élevé".to_string()));
    }

    payload.montant = Some(montant);
    Ok(())
}

const MONTANT_LIMIT: i64 = 1_000_000_000_000;

/// A won or lost deal without a closing date is closed today.
fn stamp_closing_date(payload: &mut OpportunitePayload) {
    let closed = payload.etape.is_some_and(|etape| etape.is_closed());
    if closed && payload.date_cloture_reelle.is_none() {
        payload.date_cloture_reelle = Some(calendar::today());
    }
}
