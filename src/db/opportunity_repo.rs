// src/db/opportunity_repo.rs

use rust_decimal::Decimal;
use sqlx::{Executor, PgPool, Postgres};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::opportunity::{Opportunite, OpportunitePayload},
};

const SELECT_OPPORTUNITE: &str = r#"
    SELECT o.*, c.nom AS client_nom, c.entreprise AS client_entreprise
    FROM opportunites o
    LEFT JOIN clients c ON o.client_id = c.id
"#;

#[derive(Clone)]
pub struct OpportunityRepository {
    pool: PgPool,
}

impl OpportunityRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// `owner` restricts to opportunities of clients it owns.
    pub async fn list(&self, client_id: Option<Uuid>, owner: Option<Uuid>) -> Result<Vec<Opportunite>, AppError> {
        let sql = format!(
            r#"{SELECT_OPPORTUNITE}
            WHERE ($1::uuid IS NULL OR o.client_id = $1)
              AND ($2::uuid IS NULL OR c.user_id = $2)
            ORDER BY o.created_at DESC"#
        );

        let rows = sqlx::query_as::<_, Opportunite>(&sql)
            .bind(client_id)
            .bind(owner)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    pub async fn find(&self, id: Uuid, owner: Option<Uuid>) -> Result<Option<Opportunite>, AppError> {
        let sql = format!("{SELECT_OPPORTUNITE} WHERE o.id = $1 AND ($2::uuid IS NULL OR c.user_id = $2)");

        let row = sqlx::query_as::<_, Opportunite>(&sql)
            .bind(id)
            .bind(owner)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    pub async fn insert(&self, id: Uuid, payload: &OpportunitePayload, owner: Uuid) -> Result<(), AppError> {
        sqlx::query(
            r#"
            INSERT INTO opportunites (
                id, client_id, titre, description, montant, etape, probabilite,
                date_cloture_estimee, date_cloture_reelle, user_id
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            "#,
        )
        .bind(id)
        .bind(payload.client_id)
        .bind(&payload.titre)
        .bind(&payload.description)
        .bind(payload.montant.unwrap_or(Decimal::ZERO))
        .bind(payload.etape.unwrap_or_default())
        .bind(payload.probabilite.unwrap_or(50))
        .bind(payload.date_cloture_estimee)
        .bind(payload.date_cloture_reelle)
        .bind(owner)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    pub async fn update(&self, id: Uuid, payload: &OpportunitePayload) -> Result<u64, AppError> {
        let result = sqlx::query(
            r#"
            UPDATE opportunites
            SET client_id = $2, titre = $3, description = $4, montant = $5, etape = $6,
                probabilite = $7, date_cloture_estimee = $8, date_cloture_reelle = $9,
                updated_at = NOW()
            WHERE id = $1
            "#,
        )
        .bind(id)
        .bind(payload.client_id)
        .bind(&payload.titre)
        .bind(&payload.description)
        .bind(payload.montant.unwrap_or(Decimal::ZERO))
        .bind(payload.etape.unwrap_or_default())
        .bind(payload.probabilite.unwrap_or(50))
        .bind(payload.date_cloture_estimee)
        .bind(payload.date_cloture_reelle)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected())
    }

    pub async fn delete(&self, id: Uuid) -> Result<u64, AppError> {
        let result = sqlx::query("DELETE FROM opportunites WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected())
    }

    pub async fn delete_by_client<'e, E>(&self, executor: E, client_id: Uuid) -> Result<u64, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let result = sqlx::query("DELETE FROM opportunites WHERE client_id = $1")
            .bind(client_id)
            .execute(executor)
            .await?;
        Ok(result.rows_affected())
    }
}

