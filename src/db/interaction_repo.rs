// src/db/interaction_repo.rs

use chrono::Utc;
use sqlx::{Executor, PgPool, Postgres};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::interaction::{Interaction, InteractionPayload},
};

const SELECT_INTERACTION: &str = r#"
    SELECT i.*, c.nom AS client_nom, u.username AS created_by_username
    FROM interactions i
    LEFT JOIN clients c ON i.client_id = c.id
    LEFT JOIN users u ON i.user_id = u.id
"#;

// Append-only log: no update statement on purpose
#[derive(Clone)]
pub struct InteractionRepository {
    pool: PgPool,
}

impl InteractionRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn list(&self, client_id: Option<Uuid>, owner: Option<Uuid>) -> Result<Vec<Interaction>, AppError> {
        let sql = format!(
            r#"{SELECT_INTERACTION}
            WHERE ($1::uuid IS NULL OR i.client_id = $1)
              AND ($2::uuid IS NULL OR c.user_id = $2)
            ORDER BY i.date_interaction DESC"#
        );

        let rows = sqlx::query_as::<_, Interaction>(&sql)
            .bind(client_id)
            .bind(owner)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    pub async fn find(&self, id: Uuid, owner: Option<Uuid>) -> Result<Option<Interaction>, AppError> {
        let sql = format!("{SELECT_INTERACTION} WHERE i.id = $1 AND ($2::uuid IS NULL OR c.user_id = $2)");

        let row = sqlx::query_as::<_, Interaction>(&sql)
            .bind(id)
            .bind(owner)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    pub async fn insert(&self, id: Uuid, payload: &InteractionPayload, owner: Uuid) -> Result<(), AppError> {
        sqlx::query(
            r#"
            INSERT INTO interactions (id, client_id, type, contenu, date_interaction, user_id)
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(id)
        .bind(payload.client_id)
        .bind(payload.kind)
        .bind(&payload.contenu)
        .bind(payload.date_interaction.unwrap_or_else(Utc::now))
        .bind(owner)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    pub async fn delete(&self, id: Uuid) -> Result<u64, AppError> {
        let result = sqlx::query("DELETE FROM interactions WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected())
    }

    pub async fn delete_by_client<'e, E>(&self, executor: E, client_id: Uuid) -> Result<u64, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let result = sqlx::query("DELETE FROM interactions WHERE client_id = $1")
            .bind(client_id)
            .execute(executor)
            .await?;
        Ok(result.rows_affected())
    }
}
