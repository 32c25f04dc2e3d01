// src/db/contact_repo.rs

use sqlx::{Executor, PgPool, Postgres};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::contact::{Contact, ContactPayload},
};

const SELECT_CONTACT: &str = r#"
    SELECT ct.*, c.entreprise AS client_entreprise
    FROM contacts ct
    LEFT JOIN clients c ON ct.client_id = c.id
"#;

#[derive(Clone)]
pub struct ContactRepository {
    pool: PgPool,
}

impl ContactRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Principal contacts first, then alphabetical.
    pub async fn list(&self, client_id: Option<Uuid>, owner: Option<Uuid>) -> Result<Vec<Contact>, AppError> {
        let sql = format!(
            r#"{SELECT_CONTACT}
            WHERE ($1::uuid IS NULL OR ct.client_id = $1)
              AND ($2::uuid IS NULL OR c.user_id = $2)
            ORDER BY ct.est_principal DESC, ct.nom ASC, ct.prenom ASC"#
        );

        let rows = sqlx::query_as::<_, Contact>(&sql)
            .bind(client_id)
            .bind(owner)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    pub async fn find(&self, id: Uuid, owner: Option<Uuid>) -> Result<Option<Contact>, AppError> {
        let sql = format!("{SELECT_CONTACT} WHERE ct.id = $1 AND ($2::uuid IS NULL OR c.user_id = $2)");

        let row = sqlx::query_as::<_, Contact>(&sql)
            .bind(id)
            .bind(owner)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    pub async fn insert<'e, E>(&self, executor: E, id: Uuid, payload: &ContactPayload) -> Result<(), AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        sqlx::query(
            r#"
            INSERT INTO contacts (id, client_id, nom, prenom, email, telephone, poste, est_principal)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            "#,
        )
        .bind(id)
        .bind(payload.client_id)
        .bind(&payload.nom)
        .bind(&payload.prenom)
        .bind(&payload.email)
        .bind(&payload.telephone)
        .bind(&payload.poste)
        .bind(payload.est_principal)
        .execute(executor)
        .await?;

        Ok(())
    }

    pub async fn update<'e, E>(&self, executor: E, id: Uuid, payload: &ContactPayload) -> Result<u64, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let result = sqlx::query(
            r#"
            UPDATE contacts
            SET client_id = $2, nom = $3, prenom = $4, email = $5,
                telephone = $6, poste = $7, est_principal = $8
            WHERE id = $1
            "#,
        )
        .bind(id)
        .bind(payload.client_id)
        .bind(&payload.nom)
        .bind(&payload.prenom)
        .bind(&payload.email)
        .bind(&payload.telephone)
        .bind(&payload.poste)
        .bind(payload.est_principal)
        .execute(executor)
        .await?;

        Ok(result.rows_affected())
    }

    /// Clears the principal flag on the client's other contacts.
    pub async fn demote_others<'e, E>(&self, executor: E, client_id: Uuid, keep: Uuid) -> Result<u64, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let result = sqlx::query(
            "UPDATE contacts SET est_principal = FALSE WHERE client_id = $1 AND id <> $2 AND est_principal",
        )
        .bind(client_id)
        .bind(keep)
        .execute(executor)
        .await?;
        Ok(result.rows_affected())
    }

    pub async fn delete(&self, id: Uuid) -> Result<u64, AppError> {
        let result = sqlx::query("DELETE FROM contacts WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected())
    }

    pub async fn delete_by_client<'e, E>(&self, executor: E, client_id: Uuid) -> Result<u64, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let result = sqlx::query("DELETE FROM contacts WHERE client_id = $1")
            .bind(client_id)
            .execute(executor)
            .await?;
        Ok(result.rows_affected())
    }
}
