// src/db/client_repo.rs

use sqlx::{Executor, PgPool, Postgres};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::client::{Client, ClientInput},
};

const SELECT_CLIENT: &str = r#"
    SELECT c.*, u.username AS created_by_username
    FROM clients c
    LEFT JOIN users u ON c.user_id = u.id
"#;

#[derive(Clone)]
pub struct ClientRepository {
    pool: PgPool,
}

impl ClientRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// `owner = None` lists every client.
    pub async fn list(&self, owner: Option<Uuid>) -> Result<Vec<Client>, AppError> {
        let sql = format!(
            "{SELECT_CLIENT} WHERE ($1::uuid IS NULL OR c.user_id = $1) ORDER BY c.created_at DESC"
        );

        let clients = sqlx::query_as::<_, Client>(&sql)
            .bind(owner)
            .fetch_all(&self.pool)
            .await?;
        Ok(clients)
    }

    pub async fn find(&self, id: Uuid, owner: Option<Uuid>) -> Result<Option<Client>, AppError> {
        let sql = format!("{SELECT_CLIENT} WHERE c.id = $1 AND ($2::uuid IS NULL OR c.user_id = $2)");

        let client = sqlx::query_as::<_, Client>(&sql)
            .bind(id)
            .bind(owner)
            .fetch_optional(&self.pool)
            .await?;
        Ok(client)
    }

    /// Referential check used before attaching a child row to a client.
    pub async fn is_visible(&self, id: Uuid, owner: Option<Uuid>) -> Result<bool, AppError> {
        let exists: bool = sqlx::query_scalar(
            "SELECT EXISTS (SELECT 1 FROM clients WHERE id = $1 AND ($2::uuid IS NULL OR user_id = $2))",
        )
        .bind(id)
        .bind(owner)
        .fetch_one(&self.pool)
        .await?;
        Ok(exists)
    }

    pub async fn insert<'e, E>(
        &self,
        executor: E,
        id: Uuid,
        input: &ClientInput,
        owner: Uuid,
    ) -> Result<(), AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        sqlx::query(
            r#"
            INSERT INTO clients (
                id, nom, prenom, email, telephone, entreprise, poste,
                adresse, ville, code_postal, pays,
                prenom_contact, nom_contact, telephone_contact, email_contact,
                date_rdv, type_rdv, statut_rdv, notes_rdv, notes, user_id
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11,
                    $12, $13, $14, $15, $16, $17, $18, $19, $20, $21)
            "#,
        )
        .bind(id)
        .bind(&input.nom)
        .bind(&input.prenom)
        .bind(&input.email)
        .bind(&input.telephone)
        .bind(&input.entreprise)
        .bind(&input.poste)
        .bind(&input.adresse)
        .bind(&input.ville)
        .bind(&input.code_postal)
        .bind(&input.pays)
        .bind(&input.prenom_contact)
        .bind(&input.nom_contact)
        .bind(&input.telephone_contact)
        .bind(&input.email_contact)
        .bind(input.date_rdv)
        .bind(input.type_rdv)
        .bind(input.statut_rdv)
        .bind(&input.notes_rdv)
        .bind(&input.notes)
        .bind(owner)
        .execute(executor)
        .await?;

        Ok(())
    }

    /// Full replacement of the editable columns. Returns the affected rows.
    pub async fn update<'e, E>(&self, executor: E, id: Uuid, input: &ClientInput) -> Result<u64, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let result = sqlx::query(
            r#"
            UPDATE clients
            SET nom = $2, prenom = $3, email = $4, telephone = $5, entreprise = $6,
                poste = $7, adresse = $8, ville = $9, code_postal = $10, pays = $11,
                prenom_contact = $12, nom_contact = $13, telephone_contact = $14, email_contact = $15,
                date_rdv = $16, type_rdv = $17, statut_rdv = $18, notes_rdv = $19, notes = $20,
                updated_at = NOW()
            WHERE id = $1
            "#,
        )
        .bind(id)
        .bind(&input.nom)
        .bind(&input.prenom)
        .bind(&input.email)
        .bind(&input.telephone)
        .bind(&input.entreprise)
        .bind(&input.poste)
        .bind(&input.adresse)
        .bind(&input.ville)
        .bind(&input.code_postal)
        .bind(&input.pays)
        .bind(&input.prenom_contact)
        .bind(&input.nom_contact)
        .bind(&input.telephone_contact)
        .bind(&input.email_contact)
        .bind(input.date_rdv)
        .bind(input.type_rdv)
        .bind(input.statut_rdv)
        .bind(&input.notes_rdv)
        .bind(&input.notes)
        .execute(executor)
        .await?;

        Ok(result.rows_affected())
    }

    pub async fn delete<'e, E>(&self, executor: E, id: Uuid) -> Result<u64, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let result = sqlx::query("DELETE FROM clients WHERE id = $1")
            .bind(id)
            .execute(executor)
            .await?;
        Ok(result.rows_affected())
    }
}
