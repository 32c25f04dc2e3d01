// src/db/rendez_vous_repo.rs

use sqlx::{Executor, PgPool, Postgres};
use uuid::Uuid;

use crate::{
    common::{calendar::DateRange, error::AppError},
    models::{
        client::LinkedRdv,
        rendez_vous::{RdvStatut, RendezVousDetail, RendezVousInput},
    },
};

#[derive(Clone)]
pub struct RendezVousRepository {
    pool: PgPool,
}

impl RendezVousRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Appointments with their client and creator, oldest first.
    /// `range = None` means no date restriction.
    pub async fn list(&self, range: Option<DateRange>) -> Result<Vec<RendezVousDetail>, AppError> {
        let rdvs = sqlx::query_as::<_, RendezVousDetail>(
            r#"
            SELECT r.*,
                   c.nom AS client_nom, c.prenom AS client_prenom,
                   c.entreprise, c.email, c.telephone, c.ville, c.code_postal,
                   u.username AS created_by_username
            FROM rendez_vous r
            LEFT JOIN clients c ON r.client_id = c.id
            LEFT JOIN users u ON r.user_id = u.id
            WHERE ($1::timestamp IS NULL OR (r.date_heure >= $1 AND r.date_heure < $2))
            ORDER BY r.date_heure ASC
            "#,
        )
        .bind(range.map(|r| r.start))
        .bind(range.map(|r| r.end))
        .fetch_all(&self.pool)
        .await?;

        Ok(rdvs)
    }

    /// `None` when the appointment does not exist, `Some(None)` when it has
    /// no owner.
    pub async fn find_owner(&self, id: Uuid) -> Result<Option<Option<Uuid>>, AppError> {
        let owner = sqlx::query_scalar::<_, Option<Uuid>>("SELECT user_id FROM rendez_vous WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(owner)
    }

    pub async fn insert(&self, id: Uuid, input: &RendezVousInput, owner: Uuid) -> Result<(), AppError> {
        sqlx::query(
            r#"
            INSERT INTO rendez_vous (id, client_id, titre, description, date_heure, duree, lieu, type, statut, user_id)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            "#,
        )
        .bind(id)
        .bind(input.client_id)
        .bind(&input.titre)
        .bind(&input.description)
        .bind(input.date_heure)
        .bind(input.duree)
        .bind(&input.lieu)
        .bind(input.kind)
        .bind(input.statut)
        .bind(owner)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    pub async fn update(&self, id: Uuid, input: &RendezVousInput) -> Result<u64, AppError> {
        let result = sqlx::query(
            r#"
            UPDATE rendez_vous
            SET client_id = $2, titre = $3, description = $4, date_heure = $5,
                duree = $6, lieu = $7, type = $8, statut = $9
            WHERE id = $1
            "#,
        )
        .bind(id)
        .bind(input.client_id)
        .bind(&input.titre)
        .bind(&input.description)
        .bind(input.date_heure)
        .bind(input.duree)
        .bind(&input.lieu)
        .bind(input.kind)
        .bind(input.statut)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected())
    }

    pub async fn update_statut(&self, id: Uuid, statut: RdvStatut) -> Result<u64, AppError> {
        let result = sqlx::query("UPDATE rendez_vous SET statut = $2 WHERE id = $1")
            .bind(id)
            .bind(statut)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected())
    }

    pub async fn delete(&self, id: Uuid) -> Result<u64, AppError> {
        let result = sqlx::query("DELETE FROM rendez_vous WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected())
    }

    // =========================================================================
    //  Appointment mirrored from a client record (always inside a transaction)
    // =========================================================================

    pub async fn find_linked_id<'e, E>(&self, executor: E, client_id: Uuid) -> Result<Option<Uuid>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let id = sqlx::query_scalar::<_, Uuid>(
            "SELECT id FROM rendez_vous WHERE client_id = $1 ORDER BY created_at ASC LIMIT 1",
        )
        .bind(client_id)
        .fetch_optional(executor)
        .await?;
        Ok(id)
    }

    pub async fn insert_linked<'e, E>(
        &self,
        executor: E,
        client_id: Uuid,
        rdv: &LinkedRdv,
        owner: Uuid,
    ) -> Result<Uuid, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let id = Uuid::new_v4();

        sqlx::query(
            r#"
            INSERT INTO rendez_vous (id, client_id, titre, description, date_heure, statut, user_id)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(id)
        .bind(client_id)
        .bind(&rdv.titre)
        .bind(&rdv.description)
        .bind(rdv.date_heure)
        .bind(rdv.statut)
        .bind(owner)
        .execute(executor)
        .await?;

        Ok(id)
    }

    pub async fn update_linked<'e, E>(&self, executor: E, id: Uuid, rdv: &LinkedRdv) -> Result<(), AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        sqlx::query(
            r#"
            UPDATE rendez_vous
            SET titre = $2, description = $3, date_heure = $4, statut = $5
            WHERE id = $1
            "#,
        )
        .bind(id)
        .bind(&rdv.titre)
        .bind(&rdv.description)
        .bind(rdv.date_heure)
        .bind(rdv.statut)
        .execute(executor)
        .await?;

        Ok(())
    }

    pub async fn delete_by_client<'e, E>(&self, executor: E, client_id: Uuid) -> Result<u64, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let result = sqlx::query("DELETE FROM rendez_vous WHERE client_id = $1")
            .bind(client_id)
            .execute(executor)
            .await?;
        Ok(result.rows_affected())
    }
}
