// src/db/stats_repo.rs

use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::{calendar::DateRange, error::AppError},
    models::stats::Stats,
};

#[derive(Clone)]
pub struct StatsRepository {
    pool: PgPool,
}

impl StatsRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// One round trip for every dashboard card. `owner` restricts the counts
    /// to the clients it owns (and their appointments and opportunities).
    pub async fn get_stats(&self, owner: Option<Uuid>, today: DateRange) -> Result<Stats, AppError> {
        let stats = sqlx::query_as::<_, Stats>(
            r#"
            SELECT
                (SELECT COUNT(*) FROM clients c
                  WHERE ($1::uuid IS NULL OR c.user_id = $1)) AS total_clients,

                (SELECT COUNT(*) FROM rendez_vous r
                  LEFT JOIN clients c ON r.client_id = c.id
                  WHERE r.statut <> 'annule'
                    AND ($1::uuid IS NULL OR c.user_id = $1)) AS total_rdv,

                (SELECT COUNT(*) FROM rendez_vous r
                  LEFT JOIN clients c ON r.client_id = c.id
                  WHERE r.statut <> 'annule'
                    AND r.date_heure >= $2 AND r.date_heure < $3
                    AND ($1::uuid IS NULL OR c.user_id = $1)) AS rdv_aujourdhui,

                (SELECT COUNT(*) FROM rendez_vous r
                  LEFT JOIN clients c ON r.client_id = c.id
                  WHERE r.statut = 'confirme'
                    AND ($1::uuid IS NULL OR c.user_id = $1)) AS rdv_confirmes,

                (SELECT COUNT(*) FROM opportunites o
                  LEFT JOIN clients c ON o.client_id = c.id
                  WHERE o.etape NOT IN ('gagne', 'perdu')
                    AND ($1::uuid IS NULL OR c.user_id = $1)) AS opportunites_ouvertes,

                (SELECT COALESCE(SUM(o.montant), 0) FROM opportunites o
                  LEFT JOIN clients c ON o.client_id = c.id
                  WHERE o.etape NOT IN ('gagne', 'perdu')
                    AND ($1::uuid IS NULL OR c.user_id = $1)) AS montant_pipeline
            "#,
        )
        .bind(owner)
        .bind(today.start)
        .bind(today.end)
        .fetch_one(&self.pool)
        .await?;

        Ok(stats)
    }
}
