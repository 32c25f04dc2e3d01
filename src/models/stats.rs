// src/models/stats.rs

use rust_decimal::Decimal;
use serde::Serialize;
use sqlx::FromRow;
use utoipa::ToSchema;

// Cards at the top of the dashboard
#[derive(Debug, Serialize, FromRow, ToSchema)]
pub struct Stats {
    pub total_clients: i64,
    pub total_rdv: i64,        // Every appointment that is not cancelled
    pub rdv_aujourdhui: i64,   // Today's, not cancelled
    pub rdv_confirmes: i64,
    pub opportunites_ouvertes: i64,
    #[schema(value_type = f64)]
    pub montant_pipeline: Decimal, // Sum over open opportunities
}
