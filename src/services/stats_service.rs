// src/services/stats_service.rs

use crate::{
    common::{
        calendar::{self, DateRange},
        error::AppError,
    },
    db::StatsRepository,
    models::{auth::CurrentUser, stats::Stats},
};

#[derive(Clone)]
pub struct StatsService {
    repo: StatsRepository,
}

impl StatsService {
    pub fn new(repo: StatsRepository) -> Self {
        Self { repo }
    }

    pub async fn get_stats(&self, user: &CurrentUser) -> Result<Stats, AppError> {
        let today = DateRange::day(calendar::today())
            .ok_or_else(|| anyhow::anyhow!("Date du jour hors calendrier"))?;
        self.repo.get_stats(user.client_scope().owner_filter(), today).await
    }
}
