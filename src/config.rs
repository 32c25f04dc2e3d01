// src/config.rs

use crate::{
    db::{
        ClientRepository, ContactRepository, InteractionRepository, OpportunityRepository,
        RendezVousRepository, StatsRepository, UserRepository,
    },
    services::{
        AuthService, ClientService, ContactService, InteractionService, OpportunityService,
        RendezVousService, StatsService, UserService,
    },
};
use anyhow::Context;
use sqlx::{postgres::PgPoolOptions, PgPool};
use std::{env, path::PathBuf, sync::Arc, time::Duration};

/// Settings read from the environment (and `.env` when present).
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub database_max_connections: u32,
    pub jwt_secret: String,
    pub token_ttl_hours: i64,
    pub host: String,
    pub port: u16,
    pub admin_password: String,
    /// `None` allows any origin.
    pub cors_origins: Option<Vec<String>>,
    pub static_dir: Option<PathBuf>,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let database_url = env::var("DATABASE_URL").context("DATABASE_URL doit être définie")?;
        let jwt_secret = env::var("JWT_SECRET").context("JWT_SECRET doit être défini")?;

        Ok(Self {
            database_url,
            database_max_connections: parse_or("DATABASE_MAX_CONNECTIONS", 5)?,
            jwt_secret,
            token_ttl_hours: parse_or("TOKEN_TTL_HOURS", 24)?,
            host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: parse_or("PORT", 3001)?,
            admin_password: env::var("ADMIN_PASSWORD").unwrap_or_else(|_| "Admin123!".to_string()),
            cors_origins: env::var("CORS_ORIGINS").ok().and_then(|raw| split_origins(&raw)),
            static_dir: env::var("STATIC_DIR").ok().filter(|dir| !dir.trim().is_empty()).map(PathBuf::from),
        })
    }
}

fn parse_or<T>(key: &str, default: T) -> anyhow::Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse()
            .with_context(|| format!("{key} invalide: {raw}")),
        Err(_) => Ok(default),
    }
}

fn split_origins(raw: &str) -> Option<Vec<String>> {
    let origins: Vec<String> = raw
        .split(',')
        .map(str::trim)
        .filter(|origin| !origin.is_empty())
        .map(str::to_string)
        .collect();
    (!origins.is_empty()).then_some(origins)
}

#[derive(Clone)]
pub struct AppState {
    pub db_pool: PgPool,
    pub config: Arc<Config>,
    pub auth_service: AuthService,
    pub user_service: UserService,
    pub client_service: ClientService,
    pub rendez_vous_service: RendezVousService,
    pub opportunity_service: OpportunityService,
    pub interaction_service: InteractionService,
    pub contact_service: ContactService,
    pub stats_service: StatsService,
}

impl AppState {
    pub async fn new(config: Config) -> anyhow::Result<Self> {
        let db_pool = PgPoolOptions::new()
            .max_connections(config.database_max_connections)
            .acquire_timeout(Duration::from_secs(3))
            .connect(&config.database_url)
            .await?;

        tracing::info!("✅ Connexion à la base de données établie");

        Ok(Self::from_pool(db_pool, config))
    }

    /// Wires the repositories and services around an existing pool.
    pub fn from_pool(db_pool: PgPool, config: Config) -> Self {
        let user_repo = UserRepository::new(db_pool.clone());
        let client_repo = ClientRepository::new(db_pool.clone());
        let rdv_repo = RendezVousRepository::new(db_pool.clone());
        let opportunity_repo = OpportunityRepository::new(db_pool.clone());
        let interaction_repo = InteractionRepository::new(db_pool.clone());
        let contact_repo = ContactRepository::new(db_pool.clone());
        let stats_repo = StatsRepository::new(db_pool.clone());

        let auth_service = AuthService::new(user_repo.clone(), config.jwt_secret.clone(), config.token_ttl_hours);
        let user_service = UserService::new(db_pool.clone(), user_repo);
        let client_service = ClientService::new(
            db_pool.clone(),
            client_repo.clone(),
            rdv_repo.clone(),
            opportunity_repo.clone(),
            interaction_repo.clone(),
            contact_repo.clone(),
        );
        let rendez_vous_service = RendezVousService::new(rdv_repo, client_repo.clone());
        let opportunity_service = OpportunityService::new(opportunity_repo, client_repo.clone());
        let interaction_service = InteractionService::new(interaction_repo, client_repo.clone());
        let contact_service = ContactService::new(db_pool.clone(), contact_repo, client_repo);
        let stats_service = StatsService::new(stats_repo);

        Self {
            db_pool,
            config: Arc::new(config),
            auth_service,
            user_service,
            client_service,
            rendez_vous_service,
            opportunity_service,
            interaction_service,
            contact_service,
            stats_service,
        }
    }
}
