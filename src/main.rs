//src/main.rs

use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

use crm_backend::{
    config::{AppState, Config},
    router::build_router,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::from_env()?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("crm_backend=info,tower_http=info")),
        )
        .with_target(false)
        .compact()
        .init();

    let addr = format!("{}:{}", config.host, config.port);
    let admin_password = config.admin_password.clone();

    let app_state = AppState::new(config).await?;

    sqlx::migrate!().run(&app_state.db_pool).await?;
    tracing::info!("✅ Migrations de la base de données exécutées");

    if app_state.user_service.ensure_admin(&admin_password).await? {
        tracing::info!("👤 Admin par défaut: username=admin");
    }

    let app = build_router(app_state);

    let listener = TcpListener::bind(&addr).await?;
    tracing::info!("🚀 Serveur démarré sur {}", listener.local_addr()?);
    tracing::info!("📊 API disponible sur http://{}/api", listener.local_addr()?);

    axum::serve(listener, app).await?;
    Ok(())
}
