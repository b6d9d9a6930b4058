use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use tower_http::services::ServeDir;
use tracing::info;

use petclinic_api::{router, state::AppState, views::Views};
use petclinic_core::services::OwnerService;
use petclinic_infrastructure::{create_pool, run_migrations, PgOwnerRepository};
use petclinic_shared::config::AppConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env
    dotenvy::dotenv().ok();

    // Load configuration
    let config = AppConfig::load().context("failed to load configuration")?;

    // Initialize telemetry; the guard flushes the file appender on exit
    let _log_guard = petclinic_shared::telemetry::init_telemetry(&config.log)?;

    info!("{} starting in {} mode...", config.app.name, config.app.env);

    // Connect to Database
    let pool = create_pool(
        &config.database.url,
        config.database.max_connections,
        config.database.min_connections,
    )
    .await
    .context("failed to connect to database")?;
    info!("Database connection established.");

    run_migrations(&pool).await.context("failed to run migrations")?;
    info!("Migrations applied.");

    // Create App State
    let owners = OwnerService::new(
        Arc::new(PgOwnerRepository::new(pool)),
        config.clinic.page_size,
        config.clinic.visit_tally,
    );
    let views = Views::new().context("failed to register templates")?;
    let state = AppState::new(owners, views);

    // Build router
    let app = router(state).nest_service("/resources", ServeDir::new("static/resources"));

    // Bind address
    let host: std::net::IpAddr = config.app.host.parse()?;
    let addr = SocketAddr::from((host, config.app.port));
    info!("Listening on {}", addr);

    // Start server
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
