//! deptdocs_server: REST server for department documents.
//!
//! Configuration is documented in [`deptdocs_server::config`].

use anyhow::Context;
use deptdocs_postgres::PgStores;
use deptdocs_server::config::ServerConfig;
use deptdocs_server::middleware::jwt::JwtConfig;
use deptdocs_server::router::build_router;
use deptdocs_server::state::AppState;
use sqlx::postgres::PgPoolOptions;
use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,deptdocs_server=debug".into()),
        )
        .init();

    let config = ServerConfig::from_env()?;

    let pool = PgPoolOptions::new()
        .max_connections(config.max_connections)
        .connect(&config.database_url)
        .await
        .context("failed to connect to database")?;

    tracing::info!(max_connections = config.max_connections, "Connected to database");

    if config.run_migrations {
        deptdocs_postgres::migrate(&pool).await?;
    }

    let state = AppState::from_pg(PgStores::new(pool));
    let jwt_config = JwtConfig::from_secret(config.jwt_secret.as_bytes());
    let app = build_router(state, jwt_config);

    let listener = TcpListener::bind(&config.bind_addr)
        .await
        .with_context(|| format!("failed to bind to {}", config.bind_addr))?;
    tracing::info!("deptdocs_server listening on {}", config.bind_addr);

    axum::serve(listener, app).await.context("server error")?;
    Ok(())
}
