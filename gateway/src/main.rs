use std::net::SocketAddr;

use dotenvy::dotenv;
use sea_orm::Database;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use codeconnect_accounts::{ensure_schema, AppState, SessionCfg};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).compact().init();

    let port: u16 = std::env::var("PORT").ok().and_then(|s| s.parse().ok()).unwrap_or(8000);

    // sqlite file for local development; point DATABASE_URL at Postgres for a
    // real deployment
    let db_url = std::env::var("DATABASE_URL")
        .unwrap_or_else(|_| "sqlite://codeconnect.db?mode=rwc".into());

    let db = Database::connect(&db_url).await?;
    ensure_schema(&db).await?;

    let secret = std::env::var("SESSION_SECRET").unwrap_or_else(|_| {
        warn!("SESSION_SECRET not set; using an insecure development key");
        "codeconnect-insecure-dev-key".into()
    });
    let state = AppState::new(db, &secret, SessionCfg::from_env());

    let app = gateway::app(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    info!("listening on http://{}", addr);
    axum::serve(tokio::net::TcpListener::bind(addr).await?, app).await?;
    Ok(())
}
