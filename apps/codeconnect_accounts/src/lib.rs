pub mod models;
pub mod serializers;
pub mod templates;
pub mod urls;
pub mod views;

use std::sync::Arc;

use anyhow::Result;
use chrono::Duration as ChronoDuration;
use jsonwebtoken::{DecodingKey, EncodingKey};
use sea_orm::DatabaseConnection;

#[derive(Clone)]
pub struct SessionCfg {
    /// Session cookie TTL (default two weeks). Override with SESSION_TTL_SECS.
    pub session_ttl: ChronoDuration,
    /// Cookie flags for the session cookie
    pub cookie_secure: bool,
    pub cookie_domain: Option<String>,
    pub cookie_name: String,
}

impl SessionCfg {
    pub fn from_env() -> Self {
        let session_secs = std::env::var("SESSION_TTL_SECS")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(1_209_600); // 14 days
        let cookie_secure = std::env::var("COOKIE_SECURE")
            .map(|v| matches!(v.as_str(), "1" | "true" | "TRUE"))
            .unwrap_or(false);
        let cookie_domain = std::env::var("COOKIE_DOMAIN").ok();
        let cookie_name =
            std::env::var("SESSION_COOKIE_NAME").unwrap_or("codeconnect_session".into());

        Self {
            session_ttl: ChronoDuration::seconds(session_secs),
            cookie_secure,
            cookie_domain,
            cookie_name,
        }
    }
}

#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
    pub session_enc: Arc<EncodingKey>,
    pub session_dec: Arc<DecodingKey>,
    pub session_cfg: SessionCfg,
}

impl AppState {
    pub fn new(db: DatabaseConnection, secret: &str, session_cfg: SessionCfg) -> Self {
        Self {
            db,
            session_enc: Arc::new(EncodingKey::from_secret(secret.as_bytes())),
            session_dec: Arc::new(DecodingKey::from_secret(secret.as_bytes())),
            session_cfg,
        }
    }
}

/// Ensure DB schema is up-to-date (calls migration crate).
pub async fn ensure_schema(db: &DatabaseConnection) -> Result<()> {
    use migration::Migrator;
    use sea_orm_migration::migrator::MigratorTrait;
    Migrator::up(db, None).await?;
    Ok(())
}
