//! Server configuration, read from the environment (and `.env` if present).
//!
//!   DEPTDOCS_DATABASE_URL        Postgres connection string (required)
//!   DEPTDOCS_JWT_SECRET          JWT HMAC secret (required)
//!   DEPTDOCS_BIND_ADDR           listen address (default: 0.0.0.0:4200)
//!   DEPTDOCS_DB_MAX_CONNECTIONS  pool size (default: 10)
//!   DEPTDOCS_RUN_MIGRATIONS      apply migrations at startup (default: false)

use anyhow::{bail, Context, Result};

pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:4200";
pub const DEFAULT_MAX_CONNECTIONS: u32 = 10;

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub database_url: String,
    pub jwt_secret: String,
    pub bind_addr: String,
    pub max_connections: u32,
    pub run_migrations: bool,
}

impl ServerConfig {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup; `from_env` passes the process environment.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let required = |key: &str| {
            lookup(key)
                .filter(|v| !v.trim().is_empty())
                .with_context(|| format!("{key} must be set"))
        };

        let max_connections = match lookup("DEPTDOCS_DB_MAX_CONNECTIONS") {
            Some(v) => v
                .trim()
                .parse::<u32>()
                .with_context(|| format!("DEPTDOCS_DB_MAX_CONNECTIONS is not a number: {v}"))?,
            None => DEFAULT_MAX_CONNECTIONS,
        };

        let run_migrations = match lookup("DEPTDOCS_RUN_MIGRATIONS") {
            Some(v) => parse_bool(&v)
                .with_context(|| format!("DEPTDOCS_RUN_MIGRATIONS is not a boolean: {v}"))?,
            None => false,
        };

        Ok(Self {
            database_url: required("DEPTDOCS_DATABASE_URL")?,
            jwt_secret: required("DEPTDOCS_JWT_SECRET")?,
            bind_addr: lookup("DEPTDOCS_BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.into()),
            max_connections,
            run_migrations,
        })
    }
}

fn parse_bool(value: &str) -> Result<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => bail!("expected true/false, got {other:?}"),
    }
}
