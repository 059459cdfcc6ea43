use std::time::Duration;

use anyhow::Context;
use tracing_subscriber::EnvFilter;

const DEFAULT_LOG_FILTER: &str = "warn,suncoast_movies=info";

#[derive(Clone, Debug)]
pub struct Config {
    pub database_url: String,
    pub log_sql: bool,
    pub run_migrations: bool,
    pub connect_timeout: Duration,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let database_url = std::env::var("DATABASE_URL")
            .unwrap_or_else(|_| "sqlite://suncoast_movies.db?mode=rwc".to_string());

        let log_sql = flag("LOG_SQL", false).context("LOG_SQL")?;
        let run_migrations = flag("RUN_MIGRATIONS", true).context("RUN_MIGRATIONS")?;

        let connect_timeout_secs: u64 = match std::env::var("CONNECT_TIMEOUT_SECS") {
            Ok(value) => value.trim().parse().context("CONNECT_TIMEOUT_SECS")?,
            Err(_) => 10,
        };

        Ok(Self {
            database_url,
            log_sql,
            run_migrations,
            connect_timeout: Duration::from_secs(connect_timeout_secs),
        })
    }

    /// Filter for the subscriber. `RUST_LOG` replaces the default, and
    /// `LOG_SQL` always lets sqlx's per-statement records through.
    pub fn log_filter(&self, rust_log: Option<&str>) -> anyhow::Result<EnvFilter> {
        let mut directives = rust_log.unwrap_or(DEFAULT_LOG_FILTER).to_string();
        if self.log_sql {
            directives.push_str(",sqlx::query=info");
        }
        EnvFilter::try_new(&directives).with_context(|| format!("RUST_LOG `{directives}`"))
    }

    #[cfg(test)]
    pub fn for_url(database_url: impl Into<String>) -> Self {
        Self {
            database_url: database_url.into(),
            log_sql: false,
            run_migrations: true,
            connect_timeout: Duration::from_secs(10),
        }
    }
}

fn flag(name: &str, default: bool) -> anyhow::Result<bool> {
    match std::env::var(name) {
        Ok(value) => parse_flag(&value),
        Err(_) => Ok(default),
    }
}

fn parse_flag(value: &str) -> anyhow::Result<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" | "" => Ok(false),
        other => anyhow::bail!("expected a boolean, got `{other}`"),
    }
}
