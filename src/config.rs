//! Environment-derived server configuration. Built once at startup and
//! injected; no module-level mutable state.

/// Immutable runtime configuration. `from_env` applies defaults suitable
/// for local development.
#[derive(Clone, Debug)]
pub struct Config {
    /// PostgreSQL connection string (`DATABASE_URL`).
    pub database_url: String,
    /// Listen address for the HTTP server (`BIND_ADDR`).
    pub bind_addr: String,
    /// External base URL used to derive resource locations (`BASE_URL`).
    pub base_url: String,
    /// Database schema whose tables are exposed (`DB_SCHEMA`, default `public`).
    pub schema: String,
    /// Pool size (`MAX_CONNECTIONS`, default 5).
    pub max_connections: u32,
}

impl Config {
    pub fn from_env() -> Self {
        let bind_addr = std::env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".into());
        let base_url = std::env::var("BASE_URL")
            .unwrap_or_else(|_| format!("http://{}", bind_addr.replace("0.0.0.0", "localhost")));
        Config {
            database_url: std::env::var("DATABASE_URL")
                .unwrap_or_else(|_| "postgres://localhost/schemarest".into()),
            bind_addr,
            base_url,
            schema: std::env::var("DB_SCHEMA").unwrap_or_else(|_| "public".into()),
            max_connections: std::env::var("MAX_CONNECTIONS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(5),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_without_env() {
        // Env vars are process-global; only assert defaults that no test sets.
        let cfg = Config::from_env();
        assert_eq!(cfg.schema, "public");
        assert_eq!(cfg.max_connections, 5);
        assert!(cfg.base_url.starts_with("http://"));
    }
}
