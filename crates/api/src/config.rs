use popdash_core::window::DEFAULT_WINDOW_HOURS;
use popdash_db::DEFAULT_MAX_CONNECTIONS;

/// Server configuration loaded from environment variables.
///
/// All fields have sensible defaults suitable for local development.
/// In production, override via environment variables.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// Directory served for any path outside `/api` and `/health`.
    pub static_dir: String,
    /// Window length used when a request does not pass `hours`.
    pub default_window_hours: u32,
    /// Upper bound on pooled database connections.
    pub db_max_connections: u32,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                | Default                    |
    /// |------------------------|----------------------------|
    /// | `HOST`                 | `0.0.0.0`                  |
    /// | `PORT`                 | `3000`                     |
    /// | `CORS_ORIGINS`         | `http://localhost:5173`    |
    /// | `REQUEST_TIMEOUT_SECS` | `30`                       |
    /// | `STATIC_DIR`           | `public`                   |
    /// | `DEFAULT_WINDOW_HOURS` | `24`                       |
    /// | `DB_MAX_CONNECTIONS`   | `10`                       |
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "3000".into())
            .parse()
            .expect("PORT must be a valid u16");

        let cors_origins: Vec<String> = std::env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:5173".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let request_timeout_secs: u64 = std::env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        let static_dir = std::env::var("STATIC_DIR").unwrap_or_else(|_| "public".into());

        let default_window_hours: u32 = std::env::var("DEFAULT_WINDOW_HOURS")
            .map(|v| v.parse().expect("DEFAULT_WINDOW_HOURS must be a valid u32"))
            .unwrap_or(DEFAULT_WINDOW_HOURS);

        let db_max_connections: u32 = std::env::var("DB_MAX_CONNECTIONS")
            .map(|v| v.parse().expect("DB_MAX_CONNECTIONS must be a valid u32"))
            .unwrap_or(DEFAULT_MAX_CONNECTIONS);

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            static_dir,
            default_window_hours,
            db_max_connections,
        }
    }
}
