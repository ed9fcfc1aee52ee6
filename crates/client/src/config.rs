use popdash_core::window::DEFAULT_WINDOW_HOURS;

/// Client configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL of the popdash API, without a trailing slash.
    pub api_base_url: String,
    /// Seconds between timer-driven refreshes.
    pub refresh_secs: u64,
    /// Per-request timeout in seconds.
    pub request_timeout_secs: u64,
    /// Initial window length in hours.
    pub window_hours: u32,
    /// Initial comma-separated area filter.
    pub area: Option<String>,
}

impl ClientConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                | Default                 |
    /// |------------------------|-------------------------|
    /// | `API_BASE_URL`         | `http://localhost:3000` |
    /// | `REFRESH_SECS`         | `300`                   |
    /// | `REQUEST_TIMEOUT_SECS` | `10`                    |
    /// | `WINDOW_HOURS`         | `24`                    |
    /// | `AREA`                 | unset (all areas)       |
    pub fn from_env() -> Self {
        let api_base_url = std::env::var("API_BASE_URL")
            .unwrap_or_else(|_| "http://localhost:3000".into())
            .trim_end_matches('/')
            .to_string();

        let refresh_secs: u64 = std::env::var("REFRESH_SECS")
            .unwrap_or_else(|_| "300".into())
            .parse()
            .expect("REFRESH_SECS must be a valid u64");

        let request_timeout_secs: u64 = std::env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "10".into())
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        let window_hours: u32 = std::env::var("WINDOW_HOURS")
            .map(|v| v.parse().expect("WINDOW_HOURS must be a valid u32"))
            .unwrap_or(DEFAULT_WINDOW_HOURS);

        let area = std::env::var("AREA").ok().filter(|a| !a.trim().is_empty());

        Self {
            api_base_url,
            refresh_secs,
            request_timeout_secs,
            window_hours,
            area,
        }
    }
}
