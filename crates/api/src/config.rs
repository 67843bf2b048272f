//! Runtime configuration for the API binary.

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 3000;
const DEFAULT_LOG_FILTER: &str = "info";

/// Settings read once at startup.
///
/// Environment variables:
/// - `HOST`: bind address, defaults to `0.0.0.0`
/// - `PORT`: listen port, defaults to `3000`
/// - `DATABASE_URL`: PostgreSQL connection string; when unset the server
///   falls back to the in-memory store with demo data
/// - `RUST_LOG`: tracing filter directive, defaults to `info`
#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub database_url: Option<String>,
    pub log_level: String,
}

impl Config {
    /// Reads the configuration from the process environment.
    pub fn from_env() -> Self {
        Self {
            host: env_or("HOST", DEFAULT_HOST),
            port: parse_port(std::env::var("PORT").ok()),
            database_url: std::env::var("DATABASE_URL").ok(),
            log_level: env_or("RUST_LOG", DEFAULT_LOG_FILTER),
        }
    }

    /// Address string the listener binds to.
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            database_url: None,
            log_level: DEFAULT_LOG_FILTER.to_string(),
        }
    }
}

fn env_or(key: &str, fallback: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| fallback.to_string())
}

fn parse_port(raw: Option<String>) -> u16 {
    raw.and_then(|p| p.parse().ok()).unwrap_or(DEFAULT_PORT)
}
