/// Configuration management for the API server
///
/// This module loads configuration from environment variables and provides
/// a type-safe configuration struct.
///
/// # Environment Variables
///
/// - `DATABASE_URL`: PostgreSQL connection string (required)
/// - `DATABASE_MAX_CONNECTIONS`, `DATABASE_MIN_CONNECTIONS`,
///   `DATABASE_CONNECT_TIMEOUT_SECONDS`: Pool sizing, read by
///   [`DatabaseConfig::from_env`]
/// - `APPLY_SCHEMA`: Create missing tables on startup (default: false)
/// - `API_HOST`: Host to bind to (default: 0.0.0.0)
/// - `API_PORT`: Port to bind to (default: 8080)
/// - `CORS_ORIGINS`: Comma-separated allowed origins, `*` for any (default: *)
/// - `JWT_SECRET`: Secret key for session tokens (required, 32+ characters)
/// - `JWT_TTL_HOURS`: Session lifetime, 1 to 8760 (default: 24)
/// - `RUST_LOG`: Log filter, `LOG_FORMAT=json` for JSON logs
///
/// # Example
///
/// ```no_run
/// use lightbnb_api::config::Config;
///
/// # fn example() -> anyhow::Result<()> {
/// let config = Config::from_env()?;
/// println!("Server will listen on {}", config.bind_address());
/// # Ok(())
/// # }
/// ```

pub use lightbnb_shared::db::pool::DatabaseConfig;

use lightbnb_shared::auth::jwt::{DEFAULT_TTL_HOURS, MAX_TTL_HOURS};
use serde::{Deserialize, Serialize};
use std::env;

/// Complete application configuration
#[derive(Debug, Clone)]
pub struct Config {
    pub api: ApiConfig,

    /// Connection pool settings
    pub database: DatabaseConfig,

    /// Whether to create missing tables at startup
    pub apply_schema: bool,

    pub jwt: JwtConfig,
}

/// API server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Host to bind to
    pub host: String,

    /// Port to bind to
    pub port: u16,

    /// Allowed CORS origins; `*` allows any
    pub cors_origins: Vec<String>,
}

/// Session token configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JwtConfig {
    /// Secret key for signing, at least 32 characters
    pub secret: String,

    /// Session lifetime in hours, `1..=MAX_TTL_HOURS`
    pub ttl_hours: i64,
}

impl Config {
    /// Loads configuration from environment variables
    ///
    /// # Errors
    ///
    /// Returns an error if a required variable is missing, a value doesn't
    /// parse, `JWT_SECRET` is shorter than 32 characters, or `JWT_TTL_HOURS`
    /// is outside `1..=MAX_TTL_HOURS`.
    pub fn from_env() -> anyhow::Result<Self> {
        // Load .env file if present (for development)
        dotenvy::dotenv().ok();

        let api_host = env::var("API_HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
        let api_port = env::var("API_PORT")
            .unwrap_or_else(|_| "8080".to_string())
            .parse::<u16>()?;
        let cors_origins = parse_origins(&env::var("CORS_ORIGINS").unwrap_or_else(|_| "*".to_string()));

        let database = DatabaseConfig::from_env()?;

        let apply_schema = env::var("APPLY_SCHEMA")
            .map(|v| matches!(v.to_ascii_lowercase().as_str(), "1" | "true" | "yes"))
            .unwrap_or(false);

        let jwt_secret = env::var("JWT_SECRET")
            .map_err(|_| anyhow::anyhow!("JWT_SECRET environment variable is required"))?;

        if jwt_secret.len() < 32 {
            anyhow::bail!("JWT_SECRET must be at least 32 characters long");
        }

        let ttl_hours = parse_ttl_hours(env::var("JWT_TTL_HOURS").ok().as_deref())?;

        Ok(Self {
            api: ApiConfig {
                host: api_host,
                port: api_port,
                cors_origins,
            },
            database,
            apply_schema,
            jwt: JwtConfig {
                secret: jwt_secret,
                ttl_hours,
            },
        })
    }

    /// Returns the server bind address
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.api.host, self.api.port)
    }
}

/// Parses `JWT_TTL_HOURS`, defaulting to [`DEFAULT_TTL_HOURS`] when unset
fn parse_ttl_hours(raw: Option<&str>) -> anyhow::Result<i64> {
    let Some(raw) = raw else {
        return Ok(DEFAULT_TTL_HOURS);
    };

    let hours = raw
        .trim()
        .parse::<i64>()
        .map_err(|_| anyhow::anyhow!("JWT_TTL_HOURS must be an integer, got {:?}", raw))?;

    if !(1..=MAX_TTL_HOURS).contains(&hours) {
        anyhow::bail!("JWT_TTL_HOURS must be between 1 and {}, got {}", MAX_TTL_HOURS, hours);
    }

    Ok(hours)
}

fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|origin| !origin.is_empty())
        .map(String::from)
        .collect()
}
