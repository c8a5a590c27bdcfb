/// Configuration management for the API server
///
/// Loaded once at startup from environment variables (a `.env` file is
/// honoured for development).
///
/// # Environment Variables
///
/// - `JWT_SECRET`: Secret key for token signing (required)
/// - `DATABASE_URL`: PostgreSQL connection string; `MONGODB_URI` is accepted as
///   a fallback name but must still hold a `postgres://` URL. When neither is
///   set the in-memory store is used.
/// - `HOST`: Host to bind to (default: 0.0.0.0)
/// - `PORT`: Port to bind to (default: 5001)
/// - `DATABASE_MAX_CONNECTIONS`: Pool size (default: 10)
/// - `DATABASE_ACQUIRE_TIMEOUT_SECS`: Pool acquire timeout (default: 5)
/// - `REQUEST_TIMEOUT_SECS`: Per-request timeout (default: 30)
/// - `CORS_ORIGINS`: Comma-separated allowed origins, `*` for any (default: *)
///
/// # Example
///
/// ```no_run
/// use postboard_api::config::Config;
///
/// # fn example() -> anyhow::Result<()> {
/// let config = Config::from_env()?;
/// println!("Server will listen on {}", config.bind_address());
/// # Ok(())
/// # }
/// ```

use serde::{Deserialize, Serialize};
use std::env;

/// Complete application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// API server configuration
    pub api: ApiConfig,

    /// Database configuration; `None` selects the in-memory store
    pub database: Option<DatabaseConfig>,

    /// JWT configuration
    pub jwt: JwtConfig,
}

/// API server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Host to bind to
    pub host: String,

    /// Port to bind to
    pub port: u16,

    /// Upper bound on handling a single request (seconds)
    pub request_timeout_secs: u64,

    /// Allowed CORS origins; `*` allows any
    pub cors_origins: Vec<String>,
}

/// Database configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// PostgreSQL connection URL
    pub url: String,

    /// Maximum number of connections in pool
    pub max_connections: u32,

    /// Seconds to wait for a pooled connection
    pub acquire_timeout_secs: u64,
}

/// JWT configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JwtConfig {
    /// Secret key for token signing
    #[serde(skip_serializing)]
    pub secret: String,
}

fn parse_or<T>(value: Option<String>, name: &str, default: T) -> anyhow::Result<T>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match value {
        Some(raw) => raw
            .trim()
            .parse::<T>()
            .map_err(|e| anyhow::anyhow!("{} has an invalid value {:?}: {}", name, raw, e)),
        None => Ok(default),
    }
}

/// The store speaks PostgreSQL only; other schemes fail at startup
fn check_postgres_url(url: String) -> anyhow::Result<String> {
    if url.starts_with("postgres://") || url.starts_with("postgresql://") {
        Ok(url)
    } else {
        let scheme = url.split("://").next().unwrap_or_default();
        anyhow::bail!("Database URL must use the postgres:// scheme, got {}://", scheme)
    }
}

impl Config {
    /// Loads configuration from environment variables
    ///
    /// # Errors
    ///
    /// Returns an error if `JWT_SECRET` is missing or empty, a numeric
    /// variable cannot be parsed, or the database URL is not `postgres://`.
    pub fn from_env() -> anyhow::Result<Self> {
        // Load .env file if present (for development)
        dotenvy::dotenv().ok();

        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds configuration from an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let jwt_secret = lookup("JWT_SECRET")
            .filter(|s| !s.is_empty())
            .ok_or_else(|| anyhow::anyhow!("JWT_SECRET environment variable is required"))?;

        if jwt_secret.len() < 32 {
            tracing::warn!("JWT_SECRET is shorter than 32 bytes; use a longer random secret");
        }

        let host = lookup("HOST").unwrap_or_else(|| "0.0.0.0".to_string());
        let port = parse_or(lookup("PORT"), "PORT", 5001u16)?;
        let request_timeout_secs = parse_or(lookup("REQUEST_TIMEOUT_SECS"), "REQUEST_TIMEOUT_SECS", 30u64)?;

        let cors_origins = lookup("CORS_ORIGINS")
            .unwrap_or_else(|| "*".to_string())
            .split(',')
            .map(|origin| origin.trim().to_string())
            .filter(|origin| !origin.is_empty())
            .collect();

        let database_url = match lookup("DATABASE_URL").filter(|u| !u.is_empty()) {
            Some(url) => Some(url),
            None => {
                let legacy = lookup("MONGODB_URI").filter(|u| !u.is_empty());
                if legacy.is_some() {
                    tracing::warn!("DATABASE_URL is not set; using MONGODB_URI as the PostgreSQL URL");
                }
                legacy
            }
        };

        let database = match database_url {
            Some(url) => Some(DatabaseConfig {
                url: check_postgres_url(url)?,
                max_connections: parse_or(
                    lookup("DATABASE_MAX_CONNECTIONS"),
                    "DATABASE_MAX_CONNECTIONS",
                    10u32,
                )?,
                acquire_timeout_secs: parse_or(
                    lookup("DATABASE_ACQUIRE_TIMEOUT_SECS"),
                    "DATABASE_ACQUIRE_TIMEOUT_SECS",
                    5u64,
                )?,
            }),
            None => None,
        };

        Ok(Self {
            api: ApiConfig {
                host,
                port,
                request_timeout_secs,
                cors_origins,
            },
            database,
            jwt: JwtConfig { secret: jwt_secret },
        })
    }

    /// Returns the server bind address
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.api.host, self.api.port)
    }

    /// Whether any origin may call the API
    pub fn cors_permissive(&self) -> bool {
        self.api.cors_origins.iter().any(|o| o == "*")
    }
}
