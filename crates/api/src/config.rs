use std::fmt;
use std::path::PathBuf;

use sqlx::postgres::PgConnectOptions;
use url::Url;

/// Default PostgreSQL port when a connection target omits one.
pub const DEFAULT_PG_PORT: u16 = 5432;

/// Errors raised while resolving startup configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("No database configured: set DATABASE_CONNECTION or DATABASE_URL")]
    MissingDatabase,

    #[error("Invalid DATABASE_URL: {0}")]
    InvalidDatabaseUrl(String),

    #[error("Invalid DATABASE_CONNECTION: {0}")]
    InvalidConnectionString(String),
}

/// Server configuration loaded from environment variables.
///
/// All fields have sensible defaults suitable for local development.
/// In production, override via environment variables.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `8080`).
    pub port: u16,
    /// Exact allowed CORS origins, parsed from comma-separated `CORS_ORIGINS`.
    pub cors_origins: Vec<String>,
    /// Host suffixes whose subdomains are always allowed as CORS origins,
    /// parsed from comma-separated `CORS_ORIGIN_SUFFIXES`.
    pub cors_origin_suffixes: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// Directory served under `/uploads` (default: `wwwroot/uploads`).
    pub uploads_dir: PathBuf,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                | Default                                   |
    /// |------------------------|-------------------------------------------|
    /// | `HOST`                 | `0.0.0.0`                                 |
    /// | `PORT`                 | `8080`                                    |
    /// | `CORS_ORIGINS`         | `http(s)://localhost:3000`, `:3001`       |
    /// | `CORS_ORIGIN_SUFFIXES` | `vercel.app`                              |
    /// | `REQUEST_TIMEOUT_SECS` | `30`                                      |
    /// | `UPLOADS_DIR`          | `wwwroot/uploads`                         |
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "8080".into())
            .parse()
            .expect("PORT must be a valid u16");

        let cors_origins = split_list(
            &std::env::var("CORS_ORIGINS").unwrap_or_else(|_| {
                "http://localhost:3000,http://localhost:3001,\
                 https://localhost:3000,https://localhost:3001"
                    .into()
            }),
        );

        let cors_origin_suffixes = split_list(
            &std::env::var("CORS_ORIGIN_SUFFIXES").unwrap_or_else(|_| "vercel.app".into()),
        );

        let request_timeout_secs: u64 = std::env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        let uploads_dir = std::env::var("UPLOADS_DIR")
            .unwrap_or_else(|_| "wwwroot/uploads".into())
            .into();

        Self {
            host,
            port,
            cors_origins,
            cors_origin_suffixes,
            request_timeout_secs,
            uploads_dir,
        }
    }
}

fn split_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

/// PostgreSQL connection target, broken into its parts.
#[derive(Clone, PartialEq, Eq)]
pub struct DatabaseSettings {
    pub host: String,
    pub port: u16,
    pub database_name: String,
    pub username: String,
    pub password: String,
}

impl fmt::Debug for DatabaseSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DatabaseSettings")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("database_name", &self.database_name)
            .field("username", &self.username)
            .field("password", &"[redacted]")
            .finish()
    }
}

impl DatabaseSettings {
    /// Resolve the database target from the environment.
    ///
    /// `DATABASE_CONNECTION` wins over `DATABASE_URL`; blank values count as
    /// unset.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::resolve(
            std::env::var("DATABASE_CONNECTION").ok().as_deref(),
            std::env::var("DATABASE_URL").ok().as_deref(),
        )
    }

    pub fn resolve(connection: Option<&str>, url: Option<&str>) -> Result<Self, ConfigError> {
        fn present(v: Option<&str>) -> Option<&str> {
            v.map(str::trim).filter(|v| !v.is_empty())
        }

        if let Some(connection) = present(connection) {
            return Self::parse_connection_string(connection);
        }
        if let Some(url) = present(url) {
            return Self::parse_url(url);
        }
        Err(ConfigError::MissingDatabase)
    }

    /// Parse `Host=..;Port=..;Database=..;Username=..;Password=..`.
    ///
    /// Keys are case-insensitive. `Port` defaults to 5432 and `Password` to
    /// empty; the rest are required.
    pub fn parse_connection_string(raw: &str) -> Result<Self, ConfigError> {
        let invalid = |msg: String| ConfigError::InvalidConnectionString(msg);

        let mut host = None;
        let mut port = None;
        let mut database_name = None;
        let mut username = None;
        let mut password = None;

        for pair in raw.split(';').map(str::trim).filter(|p| !p.is_empty()) {
            let (key, value) = pair
                .split_once('=')
                .ok_or_else(|| invalid(format!("expected key=value, got '{pair}'")))?;
            let value = value.trim().to_string();
            match key.trim().to_ascii_lowercase().as_str() {
                "host" | "server" => host = Some(value),
                "port" => {
                    port = Some(
                        value
                            .parse::<u16>()
                            .map_err(|_| invalid(format!("invalid port '{value}'")))?,
                    )
                }
                "database" => database_name = Some(value),
                "username" | "user id" | "user" => username = Some(value),
                "password" => password = Some(value),
                // Pool and TLS tuning keys are left to sqlx defaults.
                _ => {}
            }
        }

        Ok(Self {
            host: host.ok_or_else(|| invalid("missing Host".into()))?,
            port: port.unwrap_or(DEFAULT_PG_PORT),
            database_name: database_name.ok_or_else(|| invalid("missing Database".into()))?,
            username: username.ok_or_else(|| invalid("missing Username".into()))?,
            password: password.unwrap_or_default(),
        })
    }

    /// Parse `postgres[ql]://user:password@host:port/database`.
    ///
    /// Port defaults to 5432; user and password are percent-decoded.
    pub fn parse_url(raw: &str) -> Result<Self, ConfigError> {
        let invalid = |msg: String| ConfigError::InvalidDatabaseUrl(msg);

        let url = Url::parse(raw).map_err(|e| invalid(e.to_string()))?;
        if !matches!(url.scheme(), "postgres" | "postgresql") {
            return Err(invalid(format!("unsupported scheme '{}'", url.scheme())));
        }

        let host = url
            .host_str()
            .filter(|h| !h.is_empty())
            .ok_or_else(|| invalid("missing host".into()))?
            .to_string();

        let database_name = url.path().trim_start_matches('/').to_string();
        if database_name.is_empty() {
            return Err(invalid("missing database name".into()));
        }

        let decode = |s: &str| {
            urlencoding::decode(s)
                .map(|d| d.into_owned())
                .map_err(|e| invalid(e.to_string()))
        };

        Ok(Self {
            host,
            port: url.port().unwrap_or(DEFAULT_PG_PORT),
            database_name,
            username: decode(url.username())?,
            password: decode(url.password().unwrap_or(""))?,
        })
    }

    pub fn connect_options(&self) -> PgConnectOptions {
        PgConnectOptions::new()
            .host(&self.host)
            .port(self.port)
            .database(&self.database_name)
            .username(&self.username)
            .password(&self.password)
    }
}
