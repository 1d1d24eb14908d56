use crate::auth::jwt::JwtConfig;

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
    /// Whether the server runs in production mode (`APP_ENV=production`).
    ///
    /// In production, the answer feed is only served to requests whose
    /// `Origin` header is in [`trusted_feed_origins`](Self::trusted_feed_origins);
    /// other origins receive an empty feed.
    pub production: bool,
    /// Origins allowed to read the answer feed in production.
    pub trusted_feed_origins: Vec<String>,
    /// S3 bucket holding topic page images.
    pub topic_bucket: String,
    /// JWT token configuration (secret, expiry duration).
    pub jwt: JwtConfig,
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
    /// | `APP_ENV`              | `development`              |
    /// | `TRUSTED_FEED_ORIGINS` | `CORS_ORIGINS` value       |
    /// | `TOPIC_BUCKET`         | `qboard-topic-images`      |
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "3000".into())
            .parse()
            .expect("PORT must be a valid u16");

        let cors_origins = parse_origin_list(
            &std::env::var("CORS_ORIGINS").unwrap_or_else(|_| "http://localhost:5173".into()),
        );

        let request_timeout_secs: u64 = std::env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        let production = std::env::var("APP_ENV")
            .map(|v| v.eq_ignore_ascii_case("production"))
            .unwrap_or(false);

        let trusted_feed_origins = match std::env::var("TRUSTED_FEED_ORIGINS") {
            Ok(raw) => parse_origin_list(&raw),
            Err(_) => cors_origins.clone(),
        };

        let topic_bucket =
            std::env::var("TOPIC_BUCKET").unwrap_or_else(|_| "qboard-topic-images".into());

        let jwt = JwtConfig::from_env();

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            production,
            trusted_feed_origins,
            topic_bucket,
            jwt,
        }
    }
}

/// Split a comma-separated origin list, trimming whitespace and dropping
/// empty entries.
fn parse_origin_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}
