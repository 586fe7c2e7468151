use anyhow::Context;
use std::env;

/// URL for accessing the PostgreSQL database (should contain a schema name in the path)
pub const DB_URL: &str = "DATABASE_URL";
/// Log level configuration for the application. For formatting info, see
/// [tracing_subscriber's EnvFilter documentation](https://docs.rs/tracing-subscriber/latest/tracing_subscriber/filter/struct.EnvFilter.html)
pub const LOG_LEVEL: &str = "LOG_LEVEL";
/// Socket address the HTTP server binds to, e.g. `0.0.0.0:8080`
pub const LISTEN_ADDR: &str = "LISTEN_ADDR";

/// Base URL of the blob object store's REST API (no trailing slash)
pub const STORAGE_API_URL: &str = "STORAGE_API_URL";
/// Base URL of the identity provider's admin REST API (no trailing slash)
pub const AUTH_API_URL: &str = "AUTH_API_URL";
/// Service-role key authorizing the object store and identity provider admin APIs
pub const SERVICE_ROLE_KEY: &str = "SERVICE_ROLE_KEY";

/// Email domain suffix granting access to the evidence review panel
pub const ADMIN_EMAIL_DOMAIN: &str = "ADMIN_EMAIL_DOMAIN";

const DEFAULT_LISTEN_ADDR: &str = "0.0.0.0:8080";
const DEFAULT_ADMIN_EMAIL_DOMAIN: &str = "@admin.com";

/// Application configuration, resolved once at startup and passed into
/// construction rather than read ambiently.
#[derive(Clone)]
pub struct AppConfig {
    pub db_url: String,
    pub listen_addr: String,
    pub admin_email_domain: String,
    pub storage_api_url: String,
    pub auth_api_url: String,
    pub service_role_key: String,
}

impl AppConfig {
    /// Reads the full application configuration from the environment, failing
    /// fast if a required variable is absent.
    pub fn from_env() -> Result<AppConfig, anyhow::Error> {
        Ok(AppConfig {
            db_url: require(DB_URL)?,
            listen_addr: env::var(LISTEN_ADDR).unwrap_or_else(|_| DEFAULT_LISTEN_ADDR.to_owned()),
            admin_email_domain: env::var(ADMIN_EMAIL_DOMAIN)
                .unwrap_or_else(|_| DEFAULT_ADMIN_EMAIL_DOMAIN.to_owned()),
            storage_api_url: require(STORAGE_API_URL)?,
            auth_api_url: require(AUTH_API_URL)?,
            service_role_key: require(SERVICE_ROLE_KEY)?,
        })
    }
}

fn require(var_name: &str) -> Result<String, anyhow::Error> {
    env::var(var_name).with_context(|| format!("required environment variable {var_name} is not set"))
}
