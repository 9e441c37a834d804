//! Application configuration loaded from environment variables.

use std::env;

use quill_infra::{DatabaseConfig, JwtConfig};
use quill_shared::dto::RegisterDto;

/// Application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub database: Option<DatabaseConfig>,
    pub jwt: JwtConfig,
    pub admin: Option<AdminConfig>,
    pub listing: ListingDefaults,
}

/// Administrator account created at start-up when configured.
#[derive(Debug, Clone)]
pub struct AdminConfig {
    pub name: String,
    pub username: String,
    pub email: String,
    pub password: String,
}

impl AdminConfig {
    pub fn to_register_dto(&self) -> RegisterDto {
        RegisterDto {
            name: self.name.clone(),
            username: self.username.clone(),
            email: self.email.clone(),
            password: self.password.clone(),
        }
    }
}

/// Defaults for `GET /api/posts` query parameters.
#[derive(Debug, Clone)]
pub struct ListingDefaults {
    pub page_no: u64,
    pub page_size: u64,
    pub sort_by: String,
    pub sort_dir: String,
}

impl Default for ListingDefaults {
    fn default() -> Self {
        Self {
            page_no: 0,
            page_size: 10,
            sort_by: "id".to_string(),
            sort_dir: "asc".to_string(),
        }
    }
}

impl AppConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        let database = env::var("DATABASE_URL").ok().map(|url| {
            let mut db = DatabaseConfig::new(url);
            db.max_connections = parse_var("DB_MAX_CONNECTIONS").unwrap_or(db.max_connections);
            db.min_connections = parse_var("DB_MIN_CONNECTIONS").unwrap_or(db.min_connections);
            db
        });

        Self {
            host: env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string()),
            port: parse_var("PORT").unwrap_or(8080),
            database,
            jwt: JwtConfig::from_env(),
            admin: Self::admin_from_env(),
            listing: Self::listing_from_env(),
        }
    }

    /// `ADMIN_USERNAME` and `ADMIN_PASSWORD` are both required; name and
    /// email fall back to values derived from the username.
    fn admin_from_env() -> Option<AdminConfig> {
        let username = env::var("ADMIN_USERNAME").ok()?;
        let password = env::var("ADMIN_PASSWORD").ok()?;

        Some(AdminConfig {
            name: env::var("ADMIN_NAME").unwrap_or_else(|_| "Administrator".to_string()),
            email: env::var("ADMIN_EMAIL").unwrap_or_else(|_| format!("{username}@localhost.local")),
            username,
            password,
        })
    }

    fn listing_from_env() -> ListingDefaults {
        let defaults = ListingDefaults::default();
        ListingDefaults {
            page_no: defaults.page_no,
            page_size: parse_var("DEFAULT_PAGE_SIZE").unwrap_or(defaults.page_size),
            sort_by: env::var("DEFAULT_SORT_BY").unwrap_or(defaults.sort_by),
            sort_dir: env::var("DEFAULT_SORT_DIR").unwrap_or(defaults.sort_dir),
        }
    }
}

fn parse_var<T: std::str::FromStr>(key: &str) -> Option<T> {
    env::var(key).ok().and_then(|s| s.parse().ok())
}
