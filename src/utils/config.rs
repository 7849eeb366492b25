use crate::types::AppEnvironment;
use std::{env, fmt, path::PathBuf};

#[derive(Clone)]
pub struct DatabaseConfig {
    pub url: Option<String>,
}

#[derive(Clone)]
pub struct AppConfig {
    pub host: String,
    pub environment: AppEnvironment,
    pub port: u16,
    pub url: String,
}

#[derive(Clone)]
pub struct AuthConfig {
    pub jwt_secret: String,
    pub jwt_expiry_hours: i64,
}

#[derive(Clone)]
pub struct StorageConfig {
    pub uploads_dir: PathBuf,
}

#[derive(Clone)]
pub struct Config {
    pub database: DatabaseConfig,
    pub app: AppConfig,
    pub auth: AuthConfig,
    pub storage: StorageConfig,
}

#[derive(Debug, PartialEq)]
pub enum Error {
    MissingVar(&'static str),
    InvalidVar(&'static str, String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingVar(name) => write!(f, "{} not set", name),
            Self::InvalidVar(name, value) => write!(f, "invalid value for {}: {:?}", name, value),
        }
    }
}

impl std::error::Error for Error {}

fn non_empty_var(name: &'static str) -> Option<String> {
    env::var(name).ok().filter(|value| !value.trim().is_empty())
}

impl Config {
    pub fn from_env() -> Result<Self, Error> {
        Self::from_lookup(non_empty_var)
    }

    fn from_lookup<F>(lookup: F) -> Result<Self, Error>
    where
        F: Fn(&'static str) -> Option<String>,
    {
        let database_url = lookup("DATABASE_URL");
        let host = lookup("HOST").unwrap_or_else(|| "0.0.0.0".to_string());
        let environment = lookup("APP_ENV").unwrap_or_else(|| "development".to_string());
        let port = match lookup("PORT") {
            Some(port) => port
                .parse::<u16>()
                .map_err(|_| Error::InvalidVar("PORT", port))?,
            None => 8000,
        };
        let url = lookup("URL").unwrap_or_else(|| format!("http://{}:{}", host, port));
        let jwt_secret = lookup("JWT_SECRET").ok_or(Error::MissingVar("JWT_SECRET"))?;
        let jwt_expiry_hours = match lookup("JWT_EXPIRY_HOURS") {
            Some(hours) => hours
                .parse::<i64>()
                .ok()
                .filter(|hours| *hours > 0)
                .ok_or(Error::InvalidVar("JWT_EXPIRY_HOURS", hours))?,
            None => 24,
        };
        let uploads_dir = lookup("UPLOADS_DIR").unwrap_or_else(|| "uploads".to_string());

        Ok(Config {
            database: DatabaseConfig { url: database_url },
            app: AppConfig {
                host,
                environment: AppEnvironment::from(environment),
                port,
                url,
            },
            auth: AuthConfig {
                jwt_secret,
                jwt_expiry_hours,
            },
            storage: StorageConfig {
                uploads_dir: PathBuf::from(uploads_dir),
            },
        })
    }
}
