pub use crate::utils::config::Config;
pub use crate::utils::database;
use crate::modules::{
    product::repository::{InMemoryProductRepository, PgProductRepository, ProductRepository},
    user::repository::{InMemoryUserRepository, PgUserRepository, UserRepository},
};
use async_trait::async_trait;
use chrono::Duration;
use std::{fmt, path::PathBuf, sync::Arc};

#[derive(Clone, Debug, PartialEq)]
pub enum AppEnvironment {
    Production,
    Development,
}

impl AppEnvironment {
    pub fn from(raw_environment: String) -> Self {
        match raw_environment.as_ref() {
            "production" => Self::Production,
            _ => Self::Development,
        }
    }
}

#[derive(Clone)]
pub struct AppContext {
    pub host: String,
    pub environment: AppEnvironment,
    pub port: u16,
    pub url: String,
}

#[derive(Clone)]
pub struct AuthContext {
    pub jwt_secret: String,
    pub access_token_ttl: Duration,
}

#[derive(Clone)]
pub struct StorageContext {
    /// Absolute, canonical directory that receives uploaded files.
    pub uploads_dir: PathBuf,
}

#[derive(Clone)]
pub struct Context {
    pub app: AppContext,
    pub auth: AuthContext,
    pub storage: StorageContext,
    pub products: Arc<dyn ProductRepository>,
    pub users: Arc<dyn UserRepository>,
}

#[derive(Debug)]
pub enum Error {
    Database(database::Error),
    Storage(std::io::Error),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Database(err) => write!(f, "database error: {}", err),
            Self::Storage(err) => write!(f, "failed to prepare uploads directory: {}", err),
        }
    }
}

impl std::error::Error for Error {}

#[async_trait]
pub trait ToContext {
    async fn to_context(self) -> Result<Context, Error>;
}

#[async_trait]
impl ToContext for Config {
    async fn to_context(self) -> Result<Context, Error> {
        let (products, users): (Arc<dyn ProductRepository>, Arc<dyn UserRepository>) =
            match self.database.url {
                Some(url) => {
                    let db_conn = database::connect(url.as_str())
                        .await
                        .map_err(Error::Database)?;
                    database::migrate(&db_conn).await.map_err(Error::Database)?;

                    (
                        Arc::new(PgProductRepository::new(db_conn.pool.clone())),
                        Arc::new(PgUserRepository::new(db_conn.pool)),
                    )
                }
                None => {
                    tracing::warn!("DATABASE_URL not set, records will only be kept in memory");
                    (
                        Arc::new(InMemoryProductRepository::default()),
                        Arc::new(InMemoryUserRepository::default()),
                    )
                }
            };

        tokio::fs::create_dir_all(&self.storage.uploads_dir)
            .await
            .map_err(Error::Storage)?;
        let uploads_dir = tokio::fs::canonicalize(&self.storage.uploads_dir)
            .await
            .map_err(Error::Storage)?;

        Ok(Context {
            app: AppContext {
                host: self.app.host,
                environment: self.app.environment,
                port: self.app.port,
                url: self.app.url,
            },
            auth: AuthContext {
                jwt_secret: self.auth.jwt_secret,
                access_token_ttl: Duration::hours(self.auth.jwt_expiry_hours),
            },
            storage: StorageContext { uploads_dir },
            products,
            users,
        })
    }
}
