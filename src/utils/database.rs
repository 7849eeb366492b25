use sqlx::{postgres::PgPoolOptions, PgPool};
use std::fmt;

#[derive(Clone)]
pub struct DatabaseConnection {
    pub pool: PgPool,
}

#[derive(Debug)]
pub enum Error {
    ConnectionFailed(sqlx::Error),
    MigrationFailed(sqlx::migrate::MigrateError),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ConnectionFailed(err) => write!(f, "failed to connect: {}", err),
            Self::MigrationFailed(err) => write!(f, "failed to run migrations: {}", err),
        }
    }
}

pub async fn connect(database_url: &str) -> Result<DatabaseConnection, Error> {
    PgPoolOptions::new()
        .max_connections(4)
        .connect(database_url)
        .await
        .map(|pool| DatabaseConnection { pool })
        .map_err(|err| {
            tracing::error!("Error connecting to database: {}", err);
            Error::ConnectionFailed(err)
        })
}

pub async fn migrate(db_conn: &DatabaseConnection) -> Result<(), Error> {
    sqlx::migrate!().run(&db_conn.pool).await.map_err(|err| {
        tracing::error!("{}", err);
        Error::MigrationFailed(err)
    })
}
