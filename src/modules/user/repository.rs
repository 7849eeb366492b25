use async_trait::async_trait;
use chrono::{NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use std::collections::HashMap;
use tokio::sync::RwLock;

type Result<T> = std::result::Result<T, Error>;

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, sqlx::FromRow)]
pub struct User {
    pub id: String,
    pub is_admin: bool,
    pub created_at: NaiveDateTime,
}

pub fn is_admin(user: &User) -> bool {
    user.is_admin
}

pub struct UpsertUserPayload {
    pub id: String,
    pub is_admin: bool,
}

#[derive(Debug)]
pub enum Error {
    UnexpectedError,
}

#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn find_by_id(&self, id: &str) -> Result<Option<User>>;
    async fn upsert(&self, payload: UpsertUserPayload) -> Result<User>;
}

pub struct PgUserRepository {
    pool: PgPool,
}

impl PgUserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserRepository for PgUserRepository {
    async fn find_by_id(&self, id: &str) -> Result<Option<User>> {
        sqlx::query_as::<_, User>("SELECT id, is_admin, created_at FROM users WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|err| {
                tracing::error!("Error occurred while fetching user with id {}: {}", id, err);
                Error::UnexpectedError
            })
    }

    async fn upsert(&self, payload: UpsertUserPayload) -> Result<User> {
        sqlx::query_as::<_, User>(
            "
            INSERT INTO users (id, is_admin)
            VALUES ($1, $2)
            ON CONFLICT (id) DO UPDATE SET is_admin = EXCLUDED.is_admin
            RETURNING id, is_admin, created_at
            ",
        )
        .bind(&payload.id)
        .bind(payload.is_admin)
        .fetch_one(&self.pool)
        .await
        .map_err(|err| {
            tracing::error!("Error occurred while upserting user {}: {}", payload.id, err);
            Error::UnexpectedError
        })
    }
}

#[derive(Default)]
pub struct InMemoryUserRepository {
    users: RwLock<HashMap<String, User>>,
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn find_by_id(&self, id: &str) -> Result<Option<User>> {
        Ok(self.users.read().await.get(id).cloned())
    }

    async fn upsert(&self, payload: UpsertUserPayload) -> Result<User> {
        let mut users = self.users.write().await;
        let user = users
            .entry(payload.id.clone())
            .and_modify(|user| user.is_admin = payload.is_admin)
            .or_insert_with(|| User {
                id: payload.id,
                is_admin: payload.is_admin,
                created_at: Utc::now().naive_utc(),
            });

        Ok(user.clone())
    }
}
