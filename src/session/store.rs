use std::str::FromStr;

use async_trait::async_trait;
use chrono::Utc;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::{FromRow, SqlitePool};
use tokio::sync::Mutex;

use crate::error::SessionError;
use crate::models::User;

/// The token/user pair kept between runs.
#[derive(Debug, Clone, PartialEq)]
pub struct StoredSession {
    pub token: String,
    pub user: User,
}

#[async_trait]
pub trait SessionStore: Send + Sync {
    async fn load(&self) -> Result<Option<StoredSession>, SessionError>;
    async fn save(&self, session: &StoredSession) -> Result<(), SessionError>;
    async fn clear(&self) -> Result<(), SessionError>;
}

#[derive(Default)]
pub struct MemorySessionStore {
    slot: Mutex<Option<StoredSession>>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_session(session: StoredSession) -> Self {
        Self {
            slot: Mutex::new(Some(session)),
        }
    }
}

#[async_trait]
impl SessionStore for MemorySessionStore {
    async fn load(&self) -> Result<Option<StoredSession>, SessionError> {
        Ok(self.slot.lock().await.clone())
    }

    async fn save(&self, session: &StoredSession) -> Result<(), SessionError> {
        *self.slot.lock().await = Some(session.clone());
        Ok(())
    }

    async fn clear(&self) -> Result<(), SessionError> {
        *self.slot.lock().await = None;
        Ok(())
    }
}

#[derive(FromRow)]
struct SessionRow {
    token: String,
    user_json: String,
}

/// Single-row session table in a local SQLite file.
pub struct SqliteSessionStore {
    db: SqlitePool,
}

impl SqliteSessionStore {
    pub async fn connect(database_url: &str) -> Result<Self, SessionError> {
        let options = SqliteConnectOptions::from_str(database_url)?.create_if_missing(true);
        // one connection keeps `sqlite::memory:` a single database
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect_with(options)
            .await?;
        Self::from_pool(pool).await
    }

    pub async fn from_pool(db: SqlitePool) -> Result<Self, SessionError> {
        sqlx::migrate!("./migrations").run(&db).await?;
        Ok(Self { db })
    }
}

#[async_trait]
impl SessionStore for SqliteSessionStore {
    async fn load(&self) -> Result<Option<StoredSession>, SessionError> {
        let row = sqlx::query_as::<_, SessionRow>("SELECT token, user_json FROM session WHERE id = 1")
            .fetch_optional(&self.db)
            .await?;

        match row {
            Some(row) => {
                let user: User = serde_json::from_str(&row.user_json)?;
                Ok(Some(StoredSession {
                    token: row.token,
                    user,
                }))
            }
            None => Ok(None),
        }
    }

    async fn save(&self, session: &StoredSession) -> Result<(), SessionError> {
        let user_json = serde_json::to_string(&session.user)?;
        let now = Utc::now().to_rfc3339();

        sqlx::query(
            r#"
            INSERT INTO session (id, token, user_json, saved_at)
            VALUES (1, ?1, ?2, ?3)
            ON CONFLICT(id) DO UPDATE SET
                token = excluded.token,
                user_json = excluded.user_json,
                saved_at = excluded.saved_at
            "#,
        )
        .bind(&session.token)
        .bind(user_json)
        .bind(now)
        .execute(&self.db)
        .await?;

        Ok(())
    }

    async fn clear(&self) -> Result<(), SessionError> {
        sqlx::query("DELETE FROM session").execute(&self.db).await?;
        Ok(())
    }
}
