use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};
use time::OffsetDateTime;

use super::dto::UserPayload;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    pub id: String,
    pub username: String,
    pub password: String,
    pub role: String,
    pub email: Option<String>,
    pub name: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

const USER_COLUMNS: &str = "id, username, password, role, email, name, phone, address, created_at";

pub async fn list(db: &PgPool) -> anyhow::Result<Vec<User>> {
    let users = sqlx::query_as::<_, User>(&format!(
        "SELECT {USER_COLUMNS} FROM users ORDER BY created_at DESC"
    ))
    .fetch_all(db)
    .await?;
    Ok(users)
}

/// Plaintext credential match, as the store has always held passwords in the
/// clear for this tool. Returns `None` on any mismatch.
pub async fn find_by_credentials(
    db: &PgPool,
    username: &str,
    password: &str,
) -> anyhow::Result<Option<User>> {
    let user = sqlx::query_as::<_, User>(&format!(
        "SELECT {USER_COLUMNS} FROM users WHERE username = $1 AND password = $2"
    ))
    .bind(username)
    .bind(password)
    .fetch_optional(db)
    .await?;
    Ok(user)
}

pub async fn insert(db: &PgPool, id: &str, payload: &UserPayload) -> anyhow::Result<User> {
    let user = sqlx::query_as::<_, User>(&format!(
        r#"
        INSERT INTO users (id, username, password, role, email, name, phone, address)
        VALUES ($1, $2, $3, 'client', $4, $5, $6, $7)
        RETURNING {USER_COLUMNS}
        "#
    ))
    .bind(id)
    .bind(&payload.username)
    .bind(&payload.password)
    .bind(&payload.email)
    .bind(&payload.name)
    .bind(&payload.phone)
    .bind(&payload.address)
    .fetch_one(db)
    .await?;
    Ok(user)
}

pub async fn update(
    db: &PgPool,
    id: &str,
    payload: &UserPayload,
) -> anyhow::Result<Option<User>> {
    let user = sqlx::query_as::<_, User>(&format!(
        r#"
        UPDATE users
        SET username = $2, password = $3, email = $4, name = $5, phone = $6, address = $7
        WHERE id = $1
        RETURNING {USER_COLUMNS}
        "#
    ))
    .bind(id)
    .bind(&payload.username)
    .bind(&payload.password)
    .bind(&payload.email)
    .bind(&payload.name)
    .bind(&payload.phone)
    .bind(&payload.address)
    .fetch_optional(db)
    .await?;
    Ok(user)
}

pub async fn delete(db: &PgPool, id: &str) -> anyhow::Result<()> {
    sqlx::query("DELETE FROM users WHERE id = $1")
        .bind(id)
        .execute(db)
        .await?;
    Ok(())
}
