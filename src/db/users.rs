//! User queries

use sqlx::SqliteExecutor;

use crate::error::{Error, Result};
use crate::models::User;

pub async fn find_by_name<'e, E>(executor: E, name: &str) -> Result<Option<User>>
where
    E: SqliteExecutor<'e>,
{
    let user = sqlx::query_as::<_, User>(
        "SELECT id, name, role, password_hash FROM users WHERE name = ?",
    )
    .bind(name)
    .fetch_optional(executor)
    .await?;
    Ok(user)
}

/// Insert a user and return its id
pub async fn insert<'e, E>(executor: E, user: &User) -> Result<i64>
where
    E: SqliteExecutor<'e>,
{
    let result = sqlx::query("INSERT INTO users (name, role, password_hash) VALUES (?, ?, ?)")
        .bind(&user.name)
        .bind(user.role)
        .bind(&user.password_hash)
        .execute(executor)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(ref db) if db.is_unique_violation() => {
                Error::UserAlreadyExists(user.name.clone())
            }
            other => Error::Database(other),
        })?;
    Ok(result.last_insert_rowid())
}

pub async fn list<'e, E>(executor: E) -> Result<Vec<User>>
where
    E: SqliteExecutor<'e>,
{
    let users = sqlx::query_as::<_, User>(
        "SELECT id, name, role, password_hash FROM users ORDER BY name ASC",
    )
    .fetch_all(executor)
    .await?;
    Ok(users)
}
