//! Page queries

use sqlx::SqliteExecutor;

use crate::error::{Error, Result};
use crate::models::{NewPage, Page};

const SELECT_PAGE: &str = r#"
    SELECT p.id, p.name, p.data, p.creator_id,
           u.name AS creator_name, u.role AS creator_role
    FROM pages p
    JOIN users u ON u.id = p.creator_id
"#;

/// Look a page up by name
pub async fn find_by_name<'e, E>(executor: E, name: &str) -> Result<Option<Page>>
where
    E: SqliteExecutor<'e>,
{
    let page = sqlx::query_as::<_, Page>(&format!("{SELECT_PAGE} WHERE p.name = ?"))
        .bind(name)
        .fetch_optional(executor)
        .await?;
    Ok(page)
}

/// Like [`find_by_name`] but a missing page is an error
pub async fn resolve<'e, E>(executor: E, name: &str) -> Result<Page>
where
    E: SqliteExecutor<'e>,
{
    find_by_name(executor, name)
        .await?
        .ok_or_else(|| Error::PageNotFound(name.to_string()))
}

pub async fn exists<'e, E>(executor: E, name: &str) -> Result<bool>
where
    E: SqliteExecutor<'e>,
{
    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM pages WHERE name = ?")
        .bind(name)
        .fetch_one(executor)
        .await?;
    Ok(count > 0)
}

/// Names out of `candidates` that exist as pages
pub async fn existing_names<'e, E>(executor: E, candidates: &[String]) -> Result<Vec<String>>
where
    E: SqliteExecutor<'e>,
{
    if candidates.is_empty() {
        return Ok(Vec::new());
    }
    let placeholders = vec!["?"; candidates.len()].join(", ");
    let sql = format!("SELECT name FROM pages WHERE name IN ({placeholders})");
    let mut query = sqlx::query_scalar::<_, String>(&sql);
    for name in candidates {
        query = query.bind(name);
    }
    Ok(query.fetch_all(executor).await?)
}

/// Insert a page and return its id
pub async fn insert<'e, E>(executor: E, page: &NewPage) -> Result<i64>
where
    E: SqliteExecutor<'e>,
{
    let result = sqlx::query("INSERT INTO pages (name, data, creator_id) VALUES (?, ?, ?)")
        .bind(&page.name)
        .bind(&page.data)
        .bind(page.creator_id)
        .execute(executor)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(ref db) if db.is_unique_violation() => {
                Error::PageAlreadyExists(page.name.clone())
            }
            other => Error::Database(other),
        })?;
    Ok(result.last_insert_rowid())
}

/// Replace a page's content
pub async fn update_data<'e, E>(executor: E, name: &str, data: &str) -> Result<()>
where
    E: SqliteExecutor<'e>,
{
    let result = sqlx::query("UPDATE pages SET data = ? WHERE name = ?")
        .bind(data)
        .bind(name)
        .execute(executor)
        .await?;
    if result.rows_affected() == 0 {
        return Err(Error::PageNotFound(name.to_string()));
    }
    Ok(())
}
