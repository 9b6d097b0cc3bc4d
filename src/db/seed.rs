//! Initial users and front page

use super::{pages, users, Database};
use crate::error::Result;
use crate::models::{NewPage, Role, User};

/// Seed the default `editor` and `basic` accounts and the front page.
///
/// Rows that already exist are left alone, so running it twice is harmless.
pub async fn seed(db: &Database, front_page: &str, bcrypt_cost: u32) -> Result<()> {
    let mut tx = db.begin().await?;

    let editor_id = ensure_user(&mut tx, "editor", Role::Editor, bcrypt_cost).await?;
    ensure_user(&mut tx, "basic", Role::Basic, bcrypt_cost).await?;

    if !pages::exists(&mut *tx, front_page).await? {
        pages::insert(
            &mut *tx,
            &NewPage {
                name: front_page.to_string(),
                data: "This is the front page".to_string(),
                creator_id: editor_id,
            },
        )
        .await?;
        tracing::info!("Created page {}", front_page);
    }

    tx.commit().await?;
    Ok(())
}

async fn ensure_user(
    tx: &mut sqlx::Transaction<'static, sqlx::Sqlite>,
    name: &str,
    role: Role,
    bcrypt_cost: u32,
) -> Result<i64> {
    if let Some(existing) = users::find_by_name(&mut **tx, name).await? {
        return Ok(existing.id);
    }
    let mut user = User::new(name, role);
    user.set_password(name, bcrypt_cost)?;
    let id = users::insert(&mut **tx, &user).await?;
    tracing::info!("Created {} user '{}'", role, name);
    Ok(id)
}
