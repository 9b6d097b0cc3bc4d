//! Authentication, session identity and authorization

pub mod jwt;
pub mod middleware;
pub mod policy;

pub use jwt::{Claims, TokenKeys};
pub use middleware::{clear_session_cookie, extract_token, session_cookie, Identity};
pub use policy::{can_add, can_edit, can_view};

use std::collections::HashMap;
use std::sync::{LazyLock, Mutex, PoisonError};

use crate::db::{users, Database};
use crate::error::{Error, Result};
use crate::models::User;

/// Stand-in hashes, one per bcrypt cost, verified against when a login has no
/// real hash to check so that every failed login pays for one bcrypt verify
static DUMMY_HASHES: LazyLock<Mutex<HashMap<u32, String>>> = LazyLock::new(Default::default);

fn dummy_hash(cost: u32) -> Result<String> {
    let mut hashes = DUMMY_HASHES.lock().unwrap_or_else(PoisonError::into_inner);
    if let Some(hash) = hashes.get(&cost) {
        return Ok(hash.clone());
    }
    let hash = bcrypt::hash("no-such-password", cost)?;
    hashes.insert(cost, hash.clone());
    Ok(hash)
}

/// Check a login name and password against the credential store.
///
/// Unknown users, users without a password hash and wrong passwords all
/// produce [`Error::AuthFailure`], each after one bcrypt verify at
/// `bcrypt_cost`. Storage errors are passed through.
pub async fn authenticate(
    db: &Database,
    login: &str,
    password: &str,
    bcrypt_cost: u32,
) -> Result<User> {
    let user = users::find_by_name(db.pool(), login).await?;

    let verified = match &user {
        Some(user) if user.password_hash.is_some() => user.check_password(password),
        _ => {
            // Result discarded: there is no account to let in
            let _ = bcrypt::verify(password, &dummy_hash(bcrypt_cost)?);
            false
        }
    };

    match user {
        Some(user) if verified => {
            tracing::info!("User '{}' logged in", login);
            Ok(user)
        }
        Some(_) => {
            tracing::info!("Failed login for '{}'", login);
            Err(Error::AuthFailure)
        }
        None => {
            tracing::info!("Failed login for unknown user '{}'", login);
            Err(Error::AuthFailure)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Role;

    async fn test_db() -> Database {
        let db = Database::connect("sqlite::memory:").await.unwrap();
        db.init_schema().await.unwrap();

        let mut basic = User::new("basic", Role::Basic);
        basic.set_password("basic", 4).unwrap();
        users::insert(db.pool(), &basic).await.unwrap();
        users::insert(db.pool(), &User::new("basic_2", Role::Basic))
            .await
            .unwrap();
        db
    }

    #[tokio::test]
    async fn test_authenticate_success() {
        let db = test_db().await;
        let user = authenticate(&db, "basic", "basic", 4).await.unwrap();
        assert_eq!(user.name, "basic");
        assert_eq!(user.role, Role::Basic);
    }

    #[tokio::test]
    async fn test_authenticate_wrong_password() {
        let db = test_db().await;
        let result = authenticate(&db, "basic", "incorrect", 4).await;
        assert!(matches!(result, Err(Error::AuthFailure)));
    }

    #[tokio::test]
    async fn test_authenticate_null_hash() {
        let db = test_db().await;
        let result = authenticate(&db, "basic_2", "basic", 6).await;
        assert!(matches!(result, Err(Error::AuthFailure)));
        let result = authenticate(&db, "basic_2", "", 6).await;
        assert!(matches!(result, Err(Error::AuthFailure)));
    }

    #[tokio::test]
    async fn test_authenticate_unknown_user() {
        let db = test_db().await;
        let result = authenticate(&db, "nobody", "basic", 5).await;
        assert!(matches!(result, Err(Error::AuthFailure)));
    }

    fn cached_dummy(cost: u32) -> Option<String> {
        DUMMY_HASHES
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&cost)
            .cloned()
    }

    // Costs 5 and 6 are only used by the tests below, so the cache entry can
    // only come from their failed logins
    #[tokio::test]
    async fn test_unknown_user_verifies_against_dummy_hash() {
        let db = test_db().await;
        let result = authenticate(&db, "ghost", "no-such-password", 5).await;
        assert!(matches!(result, Err(Error::AuthFailure)));

        let hash = cached_dummy(5).expect("dummy hash not built");
        assert!(hash.starts_with("$2b$05$"));
    }

    #[tokio::test]
    async fn test_null_hash_verifies_against_dummy_hash() {
        let db = test_db().await;
        let result = authenticate(&db, "basic_2", "no-such-password", 6).await;
        assert!(matches!(result, Err(Error::AuthFailure)));

        let hash = cached_dummy(6).expect("dummy hash not built");
        assert!(hash.starts_with("$2b$06$"));
    }

    #[test]
    fn test_dummy_hash_is_reused() {
        let first = dummy_hash(4).unwrap();
        assert_eq!(dummy_hash(4).unwrap(), first);
        assert!(!bcrypt::verify("basic", &first).unwrap());
    }
}
