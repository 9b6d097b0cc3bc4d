//! User records and password handling

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::fmt;
use std::str::FromStr;

use crate::error::{Error, Result};

/// Coarse permission tier attached to a user
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(rename_all = "lowercase")]
pub enum Role {
    /// May add pages and edit pages not created by an editor
    Basic,
    /// May add and edit any page
    Editor,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::Basic => write!(f, "basic"),
            Role::Editor => write!(f, "editor"),
        }
    }
}

impl FromStr for Role {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "basic" => Ok(Role::Basic),
            "editor" => Ok(Role::Editor),
            other => Err(Error::InvalidRole(other.to_string())),
        }
    }
}

/// A wiki account
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct User {
    pub id: i64,
    /// Unique login name
    pub name: String,
    pub role: Role,
    /// bcrypt hash; `None` means the account cannot log in
    #[serde(skip_serializing)]
    pub password_hash: Option<String>,
}

impl User {
    /// Create an unsaved user without a password
    pub fn new(name: impl Into<String>, role: Role) -> Self {
        Self {
            id: 0,
            name: name.into(),
            role,
            password_hash: None,
        }
    }

    /// Hash and store a new password
    pub fn set_password(&mut self, password: &str, cost: u32) -> Result<()> {
        self.password_hash = Some(bcrypt::hash(password, cost)?);
        Ok(())
    }

    /// Verify a plaintext password. A missing or malformed hash never matches.
    pub fn check_password(&self, password: &str) -> bool {
        let Some(hash) = self.password_hash.as_deref() else {
            return false;
        };
        match bcrypt::verify(password, hash) {
            Ok(matches) => matches,
            Err(e) => {
                tracing::warn!("Stored password hash for '{}' is unusable: {}", self.name, e);
                false
            }
        }
    }

    pub fn is_editor(&self) -> bool {
        self.role == Role::Editor
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_password() {
        let mut user = User::new("basic", Role::Basic);
        user.set_password("basic", 4).unwrap();
        assert!(user.check_password("basic"));
        assert!(!user.check_password("incorrect"));
    }

    #[test]
    fn test_null_hash_never_matches() {
        let user = User::new("basic_2", Role::Basic);
        assert!(!user.check_password(""));
        assert!(!user.check_password("basic"));
    }

    #[test]
    fn test_garbage_hash_does_not_panic() {
        let mut user = User::new("broken", Role::Basic);
        user.password_hash = Some("not-a-bcrypt-hash".to_string());
        assert!(!user.check_password("anything"));
    }

    #[test]
    fn test_role_round_trip() {
        assert_eq!("editor".parse::<Role>().unwrap(), Role::Editor);
        assert_eq!(Role::Basic.to_string(), "basic");
        assert!(matches!("admin".parse::<Role>(), Err(Error::InvalidRole(_))));
    }
}
