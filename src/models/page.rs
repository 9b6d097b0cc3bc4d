//! Wiki page records

use serde::Serialize;
use sqlx::FromRow;

use super::user::Role;

/// A stored page joined with the user who created it
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Page {
    pub id: i64,
    pub name: String,
    pub data: String,
    pub creator_id: i64,
    pub creator_name: String,
    pub creator_role: Role,
}

/// Fields needed to insert a page
#[derive(Debug, Clone)]
pub struct NewPage {
    pub name: String,
    pub data: String,
    pub creator_id: i64,
}

/// Page names are a single path segment
pub fn is_valid_page_name(name: &str) -> bool {
    !name.is_empty()
        && name.len() <= 255
        && !name.contains('/')
        && !name.chars().any(char::is_control)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_names() {
        assert!(is_valid_page_name("FrontPage"));
        assert!(is_valid_page_name("Some Page"));
        assert!(!is_valid_page_name(""));
        assert!(!is_valid_page_name("a/b"));
        assert!(!is_valid_page_name("line\nbreak"));
    }
}
