//! Who may view, edit and add pages
//!
//! | user      | view | add | edit                              |
//! |-----------|------|-----|-----------------------------------|
//! | anonymous | yes  | no  | no                                |
//! | basic     | yes  | yes | pages not created by an editor    |
//! | editor    | yes  | yes | any page                          |

use crate::models::{Page, Role, User};

/// Anyone may read any page
pub fn can_view(_user: Option<&User>, _page: &Page) -> bool {
    true
}

pub fn can_edit(user: Option<&User>, page: &Page) -> bool {
    match user.map(|u| u.role) {
        None => false,
        Some(Role::Editor) => true,
        Some(Role::Basic) => page.creator_role != Role::Editor,
    }
}

pub fn can_add(user: Option<&User>) -> bool {
    matches!(user.map(|u| u.role), Some(Role::Basic | Role::Editor))
}
