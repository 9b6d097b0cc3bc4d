//! CLI output formatting utilities

use colored::Colorize;
use comfy_table::{presets::UTF8_FULL, Cell, Color, ContentArrangement, Table};

use crate::models::{Role, User};

/// Print a success message
pub fn success(message: &str) {
    println!("{} {}", "✓".green(), message);
}

/// Print an error message
pub fn error(message: &str) {
    eprintln!("{} {}", "✗".red(), message);
}

/// Print a warning message
pub fn warn(message: &str) {
    println!("{} {}", "⚠".yellow(), message);
}

/// Print an info message
pub fn info(message: &str) {
    println!("{} {}", "ℹ".blue(), message);
}

/// Print a table of users
pub fn print_user_table(users: &[User]) {
    if users.is_empty() {
        info("No users found. Seed some with 'wiki initdb' or 'wiki adduser'");
        return;
    }

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec![
            Cell::new("Name").fg(Color::Cyan),
            Cell::new("Role").fg(Color::Cyan),
            Cell::new("Can log in").fg(Color::Cyan),
        ]);

    for user in users {
        let role_color = match user.role {
            Role::Editor => Color::Magenta,
            Role::Basic => Color::White,
        };
        let login = if user.password_hash.is_some() { "yes" } else { "no" };

        table.add_row(vec![
            Cell::new(&user.name),
            Cell::new(user.role.to_string()).fg(role_color),
            Cell::new(login),
        ]);
    }

    println!("{table}");
}
