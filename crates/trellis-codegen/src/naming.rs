//! Naming and literal helpers shared by the generators.

use convert_case::{Case, Casing};

/// Convert to PascalCase.
pub fn pascal_case(s: &str) -> String {
    s.to_case(Case::Pascal)
}

/// Convert to snake_case.
pub fn snake_case(s: &str) -> String {
    s.to_case(Case::Snake)
}

/// Upper-case the first character only: `blogPost` -> `BlogPost`, `user_id` -> `User_id`.
pub fn capitalize_first(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Lower-case the first character only.
pub fn lower_first(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_lowercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// English plural for route segments: `user` -> `users`, `category` -> `categories`.
pub fn pluralize(s: &str) -> String {
    if s.is_empty() {
        return String::new();
    }
    let lower = s.to_lowercase();
    if ["s", "x", "z", "ch", "sh"].iter().any(|end| lower.ends_with(end)) {
        return format!("{}es", s);
    }
    if let Some(stem) = s.strip_suffix('y').or_else(|| s.strip_suffix('Y')) {
        let before = stem.chars().last().map(|c| c.to_ascii_lowercase());
        if matches!(before, Some(c) if !"aeiou".contains(c)) {
            return format!("{}ies", stem);
        }
    }
    format!("{}s", s)
}

/// Make an id usable inside a CSS class name: every non-alphanumeric becomes `-`.
pub fn css_ident(s: &str) -> String {
    s.chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '-' })
        .collect()
}

/// Single-quoted Python string literal.
pub fn py_str(s: &str) -> String {
    format!("'{}'", s.replace('\\', "\\\\").replace('\'', "\\'"))
}
