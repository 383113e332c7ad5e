//! CSS derived from layout attributes, shared by the frontend generators.
//!
//! Declarations are kept as `(kebab-case property, value)` pairs and
//! rendered either as a JSX style object or as an inline CSS string.

use trellis_core::{Column, GRID_COLUMNS};

/// One CSS declaration.
pub type Declaration = (&'static str, String);

/// Flex container declarations for a column.
///
/// Cosmetic properties are only included when they differ from the
/// column defaults.
pub fn column_declarations(column: &Column) -> Vec<Declaration> {
    let mut decls = vec![
        ("display", "flex".to_string()),
        ("flex-direction", column.orientation.flex_direction().to_string()),
        ("align-items", column.flex_layout.align.css_value().to_string()),
        ("justify-content", column.flex_layout.justify.css_value().to_string()),
        ("gap", gap_value(&column.gap)),
    ];
    if is_set(&column.background_color, "transparent") {
        decls.push(("background-color", column.background_color.clone()));
    }
    if is_set(&column.border_radius, "0") {
        decls.push(("border-radius", column.border_radius.clone()));
    }
    if is_set(&column.border, "none") {
        decls.push(("border", column.border.clone()));
    }
    decls
}

fn is_set(value: &str, default: &str) -> bool {
    let value = value.trim();
    !value.is_empty() && value != default
}

/// Gap in rem; non-numeric input collapses to `0`.
pub fn gap_value(gap: &str) -> String {
    match gap.trim().parse::<f64>() {
        Ok(n) if n.is_finite() && n > 0.0 => format!("{}rem", n),
        _ => "0".to_string(),
    }
}

/// Grid width as a percentage of the row, e.g. `33.33%`.
pub fn width_percent(width: u8) -> String {
    let width = width.clamp(1, GRID_COLUMNS);
    format!("{:.2}%", f64::from(width) * 100.0 / f64::from(GRID_COLUMNS))
}

/// `align-self` for a horizontal alignment keyword.
pub fn align_self(align: &str) -> &'static str {
    match align {
        "center" => "center",
        "right" | "end" => "flex-end",
        "stretch" | "full" => "stretch",
        _ => "flex-start",
    }
}

/// Tag for a text component; unsupported tags become `p`.
pub fn text_element(element: &str) -> &'static str {
    match element {
        "h1" => "h1",
        "h2" => "h2",
        "h3" => "h3",
        "h4" => "h4",
        "h5" => "h5",
        "h6" => "h6",
        "span" => "span",
        _ => "p",
    }
}

/// kebab-case property to camelCase: `flex-direction` -> `flexDirection`.
pub fn camel_property(property: &str) -> String {
    let mut out = String::with_capacity(property.len());
    let mut upper = false;
    for c in property.chars() {
        if c == '-' {
            upper = true;
        } else if upper {
            out.extend(c.to_uppercase());
            upper = false;
        } else {
            out.push(c);
        }
    }
    out
}

/// Body of a JSX style object: `display: 'flex', flexDirection: 'row'`.
pub fn jsx_style(decls: &[Declaration]) -> String {
    decls
        .iter()
        .map(|(property, value)| format!("{}: '{}'", camel_property(property), value))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Inline CSS: `display: flex; flex-direction: row;`.
pub fn inline_css(decls: &[Declaration]) -> String {
    decls
        .iter()
        .map(|(property, value)| format!("{}: {};", property, value))
        .collect::<Vec<_>>()
        .join(" ")
}
