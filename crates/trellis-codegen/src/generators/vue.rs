//! Vue single-file component generator.

use super::{LayoutGenerator, DEFAULT_COMPONENT_NAME};
use crate::naming::css_ident;
use crate::style;
use trellis_core::{Column, Component, ComponentProps, Layout};

/// Fixed utility rules emitted in every `<style>` block.
const UTILITY_CSS: &str = "\
.row {
  display: flex;
  flex-wrap: wrap;
  margin: 0 -0.5rem;
}

.column {
  padding: 0 0.5rem;
  box-sizing: border-box;
}";

/// Vue code generator.
#[derive(Debug, Clone)]
pub struct VueGenerator {
    component_name: String,
}

impl VueGenerator {
    pub fn new() -> Self {
        Self {
            component_name: DEFAULT_COMPONENT_NAME.to_string(),
        }
    }

    /// Use a different component name in the script block and file name.
    pub fn with_component_name(mut self, name: impl Into<String>) -> Self {
        self.component_name = name.into();
        self
    }

    fn template(&self, layout: &Layout) -> String {
        let rows = rows_of(layout);
        let mut lines = vec!["<template>".to_string()];
        if rows.is_empty() {
            lines.push(format!(
                "  <div class=\"layout-container\" style=\"width: {};\"></div>",
                layout.container_width
            ));
        } else {
            lines.push(format!(
                "  <div class=\"layout-container\" style=\"width: {};\">",
                layout.container_width
            ));
            for columns in &rows {
                lines.push("    <div class=\"row\">".to_string());
                for column in columns.iter() {
                    column_markup(column, 6, &mut lines);
                }
                lines.push("    </div>".to_string());
            }
            lines.push("  </div>".to_string());
        }
        lines.push("</template>".to_string());
        lines.join("\n")
    }

    fn script(&self) -> String {
        [
            "<script>".to_string(),
            "export default {".to_string(),
            format!("  name: '{}',", self.component_name),
            "  data() {".to_string(),
            "    return {};".to_string(),
            "  },".to_string(),
            "  methods: {},".to_string(),
            "};".to_string(),
            "</script>".to_string(),
        ]
        .join("\n")
    }

    fn style_block(&self, layout: &Layout) -> String {
        let mut rules = vec![UTILITY_CSS.to_string()];
        for columns in rows_of(layout) {
            collect_rules(columns, &mut rules);
        }
        format!("<style scoped>\n{}\n</style>", rules.join("\n\n"))
    }
}

impl Default for VueGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl LayoutGenerator for VueGenerator {
    fn framework_name(&self) -> &'static str {
        "vue"
    }

    fn file_name(&self) -> String {
        format!("{}.vue", self.component_name)
    }

    fn generate(&self, layout: &Layout) -> String {
        format!(
            "{}\n\n{}\n\n{}\n",
            self.template(layout),
            self.script(),
            self.style_block(layout)
        )
    }
}

/// Column groups to render as rows: explicit rows when present, otherwise
/// the root columns as one implicit row.
fn rows_of(layout: &Layout) -> Vec<&[Column]> {
    match &layout.rows {
        Some(rows) if !rows.is_empty() => rows.iter().map(|row| row.columns.as_slice()).collect(),
        _ if layout.columns.is_empty() => Vec::new(),
        _ => vec![layout.columns.as_slice()],
    }
}

fn column_markup(column: &Column, indent: usize, lines: &mut Vec<String>) {
    let spaces = " ".repeat(indent);
    let basis = style::width_percent(column.width);
    lines.push(format!(
        "{}<div class=\"column\" style=\"flex: 0 0 {basis}; max-width: {basis}; {}\">",
        spaces,
        style::inline_css(&style::column_declarations(column))
    ));
    for component in &column.components {
        lines.push(format!("{}  {}", spaces, component_markup(component)));
    }
    for child in &column.child_columns {
        column_markup(child, indent + 2, lines);
    }
    lines.push(format!("{}</div>", spaces));
}

/// Class selector for a component's style rule.
fn component_class(component: &Component) -> String {
    format!("{}-{}", component.type_name(), css_ident(&component.id))
}

fn component_markup(component: &Component) -> String {
    let class = component_class(component);
    match &component.props {
        ComponentProps::Button(props) => format!(
            "<button type=\"button\" class=\"{} btn btn-{}\" style=\"align-self: {}; width: {};\">{}</button>",
            class,
            props.variant,
            style::align_self(&props.align),
            props.width,
            props.text
        ),
        ComponentProps::Input(props) => format!(
            "<label class=\"{}\">{} <input type=\"{}\" placeholder=\"{}\"{} /></label>",
            class,
            props.label,
            props.input_type,
            props.placeholder,
            if props.required { " required" } else { "" }
        ),
        ComponentProps::Text(props) => {
            let tag = style::text_element(&props.element);
            format!(
                "<{tag} class=\"{}\" style=\"font-weight: {}; text-align: {}; font-size: {};\">{}</{tag}>",
                class, props.font_weight, props.text_align, props.font_size, props.text
            )
        }
        ComponentProps::Image(props) => format!(
            "<img class=\"{}\" src=\"{}\" alt=\"{}\" style=\"width: {}; height: {};\" />",
            class, props.src, props.alt, props.width, props.height
        ),
        ComponentProps::Div(props) => format!(
            "<div class=\"{}\" style=\"background-color: {}; padding: {}; border-radius: {}; border: {};\">{}</div>",
            class,
            props.background_color,
            props.padding,
            props.border_radius,
            props.border,
            props.text
        ),
        ComponentProps::Card(props) => {
            let image = format!("<img src=\"{}\" alt=\"{}\" />", props.image_src, props.title);
            let (top, bottom) = match (props.show_image, props.image_position.as_str()) {
                (false, _) => ("", ""),
                (true, "bottom") => ("", image.as_str()),
                (true, _) => (image.as_str(), ""),
            };
            let button = if props.show_button {
                format!("<button type=\"button\">{}</button>", props.button_text)
            } else {
                String::new()
            };
            format!(
                "<div class=\"{} card\">{}<div class=\"card-body\"><h3>{}</h3><p>{}</p>{}</div>{}</div>",
                class, top, props.title, props.text, button, bottom
            )
        }
        ComponentProps::Select(props) => {
            let options: String = props
                .options
                .iter()
                .map(|o| format!("<option value=\"{}\">{}</option>", o.value, o.label))
                .collect();
            format!(
                "<select class=\"{}\"><option value=\"\" disabled>{}</option>{}</select>",
                class, props.placeholder, options
            )
        }
        ComponentProps::Modal(props) => format!(
            "<div class=\"{} modal\" v-show=\"{}\"><h3>{}</h3><p>{}</p><button type=\"button\">{}</button><button type=\"button\">{}</button></div>",
            class,
            props.is_open,
            props.title,
            props.content,
            props.cancel_text,
            props.confirm_text
        ),
        ComponentProps::Unknown { kind, .. } => {
            format!("<!-- Unknown component type: {} -->", kind)
        }
    }
}

fn collect_rules(columns: &[Column], rules: &mut Vec<String>) {
    for column in columns {
        for component in &column.components {
            let Some(declarations) = component.style.as_ref().filter(|s| !s.is_empty()) else {
                continue;
            };
            let body: Vec<String> = declarations
                .iter()
                .map(|(property, value)| format!("  {}: {};", property, value))
                .collect();
            rules.push(format!(".{} {{\n{}\n}}", component_class(component), body.join("\n")));
        }
        collect_rules(&column.child_columns, rules);
    }
}
