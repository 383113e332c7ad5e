//! React function component generator (JSX, Tailwind-style classes).

use super::{LayoutGenerator, DEFAULT_COMPONENT_NAME};
use crate::style::{self, Declaration};
use trellis_core::{
    ButtonProps, CardProps, Column, Component, ComponentProps, DivProps, ImageProps, InputProps,
    Layout, ModalProps, SelectProps, TextProps,
};

/// React code generator.
#[derive(Debug, Clone)]
pub struct ReactGenerator {
    component_name: String,
}

impl ReactGenerator {
    /// Create a generator emitting `GeneratedLayout`.
    pub fn new() -> Self {
        Self {
            component_name: DEFAULT_COMPONENT_NAME.to_string(),
        }
    }

    /// Use a different exported component name.
    pub fn with_component_name(mut self, name: impl Into<String>) -> Self {
        self.component_name = name.into();
        self
    }

    fn column_jsx(&self, column: &Column, indent: usize, lines: &mut Vec<String>) {
        let spaces = " ".repeat(indent);
        lines.push(format!(
            "{}<div className=\"{} p-2\" style={{{{ {} }}}}>",
            spaces,
            column.width_class(),
            style::jsx_style(&style::column_declarations(column))
        ));
        for component in &column.components {
            lines.push(component_jsx(component, indent + 2));
        }
        for child in &column.child_columns {
            self.column_jsx(child, indent + 2, lines);
        }
        lines.push(format!("{}</div>", spaces));
    }
}

impl Default for ReactGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl LayoutGenerator for ReactGenerator {
    fn framework_name(&self) -> &'static str {
        "react"
    }

    fn file_name(&self) -> String {
        format!("{}.jsx", self.component_name)
    }

    fn generate(&self, layout: &Layout) -> String {
        let mut lines = vec![
            "import React from 'react';".to_string(),
            String::new(),
            format!("export default function {}() {{", self.component_name),
            "  return (".to_string(),
            format!(
                "    <div className=\"mx-auto\" style={{{{ width: '{}' }}}}>",
                layout.container_width
            ),
            "      <div className=\"flex flex-wrap\">".to_string(),
        ];
        for column in &layout.columns {
            self.column_jsx(column, 8, &mut lines);
        }
        lines.push("      </div>".to_string());
        lines.push("    </div>".to_string());
        lines.push("  );".to_string());
        lines.push("}".to_string());
        lines.push(String::new());
        lines.join("\n")
    }
}

/// One component as JSX, indented.
fn component_jsx(component: &Component, indent: usize) -> String {
    let spaces = " ".repeat(indent);
    let body = match &component.props {
        ComponentProps::Button(props) => button(props),
        ComponentProps::Input(props) => input(props),
        ComponentProps::Text(props) => text(props),
        ComponentProps::Image(props) => image(props),
        ComponentProps::Div(props) => div(props),
        ComponentProps::Card(props) => card(props),
        ComponentProps::Select(props) => select(props),
        ComponentProps::Modal(props) => modal(props),
        ComponentProps::Unknown { kind, .. } => {
            format!("{{/* Unknown component type: {} */}}", kind)
        }
    };
    body.lines()
        .map(|line| format!("{}{}", spaces, line))
        .collect::<Vec<_>>()
        .join("\n")
}

fn jsx_style_attr(decls: &[Declaration]) -> String {
    format!("style={{{{ {} }}}}", style::jsx_style(decls))
}

fn button_classes(variant: &str) -> &'static str {
    match variant {
        "primary" => "px-4 py-2 rounded bg-blue-600 text-white hover:bg-blue-700",
        "secondary" => "px-4 py-2 rounded bg-gray-600 text-white hover:bg-gray-700",
        "outline" => "px-4 py-2 rounded border border-blue-600 text-blue-600 hover:bg-blue-50",
        "danger" => "px-4 py-2 rounded bg-red-600 text-white hover:bg-red-700",
        _ => "px-4 py-2 rounded bg-gray-200 text-gray-800 hover:bg-gray-300",
    }
}

fn button(props: &ButtonProps) -> String {
    let decls = [
        ("align-self", style::align_self(&props.align).to_string()),
        ("width", props.width.clone()),
    ];
    format!(
        "<button type=\"button\" className=\"{}\" {}>{}</button>",
        button_classes(&props.variant),
        jsx_style_attr(&decls),
        props.text
    )
}

fn input(props: &InputProps) -> String {
    let required = if props.required { " required" } else { "" };
    [
        "<div className=\"flex flex-col gap-1\">".to_string(),
        format!("  <label className=\"text-sm font-medium\">{}</label>", props.label),
        format!(
            "  <input type=\"{}\" placeholder=\"{}\" className=\"border rounded px-3 py-2\"{} />",
            props.input_type, props.placeholder, required
        ),
        "</div>".to_string(),
    ]
    .join("\n")
}

fn text(props: &TextProps) -> String {
    let tag = style::text_element(&props.element);
    let decls = [
        ("font-weight", props.font_weight.clone()),
        ("text-align", props.text_align.clone()),
        ("font-size", props.font_size.clone()),
    ];
    format!("<{tag} {}>{}</{tag}>", jsx_style_attr(&decls), props.text)
}

fn image(props: &ImageProps) -> String {
    let decls = [("width", props.width.clone()), ("height", props.height.clone())];
    format!(
        "<img src=\"{}\" alt=\"{}\" {} />",
        props.src,
        props.alt,
        jsx_style_attr(&decls)
    )
}

fn div(props: &DivProps) -> String {
    let decls = [
        ("background-color", props.background_color.clone()),
        ("padding", props.padding.clone()),
        ("border-radius", props.border_radius.clone()),
        ("border", props.border.clone()),
    ];
    format!("<div {}>{}</div>", jsx_style_attr(&decls), props.text)
}

fn card(props: &CardProps) -> String {
    let image = format!(
        "  <img src=\"{}\" alt=\"{}\" className=\"w-full h-40 object-cover\" />",
        props.image_src, props.title
    );
    let mut lines = vec!["<div className=\"border rounded shadow-sm overflow-hidden\">".to_string()];
    if props.show_image && props.image_position != "bottom" {
        lines.push(image.clone());
    }
    lines.push("  <div className=\"p-4\">".to_string());
    lines.push(format!(
        "    <h3 className=\"text-lg font-semibold mb-2\">{}</h3>",
        props.title
    ));
    lines.push(format!("    <p className=\"text-gray-700\">{}</p>", props.text));
    if props.show_button {
        lines.push(format!(
            "    <button type=\"button\" className=\"mt-4 px-4 py-2 rounded bg-blue-600 text-white\">{}</button>",
            props.button_text
        ));
    }
    lines.push("  </div>".to_string());
    if props.show_image && props.image_position == "bottom" {
        lines.push(image);
    }
    lines.push("</div>".to_string());
    lines.join("\n")
}

fn select(props: &SelectProps) -> String {
    let mut lines = vec![format!(
        "<select className=\"border rounded px-3 py-2\" defaultValue=\"{}\">",
        props.default_value
    )];
    lines.push(format!("  <option value=\"\" disabled>{}</option>", props.placeholder));
    for option in &props.options {
        lines.push(format!(
            "  <option value=\"{}\">{}</option>",
            option.value, option.label
        ));
    }
    lines.push("</select>".to_string());
    lines.join("\n")
}

fn modal(props: &ModalProps) -> String {
    [
        format!(
            "<div className=\"fixed inset-0 flex items-center justify-center bg-black bg-opacity-50\" hidden={{{}}}>",
            !props.is_open
        ),
        "  <div className=\"bg-white rounded shadow-lg p-6 w-96\">".to_string(),
        format!("    <h3 className=\"text-lg font-semibold mb-4\">{}</h3>", props.title),
        format!("    <p className=\"mb-6\">{}</p>", props.content),
        "    <div className=\"flex justify-end gap-2\">".to_string(),
        format!(
            "      <button type=\"button\" className=\"px-4 py-2 rounded bg-gray-200\">{}</button>",
            props.cancel_text
        ),
        format!(
            "      <button type=\"button\" className=\"px-4 py-2 rounded bg-blue-600 text-white\">{}</button>",
            props.confirm_text
        ),
        "    </div>".to_string(),
        "  </div>".to_string(),
        "</div>".to_string(),
    ]
    .join("\n")
}
