//! Layout tree data structures.
//!
//! A [`Layout`] is an ordered list of top-level [`Column`]s. Each column holds
//! directly placed [`Component`]s and nested child columns; components always
//! come first in render order.

use crate::catalog::ComponentProps;
use crate::lenient;
use crate::tree;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// Number of units in the column grid.
pub const GRID_COLUMNS: u8 = 12;

/// Id of the column in a freshly created layout.
pub const DEFAULT_COLUMN_ID: &str = "column-root";

/// How a column arranges its own children.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "Value", into = "&'static str")]
pub enum Orientation {
    #[default]
    Horizontal,
    Vertical,
}

impl Orientation {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Horizontal => "horizontal",
            Self::Vertical => "vertical",
        }
    }

    /// CSS `flex-direction` for this orientation.
    pub fn flex_direction(&self) -> &'static str {
        match self {
            Self::Horizontal => "row",
            Self::Vertical => "column",
        }
    }
}

impl From<String> for Orientation {
    fn from(s: String) -> Self {
        match s.as_str() {
            "vertical" => Self::Vertical,
            _ => Self::Horizontal,
        }
    }
}

impl From<Value> for Orientation {
    fn from(value: Value) -> Self {
        match value {
            Value::String(s) => s.into(),
            _ => Self::default(),
        }
    }
}

impl From<Orientation> for &'static str {
    fn from(o: Orientation) -> Self {
        o.as_str()
    }
}

/// Alignment keyword used by a column's flex layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum FlexKeyword {
    #[default]
    Start,
    Center,
    End,
    Between,
    Around,
    Evenly,
    Stretch,
}

impl FlexKeyword {
    /// Parse a keyword; unrecognised keywords become `Start`.
    pub fn parse(s: &str) -> Self {
        match s.trim() {
            "center" => Self::Center,
            "end" => Self::End,
            "between" => Self::Between,
            "around" => Self::Around,
            "evenly" => Self::Evenly,
            "stretch" => Self::Stretch,
            _ => Self::Start,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Start => "start",
            Self::Center => "center",
            Self::End => "end",
            Self::Between => "between",
            Self::Around => "around",
            Self::Evenly => "evenly",
            Self::Stretch => "stretch",
        }
    }

    /// CSS value for `align-items` / `justify-content`.
    pub fn css_value(&self) -> &'static str {
        match self {
            Self::Start => "flex-start",
            Self::Center => "center",
            Self::End => "flex-end",
            Self::Between => "space-between",
            Self::Around => "space-around",
            Self::Evenly => "space-evenly",
            Self::Stretch => "stretch",
        }
    }
}

/// Alignment pair serialized as `"<align>/<justify>"`, e.g. `"start/center"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "Value", into = "String")]
pub struct FlexLayout {
    /// Cross-axis alignment (`align-items`).
    pub align: FlexKeyword,
    /// Main-axis distribution (`justify-content`).
    pub justify: FlexKeyword,
}

impl FlexLayout {
    pub fn new(align: FlexKeyword, justify: FlexKeyword) -> Self {
        Self { align, justify }
    }
}

impl From<String> for FlexLayout {
    fn from(s: String) -> Self {
        let mut parts = s.splitn(2, '/');
        let align = parts.next().map(FlexKeyword::parse).unwrap_or_default();
        let justify = parts.next().map(FlexKeyword::parse).unwrap_or_default();
        Self { align, justify }
    }
}

impl From<Value> for FlexLayout {
    fn from(value: Value) -> Self {
        match value {
            Value::String(s) => s.into(),
            _ => Self::default(),
        }
    }
}

impl From<FlexLayout> for String {
    fn from(f: FlexLayout) -> Self {
        f.to_string()
    }
}

impl fmt::Display for FlexLayout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.align.as_str(), self.justify.as_str())
    }
}

/// A placed component.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "RawComponent", into = "RawComponent")]
pub struct Component {
    pub id: String,
    pub props: ComponentProps,
    /// Explicit CSS declarations, property name to value.
    pub style: Option<IndexMap<String, String>>,
}

impl Component {
    pub fn new(id: impl Into<String>, props: ComponentProps) -> Self {
        Self {
            id: id.into(),
            props,
            style: None,
        }
    }

    /// Serialized type tag.
    pub fn type_name(&self) -> &str {
        self.props.type_name()
    }

    pub fn with_style(mut self, property: impl Into<String>, value: impl Into<String>) -> Self {
        self.style
            .get_or_insert_with(IndexMap::new)
            .insert(property.into(), value.into());
        self
    }
}

/// Wire shape of a component: `{ id, type, props, style? }`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
struct RawComponent {
    #[serde(deserialize_with = "lenient::string")]
    id: String,
    #[serde(rename = "type", deserialize_with = "lenient::string")]
    kind: String,
    props: Value,
    #[serde(deserialize_with = "lenient::opt_string_map", skip_serializing_if = "Option::is_none")]
    style: Option<IndexMap<String, String>>,
}

impl From<RawComponent> for Component {
    fn from(raw: RawComponent) -> Self {
        Self {
            props: ComponentProps::from_parts(&raw.kind, raw.props),
            id: raw.id,
            style: raw.style,
        }
    }
}

impl From<Component> for RawComponent {
    fn from(c: Component) -> Self {
        Self {
            kind: c.type_name().to_string(),
            props: Value::Object(c.props.to_map()),
            id: c.id,
            style: c.style,
        }
    }
}

/// A layout node holding components and nested columns.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Column {
    #[serde(deserialize_with = "lenient::string")]
    pub id: String,
    /// Grid units out of 12; meaningful when the parent lays out horizontally.
    #[serde(deserialize_with = "lenient::width")]
    pub width: u8,
    /// Arrangement of this column's own children.
    pub orientation: Orientation,
    #[serde(deserialize_with = "lenient::vec_or_default")]
    pub components: Vec<Component>,
    #[serde(deserialize_with = "lenient::vec_or_default")]
    pub child_columns: Vec<Column>,
    /// Id of the enclosing column, `None` at the root level.
    #[serde(deserialize_with = "lenient::opt_string")]
    pub parent_id: Option<String>,
    pub flex_layout: FlexLayout,
    /// Gap between children, in rem.
    #[serde(deserialize_with = "lenient::string")]
    pub gap: String,
    #[serde(deserialize_with = "lenient::string")]
    pub background_color: String,
    #[serde(deserialize_with = "lenient::string")]
    pub border_radius: String,
    #[serde(deserialize_with = "lenient::string")]
    pub border: String,
}

impl Default for Column {
    fn default() -> Self {
        Self {
            id: String::new(),
            width: GRID_COLUMNS,
            orientation: Orientation::Horizontal,
            components: Vec::new(),
            child_columns: Vec::new(),
            parent_id: None,
            flex_layout: FlexLayout::default(),
            gap: "1".to_string(),
            background_color: "transparent".to_string(),
            border_radius: "0".to_string(),
            border: "none".to_string(),
        }
    }
}

impl Column {
    /// Create an empty full-width column.
    pub fn new(id: impl Into<String>, orientation: Orientation) -> Self {
        Self {
            id: id.into(),
            orientation,
            ..Default::default()
        }
    }

    pub fn with_parent(mut self, parent_id: impl Into<String>) -> Self {
        self.parent_id = Some(parent_id.into());
        self
    }

    pub fn with_width(mut self, width: u8) -> Self {
        self.width = width.clamp(1, GRID_COLUMNS);
        self
    }

    pub fn with_component(mut self, component: Component) -> Self {
        self.components.push(component);
        self
    }

    pub fn with_child(mut self, child: Column) -> Self {
        self.child_columns.push(child);
        self
    }

    pub fn is_horizontal(&self) -> bool {
        self.orientation == Orientation::Horizontal
    }

    /// Width class for this column's grid width.
    pub fn width_class(&self) -> &'static str {
        width_class(i64::from(self.width))
    }

    /// Find a component placed directly in this column.
    pub fn component(&self, id: &str) -> Option<&Component> {
        self.components.iter().find(|c| c.id == id)
    }
}

/// Map a grid width to one of twelve width buckets, clamping to `1..=12`.
pub fn width_class(width: i64) -> &'static str {
    match width.clamp(1, 12) {
        1 => "w-1/12",
        2 => "w-1/6",
        3 => "w-1/4",
        4 => "w-1/3",
        5 => "w-5/12",
        6 => "w-1/2",
        7 => "w-7/12",
        8 => "w-2/3",
        9 => "w-3/4",
        10 => "w-5/6",
        11 => "w-11/12",
        _ => "w-full",
    }
}

/// A row of columns in the row-bearing layout shape.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Row {
    #[serde(deserialize_with = "lenient::string")]
    pub id: String,
    #[serde(deserialize_with = "lenient::vec_or_default")]
    pub columns: Vec<Column>,
}

/// Root of the layout tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Layout {
    /// CSS length or `auto`, applied to the outer container verbatim.
    #[serde(deserialize_with = "lenient::string")]
    pub container_width: String,
    #[serde(deserialize_with = "lenient::vec_or_default")]
    pub columns: Vec<Column>,
    /// Row-bearing shape kept for layouts saved in the `rows[].columns[]` form.
    #[serde(deserialize_with = "lenient::opt_vec", skip_serializing_if = "Option::is_none")]
    pub rows: Option<Vec<Row>>,
}

impl Default for Layout {
    /// A single empty horizontal column spanning the full grid.
    fn default() -> Self {
        Self {
            container_width: "100%".to_string(),
            columns: vec![Column::new(DEFAULT_COLUMN_ID, Orientation::Horizontal)],
            rows: None,
        }
    }
}

impl Layout {
    /// Layout with no columns at all.
    pub fn empty() -> Self {
        Self {
            columns: Vec::new(),
            ..Default::default()
        }
    }

    pub fn with_container_width(mut self, width: impl Into<String>) -> Self {
        self.container_width = width.into();
        self
    }

    pub fn with_column(mut self, column: Column) -> Self {
        self.columns.push(column);
        self
    }

    /// Decode a persisted layout.
    pub fn from_json(json: &str) -> crate::Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Encode for persistence.
    pub fn to_json(&self) -> crate::Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Depth-first search for a column by id.
    pub fn find_column(&self, id: &str) -> Option<&Column> {
        tree::find(&self.columns, id)
    }

    /// Depth-first search for a component, returning it with its owning column.
    pub fn find_component(&self, id: &str) -> Option<(&Column, &Component)> {
        tree::find_component(&self.columns, id)
    }

    /// Id of the column enclosing `id`; `Some(None)` for a root-level column.
    pub fn parent_of(&self, id: &str) -> Option<Option<String>> {
        tree::locate(&self.columns, id).map(|loc| loc.parent)
    }

    pub fn column_count(&self) -> usize {
        let mut count = 0;
        tree::visit(&self.columns, &mut |_, _| count += 1);
        count
    }

    pub fn component_count(&self) -> usize {
        let mut count = 0;
        tree::visit(&self.columns, &mut |column, _| count += column.components.len());
        count
    }

    /// Every column id, depth-first.
    pub fn column_ids(&self) -> Vec<String> {
        let mut ids = Vec::new();
        tree::visit(&self.columns, &mut |column, _| ids.push(column.id.clone()));
        ids
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::ComponentKind;
    use serde_json::json;

    #[test]
    fn test_default_layout() {
        let layout = Layout::default();
        assert_eq!(layout.columns.len(), 1);
        assert_eq!(layout.columns[0].width, 12);
        assert!(layout.columns[0].is_horizontal());
        assert!(layout.columns[0].components.is_empty());
    }

    #[test]
    fn test_width_class_clamps() {
        assert_eq!(width_class(12), "w-full");
        assert_eq!(width_class(6), "w-1/2");
        assert_eq!(width_class(4), "w-1/3");
        assert_eq!(width_class(0), "w-1/12");
        assert_eq!(width_class(40), "w-full");
    }

    #[test]
    fn test_flex_layout_parsing() {
        let flex = FlexLayout::from("center/between".to_string());
        assert_eq!(flex.align, FlexKeyword::Center);
        assert_eq!(flex.justify.css_value(), "space-between");
        assert_eq!(FlexLayout::from("garbage".to_string()), FlexLayout::default());
        assert_eq!(FlexLayout::default().to_string(), "start/start");
    }

    #[test]
    fn test_malformed_column_is_defaulted() {
        let column: Column = serde_json::from_value(json!({
            "id": "c1",
            "width": "abc",
            "orientation": "diagonal",
            "components": [],
        }))
        .unwrap();
        assert_eq!(column.width, 12);
        assert_eq!(column.orientation, Orientation::Horizontal);
        assert!(column.child_columns.is_empty());
    }

    #[test]
    fn test_null_and_wrong_typed_fields_are_defaulted() {
        let layout: Layout = serde_json::from_value(json!({
            "containerWidth": "800px",
            "columns": [
                {
                    "id": "keep",
                    "components": [{ "id": "b1", "type": "button", "props": { "text": "Keep me" } }],
                    "flexLayout": null,
                },
                {
                    "id": "broken",
                    "components": null,
                    "childColumns": "nope",
                    "orientation": 7,
                    "parentId": false,
                },
                null,
            ],
            "rows": null,
        }))
        .unwrap();

        assert_eq!(layout.container_width, "800px");
        assert_eq!(layout.column_ids(), vec!["keep", "broken"]);
        assert_eq!(layout.columns[0].flex_layout, FlexLayout::default());
        assert_eq!(layout.columns[0].components[0].id, "b1");
        let broken = &layout.columns[1];
        assert!(broken.components.is_empty());
        assert!(broken.child_columns.is_empty());
        assert_eq!(broken.orientation, Orientation::Horizontal);
        assert_eq!(broken.parent_id, None);
        assert_eq!(layout.rows, None);
    }

    #[test]
    fn test_non_list_columns_become_empty() {
        let layout: Layout = serde_json::from_value(json!({ "columns": { "id": "x" } })).unwrap();
        assert!(layout.columns.is_empty());
    }

    #[test]
    fn test_component_style_keeps_scalar_entries() {
        let component: Component = serde_json::from_value(json!({
            "id": "t1",
            "type": "text",
            "style": { "color": "red", "zIndex": 3, "nested": { "a": 1 } },
        }))
        .unwrap();
        let style = component.style.unwrap();
        assert_eq!(style.get("color").map(String::as_str), Some("red"));
        assert_eq!(style.get("zIndex").map(String::as_str), Some("3"));
        assert!(style.get("nested").is_none());
    }

    #[test]
    fn test_width_accepts_numeric_strings() {
        let column: Column = serde_json::from_value(json!({ "id": "c1", "width": "4" })).unwrap();
        assert_eq!(column.width, 4);
        let column: Column = serde_json::from_value(json!({ "id": "c1", "width": 30 })).unwrap();
        assert_eq!(column.width, 12);
    }

    #[test]
    fn test_component_wire_shape() {
        let component = Component::new("b1", ComponentKind::Button.default_props());
        let value = serde_json::to_value(&component).unwrap();
        assert_eq!(value["type"], json!("button"));
        assert_eq!(value["props"]["text"], json!("Button"));
        assert!(value.get("style").is_none());

        let back: Component = serde_json::from_value(value).unwrap();
        assert_eq!(back, component);
    }

    #[test]
    fn test_unknown_component_survives_round_trip() {
        let value = json!({ "id": "x1", "type": "carousel", "props": { "slides": 3 } });
        let component: Component = serde_json::from_value(value.clone()).unwrap();
        assert_eq!(component.type_name(), "carousel");
        assert_eq!(serde_json::to_value(&component).unwrap(), value);
    }

    #[test]
    fn test_queries() {
        let layout = Layout::empty().with_column(
            Column::new("a", Orientation::Vertical)
                .with_component(Component::new("t1", ComponentKind::Text.default_props()))
                .with_child(
                    Column::new("b", Orientation::Horizontal)
                        .with_parent("a")
                        .with_component(Component::new("b1", ComponentKind::Button.default_props())),
                ),
        );

        assert_eq!(layout.column_count(), 2);
        assert_eq!(layout.component_count(), 2);
        assert_eq!(layout.column_ids(), vec!["a", "b"]);
        assert_eq!(layout.find_column("b").map(|c| c.width), Some(12));
        assert_eq!(layout.find_component("b1").map(|(c, _)| c.id.as_str()), Some("b"));
        assert_eq!(layout.parent_of("b"), Some(Some("a".to_string())));
        assert_eq!(layout.parent_of("a"), Some(None));
        assert_eq!(layout.parent_of("zzz"), None);
    }
}
