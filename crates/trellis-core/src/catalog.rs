//! Component catalog: the closed set of placeable component kinds.
//!
//! Each kind owns a typed props record whose [`Default`] is the catalog
//! default used when a component is created and when a prop is absent from
//! persisted data. Kinds the catalog does not know (for example, data written
//! by a newer build) are kept as [`ComponentProps::Unknown`] with their raw
//! props intact.

use crate::error::CoreError;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use std::str::FromStr;

/// Placeholder image used by image and card components.
pub const PLACEHOLDER_IMAGE: &str = "https://via.placeholder.com/150";

/// A component kind known to the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ComponentKind {
    Button,
    Input,
    Text,
    Image,
    Div,
    Card,
    Select,
    Modal,
}

impl ComponentKind {
    /// Every kind, in palette order.
    pub const ALL: [ComponentKind; 8] = [
        Self::Button,
        Self::Input,
        Self::Text,
        Self::Image,
        Self::Div,
        Self::Card,
        Self::Select,
        Self::Modal,
    ];

    /// Serialized type tag.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Button => "button",
            Self::Input => "input",
            Self::Text => "text",
            Self::Image => "image",
            Self::Div => "div",
            Self::Card => "card",
            Self::Select => "select",
            Self::Modal => "modal",
        }
    }

    /// Human-readable palette label.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Button => "Button",
            Self::Input => "Input Field",
            Self::Text => "Text",
            Self::Image => "Image",
            Self::Div => "Div Container",
            Self::Card => "Card",
            Self::Select => "Select",
            Self::Modal => "Modal",
        }
    }

    /// Preview icon name for the editor palette.
    pub fn icon(&self) -> &'static str {
        match self {
            Self::Button => "square",
            Self::Input => "text-cursor-input",
            Self::Text => "type",
            Self::Image => "image",
            Self::Div => "box",
            Self::Card => "credit-card",
            Self::Select => "list",
            Self::Modal => "app-window",
        }
    }

    /// Catalog default props for this kind.
    pub fn default_props(&self) -> ComponentProps {
        match self {
            Self::Button => ComponentProps::Button(ButtonProps::default()),
            Self::Input => ComponentProps::Input(InputProps::default()),
            Self::Text => ComponentProps::Text(TextProps::default()),
            Self::Image => ComponentProps::Image(ImageProps::default()),
            Self::Div => ComponentProps::Div(DivProps::default()),
            Self::Card => ComponentProps::Card(CardProps::default()),
            Self::Select => ComponentProps::Select(SelectProps::default()),
            Self::Modal => ComponentProps::Modal(ModalProps::default()),
        }
    }
}

impl FromStr for ComponentKind {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| CoreError::UnknownComponentKind(s.to_string()))
    }
}

impl fmt::Display for ComponentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ButtonProps {
    pub text: String,
    pub variant: String,
    pub align: String,
    pub width: String,
}

impl Default for ButtonProps {
    fn default() -> Self {
        Self {
            text: "Button".to_string(),
            variant: "default".to_string(),
            align: "left".to_string(),
            width: "auto".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct InputProps {
    pub placeholder: String,
    #[serde(rename = "type")]
    pub input_type: String,
    pub label: String,
    pub required: bool,
}

impl Default for InputProps {
    fn default() -> Self {
        Self {
            placeholder: "Enter text...".to_string(),
            input_type: "text".to_string(),
            label: "Input Label".to_string(),
            required: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TextProps {
    pub text: String,
    /// Tag to render: `p`, `span`, or `h1`..`h6`.
    pub element: String,
    pub font_weight: String,
    pub text_align: String,
    pub font_size: String,
}

impl Default for TextProps {
    fn default() -> Self {
        Self {
            text: "Text content".to_string(),
            element: "p".to_string(),
            font_weight: "normal".to_string(),
            text_align: "left".to_string(),
            font_size: "1rem".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ImageProps {
    pub src: String,
    pub alt: String,
    pub width: String,
    pub height: String,
}

impl Default for ImageProps {
    fn default() -> Self {
        Self {
            src: PLACEHOLDER_IMAGE.to_string(),
            alt: "Image".to_string(),
            width: "100%".to_string(),
            height: "auto".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DivProps {
    pub text: String,
    pub background_color: String,
    pub padding: String,
    pub border_radius: String,
    pub border: String,
}

impl Default for DivProps {
    fn default() -> Self {
        Self {
            text: "Div Container".to_string(),
            background_color: "transparent".to_string(),
            padding: "1rem".to_string(),
            border_radius: "0.25rem".to_string(),
            border: "none".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CardProps {
    pub title: String,
    pub text: String,
    pub show_image: bool,
    pub show_button: bool,
    /// `top` or `bottom`.
    pub image_position: String,
    pub image_src: String,
    pub button_text: String,
}

impl Default for CardProps {
    fn default() -> Self {
        Self {
            title: "Card Title".to_string(),
            text: "This is a sample card content.".to_string(),
            show_image: true,
            show_button: true,
            image_position: "top".to_string(),
            image_src: PLACEHOLDER_IMAGE.to_string(),
            button_text: "Learn More".to_string(),
        }
    }
}

/// One entry of a select's option list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectOption {
    pub value: String,
    pub label: String,
}

impl SelectOption {
    pub fn new(value: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SelectProps {
    pub placeholder: String,
    pub options: Vec<SelectOption>,
    pub default_value: String,
}

impl Default for SelectProps {
    fn default() -> Self {
        Self {
            placeholder: "Select an option".to_string(),
            options: vec![
                SelectOption::new("option1", "Option 1"),
                SelectOption::new("option2", "Option 2"),
                SelectOption::new("option3", "Option 3"),
            ],
            default_value: String::new(),
        }
    }
}

/// Modal props. Open/close/confirm callbacks live in the editor, not here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ModalProps {
    pub title: String,
    pub content: String,
    pub is_open: bool,
    pub confirm_text: String,
    pub cancel_text: String,
}

impl Default for ModalProps {
    fn default() -> Self {
        Self {
            title: "Modal Title".to_string(),
            content: "This is the modal content.".to_string(),
            is_open: false,
            confirm_text: "Confirm".to_string(),
            cancel_text: "Cancel".to_string(),
        }
    }
}

/// Props of a placed component, one variant per catalog kind.
#[derive(Debug, Clone, PartialEq)]
pub enum ComponentProps {
    Button(ButtonProps),
    Input(InputProps),
    Text(TextProps),
    Image(ImageProps),
    Div(DivProps),
    Card(CardProps),
    Select(SelectProps),
    Modal(ModalProps),
    /// A type tag this build does not know; props are carried verbatim.
    Unknown {
        kind: String,
        props: Map<String, Value>,
    },
}

impl ComponentProps {
    /// Decode props for the given type tag.
    ///
    /// Missing keys take catalog defaults. A key whose value does not fit the
    /// kind's shape is dropped on its own; the remaining props are kept.
    pub fn from_parts(kind: &str, props: Value) -> Self {
        match ComponentKind::from_str(kind) {
            Ok(known) => match props {
                Value::Object(map) => Self::decode(known, Value::Object(map.clone()))
                    .unwrap_or_else(|_| Self::decode_valid_keys(known, map)),
                Value::Null => known.default_props(),
                other => {
                    tracing::warn!(kind, found = %other, "component props are not an object, using catalog defaults");
                    known.default_props()
                }
            },
            Err(_) => Self::Unknown {
                kind: kind.to_string(),
                props: match props {
                    Value::Object(map) => map,
                    _ => Map::new(),
                },
            },
        }
    }

    /// Keep each prop that decodes alongside the ones already kept.
    fn decode_valid_keys(kind: ComponentKind, props: Map<String, Value>) -> Self {
        let mut kept = Map::new();
        for (key, value) in props {
            let mut candidate = kept.clone();
            candidate.insert(key.clone(), value);
            match Self::decode(kind, Value::Object(candidate.clone())) {
                Ok(_) => kept = candidate,
                Err(err) => {
                    tracing::warn!(kind = kind.as_str(), key = %key, %err, "dropping ill-typed prop")
                }
            }
        }
        Self::decode(kind, Value::Object(kept)).unwrap_or_else(|_| kind.default_props())
    }

    fn decode(kind: ComponentKind, props: Value) -> serde_json::Result<Self> {
        let props = match props {
            Value::Null => Value::Object(Map::new()),
            other => other,
        };
        Ok(match kind {
            ComponentKind::Button => Self::Button(serde_json::from_value(props)?),
            ComponentKind::Input => Self::Input(serde_json::from_value(props)?),
            ComponentKind::Text => Self::Text(serde_json::from_value(props)?),
            ComponentKind::Image => Self::Image(serde_json::from_value(props)?),
            ComponentKind::Div => Self::Div(serde_json::from_value(props)?),
            ComponentKind::Card => Self::Card(serde_json::from_value(props)?),
            ComponentKind::Select => Self::Select(serde_json::from_value(props)?),
            ComponentKind::Modal => Self::Modal(serde_json::from_value(props)?),
        })
    }

    /// Catalog kind, or `None` for an unknown type tag.
    pub fn kind(&self) -> Option<ComponentKind> {
        match self {
            Self::Button(_) => Some(ComponentKind::Button),
            Self::Input(_) => Some(ComponentKind::Input),
            Self::Text(_) => Some(ComponentKind::Text),
            Self::Image(_) => Some(ComponentKind::Image),
            Self::Div(_) => Some(ComponentKind::Div),
            Self::Card(_) => Some(ComponentKind::Card),
            Self::Select(_) => Some(ComponentKind::Select),
            Self::Modal(_) => Some(ComponentKind::Modal),
            Self::Unknown { .. } => None,
        }
    }

    /// Serialized type tag, including unknown tags.
    pub fn type_name(&self) -> &str {
        match self {
            Self::Unknown { kind, .. } => kind,
            known => known.kind().map(|k| k.as_str()).unwrap_or_default(),
        }
    }

    /// Props as a flat JSON object.
    pub fn to_map(&self) -> Map<String, Value> {
        let value = match self {
            Self::Button(p) => serde_json::to_value(p),
            Self::Input(p) => serde_json::to_value(p),
            Self::Text(p) => serde_json::to_value(p),
            Self::Image(p) => serde_json::to_value(p),
            Self::Div(p) => serde_json::to_value(p),
            Self::Card(p) => serde_json::to_value(p),
            Self::Select(p) => serde_json::to_value(p),
            Self::Modal(p) => serde_json::to_value(p),
            Self::Unknown { props, .. } => return props.clone(),
        };
        match value {
            Ok(Value::Object(map)) => map,
            _ => Map::new(),
        }
    }

    /// Shallow-merge `patch` over these props.
    ///
    /// Keys absent from the patch are preserved. A patch that would leave
    /// the props ill-typed is rejected and the props are returned unchanged.
    pub fn merged(&self, patch: &Map<String, Value>) -> Self {
        let mut map = self.to_map();
        for (key, value) in patch {
            map.insert(key.clone(), value.clone());
        }
        match self.kind() {
            Some(kind) => Self::decode(kind, Value::Object(map)).unwrap_or_else(|err| {
                tracing::warn!(kind = kind.as_str(), %err, "rejected ill-typed props patch");
                self.clone()
            }),
            None => Self::Unknown {
                kind: self.type_name().to_string(),
                props: map,
            },
        }
    }
}
