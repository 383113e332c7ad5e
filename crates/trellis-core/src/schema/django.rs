use crate::lenient;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Django model field kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum DjangoFieldType {
    #[default]
    CharField,
    TextField,
    IntegerField,
    BigIntegerField,
    FloatField,
    DecimalField,
    BooleanField,
    DateField,
    DateTimeField,
    TimeField,
    EmailField,
    #[serde(rename = "URLField")]
    UrlField,
    SlugField,
    #[serde(rename = "UUIDField")]
    UuidField,
    #[serde(rename = "JSONField")]
    JsonField,
    FileField,
    ImageField,
    ForeignKey,
    OneToOneField,
}

impl DjangoFieldType {
    /// Constructor name under `models.`.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::CharField => "CharField",
            Self::TextField => "TextField",
            Self::IntegerField => "IntegerField",
            Self::BigIntegerField => "BigIntegerField",
            Self::FloatField => "FloatField",
            Self::DecimalField => "DecimalField",
            Self::BooleanField => "BooleanField",
            Self::DateField => "DateField",
            Self::DateTimeField => "DateTimeField",
            Self::TimeField => "TimeField",
            Self::EmailField => "EmailField",
            Self::UrlField => "URLField",
            Self::SlugField => "SlugField",
            Self::UuidField => "UUIDField",
            Self::JsonField => "JSONField",
            Self::FileField => "FileField",
            Self::ImageField => "ImageField",
            Self::ForeignKey => "ForeignKey",
            Self::OneToOneField => "OneToOneField",
        }
    }

    /// Takes a `max_length` argument.
    pub fn has_max_length(&self) -> bool {
        matches!(self, Self::CharField | Self::EmailField | Self::UrlField | Self::SlugField)
    }

    /// Points at another model.
    pub fn is_relation(&self) -> bool {
        matches!(self, Self::ForeignKey | Self::OneToOneField)
    }

    pub fn is_file(&self) -> bool {
        matches!(self, Self::FileField | Self::ImageField)
    }

    /// Defaults are written as quoted string literals.
    pub fn is_string_like(&self) -> bool {
        matches!(
            self,
            Self::CharField | Self::TextField | Self::EmailField | Self::UrlField | Self::SlugField
        )
    }

    /// Defaults are written bare.
    pub fn is_numeric(&self) -> bool {
        matches!(
            self,
            Self::IntegerField | Self::BigIntegerField | Self::FloatField | Self::DecimalField
        )
    }
}

/// `on_delete` behaviour of a relation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OnDelete {
    #[default]
    Cascade,
    Protect,
    SetNull,
    SetDefault,
    DoNothing,
}

impl OnDelete {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Cascade => "CASCADE",
            Self::Protect => "PROTECT",
            Self::SetNull => "SET_NULL",
            Self::SetDefault => "SET_DEFAULT",
            Self::DoNothing => "DO_NOTHING",
        }
    }
}

/// One `(value, display)` pair of a field's choices.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Choice {
    pub value: String,
    pub display: String,
}

impl Choice {
    pub fn new(value: impl Into<String>, display: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            display: display.into(),
        }
    }
}

/// A field of a Django model.
///
/// Type-specific attributes are only read for the kinds they apply to.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DjangoField {
    #[serde(deserialize_with = "lenient::string")]
    pub name: String,
    /// Unrecognised types decode as `CharField`.
    #[serde(rename = "type", deserialize_with = "lenient::or_default")]
    pub field_type: DjangoFieldType,
    #[serde(deserialize_with = "lenient::bool")]
    pub required: bool,
    /// Char/Email/URL/Slug; falls back to 255.
    #[serde(deserialize_with = "lenient::opt_u32", skip_serializing_if = "Option::is_none")]
    pub max_length: Option<u32>,
    /// Decimal; falls back to 10.
    #[serde(deserialize_with = "lenient::opt_u32", skip_serializing_if = "Option::is_none")]
    pub max_digits: Option<u32>,
    /// Decimal; falls back to 2.
    #[serde(deserialize_with = "lenient::opt_u32", skip_serializing_if = "Option::is_none")]
    pub decimal_places: Option<u32>,
    /// DateTime.
    #[serde(deserialize_with = "lenient::bool")]
    pub auto_now_add: bool,
    /// ForeignKey/OneToOne target model name.
    #[serde(deserialize_with = "lenient::opt_string", skip_serializing_if = "Option::is_none")]
    pub related_model: Option<String>,
    #[serde(deserialize_with = "lenient::or_default")]
    pub on_delete: OnDelete,
    /// File/Image upload directory; falls back to `uploads/`.
    #[serde(deserialize_with = "lenient::opt_string", skip_serializing_if = "Option::is_none")]
    pub upload_to: Option<String>,
    #[serde(deserialize_with = "lenient::vec_or_default", skip_serializing_if = "Vec::is_empty")]
    pub choices: Vec<Choice>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default: Option<Value>,
    #[serde(deserialize_with = "lenient::bool")]
    pub unique: bool,
}

impl DjangoField {
    pub const DEFAULT_MAX_LENGTH: u32 = 255;
    pub const DEFAULT_MAX_DIGITS: u32 = 10;
    pub const DEFAULT_DECIMAL_PLACES: u32 = 2;
    pub const DEFAULT_UPLOAD_TO: &'static str = "uploads/";

    pub fn new(name: impl Into<String>, field_type: DjangoFieldType) -> Self {
        Self {
            name: name.into(),
            field_type,
            ..Default::default()
        }
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn with_max_length(mut self, max_length: u32) -> Self {
        self.max_length = Some(max_length);
        self
    }

    pub fn with_decimal(mut self, max_digits: u32, decimal_places: u32) -> Self {
        self.max_digits = Some(max_digits);
        self.decimal_places = Some(decimal_places);
        self
    }

    pub fn with_relation(mut self, model: impl Into<String>, on_delete: OnDelete) -> Self {
        self.related_model = Some(model.into());
        self.on_delete = on_delete;
        self
    }

    pub fn with_choice(mut self, value: impl Into<String>, display: impl Into<String>) -> Self {
        self.choices.push(Choice::new(value, display));
        self
    }

    pub fn with_default(mut self, value: Value) -> Self {
        self.default = Some(value);
        self
    }

    pub fn effective_max_length(&self) -> u32 {
        self.max_length.unwrap_or(Self::DEFAULT_MAX_LENGTH)
    }

    pub fn effective_max_digits(&self) -> u32 {
        self.max_digits.unwrap_or(Self::DEFAULT_MAX_DIGITS)
    }

    pub fn effective_decimal_places(&self) -> u32 {
        self.decimal_places.unwrap_or(Self::DEFAULT_DECIMAL_PLACES)
    }

    pub fn effective_upload_to(&self) -> &str {
        match self.upload_to.as_deref() {
            Some(dir) if !dir.trim().is_empty() => dir,
            _ => Self::DEFAULT_UPLOAD_TO,
        }
    }
}

/// A model for the Django emitter.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DjangoModel {
    #[serde(deserialize_with = "lenient::string")]
    pub name: String,
    #[serde(deserialize_with = "lenient::vec_or_default")]
    pub fields: Vec<DjangoField>,
}

impl DjangoModel {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            fields: Vec::new(),
        }
    }

    pub fn with_field(mut self, field: DjangoField) -> Self {
        self.fields.push(field);
        self
    }

    pub fn field(&self, name: &str) -> Option<&DjangoField> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Ready for generation: named, with at least one field, every field named.
    pub fn is_complete(&self) -> bool {
        !self.name.trim().is_empty()
            && !self.fields.is_empty()
            && self.fields.iter().all(|f| !f.name.trim().is_empty())
    }
}

/// Database engine for the generated Django settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DatabaseKind {
    #[default]
    Sqlite,
    Postgres,
}

/// Database settings for the generated Django project.
///
/// Connection fields are only used for Postgres.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseSettings {
    #[serde(rename = "type", deserialize_with = "lenient::or_default")]
    pub kind: DatabaseKind,
    pub host: String,
    #[serde(deserialize_with = "lenient::string")]
    pub port: String,
    pub user: String,
    pub password: String,
    pub name: String,
}

impl Default for DatabaseSettings {
    fn default() -> Self {
        Self {
            kind: DatabaseKind::Sqlite,
            host: "localhost".to_string(),
            port: "5432".to_string(),
            user: "postgres".to_string(),
            password: String::new(),
            name: "mydb".to_string(),
        }
    }
}

impl DatabaseSettings {
    pub fn sqlite() -> Self {
        Self::default()
    }

    pub fn postgres(
        host: impl Into<String>,
        port: impl Into<String>,
        user: impl Into<String>,
        password: impl Into<String>,
        name: impl Into<String>,
    ) -> Self {
        Self {
            kind: DatabaseKind::Postgres,
            host: host.into(),
            port: port.into(),
            user: user.into(),
            password: password.into(),
            name: name.into(),
        }
    }
}
