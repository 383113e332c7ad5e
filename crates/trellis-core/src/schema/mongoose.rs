use crate::lenient;
use serde::{Deserialize, Serialize};

/// Mongoose schema type of a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum MongooseType {
    #[default]
    String,
    Number,
    Date,
    Boolean,
    Buffer,
    ObjectId,
    #[serde(rename = "[String]")]
    StringArray,
    #[serde(rename = "[Number]")]
    NumberArray,
    Object,
    #[serde(other)]
    Mixed,
}

impl MongooseType {
    /// Every type, in picker order.
    pub const ALL: [MongooseType; 10] = [
        Self::String,
        Self::Number,
        Self::Date,
        Self::Boolean,
        Self::Buffer,
        Self::ObjectId,
        Self::StringArray,
        Self::NumberArray,
        Self::Object,
        Self::Mixed,
    ];

    /// Type token as written in a schema definition (a bare identifier, not a string).
    pub fn schema_token(&self) -> &'static str {
        match self {
            Self::String => "String",
            Self::Number => "Number",
            Self::Date => "Date",
            Self::Boolean => "Boolean",
            Self::Buffer => "Buffer",
            Self::ObjectId => "mongoose.Schema.Types.ObjectId",
            Self::StringArray => "[String]",
            Self::NumberArray => "[Number]",
            Self::Object => "Object",
            Self::Mixed => "mongoose.Schema.Types.Mixed",
        }
    }
}

/// A field of a Mongoose model.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExpressField {
    #[serde(deserialize_with = "lenient::string")]
    pub name: String,
    #[serde(rename = "type", deserialize_with = "lenient::or_default")]
    pub field_type: MongooseType,
    #[serde(deserialize_with = "lenient::bool")]
    pub required: bool,
}

impl ExpressField {
    pub fn new(name: impl Into<String>, field_type: MongooseType) -> Self {
        Self {
            name: name.into(),
            field_type,
            required: false,
        }
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }
}

/// A model for the Express + Mongoose server emitter.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExpressModel {
    #[serde(deserialize_with = "lenient::string")]
    pub name: String,
    #[serde(deserialize_with = "lenient::vec_or_default")]
    pub fields: Vec<ExpressField>,
}

impl ExpressModel {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            fields: Vec::new(),
        }
    }

    pub fn with_field(mut self, field: ExpressField) -> Self {
        self.fields.push(field);
        self
    }

    /// Ready for generation: named, with at least one field, every field named.
    pub fn is_complete(&self) -> bool {
        !self.name.trim().is_empty()
            && !self.fields.is_empty()
            && self.fields.iter().all(|f| !f.name.trim().is_empty())
    }
}
