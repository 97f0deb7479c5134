//! Contract models for content service
//!
//! These models are transport-agnostic and used for inter-module communication.
//! NO serde derives - storage and REST layers own their wire representations.

use chrono::{DateTime, Utc};
use serde_json::Value;
use std::fmt;
use uuid::Uuid;

/// Field key -> value mapping of a content entry
pub type FieldValues = serde_json::Map<String, Value>;

/// Isolation boundary grouping content models and entries
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tenant {
    pub id: Uuid,
    /// URL-safe unique slug (e.g. "acme-books")
    pub slug: String,
    pub display_name: String,
    /// Disabled tenants are read-only
    pub active: bool,
    /// Free-form JSON object
    pub metadata: Value,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Data required to register a tenant
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTenant {
    pub slug: String,
    pub display_name: String,
    pub metadata: Option<Value>,
}

/// Partial tenant update, `None` keeps the stored value
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TenantPatch {
    pub display_name: Option<String>,
    pub active: Option<bool>,
    pub metadata: Option<Value>,
}

/// Declared type of a field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldType {
    Text,
    RichText,
    Number,
    Boolean,
    Date,
    Media,
    Relation,
    Json,
}

impl FieldType {
    pub const ALL: [FieldType; 8] = [
        FieldType::Text,
        FieldType::RichText,
        FieldType::Number,
        FieldType::Boolean,
        FieldType::Date,
        FieldType::Media,
        FieldType::Relation,
        FieldType::Json,
    ];

    /// Stable upper-case tag used in storage and on the wire
    pub fn as_str(self) -> &'static str {
        match self {
            FieldType::Text => "TEXT",
            FieldType::RichText => "RICH_TEXT",
            FieldType::Number => "NUMBER",
            FieldType::Boolean => "BOOLEAN",
            FieldType::Date => "DATE",
            FieldType::Media => "MEDIA",
            FieldType::Relation => "RELATION",
            FieldType::Json => "JSON",
        }
    }

    /// Parse a tag produced by [`FieldType::as_str`]
    pub fn parse(tag: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.as_str() == tag)
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Shape of one field of a content model
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldSchema {
    /// Identifier-safe key, unique within the model
    pub key: String,
    pub display_name: String,
    pub field_type: FieldType,
    pub required: bool,
    /// Values must not repeat across entries of the model within a tenant
    pub unique: bool,
    pub help_text: Option<String>,
    /// Applied when the key is absent from a candidate entry
    pub default_value: Option<Value>,
    /// JSON Schema for JSON fields
    pub schema: Option<Value>,
}

impl FieldSchema {
    /// Optional field whose display name equals its key
    pub fn new(key: impl Into<String>, field_type: FieldType) -> Self {
        let key = key.into();
        Self {
            display_name: key.clone(),
            key,
            field_type,
            required: false,
            unique: false,
            help_text: None,
            default_value: None,
            schema: None,
        }
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn unique(mut self) -> Self {
        self.unique = true;
        self
    }

    pub fn with_display_name(mut self, display_name: impl Into<String>) -> Self {
        self.display_name = display_name.into();
        self
    }

    pub fn with_help_text(mut self, help_text: impl Into<String>) -> Self {
        self.help_text = Some(help_text.into());
        self
    }

    pub fn with_default(mut self, value: Value) -> Self {
        self.default_value = Some(value);
        self
    }

    pub fn with_schema(mut self, schema: Value) -> Self {
        self.schema = Some(schema);
        self
    }

    /// Field schemas are identified by key within a model
    pub fn same_key(&self, other: &FieldSchema) -> bool {
        self.key == other.key
    }
}

/// Schema for one entity type within a tenant
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentModel {
    pub id: Uuid,
    /// Owning tenant
    pub tenant_id: Uuid,
    /// Globally unique identifier-safe name
    pub api_name: String,
    pub display_name: String,
    pub description: Option<String>,
    /// Ordered; the order is the default display/edit order
    pub fields: Vec<FieldSchema>,
    /// Empty means locale-agnostic
    pub locales: Vec<String>,
    /// At most one entry may exist
    pub singleton: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ContentModel {
    pub fn field(&self, key: &str) -> Option<&FieldSchema> {
        self.fields.iter().find(|f| f.key == key)
    }

    pub fn is_locale_agnostic(&self) -> bool {
        self.locales.is_empty()
    }
}

/// Data required to define a content model
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewContentModel {
    pub tenant_id: Uuid,
    pub api_name: String,
    pub display_name: String,
    pub description: Option<String>,
    pub fields: Vec<FieldSchema>,
    pub locales: Vec<String>,
    pub singleton: bool,
}

impl NewContentModel {
    pub fn new(
        tenant_id: Uuid,
        api_name: impl Into<String>,
        display_name: impl Into<String>,
        fields: Vec<FieldSchema>,
    ) -> Self {
        Self {
            tenant_id,
            api_name: api_name.into(),
            display_name: display_name.into(),
            description: None,
            fields,
            locales: Vec::new(),
            singleton: false,
        }
    }

    pub fn with_locales<I, S>(mut self, locales: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.locales = locales.into_iter().map(Into::into).collect();
        self
    }

    pub fn singleton(mut self) -> Self {
        self.singleton = true;
        self
    }
}

/// Partial model update, `None` keeps the stored value
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ContentModelPatch {
    pub api_name: Option<String>,
    pub display_name: Option<String>,
    /// `Some(None)` clears the description
    pub description: Option<Option<String>>,
    /// Replaces the whole field list
    pub fields: Option<Vec<FieldSchema>>,
    pub locales: Option<Vec<String>>,
    pub singleton: Option<bool>,
}

/// Record conforming to a content model
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentEntry {
    pub id: Uuid,
    pub tenant_id: Uuid,
    pub model_id: Uuid,
    pub locale: Option<String>,
    pub values: FieldValues,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Partial entry update merged over the stored values
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ContentEntryPatch {
    /// New values win over stored ones; unspecified keys are retained
    pub values: FieldValues,
    /// `None` keeps the stored locale
    pub locale: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_type_tags_round_trip() {
        for ty in FieldType::ALL {
            assert_eq!(FieldType::parse(ty.as_str()), Some(ty));
        }
        assert_eq!(FieldType::parse("text"), None);
        assert_eq!(FieldType::RichText.to_string(), "RICH_TEXT");
    }

    #[test]
    fn test_field_schema_same_key() {
        let a = FieldSchema::new("title", FieldType::Text);
        let b = FieldSchema::new("title", FieldType::Number).required();
        let c = FieldSchema::new("body", FieldType::Text);
        assert!(a.same_key(&b));
        assert!(!a.same_key(&c));
        assert_eq!(a.display_name, "title");
    }
}
