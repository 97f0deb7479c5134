//! Entity to model mappers
//!
//! Conversions between SeaORM entities and contract models

use super::entity::{content_entry, content_model, tenant};
use crate::contract::{ContentEntry, ContentModel, FieldSchema, FieldType, Tenant};
use anyhow::{anyhow, Context};
use serde_json::Value;

// ===== Tenant Conversions =====

impl From<tenant::Model> for Tenant {
    fn from(entity: tenant::Model) -> Self {
        Self {
            id: entity.id,
            slug: entity.slug,
            display_name: entity.display_name,
            active: entity.active,
            metadata: entity.metadata,
            created_at: entity.created_at,
            updated_at: entity.updated_at,
        }
    }
}

impl From<&Tenant> for tenant::ActiveModel {
    fn from(model: &Tenant) -> Self {
        use sea_orm::ActiveValue::*;

        Self {
            id: Set(model.id),
            slug: Set(model.slug.clone()),
            display_name: Set(model.display_name.clone()),
            active: Set(model.active),
            metadata: Set(model.metadata.clone()),
            created_at: Set(model.created_at),
            updated_at: Set(model.updated_at),
        }
    }
}

// ===== Content Model Conversions =====

impl TryFrom<content_model::Model> for ContentModel {
    type Error = anyhow::Error;

    fn try_from(entity: content_model::Model) -> Result<Self, Self::Error> {
        let fields: Vec<FieldSchemaJson> = serde_json::from_value(entity.fields)
            .with_context(|| format!("malformed field list of content model {}", entity.id))?;
        let locales: Vec<String> = serde_json::from_value(entity.locales)
            .with_context(|| format!("malformed locales of content model {}", entity.id))?;

        Ok(Self {
            id: entity.id,
            tenant_id: entity.tenant_id,
            api_name: entity.api_name,
            display_name: entity.display_name,
            description: entity.description,
            fields: fields
                .into_iter()
                .map(FieldSchema::try_from)
                .collect::<anyhow::Result<_>>()?,
            locales,
            singleton: entity.singleton,
            created_at: entity.created_at,
            updated_at: entity.updated_at,
        })
    }
}

impl TryFrom<&ContentModel> for content_model::ActiveModel {
    type Error = anyhow::Error;

    fn try_from(model: &ContentModel) -> Result<Self, Self::Error> {
        use sea_orm::ActiveValue::*;

        let fields: Vec<FieldSchemaJson> = model.fields.iter().map(Into::into).collect();

        Ok(Self {
            id: Set(model.id),
            tenant_id: Set(model.tenant_id),
            api_name: Set(model.api_name.clone()),
            display_name: Set(model.display_name.clone()),
            description: Set(model.description.clone()),
            fields: Set(serde_json::to_value(fields)?),
            locales: Set(serde_json::to_value(&model.locales)?),
            singleton: Set(model.singleton),
            created_at: Set(model.created_at),
            updated_at: Set(model.updated_at),
        })
    }
}

// ===== Content Entry Conversions =====

impl TryFrom<content_entry::Model> for ContentEntry {
    type Error = anyhow::Error;

    fn try_from(entity: content_entry::Model) -> Result<Self, Self::Error> {
        let Value::Object(values) = entity.data else {
            return Err(anyhow!("data of content entry {} is not a JSON object", entity.id));
        };

        Ok(Self {
            id: entity.id,
            tenant_id: entity.tenant_id,
            model_id: entity.model_id,
            locale: entity.locale,
            values,
            created_at: entity.created_at,
            updated_at: entity.updated_at,
        })
    }
}

/// Build the active model for an entry; `singleton` arms the storage guard
pub fn entry_active_model(entry: &ContentEntry, singleton: bool) -> content_entry::ActiveModel {
    use sea_orm::ActiveValue::*;

    content_entry::ActiveModel {
        id: Set(entry.id),
        tenant_id: Set(entry.tenant_id),
        model_id: Set(entry.model_id),
        locale: Set(entry.locale.clone()),
        data: Set(Value::Object(entry.values.clone())),
        singleton_guard: Set(singleton.then_some(entry.model_id)),
        created_at: Set(entry.created_at),
        updated_at: Set(entry.updated_at),
    }
}

// ===== JSON Serialization Helpers =====

/// JSON representation of a field schema for database storage
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
struct FieldSchemaJson {
    key: String,
    display_name: String,
    #[serde(rename = "type")]
    field_type: String,
    #[serde(default)]
    required: bool,
    #[serde(default)]
    unique: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    help_text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    default_value: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    schema: Option<Value>,
}

impl TryFrom<FieldSchemaJson> for FieldSchema {
    type Error = anyhow::Error;

    fn try_from(json: FieldSchemaJson) -> Result<Self, Self::Error> {
        let field_type = FieldType::parse(&json.field_type)
            .ok_or_else(|| anyhow!("unknown field type '{}' on field '{}'", json.field_type, json.key))?;

        Ok(Self {
            key: json.key,
            display_name: json.display_name,
            field_type,
            required: json.required,
            unique: json.unique,
            help_text: json.help_text,
            default_value: json.default_value,
            schema: json.schema,
        })
    }
}

impl From<&FieldSchema> for FieldSchemaJson {
    fn from(field: &FieldSchema) -> Self {
        Self {
            key: field.key.clone(),
            display_name: field.display_name.clone(),
            field_type: field.field_type.as_str().to_string(),
            required: field.required,
            unique: field.unique,
            help_text: field.help_text.clone(),
            default_value: field.default_value.clone(),
            schema: field.schema.clone(),
        }
    }
}
