//! REST DTOs with serde derives for HTTP API

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use utoipa::ToSchema;
use uuid::Uuid;

// ===== Tenant DTOs =====

/// Tenant response DTO
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct TenantDto {
    pub id: Uuid,

    #[schema(example = "acme-books")]
    pub slug: String,

    pub display_name: String,

    pub active: bool,

    /// Free-form JSON object
    pub metadata: Value,

    pub created_at: chrono::DateTime<chrono::Utc>,

    pub updated_at: chrono::DateTime<chrono::Utc>,
}

/// Create tenant request
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct CreateTenantRequest {
    #[schema(example = "acme-books")]
    pub slug: String,

    pub display_name: String,

    #[serde(default)]
    pub metadata: Option<Value>,
}

/// Partial tenant update request
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct UpdateTenantRequest {
    #[serde(default)]
    pub display_name: Option<String>,

    /// Set to false to disable writes for the tenant
    #[serde(default)]
    pub active: Option<bool>,

    #[serde(default)]
    pub metadata: Option<Value>,
}

// ===== Content Model DTOs =====

/// Field type tag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FieldTypeDto {
    Text,
    RichText,
    Number,
    Boolean,
    Date,
    Media,
    Relation,
    Json,
}

/// Field schema DTO
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct FieldSchemaDto {
    #[schema(example = "title")]
    pub key: String,

    /// Defaults to the key when omitted
    #[serde(default)]
    pub display_name: String,

    #[serde(rename = "type")]
    pub field_type: FieldTypeDto,

    #[serde(default)]
    pub required: bool,

    #[serde(default)]
    pub unique: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub help_text: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_value: Option<Value>,

    /// JSON Schema (JSON fields only)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schema: Option<Value>,
}

/// Content model response DTO
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ContentModelDto {
    pub id: Uuid,

    pub tenant_id: Uuid,

    #[schema(example = "novel")]
    pub api_name: String,

    pub display_name: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    pub fields: Vec<FieldSchemaDto>,

    pub locales: Vec<String>,

    pub singleton: bool,

    pub created_at: chrono::DateTime<chrono::Utc>,

    pub updated_at: chrono::DateTime<chrono::Utc>,
}

/// Create content model request
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct CreateContentModelRequest {
    pub tenant_id: Uuid,

    #[schema(example = "novel")]
    pub api_name: String,

    pub display_name: String,

    #[serde(default)]
    pub description: Option<String>,

    #[serde(default)]
    pub fields: Vec<FieldSchemaDto>,

    #[serde(default)]
    pub locales: Vec<String>,

    #[serde(default)]
    pub singleton: bool,
}

/// Partial content model update request
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct UpdateContentModelRequest {
    #[serde(default)]
    pub api_name: Option<String>,

    #[serde(default)]
    pub display_name: Option<String>,

    /// `null` clears the description, omitting it keeps the current one
    #[serde(default, deserialize_with = "double_option")]
    #[schema(value_type = Option<String>)]
    pub description: Option<Option<String>>,

    /// Replaces the whole field list
    #[serde(default)]
    pub fields: Option<Vec<FieldSchemaDto>>,

    #[serde(default)]
    pub locales: Option<Vec<String>>,

    #[serde(default)]
    pub singleton: Option<bool>,
}

/// Distinguishes an explicit `null` from an absent key
fn double_option<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

// ===== Content Entry DTOs =====

/// Content entry response DTO
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ContentEntryDto {
    pub id: Uuid,

    pub tenant_id: Uuid,

    pub model_id: Uuid,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub locale: Option<String>,

    /// Field key -> value
    #[schema(value_type = Object)]
    pub values: Map<String, Value>,

    pub created_at: chrono::DateTime<chrono::Utc>,

    pub updated_at: chrono::DateTime<chrono::Utc>,
}

/// Entry values request, used for create, validate and update
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct EntryValuesRequest {
    /// Candidate values; for updates, merged over the stored values
    #[serde(default)]
    #[schema(value_type = Object)]
    pub values: Map<String, Value>,

    #[serde(default)]
    #[schema(example = "en")]
    pub locale: Option<String>,
}

/// Normalized values returned by validate-only requests
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ValidationResponse {
    #[schema(value_type = Object)]
    pub values: Map<String, Value>,
}

// ===== List Response DTOs =====

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct TenantsListResponse {
    pub items: Vec<TenantDto>,
    pub total: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ContentModelsListResponse {
    pub items: Vec<ContentModelDto>,
    pub total: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ContentEntriesListResponse {
    pub items: Vec<ContentEntryDto>,
    pub total: usize,
}

// Note: Conversion implementations live in mapper.rs
