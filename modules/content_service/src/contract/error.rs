//! Contract error types for content service
//!
//! These errors are transport-agnostic and used for inter-module communication.
//! The REST layer maps them onto problem details; `kind()` stays stable across transports.

use super::model::FieldType;
use uuid::Uuid;

/// Content service domain errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ContentError {
    /// Malformed content model or tenant definition
    #[error("Invalid schema definition: {message}")]
    SchemaDefinition { message: String },

    /// Another content model already uses this api name
    #[error("Content model api name already taken: {api_name}")]
    ApiNameTaken { api_name: String },

    /// Tenant, content model or entry not found
    #[error("{resource} not found: {id}")]
    NotFound { resource: String, id: String },

    /// Required field missing or null
    #[error("Required field missing: {field}")]
    RequiredField { field: String },

    /// Value shape does not match the declared field type
    #[error("Field '{field}' expects a {expected} value")]
    TypeMismatch { field: String, expected: FieldType },

    /// JSON field value rejected by the field's JSON Schema
    #[error("Field '{field}' failed schema validation: {}", errors.join(", "))]
    SchemaViolation { field: String, errors: Vec<String> },

    /// Entry supplies a key its model does not declare
    #[error("Unknown field: {field}")]
    UnknownField { field: String },

    /// Entry locale not allowed by the model
    #[error("Invalid locale {locale:?}, allowed: [{}]", allowed.join(", "))]
    InvalidLocale {
        locale: Option<String>,
        allowed: Vec<String>,
    },

    /// Second entry for a singleton model
    #[error("Content model '{model}' is a singleton and already has an entry")]
    SingletonViolation { model: String },

    /// Value of a unique field already used by another entry
    #[error("Value of field '{field}' is already in use")]
    UniqueField { field: String },

    /// Tenant is soft-disabled
    #[error("Tenant is disabled: {tenant_id}")]
    TenantDisabled { tenant_id: Uuid },

    /// Conflicting state (duplicate slug, tenant still in use, ...)
    #[error("Conflict: {reason}")]
    Conflict { reason: String },

    /// Storage or other server-side failure
    #[error("Internal error")]
    Internal,
}

impl ContentError {
    pub fn not_found(resource: &str, id: impl ToString) -> Self {
        Self::NotFound {
            resource: resource.to_string(),
            id: id.to_string(),
        }
    }

    pub fn schema(message: impl Into<String>) -> Self {
        Self::SchemaDefinition {
            message: message.into(),
        }
    }

    /// Stable machine-readable error code
    pub fn kind(&self) -> &'static str {
        match self {
            Self::SchemaDefinition { .. } => "schema_definition",
            Self::ApiNameTaken { .. } => "api_name_taken",
            Self::NotFound { .. } => "not_found",
            Self::RequiredField { .. } => "required_field",
            Self::TypeMismatch { .. } => "type_mismatch",
            Self::SchemaViolation { .. } => "schema_violation",
            Self::UnknownField { .. } => "unknown_field",
            Self::InvalidLocale { .. } => "invalid_locale",
            Self::SingletonViolation { .. } => "singleton_violation",
            Self::UniqueField { .. } => "unique_field",
            Self::TenantDisabled { .. } => "tenant_disabled",
            Self::Conflict { .. } => "conflict",
            Self::Internal => "internal",
        }
    }

    /// Whether the caller can fix the failure by changing the request
    pub fn is_client_error(&self) -> bool {
        !matches!(self, Self::Internal)
    }
}
