//! Content model definition checks and entry validation
//!
//! Entry values are checked through a dispatch table keyed by [`FieldType`].
//! Validation is pure: nothing here touches storage.

use crate::contract::{ContentError, ContentModel, FieldSchema, FieldType, FieldValues};
use chrono::{DateTime, NaiveDate};
use jsonschema::Validator;
use serde_json::Value;
use std::collections::{HashMap, HashSet};

/// Check for one non-null value of a field
pub type FieldCheck = fn(&FieldSchema, &Value) -> Result<(), ContentError>;

/// Dispatch table from field type to value check
#[derive(Clone)]
pub struct FieldValidators {
    checks: HashMap<FieldType, FieldCheck>,
}

impl FieldValidators {
    /// Built-in checks for every field type
    pub fn standard() -> Self {
        let mut checks: HashMap<FieldType, FieldCheck> = HashMap::new();
        checks.insert(FieldType::Text, check_string);
        checks.insert(FieldType::RichText, check_string);
        checks.insert(FieldType::Number, check_number);
        checks.insert(FieldType::Boolean, check_boolean);
        checks.insert(FieldType::Date, check_date);
        checks.insert(FieldType::Media, check_reference);
        checks.insert(FieldType::Relation, check_reference);
        checks.insert(FieldType::Json, check_json);
        Self { checks }
    }

    /// Replace the check used for a field type
    pub fn register(&mut self, field_type: FieldType, check: FieldCheck) {
        self.checks.insert(field_type, check);
    }

    /// Run the check registered for the field's type
    ///
    /// A type with no registered check is a wiring fault, never a pass.
    pub fn check(&self, field: &FieldSchema, value: &Value) -> Result<(), ContentError> {
        match self.checks.get(&field.field_type) {
            Some(check) => check(field, value),
            None => {
                tracing::error!(field = %field.key, field_type = %field.field_type, "No value check registered");
                Err(ContentError::Internal)
            }
        }
    }
}

impl Default for FieldValidators {
    fn default() -> Self {
        Self::standard()
    }
}

fn mismatch(field: &FieldSchema) -> ContentError {
    ContentError::TypeMismatch {
        field: field.key.clone(),
        expected: field.field_type,
    }
}

fn expect_shape(field: &FieldSchema, matches: bool) -> Result<(), ContentError> {
    if matches {
        Ok(())
    } else {
        Err(mismatch(field))
    }
}

fn check_string(field: &FieldSchema, value: &Value) -> Result<(), ContentError> {
    expect_shape(field, value.is_string())
}

fn check_number(field: &FieldSchema, value: &Value) -> Result<(), ContentError> {
    expect_shape(field, value.is_number())
}

fn check_boolean(field: &FieldSchema, value: &Value) -> Result<(), ContentError> {
    expect_shape(field, value.is_boolean())
}

/// RFC 3339 timestamp, calendar date or integer epoch milliseconds
fn check_date(field: &FieldSchema, value: &Value) -> Result<(), ContentError> {
    let parseable = match value {
        Value::String(s) => {
            DateTime::parse_from_rfc3339(s).is_ok()
                || NaiveDate::parse_from_str(s, "%Y-%m-%d").is_ok()
        }
        Value::Number(n) => n.is_i64() || n.is_u64(),
        _ => false,
    };
    expect_shape(field, parseable)
}

/// Identifier of a media object or related entry. Existence is not verified here.
fn check_reference(field: &FieldSchema, value: &Value) -> Result<(), ContentError> {
    let is_reference = match value {
        Value::String(s) => !s.trim().is_empty(),
        Value::Number(n) => n.is_u64(),
        _ => false,
    };
    expect_shape(field, is_reference)
}

fn check_json(field: &FieldSchema, value: &Value) -> Result<(), ContentError> {
    match &field.schema {
        Some(schema) => validate_against_schema(&field.key, value, schema),
        None => Ok(()),
    }
}

/// Validate a JSON field value against the field's JSON Schema
pub fn validate_against_schema(field: &str, data: &Value, schema: &Value) -> Result<(), ContentError> {
    let validator = compile_schema(field, schema)?;

    let errors: Vec<String> = validator.iter_errors(data).map(|e| e.to_string()).collect();
    if !errors.is_empty() {
        return Err(ContentError::SchemaViolation {
            field: field.to_string(),
            errors,
        });
    }

    Ok(())
}

fn compile_schema(field: &str, schema: &Value) -> Result<Validator, ContentError> {
    Validator::new(schema)
        .map_err(|e| ContentError::schema(format!("invalid JSON Schema on field '{}': {}", field, e)))
}

/// Validate an identifier-safe name: a letter followed by letters, digits or '_'
pub fn validate_identifier(what: &str, value: &str) -> Result<(), ContentError> {
    let mut chars = value.chars();
    let Some(first) = chars.next() else {
        return Err(ContentError::schema(format!("{} cannot be empty", what)));
    };

    if !first.is_ascii_alphabetic() {
        return Err(ContentError::schema(format!(
            "{} '{}' must start with a letter",
            what, value
        )));
    }

    if !chars.all(|c| c.is_ascii_alphanumeric() || c == '_') {
        return Err(ContentError::schema(format!(
            "{} '{}' contains invalid characters. Only letters, digits and '_' are allowed",
            what, value
        )));
    }

    Ok(())
}

/// Validate a tenant slug: lowercase alphanumeric words joined by single hyphens
pub fn validate_slug(slug: &str) -> Result<(), ContentError> {
    let well_formed = !slug.is_empty()
        && slug
            .split('-')
            .all(|word| !word.is_empty() && word.chars().all(|c| c.is_ascii_lowercase() || c.is_ascii_digit()));

    if !well_formed {
        return Err(ContentError::schema(format!(
            "tenant slug '{}' must be lowercase alphanumeric words separated by single '-'",
            slug
        )));
    }
    Ok(())
}

/// Validate a locale code such as "en", "zh-CN" or "pt_BR"
pub fn validate_locale_code(code: &str) -> Result<(), ContentError> {
    let mut parts = code.split(['-', '_']);
    let language_ok = parts
        .next()
        .is_some_and(|p| (2..=3).contains(&p.len()) && p.chars().all(|c| c.is_ascii_alphabetic()));
    let subtags_ok = parts.all(|p| (2..=8).contains(&p.len()) && p.chars().all(|c| c.is_ascii_alphanumeric()));

    if !(language_ok && subtags_ok) {
        return Err(ContentError::schema(format!("invalid locale code '{}'", code)));
    }
    Ok(())
}

/// Validates content model definitions and entry values
#[derive(Clone, Default)]
pub struct ValidationEngine {
    validators: FieldValidators,
}

impl ValidationEngine {
    pub fn new(validators: FieldValidators) -> Self {
        Self { validators }
    }

    /// Check a model definition: api name, field keys, defaults, schemas, locales
    ///
    /// Api name uniqueness needs storage and is checked by the service.
    pub fn validate_definition(
        &self,
        api_name: &str,
        fields: &[FieldSchema],
        locales: &[String],
    ) -> Result<(), ContentError> {
        validate_identifier("api name", api_name)?;

        let mut keys = HashSet::new();
        for field in fields {
            validate_identifier("field key", &field.key)?;
            if !keys.insert(field.key.as_str()) {
                return Err(ContentError::schema(format!(
                    "duplicate field key '{}'",
                    field.key
                )));
            }

            if let Some(schema) = &field.schema {
                if field.field_type != FieldType::Json {
                    return Err(ContentError::schema(format!(
                        "field '{}' is {} but only JSON fields may carry a schema",
                        field.key, field.field_type
                    )));
                }
                compile_schema(&field.key, schema)?;
            }

            if let Some(default) = field.default_value.as_ref().filter(|v| !v.is_null()) {
                self.validators.check(field, default).map_err(|e| {
                    ContentError::schema(format!("default value of field '{}' is invalid: {}", field.key, e))
                })?;
            }
        }

        let mut seen = HashSet::new();
        for locale in locales {
            validate_locale_code(locale)?;
            if !seen.insert(locale.as_str()) {
                return Err(ContentError::schema(format!("duplicate locale '{}'", locale)));
            }
        }

        Ok(())
    }

    /// Validate candidate values against a model
    ///
    /// Returns the candidate values with defaults applied for absent keys.
    /// Singleton and unique-field checks need storage and are done by the service.
    pub fn validate(
        &self,
        model: &ContentModel,
        values: &FieldValues,
        locale: Option<&str>,
    ) -> Result<FieldValues, ContentError> {
        let mut normalized = values.clone();

        for field in &model.fields {
            match values.get(&field.key) {
                None | Some(Value::Null) if field.required => {
                    return Err(ContentError::RequiredField {
                        field: field.key.clone(),
                    });
                }
                Some(Value::Null) => {}
                Some(value) => self.validators.check(field, value)?,
                None => {
                    if let Some(default) = field.default_value.as_ref().filter(|v| !v.is_null()) {
                        normalized.insert(field.key.clone(), default.clone());
                    }
                }
            }
        }

        if let Some(stray) = values.keys().find(|key| model.field(key).is_none()) {
            return Err(ContentError::UnknownField {
                field: stray.clone(),
            });
        }

        check_locale(model, locale)?;

        Ok(normalized)
    }
}

fn check_locale(model: &ContentModel, locale: Option<&str>) -> Result<(), ContentError> {
    let allowed = match locale {
        Some(code) => model.locales.iter().any(|l| l == code),
        None => model.is_locale_agnostic(),
    };

    if allowed {
        Ok(())
    } else {
        Err(ContentError::InvalidLocale {
            locale: locale.map(str::to_string),
            allowed: model.locales.clone(),
        })
    }
}
