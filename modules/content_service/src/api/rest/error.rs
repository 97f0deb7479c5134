//! HTTP error mapping to RFC-9457 Problem Details

use crate::contract::ContentError;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

/// RFC-9457 Problem Details for HTTP API errors
#[derive(Debug, Serialize)]
pub struct Problem {
    /// A URI reference that identifies the problem type
    #[serde(rename = "type")]
    pub type_uri: String,

    /// A short, human-readable summary of the problem type
    pub title: String,

    /// The HTTP status code
    pub status: u16,

    /// Stable error code (`ContentError::kind`)
    pub code: String,

    /// A human-readable explanation specific to this occurrence
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,

    /// A URI reference that identifies the specific occurrence
    #[serde(skip_serializing_if = "Option::is_none")]
    pub instance: Option<String>,
}

impl Problem {
    pub fn new(status: StatusCode, title: impl Into<String>, code: impl Into<String>) -> Self {
        Self {
            type_uri: format!("https://httpstatuses.io/{}", status.as_u16()),
            title: title.into(),
            status: status.as_u16(),
            code: code.into(),
            detail: None,
            instance: None,
        }
    }

    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }

    pub fn with_instance(mut self, instance: impl Into<String>) -> Self {
        self.instance = Some(instance.into());
        self
    }
}

impl IntoResponse for Problem {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        (status, Json(self)).into_response()
    }
}

impl From<ContentError> for Problem {
    fn from(error: ContentError) -> Self {
        map_domain_error(error)
    }
}

/// HTTP status for a domain error
pub fn status_for(error: &ContentError) -> StatusCode {
    match error {
        ContentError::SchemaDefinition { .. }
        | ContentError::RequiredField { .. }
        | ContentError::TypeMismatch { .. }
        | ContentError::SchemaViolation { .. }
        | ContentError::UnknownField { .. }
        | ContentError::InvalidLocale { .. } => StatusCode::BAD_REQUEST,
        ContentError::TenantDisabled { .. } => StatusCode::FORBIDDEN,
        ContentError::NotFound { .. } => StatusCode::NOT_FOUND,
        ContentError::ApiNameTaken { .. }
        | ContentError::Conflict { .. }
        | ContentError::SingletonViolation { .. }
        | ContentError::UniqueField { .. } => StatusCode::CONFLICT,
        ContentError::Internal => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// Map domain errors to HTTP Problem Details
pub fn map_domain_error(error: ContentError) -> Problem {
    let status = status_for(&error);
    let code = error.kind();

    let title = match &error {
        ContentError::SchemaDefinition { .. } => "Invalid Schema Definition".to_string(),
        ContentError::ApiNameTaken { .. } => "Api Name Taken".to_string(),
        ContentError::NotFound { resource, .. } => format!("{} Not Found", capitalize(resource)),
        ContentError::RequiredField { .. } => "Required Field Missing".to_string(),
        ContentError::TypeMismatch { .. } => "Type Mismatch".to_string(),
        ContentError::SchemaViolation { .. } => "Schema Validation Failed".to_string(),
        ContentError::UnknownField { .. } => "Unknown Field".to_string(),
        ContentError::InvalidLocale { .. } => "Invalid Locale".to_string(),
        ContentError::SingletonViolation { .. } => "Singleton Violation".to_string(),
        ContentError::UniqueField { .. } => "Duplicate Unique Value".to_string(),
        ContentError::TenantDisabled { .. } => "Tenant Disabled".to_string(),
        ContentError::Conflict { .. } => "Conflict".to_string(),
        ContentError::Internal => {
            return Problem::new(status, "Internal Server Error", code)
                .with_detail("An unexpected error occurred");
        }
    };

    Problem::new(status, title, code).with_detail(error.to_string())
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::contract::FieldType;
    use uuid::Uuid;

    #[test]
    fn test_status_codes() {
        let cases = [
            (ContentError::schema("bad"), StatusCode::BAD_REQUEST),
            (
                ContentError::RequiredField { field: "title".into() },
                StatusCode::BAD_REQUEST,
            ),
            (
                ContentError::TypeMismatch {
                    field: "price".into(),
                    expected: FieldType::Number,
                },
                StatusCode::BAD_REQUEST,
            ),
            (
                ContentError::UnknownField { field: "x".into() },
                StatusCode::BAD_REQUEST,
            ),
            (
                ContentError::InvalidLocale {
                    locale: None,
                    allowed: vec!["en".into()],
                },
                StatusCode::BAD_REQUEST,
            ),
            (
                ContentError::TenantDisabled {
                    tenant_id: Uuid::nil(),
                },
                StatusCode::FORBIDDEN,
            ),
            (ContentError::not_found("content model", "novel"), StatusCode::NOT_FOUND),
            (
                ContentError::ApiNameTaken {
                    api_name: "novel".into(),
                },
                StatusCode::CONFLICT,
            ),
            (
                ContentError::SingletonViolation { model: "home".into() },
                StatusCode::CONFLICT,
            ),
            (ContentError::UniqueField { field: "isbn".into() }, StatusCode::CONFLICT),
            (ContentError::Internal, StatusCode::INTERNAL_SERVER_ERROR),
        ];

        for (error, expected) in cases {
            assert_eq!(status_for(&error), expected, "status for {:?}", error);
        }
    }

    #[test]
    fn test_problem_carries_kind_code() {
        let problem = map_domain_error(ContentError::not_found("content model", "novel"));
        assert_eq!(problem.status, 404);
        assert_eq!(problem.code, "not_found");
        assert_eq!(problem.title, "Content model Not Found");
        assert_eq!(problem.detail.as_deref(), Some("content model not found: novel"));

        let json = serde_json::to_value(&problem).unwrap();
        assert_eq!(json["type"], "https://httpstatuses.io/404");
        assert!(json.get("instance").is_none());
    }

    #[test]
    fn test_internal_hides_detail() {
        let problem = map_domain_error(ContentError::Internal);
        assert_eq!(problem.status, 500);
        assert_eq!(problem.code, "internal");
        assert_eq!(problem.detail.as_deref(), Some("An unexpected error occurred"));
    }
}
