//! RFC 7807 problem bodies returned for failed requests

use axum::http::StatusCode;
use serde::Serialize;
use utoipa::ToSchema;
use validator::{ValidationError, ValidationErrors};

/// Key under which validator reports struct-level (schema) failures
const GLOBAL_ERRORS_KEY: &str = "__all__";

const PROBLEM_TYPE: &str = "about:blank";

fn status_title(status: StatusCode) -> String {
    status.canonical_reason().unwrap_or("Unknown Status").to_string()
}

fn error_message(error: &ValidationError) -> String {
    match &error.message {
        Some(message) => message.to_string(),
        None => error.code.to_string(),
    }
}

/// Generic problem detail
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct ProblemDetail {
    #[serde(rename = "type")]
    #[schema(example = "about:blank")]
    pub problem_type: String,
    pub title: String,
    pub status: u16,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub instance: Option<String>,
}

impl ProblemDetail {
    pub fn for_status(status: StatusCode) -> Self {
        Self {
            problem_type: PROBLEM_TYPE.to_string(),
            title: status_title(status),
            status: status.as_u16(),
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

/// A single field-level validation failure
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct FieldError {
    #[schema(example = "title")]
    pub field: String,
    #[schema(example = "must not be blank")]
    pub message: String,
}

/// 400 body listing every failed field check and global check
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ValidationProblem {
    #[serde(rename = "type")]
    #[schema(example = "about:blank")]
    problem_type: String,
    #[schema(example = "Bad Request")]
    title: String,
    #[schema(example = 400)]
    status: u16,
    #[schema(example = "/api/books")]
    instance: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    errors: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    field_errors: Option<Vec<FieldError>>,
}

impl ValidationProblem {
    pub fn new(instance: impl Into<String>) -> Self {
        Self {
            problem_type: PROBLEM_TYPE.to_string(),
            title: status_title(StatusCode::BAD_REQUEST),
            status: StatusCode::BAD_REQUEST.as_u16(),
            instance: instance.into(),
            errors: None,
            field_errors: None,
        }
    }

    /// Build the problem for a failed validation of the request at `instance`.
    ///
    /// Field errors are ordered by field name; errors for the same field keep
    /// the order the validator reported them in. Messages fall back to the
    /// error code when no message was attached.
    pub fn from_validation_errors(instance: impl Into<String>, errors: &ValidationErrors) -> Self {
        let mut global = Vec::new();
        let mut fields: Vec<(String, &Vec<ValidationError>)> = errors
            .field_errors()
            .into_iter()
            .map(|(field, errs)| (field.to_string(), errs))
            .collect();
        fields.sort_by(|a, b| a.0.cmp(&b.0));

        let mut field_errors = Vec::new();
        for (field, errs) in fields {
            if field == GLOBAL_ERRORS_KEY {
                global.extend(errs.iter().map(error_message));
                continue;
            }
            field_errors.extend(errs.iter().map(|error| FieldError {
                field: field.clone(),
                message: error_message(error),
            }));
        }

        Self::new(instance)
            .with_errors(global)
            .with_field_errors(field_errors)
    }

    /// Replace the global errors; an empty list clears them
    pub fn with_errors(mut self, errors: Vec<String>) -> Self {
        self.errors = (!errors.is_empty()).then_some(errors);
        self
    }

    /// Replace the field errors; an empty list clears them
    pub fn with_field_errors(mut self, field_errors: Vec<FieldError>) -> Self {
        self.field_errors = (!field_errors.is_empty()).then_some(field_errors);
        self
    }

    pub fn status(&self) -> StatusCode {
        StatusCode::BAD_REQUEST
    }

    pub fn instance(&self) -> &str {
        &self.instance
    }

    pub fn errors(&self) -> Option<&[String]> {
        self.errors.as_deref()
    }

    pub fn field_errors(&self) -> Option<&[FieldError]> {
        self.field_errors.as_deref()
    }
}
