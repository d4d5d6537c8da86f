//! Book model

use std::borrow::Cow;

use serde::{Deserialize, Deserializer, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::{Validate, ValidationError};

/// Persisted book record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Book {
    /// Identifier assigned by the store
    #[schema(example = 1)]
    pub id: i64,
    #[schema(example = "New Book")]
    pub title: String,
    #[schema(example = "John Doe")]
    pub author: String,
}

/// Create book request
///
/// Missing or `null` fields read as empty strings so they are reported by
/// validation rather than rejected by the JSON parser. Any `id` is ignored.
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
pub struct NewBook {
    #[serde(default, deserialize_with = "null_as_empty")]
    #[validate(custom(function = "not_blank"))]
    #[schema(example = "New Book")]
    pub title: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    #[validate(custom(function = "not_blank"))]
    #[schema(example = "John Doe")]
    pub author: String,
}

impl NewBook {
    pub fn new(title: impl Into<String>, author: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            author: author.into(),
        }
    }
}

/// Rejects empty and whitespace-only strings
pub fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        let mut error = ValidationError::new("not_blank");
        error.message = Some(Cow::Borrowed("must not be blank"));
        return Err(error);
    }
    Ok(())
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}
