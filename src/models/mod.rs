//! Data models for the Book API

pub mod book;
pub mod problem;

// Re-export commonly used types
pub use book::{Book, NewBook};
pub use problem::{FieldError, ProblemDetail, ValidationProblem};
