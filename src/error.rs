//! Errors surfaced by the profile and post engines.
//!
//! Every variant maps to one HTTP status and renders as a JSON object of
//! field key to message, so clients can bind errors to form fields the same
//! way for validation failures and domain refusals.

use serde_json::{Map, Value};

use crate::storage::StorageError;
use crate::validation::ValidationErrors;

#[derive(Debug)]
pub enum CoreError {
    /// Input rejected by the validation gate (400).
    Validation(ValidationErrors),
    /// Caller is not authenticated (401).
    Unauthenticated,
    /// Caller does not own the target (401).
    NotAuthorized,
    /// Target entity is missing (404). Carries the error key, e.g. `noprofile`.
    NotFound { key: &'static str, message: String },
    /// Uniqueness violation (409). Carries the conflicting field.
    Conflict { field: &'static str, message: String },
    /// Like of an already-liked post (400).
    AlreadyLiked,
    /// Unlike of a post that is not liked (400).
    NotLiked,
    /// Store fault (500). The message is not shown to clients.
    Storage(StorageError),
}

impl CoreError {
    pub fn not_found(key: &'static str, message: impl Into<String>) -> Self {
        CoreError::NotFound {
            key,
            message: message.into(),
        }
    }

    pub fn conflict(field: &'static str, message: impl Into<String>) -> Self {
        CoreError::Conflict {
            field,
            message: message.into(),
        }
    }

    pub fn status_code(&self) -> u16 {
        match self {
            CoreError::Validation(_) | CoreError::AlreadyLiked | CoreError::NotLiked => 400,
            CoreError::Unauthenticated | CoreError::NotAuthorized => 401,
            CoreError::NotFound { .. } => 404,
            CoreError::Conflict { .. } => 409,
            CoreError::Storage(_) => 500,
        }
    }

    /// JSON body for the error response.
    pub fn body(&self) -> Value {
        let mut body = Map::new();
        match self {
            CoreError::Validation(errors) => {
                for (field, message) in errors {
                    body.insert(field.clone(), Value::String(message.clone()));
                }
            }
            CoreError::Unauthenticated => {
                body.insert("unauthenticated".into(), "Unauthorized".into());
            }
            CoreError::NotAuthorized => {
                body.insert("notauthorized".into(), "User not authorized".into());
            }
            CoreError::NotFound { key, message } => {
                body.insert((*key).into(), message.clone().into());
            }
            CoreError::Conflict { field, message } => {
                body.insert((*field).into(), message.clone().into());
            }
            CoreError::AlreadyLiked => {
                body.insert(
                    "alreadyliked".into(),
                    "User already liked this post".into(),
                );
            }
            CoreError::NotLiked => {
                body.insert(
                    "notliked".into(),
                    "You have not yet liked this post".into(),
                );
            }
            CoreError::Storage(_) => {
                body.insert("error".into(), "Internal server error".into());
            }
        }
        Value::Object(body)
    }
}

impl std::fmt::Display for CoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CoreError::Validation(errors) => {
                let fields: Vec<&str> = errors.keys().map(String::as_str).collect();
                write!(f, "validation failed: {}", fields.join(", "))
            }
            CoreError::Unauthenticated => write!(f, "unauthenticated"),
            CoreError::NotAuthorized => write!(f, "not authorized"),
            CoreError::NotFound { message, .. } => write!(f, "not found: {message}"),
            CoreError::Conflict { message, .. } => write!(f, "conflict: {message}"),
            CoreError::AlreadyLiked => write!(f, "already liked"),
            CoreError::NotLiked => write!(f, "not liked"),
            CoreError::Storage(e) => write!(f, "storage error: {e}"),
        }
    }
}

impl std::error::Error for CoreError {}

impl From<StorageError> for CoreError {
    fn from(e: StorageError) -> Self {
        CoreError::Storage(e)
    }
}

impl From<ValidationErrors> for CoreError {
    fn from(errors: ValidationErrors) -> Self {
        CoreError::Validation(errors)
    }
}
