//! Typed error handling for the feria backend
//!
//! Every service operation surfaces failures as a [`FeriaError`] variant so
//! callers can branch on the error kind instead of string-matching. The
//! human-readable message (Spanish, rendered via `Display`) is what the
//! back-office UI shows; the stable `error_code()` tag is what programs use.
//!
//! # Example
//!
//! ```rust,ignore
//! match service.create(input).await {
//!     Ok(category) => println!("creada: {}", category.name),
//!     Err(FeriaError::DuplicateSlug { slug, .. }) => {
//!         println!("el slug '{}' ya existe", slug);
//!     }
//!     Err(e) => eprintln!("{}", e),
//! }
//! ```

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use std::fmt;
use uuid::Uuid;

/// The error type shared by every query and mutation service
#[derive(Debug, Clone, PartialEq)]
pub enum FeriaError {
    /// The entity targeted by the operation does not exist
    NotFound { entity: &'static str, id: Uuid },

    /// Another record of the same type already uses this slug
    DuplicateSlug { entity: &'static str, slug: String },

    /// Another record of the same type already uses this name
    DuplicateName { entity: &'static str, name: String },

    /// Another record of the same type already uses this field value
    /// (SKU, barcode)
    DuplicateField {
        entity: &'static str,
        field: &'static str,
        value: String,
    },

    /// A referenced foreign entity does not exist; `entity` names which one
    InvalidReference { entity: &'static str, id: Uuid },

    /// A category cannot be assigned as its own parent
    SelfReference,

    /// Deletion blocked by dependent child records
    HasDependents {
        entity: &'static str,
        dependents: &'static str,
        count: usize,
    },

    /// Input validation failed for a specific field
    Validation { field: String, message: String },

    /// Infrastructure failure; the original error is logged server-side and
    /// callers only see a generic localized message
    Storage(String),
}

impl fmt::Display for FeriaError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FeriaError::NotFound { entity, id } => {
                write!(f, "No se encontró {} con id '{}'", entity, id)
            }
            FeriaError::DuplicateSlug { entity, slug } => {
                write!(f, "Ya existe {} con el slug '{}'", entity, slug)
            }
            FeriaError::DuplicateName { entity, name } => {
                write!(f, "Ya existe {} con el nombre '{}'", entity, name)
            }
            FeriaError::DuplicateField {
                entity,
                field,
                value,
            } => {
                write!(f, "Ya existe {} con {} '{}'", entity, field, value)
            }
            FeriaError::InvalidReference { entity, id } => {
                write!(f, "La referencia a {} '{}' no existe", entity, id)
            }
            FeriaError::SelfReference => {
                write!(f, "Una categoría no puede ser su propia categoría padre")
            }
            FeriaError::HasDependents {
                entity,
                dependents,
                count,
            } => {
                write!(
                    f,
                    "No se puede eliminar: {} tiene {} {} asociados",
                    entity, count, dependents
                )
            }
            FeriaError::Validation { field, message } => {
                write!(f, "Validación fallida para '{}': {}", field, message)
            }
            FeriaError::Storage(_) => {
                write!(f, "Error interno del servidor")
            }
        }
    }
}

impl std::error::Error for FeriaError {}

impl FeriaError {
    /// Stable machine-readable tag for this error
    pub fn error_code(&self) -> &'static str {
        match self {
            FeriaError::NotFound { .. } => "NOT_FOUND",
            FeriaError::DuplicateSlug { .. } => "DUPLICATE_SLUG",
            FeriaError::DuplicateName { .. } => "DUPLICATE_NAME",
            FeriaError::DuplicateField { .. } => "DUPLICATE_FIELD",
            FeriaError::InvalidReference { .. } => "INVALID_REFERENCE",
            FeriaError::SelfReference => "SELF_REFERENCE",
            FeriaError::HasDependents { .. } => "HAS_DEPENDENTS",
            FeriaError::Validation { .. } => "VALIDATION_ERROR",
            FeriaError::Storage(_) => "STORAGE_ERROR",
        }
    }

    /// HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            FeriaError::NotFound { .. } => StatusCode::NOT_FOUND,
            FeriaError::DuplicateSlug { .. } => StatusCode::CONFLICT,
            FeriaError::DuplicateName { .. } => StatusCode::CONFLICT,
            FeriaError::DuplicateField { .. } => StatusCode::CONFLICT,
            FeriaError::InvalidReference { .. } => StatusCode::BAD_REQUEST,
            FeriaError::SelfReference => StatusCode::BAD_REQUEST,
            FeriaError::HasDependents { .. } => StatusCode::CONFLICT,
            FeriaError::Validation { .. } => StatusCode::BAD_REQUEST,
            FeriaError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Build a `Storage` error from any infrastructure failure, logging the
    /// original before it is replaced by the generic message
    pub fn storage(context: &str, err: impl fmt::Display) -> Self {
        tracing::error!(context, error = %err, "infrastructure failure");
        FeriaError::Storage(format!("{}: {}", context, err))
    }
}

/// Error body returned by HTTP handlers when an operation fails outright
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
    pub code: &'static str,
}

impl IntoResponse for FeriaError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = Json(ErrorBody {
            error: self.to_string(),
            code: self.error_code(),
        });
        (status, body).into_response()
    }
}

/// A specialized Result type for feria operations
pub type FeriaResult<T> = Result<T, FeriaError>;
