//! # Error Types
//!
//! Structured error types for gasload_core. Most of the engine is fail-soft
//! (malformed numbers become zero, unknown categories aggregate as year-round),
//! so these errors only surface from explicit lookups and from file and report
//! I/O.
//!
//! ## Example
//!
//! ```rust
//! use gasload_core::errors::{CalcError, CalcResult};
//!
//! fn validate_rating(rating: f64) -> CalcResult<()> {
//!     if rating < 0.0 {
//!         return Err(CalcError::InvalidInput {
//!             field: "rating".to_string(),
//!             value: rating.to_string(),
//!             reason: "Rating cannot be negative".to_string(),
//!         });
//!     }
//!     Ok(())
//! }
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type alias for gasload_core operations
pub type CalcResult<T> = Result<T, CalcError>;

/// Structured error type for load estimation operations.
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", content = "details")]
pub enum CalcError {
    /// An input value is invalid (unknown unit key, unknown standard, etc.)
    #[error("Invalid input for '{field}': {value} - {reason}")]
    InvalidInput {
        field: String,
        value: String,
        reason: String,
    },

    /// Category is not part of the reference data
    #[error("Category not found: {category}")]
    CategoryNotFound { category: String },

    /// Equipment name is not listed under its category
    #[error("Equipment not found: '{equipment}' in category '{category}'")]
    EquipmentNotFound { category: String, equipment: String },

    /// No appliance entry carries the requested id
    #[error("Appliance not found: {id}")]
    ApplianceNotFound { id: String },

    /// File I/O error
    #[error("File error: {operation} on '{path}' - {reason}")]
    FileError {
        operation: String,
        path: String,
        reason: String,
    },

    /// JSON serialization/deserialization error
    #[error("Serialization error: {reason}")]
    SerializationError { reason: String },

    /// Generic internal error (report compilation and the like)
    #[error("Internal error: {message}")]
    Internal { message: String },
}

impl CalcError {
    /// Create an InvalidInput error
    pub fn invalid_input(field: impl Into<String>, value: impl Into<String>, reason: impl Into<String>) -> Self {
        CalcError::InvalidInput {
            field: field.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// Create a CategoryNotFound error
    pub fn category_not_found(category: impl Into<String>) -> Self {
        CalcError::CategoryNotFound {
            category: category.into(),
        }
    }

    /// Create an EquipmentNotFound error
    pub fn equipment_not_found(category: impl Into<String>, equipment: impl Into<String>) -> Self {
        CalcError::EquipmentNotFound {
            category: category.into(),
            equipment: equipment.into(),
        }
    }

    /// Create an ApplianceNotFound error
    pub fn appliance_not_found(id: impl Into<String>) -> Self {
        CalcError::ApplianceNotFound { id: id.into() }
    }

    /// Create a FileError
    pub fn file_error(operation: impl Into<String>, path: impl Into<String>, reason: impl Into<String>) -> Self {
        CalcError::FileError {
            operation: operation.into(),
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Create a SerializationError
    pub fn serialization(reason: impl Into<String>) -> Self {
        CalcError::SerializationError {
            reason: reason.into(),
        }
    }

    /// True for lookup misses, which callers usually recover from by keeping
    /// the value they already have.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            CalcError::CategoryNotFound { .. }
                | CalcError::EquipmentNotFound { .. }
                | CalcError::ApplianceNotFound { .. }
        )
    }

    /// Get a short error code for programmatic handling
    pub fn error_code(&self) -> &'static str {
        match self {
            CalcError::InvalidInput { .. } => "INVALID_INPUT",
            CalcError::CategoryNotFound { .. } => "CATEGORY_NOT_FOUND",
            CalcError::EquipmentNotFound { .. } => "EQUIPMENT_NOT_FOUND",
            CalcError::ApplianceNotFound { .. } => "APPLIANCE_NOT_FOUND",
            CalcError::FileError { .. } => "FILE_ERROR",
            CalcError::SerializationError { .. } => "SERIALIZATION_ERROR",
            CalcError::Internal { .. } => "INTERNAL_ERROR",
        }
    }
}
