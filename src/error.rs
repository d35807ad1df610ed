//! Error types for the cache
//!
//! Every operation reports failure as a value: an [`ErrorCode`] callers branch
//! on, plus an informational message and context string.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

// == Error Code Enum ==
/// Outcome kinds shared with every binding layer.
///
/// The discriminants are part of the contract with external callers and must
/// not be reordered. Codes marked "host boundary" are never produced by the
/// cache itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[repr(u8)]
pub enum ErrorCode {
    /// Success
    #[default]
    None = 0,
    /// Collection or key not present
    ItemNotFound,
    /// Entry present but its TTL has elapsed
    ItemExpired,
    /// Host boundary: owning subsystem unavailable
    InvalidSubsystem,
    /// Host boundary: client handle invalid
    InvalidClient,
    /// Collection name empty or "None"
    InvalidCollection,
    /// Key empty
    InvalidKey,
    /// Value malformed (e.g. record without a type id, bad TTL)
    InvalidValue,
    /// Stored kind differs from the requested one
    TypeMismatch,
    /// Host boundary: world context missing
    WorldNotFound,
    /// Host boundary: local player missing
    LocalPlayerNotFound,
    /// Host boundary: timer facility failed
    TimerError,
    MemoryAllocationError,
    /// Value type cannot be represented in the cache
    UnsupportedType,
    UnknownError,
}

impl ErrorCode {
    /// Returns the stable member name.
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::None => "None",
            ErrorCode::ItemNotFound => "ItemNotFound",
            ErrorCode::ItemExpired => "ItemExpired",
            ErrorCode::InvalidSubsystem => "InvalidSubsystem",
            ErrorCode::InvalidClient => "InvalidClient",
            ErrorCode::InvalidCollection => "InvalidCollection",
            ErrorCode::InvalidKey => "InvalidKey",
            ErrorCode::InvalidValue => "InvalidValue",
            ErrorCode::TypeMismatch => "TypeMismatch",
            ErrorCode::WorldNotFound => "WorldNotFound",
            ErrorCode::LocalPlayerNotFound => "LocalPlayerNotFound",
            ErrorCode::TimerError => "TimerError",
            ErrorCode::MemoryAllocationError => "MemoryAllocationError",
            ErrorCode::UnsupportedType => "UnsupportedType",
            ErrorCode::UnknownError => "UnknownError",
        }
    }

    pub fn is_success(&self) -> bool {
        *self == ErrorCode::None
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// == Cache Error ==
/// A failed cache operation.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{code}: {message}")]
pub struct CacheError {
    code: ErrorCode,
    message: String,
    context: String,
}

impl CacheError {
    // == Constructor ==
    pub fn new(code: ErrorCode, message: impl Into<String>, context: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            context: context.into(),
        }
    }

    pub fn code(&self) -> ErrorCode {
        self.code
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn context(&self) -> &str {
        &self.context
    }

    /// Replaces the context string, keeping code and message.
    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context = context.into();
        self
    }

    // == Canonical Errors ==
    pub(crate) fn invalid_collection() -> Self {
        Self::new(
            ErrorCode::InvalidCollection,
            "Collection name cannot be None",
            "Valid collection name required",
        )
    }

    pub(crate) fn invalid_key(collection: &str) -> Self {
        Self::new(
            ErrorCode::InvalidKey,
            "Key cannot be empty",
            collection_context(collection),
        )
    }

    pub(crate) fn collection_not_found(collection: &str) -> Self {
        Self::new(
            ErrorCode::ItemNotFound,
            "Collection not found",
            collection_context(collection),
        )
    }

    pub(crate) fn item_not_found(collection: &str, key: &str) -> Self {
        Self::new(
            ErrorCode::ItemNotFound,
            "Item not found",
            item_context(collection, key),
        )
    }

    pub(crate) fn item_expired(collection: &str, key: &str) -> Self {
        Self::new(
            ErrorCode::ItemExpired,
            "Item has expired",
            item_context(collection, key),
        )
    }
}

// == Context Formatting ==
pub(crate) fn collection_context(collection: &str) -> String {
    format!("Collection: {}", collection)
}

pub(crate) fn item_context(collection: &str, key: &str) -> String {
    format!("Collection: {}, Key: {}", collection, key)
}

// == Outcome ==
/// The `(code, message, context)` triple handed to binding layers.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Outcome {
    pub error_code: ErrorCode,
    pub error_message: String,
    pub error_context: String,
}

impl Outcome {
    /// Creates a success outcome.
    pub fn success() -> Self {
        Self::default()
    }

    pub fn is_success(&self) -> bool {
        self.error_code.is_success()
    }

    pub fn is_error(&self) -> bool {
        !self.is_success()
    }

    /// True on a cache miss.
    pub fn is_not_found(&self) -> bool {
        self.error_code == ErrorCode::ItemNotFound
    }

    pub fn is_expired(&self) -> bool {
        self.error_code == ErrorCode::ItemExpired
    }
}

impl From<CacheError> for Outcome {
    fn from(err: CacheError) -> Self {
        Self {
            error_code: err.code,
            error_message: err.message,
            error_context: err.context,
        }
    }
}

impl<T> From<&Result<T>> for Outcome {
    fn from(result: &Result<T>) -> Self {
        match result {
            Ok(_) => Outcome::success(),
            Err(err) => err.clone().into(),
        }
    }
}

// == Result Type Alias ==
/// Convenience Result type for cache operations.
pub type Result<T> = std::result::Result<T, CacheError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_code_discriminants_are_stable() {
        assert_eq!(ErrorCode::None as u8, 0);
        assert_eq!(ErrorCode::ItemNotFound as u8, 1);
        assert_eq!(ErrorCode::InvalidCollection as u8, 5);
        assert_eq!(ErrorCode::TypeMismatch as u8, 8);
        assert_eq!(ErrorCode::TimerError as u8, 11);
        assert_eq!(ErrorCode::UnknownError as u8, 14);
    }

    #[test]
    fn test_error_display() {
        let err = CacheError::item_not_found("Players", "alice");
        assert_eq!(err.to_string(), "ItemNotFound: Item not found");
        assert_eq!(err.context(), "Collection: Players, Key: alice");
    }

    #[test]
    fn test_with_context_keeps_code() {
        let err = CacheError::new(ErrorCode::TypeMismatch, "Type mismatch", "")
            .with_context("Collection: A, Key: b");
        assert_eq!(err.code(), ErrorCode::TypeMismatch);
        assert_eq!(err.context(), "Collection: A, Key: b");
    }

    #[test]
    fn test_outcome_from_results() {
        let ok: Result<i32> = Ok(1);
        assert!(Outcome::from(&ok).is_success());

        let expired: Result<i32> = Err(CacheError::item_expired("C", "k"));
        let outcome = Outcome::from(&expired);
        assert!(outcome.is_error());
        assert!(outcome.is_expired());
        assert!(!outcome.is_not_found());
        assert_eq!(outcome.error_message, "Item has expired");
    }

    #[test]
    fn test_outcome_serializes_code_by_name() {
        let outcome = Outcome::from(CacheError::invalid_collection());
        let json = serde_json::to_value(&outcome).unwrap();
        assert_eq!(json["error_code"], "InvalidCollection");
        assert_eq!(json["error_context"], "Valid collection name required");
    }
}
