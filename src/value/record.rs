//! Record Module
//!
//! Opaque caller-defined payloads. The cache only ever sees a type id and a
//! byte buffer; [`CacheRecord`] is the typed layer callers use to produce one.

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::{CacheError, ErrorCode, Result};

// == Record ==
/// A `(type_id, bytes)` pair stored verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Record {
    type_id: String,
    bytes: Vec<u8>,
}

impl Record {
    pub fn new(type_id: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            type_id: type_id.into(),
            bytes,
        }
    }

    pub fn type_id(&self) -> &str {
        &self.type_id
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }

    /// A record without a type id cannot be retrieved by type and is rejected.
    pub fn is_valid(&self) -> bool {
        !self.type_id.is_empty()
    }

    // == Typed Encoding ==
    /// Serializes a typed record.
    pub fn encode<T: CacheRecord>(record: &T) -> Result<Self> {
        let bytes = serde_json::to_vec(record).map_err(|err| {
            CacheError::new(
                ErrorCode::UnsupportedType,
                format!("Type is not supported for cache operations: {}", err),
                format!("Record: {}", T::TYPE_ID),
            )
        })?;
        Ok(Self::new(T::TYPE_ID, bytes))
    }

    /// Deserializes into `T`, checking the type id first.
    pub fn decode<T: CacheRecord>(&self) -> Result<T> {
        if self.type_id != T::TYPE_ID {
            return Err(CacheError::new(
                ErrorCode::TypeMismatch,
                format!(
                    "Record type mismatch - expected {}, got {}",
                    T::TYPE_ID,
                    self.type_id
                ),
                format!("Expected {}", T::TYPE_ID),
            ));
        }

        serde_json::from_slice(&self.bytes).map_err(|err| {
            CacheError::new(
                ErrorCode::InvalidValue,
                format!("Record payload could not be decoded: {}", err),
                format!("Record: {}", T::TYPE_ID),
            )
        })
    }
}

// == Cache Record Trait ==
/// A caller-defined structured type that can live in the cache.
///
/// ```ignore
/// #[derive(Serialize, Deserialize)]
/// struct Inventory { slots: Vec<u32> }
///
/// impl CacheRecord for Inventory {
///     const TYPE_ID: &'static str = "game.Inventory";
/// }
/// ```
pub trait CacheRecord: Serialize + DeserializeOwned {
    /// Identifies the record type; two types must never share an id.
    const TYPE_ID: &'static str;
}
