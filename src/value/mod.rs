//! Value Module
//!
//! The uniform value representation stored in every cache entry: a closed set
//! of native kinds plus an opaque record escape hatch.

mod math;
mod name;
mod record;

use std::fmt;

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::error::{CacheError, ErrorCode, Result};

pub use math::{
    ApproxEq, Color, LinearColor, Quat, Rotator, Transform, Vector2, Vector3, Vector4,
    KINDA_SMALL_NUMBER,
};
pub use name::{is_none_name, Name};
pub use record::{CacheRecord, Record};

/// Signed time-duration kind.
pub type Timespan = chrono::Duration;

// == Value Kind ==
/// Discriminant of a [`TypedValue`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueKind {
    Int8,
    Byte,
    Int32,
    Int64,
    Float,
    Double,
    Bool,
    String,
    Name,
    Vector,
    Vector2D,
    Vector4,
    Rotator,
    Transform,
    Color,
    LinearColor,
    Quat,
    Timespan,
    DateTime,
    Guid,
    Record,
}

impl ValueKind {
    /// Human-readable type name for messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            ValueKind::Int8 => "int8",
            ValueKind::Byte => "uint8",
            ValueKind::Int32 => "int32",
            ValueKind::Int64 => "int64",
            ValueKind::Float => "float",
            ValueKind::Double => "double",
            ValueKind::Bool => "bool",
            ValueKind::String => "String",
            ValueKind::Name => "Name",
            ValueKind::Vector => "Vector",
            ValueKind::Vector2D => "Vector2D",
            ValueKind::Vector4 => "Vector4",
            ValueKind::Rotator => "Rotator",
            ValueKind::Transform => "Transform",
            ValueKind::Color => "Color",
            ValueKind::LinearColor => "LinearColor",
            ValueKind::Quat => "Quat",
            ValueKind::Timespan => "Timespan",
            ValueKind::DateTime => "DateTime",
            ValueKind::Guid => "Guid",
            ValueKind::Record => "Record",
        }
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.type_name())
    }
}

// == Typed Value ==
/// A cached value. The variant is fixed at construction.
#[derive(Debug, Clone, PartialEq)]
pub enum TypedValue {
    Int8(i8),
    Byte(u8),
    Int32(i32),
    Int64(i64),
    Float(f32),
    Double(f64),
    Bool(bool),
    String(String),
    Name(Name),
    Vector(Vector3),
    Vector2D(Vector2),
    Vector4(Vector4),
    Rotator(Rotator),
    Transform(Transform),
    Color(Color),
    LinearColor(LinearColor),
    Quat(Quat),
    Timespan(Timespan),
    DateTime(DateTime<Utc>),
    Guid(Uuid),
    Record(Record),
}

impl TypedValue {
    pub fn from_record(type_id: impl Into<String>, bytes: Vec<u8>) -> Self {
        TypedValue::Record(Record::new(type_id, bytes))
    }

    pub fn kind(&self) -> ValueKind {
        match self {
            TypedValue::Int8(_) => ValueKind::Int8,
            TypedValue::Byte(_) => ValueKind::Byte,
            TypedValue::Int32(_) => ValueKind::Int32,
            TypedValue::Int64(_) => ValueKind::Int64,
            TypedValue::Float(_) => ValueKind::Float,
            TypedValue::Double(_) => ValueKind::Double,
            TypedValue::Bool(_) => ValueKind::Bool,
            TypedValue::String(_) => ValueKind::String,
            TypedValue::Name(_) => ValueKind::Name,
            TypedValue::Vector(_) => ValueKind::Vector,
            TypedValue::Vector2D(_) => ValueKind::Vector2D,
            TypedValue::Vector4(_) => ValueKind::Vector4,
            TypedValue::Rotator(_) => ValueKind::Rotator,
            TypedValue::Transform(_) => ValueKind::Transform,
            TypedValue::Color(_) => ValueKind::Color,
            TypedValue::LinearColor(_) => ValueKind::LinearColor,
            TypedValue::Quat(_) => ValueKind::Quat,
            TypedValue::Timespan(_) => ValueKind::Timespan,
            TypedValue::DateTime(_) => ValueKind::DateTime,
            TypedValue::Guid(_) => ValueKind::Guid,
            TypedValue::Record(_) => ValueKind::Record,
        }
    }

    pub fn is<T: CacheValue>(&self) -> bool {
        self.kind() == T::KIND
    }

    /// Only records can be malformed (missing type id).
    pub fn is_valid(&self) -> bool {
        match self {
            TypedValue::Record(record) => record.is_valid(),
            _ => true,
        }
    }

    // == Typed Access ==
    /// Consumes the value as `T`, or fails with `TypeMismatch`.
    pub fn into_type<T: CacheValue>(self) -> Result<T> {
        let actual = self.kind();
        T::from_typed(self).ok_or_else(|| type_mismatch(T::KIND.type_name(), actual.type_name()))
    }

    /// Copies the value out as `T`.
    pub fn as_type<T: CacheValue>(&self) -> Result<T> {
        if !self.is::<T>() {
            return Err(type_mismatch(
                T::KIND.type_name(),
                self.kind().type_name(),
            ));
        }
        self.clone().into_type()
    }

    /// Consumes the value as a record of the given type id.
    pub fn into_record(self, type_id: &str) -> Result<Record> {
        match self {
            TypedValue::Record(record) if record.type_id() == type_id => Ok(record),
            TypedValue::Record(record) => Err(type_mismatch(type_id, record.type_id())),
            other => Err(type_mismatch(type_id, other.kind().type_name())),
        }
    }
}

fn type_mismatch(expected: &str, actual: &str) -> CacheError {
    CacheError::new(
        ErrorCode::TypeMismatch,
        format!("Type mismatch - expected {}, got {}", expected, actual),
        "",
    )
}

// == Cache Value Trait ==
/// Rust types with a native [`ValueKind`].
pub trait CacheValue: Sized {
    const KIND: ValueKind;

    fn into_typed(self) -> TypedValue;

    /// Returns `None` when `value` holds a different kind.
    fn from_typed(value: TypedValue) -> Option<Self>;
}

macro_rules! native_values {
    ($($ty:ty => $variant:ident),* $(,)?) => {
        $(
            impl CacheValue for $ty {
                const KIND: ValueKind = ValueKind::$variant;

                fn into_typed(self) -> TypedValue {
                    TypedValue::$variant(self)
                }

                fn from_typed(value: TypedValue) -> Option<Self> {
                    match value {
                        TypedValue::$variant(inner) => Some(inner),
                        _ => None,
                    }
                }
            }

            impl From<$ty> for TypedValue {
                fn from(value: $ty) -> Self {
                    TypedValue::$variant(value)
                }
            }
        )*
    };
}

native_values! {
    i8 => Int8,
    u8 => Byte,
    i32 => Int32,
    i64 => Int64,
    f32 => Float,
    f64 => Double,
    bool => Bool,
    String => String,
    Name => Name,
    Vector3 => Vector,
    Vector2 => Vector2D,
    Vector4 => Vector4,
    Rotator => Rotator,
    Transform => Transform,
    Color => Color,
    LinearColor => LinearColor,
    Quat => Quat,
    Timespan => Timespan,
    DateTime<Utc> => DateTime,
    Uuid => Guid,
    Record => Record,
}

impl From<&str> for TypedValue {
    fn from(value: &str) -> Self {
        TypedValue::String(value.to_string())
    }
}
