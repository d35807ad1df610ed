//! Name Module
//!
//! Interned-style identifier used for collection names and the Name value kind.

use std::borrow::Borrow;
use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

// == Name ==
/// Cheap-to-clone symbolic name.
///
/// An empty name and the literal "None" (any ASCII case) are the "none" name,
/// which is never a valid collection.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct Name(Arc<str>);

impl Name {
    pub fn new(name: &str) -> Self {
        Self(Arc::from(name))
    }

    /// The canonical none name.
    pub fn none() -> Self {
        Self::new("")
    }

    pub fn is_none(&self) -> bool {
        is_none_name(&self.0)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// True for the empty string and "None".
pub fn is_none_name(name: &str) -> bool {
    name.is_empty() || name.eq_ignore_ascii_case("none")
}

impl Default for Name {
    fn default() -> Self {
        Self::none()
    }
}

impl From<&str> for Name {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl From<String> for Name {
    fn from(name: String) -> Self {
        Self(Arc::from(name))
    }
}

impl From<Name> for String {
    fn from(name: Name) -> Self {
        name.0.to_string()
    }
}

impl AsRef<str> for Name {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for Name {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Name {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
