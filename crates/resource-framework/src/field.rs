//! # Field Presence
//!
//! Remote payloads distinguish a key that is missing from a key that is
//! explicitly `null`. [`Field`] keeps those two apart from a present value so
//! mappers never have to guess.
//!
//! Pair it with `#[serde(default)]` on the containing struct field: serde only
//! calls the deserializer when the key exists, so a missing key falls back to
//! [`Field::Absent`]. When serializing, skip absent fields with
//! `#[serde(skip_serializing_if = "Field::is_absent")]`.
//!
//! ```rust
//! use resource_framework::Field;
//! use serde::Deserialize;
//!
//! #[derive(Deserialize)]
//! struct Wire {
//!     #[serde(default)]
//!     tags: Field<Vec<String>>,
//! }
//!
//! let missing: Wire = serde_json::from_str("{}").unwrap();
//! assert!(missing.tags.is_absent());
//!
//! let null: Wire = serde_json::from_str(r#"{"tags": null}"#).unwrap();
//! assert!(null.tags.is_null());
//!
//! let empty: Wire = serde_json::from_str(r#"{"tags": []}"#).unwrap();
//! assert_eq!(empty.tags.present(), Some(vec![]));
//! ```

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Tri-state presence of a remote attribute.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Field<T> {
    /// The key was not sent at all.
    #[default]
    Absent,
    /// The key was sent with an explicit `null`.
    Null,
    /// The key carried a value.
    Present(T),
}

impl<T> Field<T> {
    pub fn is_absent(&self) -> bool {
        matches!(self, Field::Absent)
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Field::Null)
    }

    pub fn is_present(&self) -> bool {
        matches!(self, Field::Present(_))
    }

    /// Collapses absent and null into `None`.
    pub fn present(self) -> Option<T> {
        match self {
            Field::Present(value) => Some(value),
            Field::Absent | Field::Null => None,
        }
    }

    pub fn as_ref(&self) -> Field<&T> {
        match self {
            Field::Absent => Field::Absent,
            Field::Null => Field::Null,
            Field::Present(value) => Field::Present(value),
        }
    }
}

impl<T> From<Option<T>> for Field<T> {
    fn from(value: Option<T>) -> Self {
        value.map_or(Field::Null, Field::Present)
    }
}

impl<T: Serialize> Serialize for Field<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Field::Present(value) => value.serialize(serializer),
            Field::Absent | Field::Null => serializer.serialize_none(),
        }
    }
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for Field<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Option::<T>::deserialize(deserializer).map(Field::from)
    }
}
