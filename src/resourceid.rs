use std::fmt::{Debug, Display};
use std::marker::PhantomData;
use std::str::FromStr;

use serde::{de::Error as _, Deserialize, Serialize};

use crate::googleads::CustomerId;

/// Marker trait tying a typed id to the platform collection it lives in.
pub trait ResourceKind {
    const COLLECTION: &'static str;
}

/// A platform-assigned numeric identifier, carried as one-or-more ASCII
/// digits on the wire. Parsing rejects anything else (empty, signed,
/// fractional, non-numeric) so malformed path fragments never reach the
/// query layer.
pub struct ResourceId<T: ResourceKind>(u64, PhantomData<T>);

impl<T: ResourceKind> ResourceId<T> {
    pub fn value(self) -> u64 {
        self.0
    }

    /// Composes the platform's hierarchical path for this resource,
    /// `customers/{cid}/{collection}/{id}`.
    pub fn resource_name(&self, customer_id: &CustomerId) -> String {
        format!("customers/{}/{}/{}", customer_id, T::COLLECTION, self.0)
    }

    /// Recovers an id from the final path segment of a resource name.
    pub fn from_resource_name(resource_name: &str) -> Option<ResourceId<T>> {
        trailing_segment(resource_name)?.parse().ok()
    }
}

/// The final path segment of a hierarchical resource name.
pub fn trailing_segment(resource_name: &str) -> Option<&str> {
    resource_name.rsplit('/').next().filter(|s| !s.is_empty())
}

impl<T: ResourceKind> Copy for ResourceId<T> {}

impl<T: ResourceKind> Clone for ResourceId<T> {
    fn clone(&self) -> ResourceId<T> {
        *self
    }
}

impl<T: ResourceKind> PartialEq for ResourceId<T> {
    fn eq(&self, other: &ResourceId<T>) -> bool {
        self.0 == other.0
    }
}

impl<T: ResourceKind> Eq for ResourceId<T> {}

impl<T: ResourceKind> From<u64> for ResourceId<T> {
    fn from(value: u64) -> ResourceId<T> {
        ResourceId(value, PhantomData)
    }
}

impl<T: ResourceKind> Display for ResourceId<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> Result<(), std::fmt::Error> {
        write!(f, "{}", self.0)
    }
}

impl<T: ResourceKind> Debug for ResourceId<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> Result<(), std::fmt::Error> {
        Display::fmt(self, f)
    }
}

impl<T: ResourceKind> FromStr for ResourceId<T> {
    type Err = ParseResourceIdError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.is_empty() {
            return Err(ParseResourceIdError::Empty);
        }
        if !s.bytes().all(|b| b.is_ascii_digit()) {
            return Err(ParseResourceIdError::NotNumeric);
        }
        let value = s.parse().map_err(|_| ParseResourceIdError::OutOfRange)?;

        Ok(ResourceId(value, PhantomData))
    }
}

impl<T: ResourceKind> Serialize for ResourceId<T> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        self.to_string().serialize(serializer)
    }
}

impl<'de, T: ResourceKind> Deserialize<'de> for ResourceId<T> {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        ResourceId::from_str(&s).map_err(|e| D::Error::custom(e))
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ParseResourceIdError {
    Empty,
    NotNumeric,
    OutOfRange,
}

impl Display for ParseResourceIdError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> Result<(), std::fmt::Error> {
        Debug::fmt(self, f)
    }
}
