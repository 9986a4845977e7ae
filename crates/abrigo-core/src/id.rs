//! Typed ID wrappers for domain entities.
//!
//! Entities are persisted in MongoDB, so ids wrap a BSON `ObjectId`.
//! Path parameters that fail to parse map to a 400 at the REST boundary.

use bson::oid::ObjectId;
use serde::{Deserialize, Serialize};
use std::fmt::{self, Display};

/// A strongly-typed wrapper for user IDs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(pub ObjectId);

impl UserId {
    /// Creates a new random user ID.
    #[must_use]
    pub fn new() -> Self {
        Self(ObjectId::new())
    }

    /// Creates a user ID from an ObjectId.
    #[must_use]
    pub const fn from_object_id(oid: ObjectId) -> Self {
        Self(oid)
    }

    /// Parses a user ID from its 24-character hex representation.
    pub fn parse(s: &str) -> Result<Self, bson::oid::Error> {
        Ok(Self(ObjectId::parse_str(s)?))
    }

    /// Returns the inner ObjectId.
    #[must_use]
    pub const fn into_inner(self) -> ObjectId {
        self.0
    }
}

impl Default for UserId {
    fn default() -> Self {
        Self::new()
    }
}

impl Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.to_hex())
    }
}

impl From<ObjectId> for UserId {
    fn from(oid: ObjectId) -> Self {
        Self(oid)
    }
}

impl From<UserId> for ObjectId {
    fn from(id: UserId) -> Self {
        id.0
    }
}

/// A strongly-typed wrapper for pet IDs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PetId(pub ObjectId);

impl PetId {
    /// Creates a new random pet ID.
    #[must_use]
    pub fn new() -> Self {
        Self(ObjectId::new())
    }

    /// Creates a pet ID from an ObjectId.
    #[must_use]
    pub const fn from_object_id(oid: ObjectId) -> Self {
        Self(oid)
    }

    /// Parses a pet ID from its 24-character hex representation.
    pub fn parse(s: &str) -> Result<Self, bson::oid::Error> {
        Ok(Self(ObjectId::parse_str(s)?))
    }

    /// Returns the inner ObjectId.
    #[must_use]
    pub const fn into_inner(self) -> ObjectId {
        self.0
    }
}

impl Default for PetId {
    fn default() -> Self {
        Self::new()
    }
}

impl Display for PetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.to_hex())
    }
}

impl From<ObjectId> for PetId {
    fn from(oid: ObjectId) -> Self {
        Self(oid)
    }
}

impl From<PetId> for ObjectId {
    fn from(id: PetId) -> Self {
        id.0
    }
}
