//! Entity trait - common interface for stored entity types

use chrono::{DateTime, Utc};
use serde::{de::DeserializeOwned, Serialize};

use crate::core::identity::{EntityId, EntityPrefix};

/// Common trait for entities persisted as one YAML file each
pub trait Entity: Serialize + DeserializeOwned + 'static {
    /// The entity type prefix (determines id format and storage directory)
    const PREFIX: EntityPrefix;

    /// Get the entity's unique ID
    fn id(&self) -> EntityId;

    /// Get the creation timestamp
    fn created(&self) -> DateTime<Utc>;
}
