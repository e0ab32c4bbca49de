//! Entity identity - prefixed ULID identifiers
//!
//! Every stored entity carries an id of the form `PREFIX-ULID`
//! (e.g. `FRONT-01JD2Q8GVRK4T5Y6W7X8Z9A0B1`). The prefix makes ids
//! self-describing in file listings and reports.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;
use ulid::Ulid;

/// Entity type prefixes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityPrefix {
    /// Work front
    Front,
    /// Inspection record
    Insp,
}

impl EntityPrefix {
    /// All known prefixes
    pub fn all() -> &'static [EntityPrefix] {
        &[EntityPrefix::Front, EntityPrefix::Insp]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            EntityPrefix::Front => "FRONT",
            EntityPrefix::Insp => "INSP",
        }
    }

    /// Storage directory for this entity type, relative to the project root
    pub fn directory(&self) -> &'static str {
        match self {
            EntityPrefix::Front => "fronts",
            EntityPrefix::Insp => "inspections",
        }
    }

    /// Infer the entity type from a stored file name (`FRONT-*.yaml` etc.)
    pub fn from_filename(name: &str) -> Option<EntityPrefix> {
        EntityPrefix::all()
            .iter()
            .copied()
            .find(|p| name.starts_with(&format!("{}-", p.as_str())))
    }
}

impl fmt::Display for EntityPrefix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EntityPrefix {
    type Err = IdParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "FRONT" => Ok(EntityPrefix::Front),
            "INSP" => Ok(EntityPrefix::Insp),
            _ => Err(IdParseError::UnknownPrefix(s.to_string())),
        }
    }
}

/// Errors from parsing entity id strings
#[derive(Debug, Error)]
pub enum IdParseError {
    #[error("unknown entity prefix: {0}")]
    UnknownPrefix(String),

    #[error("missing '-' separator in entity id: {0}")]
    MissingSeparator(String),

    #[error("invalid ULID in entity id {id}: {source}")]
    InvalidUlid {
        id: String,
        source: ulid::DecodeError,
    },
}

/// A prefixed ULID entity identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EntityId {
    prefix: EntityPrefix,
    ulid: Ulid,
}

impl EntityId {
    /// Generate a fresh id for the given entity type
    pub fn new(prefix: EntityPrefix) -> Self {
        Self {
            prefix,
            ulid: Ulid::new(),
        }
    }

    pub fn prefix(&self) -> EntityPrefix {
        self.prefix
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.prefix, self.ulid)
    }
}

impl FromStr for EntityId {
    type Err = IdParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (prefix_str, ulid_str) = s
            .split_once('-')
            .ok_or_else(|| IdParseError::MissingSeparator(s.to_string()))?;
        let prefix = prefix_str.parse()?;
        let ulid = Ulid::from_string(ulid_str).map_err(|source| IdParseError::InvalidUlid {
            id: s.to_string(),
            source,
        })?;
        Ok(Self { prefix, ulid })
    }
}

impl Serialize for EntityId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for EntityId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_id_round_trip() {
        let id = EntityId::new(EntityPrefix::Front);
        let s = id.to_string();
        assert!(s.starts_with("FRONT-"));
        let parsed: EntityId = s.parse().unwrap();
        assert_eq!(parsed, id);
    }

    #[test]
    fn test_parse_rejects_unknown_prefix() {
        let err = "WIDGET-01JD2Q8GVRK4T5Y6W7X8Z9A0B1".parse::<EntityId>();
        assert!(matches!(err, Err(IdParseError::UnknownPrefix(_))));
    }

    #[test]
    fn test_parse_rejects_missing_separator() {
        assert!(matches!(
            "FRONT01JD2Q8G".parse::<EntityId>(),
            Err(IdParseError::MissingSeparator(_))
        ));
    }

    #[test]
    fn test_parse_rejects_bad_ulid() {
        assert!(matches!(
            "FRONT-not_a_ulid".parse::<EntityId>(),
            Err(IdParseError::InvalidUlid { .. })
        ));
    }

    #[test]
    fn test_serde_as_string() {
        let id = EntityId::new(EntityPrefix::Insp);
        let yaml = serde_yml::to_string(&id).unwrap();
        assert_eq!(yaml.trim(), id.to_string());
        let back: EntityId = serde_yml::from_str(&yaml).unwrap();
        assert_eq!(back, id);
    }

    #[test]
    fn test_prefix_directories() {
        assert_eq!(EntityPrefix::Front.directory(), "fronts");
        assert_eq!(EntityPrefix::Insp.directory(), "inspections");
    }

    #[test]
    fn test_prefix_from_filename() {
        assert_eq!(
            EntityPrefix::from_filename("FRONT-01ABC.yaml"),
            Some(EntityPrefix::Front)
        );
        assert_eq!(
            EntityPrefix::from_filename("INSP-01ABC.yaml"),
            Some(EntityPrefix::Insp)
        );
        assert_eq!(EntityPrefix::from_filename("notes.yaml"), None);
    }
}
