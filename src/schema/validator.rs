//! Entity file validation against the embedded JSON schemas

use std::collections::HashMap;

use thiserror::Error;

use crate::core::EntityPrefix;
use crate::schema::registry::SchemaRegistry;

#[derive(Debug, Error)]
pub enum SchemaError {
    #[error("no schema registered for entity type {0}")]
    MissingSchema(EntityPrefix),

    #[error("schema for {prefix} is not valid JSON Schema: {message}")]
    InvalidSchema { prefix: EntityPrefix, message: String },
}

/// One file's validation failure
#[derive(Debug, Error)]
#[error("{filename}: {} violation(s)", violations.len())]
pub struct ValidationReport {
    pub filename: String,
    pub violations: Vec<String>,
}

impl ValidationReport {
    pub fn violation_count(&self) -> usize {
        self.violations.len()
    }
}

/// Compiled validators, one per entity type
pub struct SchemaValidator {
    validators: HashMap<EntityPrefix, jsonschema::Validator>,
}

impl SchemaValidator {
    pub fn new(registry: &SchemaRegistry) -> Result<Self, SchemaError> {
        let mut validators = HashMap::new();
        for prefix in EntityPrefix::all() {
            let raw = registry
                .get(*prefix)
                .ok_or(SchemaError::MissingSchema(*prefix))?;
            let schema: serde_json::Value =
                serde_json::from_str(raw).map_err(|e| SchemaError::InvalidSchema {
                    prefix: *prefix,
                    message: e.to_string(),
                })?;
            let validator =
                jsonschema::validator_for(&schema).map_err(|e| SchemaError::InvalidSchema {
                    prefix: *prefix,
                    message: e.to_string(),
                })?;
            validators.insert(*prefix, validator);
        }
        Ok(Self { validators })
    }

    /// Validate one YAML document against its entity schema
    pub fn validate(
        &self,
        content: &str,
        filename: &str,
        prefix: EntityPrefix,
    ) -> Result<(), ValidationReport> {
        let instance: serde_json::Value = match serde_yml::from_str(content) {
            Ok(value) => value,
            Err(e) => {
                return Err(ValidationReport {
                    filename: filename.to_string(),
                    violations: vec![format!("not valid YAML: {}", e)],
                })
            }
        };

        // new() compiles a validator for every prefix
        let validator = &self.validators[&prefix];
        let violations: Vec<String> = validator
            .iter_errors(&instance)
            .map(|err| {
                let path = err.instance_path.to_string();
                if path.is_empty() {
                    err.to_string()
                } else {
                    format!("{}: {}", path, err)
                }
            })
            .collect();

        if violations.is_empty() {
            Ok(())
        } else {
            Err(ValidationReport {
                filename: filename.to_string(),
                violations,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::store;
    use crate::core::Project;
    use crate::entities::WorkFront;
    use tempfile::TempDir;

    fn validator() -> SchemaValidator {
        SchemaValidator::new(&SchemaRegistry::new()).unwrap()
    }

    #[test]
    fn test_stored_front_passes_its_schema() {
        let tmp = TempDir::new().unwrap();
        let project = Project::init(tmp.path()).unwrap();
        let front = WorkFront::new("Slab pour", "Main site");
        let path = store::save(&project, &front).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        validator()
            .validate(&content, "front.yaml", EntityPrefix::Front)
            .unwrap();
    }

    #[test]
    fn test_front_missing_name_fails() {
        let content = "id: FRONT-01JD2Q8GVRK4T5Y6W7X8Z9A0B1\nstatus: controlled\nsite: Main\ncreated: 2026-01-10T08:00:00Z\n";
        let err = validator()
            .validate(content, "front.yaml", EntityPrefix::Front)
            .unwrap_err();
        assert!(err.violation_count() >= 1);
    }

    #[test]
    fn test_front_with_bad_status_fails() {
        let content = "id: FRONT-01JD2Q8GVRK4T5Y6W7X8Z9A0B1\nname: Slab\nstatus: fine\nsite: Main\ncreated: 2026-01-10T08:00:00Z\n";
        let err = validator()
            .validate(content, "front.yaml", EntityPrefix::Front)
            .unwrap_err();
        assert!(err
            .violations
            .iter()
            .any(|v| v.contains("status") || v.contains("fine")));
    }

    #[test]
    fn test_unparseable_yaml_is_reported() {
        let err = validator()
            .validate("name: [", "bad.yaml", EntityPrefix::Front)
            .unwrap_err();
        assert!(err.violations[0].contains("not valid YAML"));
    }
}
