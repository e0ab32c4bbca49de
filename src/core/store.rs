//! Entity store - one YAML file per entity under the project root
//!
//! Fronts live in `fronts/`, inspection records in `inspections/`, each
//! named after its id. The store is deliberately dumb: no index, no cache;
//! collections are small enough to scan.

use std::path::PathBuf;

use thiserror::Error;

use crate::core::entity::Entity;
use crate::core::identity::EntityId;
use crate::core::project::Project;
use crate::entities::front::WorkFront;
use crate::entities::record::InspectionRecord;
use crate::yaml::{parse_yaml_file, to_yaml_string, YamlError};

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Yaml(#[from] YamlError),

    #[error("no entity found for id: {0}")]
    NotFound(EntityId),

    #[error("nothing matches '{0}'")]
    NoMatch(String),

    #[error("'{reference}' is ambiguous; it matches {}", matches.join(", "))]
    Ambiguous {
        reference: String,
        matches: Vec<String>,
    },
}

/// Path an entity is stored at
pub fn entity_path<T: Entity>(project: &Project, id: EntityId) -> PathBuf {
    project.entity_dir(T::PREFIX).join(format!("{}.yaml", id))
}

/// Write an entity, replacing any previous version
pub fn save<T: Entity>(project: &Project, entity: &T) -> Result<PathBuf, StoreError> {
    let dir = project.entity_dir(T::PREFIX);
    std::fs::create_dir_all(&dir)?;
    let path = entity_path::<T>(project, entity.id());
    let content = to_yaml_string(entity)?;
    std::fs::write(&path, content)?;
    Ok(path)
}

/// Load one entity by id
pub fn load<T: Entity>(project: &Project, id: EntityId) -> Result<T, StoreError> {
    let path = entity_path::<T>(project, id);
    if !path.exists() {
        return Err(StoreError::NotFound(id));
    }
    Ok(parse_yaml_file(&path)?)
}

/// Load every entity of a type, oldest first
pub fn load_all<T: Entity>(project: &Project) -> Result<Vec<T>, StoreError> {
    let dir = project.entity_dir(T::PREFIX);
    let mut entities: Vec<T> = Vec::new();
    if !dir.exists() {
        return Ok(entities);
    }

    let mut paths: Vec<PathBuf> = std::fs::read_dir(&dir)?
        .filter_map(|e| e.ok())
        .map(|e| e.path())
        .filter(|p| p.extension().is_some_and(|ext| ext == "yaml"))
        .collect();
    paths.sort();

    for path in paths {
        entities.push(parse_yaml_file(&path)?);
    }
    entities.sort_by_key(|e| (e.created(), e.id().to_string()));
    Ok(entities)
}

/// Delete one entity by id
pub fn delete<T: Entity>(project: &Project, id: EntityId) -> Result<(), StoreError> {
    let path = entity_path::<T>(project, id);
    if !path.exists() {
        return Err(StoreError::NotFound(id));
    }
    std::fs::remove_file(path)?;
    Ok(())
}

/// Resolve a user-supplied front reference
///
/// Accepts a full id, a unique id prefix, or a front name (case-insensitive).
pub fn resolve_front(project: &Project, reference: &str) -> Result<WorkFront, StoreError> {
    let fronts = load_all::<WorkFront>(project)?;
    resolve_by(reference, fronts, |f| f.id().to_string(), |f| Some(f.name.clone()))
}

/// Resolve a user-supplied inspection record reference (id or id prefix)
pub fn resolve_record(project: &Project, reference: &str) -> Result<InspectionRecord, StoreError> {
    let records = load_all::<InspectionRecord>(project)?;
    resolve_by(reference, records, |r| r.id().to_string(), |_| None)
}

fn resolve_by<T>(
    reference: &str,
    candidates: Vec<T>,
    id_of: impl Fn(&T) -> String,
    name_of: impl Fn(&T) -> Option<String>,
) -> Result<T, StoreError> {
    let needle = reference.trim();
    let needle_upper = needle.to_uppercase();

    // Exact id always wins
    if let Some(found) = candidates.iter().position(|c| id_of(c) == needle_upper) {
        let mut candidates = candidates;
        return Ok(candidates.swap_remove(found));
    }

    let mut matches: Vec<usize> = candidates
        .iter()
        .enumerate()
        .filter(|(_, c)| {
            id_of(c).starts_with(&needle_upper)
                || name_of(c).is_some_and(|n| n.eq_ignore_ascii_case(needle))
        })
        .map(|(idx, _)| idx)
        .collect();

    match matches.len() {
        0 => Err(StoreError::NoMatch(reference.to_string())),
        1 => {
            let mut candidates = candidates;
            Ok(candidates.swap_remove(matches.remove(0)))
        }
        _ => Err(StoreError::Ambiguous {
            reference: reference.to_string(),
            matches: matches.iter().map(|&idx| id_of(&candidates[idx])).collect(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{Catalog, RiskLevel};
    use tempfile::TempDir;

    fn project() -> (TempDir, Project) {
        let tmp = TempDir::new().unwrap();
        let project = Project::init(tmp.path()).unwrap();
        (tmp, project)
    }

    fn front(name: &str) -> WorkFront {
        WorkFront::new(name, "Main site")
    }

    #[test]
    fn test_save_and_load_round_trip() {
        let (_tmp, project) = project();
        let catalog = Catalog::embedded().unwrap().risks;
        let mut f = front("Slab pour");
        f.set_risk_level("height", RiskLevel::High, &catalog);

        save(&project, &f).unwrap();
        let loaded: WorkFront = load(&project, f.id).unwrap();
        assert_eq!(loaded.name, "Slab pour");
        assert_eq!(loaded.risks, f.risks);
    }

    #[test]
    fn test_load_all_empty() {
        let (_tmp, project) = project();
        let fronts = load_all::<WorkFront>(&project).unwrap();
        assert!(fronts.is_empty());
    }

    #[test]
    fn test_delete_removes_file() {
        let (_tmp, project) = project();
        let f = front("Slab pour");
        let path = save(&project, &f).unwrap();
        assert!(path.exists());

        delete::<WorkFront>(&project, f.id).unwrap();
        assert!(!path.exists());
        assert!(matches!(
            load::<WorkFront>(&project, f.id),
            Err(StoreError::NotFound(_))
        ));
    }

    #[test]
    fn test_resolve_front_by_name_case_insensitive() {
        let (_tmp, project) = project();
        save(&project, &front("Facade Scaffold")).unwrap();

        let resolved = resolve_front(&project, "facade scaffold").unwrap();
        assert_eq!(resolved.name, "Facade Scaffold");
    }

    #[test]
    fn test_resolve_front_by_id_prefix() {
        let (_tmp, project) = project();
        let f = front("Slab pour");
        save(&project, &f).unwrap();

        let full = f.id.to_string();
        let resolved = resolve_front(&project, &full[..12]).unwrap();
        assert_eq!(resolved.id, f.id);
    }

    #[test]
    fn test_resolve_front_no_match() {
        let (_tmp, project) = project();
        assert!(matches!(
            resolve_front(&project, "ghost"),
            Err(StoreError::NoMatch(_))
        ));
    }

    #[test]
    fn test_resolve_front_ambiguous_prefix() {
        let (_tmp, project) = project();
        save(&project, &front("A")).unwrap();
        save(&project, &front("B")).unwrap();

        assert!(matches!(
            resolve_front(&project, "FRONT-"),
            Err(StoreError::Ambiguous { .. })
        ));
    }
}
