//! Project discovery and layout
//!
//! A foreman project is any directory containing a `.foreman/` marker.
//! Fronts and inspection records live in per-type directories next to it:
//!
//! ```text
//! <root>/
//!   .foreman/
//!     config.yaml       sites and active-site selection
//!     profile.yaml      supervisor identity (optional)
//!     catalog/          optional project-local catalog override
//!   fronts/FRONT-*.yaml
//!   inspections/INSP-*.yaml
//! ```

use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::core::identity::EntityPrefix;

/// Marker directory that identifies a project root
pub const MARKER: &str = ".foreman";

#[derive(Debug, Error)]
pub enum ProjectError {
    #[error("not inside a foreman project (no {MARKER} directory found). Run 'foreman init' first")]
    NotFound,

    #[error("already a foreman project: {0}")]
    AlreadyInitialized(PathBuf),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Handle to a discovered project root
#[derive(Debug, Clone)]
pub struct Project {
    root: PathBuf,
}

impl Project {
    /// Discover the project by walking up from the current directory
    pub fn discover() -> Result<Self, ProjectError> {
        let cwd = std::env::current_dir()?;
        Self::discover_from(&cwd)
    }

    /// Discover the project by walking up from the given directory
    pub fn discover_from(start: &Path) -> Result<Self, ProjectError> {
        let mut dir = start;
        loop {
            if dir.join(MARKER).is_dir() {
                return Ok(Self {
                    root: dir.to_path_buf(),
                });
            }
            match dir.parent() {
                Some(parent) => dir = parent,
                None => return Err(ProjectError::NotFound),
            }
        }
    }

    /// Create the project skeleton in `root`
    pub fn init(root: &Path) -> Result<Self, ProjectError> {
        let marker = root.join(MARKER);
        if marker.is_dir() {
            return Err(ProjectError::AlreadyInitialized(root.to_path_buf()));
        }
        std::fs::create_dir_all(&marker)?;
        for prefix in EntityPrefix::all() {
            std::fs::create_dir_all(root.join(prefix.directory()))?;
        }
        Ok(Self {
            root: root.to_path_buf(),
        })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn marker_dir(&self) -> PathBuf {
        self.root.join(MARKER)
    }

    pub fn config_path(&self) -> PathBuf {
        self.marker_dir().join("config.yaml")
    }

    pub fn profile_path(&self) -> PathBuf {
        self.marker_dir().join("profile.yaml")
    }

    /// Project-local catalog override directory
    pub fn catalog_dir(&self) -> PathBuf {
        self.marker_dir().join("catalog")
    }

    /// Storage directory for an entity type
    pub fn entity_dir(&self, prefix: EntityPrefix) -> PathBuf {
        self.root.join(prefix.directory())
    }
}
