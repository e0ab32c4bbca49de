//! Supervisor profile
//!
//! Kept per-project in `.foreman/profile.yaml`, with a per-user fallback in
//! the platform config directory so one identity can serve many projects.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use thiserror::Error;

use crate::core::project::Project;
use crate::yaml::{parse_yaml_file, to_yaml_string, YamlError};

#[derive(Debug, Error)]
pub enum ProfileError {
    #[error(transparent)]
    Yaml(#[from] YamlError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("no user config directory available on this platform")]
    NoUserConfigDir,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Profile {
    pub name: String,

    #[serde(skip_serializing_if = "String::is_empty")]
    pub company: String,

    #[serde(skip_serializing_if = "String::is_empty")]
    pub role: String,

    #[serde(skip_serializing_if = "String::is_empty")]
    pub phone: String,

    #[serde(skip_serializing_if = "String::is_empty")]
    pub email: String,
}

impl Profile {
    /// Load the profile: project file first, then the user-level fallback,
    /// then an empty default
    pub fn load(project: &Project) -> Self {
        let path = project.profile_path();
        if path.exists() {
            if let Ok(profile) = parse_yaml_file(&path) {
                return profile;
            }
        }
        if let Some(user_path) = Self::user_config_path() {
            if user_path.exists() {
                if let Ok(profile) = parse_yaml_file(&user_path) {
                    return profile;
                }
            }
        }
        Self::default()
    }

    pub fn save(&self, project: &Project) -> Result<(), ProfileError> {
        let content = to_yaml_string(self)?;
        std::fs::write(project.profile_path(), content)?;
        Ok(())
    }

    /// Save as the per-user fallback profile
    pub fn save_user(&self) -> Result<PathBuf, ProfileError> {
        let path = Self::user_config_path().ok_or(ProfileError::NoUserConfigDir)?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = to_yaml_string(self)?;
        std::fs::write(&path, content)?;
        Ok(path)
    }

    pub fn user_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("", "", "foreman")
            .map(|dirs| dirs.config_dir().join("profile.yaml"))
    }

    pub fn is_complete(&self) -> bool {
        !self.name.trim().is_empty()
    }
}
