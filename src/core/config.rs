//! Project configuration - site list and active-site selection

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::core::project::Project;
use crate::yaml::{parse_yaml_file, to_yaml_string, YamlError};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error(transparent)]
    Yaml(#[from] YamlError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("unknown site: {0}")]
    UnknownSite(String),

    #[error("site already exists: {0}")]
    DuplicateSite(String),

    #[error("cannot remove the last remaining site")]
    LastSite,
}

/// Project configuration persisted in `.foreman/config.yaml`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Registered sites; fronts belong to a site by name
    pub sites: Vec<String>,

    /// Index into `sites` used as the default for new fronts
    pub active_site: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            sites: vec!["Main site".to_string()],
            active_site: 0,
        }
    }
}

impl Config {
    /// Load the project config, falling back to defaults when absent
    pub fn load(project: &Project) -> Result<Self, ConfigError> {
        let path = project.config_path();
        if !path.exists() {
            return Ok(Self::default());
        }
        Ok(parse_yaml_file(&path)?)
    }

    pub fn save(&self, project: &Project) -> Result<(), ConfigError> {
        let content = to_yaml_string(self)?;
        std::fs::write(project.config_path(), content)?;
        Ok(())
    }

    /// Name of the currently active site
    pub fn active_site_name(&self) -> &str {
        self.sites
            .get(self.active_site)
            .or_else(|| self.sites.first())
            .map(String::as_str)
            .unwrap_or("Main site")
    }

    pub fn site_index(&self, name: &str) -> Option<usize> {
        self.sites.iter().position(|s| s == name)
    }

    pub fn add_site(&mut self, name: &str) -> Result<(), ConfigError> {
        if self.site_index(name).is_some() {
            return Err(ConfigError::DuplicateSite(name.to_string()));
        }
        self.sites.push(name.to_string());
        Ok(())
    }

    /// Rename a site; returns the old index so callers can cascade the
    /// rename into stored fronts
    pub fn rename_site(&mut self, from: &str, to: &str) -> Result<usize, ConfigError> {
        if self.site_index(to).is_some() {
            return Err(ConfigError::DuplicateSite(to.to_string()));
        }
        let idx = self
            .site_index(from)
            .ok_or_else(|| ConfigError::UnknownSite(from.to_string()))?;
        self.sites[idx] = to.to_string();
        Ok(idx)
    }

    /// Remove a site; callers are responsible for deleting its fronts
    pub fn remove_site(&mut self, name: &str) -> Result<(), ConfigError> {
        let idx = self
            .site_index(name)
            .ok_or_else(|| ConfigError::UnknownSite(name.to_string()))?;
        if self.sites.len() == 1 {
            return Err(ConfigError::LastSite);
        }
        self.sites.remove(idx);
        if self.active_site >= self.sites.len() {
            self.active_site = 0;
        }
        Ok(())
    }

    pub fn set_active_site(&mut self, name: &str) -> Result<(), ConfigError> {
        let idx = self
            .site_index(name)
            .ok_or_else(|| ConfigError::UnknownSite(name.to_string()))?;
        self.active_site = idx;
        Ok(())
    }
}
