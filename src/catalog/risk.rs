//! Risk catalog types
//!
//! A risk definition describes one hazard type: what each exposure level
//! means on a front, and which protective equipment that level demands
//! beyond the baseline. The per-level equipment map is partial; a level
//! with no entry contributes nothing.

use std::collections::BTreeMap;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Exposure level assigned to a risk on a work front
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default,
)]
#[serde(rename_all = "snake_case")]
pub enum RiskLevel {
    High,
    Medium,
    Low,
    /// Excluded from a front's stored selections; selecting it clears the risk
    #[default]
    NotApplicable,
}

impl std::fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RiskLevel::High => write!(f, "high"),
            RiskLevel::Medium => write!(f, "medium"),
            RiskLevel::Low => write!(f, "low"),
            RiskLevel::NotApplicable => write!(f, "not_applicable"),
        }
    }
}

impl FromStr for RiskLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "high" | "h" => Ok(RiskLevel::High),
            "medium" | "med" | "m" => Ok(RiskLevel::Medium),
            "low" | "l" => Ok(RiskLevel::Low),
            "not_applicable" | "na" | "n/a" | "none" => Ok(RiskLevel::NotApplicable),
            _ => Err(format!(
                "Unknown risk level: {}. Expected high/medium/low/na",
                s
            )),
        }
    }
}

/// One hazard type in the catalog
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RiskDefinition {
    /// Stable identifier referenced by fronts and questions
    pub id: String,

    /// Display name
    pub name: String,

    /// Grouping shown when browsing the catalog
    pub category: String,

    /// What each level means for this hazard
    pub levels: BTreeMap<RiskLevel, String>,

    /// Equipment required per level, beyond the baseline (partial)
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub equipment: BTreeMap<RiskLevel, Vec<String>>,
}

impl RiskDefinition {
    /// Description of a level, if the catalog defines one
    pub fn level_description(&self, level: RiskLevel) -> Option<&str> {
        self.levels.get(&level).map(String::as_str)
    }

    /// Equipment demanded by a level; absent entries are an empty contribution
    pub fn equipment_for(&self, level: RiskLevel) -> &[String] {
        self.equipment.get(&level).map(Vec::as_slice).unwrap_or(&[])
    }
}

/// The ordered set of risk definitions
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RiskCatalog {
    pub risks: Vec<RiskDefinition>,
}

impl RiskCatalog {
    pub fn get(&self, id: &str) -> Option<&RiskDefinition> {
        self.risks.iter().find(|r| r.id == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &RiskDefinition> {
        self.risks.iter()
    }

    pub fn len(&self) -> usize {
        self.risks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.risks.is_empty()
    }
}
