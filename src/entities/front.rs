//! Work front entity
//!
//! A front is a supervised work area or crew. It carries its risk profile
//! and the equipment list derived from it; the cached `equipment` field is
//! recomputed on every risk edit, never lazily.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::catalog::{RiskCatalog, RiskLevel};
use crate::core::entity::Entity;
use crate::core::epp::resolve_equipment;
use crate::core::identity::{EntityId, EntityPrefix};

/// Review status of a front
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum FrontStatus {
    /// Last inspection found no deviations
    Controlled,
    /// Deviations found, none high or critical
    Observation,
    /// At least one high or critical deviation
    Attention,
    /// Freshly created, no inspection completed yet
    #[default]
    NoRecentReview,
}

impl std::fmt::Display for FrontStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FrontStatus::Controlled => write!(f, "controlled"),
            FrontStatus::Observation => write!(f, "observation"),
            FrontStatus::Attention => write!(f, "attention"),
            FrontStatus::NoRecentReview => write!(f, "no_recent_review"),
        }
    }
}

impl FromStr for FrontStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "controlled" => Ok(FrontStatus::Controlled),
            "observation" => Ok(FrontStatus::Observation),
            "attention" => Ok(FrontStatus::Attention),
            "no_recent_review" | "no-recent-review" | "unreviewed" => {
                Ok(FrontStatus::NoRecentReview)
            }
            _ => Err(format!(
                "Unknown front status: {}. Expected controlled/observation/attention/no_recent_review",
                s
            )),
        }
    }
}

/// A (risk id, level) selection on a front
///
/// Unique per risk id; `NotApplicable` levels are never stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectedRisk {
    pub risk: String,
    pub level: RiskLevel,
}

impl SelectedRisk {
    pub fn new(risk: impl Into<String>, level: RiskLevel) -> Self {
        Self {
            risk: risk.into(),
            level,
        }
    }
}

/// A supervised work area or crew
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkFront {
    pub id: EntityId,

    pub name: String,

    #[serde(default)]
    pub status: FrontStatus,

    /// When the last routine completed; rendered as relative text in lists
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_review: Option<DateTime<Utc>>,

    /// Site this front belongs to, by name
    pub site: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,

    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub supervisor: String,

    /// Risk profile; at most one entry per risk id
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub risks: Vec<SelectedRisk>,

    /// Equipment derived from `risks`; recomputed on every risk edit
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub equipment: Vec<String>,

    pub created: DateTime<Utc>,
}

impl Entity for WorkFront {
    const PREFIX: EntityPrefix = EntityPrefix::Front;

    fn id(&self) -> EntityId {
        self.id
    }

    fn created(&self) -> DateTime<Utc> {
        self.created
    }
}

impl WorkFront {
    /// Create a front with no risks selected and no review history
    pub fn new(name: impl Into<String>, site: impl Into<String>) -> Self {
        Self {
            id: EntityId::new(EntityPrefix::Front),
            name: name.into(),
            status: FrontStatus::NoRecentReview,
            last_review: None,
            site: site.into(),
            location: None,
            supervisor: String::new(),
            risks: Vec::new(),
            equipment: Vec::new(),
            created: Utc::now(),
        }
    }

    /// Replace the risk profile and recompute the equipment list
    ///
    /// Selections are normalized: `NotApplicable` entries are dropped, and a
    /// later entry for an already-present risk id replaces the earlier one.
    pub fn set_risks(&mut self, selections: Vec<SelectedRisk>, catalog: &RiskCatalog) {
        let mut normalized: Vec<SelectedRisk> = Vec::new();
        for selection in selections {
            if selection.level == RiskLevel::NotApplicable {
                normalized.retain(|s| s.risk != selection.risk);
                continue;
            }
            match normalized.iter_mut().find(|s| s.risk == selection.risk) {
                Some(existing) => existing.level = selection.level,
                None => normalized.push(selection),
            }
        }
        self.risks = normalized;
        self.equipment = resolve_equipment(&self.risks, catalog).into_iter().collect();
    }

    /// Apply a single risk change on top of the current profile
    pub fn set_risk_level(&mut self, risk: &str, level: RiskLevel, catalog: &RiskCatalog) {
        let mut selections = self.risks.clone();
        selections.push(SelectedRisk::new(risk, level));
        self.set_risks(selections, catalog);
    }

    /// Ids of the selected risks, in selection order
    pub fn risk_ids(&self) -> Vec<&str> {
        self.risks.iter().map(|s| s.risk.as_str()).collect()
    }

    /// Record the outcome of a completed routine
    pub fn record_inspection(&mut self, status: FrontStatus, at: DateTime<Utc>) {
        self.status = status;
        self.last_review = Some(at);
    }
}
