//! Deviation - a non-compliance finding captured during a routine

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// How serious a deviation is
///
/// The interactive capture flow only offers low/medium/high, but the type
/// and the status reducer admit `Critical` for records produced elsewhere.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Low,
    #[default]
    Medium,
    High,
    Critical,
}

impl Severity {
    /// Severities that flip a front into `Attention`
    pub fn demands_attention(&self) -> bool {
        matches!(self, Severity::High | Severity::Critical)
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::Low => write!(f, "low"),
            Severity::Medium => write!(f, "medium"),
            Severity::High => write!(f, "high"),
            Severity::Critical => write!(f, "critical"),
        }
    }
}

impl FromStr for Severity {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "low" => Ok(Severity::Low),
            "medium" | "moderate" => Ok(Severity::Medium),
            "high" => Ok(Severity::High),
            "critical" | "fatal" => Ok(Severity::Critical),
            _ => Err(format!(
                "Unknown severity: {}. Expected low/medium/high/critical",
                s
            )),
        }
    }
}

/// What the supervisor did about a deviation on the spot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ActionTaken {
    /// Fixed immediately
    Corrected,
    /// Work stopped until resolved
    Stopped,
    /// Left open for follow-up
    #[default]
    Pending,
    /// Crew instructed on the correct practice
    Instructed,
}

impl std::fmt::Display for ActionTaken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ActionTaken::Corrected => write!(f, "corrected"),
            ActionTaken::Stopped => write!(f, "stopped"),
            ActionTaken::Pending => write!(f, "pending"),
            ActionTaken::Instructed => write!(f, "instructed"),
        }
    }
}

impl FromStr for ActionTaken {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "corrected" | "fixed" => Ok(ActionTaken::Corrected),
            "stopped" | "halted" => Ok(ActionTaken::Stopped),
            "pending" | "open" => Ok(ActionTaken::Pending),
            "instructed" => Ok(ActionTaken::Instructed),
            _ => Err(format!(
                "Unknown action: {}. Expected corrected/stopped/pending/instructed",
                s
            )),
        }
    }
}

/// A recorded finding, immutable once attached to an inspection record
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Deviation {
    /// Bank id of the question that raised the finding
    pub question_id: String,

    /// Question text snapshotted at capture time, so later bank edits
    /// never rewrite history
    pub question_text: String,

    pub description: String,

    /// Base64-encoded photo evidence
    pub photo: String,

    pub recorded_at: DateTime<Utc>,

    #[serde(default)]
    pub severity: Severity,

    #[serde(default)]
    pub action_taken: ActionTaken,
}
