//! Inspection record - the persisted outcome of one completed routine
//!
//! Records are append-only history. They reference the front by name only,
//! so deleting a front never orphans or rewrites its past records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::core::entity::Entity;
use crate::core::identity::{EntityId, EntityPrefix};
use crate::core::status::compliance_percent;
use crate::entities::deviation::Deviation;
use crate::entities::front::FrontStatus;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InspectionRecord {
    pub id: EntityId,

    /// When the routine was committed
    pub date: DateTime<Utc>,

    pub front_name: String,

    pub site_name: String,

    pub supervisor_name: String,

    /// Base64-encoded supervisor signature; always non-empty
    pub signature: String,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub deviations: Vec<Deviation>,

    /// How many questions the routine walked
    pub questions_checked: u32,

    /// Status the routine reduced to; never `NoRecentReview`
    pub status_result: FrontStatus,
}

impl Entity for InspectionRecord {
    const PREFIX: EntityPrefix = EntityPrefix::Insp;

    fn id(&self) -> EntityId {
        self.id
    }

    fn created(&self) -> DateTime<Utc> {
        self.date
    }
}

impl InspectionRecord {
    /// Share of checked questions that passed without a deviation
    pub fn compliance(&self) -> u8 {
        compliance_percent(self.questions_checked, self.deviations.len() as u32)
    }
}
