//! Protective-equipment resolver
//!
//! Derives the equipment a front must stock from its risk profile. The
//! baseline set applies to every front regardless of risks; each selection
//! unions in whatever its catalog entry demands at the selected level.
//! Unknown risk ids and levels with no catalog entry contribute nothing,
//! so catalog edits never invalidate existing fronts.

use std::collections::BTreeSet;

use crate::catalog::RiskCatalog;
use crate::entities::front::SelectedRisk;

/// Equipment every front requires, independent of its risk profile
pub const BASELINE_EQUIPMENT: [&str; 3] = ["Safety helmet", "Safety footwear", "Reflective vest"];

/// Resolve the full equipment set for a risk profile
///
/// Pure and order-independent; duplicates across risks collapse.
pub fn resolve_equipment(selections: &[SelectedRisk], catalog: &RiskCatalog) -> BTreeSet<String> {
    let mut items: BTreeSet<String> = BASELINE_EQUIPMENT.iter().map(|s| s.to_string()).collect();
    for selection in selections {
        if let Some(definition) = catalog.get(&selection.risk) {
            items.extend(definition.equipment_for(selection.level).iter().cloned());
        }
    }
    items
}
