//! Status reduction - fold captured deviations into a front status

use crate::entities::deviation::Deviation;
use crate::entities::front::FrontStatus;

/// Reduce a routine's deviations to the resulting front status
///
/// Total over the severity enum; `NoRecentReview` is never produced here,
/// it only exists as the initial state of a front with no history.
pub fn compute_status(deviations: &[Deviation]) -> FrontStatus {
    if deviations.is_empty() {
        return FrontStatus::Controlled;
    }
    if deviations.iter().any(|d| d.severity.demands_attention()) {
        FrontStatus::Attention
    } else {
        FrontStatus::Observation
    }
}

/// Share of checked questions that passed, as a whole percentage
///
/// A zero question count reads as fully compliant rather than dividing by
/// zero; routines always carry at least two questions, so this only guards
/// hand-edited records.
pub fn compliance_percent(questions_checked: u32, deviation_count: u32) -> u8 {
    if questions_checked == 0 {
        return 100;
    }
    let passed = questions_checked.saturating_sub(deviation_count);
    ((passed as f64 / questions_checked as f64) * 100.0).round() as u8
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::deviation::{ActionTaken, Severity};
    use chrono::Utc;

    fn deviation(severity: Severity) -> Deviation {
        Deviation {
            question_id: "q".to_string(),
            question_text: "Q?".to_string(),
            description: "finding".to_string(),
            photo: "cGhvdG8=".to_string(),
            recorded_at: Utc::now(),
            severity,
            action_taken: ActionTaken::Pending,
        }
    }

    #[test]
    fn test_no_deviations_is_controlled() {
        assert_eq!(compute_status(&[]), FrontStatus::Controlled);
    }

    #[test]
    fn test_low_only_is_observation() {
        assert_eq!(
            compute_status(&[deviation(Severity::Low)]),
            FrontStatus::Observation
        );
    }

    #[test]
    fn test_medium_only_is_observation() {
        assert_eq!(
            compute_status(&[deviation(Severity::Medium)]),
            FrontStatus::Observation
        );
    }

    #[test]
    fn test_high_is_attention() {
        assert_eq!(
            compute_status(&[deviation(Severity::High)]),
            FrontStatus::Attention
        );
    }

    #[test]
    fn test_critical_is_attention() {
        assert_eq!(
            compute_status(&[deviation(Severity::Critical)]),
            FrontStatus::Attention
        );
    }

    #[test]
    fn test_medium_plus_critical_is_attention() {
        assert_eq!(
            compute_status(&[deviation(Severity::Medium), deviation(Severity::Critical)]),
            FrontStatus::Attention
        );
    }

    #[test]
    fn test_low_plus_medium_stays_observation() {
        assert_eq!(
            compute_status(&[deviation(Severity::Low), deviation(Severity::Medium)]),
            FrontStatus::Observation
        );
    }

    #[test]
    fn test_compliance_zero_questions_guarded() {
        assert_eq!(compliance_percent(0, 0), 100);
        assert_eq!(compliance_percent(0, 3), 100);
    }

    #[test]
    fn test_compliance_rounding() {
        assert_eq!(compliance_percent(3, 1), 67);
        assert_eq!(compliance_percent(4, 1), 75);
        assert_eq!(compliance_percent(2, 0), 100);
    }

    #[test]
    fn test_compliance_saturates_on_excess_deviations() {
        assert_eq!(compliance_percent(2, 5), 0);
    }
}
