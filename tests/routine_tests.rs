//! End-to-end inspection routine tests
//!
//! The interactive walk is dialoguer-driven, so these tests drive the
//! session through the library against a CLI-created project, then check
//! the persisted outcome through the CLI the way a supervisor would.

mod common;

use common::{create_test_front, foreman, setup_test_project};
use predicates::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;

use foreman::catalog::Catalog;
use foreman::core::project::Project;
use foreman::core::routine::{DeviationDraft, RoutineSession};
use foreman::core::store;
use foreman::entities::deviation::{ActionTaken, Severity};
use foreman::entities::front::{FrontStatus, WorkFront};
use foreman::entities::record::InspectionRecord;

fn committed_walk(
    tmp: &tempfile::TempDir,
    front_ref: &str,
    deviate_on_risk: Option<(&str, Severity)>,
) -> InspectionRecord {
    let project = Project::discover_from(tmp.path()).unwrap();
    let catalog = Catalog::load(&project).unwrap();
    let mut front = store::resolve_front(&project, front_ref).unwrap();

    let mut rng = StdRng::seed_from_u64(11);
    let mut session = RoutineSession::begin(&front, &catalog.questions, &mut rng);

    while let Some(question) = session.current_question().cloned() {
        let deviate = deviate_on_risk
            .as_ref()
            .is_some_and(|(risk, _)| question.risk.as_deref() == Some(*risk));
        if deviate {
            session.flag_deviation().unwrap();
            session
                .confirm_deviation(DeviationDraft {
                    description: "Panel left open and energized".to_string(),
                    photo: "/9j/4AAQSkZJRg==".to_string(),
                    severity: deviate_on_risk.map(|(_, s)| s),
                    action_taken: Some(ActionTaken::Stopped),
                })
                .unwrap();
        } else {
            session.answer_ok().unwrap();
        }
    }

    let record = session
        .commit("iVBORw0KGgoAAAANSUhEUg==", "R. Mendez")
        .unwrap();
    store::save(&project, &record).unwrap();
    front.record_inspection(record.status_result, record.date);
    store::save(&project, &front).unwrap();
    record
}

// ============================================================================
// Clean walk: electrical=high front, every question passes
// ============================================================================

#[test]
fn test_electrical_front_equipment_and_question_list() {
    let tmp = setup_test_project();
    create_test_front(&tmp, "Slab pour", &["electrical=high"]);

    let project = Project::discover_from(tmp.path()).unwrap();
    let catalog = Catalog::load(&project).unwrap();
    let front = store::resolve_front(&project, "Slab pour").unwrap();

    for item in [
        "Safety helmet",
        "Safety footwear",
        "Reflective vest",
        "Class 0 dielectric gloves",
        "Arc-flash face shield",
        "Fire-resistant clothing",
    ] {
        assert!(
            front.equipment.iter().any(|e| e == item),
            "missing {}",
            item
        );
    }

    let mut rng = StdRng::seed_from_u64(11);
    let session = RoutineSession::begin(&front, &catalog.questions, &mut rng);
    let questions = session.questions();
    assert_eq!(questions.len(), 3);
    assert!(questions[0].epp_check);
    assert_eq!(questions[1].risk.as_deref(), Some("electrical"));
    assert!(questions[2].risk.is_none() && !questions[2].epp_check);
}

#[test]
fn test_clean_walk_controls_the_front() {
    let tmp = setup_test_project();
    create_test_front(&tmp, "Slab pour", &["electrical=high"]);

    let record = committed_walk(&tmp, "Slab pour", None);
    assert!(record.deviations.is_empty());
    assert_eq!(record.status_result, FrontStatus::Controlled);
    assert_eq!(record.questions_checked, 3);
    assert_eq!(record.compliance(), 100);

    foreman()
        .current_dir(tmp.path())
        .args(["front", "show", "Slab pour"])
        .assert()
        .success()
        .stdout(predicate::str::contains("controlled"))
        .stdout(predicate::str::contains("Inspections on record: 1"));
}

// ============================================================================
// Deviating walk: one high-severity finding on the electrical question
// ============================================================================

#[test]
fn test_high_deviation_flips_front_to_attention() {
    let tmp = setup_test_project();
    create_test_front(&tmp, "Slab pour", &["electrical=high"]);

    let record = committed_walk(&tmp, "Slab pour", Some(("electrical", Severity::High)));
    assert_eq!(record.status_result, FrontStatus::Attention);
    assert_eq!(record.deviations.len(), 1);
    assert_eq!(record.deviations[0].question_id, "electrical_1");

    let project = Project::discover_from(tmp.path()).unwrap();
    let front = store::resolve_front(&project, "Slab pour").unwrap();
    assert_eq!(front.status, FrontStatus::Attention);
    assert!(front.last_review.is_some());
}

#[test]
fn test_history_gains_one_record_at_the_head() {
    let tmp = setup_test_project();
    create_test_front(&tmp, "Slab pour", &["electrical=high"]);
    common::seed_record(
        &tmp,
        "Slab pour",
        chrono::Utc::now() - chrono::Duration::days(7),
        vec![],
    );

    let record = committed_walk(&tmp, "Slab pour", Some(("electrical", Severity::High)));

    let project = Project::discover_from(tmp.path()).unwrap();
    let mut records = store::load_all::<InspectionRecord>(&project).unwrap();
    records.sort_by(|a, b| b.date.cmp(&a.date));
    assert_eq!(records.len(), 2);
    assert_eq!(records[0].id.to_string(), record.id.to_string());
}

// ============================================================================
// Second committed walk overwrites the front status, not history
// ============================================================================

#[test]
fn test_followup_clean_walk_restores_controlled() {
    let tmp = setup_test_project();
    create_test_front(&tmp, "Slab pour", &["electrical=high"]);

    committed_walk(&tmp, "Slab pour", Some(("electrical", Severity::High)));
    committed_walk(&tmp, "Slab pour", None);

    let project = Project::discover_from(tmp.path()).unwrap();
    let front = store::resolve_front(&project, "Slab pour").unwrap();
    assert_eq!(front.status, FrontStatus::Controlled);

    // Both walks remain on record
    let records = store::load_all::<InspectionRecord>(&project).unwrap();
    assert_eq!(records.len(), 2);
}

// ============================================================================
// A zero-risk front still walks a two-question routine
// ============================================================================

#[test]
fn test_zero_risk_front_routine_has_two_questions() {
    let tmp = setup_test_project();
    create_test_front(&tmp, "Laydown yard", &[]);

    let record = committed_walk(&tmp, "Laydown yard", None);
    assert_eq!(record.questions_checked, 2);
    assert_eq!(record.status_result, FrontStatus::Controlled);
}

// ============================================================================
// Walking a WorkFront that was never stored still commits cleanly
// ============================================================================

#[test]
fn test_session_is_pure_with_respect_to_storage() {
    let catalog = Catalog::embedded().unwrap();
    let front = WorkFront::new("Scratch front", "Nowhere");

    let mut rng = StdRng::seed_from_u64(3);
    let mut session = RoutineSession::begin(&front, &catalog.questions, &mut rng);
    while !session.is_finished() {
        session.answer_ok().unwrap();
    }
    let record = session.commit("c2ln", "R. Mendez").unwrap();
    assert_eq!(record.front_name, "Scratch front");
}
