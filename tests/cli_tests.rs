//! CLI surface, catalog browsing and validation tests

mod common;

use common::{create_test_front, foreman, setup_test_project};
use predicates::prelude::*;
use std::fs;

// ============================================================================
// CLI basics
// ============================================================================

#[test]
fn test_help_displays() {
    foreman()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("safety inspections"));
}

#[test]
fn test_version_displays() {
    foreman()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("foreman"));
}

#[test]
fn test_unknown_command_fails() {
    foreman()
        .arg("unknown-command")
        .assert()
        .failure()
        .stderr(predicate::str::contains("error"));
}

#[test]
fn test_commands_outside_project_fail() {
    let tmp = tempfile::TempDir::new().unwrap();

    foreman()
        .current_dir(tmp.path())
        .args(["front", "list"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("foreman init"));
}

#[test]
fn test_completions_bash() {
    foreman()
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("foreman"));
}

// ============================================================================
// Catalog browsing
// ============================================================================

#[test]
fn test_catalog_risks_lists_ids_and_equipment() {
    foreman()
        .args(["catalog", "risks"])
        .assert()
        .success()
        .stdout(predicate::str::contains("electrical"))
        .stdout(predicate::str::contains("Hazardous energies"))
        .stdout(predicate::str::contains("Class 0 dielectric gloves"))
        .stdout(predicate::str::contains("risk(s) in catalog"));
}

#[test]
fn test_catalog_questions_marks_epp_check() {
    foreman()
        .args(["catalog", "questions"])
        .assert()
        .success()
        .stdout(predicate::str::contains("epp_check"))
        .stdout(predicate::str::contains("epp-check"))
        .stdout(predicate::str::contains("gen_housekeeping"))
        .stdout(predicate::str::contains("question(s) in bank"));
}

#[test]
fn test_catalog_project_override_wins() {
    let tmp = setup_test_project();
    let override_path = tmp.path().join(".foreman/catalog/risks.yaml");
    fs::create_dir_all(override_path.parent().unwrap()).unwrap();
    fs::write(
        &override_path,
        "risks:\n  - id: radiation\n    name: Ionizing radiation\n    category: Special hazards\n    levels:\n      high: Industrial radiography on site.\n      medium: Sealed gauges in use.\n      low: None expected.\n      not_applicable: Not applicable.\n    equipment:\n      high:\n        - Dosimeter badge\n",
    )
    .unwrap();

    foreman()
        .current_dir(tmp.path())
        .args(["catalog", "risks"])
        .assert()
        .success()
        .stdout(predicate::str::contains("radiation"))
        .stdout(predicate::str::contains("Dosimeter badge"))
        .stdout(predicate::str::contains("electrical").not());
}

// ============================================================================
// Validation
// ============================================================================

#[test]
fn test_validate_fresh_project_passes() {
    let tmp = setup_test_project();
    create_test_front(&tmp, "Slab pour", &["electrical=high"]);
    common::seed_record(&tmp, "Slab pour", chrono::Utc::now(), vec![]);

    foreman()
        .current_dir(tmp.path())
        .arg("validate")
        .assert()
        .success()
        .stdout(predicate::str::contains("All files passed validation"));
}

#[test]
fn test_validate_rejects_bad_front_file() {
    let tmp = setup_test_project();
    fs::write(
        tmp.path().join("fronts/FRONT-01JD2Q8GVRK4T5Y6W7X8Z9A0B1.yaml"),
        "id: FRONT-01JD2Q8GVRK4T5Y6W7X8Z9A0B1\nname: Slab pour\nstatus: fine\nsite: Main site\ncreated: 2026-01-10T08:00:00Z\n",
    )
    .unwrap();

    foreman()
        .current_dir(tmp.path())
        .arg("validate")
        .assert()
        .failure()
        .stdout(predicate::str::contains("violation(s)"))
        .stderr(predicate::str::contains("Validation failed"));
}

#[test]
fn test_validate_summary_hides_violations() {
    let tmp = setup_test_project();
    fs::write(
        tmp.path().join("fronts/FRONT-01JD2Q8GVRK4T5Y6W7X8Z9A0B1.yaml"),
        "id: FRONT-01JD2Q8GVRK4T5Y6W7X8Z9A0B1\nstatus: controlled\n",
    )
    .unwrap();

    foreman()
        .current_dir(tmp.path())
        .args(["validate", "--summary"])
        .assert()
        .failure()
        .stdout(predicate::str::contains("Validation Summary"))
        .stdout(predicate::str::contains("required").not());
}

#[test]
fn test_validate_keep_going_checks_every_file() {
    let tmp = setup_test_project();
    create_test_front(&tmp, "Slab pour", &[]);
    fs::write(
        tmp.path().join("fronts/FRONT-01JD2Q8GVRK4T5Y6W7X8Z9A0B1.yaml"),
        "id: FRONT-01JD2Q8GVRK4T5Y6W7X8Z9A0B1\nstatus: controlled\n",
    )
    .unwrap();
    fs::write(
        tmp.path().join("fronts/FRONT-01JD2Q8GVRK4T5Y6W7X8Z9A0B2.yaml"),
        "id: FRONT-01JD2Q8GVRK4T5Y6W7X8Z9A0B2\nstatus: attention\n",
    )
    .unwrap();

    let output = foreman()
        .current_dir(tmp.path())
        .args(["validate", "--keep-going"])
        .output()
        .unwrap();
    assert!(!output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Files checked:  3"));
    assert!(stdout.contains("Files failed:   2"));
}

#[test]
fn test_validate_explicit_path() {
    let tmp = setup_test_project();
    create_test_front(&tmp, "Slab pour", &[]);

    foreman()
        .current_dir(tmp.path())
        .args(["validate", "fronts"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Files checked:  1"));
}

#[test]
fn test_validate_skips_unknown_file_names() {
    let tmp = setup_test_project();
    fs::write(tmp.path().join("fronts/notes.yaml"), "scratch: true\n").unwrap();

    foreman()
        .current_dir(tmp.path())
        .arg("validate")
        .assert()
        .success()
        .stdout(predicate::str::contains("unknown entity type (skipped)"))
        .stdout(predicate::str::contains("Files checked:  0"));
}
