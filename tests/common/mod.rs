//! Shared test helpers for integration tests

#![allow(dead_code)]

use assert_cmd::cargo;
use assert_cmd::Command;
use chrono::{DateTime, Utc};
use tempfile::TempDir;

use foreman::core::identity::{EntityId, EntityPrefix};
use foreman::core::project::Project;
use foreman::core::store;
use foreman::entities::deviation::{ActionTaken, Deviation, Severity};
use foreman::entities::front::FrontStatus;
use foreman::entities::record::InspectionRecord;

/// Helper to get a foreman command
pub fn foreman() -> Command {
    Command::new(cargo::cargo_bin!("foreman"))
}

/// Helper to create a test project in a temp directory
pub fn setup_test_project() -> TempDir {
    let tmp = TempDir::new().unwrap();
    foreman()
        .current_dir(tmp.path())
        .arg("init")
        .assert()
        .success();
    tmp
}

/// Helper to create a front through the CLI; returns its full id
pub fn create_test_front(tmp: &TempDir, name: &str, risks: &[&str]) -> String {
    let mut cmd = foreman();
    cmd.current_dir(tmp.path())
        .args(["front", "new", "--name", name]);
    for risk in risks {
        cmd.args(["--risk", risk]);
    }
    let output = cmd.output().unwrap();
    assert!(output.status.success(), "front new failed: {:?}", output);

    let stdout = String::from_utf8_lossy(&output.stdout);
    stdout
        .split_whitespace()
        .find(|w| w.starts_with("FRONT-"))
        .map(|w| w.trim_end_matches(')').to_string())
        .unwrap_or_default()
}

/// Build a deviation for seeded records
pub fn test_deviation(severity: Severity) -> Deviation {
    Deviation {
        question_id: "gen_housekeeping".to_string(),
        question_text: "Is the area clean and free of obstacles?".to_string(),
        description: "Rebar offcuts across the walkway".to_string(),
        photo: "/9j/4AAQSkZJRg==".to_string(),
        recorded_at: Utc::now(),
        severity,
        action_taken: ActionTaken::Pending,
    }
}

/// Seed an inspection record directly through the library; returns its id
pub fn seed_record(
    tmp: &TempDir,
    front_name: &str,
    date: DateTime<Utc>,
    deviations: Vec<Deviation>,
) -> String {
    let project = Project::discover_from(tmp.path()).unwrap();
    let status = if deviations.is_empty() {
        FrontStatus::Controlled
    } else if deviations.iter().any(|d| d.severity.demands_attention()) {
        FrontStatus::Attention
    } else {
        FrontStatus::Observation
    };
    let record = InspectionRecord {
        id: EntityId::new(EntityPrefix::Insp),
        date,
        front_name: front_name.to_string(),
        site_name: "Main site".to_string(),
        supervisor_name: "R. Mendez".to_string(),
        signature: "iVBORw0KGgoAAAANSUhEUg==".to_string(),
        questions_checked: 3,
        status_result: status,
        deviations,
    };
    store::save(&project, &record).unwrap();
    record.id.to_string()
}
