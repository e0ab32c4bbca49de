//! `foreman routine` command - the guided inspection walk
//!
//! Drives a `RoutineSession` through dialoguer prompts. Nothing is written
//! until the signature is supplied at the very end; cancelling at any prompt
//! abandons the session with no side effects.

use base64::{engine::general_purpose::STANDARD, Engine as _};
use clap::Subcommand;
use console::style;
use dialoguer::{theme::ColorfulTheme, Confirm, Input, Select};
use miette::{IntoDiagnostic, Result};
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::catalog::Catalog;
use crate::cli::helpers::style_status;
use crate::core::project::Project;
use crate::core::routine::{DeviationDraft, RoutineSession};
use crate::core::store;
use crate::entities::deviation::{ActionTaken, Severity};
use crate::entities::profile::Profile;

#[derive(Subcommand, Debug)]
pub enum RoutineCommands {
    /// Start an inspection routine on a front
    Start(StartArgs),
}

#[derive(clap::Args, Debug)]
pub struct StartArgs {
    /// Front id, id prefix, or name
    pub front: String,

    /// Seed for the general-question pick (reproducible routines)
    #[arg(long)]
    pub seed: Option<u64>,
}

pub fn run(cmd: RoutineCommands) -> Result<()> {
    match cmd {
        RoutineCommands::Start(args) => run_start(args),
    }
}

fn run_start(args: StartArgs) -> Result<()> {
    let project = Project::discover().map_err(|e| miette::miette!("{}", e))?;
    let catalog = Catalog::load(&project).map_err(|e| miette::miette!("{}", e))?;
    let profile = Profile::load(&project);
    let mut front = store::resolve_front(&project, &args.front)
        .map_err(|e| miette::miette!("{}", e))?;

    if !profile.is_complete() {
        return Err(miette::miette!(
            "No supervisor profile set. Run 'foreman profile set --name \"Your Name\"' first"
        ));
    }

    let mut rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };
    let mut session = RoutineSession::begin(&front, &catalog.questions, &mut rng);

    let theme = ColorfulTheme::default();

    println!(
        "{} {} — {}",
        style("Inspecting").bold(),
        style(&front.name).cyan().bold(),
        front.site
    );
    println!("{}", style("Required equipment on this front:").bold());
    for item in &front.equipment {
        println!("  - {}", item);
    }

    while let Some(question) = session.current_question().cloned() {
        println!();
        println!(
            "{} {} of {}",
            style("Question").bold(),
            session.step() + 1,
            session.question_count()
        );
        println!("  {}", style(&question.prompt).bold());
        if let Some(ref detail) = question.detail {
            println!("  {}", style(detail).dim());
        }

        let choice = Select::with_theme(&theme)
            .with_prompt("Answer")
            .items(&["No deviation", "Report a deviation", "Cancel routine"])
            .default(0)
            .interact()
            .into_diagnostic()?;

        match choice {
            0 => {
                session.answer_ok().map_err(|e| miette::miette!("{}", e))?;
            }
            1 => {
                session
                    .flag_deviation()
                    .map_err(|e| miette::miette!("{}", e))?;
                if let Some(draft) = capture_deviation(&theme)? {
                    session
                        .confirm_deviation(draft)
                        .map_err(|e| miette::miette!("{}", e))?;
                    println!("{} Deviation recorded", style("✗").red());
                } else {
                    session
                        .cancel_capture()
                        .map_err(|e| miette::miette!("{}", e))?;
                }
            }
            _ => {
                let confirmed = Confirm::with_theme(&theme)
                    .with_prompt("Abandon the routine? Nothing will be saved.")
                    .default(false)
                    .interact()
                    .into_diagnostic()?;
                if confirmed {
                    println!("Routine abandoned; no changes were made.");
                    return Ok(());
                }
            }
        }
    }

    // All questions answered; only the signed commit remains
    println!();
    println!(
        "{} {} question(s) checked, {} deviation(s) found",
        style("Done.").green().bold(),
        session.question_count(),
        session.deviations().len()
    );

    let signature = read_image_b64(&theme, "Path to the supervisor signature image")?;
    let record = session
        .commit(&signature, &profile.name)
        .map_err(|e| miette::miette!("{}", e))?;

    store::save(&project, &record).map_err(|e| miette::miette!("{}", e))?;
    front.record_inspection(record.status_result, record.date);
    store::save(&project, &front).map_err(|e| miette::miette!("{}", e))?;

    println!();
    println!(
        "{} Inspection recorded as {}",
        style("✓").green().bold(),
        style(record.id.to_string()).cyan()
    );
    println!(
        "  Front status: {}   Compliance: {}%",
        style_status(record.status_result),
        record.compliance()
    );
    println!(
        "  Print it with: {}",
        style(format!("foreman report {}", record.id)).yellow()
    );
    Ok(())
}

/// Prompt for one deviation; `None` means the supervisor backed out
fn capture_deviation(theme: &ColorfulTheme) -> Result<Option<DeviationDraft>> {
    let description: String = Input::with_theme(theme)
        .with_prompt("Describe the deviation")
        .validate_with(|input: &String| -> std::result::Result<(), &str> {
            if input.trim().is_empty() {
                Err("a description is required")
            } else {
                Ok(())
            }
        })
        .interact_text()
        .into_diagnostic()?;

    let photo = read_image_b64(theme, "Path to the photo evidence")?;

    let severities = [Severity::Low, Severity::Medium, Severity::High];
    let severity_choice = Select::with_theme(theme)
        .with_prompt("Severity")
        .items(&["low", "medium", "high"])
        .default(1)
        .interact()
        .into_diagnostic()?;

    let actions = [
        ActionTaken::Corrected,
        ActionTaken::Stopped,
        ActionTaken::Pending,
        ActionTaken::Instructed,
    ];
    let action_choice = Select::with_theme(theme)
        .with_prompt("Action taken")
        .items(&["corrected", "stopped", "pending", "instructed"])
        .default(2)
        .interact()
        .into_diagnostic()?;

    let confirmed = Confirm::with_theme(theme)
        .with_prompt("Record this deviation?")
        .default(true)
        .interact()
        .into_diagnostic()?;
    if !confirmed {
        return Ok(None);
    }

    Ok(Some(DeviationDraft {
        description,
        photo,
        severity: Some(severities[severity_choice]),
        action_taken: Some(actions[action_choice]),
    }))
}

/// Prompt for an image path until one can be read; returns its base64
fn read_image_b64(theme: &ColorfulTheme, prompt: &str) -> Result<String> {
    loop {
        let path: String = Input::with_theme(theme)
            .with_prompt(prompt)
            .interact_text()
            .into_diagnostic()?;
        match std::fs::read(path.trim()) {
            Ok(bytes) => return Ok(STANDARD.encode(bytes)),
            Err(e) => println!("{} {}", style("✗").red(), e),
        }
    }
}
