//! `foreman catalog` command - browse the active reference data
//!
//! The ids printed here are the handles `front new --risk` and
//! `front risks --set` expect.

use clap::Subcommand;
use console::style;
use miette::Result;

use crate::catalog::{Catalog, RiskLevel};
use crate::cli::helpers::truncate_str;
use crate::core::project::Project;

#[derive(Subcommand, Debug)]
pub enum CatalogCommands {
    /// List the risk catalog
    Risks,

    /// List the question bank
    Questions,
}

pub fn run(cmd: CatalogCommands) -> Result<()> {
    // Fall back to the embedded catalog outside a project
    let catalog = match Project::discover() {
        Ok(project) => Catalog::load(&project),
        Err(_) => Catalog::embedded(),
    }
    .map_err(|e| miette::miette!("{}", e))?;

    match cmd {
        CatalogCommands::Risks => run_risks(&catalog),
        CatalogCommands::Questions => run_questions(&catalog),
    }
}

fn run_risks(catalog: &Catalog) -> Result<()> {
    let mut current_category = "";
    for risk in catalog.risks.iter() {
        if risk.category != current_category {
            current_category = &risk.category;
            println!();
            println!("{}", style(current_category).bold().underlined());
        }
        println!("  {:<14} {}", style(&risk.id).cyan(), risk.name);
        for level in [RiskLevel::High, RiskLevel::Medium] {
            let items = risk.equipment_for(level);
            if !items.is_empty() {
                println!(
                    "      {:<8} {}",
                    style(level.to_string()).dim(),
                    items.join(", ")
                );
            }
        }
    }
    println!();
    println!("{} risk(s) in catalog", style(catalog.risks.len()).cyan());
    Ok(())
}

fn run_questions(catalog: &Catalog) -> Result<()> {
    for question in catalog.questions.iter() {
        let tag = if question.epp_check {
            style("epp-check".to_string()).green()
        } else if let Some(ref risk) = question.risk {
            style(risk.clone()).cyan()
        } else {
            style("general".to_string()).dim()
        };
        println!(
            "{:<18} {:<12} {}",
            style(&question.id).bold(),
            tag,
            truncate_str(&question.prompt, 60)
        );
    }
    println!();
    println!(
        "{} question(s) in bank",
        style(catalog.questions.len()).cyan()
    );
    Ok(())
}
