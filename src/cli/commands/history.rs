//! `foreman history` command - browse and export inspection records
//!
//! History is append-only: records can be listed, shown, exported and
//! deleted, never edited.

use clap::Subcommand;
use console::style;
use dialoguer::{theme::ColorfulTheme, Confirm};
use miette::{IntoDiagnostic, Result};
use std::path::PathBuf;
use tabled::settings::Style;
use tabled::{Table, Tabled};

use crate::cli::helpers::format_short_id;
use crate::core::project::Project;
use crate::core::store;
use crate::entities::record::InspectionRecord;

#[derive(Subcommand, Debug)]
pub enum HistoryCommands {
    /// List inspection records, newest first
    List(ListArgs),

    /// Show one record in full
    Show(ShowArgs),

    /// Delete a record permanently
    Delete(DeleteArgs),

    /// Export history as CSV
    Export(ExportArgs),
}

#[derive(clap::Args, Debug)]
pub struct ListArgs {
    /// Only records for this front name
    #[arg(long)]
    pub front: Option<String>,

    /// Limit to the most recent N records
    #[arg(long, short = 'n')]
    pub limit: Option<usize>,
}

#[derive(clap::Args, Debug)]
pub struct ShowArgs {
    /// Record id or id prefix
    pub record: String,
}

#[derive(clap::Args, Debug)]
pub struct DeleteArgs {
    /// Record id or id prefix
    pub record: String,

    /// Skip the confirmation prompt
    #[arg(long, short = 'y')]
    pub yes: bool,
}

#[derive(clap::Args, Debug)]
pub struct ExportArgs {
    /// Only records for this front name
    #[arg(long)]
    pub front: Option<String>,

    /// Write to this file instead of stdout
    #[arg(long, short = 'o')]
    pub output: Option<PathBuf>,
}

#[derive(Tabled)]
struct HistoryRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "DATE")]
    date: String,
    #[tabled(rename = "FRONT")]
    front: String,
    #[tabled(rename = "STATUS")]
    status: String,
    #[tabled(rename = "DEVIATIONS")]
    deviations: usize,
    #[tabled(rename = "COMPLIANCE")]
    compliance: String,
}

pub fn run(cmd: HistoryCommands) -> Result<()> {
    match cmd {
        HistoryCommands::List(args) => run_list(args),
        HistoryCommands::Show(args) => run_show(args),
        HistoryCommands::Delete(args) => run_delete(args),
        HistoryCommands::Export(args) => run_export(args),
    }
}

/// Load records newest first, optionally filtered by front name
fn load_history(project: &Project, front: Option<&str>) -> Result<Vec<InspectionRecord>> {
    let mut records =
        store::load_all::<InspectionRecord>(project).map_err(|e| miette::miette!("{}", e))?;
    if let Some(front) = front {
        records.retain(|r| r.front_name.eq_ignore_ascii_case(front));
    }
    records.sort_by(|a, b| b.date.cmp(&a.date));
    Ok(records)
}

fn run_list(args: ListArgs) -> Result<()> {
    let project = Project::discover().map_err(|e| miette::miette!("{}", e))?;
    let mut records = load_history(&project, args.front.as_deref())?;
    if let Some(limit) = args.limit {
        records.truncate(limit);
    }

    if records.is_empty() {
        println!("No inspection records yet.");
        return Ok(());
    }

    let rows: Vec<HistoryRow> = records
        .iter()
        .map(|r| HistoryRow {
            id: format_short_id(&r.id.to_string()),
            date: r.date.format("%Y-%m-%d %H:%M").to_string(),
            front: r.front_name.clone(),
            status: r.status_result.to_string(),
            deviations: r.deviations.len(),
            compliance: format!("{}%", r.compliance()),
        })
        .collect();

    let mut table = Table::new(rows);
    table.with(Style::sharp());
    println!("{}", table);
    println!();
    println!("{} record(s)", style(records.len()).cyan());
    Ok(())
}

fn run_show(args: ShowArgs) -> Result<()> {
    let project = Project::discover().map_err(|e| miette::miette!("{}", e))?;
    let record = store::resolve_record(&project, &args.record)
        .map_err(|e| miette::miette!("{}", e))?;

    println!(
        "{} {}",
        style(record.id.to_string()).cyan().bold(),
        style(record.date.format("%Y-%m-%d %H:%M UTC").to_string()).dim()
    );
    println!("{} {}", style("Front:").bold(), record.front_name);
    println!("{} {}", style("Site:").bold(), record.site_name);
    println!("{} {}", style("Supervisor:").bold(), record.supervisor_name);
    println!("{} {}", style("Result:").bold(), record.status_result);
    println!(
        "{} {} checked, {} deviation(s), {}% compliance",
        style("Outcome:").bold(),
        record.questions_checked,
        record.deviations.len(),
        record.compliance()
    );

    for (idx, dev) in record.deviations.iter().enumerate() {
        println!();
        println!(
            "{} {}",
            style(format!("Deviation {}:", idx + 1)).bold(),
            dev.question_text
        );
        println!("  severity: {}   action: {}", dev.severity, dev.action_taken);
        println!("  {}", dev.description);
    }
    Ok(())
}

fn run_delete(args: DeleteArgs) -> Result<()> {
    let project = Project::discover().map_err(|e| miette::miette!("{}", e))?;
    let record = store::resolve_record(&project, &args.record)
        .map_err(|e| miette::miette!("{}", e))?;

    if !args.yes {
        let confirmed = Confirm::with_theme(&ColorfulTheme::default())
            .with_prompt(format!(
                "Permanently delete record {} for '{}'?",
                record.id, record.front_name
            ))
            .default(false)
            .interact()
            .into_diagnostic()?;
        if !confirmed {
            println!("Aborted.");
            return Ok(());
        }
    }

    store::delete::<InspectionRecord>(&project, record.id)
        .map_err(|e| miette::miette!("{}", e))?;
    println!("{} Deleted record {}", style("✓").green().bold(), record.id);
    Ok(())
}

fn run_export(args: ExportArgs) -> Result<()> {
    let project = Project::discover().map_err(|e| miette::miette!("{}", e))?;
    let records = load_history(&project, args.front.as_deref())?;

    let mut writer: csv::Writer<Box<dyn std::io::Write>> = match &args.output {
        Some(path) => {
            let file = std::fs::File::create(path).into_diagnostic()?;
            csv::Writer::from_writer(Box::new(file))
        }
        None => csv::Writer::from_writer(Box::new(std::io::stdout())),
    };

    writer
        .write_record([
            "id",
            "date",
            "front",
            "site",
            "supervisor",
            "status",
            "questions_checked",
            "deviations",
            "compliance_percent",
        ])
        .into_diagnostic()?;

    let count = records.len();
    for record in &records {
        writer
            .write_record([
                record.id.to_string(),
                record.date.to_rfc3339(),
                record.front_name.clone(),
                record.site_name.clone(),
                record.supervisor_name.clone(),
                record.status_result.to_string(),
                record.questions_checked.to_string(),
                record.deviations.len().to_string(),
                record.compliance().to_string(),
            ])
            .into_diagnostic()?;
    }
    writer.flush().into_diagnostic()?;

    if let Some(path) = args.output {
        println!(
            "{} Exported {} record(s) to {}",
            style("✓").green().bold(),
            count,
            path.display()
        );
    }
    Ok(())
}
