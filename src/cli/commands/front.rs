//! `foreman front` command - work front management

use clap::Subcommand;
use console::style;
use dialoguer::{theme::ColorfulTheme, Confirm, Input, Select};
use miette::{IntoDiagnostic, Result};

use crate::catalog::{Catalog, RiskLevel};
use crate::cli::helpers::{format_short_id, relative_time, style_status, truncate_str};
use crate::core::config::Config;
use crate::core::project::Project;
use crate::core::store;
use crate::entities::front::{FrontStatus, SelectedRisk, WorkFront};
use crate::entities::profile::Profile;
use crate::entities::record::InspectionRecord;

#[derive(Subcommand, Debug)]
pub enum FrontCommands {
    /// Register a new work front
    New(NewArgs),

    /// List work fronts
    List(ListArgs),

    /// Show a front's details, risks and equipment
    Show(ShowArgs),

    /// Show or edit a front's risk profile
    Risks(RisksArgs),

    /// Delete a front
    Delete(DeleteArgs),
}

#[derive(clap::Args, Debug)]
pub struct NewArgs {
    /// Front name
    #[arg(long)]
    pub name: Option<String>,

    /// Site the front belongs to (default: the active site)
    #[arg(long)]
    pub site: Option<String>,

    /// Physical location note
    #[arg(long)]
    pub location: Option<String>,

    /// Risk selection as id=level, repeatable (e.g. --risk electrical=high)
    #[arg(long = "risk", value_name = "ID=LEVEL")]
    pub risks: Vec<String>,

    /// Pick risks interactively from the catalog
    #[arg(long, short = 'i')]
    pub interactive: bool,
}

#[derive(clap::Args, Debug)]
pub struct ListArgs {
    /// Filter by status
    #[arg(long, short = 's')]
    pub status: Option<FrontStatus>,

    /// Filter by site (default: all sites)
    #[arg(long)]
    pub site: Option<String>,
}

#[derive(clap::Args, Debug)]
pub struct ShowArgs {
    /// Front id, id prefix, or name
    pub front: String,
}

#[derive(clap::Args, Debug)]
pub struct RisksArgs {
    /// Front id, id prefix, or name
    pub front: String,

    /// Set a risk level, repeatable (e.g. --set height=medium)
    #[arg(long = "set", value_name = "ID=LEVEL")]
    pub set: Vec<String>,

    /// Clear a risk from the profile, repeatable
    #[arg(long = "clear", value_name = "ID")]
    pub clear: Vec<String>,

    /// Re-pick the whole profile interactively
    #[arg(long, short = 'i')]
    pub interactive: bool,
}

#[derive(clap::Args, Debug)]
pub struct DeleteArgs {
    /// Front id, id prefix, or name
    pub front: String,

    /// Skip the confirmation prompt
    #[arg(long, short = 'y')]
    pub yes: bool,
}

pub fn run(cmd: FrontCommands) -> Result<()> {
    match cmd {
        FrontCommands::New(args) => run_new(args),
        FrontCommands::List(args) => run_list(args),
        FrontCommands::Show(args) => run_show(args),
        FrontCommands::Risks(args) => run_risks(args),
        FrontCommands::Delete(args) => run_delete(args),
    }
}

/// Parse an `id=level` risk flag
fn parse_risk_spec(spec: &str, catalog: &Catalog) -> Result<SelectedRisk> {
    let (id, level_str) = spec
        .split_once('=')
        .ok_or_else(|| miette::miette!("Invalid risk spec '{}'. Use id=level", spec))?;
    let level: RiskLevel = level_str
        .parse()
        .map_err(|e: String| miette::miette!("{}", e))?;

    // Unknown ids are kept: the resolver ignores them, and a later catalog
    // edit may make them meaningful again
    if catalog.risks.get(id).is_none() {
        println!(
            "{}",
            style(format!("note: '{}' is not in the risk catalog", id)).dim()
        );
    }
    Ok(SelectedRisk::new(id, level))
}

/// Interactive level picker over the whole catalog
fn pick_risks_interactively(
    catalog: &Catalog,
    current: &[SelectedRisk],
) -> Result<Vec<SelectedRisk>> {
    let theme = ColorfulTheme::default();
    let mut selections = Vec::new();

    for risk in catalog.risks.iter() {
        let current_level = current
            .iter()
            .find(|s| s.risk == risk.id)
            .map(|s| s.level)
            .unwrap_or(RiskLevel::NotApplicable);

        let levels = [
            RiskLevel::High,
            RiskLevel::Medium,
            RiskLevel::Low,
            RiskLevel::NotApplicable,
        ];
        let items: Vec<String> = levels
            .iter()
            .map(|level| {
                let description = risk.level_description(*level).unwrap_or("-");
                format!("{:<15} {}", level.to_string(), truncate_str(description, 60))
            })
            .collect();
        let default = levels
            .iter()
            .position(|l| *l == current_level)
            .unwrap_or(3);

        let choice = Select::with_theme(&theme)
            .with_prompt(format!("{} ({})", risk.name, risk.category))
            .items(&items)
            .default(default)
            .interact()
            .into_diagnostic()?;

        selections.push(SelectedRisk::new(risk.id.clone(), levels[choice]));
    }

    Ok(selections)
}

fn run_new(args: NewArgs) -> Result<()> {
    let project = Project::discover().map_err(|e| miette::miette!("{}", e))?;
    let config = Config::load(&project).map_err(|e| miette::miette!("{}", e))?;
    let catalog = Catalog::load(&project).map_err(|e| miette::miette!("{}", e))?;
    let profile = Profile::load(&project);

    let name = match args.name {
        Some(name) => name,
        None if args.interactive => Input::with_theme(&ColorfulTheme::default())
            .with_prompt("Front name")
            .interact_text()
            .into_diagnostic()?,
        None => return Err(miette::miette!("A front name is required. Pass --name")),
    };

    let site = args
        .site
        .unwrap_or_else(|| config.active_site_name().to_string());

    let selections = if args.interactive {
        pick_risks_interactively(&catalog, &[])?
    } else {
        args.risks
            .iter()
            .map(|spec| parse_risk_spec(spec, &catalog))
            .collect::<Result<Vec<_>>>()?
    };

    let mut front = WorkFront::new(name, site);
    front.location = args.location;
    front.supervisor = profile.name;
    front.set_risks(selections, &catalog.risks);

    store::save(&project, &front).map_err(|e| miette::miette!("{}", e))?;

    println!(
        "{} Created front {} ({})",
        style("✓").green().bold(),
        style(&front.name).cyan(),
        front.id
    );
    println!();
    println!("{}", style("Required equipment:").bold());
    for item in &front.equipment {
        println!("  - {}", item);
    }
    Ok(())
}

fn run_list(args: ListArgs) -> Result<()> {
    let project = Project::discover().map_err(|e| miette::miette!("{}", e))?;
    let mut fronts =
        store::load_all::<WorkFront>(&project).map_err(|e| miette::miette!("{}", e))?;

    if let Some(status) = args.status {
        fronts.retain(|f| f.status == status);
    }
    if let Some(ref site) = args.site {
        fronts.retain(|f| f.site.eq_ignore_ascii_case(site));
    }

    if fronts.is_empty() {
        println!("No fronts found.");
        println!();
        println!("Create one with: {}", style("foreman front new").yellow());
        return Ok(());
    }

    println!(
        "{:<16} {:<28} {:<18} {:<18} {:<14}",
        style("ID").bold(),
        style("NAME").bold(),
        style("SITE").bold(),
        style("STATUS").bold(),
        style("LAST REVIEW").bold()
    );
    println!("{}", "-".repeat(96));

    for front in &fronts {
        println!(
            "{:<16} {:<28} {:<18} {:<18} {:<14}",
            format_short_id(&front.id.to_string()),
            truncate_str(&front.name, 26),
            truncate_str(&front.site, 16),
            style_status(front.status),
            relative_time(front.last_review)
        );
    }

    println!();
    println!("{} front(s) found", style(fronts.len()).cyan());
    Ok(())
}

fn run_show(args: ShowArgs) -> Result<()> {
    let project = Project::discover().map_err(|e| miette::miette!("{}", e))?;
    let catalog = Catalog::load(&project).map_err(|e| miette::miette!("{}", e))?;
    let front = store::resolve_front(&project, &args.front)
        .map_err(|e| miette::miette!("{}", e))?;
    let records = store::load_all::<InspectionRecord>(&project)
        .map_err(|e| miette::miette!("{}", e))?;
    let inspection_count = records
        .iter()
        .filter(|r| r.front_name == front.name)
        .count();

    println!(
        "{} {}",
        style(&front.name).cyan().bold(),
        style(front.id.to_string()).dim()
    );
    println!("{} {}", style("Site:").bold(), front.site);
    if let Some(ref location) = front.location {
        println!("{} {}", style("Location:").bold(), location);
    }
    if !front.supervisor.is_empty() {
        println!("{} {}", style("Supervisor:").bold(), front.supervisor);
    }
    println!("{} {}", style("Status:").bold(), style_status(front.status));
    println!(
        "{} {}",
        style("Last review:").bold(),
        relative_time(front.last_review)
    );
    println!(
        "{} {}",
        style("Inspections on record:").bold(),
        inspection_count
    );

    println!();
    println!("{}", style("Risks").bold());
    if front.risks.is_empty() {
        println!("  (none selected)");
    }
    for selection in &front.risks {
        let (name, description) = catalog
            .risks
            .get(&selection.risk)
            .map(|def| {
                (
                    def.name.as_str(),
                    def.level_description(selection.level).unwrap_or("-"),
                )
            })
            .unwrap_or((selection.risk.as_str(), "(not in catalog)"));
        println!(
            "  {:<22} {:<8} {}",
            name,
            selection.level,
            style(truncate_str(description, 50)).dim()
        );
    }

    println!();
    println!("{}", style("Required equipment").bold());
    for item in &front.equipment {
        println!("  - {}", item);
    }
    Ok(())
}

fn run_risks(args: RisksArgs) -> Result<()> {
    let project = Project::discover().map_err(|e| miette::miette!("{}", e))?;
    let catalog = Catalog::load(&project).map_err(|e| miette::miette!("{}", e))?;
    let mut front = store::resolve_front(&project, &args.front)
        .map_err(|e| miette::miette!("{}", e))?;

    if !args.interactive && args.set.is_empty() && args.clear.is_empty() {
        // No edits requested; just print the profile
        if front.risks.is_empty() {
            println!("No risks selected on '{}'.", front.name);
        }
        for selection in &front.risks {
            println!("{} = {}", selection.risk, selection.level);
        }
        return Ok(());
    }

    if args.interactive {
        let selections = pick_risks_interactively(&catalog, &front.risks)?;
        front.set_risks(selections, &catalog.risks);
    } else {
        let mut selections = front.risks.clone();
        for spec in &args.set {
            selections.push(parse_risk_spec(spec, &catalog)?);
        }
        for id in &args.clear {
            selections.push(SelectedRisk::new(id.clone(), RiskLevel::NotApplicable));
        }
        front.set_risks(selections, &catalog.risks);
    }

    store::save(&project, &front).map_err(|e| miette::miette!("{}", e))?;

    println!(
        "{} Updated risks on '{}' ({} selected)",
        style("✓").green().bold(),
        front.name,
        front.risks.len()
    );
    println!();
    println!("{}", style("Required equipment:").bold());
    for item in &front.equipment {
        println!("  - {}", item);
    }
    Ok(())
}

fn run_delete(args: DeleteArgs) -> Result<()> {
    let project = Project::discover().map_err(|e| miette::miette!("{}", e))?;
    let front = store::resolve_front(&project, &args.front)
        .map_err(|e| miette::miette!("{}", e))?;

    if !args.yes {
        let confirmed = Confirm::with_theme(&ColorfulTheme::default())
            .with_prompt(format!("Delete front '{}'?", front.name))
            .default(false)
            .interact()
            .into_diagnostic()?;
        if !confirmed {
            println!("Aborted.");
            return Ok(());
        }
    }

    store::delete::<WorkFront>(&project, front.id).map_err(|e| miette::miette!("{}", e))?;
    println!(
        "{} Deleted front '{}'. Its past inspection records remain in history.",
        style("✓").green().bold(),
        front.name
    );
    Ok(())
}
