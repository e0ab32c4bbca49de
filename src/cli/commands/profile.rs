//! `foreman profile` command - supervisor identity

use clap::Subcommand;
use console::style;
use miette::Result;

use crate::core::project::Project;
use crate::entities::profile::Profile;

#[derive(Subcommand, Debug)]
pub enum ProfileCommands {
    /// Show the active profile
    Show,

    /// Update profile fields
    Set(SetArgs),
}

#[derive(clap::Args, Debug)]
pub struct SetArgs {
    /// Supervisor name, as it appears on reports
    #[arg(long)]
    pub name: Option<String>,

    #[arg(long)]
    pub company: Option<String>,

    #[arg(long)]
    pub role: Option<String>,

    #[arg(long)]
    pub phone: Option<String>,

    #[arg(long)]
    pub email: Option<String>,

    /// Save as the per-user fallback instead of this project's profile
    #[arg(long)]
    pub global: bool,
}

pub fn run(cmd: ProfileCommands) -> Result<()> {
    match cmd {
        ProfileCommands::Show => run_show(),
        ProfileCommands::Set(args) => run_set(args),
    }
}

fn run_show() -> Result<()> {
    let project = Project::discover().map_err(|e| miette::miette!("{}", e))?;
    let profile = Profile::load(&project);

    if !profile.is_complete() {
        println!(
            "No profile yet. Set one with {}",
            style("foreman profile set --name \"Your Name\"").yellow()
        );
        return Ok(());
    }

    println!("{} {}", style("Name:").bold(), profile.name);
    for (label, value) in [
        ("Company:", &profile.company),
        ("Role:", &profile.role),
        ("Phone:", &profile.phone),
        ("Email:", &profile.email),
    ] {
        if !value.is_empty() {
            println!("{} {}", style(label).bold(), value);
        }
    }
    Ok(())
}

fn run_set(args: SetArgs) -> Result<()> {
    let project = Project::discover().map_err(|e| miette::miette!("{}", e))?;
    let mut profile = Profile::load(&project);

    if let Some(name) = args.name {
        profile.name = name;
    }
    if let Some(company) = args.company {
        profile.company = company;
    }
    if let Some(role) = args.role {
        profile.role = role;
    }
    if let Some(phone) = args.phone {
        profile.phone = phone;
    }
    if let Some(email) = args.email {
        profile.email = email;
    }

    if args.global {
        let path = profile
            .save_user()
            .map_err(|e| miette::miette!("{}", e))?;
        println!(
            "{} Saved user profile to {}",
            style("✓").green().bold(),
            path.display()
        );
    } else {
        profile.save(&project).map_err(|e| miette::miette!("{}", e))?;
        println!("{} Saved project profile", style("✓").green().bold());
    }
    Ok(())
}
