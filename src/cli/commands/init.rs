//! `foreman init` command - create the project skeleton

use console::style;
use miette::{IntoDiagnostic, Result};

use crate::core::config::Config;
use crate::core::project::Project;

#[derive(clap::Args, Debug)]
pub struct InitArgs {
    /// Name of the initial site
    #[arg(long)]
    pub site: Option<String>,
}

pub fn run(args: InitArgs) -> Result<()> {
    let cwd = std::env::current_dir().into_diagnostic()?;
    let project = Project::init(&cwd).map_err(|e| miette::miette!("{}", e))?;

    let mut config = Config::default();
    if let Some(site) = args.site {
        config.sites = vec![site];
        config.active_site = 0;
    }
    config.save(&project).map_err(|e| miette::miette!("{}", e))?;

    println!(
        "{} Initialized foreman project in {}",
        style("✓").green().bold(),
        project.root().display()
    );
    println!();
    println!("Next steps:");
    println!(
        "  {}   set who signs the inspections",
        style("foreman profile set --name \"Your Name\"").yellow()
    );
    println!(
        "  {}  register a work front",
        style("foreman front new --name \"...\" --risk electrical=high").yellow()
    );
    println!(
        "  {}            walk an inspection",
        style("foreman routine start <front>").yellow()
    );

    Ok(())
}
