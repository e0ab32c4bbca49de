//! `foreman site` command - site management
//!
//! Fronts belong to a site by name, so renames cascade into stored fronts
//! and removing a site removes its fronts with it.

use clap::Subcommand;
use console::style;
use dialoguer::{theme::ColorfulTheme, Confirm};
use miette::{IntoDiagnostic, Result};

use crate::core::config::Config;
use crate::core::project::Project;
use crate::core::store;
use crate::entities::front::WorkFront;

#[derive(Subcommand, Debug)]
pub enum SiteCommands {
    /// List sites
    List,

    /// Register a new site
    Add { name: String },

    /// Rename a site, updating its fronts
    Rename { from: String, to: String },

    /// Remove a site and every front on it
    Remove {
        name: String,

        /// Skip the confirmation prompt
        #[arg(long, short = 'y')]
        yes: bool,
    },

    /// Make a site the default for new fronts
    Use { name: String },
}

pub fn run(cmd: SiteCommands) -> Result<()> {
    let project = Project::discover().map_err(|e| miette::miette!("{}", e))?;
    let mut config = Config::load(&project).map_err(|e| miette::miette!("{}", e))?;

    match cmd {
        SiteCommands::List => {
            let fronts = store::load_all::<WorkFront>(&project)
                .map_err(|e| miette::miette!("{}", e))?;
            for (idx, site) in config.sites.iter().enumerate() {
                let marker = if idx == config.active_site { "*" } else { " " };
                let count = fronts.iter().filter(|f| &f.site == site).count();
                println!(
                    "{} {}  {}",
                    style(marker).green().bold(),
                    site,
                    style(format!("({} front(s))", count)).dim()
                );
            }
            Ok(())
        }

        SiteCommands::Add { name } => {
            config.add_site(&name).map_err(|e| miette::miette!("{}", e))?;
            config.save(&project).map_err(|e| miette::miette!("{}", e))?;
            println!("{} Added site '{}'", style("✓").green().bold(), name);
            Ok(())
        }

        SiteCommands::Rename { from, to } => {
            config
                .rename_site(&from, &to)
                .map_err(|e| miette::miette!("{}", e))?;

            let fronts = store::load_all::<WorkFront>(&project)
                .map_err(|e| miette::miette!("{}", e))?;
            let mut moved = 0usize;
            for mut front in fronts {
                if front.site == from {
                    front.site = to.clone();
                    store::save(&project, &front).map_err(|e| miette::miette!("{}", e))?;
                    moved += 1;
                }
            }

            config.save(&project).map_err(|e| miette::miette!("{}", e))?;
            println!(
                "{} Renamed site '{}' to '{}' ({} front(s) updated)",
                style("✓").green().bold(),
                from,
                to,
                moved
            );
            Ok(())
        }

        SiteCommands::Remove { name, yes } => {
            let fronts = store::load_all::<WorkFront>(&project)
                .map_err(|e| miette::miette!("{}", e))?;
            let on_site: Vec<&WorkFront> = fronts.iter().filter(|f| f.site == name).collect();

            if !yes {
                let prompt = format!(
                    "Remove site '{}' and its {} front(s)?",
                    name,
                    on_site.len()
                );
                let confirmed = Confirm::with_theme(&ColorfulTheme::default())
                    .with_prompt(prompt)
                    .default(false)
                    .interact()
                    .into_diagnostic()?;
                if !confirmed {
                    println!("Aborted.");
                    return Ok(());
                }
            }

            config
                .remove_site(&name)
                .map_err(|e| miette::miette!("{}", e))?;
            for front in &on_site {
                store::delete::<WorkFront>(&project, front.id)
                    .map_err(|e| miette::miette!("{}", e))?;
            }
            config.save(&project).map_err(|e| miette::miette!("{}", e))?;

            println!(
                "{} Removed site '{}' and {} front(s)",
                style("✓").green().bold(),
                name,
                on_site.len()
            );
            Ok(())
        }

        SiteCommands::Use { name } => {
            config
                .set_active_site(&name)
                .map_err(|e| miette::miette!("{}", e))?;
            config.save(&project).map_err(|e| miette::miette!("{}", e))?;
            println!("{} Active site is now '{}'", style("✓").green().bold(), name);
            Ok(())
        }
    }
}
