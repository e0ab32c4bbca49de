//! `foreman report` command - render a printable inspection report

use console::style;
use miette::{IntoDiagnostic, Result};
use std::path::PathBuf;

use crate::core::project::Project;
use crate::core::store;
use crate::entities::profile::Profile;
use crate::report::{render_markdown, ReportOptions};

#[derive(clap::Args, Debug)]
pub struct ReportArgs {
    /// Record id or id prefix
    pub record: String,

    /// Write to this file instead of stdout
    #[arg(long, short = 'o')]
    pub out: Option<PathBuf>,

    /// Inline photos and the signature as data URIs (large output)
    #[arg(long)]
    pub photos: bool,
}

pub fn run(args: ReportArgs) -> Result<()> {
    let project = Project::discover().map_err(|e| miette::miette!("{}", e))?;
    let record = store::resolve_record(&project, &args.record)
        .map_err(|e| miette::miette!("{}", e))?;
    let profile = Profile::load(&project);

    let options = ReportOptions {
        include_photos: args.photos,
        company: (!profile.company.is_empty()).then(|| profile.company.clone()),
    };
    let markdown = render_markdown(&record, &options).map_err(|e| miette::miette!("{}", e))?;

    match args.out {
        Some(path) => {
            std::fs::write(&path, markdown).into_diagnostic()?;
            println!(
                "{} Wrote report to {}",
                style("✓").green().bold(),
                path.display()
            );
        }
        None => print!("{}", markdown),
    }
    Ok(())
}
