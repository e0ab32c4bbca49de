//! Top-level CLI definition

use clap::{Parser, Subcommand};

use crate::cli::commands;

#[derive(Parser, Debug)]
#[command(
    name = "foreman",
    version,
    about = "Work-front safety inspections as plain-text YAML",
    propagate_version = true
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Initialize a foreman project in the current directory
    Init(commands::init::InitArgs),

    /// Show or update the supervisor profile
    #[command(subcommand)]
    Profile(commands::profile::ProfileCommands),

    /// Manage sites
    #[command(subcommand)]
    Site(commands::site::SiteCommands),

    /// Manage work fronts
    #[command(subcommand)]
    Front(commands::front::FrontCommands),

    /// Run a guided inspection routine
    #[command(subcommand)]
    Routine(commands::routine::RoutineCommands),

    /// Browse the inspection history
    #[command(subcommand)]
    History(commands::history::HistoryCommands),

    /// Render a printable inspection report
    Report(commands::report::ReportArgs),

    /// Browse the risk catalog and question bank
    #[command(subcommand)]
    Catalog(commands::catalog::CatalogCommands),

    /// Validate stored files against their schemas
    Validate(commands::validate::ValidateArgs),

    /// Generate shell completions
    Completions(commands::completions::CompletionsArgs),
}
