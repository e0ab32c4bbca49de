use clap::Parser;
use foreman::cli::{Cli, Commands};
use miette::Result;

fn main() -> Result<()> {
    // Install miette's fancy error handler for beautiful diagnostics
    miette::set_hook(Box::new(|_| {
        Box::new(
            miette::MietteHandlerOpts::new()
                .terminal_links(true)
                .unicode(true)
                .context_lines(2)
                .tab_width(4)
                .build(),
        )
    }))?;

    let cli = Cli::parse();

    match cli.command {
        Commands::Init(args) => foreman::cli::commands::init::run(args),
        Commands::Profile(cmd) => foreman::cli::commands::profile::run(cmd),
        Commands::Site(cmd) => foreman::cli::commands::site::run(cmd),
        Commands::Front(cmd) => foreman::cli::commands::front::run(cmd),
        Commands::Routine(cmd) => foreman::cli::commands::routine::run(cmd),
        Commands::History(cmd) => foreman::cli::commands::history::run(cmd),
        Commands::Report(args) => foreman::cli::commands::report::run(args),
        Commands::Catalog(cmd) => foreman::cli::commands::catalog::run(cmd),
        Commands::Validate(args) => foreman::cli::commands::validate::run(args),
        Commands::Completions(args) => foreman::cli::commands::completions::run(args),
    }
}
