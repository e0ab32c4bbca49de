//! `foreman validate` command - schema-check stored entity files

use console::style;
use miette::Result;
use std::path::PathBuf;
use walkdir::WalkDir;

use crate::core::project::Project;
use crate::core::EntityPrefix;
use crate::schema::{SchemaRegistry, SchemaValidator};

#[derive(clap::Args, Debug)]
pub struct ValidateArgs {
    /// Paths to validate (default: entire project)
    #[arg()]
    pub paths: Vec<PathBuf>,

    /// Continue validation after the first failing file
    #[arg(long)]
    pub keep_going: bool,

    /// Show the summary only, not individual violations
    #[arg(long)]
    pub summary: bool,
}

#[derive(Default)]
struct ValidationStats {
    files_checked: usize,
    files_passed: usize,
    files_failed: usize,
    total_errors: usize,
}

pub fn run(args: ValidateArgs) -> Result<()> {
    let project = Project::discover().map_err(|e| miette::miette!("{}", e))?;
    let validator =
        SchemaValidator::new(&SchemaRegistry::default()).map_err(|e| miette::miette!("{}", e))?;

    let files = if args.paths.is_empty() {
        entity_files(&project)
    } else {
        expand_paths(&args.paths)
    };

    println!(
        "{} Validating {} file(s)...\n",
        style("→").blue(),
        files.len()
    );

    let mut stats = ValidationStats::default();

    for path in &files {
        let filename = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default();

        let Some(prefix) = EntityPrefix::from_filename(&filename) else {
            if !args.summary {
                println!(
                    "{} {} - unknown entity type (skipped)",
                    style("?").yellow(),
                    path.display()
                );
            }
            continue;
        };

        stats.files_checked += 1;

        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) => {
                stats.files_failed += 1;
                stats.total_errors += 1;
                if !args.summary {
                    println!("{} {} - {}", style("✗").red(), path.display(), e);
                }
                if !args.keep_going {
                    break;
                }
                continue;
            }
        };

        match validator.validate(&content, &filename, prefix) {
            Ok(()) => {
                stats.files_passed += 1;
                if !args.summary {
                    println!("{} {}", style("✓").green(), path.display());
                }
            }
            Err(report) => {
                stats.files_failed += 1;
                stats.total_errors += report.violation_count();
                if !args.summary {
                    println!(
                        "{} {} - {} violation(s)",
                        style("✗").red(),
                        path.display(),
                        report.violation_count()
                    );
                    for violation in &report.violations {
                        println!("    {}", style(violation).red());
                    }
                }
                if !args.keep_going {
                    break;
                }
            }
        }
    }

    println!();
    println!("{}", style("─".repeat(60)).dim());
    println!("{}", style("Validation Summary").bold());
    println!("{}", style("─".repeat(60)).dim());
    println!("  Files checked:  {}", style(stats.files_checked).cyan());
    println!("  Files passed:   {}", style(stats.files_passed).green());
    println!("  Files failed:   {}", style(stats.files_failed).red());
    println!("  Total errors:   {}", style(stats.total_errors).red());
    println!();

    if stats.files_failed > 0 {
        Err(miette::miette!(
            "Validation failed: {} file(s) have errors",
            stats.files_failed
        ))
    } else {
        println!(
            "{} All files passed validation!",
            style("✓").green().bold()
        );
        Ok(())
    }
}

/// All stored entity files in the project
fn entity_files(project: &Project) -> Vec<PathBuf> {
    let mut files = Vec::new();
    for prefix in EntityPrefix::all() {
        let dir = project.entity_dir(*prefix);
        if !dir.exists() {
            continue;
        }
        for entry in WalkDir::new(&dir)
            .into_iter()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_type().is_file())
        {
            if entry.path().extension().is_some_and(|ext| ext == "yaml") {
                files.push(entry.path().to_path_buf());
            }
        }
    }
    files.sort();
    files
}

/// Expand paths - directories become their contained yaml files
fn expand_paths(paths: &[PathBuf]) -> Vec<PathBuf> {
    let mut files = Vec::new();
    for path in paths {
        if path.is_dir() {
            for entry in WalkDir::new(path)
                .into_iter()
                .filter_map(|e| e.ok())
                .filter(|e| e.file_type().is_file())
            {
                if entry.path().extension().is_some_and(|ext| ext == "yaml") {
                    files.push(entry.path().to_path_buf());
                }
            }
        } else if path.exists() {
            files.push(path.clone());
        }
    }
    files.sort();
    files
}
