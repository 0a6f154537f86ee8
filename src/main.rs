mod cli;
mod prompt;

use clap::Parser;
use cli::{Args, Commands};
use eyre::{Result, eyre};
use seqname::types::{EditSource, FileEdits};
use seqname::{RunOutcome, ScanOptions};

fn main() -> Result<()> {
    color_eyre::install()?;

    let args = Args::parse();

    let verbose = match &args.command {
        Commands::Scan(a) => a.verbose,
        Commands::Rename(a) => a.verbose,
    };

    let env_filter = if std::env::var("RUST_LOG").is_ok() {
        tracing_subscriber::EnvFilter::from_default_env()
    } else {
        let level = match verbose {
            0 => "info",
            1 => "debug",
            _ => "trace",
        };
        tracing_subscriber::EnvFilter::new(level)
    };

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    match args.command {
        Commands::Scan(a) => {
            let dir = seqname::fs::resolve_dir(a.dir)?;
            let options = ScanOptions {
                min_group_size: a.min_files,
            };
            let templates = seqname::scan_dir(&dir, &options)?;
            if a.json {
                println!("{}", serde_json::to_string_pretty(&templates.summaries())?);
            } else if templates.is_empty() {
                tracing::info!("no templates found in {}", dir.display());
            } else {
                for summary in templates.summaries() {
                    println!("{}  ({} files)", summary.template, summary.files);
                }
            }
        }
        Commands::Rename(a) => {
            let dir = seqname::fs::resolve_dir(a.dir)?;
            let options = ScanOptions {
                min_group_size: a.min_files,
            };
            let mut source: Box<dyn EditSource> = match &a.edits {
                Some(path) => Box::new(FileEdits::from_path(path)?),
                None => Box::new(prompt::Prompt::new(!a.yes)),
            };

            match seqname::run(&dir, &options, source.as_mut(), a.dry_run)? {
                RunOutcome::NothingToRename => {
                    tracing::info!("nothing to rename in {}", dir.display());
                }
                RunOutcome::Cancelled => {}
                RunOutcome::Planned(plan) => {
                    for (from, to) in plan.iter() {
                        println!("{from} -> {to}");
                    }
                    tracing::info!("dry run: {} file(s) would be renamed", plan.len());
                }
                RunOutcome::Applied(report) => {
                    tracing::info!(
                        renamed = report.renamed.len(),
                        missing = report.missing.len(),
                        failed = report.failed.len(),
                        "renamed {} file(s)",
                        report.renamed.len()
                    );
                    for failure in &report.failed {
                        eprintln!("failed: {} -> {}: {}", failure.from, failure.to, failure.error);
                    }
                    if !report.is_clean() {
                        return Err(eyre!(
                            "{} file(s) could not be renamed",
                            report.failed.len()
                        ));
                    }
                }
            }
        }
    }

    Ok(())
}
