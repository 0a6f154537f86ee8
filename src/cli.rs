use clap::{Parser, Subcommand};
use seqname::consts::DEFAULT_MIN_GROUP_SIZE;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "seqname", version, about)]
pub struct Args {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List the filename templates found in a directory
    Scan(ScanArgs),
    /// Rewrite templates and rename the matching files
    Rename(RenameArgs),
}

#[derive(clap::Args, Debug)]
pub struct ScanArgs {
    /// Directory to scan (defaults to the current directory)
    pub dir: Option<PathBuf>,

    /// Minimum number of files sharing a template
    #[arg(long, default_value_t = DEFAULT_MIN_GROUP_SIZE)]
    pub min_files: usize,

    /// Print templates as JSON
    #[arg(long)]
    pub json: bool,

    /// Verbose logging
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

#[derive(clap::Args, Debug)]
pub struct RenameArgs {
    /// Directory to rename files in (defaults to the current directory)
    pub dir: Option<PathBuf>,

    /// Minimum number of files sharing a template
    #[arg(long, default_value_t = DEFAULT_MIN_GROUP_SIZE)]
    pub min_files: usize,

    /// Read edits from a JSON object of template -> new template instead of prompting
    #[arg(long)]
    pub edits: Option<PathBuf>,

    /// Print the planned renames without touching any file
    #[arg(long)]
    pub dry_run: bool,

    /// Skip the final confirmation prompt
    #[arg(short, long)]
    pub yes: bool,

    /// Verbose logging
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}
