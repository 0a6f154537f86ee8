//! Infer naming templates from numbered filenames and batch-rename them.
//!
//! A directory of files such as `img_1080_001.png ... img_1080_005.png` is
//! reduced to the template `img_1080_/a/.png`. The user rewrites the template
//! (`frame_/a/.png`) and every file is renamed accordingly.

pub mod consts;
pub mod error;
pub mod fold;
pub mod fs;
pub mod key;
pub mod name;
pub mod plan;
pub mod template;
pub mod types;

pub use error::TemplateError;
pub use key::{TemplateKey, UserKey};
pub use plan::{Edits, RenamePlan, build_plan};
pub use template::{ScanOptions, Templates, infer_templates};
pub use types::{EditOutcome, EditSource, FileEdits};

use eyre::Result;
use std::path::Path;

/// List `dir` and infer its templates.
pub fn scan_dir(dir: &Path, options: &ScanOptions) -> Result<Templates> {
    let filenames = fs::list_filenames(dir)?;
    let templates = infer_templates(&filenames, options)?;
    tracing::debug!(
        templates = templates.len(),
        files = templates.file_count(),
        "inferred templates"
    );
    Ok(templates)
}

/// How a rename run ended.
#[derive(Debug)]
pub enum RunOutcome {
    /// No group of files was large enough to form a template.
    NothingToRename,
    /// The edit source cancelled; nothing was touched.
    Cancelled,
    /// Dry run: the plan that would have been applied.
    Planned(RenamePlan),
    Applied(fs::ApplyReport),
}

/// Scan `dir`, ask `source` for edits, and rename (unless `dry_run`).
pub fn run(
    dir: &Path,
    options: &ScanOptions,
    source: &mut dyn EditSource,
    dry_run: bool,
) -> Result<RunOutcome> {
    let templates = scan_dir(dir, options)?;
    if templates.is_empty() {
        return Ok(RunOutcome::NothingToRename);
    }

    let edits = match source.collect(&templates)? {
        EditOutcome::Apply(edits) => edits,
        EditOutcome::Cancelled => {
            tracing::info!("cancelled; no files renamed");
            return Ok(RunOutcome::Cancelled);
        }
    };

    let plan = build_plan(&templates, &edits)?;
    if dry_run {
        return Ok(RunOutcome::Planned(plan));
    }
    let report = fs::apply_plan(dir, &plan)?;
    Ok(RunOutcome::Applied(report))
}
