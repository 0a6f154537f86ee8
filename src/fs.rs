use crate::plan::RenamePlan;
use eyre::{Result, eyre};
use std::collections::HashSet;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Resolve the directory to work in: the override if given, else the cwd.
pub fn resolve_dir(dir_override: Option<PathBuf>) -> Result<PathBuf> {
    let dir = match dir_override {
        Some(d) => d,
        None => std::env::current_dir()?,
    };
    if !dir.is_dir() {
        return Err(eyre!("not a directory: {}", dir.display()));
    }
    tracing::debug!(dir = %dir.display(), "using directory");
    Ok(dir)
}

/// Names of the regular files directly inside `dir`, sorted.
/// Subdirectories are not entered and names that are not valid UTF-8 are skipped.
pub fn list_filenames(dir: &Path) -> Result<Vec<String>> {
    let mut names = Vec::new();
    for entry in fs::read_dir(dir)? {
        let e = entry?;
        if !e.path().is_file() {
            continue;
        }
        match e.file_name().into_string() {
            Ok(name) => names.push(name),
            Err(raw) => tracing::trace!(file = ?raw, "skipping non UTF-8 name"),
        }
    }
    names.sort();
    tracing::debug!(dir = %dir.display(), files = names.len(), "listed directory");
    Ok(names)
}

/// A rename that the filesystem refused.
#[derive(Debug)]
pub struct RenameFailure {
    pub from: String,
    pub to: String,
    pub error: io::Error,
}

/// What happened when a plan was applied.
#[derive(Debug, Default)]
pub struct ApplyReport {
    pub renamed: Vec<(String, String)>,
    /// Planned names that were no longer in the directory.
    pub missing: Vec<String>,
    pub failed: Vec<RenameFailure>,
}

impl ApplyReport {
    pub fn is_clean(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Rename every planned file that is still present in `dir`.
///
/// The directory is listed again first; planned names that have since
/// disappeared are recorded as missing. A failed rename is recorded and the
/// batch carries on. Existing targets are not checked for, and renames run in
/// plan order with no staging, so chains such as `a -> b`, `b -> c` depend on
/// that order.
pub fn apply_plan(dir: &Path, plan: &RenamePlan) -> Result<ApplyReport> {
    let present: HashSet<String> = list_filenames(dir)?.into_iter().collect();
    let mut report = ApplyReport::default();

    for (from, to) in plan.iter() {
        if !present.contains(from) {
            tracing::debug!(file = from, "no longer present; skipping");
            report.missing.push(from.to_string());
            continue;
        }
        if from == to {
            tracing::trace!(file = from, "name unchanged");
            continue;
        }
        match fs::rename(dir.join(from), dir.join(to)) {
            Ok(()) => {
                tracing::debug!(from, to, "renamed");
                report.renamed.push((from.to_string(), to.to_string()));
            }
            Err(error) => {
                tracing::warn!(from, to, "rename failed: {error}");
                report.failed.push(RenameFailure {
                    from: from.to_string(),
                    to: to.to_string(),
                    error,
                });
            }
        }
    }
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::key::{TemplateKey, UserKey};
    use crate::plan::{Edits, build_plan};
    use crate::template::{ScanOptions, infer_templates};
    use std::fs::File;
    use tempfile::tempdir;

    #[test]
    fn list_skips_directories() -> Result<()> {
        let dir = tempdir()?;
        File::create(dir.path().join("b2.txt"))?;
        File::create(dir.path().join("a1.txt"))?;
        fs::create_dir(dir.path().join("c3.txt"))?;

        assert_eq!(list_filenames(dir.path())?, vec!["a1.txt", "b2.txt"]);
        Ok(())
    }

    #[test]
    fn resolve_rejects_files() -> Result<()> {
        let dir = tempdir()?;
        let file = dir.path().join("x.txt");
        File::create(&file)?;
        assert!(resolve_dir(Some(file)).is_err());
        assert_eq!(resolve_dir(Some(dir.path().to_path_buf()))?, dir.path());
        Ok(())
    }

    #[test]
    fn apply_ignores_vanished_files() -> Result<()> {
        let dir = tempdir()?;
        let names: Vec<String> = (1..=4).map(|i| format!("ep{i}.mp4")).collect();
        for n in &names {
            File::create(dir.path().join(n))?;
        }
        let templates = infer_templates(&names, &ScanOptions::default())?;
        let mut edits = Edits::new();
        edits.insert(
            TemplateKey::new(vec!["ep".into(), ".mp4".into()]),
            UserKey::parse("episode_/a/.mp4").unwrap(),
        );
        let plan = build_plan(&templates, &edits)?;

        fs::remove_file(dir.path().join("ep3.mp4"))?;
        let report = apply_plan(dir.path(), &plan)?;

        assert_eq!(report.renamed.len(), 3);
        assert_eq!(report.missing, vec!["ep3.mp4"]);
        assert!(report.is_clean());
        assert!(dir.path().join("episode_4.mp4").exists());
        assert!(!dir.path().join("episode_3.mp4").exists());
        Ok(())
    }
}
