use crate::key::UserKey;
use crate::plan::{Edits, check_selection};
use crate::template::Templates;
use eyre::Result;
use indexmap::IndexMap;
use std::path::Path;

/// The answer an [`EditSource`] gives for a set of templates.
///
/// - `Apply`: rename using these edits (possibly none).
/// - `Cancelled`: the user backed out; nothing may be renamed.
///
/// # Examples
///
/// ```rust
/// use seqname::plan::Edits;
/// use seqname::types::EditOutcome;
///
/// let outcome = EditOutcome::Apply(Edits::new());
/// match outcome {
///     EditOutcome::Apply(edits) => assert!(edits.is_empty()),
///     EditOutcome::Cancelled => panic!("expected Apply"),
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditOutcome {
    /// Rename the templates named in the edits.
    Apply(Edits),
    /// Abort the run without touching the filesystem.
    Cancelled,
}

/// A source of user edits.
///
/// Implementations are shown the inferred templates (with the number of files
/// each one matched) and return, per template they want renamed, the parsed
/// user key. Templates left out of the returned [`Edits`] are not renamed.
///
/// The call is blocking: the whole answer comes back at once.
///
/// # Examples
///
/// ```rust
/// use seqname::key::UserKey;
/// use seqname::plan::Edits;
/// use seqname::template::Templates;
/// use seqname::types::{EditOutcome, EditSource};
///
/// /// Prefix every template with `old_`.
/// struct Prefixer;
///
/// impl EditSource for Prefixer {
///     fn collect(&mut self, templates: &Templates) -> eyre::Result<EditOutcome> {
///         let mut edits = Edits::new();
///         for key in templates.keys() {
///             if let Some(user) = UserKey::parse(&format!("old_{key}")) {
///                 edits.insert(key.clone(), user);
///             }
///         }
///         Ok(EditOutcome::Apply(edits))
///     }
/// }
///
/// let outcome = Prefixer.collect(&Templates::new()).unwrap();
/// assert_eq!(outcome, EditOutcome::Apply(Edits::new()));
/// ```
pub trait EditSource {
    /// Ask for edits to `templates`.
    fn collect(&mut self, templates: &Templates) -> Result<EditOutcome>;
}

/// An [`EditSource`] backed by a fixed table of exchange text to new text.
///
/// Each entry maps the exchange text of a template (as printed by
/// `seqname scan`) to the text it should be rewritten to. On disk this is a
/// JSON object:
///
/// ```json
/// { "ep/a/.mp4": "episode_/a/.mp4" }
/// ```
///
/// Blank replacements, replacements that select a slot the template does not
/// have, and entries matching no template are skipped with a warning.
#[derive(Debug, Clone, Default)]
pub struct FileEdits {
    /// Exchange text of a template to its replacement.
    entries: IndexMap<String, String>,
}

impl FileEdits {
    /// Create a `FileEdits` from `(template, replacement)` pairs.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use seqname::template::{ScanOptions, infer_templates};
    /// use seqname::types::{EditOutcome, EditSource, FileEdits};
    ///
    /// let names = ["ep1.mp4", "ep2.mp4", "ep3.mp4", "ep4.mp4"];
    /// let templates = infer_templates(names, &ScanOptions::default()).unwrap();
    ///
    /// let mut src = FileEdits::new([("ep/a/.mp4", "episode_/a/.mp4")]);
    /// match src.collect(&templates).unwrap() {
    ///     EditOutcome::Apply(edits) => assert_eq!(edits.len(), 1),
    ///     EditOutcome::Cancelled => panic!("file edits never cancel"),
    /// }
    /// ```
    pub fn new<I, K, V>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            entries: entries
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    /// Read a JSON object of edits from `path`.
    pub fn from_path(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)?;
        let entries: IndexMap<String, String> = serde_json::from_str(&raw)?;
        tracing::debug!(path = %path.display(), entries = entries.len(), "loaded edits");
        Ok(Self { entries })
    }
}

impl EditSource for FileEdits {
    fn collect(&mut self, templates: &Templates) -> Result<EditOutcome> {
        let mut edits = Edits::new();
        let mut matched = 0;

        for key in templates.keys() {
            let exchange = match key.to_exchange() {
                Ok(text) => text,
                Err(e) => {
                    tracing::warn!(template = %key, "cannot be edited: {e}");
                    continue;
                }
            };
            let Some(replacement) = self.entries.get(&exchange) else {
                continue;
            };
            matched += 1;

            let Some(user) = UserKey::parse(replacement) else {
                tracing::debug!(template = %exchange, "blank replacement; skipping");
                continue;
            };
            if let Err(e) = check_selection(key, &user) {
                tracing::warn!(template = %exchange, "ignoring edit: {e}");
                continue;
            }
            edits.insert(key.clone(), user);
        }

        if matched < self.entries.len() {
            for text in self.entries.keys() {
                if !templates.keys().any(|k| k.to_string() == *text) {
                    tracing::warn!(template = %text, "edit matches no template");
                }
            }
        }

        Ok(EditOutcome::Apply(edits))
    }
}
