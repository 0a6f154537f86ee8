use crate::consts::DEFAULT_MIN_GROUP_SIZE;
use crate::error::TemplateError;
use crate::fold::fold_constants;
use crate::key::TemplateKey;
use crate::name::tokenize;
use indexmap::IndexMap;
use serde::Serialize;

/// The numeric tokens of one file, aligned with its key's slots.
pub type Values = Vec<String>;

/// Tuning for template inference.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScanOptions {
    /// Smallest number of files that must share a skeleton to form a template.
    pub min_group_size: usize,
}

impl Default for ScanOptions {
    fn default() -> Self {
        Self {
            min_group_size: DEFAULT_MIN_GROUP_SIZE,
        }
    }
}

/// Template keys mapped to the value tuples of the files they matched.
///
/// Keys keep the order in which they were first seen, and the tuples under a
/// key keep discovery order. Every tuple under a key has exactly
/// `key.slots()` values.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Templates {
    groups: IndexMap<TemplateKey, Vec<Values>>,
}

impl Templates {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a map from existing groups, checking every tuple's length.
    pub fn from_groups<I>(groups: I) -> Result<Self, TemplateError>
    where
        I: IntoIterator<Item = (TemplateKey, Vec<Values>)>,
    {
        let mut templates = Self::new();
        for (key, values) in groups {
            for v in &values {
                check_len(&key, v)?;
            }
            templates.groups.entry(key).or_default().extend(values);
        }
        Ok(templates)
    }

    pub(crate) fn from_map(groups: IndexMap<TemplateKey, Vec<Values>>) -> Self {
        Self { groups }
    }

    pub(crate) fn into_groups(self) -> IndexMap<TemplateKey, Vec<Values>> {
        self.groups
    }

    pub fn get(&self, key: &TemplateKey) -> Option<&[Values]> {
        self.groups.get(key).map(Vec::as_slice)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&TemplateKey, &[Values])> {
        self.groups.iter().map(|(k, v)| (k, v.as_slice()))
    }

    pub fn keys(&self) -> impl Iterator<Item = &TemplateKey> {
        self.groups.keys()
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Total number of files across all templates.
    pub fn file_count(&self) -> usize {
        self.groups.values().map(Vec::len).sum()
    }

    /// One serializable row per template, in map order.
    pub fn summaries(&self) -> Vec<TemplateSummary> {
        self.groups
            .iter()
            .map(|(key, values)| TemplateSummary {
                template: key.to_string(),
                segments: key.segments().to_vec(),
                files: values.len(),
                values: values.clone(),
            })
            .collect()
    }
}

/// A template as reported by `seqname scan --json`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TemplateSummary {
    pub template: String,
    pub segments: Vec<String>,
    pub files: usize,
    pub values: Vec<Values>,
}

pub(crate) fn check_len(key: &TemplateKey, values: &[String]) -> Result<(), TemplateError> {
    if values.len() != key.slots() {
        return Err(TemplateError::Inconsistent {
            key: key.to_string(),
            expected: key.slots(),
            found: values.len(),
        });
    }
    Ok(())
}

/// Group filenames by skeleton and keep the groups large enough to count as
/// templates. Names without an extension are skipped with a warning.
pub fn aggregate<I, S>(filenames: I, options: &ScanOptions) -> Templates
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut grouped: IndexMap<TemplateKey, Vec<Values>> = IndexMap::new();
    for filename in filenames {
        let filename = filename.as_ref();
        match tokenize(filename) {
            Ok((key, values)) => grouped.entry(key).or_default().push(values),
            Err(e) => tracing::warn!(filename, "skipping: {e}"),
        }
    }

    let groups = grouped
        .into_iter()
        .filter(|(key, values)| {
            let keep = values.len() >= options.min_group_size;
            if !keep {
                tracing::debug!(template = %key, files = values.len(), "dropping small group");
            }
            keep
        })
        .collect();
    Templates::from_map(groups)
}

/// Aggregate `filenames` and fold constant slots into the template text.
pub fn infer_templates<I, S>(
    filenames: I,
    options: &ScanOptions,
) -> Result<Templates, TemplateError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let templates = aggregate(filenames, options);
    tracing::debug!(templates = templates.len(), "aggregated filenames");
    fold_constants(templates)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(parts: &[&str]) -> TemplateKey {
        TemplateKey::new(parts.iter().map(|s| s.to_string()).collect())
    }

    fn vals(parts: &[&str]) -> Values {
        parts.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn groups_of_four_survive() {
        let names = ["ep1.mp4", "ep2.mp4", "ep3.mp4", "ep4.mp4"];
        let templates = aggregate(names, &ScanOptions::default());
        assert_eq!(templates.len(), 1);
        assert_eq!(
            templates.get(&key(&["ep", ".mp4"])).unwrap(),
            &[vals(&["1"]), vals(&["2"]), vals(&["3"]), vals(&["4"])]
        );
    }

    #[test]
    fn groups_of_three_are_dropped() {
        let names = ["ep1.mp4", "ep2.mp4", "ep3.mp4", "a1.txt", "a2.txt"];
        let templates = aggregate(names, &ScanOptions::default());
        assert!(templates.is_empty());
    }

    #[test]
    fn discovery_order_is_kept() {
        let names = ["ep10.mp4", "ep2.mp4", "ep1.mp4", "ep33.mp4"];
        let templates = aggregate(names, &ScanOptions::default());
        let values = templates.get(&key(&["ep", ".mp4"])).unwrap();
        assert_eq!(
            values,
            &[vals(&["10"]), vals(&["2"]), vals(&["1"]), vals(&["33"])]
        );
    }

    #[test]
    fn malformed_names_are_skipped() {
        let names = ["README", "x1.a", "x2.a", "x3.a", "x4.a", "LICENSE"];
        let templates = aggregate(names, &ScanOptions::default());
        assert_eq!(templates.file_count(), 4);
    }

    #[test]
    fn min_group_size_is_configurable() {
        let names = ["a1.txt", "a2.txt"];
        let templates = aggregate(names, &ScanOptions { min_group_size: 2 });
        assert_eq!(templates.len(), 1);
    }

    #[test]
    fn from_groups_rejects_ragged_tuples() {
        let err = Templates::from_groups([(key(&["a", "b", ".c"]), vec![vals(&["1"])])])
            .unwrap_err();
        assert_eq!(
            err,
            TemplateError::Inconsistent {
                key: "a/a/b/b/.c".to_string(),
                expected: 2,
                found: 1
            }
        );
    }

    #[test]
    fn summaries_report_counts() {
        let names = ["s1e1.mkv", "s1e2.mkv", "s1e3.mkv", "s1e4.mkv"];
        let summaries = aggregate(names, &ScanOptions::default()).summaries();
        assert_eq!(summaries.len(), 1);
        assert_eq!(summaries[0].template, "s/a/e/b/.mkv");
        assert_eq!(summaries[0].files, 4);
    }
}
