use crate::error::TemplateError;
use crate::key::{TemplateKey, UserKey};
use crate::name::build_name;
use crate::template::{Templates, check_len};
use indexmap::IndexMap;
use serde::Serialize;

/// The user's rewrites, keyed by the template they apply to. Templates with
/// no entry are left alone.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Edits {
    edits: IndexMap<TemplateKey, UserKey>,
}

impl Edits {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, template: TemplateKey, user: UserKey) -> Option<UserKey> {
        self.edits.insert(template, user)
    }

    pub fn get(&self, template: &TemplateKey) -> Option<&UserKey> {
        self.edits.get(template)
    }

    pub fn len(&self) -> usize {
        self.edits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.edits.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&TemplateKey, &UserKey)> {
        self.edits.iter()
    }
}

/// Check that every slot `user` selects exists in `template`.
pub fn check_selection(template: &TemplateKey, user: &UserKey) -> Result<(), TemplateError> {
    if let Some(&index) = user.selection().iter().find(|&&i| i >= template.slots()) {
        return Err(TemplateError::SlotOutOfRange {
            key: template.to_string(),
            index,
            slots: template.slots(),
        });
    }
    Ok(())
}

/// A single planned rename inside the scanned directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Rename {
    pub from: String,
    pub to: String,
}

/// Old filename to new filename, in template order then discovery order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenamePlan {
    renames: IndexMap<String, String>,
}

impl RenamePlan {
    pub fn get(&self, from: &str) -> Option<&str> {
        self.renames.get(from).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.renames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.renames.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.renames.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn to_renames(&self) -> Vec<Rename> {
        self.iter()
            .map(|(from, to)| Rename {
                from: from.to_string(),
                to: to.to_string(),
            })
            .collect()
    }
}

/// Rebuild every file's current name and its name under the user's template.
pub fn build_plan(templates: &Templates, edits: &Edits) -> Result<RenamePlan, TemplateError> {
    let mut renames = IndexMap::new();
    for (template, groups) in templates.iter() {
        let Some(user) = edits.get(template) else {
            tracing::debug!(template = %template, "no edit; leaving files alone");
            continue;
        };
        check_selection(template, user)?;

        for values in groups {
            check_len(template, values)?;
            let selected: Vec<String> = user
                .selection()
                .iter()
                .map(|&i| values[i].clone())
                .collect();
            let from = build_name(template, values);
            let to = build_name(user.key(), &selected);
            tracing::trace!(%from, %to, "planned");
            renames.insert(from, to);
        }
    }
    Ok(RenamePlan { renames })
}
