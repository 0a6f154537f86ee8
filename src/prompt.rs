use dialoguer::theme::ColorfulTheme;
use dialoguer::{Confirm, Input};
use eyre::Result;
use seqname::key::UserKey;
use seqname::plan::{Edits, check_selection};
use seqname::template::Templates;
use seqname::types::{EditOutcome, EditSource};

/// Asks for a new template per group on the terminal.
pub struct Prompt {
    confirm: bool,
}

impl Prompt {
    pub fn new(confirm: bool) -> Self {
        Self { confirm }
    }
}

impl EditSource for Prompt {
    fn collect(&mut self, templates: &Templates) -> Result<EditOutcome> {
        let theme = ColorfulTheme::default();
        let count = templates.len();
        println!(
            "Found {count} template{}:",
            if count > 1 { "s" } else { "" }
        );
        println!("Edit each template, or clear it to leave those files alone.");

        let mut edits = Edits::new();
        for (key, values) in templates.iter() {
            let exchange = match key.to_exchange() {
                Ok(text) => text,
                Err(e) => {
                    tracing::warn!(template = %key, "cannot be edited: {e}");
                    continue;
                }
            };
            let validated = key.clone();
            let answer: String = Input::with_theme(&theme)
                .with_prompt(format!("{exchange}  ({} files)", values.len()))
                .with_initial_text(exchange.clone())
                .allow_empty(true)
                .validate_with(move |input: &String| -> Result<(), String> {
                    match UserKey::parse(input) {
                        Some(user) => check_selection(&validated, &user).map_err(|e| e.to_string()),
                        None => Ok(()),
                    }
                })
                .interact_text()?;

            if let Some(user) = UserKey::parse(&answer) {
                edits.insert(key.clone(), user);
            }
        }

        if self.confirm
            && !Confirm::with_theme(&theme)
                .with_prompt("Apply renames?")
                .default(true)
                .interact()?
        {
            return Ok(EditOutcome::Cancelled);
        }
        Ok(EditOutcome::Apply(edits))
    }
}
