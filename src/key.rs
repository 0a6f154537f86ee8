use crate::consts::{EXCHANGE_RE, MAX_SLOTS};
use crate::error::TemplateError;
use std::fmt;

/// The literal skeleton shared by a group of filenames.
///
/// A key with `n` variable slots holds `n + 1` literal segments; a filename is
/// rebuilt by interleaving the segments with one value per slot. The last
/// segment carries the extension.
///
/// # Examples
///
/// ```rust
/// use seqname::key::TemplateKey;
///
/// let key = TemplateKey::new(vec!["img_".into(), "_".into(), ".png".into()]);
/// assert_eq!(key.slots(), 2);
/// assert_eq!(key.to_exchange().unwrap(), "img_/a/_/b/.png");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TemplateKey {
    segments: Vec<String>,
}

impl TemplateKey {
    /// Build a key from its literal segments. An empty list becomes a single
    /// empty segment so the key always has at least one.
    pub fn new(segments: Vec<String>) -> Self {
        if segments.is_empty() {
            return Self {
                segments: vec![String::new()],
            };
        }
        Self { segments }
    }

    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    /// Number of variable slots between the segments.
    pub fn slots(&self) -> usize {
        self.segments.len().saturating_sub(1)
    }

    /// Serialize into exchange text: segments joined by `/a/`, `/b/`, ...
    ///
    /// Literal `/` and `\` inside segments are written as `\/` and `\\` so
    /// that [`UserKey::parse`] reads the same segments back.
    pub fn to_exchange(&self) -> Result<String, TemplateError> {
        if self.slots() > MAX_SLOTS {
            return Err(TemplateError::TooManySlots {
                slots: self.slots(),
            });
        }
        Ok(self.to_string())
    }
}

impl fmt::Display for TemplateKey {
    /// Exchange text, with numbered markers (`/#27/`) past the last letter.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, segment) in self.segments.iter().enumerate() {
            if i > 0 {
                let slot = i - 1;
                match u8::try_from(slot).ok().filter(|s| usize::from(*s) < MAX_SLOTS) {
                    Some(s) => write!(f, "/{}/", char::from(b'a' + s))?,
                    None => write!(f, "/#{}/", slot + 1)?,
                }
            }
            f.write_str(&escape(segment))?;
        }
        Ok(())
    }
}

fn escape(segment: &str) -> String {
    segment.replace('\\', r"\\").replace('/', r"\/")
}

/// A user-edited template: new literal text plus, for each of its slots, the
/// index of the original value that fills it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserKey {
    key: TemplateKey,
    selection: Vec<usize>,
}

impl UserKey {
    /// Pair a key with a slot selection; the selection must name one original
    /// slot per slot of `key`.
    pub fn new(key: TemplateKey, selection: Vec<usize>) -> Result<Self, TemplateError> {
        if key.slots() != selection.len() {
            return Err(TemplateError::SlotCountMismatch {
                key: key.to_string(),
                expected: key.slots(),
                found: selection.len(),
            });
        }
        Ok(Self { key, selection })
    }

    /// Keep the template text and every slot in its original order.
    pub fn identity(key: &TemplateKey) -> Self {
        Self {
            key: key.clone(),
            selection: (0..key.slots()).collect(),
        }
    }

    /// Parse exchange text such as `episode_/a/.mp4`.
    ///
    /// Returns `None` for blank input, which means "leave this template
    /// alone". Every `/x/` marker (lowercase `x`) becomes a slot reading
    /// original value `x - 'a'`; `\` escapes the next character.
    pub fn parse(text: &str) -> Option<Self> {
        let text = text.trim();
        if text.is_empty() {
            return None;
        }

        let mut segments = Vec::new();
        let mut selection = Vec::new();
        let mut current = String::new();
        let mut last = 0;
        for caps in EXCHANGE_RE.captures_iter(text) {
            let Some(whole) = caps.get(0) else { continue };
            current.push_str(&text[last..whole.start()]);
            last = whole.end();
            if let Some(escaped) = caps.get(1) {
                current.push_str(escaped.as_str());
            } else if let Some(letter) = caps.get(2) {
                segments.push(std::mem::take(&mut current));
                selection.push(usize::from(letter.as_str().as_bytes()[0] - b'a'));
            }
        }
        current.push_str(&text[last..]);
        segments.push(current);

        Some(Self {
            key: TemplateKey::new(segments),
            selection,
        })
    }

    pub fn key(&self) -> &TemplateKey {
        &self.key
    }

    pub fn selection(&self) -> &[usize] {
        &self.selection
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(parts: &[&str]) -> TemplateKey {
        TemplateKey::new(parts.iter().map(|s| s.to_string()).collect())
    }

    #[test]
    fn exchange_text_letters_slots_in_order() {
        assert_eq!(key(&["ep", ".mp4"]).to_exchange().unwrap(), "ep/a/.mp4");
        assert_eq!(
            key(&["", "-", "-", ".jpg"]).to_exchange().unwrap(),
            "/a/-/b/-/c/.jpg"
        );
        assert_eq!(key(&["notes.txt"]).to_exchange().unwrap(), "notes.txt");
    }

    #[test]
    fn empty_segment_list_is_one_empty_segment() {
        let key = TemplateKey::new(Vec::new());
        assert_eq!(key.segments(), &[String::new()]);
        assert_eq!(key.slots(), 0);
        assert_eq!(crate::name::build_name(&key, &[]), "");
        assert_eq!(key.to_exchange().unwrap(), "");
    }

    #[test]
    fn too_many_slots_cannot_be_exchanged() {
        let parts = vec![String::from("x"); MAX_SLOTS + 2];
        let err = TemplateKey::new(parts).to_exchange().unwrap_err();
        assert_eq!(err, TemplateError::TooManySlots { slots: 27 });
    }

    #[test]
    fn parse_reads_reordered_and_dropped_slots() {
        let user = UserKey::parse("S/b/E/a/.mkv").unwrap();
        assert_eq!(user.key(), &key(&["S", "E", ".mkv"]));
        assert_eq!(user.selection(), &[1, 0]);

        let user = UserKey::parse("show_/c/.mkv").unwrap();
        assert_eq!(user.key(), &key(&["show_", ".mkv"]));
        assert_eq!(user.selection(), &[2]);
    }

    #[test]
    fn parse_blank_is_none() {
        assert_eq!(UserKey::parse(""), None);
        assert_eq!(UserKey::parse("   "), None);
    }

    #[test]
    fn parse_without_markers_is_a_constant_name() {
        let user = UserKey::parse("cover.jpg").unwrap();
        assert_eq!(user.key(), &key(&["cover.jpg"]));
        assert!(user.selection().is_empty());
    }

    #[test]
    fn uppercase_and_long_markers_stay_literal() {
        let user = UserKey::parse("a/B/ab/.txt").unwrap();
        assert_eq!(user.key(), &key(&["a/B/ab/.txt"]));
    }

    #[test]
    fn escaped_slashes_round_trip() {
        let original = key(&["a/b/", r"c\", ".txt"]);
        let text = original.to_exchange().unwrap();
        assert_eq!(text, r"a\/b\//a/c\\/b/.txt");

        let parsed = UserKey::parse(&text).unwrap();
        assert_eq!(parsed.key(), &original);
        assert_eq!(parsed.selection(), &[0, 1]);
    }

    #[test]
    fn trailing_backslash_is_literal() {
        let user = UserKey::parse(r"name\").unwrap();
        assert_eq!(user.key(), &key(&[r"name\"]));
    }

    #[test]
    fn new_rejects_mismatched_selection() {
        let err = UserKey::new(key(&["a", "b"]), vec![]).unwrap_err();
        assert!(matches!(err, TemplateError::SlotCountMismatch { expected: 1, found: 0, .. }));
    }

    #[test]
    fn identity_keeps_every_slot() {
        let user = UserKey::identity(&key(&["a", "b", "c"]));
        assert_eq!(user.selection(), &[0, 1]);
    }
}
