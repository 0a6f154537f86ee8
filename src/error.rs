use thiserror::Error;

/// Errors raised while inferring templates or planning renames.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TemplateError {
    /// The filename has no `.` to split an extension off.
    #[error("filename has no extension separator: {name}")]
    MalformedName { name: String },

    /// A value tuple does not fit the slot count of its template key.
    #[error("template {key} expects {expected} value(s) per file, found {found}")]
    Inconsistent {
        key: String,
        expected: usize,
        found: usize,
    },

    /// The key has more slots than there are marker letters.
    #[error("template has {slots} slots, exchange text supports at most 26")]
    TooManySlots { slots: usize },

    /// A user selection points past the end of the original value tuple.
    #[error("slot /{}/ does not exist in template {key} ({slots} slot(s))", slot_letter(.index))]
    SlotOutOfRange {
        key: String,
        index: usize,
        slots: usize,
    },

    /// A user key's slot count disagrees with its selection length.
    #[error("user key {key} has {expected} slot(s) but selects {found} value(s)")]
    SlotCountMismatch {
        key: String,
        expected: usize,
        found: usize,
    },
}

fn slot_letter(index: &usize) -> char {
    u8::try_from(*index)
        .ok()
        .filter(|i| *i < 26)
        .map_or('?', |i| char::from(b'a' + i))
}
