use regex::Regex;
use std::sync::LazyLock;

/// Matches one numeric token: an integer, optionally followed by `.` and more digits.
/// ASCII digits only.
pub static NUMERIC_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[0-9]+(?:\.[0-9]+)?").unwrap());

/// Matches either an escaped character (`\x`) or a slot marker like `/a/` in exchange text.
pub static EXCHANGE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)\\(.)|/([a-z])/").unwrap());

/// Groups with fewer files than this are not considered templated.
pub const DEFAULT_MIN_GROUP_SIZE: usize = 4;

/// Slot letters run from `a` to `z`.
pub const MAX_SLOTS: usize = 26;
