//! Display-name validation and case folding.
//!
//! Names are compared case-insensitively but displayed exactly as claimed.
//! Callers keep the original string and use [`fold_name`] only to derive a
//! comparison key.

use crate::error::NameError;

/// Default maximum display-name length in characters.
pub const DEFAULT_NAME_MAX_LEN: usize = 32;

/// Derive the case-insensitive comparison key for a display name.
pub fn fold_name(name: &str) -> String {
    name.to_lowercase()
}

/// Compare two display names case-insensitively.
pub fn names_eq(a: &str, b: &str) -> bool {
    a == b || fold_name(a) == fold_name(b)
}

/// Check that a display name can be claimed.
///
/// A valid name is non-empty, at most `max_len` characters, and free of
/// whitespace and control characters (it must survive being one token of a
/// space-separated line).
pub fn validate_name(name: &str, max_len: usize) -> Result<(), NameError> {
    if name.trim().is_empty() {
        return Err(NameError::Empty);
    }

    if let Some(ch) = name.chars().find(|c| c.is_whitespace() || c.is_control()) {
        return Err(NameError::IllegalChar(ch));
    }

    let len = name.chars().count();
    if len > max_len {
        return Err(NameError::TooLong {
            actual: len,
            limit: max_len,
        });
    }

    Ok(())
}
