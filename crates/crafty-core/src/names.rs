//! Normalization of user-supplied character names and realms.
//!
//! Roster keys are built from names that went through
//! [`normalize_character_name`], so lookups must apply the same rules.

use unicode_normalization::UnicodeNormalization;

/// Characters kept after decomposition, besides ASCII alphanumerics.
const KEPT_PUNCTUATION: &[char] = &['-', '_', '+', '=', '.', '@', '!'];

/// Lower-case `name`, decompose it (NFKD) and drop every character that is
/// not an ASCII letter, digit, or one of `-_+=.@!`.
///
/// Accented letters keep their base letter: `"Tärq"` becomes `"tarq"`.
pub fn normalize_character_name(name: &str) -> String {
    name.to_lowercase()
        .nfkd()
        .filter(|c| c.is_ascii_alphanumeric() || KEPT_PUNCTUATION.contains(c))
        .collect()
}

/// Lower-case and trim a realm slug.
pub fn normalize_realm(realm: &str) -> String {
    realm.trim().to_lowercase()
}
