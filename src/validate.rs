//! Pure validation predicates used by the command parsers.

use crate::flags::FlagMap;

/// True iff every required flag name is present in the map.
pub fn has_all_required_flags(flags: &FlagMap, required: &[&str]) -> bool {
    required.iter().all(|name| flags.contains_key(*name))
}

/// True iff every flag in the map is a member of the allowed set.
pub fn has_only_valid_flags(flags: &FlagMap, allowed: &[&str]) -> bool {
    flags.keys().all(|name| allowed.contains(&name.as_str()))
}

/// True iff the token is a well-formed case identifier: exactly six
/// characters, each a hex digit. Lowercase letters are accepted; IDs are
/// normalised to uppercase at execution time.
pub fn is_valid_case_id(token: &str) -> bool {
    token.len() == 6 && token.chars().all(|ch| ch.is_ascii_hexdigit())
}
