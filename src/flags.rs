//! Flag tokenization for command remainders.
//!
//! A remainder such as `--title A --info B` is split into `(flag, value)`
//! pairs. `\--` escapes a literal `--` inside a value so it is not taken
//! as a flag boundary.

use std::collections::BTreeMap;

use tracing::warn;

use crate::error::{MAX_VALUE_LENGTH, ParseError};

/// Flag names mapped to their raw string values, in deterministic order.
pub type FlagMap = BTreeMap<String, String>;

const FLAG_PREFIX: &str = "--";

// Stand-in for escaped `--` sequences while splitting. The NUL framing
// cannot collide with anything typed at a console.
const ESCAPED_FLAG_PLACEHOLDER: &str = "\u{0}ESCAPED_DOUBLE_DASH\u{0}";

/// Split a remainder string into flag/value pairs.
///
/// Fails with [`ParseError::IncorrectFlag`] on a flag without a value (or
/// a segment with no flag at all), [`ParseError::InputLengthExceeded`] on
/// an oversized value, and [`ParseError::DuplicateFlag`] on a repeated
/// flag name.
pub fn extract_flag_values(input: &str) -> Result<FlagMap, ParseError> {
    let escaped = input.replace("\\--", ESCAPED_FLAG_PLACEHOLDER);

    let mut flag_values = FlagMap::new();
    for part in split_before_flags(&escaped) {
        // Strip the first `--` occurrence only; a second one in the same
        // segment belongs to the value.
        let stripped = part.replacen(FLAG_PREFIX, "", 1);
        let stripped = stripped.trim();
        if stripped.is_empty() {
            warn!("incorrect flag usage detected");
            return Err(ParseError::IncorrectFlag);
        }

        let Some(space_index) = stripped.find(char::is_whitespace) else {
            // A flag with no value is malformed.
            warn!("incorrect flag usage detected");
            return Err(ParseError::IncorrectFlag);
        };

        let flag = stripped[..space_index].trim().to_string();
        let value = stripped[space_index..]
            .trim()
            .replace(ESCAPED_FLAG_PLACEHOLDER, FLAG_PREFIX);

        if value.chars().count() > MAX_VALUE_LENGTH {
            warn!("input exceeds character limit");
            return Err(ParseError::InputLengthExceeded);
        }

        if flag_values.contains_key(&flag) {
            warn!(%flag, "duplicated flag detected");
            return Err(ParseError::DuplicateFlag);
        }
        flag_values.insert(flag, value);
    }
    Ok(flag_values)
}

/// Split on whitespace runs that are immediately followed by `--`.
///
/// The delimiter stays attached to the following segment, so every
/// segment but possibly the first carries its `--` prefix. An input with
/// no `--` at all comes back as a single segment.
fn split_before_flags(input: &str) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut segment_start = 0;
    let mut chars = input.char_indices().peekable();
    while let Some((index, ch)) = chars.next() {
        if !ch.is_whitespace() {
            continue;
        }
        // Consume the whole whitespace run.
        let mut run_end = index + ch.len_utf8();
        while let Some(&(next_index, next_ch)) = chars.peek() {
            if !next_ch.is_whitespace() {
                break;
            }
            run_end = next_index + next_ch.len_utf8();
            chars.next();
        }
        if input[run_end..].starts_with(FLAG_PREFIX) {
            parts.push(&input[segment_start..index]);
            segment_start = run_end;
        }
    }
    parts.push(&input[segment_start..]);
    parts
}
