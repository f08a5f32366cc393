//! Date-format patterns in the `dd-MM-yyyy` style.
//!
//! Users configure dates with pattern tokens rather than chrono
//! specifiers; patterns are compiled to a chrono format string before
//! parsing or printing.

use chrono::NaiveDate;

use crate::error::ParseError;

/// Pattern tokens and their chrono equivalents.
const PATTERN_TOKENS: &[(&str, &str)] = &[("dd", "%d"), ("MM", "%m"), ("yyyy", "%Y")];

/// Literal characters allowed between tokens.
const PATTERN_SEPARATORS: &[char] = &['-', '/', '.', ' '];

/// Compile a user-facing pattern to a chrono format string.
///
/// Returns `None` unless the pattern consists solely of known tokens and
/// separators and mentions day, month and year at least once each.
pub fn compile_pattern(pattern: &str) -> Option<String> {
    let mut compiled = String::new();
    let mut rest = pattern;
    let mut seen = [false; 3];

    'scan: while !rest.is_empty() {
        for (position, (token, spec)) in PATTERN_TOKENS.iter().enumerate() {
            if rest.starts_with(token) {
                seen[position] = true;
                compiled.push_str(spec);
                rest = &rest[token.len()..];
                continue 'scan;
            }
        }
        let ch = rest.chars().next()?;
        if !PATTERN_SEPARATORS.contains(&ch) {
            return None;
        }
        compiled.push(ch);
        rest = &rest[ch.len_utf8()..];
    }

    seen.iter().all(|&s| s).then_some(compiled)
}

/// True iff the string is a usable date-format pattern.
pub fn is_valid_pattern(pattern: &str) -> bool {
    compile_pattern(pattern).is_some()
}

/// Parse a date value using the configured pattern.
pub fn parse_date(value: &str, pattern: &str) -> Result<NaiveDate, ParseError> {
    let format = compile_pattern(pattern).ok_or(ParseError::InvalidDateInput)?;
    NaiveDate::parse_from_str(value, &format).map_err(|_| ParseError::InvalidDateInput)
}

/// Render a date using the configured pattern, falling back to ISO when
/// the pattern does not compile.
pub fn format_date(date: NaiveDate, pattern: &str) -> String {
    match compile_pattern(pattern) {
        Some(format) => date.format(&format).to_string(),
        None => date.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn default_pattern_round_trips() {
        let date = parse_date("10-10-2025", "dd-MM-yyyy").unwrap();
        assert_eq!(date, NaiveDate::from_ymd_opt(2025, 10, 10).unwrap());
        assert_eq!(format_date(date, "dd-MM-yyyy"), "10-10-2025");
    }

    #[test]
    fn alternative_separators_are_supported() {
        let date = parse_date("2025/01/31", "yyyy/MM/dd").unwrap();
        assert_eq!(date, NaiveDate::from_ymd_opt(2025, 1, 31).unwrap());
    }

    #[test]
    fn out_of_pattern_input_is_rejected() {
        assert_eq!(
            parse_date("2025-10-10", "dd-MM-yyyy"),
            Err(ParseError::InvalidDateInput)
        );
        assert_eq!(
            parse_date("not a date", "dd-MM-yyyy"),
            Err(ParseError::InvalidDateInput)
        );
    }

    #[test]
    fn impossible_dates_are_rejected() {
        assert_eq!(
            parse_date("31-02-2025", "dd-MM-yyyy"),
            Err(ParseError::InvalidDateInput)
        );
    }

    #[test]
    fn pattern_validation_requires_all_three_fields() {
        assert!(is_valid_pattern("dd-MM-yyyy"));
        assert!(is_valid_pattern("yyyy.MM.dd"));
        assert!(is_valid_pattern("dd MM yyyy"));
        assert!(!is_valid_pattern("dd-MM"));
        assert!(!is_valid_pattern("dd-MM-yy"));
        assert!(!is_valid_pattern("banana"));
        assert!(!is_valid_pattern(""));
    }
}
