//! Typed coercion of raw flag values.
//!
//! Which flags carry dates or numbers is fixed by flag name; everything
//! else passes through as text. The table lives here as data so adding a
//! typed flag is one entry, not a new branch.

use std::collections::BTreeMap;
use std::fmt;

use chrono::NaiveDate;
use tracing::warn;

use crate::dateformat;
use crate::error::ParseError;
use crate::flags::FlagMap;

/// Flags whose values must be non-negative integers.
pub const NUMERIC_FLAGS: &[&str] = &[
    "exceeded-speed",
    "financial-value",
    "monetary-damage",
    "number-of-casualties",
    "number-of-victims",
    "speed-limit",
];

/// The flag name carrying a date value.
pub const DATE_FLAG: &str = "date";

/// A flag value after coercion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FlagValue {
    Text(String),
    Date(NaiveDate),
    Count(i64),
}

impl fmt::Display for FlagValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FlagValue::Text(text) => write!(f, "{text}"),
            FlagValue::Date(date) => write!(f, "{date}"),
            FlagValue::Count(count) => write!(f, "{count}"),
        }
    }
}

/// Flag names mapped to their coerced values.
pub type TypedFlagMap = BTreeMap<String, FlagValue>;

/// Convert every raw flag value to its required type.
///
/// Stops at the first value that does not convert: a bad date fails with
/// [`ParseError::InvalidDateInput`], a bad or negative number with
/// [`ParseError::InvalidInteger`] naming the flag.
pub fn convert_flag_value_types(
    raw_values: &FlagMap,
    date_format: &str,
) -> Result<TypedFlagMap, ParseError> {
    let mut typed_values = TypedFlagMap::new();
    for (flag, value) in raw_values {
        let typed = if flag == DATE_FLAG {
            let date = dateformat::parse_date(value, date_format).inspect_err(|_| {
                warn!(%value, "failed to parse date value");
            })?;
            FlagValue::Date(date)
        } else if NUMERIC_FLAGS.contains(&flag.as_str()) {
            let count: i64 = value.parse().map_err(|_| {
                warn!(%flag, %value, "failed to parse integer value");
                ParseError::InvalidInteger { flag: flag.clone() }
            })?;
            if count < 0 {
                warn!(%flag, count, "negative value for numeric flag");
                return Err(ParseError::InvalidInteger { flag: flag.clone() });
            }
            FlagValue::Count(count)
        } else {
            FlagValue::Text(value.clone())
        };
        typed_values.insert(flag.clone(), typed);
    }
    Ok(typed_values)
}
