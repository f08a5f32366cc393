//! Typed commands produced by the parser, ready for execution.

use std::fmt;

use chrono::NaiveDate;

use crate::coerce::TypedFlagMap;

/// Which cases a `list` command should show.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListingMode {
    /// No `--status` flag given; currently the same set as `All`.
    Default,
    OpenOnly,
    ClosedOnly,
    All,
}

impl fmt::Display for ListingMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ListingMode::Default => write!(f, "default"),
            ListingMode::OpenOnly => write!(f, "open"),
            ListingMode::ClosedOnly => write!(f, "closed"),
            ListingMode::All => write!(f, "all"),
        }
    }
}

/// A configurable setting addressed by the `setting` command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettingType {
    InputDateFormat,
    OutputDateFormat,
}

impl SettingType {
    /// Map a `--type` value to a setting, case-insensitively.
    pub fn parse(value: &str) -> Option<Self> {
        match value.to_lowercase().as_str() {
            "input_date_format" => Some(SettingType::InputDateFormat),
            "output_date_format" => Some(SettingType::OutputDateFormat),
            _ => None,
        }
    }
}

impl fmt::Display for SettingType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SettingType::InputDateFormat => write!(f, "input_date_format"),
            SettingType::OutputDateFormat => write!(f, "output_date_format"),
        }
    }
}

/// The validated result of parsing one input line.
///
/// Each variant carries only the fields its execution needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    List {
        mode: ListingMode,
        verbose: bool,
    },
    Add {
        category: String,
        title: String,
        date: NaiveDate,
        info: String,
        victim: Option<String>,
        officer: Option<String>,
    },
    /// `edit <id> --flag value ...`: apply typed field updates.
    Edit {
        case_id: String,
        updates: TypedFlagMap,
    },
    /// `edit <id>` with no flags: show which fields can be edited.
    EditPrompt {
        case_id: String,
    },
    Close {
        case_id: String,
    },
    Open {
        case_id: String,
    },
    Delete {
        case_id: String,
    },
    Read {
        case_id: String,
    },
    Find {
        keyword: String,
    },
    Setting {
        setting_type: SettingType,
        value: String,
    },
    Help,
    Bye,
}
