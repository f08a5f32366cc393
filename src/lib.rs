//! Core library for the casefile command interpreter.
//!
//! The parsing pipeline turns a raw input line into a typed [`Command`]
//! or a [`ParseError`]; the registry side executes commands against the
//! in-memory case store.

mod coerce;
mod command;
mod dateformat;
mod error;
mod flags;
mod parser;
mod registry;
mod settings;
mod ui;
mod validate;

pub use coerce::{DATE_FLAG, FlagValue, NUMERIC_FLAGS, TypedFlagMap, convert_flag_value_types};
pub use command::{Command, ListingMode, SettingType};
pub use dateformat::{compile_pattern, format_date, is_valid_pattern, parse_date};
pub use error::{MAX_VALUE_LENGTH, ParseError};
pub use flags::{FlagMap, extract_flag_values};
pub use parser::parse_input;
pub use registry::{Case, CaseRegistry, CaseStatus, ExecutionError};
pub use settings::{DEFAULT_DATE_FORMAT, Settings};
pub use ui::{FAREWELL, GREETING, SessionReply, run_command};
pub use validate::{has_all_required_flags, has_only_valid_flags, is_valid_case_id};
