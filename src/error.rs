//! Parse failure taxonomy for the command interpreter.
//!
//! Every way a raw input line can be rejected maps to exactly one variant
//! here. The message is the `Display` impl; the optional tip and example
//! strings are data on the variant, rendered by the read-loop.

use thiserror::Error;

/// A rejected parse attempt. Terminal for the current input line.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("You entered an empty command.")]
    EmptyCommand,

    #[error("The character '|' is not allowed in commands.")]
    IllegalCharacter,

    #[error("The command '{keyword}' is not recognised.")]
    UnknownCommand { line: String, keyword: String },

    #[error("A flag is malformed or missing its value.")]
    IncorrectFlag,

    #[error("The same flag appears more than once.")]
    DuplicateFlag,

    #[error("A flag value exceeds the 5000 character limit.")]
    InputLengthExceeded,

    #[error("The date could not be read with the configured date format.")]
    InvalidDateInput,

    #[error("The value for '--{flag}' must be a non-negative whole number.")]
    InvalidInteger { flag: String },

    #[error("The case ID is missing or the format is incorrect.")]
    InvalidCaseId,

    #[error("The value is not a valid date format string.")]
    InvalidFormatString,

    #[error("The list command only accepts --status and --mode flags.")]
    InvalidListCommand,

    #[error("The add command is missing required details.")]
    InvalidAddCommand,

    #[error("The case ID is missing or the format is incorrect.")]
    InvalidEditCommand,

    #[error("The close command needs a case ID.")]
    InvalidCloseCommand,

    #[error("The open command needs a case ID.")]
    InvalidOpenCommand,

    #[error("The delete command needs a valid case ID.")]
    InvalidDeleteCommand,

    #[error("The read command needs a valid case ID.")]
    InvalidReadCommand,

    #[error("The find command needs a search keyword.")]
    InvalidFindCommand,

    #[error("{}", setting_message(.unknown_type))]
    InvalidSettingCommand { unknown_type: bool },

    #[error("The help command does not take any arguments.")]
    InvalidHelpCommand,

    #[error("The bye command does not take any arguments.")]
    InvalidByeCommand,
}

/// Maximum length accepted for a single flag value, in characters.
pub const MAX_VALUE_LENGTH: usize = 5000;

fn setting_message(unknown_type: &bool) -> &'static str {
    if *unknown_type {
        "The setting type is not recognised."
    } else {
        "The setting command needs --type and --value flags."
    }
}

impl ParseError {
    /// A short hint on how to fix the input, where one exists.
    pub fn tip(&self) -> Option<&'static str> {
        match self {
            ParseError::EmptyCommand => Some("Type 'help' to see the available commands."),
            ParseError::IllegalCharacter => {
                Some("Remove the '|' character and try again.")
            }
            ParseError::UnknownCommand { .. } => {
                Some("Type 'help' to see the available commands.")
            }
            ParseError::IncorrectFlag => {
                Some("Flags are written as '--name value'. Use '\\--' for a literal '--'.")
            }
            ParseError::DuplicateFlag => Some("Each flag may be given at most once."),
            ParseError::InputLengthExceeded => Some("Shorten the flag value and try again."),
            ParseError::InvalidDateInput => {
                Some("Enter the date in the configured format (default dd-MM-yyyy).")
            }
            ParseError::InvalidInteger { .. } => Some("Use digits only, with no sign."),
            ParseError::InvalidCaseId
            | ParseError::InvalidEditCommand
            | ParseError::InvalidCloseCommand
            | ParseError::InvalidOpenCommand
            | ParseError::InvalidDeleteCommand
            | ParseError::InvalidReadCommand => {
                Some("Case IDs are exactly 6 characters of 0-9 or A-F.")
            }
            ParseError::InvalidFormatString => {
                Some("Date formats combine dd, MM and yyyy with '-', '/', '.' or spaces.")
            }
            ParseError::InvalidListCommand => {
                Some("--status takes open, closed or all; --mode takes verbose or summary.")
            }
            ParseError::InvalidAddCommand => {
                Some("Provide --category, --title, --date and --info; --victim and --officer are optional.")
            }
            ParseError::InvalidFindCommand => Some("Provide a search term with --keyword."),
            ParseError::InvalidSettingCommand { unknown_type } => {
                if *unknown_type {
                    Some("Known types are input_date_format and output_date_format.")
                } else {
                    Some("Provide both --type and --value, and nothing else.")
                }
            }
            ParseError::InvalidHelpCommand | ParseError::InvalidByeCommand => None,
        }
    }

    /// An example invocation for the command the user was attempting.
    pub fn example(&self) -> Option<&'static str> {
        match self {
            ParseError::InvalidListCommand => {
                Some("For example, try: \"list --status open --mode verbose\"")
            }
            ParseError::InvalidAddCommand | ParseError::InvalidDateInput => Some(
                "For example, try: \"add --category Robbery --title Mall robbery \
                 --date 10-10-2025 --info Armed suspect\"",
            ),
            ParseError::InvalidEditCommand | ParseError::InvalidCaseId => {
                Some("For example, try: \"edit 000001\" or \"edit 000001 --title New title\"")
            }
            ParseError::InvalidCloseCommand => Some("For example, try: \"close 000001\""),
            ParseError::InvalidOpenCommand => Some("For example, try: \"open 000001\""),
            ParseError::InvalidDeleteCommand => Some("For example, try: \"delete 000001\""),
            ParseError::InvalidReadCommand => Some("For example, try: \"read 000001\""),
            ParseError::InvalidFindCommand => Some("For example, try: \"find --keyword theft\""),
            ParseError::InvalidSettingCommand { .. } | ParseError::InvalidFormatString => {
                Some("For example, try: \"setting --type input_date_format --value dd-MM-yyyy\"")
            }
            _ => None,
        }
    }
}
