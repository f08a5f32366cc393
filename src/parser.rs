//! The command dispatcher: raw input line in, typed [`Command`] out.
//!
//! Each per-command routine is a hard gate pipeline; the first failing
//! check decides the error, so a line with several defects always
//! reports the same one.

use tracing::{debug, warn};

use crate::coerce::convert_flag_value_types;
use crate::command::{Command, ListingMode, SettingType};
use crate::error::ParseError;
use crate::flags::extract_flag_values;
use crate::settings::Settings;
use crate::validate::{has_all_required_flags, has_only_valid_flags, is_valid_case_id};

const FLAG_PREFIX: &str = "--";

/// Parse one raw input line into a typed command.
///
/// The only setting consulted is the configured input date format,
/// snapshotted for the duration of the call.
pub fn parse_input(user_input: &str, settings: &Settings) -> Result<Command, ParseError> {
    let date_format = settings.input_date_format();
    let cleaned = user_input.trim();
    if cleaned.is_empty() {
        return Err(ParseError::EmptyCommand);
    }

    let (keyword, remainder) = match cleaned.find(char::is_whitespace) {
        Some(index) => (&cleaned[..index], cleaned[index..].trim()),
        None => (cleaned, ""),
    };
    let keyword = keyword.to_lowercase();

    // Reserved for a future pipe feature; rejected for every command.
    if remainder.contains('|') {
        warn!("illegal character '|' in command");
        return Err(ParseError::IllegalCharacter);
    }

    debug!(%keyword, "dispatching command");
    match keyword.as_str() {
        "list" => parse_list_command(remainder),
        "add" => parse_add_command(remainder, date_format),
        "edit" => parse_edit_command(remainder, date_format),
        "close" => parse_close_command(remainder),
        "open" => parse_open_command(remainder),
        "delete" => parse_delete_command(remainder),
        "read" => parse_read_command(remainder),
        "find" => parse_find_command(remainder),
        "setting" => parse_setting_command(remainder),
        "help" => parse_help_command(remainder),
        "bye" => parse_bye_command(remainder),
        _ => Err(ParseError::UnknownCommand {
            line: user_input.to_string(),
            keyword,
        }),
    }
}

/// `list [--status open|closed|all] [--mode verbose|summary]`
fn parse_list_command(remainder: &str) -> Result<Command, ParseError> {
    if remainder.is_empty() {
        return Ok(Command::List {
            mode: ListingMode::Default,
            verbose: false,
        });
    }

    let flags = extract_flag_values(remainder)?;
    if !has_only_valid_flags(&flags, &["status", "mode"]) {
        return Err(ParseError::InvalidListCommand);
    }

    let mode = parse_list_status(flags.get("status").map(String::as_str))?;
    let verbose = parse_list_mode(flags.get("mode").map(String::as_str))?;
    Ok(Command::List { mode, verbose })
}

fn parse_list_status(status: Option<&str>) -> Result<ListingMode, ParseError> {
    let Some(status) = status.filter(|value| !value.is_empty()) else {
        return Ok(ListingMode::Default);
    };
    match status.to_lowercase().as_str() {
        "open" => Ok(ListingMode::OpenOnly),
        "closed" => Ok(ListingMode::ClosedOnly),
        "all" => Ok(ListingMode::All),
        _ => Err(ParseError::InvalidListCommand),
    }
}

fn parse_list_mode(mode: Option<&str>) -> Result<bool, ParseError> {
    let Some(mode) = mode.filter(|value| !value.is_empty()) else {
        return Ok(false);
    };
    match mode.to_lowercase().as_str() {
        "verbose" => Ok(true),
        "summary" => Ok(false),
        _ => Err(ParseError::InvalidListCommand),
    }
}

/// `add --category C --title T --date D --info I [--victim V] [--officer O]`
fn parse_add_command(remainder: &str, date_format: &str) -> Result<Command, ParseError> {
    const REQUIRED_FLAGS: &[&str] = &["category", "title", "date", "info"];
    const VALID_FLAGS: &[&str] = &["category", "title", "date", "info", "victim", "officer"];

    if remainder.is_empty() {
        return Err(ParseError::InvalidAddCommand);
    }

    let mut flags = extract_flag_values(remainder)?;
    if !has_all_required_flags(&flags, REQUIRED_FLAGS) || !has_only_valid_flags(&flags, VALID_FLAGS)
    {
        return Err(ParseError::InvalidAddCommand);
    }

    let date_raw = flags.remove("date").ok_or(ParseError::InvalidAddCommand)?;
    let date = crate::dateformat::parse_date(&date_raw, date_format).inspect_err(|_| {
        warn!("invalid date format detected");
    })?;

    Ok(Command::Add {
        category: flags.remove("category").ok_or(ParseError::InvalidAddCommand)?,
        title: flags.remove("title").ok_or(ParseError::InvalidAddCommand)?,
        date,
        info: flags.remove("info").ok_or(ParseError::InvalidAddCommand)?,
        victim: flags.remove("victim"),
        officer: flags.remove("officer"),
    })
}

/// `edit <id>` prompts with the editable fields; `edit <id> --flag value`
/// carries typed replacements.
fn parse_edit_command(remainder: &str, date_format: &str) -> Result<Command, ParseError> {
    if remainder.is_empty() {
        return Err(ParseError::InvalidEditCommand);
    }

    let Some(space_index) = remainder.find(char::is_whitespace) else {
        // Bare case ID: prompt mode.
        if !is_valid_case_id(remainder) {
            return Err(ParseError::InvalidCaseId);
        }
        return Ok(Command::EditPrompt {
            case_id: remainder.to_string(),
        });
    };

    let case_id = &remainder[..space_index];
    if !is_valid_case_id(case_id) {
        return Err(ParseError::InvalidCaseId);
    }

    let replacements = remainder[space_index..].trim();
    if !replacements.starts_with(FLAG_PREFIX) {
        warn!("incorrect flag usage detected");
        return Err(ParseError::IncorrectFlag);
    }

    let flags = extract_flag_values(replacements)?;
    let updates = convert_flag_value_types(&flags, date_format)?;
    Ok(Command::Edit {
        case_id: case_id.to_string(),
        updates,
    })
}

/// `close <id>`
fn parse_close_command(remainder: &str) -> Result<Command, ParseError> {
    if remainder.is_empty() {
        return Err(ParseError::InvalidCloseCommand);
    }
    if !is_valid_case_id(remainder) {
        return Err(ParseError::InvalidCaseId);
    }
    Ok(Command::Close {
        case_id: remainder.to_string(),
    })
}

/// `open <id>`
fn parse_open_command(remainder: &str) -> Result<Command, ParseError> {
    if remainder.is_empty() {
        return Err(ParseError::InvalidOpenCommand);
    }
    if !is_valid_case_id(remainder) {
        return Err(ParseError::InvalidCaseId);
    }
    Ok(Command::Open {
        case_id: remainder.to_string(),
    })
}

/// `delete <id>` — a missing and a malformed ID are the same mistake here.
fn parse_delete_command(remainder: &str) -> Result<Command, ParseError> {
    if !is_valid_case_id(remainder) {
        return Err(ParseError::InvalidDeleteCommand);
    }
    Ok(Command::Delete {
        case_id: remainder.to_string(),
    })
}

/// `read <id>`
fn parse_read_command(remainder: &str) -> Result<Command, ParseError> {
    if !is_valid_case_id(remainder) {
        return Err(ParseError::InvalidReadCommand);
    }
    Ok(Command::Read {
        case_id: remainder.to_string(),
    })
}

/// `find --keyword <term>`
fn parse_find_command(remainder: &str) -> Result<Command, ParseError> {
    const REQUIRED_FLAGS: &[&str] = &["keyword"];

    if remainder.is_empty() {
        return Err(ParseError::InvalidFindCommand);
    }

    let mut flags = extract_flag_values(remainder)?;
    if !has_all_required_flags(&flags, REQUIRED_FLAGS)
        || !has_only_valid_flags(&flags, REQUIRED_FLAGS)
    {
        return Err(ParseError::InvalidFindCommand);
    }

    Ok(Command::Find {
        keyword: flags.remove("keyword").ok_or(ParseError::InvalidFindCommand)?,
    })
}

/// `setting --type <name> --value <pattern>`
fn parse_setting_command(remainder: &str) -> Result<Command, ParseError> {
    const SETTING_FLAGS: &[&str] = &["type", "value"];

    let malformed = ParseError::InvalidSettingCommand {
        unknown_type: false,
    };

    if remainder.is_empty() {
        return Err(malformed);
    }

    let mut flags = extract_flag_values(remainder)?;
    if !has_all_required_flags(&flags, SETTING_FLAGS) || !has_only_valid_flags(&flags, SETTING_FLAGS)
    {
        return Err(malformed);
    }

    let type_raw = flags.remove("type").ok_or(malformed.clone())?;
    let setting_type =
        SettingType::parse(&type_raw).ok_or(ParseError::InvalidSettingCommand {
            unknown_type: true,
        })?;

    let value = flags.remove("value").ok_or(malformed)?;
    if !crate::dateformat::is_valid_pattern(&value) {
        return Err(ParseError::InvalidFormatString);
    }

    Ok(Command::Setting {
        setting_type,
        value,
    })
}

/// `help` takes no arguments.
fn parse_help_command(remainder: &str) -> Result<Command, ParseError> {
    if !remainder.is_empty() {
        return Err(ParseError::InvalidHelpCommand);
    }
    Ok(Command::Help)
}

/// `bye` takes no arguments.
fn parse_bye_command(remainder: &str) -> Result<Command, ParseError> {
    if !remainder.is_empty() {
        return Err(ParseError::InvalidByeCommand);
    }
    Ok(Command::Bye)
}
