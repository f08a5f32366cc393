//! Turns executed commands into text for the read-loop.

use std::fmt::Write;

use crate::command::{Command, ListingMode};
use crate::dateformat;
use crate::registry::{Case, CaseRegistry, ExecutionError};
use crate::settings::Settings;

/// What the session should print, and whether it should end.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionReply {
    pub text: String,
    pub quit: bool,
}

impl SessionReply {
    fn say<S: Into<String>>(text: S) -> Self {
        Self {
            text: text.into(),
            quit: false,
        }
    }
}

pub const GREETING: &str = "Welcome to Casefile. Type 'help' to see the available commands.";
pub const FAREWELL: &str = "Goodbye. Stay safe out there.";

const HELP_TEXT: &str = "\
Available commands:
  list [--status open|closed|all] [--mode verbose|summary]
  add --category <c> --title <t> --date <d> --info <i> [--victim <v>] [--officer <o>]
  edit <case-id> [--field value ...]
  read <case-id>
  close <case-id>
  open <case-id>
  delete <case-id>
  find --keyword <term>
  setting --type input_date_format|output_date_format --value <pattern>
  help
  bye
Use '\\--' to write a literal '--' inside a value.";

/// Execute one typed command against the registry and settings.
pub fn run_command(
    command: Command,
    registry: &mut CaseRegistry,
    settings: &mut Settings,
) -> Result<SessionReply, ExecutionError> {
    match command {
        Command::List { mode, verbose } => {
            let cases = registry.list(mode);
            Ok(SessionReply::say(render_case_list(&cases, mode, verbose, settings)))
        }
        Command::Add {
            category,
            title,
            date,
            info,
            victim,
            officer,
        } => {
            let case = registry.add_case(category, title, date, info, victim, officer);
            Ok(SessionReply::say(format!(
                "Case {} added: {}",
                case.id, case.title
            )))
        }
        Command::Edit { case_id, updates } => {
            let case = registry.edit_case(&case_id, &updates)?;
            Ok(SessionReply::say(format!(
                "Case {} updated.\n{}",
                case.id,
                render_case(case, settings)
            )))
        }
        Command::EditPrompt { case_id } => {
            let fields = registry.editable_fields(&case_id)?;
            let mut text = format!("Case found. Fields that can be edited:\n  {}", fields.join(", "));
            let _ = write!(
                text,
                "\nUsage: edit {} --<field> <new value>",
                case_id.to_ascii_uppercase()
            );
            Ok(SessionReply::say(text))
        }
        Command::Close { case_id } => {
            let case = registry.close_case(&case_id)?;
            Ok(SessionReply::say(format!("Case {} closed.", case.id)))
        }
        Command::Open { case_id } => {
            let case = registry.open_case(&case_id)?;
            Ok(SessionReply::say(format!("Case {} reopened.", case.id)))
        }
        Command::Delete { case_id } => {
            let case = registry.delete_case(&case_id)?;
            Ok(SessionReply::say(format!(
                "Case {} deleted: {}",
                case.id, case.title
            )))
        }
        Command::Read { case_id } => {
            let case = registry.read_case(&case_id)?;
            Ok(SessionReply::say(render_case(case, settings)))
        }
        Command::Find { keyword } => {
            let matches = registry.find(&keyword);
            if matches.is_empty() {
                return Ok(SessionReply::say(format!(
                    "No cases matching '{keyword}'."
                )));
            }
            let mut text = format!("{} case(s) matching '{}':", matches.len(), keyword);
            for case in matches {
                let _ = write!(text, "\n{}", render_case_line(case, settings));
            }
            Ok(SessionReply::say(text))
        }
        Command::Setting {
            setting_type,
            value,
        } => {
            settings.apply(setting_type, value.clone());
            Ok(SessionReply::say(format!(
                "Setting {setting_type} changed to {value}."
            )))
        }
        Command::Help => Ok(SessionReply::say(HELP_TEXT)),
        Command::Bye => Ok(SessionReply {
            text: FAREWELL.to_string(),
            quit: true,
        }),
    }
}

fn render_case_list(
    cases: &[&Case],
    mode: ListingMode,
    verbose: bool,
    settings: &Settings,
) -> String {
    if cases.is_empty() {
        return match mode {
            ListingMode::Default | ListingMode::All => "No cases recorded.".to_string(),
            ListingMode::OpenOnly => "No open cases.".to_string(),
            ListingMode::ClosedOnly => "No closed cases.".to_string(),
        };
    }
    let mut text = format!("{} case(s):", cases.len());
    for case in cases {
        if verbose {
            let _ = write!(text, "\n{}", render_case(case, settings));
        } else {
            let _ = write!(text, "\n{}", render_case_line(case, settings));
        }
    }
    text
}

/// One-line summary: id, status, category, title, date.
fn render_case_line(case: &Case, settings: &Settings) -> String {
    format!(
        "  {} [{}] {} - {} ({})",
        case.id,
        case.status,
        case.category,
        case.title,
        dateformat::format_date(case.date, settings.output_date_format())
    )
}

/// Full detail block for `read` and verbose listings.
fn render_case(case: &Case, settings: &Settings) -> String {
    let mut text = String::new();
    let _ = writeln!(text, "Case ID:  {}", case.id);
    let _ = writeln!(text, "Status:   {}", case.status);
    let _ = writeln!(text, "Category: {}", case.category);
    let _ = writeln!(text, "Title:    {}", case.title);
    let _ = writeln!(
        text,
        "Date:     {}",
        dateformat::format_date(case.date, settings.output_date_format())
    );
    let _ = write!(text, "Info:     {}", case.info);
    if let Some(victim) = &case.victim {
        let _ = write!(text, "\nVictim:   {victim}");
    }
    if let Some(officer) = &case.officer {
        let _ = write!(text, "\nOfficer:  {officer}");
    }
    for (name, value) in &case.extras {
        let _ = write!(text, "\n{name}: {value}");
    }
    text
}
