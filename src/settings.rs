//! Session settings consulted by the parser and the output renderer.

use crate::command::SettingType;

/// Date pattern assumed when nothing has been configured.
pub const DEFAULT_DATE_FORMAT: &str = "dd-MM-yyyy";

/// The configurable state of a session. The parser reads the input date
/// format as an immutable snapshot for the duration of one parse call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    input_date_format: String,
    output_date_format: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            input_date_format: DEFAULT_DATE_FORMAT.to_string(),
            output_date_format: DEFAULT_DATE_FORMAT.to_string(),
        }
    }
}

impl Settings {
    /// Pattern expected of dates typed by the user.
    pub fn input_date_format(&self) -> &str {
        &self.input_date_format
    }

    /// Pattern used when printing dates back to the user.
    pub fn output_date_format(&self) -> &str {
        &self.output_date_format
    }

    /// Apply a validated `setting` command.
    pub fn apply(&mut self, setting_type: SettingType, value: String) {
        match setting_type {
            SettingType::InputDateFormat => self.input_date_format = value,
            SettingType::OutputDateFormat => self.output_date_format = value,
        }
    }
}
