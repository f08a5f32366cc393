//! In-memory case registry and the execution side of commands.
//!
//! The parser hands over typed commands; this module owns the case
//! records and applies the changes. Parsing and execution failures are
//! deliberately separate error types.

use chrono::NaiveDate;
use thiserror::Error;
use tracing::debug;

use crate::coerce::{FlagValue, NUMERIC_FLAGS, TypedFlagMap};
use crate::command::ListingMode;

/// Fields every case carries and accepts through `edit`.
pub const BASE_EDITABLE_FIELDS: &[&str] =
    &["category", "title", "date", "info", "victim", "officer"];

/// Whether a case is still being worked on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaseStatus {
    Open,
    Closed,
}

impl std::fmt::Display for CaseStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CaseStatus::Open => write!(f, "Open"),
            CaseStatus::Closed => write!(f, "Closed"),
        }
    }
}

/// A single case record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Case {
    pub id: String,
    pub category: String,
    pub title: String,
    pub date: NaiveDate,
    pub info: String,
    pub victim: Option<String>,
    pub officer: Option<String>,
    pub status: CaseStatus,
    /// Category-specific numeric details, e.g. `speed-limit`.
    pub extras: TypedFlagMap,
}

/// A command that parsed cleanly but cannot be applied to the registry.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ExecutionError {
    #[error("No case found with ID {0}.")]
    CaseNotFound(String),
    #[error("Case {0} is already closed.")]
    CaseAlreadyClosed(String),
    #[error("Case {0} is already open.")]
    CaseAlreadyOpen(String),
    #[error("Case {0} is closed and cannot be edited. Reopen it first.")]
    CaseCannotBeEdited(String),
    #[error("'{0}' is not a field that can be edited.")]
    UnknownEditField(String),
}

/// Owns the case records for one session.
#[derive(Debug, Default)]
pub struct CaseRegistry {
    cases: Vec<Case>,
    next_id: u32,
}

impl CaseRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a new open case and hand back its record.
    pub fn add_case(
        &mut self,
        category: String,
        title: String,
        date: NaiveDate,
        info: String,
        victim: Option<String>,
        officer: Option<String>,
    ) -> &Case {
        let id = format!("{:06X}", self.next_id);
        self.next_id += 1;
        debug!(%id, "registering case");
        let index = self.cases.len();
        self.cases.push(Case {
            id,
            category,
            title,
            date,
            info,
            victim,
            officer,
            status: CaseStatus::Open,
            extras: TypedFlagMap::new(),
        });
        &self.cases[index]
    }

    /// Cases visible under the given listing mode, in insertion order.
    pub fn list(&self, mode: ListingMode) -> Vec<&Case> {
        self.cases
            .iter()
            .filter(|case| match mode {
                ListingMode::Default | ListingMode::All => true,
                ListingMode::OpenOnly => case.status == CaseStatus::Open,
                ListingMode::ClosedOnly => case.status == CaseStatus::Closed,
            })
            .collect()
    }

    pub fn read_case(&self, case_id: &str) -> Result<&Case, ExecutionError> {
        let id = normalize_id(case_id);
        self.cases
            .iter()
            .find(|case| case.id == id)
            .ok_or(ExecutionError::CaseNotFound(id))
    }

    pub fn close_case(&mut self, case_id: &str) -> Result<&Case, ExecutionError> {
        let case = self.case_mut(case_id)?;
        if case.status == CaseStatus::Closed {
            return Err(ExecutionError::CaseAlreadyClosed(case.id.clone()));
        }
        case.status = CaseStatus::Closed;
        Ok(case)
    }

    pub fn open_case(&mut self, case_id: &str) -> Result<&Case, ExecutionError> {
        let case = self.case_mut(case_id)?;
        if case.status == CaseStatus::Open {
            return Err(ExecutionError::CaseAlreadyOpen(case.id.clone()));
        }
        case.status = CaseStatus::Open;
        Ok(case)
    }

    /// Remove a case, returning the deleted record.
    pub fn delete_case(&mut self, case_id: &str) -> Result<Case, ExecutionError> {
        let id = normalize_id(case_id);
        let index = self
            .cases
            .iter()
            .position(|case| case.id == id)
            .ok_or(ExecutionError::CaseNotFound(id))?;
        Ok(self.cases.remove(index))
    }

    /// Cases whose title or info contains the keyword, case-insensitively.
    pub fn find(&self, keyword: &str) -> Vec<&Case> {
        let needle = keyword.to_lowercase();
        self.cases
            .iter()
            .filter(|case| {
                case.title.to_lowercase().contains(&needle)
                    || case.info.to_lowercase().contains(&needle)
            })
            .collect()
    }

    /// Apply typed field updates to a case. Closed cases must be
    /// reopened before they accept edits.
    ///
    /// All field names are checked before anything is written, so a bad
    /// update leaves the case untouched.
    pub fn edit_case(
        &mut self,
        case_id: &str,
        updates: &TypedFlagMap,
    ) -> Result<&Case, ExecutionError> {
        for field in updates.keys() {
            if !BASE_EDITABLE_FIELDS.contains(&field.as_str())
                && !NUMERIC_FLAGS.contains(&field.as_str())
            {
                return Err(ExecutionError::UnknownEditField(field.clone()));
            }
        }

        let case = self.case_mut(case_id)?;
        if case.status == CaseStatus::Closed {
            return Err(ExecutionError::CaseCannotBeEdited(case.id.clone()));
        }
        for (field, value) in updates {
            match (field.as_str(), value) {
                ("category", FlagValue::Text(text)) => case.category = text.clone(),
                ("title", FlagValue::Text(text)) => case.title = text.clone(),
                ("info", FlagValue::Text(text)) => case.info = text.clone(),
                ("victim", FlagValue::Text(text)) => case.victim = Some(text.clone()),
                ("officer", FlagValue::Text(text)) => case.officer = Some(text.clone()),
                ("date", FlagValue::Date(date)) => case.date = *date,
                (name, value) if NUMERIC_FLAGS.contains(&name) => {
                    case.extras.insert(name.to_string(), value.clone());
                }
                (name, _) => return Err(ExecutionError::UnknownEditField(name.to_string())),
            }
        }
        debug!(id = %case.id, count = updates.len(), "case edited");
        Ok(case)
    }

    /// Field names `edit` accepts for the given case. Closed cases
    /// report the same error as an attempted edit.
    pub fn editable_fields(&self, case_id: &str) -> Result<Vec<&'static str>, ExecutionError> {
        let case = self.read_case(case_id)?;
        if case.status == CaseStatus::Closed {
            return Err(ExecutionError::CaseCannotBeEdited(case.id.clone()));
        }
        let mut fields: Vec<&'static str> = BASE_EDITABLE_FIELDS.to_vec();
        fields.extend_from_slice(NUMERIC_FLAGS);
        Ok(fields)
    }

    pub fn len(&self) -> usize {
        self.cases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cases.is_empty()
    }

    fn case_mut(&mut self, case_id: &str) -> Result<&mut Case, ExecutionError> {
        let id = normalize_id(case_id);
        self.cases
            .iter_mut()
            .find(|case| case.id == id)
            .ok_or(ExecutionError::CaseNotFound(id))
    }
}

// IDs are stored uppercase; input may use either case.
fn normalize_id(case_id: &str) -> String {
    case_id.to_ascii_uppercase()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn sample_registry() -> CaseRegistry {
        let mut registry = CaseRegistry::new();
        registry.add_case(
            "Robbery".to_string(),
            "Mall robbery".to_string(),
            NaiveDate::from_ymd_opt(2025, 10, 10).unwrap(),
            "Armed suspect".to_string(),
            Some("Alice".to_string()),
            Some("Tan".to_string()),
        );
        registry.add_case(
            "Speeding".to_string(),
            "Highway speeding".to_string(),
            NaiveDate::from_ymd_opt(2025, 9, 1).unwrap(),
            "Exceeded limit".to_string(),
            None,
            None,
        );
        registry
    }

    #[test]
    fn ids_are_sequential_hex() {
        let registry = sample_registry();
        let ids: Vec<&str> = registry
            .list(ListingMode::All)
            .iter()
            .map(|case| case.id.as_str())
            .collect();
        assert_eq!(ids, vec!["000000", "000001"]);
    }

    #[test]
    fn listing_filters_by_status() {
        let mut registry = sample_registry();
        registry.close_case("000000").unwrap();
        assert_eq!(registry.list(ListingMode::OpenOnly).len(), 1);
        assert_eq!(registry.list(ListingMode::ClosedOnly).len(), 1);
        assert_eq!(registry.list(ListingMode::All).len(), 2);
        assert_eq!(registry.list(ListingMode::Default).len(), 2);
    }

    #[test]
    fn close_twice_is_an_error_and_open_reverses_it() {
        let mut registry = sample_registry();
        registry.close_case("000000").unwrap();
        assert_eq!(
            registry.close_case("000000"),
            Err(ExecutionError::CaseAlreadyClosed("000000".to_string()))
        );
        registry.open_case("000000").unwrap();
        assert_eq!(
            registry.open_case("000000"),
            Err(ExecutionError::CaseAlreadyOpen("000000".to_string()))
        );
    }

    #[test]
    fn lookups_accept_lowercase_ids() {
        let mut registry = CaseRegistry::new();
        for _ in 0..11 {
            registry.add_case(
                "Theft".to_string(),
                "t".to_string(),
                NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
                "i".to_string(),
                None,
                None,
            );
        }
        // Case 10 has ID 00000A.
        assert!(registry.read_case("00000a").is_ok());
        assert!(registry.close_case("00000a").is_ok());
    }

    #[test]
    fn missing_case_reports_not_found() {
        let registry = sample_registry();
        assert_eq!(
            registry.read_case("FFFFFF"),
            Err(ExecutionError::CaseNotFound("FFFFFF".to_string()))
        );
    }

    #[test]
    fn delete_removes_the_record() {
        let mut registry = sample_registry();
        let deleted = registry.delete_case("000000").unwrap();
        assert_eq!(deleted.title, "Mall robbery");
        assert_eq!(registry.len(), 1);
        assert_eq!(
            registry.delete_case("000000"),
            Err(ExecutionError::CaseNotFound("000000".to_string()))
        );
    }

    #[test]
    fn find_matches_title_and_info_case_insensitively() {
        let registry = sample_registry();
        assert_eq!(registry.find("ROBBERY").len(), 1);
        assert_eq!(registry.find("limit").len(), 1);
        assert_eq!(registry.find("nothing").len(), 0);
    }

    #[test]
    fn edit_applies_typed_updates() {
        let mut registry = sample_registry();
        let mut updates = TypedFlagMap::new();
        updates.insert("title".to_string(), FlagValue::Text("New title".to_string()));
        updates.insert(
            "date".to_string(),
            FlagValue::Date(NaiveDate::from_ymd_opt(2025, 12, 31).unwrap()),
        );
        updates.insert("speed-limit".to_string(), FlagValue::Count(90));

        let case = registry.edit_case("000001", &updates).unwrap();
        assert_eq!(case.title, "New title");
        assert_eq!(case.date, NaiveDate::from_ymd_opt(2025, 12, 31).unwrap());
        assert_eq!(case.extras.get("speed-limit"), Some(&FlagValue::Count(90)));
    }

    #[test]
    fn edit_rejects_unknown_fields_without_touching_the_case() {
        let mut registry = sample_registry();
        let mut updates = TypedFlagMap::new();
        updates.insert("title".to_string(), FlagValue::Text("New title".to_string()));
        updates.insert("suspect".to_string(), FlagValue::Text("Bob".to_string()));

        assert_eq!(
            registry.edit_case("000000", &updates),
            Err(ExecutionError::UnknownEditField("suspect".to_string()))
        );
        assert_eq!(registry.read_case("000000").unwrap().title, "Mall robbery");
    }

    #[test]
    fn closed_case_rejects_edits_until_reopened() {
        let mut registry = sample_registry();
        registry.close_case("000000").unwrap();

        let mut updates = TypedFlagMap::new();
        updates.insert("title".to_string(), FlagValue::Text("New title".to_string()));

        assert_eq!(
            registry.edit_case("000000", &updates),
            Err(ExecutionError::CaseCannotBeEdited("000000".to_string()))
        );
        assert_eq!(
            registry.editable_fields("000000"),
            Err(ExecutionError::CaseCannotBeEdited("000000".to_string()))
        );
        assert_eq!(registry.read_case("000000").unwrap().title, "Mall robbery");

        registry.open_case("000000").unwrap();
        let case = registry.edit_case("000000", &updates).unwrap();
        assert_eq!(case.title, "New title");
        assert!(registry.editable_fields("000000").is_ok());
    }

    #[test]
    fn editable_fields_cover_base_and_numeric_names() {
        let registry = sample_registry();
        let fields = registry.editable_fields("000000").unwrap();
        assert!(fields.contains(&"title"));
        assert!(fields.contains(&"speed-limit"));
        assert_eq!(
            registry.editable_fields("FFFFFF"),
            Err(ExecutionError::CaseNotFound("FFFFFF".to_string()))
        );
    }
}
