// column_validator.rs
use crate::dataset_loader::Dataset;
use fuzzywuzzy::fuzz;
use std::fmt;

/// Anything scoring above this is worth a "did you mean".
const SUGGESTION_THRESHOLD: u8 = 60;

/// What goes between SELECT and FROM.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ColumnSelection {
    All,
    Columns(Vec<String>),
}

impl ColumnSelection {
    /// Blank input means every column; otherwise split on commas and trim
    /// each entry. Blank entries stay in so they get reported.
    pub fn parse(input: &str) -> Self {
        let input = input.trim();
        if input.is_empty() {
            return ColumnSelection::All;
        }
        ColumnSelection::Columns(input.split(',').map(|entry| entry.trim().to_string()).collect())
    }
}

impl fmt::Display for ColumnSelection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ColumnSelection::All => write!(f, "*"),
            ColumnSelection::Columns(columns) => write!(f, "{}", columns.join(", ")),
        }
    }
}

/// Requested names that `dataset` doesn't have, in request order.
pub fn missing_columns<'a>(dataset: &Dataset, candidates: &'a [String]) -> Vec<&'a str> {
    candidates
        .iter()
        .map(String::as_str)
        .filter(|candidate| !dataset.has_column(candidate))
        .collect()
}

/// Closest real column to `candidate`, if anything is close enough.
pub fn suggest_column<'a>(dataset: &'a Dataset, candidate: &str) -> Option<&'a str> {
    if candidate.is_empty() {
        return None;
    }
    let candidate = candidate.to_lowercase();

    dataset
        .columns()
        .iter()
        .map(|column| (column, fuzz::ratio(&candidate, &column.to_lowercase())))
        .filter(|&(_, score)| score > SUGGESTION_THRESHOLD)
        .max_by_key(|&(_, score)| score)
        .map(|(column, _)| column.as_str())
}

/// "Did you mean" lines for whichever of `missing` have a near miss.
pub fn suggestions(dataset: &Dataset, missing: &[&str]) -> Vec<String> {
    missing
        .iter()
        .filter_map(|candidate| {
            suggest_column(dataset, candidate)
                .map(|column| format!("Did you mean '{}' instead of '{}'?", column, candidate))
        })
        .collect()
}

/// Checks a select list against `dataset`. The complaint names every bad
/// column, with hints tacked on.
pub fn validate_selection(dataset: &Dataset, selection: &ColumnSelection) -> Result<(), String> {
    let ColumnSelection::Columns(columns) = selection else {
        return Ok(());
    };

    let missing = missing_columns(dataset, columns);
    if missing.is_empty() {
        return Ok(());
    }

    let listed: Vec<String> = missing
        .iter()
        .map(|name| if name.is_empty() { "''".to_string() } else { name.to_string() })
        .collect();

    let mut complaint = format!(
        "The following columns do not exist in {}: {}. Please try again.",
        dataset.prefix(),
        listed.join(", ")
    );
    for hint in suggestions(dataset, &missing) {
        complaint.push(' ');
        complaint.push_str(&hint);
    }
    Err(complaint)
}

/// Checks a single join column against `dataset`.
pub fn validate_column(dataset: &Dataset, column: &str) -> Result<(), String> {
    if dataset.has_column(column) {
        return Ok(());
    }

    let mut complaint = format!("Column '{}' not in {}. Try again.", column, dataset.prefix());
    if let Some(close) = suggest_column(dataset, column) {
        complaint.push_str(&format!(" Did you mean '{}'?", close));
    }
    Err(complaint)
}
