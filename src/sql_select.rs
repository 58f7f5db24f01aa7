// sql_select.rs
use crate::column_validator::{validate_selection, ColumnSelection};
use crate::dataset_loader::DatasetCollection;
use crate::error::{BroError, BroResult};
use crate::user_interaction::{prompt_until, Prompter};
use std::fmt;
use tracing::debug;

pub const DISTINCT_PROMPT: &str = "Do you want DISTINCT values? (y/n) [default n]: ";
pub const COLUMNS_PROMPT: &str =
    "Enter columns to select separated by commas (or leave blank for all): ";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectClause {
    pub distinct: bool,
    pub columns: ColumnSelection,
    pub table: String,
}

impl fmt::Display for SelectClause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let distinct = if self.distinct { "DISTINCT " } else { "" };
        write!(f, "SELECT {}{} FROM {};", distinct, self.columns, self.table)
    }
}

/// Only a lone "y" (any case) buys DISTINCT; everything else is a no.
pub fn wants_distinct(answer: &str) -> bool {
    answer.trim().eq_ignore_ascii_case("y")
}

/// Walks the user through a SELECT over the base table and hands back the
/// statement, semicolon included.
pub fn build_select(prompter: &mut dyn Prompter, datasets: &DatasetCollection) -> BroResult<String> {
    let base = datasets.base().ok_or(BroError::NoDatasets)?;

    prompter.print_insight(&format!(
        "Now we will build a basic SQL SELECT statement from the FIRST dataset you input ({})...",
        base.prefix()
    ));

    let distinct = wants_distinct(&prompter.ask(DISTINCT_PROMPT)?);
    if distinct {
        prompter.print_insight("The first column name you input will appear after DISTINCT.");
    }

    let columns = prompt_until(prompter, COLUMNS_PROMPT, |_, answer| {
        let selection = ColumnSelection::parse(answer);
        validate_selection(base, &selection).map(|()| selection)
    })?;

    let clause = SelectClause {
        distinct,
        columns,
        table: base.prefix().to_string(),
    };
    debug!(clause = %clause, "select clause built");
    Ok(clause.to_string())
}
