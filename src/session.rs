// session.rs
use crate::dataset_loader::{collect_datasets, prompt_dataset_count};
use crate::error::{BroError, BroResult};
use crate::settings::Settings;
use crate::sql_joiner::build_joins;
use crate::sql_select::build_select;
use crate::user_interaction::Prompter;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::info;

/// Runs every prompt, start to finish, and returns the finished statement.
/// Nothing touches the disk except reading the datasets.
pub fn build_query(prompter: &mut dyn Prompter, settings: &Settings) -> BroResult<String> {
    let count = prompt_dataset_count(prompter)?;
    let datasets = collect_datasets(prompter, &settings.raw_dir, count)?;

    let lineup: Vec<&str> = datasets.iter().map(|dataset| dataset.prefix()).collect();
    prompter.print_insight(&format!("Tables lined up: {}", lineup.join(", ")));

    let select_sql = build_select(prompter, &datasets)?;
    prompter.print_insight(&select_sql);

    if datasets.len() < 2 {
        return Ok(select_sql);
    }

    let joined_sql = build_joins(prompter, &datasets, &select_sql)?;
    prompter.print_insight(&joined_sql);
    Ok(joined_sql)
}

/// Overwrites `output_file` with `sql`, making its directory if needed.
pub fn write_query(output_file: &Path, sql: &str) -> BroResult<()> {
    let output_error = |source: io::Error| BroError::Output {
        path: output_file.to_path_buf(),
        source,
    };

    if let Some(output_dir) = output_file.parent() {
        fs::create_dir_all(output_dir).map_err(output_error)?;
    }
    fs::write(output_file, sql).map_err(output_error)?;

    info!(path = %output_file.display(), bytes = sql.len(), "query written");
    Ok(())
}

/// The whole ride: prompts first, then a single write at the very end.
pub fn run(prompter: &mut dyn Prompter, settings: &Settings) -> BroResult<PathBuf> {
    let sql = build_query(prompter, settings)?;
    write_query(&settings.output_file, &sql)?;
    prompter.print_insight(&format!("SQL saved to {}", settings.output_file.display()));
    Ok(settings.output_file.clone())
}
