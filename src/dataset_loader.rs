// dataset_loader.rs
use crate::error::{BroError, BroResult};
use crate::user_interaction::{prompt_until, Prompter};
use csv::ReaderBuilder;
use std::io;
use std::num::IntErrorKind;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

pub const COUNT_PROMPT: &str = "How many datasets do you need to aggregate into a single table? ";

/// A CSV file boiled down to what a query needs: its name and its headers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dataset {
    prefix: String,
    columns: Vec<String>,
    row_count: usize,
}

impl Dataset {
    pub fn new<S: Into<String>>(prefix: S, columns: Vec<String>, row_count: usize) -> Self {
        Dataset {
            prefix: prefix.into(),
            columns,
            row_count,
        }
    }

    /// File stem and SQL table name, both at once.
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn row_count(&self) -> usize {
        self.row_count
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.columns.iter().any(|column| column == name)
    }
}

/// Loaded datasets in the order the user typed them. The first one is the
/// base table: it feeds the FROM clause and sits left of every join.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DatasetCollection {
    datasets: Vec<Dataset>,
}

impl DatasetCollection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends `dataset`; a prefix that's already taken is refused and the
    /// collection stays as it was.
    pub fn insert(&mut self, dataset: Dataset) -> BroResult<()> {
        if self.contains(dataset.prefix()) {
            return Err(BroError::DuplicatePrefix(dataset.prefix));
        }
        self.datasets.push(dataset);
        Ok(())
    }

    pub fn contains(&self, prefix: &str) -> bool {
        self.iter().any(|dataset| dataset.prefix() == prefix)
    }

    pub fn base(&self) -> Option<&Dataset> {
        self.datasets.first()
    }

    /// Everything after the base table, in insertion order.
    pub fn joined(&self) -> &[Dataset] {
        self.datasets.get(1..).unwrap_or(&[])
    }

    pub fn iter(&self) -> impl Iterator<Item = &Dataset> {
        self.datasets.iter()
    }

    pub fn len(&self) -> usize {
        self.datasets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.datasets.is_empty()
    }
}

pub fn dataset_path(raw_dir: &Path, prefix: &str) -> PathBuf {
    raw_dir.join(format!("{}.csv", prefix))
}

/// Reads `<raw_dir>/<prefix>.csv`, keeping the header row and a row count.
/// Only the header has to be well formed; short, long or non-UTF-8 rows
/// still count.
pub fn load_dataset(raw_dir: &Path, prefix: &str) -> BroResult<Dataset> {
    let path = dataset_path(raw_dir, prefix);

    let unreadable = |source: csv::Error| {
        let missing = matches!(
            source.kind(),
            csv::ErrorKind::Io(err) if err.kind() == io::ErrorKind::NotFound
        );
        if missing {
            BroError::DatasetNotFound { path: path.clone() }
        } else {
            BroError::DatasetUnreadable {
                path: path.clone(),
                source,
            }
        }
    };

    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_path(&path)
        .map_err(unreadable)?;

    let columns: Vec<String> = reader
        .headers()
        .map_err(unreadable)?
        .iter()
        .map(String::from)
        .collect();

    if columns.is_empty() {
        return Err(BroError::EmptyDataset { path: path.clone() });
    }

    let mut row_count = 0;
    for record in reader.byte_records() {
        record.map_err(unreadable)?;
        row_count += 1;
    }

    debug!(path = %path.display(), row_count, columns = columns.len(), "dataset loaded");
    Ok(Dataset::new(prefix, columns, row_count))
}

const TOO_MANY: &str = "Whoa, that's more datasets than this machine can count.";
const NOT_POSITIVE: &str = "Need at least 1 dataset to build a query. Please enter a positive integer.";

/// Parses an answer to the count prompt. Zero and negatives are turned away
/// here so there is always a base table to build on.
pub fn parse_dataset_count(answer: &str) -> Result<usize, String> {
    match answer.trim().parse::<i64>() {
        Ok(count) if count >= 1 => usize::try_from(count).map_err(|_| TOO_MANY.to_string()),
        Ok(_) => Err(NOT_POSITIVE.to_string()),
        Err(err) => match err.kind() {
            IntErrorKind::PosOverflow => Err(TOO_MANY.to_string()),
            IntErrorKind::NegOverflow => Err(NOT_POSITIVE.to_string()),
            _ => Err("Invalid input. Please enter a valid integer.".to_string()),
        },
    }
}

pub fn prompt_dataset_count(prompter: &mut dyn Prompter) -> BroResult<usize> {
    let count = prompt_until(prompter, COUNT_PROMPT, |_, answer| parse_dataset_count(answer))?;
    prompter.print_insight(&format!("OK. Preparing script for {} datasets...", count));
    Ok(count)
}

pub fn prefix_prompt(slot: usize) -> String {
    format!("Enter CSV prefix for dataset {}: ", slot)
}

/// Fills `count` slots, one dataset each. A slot keeps asking until its
/// file loads.
pub fn collect_datasets(
    prompter: &mut dyn Prompter,
    raw_dir: &Path,
    count: usize,
) -> BroResult<DatasetCollection> {
    let mut datasets = DatasetCollection::new();

    for slot in 1..=count {
        let dataset = prompt_until(prompter, &prefix_prompt(slot), |prompter, answer| {
            let prefix = answer.trim();
            if prefix.is_empty() {
                return Err("A blank prefix won't find a file. Try again.".to_string());
            }
            if datasets.contains(prefix) {
                return Err(BroError::DuplicatePrefix(prefix.to_string()).to_string());
            }

            prompter.print_insight(&format!(
                "Loading: {}",
                dataset_path(raw_dir, prefix).display()
            ));
            load_dataset(raw_dir, prefix).map_err(|err| err.to_string())
        })?;

        info!(prefix = dataset.prefix(), slot, "dataset registered");
        prompter.print_insight(&format!(
            "Got {} rows across {} columns in '{}':",
            dataset.row_count(),
            dataset.columns().len(),
            dataset.prefix()
        ));
        prompter.print_list(dataset.columns());

        datasets.insert(dataset)?;
    }

    Ok(datasets)
}
