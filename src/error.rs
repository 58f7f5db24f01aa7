// error.rs
use std::io;
use std::path::PathBuf;
use thiserror::Error;

pub type BroResult<T> = Result<T, BroError>;

#[derive(Debug, Error)]
pub enum BroError {
    /// Ctrl-C or EOF while a prompt was waiting.
    #[error("Input closed before the query was finished. Nothing was saved.")]
    InputClosed,

    #[error("Terminal trouble: {0}")]
    Terminal(#[from] rustyline::error::ReadlineError),

    #[error("File not found: {}. Please check the prefix and try again.", path.display())]
    DatasetNotFound { path: PathBuf },

    #[error("Couldn't read {}: {source}", path.display())]
    DatasetUnreadable {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("{} has no header row, so there are no columns to pick from.", path.display())]
    EmptyDataset { path: PathBuf },

    #[error("'{0}' is already loaded. Each dataset needs its own prefix.")]
    DuplicatePrefix(String),

    #[error("No datasets loaded, so there's nothing to SELECT FROM.")]
    NoDatasets,

    #[error("Unable to determine the working directory: {0}")]
    WorkingDirectory(#[source] io::Error),

    #[error("Failed to write {}: {source}", path.display())]
    Output {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}
