// settings.rs
use crate::error::{BroError, BroResult};
use std::env;
use std::path::{Path, PathBuf};

pub const RAW_DIR_NAME: &str = "raw";
pub const OUTPUT_DIR_NAME: &str = "output";
pub const OUTPUT_FILE_NAME: &str = "joined_query.sql";

/// Where datasets are read from and where the finished query lands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub raw_dir: PathBuf,
    pub output_file: PathBuf,
}

impl Settings {
    pub fn from_base_dir(base_dir: &Path) -> Self {
        Settings {
            raw_dir: base_dir.join(RAW_DIR_NAME),
            output_file: base_dir.join(OUTPUT_DIR_NAME).join(OUTPUT_FILE_NAME),
        }
    }

    pub fn from_current_dir() -> BroResult<Self> {
        let base_dir = env::current_dir().map_err(BroError::WorkingDirectory)?;
        Ok(Self::from_base_dir(&base_dir))
    }
}
