pub mod column_validator;
pub mod dataset_loader;
pub mod error;
pub mod session;
pub mod settings;
pub mod sql_joiner;
pub mod sql_select;
pub mod user_interaction;

pub use error::{BroError, BroResult};
