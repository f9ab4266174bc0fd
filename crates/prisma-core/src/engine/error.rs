use thiserror::Error;

use crate::core::io::LoadError;
use crate::core::record::EmptyInputError;
use crate::core::schema::SchemaError;

#[derive(Debug, Error)]
pub enum ViewerError {
    #[error("Configuration error: {0}")]
    Configuration(#[from] SchemaError),

    #[error(transparent)]
    EmptyInput(#[from] EmptyInputError),

    #[error(transparent)]
    Load(#[from] LoadError),

    #[error("Filter '{name}' is registered more than once")]
    DuplicateFilter { name: String },

    #[error("No filter named '{name}' is registered")]
    InvalidFilterKey { name: String },
}
