//! CLI error type.

use std::path::PathBuf;

use ngs360_lib::error::{ParamError, TableError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CliError {
    #[error("cannot read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("invalid rows file: {0}")]
    Json(#[from] serde_json::Error),
    #[error("rows file must hold a JSON array of objects")]
    NotAnArray,
    #[error("invalid filter '{0}', expected COLUMN=VALUE")]
    FilterSyntax(String),
    #[error(transparent)]
    Params(#[from] ParamError),
    #[error(transparent)]
    Table(#[from] TableError),
}
