use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Invalid CSV File: {0}")]
    InvalidTable(#[from] TableError),

    #[error("Invalid image file {path}: {source}")]
    InvalidImage {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("Failed to write weight grid to {path}: {source}")]
    GridWrite {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("Failed to write chart to {path}: {source}")]
    ChartWrite {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error(transparent)]
    Core(#[from] comfig::Error),
}

impl AppError {
    /// Errors caused by the chosen source file rather than by the run itself.
    pub fn is_invalid_source(&self) -> bool {
        matches!(self, AppError::InvalidTable(_) | AppError::InvalidImage { .. })
    }

    /// Headline shown to the operator before exiting.
    pub fn user_message(&self) -> &'static str {
        match self {
            AppError::InvalidTable(_) => "Invalid CSV File",
            AppError::InvalidImage { .. } => "Invalid image file",
            _ => "An error has occurred trying to run the program...",
        }
    }
}

#[derive(Error, Debug)]
pub enum TableError {
    #[error("{0}")]
    Read(#[from] csv::Error),

    #[error("line {line}, column {column}: `{value}` is not a number")]
    NotANumber {
        line: u64,
        column: usize,
        value: String,
    },

    #[error("the table has no cells")]
    Empty,
}
