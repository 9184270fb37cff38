//! Errors that can occur while loading, fetching or rendering holidays.

use std::path::PathBuf;
use thiserror::Error;

/// Result type used throughout the library
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    /// The local cache file does not exist yet
    #[error("holiday cache `{}` not found", .0.display())]
    CacheMissing(PathBuf),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("download failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The server answered, but not with a success status
    #[error("download failed with HTTP status {0}")]
    HttpStatus(u16),

    #[error("month `{0}` should be between 1 and 12")]
    InvalidMonth(u32),

    #[error("year {year} and month {month} cannot be made into a valid date")]
    InvalidDate { year: i32, month: u32 },

    #[error("configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
