use std::path::PathBuf;

use thiserror::Error;

/// Why a single URL variant could not be used.
///
/// These never abort a run: the prober records the last one it saw and
/// falls back to the next variant.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProbeFailure {
    #[error("403 Forbidden")]
    Forbidden,

    #[error("SSL Error")]
    Tls,

    #[error("Connection Error")]
    Connection,

    #[error("Timeout")]
    Timeout,

    #[error("HTTP Error {0}")]
    HttpStatus(u16),

    #[error("{0}")]
    Request(String),

    #[error("Unknown")]
    Unknown,
}

impl ProbeFailure {
    /// Longest reason kept for otherwise unclassified request failures.
    pub const MAX_REASON_CHARS: usize = 50;

    pub fn request(reason: impl AsRef<str>) -> Self {
        ProbeFailure::Request(reason.as_ref().chars().take(Self::MAX_REASON_CHARS).collect())
    }
}

/// Fatal errors that stop a scan before any output is produced.
#[derive(Error, Debug)]
pub enum ScanError {
    #[error("Empty or invalid CSV file: {}", path.display())]
    EmptyInput { path: PathBuf },

    #[error("Failed to read CSV file {}", path.display())]
    ReadInput {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("Failed to write CSV file {}", path.display())]
    WriteOutput {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("Failed to build HTTP client: {0}")]
    HttpClient(#[from] reqwest::Error),
}

pub type Result<T> = std::result::Result<T, ScanError>;
