//! Error types for tag generation.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum TagError {
    #[error("invalid fields: {0}")]
    InvalidFields(String),

    #[error("no file specified")]
    NoInput,

    #[error("cannot read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("could not write output {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("parse error: {path}:{line}: {reason}")]
    Decode {
        path: PathBuf,
        line: usize,
        reason: String,
    },

    #[error("could not determine absolute path: {0}")]
    BasePath(#[source] std::io::Error),

    #[error("cannot walk {path}: {reason}")]
    Walk { path: PathBuf, reason: String },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl TagError {
    /// Process exit code for this error.
    ///
    /// Operator mistakes (bad flags, missing input) exit with 2 so scripts
    /// can tell them apart from runtime failures.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::InvalidFields(_) | Self::NoInput => 2,
            _ => 1,
        }
    }

    /// Whether the usage text should follow the message.
    pub fn wants_usage(&self) -> bool {
        matches!(self, Self::InvalidFields(_) | Self::NoInput | Self::Walk { .. })
    }
}

pub type TagResult<T> = Result<T, TagError>;
