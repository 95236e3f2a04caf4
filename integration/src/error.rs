//! Error types used by the harness.

use std::{io, path::PathBuf};

use thiserror::Error;

use crate::resim::Label;

/// Raised when simulator output does not carry the identifiers we expect.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExtractionError {
    /// No `<label>: <token>` entry was present in the output.
    #[error("`{label}` not found in simulator output:\n{output}")]
    PatternNotFound { label: Label, output: String },

    #[error("expected {expected} `{label}` entries in simulator output, found {found}")]
    UnexpectedMatchCount {
        label: Label,
        expected: usize,
        found: usize,
    },
}

#[derive(Debug, Error)]
pub enum HarnessError {
    /// The shell could not be spawned for a simulator command.
    #[error("failed to run `{command}`")]
    Command {
        command: String,
        #[source]
        source: io::Error,
    },

    #[error(transparent)]
    Extraction(#[from] ExtractionError),

    #[error("failed to write manifest {}", path.display())]
    WriteManifest {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("unable to read config file {}", path.display())]
    ReadConfig {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to parse config file {}", path.display())]
    ParseConfig {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("invalid harness configuration: {0}")]
    InvalidConfig(String),
}

pub type HarnessResult<T> = Result<T, HarnessError>;
