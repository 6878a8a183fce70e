use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Fatal errors raised while reading inputs or writing the frequency table.
#[derive(Debug, Error)]
pub enum Error {
    #[error("file {} not found", .0.display())]
    FileNotFound(PathBuf),

    #[error("could not read {origin}: {source}")]
    Read {
        origin: String,
        #[source]
        source: io::Error,
    },

    #[error("could not write {origin}: {source}")]
    Write {
        origin: String,
        #[source]
        source: io::Error,
    },

    #[error("delimited data error in {origin}: {source}")]
    Csv {
        origin: String,
        #[source]
        source: csv::Error,
    },

    /// A non-blank population map line without both a sample and a label.
    #[error("{origin} line {line}: expected a sample name and a population label")]
    MalformedAssignment { origin: String, line: u64 },

    #[error("sequence identifier {0} appears more than once")]
    DuplicateSample(String),

    #[error("sample {0} is assigned to a population more than once")]
    DuplicateAssignment(String),

    #[error("missing required input: {0}")]
    MissingRequiredInput(&'static str),
}

pub type Result<T> = std::result::Result<T, Error>;
