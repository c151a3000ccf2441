//! Error types for lookups and the scan session.
//!
//! Rejected accessions are **not** errors: they surface as
//! [`crate::session::Outcome::Rejected`]. What lands here is everything that goes wrong
//! after an accession has been accepted.

use thiserror::Error;

use crate::swissprot::ParseError;

/// Result type alias for session-level operations.
pub type Result<T> = std::result::Result<T, Error>;

/// A record provider could not turn an accession into a sequence.
#[derive(Debug, Error)]
pub enum LookupError {
    #[error("no record found for accession {0}")]
    NotFound(String),

    #[error("record service answered HTTP {status} for accession {accession}")]
    Http { status: u16, accession: String },

    #[error("network request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("could not start the request runtime: {0}")]
    Runtime(#[source] std::io::Error),

    #[error("failed to read local records: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed flat-file record: {0}")]
    Parse(#[from] ParseError),

    #[error("malformed FASTA input: {0}")]
    Fastx(String),
}

/// Top-level error for the library.
#[derive(Debug, Error)]
pub enum Error {
    #[error("lookup failed: {0}")]
    Lookup(#[from] LookupError),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("logging setup failed: {0}")]
    Logging(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    pub fn config(msg: impl Into<String>) -> Self { Error::Config(msg.into()) }
}
