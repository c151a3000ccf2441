#![forbid(unsafe_code)]
//! # motifscan
//!
//! Scan a protein for a fixed **six-residue structural motif** and report every
//! occurrence with its **1-based** start/end position.
//!
//! ## Pipeline
//! 1. [`accession`] validates a UniProtKB accession before anything is looked up.
//! 2. A [`provider::RecordProvider`] fetches the sequence and description, either from
//!    the UniProtKB REST API or a local flat file / FASTA.
//! 3. [`detect`] slides the [`motif::MOTIF`] across the sequence (overlapping windows)
//!    and builds a [`detect::ResultSet`] keyed by matched text.
//! 4. A [`report::ReportSink`] renders the result.
//!
//! [`session::Session`] wires steps 1–3 together and keeps no state between runs.
//!
//! ## Examples
//! ```rust
//! let hits = motifscan::find_motifs("MKVLTYFIYKRP");
//! assert_eq!(hits.get("KVLTYF"), Some((2, 8)));
//!
//! assert!(motifscan::accession::is_valid("P12345"));
//! assert!(!motifscan::accession::is_valid("123456"));
//! ```

pub mod accession;
pub mod config;
pub mod detect;
pub mod error;
pub mod logging;
pub mod motif;
pub mod provider;
pub mod report;
pub mod seqio;
pub mod session;
pub mod swissprot;

pub use accession::{Accession, AccessionError};
pub use detect::{Match, ResultSet};
pub use error::{Error, LookupError, Result};
pub use session::{Outcome, Session};

/// Crate version string (from `CARGO_PKG_VERSION`).
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Scan a sequence given as text. Shorthand for [`detect::scan_str`].
pub fn find_motifs(sequence: &str) -> ResultSet { detect::scan_str(sequence) }

/// Return `(position, constraint)` rows describing the motif, positions 1-based.
pub fn motif_rows() -> Vec<(usize, String)> {
    motif::MOTIF.constraints().iter().enumerate().map(|(i, c)| (i + 1, c.to_string())).collect()
}
