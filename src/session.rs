//! The scan trigger: validate → look up → scan.
//!
//! A [`Session`] owns a [`RecordProvider`] and nothing else; each [`Session::run`] starts
//! from scratch and hands back an [`Outcome`] by value.
//!
//! # Examples
//! ```
//! use motifscan::accession::Accession;
//! use motifscan::error::LookupError;
//! use motifscan::provider::{ProteinRecord, RecordProvider};
//! use motifscan::session::{Outcome, Session};
//!
//! struct Fixed;
//! impl RecordProvider for Fixed {
//!     fn fetch(&self, a: &Accession) -> Result<ProteinRecord, LookupError> {
//!         Ok(ProteinRecord { accession: a.to_string(), sequence: "MKVLTYFIYKRP".into(), description: "demo".into() })
//!     }
//! }
//!
//! let session = Session::new(Fixed);
//! match session.run("P12345").unwrap() {
//!     Outcome::Scanned(r) => assert_eq!(r.results.get("KVLTYF"), Some((2, 8))),
//!     Outcome::Rejected { .. } => unreachable!(),
//! }
//! assert!(matches!(session.run("123456").unwrap(), Outcome::Rejected { .. }));
//! ```
use tracing::{info, info_span, warn};

use crate::accession::{self, AccessionError};
use crate::detect;
use crate::error::Result;
use crate::provider::RecordProvider;
use crate::report::Report;

/// Result of one trigger.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// The input was not an accession; no lookup happened.
    Rejected { input: String, reason: AccessionError },
    /// The record was fetched and scanned (possibly with zero matches).
    Scanned(Report),
}

impl Outcome {
    pub fn is_rejected(&self) -> bool { matches!(self, Outcome::Rejected { .. }) }
}

pub struct Session<P> {
    provider: P,
}

impl<P: RecordProvider> Session<P> {
    pub fn new(provider: P) -> Self { Self { provider } }

    pub fn provider(&self) -> &P { &self.provider }

    /// Run one scan for the text typed by the user.
    ///
    /// Surrounding whitespace is ignored. Lookup failures are returned as `Err`; they are
    /// never reported as a rejection.
    pub fn run(&self, input: &str) -> Result<Outcome> {
        let input = input.trim();
        let accession = match accession::validate(input) {
            Ok(a) => a,
            Err(reason) => {
                info!(input, %reason, "rejected accession");
                return Ok(Outcome::Rejected { input: input.to_string(), reason });
            }
        };

        let _span = info_span!("scan", %accession).entered();
        let record = self.provider.fetch(&accession)?;

        let sequence = record.sequence.as_bytes();
        let odd = detect::non_canonical_count(sequence);
        if odd > 0 {
            warn!(count = odd, "sequence contains non-canonical residues; windows containing them cannot match");
        }
        let results = detect::scan(sequence);
        info!(length = sequence.len(), matches = results.len(), "scan finished");

        Ok(Outcome::Scanned(Report {
            accession: record.accession,
            description: record.description,
            length: sequence.len(),
            results,
        }))
    }
}
