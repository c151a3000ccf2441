//! FASTA input for local protein lookups.
//!
//! ### Design
//! - Records are parsed with `needletail` (plain or gzipped FASTA/FASTQ).
//! - Headers are split into an **accession** and a **description**. UniProt-style
//!   headers (`>sp|P12345|AATM_RABIT Aspartate aminotransferase OS=...`) use the middle
//!   field as the accession; anything else uses the first whitespace-delimited token.
//!
//! ### Example
//! ```no_run
//! use motifscan::seqio;
//! let n = seqio::for_each_record("uniprot_sprot.fasta", |r| {
//!     println!("{} {}", r.accession, r.sequence.len());
//!     std::ops::ControlFlow::Continue(())
//! }).unwrap();
//! println!("read {n} records");
//! ```
use std::ops::ControlFlow;
use std::path::Path;

use needletail::parse_fastx_file;

use crate::error::LookupError;

/// A FASTA record with its header already split.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FastaRecord {
    pub accession: String,
    pub description: String,
    pub sequence: String,
}

/// Split a header (without the leading `>`) into accession and description.
pub fn split_header(header: &str) -> (String, String) {
    let header = header.trim();
    let (token, rest) = header.split_once(char::is_whitespace).unwrap_or((header, ""));
    let fields: Vec<&str> = token.split('|').collect();
    let accession = match fields.as_slice() {
        [_db, acc, _name] => *acc,
        _ => token,
    };
    (accession.to_string(), rest.trim().to_string())
}

/// Iterate records in file order until `on_record` breaks. Returns how many were read.
pub fn for_each_record<P, F>(path: P, mut on_record: F) -> Result<usize, LookupError>
where
    P: AsRef<Path>,
    F: FnMut(FastaRecord) -> ControlFlow<()>,
{
    let p = path.as_ref();
    if !p.exists() {
        return Err(LookupError::Io(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            format!("{} does not exist", p.display()),
        )));
    }
    let mut reader = parse_fastx_file(p).map_err(|e| LookupError::Fastx(e.to_string()))?;
    let mut n = 0usize;
    while let Some(record) = reader.next() {
        let rec = record.map_err(|e| LookupError::Fastx(e.to_string()))?;
        let (accession, description) = split_header(&String::from_utf8_lossy(rec.id()));
        let sequence = String::from_utf8_lossy(&rec.seq()).into_owned();
        n += 1;
        if on_record(FastaRecord { accession, description, sequence }).is_break() {
            break;
        }
    }
    Ok(n)
}

/// Find the first record whose accession equals `accession`.
pub fn find_record<P: AsRef<Path>>(path: P, accession: &str) -> Result<Option<FastaRecord>, LookupError> {
    let mut found = None;
    for_each_record(path, |r| {
        if r.accession == accession {
            found = Some(r);
            ControlFlow::Break(())
        } else {
            ControlFlow::Continue(())
        }
    })?;
    Ok(found)
}
