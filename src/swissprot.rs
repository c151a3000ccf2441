//! Swiss-Prot / UniProtKB **flat file** parser.
//!
//! Only the lines needed to scan a protein are interpreted:
//! `ID` (entry name), `AC` (accessions), `DE` (description), `SQ` plus the
//! indented sequence block, and the `//` terminator. Everything else is skipped.
//! See <https://web.expasy.org/docs/userman.html> for the format.
use std::io::{BufRead, BufReader, Read};

use thiserror::Error;
use tracing::warn;

#[derive(Debug, Error)]
pub enum ParseError {
    #[error("failed to read flat file: {0}")]
    Io(#[from] std::io::Error),
    #[error("entry ending at line {line} has no AC line")]
    MissingAccession { line: usize },
    #[error("no entries found")]
    Empty,
}

/// One parsed entry.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct SwissProtEntry {
    /// Entry name from the `ID` line, e.g. `AATM_RABIT`.
    pub entry_name: Option<String>,
    /// Primary accession first, then secondary accessions, in file order.
    pub accessions: Vec<String>,
    /// All `DE` line payloads joined by single spaces.
    pub description: String,
    /// Length declared on the `SQ` line.
    pub declared_length: Option<usize>,
    pub sequence: String,
}

impl SwissProtEntry {
    /// First accession on the `AC` lines; `None` only for hand-built entries.
    pub fn primary_accession(&self) -> Option<&str> { self.accessions.first().map(String::as_str) }

    /// `true` if `accession` is the primary or a secondary accession of this entry.
    pub fn has_accession(&self, accession: &str) -> bool {
        self.accessions.iter().any(|a| a == accession)
    }
}

#[derive(Default)]
struct EntryBuilder {
    entry_name: Option<String>,
    accessions: Vec<String>,
    description: Vec<String>,
    declared_length: Option<usize>,
    sequence: String,
    in_sequence: bool,
    touched: bool,
}

impl EntryBuilder {
    /// ID   AATM_RABIT              Reviewed;         413 AA.
    fn parse_id_line(&mut self, payload: &str) {
        self.entry_name = payload.split_whitespace().next().map(str::to_string);
    }

    /// AC   P12345; Q00001;
    fn parse_ac_line(&mut self, payload: &str) {
        self.accessions.extend(
            payload.split(';').map(str::trim).filter(|a| !a.is_empty()).map(str::to_string),
        );
    }

    /// DE   RecName: Full=Aspartate aminotransferase, mitochondrial;
    fn parse_de_line(&mut self, payload: &str) {
        let payload = payload.trim();
        if !payload.is_empty() { self.description.push(payload.to_string()); }
    }

    /// SQ   SEQUENCE   413 AA;  47409 MW;  ...
    fn parse_sq_line(&mut self, payload: &str) {
        let parts: Vec<&str> = payload.split_whitespace().collect();
        self.declared_length = parts
            .windows(2)
            .find(|w| w[1] == "AA;")
            .and_then(|w| w[0].parse().ok());
        self.in_sequence = true;
    }

    fn parse_sequence_line(&mut self, line: &str) {
        self.sequence.extend(line.split_whitespace().flat_map(str::chars));
    }

    fn build(self, line: usize) -> Result<SwissProtEntry, ParseError> {
        if self.accessions.is_empty() {
            return Err(ParseError::MissingAccession { line });
        }
        if let Some(declared) = self.declared_length {
            if declared != self.sequence.len() {
                warn!(accession = %self.accessions[0], declared, parsed = self.sequence.len(), "SQ length disagrees with sequence block");
            }
        }
        Ok(SwissProtEntry {
            entry_name: self.entry_name,
            accessions: self.accessions,
            description: self.description.join(" "),
            declared_length: self.declared_length,
            sequence: self.sequence,
        })
    }
}

/// Parse every entry from a reader.
pub fn parse_reader<R: Read>(reader: R) -> Result<Vec<SwissProtEntry>, ParseError> {
    let mut entries = Vec::new();
    let mut current = EntryBuilder::default();
    let mut line_no = 0;

    for line in BufReader::new(reader).lines() {
        let line = line?;
        line_no += 1;

        if line.starts_with("//") {
            entries.push(std::mem::take(&mut current).build(line_no)?);
            continue;
        }
        if line.trim().is_empty() { continue; }
        current.touched = true;

        if current.in_sequence && line.starts_with("     ") {
            current.parse_sequence_line(&line);
            continue;
        }
        // Two-letter line code, three spaces, payload.
        let payload = line.get(5..).unwrap_or("");
        match line.get(..2).unwrap_or("") {
            "ID" => current.parse_id_line(payload),
            "AC" => current.parse_ac_line(payload),
            "DE" => current.parse_de_line(payload),
            "SQ" => current.parse_sq_line(payload),
            _ => {}
        }
    }

    // Tolerate a final entry without its `//`.
    if current.touched {
        entries.push(current.build(line_no)?);
    }
    Ok(entries)
}

/// Parse every entry in `text`.
pub fn parse_entries(text: &str) -> Result<Vec<SwissProtEntry>, ParseError> {
    parse_reader(text.as_bytes())
}

/// Parse the first entry in `text`.
pub fn parse_entry(text: &str) -> Result<SwissProtEntry, ParseError> {
    parse_entries(text)?.into_iter().next().ok_or(ParseError::Empty)
}

#[cfg(test)]
mod tests {
    use super::*;

    const ENTRY: &str = "\
ID   TEST1_HUMAN             Reviewed;          12 AA.
AC   P12345; Q00001;
AC   Q00002;
DT   01-JAN-1990, integrated into UniProtKB/Swiss-Prot.
DE   RecName: Full=Motif test protein;
DE   AltName: Full=Fixture protein 1;
GN   Name=TST1;
OS   Homo sapiens (Human).
OX   NCBI_TaxID=9606;
SQ   SEQUENCE   12 AA;  1500 MW;  0000000000000000 CRC64;
     MKVLTYFIYK RP
//
";

    #[test]
    fn parses_core_fields() {
        let e = parse_entry(ENTRY).unwrap();
        assert_eq!(e.entry_name.as_deref(), Some("TEST1_HUMAN"));
        assert_eq!(e.accessions, vec!["P12345", "Q00001", "Q00002"]);
        assert_eq!(e.primary_accession(), Some("P12345"));
        assert_eq!(e.description, "RecName: Full=Motif test protein; AltName: Full=Fixture protein 1;");
        assert_eq!(e.declared_length, Some(12));
        assert_eq!(e.sequence, "MKVLTYFIYKRP");
    }

    #[test]
    fn secondary_accessions_are_recognised() {
        let e = parse_entry(ENTRY).unwrap();
        assert!(e.has_accession("Q00002"));
        assert!(!e.has_accession("P99999"));
    }

    #[test]
    fn multiple_entries_and_missing_terminator() {
        let text = format!("{ENTRY}ID   TEST2\nAC   A0A022YWF9;\nDE   SubName: Full=Second;\nSQ   SEQUENCE   6 AA;\n     AALLFF\n");
        let entries = parse_entries(&text).unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[1].primary_accession(), Some("A0A022YWF9"));
        assert_eq!(entries[1].sequence, "AALLFF");
    }

    #[test]
    fn entry_without_accession_is_an_error() {
        let err = parse_entries("ID   NOAC\nSQ   SEQUENCE   1 AA;\n     M\n//\n").unwrap_err();
        assert!(matches!(err, ParseError::MissingAccession { line: 4 }));
    }

    #[test]
    fn hand_built_entry_without_accessions_has_no_primary() {
        let e = SwissProtEntry::default();
        assert_eq!(e.primary_accession(), None);
        assert!(!e.has_accession("P12345"));
    }

    #[test]
    fn empty_text_has_no_entry() {
        assert!(parse_entries("").unwrap().is_empty());
        assert!(matches!(parse_entry("\n\n"), Err(ParseError::Empty)));
    }

    #[test]
    fn length_mismatch_is_tolerated() {
        let e = parse_entry("AC   P11111;\nSQ   SEQUENCE   9 AA;\n     MKV\n//\n").unwrap();
        assert_eq!(e.declared_length, Some(9));
        assert_eq!(e.sequence, "MKV");
    }
}
