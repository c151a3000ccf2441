//! Rendering scan results for people and for pipelines.
//!
//! [`Format::Text`] reproduces the classic three-column listing: a
//! `Sequence    Start   End` header, one row per match with every field padded to
//! eight columns, then the protein description. The other formats carry the same rows
//! as a polars table, CSV, or JSON.
use std::io::Write;

use clap::ValueEnum;
use polars::prelude::*;
use serde::Serialize;

use crate::accession::AccessionError;
use crate::detect::ResultSet;

/// Header row of the text listing.
pub const TEXT_HEADER: &str = "Sequence    Start   End";

/// One completed scan, ready to display.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Report {
    /// Empty for a sequence that did not come from a record.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub accession: String,
    pub description: String,
    /// Length of the scanned sequence.
    pub length: usize,
    #[serde(rename = "matches")]
    pub results: ResultSet,
}

impl Report {
    /// `(subsequence, start, end)` in display order.
    pub fn rows(&self) -> impl Iterator<Item = (&str, usize, usize)> + '_ {
        self.results.iter().map(|m| (m.subsequence.as_str(), m.start, m.end))
    }

    /// Matches as a `sequence`/`start`/`end` DataFrame.
    pub fn to_dataframe(&self) -> PolarsResult<DataFrame> {
        df!(
            "sequence" => self.rows().map(|r| r.0.to_string()).collect::<Vec<_>>(),
            "start"    => self.rows().map(|r| r.1 as u64).collect::<Vec<_>>(),
            "end"      => self.rows().map(|r| r.2 as u64).collect::<Vec<_>>(),
        )
    }
}

/// Output layout.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, ValueEnum)]
pub enum Format {
    #[default]
    Text,
    Table,
    Csv,
    Json,
}

/// Display seam used by the CLI.
pub trait ReportSink {
    fn render(&mut self, report: &Report) -> anyhow::Result<()>;
    fn reject(&mut self, input: &str, reason: &AccessionError) -> anyhow::Result<()>;
}

/// Writes reports in one [`Format`] to any writer.
pub struct WriterSink<W: Write> {
    out: W,
    format: Format,
}

impl<W: Write> WriterSink<W> {
    pub fn new(out: W, format: Format) -> Self { Self { out, format } }
    pub fn into_inner(self) -> W { self.out }

    fn render_text(&mut self, report: &Report) -> anyhow::Result<()> {
        writeln!(self.out, "{TEXT_HEADER}")?;
        for (seq, start, end) in report.rows() {
            writeln!(self.out, "{:8}{:8}{:8}", seq, start, end)?;
        }
        writeln!(self.out, "{}", report.description)?;
        Ok(())
    }
}

impl<W: Write> ReportSink for WriterSink<W> {
    fn render(&mut self, report: &Report) -> anyhow::Result<()> {
        match self.format {
            Format::Text => self.render_text(report)?,
            Format::Table => {
                let df = report.to_dataframe()?;
                writeln!(self.out, "{df}")?;
                writeln!(self.out, "{}", report.description)?;
            }
            Format::Csv => {
                let mut df = report.to_dataframe()?;
                CsvWriter::new(&mut self.out).include_header(true).finish(&mut df)?;
            }
            Format::Json => {
                serde_json::to_writer_pretty(&mut self.out, report)?;
                writeln!(self.out)?;
            }
        }
        self.out.flush()?;
        Ok(())
    }

    fn reject(&mut self, input: &str, reason: &AccessionError) -> anyhow::Result<()> {
        match self.format {
            Format::Json => {
                let body = serde_json::json!({ "input": input, "rejected": true, "reason": reason.to_string() });
                serde_json::to_writer_pretty(&mut self.out, &body)?;
                writeln!(self.out)?;
            }
            _ => writeln!(self.out, "Not a valid protein number: {input:?} ({reason})")?,
        }
        self.out.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::detect::scan_str;

    fn report(seq: &str) -> Report {
        Report {
            accession: "Q00001".into(),
            description: "RecName: Full=First;".into(),
            length: seq.len(),
            results: scan_str(seq),
        }
    }

    fn render(format: Format, r: &Report) -> String {
        let mut sink = WriterSink::new(Vec::new(), format);
        sink.render(r).unwrap();
        String::from_utf8(sink.into_inner()).unwrap()
    }

    #[test]
    fn text_listing_pads_columns_to_eight() {
        let out = render(Format::Text, &report("MKVLTYFIYKRP"));
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines, vec![TEXT_HEADER, "KVLTYF         2       8", "RecName: Full=First;"]);
    }

    #[test]
    fn empty_results_still_print_header_and_description() {
        let out = render(Format::Text, &report("PPPPPPPP"));
        assert_eq!(out, format!("{TEXT_HEADER}\nRecName: Full=First;\n"));
    }

    #[test]
    fn csv_has_header_then_rows_in_display_order() {
        let out = render(Format::Csv, &report("AALLFFGGGAALLFF"));
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines, vec!["sequence,start,end", "AALLFF,10,16", "ALLFFG,2,8"]);
    }

    #[test]
    fn json_carries_description_and_matches() {
        let out = render(Format::Json, &report("MKVLTYFIYKRP"));
        let v: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(v["accession"], "Q00001");
        assert_eq!(v["length"], 12);
        assert_eq!(v["matches"][0]["subsequence"], "KVLTYF");
        assert_eq!(v["matches"][0]["end"], 8);
    }

    #[test]
    fn json_omits_a_missing_accession() {
        let r = Report { accession: String::new(), ..report("MKVLTYFIYKRP") };
        let v: serde_json::Value = serde_json::from_str(&render(Format::Json, &r)).unwrap();
        assert!(v.get("accession").is_none());
        assert_eq!(v["description"], "RecName: Full=First;");
    }

    #[test]
    fn table_lists_every_match() {
        let out = render(Format::Table, &report("AAAAAAAALLFFA"));
        assert!(out.contains("AALLFF") && out.contains("ALLFFA"));
        assert!(out.trim_end().ends_with("RecName: Full=First;"));
    }

    #[test]
    fn rejection_is_distinct_from_an_empty_report() {
        let mut sink = WriterSink::new(Vec::new(), Format::Text);
        sink.reject("123456", &AccessionError::Empty).unwrap();
        let out = String::from_utf8(sink.into_inner()).unwrap();
        assert!(out.starts_with("Not a valid protein number"));
        assert!(!out.contains(TEXT_HEADER));
    }
}
