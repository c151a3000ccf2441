//! Motif detection over a protein sequence.
//!
//! The scan slides a [`MOTIF_LEN`]-wide window across the sequence **one residue at a
//! time**, so matched windows may overlap. Every matching window becomes a [`Match`] with
//! 1-based positions: `start` is the position of the first residue and `end` is one past
//! the last (`end == start + 6`).
//!
//! [`scan`] folds the matches into a [`ResultSet`] keyed by the matched text. When the
//! same six residues match at several offsets only the **last** one (highest offset) is
//! kept, while the key keeps the place in iteration order where it was first seen.
//!
//! # Examples
//! ```
//! use motifscan::detect::scan;
//! let hits = scan(b"MKVLTYFIYKRP");
//! assert_eq!(hits.len(), 1);
//! assert_eq!(hits.get("KVLTYF"), Some((2, 8)));
//! assert!(scan(b"KVLTY").is_empty());
//! ```
use std::collections::HashMap;

use serde::{Serialize, Serializer};
use tracing::{debug, trace};

use crate::motif::{is_canonical, MOTIF, MOTIF_LEN};

/// One motif occurrence.
#[derive(Clone, Debug, Eq, PartialEq, Hash, Serialize)]
pub struct Match {
    /// The six matched residues.
    pub subsequence: String,
    /// 1-based position of the first matched residue.
    pub start: usize,
    /// One past the 1-based position of the last matched residue.
    pub end: usize,
}

impl Match {
    /// Build a match from a 0-based window offset and the window itself.
    pub fn at(offset: usize, window: &[u8]) -> Self {
        Self {
            subsequence: String::from_utf8_lossy(window).into_owned(),
            start: offset + 1,
            end: offset + 1 + window.len(),
        }
    }

    /// 0-based half-open range of the match in the source sequence.
    pub fn range(&self) -> core::ops::Range<usize> { self.start - 1..self.end - 1 }
}

/// Matches keyed by subsequence, iterated in first-seen order.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct ResultSet {
    entries: Vec<Match>,
    index: HashMap<String, usize>,
}

impl ResultSet {
    pub fn new() -> Self { Self::default() }

    /// Insert a match. A match whose subsequence is already present replaces the stored
    /// positions in place; the returned value is the positions it displaced.
    pub fn insert(&mut self, m: Match) -> Option<(usize, usize)> {
        match self.index.get(&m.subsequence) {
            Some(&slot) => {
                let old = &mut self.entries[slot];
                let displaced = (old.start, old.end);
                old.start = m.start;
                old.end = m.end;
                Some(displaced)
            }
            None => {
                self.index.insert(m.subsequence.clone(), self.entries.len());
                self.entries.push(m);
                None
            }
        }
    }

    /// `(start, end)` for a subsequence, if it matched.
    pub fn get(&self, subsequence: &str) -> Option<(usize, usize)> {
        self.index.get(subsequence).map(|&i| (self.entries[i].start, self.entries[i].end))
    }

    pub fn contains(&self, subsequence: &str) -> bool { self.index.contains_key(subsequence) }

    pub fn len(&self) -> usize { self.entries.len() }

    pub fn is_empty(&self) -> bool { self.entries.is_empty() }

    /// Entries in display order.
    pub fn iter(&self) -> std::slice::Iter<'_, Match> { self.entries.iter() }
}

impl<'a> IntoIterator for &'a ResultSet {
    type Item = &'a Match;
    type IntoIter = std::slice::Iter<'a, Match>;
    fn into_iter(self) -> Self::IntoIter { self.entries.iter() }
}

impl Serialize for ResultSet {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.entries.iter())
    }
}

/// Every window matching the motif, in ascending offset order, without collapsing.
pub fn find_matches(sequence: &[u8]) -> Vec<Match> {
    let motif = &*MOTIF;
    let mut hits = Vec::new();
    // `windows` yields nothing for sequences shorter than the motif.
    for (offset, window) in sequence.windows(MOTIF_LEN).enumerate() {
        if motif.matches_window(window) {
            trace!(offset, "motif window matched");
            hits.push(Match::at(offset, window));
        }
    }
    hits
}

/// Scan `sequence` and collect matches keyed by their text (last occurrence wins).
pub fn scan(sequence: &[u8]) -> ResultSet {
    let mut results = ResultSet::new();
    for m in find_matches(sequence) {
        if let Some((start, end)) = results.insert(m) {
            trace!(start, end, "repeated motif text replaced an earlier occurrence");
        }
    }
    debug!(length = sequence.len(), matches = results.len(), "scan complete");
    results
}

/// [`scan`] over a string slice.
#[inline]
pub fn scan_str(sequence: &str) -> ResultSet { scan(sequence.as_bytes()) }

/// Count residues outside the canonical 20-letter alphabet.
pub fn non_canonical_count(sequence: &[u8]) -> usize {
    sequence.iter().filter(|&&r| !is_canonical(r)).count()
}
