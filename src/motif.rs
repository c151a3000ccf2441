//! The fixed **six-residue motif** and the amino-acid alphabet it is defined over.
//!
//! The motif is a list of six per-position constraints. Each constraint is an explicit
//! finite set of residues that is either *required* ([`Constraint::In`]) or *forbidden*
//! ([`Constraint::NotIn`]). Forbidden sets are taken relative to the 20 canonical residues,
//! so a byte outside [`CANONICAL_RESIDUES`] never satisfies any position.
//!
//! Written as a character-class pattern the motif reads
//! `[^P][^PKRHW][VLSWFNQ][ILTYWFN][FIY][^PKRH]`.
//!
//! # Examples
//! ```
//! use motifscan::motif::MOTIF;
//! assert!(MOTIF.matches_window(b"KVLTYF"));
//! assert!(!MOTIF.matches_window(b"MKVLTY"));
//! assert_eq!(MOTIF.to_string(), "[^P][^PKRHW][VLSWFNQ][ILTYWFN][FIY][^PKRH]");
//! ```
use core::fmt;
use std::sync::LazyLock;

use bio::alphabets::Alphabet;

/// The 20 canonical amino acids, uppercase one-letter codes.
pub const CANONICAL_RESIDUES: &[u8; 20] = b"ACDEFGHIKLMNPQRSTVWY";

/// Width of the motif window.
pub const MOTIF_LEN: usize = 6;

/// A single positional predicate over residues.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum Constraint {
    /// Residue must be one of the listed symbols.
    In(&'static [u8]),
    /// Residue must be canonical and not one of the listed symbols.
    NotIn(&'static [u8]),
}

impl Constraint {
    /// The residues named by this constraint (required or forbidden, depending on the variant).
    pub fn residues(&self) -> &'static [u8] {
        match self { Constraint::In(r) | Constraint::NotIn(r) => r }
    }

    /// Materialise the set of canonical residues this constraint accepts.
    pub fn allowed(&self) -> Alphabet {
        let named = self.residues();
        match self {
            Constraint::In(_) => Alphabet::new(CANONICAL_RESIDUES.iter().filter(|r| named.contains(r))),
            Constraint::NotIn(_) => Alphabet::new(CANONICAL_RESIDUES.iter().filter(|r| !named.contains(r))),
        }
    }
}

impl fmt::Display for Constraint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let named = String::from_utf8_lossy(self.residues());
        match self {
            Constraint::In(_) => write!(f, "[{named}]"),
            Constraint::NotIn(_) => write!(f, "[^{named}]"),
        }
    }
}

/// The motif as declared, position by position.
pub const MOTIF_CONSTRAINTS: [Constraint; MOTIF_LEN] = [
    Constraint::NotIn(b"P"),
    Constraint::NotIn(b"PKRHW"),
    Constraint::In(b"VLSWFNQ"),
    Constraint::In(b"ILTYWFN"),
    Constraint::In(b"FIY"),
    Constraint::NotIn(b"PKRH"),
];

/// A motif with each position resolved to the concrete set of residues it accepts.
#[derive(Clone, Debug)]
pub struct Motif {
    constraints: [Constraint; MOTIF_LEN],
    allowed: [Alphabet; MOTIF_LEN],
}

/// The compiled motif used by [`crate::detect`].
pub static MOTIF: LazyLock<Motif> = LazyLock::new(|| Motif::new(MOTIF_CONSTRAINTS));

impl Motif {
    /// Resolve a list of constraints into per-position residue sets.
    pub fn new(constraints: [Constraint; MOTIF_LEN]) -> Self {
        let allowed = core::array::from_fn(|i| constraints[i].allowed());
        Self { constraints, allowed }
    }

    /// The declared constraints in position order.
    pub fn constraints(&self) -> &[Constraint; MOTIF_LEN] { &self.constraints }

    /// Does position `index` (0-based) accept `residue`?
    ///
    /// Positions past the end of the motif accept nothing.
    pub fn position_allows(&self, index: usize, residue: u8) -> bool {
        self.allowed
            .get(index)
            .is_some_and(|set| set.symbols.contains(residue as usize))
    }

    /// Test one candidate window. Windows of the wrong width never match.
    pub fn matches_window(&self, window: &[u8]) -> bool {
        window.len() == MOTIF_LEN
            && window.iter().enumerate().all(|(i, &r)| self.position_allows(i, r))
    }
}

impl fmt::Display for Motif {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for c in &self.constraints { write!(f, "{c}")?; }
        Ok(())
    }
}

/// `true` if `residue` is one of the 20 canonical amino-acid codes.
#[inline]
pub fn is_canonical(residue: u8) -> bool {
    CANONICAL_RESIDUES.contains(&residue)
}
