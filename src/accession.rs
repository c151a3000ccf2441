//! Validation of **UniProtKB accession numbers**.
//!
//! Two shapes are accepted, and the first character alone decides which one applies:
//!
//! | Shape | First | Then                                               | Length |
//! |-------|-------|----------------------------------------------------|--------|
//! | A     | `OPQ` | digit, 3 × `[A-Z0-9]`, digit                       | 6      |
//! | B     | other uppercase letter | digit, 1–2 × (`[A-Z]`, 2 × `[A-Z0-9]`, digit) | 6 or 10 |
//!
//! The whole input has to fit a shape; nothing is trimmed or case-folded here. Passing
//! validation is the only way to obtain an [`Accession`], so lookups can never be handed
//! rejected text.
//!
//! # Examples
//! ```
//! use motifscan::accession::{validate, Shape};
//! assert_eq!(validate("P12345").unwrap().shape(), Shape::A);
//! assert_eq!(validate("A0A022YWF9").unwrap().shape(), Shape::B);
//! assert!(validate("123456").is_err());
//! ```
use core::fmt;

use thiserror::Error;

/// Why an input is not an accession.
#[derive(Clone, Debug, Eq, PartialEq, Error)]
pub enum AccessionError {
    #[error("no accession given")]
    Empty,
    #[error("expected {expected} characters, found {len}")]
    Length { len: usize, expected: &'static str },
    #[error("character {found:?} at position {position} is not {expected}")]
    Character { position: usize, found: char, expected: &'static str },
}

/// Which accession layout an identifier follows.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum Shape { A, B }

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self { Shape::A => f.write_str("A"), Shape::B => f.write_str("B") }
    }
}

/// A validated accession number.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct Accession {
    id: String,
    shape: Shape,
}

impl Accession {
    pub fn as_str(&self) -> &str { &self.id }
    pub fn shape(&self) -> Shape { self.shape }
}

impl fmt::Display for Accession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(&self.id) }
}

impl AsRef<str> for Accession {
    fn as_ref(&self) -> &str { &self.id }
}

impl core::str::FromStr for Accession {
    type Err = AccessionError;
    fn from_str(s: &str) -> Result<Self, Self::Err> { validate(s) }
}

#[derive(Clone, Copy, Debug)]
enum Class { Opq, NotOpq, Digit, Upper, UpperAlnum }

impl Class {
    fn admits(self, c: char) -> bool {
        match self {
            Class::Opq => matches!(c, 'O' | 'P' | 'Q'),
            Class::NotOpq => c.is_ascii_uppercase() && !matches!(c, 'O' | 'P' | 'Q'),
            Class::Digit => c.is_ascii_digit(),
            Class::Upper => c.is_ascii_uppercase(),
            Class::UpperAlnum => c.is_ascii_uppercase() || c.is_ascii_digit(),
        }
    }

    fn describe(self) -> &'static str {
        match self {
            Class::Opq => "one of O, P, Q",
            Class::NotOpq => "an uppercase letter other than O, P, Q",
            Class::Digit => "a digit",
            Class::Upper => "an uppercase letter",
            Class::UpperAlnum => "an uppercase letter or digit",
        }
    }
}

const SHAPE_A: [Class; 6] = [Class::Opq, Class::Digit, Class::UpperAlnum, Class::UpperAlnum, Class::UpperAlnum, Class::Digit];
const SHAPE_B_HEAD: [Class; 2] = [Class::NotOpq, Class::Digit];
const SHAPE_B_GROUP: [Class; 4] = [Class::Upper, Class::UpperAlnum, Class::UpperAlnum, Class::Digit];

fn check_classes<'a>(chars: &[char], classes: impl IntoIterator<Item = &'a Class>) -> Result<(), AccessionError> {
    for (i, (&c, class)) in chars.iter().zip(classes).enumerate() {
        if !class.admits(c) {
            return Err(AccessionError::Character { position: i + 1, found: c, expected: class.describe() });
        }
    }
    Ok(())
}

fn check_shape_a(chars: &[char]) -> Result<(), AccessionError> {
    if chars.len() != SHAPE_A.len() {
        return Err(AccessionError::Length { len: chars.len(), expected: "6" });
    }
    check_classes(chars, &SHAPE_A)
}

fn check_shape_b(chars: &[char]) -> Result<(), AccessionError> {
    let groups = match chars.len() {
        6 => 1,
        10 => 2,
        len => return Err(AccessionError::Length { len, expected: "6 or 10" }),
    };
    let classes = SHAPE_B_HEAD.iter().chain(SHAPE_B_GROUP.iter().cycle().take(groups * SHAPE_B_GROUP.len()));
    check_classes(chars, classes)
}

/// Validate `input` against both accession shapes.
pub fn validate(input: &str) -> Result<Accession, AccessionError> {
    let chars: Vec<char> = input.chars().collect();
    let first = *chars.first().ok_or(AccessionError::Empty)?;
    let shape = if Class::Opq.admits(first) {
        check_shape_a(&chars)?;
        Shape::A
    } else if Class::NotOpq.admits(first) {
        check_shape_b(&chars)?;
        Shape::B
    } else {
        return Err(AccessionError::Character { position: 1, found: first, expected: "an uppercase letter" });
    };
    Ok(Accession { id: input.to_string(), shape })
}

/// `true` if `input` is a well-formed accession.
pub fn is_valid(input: &str) -> bool { validate(input).is_ok() }

/// `true` if `input` fits shape A exactly.
pub fn matches_shape_a(input: &str) -> bool {
    check_shape_a(&input.chars().collect::<Vec<_>>()).is_ok()
}

/// `true` if `input` fits shape B exactly.
pub fn matches_shape_b(input: &str) -> bool {
    check_shape_b(&input.chars().collect::<Vec<_>>()).is_ok()
}
