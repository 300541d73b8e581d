//! Column and row name validation
//!
//! Column names are one or more ASCII letters (`A`, `Price`, `zz`), row names
//! one or more ASCII digits (`1`, `042`). Names are case-sensitive and must be
//! unique within their axis.

use crate::error::{Error, Result};
use ahash::AHashSet;
use std::fmt;

/// Which axis a name belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum KeyKind {
    Column,
    Row,
}

impl KeyKind {
    /// Check a single name against this axis' lexical shape
    pub fn matches(&self, name: &str) -> bool {
        if name.is_empty() {
            return false;
        }
        match self {
            KeyKind::Column => name.bytes().all(|b| b.is_ascii_alphabetic()),
            KeyKind::Row => name.bytes().all(|b| b.is_ascii_digit()),
        }
    }

    /// Human readable shape, used in error messages
    pub fn expected_shape(&self) -> &'static str {
        match self {
            KeyKind::Column => "one or more ASCII letters",
            KeyKind::Row => "one or more ASCII digits",
        }
    }
}

impl fmt::Display for KeyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KeyKind::Column => f.write_str("column"),
            KeyKind::Row => f.write_str("row"),
        }
    }
}

/// Validate an ordered sequence of names
///
/// Names are checked in order; the first failing name is reported. A name with
/// the wrong shape is reported as [`Error::InvalidKeyShape`] even if it is also
/// a duplicate of an earlier name.
pub fn validate_keys<S: AsRef<str>>(names: &[S], kind: KeyKind) -> Result<()> {
    let mut seen = AHashSet::with_capacity(names.len());

    for name in names {
        let name = name.as_ref();
        if !kind.matches(name) {
            return Err(Error::InvalidKeyShape {
                kind,
                name: name.to_string(),
            });
        }
        if !seen.insert(name) {
            return Err(Error::DuplicateKey {
                kind,
                name: name.to_string(),
            });
        }
    }

    Ok(())
}
