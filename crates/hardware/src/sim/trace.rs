//! Trace record parsing.
//!
//! Traces are text files in the Valgrind `lackey` format, one access per line:
//!
//! ```text
//! I 0400d7d4,8
//!  M 0421c7f0,4
//!  L 04f6b868,8
//!  S 7ff0005c8,8
//! ```
//!
//! Each line is an operation code, whitespace, a hexadecimal address, a comma,
//! and a decimal size. Leading whitespace is ignored. Anything else is a
//! `ParseError`, which the replayer treats as a skippable line.

use std::str::FromStr;

use crate::common::data::AccessKind;
use crate::common::error::ParseError;

/// One parsed trace line.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AccessRecord {
    /// Operation performed.
    pub kind: AccessKind,
    /// Byte address accessed.
    pub address: u64,
    /// Access width in bytes. Recorded for output only: every access is
    /// assumed to touch a single cache line.
    pub size: u64,
}

impl AccessRecord {
    /// Creates a record.
    pub const fn new(kind: AccessKind, address: u64, size: u64) -> Self {
        Self {
            kind,
            address,
            size,
        }
    }

    /// Parses one trace line.
    ///
    /// # Errors
    ///
    /// A `ParseError` describing the first malformed field.
    pub fn parse(line: &str) -> Result<Self, ParseError> {
        let line = line.trim();
        let mut chars = line.chars();
        let code = chars.next().ok_or(ParseError::Empty)?;
        let kind = AccessKind::from_code(code).ok_or(ParseError::UnknownOp(code))?;

        let rest = chars.as_str();
        if !rest.starts_with(char::is_whitespace) {
            return Err(if rest.is_empty() {
                ParseError::MissingAddress
            } else {
                ParseError::UnknownOp(code)
            });
        }

        let (addr_field, size_field) = rest.split_once(',').ok_or_else(|| {
            if rest.trim().is_empty() {
                ParseError::MissingAddress
            } else {
                ParseError::MissingSize
            }
        })?;

        let addr_field = addr_field.trim();
        if addr_field.is_empty() {
            return Err(ParseError::MissingAddress);
        }
        let digits = addr_field
            .strip_prefix("0x")
            .or_else(|| addr_field.strip_prefix("0X"))
            .unwrap_or(addr_field);
        let address = u64::from_str_radix(digits, 16)
            .map_err(|_| ParseError::BadAddress(addr_field.to_string()))?;

        let size_field = size_field.trim();
        if size_field.is_empty() {
            return Err(ParseError::MissingSize);
        }
        let size = size_field
            .parse::<u64>()
            .map_err(|_| ParseError::BadSize(size_field.to_string()))?;

        Ok(Self::new(kind, address, size))
    }
}

impl FromStr for AccessRecord {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}
