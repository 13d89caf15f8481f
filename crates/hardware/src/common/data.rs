//! Memory Access Types.
//!
//! This module defines the classification of records found in a memory trace.
//! These types are used for the following:
//! 1. **Replay Dispatch:** Deciding how many cache accesses a record performs.
//! 2. **Filtering:** Dropping instruction fetches from data-cache simulation.
//! 3. **Verbose Output:** Echoing the one-letter operation code back to the user.

use std::fmt;

/// Type of memory access recorded in a trace.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AccessKind {
    /// Instruction fetch (`I`).
    ///
    /// Ignored by the data-cache replay.
    Instruction,

    /// Data load (`L`).
    ///
    /// Resolves one cache access.
    Load,

    /// Data store (`S`).
    ///
    /// Resolves one cache access. Stores are counted, never materialized.
    Store,

    /// Data modify (`M`).
    ///
    /// A load followed by a store to the same address; resolves two cache
    /// accesses, the second of which always hits.
    Modify,
}

impl AccessKind {
    /// Maps a trace operation code to its access kind.
    ///
    /// Returns `None` for any character outside `I`, `L`, `S`, `M`.
    pub const fn from_code(code: char) -> Option<Self> {
        match code {
            'I' => Some(Self::Instruction),
            'L' => Some(Self::Load),
            'S' => Some(Self::Store),
            'M' => Some(Self::Modify),
            _ => None,
        }
    }

    /// Returns the one-letter trace code for this kind.
    pub const fn code(self) -> char {
        match self {
            Self::Instruction => 'I',
            Self::Load => 'L',
            Self::Store => 'S',
            Self::Modify => 'M',
        }
    }

    /// Number of cache accesses one record of this kind resolves.
    pub const fn cache_accesses(self) -> usize {
        match self {
            Self::Instruction => 0,
            Self::Load | Self::Store => 1,
            Self::Modify => 2,
        }
    }
}

impl fmt::Display for AccessKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}
