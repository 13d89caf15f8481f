//! Error definitions.
//!
//! This module defines the error handling surface of the simulator. It provides:
//! 1. **Configuration Errors:** Missing or invalid cache parameters; fatal before allocation.
//! 2. **Trace Errors:** Trace source that cannot be opened or read.
//! 3. **Parse Errors:** Per-line trace defects; recoverable, the line is skipped.
//! 4. **Summary Errors:** Failure to persist the result artifact.
//!
//! The cache model itself has no error type: every index it computes is
//! bounded by construction.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Invalid or incomplete simulator configuration.
///
/// Always fatal: reported to the operator before any cache is allocated.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A required parameter was not supplied on the command line or in a config file.
    #[error("Missing required command line argument: {0}")]
    MissingArgument(&'static str),

    /// A parameter that must be positive was zero.
    #[error("parameter `{0}` must be greater than zero")]
    ZeroParameter(&'static str),

    /// The tag would have no bits left: `s + b` exceeds the address width.
    #[error("set bits ({set_bits}) plus block bits ({block_bits}) exceed the 64-bit address width")]
    GeometryTooWide {
        /// Requested set-index width.
        set_bits: u32,
        /// Requested block-offset width.
        block_bits: u32,
    },

    /// `2^s * E` lines cannot be represented on this host.
    #[error("cache with 2^{set_bits} sets of {associativity} lines is too large to allocate")]
    CapacityOverflow {
        /// Requested set-index width.
        set_bits: u32,
        /// Requested lines per set.
        associativity: usize,
    },

    /// The configuration file could not be read.
    #[error("could not read config file {}: {source}", path.display())]
    Read {
        /// Path that failed to open.
        path: PathBuf,
        /// Underlying I/O error.
        source: io::Error,
    },

    /// The configuration file is not valid JSON for `CacheConfig`.
    #[error("could not parse config file {}: {source}", path.display())]
    Parse {
        /// Path of the malformed file.
        path: PathBuf,
        /// Underlying deserialization error.
        source: serde_json::Error,
    },
}

/// Failure to obtain or read the trace source.
///
/// Not a crash: the replay stops and the counters keep whatever was
/// accumulated (zero when the source never opened).
#[derive(Debug, Error)]
pub enum TraceError {
    /// The trace file could not be opened.
    #[error("could not open trace file {}: {source}", path.display())]
    Open {
        /// Path that failed to open.
        path: PathBuf,
        /// Underlying I/O error.
        source: io::Error,
    },

    /// Reading from an already-open trace failed.
    #[error("error reading trace: {0}")]
    Read(#[from] io::Error),

    /// A replay observer failed to report an outcome (e.g. stdout closed).
    #[error("error reporting access: {0}")]
    Report(#[source] io::Error),
}

/// A trace line that is not a well-formed access record.
///
/// Recoverable: the replayer skips the line and continues.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ParseError {
    /// The line contains no operation code.
    #[error("empty line")]
    Empty,

    /// The operation code is not one of `I`, `L`, `S`, `M`.
    #[error("unknown operation `{0}`")]
    UnknownOp(char),

    /// The operation code is not followed by whitespace and an address.
    #[error("missing address field")]
    MissingAddress,

    /// The address is not followed by `,<size>`.
    #[error("missing size field")]
    MissingSize,

    /// The address field is not valid hexadecimal.
    #[error("invalid hexadecimal address `{0}`")]
    BadAddress(String),

    /// The size field is not a valid decimal integer.
    #[error("invalid access size `{0}`")]
    BadSize(String),
}

/// Failure to persist the result artifact.
#[derive(Debug, Error)]
pub enum SummaryError {
    /// The results file could not be written.
    #[error("could not write results to {}: {source}", path.display())]
    Write {
        /// Destination path.
        path: PathBuf,
        /// Underlying I/O error.
        source: io::Error,
    },
}
