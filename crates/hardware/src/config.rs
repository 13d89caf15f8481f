//! Configuration system for the cache simulator.
//!
//! This module defines the configuration structures used to parameterize
//! the simulator. It provides:
//! 1. **Parameters:** `CacheConfig`, the raw `s`, `E`, `b`, and trace path, any of which may be absent.
//! 2. **Layering:** JSON config files deserialized with `serde_json`, overridden field-by-field by CLI flags.
//! 3. **Validation:** `CacheGeometry`, the checked and derived shape of the cache (`S`, `E`, `B`, masks).
//!
//! Every parameter is required. A missing or zero value is a fatal
//! `ConfigError` raised before any cache storage is allocated.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::common::addr::AddressLayout;
use crate::common::constants::{ADDRESS_BITS, MAX_CACHE_LINES};
use crate::common::error::ConfigError;

/// Flag names reported in `ConfigError::MissingArgument`.
mod flags {
    /// Set-index bits.
    pub const SET_BITS: &str = "-s";
    /// Lines per set.
    pub const ASSOCIATIVITY: &str = "-E";
    /// Block-offset bits.
    pub const BLOCK_BITS: &str = "-b";
    /// Trace file.
    pub const TRACE: &str = "-t";
}

/// Raw, unvalidated simulator parameters.
///
/// Deserializable from JSON; the cache-lab flag letters (`s`, `E`, `b`, `t`)
/// are accepted as aliases so a config file can mirror the command line:
///
/// ```json
/// { "s": 4, "E": 1, "b": 4, "t": "traces/yi.trace" }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CacheConfig {
    /// Number of set-index bits (`s`); the cache has `2^s` sets.
    #[serde(default, alias = "s")]
    pub set_bits: Option<u32>,

    /// Number of lines per set (`E`).
    #[serde(default, alias = "E")]
    pub associativity: Option<usize>,

    /// Number of block-offset bits (`b`); blocks are `2^b` bytes.
    #[serde(default, alias = "b")]
    pub block_bits: Option<u32>,

    /// Path of the trace to replay (`t`).
    #[serde(default, alias = "t")]
    pub trace: Option<PathBuf>,
}

impl CacheConfig {
    /// Loads a configuration from a JSON file.
    ///
    /// # Errors
    ///
    /// `ConfigError::Read` if the file cannot be read, `ConfigError::Parse`
    /// if it is not a valid `CacheConfig` document.
    pub fn from_json_file(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Layers `overrides` on top of `self`.
    ///
    /// Every field present in `overrides` wins; absent fields fall back to
    /// the value in `self`.
    #[must_use]
    pub fn merge(self, overrides: Self) -> Self {
        Self {
            set_bits: overrides.set_bits.or(self.set_bits),
            associativity: overrides.associativity.or(self.associativity),
            block_bits: overrides.block_bits.or(self.block_bits),
            trace: overrides.trace.or(self.trace),
        }
    }

    /// Validates the cache parameters and derives the cache shape.
    ///
    /// # Errors
    ///
    /// Returns the first problem found, checking `s`, `E`, `b` in that order
    /// for absence, then for zero, then the combined width and capacity.
    pub fn geometry(&self) -> Result<CacheGeometry, ConfigError> {
        let set_bits = self
            .set_bits
            .ok_or(ConfigError::MissingArgument(flags::SET_BITS))?;
        let associativity = self
            .associativity
            .ok_or(ConfigError::MissingArgument(flags::ASSOCIATIVITY))?;
        let block_bits = self
            .block_bits
            .ok_or(ConfigError::MissingArgument(flags::BLOCK_BITS))?;

        CacheGeometry::new(set_bits, associativity, block_bits)
    }

    /// Returns the trace path.
    ///
    /// # Errors
    ///
    /// `ConfigError::MissingArgument` when no trace was configured.
    pub fn trace_path(&self) -> Result<&Path, ConfigError> {
        self.trace
            .as_deref()
            .ok_or(ConfigError::MissingArgument(flags::TRACE))
    }
}

/// Validated shape of a set-associative cache.
///
/// `S = 2^s` sets of `E` lines each, with `B = 2^b`-byte blocks. Fixed for
/// the lifetime of the cache built from it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CacheGeometry {
    layout: AddressLayout,
    num_sets: usize,
    associativity: usize,
    block_bytes: u64,
}

impl CacheGeometry {
    /// Validates `s`, `E`, `b` and derives `S` and `B`.
    ///
    /// # Errors
    ///
    /// * `ConfigError::ZeroParameter` if any parameter is zero.
    /// * `ConfigError::GeometryTooWide` if `s + b` exceeds the address width.
    /// * `ConfigError::CapacityOverflow` if `2^s * E` exceeds `MAX_CACHE_LINES`.
    pub fn new(set_bits: u32, associativity: usize, block_bits: u32) -> Result<Self, ConfigError> {
        if set_bits == 0 {
            return Err(ConfigError::ZeroParameter("s"));
        }
        if associativity == 0 {
            return Err(ConfigError::ZeroParameter("E"));
        }
        if block_bits == 0 {
            return Err(ConfigError::ZeroParameter("b"));
        }
        if set_bits.saturating_add(block_bits) > ADDRESS_BITS {
            return Err(ConfigError::GeometryTooWide {
                set_bits,
                block_bits,
            });
        }

        let num_sets = 1u64
            .checked_shl(set_bits)
            .filter(|&sets| {
                sets.checked_mul(associativity as u64)
                    .is_some_and(|lines| lines <= MAX_CACHE_LINES)
            })
            .ok_or(ConfigError::CapacityOverflow {
                set_bits,
                associativity,
            })?;

        Ok(Self {
            layout: AddressLayout::new(set_bits, block_bits),
            num_sets: num_sets as usize,
            associativity,
            block_bytes: 1u64 << block_bits,
        })
    }

    /// Address field widths for this cache.
    #[inline(always)]
    pub const fn layout(&self) -> AddressLayout {
        self.layout
    }

    /// Number of set-index bits (`s`).
    #[inline(always)]
    pub const fn set_bits(&self) -> u32 {
        self.layout.set_bits
    }

    /// Number of block-offset bits (`b`).
    #[inline(always)]
    pub const fn block_bits(&self) -> u32 {
        self.layout.block_bits
    }

    /// Number of sets (`S = 2^s`).
    #[inline(always)]
    pub const fn num_sets(&self) -> usize {
        self.num_sets
    }

    /// Lines per set (`E`).
    #[inline(always)]
    pub const fn associativity(&self) -> usize {
        self.associativity
    }

    /// Block size in bytes (`B = 2^b`).
    #[inline(always)]
    pub const fn block_bytes(&self) -> u64 {
        self.block_bytes
    }

    /// Total number of lines (`S * E`).
    #[inline(always)]
    pub const fn total_lines(&self) -> usize {
        self.num_sets * self.associativity
    }
}
